//! Orbit model benchmarks.
//!
//! Run with: `cargo bench --bench orbit_model`

use chrono::Duration;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use spacecast::catalog::{ORBITERS, SOLAR_SYSTEM};
use spacecast::orbit::{self, EllipticalOrbit, OrbitalElements};

fn bench_precompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("elliptical_precompute");
    for record in ORBITERS.iter() {
        let elements = OrbitalElements::from(record);
        group.bench_function(record.name, |b| {
            b.iter(|| EllipticalOrbit::new(black_box(elements)))
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let orbits: Vec<EllipticalOrbit> = ORBITERS
        .iter()
        .filter_map(|r| EllipticalOrbit::new(OrbitalElements::from(r)).ok())
        .collect();
    let start = orbit::base_epoch();

    c.bench_function("elliptical_position_at", |b| {
        let mut day = 0i64;
        b.iter(|| {
            day += 1;
            let date = start + Duration::days(day);
            for o in &orbits {
                black_box(o.position_at(date));
            }
        })
    });

    c.bench_function("circular_position_at", |b| {
        let mut day = 0i64;
        b.iter(|| {
            day += 1;
            let date = start + Duration::days(day);
            for body in SOLAR_SYSTEM.iter() {
                black_box(orbit::position_on_circular_orbit(body, date));
            }
        })
    });
}

criterion_group!(benches, bench_precompute, bench_lookup);
criterion_main!(benches);
