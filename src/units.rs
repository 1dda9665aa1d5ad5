//! Distance units and angle conversions.
//!
//! Every distance in Spacecast is a multiple of one base unit: the diameter of
//! the Earth. All other units are derived from it here and nowhere else.
//!
//! # Example
//!
//! ```
//! use spacecast::units::{self, AU, LIGHT_YEAR};
//!
//! assert_eq!(units::light_years_to_units(1.0), LIGHT_YEAR);
//! assert_eq!(LIGHT_YEAR, AU * 63241.0);
//! ```

use std::f64::consts::PI;

use chrono::{DateTime, Utc};
use glam::DVec3;

/// The base distance unit.
pub const EARTH_DIAMETER: f64 = 1.0;

/// Statute miles in one Earth diameter.
pub const MILES_PER_EARTH_DIAMETER: f64 = 7917.0;

/// One statute mile.
pub const MILE: f64 = EARTH_DIAMETER / MILES_PER_EARTH_DIAMETER;

/// One astronomical unit.
pub const AU: f64 = EARTH_DIAMETER * 11740.0;

/// One light-year.
pub const LIGHT_YEAR: f64 = AU * 63241.0;

/// Radius of the Milky Way (100k light-years).
pub const MILKY_WAY_RADIUS: f64 = LIGHT_YEAR * 100_000.0;

/// Milliseconds in one simulated day.
pub const ONE_DAY_MS: i64 = 86_400_000;

/// Convert light-years to base units.
#[inline]
pub fn light_years_to_units(n: f64) -> f64 {
    n * LIGHT_YEAR
}

/// Convert miles to base units.
#[inline]
pub fn miles_to_units(n: f64) -> f64 {
    n * MILE
}

/// Convert astronomical units to base units.
#[inline]
pub fn au_to_units(n: f64) -> f64 {
    n * AU
}

/// Convert a sexagesimal right ascension (hours, minutes, seconds) to radians.
///
/// Inputs are not range checked. Values outside `h ∈ [0, 24)`, `m, s ∈ [0, 60)`
/// still produce an angle, just not a meaningful one.
pub fn right_ascension_to_radians(h: f64, m: f64, s: f64) -> f64 {
    let degrees = h * 15.0 + m * 0.5 + s * (0.5 / 60.0);
    degrees * (PI / 180.0)
}

/// Convert a declination (degrees, arcminutes, arcseconds) to a polar angle
/// measured from the north celestial pole, in radians.
///
/// `d`, `m` and `s` are the magnitude of the declination; `is_south` carries the
/// sign. The equator maps to `π/2`, the north pole to `0`, the south pole to `π`.
/// The catalog is authored against this convention.
pub fn declination_to_radians(d: f64, m: f64, s: f64, is_south: bool) -> f64 {
    let declination = d + m / 60.0 + s / 3600.0;
    let polar = if is_south {
        90.0 + declination
    } else {
        90.0 - declination
    };
    polar * (PI / 180.0)
}

/// Smallest power of two greater than or equal to `n`.
///
/// Label canvases are sized with this: texture sides that are not powers of two
/// get rescaled by the backend and the text comes out distorted.
pub fn nearest_power_of_two(n: f64) -> f64 {
    if n <= 1.0 {
        return 1.0;
    }
    2f64.powf(n.log2().ceil())
}

/// Floor-modulo: always returns a value in `[0, size)`, including for negative `n`.
///
/// # Panics
///
/// Panics if `size` is zero.
pub fn wrap_index(n: i64, size: usize) -> usize {
    let size = size as i64;
    let mut k = n % size;
    if k < 0 {
        k += size;
    }
    k as usize
}

/// Signed milliseconds from `a` to `b`.
#[inline]
pub fn milliseconds_between(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    (b - a).num_milliseconds()
}

/// Convert spherical coordinates to Cartesian, Y up.
///
/// `phi` is the polar angle from +Y, `theta` the azimuth around Y measured
/// from +Z towards +X.
pub fn spherical_to_cartesian(radius: f64, phi: f64, theta: f64) -> DVec3 {
    let sin_phi = phi.sin();
    DVec3::new(
        radius * sin_phi * theta.sin(),
        radius * phi.cos(),
        radius * sin_phi * theta.cos(),
    )
}

/// Spherical coordinates `(radius, phi, theta)` of a point. Inverse of
/// [`spherical_to_cartesian`].
pub fn cartesian_to_spherical(v: DVec3) -> (f64, f64, f64) {
    let radius = v.length();
    if radius == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let phi = (v.y / radius).clamp(-1.0, 1.0).acos();
    let theta = v.x.atan2(v.z);
    (radius, phi, theta)
}

/// Format an integer with comma thousands separators.
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::Rng;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_derived_constants() {
        assert!(approx(MILE * 7917.0, 1.0));
        assert_eq!(AU, 11740.0);
        assert_eq!(LIGHT_YEAR, 11740.0 * 63241.0);
        assert_eq!(light_years_to_units(2.0), 2.0 * LIGHT_YEAR);
    }

    #[test]
    fn test_right_ascension_bounds_and_monotonic() {
        assert_eq!(right_ascension_to_radians(0.0, 0.0, 0.0), 0.0);
        assert!(approx(right_ascension_to_radians(6.0, 0.0, 0.0), PI / 2.0));
        assert!(right_ascension_to_radians(23.0, 59.0, 59.999) < 2.0 * PI);

        let mut rng = rand::thread_rng();
        for _ in 0..500 {
            let a = (rng.gen_range(0.0..24.0f64).floor(), rng.gen_range(0.0..60.0f64).floor(), rng.gen_range(0.0..60.0));
            let b = (rng.gen_range(0.0..24.0f64).floor(), rng.gen_range(0.0..60.0f64).floor(), rng.gen_range(0.0..60.0));
            let va = a.0 * 3600.0 + a.1 * 60.0 + a.2;
            let vb = b.0 * 3600.0 + b.1 * 60.0 + b.2;
            let ra = right_ascension_to_radians(a.0, a.1, a.2);
            let rb = right_ascension_to_radians(b.0, b.1, b.2);
            assert!((0.0..2.0 * PI).contains(&ra));
            if va < vb {
                assert!(ra < rb);
            }
        }
    }

    #[test]
    fn test_declination_polar_angle() {
        assert!(approx(declination_to_radians(0.0, 0.0, 0.0, false), PI / 2.0));
        assert!(approx(declination_to_radians(90.0, 0.0, 0.0, false), 0.0));
        assert!(approx(declination_to_radians(90.0, 0.0, 0.0, true), PI));
        // -16°42'58" sits below the equator
        assert!(declination_to_radians(16.0, 42.0, 58.0, true) > PI / 2.0);
    }

    #[test]
    fn test_nearest_power_of_two() {
        assert_eq!(nearest_power_of_two(100.0), 128.0);
        assert_eq!(nearest_power_of_two(128.0), 128.0);
        assert_eq!(nearest_power_of_two(129.0), 256.0);
        assert_eq!(nearest_power_of_two(1.0), 1.0);
        assert_eq!(nearest_power_of_two(0.0), 1.0);
    }

    #[test]
    fn test_wrap_index() {
        assert_eq!(wrap_index(-1, 10), 9);
        assert_eq!(wrap_index(10, 10), 0);
        assert_eq!(wrap_index(-10, 10), 0);
        assert_eq!(wrap_index(23, 10), 3);

        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let k: i64 = rng.gen_range(-1_000_000..1_000_000);
            let n: usize = rng.gen_range(1..5000);
            assert!(wrap_index(k, n) < n);
        }
    }

    #[test]
    fn test_milliseconds_between_is_signed() {
        let a = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2000, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(milliseconds_between(a, b), ONE_DAY_MS);
        assert_eq!(milliseconds_between(b, a), -ONE_DAY_MS);
    }

    #[test]
    fn test_spherical_round_trip() {
        let v = spherical_to_cartesian(5.0, 1.3, 4.6);
        let (r, phi, theta) = cartesian_to_spherical(v);
        assert!(approx(r, 5.0));
        assert!(approx(phi, 1.3));
        // atan2 folds into (-π, π]
        assert!(approx(theta, 4.6 - 2.0 * PI));
        assert_eq!(cartesian_to_spherical(DVec3::ZERO), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-45000), "-45,000");
    }
}
