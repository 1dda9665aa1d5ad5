//! Orbital position model.
//!
//! Two kinds of orbit are supported:
//!
//! - **Circular**: uniform angular velocity about the +Y axis at a fixed radius.
//!   Used for the eight planets.
//! - **Elliptical**: a Keplerian ellipse with the sun at one focus. The ellipse
//!   is sampled once per simulated day at construction time and queried by
//!   day index, so a lookup is O(1) and never solves Kepler's equation.
//!
//! ```
//! use spacecast::catalog::ORBITERS;
//! use spacecast::orbit::{EllipticalOrbit, OrbitalElements};
//!
//! let pluto = OrbitalElements::from(&ORBITERS[0]);
//! let orbit = EllipticalOrbit::new(pluto).unwrap();
//! let position = orbit.position_at(pluto.last_perihelion);
//! assert!((position.length() - pluto.perihelion).abs() < 1e-6 * pluto.perihelion);
//! ```

use std::f64::consts::{FRAC_PI_2, TAU};

use chrono::{DateTime, TimeZone, Utc};
use glam::{DQuat, DVec3};

use crate::catalog::{CelestialBody, OrbiterRecord};
use crate::error::OrbitError;
use crate::units::{self, AU, ONE_DAY_MS};

/// Seconds from the Unix epoch to J2000 (2000-01-01T12:00:00Z).
const J2000_UNIX_SECONDS: i64 = 946_728_000;

/// Reference date for circular orbits (J2000).
pub fn base_epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(J2000_UNIX_SECONDS, 0).unwrap_or_default()
}

/// Position of a body on its circular orbit at `date`.
///
/// At [`base_epoch`] the body sits at `(0, 0, orbit_radius)`; one period later
/// it is back there. Bodies without an orbit radius or period stay at the origin.
pub fn position_on_circular_orbit(body: &CelestialBody, date: DateTime<Utc>) -> DVec3 {
    match (body.orbit_radius, body.period_days) {
        (Some(radius), Some(period)) if period > 0.0 => circular_position(radius, period, date),
        _ => DVec3::ZERO,
    }
}

fn circular_position(radius: f64, period_days: f64, date: DateTime<Utc>) -> DVec3 {
    let elapsed_days = units::milliseconds_between(base_epoch(), date) as f64 / ONE_DAY_MS as f64;
    let theta = elapsed_days / period_days * TAU;
    DQuat::from_rotation_y(theta) * DVec3::new(0.0, 0.0, radius)
}

/// Keplerian elements of an elliptical orbit, in base units and radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub aphelion: f64,
    pub perihelion: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub ascending_node: f64,
    pub perihelion_argument: f64,
    pub period_days: f64,
    pub last_perihelion: DateTime<Utc>,
}

impl OrbitalElements {
    /// Half the major axis.
    pub fn semi_major_axis(&self) -> f64 {
        (self.aphelion + self.perihelion) / 2.0
    }

    /// Distance from the ellipse centre to the focus.
    pub fn focus_offset(&self) -> f64 {
        self.semi_major_axis() - self.perihelion
    }

    /// Half the minor axis, derived from the focus offset and eccentricity.
    pub fn semi_minor_axis(&self) -> f64 {
        let c = self.focus_offset();
        let a = c / self.eccentricity;
        (a * a - c * c).sqrt()
    }

    /// Number of one-day samples in a full orbit.
    pub fn sample_count(&self) -> usize {
        (self.period_days.ceil() as usize).max(1)
    }

    /// Check the elements describe a closed ellipse with a positive period.
    pub fn validate(&self) -> Result<(), OrbitError> {
        if !(self.eccentricity > 0.0 && self.eccentricity < 1.0) {
            return Err(OrbitError::Eccentricity(self.eccentricity));
        }
        if !(self.period_days > 0.0) {
            return Err(OrbitError::Period(self.period_days));
        }
        if !(self.perihelion > 0.0 && self.perihelion <= self.aphelion) {
            return Err(OrbitError::Apsides {
                aphelion: self.aphelion,
                perihelion: self.perihelion,
            });
        }
        Ok(())
    }

    /// Rotation taking the XY orbital plane (perihelion on +X) into scene space.
    ///
    /// Applied right to left: argument of perihelion about the orbital normal,
    /// inclination about the node axis, node longitude about the vertical, then
    /// the fixed tilt from XY into the XZ ground plane.
    pub fn orientation(&self) -> DQuat {
        let tilt = DQuat::from_rotation_x(-FRAC_PI_2);
        let node = DQuat::from_rotation_z(self.ascending_node - FRAC_PI_2);
        let inclination = DQuat::from_rotation_x(self.inclination);
        let argument = DQuat::from_rotation_z(self.perihelion_argument);
        tilt * node * inclination * argument
    }
}

impl From<&OrbiterRecord> for OrbitalElements {
    fn from(record: &OrbiterRecord) -> Self {
        let (y, m, d) = record.last_perihelion;
        Self {
            aphelion: record.aphelion_au * AU,
            perihelion: record.perihelion_au * AU,
            eccentricity: record.eccentricity,
            inclination: record.inclination_deg.to_radians(),
            ascending_node: record.ascending_node_deg.to_radians(),
            perihelion_argument: record.perihelion_argument_deg.to_radians(),
            period_days: record.period_days,
            last_perihelion: Utc
                .with_ymd_and_hms(y, m, d, 0, 0, 0)
                .single()
                .unwrap_or_else(base_epoch),
        }
    }
}

/// An elliptical orbit sampled once per simulated day.
#[derive(Debug, Clone)]
pub struct EllipticalOrbit {
    elements: OrbitalElements,
    samples: Vec<DVec3>,
}

impl EllipticalOrbit {
    /// Precompute the sample ring for `elements`.
    pub fn new(elements: OrbitalElements) -> Result<Self, OrbitError> {
        elements.validate()?;

        let n = elements.sample_count();
        let a = elements.semi_major_axis();
        let b = elements.semi_minor_axis();
        let c = elements.focus_offset();
        let rotation = elements.orientation();

        let samples = (0..n)
            .map(|k| {
                let t = k as f64 / n as f64 * TAU;
                // Centre at (c, 0) so the focus lands on the origin.
                let local = DVec3::new(a * t.cos() - c, b * t.sin(), 0.0);
                rotation * local
            })
            .collect();

        Ok(Self { elements, samples })
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    pub fn samples(&self) -> &[DVec3] {
        &self.samples
    }

    /// Index of the sample for `date`.
    pub fn sample_index(&self, date: DateTime<Utc>) -> usize {
        let elapsed = units::milliseconds_between(self.elements.last_perihelion, date);
        let days = elapsed.div_euclid(ONE_DAY_MS);
        units::wrap_index(days, self.samples.len())
    }

    /// Position at `date`, with one-day resolution.
    pub fn position_at(&self, date: DateTime<Utc>) -> DVec3 {
        self.samples[self.sample_index(date)]
    }

    /// A closed outline of at most `max_points` points, for drawing.
    pub fn outline(&self, max_points: usize) -> Vec<DVec3> {
        let step = self.samples.len().div_ceil(max_points.max(3));
        self.samples.iter().step_by(step.max(1)).copied().collect()
    }
}

/// How a body moves.
#[derive(Debug, Clone)]
pub enum Orbit {
    /// Does not move (the sun, catalog stars).
    Fixed(DVec3),
    /// Uniform circular motion about +Y.
    Circular { radius: f64, period_days: f64 },
    /// Sampled Keplerian ellipse.
    Elliptical(Box<EllipticalOrbit>),
}

impl Orbit {
    /// Orbit for a sun/planet catalog entry.
    pub fn for_body(body: &CelestialBody) -> Self {
        match (body.orbit_radius, body.period_days) {
            (Some(radius), Some(period_days)) if period_days > 0.0 => Orbit::Circular { radius, period_days },
            _ => Orbit::Fixed(DVec3::ZERO),
        }
    }

    pub fn position_at(&self, date: DateTime<Utc>) -> DVec3 {
        match self {
            Orbit::Fixed(p) => *p,
            Orbit::Circular { radius, period_days } => circular_position(*radius, *period_days, date),
            Orbit::Elliptical(orbit) => orbit.position_at(date),
        }
    }

    /// Whether positions change with the date.
    pub fn is_moving(&self) -> bool {
        !matches!(self, Orbit::Fixed(_))
    }

    /// Points for the orbit ring, `None` for fixed bodies.
    pub fn outline(&self, max_points: usize) -> Option<Vec<DVec3>> {
        match self {
            Orbit::Fixed(_) => None,
            Orbit::Circular { radius, .. } => Some(circle_points(*radius, max_points)),
            Orbit::Elliptical(orbit) => Some(orbit.outline(max_points)),
        }
    }
}

/// `segments` points on a circle of `radius` in the XZ plane, centred on the origin.
pub fn circle_points(radius: f64, segments: usize) -> Vec<DVec3> {
    let segments = segments.max(3);
    (0..segments)
        .map(|i| {
            let t = i as f64 / segments as f64 * TAU;
            DVec3::new(radius * t.sin(), 0.0, radius * t.cos())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, ORBITERS};
    use chrono::Duration;

    fn pluto_like() -> OrbitalElements {
        OrbitalElements {
            aphelion: 49.305,
            perihelion: 29.658,
            eccentricity: 0.2488,
            inclination: 17.16f64.to_radians(),
            ascending_node: 110.299f64.to_radians(),
            perihelion_argument: 113.834f64.to_radians(),
            period_days: 90560.0,
            last_perihelion: Utc.with_ymd_and_hms(1989, 9, 5, 0, 0, 0).unwrap(),
        }
    }

    fn days(n: f64) -> Duration {
        Duration::milliseconds((n * ONE_DAY_MS as f64).round() as i64)
    }

    #[test]
    fn test_derived_axes() {
        let el = pluto_like();
        assert!((el.semi_major_axis() - 39.4815).abs() < 1e-9);
        assert!((el.focus_offset() - 9.8235).abs() < 1e-9);
        let b = el.semi_minor_axis();
        let c = el.focus_offset();
        let lhs = b * b + c * c;
        let rhs = (c / el.eccentricity).powi(2);
        assert!((lhs - rhs).abs() < 1e-9 * rhs);
    }

    #[test]
    fn test_validate_rejects_open_orbits() {
        let mut el = pluto_like();
        el.eccentricity = 1.0;
        assert!(matches!(el.validate(), Err(OrbitError::Eccentricity(_))));
        let mut el = pluto_like();
        el.period_days = 0.0;
        assert!(matches!(el.validate(), Err(OrbitError::Period(_))));
        let mut el = pluto_like();
        el.perihelion = 60.0;
        assert!(matches!(el.validate(), Err(OrbitError::Apsides { .. })));
        assert!(EllipticalOrbit::new(pluto_like()).is_ok());
    }

    #[test]
    fn test_circular_orbit_at_epoch_and_period() {
        let earth = catalog::body("Earth").unwrap();
        let r = earth.orbit_radius.unwrap();
        let start = position_on_circular_orbit(earth, base_epoch());
        assert!((start - DVec3::new(0.0, 0.0, r)).length() < 1e-6);

        let later = base_epoch() + days(earth.period_days.unwrap());
        let again = position_on_circular_orbit(earth, later);
        assert!((again - start).length() < 1e-6 * r);

        let quarter = base_epoch() + days(earth.period_days.unwrap() / 4.0);
        let q = position_on_circular_orbit(earth, quarter);
        assert!((q - DVec3::new(r, 0.0, 0.0)).length() < 1e-6 * r);
    }

    #[test]
    fn test_every_planet_returns_after_one_period() {
        let date = Utc.with_ymd_and_hms(2024, 3, 14, 6, 0, 0).unwrap();
        for body in catalog::SOLAR_SYSTEM.iter() {
            let start = position_on_circular_orbit(body, date);
            let period = body.period_days.unwrap_or(1.0);
            let end = position_on_circular_orbit(body, date + days(period));
            let tolerance = 1e-6 * body.orbit_radius.unwrap_or(1.0);
            assert!((end - start).length() <= tolerance, "{}", body.name);
        }
    }

    #[test]
    fn test_sun_stays_at_origin() {
        let sun = catalog::body(catalog::SUN).unwrap();
        assert_eq!(position_on_circular_orbit(sun, Utc::now()), DVec3::ZERO);
        assert!(!Orbit::for_body(sun).is_moving());
    }

    #[test]
    fn test_elliptical_sample_count_and_perihelion() {
        let el = pluto_like();
        let orbit = EllipticalOrbit::new(el).unwrap();
        assert_eq!(orbit.samples().len(), 90560);
        let at_perihelion = orbit.position_at(el.last_perihelion);
        assert!((at_perihelion.length() - el.perihelion).abs() < 1e-9);

        let farthest = orbit.samples().iter().map(|p| p.length()).fold(0.0, f64::max);
        assert!((farthest - el.aphelion).abs() < 1e-3 * el.aphelion);
    }

    #[test]
    fn test_elliptical_wraps_before_perihelion() {
        let el = pluto_like();
        let orbit = EllipticalOrbit::new(el).unwrap();
        let n = orbit.samples().len();
        let one_day_before = el.last_perihelion - Duration::hours(12);
        assert_eq!(orbit.sample_index(one_day_before), n - 1);
        let one_orbit_later = el.last_perihelion + Duration::days(n as i64);
        assert_eq!(orbit.sample_index(one_orbit_later), 0);
    }

    #[test]
    fn test_inclined_orbit_leaves_ground_plane() {
        let orbit = EllipticalOrbit::new(pluto_like()).unwrap();
        let max_y = orbit.samples().iter().map(|p| p.y.abs()).fold(0.0, f64::max);
        assert!(max_y > 1.0);

        let mut flat = pluto_like();
        flat.inclination = 0.0;
        let orbit = EllipticalOrbit::new(flat).unwrap();
        assert!(orbit.samples().iter().all(|p| p.y.abs() < 1e-9));
    }

    #[test]
    fn test_catalog_orbiters_build() {
        for record in ORBITERS.iter() {
            let el = OrbitalElements::from(record);
            let orbit = EllipticalOrbit::new(el).unwrap();
            assert_eq!(orbit.samples().len(), el.sample_count());
            let outline = orbit.outline(512);
            assert!(outline.len() <= 512 && outline.len() >= 3, "{}", record.name);
        }
    }

    #[test]
    fn test_circle_points() {
        let points = circle_points(2.0, 64);
        assert_eq!(points.len(), 64);
        assert!(points.iter().all(|p| (p.length() - 2.0).abs() < 1e-12 && p.y == 0.0));
    }
}
