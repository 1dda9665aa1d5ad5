//! Orbit camera, orbit controls and the framing heuristics.
//!
//! The camera orbits a target point. Its position is described by yaw (around
//! +Y), pitch (above the XZ plane) and distance from the target. All math is
//! `f64`: the scene spans from a few Earth diameters to the Milky Way radius.
//!
//! Framing a body ([`focus_on_planet`], [`focus_on_star`]) moves both the
//! camera and the controls' minimum distance so the user can zoom right up to
//! the body and no further.

use std::f64::consts::FRAC_PI_2;

use glam::{DMat4, DVec2, DVec3, DVec4};

use crate::render::Ray;
use crate::units::{self, AU, EARTH_DIAMETER, LIGHT_YEAR, MILES_PER_EARTH_DIAMETER, MILKY_WAY_RADIUS};

/// Below this camera distance the readout is in miles.
pub const MILES_READOUT_LIMIT: f64 = LIGHT_YEAR * 0.001;

/// Distance from a focused star.
pub const STAR_FOCUS_DISTANCE: f64 = LIGHT_YEAR * 2.0;

/// Drag rotation in radians per pixel.
pub const ROTATE_SPEED: f64 = 0.005;

/// Pitch limit while dragging.
pub const MAX_PITCH: f64 = 1.5;

/// Distance multiplier per scroll line.
pub const ZOOM_STEP: f64 = 0.9;

/// Projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view, degrees.
    pub fov_y_degrees: f64,
    pub near: f64,
    pub far: f64,
    pub aspect: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 70.0,
            near: EARTH_DIAMETER / 10.0,
            far: MILKY_WAY_RADIUS * 2.0,
            aspect: 16.0 / 9.0,
        }
    }
}

/// Orbit camera around a target point.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f64,
    /// Vertical rotation angle in radians.
    pub pitch: f64,
    /// Distance from the target point.
    pub distance: f64,
    /// Point the camera orbits around.
    pub target: DVec3,
    pub projection: Projection,
}

impl Camera {
    /// Camera at spherical `(50 AU, φ 1.3, θ 4.6)` looking at the sun.
    pub fn new() -> Self {
        let mut camera = Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 1.0,
            target: DVec3::ZERO,
            projection: Projection::default(),
        };
        camera.set_position(units::spherical_to_cartesian(50.0 * AU, 1.3, 4.6));
        camera
    }

    /// World position.
    pub fn position(&self) -> DVec3 {
        self.target + self.offset()
    }

    /// Position relative to the target.
    pub fn offset(&self) -> DVec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        DVec3::new(x, y, z)
    }

    /// Move the camera to `position`, keeping the target.
    pub fn set_position(&mut self, position: DVec3) {
        let (r, phi, theta) = units::cartesian_to_spherical(position - self.target);
        self.distance = r;
        self.pitch = FRAC_PI_2 - phi;
        self.yaw = theta;
    }

    /// Change the target, keeping the world position.
    pub fn retarget(&mut self, target: DVec3) {
        let position = self.position();
        self.target = target;
        self.set_position(position);
    }

    /// Move the target and the camera together.
    pub fn translate(&mut self, delta: DVec3) {
        self.target += delta;
    }

    /// View matrix with the camera at the origin. Pair it with positions
    /// expressed relative to [`position`](Camera::position).
    pub fn relative_view_matrix(&self) -> DMat4 {
        let forward = -self.offset();
        let up = if forward.normalize_or_zero().cross(DVec3::Y).length_squared() < 1e-12 {
            DVec3::Z
        } else {
            DVec3::Y
        };
        DMat4::look_to_rh(DVec3::ZERO, forward, up)
    }

    pub fn view_matrix(&self) -> DMat4 {
        self.relative_view_matrix() * DMat4::from_translation(-self.position())
    }

    pub fn projection_matrix(&self) -> DMat4 {
        let p = &self.projection;
        DMat4::perspective_rh(p.fov_y_degrees.to_radians(), p.aspect, p.near, p.far)
    }

    /// Ray through a point in normalized device coordinates (x right, y up,
    /// both in `[-1, 1]`).
    pub fn pick_ray(&self, ndc: DVec2) -> Ray {
        let inverse = (self.projection_matrix() * self.relative_view_matrix()).inverse();
        let near = inverse * DVec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let direction = near.truncate() / near.w;
        Ray::new(self.position(), direction)
    }

    /// Distance of the camera from the sun.
    pub fn distance_from_origin(&self) -> f64 {
        self.position().length()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Zoom and rotate limits applied to the camera every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub min_distance: f64,
    pub max_distance: f64,
    /// Minimum distance for the framed body at planet scale 1.
    pub default_min_distance: f64,
    pub enable_pan: bool,
    pub enable_zoom: bool,
    pub enable_rotate: bool,
}

impl OrbitControls {
    pub fn new() -> Self {
        Self {
            min_distance: EARTH_DIAMETER,
            max_distance: MILKY_WAY_RADIUS / 10.0,
            default_min_distance: EARTH_DIAMETER,
            enable_pan: false,
            enable_zoom: true,
            enable_rotate: true,
        }
    }

    /// Rotate by a pointer drag of `(dx, dy)` pixels.
    pub fn rotate(&self, camera: &mut Camera, dx: f64, dy: f64) {
        if !self.enable_rotate {
            return;
        }
        camera.yaw -= dx * ROTATE_SPEED;
        camera.pitch = (camera.pitch + dy * ROTATE_SPEED).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Zoom by `lines` scroll lines; positive moves closer.
    ///
    /// Each line multiplies the distance, so one wheel notch means the same
    /// thing next to Mercury and at the edge of the star field.
    pub fn zoom(&self, camera: &mut Camera, lines: f64) {
        if !self.enable_zoom {
            return;
        }
        camera.distance *= ZOOM_STEP.powf(lines);
        self.update(camera);
    }

    /// Clamp the camera distance into `[min_distance, max_distance]`.
    pub fn update(&self, camera: &mut Camera) {
        let min = self.min_distance.min(self.max_distance);
        camera.distance = camera.distance.clamp(min, self.max_distance);
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new()
    }
}

/// Approach distances never go below this many near-plane distances, so tiny
/// bodies are not clipped away.
pub const NEAR_PLANE_MARGIN: f64 = 2.0;

/// Frame a planet (or the sun) at `position`.
///
/// `default_radius` is the catalog radius and `visual_radius` the radius as
/// currently drawn (they differ when planets are scaled up). With `m` the
/// framing radius and `(r, φ, θ)` the body's spherical coordinates, the camera
/// goes to `(r + 5m, φ - 2m/r, θ + 2m/r)`: just outside the body, slightly
/// above and beside it. A body at the origin is treated as sitting on the
/// equator at distance 1.
///
/// The minimum approach is `2 × visual_radius`, floored at
/// [`NEAR_PLANE_MARGIN`] near-plane distances. `m` is the visual radius
/// floored at half that.
pub fn focus_on_planet(
    camera: &mut Camera,
    controls: &mut OrbitControls,
    position: DVec3,
    default_radius: f64,
    visual_radius: f64,
) {
    camera.target = position;
    let floor = camera.projection.near * NEAR_PLANE_MARGIN;
    let frame_radius = visual_radius.max(floor / 2.0);

    let (mut r, mut phi, theta) = units::cartesian_to_spherical(position);
    if r == 0.0 {
        r = 1.0;
        phi = FRAC_PI_2;
    }
    let ratio = frame_radius / r * 2.0;
    camera.set_position(units::spherical_to_cartesian(
        r + frame_radius * 5.0,
        phi - ratio,
        theta + ratio,
    ));

    controls.min_distance = (visual_radius * 2.0).max(floor);
    controls.default_min_distance = (default_radius * 2.0).max(floor);
    log::debug!(
        "Framed body at {:?}: camera distance {:.3}, min distance {:.3}",
        position,
        camera.distance,
        controls.min_distance
    );
}

/// Frame a star at `position`, two light-years from it on the side facing
/// the sun.
pub fn focus_on_star(camera: &mut Camera, controls: &mut OrbitControls, position: DVec3) {
    camera.target = position;
    let towards_sun = (-position).try_normalize().unwrap_or(DVec3::Z);
    camera.set_position(position + towards_sun * STAR_FOCUS_DISTANCE);
    controls.min_distance = STAR_FOCUS_DISTANCE;
}

/// Planet-size slider: keep the minimum approach proportional to the scale.
pub fn resize_planets(controls: &mut OrbitControls, scale: f64) {
    controls.min_distance = controls.default_min_distance * scale;
}

/// Keep the camera's direction from the sun and put it `ly` light-years out.
pub fn set_distance_light_years(camera: &mut Camera, ly: f64) {
    let (_, phi, theta) = units::cartesian_to_spherical(camera.position());
    let radius = units::light_years_to_units(ly);
    camera.set_position(units::spherical_to_cartesian(radius, phi, theta));
}

/// Human readable distance of the camera from the sun.
///
/// Under a thousandth of a light-year the distance is in whole miles,
/// otherwise in whole light-years, comma grouped.
pub fn distance_readout(camera: &Camera) -> String {
    let distance = camera.distance_from_origin();
    if distance < MILES_READOUT_LIMIT {
        let miles = distance / EARTH_DIAMETER * MILES_PER_EARTH_DIAMETER;
        format!("{} miles", units::group_thousands(miles as i64))
    } else {
        format!("{} light-years", units::group_thousands((distance / LIGHT_YEAR) as i64))
    }
}
