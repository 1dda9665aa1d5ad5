//! Scene composition.
//!
//! [`Scene::build`] turns the catalog into backend nodes:
//!
//! - the sun: sphere plus additive glow sprite
//! - each planet: sphere, orbit ring and label. Earth also gets an atmosphere
//!   shell and a cloud layer whose texture arrives later
//! - each elliptical orbiter: sphere, orbit outline and label
//! - each nearest star: additive sprite and label
//! - overlays: the Milky Way backdrop and the central reference plane, both
//!   hidden until toggled on
//!
//! Bodies are stored in one `Vec` with a name lookup table. Everything else in
//! the crate refers to bodies by name or index.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use glam::DVec3;

use crate::catalog::{self, BodyInfo, ORBITERS, SOLAR_SYSTEM};
use crate::label::LabelStyle;
use crate::orbit::{self, EllipticalOrbit, Orbit, OrbitalElements};
use crate::render::{Blending, Color, NodeId, RenderBackend, SphereDesc, SpriteDesc, SpriteImage};
use crate::textures::{self, TextureConfig};
use crate::units::{self, AU, EARTH_DIAMETER, LIGHT_YEAR, MILE, MILKY_WAY_RADIUS};

/// Atmosphere glow colour.
pub const ATMOSPHERE_COLOR: u32 = 0x00b3ff;

/// Radii of the central plane's reference rings, light-years.
pub const CENTRAL_PLANE_RINGS_LY: [f64; 4] = [4.0, 8.0, 12.0, 16.0];

/// Sizes and resolutions used when building the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSettings {
    /// Where image assets are looked up.
    pub asset_dir: PathBuf,
    pub sun_glow_size: f64,
    pub star_sprite_size: f64,
    pub star_label_size: f64,
    /// Label size for solar system bodies as a fraction of camera distance.
    pub body_label_angular_size: f64,
    /// Solar system labels hide when the camera is farther than this from the sun.
    pub body_label_max_distance: f64,
    pub orbit_segments: usize,
    pub orbiter_outline_points: usize,
    pub label_style: LabelStyle,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("."),
            sun_glow_size: 2000.0 * EARTH_DIAMETER,
            star_sprite_size: 25_000.0 * AU,
            star_label_size: 55_000.0 * AU,
            body_label_angular_size: 0.04,
            body_label_max_distance: 2_000.0 * AU,
            orbit_segments: 1024,
            orbiter_outline_points: 512,
            label_style: LabelStyle::default(),
        }
    }
}

/// What a scene body is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Sun,
    Planet,
    Orbiter,
    Star,
}

impl BodyKind {
    /// Bodies that follow the planet-size slider.
    pub fn is_resizable(self) -> bool {
        matches!(self, BodyKind::Planet | BodyKind::Orbiter)
    }
}

/// A body placed in the scene.
#[derive(Debug, Clone)]
pub struct SceneBody {
    pub name: &'static str,
    pub kind: BodyKind,
    pub position: DVec3,
    /// Catalog radius. Stars use half their sprite size.
    pub radius: f64,
    pub orbit: Orbit,
    pub node: NodeId,
    pub label: Option<NodeId>,
    /// Nodes that travel with the body (glow, atmosphere, clouds).
    pub attachments: Vec<NodeId>,
    pub orbit_ring: Option<NodeId>,
    pub info: BodyInfo,
}

impl SceneBody {
    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(self.node)
            .chain(self.attachments.iter().copied())
            .chain(self.label)
    }
}

/// All bodies and overlays, plus the lookups into them.
#[derive(Debug)]
pub struct Scene {
    bodies: Vec<SceneBody>,
    by_name: HashMap<&'static str, usize>,
    by_label: HashMap<NodeId, usize>,
    labels: Vec<NodeId>,
    clouds: Option<NodeId>,
    milky_way: NodeId,
    central_plane: Vec<NodeId>,
    planet_scale: f64,
    settings: SceneSettings,
}

impl Scene {
    /// Create every node for the catalog, placed at `date`.
    pub fn build(backend: &mut dyn RenderBackend, settings: SceneSettings, date: DateTime<Utc>) -> Self {
        let milky_way = backend.create_sphere(SphereDesc {
            map: Some(textures::MILKY_WAY_MAP),
            back_side: true,
            ..SphereDesc::new(MILKY_WAY_RADIUS, Color::rgb8(40, 40, 60))
        });
        backend.set_visible(milky_way, false);

        let mut scene = Self {
            bodies: Vec::new(),
            by_name: HashMap::new(),
            by_label: HashMap::new(),
            labels: Vec::new(),
            clouds: None,
            milky_way,
            central_plane: Vec::new(),
            planet_scale: 1.0,
            settings,
        };

        for body in SOLAR_SYSTEM.iter() {
            if body.orbit_radius.is_none() {
                scene.add_sun(backend, body);
            } else {
                scene.add_planet(backend, body, date);
            }
        }
        for record in ORBITERS.iter() {
            scene.add_orbiter(backend, record, date);
        }
        let stars = catalog::nearest_stars();
        for star in &stars {
            scene.add_star(backend, star);
        }
        scene.add_central_plane(backend, &stars);

        log::info!(
            "Scene built: {} bodies, {} labels",
            scene.bodies.len(),
            scene.labels.len()
        );
        scene
    }

    fn push(&mut self, body: SceneBody) -> usize {
        let index = self.bodies.len();
        self.by_name.insert(body.name, index);
        if let Some(label) = body.label {
            self.by_label.insert(label, index);
            self.labels.push(label);
        }
        self.bodies.push(body);
        index
    }

    fn make_label(&self, backend: &mut dyn RenderBackend, text: &str, size: f64, position: DVec3) -> NodeId {
        let style = &self.settings.label_style;
        let canvas = backend.draw_text(text, style);
        let label = backend.create_sprite(SpriteDesc {
            size,
            color: style.base_color,
            blending: Blending::Additive,
            image: SpriteImage::Pixels(canvas),
        });
        backend.set_position(label, position);
        label
    }

    fn add_sun(&mut self, backend: &mut dyn RenderBackend, body: &catalog::CelestialBody) {
        let color = color_of(body.color);
        let node = backend.create_sphere(SphereDesc {
            map: body.map,
            ..SphereDesc::new(body.radius, color)
        });
        let glow = backend.create_sprite(SpriteDesc {
            size: self.settings.sun_glow_size,
            color: Color::WHITE,
            blending: Blending::Additive,
            image: SpriteImage::File(textures::SUN_SPRITE),
        });
        self.push(SceneBody {
            name: body.name,
            kind: BodyKind::Sun,
            position: DVec3::ZERO,
            radius: body.radius,
            orbit: Orbit::for_body(body),
            node,
            label: None,
            attachments: vec![glow],
            orbit_ring: None,
            info: body.info,
        });
    }

    fn add_planet(&mut self, backend: &mut dyn RenderBackend, body: &catalog::CelestialBody, date: DateTime<Utc>) {
        let orbit = Orbit::for_body(body);
        let position = orbit.position_at(date);
        let node = backend.create_sphere(SphereDesc {
            map: body.map,
            bump_map: body.bump_map,
            ..SphereDesc::new(body.radius, color_of(body.color))
        });
        backend.set_position(node, position);

        let mut attachments = Vec::new();
        if body.is_home() {
            let atmosphere = backend.create_sphere(SphereDesc {
                glow: true,
                ..SphereDesc::new(body.radius * 1.04, Color::from_hex(ATMOSPHERE_COLOR))
            });
            let clouds = backend.create_sphere(SphereDesc::new(
                body.radius * 1.02,
                Color::WHITE.with_alpha(0.8),
            ));
            for n in [atmosphere, clouds] {
                backend.set_position(n, position);
            }
            attachments.extend([atmosphere, clouds]);
            self.clouds = Some(clouds);
        }

        let ring_opacity = if body.is_home() { 1.0 } else { 0.5 };
        let ring = orbit.outline(self.settings.orbit_segments).map(|points| {
            backend.create_line_loop(points, Color::WHITE.with_alpha(ring_opacity))
        });

        let label = self.make_label(backend, body.name, 1.0, position);
        self.push(SceneBody {
            name: body.name,
            kind: BodyKind::Planet,
            position,
            radius: body.radius,
            orbit,
            node,
            label: Some(label),
            attachments,
            orbit_ring: ring,
            info: body.info,
        });
    }

    fn add_orbiter(&mut self, backend: &mut dyn RenderBackend, record: &catalog::OrbiterRecord, date: DateTime<Utc>) {
        let orbit = match EllipticalOrbit::new(OrbitalElements::from(record)) {
            Ok(orbit) => orbit,
            Err(e) => {
                log::warn!("Skipping {}: {}", record.name, e);
                return;
            }
        };
        let outline = orbit.outline(self.settings.orbiter_outline_points);
        let orbit = Orbit::Elliptical(Box::new(orbit));
        let position = orbit.position_at(date);
        let radius = record.radius_miles * MILE;

        let node = backend.create_sphere(SphereDesc::new(radius, color_of(record.color)));
        backend.set_position(node, position);
        let ring = backend.create_line_loop(outline, Color::WHITE.with_alpha(0.5));
        let label = self.make_label(backend, record.name, 1.0, position);

        self.push(SceneBody {
            name: record.name,
            kind: BodyKind::Orbiter,
            position,
            radius,
            orbit,
            node,
            label: Some(label),
            attachments: Vec::new(),
            orbit_ring: Some(ring),
            info: record.info,
        });
    }

    fn add_star(&mut self, backend: &mut dyn RenderBackend, star: &catalog::NearestStarEntry) {
        let position = units::spherical_to_cartesian(star.distance(), star.declination, star.right_ascension);
        let node = backend.create_sprite(SpriteDesc {
            size: self.settings.star_sprite_size,
            color: Color::WHITE,
            blending: Blending::Additive,
            image: SpriteImage::File(textures::STAR_SPRITE),
        });
        backend.set_position(node, position);
        let label = self.make_label(backend, star.name, self.settings.star_label_size, position);

        self.push(SceneBody {
            name: star.name,
            kind: BodyKind::Star,
            position,
            radius: self.settings.star_sprite_size / 2.0,
            orbit: Orbit::Fixed(position),
            node,
            label: Some(label),
            attachments: Vec::new(),
            orbit_ring: None,
            info: star.info,
        });
    }

    fn add_central_plane(&mut self, backend: &mut dyn RenderBackend, stars: &[catalog::NearestStarEntry]) {
        for ly in CENTRAL_PLANE_RINGS_LY {
            let points = orbit::circle_points(ly * LIGHT_YEAR, self.settings.orbit_segments);
            let ring = backend.create_line_loop(points, Color::YELLOW.with_alpha(0.5));
            self.central_plane.push(ring);
        }

        let segments: Vec<DVec3> = stars
            .iter()
            .flat_map(|star| {
                let top = units::spherical_to_cartesian(star.distance(), star.declination, star.right_ascension);
                [DVec3::new(top.x, 0.0, top.z), top]
            })
            .collect();
        let drops = backend.create_line_segments(segments, Color::WHITE.with_alpha(0.2));
        self.central_plane.push(drops);

        for &node in &self.central_plane {
            backend.set_visible(node, false);
        }
    }

    pub fn bodies(&self) -> &[SceneBody] {
        &self.bodies
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn body(&self, name: &str) -> Option<&SceneBody> {
        self.index_of(name).map(|i| &self.bodies[i])
    }

    pub fn body_at(&self, index: usize) -> Option<&SceneBody> {
        self.bodies.get(index)
    }

    /// Index of the body a label belongs to.
    pub fn body_for_label(&self, label: NodeId) -> Option<usize> {
        self.by_label.get(&label).copied()
    }

    /// Every label node, in creation order.
    pub fn labels(&self) -> &[NodeId] {
        &self.labels
    }

    pub fn milky_way(&self) -> NodeId {
        self.milky_way
    }

    pub fn central_plane(&self) -> &[NodeId] {
        &self.central_plane
    }

    pub fn clouds(&self) -> Option<NodeId> {
        self.clouds
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    pub fn label_style(&self) -> &LabelStyle {
        &self.settings.label_style
    }

    pub fn planet_scale(&self) -> f64 {
        self.planet_scale
    }

    /// Radius of the body as drawn, including the planet-size scale.
    pub fn visual_radius(&self, index: usize) -> Option<f64> {
        let body = self.bodies.get(index)?;
        let scale = if body.kind.is_resizable() { self.planet_scale } else { 1.0 };
        Some(body.radius * scale)
    }

    /// Move every orbiting body to its position at `date`.
    pub fn update_positions(&mut self, backend: &mut dyn RenderBackend, date: DateTime<Utc>) {
        for body in self.bodies.iter_mut().filter(|b| b.orbit.is_moving()) {
            body.position = body.orbit.position_at(date);
            let nodes: Vec<NodeId> = body.nodes().collect();
            for node in nodes {
                backend.set_position(node, body.position);
            }
        }
    }

    /// Scale planets and orbiters (not the sun or stars).
    pub fn resize_planets(&mut self, backend: &mut dyn RenderBackend, scale: f64) {
        self.planet_scale = scale;
        for body in self.bodies.iter().filter(|b| b.kind.is_resizable()) {
            backend.set_scale(body.node, scale);
            for &n in &body.attachments {
                backend.set_scale(n, scale);
            }
        }
    }

    /// Keep solar-system labels a constant apparent size, and hide them once
    /// the whole system would be a speck.
    pub fn update_labels(&self, backend: &mut dyn RenderBackend, camera_position: DVec3) {
        let visible = camera_position.length() <= self.settings.body_label_max_distance;
        for body in self.bodies.iter().filter(|b| b.kind != BodyKind::Star) {
            let Some(label) = body.label else { continue };
            backend.set_visible(label, visible);
            if visible {
                let distance = camera_position.distance(body.position).max(EARTH_DIAMETER);
                backend.set_scale(label, distance * self.settings.body_label_angular_size);
            }
        }
    }

    /// Recolour a label for hover state.
    pub fn set_label_active(&self, backend: &mut dyn RenderBackend, label: NodeId, active: bool) {
        let style = &self.settings.label_style;
        let color = if active { style.active_color } else { style.base_color };
        backend.set_color(label, color);
    }

    pub fn set_show_milky_way(&self, backend: &mut dyn RenderBackend, show: bool) {
        backend.set_visible(self.milky_way, show);
    }

    pub fn set_show_central_plane(&self, backend: &mut dyn RenderBackend, show: bool) {
        for &node in &self.central_plane {
            backend.set_visible(node, show);
        }
    }

    /// Install the composed cloud texture on the cloud layer.
    pub fn install_cloud_texture(&self, backend: &mut dyn RenderBackend, texture: TextureConfig) {
        if let Some(clouds) = self.clouds {
            backend.set_texture(clouds, texture);
        }
    }
}

fn color_of(rgb: [u8; 3]) -> Color {
    Color::rgb8(rgb[0], rgb[1], rgb[2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{NodeShape, NodeStore};
    use chrono::TimeZone;

    fn build() -> (NodeStore, Scene) {
        let mut store = NodeStore::new();
        let date = Utc.with_ymd_and_hms(2012, 12, 26, 0, 0, 0).unwrap();
        let scene = Scene::build(&mut store, SceneSettings::default(), date);
        (store, scene)
    }

    #[test]
    fn test_every_catalog_body_is_placed() {
        let (_, scene) = build();
        let expected = SOLAR_SYSTEM.len() + ORBITERS.len() + catalog::NEAREST_STARS.len();
        assert_eq!(scene.bodies().len(), expected);
        for body in scene.bodies() {
            assert_eq!(scene.body(body.name).unwrap().name, body.name);
        }
        assert!(scene.body("Nemesis").is_none());
    }

    #[test]
    fn test_sirius_position() {
        let (store, scene) = build();
        let sirius = scene.body("Sirius").unwrap();
        assert_eq!(sirius.kind, BodyKind::Star);
        let d = sirius.position.length();
        assert!((d - 8.5828 * LIGHT_YEAR).abs() < 1e-9 * d);
        let node = store.node(sirius.node).unwrap();
        assert_eq!(node.position, sirius.position);
    }

    #[test]
    fn test_earth_layers() {
        let (store, scene) = build();
        let earth = scene.body(catalog::HOME_PLANET).unwrap();
        assert_eq!(earth.attachments.len(), 2);
        let radii: Vec<f64> = earth
            .attachments
            .iter()
            .map(|&n| match &store.node(n).unwrap().shape {
                NodeShape::Sphere(desc) => desc.radius / earth.radius,
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert!((radii[0] - 1.04).abs() < 1e-12);
        assert!((radii[1] - 1.02).abs() < 1e-12);
        assert_eq!(scene.clouds(), Some(earth.attachments[1]));

        let ring = store.node(earth.orbit_ring.unwrap()).unwrap();
        assert_eq!(ring.color.a, 1.0);
        let mars_ring = store.node(scene.body("Mars").unwrap().orbit_ring.unwrap()).unwrap();
        assert_eq!(mars_ring.color.a, 0.5);
    }

    #[test]
    fn test_overlays_hidden_by_default() {
        let (mut store, scene) = build();
        assert!(!store.node(scene.milky_way()).unwrap().visible);
        assert_eq!(scene.central_plane().len(), CENTRAL_PLANE_RINGS_LY.len() + 1);
        assert!(scene.central_plane().iter().all(|&n| !store.node(n).unwrap().visible));

        scene.set_show_central_plane(&mut store, true);
        assert!(scene.central_plane().iter().all(|&n| store.node(n).unwrap().visible));
        scene.set_show_milky_way(&mut store, true);
        assert!(store.node(scene.milky_way()).unwrap().visible);
    }

    #[test]
    fn test_central_plane_drops_reach_ground() {
        let (store, scene) = build();
        let drops = *scene.central_plane().last().unwrap();
        let NodeShape::LineSegments(points) = &store.node(drops).unwrap().shape else {
            panic!("expected segments");
        };
        assert_eq!(points.len(), catalog::NEAREST_STARS.len() * 2);
        for pair in points.chunks(2) {
            assert_eq!(pair[0].y, 0.0);
            assert_eq!(pair[0].x, pair[1].x);
            assert_eq!(pair[0].z, pair[1].z);
        }
    }

    #[test]
    fn test_resize_skips_sun_and_stars() {
        let (mut store, mut scene) = build();
        scene.resize_planets(&mut store, 40.0);
        let sun = scene.body(catalog::SUN).unwrap();
        assert_eq!(store.node(sun.node).unwrap().scale, 1.0);
        let sirius = scene.body("Sirius").unwrap();
        assert_eq!(store.node(sirius.node).unwrap().scale, 1.0);
        let jupiter = scene.index_of("Jupiter").unwrap();
        assert_eq!(store.node(scene.bodies()[jupiter].node).unwrap().scale, 40.0);
        assert_eq!(scene.visual_radius(jupiter), Some(scene.bodies()[jupiter].radius * 40.0));
        let earth = scene.body(catalog::HOME_PLANET).unwrap();
        assert!(earth.attachments.iter().all(|&n| store.node(n).unwrap().scale == 40.0));
    }

    #[test]
    fn test_update_positions_moves_attachments() {
        let (mut store, mut scene) = build();
        let later = Utc.with_ymd_and_hms(2013, 3, 26, 0, 0, 0).unwrap();
        let before = scene.body(catalog::HOME_PLANET).unwrap().position;
        scene.update_positions(&mut store, later);
        let earth = scene.body(catalog::HOME_PLANET).unwrap();
        assert!((earth.position - before).length() > AU);
        for node in earth.nodes() {
            assert_eq!(store.node(node).unwrap().position, earth.position);
        }
        assert_eq!(scene.body(catalog::SUN).unwrap().position, DVec3::ZERO);
    }

    #[test]
    fn test_labels_map_back_to_bodies() {
        let (_, scene) = build();
        assert_eq!(scene.labels().len(), 8 + ORBITERS.len() + catalog::NEAREST_STARS.len());
        for &label in scene.labels() {
            let index = scene.body_for_label(label).unwrap();
            assert_eq!(scene.bodies()[index].label, Some(label));
        }
    }

    #[test]
    fn test_body_labels_hide_far_away() {
        let (mut store, scene) = build();
        let mars_label = scene.body("Mars").unwrap().label.unwrap();
        scene.update_labels(&mut store, DVec3::new(0.0, 0.0, 10.0 * AU));
        assert!(store.node(mars_label).unwrap().visible);
        scene.update_labels(&mut store, DVec3::new(0.0, 0.0, LIGHT_YEAR));
        assert!(!store.node(mars_label).unwrap().visible);
        let sirius_label = scene.body("Sirius").unwrap().label.unwrap();
        assert!(store.node(sirius_label).unwrap().visible);
    }
}
