//! The application context.
//!
//! [`Universe`] owns the simulated clock, the scene, the camera and its
//! controls, hover state, the current focus and selection, and the pending
//! cloud texture. A host drives it with [`Universe::frame`] once per display
//! refresh and forwards user input to the other methods.

use std::time::Duration;

use chrono::{DateTime, Utc};
use glam::{DVec2, DVec3};

use crate::camera::{self, Camera, OrbitControls};
use crate::catalog;
use crate::config::SpacecastConfig;
use crate::error::ConfigError;
use crate::picking::Picker;
use crate::render::RenderBackend;
use crate::scene::{BodyKind, Scene, SceneBody};
use crate::textures::CloudTextureJob;
use crate::time::{SimulationClock, MAX_FRAME_DELTA};

/// Range of the planet-size slider.
pub const PLANET_SCALE_RANGE: (f64, f64) = (1.0, 4000.0);

/// Text for the info panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub source: Option<&'static str>,
}

impl SelectedInfo {
    fn of(body: &SceneBody) -> Self {
        Self {
            name: body.name,
            description: body.info.description.unwrap_or("None."),
            source: body.info.description_source,
        }
    }
}

/// Everything that changes while the viewer runs.
#[derive(Debug)]
pub struct Universe {
    clock: SimulationClock,
    scene: Scene,
    camera: Camera,
    controls: OrbitControls,
    picker: Picker,
    /// Body the camera is framed on and follows.
    focus: Option<usize>,
    /// Body shown in the info panel.
    selected: Option<usize>,
    show_milky_way: bool,
    show_central_plane: bool,
    cloud_job: Option<CloudTextureJob>,
}

impl Universe {
    /// Build the scene for `config` and frame the configured reference body.
    ///
    /// Starts loading the Earth cloud images in the background; they are
    /// installed by a later [`frame`](Universe::frame).
    pub fn new(config: &SpacecastConfig, backend: &mut dyn RenderBackend) -> Result<Self, ConfigError> {
        let date = config.start_date()?.unwrap_or_else(Utc::now);
        let mut clock = SimulationClock::new(date).with_time_scale(config.time_scale);
        if config.paused {
            clock.toggle_pause();
        }

        let scene = Scene::build(backend, config.scene_settings(), date);
        let cloud_job = scene
            .clouds()
            .map(|_| CloudTextureJob::spawn(&config.asset_dir));

        let mut universe = Self {
            clock,
            scene,
            camera: Camera::new(),
            controls: OrbitControls::new(),
            picker: Picker::new(),
            focus: None,
            selected: None,
            show_milky_way: false,
            show_central_plane: false,
            cloud_job,
        };

        universe.set_planet_scale(backend, config.planet_scale);
        universe.set_show_milky_way(backend, config.show_milky_way);
        universe.set_show_central_plane(backend, config.show_central_plane);
        if !universe.select_reference(&config.reference) {
            log::warn!("Unknown reference body '{}', framing the sun", config.reference);
            universe.select_reference(catalog::SUN);
        }
        universe.scene.update_labels(backend, universe.camera.position());

        log::info!("Universe ready at {}", date);
        Ok(universe)
    }

    /// Advance one frame.
    ///
    /// `real_dt` is clamped to [`MAX_FRAME_DELTA`] so a stalled window does
    /// not fling the planets forward when it resumes.
    pub fn frame(&mut self, backend: &mut dyn RenderBackend, real_dt: Duration) {
        self.clock.advance(real_dt.min(MAX_FRAME_DELTA));

        let before = self.focused_position();
        self.scene.update_positions(backend, self.clock.date());
        if let (Some(before), Some(after)) = (before, self.focused_position()) {
            self.camera.translate(after - before);
        }

        self.controls.update(&mut self.camera);
        self.scene.update_labels(backend, self.camera.position());

        if let Some(job) = &mut self.cloud_job {
            match job.poll() {
                Some(Ok(texture)) => {
                    log::info!("Cloud texture composed ({}x{})", texture.width, texture.height);
                    self.scene.install_cloud_texture(backend, texture);
                }
                Some(Err(e)) => log::warn!("Cloud texture unavailable: {}", e),
                None => {}
            }
            if job.is_done() {
                self.cloud_job = None;
            }
        }
    }

    fn focused_position(&self) -> Option<DVec3> {
        self.focus
            .and_then(|i| self.scene.body_at(i))
            .map(|b| b.position)
    }

    /// Jump to a typed date. Returns `false` and keeps the current date when
    /// the text does not parse.
    pub fn set_date_from_str(&mut self, input: &str) -> bool {
        self.clock.set_from_str(input)
    }

    pub fn set_date(&mut self, date: DateTime<Utc>) {
        self.clock.set_date(date);
    }

    /// Frame a solar-system body from the reference selector. Stars are not
    /// reference bodies; use [`focus_on`](Universe::focus_on) for those.
    pub fn select_reference(&mut self, name: &str) -> bool {
        match self.scene.index_of(name) {
            Some(index) if self.scene.bodies()[index].kind != BodyKind::Star => {
                self.focus_index(index);
                true
            }
            _ => false,
        }
    }

    /// Look a body up by name, exact match first and then ignoring case.
    pub fn search(&self, name: &str) -> Option<&SceneBody> {
        let name = name.trim();
        self.scene.body(name).or_else(|| {
            self.scene
                .bodies()
                .iter()
                .find(|b| b.name.eq_ignore_ascii_case(name))
        })
    }

    /// Frame and select any body by name. Returns `false` for unknown names.
    pub fn focus_on(&mut self, name: &str) -> bool {
        let Some(index) = self.search(name).and_then(|b| self.scene.index_of(b.name)) else {
            log::debug!("No body named '{}'", name);
            return false;
        };
        self.focus_index(index);
        true
    }

    fn focus_index(&mut self, index: usize) {
        let Some(body) = self.scene.body_at(index) else {
            return;
        };
        if body.kind == BodyKind::Star {
            camera::focus_on_star(&mut self.camera, &mut self.controls, body.position);
        } else {
            let visual = self.scene.visual_radius(index).unwrap_or(body.radius);
            camera::focus_on_planet(&mut self.camera, &mut self.controls, body.position, body.radius, visual);
        }
        log::info!("Focus on {}", body.name);
        self.focus = Some(index);
        self.selected = Some(index);
    }

    /// Step the reference selector to the next solar-system body.
    pub fn cycle_reference(&mut self) {
        let names = self.reference_names();
        let current = self
            .focus
            .and_then(|i| self.scene.body_at(i))
            .and_then(|b| names.iter().position(|&n| n == b.name));
        let next = current.map_or(0, |i| (i + 1) % names.len());
        if let Some(name) = names.get(next) {
            self.select_reference(name);
        }
    }

    /// Pointer moved to `ndc`: update the hover highlight.
    pub fn pointer_moved(&mut self, backend: &mut dyn RenderBackend, ndc: DVec2) {
        self.picker.hover(ndc, &self.camera, &self.scene, backend);
    }

    /// Pointer pressed at `ndc`: focus the labelled body under it, if any.
    pub fn pointer_pressed(&mut self, backend: &mut dyn RenderBackend, ndc: DVec2) -> Option<&'static str> {
        let pick = self.picker.pick(ndc, &self.camera, &self.scene, &*backend)?;
        self.focus_index(pick.body);
        self.scene.body_at(pick.body).map(|b| b.name)
    }

    /// Pointer left the window.
    pub fn pointer_left(&mut self, backend: &mut dyn RenderBackend) {
        self.picker.clear(&self.scene, backend);
    }

    /// Planet-size slider, clamped to [`PLANET_SCALE_RANGE`]. Non-positive and
    /// non-finite values are ignored.
    pub fn set_planet_scale(&mut self, backend: &mut dyn RenderBackend, scale: f64) {
        if !(scale.is_finite() && scale > 0.0) {
            return;
        }
        let scale = scale.clamp(PLANET_SCALE_RANGE.0, PLANET_SCALE_RANGE.1);
        self.scene.resize_planets(backend, scale);
        let star_focused = self
            .focus
            .and_then(|i| self.scene.body_at(i))
            .is_some_and(|b| b.kind == BodyKind::Star);
        if !star_focused {
            camera::resize_planets(&mut self.controls, scale);
        }
    }

    /// Distance slider.
    pub fn set_camera_distance_light_years(&mut self, ly: f64) {
        camera::set_distance_light_years(&mut self.camera, ly);
    }

    pub fn set_show_milky_way(&mut self, backend: &mut dyn RenderBackend, show: bool) {
        self.show_milky_way = show;
        self.scene.set_show_milky_way(backend, show);
    }

    pub fn set_show_central_plane(&mut self, backend: &mut dyn RenderBackend, show: bool) {
        self.show_central_plane = show;
        self.scene.set_show_central_plane(backend, show);
    }

    pub fn show_milky_way(&self) -> bool {
        self.show_milky_way
    }

    pub fn show_central_plane(&self) -> bool {
        self.show_central_plane
    }

    /// Camera distance from the sun, for the readout.
    pub fn distance_readout(&self) -> String {
        camera::distance_readout(&self.camera)
    }

    /// Every body name, sorted, for the searchable list.
    pub fn focusable_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.scene.bodies().iter().map(|b| b.name).collect();
        names.sort_unstable();
        names
    }

    /// Sun, planets and orbiters in catalog order.
    pub fn reference_names(&self) -> Vec<&'static str> {
        self.scene
            .bodies()
            .iter()
            .filter(|b| b.kind != BodyKind::Star)
            .map(|b| b.name)
            .collect()
    }

    /// Info panel contents. Falls back to the sun before anything is chosen.
    pub fn selected_info(&self) -> Option<SelectedInfo> {
        self.selected
            .and_then(|i| self.scene.body_at(i))
            .or_else(|| self.scene.body(catalog::SUN))
            .map(SelectedInfo::of)
    }

    pub fn focused(&self) -> Option<&SceneBody> {
        self.focus.and_then(|i| self.scene.body_at(i))
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.clock.date()
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut SimulationClock {
        &mut self.clock
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    /// Drag rotation.
    pub fn rotate(&mut self, dx: f64, dy: f64) {
        self.controls.rotate(&mut self.camera, dx, dy);
    }

    /// Scroll zoom.
    pub fn zoom(&mut self, lines: f64) {
        self.controls.zoom(&mut self.camera, lines);
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.projection.aspect = width as f64 / height as f64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NodeStore;
    use crate::units::{AU, LIGHT_YEAR};
    use chrono::TimeZone;

    fn setup() -> (NodeStore, Universe) {
        let mut store = NodeStore::new();
        let config = SpacecastConfig {
            start_date: Some("12/26/2012".to_string()),
            asset_dir: std::env::temp_dir().join("spacecast-missing-assets"),
            ..SpacecastConfig::default()
        };
        let universe = Universe::new(&config, &mut store).unwrap();
        (store, universe)
    }

    #[test]
    fn test_starts_on_the_sun() {
        let (_, universe) = setup();
        assert_eq!(universe.date(), Utc.with_ymd_and_hms(2012, 12, 26, 0, 0, 0).unwrap());
        assert_eq!(universe.focused().unwrap().name, "Sun");
        let info = universe.selected_info().unwrap();
        assert_eq!(info.name, "Sun");
        assert_eq!(info.description, "Our home star.");
    }

    #[test]
    fn test_frame_clamps_large_steps() {
        let (mut store, mut universe) = setup();
        let start = universe.date();
        universe.frame(&mut store, Duration::from_secs(30));
        assert_eq!(universe.date() - start, chrono::Duration::milliseconds(200));
    }

    #[test]
    fn test_focus_follows_moving_body() {
        let (mut store, mut universe) = setup();
        assert!(universe.focus_on("Earth"));
        let offset = universe.camera().position() - universe.focused().unwrap().position;

        universe.clock_mut().set_time_scale(86_400.0 * 30.0);
        for _ in 0..10 {
            universe.frame(&mut store, Duration::from_millis(100));
        }
        let earth = universe.focused().unwrap().position;
        assert!((universe.camera().target - earth).length() < 1e-6 * AU);
        let drift = (universe.camera().position() - earth - offset).length();
        assert!(drift < 1e-6 * AU, "drift {}", drift);
    }

    #[test]
    fn test_invalid_date_is_ignored() {
        let (_, mut universe) = setup();
        let before = universe.date();
        assert!(!universe.set_date_from_str("not a date"));
        assert_eq!(universe.date(), before);
        assert!(universe.set_date_from_str("2020-03-20"));
        assert_eq!(universe.date(), Utc.with_ymd_and_hms(2020, 3, 20, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_search_and_focus() {
        let (_, mut universe) = setup();
        assert_eq!(universe.search("sirius").unwrap().name, "Sirius");
        assert!(universe.search("Nemesis").is_none());
        assert!(!universe.focus_on("Nemesis"));
        assert_eq!(universe.focused().unwrap().name, "Sun");

        assert!(universe.focus_on("Sirius"));
        let sirius = universe.scene().body("Sirius").unwrap().position;
        assert_eq!(universe.camera().target, sirius);
        assert_eq!(universe.controls().min_distance, camera::STAR_FOCUS_DISTANCE);
        assert_eq!(universe.selected_info().unwrap().name, "Sirius");
    }

    #[test]
    fn test_reference_selector_excludes_stars() {
        let (_, mut universe) = setup();
        assert!(!universe.select_reference("Sirius"));
        assert!(universe.select_reference("Mars"));
        assert_eq!(universe.focused().unwrap().name, "Mars");

        let names = universe.reference_names();
        assert_eq!(names[0], "Sun");
        universe.select_reference(names[names.len() - 1]);
        universe.cycle_reference();
        assert_eq!(universe.focused().unwrap().name, "Sun");
        universe.cycle_reference();
        assert_eq!(universe.focused().unwrap().name, names[1]);
    }

    #[test]
    fn test_focusable_names_sorted() {
        let (_, universe) = setup();
        let names = universe.focusable_names();
        assert!(names.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(names.len(), universe.scene().bodies().len());
    }

    #[test]
    fn test_planet_scale_moves_min_distance() {
        let (mut store, mut universe) = setup();
        universe.select_reference("Jupiter");
        let jupiter = universe.focused().unwrap().radius;
        universe.set_planet_scale(&mut store, 10.0);
        assert!((universe.controls().min_distance - jupiter * 20.0).abs() < 1e-9);

        universe.set_planet_scale(&mut store, -1.0);
        assert_eq!(universe.scene().planet_scale(), 10.0);
        universe.set_planet_scale(&mut store, 1e9);
        assert_eq!(universe.scene().planet_scale(), PLANET_SCALE_RANGE.1);

        // A focused star keeps its fixed approach distance
        universe.focus_on("Procyon");
        universe.set_planet_scale(&mut store, 2.0);
        assert_eq!(universe.controls().min_distance, camera::STAR_FOCUS_DISTANCE);
    }

    #[test]
    fn test_distance_slider_and_readout() {
        let (_, mut universe) = setup();
        universe.set_camera_distance_light_years(4.5);
        assert_eq!(universe.distance_readout(), "4 light-years");
        assert!((universe.camera().distance_from_origin() - 4.5 * LIGHT_YEAR).abs() < 1e-3 * LIGHT_YEAR);
    }

    #[test]
    fn test_pointer_press_focuses_label() {
        let (mut store, mut universe) = setup();
        let sirius = universe.scene().body("Sirius").unwrap().position;
        let camera = universe.camera_mut();
        camera.target = sirius;
        camera.set_position(sirius * 0.5);

        universe.pointer_moved(&mut store, DVec2::ZERO);
        assert_eq!(universe.pointer_pressed(&mut store, DVec2::ZERO), Some("Sirius"));
        assert_eq!(universe.focused().unwrap().name, "Sirius");
        assert!((universe.camera().distance - camera::STAR_FOCUS_DISTANCE).abs() < 1e-6 * LIGHT_YEAR);
    }

    #[test]
    fn test_overlay_toggles() {
        let (mut store, mut universe) = setup();
        assert!(!universe.show_central_plane());
        universe.set_show_central_plane(&mut store, true);
        universe.set_show_milky_way(&mut store, true);
        assert!(universe.show_central_plane());
        assert!(universe.show_milky_way());
        assert!(store.node(universe.scene().milky_way()).unwrap().visible);
    }
}
