//! Preview window: a winit event loop driving a [`Universe`] drawn by the wgpu
//! [`Renderer`].
//!
//! | Input | Action |
//! |---|---|
//! | Left drag | Orbit the focused body |
//! | Scroll | Zoom |
//! | Hover / click a label | Highlight / focus that body |
//! | Type + Enter | Jump to a date, or focus a body by name |
//! | Tab | Next reference body |
//! | F1 / F2 | Milky Way / central plane |
//! | F3 | Log the info panel |
//! | `+` / `-` | Planet size |
//! | Page Up / Page Down | Time scale ×10 / ÷10 |
//! | Space | Pause the clock |
//!
//! Key bindings are ignored while a line is being typed.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::SpacecastConfig;
use crate::error::SpacecastError;
use crate::gpu::{GpuState, Renderer};
use crate::input::{Input, KeyCode, MouseButton};
use crate::render::CursorIcon;
use crate::time::Time;
use crate::universe::Universe;

/// Planet-size change per `+` / `-` press.
const PLANET_SCALE_STEP: f64 = 2.0;

/// Time-scale change per Page Up / Page Down press.
const TIME_SCALE_STEP: f64 = 10.0;

/// Viewer builder.
///
/// Use method chaining to configure, then call `.run()` to open the window.
///
/// ```ignore
/// use spacecast::prelude::*;
///
/// fn main() -> Result<(), SpacecastError> {
///     Spacecast::new()
///         .with_reference("Jupiter")
///         .with_planet_scale(40.0)
///         .run()
/// }
/// ```
pub struct Spacecast {
    config: SpacecastConfig,
}

impl Spacecast {
    /// Create a viewer with default settings.
    pub fn new() -> Self {
        Self {
            config: SpacecastConfig::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: SpacecastConfig) -> Self {
        self.config = config;
        self
    }

    /// Start the simulated clock at `date`.
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.config.start_date = Some(date.to_rfc3339());
        self
    }

    /// Frame this body at startup.
    pub fn with_reference(mut self, name: impl Into<String>) -> Self {
        self.config.reference = name.into();
        self
    }

    /// Simulated seconds per real second.
    pub fn with_time_scale(mut self, scale: f64) -> Self {
        self.config.time_scale = scale;
        self
    }

    pub fn with_planet_scale(mut self, scale: f64) -> Self {
        self.config.planet_scale = scale;
        self
    }

    /// Directory the `images/` assets are read from.
    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.asset_dir = dir.into();
        self
    }

    pub fn config(&self) -> &SpacecastConfig {
        &self.config
    }

    /// Open the window and run until it is closed.
    pub fn run(self) -> Result<(), SpacecastError> {
        // Fail before opening a window
        self.config.start_date()?;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self.config);
        event_loop.run_app(&mut app)?;
        app.error.map_or(Ok(()), Err)
    }
}

impl Default for Spacecast {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    config: SpacecastConfig,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    universe: Option<Universe>,
    input: Input,
    time: Time,
    title: String,
    error: Option<SpacecastError>,
}

impl App {
    fn new(config: SpacecastConfig) -> Self {
        let mut input = Input::new();
        input.set_window_size(config.window.width, config.window.height);
        Self {
            config,
            window: None,
            renderer: None,
            universe: None,
            input,
            time: Time::new(),
            title: String::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), SpacecastError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = pollster::block_on(GpuState::new(window.clone(), self.config.asset_dir.clone()))?;
        let mut renderer = Renderer::new(gpu);
        let mut universe = Universe::new(&self.config, &mut renderer)?;

        let size = renderer.size();
        universe.set_aspect(size.width, size.height);
        self.input.set_window_size(size.width, size.height);

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.universe = Some(universe);
        Ok(())
    }

    /// Apply this frame's input, then advance the universe.
    fn update(&mut self) {
        let dt = self.time.update();
        let (Some(universe), Some(renderer)) = (&mut self.universe, &mut self.renderer) else {
            return;
        };
        let input = &mut self.input;

        let drag = input.drag_delta();
        if drag != glam::DVec2::ZERO {
            universe.rotate(drag.x, drag.y);
        }
        if input.scroll_lines() != 0.0 {
            universe.zoom(input.scroll_lines());
        }
        if input.mouse_moved() {
            universe.pointer_moved(renderer, input.mouse_ndc());
        }
        if input.mouse_pressed(MouseButton::Left) {
            if let Some(name) = universe.pointer_pressed(renderer, input.mouse_ndc()) {
                log::info!("Selected {}", name);
            }
        }

        if let Some(line) = input.take_submitted() {
            if universe.set_date_from_str(&line) {
                log::info!("Date set to {}", universe.date());
            } else if !universe.focus_on(&line) {
                log::warn!("'{}' is neither a date nor a known body", line);
            }
        }

        if !input.is_typing() {
            if input.key_pressed(KeyCode::Tab) {
                universe.cycle_reference();
            }
            if input.key_pressed(KeyCode::F1) {
                let show = !universe.show_milky_way();
                universe.set_show_milky_way(renderer, show);
            }
            if input.key_pressed(KeyCode::F2) {
                let show = !universe.show_central_plane();
                universe.set_show_central_plane(renderer, show);
            }
            if input.key_pressed(KeyCode::F3) {
                if let Some(info) = universe.selected_info() {
                    log::info!(
                        "{}: {} ({}) | {}",
                        info.name,
                        info.description,
                        info.source.unwrap_or("no source"),
                        universe.distance_readout()
                    );
                }
            }
            if input.key_pressed(KeyCode::Plus) {
                let scale = universe.scene().planet_scale() * PLANET_SCALE_STEP;
                universe.set_planet_scale(renderer, scale);
            }
            if input.key_pressed(KeyCode::Minus) {
                let scale = universe.scene().planet_scale() / PLANET_SCALE_STEP;
                universe.set_planet_scale(renderer, scale);
            }
            if input.key_pressed(KeyCode::PageUp) {
                let clock = universe.clock_mut();
                clock.set_time_scale((clock.time_scale() * TIME_SCALE_STEP).max(1.0));
            }
            if input.key_pressed(KeyCode::PageDown) {
                let clock = universe.clock_mut();
                clock.set_time_scale(clock.time_scale() / TIME_SCALE_STEP);
            }
            if input.key_pressed(KeyCode::Space) {
                universe.clock_mut().toggle_pause();
            }
        }

        universe.frame(renderer, dt);
        input.end_frame();

        if let Some(window) = &self.window {
            if let Some(cursor) = renderer.take_cursor_change() {
                window.set_cursor(match cursor {
                    CursorIcon::Default => winit::window::CursorIcon::Default,
                    CursorIcon::Pointer => winit::window::CursorIcon::Pointer,
                });
            }

            let mut title = format!(
                "{} | {} | {}",
                self.config.window.title,
                universe.date().format("%Y-%m-%d"),
                universe.distance_readout()
            );
            if input.is_typing() {
                title.push_str(" | > ");
                title.push_str(input.text());
            }
            if title != self.title {
                window.set_title(&title);
                self.title = title;
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                log::error!("{}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
                if let Some(universe) = &mut self.universe {
                    universe.set_aspect(physical_size.width, physical_size.height);
                }
            }
            WindowEvent::CursorLeft { .. } => {
                if let (Some(universe), Some(renderer)) = (&mut self.universe, &mut self.renderer) {
                    universe.pointer_left(renderer);
                }
            }
            WindowEvent::RedrawRequested => {
                self.update();
                if let (Some(universe), Some(renderer)) = (&self.universe, &mut self.renderer) {
                    match renderer.render(universe.camera()) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            renderer.resize(renderer.size())
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("GPU out of memory");
                            event_loop.exit();
                        }
                        Err(e) => log::error!("Render error: {:?}", e),
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
