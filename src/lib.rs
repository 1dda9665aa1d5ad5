//! # Spacecast
//!
//! An interactive 3D map of the solar system and the nearest stars.
//!
//! Spacecast places the sun, the eight planets, a handful of comets and dwarf
//! planets, and the fifty-odd nearest stars in one scene that spans from a
//! planet's radius to the edge of the Milky Way. Planet positions come from
//! circular orbits, small bodies from precomputed Keplerian ellipses, and stars
//! from catalog right ascension, declination and distance.
//!
//! ## Quick Start
//!
//! ```ignore
//! use spacecast::prelude::*;
//!
//! fn main() -> Result<(), SpacecastError> {
//!     Spacecast::new()
//!         .with_reference("Saturn")
//!         .with_time_scale(86_400.0)
//!         .run()
//! }
//! ```
//!
//! ## Headless use
//!
//! Everything except the preview window runs against the [`RenderBackend`]
//! trait. [`NodeStore`] is an in-memory backend, so a [`Universe`] can be
//! built and driven without a GPU:
//!
//! ```
//! use spacecast::prelude::*;
//! use std::time::Duration;
//!
//! let mut store = NodeStore::new();
//! let config = SpacecastConfig {
//!     start_date: Some("12/26/2012".into()),
//!     ..SpacecastConfig::default()
//! };
//! let mut universe = Universe::new(&config, &mut store).unwrap();
//! assert!(universe.focus_on("Sirius"));
//! universe.frame(&mut store, Duration::from_millis(16));
//! assert_eq!(universe.selected_info().unwrap().name, "Sirius");
//! ```
//!
//! ## Units
//!
//! Every distance is a multiple of one Earth diameter; see [`units`]. World
//! math is `f64` throughout. The preview renderer narrows to `f32` only after
//! making positions relative to the camera.
//!
//! ## Modules
//!
//! - [`units`], [`catalog`], [`orbit`]: the data and the position model
//! - [`scene`], [`label`], [`textures`], [`render`]: scene composition
//! - [`camera`], [`picking`]: framing, controls and label picking
//! - [`universe`]: the application context updated once per frame
//! - [`config`], [`error`], [`time`], [`input`]: ambient pieces
//! - `gpu`, [`shader`], `window`: the wgpu preview

pub mod camera;
pub mod catalog;
pub mod config;
pub mod error;
mod gpu;
pub mod input;
pub mod label;
pub mod orbit;
pub mod picking;
pub mod render;
pub mod scene;
pub mod shader;
pub mod textures;
pub mod time;
pub mod units;
pub mod universe;
mod window;

pub use camera::{Camera, OrbitControls};
pub use config::SpacecastConfig;
pub use error::{ConfigError, DateParseError, GpuError, OrbitError, SpacecastError, TextureError};
pub use glam::{DVec2, DVec3};
pub use gpu::{FrameGeometry, Renderer, TextureKey};
pub use render::{NodeId, NodeStore, RenderBackend};
pub use scene::{BodyKind, Scene, SceneBody, SceneSettings};
pub use universe::{SelectedInfo, Universe};
pub use window::Spacecast;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::camera::{Camera, OrbitControls};
    pub use crate::catalog::{HOME_PLANET, SUN};
    pub use crate::config::SpacecastConfig;
    pub use crate::error::SpacecastError;
    pub use crate::input::{Input, KeyCode, MouseButton};
    pub use crate::orbit::Orbit;
    pub use crate::render::{Color, NodeId, NodeStore, RenderBackend};
    pub use crate::scene::{BodyKind, Scene, SceneSettings};
    pub use crate::time::{SimulationClock, Time};
    pub use crate::units::{AU, EARTH_DIAMETER, LIGHT_YEAR};
    pub use crate::universe::{SelectedInfo, Universe};
    pub use crate::window::Spacecast;
    pub use crate::{DVec2, DVec3};
}
