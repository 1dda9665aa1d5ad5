//! Error types for Spacecast.
//!
//! Window and GPU setup, texture loading, orbital elements, date entry and
//! configuration each get their own error type. [`SpacecastError`] is what
//! [`Spacecast::run`](crate::Spacecast::run) returns.

use std::fmt;

/// Preview renderer setup failures.
#[derive(Debug)]
pub enum GpuError {
    /// The window surface could not be created.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can present to the window surface.
    NoAdapter,
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Cannot create a surface for the preview window: {}", e),
            GpuError::NoAdapter => write!(f, "No GPU adapter can draw to the preview window"),
            GpuError::DeviceCreation(e) => write!(f, "Cannot open the GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Body maps, cloud layers and other image assets that failed to load.
#[derive(Debug)]
pub enum TextureError {
    ImageLoad(image::ImageError),
    Io(std::io::Error),
    /// Cloud colour map and transparency mask differ in size.
    DimensionMismatch {
        color: (u32, u32),
        mask: (u32, u32),
    },
    /// A background loader thread panicked.
    LoaderPanicked(String),
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::ImageLoad(e) => write!(f, "Cannot decode image: {}", e),
            TextureError::Io(e) => write!(f, "Cannot read image file: {}", e),
            TextureError::DimensionMismatch { color, mask } => write!(
                f,
                "Colour map is {}x{} but mask is {}x{}",
                color.0, color.1, mask.0, mask.1
            ),
            TextureError::LoaderPanicked(path) => write!(f, "Texture loader for '{}' panicked", path),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::ImageLoad(e) => Some(e),
            TextureError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        TextureError::ImageLoad(e)
    }
}

impl From<std::io::Error> for TextureError {
    fn from(e: std::io::Error) -> Self {
        TextureError::Io(e)
    }
}

/// Orbital elements that do not describe a closed ellipse.
#[derive(Debug, Clone, PartialEq)]
pub enum OrbitError {
    /// Eccentricity outside the open interval (0, 1).
    Eccentricity(f64),
    /// Non-positive orbital period.
    Period(f64),
    /// Perihelion not positive or beyond aphelion.
    Apsides { aphelion: f64, perihelion: f64 },
}

impl fmt::Display for OrbitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrbitError::Eccentricity(e) => write!(f, "Eccentricity {} is not in (0, 1)", e),
            OrbitError::Period(p) => write!(f, "Orbital period {} days is not positive", p),
            OrbitError::Apsides { aphelion, perihelion } => write!(
                f,
                "Perihelion {} must be positive and no greater than aphelion {}",
                perihelion, aphelion
            ),
        }
    }
}

impl std::error::Error for OrbitError {}

/// A date string that none of the accepted formats could parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError {
    pub input: String,
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unrecognised date '{}' (expected MM/DD/YYYY, YYYY-MM-DD or RFC 3339)",
            self.input
        )
    }
}

impl std::error::Error for DateParseError {}

/// Errors reading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// The configured start date did not parse.
    StartDate(DateParseError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config: {}", e),
            ConfigError::Json(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::StartDate(e) => write!(f, "Invalid start date in config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::StartDate(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl From<DateParseError> for ConfigError {
    fn from(e: DateParseError) -> Self {
        ConfigError::StartDate(e)
    }
}

/// Errors that can occur when running the viewer.
#[derive(Debug)]
pub enum SpacecastError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// Configuration could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for SpacecastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpacecastError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            SpacecastError::Window(e) => write!(f, "Failed to create window: {}", e),
            SpacecastError::Gpu(e) => write!(f, "GPU error: {}", e),
            SpacecastError::Config(e) => write!(f, "Config error: {}", e),
        }
    }
}

impl std::error::Error for SpacecastError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpacecastError::EventLoop(e) => Some(e),
            SpacecastError::Window(e) => Some(e),
            SpacecastError::Gpu(e) => Some(e),
            SpacecastError::Config(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for SpacecastError {
    fn from(e: winit::error::EventLoopError) -> Self {
        SpacecastError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for SpacecastError {
    fn from(e: winit::error::OsError) -> Self {
        SpacecastError::Window(e)
    }
}

impl From<GpuError> for SpacecastError {
    fn from(e: GpuError) -> Self {
        SpacecastError::Gpu(e)
    }
}

impl From<ConfigError> for SpacecastError {
    fn from(e: ConfigError) -> Self {
        SpacecastError::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_config_error_chains_source() {
        let err: SpacecastError = ConfigError::from(DateParseError { input: "soon".into() }).into();
        assert!(err.to_string().contains("soon"));
        let source = err.source().and_then(|s| s.source());
        assert!(source.is_some());
    }

    #[test]
    fn test_dimension_mismatch_message() {
        let err = TextureError::DimensionMismatch { color: (4, 2), mask: (2, 2) };
        assert_eq!(err.to_string(), "Colour map is 4x2 but mask is 2x2");
    }
}
