//! Texture data, background image loads and cloud compositing.
//!
//! Textures are plain RGBA8 buffers ([`TextureConfig`]) until a backend uploads
//! them. Image files are decoded with the `image` crate, either synchronously
//! ([`TextureConfig::from_file`]) or on a worker thread ([`TextureLoad`]).
//!
//! The Earth cloud layer needs two images at once: a colour map and a
//! transparency mask. Each is loaded on its own thread and a
//! [`CompletionBarrier`] reports when both have landed, at which point
//! [`compose_cloud_texture`] merges them:
//!
//! ```text
//! rgb   = colour.rgb
//! alpha = 255 - mask.r
//! ```

use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use image::RgbaImage;

use crate::error::TextureError;

/// Path of a texture image, relative to the asset directory.
pub type TextureRef = &'static str;

/// Cloud colour map.
pub const CLOUD_MAP: TextureRef = "images/earthcloudmap.jpg";
/// Cloud transparency mask. Dark pixels are opaque cloud.
pub const CLOUD_MASK: TextureRef = "images/earthcloudmaptrans.jpg";
/// Backdrop for the Milky Way sphere.
pub const MILKY_WAY_MAP: TextureRef = "images/galaxy.jpg";
/// Glow sprite drawn over the sun.
pub const SUN_SPRITE: TextureRef = "images/sunsprite.png";
/// Sprite for each nearest star.
pub const STAR_SPRITE: TextureRef = "images/starsprite.png";

/// Filter mode for texture sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Smooth linear filtering (default).
    #[default]
    Linear,
    /// Sharp nearest-neighbor filtering.
    Nearest,
}

/// An RGBA8 image ready to hand to a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureConfig {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub filter: FilterMode,
}

impl TextureConfig {
    /// Wrap raw RGBA data. Returns `None` if the buffer length does not match.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Option<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
            filter: FilterMode::Linear,
        })
    }

    pub fn from_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            data: img.into_raw(),
            width,
            height,
            filter: FilterMode::Linear,
        }
    }

    /// Decode an image file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        Ok(Self::from_image(decode_rgba(path.as_ref())?))
    }

    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    /// A 1x1 texture.
    pub fn solid(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            data: vec![r, g, b, a],
            width: 1,
            height: 1,
            filter: FilterMode::Nearest,
        }
    }

    /// A soft round glow, white at the centre and transparent at the rim.
    ///
    /// Stand-in for the sun and star sprite images when they are not on disk.
    pub fn radial_glow(size: u32) -> Self {
        let size = size.max(2);
        let half = size as f32 / 2.0;
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let dx = (x as f32 + 0.5 - half) / half;
                let dy = (y as f32 + 0.5 - half) / half;
                let falloff = (1.0 - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0);
                let a = (falloff * falloff * 255.0).round() as u8;
                data.extend_from_slice(&[255, 255, 255, a]);
            }
        }
        Self {
            data,
            width: size,
            height: size,
            filter: FilterMode::Linear,
        }
    }

    /// RGBA at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        self.data.get(i..i + 4).and_then(|p| p.try_into().ok())
    }
}

fn decode_rgba(path: &Path) -> Result<RgbaImage, TextureError> {
    let bytes = std::fs::read(path)?;
    Ok(image::load_from_memory(&bytes)?.into_rgba8())
}

/// Load `relative` under `asset_dir`, logging and returning `None` on failure.
pub fn load_optional(asset_dir: &Path, relative: TextureRef) -> Option<TextureConfig> {
    let path = asset_dir.join(relative);
    match TextureConfig::from_file(&path) {
        Ok(tex) => {
            log::debug!("Loaded texture {} ({}x{})", path.display(), tex.width, tex.height);
            Some(tex)
        }
        Err(e) => {
            log::warn!("Texture '{}' unavailable: {}", path.display(), e);
            None
        }
    }
}

/// Merge a cloud colour map with its transparency mask.
///
/// The result takes RGB from `color` and sets alpha to `255 - mask.r`. Both
/// images must have the same dimensions.
pub fn compose_cloud_texture(color: &RgbaImage, mask: &RgbaImage) -> Result<TextureConfig, TextureError> {
    if color.dimensions() != mask.dimensions() {
        return Err(TextureError::DimensionMismatch {
            color: color.dimensions(),
            mask: mask.dimensions(),
        });
    }
    let mut out = color.clone();
    for (dst, src) in out.pixels_mut().zip(mask.pixels()) {
        dst.0[3] = 255 - src.0[0];
    }
    Ok(TextureConfig::from_image(out))
}

/// One image decoding on a background thread.
#[derive(Debug)]
pub struct TextureLoad {
    path: PathBuf,
    handle: Option<JoinHandle<Result<RgbaImage, TextureError>>>,
    result: Option<Result<RgbaImage, TextureError>>,
}

impl TextureLoad {
    /// Start decoding `path`.
    pub fn spawn(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let worker_path = path.clone();
        let handle = thread::spawn(move || decode_rgba(&worker_path));
        Self {
            path,
            handle: Some(handle),
            result: None,
        }
    }

    /// A load that has already finished with `result`.
    pub fn ready(path: impl Into<PathBuf>, result: Result<RgbaImage, TextureError>) -> Self {
        Self {
            path: path.into(),
            handle: None,
            result: Some(result),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Collect the worker's result if it is done. Never blocks.
    pub fn poll(&mut self) -> bool {
        if let Some(handle) = self.handle.take() {
            if handle.is_finished() {
                self.result = Some(handle.join().unwrap_or_else(|_| {
                    Err(TextureError::LoaderPanicked(self.path.display().to_string()))
                }));
            } else {
                self.handle = Some(handle);
            }
        }
        self.result.is_some()
    }

    /// Take the finished result, if any.
    pub fn take(&mut self) -> Option<Result<RgbaImage, TextureError>> {
        self.result.take()
    }
}

/// Joins a fixed set of [`TextureLoad`]s.
///
/// [`poll`](CompletionBarrier::poll) yields the results exactly once, in the
/// order the loads were given, after every load has completed.
#[derive(Debug)]
pub struct CompletionBarrier {
    loads: Vec<TextureLoad>,
    released: bool,
}

impl CompletionBarrier {
    pub fn new(loads: Vec<TextureLoad>) -> Self {
        Self { loads, released: false }
    }

    /// Number of loads still running.
    pub fn pending(&mut self) -> usize {
        self.loads.iter_mut().map(|l| l.poll()).filter(|ready| !ready).count()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn poll(&mut self) -> Option<Vec<Result<RgbaImage, TextureError>>> {
        if self.released || self.pending() > 0 {
            return None;
        }
        self.released = true;
        self.loads.iter_mut().map(|l| l.take()).collect()
    }
}

/// The Earth cloud texture job: two loads joined by a barrier, then composed.
#[derive(Debug)]
pub struct CloudTextureJob {
    barrier: CompletionBarrier,
}

impl CloudTextureJob {
    /// Start loading the colour map and mask from `asset_dir`.
    pub fn spawn(asset_dir: &Path) -> Self {
        Self::from_loads(
            TextureLoad::spawn(asset_dir.join(CLOUD_MAP)),
            TextureLoad::spawn(asset_dir.join(CLOUD_MASK)),
        )
    }

    pub fn from_loads(color: TextureLoad, mask: TextureLoad) -> Self {
        Self {
            barrier: CompletionBarrier::new(vec![color, mask]),
        }
    }

    /// `Some` once, after both loads completed.
    pub fn poll(&mut self) -> Option<Result<TextureConfig, TextureError>> {
        let mut results = self.barrier.poll()?.into_iter();
        let (color, mask) = match (results.next(), results.next()) {
            (Some(c), Some(m)) => (c, m),
            _ => return None,
        };
        Some(color.and_then(|c| mask.and_then(|m| compose_cloud_texture(&c, &m))))
    }

    pub fn is_done(&self) -> bool {
        self.barrier.is_released()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::time::{Duration, Instant};

    fn wait_for<F: FnMut() -> bool>(mut f: F) {
        let start = Instant::now();
        while !f() {
            assert!(start.elapsed() < Duration::from_secs(10), "timed out");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_compose_alpha_is_inverted_mask() {
        let color = RgbaImage::from_fn(4, 2, |x, y| Rgba([x as u8 * 10, y as u8 * 20, 7, 255]));
        let mask = RgbaImage::from_fn(4, 2, |x, y| Rgba([(x * 60 + y) as u8, 0, 0, 255]));
        let tex = compose_cloud_texture(&color, &mask).unwrap();
        for y in 0..2 {
            for x in 0..4 {
                let p = tex.pixel(x, y).unwrap();
                let c = color.get_pixel(x, y).0;
                let m = mask.get_pixel(x, y).0;
                assert_eq!(&p[..3], &c[..3]);
                assert_eq!(p[3], 255 - m[0]);
            }
        }
    }

    #[test]
    fn test_compose_rejects_mismatched_sizes() {
        let color = RgbaImage::new(4, 4);
        let mask = RgbaImage::new(2, 4);
        assert!(matches!(
            compose_cloud_texture(&color, &mask),
            Err(TextureError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_from_rgba_checks_length() {
        assert!(TextureConfig::from_rgba(vec![0; 16], 2, 2).is_some());
        assert!(TextureConfig::from_rgba(vec![0; 15], 2, 2).is_none());
    }

    #[test]
    fn test_radial_glow_fades_out() {
        let glow = TextureConfig::radial_glow(32);
        let centre = glow.pixel(16, 16).unwrap()[3];
        let corner = glow.pixel(0, 0).unwrap()[3];
        assert!(centre > 200);
        assert_eq!(corner, 0);
        assert!(glow.pixel(32, 0).is_none());
    }

    #[test]
    fn test_barrier_waits_for_every_load() {
        let mut barrier = CompletionBarrier::new(vec![
            TextureLoad::ready("a", Ok(RgbaImage::new(1, 1))),
            TextureLoad::spawn("/nonexistent/spacecast/missing.png"),
        ]);
        let mut results = None;
        wait_for(|| {
            results = barrier.poll();
            results.is_some()
        });
        let results = results.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(TextureError::Io(_))));
        assert!(barrier.poll().is_none());
    }

    #[test]
    fn test_barrier_counts_pending_loads() {
        let mut barrier = CompletionBarrier::new(vec![
            TextureLoad::ready("a", Ok(RgbaImage::new(1, 1))),
            TextureLoad::ready("b", Ok(RgbaImage::new(1, 1))),
        ]);
        assert_eq!(barrier.pending(), 0);

        let mut barrier = CompletionBarrier::new(vec![
            TextureLoad::ready("a", Ok(RgbaImage::new(1, 1))),
            TextureLoad::spawn("/nonexistent/spacecast/missing.png"),
        ]);
        assert!(barrier.pending() <= 1);
        wait_for(|| barrier.pending() == 0);
        assert!(!barrier.is_released());
        assert!(barrier.poll().is_some());
        assert!(barrier.is_released());
    }

    #[test]
    fn test_cloud_job_composes_once() {
        let color = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
        let mask = RgbaImage::from_pixel(2, 2, Rgba([55, 0, 0, 255]));
        let mut job = CloudTextureJob::from_loads(
            TextureLoad::ready(CLOUD_MAP, Ok(color)),
            TextureLoad::ready(CLOUD_MASK, Ok(mask)),
        );
        assert!(!job.is_done());
        let tex = job.poll().unwrap().unwrap();
        assert_eq!(tex.pixel(1, 1), Some([10, 20, 30, 200]));
        assert!(job.is_done());
        assert!(job.poll().is_none());
    }

    #[test]
    fn test_cloud_job_reports_missing_assets() {
        let mut job = CloudTextureJob::spawn(Path::new("/nonexistent/spacecast"));
        let mut outcome = None;
        wait_for(|| {
            outcome = job.poll();
            outcome.is_some()
        });
        assert!(outcome.unwrap().is_err());
    }
}
