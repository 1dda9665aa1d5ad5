//! Text labels drawn onto square canvases.
//!
//! A label canvas is square and its side is the text width rounded up to a
//! power of two. Backends resample non power-of-two textures, which distorts
//! the glyphs.
//!
//! Text shaping is not done here. A [`TextRasterizer`] measures and fills text;
//! [`MonospaceBlockRasterizer`] is a font-free default that draws one solid
//! block per glyph, which is enough to make labels visible and pickable.

use crate::render::Color;
use crate::textures::{FilterMode, TextureConfig};
use crate::units;

/// Font and colours for labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub font_face: String,
    /// Font size in logical pixels.
    pub font_size: f64,
    pub bold: bool,
    /// Tint when idle.
    pub base_color: Color,
    /// Tint while hovered.
    pub active_color: Color,
    /// Canvas pixels per logical pixel. Keep it a power of two.
    pub texture_scale: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_face: "Arial".to_string(),
            font_size: 128.0,
            bold: true,
            base_color: Color::YELLOW,
            active_color: Color::CYAN,
            texture_scale: 0.125,
        }
    }
}

impl LabelStyle {
    /// CSS-style font string, e.g. `Bold 128px Arial`.
    pub fn font(&self) -> String {
        let weight = if self.bold { "Bold " } else { "" };
        format!("{}{}px {}", weight, self.font_size, self.font_face)
    }
}

/// Measures and fills text.
pub trait TextRasterizer {
    /// Width of `text` in logical pixels.
    fn measure(&self, text: &str, style: &LabelStyle) -> f64;

    /// Fill `text` onto `canvas` with its left end at `x = 0` and its baseline
    /// at `baseline`, in logical pixels.
    fn fill_text(&self, text: &str, style: &LabelStyle, canvas: &mut LabelCanvas, baseline: f64);
}

/// Draws each non-space character as a solid block on a fixed advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceBlockRasterizer {
    /// Glyph advance as a fraction of the font size.
    pub advance: f64,
    /// Block height as a fraction of the font size.
    pub cap_height: f64,
}

impl Default for MonospaceBlockRasterizer {
    fn default() -> Self {
        Self {
            advance: 0.6,
            cap_height: 0.72,
        }
    }
}

impl TextRasterizer for MonospaceBlockRasterizer {
    fn measure(&self, text: &str, style: &LabelStyle) -> f64 {
        text.chars().count() as f64 * self.advance * style.font_size
    }

    fn fill_text(&self, text: &str, style: &LabelStyle, canvas: &mut LabelCanvas, baseline: f64) {
        let advance = self.advance * style.font_size;
        let height = self.cap_height * style.font_size;
        let gap = advance * if style.bold { 0.1 } else { 0.2 };
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let x = i as f64 * advance + gap;
            canvas.fill_rect(x, baseline - height, advance - 2.0 * gap, height, [255, 255, 255, 255]);
        }
    }
}

/// A square RGBA canvas addressed in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCanvas {
    logical_side: f64,
    scale: f64,
    side: u32,
    data: Vec<u8>,
}

impl LabelCanvas {
    /// A transparent canvas `logical_side` logical pixels across.
    pub fn new(logical_side: f64, scale: f64) -> Self {
        let side = (logical_side * scale).round().max(1.0) as u32;
        Self {
            logical_side,
            scale,
            side,
            data: vec![0; side as usize * side as usize * 4],
        }
    }

    /// Side in logical pixels.
    pub fn logical_side(&self) -> f64 {
        self.logical_side
    }

    /// Side in texels.
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Fill an axis-aligned rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, rgba: [u8; 4]) {
        let to_texel = |v: f64| (v * self.scale).round().clamp(0.0, self.side as f64) as usize;
        let (x0, x1) = (to_texel(x), to_texel(x + w));
        let (y0, y1) = (to_texel(y), to_texel(y + h));
        let side = self.side as usize;
        for row in y0..y1 {
            for col in x0..x1 {
                let i = (row * side + col) * 4;
                self.data[i..i + 4].copy_from_slice(&rgba);
            }
        }
    }

    /// Count of texels with non-zero alpha.
    pub fn coverage(&self) -> usize {
        self.data.chunks_exact(4).filter(|p| p[3] > 0).count()
    }

    pub fn into_texture(self) -> TextureConfig {
        TextureConfig {
            data: self.data,
            width: self.side,
            height: self.side,
            filter: FilterMode::Linear,
        }
    }
}

/// Logical side of the canvas for `text`.
pub fn canvas_side(rasterizer: &dyn TextRasterizer, text: &str, style: &LabelStyle) -> f64 {
    units::nearest_power_of_two(rasterizer.measure(text, style))
}

/// Rasterize `text` onto a fresh label canvas.
pub fn render_label(rasterizer: &dyn TextRasterizer, text: &str, style: &LabelStyle) -> TextureConfig {
    let side = canvas_side(rasterizer, text, style);
    let mut canvas = LabelCanvas::new(side, style.texture_scale);
    rasterizer.fill_text(text, style, &mut canvas, style.font_size);
    canvas.into_texture()
}
