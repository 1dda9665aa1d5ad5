//! WGSL sources for the preview renderer and the GPU structs they read.

use bytemuck::{Pod, Zeroable};

/// Camera-facing quads: sprites, labels and sphere discs.
pub const BILLBOARD_SHADER: &str = include_str!("shaders/billboard.wgsl");
/// Orbit rings and other polylines.
pub const LINE_SHADER: &str = include_str!("shaders/line.wgsl");

/// How the billboard fragment shader treats a quad. Values match the
/// `STYLE_*` constants in `billboard.wgsl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum BillboardStyle {
    /// Texture times tint.
    Sprite = 0,
    /// Shaded disc with the texture wrapped on the front hemisphere.
    Globe = 1,
    /// Thin bright ring at the edge (atmospheres).
    Rim = 2,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct Uniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
}

/// One billboard. `center` is relative to the camera.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct BillboardInstance {
    pub center: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
    pub style: u32,
    pub _pad: [u32; 3],
}

impl BillboardInstance {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 4] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32, 2 => Float32x4, 3 => Uint32];

    pub fn new(center: [f32; 3], size: f32, color: [f32; 4], style: BillboardStyle) -> Self {
        Self {
            center,
            size,
            color,
            style: style as u32,
            _pad: [0; 3],
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// One end of a line segment. `position` is relative to the camera.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpu_struct_sizes() {
        // Uniform buffers need 16 byte multiples
        assert_eq!(std::mem::size_of::<Uniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<BillboardInstance>(), 48);
        assert_eq!(std::mem::size_of::<LineVertex>(), 28);
    }

    #[test]
    fn test_style_constants_match_shader() {
        for (style, name) in [
            (BillboardStyle::Sprite, "STYLE_SPRITE"),
            (BillboardStyle::Globe, "STYLE_GLOBE"),
            (BillboardStyle::Rim, "STYLE_RIM"),
        ] {
            let decl = format!("const {}: u32 = {}u;", name, style as u32);
            assert!(BILLBOARD_SHADER.contains(&decl), "{}", decl);
        }
    }
}
