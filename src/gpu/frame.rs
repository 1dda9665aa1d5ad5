//! Flattening the node store into per-frame draw lists.
//!
//! Everything is made relative to the camera position in `f64` before being
//! narrowed to `f32`. Billboards are sorted far to near since the preview
//! renderer draws without a depth buffer.

use glam::DVec3;

use crate::camera::Camera;
use crate::render::{Blending, Color, NodeId, NodeShape, NodeStore};
use crate::shader::{BillboardInstance, BillboardStyle, LineVertex};
use crate::textures::TextureRef;

/// Which texture a billboard samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKey {
    /// Pixels held by the node itself (labels, the cloud layer).
    Node(NodeId),
    /// An image file under the asset directory.
    File(TextureRef),
    /// Plain white; the tint alone decides the colour.
    White,
    /// Procedural soft glow.
    Glow,
}

/// One billboard draw.
#[derive(Debug, Clone, PartialEq)]
pub struct BillboardDraw {
    pub instance: BillboardInstance,
    pub blending: Blending,
    pub texture: TextureKey,
    /// Used in place of `texture` when a file cannot be loaded.
    pub fallback: TextureKey,
    /// Distance along the view direction, for sorting.
    pub depth: f64,
}

/// Everything drawn in one frame.
#[derive(Debug, Default)]
pub struct FrameGeometry {
    /// Far to near.
    pub billboards: Vec<BillboardDraw>,
    /// Line list, two vertices per segment.
    pub lines: Vec<LineVertex>,
    /// Tint of a visible back-side sphere, drawn as the clear colour.
    pub backdrop: Option<Color>,
}

impl FrameGeometry {
    pub fn build(store: &NodeStore, camera: &Camera) -> Self {
        let eye = camera.position();
        let forward = (-camera.offset()).normalize_or_zero();
        let relative = |p: DVec3| (p - eye).as_vec3().to_array();

        let mut frame = Self::default();
        for (id, node) in store.nodes().filter(|(_, n)| n.visible) {
            let color = node.color.to_array();
            match &node.shape {
                NodeShape::Sphere(desc) if desc.back_side => {
                    frame.backdrop = Some(node.color);
                }
                NodeShape::Sphere(desc) => {
                    let style = if desc.glow { BillboardStyle::Rim } else { BillboardStyle::Globe };
                    let texture = match (&node.texture, desc.map) {
                        (Some(_), _) => TextureKey::Node(id),
                        (None, Some(path)) => TextureKey::File(path),
                        (None, None) => TextureKey::White,
                    };
                    let size = (desc.radius * 2.0 * node.scale) as f32;
                    frame.push_billboard(
                        BillboardInstance::new(relative(node.position), size, color, style),
                        Blending::Normal,
                        texture,
                        TextureKey::White,
                        (node.position - eye).dot(forward),
                    );
                }
                NodeShape::Sprite { size, blending, image } => {
                    let texture = match (&node.texture, *image) {
                        (Some(_), _) => TextureKey::Node(id),
                        (None, Some(path)) => TextureKey::File(path),
                        (None, None) => TextureKey::Glow,
                    };
                    let size = (size * node.scale) as f32;
                    frame.push_billboard(
                        BillboardInstance::new(relative(node.position), size, color, BillboardStyle::Sprite),
                        *blending,
                        texture,
                        TextureKey::Glow,
                        (node.position - eye).dot(forward),
                    );
                }
                NodeShape::LineLoop(points) => {
                    let n = points.len();
                    if n < 2 {
                        continue;
                    }
                    for i in 0..n {
                        let a = node.position + points[i];
                        let b = node.position + points[(i + 1) % n];
                        frame.push_segment(relative(a), relative(b), color);
                    }
                }
                NodeShape::LineSegments(points) => {
                    for pair in points.chunks_exact(2) {
                        let a = node.position + pair[0];
                        let b = node.position + pair[1];
                        frame.push_segment(relative(a), relative(b), color);
                    }
                }
            }
        }

        frame.billboards.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        frame
    }

    fn push_billboard(
        &mut self,
        instance: BillboardInstance,
        blending: Blending,
        texture: TextureKey,
        fallback: TextureKey,
        depth: f64,
    ) {
        self.billboards.push(BillboardDraw {
            instance,
            blending,
            texture,
            fallback,
            depth,
        });
    }

    fn push_segment(&mut self, a: [f32; 3], b: [f32; 3], color: [f32; 4]) {
        self.lines.push(LineVertex { position: a, color });
        self.lines.push(LineVertex { position: b, color });
    }

    pub fn instances(&self) -> Vec<BillboardInstance> {
        self.billboards.iter().map(|b| b.instance).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RenderBackend, SphereDesc, SpriteDesc, SpriteImage};

    fn camera_at(position: DVec3) -> Camera {
        let mut camera = Camera::new();
        camera.target = DVec3::ZERO;
        camera.set_position(position);
        camera
    }

    fn sprite(store: &mut NodeStore, position: DVec3) -> NodeId {
        let id = store.create_sprite(SpriteDesc {
            size: 1.0,
            color: Color::WHITE,
            blending: Blending::Additive,
            image: SpriteImage::File("images/starsprite.png"),
        });
        store.set_position(id, position);
        id
    }

    #[test]
    fn test_billboards_sorted_far_to_near() {
        let mut store = NodeStore::new();
        sprite(&mut store, DVec3::new(0.0, 0.0, 50.0));
        sprite(&mut store, DVec3::new(0.0, 0.0, -50.0));
        let frame = FrameGeometry::build(&store, &camera_at(DVec3::new(0.0, 0.0, 100.0)));
        assert_eq!(frame.billboards.len(), 2);
        assert!(frame.billboards[0].depth > frame.billboards[1].depth);
        assert_eq!(frame.billboards[0].instance.center, [0.0, 0.0, -150.0]);
    }

    #[test]
    fn test_hidden_nodes_skipped_and_backdrop() {
        let mut store = NodeStore::new();
        let hidden = sprite(&mut store, DVec3::ZERO);
        store.set_visible(hidden, false);
        let sky = store.create_sphere(SphereDesc {
            back_side: true,
            ..SphereDesc::new(1e9, Color::rgb8(40, 40, 60))
        });
        let frame = FrameGeometry::build(&store, &camera_at(DVec3::new(0.0, 0.0, 10.0)));
        assert!(frame.billboards.is_empty());
        assert_eq!(frame.backdrop, Some(store.node(sky).unwrap().color));
    }

    #[test]
    fn test_line_loop_is_closed() {
        let mut store = NodeStore::new();
        let points = vec![DVec3::X, DVec3::Z, -DVec3::X];
        store.create_line_loop(points, Color::WHITE);
        let frame = FrameGeometry::build(&store, &camera_at(DVec3::new(0.0, 10.0, 0.0)));
        assert_eq!(frame.lines.len(), 6);
        assert_eq!(frame.lines[5].position, frame.lines[0].position);
    }

    #[test]
    fn test_sphere_size_follows_scale_and_texture() {
        let mut store = NodeStore::new();
        let planet = store.create_sphere(SphereDesc {
            map: Some("images/marsmap.jpg"),
            ..SphereDesc::new(0.5, Color::WHITE)
        });
        store.set_scale(planet, 4.0);
        let frame = FrameGeometry::build(&store, &camera_at(DVec3::new(0.0, 0.0, 10.0)));
        let draw = &frame.billboards[0];
        assert_eq!(draw.instance.size, 4.0);
        assert_eq!(draw.instance.style, BillboardStyle::Globe as u32);
        assert_eq!(draw.texture, TextureKey::File("images/marsmap.jpg"));

        store.set_texture(planet, crate::textures::TextureConfig::solid(1, 2, 3, 4));
        let frame = FrameGeometry::build(&store, &camera_at(DVec3::new(0.0, 0.0, 10.0)));
        assert_eq!(frame.billboards[0].texture, TextureKey::Node(planet));
    }
}
