//! The rendering capability the scene is built against.
//!
//! [`RenderBackend`] is the narrow set of operations Spacecast needs from a
//! renderer: make spheres, sprites and lines, move and recolour them, swap a
//! texture, cast a ray, rasterize text and change the cursor. Nodes are
//! referred to by [`NodeId`] handles.
//!
//! [`NodeStore`] is a complete headless backend. It keeps every node in memory
//! and answers ray casts analytically, which is all the scene, camera and
//! picking logic need. The wgpu preview renderer in [`crate::gpu`] wraps a
//! `NodeStore` and draws what it holds.

use glam::DVec3;

use crate::label::{self, LabelStyle, MonospaceBlockRasterizer, TextRasterizer};
use crate::textures::{TextureConfig, TextureRef};

/// Linear RGBA colour, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb8(255, 255, 255);
    pub const YELLOW: Color = Color::rgb8(255, 255, 0);
    pub const CYAN: Color = Color::rgb8(0, 255, 255);

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// From `0xRRGGBB`.
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    pub const fn with_alpha(mut self, a: f32) -> Self {
        self.a = a;
        self
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Handle to a node owned by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// How a sprite combines with what is behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Blending {
    #[default]
    Normal,
    Additive,
}

/// Pointer affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIcon {
    #[default]
    Default,
    Pointer,
}

/// A half-line in world space. `direction` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the first point on the sphere, if any.
    ///
    /// A ray starting inside the sphere hits it at distance zero.
    pub fn intersect_sphere(&self, center: DVec3, radius: f64) -> Option<f64> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        if c <= 0.0 {
            return Some(0.0);
        }
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let t = -b - disc.sqrt();
        (t >= 0.0).then_some(t)
    }
}

/// A ray cast result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub node: NodeId,
    pub distance: f64,
    pub point: DVec3,
}

/// A UV sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereDesc {
    pub radius: f64,
    pub color: Color,
    pub map: Option<TextureRef>,
    pub bump_map: Option<TextureRef>,
    /// Rendered from the inside (sky backdrops).
    pub back_side: bool,
    /// Drawn as a rim glow instead of a surface (atmospheres).
    pub glow: bool,
}

impl SphereDesc {
    pub fn new(radius: f64, color: Color) -> Self {
        Self {
            radius,
            color,
            map: None,
            bump_map: None,
            back_side: false,
            glow: false,
        }
    }
}

/// What a sprite shows.
#[derive(Debug, Clone, PartialEq)]
pub enum SpriteImage {
    /// An image file, with a procedural glow if it cannot be loaded.
    File(TextureRef),
    /// Pixels produced at runtime (label canvases).
    Pixels(TextureConfig),
}

/// A camera-facing square.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDesc {
    /// Side length in world units.
    pub size: f64,
    pub color: Color,
    pub blending: Blending,
    pub image: SpriteImage,
}

/// The operations Spacecast needs from a renderer.
pub trait RenderBackend {
    fn create_sphere(&mut self, desc: SphereDesc) -> NodeId;

    fn create_sprite(&mut self, desc: SpriteDesc) -> NodeId;

    /// A closed polyline through `points`.
    fn create_line_loop(&mut self, points: Vec<DVec3>, color: Color) -> NodeId;

    /// Independent segments: `points[0]-points[1]`, `points[2]-points[3]`, ...
    fn create_line_segments(&mut self, points: Vec<DVec3>, color: Color) -> NodeId;

    fn set_position(&mut self, node: NodeId, position: DVec3);

    /// Uniform scale relative to the node's created size.
    fn set_scale(&mut self, node: NodeId, scale: f64);

    fn set_color(&mut self, node: NodeId, color: Color);

    fn set_visible(&mut self, node: NodeId, visible: bool);

    /// Replace a node's texture and flag it for re-upload.
    fn set_texture(&mut self, node: NodeId, texture: TextureConfig);

    /// Visible nodes among `nodes` hit by `ray`, nearest first.
    fn intersect(&self, ray: &Ray, nodes: &[NodeId]) -> Vec<Hit>;

    fn text_rasterizer(&self) -> &dyn TextRasterizer;

    fn set_cursor(&mut self, cursor: CursorIcon);

    /// Draw `text` onto a label canvas.
    fn draw_text(&self, text: &str, style: &LabelStyle) -> TextureConfig {
        label::render_label(self.text_rasterizer(), text, style)
    }
}

/// Geometry of a stored node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeShape {
    Sphere(SphereDesc),
    Sprite { size: f64, blending: Blending, image: Option<TextureRef> },
    LineLoop(Vec<DVec3>),
    LineSegments(Vec<DVec3>),
}

/// One node held by a [`NodeStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub shape: NodeShape,
    pub position: DVec3,
    pub scale: f64,
    pub color: Color,
    pub visible: bool,
    pub texture: Option<TextureConfig>,
    /// Set whenever `texture` changes, cleared by whoever uploads it.
    pub needs_update: bool,
}

impl Node {
    fn new(shape: NodeShape, color: Color) -> Self {
        Self {
            shape,
            position: DVec3::ZERO,
            scale: 1.0,
            color,
            visible: true,
            texture: None,
            needs_update: false,
        }
    }

    /// Radius of the sphere used for ray casts, `None` for lines.
    pub fn pick_radius(&self) -> Option<f64> {
        match &self.shape {
            NodeShape::Sphere(desc) => Some(desc.radius * self.scale),
            NodeShape::Sprite { size, .. } => Some(size * self.scale / 2.0),
            NodeShape::LineLoop(_) | NodeShape::LineSegments(_) => None,
        }
    }
}

/// In-memory [`RenderBackend`].
pub struct NodeStore {
    nodes: Vec<Node>,
    cursor: CursorIcon,
    rasterizer: Box<dyn TextRasterizer>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            cursor: CursorIcon::Default,
            rasterizer: Box::new(MonospaceBlockRasterizer::default()),
        }
    }

    /// Use a different text rasterizer for labels.
    pub fn with_rasterizer(mut self, rasterizer: impl TextRasterizer + 'static) -> Self {
        self.rasterizer = Box::new(rasterizer);
        self
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i as u32), n))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn with_node(&mut self, id: NodeId, f: impl FnOnce(&mut Node)) {
        match self.nodes.get_mut(id.0 as usize) {
            Some(node) => f(node),
            None => log::debug!("Ignoring update for unknown node {:?}", id),
        }
    }
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for NodeStore {
    fn create_sphere(&mut self, desc: SphereDesc) -> NodeId {
        let color = desc.color;
        self.push(Node::new(NodeShape::Sphere(desc), color))
    }

    fn create_sprite(&mut self, desc: SpriteDesc) -> NodeId {
        let (image, texture) = match desc.image {
            SpriteImage::File(path) => (Some(path), None),
            SpriteImage::Pixels(pixels) => (None, Some(pixels)),
        };
        let mut node = Node::new(
            NodeShape::Sprite {
                size: desc.size,
                blending: desc.blending,
                image,
            },
            desc.color,
        );
        node.needs_update = texture.is_some();
        node.texture = texture;
        self.push(node)
    }

    fn create_line_loop(&mut self, points: Vec<DVec3>, color: Color) -> NodeId {
        self.push(Node::new(NodeShape::LineLoop(points), color))
    }

    fn create_line_segments(&mut self, points: Vec<DVec3>, color: Color) -> NodeId {
        self.push(Node::new(NodeShape::LineSegments(points), color))
    }

    fn set_position(&mut self, node: NodeId, position: DVec3) {
        self.with_node(node, |n| n.position = position);
    }

    fn set_scale(&mut self, node: NodeId, scale: f64) {
        self.with_node(node, |n| n.scale = scale);
    }

    fn set_color(&mut self, node: NodeId, color: Color) {
        self.with_node(node, |n| n.color = color);
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        self.with_node(node, |n| n.visible = visible);
    }

    fn set_texture(&mut self, node: NodeId, texture: TextureConfig) {
        self.with_node(node, |n| {
            n.texture = Some(texture);
            n.needs_update = true;
        });
    }

    fn intersect(&self, ray: &Ray, nodes: &[NodeId]) -> Vec<Hit> {
        let mut hits: Vec<Hit> = nodes
            .iter()
            .filter_map(|&id| {
                let node = self.node(id).filter(|n| n.visible)?;
                let distance = ray.intersect_sphere(node.position, node.pick_radius()?)?;
                Some(Hit {
                    node: id,
                    distance,
                    point: ray.at(distance),
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn text_rasterizer(&self) -> &dyn TextRasterizer {
        self.rasterizer.as_ref()
    }

    fn set_cursor(&mut self, cursor: CursorIcon) {
        self.cursor = cursor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(size: f64) -> SpriteDesc {
        SpriteDesc {
            size,
            color: Color::WHITE,
            blending: Blending::Additive,
            image: SpriteImage::File("images/starsprite.png"),
        }
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex(0x00b3ff);
        assert_eq!(c, Color::rgb8(0, 0xb3, 0xff));
        assert_eq!(Color::YELLOW.with_alpha(0.5).to_array(), [1.0, 1.0, 0.0, 0.5]);
    }

    #[test]
    fn test_ray_sphere() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, -10.0), DVec3::Z * 3.0);
        assert!((ray.direction.length() - 1.0).abs() < 1e-12);
        let t = ray.intersect_sphere(DVec3::ZERO, 2.0).unwrap();
        assert!((t - 8.0).abs() < 1e-12);
        assert!(ray.intersect_sphere(DVec3::new(5.0, 0.0, 0.0), 2.0).is_none());
        // Behind the origin
        assert!(ray.intersect_sphere(DVec3::new(0.0, 0.0, -20.0), 2.0).is_none());
        // Starting inside
        assert_eq!(ray.intersect_sphere(DVec3::new(0.0, 0.0, -9.0), 2.0), Some(0.0));
    }

    #[test]
    fn test_intersect_orders_and_filters() {
        let mut store = NodeStore::new();
        let near = store.create_sprite(sprite(2.0));
        let far = store.create_sprite(sprite(2.0));
        let hidden = store.create_sprite(sprite(2.0));
        let line = store.create_line_loop(vec![DVec3::ZERO, DVec3::X], Color::WHITE);
        store.set_position(near, DVec3::new(0.0, 0.0, 5.0));
        store.set_position(far, DVec3::new(0.0, 0.0, 50.0));
        store.set_position(hidden, DVec3::new(0.0, 0.0, 2.0));
        store.set_visible(hidden, false);

        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        let hits = store.intersect(&ray, &[far, near, hidden, line]);
        let ids: Vec<_> = hits.iter().map(|h| h.node).collect();
        assert_eq!(ids, vec![near, far]);
        assert!((hits[0].distance - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_scale_grows_pick_radius() {
        let mut store = NodeStore::new();
        let id = store.create_sphere(SphereDesc::new(1.0, Color::WHITE));
        store.set_position(id, DVec3::new(3.0, 0.0, 10.0));
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        assert!(store.intersect(&ray, &[id]).is_empty());
        store.set_scale(id, 4.0);
        assert_eq!(store.intersect(&ray, &[id]).len(), 1);
    }

    #[test]
    fn test_set_texture_marks_update() {
        let mut store = NodeStore::new();
        let id = store.create_sphere(SphereDesc::new(1.0, Color::WHITE));
        assert!(!store.node(id).unwrap().needs_update);
        store.set_texture(id, TextureConfig::solid(1, 2, 3, 4));
        let node = store.node(id).unwrap();
        assert!(node.needs_update);
        assert_eq!(node.texture.as_ref().unwrap().data, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_unknown_node_is_ignored() {
        let mut store = NodeStore::new();
        store.set_position(NodeId(42), DVec3::ONE);
        assert!(store.is_empty());
        store.set_cursor(CursorIcon::Pointer);
        assert_eq!(store.cursor(), CursorIcon::Pointer);
    }
}
