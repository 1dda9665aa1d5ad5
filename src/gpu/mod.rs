//! wgpu preview renderer.
//!
//! [`Renderer`] is a [`RenderBackend`] that keeps its nodes in a [`NodeStore`]
//! and draws them with two pipelines: camera-facing billboards for spheres,
//! sprites and labels, and a line list for orbits. There is no depth buffer;
//! billboards are sorted on the CPU and lines are drawn first.

mod frame;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use glam::DVec3;
use wgpu::util::DeviceExt;
use winit::window::Window;

pub use frame::{BillboardDraw, FrameGeometry, TextureKey};

use crate::camera::Camera;
use crate::error::GpuError;
use crate::label::TextRasterizer;
use crate::render::{
    Blending, Color, CursorIcon, Hit, NodeId, NodeStore, Ray, RenderBackend, SphereDesc, SpriteDesc,
};
use crate::shader::{BillboardInstance, BillboardStyle, LineVertex, Uniforms, BILLBOARD_SHADER, LINE_SHADER};
use crate::textures::{self, FilterMode, TextureConfig, TextureRef};

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.01,
    a: 1.0,
};

/// Side of the procedural glow used when a sprite image is missing.
const GLOW_SIZE: u32 = 64;

/// A texture with its bind group.
struct GpuTexture {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// Device, surface and pipelines.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    billboard_normal: wgpu::RenderPipeline,
    billboard_additive: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    linear_sampler: wgpu::Sampler,
    nearest_sampler: wgpu::Sampler,
    white: GpuTexture,
    glow: GpuTexture,
    node_textures: HashMap<NodeId, GpuTexture>,
    file_textures: HashMap<TextureRef, Option<GpuTexture>>,
    asset_dir: PathBuf,
}

impl GpuState {
    pub async fn new(window: Arc<Window>, asset_dir: PathBuf) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Spacecast Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::bytes_of(&Uniforms {
                view: glam::Mat4::IDENTITY.to_cols_array_2d(),
                proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Uniform Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = |label: &'static str, filter: wgpu::FilterMode| {
            device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some(label),
                address_mode_u: wgpu::AddressMode::Repeat,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: filter,
                min_filter: filter,
                mipmap_filter: wgpu::FilterMode::Nearest,
                ..Default::default()
            })
        };
        let linear_sampler = sampler("Linear Sampler", wgpu::FilterMode::Linear);
        let nearest_sampler = sampler("Nearest Sampler", wgpu::FilterMode::Nearest);

        let billboard_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Billboard Shader"),
            source: wgpu::ShaderSource::Wgsl(BILLBOARD_SHADER.into()),
        });
        let line_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Line Shader"),
            source: wgpu::ShaderSource::Wgsl(LINE_SHADER.into()),
        });

        let billboard_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Billboard Pipeline Layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            push_constant_ranges: &[],
        });
        let line_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Line Pipeline Layout"),
            bind_group_layouts: &[&uniform_layout],
            push_constant_ranges: &[],
        });

        let additive = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent::OVER,
        };

        let pipeline = |label: &'static str,
                        module: &wgpu::ShaderModule,
                        buffer: wgpu::VertexBufferLayout<'static>,
                        topology: wgpu::PrimitiveTopology,
                        blend: wgpu::BlendState| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(if topology == wgpu::PrimitiveTopology::LineList {
                    &line_layout
                } else {
                    &billboard_layout
                }),
                vertex: wgpu::VertexState {
                    module,
                    entry_point: Some("vs_main"),
                    buffers: &[buffer],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: config.format,
                        blend: Some(blend),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        let billboard_normal = pipeline(
            "Billboard Pipeline",
            &billboard_shader,
            BillboardInstance::layout(),
            wgpu::PrimitiveTopology::TriangleList,
            wgpu::BlendState::ALPHA_BLENDING,
        );
        let billboard_additive = pipeline(
            "Additive Billboard Pipeline",
            &billboard_shader,
            BillboardInstance::layout(),
            wgpu::PrimitiveTopology::TriangleList,
            additive,
        );
        let line_pipeline = pipeline(
            "Line Pipeline",
            &line_shader,
            LineVertex::layout(),
            wgpu::PrimitiveTopology::LineList,
            wgpu::BlendState::ALPHA_BLENDING,
        );

        let white = upload_texture(
            &device,
            &queue,
            &texture_layout,
            &linear_sampler,
            &TextureConfig::solid(255, 255, 255, 255),
            "White Texture",
        );
        let glow = upload_texture(
            &device,
            &queue,
            &texture_layout,
            &linear_sampler,
            &TextureConfig::radial_glow(GLOW_SIZE),
            "Glow Texture",
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            billboard_normal,
            billboard_additive,
            line_pipeline,
            uniform_buffer,
            uniform_bind_group,
            texture_layout,
            linear_sampler,
            nearest_sampler,
            white,
            glow,
            node_textures: HashMap::new(),
            file_textures: HashMap::new(),
            asset_dir,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn sampler(&self, filter: FilterMode) -> &wgpu::Sampler {
        match filter {
            FilterMode::Linear => &self.linear_sampler,
            FilterMode::Nearest => &self.nearest_sampler,
        }
    }

    /// Upload every node texture flagged as changed.
    fn sync_textures(&mut self, store: &mut NodeStore) {
        let dirty: Vec<NodeId> = store
            .nodes()
            .filter(|(_, n)| n.needs_update)
            .map(|(id, _)| id)
            .collect();
        for id in dirty {
            let Some(node) = store.node_mut(id) else { continue };
            node.needs_update = false;
            if let Some(config) = &node.texture {
                let texture = upload_texture(
                    &self.device,
                    &self.queue,
                    &self.texture_layout,
                    self.sampler(config.filter),
                    config,
                    "Node Texture",
                );
                self.node_textures.insert(id, texture);
            }
        }
    }

    /// Load any image files the frame refers to for the first time.
    fn load_files(&mut self, frame: &FrameGeometry) {
        for draw in &frame.billboards {
            let TextureKey::File(path) = draw.texture else { continue };
            if self.file_textures.contains_key(path) {
                continue;
            }
            let texture = textures::load_optional(&self.asset_dir, path).map(|config| {
                upload_texture(
                    &self.device,
                    &self.queue,
                    &self.texture_layout,
                    self.sampler(config.filter),
                    &config,
                    path,
                )
            });
            self.file_textures.insert(path, texture);
        }
    }

    fn bind_group(&self, key: TextureKey) -> Option<&wgpu::BindGroup> {
        match key {
            TextureKey::Node(id) => self.node_textures.get(&id).map(|t| &t.bind_group),
            TextureKey::File(path) => self
                .file_textures
                .get(path)
                .and_then(|t| t.as_ref())
                .map(|t| &t.bind_group),
            TextureKey::White => Some(&self.white.bind_group),
            TextureKey::Glow => Some(&self.glow.bind_group),
        }
    }

    pub fn render(&mut self, store: &mut NodeStore, camera: &Camera) -> Result<(), wgpu::SurfaceError> {
        self.sync_textures(store);
        let frame = FrameGeometry::build(store, camera);
        self.load_files(&frame);

        let uniforms = Uniforms {
            view: camera.relative_view_matrix().as_mat4().to_cols_array_2d(),
            proj: camera.projection_matrix().as_mat4().to_cols_array_2d(),
        };
        self.queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        // Globes drawn with their own map lose the catalog tint
        let instances: Vec<BillboardInstance> = frame
            .billboards
            .iter()
            .map(|draw| {
                let mut instance = draw.instance;
                let textured = !matches!(draw.texture, TextureKey::White) && self.bind_group(draw.texture).is_some();
                if textured && instance.style == BillboardStyle::Globe as u32 {
                    instance.color[..3].copy_from_slice(&[1.0, 1.0, 1.0]);
                }
                instance
            })
            .collect();

        let instance_buffer = (!instances.is_empty()).then(|| {
            self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Billboard Instances"),
                contents: bytemuck::cast_slice(&instances),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });
        let line_buffer = (!frame.lines.is_empty()).then(|| {
            self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Line Vertices"),
                contents: bytemuck::cast_slice(&frame.lines),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let clear = frame.backdrop.map_or(CLEAR_COLOR, |c| wgpu::Color {
            r: c.r as f64 * 0.25,
            g: c.g as f64 * 0.25,
            b: c.b as f64 * 0.25,
            a: 1.0,
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);

            if let Some(lines) = &line_buffer {
                render_pass.set_pipeline(&self.line_pipeline);
                render_pass.set_vertex_buffer(0, lines.slice(..));
                render_pass.draw(0..frame.lines.len() as u32, 0..1);
            }

            if let Some(instances) = &instance_buffer {
                render_pass.set_vertex_buffer(0, instances.slice(..));
                for (i, draw) in frame.billboards.iter().enumerate() {
                    let pipeline = match draw.blending {
                        Blending::Normal => &self.billboard_normal,
                        Blending::Additive => &self.billboard_additive,
                    };
                    let Some(bind_group) = self
                        .bind_group(draw.texture)
                        .or_else(|| self.bind_group(draw.fallback))
                    else {
                        continue;
                    };
                    let i = i as u32;
                    render_pass.set_pipeline(pipeline);
                    render_pass.set_bind_group(1, bind_group, &[]);
                    render_pass.draw(0..6, i..i + 1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    config: &TextureConfig,
    label: &str,
) -> GpuTexture {
    let size = wgpu::Extent3d {
        width: config.width,
        height: config.height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &config.data,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * config.width),
            rows_per_image: Some(config.height),
        },
        size,
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });
    GpuTexture {
        _texture: texture,
        bind_group,
    }
}

/// The preview window's backend: a [`NodeStore`] plus the GPU state that
/// draws it.
pub struct Renderer {
    store: NodeStore,
    gpu: GpuState,
    cursor_changed: Option<CursorIcon>,
}

impl Renderer {
    pub fn new(gpu: GpuState) -> Self {
        Self {
            store: NodeStore::new(),
            gpu,
            cursor_changed: None,
        }
    }

    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.gpu.resize(new_size);
    }

    pub fn size(&self) -> winit::dpi::PhysicalSize<u32> {
        winit::dpi::PhysicalSize::new(self.gpu.config.width, self.gpu.config.height)
    }

    pub fn render(&mut self, camera: &Camera) -> Result<(), wgpu::SurfaceError> {
        self.gpu.render(&mut self.store, camera)
    }

    /// Cursor requested since the last call, if it changed.
    pub fn take_cursor_change(&mut self) -> Option<CursorIcon> {
        self.cursor_changed.take()
    }
}

impl RenderBackend for Renderer {
    fn create_sphere(&mut self, desc: SphereDesc) -> NodeId {
        self.store.create_sphere(desc)
    }

    fn create_sprite(&mut self, desc: SpriteDesc) -> NodeId {
        self.store.create_sprite(desc)
    }

    fn create_line_loop(&mut self, points: Vec<DVec3>, color: Color) -> NodeId {
        self.store.create_line_loop(points, color)
    }

    fn create_line_segments(&mut self, points: Vec<DVec3>, color: Color) -> NodeId {
        self.store.create_line_segments(points, color)
    }

    fn set_position(&mut self, node: NodeId, position: DVec3) {
        self.store.set_position(node, position);
    }

    fn set_scale(&mut self, node: NodeId, scale: f64) {
        self.store.set_scale(node, scale);
    }

    fn set_color(&mut self, node: NodeId, color: Color) {
        self.store.set_color(node, color);
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        self.store.set_visible(node, visible);
    }

    fn set_texture(&mut self, node: NodeId, texture: TextureConfig) {
        self.store.set_texture(node, texture);
    }

    fn intersect(&self, ray: &Ray, nodes: &[NodeId]) -> Vec<Hit> {
        self.store.intersect(ray, nodes)
    }

    fn text_rasterizer(&self) -> &dyn TextRasterizer {
        self.store.text_rasterizer()
    }

    fn set_cursor(&mut self, cursor: CursorIcon) {
        if self.store.cursor() != cursor {
            self.cursor_changed = Some(cursor);
        }
        self.store.set_cursor(cursor);
    }
}
