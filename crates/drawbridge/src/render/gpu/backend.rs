use std::ops::Range;

use crate::config::TextureFilter;
use crate::coords::Rect;
use crate::decode::Vertex;
use crate::render::{DrawTrianglesOptions, RenderBackend, RenderCtx, RenderTarget};

use super::common::{
    logical_clip_to_scissor, premul_alpha_blend, texel_to_normalized, vertex_layout,
    viewport_ubo_min_binding_size, ViewportUniform,
};

/// A GPU texture ready to be bound by [`WgpuBackend`].
#[derive(Debug, Clone)]
pub struct WgpuTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    size: (u32, u32),
}

impl WgpuTexture {
    #[inline]
    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}

// ── batch ─────────────────────────────────────────────────────────────────

struct BatchedDraw {
    bind_group: wgpu::BindGroup,
    indices: Range<u32>,
    base_vertex: i32,
    clip_rect: Option<Rect>,
}

/// Source of the most recently appended vertex block.
struct LastVertices {
    source: Vec<Vertex>,
    texture_size: (u32, u32),
    base_vertex: i32,
}

// ── backend ───────────────────────────────────────────────────────────────

/// Triangle renderer on top of wgpu.
///
/// `draw_triangles` only records; [`flush`](Self::flush) uploads the frame's
/// geometry and encodes a single render pass. Call `flush` once per frame after
/// translation.
///
/// Vertex positions are logical pixels, converted to NDC in the vertex shader
/// using the viewport. Texture UVs arrive in texel space and are normalized here.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    texture_bgl: wgpu::BindGroupLayout,

    // pipeline
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    viewport_bgl: Option<wgpu::BindGroupLayout>,

    // bindings
    viewport_bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    // geometry
    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,
    ibo: Option<wgpu::Buffer>,
    ibo_capacity: usize,

    // frame batch
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
    draws: Vec<BatchedDraw>,
    last_vertices: Option<LastVertices>,
}

impl WgpuBackend {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("drawbridge texture bgl"),
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

        Self {
            device: device.clone(),
            queue: queue.clone(),
            texture_bgl,
            pipeline_format: None,
            pipeline: None,
            viewport_bgl: None,
            viewport_bind_group: None,
            viewport_ubo: None,
            vbo: None,
            vbo_capacity: 0,
            ibo: None,
            ibo_capacity: 0,
            vertices: Vec::new(),
            indices: Vec::new(),
            draws: Vec::new(),
            last_vertices: None,
        }
    }

    /// Wraps an existing host texture so it can be registered in a
    /// [`TextureCache`](crate::texture::TextureCache) under its own id.
    ///
    /// The texture must have `TEXTURE_BINDING` usage and a filterable float format.
    pub fn register_texture(&self, texture: &wgpu::Texture, filter: TextureFilter) -> WgpuTexture {
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = self.create_sampler(filter);
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("drawbridge texture bind group"),
            layout: &self.texture_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        WgpuTexture {
            texture: texture.clone(),
            bind_group,
            size: (texture.width(), texture.height()),
        }
    }

    /// Number of draws recorded since the last flush.
    #[inline]
    pub fn pending_draws(&self) -> usize {
        self.draws.len()
    }

    /// Number of vertices recorded since the last flush.
    #[inline]
    pub fn pending_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Uploads the recorded geometry and draws it into `target`.
    ///
    /// The target is loaded, not cleared. Draws whose clip rect is empty after
    /// clamping to the viewport are skipped.
    pub fn flush(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if self.draws.is_empty() {
            self.clear_batch();
            return;
        }

        // Mutating methods must happen before borrowing pipeline/buffers immutably.
        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        self.write_viewport_uniform(ctx);

        // write_buffer needs a 4-byte multiple.
        if self.indices.len() % 2 == 1 {
            self.indices.push(0);
        }
        self.ensure_vertex_capacity(ctx, self.vertices.len());
        self.ensure_index_capacity(ctx, self.indices.len());

        let Some(vbo) = self.vbo.as_ref() else { return };
        let Some(ibo) = self.ibo.as_ref() else { return };
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&self.vertices));
        ctx.queue.write_buffer(ibo, 0, bytemuck::cast_slice(&self.indices));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(viewport_bind_group) = self.viewport_bind_group.as_ref() else { return };

        {
            let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("drawbridge triangles pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, viewport_bind_group, &[]);
            rpass.set_vertex_buffer(0, vbo.slice(..));
            rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);

            for draw in &self.draws {
                let Some((x, y, w, h)) =
                    logical_clip_to_scissor(draw.clip_rect, ctx.viewport, ctx.scale_factor)
                else {
                    continue;
                };
                rpass.set_scissor_rect(x, y, w, h);
                rpass.set_bind_group(1, &draw.bind_group, &[]);
                rpass.draw_indexed(draw.indices.clone(), draw.base_vertex, 0..1);
            }
        }

        self.clear_batch();
    }

    fn clear_batch(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.draws.clear();
        self.last_vertices = None;
    }

    /// Appends `vertices` to the batch unless the previous call passed the same
    /// bytes for a texture of the same size, and returns their base vertex.
    fn append_vertices(&mut self, vertices: &[Vertex], texture_size: (u32, u32)) -> i32 {
        if let Some(last) = &self.last_vertices {
            if last.texture_size == texture_size
                && bytemuck::cast_slice::<Vertex, u8>(&last.source) == bytemuck::cast_slice::<Vertex, u8>(vertices)
            {
                return last.base_vertex;
            }
        }

        let base_vertex = self.vertices.len() as i32;
        self.vertices.extend(vertices.iter().map(|v| Vertex {
            uv: texel_to_normalized(v.uv, texture_size),
            ..*v
        }));

        let last = self.last_vertices.get_or_insert_with(|| LastVertices {
            source: Vec::new(),
            texture_size,
            base_vertex,
        });
        last.source.clear();
        last.source.extend_from_slice(vertices);
        last.texture_size = texture_size;
        last.base_vertex = base_vertex;
        base_vertex
    }

    fn create_sampler(&self, filter: TextureFilter) -> wgpu::Sampler {
        let mode: wgpu::FilterMode = filter.into();
        self.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("drawbridge texture sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: mode,
            min_filter: mode,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        })
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("drawbridge triangles shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/triangles.wgsl").into()),
        });

        let viewport_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("drawbridge viewport bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(viewport_ubo_min_binding_size()),
                },
                count: None,
            }],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("drawbridge triangles pipeline layout"),
            bind_group_layouts: &[&viewport_bgl, &self.texture_bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("drawbridge triangles pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[vertex_layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.viewport_bgl = Some(viewport_bgl);
        self.viewport_bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.viewport_bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.viewport_bgl.as_ref() else { return };

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("drawbridge viewport ubo"),
            size: size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("drawbridge viewport bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.viewport_bind_group = Some(bind_group);
    }

    fn write_viewport_uniform(&mut self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        let w = ctx.viewport.x.max(1.0);
        let h = ctx.viewport.y.max(1.0);
        ctx.queue.write_buffer(
            ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform { viewport: [w, h], _pad: [0.0; 2] }),
        );
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vbo_capacity && self.vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(1024);
        self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("drawbridge vbo"),
            size: (new_cap * size_of::<Vertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vbo_capacity = new_cap;
    }

    fn ensure_index_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.ibo_capacity && self.ibo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(2048);
        self.ibo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("drawbridge ibo"),
            size: (new_cap * size_of::<u16>()) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.ibo_capacity = new_cap;
    }
}

impl RenderBackend for WgpuBackend {
    type Texture = WgpuTexture;

    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8], filter: TextureFilter) -> WgpuTexture {
        let size = wgpu::Extent3d { width, height, depth_or_array_layers: 1 };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("drawbridge gui texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        self.register_texture(&texture, filter)
    }

    fn texture_bounds(&self, texture: &WgpuTexture) -> Rect {
        Rect::from_size(texture.size.0 as f32, texture.size.1 as f32)
    }

    fn draw_triangles(
        &mut self,
        vertices: &[Vertex],
        indices: &[u16],
        texture: &WgpuTexture,
        options: &DrawTrianglesOptions,
    ) {
        if indices.is_empty() {
            return;
        }

        let base_vertex = self.append_vertices(vertices, texture.size);

        let first = self.indices.len() as u32;
        self.indices.extend_from_slice(indices);
        self.draws.push(BatchedDraw {
            bind_group: texture.bind_group.clone(),
            indices: first..first + indices.len() as u32,
            base_vertex,
            clip_rect: options.clip_rect,
        });
    }
}
