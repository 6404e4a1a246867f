use bytemuck::{Pod, Zeroable};

use isofield_engine::assemble::FrameUpload;

use crate::gpu::Gpu;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.03,
    a: 1.0,
};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    viewport: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

/// One growable GPU buffer with its current capacity and written length.
struct GrowBuffer {
    buffer: Option<wgpu::Buffer>,
    capacity: u64,
    /// Bytes written this frame; draw calls slice to this length.
    len: u64,
    usage: wgpu::BufferUsages,
    label: &'static str,
}

impl GrowBuffer {
    fn new(usage: wgpu::BufferUsages, label: &'static str) -> Self {
        Self {
            buffer: None,
            capacity: 0,
            len: 0,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            label,
        }
    }

    /// Grows the buffer if needed; returns true when it was recreated, in
    /// which case previously uploaded contents are gone.
    fn ensure(&mut self, device: &wgpu::Device, needed: u64) -> bool {
        if needed <= self.capacity && self.buffer.is_some() {
            return false;
        }
        let capacity = needed.next_power_of_two().max(256);
        self.buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(self.label),
            size: capacity,
            usage: self.usage,
            mapped_at_creation: false,
        }));
        self.capacity = capacity;
        true
    }

    fn write(&mut self, queue: &wgpu::Queue, bytes: &[u8]) {
        self.len = bytes.len() as u64;
        if bytes.is_empty() {
            return;
        }
        if let Some(buffer) = self.buffer.as_ref() {
            queue.write_buffer(buffer, 0, bytes);
        }
    }

    fn slice(&self) -> Option<wgpu::BufferSlice<'_>> {
        if self.len == 0 {
            return None;
        }
        self.buffer.as_ref().map(|b| b.slice(0..self.len))
    }
}

/// Per-isoline-level GPU buffers.
struct IsolineBuffers {
    vbo: GrowBuffer,
    ibo: GrowBuffer,
    index_count: u32,
}

impl IsolineBuffers {
    fn new() -> Self {
        Self {
            vbo: GrowBuffer::new(wgpu::BufferUsages::VERTEX, "isofield isoline vbo"),
            ibo: GrowBuffer::new(wgpu::BufferUsages::INDEX, "isofield isoline ibo"),
            index_count: 0,
        }
    }
}

/// Draws one `FrameUpload`: the sampled grid as a restart-separated triangle
/// strip colored by field value, then every isoline as a restart-separated
/// line strip.
///
/// Pipelines are created lazily against the current surface format. Buffers
/// grow on demand and are rewritten according to the upload's dirty flags.
pub struct Renderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    grid_pipeline: Option<wgpu::RenderPipeline>,
    isoline_pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    grid_positions: GrowBuffer,
    grid_values: GrowBuffer,
    grid_indices: GrowBuffer,
    grid_index_count: u32,

    isolines: Vec<IsolineBuffers>,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            pipeline_format: None,
            grid_pipeline: None,
            isoline_pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            viewport_ubo: None,
            grid_positions: GrowBuffer::new(wgpu::BufferUsages::VERTEX, "isofield grid pos vbo"),
            grid_values: GrowBuffer::new(wgpu::BufferUsages::VERTEX, "isofield grid value vbo"),
            grid_indices: GrowBuffer::new(wgpu::BufferUsages::INDEX, "isofield grid ibo"),
            grid_index_count: 0,
            isolines: Vec::new(),
        }
    }

    pub fn render(
        &mut self,
        gpu: &Gpu,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        upload: &FrameUpload<'_>,
    ) {
        let device = gpu.device();
        let queue = gpu.queue();

        self.ensure_pipelines(device, gpu.surface_format());
        self.ensure_bindings(device);
        self.write_viewport_uniform(queue, gpu.size());
        self.upload_geometry(device, queue, upload);

        let Some(grid_pipeline) = self.grid_pipeline.as_ref() else { return };
        let Some(isoline_pipeline) = self.isoline_pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("isofield pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if let (Some(pos), Some(val), Some(idx)) = (
            self.grid_positions.slice(),
            self.grid_values.slice(),
            self.grid_indices.slice(),
        ) {
            rpass.set_pipeline(grid_pipeline);
            rpass.set_bind_group(0, bind_group, &[]);
            rpass.set_vertex_buffer(0, pos);
            rpass.set_vertex_buffer(1, val);
            rpass.set_index_buffer(idx, wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.grid_index_count, 0, 0..1);
        }

        rpass.set_pipeline(isoline_pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        for level in &self.isolines {
            let (Some(vbo), Some(ibo)) = (level.vbo.slice(), level.ibo.slice()) else {
                continue;
            };
            rpass.set_vertex_buffer(0, vbo);
            rpass.set_index_buffer(ibo, wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..level.index_count, 0, 0..1);
        }
    }

    fn upload_geometry(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        upload: &FrameUpload<'_>,
    ) {
        // A recreated buffer lost its contents, so a grow forces a rewrite
        // even when the upload says the array is clean.
        let recreated = self
            .grid_positions
            .ensure(device, upload.grid_position_bytes().len() as u64);
        if upload.positions_dirty || recreated {
            self.grid_positions.write(queue, upload.grid_position_bytes());
        }

        self.grid_values
            .ensure(device, upload.grid_value_bytes().len() as u64);
        self.grid_values.write(queue, upload.grid_value_bytes());

        let recreated = self
            .grid_indices
            .ensure(device, upload.grid_index_bytes().len() as u64);
        if upload.topology_dirty || recreated {
            self.grid_indices.write(queue, upload.grid_index_bytes());
            self.grid_index_count = upload.grid_indices.len() as u32;
        }

        if self.isolines.len() != upload.isolines.len() {
            self.isolines
                .resize_with(upload.isolines.len(), IsolineBuffers::new);
        }
        // Isoline geometry is time-varying; every level is rewritten.
        for (buffers, geometry) in self.isolines.iter_mut().zip(upload.isolines) {
            buffers.vbo.ensure(device, geometry.position_bytes().len() as u64);
            buffers.vbo.write(queue, geometry.position_bytes());
            buffers.ibo.ensure(device, geometry.index_bytes().len() as u64);
            buffers.ibo.write(queue, geometry.index_bytes());
            buffers.index_count = geometry.indices.len() as u32;
        }
    }

    fn ensure_pipelines(&mut self, device: &wgpu::Device, format: wgpu::TextureFormat) {
        if self.pipeline_format == Some(format) && self.grid_pipeline.is_some() {
            return;
        }

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("isofield bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: std::num::NonZeroU64::new(
                            std::mem::size_of::<ViewportUniform>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("isofield pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let position_layout = wgpu::VertexBufferLayout {
            array_stride: 8,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x2],
        };
        let value_layout = wgpu::VertexBufferLayout {
            array_stride: 4,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![1 => Float32],
        };

        let grid_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("isofield grid shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/grid.wgsl").into()),
        });

        let grid_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("isofield grid pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &grid_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[position_layout.clone(), value_layout],
            },
            fragment: Some(wgpu::FragmentState {
                module: &grid_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                // Strip cut at u32::MAX, the engine's restart sentinel.
                strip_index_format: Some(wgpu::IndexFormat::Uint32),
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

        let isoline_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("isofield isoline shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/isoline.wgsl").into()),
        });

        let isoline_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("isofield isoline pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &isoline_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[position_layout],
            },
            fragment: Some(wgpu::FragmentState {
                module: &isoline_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineStrip,
                strip_index_format: Some(wgpu::IndexFormat::Uint32),
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

        self.pipeline_format = Some(format);
        self.grid_pipeline = Some(grid_pipeline);
        self.isoline_pipeline = Some(isoline_pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, device: &wgpu::Device) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("isofield viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("isofield bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }

    fn write_viewport_uniform(&mut self, queue: &wgpu::Queue, size: winit::dpi::PhysicalSize<u32>) {
        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        let u = ViewportUniform {
            viewport: [size.width.max(1) as f32, size.height.max(1) as f32],
            _pad: [0.0; 2],
        };
        queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
