use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::paint::Color;
use crate::render::{CameraMatrices, GpuMesh, RenderCtx, RenderTarget};

/// How fragment color is chosen.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ColorMode {
    /// Each draw is colored by its [`MeshDraw::color`].
    #[default]
    Uniform,
    /// Every draw is solid red; per-draw colors are ignored.
    Fixed,
}

impl ColorMode {
    fn fragment_entry_point(self) -> &'static str {
        match self {
            ColorMode::Uniform => "fs_uniform",
            ColorMode::Fixed => "fs_fixed",
        }
    }
}

/// One mesh placed in the world.
#[derive(Clone, Copy)]
pub struct MeshDraw<'a> {
    pub mesh: &'a GpuMesh,
    pub model: Mat4,
    pub color: Color,
}

/// Draws positions-only meshes with a per-draw model matrix and color.
///
/// Camera matrices live in one uniform buffer (group 0). Per-draw data is
/// packed into a second buffer at a device-aligned stride and selected with a
/// dynamic offset (group 1), so a whole frame is a single upload.
pub struct MeshRenderer {
    color_mode: ColorMode,

    pipeline_key: Option<(wgpu::TextureFormat, Option<wgpu::TextureFormat>)>,
    pipeline: Option<wgpu::RenderPipeline>,

    camera_bgl: Option<wgpu::BindGroupLayout>,
    draw_bgl: Option<wgpu::BindGroupLayout>,

    camera_ubo: Option<wgpu::Buffer>,
    camera_bind_group: Option<wgpu::BindGroup>,

    draw_ubo: Option<wgpu::Buffer>,
    draw_bind_group: Option<wgpu::BindGroup>,
    draw_capacity: usize,
    draw_stride: u64,
}

impl MeshRenderer {
    pub fn new(color_mode: ColorMode) -> Self {
        Self {
            color_mode,
            pipeline_key: None,
            pipeline: None,
            camera_bgl: None,
            draw_bgl: None,
            camera_ubo: None,
            camera_bind_group: None,
            draw_ubo: None,
            draw_bind_group: None,
            draw_capacity: 0,
            draw_stride: 0,
        }
    }

    /// Renders `draws` in order into `target`.
    ///
    /// Draws whose mesh has no indices are skipped.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        camera: &CameraMatrices,
        draws: &[MeshDraw<'_>],
    ) {
        let draws: Vec<&MeshDraw<'_>> = draws
            .iter()
            .filter(|d| d.mesh.index_count() > 0)
            .collect();
        if draws.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_camera_bindings(ctx);
        self.ensure_draw_capacity(ctx, draws.len());

        // Mutating methods must happen before borrowing pipeline/buffers immutably.
        let Some(camera_ubo) = self.camera_ubo.as_ref() else { return };
        let Some(draw_ubo) = self.draw_ubo.as_ref() else { return };

        ctx.queue
            .write_buffer(camera_ubo, 0, bytemuck::bytes_of(&CameraUniform::from(camera)));

        let uniforms: Vec<DrawUniform> = draws
            .iter()
            .map(|d| DrawUniform::new(d.model, d.color))
            .collect();
        ctx.queue
            .write_buffer(draw_ubo, 0, &pack_draw_uniforms(&uniforms, self.draw_stride));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(camera_bind_group) = self.camera_bind_group.as_ref() else { return };
        let Some(draw_bind_group) = self.draw_bind_group.as_ref() else { return };

        let depth_stencil_attachment = match (ctx.depth_format, target.depth_view) {
            (Some(_), Some(view)) => Some(wgpu::RenderPassDepthStencilAttachment {
                view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            _ => None,
        };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tictac mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, camera_bind_group, &[]);

        for (i, draw) in draws.iter().enumerate() {
            let offset = (i as u64 * self.draw_stride) as u32;
            rpass.set_bind_group(1, draw_bind_group, &[offset]);
            rpass.set_vertex_buffer(0, draw.mesh.vertex_buffer().slice(..));
            rpass.set_index_buffer(draw.mesh.index_buffer().slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..draw.mesh.index_count(), 0, 0..1);
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let key = (ctx.surface_format, ctx.depth_format);
        if self.pipeline_key == Some(key) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tictac mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });
        log_compilation_messages(&shader);

        let camera_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tictac mesh camera bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(CameraUniform::binding_size()),
                },
                count: None,
            }],
        });

        let draw_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tictac mesh per-draw bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: Some(DrawUniform::binding_size()),
                },
                count: None,
            }],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tictac mesh pipeline layout"),
            bind_group_layouts: &[&camera_bgl, &draw_bgl],
            immediate_size: 0,
        });

        let depth_stencil = ctx.depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tictac mesh pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[GpuMesh::vertex_layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(self.color_mode.fragment_entry_point()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // OBJ winding is not guaranteed.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!(
            "mesh pipeline built: {:?} color, {:?} depth, {:?} color mode",
            ctx.surface_format,
            ctx.depth_format,
            self.color_mode
        );

        self.pipeline_key = Some(key);
        self.pipeline = Some(pipeline);
        self.camera_bgl = Some(camera_bgl);
        self.draw_bgl = Some(draw_bgl);

        // Bind groups reference the old layouts.
        self.camera_ubo = None;
        self.camera_bind_group = None;
        self.draw_ubo = None;
        self.draw_bind_group = None;
        self.draw_capacity = 0;
    }

    fn ensure_camera_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.camera_bind_group.is_some() && self.camera_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.camera_bgl.as_ref() else { return };

        let camera_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tictac mesh camera ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tictac mesh camera bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.as_entire_binding(),
            }],
        });

        self.camera_ubo = Some(camera_ubo);
        self.camera_bind_group = Some(bind_group);
    }

    fn ensure_draw_capacity(&mut self, ctx: &RenderCtx<'_>, required_draws: usize) {
        if required_draws <= self.draw_capacity && self.draw_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.draw_bgl.as_ref() else { return };

        let alignment = ctx.uniform_offset_alignment as u64;
        let stride = aligned_stride(std::mem::size_of::<DrawUniform>() as u64, alignment);
        let new_cap = required_draws.next_power_of_two().max(16);

        let draw_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tictac mesh per-draw ubo"),
            size: new_cap as u64 * stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tictac mesh per-draw bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &draw_ubo,
                    offset: 0,
                    size: Some(DrawUniform::binding_size()),
                }),
            }],
        });

        log::debug!("per-draw uniform buffer: {new_cap} slots x {stride} bytes");

        self.draw_ubo = Some(draw_ubo);
        self.draw_bind_group = Some(bind_group);
        self.draw_capacity = new_cap;
        self.draw_stride = stride;
    }
}

/// Shader compilation problems are reported and rendering carries on.
fn log_compilation_messages(shader: &wgpu::ShaderModule) {
    let info = pollster::block_on(shader.get_compilation_info());
    for msg in &info.messages {
        let (line, col) = msg
            .location
            .as_ref()
            .map_or((0, 0), |loc| (loc.line_number, loc.line_position));
        match msg.message_type {
            wgpu::CompilationMessageType::Error => {
                log::error!("mesh shader error at {line}:{col}: {}", msg.message)
            }
            wgpu::CompilationMessageType::Warning => {
                log::warn!("mesh shader warning at {line}:{col}: {}", msg.message)
            }
            wgpu::CompilationMessageType::Info => {
                log::debug!("mesh shader info at {line}:{col}: {}", msg.message)
            }
        }
    }
}

/// Rounds `size` up to a multiple of `alignment` (treating 0 as 1).
fn aligned_stride(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

/// Lays uniforms out at `stride`-byte intervals, zero-filling the gaps.
fn pack_draw_uniforms(uniforms: &[DrawUniform], stride: u64) -> Vec<u8> {
    let stride = stride as usize;
    let size = std::mem::size_of::<DrawUniform>();
    debug_assert!(stride >= size);

    let mut bytes = vec![0u8; uniforms.len() * stride];
    for (slot, u) in bytes.chunks_exact_mut(stride).zip(uniforms) {
        slot[..size].copy_from_slice(bytemuck::bytes_of(u));
    }
    bytes
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CameraUniform {
    projection: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
}

impl CameraUniform {
    fn binding_size() -> NonZeroU64 {
        NonZeroU64::new(std::mem::size_of::<Self>() as u64)
            .expect("CameraUniform has non-zero size by construction")
    }
}

impl From<&CameraMatrices> for CameraUniform {
    fn from(m: &CameraMatrices) -> Self {
        Self {
            projection: m.projection.to_cols_array_2d(),
            view: m.view.to_cols_array_2d(),
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct DrawUniform {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

impl DrawUniform {
    fn new(model: Mat4, color: Color) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: color.to_array(),
        }
    }

    fn binding_size() -> NonZeroU64 {
        NonZeroU64::new(std::mem::size_of::<Self>() as u64)
            .expect("DrawUniform has non-zero size by construction")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn uniform_sizes_match_wgsl_layout() {
        // mat4x4<f32> x2
        assert_eq!(std::mem::size_of::<CameraUniform>(), 128);
        // mat4x4<f32> + vec4<f32>
        assert_eq!(std::mem::size_of::<DrawUniform>(), 80);
        assert_eq!(CameraUniform::binding_size().get(), 128);
        assert_eq!(DrawUniform::binding_size().get(), 80);
    }

    #[test]
    fn stride_rounds_up_to_alignment() {
        assert_eq!(aligned_stride(80, 256), 256);
        assert_eq!(aligned_stride(256, 256), 256);
        assert_eq!(aligned_stride(257, 256), 512);
        assert_eq!(aligned_stride(80, 64), 128);
    }

    #[test]
    fn zero_alignment_is_treated_as_one() {
        assert_eq!(aligned_stride(80, 0), 80);
    }

    #[test]
    fn packed_uniforms_sit_at_stride_offsets() {
        let a = DrawUniform::new(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)), Color::BLUE);
        let b = DrawUniform::new(Mat4::IDENTITY, Color::RED);
        let bytes = pack_draw_uniforms(&[a, b], 256);

        assert_eq!(bytes.len(), 512);
        assert_eq!(&bytes[..80], bytemuck::bytes_of(&a));
        assert!(bytes[80..256].iter().all(|&x| x == 0));
        assert_eq!(&bytes[256..336], bytemuck::bytes_of(&b));
    }

    #[test]
    fn draw_uniform_keeps_translation_in_last_column() {
        let u = DrawUniform::new(Mat4::from_translation(Vec3::new(-1.3, 1.3, 0.0)), Color::RED);
        assert_eq!(u.model[3], [-1.3, 1.3, 0.0, 1.0]);
        assert_eq!(u.color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn camera_uniform_is_column_major() {
        let m = CameraMatrices {
            projection: Mat4::IDENTITY,
            view: Mat4::from_translation(Vec3::new(0.0, 0.0, -3.5)),
        };
        let u = CameraUniform::from(&m);
        assert_eq!(u.view[3], [0.0, 0.0, -3.5, 1.0]);
        assert_eq!(u.projection, Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn color_modes_select_fragment_entry_points() {
        assert_eq!(ColorMode::Uniform.fragment_entry_point(), "fs_uniform");
        assert_eq!(ColorMode::Fixed.fragment_entry_point(), "fs_fixed");
        assert_eq!(ColorMode::default(), ColorMode::Uniform);
    }
}
