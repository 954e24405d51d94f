//! Forward mesh pass for the viewport scene.
//!
//! One pipeline draws every flattened scene node: vertex color state lives
//! in a per-mesh model uniform, textures bind per mesh (a 1×1 white texel
//! when absent). Geometry uploads are cached against the scene's topology
//! revision; model matrices are rewritten every frame.

use wgpu::util::DeviceExt;

use super::render_context::RenderContext;
use super::texture;
use crate::camera::CameraUniform;
use crate::options::ViewportOptions;
use crate::viewport::Viewport;

/// Per-mesh uniform: model matrix and base color.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ModelUniform {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

/// GPU-resident copy of one scene mesh.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
}

/// Renders a [`Viewport`]'s scene with a single forward pass.
pub struct MeshRenderer {
    pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    model_layout: wgpu::BindGroupLayout,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    depth_target: Option<wgpu::TextureView>,
    msaa_target: Option<wgpu::TextureView>,
    sample_count: u32,
    meshes: Vec<GpuMesh>,
    uploaded_revision: Option<u64>,
}

impl MeshRenderer {
    /// Build the pipeline and attachments for the given surface options.
    #[must_use]
    pub fn new(context: &RenderContext, options: &ViewportOptions) -> Self {
        let device = &context.device;
        let sample_count = options.antialiasing.sample_count();

        let shader =
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Mesh Shader"),
                source: wgpu::ShaderSource::Wgsl(
                    include_str!("mesh.wgsl").into(),
                ),
            });

        let camera_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[uniform_entry(
                    0,
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                )],
            });
        let model_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Model Bind Group Layout"),
                entries: &[uniform_entry(
                    0,
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                )],
            });
        let texture_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float {
                                filterable: true,
                            },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(
                            wgpu::SamplerBindingType::Filtering,
                        ),
                        count: None,
                    },
                ],
            });

        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[CameraUniform::new()]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Camera Bind Group"),
                layout: &camera_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                }],
            });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Mesh Sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Mesh Pipeline Layout"),
                bind_group_layouts: &[
                    &camera_layout,
                    &model_layout,
                    &texture_layout,
                ],
                push_constant_ranges: &[],
            });
        let pipeline =
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Mesh Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[crate::scene::Vertex::LAYOUT],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: options.depth_buffer.then(|| {
                    wgpu::DepthStencilState {
                        format: texture::DEPTH_FORMAT,
                        depth_write_enabled: true,
                        depth_compare: wgpu::CompareFunction::Less,
                        stencil: wgpu::StencilState::default(),
                        bias: wgpu::DepthBiasState::default(),
                    }
                }),
                multisample: wgpu::MultisampleState {
                    count: sample_count,
                    ..Default::default()
                },
                multiview: None,
                cache: None,
            });

        let mut renderer = Self {
            pipeline,
            camera_buffer,
            camera_bind_group,
            model_layout,
            texture_layout,
            sampler,
            depth_target: None,
            msaa_target: None,
            sample_count,
            meshes: Vec::new(),
            uploaded_revision: None,
        };
        renderer.recreate_targets(context, options);
        renderer
    }

    /// Rebuild size-dependent attachments after a resize.
    pub fn resize(&mut self, context: &RenderContext, options: &ViewportOptions) {
        self.recreate_targets(context, options);
    }

    fn recreate_targets(
        &mut self,
        context: &RenderContext,
        options: &ViewportOptions,
    ) {
        let (width, height) = (context.config.width, context.config.height);
        self.depth_target = options.depth_buffer.then(|| {
            texture::create_depth_target(
                &context.device,
                width,
                height,
                self.sample_count,
            )
        });
        self.msaa_target = (self.sample_count > 1).then(|| {
            texture::create_msaa_target(
                &context.device,
                width,
                height,
                context.format(),
                self.sample_count,
            )
        });
    }

    /// Re-upload scene geometry if the topology revision moved.
    fn prepare(&mut self, context: &RenderContext, viewport: &Viewport) {
        let revision = viewport.scene().revision();
        if self.uploaded_revision == Some(revision) {
            return;
        }
        let device = &context.device;

        self.meshes.clear();
        for item in viewport.scene().draw_items() {
            let vertex_buffer =
                device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Mesh Vertices"),
                    contents: bytemuck::cast_slice(&item.mesh.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
            let index_buffer =
                device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Mesh Indices"),
                    contents: bytemuck::cast_slice(&item.mesh.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
            let model_buffer =
                device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Model Buffer"),
                    contents: bytemuck::cast_slice(&[ModelUniform {
                        model: item.world.to_cols_array_2d(),
                        color: item.mesh.color,
                    }]),
                    usage: wgpu::BufferUsages::UNIFORM
                        | wgpu::BufferUsages::COPY_DST,
                });
            let model_bind_group =
                device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("Model Bind Group"),
                    layout: &self.model_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: model_buffer.as_entire_binding(),
                    }],
                });
            let texture_view = texture::create_mesh_texture(
                device,
                &context.queue,
                item.mesh.texture.as_ref(),
            );
            let texture_bind_group =
                device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("Texture Bind Group"),
                    layout: &self.texture_layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(
                                &texture_view,
                            ),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(
                                &self.sampler,
                            ),
                        },
                    ],
                });

            self.meshes.push(GpuMesh {
                vertex_buffer,
                index_buffer,
                index_count: item.mesh.indices.len() as u32,
                model_buffer,
                model_bind_group,
                texture_bind_group,
            });
        }
        self.uploaded_revision = Some(revision);
    }

    /// Draw the viewport's scene into the next swapchain frame.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] when the swapchain frame cannot be
    /// acquired; callers typically resize and retry.
    pub fn render(
        &mut self,
        context: &RenderContext,
        viewport: &Viewport,
    ) -> Result<(), wgpu::SurfaceError> {
        self.prepare(context, viewport);

        // Refresh per-frame uniforms: camera plus every model matrix
        // (content transforms mutate freely between frames).
        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update(viewport.camera(), viewport.rig());
        context.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[camera_uniform]),
        );
        for (gpu, item) in
            self.meshes.iter().zip(viewport.scene().draw_items())
        {
            context.queue.write_buffer(
                &gpu.model_buffer,
                0,
                bytemuck::cast_slice(&[ModelUniform {
                    model: item.world.to_cols_array_2d(),
                    color: item.mesh.color,
                }]),
            );
        }

        let frame = context.get_next_frame()?;
        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let [r, g, b, a] = viewport.scene().background;
        let clear = wgpu::Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: f64::from(a),
        };
        let (view, resolve_target) = match &self.msaa_target {
            Some(msaa) => (msaa, Some(&frame_view)),
            None => (&frame_view, None),
        };

        let mut encoder = context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Mesh Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view,
                            resolve_target,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(clear),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: self.depth_target.as_ref().map(
                        |depth| wgpu::RenderPassDepthStencilAttachment {
                            view: depth,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.camera_bind_group, &[]);
            for gpu in &self.meshes {
                pass.set_bind_group(1, &gpu.model_bind_group, &[]);
                pass.set_bind_group(2, &gpu.texture_bind_group, &[]);
                pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
                pass.set_index_buffer(
                    gpu.index_buffer.slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                pass.draw_indexed(0..gpu.index_count, 0, 0..1);
            }
        }
        context.submit(encoder);
        frame.present();
        Ok(())
    }
}

/// Vertex+fragment visible uniform buffer binding.
fn uniform_entry(
    binding: u32,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}
