use std::borrow::Cow;
use std::sync::Arc;

use pollster::FutureExt;
use wgpu::util::DeviceExt;

use super::super::canvas::tessellated::MeshVertex;
use super::super::canvas::tessellated::SharedMesh;

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

struct TileBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

struct CanvasTile {
    mesh: SharedMesh,
    size: (f64, f64),
    revision: Option<u64>,
    buffers: Option<TileBuffers>,
}

pub(crate) struct Renderer {
    window: Arc<winit::window::Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    background: wgpu::Color,
    tiles: Vec<CanvasTile>,
}

impl Renderer {
    pub(crate) fn new(
        window: winit::window::Window,
        meshes: Vec<SharedMesh>,
        background: palette::Srgba<f32>,
    ) -> anyhow::Result<Self> {
        let window = Arc::new(window);

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .block_on()
            .ok_or_else(|| anyhow::anyhow!("no graphics adapter can present to this window"))?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .block_on()?;

        let config = {
            let window_size = window.inner_size();
            let surface_capabilities = surface.get_capabilities(&adapter);
            let format = surface_capabilities
                .formats
                .iter()
                .copied()
                .find(|format| format.is_srgb())
                .or_else(|| surface_capabilities.formats.first().copied())
                .ok_or_else(|| anyhow::anyhow!("surface reports no texture formats"))?;
            wgpu::SurfaceConfiguration {
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                format,
                width: window_size.width.max(1),
                height: window_size.height.max(1),
                present_mode: wgpu::PresentMode::AutoVsync,
                alpha_mode: surface_capabilities
                    .alpha_modes
                    .first()
                    .copied()
                    .unwrap_or(wgpu::CompositeAlphaMode::Auto),
                view_formats: vec![],
                desired_maximum_frame_latency: 2,
            }
        };
        surface.configure(&device, &config);

        let pipeline = Self::create_pipeline(&device, config.format);
        let background = {
            let color: palette::LinSrgba<f32> = background.into_linear();
            wgpu::Color {
                r: color.red as f64,
                g: color.green as f64,
                b: color.blue as f64,
                a: color.alpha as f64,
            }
        };

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            background,
            tiles: meshes
                .into_iter()
                .map(|mesh| CanvasTile {
                    mesh,
                    size: (0.0, 0.0),
                    revision: None,
                    buffers: None,
                })
                .collect(),
        })
    }

    fn create_pipeline(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("strokes"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(include_str!("shaders/strokes.wgsl"))),
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: None,
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("strokes"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &VERTEX_ATTRIBUTES,
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Stroke triangles come in both windings.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    pub(crate) fn window(&self) -> &Arc<winit::window::Window> {
        &self.window
    }

    pub(crate) fn request_redraw(&self) {
        self.window.request_redraw();
    }

    pub(crate) fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        if size.width > 0 && size.height > 0 {
            self.config.width = size.width;
            self.config.height = size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn sync_tiles(&mut self) {
        for tile in &mut self.tiles {
            let mesh = tile.mesh.lock();
            if tile.revision == Some(mesh.revision) {
                continue;
            }
            tile.size = mesh.size;
            tile.revision = Some(mesh.revision);
            tile.buffers = (!mesh.indices.is_empty()).then(|| TileBuffers {
                vertex_buffer: self
                    .device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: None,
                        contents: bytemuck::cast_slice(&mesh.vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    }),
                index_buffer: self
                    .device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: None,
                        contents: bytemuck::cast_slice(&mesh.indices),
                        usage: wgpu::BufferUsages::INDEX,
                    }),
                index_count: mesh.indices.len() as u32,
            });
        }
    }

    pub(crate) fn render(&mut self) -> anyhow::Result<()> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(error) => Err(error)?,
        };
        self.sync_tiles();

        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: None,
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.background),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            render_pass.set_pipeline(&self.pipeline);

            let sizes: Vec<(f64, f64)> = self.tiles.iter().map(|tile| tile.size).collect();
            let rects = grid_layout((self.config.width, self.config.height), &sizes);
            for (tile, rect) in self.tiles.iter().zip(rects) {
                let (Some(buffers), Some([x, y, width, height])) = (&tile.buffers, rect) else {
                    continue;
                };
                render_pass.set_viewport(x, y, width, height, 0.0, 1.0);
                render_pass.set_vertex_buffer(0, buffers.vertex_buffer.slice(..));
                render_pass
                    .set_index_buffer(buffers.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..buffers.index_count, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Places canvases row by row in a centred two-column grid. A grid larger
/// than the target is scaled down to fit. Empty canvases get `None`.
pub(crate) fn grid_layout(target: (u32, u32), sizes: &[(f64, f64)]) -> Vec<Option<[f32; 4]>> {
    const COLUMNS: usize = 2;

    let (target_width, target_height) = (target.0 as f64, target.1 as f64);
    let cell = sizes
        .iter()
        .fold(0.0f64, |cell, &(width, height)| cell.max(width).max(height));
    let gap = cell * 0.05;
    let rows = sizes.len().div_ceil(COLUMNS);
    let grid_width = COLUMNS as f64 * cell + (COLUMNS - 1) as f64 * gap;
    let grid_height = rows as f64 * cell + rows.saturating_sub(1) as f64 * gap;
    let scale = if grid_width > 0.0 && grid_height > 0.0 {
        (target_width / grid_width)
            .min(target_height / grid_height)
            .min(1.0)
    } else {
        1.0
    };
    let origin_x = (target_width - grid_width * scale) / 2.0;
    let origin_y = (target_height - grid_height * scale) / 2.0;

    sizes
        .iter()
        .enumerate()
        .map(|(index, &(width, height))| {
            let x = origin_x
                + ((index % COLUMNS) as f64 * (cell + gap) + (cell - width) / 2.0) * scale;
            let y = origin_y
                + ((index / COLUMNS) as f64 * (cell + gap) + (cell - height) / 2.0) * scale;
            let x = x.clamp(0.0, target_width);
            let y = y.clamp(0.0, target_height);
            let width = (width * scale).min(target_width - x);
            let height = (height * scale).min(target_height - y);
            (width > 0.0 && height > 0.0).then_some([
                x as f32,
                y as f32,
                width as f32,
                height as f32,
            ])
        })
        .collect()
}
