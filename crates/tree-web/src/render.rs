use crate::constants::CLEAR_COLOR;
use glam::Vec3;
use tree_core::{GroupTransform, PerspectiveCamera, SceneGroup, PARTICLE_SIZE};
use web_sys as web;

mod billboards;
mod helpers;
mod targets;
mod textures;

use billboards::{BillboardResources, SceneUniforms, QUAD_VERTEX_COUNT};
use targets::RenderTargets;
use textures::DecalSlot;
pub use textures::DecalImage;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    billboards: BillboardResources,
    targets: RenderTargets,
    decal_sampler: wgpu::Sampler,
    decals: Vec<DecalSlot>,
    // group-local decal centres, for back-to-front sorting
    decal_centers: Vec<Vec3>,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        scene: &SceneGroup,
        camera: &PerspectiveCamera,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let particles = billboards::particle_instances(
            &scene.particles,
            camera.attenuated_point_extent(PARTICLE_SIZE),
        );
        let decal_instances = billboards::decal_instances(scene.decals());
        let billboards =
            billboards::create_billboard_resources(&device, format, &particles, &decal_instances);
        let targets = RenderTargets::new(&device, format, width, height);
        let decal_sampler = textures::create_decal_sampler(&device);
        let decals = (0..decal_instances.len())
            .map(|_| DecalSlot::transparent(&device, &queue, &billboards.decal_bgl, &decal_sampler))
            .collect();
        let decal_centers = scene.decals().map(|d| d.position).collect();

        let [r, g, b, a] = CLEAR_COLOR;
        Ok(Self {
            surface,
            device,
            queue,
            config,
            billboards,
            targets,
            decal_sampler,
            decals,
            decal_centers,
            width,
            height,
            clear_color: wgpu::Color { r, g, b, a },
        })
    }

    /// Fill decal slot `index` (photos first, then the label) with pixels.
    pub fn set_decal_image(&mut self, index: usize, image: &DecalImage) -> anyhow::Result<()> {
        let slot = self
            .decals
            .get_mut(index)
            .ok_or_else(|| anyhow::anyhow!("no decal slot {index}"))?;
        slot.upload(
            &self.device,
            &self.queue,
            &self.billboards.decal_bgl,
            &self.decal_sampler,
            image,
        )
    }

    pub fn loaded_decals(&self) -> usize {
        self.decals.iter().filter(|d| d.loaded).count()
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
        self.targets
            .recreate(&self.device, self.config.format, self.width, self.height);
    }

    /// Decal slot indices ordered farthest first.
    fn decal_draw_order(&self, camera: &PerspectiveCamera, transform: &GroupTransform) -> Vec<u32> {
        let model = transform.model_matrix();
        let mut order: Vec<(u32, f32)> = self
            .decal_centers
            .iter()
            .enumerate()
            .map(|(i, c)| (i as u32, camera.view_depth(model.transform_point3(*c))))
            .collect();
        order.sort_by(|a, b| b.1.total_cmp(&a.1));
        order.into_iter().map(|(i, _)| i).collect()
    }

    pub fn render(
        &mut self,
        camera: &PerspectiveCamera,
        transform: &GroupTransform,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                self.surface.get_current_texture()?
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let (right, up) = camera.billboard_axes();
        let uniforms = SceneUniforms {
            view_proj: camera.view_projection().to_cols_array_2d(),
            model: transform.model_matrix().to_cols_array_2d(),
            cam_right: right.extend(transform.scale.x).to_array(),
            cam_up: up.extend(0.0).to_array(),
        };
        self.queue.write_buffer(
            &self.billboards.uniform_buffer,
            0,
            bytemuck::bytes_of(&uniforms),
        );
        let order = self.decal_draw_order(camera, transform);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.msaa_view,
                    resolve_target: Some(&view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            let b = &self.billboards;
            rpass.set_bind_group(0, &b.scene_bind_group, &[]);
            rpass.set_vertex_buffer(0, b.quad_vb.slice(..));

            rpass.set_pipeline(&b.particle_pipeline);
            rpass.set_vertex_buffer(1, b.particle_vb.slice(..));
            rpass.draw(0..QUAD_VERTEX_COUNT, 0..b.particle_count);

            rpass.set_pipeline(&b.decal_pipeline);
            rpass.set_vertex_buffer(1, b.decal_vb.slice(..));
            for i in order {
                if let Some(slot) = self.decals.get(i as usize).filter(|s| s.loaded) {
                    rpass.set_bind_group(1, &slot.bind_group, &[]);
                    rpass.draw(0..QUAD_VERTEX_COUNT, i..i + 1);
                }
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
