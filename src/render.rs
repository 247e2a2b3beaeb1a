use crate::assets::Pixels;
use crate::constants::MSAA_SAMPLES;
use crate::core::{mip_chain, OrthoCamera, Scene};
use web_sys as web;

mod helpers;
mod quad;

use quad::{CameraUniforms, ObjectUniforms, QuadPipeline, QuadResources};

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    quad: QuadPipeline,
    #[allow(dead_code)]
    camera_buffer: wgpu::Buffer, // written once, kept alive with its bind group
    camera_bind_group: wgpu::BindGroup,
    linear_sampler: wgpu::Sampler,
    #[allow(dead_code)]
    depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,
    #[allow(dead_code)]
    msaa_tex: wgpu::Texture,
    msaa_view: wgpu::TextureView,
    // indexed by scene object id; None until the object's texture is uploaded
    quads: Vec<Option<QuadResources>>,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        camera: &OrthoCamera,
        clear_hex: u32,
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
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let quad = quad::create_quad_pipeline(&device, format, MSAA_SAMPLES);
        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera_uniforms"),
            size: std::mem::size_of::<CameraUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bg"),
            layout: &quad.camera_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });
        // The camera never moves after startup.
        let cam = CameraUniforms {
            view_proj: camera.view_proj().to_cols_array_2d(),
        };
        queue.write_buffer(&camera_buffer, 0, bytemuck::bytes_of(&cam));

        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let (depth_tex, depth_view) =
            helpers::create_depth_texture(&device, width, height, MSAA_SAMPLES);
        let (msaa_tex, msaa_view) =
            helpers::create_msaa_target(&device, format, width, height, MSAA_SAMPLES);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            quad,
            camera_buffer,
            camera_bind_group,
            linear_sampler,
            depth_tex,
            depth_view,
            msaa_tex,
            msaa_view,
            quads: Vec::new(),
            width,
            height,
            clear_color: helpers::srgb_hex_to_linear(clear_hex),
        })
    }

    /// Attach RGBA8 pixels to scene object `id`, replacing any earlier texture.
    /// `levels` is either a single image or its complete mip chain.
    pub fn upload_texture(&mut self, id: usize, label: &str, levels: &[Pixels]) {
        let Some(base) = levels.first() else {
            log::warn!("[gpu] {} texture has no pixels", label);
            return;
        };
        let chain = mip_chain(base.width, base.height);
        if levels.len() != 1 && levels.len() != chain.len() {
            log::warn!(
                "[gpu] {} texture has {} mip levels, expected 1 or {}",
                label,
                levels.len(),
                chain.len()
            );
            return;
        }
        for (level, &(w, h)) in levels.iter().zip(&chain) {
            let expected = w as usize * h as usize * 4;
            if level.width != w || level.height != h || level.rgba.len() != expected {
                log::warn!(
                    "[gpu] {} mip {}x{} has {} bytes, expected {}x{} ({} bytes)",
                    label,
                    level.width,
                    level.height,
                    level.rgba.len(),
                    w,
                    h,
                    expected
                );
                return;
            }
        }
        let (texture, view) =
            helpers::create_rgba_texture(&self.device, &self.queue, label, levels);
        let res = quad::create_quad_resources(
            &self.device,
            &self.quad.object_bgl,
            &self.linear_sampler,
            texture,
            &view,
            label,
        );
        if self.quads.len() <= id {
            self.quads.resize_with(id + 1, || None);
        }
        self.quads[id] = Some(res);
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            (self.depth_tex, self.depth_view) =
                helpers::create_depth_texture(&self.device, width, height, MSAA_SAMPLES);
            (self.msaa_tex, self.msaa_view) = helpers::create_msaa_target(
                &self.device,
                self.config.format,
                width,
                height,
                MSAA_SAMPLES,
            );
        }
    }

    /// Draw every ready object that has a texture, in registration order.
    pub fn render(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        for (id, obj) in scene.objects().iter().enumerate() {
            if !obj.is_ready() {
                continue;
            }
            if let Some(Some(q)) = self.quads.get(id) {
                let u = ObjectUniforms {
                    model: obj.transform.matrix().to_cols_array_2d(),
                    size: [obj.size.x, obj.size.y, 0.0, 0.0],
                };
                self.queue
                    .write_buffer(&q.uniform_buffer, 0, bytemuck::bytes_of(&u));
            }
        }

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.msaa_view,
                    resolve_target: Some(&view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.quad.pipeline);
            rpass.set_bind_group(0, &self.camera_bind_group, &[]);
            for (id, obj) in scene.objects().iter().enumerate() {
                if !obj.is_ready() {
                    continue;
                }
                if let Some(Some(q)) = self.quads.get(id) {
                    rpass.set_bind_group(1, &q.bind_group, &[]);
                    rpass.draw(0..6, 0..1);
                }
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
