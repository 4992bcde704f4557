// renderer/renderer.rs
use std::sync::Arc;

use winit::{dpi::PhysicalSize, window::Window};

use crate::error::{RenderError, RenderResult};
use crate::renderer::internal::{ColorPass, RenderContext, SceneBuffers, ShadowPass, ShadowTarget};
use crate::renderer::texture::Texture;
use crate::renderer::uniforms::SceneUniforms;
use crate::scene::SceneBuffer;
use crate::settings::RenderSettings;

/// Owns every GPU resource and records the two passes of a frame.
pub struct Renderer {
    context: RenderContext,
    buffers: SceneBuffers,
    shadow_target: ShadowTarget,
    shadow_pass: ShadowPass,
    color_pass: ColorPass,
    _albedo: Texture,
    clear_color: wgpu::Color,
}

impl Renderer {
    pub async fn new(
        window: Arc<Window>,
        settings: &RenderSettings,
        scene: &SceneBuffer,
    ) -> RenderResult<Self> {
        let context = RenderContext::new(window, settings).await?;
        let device = &context.device;

        let buffers = SceneBuffers::upload(device, scene)?;
        let albedo = Texture::load_or_checkerboard(device, &context.queue, &settings.albedo_path)?;
        let shadow_target = ShadowTarget::new(device, context.viewport())?;
        let shadow_pass = ShadowPass::new(device)?;
        let color_pass = ColorPass::new(
            device,
            context.config.format,
            &albedo,
            &shadow_target,
            shadow_pass.sampler(),
        )?;

        Ok(Self {
            context,
            buffers,
            shadow_target,
            shadow_pass,
            color_pass,
            _albedo: albedo,
            clear_color: settings.clear_color(),
        })
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.context.viewport()
    }

    /// Reconfigures the surface and reallocates every viewport-sized target,
    /// the shadow map included, before the next frame is recorded.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) -> RenderResult<()> {
        self.context.resize(new_size)?;
        self.ensure_shadow_target()
    }

    /// Swaps in a shadow target matching the viewport if the current one is stale.
    fn ensure_shadow_target(&mut self) -> RenderResult<()> {
        let viewport = self.context.viewport();
        if self.shadow_target.matches(viewport) {
            return Ok(());
        }

        let target = ShadowTarget::new(&self.context.device, viewport)?;
        self.color_pass.bind_shadow_target(
            &self.context.device,
            &target,
            self.shadow_pass.sampler(),
        );
        let old = std::mem::replace(&mut self.shadow_target, target);
        log::debug!(
            "Replaced shadow target {}x{}",
            old.size().width,
            old.size().height
        );
        Ok(())
    }

    /// Renders one frame: shadow depth, then the lit color pass, then present.
    ///
    /// Viewport-sized targets left stale by a failed resize are reallocated
    /// first. Any error leaves the frame unpresented; the next call starts over.
    pub fn render(&mut self, uniforms: &SceneUniforms) -> RenderResult<()> {
        self.context.ensure_depth()?;
        self.ensure_shadow_target()?;

        let frame = match self.context.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(err @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                self.context.reconfigure();
                return Err(RenderError::Surface(err));
            }
            Err(err) => return Err(RenderError::Surface(err)),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let light_space = glam::Mat4::from_cols_array_2d(&uniforms.light_space_matrix);
        self.shadow_pass.update(&self.context.queue, light_space);
        self.color_pass.update(&self.context.queue, uniforms);

        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("FrameEncoder"),
                });

        self.shadow_pass
            .render(&mut encoder, &self.shadow_target, &self.buffers);
        self.color_pass.render(
            &mut encoder,
            &view,
            &self.context.depth,
            &self.buffers,
            self.clear_color,
        );

        self.context.queue.submit(Some(encoder.finish()));
        frame.present();
        log::trace!("Presented frame ({} indices)", self.buffers.index_count());
        Ok(())
    }
}
