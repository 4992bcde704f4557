use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::error::{RenderError, RenderResult};
use crate::renderer::internal::scope::allocate;
use crate::renderer::Depth;
use crate::settings::RenderSettings;

pub(crate) struct RenderContext {
    pub(crate) surface: wgpu::Surface<'static>,
    pub(crate) device: wgpu::Device,
    pub(crate) queue: wgpu::Queue,
    pub(crate) config: wgpu::SurfaceConfiguration,
    pub(crate) size: PhysicalSize<u32>,
    pub(crate) depth: Depth,
}

impl RenderContext {
    pub(crate) async fn new(window: Arc<Window>, settings: &RenderSettings) -> RenderResult<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        log::info!("Surface created successfully!");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info());
        log::info!("Using backend: {:?}", adapter.get_info().backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await?;

        let size = clamp_to_limit(size, device.limits().max_texture_dimension_2d);
        let surface_caps = surface.get_capabilities(&adapter);

        let format = choose_format(&surface_caps.formats)
            .ok_or(RenderError::UnsupportedSurface("texture format"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .ok_or(RenderError::UnsupportedSurface("alpha mode"))?;

        log::info!("Surface format: {:?}", format);

        let present_mode = settings.present_mode(&surface_caps.present_modes);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth = Depth::new(&device, size)?;

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            depth,
        })
    }

    pub(crate) fn viewport(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.config.width, self.config.height)
    }

    /// Reconfigures the swapchain and reallocates the depth buffer. A zero-sized
    /// window (minimised) keeps the previous configuration.
    ///
    /// The new depth buffer and surface configuration are committed together,
    /// so a failed allocation leaves the previous, consistent pair in place.
    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) -> RenderResult<()> {
        if new_size.width == 0 || new_size.height == 0 {
            return Ok(());
        }
        let max = self.device.limits().max_texture_dimension_2d;
        let size = clamp_to_limit(new_size, max);
        if size != new_size {
            log::warn!(
                "Viewport {}x{} exceeds the {max} texel limit; rendering at {}x{}",
                new_size.width,
                new_size.height,
                size.width,
                size.height
            );
        }

        let depth = Depth::new(&self.device, size)?;
        let mut config = self.config.clone();
        config.width = size.width;
        config.height = size.height;
        allocate(&self.device, "Surface", || {
            self.surface.configure(&self.device, &config)
        })?;

        self.size = size;
        self.config = config;
        self.depth = depth;
        Ok(())
    }

    /// Reallocates the depth buffer if it no longer matches the surface.
    pub(crate) fn ensure_depth(&mut self) -> RenderResult<()> {
        let viewport = self.viewport();
        if self.depth.matches(viewport) {
            return Ok(());
        }
        self.depth = Depth::new(&self.device, viewport)?;
        log::debug!("Reallocated depth buffer {}x{}", viewport.width, viewport.height);
        Ok(())
    }

    pub(crate) fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }
}

/// First non-sRGB format, else the first listed. Shading writes display values
/// directly.
fn choose_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first().copied())
}

fn clamp_to_limit(size: PhysicalSize<u32>, max: u32) -> PhysicalSize<u32> {
    PhysicalSize::new(size.width.min(max), size.height.min(max))
}
