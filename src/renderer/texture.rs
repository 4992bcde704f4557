// renderer/texture.rs

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::error::{RenderError, RenderResult};
use crate::renderer::internal::scope::allocate;

/// Albedo texture sampled by the color pass.
#[derive(Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl Texture {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
    const CHECKER_SIZE: u32 = 64;
    const CHECKER_CELLS: u32 = 8;

    /// Decodes the image at `path` and uploads it as an RGBA8 texture.
    pub fn from_path(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: impl AsRef<Path>,
    ) -> RenderResult<Self> {
        let path = path.as_ref();
        log::info!("Loading texture: {:?}", path);

        let img = image::open(path).map_err(|e| RenderError::Texture {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_image(device, queue, &img.to_rgba8(), path.to_str())
    }

    /// Loads `path`, substituting a procedural checkerboard if that fails.
    pub fn load_or_checkerboard(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: impl AsRef<Path>,
    ) -> RenderResult<Self> {
        match Self::from_path(device, queue, path) {
            Ok(texture) => Ok(texture),
            Err(err @ RenderError::Texture { .. }) => {
                log::warn!("{err}. Using checkerboard albedo instead.");
                Self::from_image(device, queue, &checkerboard(), Some("CheckerboardAlbedo"))
            }
            Err(err) => Err(err),
        }
    }

    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: &RgbaImage,
        label: Option<&str>,
    ) -> RenderResult<Self> {
        let (width, height) = rgba.dimensions();
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = allocate(device, label.unwrap_or("AlbedoTexture"), || {
            device.create_texture(&wgpu::TextureDescriptor {
                label,
                size,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: Self::FORMAT,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            })
        })?;

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("AlbedoSampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Ok(Self {
            texture,
            view,
            sampler,
        })
    }
}

/// Two-tone checkerboard used when no albedo image is available.
pub fn checkerboard() -> RgbaImage {
    let cell = Texture::CHECKER_SIZE / Texture::CHECKER_CELLS;
    RgbaImage::from_fn(Texture::CHECKER_SIZE, Texture::CHECKER_SIZE, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgba([230, 230, 230, 255])
        } else {
            Rgba([120, 120, 130, 255])
        }
    })
}
