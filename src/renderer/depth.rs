use winit::dpi::PhysicalSize;

use crate::error::RenderResult;
use crate::renderer::internal::scope::allocate;

/// Camera-view depth buffer used by the color pass.
pub struct Depth {
    pub view: wgpu::TextureView,
    size: PhysicalSize<u32>,
}

impl Depth {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

    pub fn new(device: &wgpu::Device, size: PhysicalSize<u32>) -> RenderResult<Self> {
        let tex = allocate(device, "Depth", || {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Depth"),
                size: extent(size),
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: Self::FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
        })?;
        let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
        Ok(Self { view, size })
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Whether this buffer can be attached alongside a `size` color target.
    pub fn matches(&self, size: PhysicalSize<u32>) -> bool {
        extent(self.size) == extent(size)
    }
}

/// Texture extent for a viewport, clamped so a minimised window still
/// yields a valid 1x1 texture.
pub(crate) fn extent(size: PhysicalSize<u32>) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: size.width.max(1),
        height: size.height.max(1),
        depth_or_array_layers: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_format_is_depth24plus() {
        // no device needed, so this runs headless
        assert!(matches!(Depth::FORMAT, wgpu::TextureFormat::Depth24Plus));
    }

    #[test]
    fn zero_sized_viewports_share_the_one_texel_extent() {
        assert_eq!(
            extent(PhysicalSize::new(0, 5)),
            extent(PhysicalSize::new(1, 5))
        );
        assert_ne!(
            extent(PhysicalSize::new(800, 600)),
            extent(PhysicalSize::new(800, 601))
        );
    }

    #[test]
    fn extent_never_collapses_to_zero() {
        let e = extent(PhysicalSize::new(0, 0));
        assert_eq!((e.width, e.height, e.depth_or_array_layers), (1, 1, 1));
        let e = extent(PhysicalSize::new(800, 600));
        assert_eq!((e.width, e.height), (800, 600));
    }
}
