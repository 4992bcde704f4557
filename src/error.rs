use std::path::PathBuf;

use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported {0}")]
    UnsupportedSurface(&'static str),

    #[error("shader build failed for {label}: {message}")]
    ShaderBuild { label: String, message: String },

    #[error("could not allocate {resource}: {message}")]
    Allocation { resource: String, message: String },

    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("failed to load texture {path:?}: {message}")]
    Texture { path: PathBuf, message: String },
}

impl RenderError {
    /// Whether the failure only costs the current frame.
    pub fn is_frame_local(&self) -> bool {
        matches!(
            self,
            RenderError::Allocation { .. }
                | RenderError::Surface(
                    wgpu::SurfaceError::Timeout
                        | wgpu::SurfaceError::Lost
                        | wgpu::SurfaceError::Outdated
                )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_failure_only_skips_the_frame() {
        let err = RenderError::Allocation {
            resource: "ShadowTarget".into(),
            message: "out of memory".into(),
        };
        assert!(err.is_frame_local());
        assert_eq!(
            err.to_string(),
            "could not allocate ShadowTarget: out of memory"
        );
    }

    #[test]
    fn shader_failure_is_fatal() {
        let err = RenderError::ShaderBuild {
            label: "SceneShader".into(),
            message: "unknown identifier".into(),
        };
        assert!(!err.is_frame_local());
        assert!(err.to_string().contains("SceneShader"));
    }

    #[test]
    fn surface_timeouts_are_frame_local() {
        let err = RenderError::from(wgpu::SurfaceError::Timeout);
        assert!(err.is_frame_local());
        assert!(!RenderError::from(wgpu::SurfaceError::OutOfMemory).is_frame_local());
    }

    #[test]
    fn empty_surface_capabilities_are_fatal() {
        let unsupported = RenderError::UnsupportedSurface("alpha mode");
        assert!(!unsupported.is_frame_local());
        assert_eq!(unsupported.to_string(), "surface reports no supported alpha mode");
    }
}
