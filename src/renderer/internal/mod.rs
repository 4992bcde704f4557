pub mod buffers;
pub mod color;
pub mod context;
pub mod scope;
pub mod shadows;

pub(crate) use buffers::SceneBuffers;
pub(crate) use color::ColorPass;
pub(crate) use context::RenderContext;
pub(crate) use shadows::{ShadowPass, ShadowTarget};
