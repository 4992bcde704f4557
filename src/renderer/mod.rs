pub mod depth;
pub(crate) mod internal;
pub mod lighting;
pub mod renderer;
pub mod shaders;
pub mod texture;
pub mod uniforms;
pub mod vertex;

pub use depth::Depth;
pub use renderer::Renderer;
pub use texture::Texture;
pub use uniforms::{SceneUniforms, ShadowUniforms};
pub use vertex::Vertex;
