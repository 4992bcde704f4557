use wgpu::util::DeviceExt;

use crate::error::RenderResult;
use crate::renderer::internal::scope::allocate;
use crate::scene::SceneBuffer;

/// GPU copy of the assembled scene. Uploaded once, never rewritten.
pub(crate) struct SceneBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl SceneBuffers {
    pub(crate) fn upload(device: &wgpu::Device, scene: &SceneBuffer) -> RenderResult<Self> {
        let vertex_buffer = allocate(device, "SceneVertexBuffer", || {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("SceneVertexBuffer"),
                contents: bytemuck::cast_slice(scene.vertices()),
                usage: wgpu::BufferUsages::VERTEX,
            })
        })?;

        let index_buffer = allocate(device, "SceneIndexBuffer", || {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("SceneIndexBuffer"),
                contents: bytemuck::cast_slice(scene.indices()),
                usage: wgpu::BufferUsages::INDEX,
            })
        })?;

        log::info!(
            "Uploaded scene: {} objects, {} vertices, {} indices",
            scene.object_count(),
            scene.vertex_count(),
            scene.index_count()
        );

        Ok(Self {
            vertex_buffer,
            index_buffer,
            index_count: scene.index_count() as u32,
        })
    }

    pub(crate) fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Binds the scene geometry and issues the single indexed draw.
    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.index_count == 0 {
            return;
        }
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
