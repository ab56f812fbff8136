//! Starfield and skybox passes drawn behind the planets.

use wgpu::util::DeviceExt;
use wgpu::{Buffer, Device, RenderPass};

use crate::gfx::geometry::StarVertex;

/// Point list of stars on a shell centred on the camera.
pub struct StarfieldRenderer {
    vertex_buffer: Buffer,
    star_count: u32,
}

impl StarfieldRenderer {
    pub fn new(device: &Device, stars: &[StarVertex]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Starfield Vertex Buffer"),
            contents: bytemuck::cast_slice(stars),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            vertex_buffer,
            star_count: stars.len() as u32,
        }
    }

    pub fn render(&self, render_pass: &mut RenderPass<'_>) {
        if self.star_count == 0 {
            return;
        }
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.star_count, 0..1);
    }

    pub fn star_count(&self) -> u32 {
        self.star_count
    }
}

/// Fullscreen triangle shading a gradient sky from the view direction.
///
/// The shader builds its three vertices from the vertex index and recovers the
/// world-space direction through the inverse view-projection in the globals.
#[derive(Default)]
pub struct SkyboxRenderer;

impl SkyboxRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, render_pass: &mut RenderPass<'_>) {
        render_pass.draw(0..3, 0..1);
    }
}
