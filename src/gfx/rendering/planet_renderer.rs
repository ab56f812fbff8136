//! Instanced planet rendering
//!
//! Every planet shares one unit-sphere mesh; position, radius and colour
//! arrive as per-instance data, so the whole scene is a single draw call.

use wgpu::util::DeviceExt;
use wgpu::{Buffer, Device, Queue, RenderPass};

use crate::gfx::{
    geometry::GeometryData,
    scene::vertex::{PlanetInstance, Vertex3D},
};

/// Sphere mesh uploaded to the GPU
pub struct SphereMesh {
    pub vertex_buffer: Buffer,
    pub index_buffer: Buffer,
    pub index_count: u32,
}

impl SphereMesh {
    pub fn new(device: &Device, geometry: &GeometryData) -> Self {
        let vertices: Vec<Vertex3D> = geometry.to_vertices();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Planet Sphere Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Planet Sphere Index Buffer"),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: geometry.indices.len() as u32,
        }
    }
}

pub struct PlanetRenderer {
    mesh: SphereMesh,
    instance_buffer: Buffer,
    capacity: usize,
    instance_count: u32,
}

impl PlanetRenderer {
    pub fn new(device: &Device, geometry: &GeometryData, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            mesh: SphereMesh::new(device, geometry),
            instance_buffer: Self::create_instance_buffer(device, capacity),
            capacity,
            instance_count: 0,
        }
    }

    fn create_instance_buffer(device: &Device, capacity: usize) -> Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Planet Instance Buffer"),
            size: (capacity * std::mem::size_of::<PlanetInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Uploads instance data, growing the buffer when it is too small.
    pub fn update_instances(&mut self, device: &Device, queue: &Queue, instances: &[PlanetInstance]) {
        if instances.len() > self.capacity {
            self.capacity = instances.len().next_power_of_two();
            self.instance_buffer = Self::create_instance_buffer(device, self.capacity);
            log::debug!("Grew planet instance buffer to {} instances", self.capacity);
        }

        self.instance_count = instances.len() as u32;
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(instances));
        }
    }

    /// Render all planets in a single draw call
    pub fn render(&self, render_pass: &mut RenderPass<'_>) {
        if self.instance_count == 0 {
            return;
        }

        render_pass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        render_pass.set_index_buffer(self.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.mesh.index_count, 0, 0..self.instance_count);
    }

    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    pub fn triangle_count(&self) -> u32 {
        self.mesh.index_count / 3 * self.instance_count
    }
}
