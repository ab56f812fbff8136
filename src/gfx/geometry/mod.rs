//! # Procedural Geometry Generation
//!
//! Meshes are generated at startup, so the binary needs no model files.
//!
//! - [`generate_sphere`]: unit UV sphere shared by every planet instance
//! - [`generate_star_points`]: point cloud on a sphere shell for the starfield
//!
//! ```rust
//! use planetarium::gfx::geometry::generate_sphere;
//!
//! let sphere = generate_sphere(32, 16);
//! assert_eq!(sphere.vertex_count(), 33 * 17);
//! ```

pub mod primitives;
pub mod stars;

pub use primitives::generate_sphere;
pub use stars::{generate_star_points, StarVertex};

use crate::gfx::scene::vertex::Vertex3D;

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding seen from outside)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves positions and normals into the renderer's vertex format.
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }
}
