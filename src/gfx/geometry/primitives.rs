//! # Primitive Shape Generation

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (at least 3)
/// * `latitude_segments` - Number of horizontal segments (at least 2)
///
/// Returns a sphere of radius 1.0 centered at the origin, Y up.
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 at the north pole
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;

            let x = sin_theta * phi.cos();
            let y = cos_theta;
            let z = sin_theta * phi.sin();

            data.vertices.push([x, y, z]);
            data.normals.push([x, y, z]); // Normal is same as position for unit sphere
            data.tex_coords.push([
                long as f32 / long_segs as f32,
                lat as f32 / lat_segs as f32,
            ]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, first + 1, second]);
            data.indices.extend_from_slice(&[second, first + 1, second + 1]);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector3};

    #[test]
    fn test_sphere_counts() {
        let sphere = generate_sphere(8, 4);
        assert_eq!(sphere.vertex_count(), 9 * 5);
        assert_eq!(sphere.triangle_count(), 8 * 4 * 2);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        assert_eq!(sphere.vertices.len(), sphere.tex_coords.len());
    }

    #[test]
    fn test_segments_clamp_to_minimum() {
        let sphere = generate_sphere(0, 0);
        assert_eq!(sphere.vertex_count(), 4 * 3);
        assert_eq!(sphere.triangle_count(), 3 * 2 * 2);
    }

    #[test]
    fn test_vertices_on_unit_sphere() {
        let sphere = generate_sphere(16, 8);
        for v in &sphere.vertices {
            let length = Vector3::from(*v).magnitude();
            assert!((length - 1.0).abs() < 1e-5);
        }
        assert!(sphere
            .indices
            .iter()
            .all(|&i| (i as usize) < sphere.vertex_count()));
    }

    #[test]
    fn test_triangles_face_outward() {
        let sphere = generate_sphere(16, 8);
        for triangle in sphere.indices.chunks(3) {
            let a = Vector3::from(sphere.vertices[triangle[0] as usize]);
            let b = Vector3::from(sphere.vertices[triangle[1] as usize]);
            let c = Vector3::from(sphere.vertices[triangle[2] as usize]);
            let normal = (b - a).cross(c - a);
            // Pole triangles collapse to a line.
            if normal.magnitude2() < 1e-10 {
                continue;
            }
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0);
        }
    }
}
