//! Star points for the starfield backdrop.

use rand::Rng;

/// One star: a position on the shell and a brightness in `[0.2, 1.0]`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarVertex {
    pub position: [f32; 3],
    pub brightness: f32,
}

impl StarVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<StarVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Distributes `count` stars uniformly over a sphere of `radius`.
pub fn generate_star_points<R: Rng + ?Sized>(count: u32, radius: f32, rng: &mut R) -> Vec<StarVertex> {
    (0..count)
        .map(|_| {
            // Uniform on the sphere: z uniform in [-1, 1], angle uniform.
            let z: f32 = rng.random_range(-1.0..=1.0);
            let angle: f32 = rng.random_range(0.0..std::f32::consts::TAU);
            let ring = (1.0 - z * z).max(0.0).sqrt();

            // Most stars dim, a few bright.
            let brightness = 0.2 + 0.8 * rng.random::<f32>().powi(3);

            StarVertex {
                position: [
                    radius * ring * angle.cos(),
                    radius * z,
                    radius * ring * angle.sin(),
                ],
                brightness,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_stars_lie_on_shell() {
        let mut rng = StdRng::seed_from_u64(3);
        let stars = generate_star_points(500, 400.0, &mut rng);
        assert_eq!(stars.len(), 500);

        for star in &stars {
            let [x, y, z] = star.position;
            let length = (x * x + y * y + z * z).sqrt();
            assert!((length - 400.0).abs() < 0.05);
            assert!((0.2..=1.0).contains(&star.brightness));
        }
    }

    #[test]
    fn test_stars_cover_both_hemispheres() {
        let mut rng = StdRng::seed_from_u64(11);
        let stars = generate_star_points(200, 1.0, &mut rng);
        assert!(stars.iter().any(|s| s.position[1] > 0.5));
        assert!(stars.iter().any(|s| s.position[1] < -0.5));
    }

    #[test]
    fn test_zero_stars() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generate_star_points(0, 10.0, &mut rng).is_empty());
    }
}
