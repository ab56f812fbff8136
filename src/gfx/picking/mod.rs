//! # Planet Picking
//!
//! Mouse ray-casting against the planet spheres.
//!
//! 1. **Mouse to Ray**: unproject the cursor through the inverse view-projection
//! 2. **Ray-Sphere Intersection**: analytic test against each planet
//! 3. **Selection**: the closest hit wins

use cgmath::{InnerSpace, Matrix4, Vector3, Vector4};

use crate::gfx::scene::Planet;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Builds the world-space ray under a cursor position in physical pixels.
    ///
    /// wgpu clip space has depth in `[0, 1]`, so the near plane unprojects
    /// from NDC z = 0 and the far plane from z = 1.
    pub fn from_screen(
        mouse: (f32, f32),
        screen_size: (f32, f32),
        inverse_view_proj: Matrix4<f32>,
    ) -> Option<Self> {
        let (width, height) = screen_size;
        if width <= 0.0 || height <= 0.0 {
            return None;
        }

        let ndc_x = (2.0 * mouse.0) / width - 1.0;
        let ndc_y = 1.0 - (2.0 * mouse.1) / height; // Flip Y axis

        let near = unproject(inverse_view_proj, ndc_x, ndc_y, 0.0)?;
        let far = unproject(inverse_view_proj, ndc_x, ndc_y, 1.0)?;
        let direction = far - near;
        if direction.magnitude2() <= f32::EPSILON {
            return None;
        }

        Some(Ray::new(near, direction))
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }

    /// Distance to the nearest intersection with a sphere in front of the
    /// origin. A ray starting inside the sphere hits its far side.
    pub fn intersect_sphere(&self, center: Vector3<f32>, radius: f32) -> Option<f32> {
        if radius <= 0.0 {
            return None;
        }

        let to_origin = self.origin - center;
        let b = to_origin.dot(self.direction);
        let c = to_origin.magnitude2() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let near = -b - root;
        let far = -b + root;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }
}

fn unproject(inverse_view_proj: Matrix4<f32>, x: f32, y: f32, z: f32) -> Option<Vector3<f32>> {
    let world = inverse_view_proj * Vector4::new(x, y, z, 1.0);
    if world.w.abs() <= f32::EPSILON {
        return None;
    }
    Some(world.truncate() / world.w)
}

/// Result of a picking operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickResult {
    /// Index of the picked planet in the scene
    pub planet_index: usize,
    /// Distance from the ray origin to the hit
    pub distance: f32,
    /// World space intersection point
    pub intersection_point: Vector3<f32>,
}

/// Returns the closest planet hit by `ray`.
pub fn pick_planet(ray: &Ray, planets: &[Planet]) -> Option<PickResult> {
    planets
        .iter()
        .enumerate()
        .filter_map(|(index, planet)| {
            ray.intersect_sphere(planet.position, planet.radius)
                .map(|distance| PickResult {
                    planet_index: index,
                    distance,
                    intersection_point: ray.point_at(distance),
                })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
