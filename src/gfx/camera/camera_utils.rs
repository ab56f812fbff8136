use cgmath::{Deg, Matrix4, Point3, SquareMatrix};

use crate::config::CameraConfig;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

pub trait Camera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;

    /// World-space eye position.
    fn eye(&self) -> Point3<f32>;

    fn resize_projection(&mut self, width: u32, height: u32);

    /// Advances damping or flight integration by `dt` seconds.
    fn update(&mut self, dt: f32);

    /// Refreshes the cached uniform from the current pose.
    fn update_view_proj(&mut self);

    fn uniform(&self) -> &CameraUniform;
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }
}

impl CameraUniform {
    pub fn from_camera(camera: &dyn Camera) -> Self {
        let eye = camera.eye();
        Self {
            view_position: [eye.x, eye.y, eye.z, 1.0],
            view_proj: camera.build_view_projection_matrix().into(),
        }
    }
}

/// Perspective projection shared by both camera rigs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub aspect: f32,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new(config: &CameraConfig, width: u32, height: u32) -> Self {
        Self {
            aspect: aspect_ratio(width, height),
            fovy: Deg(config.fov_deg),
            znear: config.near,
            zfar: config.far,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector4, Zero};

    #[test]
    fn test_projection_maps_near_and_far_to_wgpu_depth() {
        let projection = Projection::new(&CameraConfig::default(), 800, 600);
        let matrix = projection.matrix();

        let near = matrix * Vector4::new(0.0, 0.0, -projection.znear, 1.0);
        let far = matrix * Vector4::new(0.0, 0.0, -projection.zfar, 1.0);
        assert!((near.z / near.w).abs() < 1e-5);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_height_does_not_divide_by_zero() {
        let mut projection = Projection::new(&CameraConfig::default(), 800, 600);
        projection.resize(640, 0);
        assert!(projection.aspect.is_finite());
        assert!(!projection.matrix().x.is_zero());
    }
}
