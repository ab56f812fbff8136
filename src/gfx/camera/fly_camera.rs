use cgmath::*;

use super::camera_utils::{Camera, CameraUniform, Projection};
use crate::config::FlySettings;

/// Free-flying camera with position and orientation.
///
/// Movement and rotation inputs are held as unit axes (-1, 0 or 1 per axis)
/// and integrated in [`Camera::update`], so speed is independent of frame rate.
#[derive(Debug, Clone, Copy)]
pub struct FlyCamera {
    pub position: Point3<f32>,
    pub orientation: Quaternion<f32>,
    pub projection: Projection,
    pub movement_speed: f32,
    pub roll_speed: f32,
    pub look_speed: f32,
    /// x = right, y = up, z = forward.
    pub move_state: Vector3<f32>,
    /// x = pitch, y = yaw, z = roll.
    pub rotation_state: Vector3<f32>,
    pending_look: Vector2<f32>,
    home: (Point3<f32>, Quaternion<f32>),
    uniform: CameraUniform,
}

impl Camera for FlyCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let view = Matrix4::look_to_rh(self.position, self.forward(), self.up());
        self.projection.matrix() * view
    }

    fn eye(&self) -> Point3<f32> {
        self.position
    }

    fn resize_projection(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }

    fn update(&mut self, dt: f32) {
        let step = self.movement_speed * dt;
        let movement = self.right() * self.move_state.x
            + self.up() * self.move_state.y
            + self.forward() * self.move_state.z;
        self.position += movement * step;

        let turn = self.roll_speed * dt;
        let pitch = self.rotation_state.x * turn - self.pending_look.y * self.look_speed;
        let yaw = self.rotation_state.y * turn - self.pending_look.x * self.look_speed;
        let roll = self.rotation_state.z * turn;
        self.pending_look = Vector2::zero();

        if pitch != 0.0 || yaw != 0.0 || roll != 0.0 {
            let delta = Quaternion::from(Euler::new(Rad(pitch), Rad(yaw), Rad(roll)));
            self.orientation = (self.orientation * delta).normalize();
        }
    }

    fn update_view_proj(&mut self) {
        self.uniform = CameraUniform::from_camera(&*self);
    }

    fn uniform(&self) -> &CameraUniform {
        &self.uniform
    }
}

impl FlyCamera {
    /// Starts at `settings.start` looking at `target`.
    pub fn new(settings: &FlySettings, projection: Projection, target: Point3<f32>) -> Self {
        let position = Point3::from(settings.start);
        let orientation = look_rotation(target - position);

        let mut camera = Self {
            position,
            orientation,
            projection,
            movement_speed: settings.movement_speed,
            roll_speed: settings.roll_speed,
            look_speed: settings.look_speed,
            move_state: Vector3::zero(),
            rotation_state: Vector3::zero(),
            pending_look: Vector2::zero(),
            home: (position, orientation),
            uniform: CameraUniform::default(),
        };
        camera.update_view_proj();
        camera
    }

    pub fn forward(&self) -> Vector3<f32> {
        self.orientation.rotate_vector(-Vector3::unit_z())
    }

    pub fn right(&self) -> Vector3<f32> {
        self.orientation.rotate_vector(Vector3::unit_x())
    }

    pub fn up(&self) -> Vector3<f32> {
        self.orientation.rotate_vector(Vector3::unit_y())
    }

    /// Queues a mouse-look rotation in pixels; applied on the next update.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.pending_look += Vector2::new(dx, dy);
    }

    pub fn reset_to_default(&mut self) {
        (self.position, self.orientation) = self.home;
        self.move_state = Vector3::zero();
        self.rotation_state = Vector3::zero();
        self.pending_look = Vector2::zero();
    }
}

// Orientation whose -Z axis points along `direction`, with no roll.
fn look_rotation(direction: Vector3<f32>) -> Quaternion<f32> {
    if direction.magnitude2() < f32::EPSILON {
        return Quaternion::one();
    }
    let direction = direction.normalize();
    let yaw = (-direction.x).atan2(-direction.z);
    let pitch = direction.y.clamp(-1.0, 1.0).asin();
    Quaternion::from_angle_y(Rad(yaw)) * Quaternion::from_angle_x(Rad(pitch))
}
