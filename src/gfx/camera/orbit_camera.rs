use cgmath::*;

use super::camera_utils::{Camera, CameraUniform, Projection};
use crate::config::{camera::POLE_MARGIN, OrbitSettings};

// Pending motion below this is dropped so the camera comes to rest.
const REST_THRESHOLD: f32 = 1e-6;

/// Y-up orbit camera with damped motion.
///
/// Input never moves the camera directly. It accumulates into pending deltas
/// and each [`Camera::update`] applies `damping_factor` of what is pending,
/// carrying the rest over to the next frame.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    /// Angle from the +Y axis, in radians.
    pub polar: f32,
    /// Rotation around the Y axis, in radians.
    pub azimuth: f32,
    pub target: Vector3<f32>,
    pub eye: Vector3<f32>,
    pub projection: Projection,
    pub bounds: OrbitCameraBounds,
    pub damping_factor: f32,
    pub screen_space_panning: bool,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_distance: f32,
    pending_pan: Vector3<f32>,
    home: OrbitPose,
    uniform: CameraUniform,
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
}

impl OrbitCameraBounds {
    fn clamp_distance(&self, distance: f32) -> f32 {
        let lo = self.min_distance.max(f32::EPSILON);
        distance.clamp(lo, self.max_distance.max(lo))
    }

    // Keeps the eye off the poles, where look_at with a Y up vector degenerates.
    fn clamp_polar(&self, polar: f32) -> f32 {
        let lo = self.min_polar.max(POLE_MARGIN);
        let hi = self.max_polar.min(std::f32::consts::PI - POLE_MARGIN);
        polar.clamp(lo.min(hi), hi.max(lo))
    }
}

#[derive(Debug, Clone, Copy)]
struct OrbitPose {
    distance: f32,
    polar: f32,
    azimuth: f32,
    target: Vector3<f32>,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(
            Point3::from_vec(self.eye),
            Point3::from_vec(self.target),
            Vector3::unit_y(),
        );
        self.projection.matrix() * view
    }

    fn eye(&self) -> Point3<f32> {
        Point3::from_vec(self.eye)
    }

    fn resize_projection(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }

    fn update(&mut self, _dt: f32) {
        let applied = self.damping_factor;
        let kept = 1.0 - applied;

        self.azimuth += self.pending_azimuth * applied;
        self.polar = self.bounds.clamp_polar(self.polar + self.pending_polar * applied);
        self.distance = self
            .bounds
            .clamp_distance(self.distance + self.pending_distance * applied);
        self.target += self.pending_pan * applied;

        self.pending_azimuth = settle(self.pending_azimuth * kept);
        self.pending_polar = settle(self.pending_polar * kept);
        self.pending_distance = settle(self.pending_distance * kept);
        self.pending_pan = self.pending_pan * kept;
        if self.pending_pan.magnitude2() < REST_THRESHOLD * REST_THRESHOLD {
            self.pending_pan = Vector3::zero();
        }

        self.update_eye();
    }

    fn update_view_proj(&mut self) {
        self.uniform = CameraUniform::from_camera(&*self);
    }

    fn uniform(&self) -> &CameraUniform {
        &self.uniform
    }
}

impl OrbitCamera {
    pub fn new(settings: &OrbitSettings, projection: Projection, target: Vector3<f32>) -> Self {
        let bounds = OrbitCameraBounds {
            min_distance: settings.min_distance,
            max_distance: settings.max_distance,
            min_polar: settings.min_polar_angle,
            max_polar: settings.max_polar_angle,
        };
        let home = OrbitPose {
            distance: bounds.clamp_distance(settings.initial_distance),
            polar: bounds.clamp_polar(1.1),
            azimuth: 0.6,
            target,
        };

        let mut camera = Self {
            distance: home.distance,
            polar: home.polar,
            azimuth: home.azimuth,
            target,
            eye: Vector3::zero(), // Computed below.
            projection,
            bounds,
            damping_factor: settings.damping_factor.clamp(f32::EPSILON, 1.0),
            screen_space_panning: settings.screen_space_panning,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_distance: 0.0,
            pending_pan: Vector3::zero(),
            home,
            uniform: CameraUniform::default(),
        };
        camera.update_eye();
        camera.update_view_proj();
        camera
    }

    /// Restores the starting pose and drops any pending motion.
    pub fn reset_to_default(&mut self) {
        self.distance = self.home.distance;
        self.polar = self.home.polar;
        self.azimuth = self.home.azimuth;
        self.target = self.home.target;
        self.pending_azimuth = 0.0;
        self.pending_polar = 0.0;
        self.pending_distance = 0.0;
        self.pending_pan = Vector3::zero();
        self.update_eye();
    }

    pub fn add_azimuth(&mut self, delta: f32) {
        self.pending_azimuth += delta;
    }

    pub fn add_polar(&mut self, delta: f32) {
        self.pending_polar += delta;
    }

    /// Zooms proportionally to the current distance.
    pub fn add_distance(&mut self, delta: f32) {
        self.pending_distance += delta * self.distance * 0.1;
    }

    /// Pans the target. `delta.0` moves along the view's right axis; `delta.1`
    /// moves along the view's up axis, or along the ground when screen-space
    /// panning is off.
    pub fn pan(&mut self, delta: (f32, f32)) {
        let right = Vector3::new(self.azimuth.cos(), 0.0, -self.azimuth.sin());
        let second_axis = if self.screen_space_panning {
            let forward = (self.target - self.eye).normalize();
            right.cross(forward).normalize()
        } else {
            Vector3::new(-self.azimuth.sin(), 0.0, -self.azimuth.cos())
        };

        let pan_scale = self.distance * 0.1;
        self.pending_pan += (right * delta.0 + second_axis * delta.1) * pan_scale;
    }

    pub fn is_at_rest(&self) -> bool {
        self.pending_azimuth == 0.0
            && self.pending_polar == 0.0
            && self.pending_distance == 0.0
            && self.pending_pan.is_zero()
    }

    fn update_eye(&mut self) {
        self.eye = spherical_to_cartesian(self.distance, self.polar, self.azimuth) + self.target;
    }
}

fn settle(value: f32) -> f32 {
    if value.abs() < REST_THRESHOLD {
        0.0
    } else {
        value
    }
}

fn spherical_to_cartesian(distance: f32, polar: f32, azimuth: f32) -> Vector3<f32> {
    Vector3::new(
        distance * polar.sin() * azimuth.sin(),
        distance * polar.cos(),
        distance * polar.sin() * azimuth.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;

    fn camera() -> OrbitCamera {
        let config = CameraConfig::default();
        OrbitCamera::new(
            &config.orbit,
            Projection::new(&config, 800, 600),
            Vector3::zero(),
        )
    }

    fn settle_all(camera: &mut OrbitCamera) {
        for _ in 0..2000 {
            camera.update(1.0 / 60.0);
        }
    }

    #[test]
    fn test_initial_distance_within_bounds() {
        let camera = camera();
        assert!(camera.distance >= 10.0 && camera.distance <= 50.0);
        assert!((camera.eye.magnitude() - camera.distance).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_limits_pin_the_camera() {
        let mut config = CameraConfig::default();
        config.orbit.min_polar_angle = 0.0;
        config.orbit.max_polar_angle = 0.0;
        config.orbit.min_distance = 0.0;
        config.orbit.max_distance = 0.0;

        let mut camera = OrbitCamera::new(
            &config.orbit,
            Projection::new(&config, 800, 600),
            Vector3::zero(),
        );
        camera.add_azimuth(1.0);
        camera.update(1.0 / 60.0);

        assert_eq!(camera.polar, POLE_MARGIN);
        assert_eq!(camera.distance, f32::EPSILON);
        assert!(camera.eye.x.is_finite());
    }

    #[test]
    fn test_damping_applies_a_fraction_per_update() {
        let mut camera = camera();
        let start = camera.azimuth;
        camera.add_azimuth(1.0);
        camera.update(1.0 / 60.0);
        assert!((camera.azimuth - start - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_damping_converges_and_stops() {
        let mut camera = camera();
        let start = camera.azimuth;
        camera.add_azimuth(1.0);
        settle_all(&mut camera);

        assert!((camera.azimuth - start - 1.0).abs() < 1e-3);
        assert!(camera.is_at_rest());

        let eye = camera.eye;
        camera.update(1.0 / 60.0);
        assert_eq!(camera.eye, eye);
    }

    #[test]
    fn test_distance_clamps() {
        let mut camera = camera();
        camera.add_distance(1000.0);
        settle_all(&mut camera);
        assert_eq!(camera.distance, 50.0);

        camera.add_distance(-1000.0);
        settle_all(&mut camera);
        assert_eq!(camera.distance, 10.0);
    }

    #[test]
    fn test_polar_stays_above_horizon() {
        let mut camera = camera();
        camera.add_polar(10.0);
        settle_all(&mut camera);
        assert!((camera.polar - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!(camera.eye.y >= -1e-3);

        camera.add_polar(-10.0);
        settle_all(&mut camera);
        assert!(camera.polar > 0.0);
        assert!(camera.eye.y > 0.0);
    }

    #[test]
    fn test_ground_panning_keeps_target_height() {
        let mut camera = camera();
        camera.pan((1.0, 1.0));
        settle_all(&mut camera);
        assert!(camera.target.y.abs() < 1e-6);
        assert!(camera.target.x.abs() > 0.0 || camera.target.z.abs() > 0.0);
    }

    #[test]
    fn test_reset_to_default() {
        let mut camera = camera();
        let home_eye = camera.eye;
        camera.add_azimuth(2.0);
        camera.pan((3.0, 0.0));
        for _ in 0..10 {
            camera.update(1.0 / 60.0);
        }

        camera.reset_to_default();
        assert!(camera.is_at_rest());
        assert!((camera.eye - home_eye).magnitude() < 1e-5);
    }

    #[test]
    fn test_uniform_tracks_eye() {
        let mut camera = camera();
        camera.update_view_proj();
        let eye = camera.eye;
        assert_eq!(camera.uniform().view_position, [eye.x, eye.y, eye.z, 1.0]);
    }
}
