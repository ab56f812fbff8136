//! Camera settings.

use serde::{Deserialize, Serialize};

/// Smallest polar angle (radians) the orbit camera may approach a pole by.
pub const POLE_MARGIN: f32 = 1e-4;

/// Which camera rig drives the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// Damped orbit around the scene centre.
    #[default]
    Orbit,
    /// Free flight with keyboard movement and mouse look.
    Fly,
}

impl std::str::FromStr for CameraMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "orbit" => Ok(CameraMode::Orbit),
            "fly" => Ok(CameraMode::Fly),
            other => Err(format!("unknown camera mode '{other}' (expected orbit or fly)")),
        }
    }
}

/// Projection and rig settings (`[camera]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub mode: CameraMode,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub orbit: OrbitSettings,
    pub fly: FlySettings,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            mode: CameraMode::Orbit,
            fov_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            orbit: OrbitSettings::default(),
            fly: FlySettings::default(),
        }
    }
}

/// Orbit rig settings (`[camera.orbit]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    /// Fraction of the pending motion applied each frame, in `(0, 1]`.
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle limits in radians, measured from straight up.
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    /// Starting distance from the target.
    pub initial_distance: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    /// Pan in the view plane instead of the ground plane.
    pub screen_space_panning: bool,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            damping_factor: 0.05,
            min_distance: 10.0,
            max_distance: 50.0,
            min_polar_angle: 0.0,
            max_polar_angle: std::f32::consts::FRAC_PI_2,
            initial_distance: 30.0,
            rotate_speed: 0.005,
            zoom_speed: 1.0,
            pan_speed: 0.01,
            screen_space_panning: false,
        }
    }
}

/// Fly rig settings (`[camera.fly]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlySettings {
    /// World units per second.
    pub movement_speed: f32,
    /// Radians per second for keyboard roll/yaw/pitch.
    pub roll_speed: f32,
    /// Radians per pixel of mouse motion.
    pub look_speed: f32,
    /// Only look around while the left mouse button is held.
    pub drag_to_look: bool,
    /// Starting position.
    pub start: [f32; 3],
}

impl Default for FlySettings {
    fn default() -> Self {
        Self {
            movement_speed: 10.0,
            roll_speed: std::f32::consts::FRAC_PI_6,
            look_speed: 0.003,
            drag_to_look: true,
            start: [0.0, 0.0, 60.0],
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), String> {
        let finite = [
            ("camera.fov_deg", self.fov_deg),
            ("camera.near", self.near),
            ("camera.far", self.far),
            ("camera.orbit.damping_factor", self.orbit.damping_factor),
            ("camera.orbit.min_distance", self.orbit.min_distance),
            ("camera.orbit.max_distance", self.orbit.max_distance),
            ("camera.orbit.min_polar_angle", self.orbit.min_polar_angle),
            ("camera.orbit.max_polar_angle", self.orbit.max_polar_angle),
            ("camera.orbit.initial_distance", self.orbit.initial_distance),
            ("camera.orbit.rotate_speed", self.orbit.rotate_speed),
            ("camera.orbit.zoom_speed", self.orbit.zoom_speed),
            ("camera.orbit.pan_speed", self.orbit.pan_speed),
            ("camera.fly.movement_speed", self.fly.movement_speed),
            ("camera.fly.roll_speed", self.fly.roll_speed),
            ("camera.fly.look_speed", self.fly.look_speed),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(format!("{name} must be a finite number, got {value}"));
        }
        if let Some(axis) = self.fly.start.iter().find(|v| !v.is_finite()) {
            return Err(format!("camera.fly.start must be finite, got {axis}"));
        }

        if !(self.fov_deg > 0.0 && self.fov_deg < 180.0) {
            return Err(format!("camera.fov_deg must be in (0, 180), got {}", self.fov_deg));
        }
        if self.near <= 0.0 || self.far <= 0.0 || self.near >= self.far {
            return Err(format!(
                "camera.near ({}) and camera.far ({}) must be positive with near < far",
                self.near, self.far
            ));
        }

        let orbit = &self.orbit;
        if !(orbit.damping_factor > 0.0 && orbit.damping_factor <= 1.0) {
            return Err(format!(
                "camera.orbit.damping_factor must be in (0, 1], got {}",
                orbit.damping_factor
            ));
        }
        if orbit.min_distance < 0.0 || orbit.min_distance > orbit.max_distance {
            return Err(format!(
                "camera.orbit.min_distance ({}) must be >= 0 and <= max_distance ({})",
                orbit.min_distance, orbit.max_distance
            ));
        }
        if orbit.max_distance < f32::EPSILON {
            return Err(format!(
                "camera.orbit.max_distance must be > 0, got {}",
                orbit.max_distance
            ));
        }
        if orbit.min_polar_angle < 0.0
            || orbit.max_polar_angle > std::f32::consts::PI
            || orbit.min_polar_angle > orbit.max_polar_angle
        {
            return Err("camera.orbit polar angles must satisfy 0 <= min <= max <= PI".to_string());
        }
        // The eye never sits exactly on a pole.
        if orbit.max_polar_angle < POLE_MARGIN
            || orbit.min_polar_angle > std::f32::consts::PI - POLE_MARGIN
        {
            return Err(format!(
                "camera.orbit polar range [{}, {}] leaves no room off the poles",
                orbit.min_polar_angle, orbit.max_polar_angle
            ));
        }

        if self.fly.movement_speed < 0.0 || self.fly.roll_speed < 0.0 || self.fly.look_speed < 0.0 {
            return Err("camera.fly speeds must be >= 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("orbit".parse::<CameraMode>().unwrap(), CameraMode::Orbit);
        assert_eq!("FLY".parse::<CameraMode>().unwrap(), CameraMode::Fly);
        assert!("trackball".parse::<CameraMode>().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(CameraConfig::default().validate().is_ok());

        let mut inverted = CameraConfig::default();
        inverted.orbit.min_distance = 80.0;
        assert!(inverted.validate().is_err());

        let mut no_damping = CameraConfig::default();
        no_damping.orbit.damping_factor = 0.0;
        assert!(no_damping.validate().is_err());

        let mut clip = CameraConfig::default();
        clip.near = 10.0;
        clip.far = 1.0;
        assert!(clip.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_degenerate_orbit_limits() {
        let mut on_pole = CameraConfig::default();
        on_pole.orbit.min_polar_angle = 0.0;
        on_pole.orbit.max_polar_angle = 0.0;
        assert!(on_pole.validate().is_err());

        let mut south_pole = CameraConfig::default();
        south_pole.orbit.min_polar_angle = std::f32::consts::PI;
        south_pole.orbit.max_polar_angle = std::f32::consts::PI;
        assert!(south_pole.validate().is_err());

        let mut zero_distance = CameraConfig::default();
        zero_distance.orbit.min_distance = 0.0;
        zero_distance.orbit.max_distance = 0.0;
        assert!(zero_distance.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut far_orbit = CameraConfig::default();
        far_orbit.orbit.max_distance = f32::NAN;
        assert!(far_orbit.validate().is_err());

        let mut near = CameraConfig::default();
        near.near = f32::NAN;
        assert!(near.validate().is_err());

        let mut polar = CameraConfig::default();
        polar.orbit.max_polar_angle = f32::NAN;
        assert!(polar.validate().is_err());

        let mut speed = CameraConfig::default();
        speed.fly.movement_speed = f32::INFINITY;
        assert!(speed.validate().is_err());
    }
}
