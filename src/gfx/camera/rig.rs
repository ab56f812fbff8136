use cgmath::{EuclideanSpace, Point3, Vector3};
use winit::{
    event::{ElementState, MouseButton, MouseScrollDelta},
    keyboard::KeyCode,
};

use super::{
    camera_controller::CameraController,
    camera_utils::{Camera, CameraUniform, Projection},
    fly_camera::FlyCamera,
    fly_controller::FlyController,
    orbit_camera::OrbitCamera,
};
use crate::config::{CameraConfig, CameraMode};

/// The active camera and the controller that drives it.
pub enum CameraRig {
    Orbit {
        camera: OrbitCamera,
        controller: CameraController,
    },
    Fly {
        camera: FlyCamera,
        controller: FlyController,
    },
}

impl CameraRig {
    /// Builds the rig selected by `config.mode`, aimed at `target`.
    pub fn new(config: &CameraConfig, width: u32, height: u32, target: Vector3<f32>) -> Self {
        let projection = Projection::new(config, width, height);
        match config.mode {
            CameraMode::Orbit => CameraRig::Orbit {
                camera: OrbitCamera::new(&config.orbit, projection, target),
                controller: CameraController::new(&config.orbit),
            },
            CameraMode::Fly => CameraRig::Fly {
                camera: FlyCamera::new(&config.fly, projection, Point3::from_vec(target)),
                controller: FlyController::new(config.fly.drag_to_look),
            },
        }
    }

    pub fn mode(&self) -> CameraMode {
        match self {
            CameraRig::Orbit { .. } => CameraMode::Orbit,
            CameraRig::Fly { .. } => CameraMode::Fly,
        }
    }

    pub fn camera(&self) -> &dyn Camera {
        match self {
            CameraRig::Orbit { camera, .. } => camera,
            CameraRig::Fly { camera, .. } => camera,
        }
    }

    pub fn camera_mut(&mut self) -> &mut dyn Camera {
        match self {
            CameraRig::Orbit { camera, .. } => camera,
            CameraRig::Fly { camera, .. } => camera,
        }
    }

    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        match self {
            CameraRig::Orbit { camera, controller } => {
                controller.process_keyboard(key, state, camera)
            }
            CameraRig::Fly { camera, controller } => {
                controller.process_keyboard(key, state, camera)
            }
        }
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match self {
            CameraRig::Orbit { controller, .. } => controller.process_mouse_button(button, state),
            CameraRig::Fly { controller, .. } => controller.process_mouse_button(button, state),
        }
    }

    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) -> bool {
        match self {
            CameraRig::Orbit { camera, controller } => {
                controller.process_mouse_motion(delta, camera)
            }
            CameraRig::Fly { camera, controller } => {
                controller.process_mouse_motion(delta, camera)
            }
        }
    }

    /// Zooms the orbit camera; scales flight speed for the fly camera.
    pub fn process_scroll(&mut self, delta: &MouseScrollDelta) {
        match self {
            CameraRig::Orbit { camera, controller } => controller.process_scroll(delta, camera),
            CameraRig::Fly { camera, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / 50.0,
                };
                camera.movement_speed = (camera.movement_speed * 1.1f32.powf(lines)).max(0.1);
            }
        }
    }

    /// Advances the camera and refreshes its uniform.
    pub fn update(&mut self, dt: f32) {
        let camera = self.camera_mut();
        camera.update(dt);
        camera.update_view_proj();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let camera = self.camera_mut();
        camera.resize_projection(width, height);
        camera.update_view_proj();
    }

    pub fn uniform(&self) -> CameraUniform {
        *self.camera().uniform()
    }

    pub fn reset(&mut self) {
        match self {
            CameraRig::Orbit { camera, .. } => camera.reset_to_default(),
            CameraRig::Fly { camera, .. } => camera.reset_to_default(),
        }
        self.camera_mut().update_view_proj();
    }

    pub fn help_text(&self) -> &'static str {
        match self {
            CameraRig::Orbit { .. } => {
                "Drag: rotate | Shift+drag / right drag: pan | Wheel: zoom | Shift+C: reset | Click: select"
            }
            CameraRig::Fly { .. } => {
                "W/S: forward/back | A/D: strafe | R/F: up/down | Q/E: roll | Arrows: pitch/yaw | Drag: look | Wheel: speed"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Zero;

    #[test]
    fn test_mode_selects_camera() {
        let mut config = CameraConfig::default();
        let orbit = CameraRig::new(&config, 800, 600, Vector3::zero());
        assert_eq!(orbit.mode(), CameraMode::Orbit);

        config.mode = CameraMode::Fly;
        let fly = CameraRig::new(&config, 800, 600, Vector3::zero());
        assert_eq!(fly.mode(), CameraMode::Fly);
        assert_eq!(fly.camera().eye(), Point3::from(config.fly.start));
    }

    #[test]
    fn test_update_refreshes_uniform() {
        let mut config = CameraConfig::default();
        config.mode = CameraMode::Fly;
        let mut rig = CameraRig::new(&config, 800, 600, Vector3::zero());

        let before = rig.uniform();
        rig.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        rig.update(0.5);
        assert_ne!(rig.uniform(), before);
    }

    #[test]
    fn test_scroll_changes_fly_speed() {
        let mut config = CameraConfig::default();
        config.mode = CameraMode::Fly;
        let mut rig = CameraRig::new(&config, 800, 600, Vector3::zero());

        rig.process_scroll(&MouseScrollDelta::LineDelta(0.0, 2.0));
        match &rig {
            CameraRig::Fly { camera, .. } => assert!(camera.movement_speed > config.fly.movement_speed),
            CameraRig::Orbit { .. } => panic!("expected fly rig"),
        }
    }
}
