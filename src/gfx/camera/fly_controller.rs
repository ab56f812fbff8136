use winit::{
    event::{ElementState, MouseButton},
    keyboard::KeyCode,
};

use super::fly_camera::FlyCamera;

/// Keyboard and mouse input for the fly camera.
///
/// W/S move forward and back, A/D strafe, R/F rise and fall, Q/E roll and
/// the arrow keys pitch and yaw. Mouse motion looks around, either always or
/// only while the left button is held.
pub struct FlyController {
    pub drag_to_look: bool,
    is_left_pressed: bool,
}

impl FlyController {
    pub fn new(drag_to_look: bool) -> Self {
        Self {
            drag_to_look,
            is_left_pressed: false,
        }
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.is_left_pressed = state == ElementState::Pressed;
        }
    }

    pub fn process_mouse_motion(&mut self, delta: (f64, f64), camera: &mut FlyCamera) -> bool {
        if self.drag_to_look && !self.is_left_pressed {
            return false;
        }
        camera.look(delta.0 as f32, delta.1 as f32);
        true
    }

    /// Returns true when the key was handled.
    pub fn process_keyboard(
        &mut self,
        key: KeyCode,
        state: ElementState,
        camera: &mut FlyCamera,
    ) -> bool {
        let amount = if state == ElementState::Pressed { 1.0 } else { 0.0 };

        // Opposite keys overwrite each other; the last event wins.
        match key {
            KeyCode::KeyW => camera.move_state.z = amount,
            KeyCode::KeyS => camera.move_state.z = -amount,
            KeyCode::KeyD => camera.move_state.x = amount,
            KeyCode::KeyA => camera.move_state.x = -amount,
            KeyCode::KeyR => camera.move_state.y = amount,
            KeyCode::KeyF => camera.move_state.y = -amount,
            KeyCode::ArrowUp => camera.rotation_state.x = amount,
            KeyCode::ArrowDown => camera.rotation_state.x = -amount,
            KeyCode::ArrowLeft => camera.rotation_state.y = amount,
            KeyCode::ArrowRight => camera.rotation_state.y = -amount,
            KeyCode::KeyQ => camera.rotation_state.z = amount,
            KeyCode::KeyE => camera.rotation_state.z = -amount,
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;
    use crate::gfx::camera::{Camera, Projection};
    use cgmath::{EuclideanSpace, Point3, Vector3};

    fn camera() -> FlyCamera {
        let config = CameraConfig::default();
        FlyCamera::new(
            &config.fly,
            Projection::new(&config, 800, 600),
            Point3::origin(),
        )
    }

    #[test]
    fn test_w_moves_forward_until_released() {
        let mut controller = FlyController::new(true);
        let mut camera = camera();
        let start = camera.position;

        assert!(controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed, &mut camera));
        camera.update(1.0);
        assert!(camera.position.z < start.z);

        controller.process_keyboard(KeyCode::KeyW, ElementState::Released, &mut camera);
        let stopped = camera.position;
        camera.update(1.0);
        assert_eq!(camera.position, stopped);
    }

    #[test]
    fn test_unmapped_key_is_not_handled() {
        let mut controller = FlyController::new(true);
        let mut camera = camera();
        assert!(!controller.process_keyboard(KeyCode::KeyZ, ElementState::Pressed, &mut camera));
        assert_eq!(camera.move_state, Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_drag_to_look_requires_button() {
        let mut controller = FlyController::new(true);
        let mut camera = camera();
        assert!(!controller.process_mouse_motion((5.0, 5.0), &mut camera));

        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(controller.process_mouse_motion((5.0, 5.0), &mut camera));

        let mut free = FlyController::new(false);
        assert!(free.process_mouse_motion((5.0, 5.0), &mut camera));
    }
}
