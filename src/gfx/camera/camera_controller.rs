use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta},
    keyboard::KeyCode,
};

use super::orbit_camera::OrbitCamera;
use crate::config::OrbitSettings;

/// Mouse and keyboard input for the orbit camera.
///
/// Left drag rotates, Shift + left drag or right drag pans, the wheel zooms
/// and Shift + C resets the view.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    is_shift_held: bool,
    is_left_pressed: bool,
    is_right_pressed: bool,
}

impl CameraController {
    pub fn new(settings: &OrbitSettings) -> Self {
        Self {
            rotate_speed: settings.rotate_speed,
            zoom_speed: settings.zoom_speed,
            pan_speed: settings.pan_speed,
            is_shift_held: false,
            is_left_pressed: false,
            is_right_pressed: false,
        }
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match button {
            MouseButton::Left => self.is_left_pressed = pressed,
            MouseButton::Right => self.is_right_pressed = pressed,
            _ => (),
        }
    }

    pub fn process_mouse_motion(&mut self, delta: (f64, f64), camera: &mut OrbitCamera) -> bool {
        if self.is_panning() {
            camera.pan((
                -delta.0 as f32 * self.pan_speed,
                delta.1 as f32 * self.pan_speed,
            ));
            true
        } else if self.is_rotating() {
            camera.add_azimuth(-delta.0 as f32 * self.rotate_speed);
            camera.add_polar(-delta.1 as f32 * self.rotate_speed);
            true
        } else {
            false
        }
    }

    pub fn process_scroll(&mut self, delta: &MouseScrollDelta, camera: &mut OrbitCamera) {
        let scroll_amount = -match delta {
            MouseScrollDelta::LineDelta(_, scroll) => *scroll,
            MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                *scroll as f32 / 50.0
            }
        };
        camera.add_distance(scroll_amount * self.zoom_speed);
    }

    /// Returns true when the key was handled.
    pub fn process_keyboard(
        &mut self,
        key: KeyCode,
        state: ElementState,
        camera: &mut OrbitCamera,
    ) -> bool {
        match key {
            KeyCode::ShiftLeft | KeyCode::ShiftRight => {
                self.is_shift_held = state == ElementState::Pressed;
                true
            }
            KeyCode::KeyC if state == ElementState::Pressed && self.is_shift_held => {
                log::debug!("Resetting orbit camera");
                camera.reset_to_default();
                true
            }
            _ => false,
        }
    }

    pub fn is_panning(&self) -> bool {
        self.is_right_pressed || (self.is_left_pressed && self.is_shift_held)
    }

    pub fn is_rotating(&self) -> bool {
        self.is_left_pressed && !self.is_shift_held
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;
    use crate::gfx::camera::{Camera, Projection};
    use cgmath::{InnerSpace, Vector3, Zero};

    fn setup() -> (CameraController, OrbitCamera) {
        let config = CameraConfig::default();
        let camera = OrbitCamera::new(
            &config.orbit,
            Projection::new(&config, 800, 600),
            Vector3::zero(),
        );
        (CameraController::new(&config.orbit), camera)
    }

    #[test]
    fn test_motion_without_button_is_ignored() {
        let (mut controller, mut camera) = setup();
        assert!(!controller.process_mouse_motion((10.0, 5.0), &mut camera));
        assert!(camera.is_at_rest());
    }

    #[test]
    fn test_left_drag_rotates() {
        let (mut controller, mut camera) = setup();
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(controller.is_rotating());
        assert!(controller.process_mouse_motion((20.0, 0.0), &mut camera));

        let azimuth = camera.azimuth;
        camera.update(0.016);
        assert!(camera.azimuth < azimuth);
        assert!(camera.target.is_zero());
    }

    #[test]
    fn test_shift_drag_pans() {
        let (mut controller, mut camera) = setup();
        controller.process_keyboard(KeyCode::ShiftLeft, ElementState::Pressed, &mut camera);
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(controller.is_panning());

        controller.process_mouse_motion((50.0, 0.0), &mut camera);
        camera.update(0.016);
        assert!(camera.target.magnitude() > 0.0);
    }

    #[test]
    fn test_scroll_zooms_in() {
        let (mut controller, mut camera) = setup();
        let distance = camera.distance;
        controller.process_scroll(&MouseScrollDelta::LineDelta(0.0, 1.0), &mut camera);
        camera.update(0.016);
        assert!(camera.distance < distance);
    }

    #[test]
    fn test_shift_c_resets() {
        let (mut controller, mut camera) = setup();
        let home = camera.eye();
        camera.add_azimuth(1.0);
        camera.update(0.016);

        assert!(!controller.process_keyboard(KeyCode::KeyC, ElementState::Pressed, &mut camera));
        controller.process_keyboard(KeyCode::ShiftRight, ElementState::Pressed, &mut camera);
        assert!(controller.process_keyboard(KeyCode::KeyC, ElementState::Pressed, &mut camera));
        assert!((camera.eye() - home).magnitude() < 1e-5);
    }
}
