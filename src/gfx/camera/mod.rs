pub mod camera_controller;
pub mod camera_utils;
pub mod fly_camera;
pub mod fly_controller;
pub mod orbit_camera;
pub mod rig;

// Re-export main types
pub use camera_controller::CameraController;
pub use camera_utils::{Camera, CameraUniform, Projection};
pub use fly_camera::FlyCamera;
pub use fly_controller::FlyController;
pub use orbit_camera::OrbitCamera;
pub use rig::CameraRig;
