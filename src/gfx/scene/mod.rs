//! # Scene Management Module
//!
//! The scene holds what is drawn each frame: one [`Planet`] per organisation,
//! the lighting and material settings, the backdrop flags and the active
//! [`CameraRig`](crate::gfx::camera::CameraRig). It has no GPU state; the
//! render engine reads it through [`Scene::instances`] and the camera uniform.

pub mod planet;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use planet::Planet;
pub use scene::{Scene, SceneStatistics};
pub use vertex::{PlanetInstance, Vertex3D};
