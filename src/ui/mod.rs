//! # User Interface Module
//!
//! Dear ImGui overlay drawn after the scene.
//!
//! - [`UiManager`] - ImGui integration with winit and wgpu
//! - [`organisation_panel`] - organisation list and details of the selection
//! - [`controls_help`] - help line for the active camera
//!
//! When the UI wants the mouse or keyboard, [`PlanetariumApp`] keeps the
//! event away from the camera and from picking.
//!
//! [`PlanetariumApp`]: crate::app::PlanetariumApp

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::{controls_help, organisation_panel};
