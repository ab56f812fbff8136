// src/lib.rs
//! Planetarium
//!
//! Fetches organisation records from a GraphQL endpoint and renders each one as
//! a planet in a wgpu/winit 3D scene. A record's score decides the planet's
//! radius; its position is drawn uniformly inside configurable bounds.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod gfx;
pub mod layout;
pub mod performance;
pub mod prelude;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::PlanetariumApp;
pub use config::{Config, Preset};
pub use error::PlanetariumError;
