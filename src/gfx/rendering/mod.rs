// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Handles render pipelines, the planet and backdrop passes, and frame rendering.

pub mod backdrop;
pub mod pipeline_manager;
pub mod planet_renderer;
pub mod render_engine;

// Re-export main types
pub use backdrop::{SkyboxRenderer, StarfieldRenderer};
pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use planet_renderer::{PlanetRenderer, SphereMesh};
pub use render_engine::{FrameStatus, RenderEngine};
