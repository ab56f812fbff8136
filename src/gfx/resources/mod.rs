// src/gfx/resources/mod.rs
//! GPU resource management

pub mod global_bindings;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{GlobalBindings, GlobalUBO, GlobalUBOContent};
pub use texture_resource::TextureResource;
