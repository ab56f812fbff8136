//! # Graphics Module
//!
//! Everything between the laid-out planets and pixels on screen.
//!
//! - **Camera System** ([`camera`]) - Orbit and fly cameras behind one rig
//! - **Geometry** ([`geometry`]) - Procedural sphere mesh and star points
//! - **Scene** ([`scene`]) - Planets, lighting, selection
//! - **Picking** ([`picking`]) - Mouse ray-casting against planets
//! - **Rendering Pipeline** ([`rendering`]) - Skybox, starfield and instanced planets
//! - **Resource Management** ([`resources`]) - Global uniforms and depth buffer
//!
//! ```no_run
//! use planetarium::gfx::{scene::Scene, RenderEngine};
//!
//! // The render engine is created by PlanetariumApp once the window exists
//! // let engine = pollster::block_on(RenderEngine::new(window, 1200, 800, true))?;
//! // engine.init_scene(&scene, 800.0, None);
//! ```

pub mod camera;
pub mod geometry;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::CameraRig;
pub use rendering::render_engine::RenderEngine;
