//! # Planetarium Prelude
//!
//! Commonly used types in one import.
//!
//! ```no_run
//! use planetarium::prelude::*;
//!
//! fn main() -> Result<(), PlanetariumError> {
//!     let config = Preset::Planets.config();
//!     let organisations = fetch_organisations(&config.source)?;
//!     let placements = Placer::new(&config.layout).place_all(&organisations);
//!     PlanetariumApp::new(&config, organisations, &placements).run()
//! }
//! ```

// Core application types
pub use crate::app::PlanetariumApp;
pub use crate::error::{ConfigError, DataError, PlanetariumError, RenderError};

// Configuration
pub use crate::config::{CameraMode, Config, Overrides, Preset};

// Data and layout
pub use crate::data::{fetch_organisations, Organisation, SourceConfig};
pub use crate::layout::{Bounds, LayoutConfig, Placer, PlanetPlacement, RadiusFormula};

// Graphics and scene types
pub use crate::gfx::camera::{Camera, CameraRig};
pub use crate::gfx::picking::{pick_planet, PickResult, Ray};
pub use crate::gfx::scene::{Planet, Scene, SceneStatistics};
pub use crate::gfx::RenderEngine;

// Performance monitoring
pub use crate::performance::{PerformanceMetrics, PerformanceMonitor};

pub use cgmath::Vector3;
