//! Lighting, material, backdrop and window settings.

use serde::{Deserialize, Serialize};

/// Ambient + single point light (`[lighting]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub light_position: [f32; 3],
    pub light_color: [f32; 3],
    pub light_intensity: f32,
    /// Distance at which the point light fades out; 0 means no falloff.
    pub light_range: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 0.1,
            light_position: [50.0, 50.0, 50.0],
            light_color: [1.0, 1.0, 1.0],
            light_intensity: 1.0,
            light_range: 100.0,
        }
    }
}

/// Phong material shared by every planet (`[material]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    pub color: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
    /// Tint applied to the selected planet.
    pub highlight_color: [f32; 3],
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            specular: [1.0, 1.0, 1.0],
            shininess: 30.0,
            highlight_color: [1.0, 0.6, 0.1],
        }
    }
}

/// Backdrop settings (`[scene]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub starfield: bool,
    pub star_count: u32,
    pub skybox: bool,
    pub sky_zenith: [f32; 3],
    pub sky_horizon: [f32; 3],
    pub clear_color: [f32; 3],
    /// Longitude/latitude segments of the planet mesh.
    pub sphere_segments: [u32; 2],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            starfield: false,
            star_count: 2000,
            skybox: false,
            sky_zenith: [0.01, 0.01, 0.05],
            sky_horizon: [0.08, 0.05, 0.15],
            clear_color: [0.0, 0.0, 0.0],
            sphere_segments: [32, 16],
        }
    }
}

/// Window settings (`[window]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    /// Show the organisation list and frame statistics.
    pub show_ui: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Planetarium".to_string(),
            width: 1200,
            height: 800,
            vsync: true,
            show_ui: true,
        }
    }
}

fn ensure_finite(name: &str, values: &[f32]) -> Result<(), String> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(value) => Err(format!("{name} must be finite, got {value}")),
        None => Ok(()),
    }
}

impl LightingConfig {
    pub fn validate(&self) -> Result<(), String> {
        ensure_finite("lighting.ambient_color", &self.ambient_color)?;
        ensure_finite("lighting.light_position", &self.light_position)?;
        ensure_finite("lighting.light_color", &self.light_color)?;
        ensure_finite(
            "lighting intensities",
            &[self.ambient_intensity, self.light_intensity, self.light_range],
        )?;
        if self.ambient_intensity < 0.0 || self.light_intensity < 0.0 {
            return Err("lighting intensities must be >= 0".to_string());
        }
        if self.light_range < 0.0 {
            return Err("lighting.light_range must be >= 0".to_string());
        }
        Ok(())
    }
}

impl MaterialConfig {
    pub fn validate(&self) -> Result<(), String> {
        ensure_finite("material.color", &self.color)?;
        ensure_finite("material.specular", &self.specular)?;
        ensure_finite("material.highlight_color", &self.highlight_color)?;
        ensure_finite("material.shininess", &[self.shininess])?;
        if self.shininess <= 0.0 {
            return Err(format!(
                "material.shininess must be > 0, got {}",
                self.shininess
            ));
        }
        Ok(())
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), String> {
        ensure_finite("scene.sky_zenith", &self.sky_zenith)?;
        ensure_finite("scene.sky_horizon", &self.sky_horizon)?;
        ensure_finite("scene.clear_color", &self.clear_color)?;
        if self.starfield && self.star_count == 0 {
            return Err("scene.star_count must be > 0 when the starfield is enabled".to_string());
        }
        Ok(())
    }
}

impl WindowConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            ));
        }
        Ok(())
    }
}
