//! # Configuration
//!
//! All runtime settings live in one [`Config`] value, loaded from TOML, taken
//! from a [`Preset`], or both (a file is layered over a preset's defaults by
//! the binary). Every section uses `#[serde(default)]`, so a config file only
//! has to mention the values it changes.
//!
//! ```toml
//! [source]
//! endpoint = "https://example.org/graphql"
//! limit = 25
//!
//! [layout.radius]
//! kind = "quadratic"
//! multiplier = 4.0
//! minimum = 0.2
//!
//! [camera]
//! mode = "fly"
//! ```

pub mod camera;
pub mod preset;
pub mod render;

pub use camera::{CameraConfig, CameraMode, FlySettings, OrbitSettings};
pub use preset::Preset;
pub use render::{LightingConfig, MaterialConfig, SceneConfig, WindowConfig};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::SourceConfig;
use crate::error::ConfigError;
use crate::layout::LayoutConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub layout: LayoutConfig,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub material: MaterialConfig,
    pub scene: SceneConfig,
    pub window: WindowConfig,
}

/// Command-line values that take precedence over the loaded config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub limit: Option<u32>,
    pub file: Option<PathBuf>,
    pub camera: Option<CameraMode>,
    pub seed: Option<u64>,
}

impl Config {
    /// Reads a TOML file. Missing fields fall back to [`Config::default`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reads a TOML file over the defaults of `preset`.
    ///
    /// Values present in the file replace the preset's; everything else keeps
    /// the preset value.
    pub fn load_with_preset(path: impl AsRef<Path>, preset: Preset) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut merged = toml::Value::try_from(preset.config())?;
        let overlay: toml::Value = toml::from_str(&text)?;
        merge_toml(&mut merged, overlay);

        let config: Config = merged.try_into()?;
        log::info!(
            "Loaded config from {} over preset '{}'",
            path.display(),
            preset.name()
        );
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_toml()?).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(endpoint) = &overrides.endpoint {
            self.source.endpoint = endpoint.clone();
        }
        if let Some(limit) = overrides.limit {
            self.source.limit = limit;
        }
        if let Some(file) = &overrides.file {
            self.source.file = Some(file.clone());
        }
        if let Some(mode) = overrides.camera {
            self.camera.mode = mode;
        }
        if let Some(seed) = overrides.seed {
            self.layout.seed = Some(seed);
        }
    }

    /// Checks cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.source
            .validate()
            .and_then(|_| self.layout.validate())
            .and_then(|_| self.camera.validate())
            .and_then(|_| self.lighting.validate())
            .and_then(|_| self.material.validate())
            .and_then(|_| self.scene.validate())
            .and_then(|_| self.window.validate())
            .map_err(ConfigError::Invalid)
    }
}

// Tables merge key by key; any other value in `overlay` replaces the base.
fn merge_toml(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::RadiusFormula;
    use std::io::Write;

    #[test]
    fn test_defaults_validate() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml(
            r#"
            [source]
            limit = 42

            [camera]
            mode = "fly"
            "#,
        )
        .unwrap();

        assert_eq!(config.source.limit, 42);
        assert_eq!(config.source.endpoint, SourceConfig::default().endpoint);
        assert_eq!(config.camera.mode, CameraMode::Fly);
        assert_eq!(config.camera.fov_deg, 75.0);
        assert_eq!(config.material.shininess, 30.0);
    }

    #[test]
    fn test_radius_formula_from_toml() {
        let config = Config::from_toml(
            r#"
            [layout.radius]
            kind = "linear"
            multiplier = 1.5
            "#,
        )
        .unwrap();
        assert_eq!(
            config.layout.radius,
            RadiusFormula::Linear { multiplier: 1.5 }
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[window]\nwidth = 640\nheight = 480").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 480);
        assert!(config.window.vsync);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Config::load("/no/such/planetarium.toml"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[source\nlimit = ").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_file_layers_over_preset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[source]\nlimit = 7").unwrap();

        let config = Config::load_with_preset(file.path(), Preset::Galaxy).unwrap();
        assert_eq!(config.source.limit, 7);
        assert_eq!(config.camera.mode, CameraMode::Fly);
        assert!(config.scene.skybox);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planetarium.toml");

        let mut config = Preset::Planets.config();
        config.layout.seed = Some(7);
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = Preset::Nodes.config();
        config.apply_overrides(&Overrides {
            endpoint: Some("http://example.org/graphql".to_string()),
            limit: Some(3),
            file: Some(PathBuf::from("orgs.json")),
            camera: Some(CameraMode::Fly),
            seed: Some(11),
        });

        assert_eq!(config.source.endpoint, "http://example.org/graphql");
        assert_eq!(config.source.limit, 3);
        assert_eq!(config.source.file, Some(PathBuf::from("orgs.json")));
        assert_eq!(config.camera.mode, CameraMode::Fly);
        assert_eq!(config.layout.seed, Some(11));

        let mut untouched = Preset::Nodes.config();
        untouched.apply_overrides(&Overrides::default());
        assert_eq!(untouched, Preset::Nodes.config());
    }

    #[test]
    fn test_validate_rejects_invalid_values() {
        let mut zero_limit = Config::default();
        zero_limit.source.limit = 0;
        assert!(matches!(zero_limit.validate(), Err(ConfigError::Invalid(_))));

        let mut inverted = Config::default();
        inverted.layout.bounds.min = [5.0, 0.0, 0.0];
        inverted.layout.bounds.max = [1.0, 1.0, 1.0];
        assert!(inverted.validate().is_err());

        let mut negative = Config::default();
        negative.layout.radius = RadiusFormula::Quadratic {
            multiplier: -1.0,
            minimum: 0.0,
        };
        assert!(negative.validate().is_err());

        let mut no_window = Config::default();
        no_window.window.width = 0;
        assert!(no_window.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan_from_toml() {
        for text in [
            "[camera.orbit]\nmax_distance = nan",
            "[camera]\nnear = nan",
            "[lighting]\nlight_intensity = nan",
            "[material]\nshininess = nan",
            "[camera.orbit]\nmin_polar_angle = 0.0\nmax_polar_angle = 0.0",
        ] {
            let config = Config::from_toml(text).unwrap();
            assert!(
                matches!(config.validate(), Err(ConfigError::Invalid(_))),
                "{text:?} should not validate"
            );
        }
    }
}
