//! Named configurations, one per scene variant.

use serde::{Deserialize, Serialize};

use super::{CameraMode, Config};
use crate::layout::{Bounds, RadiusFormula};

/// Built-in scene variants. They differ in query size, camera rig, radius
/// formula and backdrop; everything else comes from [`Config::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Ten nodes, orbit camera, radius linear in score, plain background.
    Nodes,
    /// Twenty-five planets, orbit camera, quadratic radius, starfield.
    Planets,
    /// A hundred planets spread wide, fly camera, starfield and skybox.
    Galaxy,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Nodes, Preset::Planets, Preset::Galaxy];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Nodes => "nodes",
            Preset::Planets => "planets",
            Preset::Galaxy => "galaxy",
        }
    }

    pub fn config(self) -> Config {
        let mut config = Config::default();

        match self {
            Preset::Nodes => {
                config.source.limit = 10;
                config.camera.mode = CameraMode::Orbit;
                config.layout.bounds = Bounds::cube(10.0);
                config.layout.radius = RadiusFormula::Linear { multiplier: 2.0 };
            }
            Preset::Planets => {
                config.source.limit = 25;
                config.camera.mode = CameraMode::Orbit;
                config.layout.bounds = Bounds::cube(20.0);
                config.layout.radius = RadiusFormula::Quadratic {
                    multiplier: 4.0,
                    minimum: 0.2,
                };
                config.scene.starfield = true;
            }
            Preset::Galaxy => {
                config.source.limit = 100;
                config.camera.mode = CameraMode::Fly;
                config.camera.fly.start = [0.0, 0.0, 150.0];
                config.layout.bounds = Bounds::cube(100.0);
                config.layout.radius = RadiusFormula::Quadratic {
                    multiplier: 8.0,
                    minimum: 0.5,
                };
                config.lighting.light_position = [0.0, 0.0, 0.0];
                config.lighting.light_range = 0.0;
                config.scene.starfield = true;
                config.scene.skybox = true;
            }
        }

        config
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
                format!("unknown preset '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for preset in Preset::ALL {
            assert!(
                preset.config().validate().is_ok(),
                "preset {} failed validation",
                preset.name()
            );
        }
    }

    #[test]
    fn test_presets_differ_as_documented() {
        let nodes = Preset::Nodes.config();
        let planets = Preset::Planets.config();
        let galaxy = Preset::Galaxy.config();

        assert!(matches!(nodes.layout.radius, RadiusFormula::Linear { .. }));
        assert!(matches!(planets.layout.radius, RadiusFormula::Quadratic { .. }));
        assert!(!nodes.scene.starfield && !nodes.scene.skybox);
        assert!(planets.scene.starfield && !planets.scene.skybox);
        assert!(galaxy.scene.starfield && galaxy.scene.skybox);
        assert_eq!(galaxy.camera.mode, CameraMode::Fly);
        assert!(nodes.source.limit < planets.source.limit);
        assert!(planets.source.limit < galaxy.source.limit);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Galaxy".parse::<Preset>().unwrap(), Preset::Galaxy);
        assert!("nebula".parse::<Preset>().is_err());
    }
}
