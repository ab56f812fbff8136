use cgmath::{Matrix4, SquareMatrix, Vector3};

use super::{planet::Planet, vertex::PlanetInstance};
use crate::{
    config::{Config, LightingConfig, MaterialConfig, SceneConfig},
    gfx::camera::{CameraRig, CameraUniform},
    layout::PlanetPlacement,
};

/// Main scene: planets, lights, backdrop flags and the active camera
pub struct Scene {
    pub camera_rig: CameraRig,
    pub planets: Vec<Planet>,
    pub lighting: LightingConfig,
    pub material: MaterialConfig,
    pub backdrop: SceneConfig,
    selection: Option<usize>,
    instances_dirty: bool,
}

/// Summary shown in the UI and logged at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStatistics {
    pub planet_count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Axis-aligned box enclosing every sphere, `None` for an empty scene.
    pub extent: Option<(Vector3<f32>, Vector3<f32>)>,
}

impl Scene {
    /// Builds one planet per placement, index-aligned with the organisations.
    pub fn from_placements(
        config: &Config,
        placements: &[PlanetPlacement],
        width: u32,
        height: u32,
    ) -> Self {
        let planets = placements
            .iter()
            .enumerate()
            .map(|(index, placement)| Planet::new(index, placement, config.material.color))
            .collect();

        let target = config.layout.bounds.center();
        let mut camera_rig = CameraRig::new(&config.camera, width, height, target);
        camera_rig.update(0.0);

        Self {
            camera_rig,
            planets,
            lighting: config.lighting.clone(),
            material: config.material.clone(),
            backdrop: config.scene.clone(),
            selection: None,
            instances_dirty: true,
        }
    }

    /// Advances the camera by `dt` seconds and refreshes its uniform.
    pub fn update(&mut self, dt: f32) {
        self.camera_rig.update(dt);
    }

    pub fn camera_uniform(&self) -> CameraUniform {
        self.camera_rig.uniform()
    }

    pub fn inverse_view_proj(&self) -> Matrix4<f32> {
        Matrix4::from(self.camera_uniform().view_proj)
            .invert()
            .unwrap_or_else(Matrix4::identity)
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// Selects the planet at `index`; out-of-range indices clear the selection.
    pub fn select(&mut self, index: Option<usize>) {
        let index = index.filter(|&i| i < self.planets.len());
        if index != self.selection {
            log::debug!("Selection changed: {:?} -> {:?}", self.selection, index);
            self.selection = index;
            self.instances_dirty = true;
        }
    }

    pub fn instances(&self) -> Vec<PlanetInstance> {
        self.planets
            .iter()
            .enumerate()
            .map(|(index, planet)| {
                let highlight =
                    (self.selection == Some(index)).then_some(self.material.highlight_color);
                planet.instance(highlight)
            })
            .collect()
    }

    /// Returns whether instance data changed since the last call.
    pub fn take_instances_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.instances_dirty, false)
    }

    pub fn statistics(&self) -> SceneStatistics {
        let min_radius = self
            .planets
            .iter()
            .map(|p| p.radius)
            .fold(f32::INFINITY, f32::min);
        let max_radius = self
            .planets
            .iter()
            .map(|p| p.radius)
            .fold(f32::NEG_INFINITY, f32::max);

        let extent = self.planets.iter().fold(None, |extent, planet| {
            let r = Vector3::new(planet.radius, planet.radius, planet.radius);
            let (lo, hi) = (planet.position - r, planet.position + r);
            Some(match extent {
                None => (lo, hi),
                Some((min, max)) => (component_min(min, lo), component_max(max, hi)),
            })
        });

        SceneStatistics {
            planet_count: self.planets.len(),
            min_radius: if self.planets.is_empty() { 0.0 } else { min_radius },
            max_radius: if self.planets.is_empty() { 0.0 } else { max_radius },
            extent,
        }
    }
}

fn component_min(a: Vector3<f32>, b: Vector3<f32>) -> Vector3<f32> {
    Vector3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z))
}

fn component_max(a: Vector3<f32>, b: Vector3<f32>) -> Vector3<f32> {
    Vector3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placements() -> Vec<PlanetPlacement> {
        vec![
            PlanetPlacement {
                position: Vector3::new(0.0, 0.0, 0.0),
                radius: 1.0,
            },
            PlanetPlacement {
                position: Vector3::new(5.0, -2.0, 1.0),
                radius: 0.5,
            },
            PlanetPlacement {
                position: Vector3::new(-3.0, 4.0, 0.0),
                radius: 2.0,
            },
        ]
    }

    fn scene() -> Scene {
        Scene::from_placements(&Config::default(), &placements(), 800, 600)
    }

    #[test]
    fn test_planets_index_aligned() {
        let scene = scene();
        assert_eq!(scene.planets.len(), 3);
        for (index, planet) in scene.planets.iter().enumerate() {
            assert_eq!(planet.organisation, index);
        }
        assert_eq!(scene.planets[2].radius, 2.0);
    }

    #[test]
    fn test_statistics() {
        let stats = scene().statistics();
        assert_eq!(stats.planet_count, 3);
        assert_eq!(stats.min_radius, 0.5);
        assert_eq!(stats.max_radius, 2.0);

        let (min, max) = stats.extent.unwrap();
        assert_eq!(min, Vector3::new(-5.0, -2.5, -2.0));
        assert_eq!(max, Vector3::new(5.5, 6.0, 2.0));
    }

    #[test]
    fn test_empty_scene_statistics() {
        let scene = Scene::from_placements(&Config::default(), &[], 800, 600);
        let stats = scene.statistics();
        assert_eq!(stats.planet_count, 0);
        assert_eq!(stats.min_radius, 0.0);
        assert!(stats.extent.is_none());
        assert!(scene.instances().is_empty());
    }

    #[test]
    fn test_selection_highlights_one_instance() {
        let mut scene = scene();
        assert!(scene.take_instances_dirty());
        assert!(!scene.take_instances_dirty());

        scene.select(Some(1));
        assert!(scene.take_instances_dirty());
        let instances = scene.instances();
        assert_eq!(instances[1].color[3], 1.0);
        assert_eq!(instances[0].color[3], 0.0);
        assert_eq!(instances[2].color[3], 0.0);

        scene.select(Some(99));
        assert_eq!(scene.selection(), None);
    }

    #[test]
    fn test_update_moves_fly_camera() {
        let mut config = Config::default();
        config.camera.mode = crate::config::CameraMode::Fly;
        let mut scene = Scene::from_placements(&config, &placements(), 800, 600);

        let before = scene.camera_uniform();
        scene
            .camera_rig
            .process_keyboard(winit::keyboard::KeyCode::KeyW, winit::event::ElementState::Pressed);
        scene.update(0.1);
        assert_ne!(scene.camera_uniform(), before);
    }
}
