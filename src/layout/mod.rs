//! # Planet Layout
//!
//! Maps organisation scores to planet placements. Radius is a deterministic
//! function of score ([`RadiusFormula`]); position is drawn uniformly inside
//! [`Bounds`]. Both are pure: the only state is the random number generator,
//! which can be seeded for reproducible scenes.
//!
//! ```rust
//! use planetarium::layout::{LayoutConfig, Placer};
//!
//! let config = LayoutConfig { seed: Some(42), ..Default::default() };
//! let mut placer = Placer::new(&config);
//! let placement = placer.place(0.8);
//! assert!(config.bounds.contains(placement.position));
//! ```

pub mod bounds;
pub mod radius;

pub use bounds::Bounds;
pub use radius::RadiusFormula;

use cgmath::Vector3;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::Organisation;

/// Placement settings (`[layout]` in the config file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LayoutConfig {
    pub bounds: Bounds,
    pub radius: RadiusFormula,
    /// Fixed seed for reproducible placement; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.bounds.validate()?;
        self.radius.validate()
    }
}

/// Where one planet sits and how large it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetPlacement {
    pub position: Vector3<f32>,
    pub radius: f32,
}

/// Stateful sampler that turns scores into placements.
pub struct Placer {
    bounds: Bounds,
    radius: RadiusFormula,
    rng: StdRng,
}

impl Placer {
    pub fn new(config: &LayoutConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            bounds: config.bounds,
            radius: config.radius,
            rng,
        }
    }

    /// Places a single planet for `score`.
    pub fn place(&mut self, score: f64) -> PlanetPlacement {
        PlanetPlacement {
            position: self.bounds.sample(&mut self.rng),
            radius: self.radius.radius(score),
        }
    }

    /// Places one planet per organisation, preserving order.
    pub fn place_all(&mut self, organisations: &[Organisation]) -> Vec<PlanetPlacement> {
        let placements: Vec<PlanetPlacement> = organisations
            .iter()
            .map(|organisation| self.place(organisation.score))
            .collect();

        log::debug!("placed {} planets", placements.len());
        placements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn organisation(name: &str, score: f64) -> Organisation {
        Organisation {
            ens_name: name.to_string(),
            score,
            ..Default::default()
        }
    }

    #[test]
    fn test_placements_within_bounds() {
        let config = LayoutConfig {
            bounds: Bounds {
                min: [-1.0, 2.0, -3.0],
                max: [1.0, 4.0, 3.0],
            },
            seed: Some(99),
            ..Default::default()
        };
        let mut placer = Placer::new(&config);

        for score in [0.0, 0.1, 0.5, 1.0, 10.0, -4.0, 1e6] {
            let placement = placer.place(score);
            assert!(config.bounds.contains(placement.position));
        }
    }

    #[test]
    fn test_radius_follows_formula() {
        let config = LayoutConfig {
            radius: RadiusFormula::Linear { multiplier: 3.0 },
            seed: Some(1),
            ..Default::default()
        };
        let mut placer = Placer::new(&config);
        assert_eq!(placer.place(2.0).radius, 6.0);
        assert_eq!(placer.place(2.0).radius, 6.0);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let config = LayoutConfig {
            seed: Some(1234),
            ..Default::default()
        };
        let organisations = vec![
            organisation("a.eth", 0.9),
            organisation("b.eth", 0.5),
            organisation("c.eth", 0.1),
        ];

        let first = Placer::new(&config).place_all(&organisations);
        let second = Placer::new(&config).place_all(&organisations);
        assert_eq!(first, second);
    }

    #[test]
    fn test_place_all_preserves_order() {
        let config = LayoutConfig {
            radius: RadiusFormula::Linear { multiplier: 1.0 },
            seed: Some(5),
            ..Default::default()
        };
        let organisations = vec![organisation("big.eth", 3.0), organisation("small.eth", 1.0)];

        let placements = Placer::new(&config).place_all(&organisations);
        assert_eq!(placements.len(), 2);
        assert_eq!(placements[0].radius, 3.0);
        assert_eq!(placements[1].radius, 1.0);
    }
}
