//! Axis-aligned placement bounds.

use cgmath::Vector3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive per-axis range that planet centres are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Default for Bounds {
    fn default() -> Self {
        Self::cube(20.0)
    }
}

impl Bounds {
    /// Bounds spanning `[-half_extent, half_extent]` on every axis.
    pub fn cube(half_extent: f32) -> Self {
        Self {
            min: [-half_extent; 3],
            max: [half_extent; 3],
        }
    }

    /// Draws a point uniformly inside the bounds.
    ///
    /// An axis whose `min` equals `max` always yields that value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector3<f32> {
        Vector3::new(
            sample_axis(rng, self.min[0], self.max[0]),
            sample_axis(rng, self.min[1], self.max[1]),
            sample_axis(rng, self.min[2], self.max[2]),
        )
    }

    /// Returns true when `point` lies inside the bounds (inclusive).
    pub fn contains(&self, point: Vector3<f32>) -> bool {
        let p: [f32; 3] = point.into();
        (0..3).all(|axis| p[axis] >= self.min[axis] && p[axis] <= self.max[axis])
    }

    /// Centre of the bounds.
    pub fn center(&self) -> Vector3<f32> {
        Vector3::new(
            self.min[0] * 0.5 + self.max[0] * 0.5,
            self.min[1] * 0.5 + self.max[1] * 0.5,
            self.min[2] * 0.5 + self.max[2] * 0.5,
        )
    }

    pub fn validate(&self) -> Result<(), String> {
        for axis in 0..3 {
            let (min, max) = (self.min[axis], self.max[axis]);
            if !min.is_finite() || !max.is_finite() {
                return Err(format!("bounds on axis {axis} must be finite"));
            }
            if min > max {
                return Err(format!(
                    "bounds min {min} exceeds max {max} on axis {axis}"
                ));
            }
            if !(max - min).is_finite() {
                return Err(format!("bounds span on axis {axis} overflows f32"));
            }
        }
        Ok(())
    }
}

fn sample_axis<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if min >= max {
        return min;
    }
    if !(max - min).is_finite() {
        // Span too wide for f32 arithmetic; draw in f64 instead.
        let value = rng.random_range(min as f64..=max as f64) as f32;
        return value.clamp(min, max);
    }
    rng.random_range(min..=max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_samples_stay_inside() {
        let bounds = Bounds {
            min: [-5.0, 0.0, 10.0],
            max: [5.0, 1.0, 30.0],
        };
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(bounds.contains(bounds.sample(&mut rng)));
        }
    }

    #[test]
    fn test_degenerate_axis() {
        let bounds = Bounds {
            min: [2.0, -1.0, 0.0],
            max: [2.0, 1.0, 0.0],
        };
        let mut rng = StdRng::seed_from_u64(1);
        let p = bounds.sample(&mut rng);
        assert_eq!(p.x, 2.0);
        assert_eq!(p.z, 0.0);
    }

    #[test]
    fn test_validate() {
        assert!(Bounds::default().validate().is_ok());
        let inverted = Bounds {
            min: [1.0, 0.0, 0.0],
            max: [0.0, 0.0, 0.0],
        };
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_huge_span() {
        let bounds = Bounds {
            min: [-3e38; 3],
            max: [3e38; 3],
        };
        assert!(bounds.validate().is_err());

        // Sampling stays total even when validation was skipped.
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert!(bounds.contains(bounds.sample(&mut rng)));
        }
        assert_eq!(bounds.center(), Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_center() {
        let bounds = Bounds {
            min: [0.0, -2.0, 4.0],
            max: [10.0, 2.0, 8.0],
        };
        assert_eq!(bounds.center(), Vector3::new(5.0, 0.0, 6.0));
    }
}
