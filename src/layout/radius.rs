//! Score-to-radius formulas.

use serde::{Deserialize, Serialize};

/// How a planet's radius is derived from its organisation's score.
///
/// Serialized with an internal `kind` tag:
///
/// ```toml
/// [layout.radius]
/// kind = "quadratic"
/// multiplier = 4.0
/// minimum = 0.2
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RadiusFormula {
    /// `radius = multiplier * score`
    Linear { multiplier: f32 },
    /// `radius = multiplier * score^2 + minimum`
    Quadratic { multiplier: f32, minimum: f32 },
}

impl Default for RadiusFormula {
    fn default() -> Self {
        RadiusFormula::Quadratic {
            multiplier: 4.0,
            minimum: 0.2,
        }
    }
}

impl RadiusFormula {
    /// Evaluates the formula for `score`.
    ///
    /// Negative or non-finite results map to `0.0` so a bad score produces an
    /// invisible planet rather than an inverted mesh.
    pub fn radius(&self, score: f64) -> f32 {
        let score = score as f32;
        let radius = match *self {
            RadiusFormula::Linear { multiplier } => multiplier * score,
            RadiusFormula::Quadratic {
                multiplier,
                minimum,
            } => multiplier * score * score + minimum,
        };

        if radius.is_finite() && radius > 0.0 {
            radius
        } else {
            0.0
        }
    }

    /// Checks the formula parameters, returning a description of the problem.
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            RadiusFormula::Linear { multiplier } => {
                if !multiplier.is_finite() || multiplier < 0.0 {
                    return Err(format!("radius multiplier must be >= 0, got {multiplier}"));
                }
            }
            RadiusFormula::Quadratic {
                multiplier,
                minimum,
            } => {
                if !multiplier.is_finite() || multiplier < 0.0 {
                    return Err(format!("radius multiplier must be >= 0, got {multiplier}"));
                }
                if !minimum.is_finite() || minimum < 0.0 {
                    return Err(format!("radius minimum must be >= 0, got {minimum}"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_radius() {
        let formula = RadiusFormula::Linear { multiplier: 2.5 };
        assert_eq!(formula.radius(0.0), 0.0);
        assert_eq!(formula.radius(2.0), 5.0);
    }

    #[test]
    fn test_quadratic_radius() {
        let formula = RadiusFormula::Quadratic {
            multiplier: 3.0,
            minimum: 0.5,
        };
        assert_eq!(formula.radius(0.0), 0.5);
        assert_eq!(formula.radius(2.0), 12.5);
        // Quadratic term ignores the sign of the score
        assert_eq!(formula.radius(-2.0), 12.5);
    }

    #[test]
    fn test_bad_scores_collapse_to_zero() {
        let linear = RadiusFormula::Linear { multiplier: 1.0 };
        assert_eq!(linear.radius(-3.0), 0.0);
        assert_eq!(linear.radius(f64::NAN), 0.0);
        assert_eq!(linear.radius(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_validate_rejects_negative_parameters() {
        assert!(RadiusFormula::Linear { multiplier: -1.0 }.validate().is_err());
        assert!(RadiusFormula::Quadratic {
            multiplier: 1.0,
            minimum: -0.1
        }
        .validate()
        .is_err());
        assert!(RadiusFormula::default().validate().is_ok());
    }

    #[test]
    fn test_toml_tagging() {
        #[derive(Deserialize)]
        struct Wrapper {
            radius: RadiusFormula,
        }

        let parsed: Wrapper =
            toml::from_str("[radius]\nkind = \"linear\"\nmultiplier = 1.5\n").unwrap();
        assert_eq!(parsed.radius, RadiusFormula::Linear { multiplier: 1.5 });
    }
}
