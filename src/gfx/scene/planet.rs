use cgmath::{Matrix4, Vector3};

use super::vertex::PlanetInstance;
use crate::layout::PlanetPlacement;

/// The sphere drawn for one organisation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Planet {
    /// Index into the organisation list this planet was built from.
    pub organisation: usize,
    pub position: Vector3<f32>,
    pub radius: f32,
    pub color: [f32; 3],
}

impl Planet {
    pub fn new(organisation: usize, placement: &PlanetPlacement, color: [f32; 3]) -> Self {
        Self {
            organisation,
            position: placement.position,
            radius: placement.radius,
            color,
        }
    }

    /// Translation times uniform scale; the mesh is a unit sphere.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position) * Matrix4::from_scale(self.radius)
    }

    pub fn instance(&self, highlight: Option<[f32; 3]>) -> PlanetInstance {
        let (color, glow) = match highlight {
            Some(tint) => (tint, 1.0),
            None => (self.color, 0.0),
        };

        PlanetInstance {
            model: self.model_matrix().into(),
            color: [color[0], color[1], color[2], glow],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Point3, Transform};

    fn planet() -> Planet {
        Planet::new(
            3,
            &PlanetPlacement {
                position: Vector3::new(1.0, 2.0, 3.0),
                radius: 2.0,
            },
            [1.0, 1.0, 1.0],
        )
    }

    #[test]
    fn test_model_matrix_scales_then_translates() {
        let surface = planet()
            .model_matrix()
            .transform_point(Point3::new(1.0, 0.0, 0.0));
        assert_eq!(surface, Point3::new(3.0, 2.0, 3.0));
    }

    #[test]
    fn test_highlight_replaces_colour() {
        let planet = planet();
        assert_eq!(planet.instance(None).color, [1.0, 1.0, 1.0, 0.0]);
        assert_eq!(
            planet.instance(Some([1.0, 0.5, 0.0])).color,
            [1.0, 0.5, 0.0, 1.0]
        );
    }
}
