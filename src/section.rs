//! Cross-section shapes and the properties the solver reads from them.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::MemberPropertyError;

/// Geometric description of a member cross-section. Dimensions are in metres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Shape {
    /// Thin-walled circular tube.
    Pipe {
        /// Outer radius.
        outer_radius: f64,
        /// Wall thickness.
        thickness: f64,
    },
    /// Solid circular rod.
    Bar {
        /// Radius.
        radius: f64,
    },
    /// Solid rectangle.
    Square {
        /// Width.
        width: f64,
        /// Height.
        height: f64,
    },
    /// Hollow rectangular tube.
    Box {
        /// Outer width.
        width: f64,
        /// Outer height.
        height: f64,
        /// Wall thickness.
        thickness: f64,
    },
    /// Section given directly by its area and minimum moment of inertia.
    Custom {
        /// Cross-sectional area in square metres.
        area: f64,
        /// Minimum second moment of area in metres to the fourth.
        moment_of_inertia: f64,
    },
}

impl Shape {
    /// Cross-sectional area in square metres.
    #[must_use]
    pub fn area(&self) -> f64 {
        match *self {
            Self::Pipe {
                outer_radius,
                thickness,
            } => PI * (outer_radius.powi(2) - (outer_radius - thickness).powi(2)),
            Self::Bar { radius } => PI * radius.powi(2),
            Self::Square { width, height } => width * height,
            Self::Box {
                width,
                height,
                thickness,
            } => width * height - (width - 2.0 * thickness) * (height - 2.0 * thickness),
            Self::Custom { area, .. } => area,
        }
    }

    /// Second moment of area about the weaker axis, which governs buckling.
    #[must_use]
    pub fn moment_of_inertia(&self) -> f64 {
        match *self {
            Self::Pipe {
                outer_radius,
                thickness,
            } => PI / 4.0 * (outer_radius.powi(4) - (outer_radius - thickness).powi(4)),
            Self::Bar { radius } => PI / 4.0 * radius.powi(4),
            Self::Square { width, height } => {
                let (long, short) = long_and_short(width, height);
                long * short.powi(3) / 12.0
            }
            Self::Box {
                width,
                height,
                thickness,
            } => {
                let (long, short) = long_and_short(width, height);
                (long * short.powi(3)
                    - (long - 2.0 * thickness) * (short - 2.0 * thickness).powi(3))
                    / 12.0
            }
            Self::Custom {
                moment_of_inertia, ..
            } => moment_of_inertia,
        }
    }

    /// Check the raw dimensions before any property is derived from them.
    fn validate(&self) -> Result<(), MemberPropertyError> {
        match *self {
            Self::Pipe {
                outer_radius,
                thickness,
            } => {
                positive(outer_radius, MemberPropertyError::NonPositiveArea)?;
                if !(thickness > 0.0 && thickness <= outer_radius) {
                    return Err(MemberPropertyError::WallTooThick { thickness });
                }
            }
            Self::Bar { radius } => positive(radius, MemberPropertyError::NonPositiveArea)?,
            Self::Square { width, height } => {
                positive(width, MemberPropertyError::NonPositiveArea)?;
                positive(height, MemberPropertyError::NonPositiveArea)?;
            }
            Self::Box {
                width,
                height,
                thickness,
            } => {
                positive(width, MemberPropertyError::NonPositiveArea)?;
                positive(height, MemberPropertyError::NonPositiveArea)?;
                if !(thickness > 0.0 && 2.0 * thickness <= width.min(height)) {
                    return Err(MemberPropertyError::WallTooThick { thickness });
                }
            }
            Self::Custom { .. } => {}
        }
        Ok(())
    }
}

/// Order two dimensions as `(longer, shorter)`.
fn long_and_short(a: f64, b: f64) -> (f64, f64) {
    if a >= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Map a non-positive or non-finite value to `error`.
fn positive(value: f64, error: fn(f64) -> MemberPropertyError) -> Result<(), MemberPropertyError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(error(value))
    }
}

/// Section properties consumed by the stiffness, mass and buckling calculations.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Shape", into = "Shape")]
pub struct CrossSection {
    /// Shape the properties were derived from.
    shape: Shape,
    /// Area in square metres.
    area: f64,
    /// Minimum second moment of area in metres to the fourth.
    moment_of_inertia: f64,
}

impl CrossSection {
    /// Derive section properties from a shape.
    ///
    /// # Errors
    ///
    /// Returns a [`MemberPropertyError`] when a dimension, the resulting area or the
    /// moment of inertia is not strictly positive.
    ///
    /// # Examples
    /// ```
    /// use trussfos::{CrossSection, Shape};
    ///
    /// let section = CrossSection::new(Shape::Square { width: 0.02, height: 0.01 }).unwrap();
    /// assert!((section.area() - 2.0e-4).abs() < 1.0e-12);
    /// ```
    pub fn new(shape: Shape) -> Result<Self, MemberPropertyError> {
        shape.validate()?;
        let area = shape.area();
        let moment_of_inertia = shape.moment_of_inertia();
        positive(area, MemberPropertyError::NonPositiveArea)?;
        positive(
            moment_of_inertia,
            MemberPropertyError::NonPositiveMomentOfInertia,
        )?;
        Ok(Self {
            shape,
            area,
            moment_of_inertia,
        })
    }

    /// Build a section from its area and minimum moment of inertia.
    ///
    /// # Errors
    ///
    /// Returns a [`MemberPropertyError`] when either value is not strictly positive.
    pub fn custom(area: f64, moment_of_inertia: f64) -> Result<Self, MemberPropertyError> {
        Self::new(Shape::Custom {
            area,
            moment_of_inertia,
        })
    }

    /// Shape the section was built from.
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Cross-sectional area in square metres.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Minimum second moment of area in metres to the fourth.
    #[must_use]
    pub fn moment_of_inertia(&self) -> f64 {
        self.moment_of_inertia
    }

    /// Radius of gyration about the weak axis, `sqrt(I / A)`.
    #[must_use]
    pub fn radius_of_gyration(&self) -> f64 {
        (self.moment_of_inertia / self.area).sqrt()
    }
}

impl Default for CrossSection {
    /// A 20 mm radius pipe with a 2 mm wall.
    fn default() -> Self {
        let shape = Shape::Pipe {
            outer_radius: 0.02,
            thickness: 0.002,
        };
        Self {
            shape,
            area: shape.area(),
            moment_of_inertia: shape.moment_of_inertia(),
        }
    }
}

impl TryFrom<Shape> for CrossSection {
    type Error = MemberPropertyError;

    fn try_from(shape: Shape) -> Result<Self, Self::Error> {
        Self::new(shape)
    }
}

impl From<CrossSection> for Shape {
    fn from(section: CrossSection) -> Self {
        section.shape
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn pipe_properties_match_annulus_formulas() {
        let section = CrossSection::new(Shape::Pipe {
            outer_radius: 0.05,
            thickness: 0.01,
        })
        .expect("valid pipe");
        assert_relative_eq!(section.area(), PI * (0.05_f64.powi(2) - 0.04_f64.powi(2)));
        assert_relative_eq!(
            section.moment_of_inertia(),
            PI / 4.0 * (0.05_f64.powi(4) - 0.04_f64.powi(4))
        );
    }

    #[test]
    fn rectangle_uses_weak_axis() {
        let tall = CrossSection::new(Shape::Square {
            width: 0.01,
            height: 0.04,
        })
        .expect("valid rectangle");
        let wide = CrossSection::new(Shape::Square {
            width: 0.04,
            height: 0.01,
        })
        .expect("valid rectangle");
        let expected = 0.04 * 0.01_f64.powi(3) / 12.0;
        assert_relative_eq!(tall.moment_of_inertia(), expected);
        assert_relative_eq!(wide.moment_of_inertia(), expected);
    }

    #[test]
    fn radius_of_gyration_of_bar_is_half_radius() {
        let section = CrossSection::new(Shape::Bar { radius: 0.03 }).expect("valid bar");
        assert_relative_eq!(section.radius_of_gyration(), 0.015, epsilon = 1.0e-12);
    }

    #[test]
    fn box_subtracts_hollow_core() {
        let section = CrossSection::new(Shape::Box {
            width: 0.1,
            height: 0.1,
            thickness: 0.01,
        })
        .expect("valid box");
        assert_relative_eq!(section.area(), 0.01 - 0.08 * 0.08, epsilon = 1.0e-12);
        assert_relative_eq!(
            section.moment_of_inertia(),
            (0.1_f64.powi(4) - 0.08_f64.powi(4)) / 12.0,
            epsilon = 1.0e-15
        );
    }

    #[test]
    fn invalid_dimensions_are_rejected() {
        assert_eq!(
            CrossSection::custom(0.0, 1.0e-8),
            Err(MemberPropertyError::NonPositiveArea(0.0))
        );
        assert_eq!(
            CrossSection::custom(1.0e-4, -1.0),
            Err(MemberPropertyError::NonPositiveMomentOfInertia(-1.0))
        );
        assert!(matches!(
            CrossSection::new(Shape::Pipe {
                outer_radius: 0.01,
                thickness: 0.02
            }),
            Err(MemberPropertyError::WallTooThick { .. })
        ));
    }

    #[test]
    fn default_section_is_valid() {
        let section = CrossSection::default();
        assert_eq!(CrossSection::new(section.shape()), Ok(section));
    }

    #[test]
    fn sections_deserialize_from_shapes() {
        let section: CrossSection =
            serde_json::from_str(r#"{"name": "bar", "radius": 0.01}"#).expect("valid json");
        assert_relative_eq!(section.area(), PI * 1.0e-4);
        let invalid = serde_json::from_str::<CrossSection>(r#"{"name": "bar", "radius": -1.0}"#);
        assert!(invalid.is_err());
    }
}
