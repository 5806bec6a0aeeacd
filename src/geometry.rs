//! Fundamental geometric types for truss modelling and the member transform.

use nalgebra::{DMatrix, DVector, Vector3};
use petgraph::stable_graph::EdgeIndex;
use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;

/// Number of spatial axes a truss is modelled in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// Two dimensional truss in the X-Y plane.
    Planar,
    /// Three dimensional truss.
    #[default]
    Spatial,
}

impl Dimension {
    /// Number of translational degrees of freedom carried by each joint.
    #[must_use]
    pub const fn dofs_per_joint(self) -> usize {
        match self {
            Self::Planar => 2,
            Self::Spatial => 3,
        }
    }
}

/// Position in three dimensional space measured in metres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Distance along the global X axis.
    pub x: f64,
    /// Distance along the global Y axis.
    pub y: f64,
    /// Distance along the global Z axis.
    pub z: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Return true when every coordinate is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<Vector3<f64>> for Point {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<Point> for Vector3<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

/// Cartesian vector representing a three dimensional force in newtons.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Force {
    /// Force component acting along the global X axis.
    pub x: f64,
    /// Force component acting along the global Y axis.
    pub y: f64,
    /// Force component acting along the global Z axis.
    pub z: f64,
}

impl Force {
    /// Create a [`Force`] with explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert the force into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Return true when every component is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Build a force from per-DOF values, padding missing axes with zero.
    #[must_use]
    pub fn from_dofs(values: &[f64]) -> Self {
        let mut components = [0.0; 3];
        for (slot, value) in components.iter_mut().zip(values) {
            *slot = *value;
        }
        Self::new(components[0], components[1], components[2])
    }
}

impl Default for Force {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl From<Vector3<f64>> for Force {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<Force> for Vector3<f64> {
    fn from(value: Force) -> Self {
        value.to_vector()
    }
}

/// Translation vector describing joint displacement in metres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Displacement {
    /// Displacement component along the global X axis.
    pub x: f64,
    /// Displacement component along the global Y axis.
    pub y: f64,
    /// Displacement component along the global Z axis.
    pub z: f64,
}

impl Displacement {
    /// Create a [`Displacement`] with explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert the displacement into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Euclidean magnitude of the displacement.
    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.to_vector().norm()
    }

    /// Build a displacement from per-DOF values, padding missing axes with zero.
    #[must_use]
    pub fn from_dofs(values: &[f64]) -> Self {
        let mut components = [0.0; 3];
        for (slot, value) in components.iter_mut().zip(values) {
            *slot = *value;
        }
        Self::new(components[0], components[1], components[2])
    }
}

impl Default for Displacement {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl From<Vector3<f64>> for Displacement {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<Displacement> for Vector3<f64> {
    fn from(value: Displacement) -> Self {
        value.to_vector()
    }
}

/// Length and orientation of a member, derived from its two joint positions.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberGeometry {
    /// Distance between the two joints in metres.
    pub length: f64,
    /// Unit vector from the start joint to the end joint, one entry per DOF axis.
    cosines: DVector<f64>,
}

impl MemberGeometry {
    /// Measure the member running from `start` to `end`.
    ///
    /// Only the axes that belong to `dimension` take part, so a planar member
    /// ignores any Z coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::DegenerateGeometry`] when the length does not exceed
    /// `tolerance`.
    pub fn between(
        member: EdgeIndex,
        start: Point,
        end: Point,
        dimension: Dimension,
        tolerance: f64,
    ) -> Result<Self, AnalysisError> {
        let delta = end.to_vector() - start.to_vector();
        let dim = dimension.dofs_per_joint();
        let delta = DVector::from_iterator(dim, delta.iter().copied().take(dim));
        let length = delta.norm();
        if length.is_nan() || length <= tolerance {
            return Err(AnalysisError::DegenerateGeometry { member, length });
        }
        Ok(Self {
            length,
            cosines: delta / length,
        })
    }

    /// Direction cosines of the member axis.
    #[must_use]
    pub fn direction_cosines(&self) -> &DVector<f64> {
        &self.cosines
    }

    /// Transform taking the stacked global displacements of both ends
    /// (`2 * dim` entries) to the two local axial displacements.
    ///
    /// Rows are orthonormal, so the transpose carries local quantities back to
    /// global coordinates.
    #[must_use]
    pub fn transform(&self) -> DMatrix<f64> {
        let dim = self.cosines.len();
        let mut transform = DMatrix::zeros(2, 2 * dim);
        for (axis, cosine) in self.cosines.iter().enumerate() {
            transform[(0, axis)] = *cosine;
            transform[(1, dim + axis)] = *cosine;
        }
        transform
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use trussfos::point;
///
/// let origin = point(0.0, 0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64, z: f64) -> Point {
    Point::new(x, y, z)
}

/// Convenience helper for creating [`Force`] instances.
///
/// # Examples
/// ```
/// use trussfos::force;
///
/// let load = force(1.0, 0.0, -5.0);
/// assert_eq!(load.z, -5.0);
/// ```
#[must_use]
pub const fn force(x: f64, y: f64, z: f64) -> Force {
    Force::new(x, y, z)
}
