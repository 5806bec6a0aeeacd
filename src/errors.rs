//! Error types produced while editing, configuring or analysing trusses.

use petgraph::stable_graph::{EdgeIndex, NodeIndex};
use thiserror::Error;

/// Error returned when a truss analysis fails.
///
/// Every variant is terminal for the analysis call: no partial result is produced.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Returned when the truss is structurally malformed and assembly cannot start.
    #[error("invalid model: {0}")]
    InvalidModel(#[from] ModelError),
    /// Returned when a member spans no meaningful distance.
    #[error("member {member:?} is degenerate (length {length:e} m)")]
    DegenerateGeometry {
        /// Identifier of the offending member.
        member: EdgeIndex,
        /// Measured length in metres.
        length: f64,
    },
    /// Returned when no degree of freedom is restrained, so rigid-body motion is certain.
    #[error("no degree of freedom is restrained ({free_dofs} free); add supports")]
    UnderconstrainedModel {
        /// Number of unrestrained degrees of freedom in the model.
        free_dofs: usize,
    },
    /// Returned when the reduced stiffness matrix is singular or too ill-conditioned to trust.
    #[error("structure is unstable: {0}")]
    UnstableStructure(#[source] Instability),
}

impl AnalysisError {
    /// Return true for errors that indicate a mechanism or missing supports.
    #[must_use]
    pub fn is_instability(&self) -> bool {
        matches!(
            self,
            Self::UnderconstrainedModel { .. } | Self::UnstableStructure(_)
        )
    }
}

/// Reason a reduced stiffness matrix was rejected by the solver.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum Instability {
    /// The Cholesky factorisation broke down.
    #[error("stiffness matrix is not positive definite; check supports and connectivity")]
    NotPositiveDefinite,
    /// The estimated condition number exceeds the configured limit.
    #[error("condition number {condition_number:e} exceeds limit {limit:e}")]
    IllConditioned {
        /// Estimated condition number (infinite for a non-positive eigenvalue).
        condition_number: f64,
        /// Configured upper bound.
        limit: f64,
    },
    /// Back-substituting the solution does not reproduce the applied loads.
    #[error("relative residual {residual:e} exceeds tolerance {limit:e}")]
    ResidualTooLarge {
        /// Relative residual of the solved system.
        residual: f64,
        /// Configured upper bound.
        limit: f64,
    },
}

/// Structural defect found while validating a truss before assembly.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ModelError {
    /// Returned when the truss has no joints.
    #[error("truss has no joints")]
    Empty,
    /// Returned when a member starts and ends at the same joint.
    #[error("member {member:?} connects joint {joint:?} to itself")]
    SelfLoop {
        /// Identifier of the offending member.
        member: EdgeIndex,
        /// Joint referenced at both ends.
        joint: NodeIndex,
    },
    /// Returned when a joint position or load contains NaN or infinity.
    #[error("joint {0:?} has a non-finite position or load")]
    NonFiniteJoint(NodeIndex),
    /// Returned when a planar truss carries out-of-plane data.
    #[error("joint {0:?} has a Z coordinate or load in a planar truss")]
    OutOfPlane(NodeIndex),
    /// Returned when a member carries properties that are not physically meaningful.
    #[error("member {member:?} has invalid properties: {source}")]
    InvalidMemberProperties {
        /// Identifier of the offending member.
        member: EdgeIndex,
        /// Description of the invalid property.
        #[source]
        source: MemberPropertyError,
    },
}

/// Error returned when a material or section value is rejected.
///
/// The variants describe the reason the supplied value is rejected so callers can
/// present actionable feedback to users.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum MemberPropertyError {
    /// Returned when the cross-sectional area is zero, negative or not finite.
    #[error("area must be positive (received {0})")]
    NonPositiveArea(f64),
    /// Returned when the moment of inertia is zero, negative or not finite.
    #[error("moment of inertia must be positive (received {0})")]
    NonPositiveMomentOfInertia(f64),
    /// Returned when the elastic modulus is zero, negative or not finite.
    #[error("elastic modulus must be positive (received {0})")]
    NonPositiveElasticModulus(f64),
    /// Returned when the yield strength is zero, negative or not finite.
    #[error("yield strength must be positive (received {0})")]
    NonPositiveYieldStrength(f64),
    /// Returned when the density is zero, negative or not finite.
    #[error("density must be positive (received {0})")]
    NonPositiveDensity(f64),
    /// Returned when a hollow section's wall is too thick for its outer dimensions.
    #[error("wall thickness {thickness} does not fit inside the section")]
    WallTooThick {
        /// Rejected wall thickness in metres.
        thickness: f64,
    },
}

/// Error returned when editing a [`Truss`](crate::Truss) with invalid arguments.
///
/// Attempting to mutate the structure with a joint or member that is not part of the
/// current graph returns a descriptive variant so callers can decide how to recover.
///
/// # Examples
///
/// ```
/// use petgraph::stable_graph::EdgeIndex;
/// use trussfos::{Material, Truss, TrussEditError};
///
/// let mut truss = Truss::new();
/// let invalid_member = EdgeIndex::new(42);
/// let error = truss
///     .set_member_material(invalid_member, Material::A36_STEEL)
///     .expect_err("unknown member is rejected");
/// assert_eq!(error, TrussEditError::UnknownMember(invalid_member));
/// ```
#[derive(Debug, Error, PartialEq)]
pub enum TrussEditError {
    /// Returned when a joint cannot be found in the truss.
    #[error("joint {0:?} does not exist in this truss")]
    UnknownJoint(NodeIndex),
    /// Returned when a member cannot be found in the truss.
    #[error("member {0:?} does not exist in this truss")]
    UnknownMember(EdgeIndex),
    /// Returned when a member would connect a joint to itself.
    #[error("a member cannot connect joint {0:?} to itself")]
    SelfLoop(NodeIndex),
    /// Returned when a joint position or load is not finite.
    #[error("joint values must be finite")]
    NonFinite,
    /// Returned when the supplied member properties are invalid.
    #[error("{0}")]
    InvalidMemberProperties(#[from] MemberPropertyError),
}

/// Error returned when analysis settings or design goals cannot be parsed.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The JSON document could not be deserialised.
    #[error("could not parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// A tolerance or limit is outside its meaningful range.
    #[error("setting `{name}` must be positive and finite (received {value})")]
    OutOfRange {
        /// Name of the rejected setting.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}
