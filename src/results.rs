//! Plain-data output of an analysis.

use petgraph::stable_graph::{EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::geometry::{Displacement, Force};
use crate::safety::{GoverningFos, LimitState};

/// Response of a single joint.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointResult {
    /// Identifier of the joint.
    pub joint: NodeIndex,
    /// Displacement in metres; zero along restrained axes.
    pub displacement: Displacement,
    /// Support reaction in newtons; zero along free axes.
    pub reaction: Force,
}

/// Response of a single member.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberResult {
    /// Identifier of the member.
    pub member: EdgeIndex,
    /// Length in metres.
    pub length: f64,
    /// Axial force in newtons, positive in tension.
    pub axial_force: f64,
    /// Axial stress in pascals, positive in tension.
    pub stress: f64,
    /// Mass in kilograms.
    pub mass: f64,
    /// Factor of safety against yielding; infinite for an unloaded member.
    #[serde(with = "crate::extended_float")]
    pub fos_yielding: f64,
    /// Factor of safety against buckling; `None` unless the member is in compression.
    pub fos_buckling: Option<f64>,
}

impl MemberResult {
    /// The smaller of the two factors of safety and the mode it belongs to.
    #[must_use]
    pub fn limiting_fos(&self) -> (f64, LimitState) {
        match self.fos_buckling {
            Some(buckling) if buckling < self.fos_yielding => (buckling, LimitState::Buckling),
            _ => (self.fos_yielding, LimitState::Yielding),
        }
    }

    /// Whether the member is in tension.
    #[must_use]
    pub fn is_tension(&self) -> bool {
        self.axial_force > 0.0
    }
}

/// Everything produced by one successful analysis.
///
/// Joints and members are listed in ascending identifier order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Per-joint displacements and reactions.
    pub joints: Vec<JointResult>,
    /// Per-member forces and factors of safety.
    pub members: Vec<MemberResult>,
    /// Total mass in kilograms.
    pub mass: f64,
    /// Smallest factor of safety and its member; `None` when there are no members.
    pub governing: Option<GoverningFos>,
    /// Condition number of the reduced stiffness matrix.
    pub condition_number: f64,
}

impl AnalysisResult {
    /// Result for a joint.
    #[must_use]
    pub fn joint(&self, joint: NodeIndex) -> Option<&JointResult> {
        self.joints.iter().find(|result| result.joint == joint)
    }

    /// Result for a member.
    #[must_use]
    pub fn member(&self, member: EdgeIndex) -> Option<&MemberResult> {
        self.members.iter().find(|result| result.member == member)
    }

    /// Displacement of a joint.
    #[must_use]
    pub fn joint_displacement(&self, joint: NodeIndex) -> Option<Displacement> {
        self.joint(joint).map(|result| result.displacement)
    }

    /// Reaction at a joint.
    #[must_use]
    pub fn joint_reaction(&self, joint: NodeIndex) -> Option<Force> {
        self.joint(joint).map(|result| result.reaction)
    }

    /// Axial force in a member.
    #[must_use]
    pub fn member_axial_force(&self, member: EdgeIndex) -> Option<f64> {
        self.member(member).map(|result| result.axial_force)
    }

    /// Axial stress in a member.
    #[must_use]
    pub fn member_stress(&self, member: EdgeIndex) -> Option<f64> {
        self.member(member).map(|result| result.stress)
    }

    /// Yield factor of safety of a member.
    #[must_use]
    pub fn member_fos_yielding(&self, member: EdgeIndex) -> Option<f64> {
        self.member(member).map(|result| result.fos_yielding)
    }

    /// Buckling factor of safety of a member, `None` when missing or not in compression.
    #[must_use]
    pub fn member_fos_buckling(&self, member: EdgeIndex) -> Option<f64> {
        self.member(member).and_then(|result| result.fos_buckling)
    }

    /// Smallest factor of safety in the structure, infinite when there are no members.
    #[must_use]
    pub fn fos(&self) -> f64 {
        self.governing.map_or(f64::INFINITY, |governing| governing.fos)
    }

    /// Smallest yield factor of safety of any member.
    #[must_use]
    pub fn fos_yielding(&self) -> f64 {
        self.members
            .iter()
            .map(|member| member.fos_yielding)
            .fold(f64::INFINITY, f64::min)
    }

    /// Smallest buckling factor of safety, `None` when no member is in compression.
    #[must_use]
    pub fn fos_buckling(&self) -> Option<f64> {
        self.members
            .iter()
            .filter_map(|member| member.fos_buckling)
            .reduce(f64::min)
    }

    /// Failure mode of the governing member.
    #[must_use]
    pub fn limit_state(&self) -> Option<LimitState> {
        self.governing.map(|governing| governing.limit_state)
    }

    /// Largest joint displacement magnitude in metres.
    #[must_use]
    pub fn max_deflection(&self) -> f64 {
        self.joints
            .iter()
            .map(|joint| joint.displacement.magnitude())
            .fold(0.0, f64::max)
    }
}
