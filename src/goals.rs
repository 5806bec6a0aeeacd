//! Design targets and the recommendations derived from comparing results to them.

use petgraph::stable_graph::EdgeIndex;
use serde::{Deserialize, Serialize};

use crate::errors::SettingsError;
use crate::results::AnalysisResult;
use crate::safety::LimitState;

/// Targets a design is expected to meet.
///
/// # Examples
/// ```
/// use trussfos::DesignGoals;
///
/// let json = r#"{ "minimum_fos_yielding": 1.5, "maximum_mass": 5.0 }"#;
/// let goals = DesignGoals::from_json_str(json).unwrap();
/// assert_eq!(goals.minimum_fos_buckling, 1.0);
/// assert_eq!(goals.maximum_mass, 5.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignGoals {
    /// Minimum governing factor of safety.
    #[serde(with = "crate::extended_float")]
    pub minimum_fos_total: f64,
    /// Minimum buckling factor of safety of any member.
    #[serde(with = "crate::extended_float")]
    pub minimum_fos_buckling: f64,
    /// Minimum yield factor of safety of any member.
    #[serde(with = "crate::extended_float")]
    pub minimum_fos_yielding: f64,
    /// Maximum total mass in kilograms.
    #[serde(with = "crate::extended_float")]
    pub maximum_mass: f64,
    /// Maximum joint displacement magnitude in metres.
    #[serde(with = "crate::extended_float")]
    pub maximum_deflection: f64,
}

impl Default for DesignGoals {
    fn default() -> Self {
        Self {
            minimum_fos_total: 1.0,
            minimum_fos_buckling: 1.0,
            minimum_fos_yielding: 1.0,
            maximum_mass: f64::INFINITY,
            maximum_deflection: f64::INFINITY,
        }
    }
}

/// Comparison of one target with the value achieved.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalCheck {
    /// Required value.
    #[serde(with = "crate::extended_float")]
    pub target: f64,
    /// Achieved value; `None` when the quantity does not apply.
    #[serde(with = "crate::extended_float::option")]
    pub actual: Option<f64>,
    /// Whether the target is met.
    pub satisfied: bool,
}

impl GoalCheck {
    /// Check for a lower bound; a missing value passes.
    fn at_least(target: f64, actual: Option<f64>) -> Self {
        Self {
            target,
            actual,
            satisfied: actual.map_or(true, |actual| actual > target),
        }
    }

    /// Check for an upper bound.
    fn at_most(target: f64, actual: f64) -> Self {
        Self {
            target,
            actual: Some(actual),
            satisfied: actual < target,
        }
    }
}

/// A member that misses one of its factor-of-safety targets.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberRecommendation {
    /// Member to strengthen.
    pub member: EdgeIndex,
    /// Failure mode that is short of its target.
    pub limit_state: LimitState,
    /// Achieved factor of safety.
    #[serde(with = "crate::extended_float")]
    pub fos: f64,
    /// Required factor of safety.
    #[serde(with = "crate::extended_float")]
    pub required: f64,
}

/// Outcome of checking an analysis against a set of goals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DesignAssessment {
    /// Governing factor of safety against its minimum.
    pub fos_total: GoalCheck,
    /// Smallest buckling factor of safety against its minimum.
    pub fos_buckling: GoalCheck,
    /// Smallest yield factor of safety against its minimum.
    pub fos_yielding: GoalCheck,
    /// Total mass against its maximum.
    pub mass: GoalCheck,
    /// Largest deflection against its maximum.
    pub deflection: GoalCheck,
    /// Failure mode of the governing member.
    pub limit_state: Option<LimitState>,
    /// Members short of a target, in ascending member order, yielding before buckling.
    pub recommendations: Vec<MemberRecommendation>,
}

impl DesignAssessment {
    /// Whether every goal is met.
    #[must_use]
    pub fn all_satisfied(&self) -> bool {
        [
            self.fos_total,
            self.fos_buckling,
            self.fos_yielding,
            self.mass,
            self.deflection,
        ]
        .iter()
        .all(|check| check.satisfied)
    }
}

impl DesignGoals {
    /// Parse goals from JSON, filling omitted fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] for malformed JSON.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compare an analysis with these goals.
    #[must_use]
    pub fn assess(&self, result: &AnalysisResult) -> DesignAssessment {
        let mut recommendations = Vec::new();
        for member in &result.members {
            if member.fos_yielding <= self.minimum_fos_yielding {
                recommendations.push(MemberRecommendation {
                    member: member.member,
                    limit_state: LimitState::Yielding,
                    fos: member.fos_yielding,
                    required: self.minimum_fos_yielding,
                });
            }
            if let Some(buckling) = member.fos_buckling {
                if buckling <= self.minimum_fos_buckling {
                    recommendations.push(MemberRecommendation {
                        member: member.member,
                        limit_state: LimitState::Buckling,
                        fos: buckling,
                        required: self.minimum_fos_buckling,
                    });
                }
            }
        }

        DesignAssessment {
            fos_total: GoalCheck::at_least(self.minimum_fos_total, Some(result.fos())),
            fos_buckling: GoalCheck::at_least(self.minimum_fos_buckling, result.fos_buckling()),
            fos_yielding: GoalCheck::at_least(
                self.minimum_fos_yielding,
                Some(result.fos_yielding()),
            ),
            mass: GoalCheck::at_most(self.maximum_mass, result.mass),
            deflection: GoalCheck::at_most(self.maximum_deflection, result.max_deflection()),
            limit_state: result.limit_state(),
            recommendations,
        }
    }
}
