//! Factors of safety against yielding and elastic buckling.

use std::f64::consts::PI;

use petgraph::stable_graph::EdgeIndex;
use serde::{Deserialize, Serialize};

/// Failure mode a factor of safety refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitState {
    /// Axial stress reaching the yield strength.
    Yielding,
    /// Euler buckling of a pin-ended compression member.
    Buckling,
}

/// The smallest factor of safety in a structure and where it occurs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoverningFos {
    /// Design-critical member.
    pub member: EdgeIndex,
    /// Factor of safety of that member.
    #[serde(with = "crate::extended_float")]
    pub fos: f64,
    /// Failure mode the factor refers to.
    pub limit_state: LimitState,
}

/// Euler critical load of a pin-pin column, `pi^2 E I / L^2`.
#[must_use]
pub fn euler_critical_load(elastic_modulus: f64, moment_of_inertia: f64, length: f64) -> f64 {
    PI.powi(2) * elastic_modulus * moment_of_inertia / length.powi(2)
}

/// Largest force magnitude that still counts as "no load".
///
/// Scaled by the largest member force so round-off in a loaded structure is not
/// mistaken for a real compression.
#[must_use]
pub fn negligible_force(forces: &[f64], relative_tolerance: f64) -> f64 {
    let largest = forces.iter().fold(0.0_f64, |acc, force| acc.max(force.abs()));
    largest * relative_tolerance
}

/// Factor of safety against yielding, `yield strength * area / |F|`.
///
/// Infinite when the force is negligible; independent of the sign of the force.
#[must_use]
pub fn yield_fos(force: f64, area: f64, yield_strength: f64, negligible: f64) -> f64 {
    if force.abs() <= negligible {
        f64::INFINITY
    } else {
        yield_strength * area / force.abs()
    }
}

/// Factor of safety against buckling, `F_cr / |F|`.
///
/// `None` unless the member is in compression.
#[must_use]
pub fn buckling_fos(force: f64, critical_load: f64, negligible: f64) -> Option<f64> {
    (force < 0.0 && force.abs() > negligible).then(|| critical_load / force.abs())
}

/// Find the governing factor of safety.
///
/// `members` yields `(member, yield FOS, buckling FOS)`. The first member in
/// iteration order wins a tie, and within a member yielding wins a tie against
/// buckling. Returns `None` when there are no members.
pub fn governing<I>(members: I) -> Option<GoverningFos>
where
    I: IntoIterator<Item = (EdgeIndex, f64, Option<f64>)>,
{
    let mut governing: Option<GoverningFos> = None;
    for (member, yielding, buckling) in members {
        let mut candidate = GoverningFos {
            member,
            fos: yielding,
            limit_state: LimitState::Yielding,
        };
        if let Some(buckling) = buckling {
            if buckling < candidate.fos {
                candidate.fos = buckling;
                candidate.limit_state = LimitState::Buckling;
            }
        }
        match governing {
            Some(current) if current.fos <= candidate.fos => {}
            _ => governing = Some(candidate),
        }
    }
    governing
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn yield_fos_ignores_sign() {
        assert_relative_eq!(yield_fos(-1_000.0, 0.01, 250.0e6, 0.0), 2_500.0);
        assert_relative_eq!(yield_fos(1_000.0, 0.01, 250.0e6, 0.0), 2_500.0);
    }

    #[test]
    fn unloaded_member_has_infinite_yield_fos() {
        assert_eq!(yield_fos(0.0, 0.01, 250.0e6, 0.0), f64::INFINITY);
        assert_eq!(yield_fos(1.0e-12, 0.01, 250.0e6, 1.0e-9), f64::INFINITY);
    }

    #[test]
    fn buckling_only_applies_in_compression() {
        assert_eq!(buckling_fos(10.0, 100.0, 0.0), None);
        assert_eq!(buckling_fos(0.0, 100.0, 0.0), None);
        assert_eq!(buckling_fos(-1.0e-12, 100.0, 1.0e-9), None);
        assert_eq!(buckling_fos(-10.0, 100.0, 0.0), Some(10.0));
    }

    #[test]
    fn euler_load_matches_formula() {
        let load = euler_critical_load(200.0e9, 1.0e-8, 2.0);
        assert_relative_eq!(load, PI * PI * 200.0e9 * 1.0e-8 / 4.0);
    }

    #[test]
    fn governing_picks_smallest_value_and_mode() {
        let result = governing([
            (EdgeIndex::new(0), 5.0, None),
            (EdgeIndex::new(1), 4.0, Some(2.0)),
            (EdgeIndex::new(2), 3.0, Some(6.0)),
        ])
        .expect("members present");
        assert_eq!(result.member, EdgeIndex::new(1));
        assert_eq!(result.limit_state, LimitState::Buckling);
        assert_relative_eq!(result.fos, 2.0);
    }

    #[test]
    fn ties_resolve_to_first_member_and_yielding() {
        let result = governing([
            (EdgeIndex::new(3), 2.0, Some(2.0)),
            (EdgeIndex::new(5), 2.0, None),
        ])
        .expect("members present");
        assert_eq!(result.member, EdgeIndex::new(3));
        assert_eq!(result.limit_state, LimitState::Yielding);
    }

    #[test]
    fn no_members_means_no_governing_fos() {
        assert_eq!(governing(std::iter::empty()), None);
    }

    #[test]
    fn negligible_force_scales_with_largest_force() {
        assert_relative_eq!(negligible_force(&[-4.0, 2.0], 1.0e-3), 4.0e-3);
        assert_eq!(negligible_force(&[], 1.0e-3), 0.0);
    }
}
