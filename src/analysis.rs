//! The analysis pipeline: validate, assemble, reduce, solve, recover, evaluate.

use log::{debug, info};

use crate::assembly::{self, DofMap};
use crate::errors::AnalysisError;
use crate::geometry::{Displacement, Force};
use crate::mass;
use crate::recovery;
use crate::reduction;
use crate::results::{AnalysisResult, JointResult, MemberResult};
use crate::safety;
use crate::settings::AnalysisSettings;
use crate::solver;
use crate::truss::Truss;

/// Analyse `truss` with default settings.
///
/// # Errors
///
/// See [`analyze_with`].
///
/// # Examples
/// ```
/// use trussfos::{analyze, force, point, Support, Truss};
///
/// let mut truss = Truss::new();
/// let a = truss.add_supported_joint(point(0.0, 0.0, 0.0), Support::pinned());
/// let b = truss.add_supported_joint(point(1.0, 0.0, 0.0), [false, true, true].into());
/// truss.set_load(b, force(-1_000.0, 0.0, 0.0)).unwrap();
/// let ab = truss.add_member(a, b).unwrap();
///
/// let result = analyze(&truss).unwrap();
/// assert!(result.member_axial_force(ab).unwrap() < 0.0);
/// ```
pub fn analyze(truss: &Truss) -> Result<AnalysisResult, AnalysisError> {
    analyze_with(truss, &AnalysisSettings::default())
}

/// Analyse `truss` under its loads using the direct stiffness method.
///
/// The truss is only read; the returned value owns every result.
///
/// # Errors
///
/// - [`AnalysisError::InvalidModel`] when the truss is malformed.
/// - [`AnalysisError::DegenerateGeometry`] when a member has no length.
/// - [`AnalysisError::UnstableStructure`] when the structure is a mechanism, is only
///   partially restrained, or is too ill-conditioned to solve reliably.
/// - [`AnalysisError::UnderconstrainedModel`] in the one case where no DOF is
///   restrained at all; the solve is skipped. Use
///   [`AnalysisError::is_instability`] to treat both kinds of instability alike.
pub fn analyze_with(
    truss: &Truss,
    settings: &AnalysisSettings,
) -> Result<AnalysisResult, AnalysisError> {
    truss.validate()?;

    let dofs = DofMap::new(truss);
    let elements = assembly::element_models(truss, &dofs, settings)?;
    let stiffness = assembly::assemble_stiffness(&elements, dofs.dof_count());
    let load = assembly::assemble_loads(truss, &dofs, &elements, settings);

    let free_dofs = reduction::free_dofs(truss, &dofs);
    debug!(
        "assembled {} joints, {} members, {} DOFs ({} free)",
        truss.joint_count(),
        truss.member_count(),
        dofs.dof_count(),
        free_dofs.len()
    );
    let system = reduction::reduce(&stiffness, &load, free_dofs)?;
    let solution = solver::solve(&system.stiffness, &system.load, settings)
        .map_err(AnalysisError::UnstableStructure)?;
    let displacements = system.expand(&solution.displacements);
    let reactions = recovery::reactions(&stiffness, &displacements, &load, &system.free_dofs);

    let per_joint = dofs.per_joint();
    let joints = dofs
        .joints()
        .iter()
        .map(|&joint| {
            let base = dofs.offset(joint);
            JointResult {
                joint,
                displacement: Displacement::from_dofs(
                    &displacements.as_slice()[base..base + per_joint],
                ),
                reaction: Force::from_dofs(&reactions.as_slice()[base..base + per_joint]),
            }
        })
        .collect();

    let forces: Vec<f64> = elements
        .iter()
        .map(|element| recovery::axial_force(element, &displacements))
        .collect();
    let negligible = safety::negligible_force(&forces, settings.force_tolerance);

    let members: Vec<MemberResult> = truss
        .members()
        .zip(&elements)
        .zip(&forces)
        .map(|((view, element), &axial_force)| {
            let section = &view.member.section;
            let material = &view.member.material;
            let length = element.geometry.length;
            let critical_load = safety::euler_critical_load(
                material.elastic_modulus,
                section.moment_of_inertia(),
                length,
            );
            MemberResult {
                member: element.member,
                length,
                axial_force,
                stress: axial_force / section.area(),
                mass: mass::member_mass(section, material, length),
                fos_yielding: safety::yield_fos(
                    axial_force,
                    section.area(),
                    material.yield_strength,
                    negligible,
                ),
                fos_buckling: safety::buckling_fos(axial_force, critical_load, negligible),
            }
        })
        .collect();

    let governing = safety::governing(
        members
            .iter()
            .map(|member| (member.member, member.fos_yielding, member.fos_buckling)),
    );
    let mass = members.iter().map(|member| member.mass).sum();

    if let Some(governing) = governing {
        info!(
            "analysis complete: mass {mass:.3} kg, governing FOS {:.3} ({:?}) in member {:?}",
            governing.fos, governing.limit_state, governing.member
        );
    } else {
        info!("analysis complete: no members");
    }

    Ok(AnalysisResult {
        joints,
        members,
        mass,
        governing,
        condition_number: solution.condition_number,
    })
}
