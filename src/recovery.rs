//! Member forces and support reactions recovered from solved displacements.

use nalgebra::{DMatrix, DVector};

use crate::assembly::ElementModel;

/// Axial force in a member, positive in tension.
///
/// The end displacements are rotated onto the member axis; the elongation is the
/// end's axial displacement minus the start's.
pub(crate) fn axial_force(element: &ElementModel, displacements: &DVector<f64>) -> f64 {
    let end_displacements = DVector::from_iterator(
        element.dofs.len(),
        element.dofs.iter().map(|&dof| displacements[dof]),
    );
    let local = element.geometry.transform() * end_displacements;
    let elongation = local[1] - local[0];
    element.axial_stiffness * elongation
}

/// Support reactions, `K u - f`, at every restrained DOF and zero elsewhere.
pub(crate) fn reactions(
    stiffness: &DMatrix<f64>,
    displacements: &DVector<f64>,
    load: &DVector<f64>,
    free_dofs: &[usize],
) -> DVector<f64> {
    let mut reactions = stiffness * displacements - load;
    for &dof in free_dofs {
        reactions[dof] = 0.0;
    }
    reactions
}
