//! Partition of the global system into free and restrained degrees of freedom.

use nalgebra::{DMatrix, DVector};

use crate::assembly::DofMap;
use crate::errors::AnalysisError;
use crate::truss::Truss;

/// Stiffness and load restricted to the unrestrained DOFs.
#[derive(Clone, Debug)]
pub(crate) struct ReducedSystem {
    /// `K_ff`, square in the number of free DOFs.
    pub(crate) stiffness: DMatrix<f64>,
    /// `f_f`, the loads acting on free DOFs.
    pub(crate) load: DVector<f64>,
    /// Global index of each free DOF, ascending.
    pub(crate) free_dofs: Vec<usize>,
    /// Size of the unreduced system.
    dof_count: usize,
}

impl ReducedSystem {
    /// Scatter a solution over the free DOFs back into a full-length vector with
    /// zeros at every restrained DOF.
    pub(crate) fn expand(&self, solution: &DVector<f64>) -> DVector<f64> {
        let mut full = DVector::zeros(self.dof_count);
        for (value, &dof) in solution.iter().zip(&self.free_dofs) {
            full[dof] = *value;
        }
        full
    }
}

/// Determine the indices corresponding to unconstrained degrees of freedom.
pub(crate) fn free_dofs(truss: &Truss, dofs: &DofMap) -> Vec<usize> {
    let mut free = Vec::new();
    for (id, joint) in truss.joints() {
        let base = dofs.offset(id);
        for axis in 0..dofs.per_joint() {
            if !joint.support.is_fixed(axis) {
                free.push(base + axis);
            }
        }
    }
    free.sort_unstable();
    free
}

/// Restrict `stiffness` and `load` to `free_dofs`.
///
/// # Errors
///
/// Returns [`AnalysisError::UnderconstrainedModel`] when no DOF is restrained.
pub(crate) fn reduce(
    stiffness: &DMatrix<f64>,
    load: &DVector<f64>,
    free_dofs: Vec<usize>,
) -> Result<ReducedSystem, AnalysisError> {
    let dof_count = load.len();
    if free_dofs.len() == dof_count {
        return Err(AnalysisError::UnderconstrainedModel {
            free_dofs: dof_count,
        });
    }
    let free_len = free_dofs.len();
    let mut k_ff = DMatrix::zeros(free_len, free_len);
    let mut f_f = DVector::zeros(free_len);
    for (row_idx, &row) in free_dofs.iter().enumerate() {
        f_f[row_idx] = load[row];
        for (col_idx, &col) in free_dofs.iter().enumerate() {
            k_ff[(row_idx, col_idx)] = stiffness[(row, col)];
        }
    }
    Ok(ReducedSystem {
        stiffness: k_ff,
        load: f_f,
        free_dofs,
        dof_count,
    })
}
