//! Direct solution of the reduced stiffness system.
//!
//! The reduced matrix of a stable truss is symmetric positive definite, so a
//! Cholesky factorisation is used. A mechanism makes the matrix singular; rather
//! than return a least-squares answer the solve is refused whenever the
//! factorisation breaks down, the conditioning is too poor or the solution does
//! not reproduce the loads.

use log::{debug, warn};
use nalgebra::{DMatrix, DVector};

use crate::errors::Instability;
use crate::settings::AnalysisSettings;

/// Displacements on the free DOFs together with the conditioning they came from.
#[derive(Clone, Debug)]
pub(crate) struct Solution {
    /// Displacement of each free DOF in metres.
    pub(crate) displacements: DVector<f64>,
    /// Ratio of the largest to the smallest eigenvalue of the reduced matrix.
    pub(crate) condition_number: f64,
}

/// Solve `stiffness * u = load`.
///
/// # Errors
///
/// Returns the [`Instability`] that caused the system to be rejected.
pub(crate) fn solve(
    stiffness: &DMatrix<f64>,
    load: &DVector<f64>,
    settings: &AnalysisSettings,
) -> Result<Solution, Instability> {
    if stiffness.is_empty() {
        return Ok(Solution {
            displacements: DVector::zeros(0),
            condition_number: 1.0,
        });
    }

    let Some(factor) = stiffness.clone().cholesky() else {
        warn!("cholesky factorisation failed on {} free DOFs", load.len());
        return Err(Instability::NotPositiveDefinite);
    };

    let condition_number = condition_number(stiffness);
    debug!("reduced stiffness condition number {condition_number:.3e}");
    if condition_number.is_nan() || condition_number > settings.max_condition_number {
        warn!(
            "condition number {condition_number:.3e} exceeds {:.3e}",
            settings.max_condition_number
        );
        return Err(Instability::IllConditioned {
            condition_number,
            limit: settings.max_condition_number,
        });
    }

    let displacements = factor.solve(load);
    let residual = relative_residual(stiffness, &displacements, load);
    if residual.is_nan() || residual > settings.residual_tolerance {
        warn!(
            "relative residual {residual:.3e} exceeds {:.3e}",
            settings.residual_tolerance
        );
        return Err(Instability::ResidualTooLarge {
            residual,
            limit: settings.residual_tolerance,
        });
    }

    Ok(Solution {
        displacements,
        condition_number,
    })
}

/// Spectral condition number of a symmetric matrix.
///
/// Infinite when the smallest eigenvalue is not positive.
pub(crate) fn condition_number(matrix: &DMatrix<f64>) -> f64 {
    let eigenvalues = matrix.symmetric_eigenvalues();
    let largest = eigenvalues.max();
    let smallest = eigenvalues.min();
    if smallest <= 0.0 {
        f64::INFINITY
    } else {
        largest / smallest
    }
}

/// `|K u - f| / |f|`, or the absolute residual when no load is applied.
fn relative_residual(
    stiffness: &DMatrix<f64>,
    solution: &DVector<f64>,
    load: &DVector<f64>,
) -> f64 {
    let residual = (stiffness * solution - load).norm();
    let scale = load.norm();
    if scale > 0.0 {
        residual / scale
    } else {
        residual
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn solves_symmetric_positive_definite_system() {
        let stiffness = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        let load = DVector::from_vec(vec![1.0, 2.0]);
        let solution = solve(&stiffness, &load, &AnalysisSettings::default()).expect("SPD");
        assert_relative_eq!(solution.displacements[0], 1.0 / 11.0, epsilon = 1.0e-12);
        assert_relative_eq!(solution.displacements[1], 7.0 / 11.0, epsilon = 1.0e-12);
    }

    #[test]
    fn singular_matrix_is_rejected() {
        let stiffness = DMatrix::from_row_slice(2, 2, &[1.0, -1.0, -1.0, 1.0]);
        let load = DVector::from_vec(vec![1.0, 0.0]);
        let error = solve(&stiffness, &load, &AnalysisSettings::default())
            .expect_err("singular matrix rejected");
        assert!(matches!(
            error,
            Instability::NotPositiveDefinite | Instability::IllConditioned { .. }
        ));
    }

    #[test]
    fn ill_conditioned_matrix_is_rejected() {
        let stiffness = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0e-12]);
        let load = DVector::from_vec(vec![1.0, 1.0]);
        let error = solve(&stiffness, &load, &AnalysisSettings::default())
            .expect_err("ill conditioned matrix rejected");
        assert!(matches!(error, Instability::IllConditioned { .. }));
    }

    #[test]
    fn condition_limit_is_configurable() {
        let stiffness = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0e-3]);
        let load = DVector::from_vec(vec![1.0, 1.0]);
        let strict = AnalysisSettings::default().with_max_condition_number(10.0);
        assert!(solve(&stiffness, &load, &strict).is_err());
        assert!(solve(&stiffness, &load, &AnalysisSettings::default()).is_ok());
    }

    #[test]
    fn zero_load_gives_zero_displacement() {
        let stiffness = DMatrix::from_row_slice(2, 2, &[2.0, -1.0, -1.0, 2.0]);
        let load = DVector::zeros(2);
        let solution = solve(&stiffness, &load, &AnalysisSettings::default()).expect("SPD");
        assert_eq!(solution.displacements, DVector::zeros(2));
    }

    #[test]
    fn empty_system_is_trivially_solved() {
        let solution = solve(
            &DMatrix::zeros(0, 0),
            &DVector::zeros(0),
            &AnalysisSettings::default(),
        )
        .expect("nothing to solve");
        assert!(solution.displacements.is_empty());
    }
}
