//! Dense linear solve with singularity detection.

use nalgebra::{DMatrix, DVector};

use crate::error::{Error, Result};

/// Relative pivot tolerance: a pivot below `PIVOT_RTOL * ||A||_inf` marks
/// the matrix as singular.
pub const PIVOT_RTOL: f64 = 1e-14;

/// Solve a linear system Ax = b using LU decomposition with partial
/// pivoting.
///
/// Any pivot smaller than [`PIVOT_RTOL`] times the infinity norm of `A` is
/// treated as singular and fails with [`Error::SingularCircuit`]; common
/// causes are a floating node, conflicting parallel voltage sources, or a
/// missing ground.
pub fn solve_dense(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>> {
    if a.nrows() != a.ncols() {
        return Err(Error::DimensionMismatch {
            expected: a.nrows(),
            actual: a.ncols(),
        });
    }
    if a.nrows() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.nrows(),
            actual: b.len(),
        });
    }

    let norm = inf_norm(a);
    let lu = a.clone().lu();

    let u = lu.u();
    let threshold = PIVOT_RTOL * norm;
    for k in 0..u.nrows().min(u.ncols()) {
        if u[(k, k)].abs() < threshold {
            return Err(Error::SingularCircuit);
        }
    }

    lu.solve(b).ok_or(Error::SingularCircuit)
}

/// Infinity norm: the maximum absolute row sum.
fn inf_norm(a: &DMatrix<f64>) -> f64 {
    a.row_iter()
        .map(|row| row.iter().map(|x| x.abs()).sum::<f64>())
        .fold(0.0, f64::max)
}
