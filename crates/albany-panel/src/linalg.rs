//! Dense solves for the normal equations.
//!
//! Gaussian elimination with partial pivoting, sized for the small K×K
//! systems that arise from interacted factor designs. A pivot below tolerance
//! aborts with [`PanelError::SingularNormalEquations`]: no ridge term and no
//! pseudo-inverse, so an unidentified design (empty indicator group,
//! collinear factors) surfaces as an error instead of a biased estimate.

use crate::error::{PanelError, Result};
use ndarray::{Array1, Array2};

/// Relative pivot tolerance for declaring a system singular.
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Solve the linear system `A x = b` for a square matrix `A`.
///
/// # Arguments
/// * `a` - Coefficient matrix (K x K)
/// * `b` - Right-hand side (K)
///
/// # Errors
/// Returns an error if `A` is not square, `b` has the wrong length, or a
/// pivot falls below tolerance.
pub fn solve(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>> {
    let n = check_square(a)?;
    if b.len() != n {
        return Err(PanelError::DimensionMismatch {
            context: "right-hand side length",
            expected: n,
            actual: b.len(),
        });
    }

    // Augmented matrix [A | b]
    let mut aug = Array2::<f64>::zeros((n, n + 1));
    for i in 0..n {
        for j in 0..n {
            aug[[i, j]] = a[[i, j]];
        }
        aug[[i, n]] = b[i];
    }

    eliminate(&mut aug, n, 1)?;

    // Back substitution
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut sum = aug[[i, n]];
        for j in (i + 1)..n {
            sum -= aug[[i, j]] * x[j];
        }
        x[i] = sum / aug[[i, i]];
    }

    Ok(x)
}

/// Invert a square matrix by eliminating against an identity augment.
///
/// # Arguments
/// * `a` - Matrix to invert (K x K)
///
/// # Errors
/// Returns an error if `A` is not square or is singular to working tolerance.
pub fn invert(a: &Array2<f64>) -> Result<Array2<f64>> {
    let n = check_square(a)?;

    // Augmented matrix [A | I]
    let mut aug = Array2::<f64>::zeros((n, 2 * n));
    for i in 0..n {
        for j in 0..n {
            aug[[i, j]] = a[[i, j]];
        }
        aug[[i, n + i]] = 1.0;
    }

    eliminate(&mut aug, n, n)?;

    // Back substitution, one right-hand-side column at a time
    let mut inv = Array2::<f64>::zeros((n, n));
    for col in 0..n {
        for i in (0..n).rev() {
            let mut sum = aug[[i, n + col]];
            for j in (i + 1)..n {
                sum -= aug[[i, j]] * inv[[j, col]];
            }
            inv[[i, col]] = sum / aug[[i, i]];
        }
    }

    Ok(inv)
}

fn check_square(a: &Array2<f64>) -> Result<usize> {
    let n = a.nrows();
    if n == 0 {
        return Err(PanelError::EmptyInput("linear system"));
    }
    if a.ncols() != n {
        return Err(PanelError::DimensionMismatch {
            context: "square coefficient matrix",
            expected: n,
            actual: a.ncols(),
        });
    }
    Ok(n)
}

/// Forward elimination with partial pivoting on an n x (n + extra) augment.
fn eliminate(aug: &mut Array2<f64>, n: usize, extra: usize) -> Result<()> {
    let width = n + extra;

    // Scale the tolerance by the magnitude of the coefficient block only
    let mut scale = 1.0_f64;
    for i in 0..n {
        for j in 0..n {
            scale = scale.max(aug[[i, j]].abs());
        }
    }
    let tolerance = PIVOT_TOLERANCE * scale;

    for col in 0..n {
        // Find pivot
        let mut max_row = col;
        let mut max_val = aug[[col, col]].abs();
        for row in (col + 1)..n {
            if aug[[row, col]].abs() > max_val {
                max_val = aug[[row, col]].abs();
                max_row = row;
            }
        }

        if max_val < tolerance {
            return Err(PanelError::SingularNormalEquations(format!(
                "pivot {max_val:.3e} at column {col} is below tolerance; \
                 check for empty indicator groups or collinear factors"
            )));
        }

        // Swap rows
        if max_row != col {
            for j in 0..width {
                let tmp = aug[[col, j]];
                aug[[col, j]] = aug[[max_row, j]];
                aug[[max_row, j]] = tmp;
            }
        }

        // Eliminate column
        for row in (col + 1)..n {
            let factor = aug[[row, col]] / aug[[col, col]];
            for j in col..width {
                aug[[row, j]] -= factor * aug[[col, j]];
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_solve_known_system() {
        let a = array![[2.0, 1.0], [1.0, 3.0]];
        let b = array![5.0, 10.0];

        let x = solve(&a, &b).unwrap();

        // 2x + y = 5, x + 3y = 10 => x = 1, y = 3
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_solve_singular_fails() {
        let a = array![[1.0, 2.0], [2.0, 4.0]];
        let b = array![1.0, 2.0];

        let err = solve(&a, &b).unwrap_err();
        assert!(matches!(err, PanelError::SingularNormalEquations(_)));
    }

    #[test]
    fn test_invert_round_trip() {
        let a = array![[4.0, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 2.0]];

        let inv = invert(&a).unwrap();
        let identity = a.dot(&inv);

        for i in 0..3 {
            for j in 0..3 {
                let want = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(identity[[i, j]], want, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_invert_zero_column_fails() {
        // The exact pattern an empty indicator group produces
        let a = array![[1.0, 0.0], [0.0, 0.0]];
        assert!(invert(&a).is_err());
    }

    #[test]
    fn test_non_square_rejected() {
        let a = Array2::<f64>::zeros((2, 3));
        let b = Array1::<f64>::zeros(2);
        assert!(solve(&a, &b).is_err());
    }
}
