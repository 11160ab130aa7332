//! Effective regressor construction for the interacted panel design.
//!
//! The panel model assumes the factor structure `x(t,i) = z(i) ⊗ x(t)`: all
//! units share one common factor row per period, scaled into column blocks by
//! the unit's cross-sectional design row. The full T·N×K design matrix is
//! never materialized; one N×K slice is rebuilt per period and discarded,
//! which bounds memory at O(N·K) regardless of T.

use ndarray::{Array2, ArrayView1, ArrayView2};

/// Build the effective regressor matrix for one period.
///
/// Row i is the Kronecker product `z[i,:] ⊗ x_row`, with the entries of
/// `z[i,:]` varying slowest: column `kz * Kx + kx` holds
/// `z[i, kz] * x_row[kx]`. Equivalently, `x_row` is tiled across Kz column
/// blocks and each block is scaled by the corresponding entry of `z[i,:]`.
///
/// A unit whose `z` row is all zeros gets an all-zero regressor row and so
/// contributes nothing to any accumulated sum: units outside every indicator
/// group are excluded silently, never rejected.
///
/// # Arguments
/// * `z` - Cross-sectional design matrix (N x Kz)
/// * `x_row` - One period's common factor row (Kx)
///
/// # Returns
/// * Effective regressor matrix (N x Kz*Kx)
pub fn interaction_matrix(z: ArrayView2<'_, f64>, x_row: ArrayView1<'_, f64>) -> Array2<f64> {
    let (n_units, k_z) = z.dim();
    let k_x = x_row.len();
    let mut effective = Array2::<f64>::zeros((n_units, k_z * k_x));

    for i in 0..n_units {
        for j in 0..k_z {
            let weight = z[[i, j]];
            if weight == 0.0 {
                continue;
            }
            for l in 0..k_x {
                effective[[i, j * k_x + l]] = weight * x_row[l];
            }
        }
    }

    effective
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_kronecker_ordering() {
        // Z[i,:] varies slowest, x_row fastest
        let z = array![[1.0, 0.0], [0.0, 1.0]];
        let x_row = array![1.0, 2.0];

        let effective = interaction_matrix(z.view(), x_row.view());

        assert_eq!(effective.shape(), &[2, 4]);
        assert_eq!(effective.row(0).to_vec(), vec![1.0, 2.0, 0.0, 0.0]);
        assert_eq!(effective.row(1).to_vec(), vec![0.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_non_indicator_design() {
        let z = array![[2.0, -1.0]];
        let x_row = array![3.0, 5.0, 7.0];

        let effective = interaction_matrix(z.view(), x_row.view());

        assert_eq!(effective.shape(), &[1, 6]);
        let expected = [6.0, 10.0, 14.0, -3.0, -5.0, -7.0];
        for (got, want) in effective.row(0).iter().zip(expected.iter()) {
            assert_relative_eq!(got, want);
        }
    }

    #[test]
    fn test_zero_row_excluded_silently() {
        let z = array![[1.0], [0.0]];
        let x_row = array![1.0, 0.5];

        let effective = interaction_matrix(z.view(), x_row.view());

        assert_eq!(effective.row(0).to_vec(), vec![1.0, 0.5]);
        assert!(effective.row(1).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_single_column_design_is_plain_broadcast() {
        let z = array![[1.0], [1.0], [1.0]];
        let x_row = array![1.0, 0.02];

        let effective = interaction_matrix(z.view(), x_row.view());

        for i in 0..3 {
            assert_eq!(effective.row(i).to_vec(), vec![1.0, 0.02]);
        }
    }
}
