//! Statistical comparison primitives
//!
//! Pearson correlation (1-D and row-averaged), cosine similarity, the
//! MSE/RMSE/MAE error family, and library-size count normalization. All
//! routines take `ndarray` views and validate shapes up front.

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView, ArrayView1, ArrayView2, Axis, Dimension};

fn check_same_shape<D: Dimension>(a: &ArrayView<f64, D>, b: &ArrayView<f64, D>) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(Error::InvalidParameter(format!(
            "shape mismatch: {:?} vs {:?}",
            a.shape(),
            b.shape()
        )));
    }
    if a.is_empty() {
        return Err(Error::InvalidParameter(
            "cannot score an empty array".to_string(),
        ));
    }
    Ok(())
}

/// Mean squared error over all elements
pub fn mse<D: Dimension>(y_true: ArrayView<f64, D>, y_pred: ArrayView<f64, D>) -> Result<f64> {
    check_same_shape(&y_true, &y_pred)?;
    let total: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p) * (t - p))
        .sum();
    Ok(total / y_true.len() as f64)
}

/// Root mean squared error over all elements
pub fn rmse<D: Dimension>(y_true: ArrayView<f64, D>, y_pred: ArrayView<f64, D>) -> Result<f64> {
    Ok(mse(y_true, y_pred)?.sqrt())
}

/// Mean absolute error over all elements
pub fn mae<D: Dimension>(y_true: ArrayView<f64, D>, y_pred: ArrayView<f64, D>) -> Result<f64> {
    check_same_shape(&y_true, &y_pred)?;
    let total: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p).abs())
        .sum();
    Ok(total / y_true.len() as f64)
}

/// Pearson correlation between two vectors.
///
/// Returns NaN when either vector is constant, matching the 0/0 the
/// covariance formula produces there.
pub fn pearson_1d(a: ArrayView1<f64>, b: ArrayView1<f64>) -> Result<f64> {
    check_same_shape(&a, &b)?;
    if a.len() < 2 {
        return Err(Error::InvalidParameter(
            "correlation needs at least two samples".to_string(),
        ));
    }
    let n = a.len() as f64;
    let mean_a = a.sum() / n;
    let mean_b = b.sum() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }
    Ok(cov / (var_a.sqrt() * var_b.sqrt()))
}

/// Pearson correlation computed per row and averaged over rows
pub fn pearson_rows(a: ArrayView2<f64>, b: ArrayView2<f64>) -> Result<f64> {
    check_same_shape(&a, &b)?;
    if a.ncols() < 2 {
        return Err(Error::InvalidParameter(
            "row correlation needs at least two columns".to_string(),
        ));
    }
    let mut total = 0.0;
    for (row_a, row_b) in a.axis_iter(Axis(0)).zip(b.axis_iter(Axis(0))) {
        total += pearson_1d(row_a, row_b)?;
    }
    Ok(total / a.nrows() as f64)
}

/// Row-averaged Pearson correlation of log1p-transformed counts
pub fn log1p_pearson_rows(counts_a: ArrayView2<f64>, counts_b: ArrayView2<f64>) -> Result<f64> {
    check_same_shape(&counts_a, &counts_b)?;
    pearson_rows(
        counts_a.mapv(f64::ln_1p).view(),
        counts_b.mapv(f64::ln_1p).view(),
    )
}

/// Cosine similarity between two vectors; 0.0 when either norm is zero
pub fn cosine_1d(a: ArrayView1<f64>, b: ArrayView1<f64>) -> Result<f64> {
    check_same_shape(&a, &b)?;
    let dot: f64 = a.iter().zip(b.iter()).map(|(&x, &y)| x * y).sum();
    let norm_a = a.iter().map(|&x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|&y| y * y).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / (norm_a * norm_b))
}

/// Cosine similarity computed per row and averaged over rows
pub fn cosine_rows(a: ArrayView2<f64>, b: ArrayView2<f64>) -> Result<f64> {
    check_same_shape(&a, &b)?;
    let mut total = 0.0;
    for (row_a, row_b) in a.axis_iter(Axis(0)).zip(b.axis_iter(Axis(0))) {
        total += cosine_1d(row_a, row_b)?;
    }
    Ok(total / a.nrows() as f64)
}

/// Sample standard deviation (n - 1 denominator); 0.0 for fewer than two samples
pub fn std_dev(v: ArrayView1<f64>) -> f64 {
    let n = v.len();
    if n < 2 {
        return 0.0;
    }
    let mean = v.sum() / n as f64;
    let ss: f64 = v.iter().map(|&x| (x - mean) * (x - mean)).sum();
    (ss / (n - 1) as f64).sqrt()
}

/// Library-size normalize a cells x genes count matrix.
///
/// Each row is scaled to 1e4 total counts, negatives are clamped to zero,
/// and the result is log1p-transformed. Rows with zero total counts stay
/// all zero.
pub fn normalize_counts(counts: ArrayView2<f64>) -> Array2<f64> {
    let mut out = counts.to_owned();
    for mut row in out.axis_iter_mut(Axis(0)) {
        let total: f64 = row.sum();
        if total != 0.0 {
            row.mapv_inplace(|v| (v / total * 1e4).max(0.0).ln_1p());
        } else {
            row.fill(0.0);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_pearson_identical_is_one() {
        let a = arr1(&[1.0, 2.0, 3.0, 4.0]);
        assert_relative_eq!(pearson_1d(a.view(), a.view()).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_anticorrelated_is_minus_one() {
        let a = arr1(&[1.0, 2.0, 3.0]);
        let b = arr1(&[3.0, 2.0, 1.0]);
        assert_relative_eq!(pearson_1d(a.view(), b.view()).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_constant_is_nan() {
        let a = arr1(&[1.0, 1.0, 1.0]);
        let b = arr1(&[1.0, 2.0, 3.0]);
        assert!(pearson_1d(a.view(), b.view()).unwrap().is_nan());
    }

    #[test]
    fn test_pearson_too_short_rejected() {
        let a = arr1(&[1.0]);
        assert!(pearson_1d(a.view(), a.view()).is_err());
    }

    #[test]
    fn test_pearson_rows_averages() {
        // Row 0 correlates perfectly, row 1 anti-correlates; mean is 0
        let a = arr2(&[[1.0, 2.0, 3.0], [1.0, 2.0, 3.0]]);
        let b = arr2(&[[2.0, 4.0, 6.0], [3.0, 2.0, 1.0]]);
        assert_relative_eq!(pearson_rows(a.view(), b.view()).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_log1p_pearson_matches_pearson_of_logged_counts() {
        let counts_t = arr2(&[[0.0, 1.0, 9.0], [3.0, 0.0, 1.0]]);
        let counts_p = arr2(&[[1.0, 2.0, 7.0], [4.0, 1.0, 0.0]]);
        let direct = pearson_rows(
            counts_t.mapv(f64::ln_1p).view(),
            counts_p.mapv(f64::ln_1p).view(),
        )
        .unwrap();
        let via_helper = log1p_pearson_rows(counts_t.view(), counts_p.view()).unwrap();
        assert_relative_eq!(via_helper, direct, epsilon = 1e-12);
    }

    #[test]
    fn test_error_family_known_values() {
        let t = arr1(&[1.0, 2.0, 3.0]);
        let p = arr1(&[2.0, 2.0, 5.0]);
        // Squared errors 1, 0, 4; absolute errors 1, 0, 2
        assert_relative_eq!(mse(t.view(), p.view()).unwrap(), 5.0 / 3.0);
        assert_relative_eq!(rmse(t.view(), p.view()).unwrap(), (5.0f64 / 3.0).sqrt());
        assert_relative_eq!(mae(t.view(), p.view()).unwrap(), 1.0);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let a = arr1(&[1.0, 2.0]);
        let b = arr1(&[1.0, 2.0, 3.0]);
        assert!(mse(a.view(), b.view()).is_err());
        assert!(mae(a.view(), b.view()).is_err());
        assert!(cosine_1d(a.view(), b.view()).is_err());
        assert!(pearson_1d(a.view(), b.view()).is_err());
    }

    #[test]
    fn test_cosine_identical_orthogonal_zero() {
        let a = arr1(&[1.0, 2.0, 3.0]);
        assert_relative_eq!(cosine_1d(a.view(), a.view()).unwrap(), 1.0, epsilon = 1e-12);

        let x = arr1(&[1.0, 0.0]);
        let y = arr1(&[0.0, 1.0]);
        assert_relative_eq!(cosine_1d(x.view(), y.view()).unwrap(), 0.0);

        let z = arr1(&[0.0, 0.0]);
        assert_relative_eq!(cosine_1d(x.view(), z.view()).unwrap(), 0.0);
    }

    #[test]
    fn test_cosine_rows_averages() {
        let a = arr2(&[[1.0, 0.0], [0.0, 1.0]]);
        let b = arr2(&[[1.0, 0.0], [1.0, 0.0]]);
        // Row 0 similarity 1, row 1 similarity 0
        assert_relative_eq!(cosine_rows(a.view(), b.view()).unwrap(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_counts_rows() {
        let counts = arr2(&[[1.0, 3.0], [0.0, 0.0]]);
        let normed = normalize_counts(counts.view());
        assert_relative_eq!(normed[[0, 0]], (1.0 / 4.0 * 1e4_f64).ln_1p(), epsilon = 1e-12);
        assert_relative_eq!(normed[[0, 1]], (3.0 / 4.0 * 1e4_f64).ln_1p(), epsilon = 1e-12);
        // Zero-count cell stays zero
        assert_relative_eq!(normed[[1, 0]], 0.0);
        assert_relative_eq!(normed[[1, 1]], 0.0);
    }

    #[test]
    fn test_std_dev_sample() {
        let v = arr1(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_relative_eq!(std_dev(v.view()), (32.0f64 / 7.0).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(std_dev(arr1(&[3.0]).view()), 0.0);
    }
}
