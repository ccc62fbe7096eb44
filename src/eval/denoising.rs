//! Expression denoising evaluation

use super::scores::Scores;
use super::stats;
use crate::error::{Error, Result};
use ndarray::{Array1, Array2, ArrayView2};

/// Score denoised expression against true counts.
///
/// Both matrices are cells x genes. With `normalize`, both sides go through
/// library-size normalization and log1p before scoring. When an evaluation
/// mask is given, only masked entries are scored: they are flattened into
/// vectors and compared with 1-D Pearson and cosine. Without a mask, Pearson
/// and cosine are computed per cell and averaged.
///
/// Returns `mse`, `rmse`, `mae`, `corr` and `cos`.
pub fn denoising_eval(
    pred: ArrayView2<f64>,
    truth: ArrayView2<f64>,
    eval_mask: Option<&Array2<bool>>,
    normalize: bool,
) -> Result<Scores> {
    if pred.dim() != truth.dim() {
        return Err(Error::shape(truth.dim(), pred.dim()));
    }

    let (pred, truth) = if normalize {
        (
            stats::normalize_counts(pred),
            stats::normalize_counts(truth),
        )
    } else {
        (pred.to_owned(), truth.to_owned())
    };

    let mut scores = Scores::new();
    match eval_mask {
        Some(mask) => {
            if mask.dim() != truth.dim() {
                return Err(Error::shape(truth.dim(), mask.dim()));
            }
            let mut masked_t = Vec::new();
            let mut masked_p = Vec::new();
            for ((&m, &t), &p) in mask.iter().zip(truth.iter()).zip(pred.iter()) {
                if m {
                    masked_t.push(t);
                    masked_p.push(p);
                }
            }
            if masked_t.len() < 2 {
                return Err(Error::InvalidParameter(
                    "evaluation mask selects fewer than two entries".to_string(),
                ));
            }
            let vt = Array1::from(masked_t);
            let vp = Array1::from(masked_p);

            scores.insert("corr", stats::pearson_1d(vt.view(), vp.view())?);
            scores.insert("cos", stats::cosine_1d(vt.view(), vp.view())?);
            scores.insert("mse", stats::mse(vt.view(), vp.view())?);
            scores.insert("rmse", stats::rmse(vt.view(), vp.view())?);
            scores.insert("mae", stats::mae(vt.view(), vp.view())?);
        }
        None => {
            scores.insert("corr", stats::pearson_rows(truth.view(), pred.view())?);
            scores.insert("cos", stats::cosine_rows(truth.view(), pred.view())?);
            scores.insert("mse", stats::mse(truth.view(), pred.view())?);
            scores.insert("rmse", stats::rmse(truth.view(), pred.view())?);
            scores.insert("mae", stats::mae(truth.view(), pred.view())?);
        }
    }
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr2;

    #[test]
    fn test_identical_matrices_raw() {
        let x = arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let scores = denoising_eval(x.view(), x.view(), None, false).unwrap();
        assert_relative_eq!(scores.get("mse").unwrap(), 0.0);
        assert_relative_eq!(scores.get("rmse").unwrap(), 0.0);
        assert_relative_eq!(scores.get("mae").unwrap(), 0.0);
        assert_relative_eq!(scores.get("corr").unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(scores.get("cos").unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_identical_matrices_normalized() {
        let x = arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let scores = denoising_eval(x.view(), x.view(), None, true).unwrap();
        assert_relative_eq!(scores.get("mse").unwrap(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(scores.get("corr").unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_masked_scoring_ignores_unmasked_entries() {
        let truth = arr2(&[[1.0, 2.0], [3.0, 100.0]]);
        let pred = arr2(&[[1.0, 2.0], [3.0, -5.0]]);
        // Mask out the entry where pred is wrong
        let mask = arr2(&[[true, true], [true, false]]);
        let scores = denoising_eval(pred.view(), truth.view(), Some(&mask), false).unwrap();
        assert_relative_eq!(scores.get("mse").unwrap(), 0.0);
        assert_relative_eq!(scores.get("corr").unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mask_shape_mismatch_rejected() {
        let x = arr2(&[[1.0, 2.0], [3.0, 4.0]]);
        let mask = arr2(&[[true, true, false]]);
        assert!(denoising_eval(x.view(), x.view(), Some(&mask), false).is_err());
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let a = arr2(&[[1.0, 2.0]]);
        let b = arr2(&[[1.0, 2.0], [3.0, 4.0]]);
        assert!(denoising_eval(a.view(), b.view(), None, false).is_err());
    }

    #[test]
    fn test_nearly_empty_mask_rejected() {
        let x = arr2(&[[1.0, 2.0], [3.0, 4.0]]);
        let mask = arr2(&[[true, false], [false, false]]);
        assert!(denoising_eval(x.view(), x.view(), Some(&mask), false).is_err());
    }
}
