//! Clustering agreement statistics for embedding evaluation
//!
//! Neighbor-graph construction and community detection live in the external
//! clustering stack; this module only compares the resulting cluster
//! assignment with true labels.

use super::scores::Scores;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Contingency table between two label assignments over the same cells
struct Contingency {
    /// joint counts keyed by (true label, predicted label)
    joint: HashMap<(usize, usize), usize>,
    /// per-true-label totals
    row_sums: HashMap<usize, usize>,
    /// per-predicted-label totals
    col_sums: HashMap<usize, usize>,
    n: usize,
}

impl Contingency {
    fn build(pred: &[usize], truth: &[usize]) -> Result<Self> {
        if pred.len() != truth.len() {
            return Err(Error::InvalidParameter(format!(
                "predicted has {} labels but true has {}",
                pred.len(),
                truth.len()
            )));
        }
        if pred.is_empty() {
            return Err(Error::InvalidParameter("empty label vectors".to_string()));
        }
        let mut joint = HashMap::new();
        let mut row_sums = HashMap::new();
        let mut col_sums = HashMap::new();
        for (&p, &t) in pred.iter().zip(truth.iter()) {
            *joint.entry((t, p)).or_insert(0) += 1;
            *row_sums.entry(t).or_insert(0) += 1;
            *col_sums.entry(p).or_insert(0) += 1;
        }
        Ok(Self {
            joint,
            row_sums,
            col_sums,
            n: pred.len(),
        })
    }
}

fn comb2(n: usize) -> f64 {
    (n as f64) * (n as f64 - 1.0) / 2.0
}

/// Adjusted Rand Index between a predicted clustering and true labels.
///
/// Chance-adjusted pair-counting agreement; 1.0 for identical partitions,
/// around 0.0 for random assignments. When the adjustment denominator is
/// zero (both partitions trivial) the index is 1.0, following the standard
/// library convention.
pub fn adjusted_rand_index(pred: &[usize], truth: &[usize]) -> Result<f64> {
    let ct = Contingency::build(pred, truth)?;

    let index: f64 = ct.joint.values().map(|&c| comb2(c)).sum();
    let sum_rows: f64 = ct.row_sums.values().map(|&c| comb2(c)).sum();
    let sum_cols: f64 = ct.col_sums.values().map(|&c| comb2(c)).sum();
    let total_pairs = comb2(ct.n);

    if total_pairs == 0.0 {
        return Ok(1.0);
    }
    let expected = sum_rows * sum_cols / total_pairs;
    let max_index = 0.5 * (sum_rows + sum_cols);
    let denom = max_index - expected;
    if denom == 0.0 {
        return Ok(1.0);
    }
    Ok((index - expected) / denom)
}

fn entropy(sums: &HashMap<usize, usize>, n: usize) -> f64 {
    sums.values()
        .map(|&c| {
            let p = c as f64 / n as f64;
            -p * p.ln()
        })
        .sum()
}

/// Normalized Mutual Information between a predicted clustering and true
/// labels, normalized by the arithmetic mean of the two label entropies.
///
/// 1.0 for identical partitions (including the trivial case where both sides
/// are a single cluster), 0.0 for independent ones.
pub fn normalized_mutual_info(pred: &[usize], truth: &[usize]) -> Result<f64> {
    let ct = Contingency::build(pred, truth)?;

    if ct.row_sums.len() == 1 && ct.col_sums.len() == 1 {
        return Ok(1.0);
    }

    let n = ct.n as f64;
    let mut mi = 0.0;
    for (&(t, p), &c) in &ct.joint {
        let p_joint = c as f64 / n;
        let p_t = ct.row_sums[&t] as f64 / n;
        let p_p = ct.col_sums[&p] as f64 / n;
        mi += p_joint * (p_joint / (p_t * p_p)).ln();
    }

    let h_true = entropy(&ct.row_sums, ct.n);
    let h_pred = entropy(&ct.col_sums, ct.n);
    let normalizer = (0.5 * (h_true + h_pred)).max(f64::EPSILON);
    Ok((mi / normalizer).clamp(0.0, 1.0))
}

/// Score a cluster assignment against true labels.
///
/// Returns `ari` and `nmi`.
pub fn clustering_eval(pred_clusters: &[usize], true_labels: &[usize]) -> Result<Scores> {
    let mut scores = Scores::new();
    scores.insert("ari", adjusted_rand_index(pred_clusters, true_labels)?);
    scores.insert("nmi", normalized_mutual_info(pred_clusters, true_labels)?);
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identical_partitions() {
        let labels = vec![0, 0, 1, 1, 2, 2];
        assert_relative_eq!(adjusted_rand_index(&labels, &labels).unwrap(), 1.0);
        assert_relative_eq!(normalized_mutual_info(&labels, &labels).unwrap(), 1.0);
    }

    #[test]
    fn test_renamed_clusters_still_perfect() {
        // Same partition, different cluster ids
        let pred = vec![2, 2, 0, 0, 1, 1];
        let truth = vec![0, 0, 1, 1, 2, 2];
        assert_relative_eq!(adjusted_rand_index(&pred, &truth).unwrap(), 1.0);
        assert_relative_eq!(normalized_mutual_info(&pred, &truth).unwrap(), 1.0);
    }

    #[test]
    fn test_both_single_cluster() {
        let pred = vec![0, 0, 0];
        let truth = vec![5, 5, 5];
        assert_relative_eq!(adjusted_rand_index(&pred, &truth).unwrap(), 1.0);
        assert_relative_eq!(normalized_mutual_info(&pred, &truth).unwrap(), 1.0);
    }

    #[test]
    fn test_one_side_trivial_nmi_zero() {
        // Predicted puts everything in one cluster while truth is split:
        // mutual information is zero
        let pred = vec![0, 0, 0, 0];
        let truth = vec![0, 0, 1, 1];
        assert_relative_eq!(normalized_mutual_info(&pred, &truth).unwrap(), 0.0);
    }

    #[test]
    fn test_ari_sklearn_parity() {
        // adjusted_rand_score([0,0,1,1], [0,0,1,2]) == 0.5714285714...
        let truth = vec![0, 0, 1, 1];
        let pred = vec![0, 0, 1, 2];
        assert_relative_eq!(
            adjusted_rand_index(&pred, &truth).unwrap(),
            0.571_428_571_428_571_4,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_ari_can_be_negative() {
        // Systematically disagreeing partitions score below zero
        let truth = vec![0, 0, 1, 1];
        let pred = vec![0, 1, 0, 1];
        assert!(adjusted_rand_index(&pred, &truth).unwrap() < 0.0);
    }

    #[test]
    fn test_nmi_sklearn_parity() {
        // MI = ln 2, H(true) = ln 2, H(pred) = 1.5 ln 2 -> NMI = 1 / 1.25
        let truth = vec![0, 0, 1, 1];
        let pred = vec![0, 0, 1, 2];
        let nmi = normalized_mutual_info(&pred, &truth).unwrap();
        assert_relative_eq!(nmi, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_clustering_eval_keys() {
        let labels = vec![0, 1, 0, 1];
        let scores = clustering_eval(&labels, &labels).unwrap();
        assert_eq!(scores.len(), 2);
        assert!(scores.get("ari").is_some());
        assert!(scores.get("nmi").is_some());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        assert!(clustering_eval(&[0, 1], &[0]).is_err());
    }
}
