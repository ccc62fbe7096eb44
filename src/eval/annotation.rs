//! Cell type annotation evaluation

use super::classification::{Average, ClassMetrics, ConfusionMatrix};
use super::scores::Scores;
use crate::error::Result;

/// Score a predicted annotation against true cell type labels.
///
/// Returns `acc`, `f1_score`, `precision` and `recall`, each macro-averaged
/// over classes. Macro accuracy equals macro recall for single-label
/// multi-class predictions, which matches how the reference pipelines report
/// annotation accuracy. The class count is inferred from the labels when not
/// given.
pub fn annotation_eval(
    pred_labels: &[usize],
    true_labels: &[usize],
    num_classes: Option<usize>,
) -> Result<Scores> {
    let cm = ConfusionMatrix::from_labels(pred_labels, true_labels, num_classes)?;
    let metrics = ClassMetrics::from_confusion_matrix(&cm);

    let mut scores = Scores::new();
    scores.insert("acc", metrics.recall_avg(Average::Macro));
    scores.insert("f1_score", metrics.f1_avg(Average::Macro));
    scores.insert("precision", metrics.precision_avg(Average::Macro));
    scores.insert("recall", metrics.recall_avg(Average::Macro));
    Ok(scores)
}
