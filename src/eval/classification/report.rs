//! Text classification report

use super::average::Average;
use super::confusion::ConfusionMatrix;
use super::metrics::ClassMetrics;
use crate::error::Result;

/// Render an sklearn-style classification report.
///
/// One row per class with precision/recall/F1/support, followed by macro
/// and weighted averages and the overall accuracy.
pub fn classification_report(pred: &[usize], truth: &[usize]) -> Result<String> {
    let cm = ConfusionMatrix::from_labels(pred, truth, None)?;
    let metrics = ClassMetrics::from_confusion_matrix(&cm);

    let mut report = String::new();
    report.push_str(&format!(
        "{:>12} {:>10} {:>10} {:>10} {:>10}\n",
        "", "precision", "recall", "f1-score", "support"
    ));
    report.push_str(&"-".repeat(54));
    report.push('\n');

    for class in 0..metrics.n_classes {
        report.push_str(&format!(
            "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}\n",
            format!("class {class}"),
            metrics.precision[class],
            metrics.recall[class],
            metrics.f1[class],
            metrics.support[class]
        ));
    }

    report.push_str(&"-".repeat(54));
    report.push('\n');

    let total_support: usize = metrics.support.iter().sum();
    for (name, avg) in [("macro avg", Average::Macro), ("weighted avg", Average::Weighted)] {
        report.push_str(&format!(
            "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}\n",
            name,
            metrics.precision_avg(avg),
            metrics.recall_avg(avg),
            metrics.f1_avg(avg),
            total_support
        ));
    }

    report.push_str(&format!("\naccuracy: {:.4}\n", cm.overall_accuracy()));
    Ok(report)
}
