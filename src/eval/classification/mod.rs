//! Multi-class classification metrics backing annotation evaluation
//!
//! Confusion matrix, per-class precision/recall/F1, macro and weighted
//! averaging, and a text classification report.

mod average;
mod confusion;
mod metrics;
mod report;


pub use average::Average;
pub use confusion::ConfusionMatrix;
pub use metrics::ClassMetrics;
pub use report::classification_report;
