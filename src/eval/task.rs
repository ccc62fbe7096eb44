//! Downstream task definitions

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Downstream evaluation tasks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Task {
    /// Cell type annotation (multi-class classification)
    Annotation,
    /// Expression denoising against masked-out counts
    Denoising,
    /// Gene expression imputation
    Imputation,
    /// Embedding quality via clustering agreement
    Clustering,
    /// Perturbation response prediction (disabled in this release)
    PerturbationPrediction,
}

impl Task {
    /// Task name as used on the command line and in score files
    pub fn name(&self) -> &'static str {
        match self {
            Task::Annotation => "annotation",
            Task::Denoising => "denoising",
            Task::Imputation => "imputation",
            Task::Clustering => "clustering",
            Task::PerturbationPrediction => "perturbation_prediction",
        }
    }
}

impl FromStr for Task {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "annotation" => Ok(Task::Annotation),
            "denoising" => Ok(Task::Denoising),
            "imputation" => Ok(Task::Imputation),
            "clustering" => Ok(Task::Clustering),
            "perturbation_prediction" => Ok(Task::PerturbationPrediction),
            other => Err(Error::UnsupportedTask(other.to_string())),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_round_trip() {
        for task in [
            Task::Annotation,
            Task::Denoising,
            Task::Imputation,
            Task::Clustering,
            Task::PerturbationPrediction,
        ] {
            assert_eq!(task.name().parse::<Task>().unwrap(), task);
        }
    }

    #[test]
    fn test_unknown_task_names_the_offender() {
        let err = "embedding".parse::<Task>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedTask(ref t) if t == "embedding"));
    }
}
