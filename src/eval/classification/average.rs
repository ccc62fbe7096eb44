//! Averaging strategies for per-class metrics

/// How per-class metric values are reduced to a single number
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Average {
    /// Unweighted mean over classes
    Macro,
    /// Mean over classes weighted by class support
    Weighted,
}
