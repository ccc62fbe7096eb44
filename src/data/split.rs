//! Train/valid/test assignment and k-fold splitting

use super::celldata::CellData;
use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Split membership of a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Split {
    Train,
    Valid,
    Test,
}

impl Split {
    /// Split name as written into the annotation column
    pub fn name(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Valid => "valid",
            Split::Test => "test",
        }
    }
}

/// Fractions of cells held out for validation and testing
#[derive(Clone, Copy, Debug)]
pub struct SplitFractions {
    pub valid: f64,
    pub test: f64,
}

impl Default for SplitFractions {
    fn default() -> Self {
        // 80/10/10, matching the reference experiment setup
        Self {
            valid: 0.1,
            test: 0.1,
        }
    }
}

impl SplitFractions {
    fn validate(&self) -> Result<()> {
        if self.valid < 0.0 || self.test < 0.0 || self.valid + self.test >= 1.0 {
            return Err(Error::InvalidParameter(format!(
                "invalid split fractions: valid {} + test {} must leave room for training",
                self.valid, self.test
            )));
        }
        Ok(())
    }
}

/// Assign every cell to train/valid/test by seeded permutation and write the
/// result into the `field` annotation column.
pub fn assign_splits(
    data: &mut CellData,
    field: &str,
    fractions: SplitFractions,
    seed: u64,
) -> Result<()> {
    fractions.validate()?;
    let n = data.n_cells();
    if n == 0 {
        return Err(Error::InvalidParameter(
            "cannot split a container with no cells".to_string(),
        ));
    }

    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);

    let n_valid = (n as f64 * fractions.valid).round() as usize;
    let n_test = (n as f64 * fractions.test).round() as usize;
    if n_valid + n_test >= n {
        return Err(Error::InvalidParameter(format!(
            "split leaves no training cells: {n} cells, {n_valid} valid, {n_test} test"
        )));
    }
    let n_train = n - n_valid - n_test;

    let mut column = vec![Split::Train.name().to_string(); n];
    for (rank, &cell) in order.iter().enumerate() {
        let split = if rank < n_train {
            Split::Train
        } else if rank < n_train + n_valid {
            Split::Valid
        } else {
            Split::Test
        };
        column[cell] = split.name().to_string();
    }
    data.insert_obs(field, column)
}

/// K-fold splitter for cross-validated evaluation.
///
/// Produces `(train_indices, test_indices)` pairs; indices are shuffled by
/// seed before folding so folds are reproducible.
#[derive(Clone, Debug)]
pub struct KFold {
    n_splits: usize,
    shuffle: bool,
    seed: u64,
}

impl KFold {
    /// Create a splitter with `n_splits` folds
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            shuffle: true,
            seed: 42,
        }
    }

    /// Set the shuffle seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Keep indices in input order
    pub fn without_shuffle(mut self) -> Self {
        self.shuffle = false;
        self
    }

    /// Generate train/test index pairs over `n_samples` items
    pub fn split(&self, n_samples: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
        if self.n_splits < 2 || self.n_splits > n_samples {
            return Err(Error::InvalidParameter(format!(
                "cannot split {} samples into {} folds",
                n_samples, self.n_splits
            )));
        }

        let mut indices: Vec<usize> = (0..n_samples).collect();
        if self.shuffle {
            let mut rng = StdRng::seed_from_u64(self.seed);
            indices.shuffle(&mut rng);
        }

        let fold_size = n_samples / self.n_splits;
        let remainder = n_samples % self.n_splits;

        let mut folds = Vec::with_capacity(self.n_splits);
        let mut start = 0;
        for i in 0..self.n_splits {
            let end = start + fold_size + usize::from(i < remainder);
            let test: Vec<usize> = indices[start..end].to_vec();
            let train: Vec<usize> = indices[..start]
                .iter()
                .chain(indices[end..].iter())
                .copied()
                .collect();
            folds.push((train, test));
            start = end;
        }
        Ok(folds)
    }
}
