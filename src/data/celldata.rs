//! AnnData-like container

use crate::error::{Error, Result};
use ndarray::Array2;
use std::collections::BTreeMap;

/// In-memory container for a cells x genes matrix with per-cell annotation
/// columns and named embedding slots.
///
/// A small stand-in for the AnnData structure of the scverse ecosystem:
/// `x` is the expression matrix, `obs` holds per-cell string columns such as
/// cell types or split assignments, `obsm` holds per-cell matrices such as
/// learned embeddings.
#[derive(Clone, Debug)]
pub struct CellData {
    x: Array2<f64>,
    var_names: Vec<String>,
    obs: BTreeMap<String, Vec<String>>,
    obsm: BTreeMap<String, Array2<f64>>,
}

impl CellData {
    /// Create a container from an expression matrix and gene names
    pub fn new(x: Array2<f64>, var_names: Vec<String>) -> Result<Self> {
        if var_names.len() != x.ncols() {
            return Err(Error::InvalidParameter(format!(
                "{} gene names for a matrix with {} columns",
                var_names.len(),
                x.ncols()
            )));
        }
        Ok(Self {
            x,
            var_names,
            obs: BTreeMap::new(),
            obsm: BTreeMap::new(),
        })
    }

    /// Number of cells
    pub fn n_cells(&self) -> usize {
        self.x.nrows()
    }

    /// Number of genes
    pub fn n_genes(&self) -> usize {
        self.x.ncols()
    }

    /// The expression matrix
    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    /// Gene names
    pub fn var_names(&self) -> &[String] {
        &self.var_names
    }

    /// Insert a per-cell annotation column
    pub fn insert_obs(
        &mut self,
        key: impl Into<String>,
        values: Vec<String>,
    ) -> Result<()> {
        if values.len() != self.n_cells() {
            return Err(Error::InvalidParameter(format!(
                "{} values for {} cells",
                values.len(),
                self.n_cells()
            )));
        }
        self.obs.insert(key.into(), values);
        Ok(())
    }

    /// Get a per-cell annotation column
    pub fn obs(&self, key: &str) -> Option<&[String]> {
        self.obs.get(key).map(Vec::as_slice)
    }

    /// Encode an annotation column as dense integer labels.
    ///
    /// Distinct values are numbered in first-seen order; returns the labels
    /// and the number of distinct values.
    pub fn encoded_obs(&self, key: &str) -> Result<(Vec<usize>, usize)> {
        let column = self
            .obs
            .get(key)
            .ok_or_else(|| Error::FieldNotFound(key.to_string()))?;
        let mut codes: BTreeMap<&str, usize> = BTreeMap::new();
        let mut next = 0usize;
        let mut labels = Vec::with_capacity(column.len());
        for value in column {
            let code = *codes.entry(value.as_str()).or_insert_with(|| {
                let c = next;
                next += 1;
                c
            });
            labels.push(code);
        }
        Ok((labels, next))
    }

    /// Insert a per-cell embedding (cells x dims)
    pub fn insert_obsm(&mut self, key: impl Into<String>, emb: Array2<f64>) -> Result<()> {
        if emb.nrows() != self.n_cells() {
            return Err(Error::shape((self.n_cells(), emb.ncols()), emb.dim()));
        }
        self.obsm.insert(key.into(), emb);
        Ok(())
    }

    /// Get a per-cell embedding by key
    pub fn obsm(&self, key: &str) -> Option<&Array2<f64>> {
        self.obsm.get(key)
    }

    /// Indices of cells whose `field` column equals `value`
    pub fn cells_where(&self, field: &str, value: &str) -> Result<Vec<usize>> {
        let column = self
            .obs
            .get(field)
            .ok_or_else(|| Error::FieldNotFound(field.to_string()))?;
        Ok(column
            .iter()
            .enumerate()
            .filter(|(_, v)| v.as_str() == value)
            .map(|(i, _)| i)
            .collect())
    }
}
