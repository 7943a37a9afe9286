//! Feature scaling
//!
use ndarray::{Array1, Array2, ArrayView2, Axis};

use crate::error::{Error, Result};
use crate::traits::Transformer;

/// Standardizes features to zero mean and unit variance.
///
/// Statistics are population statistics (`ddof = 0`). Columns with zero
/// variance are only centred.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    /// Computes per-column mean and standard deviation of `records`.
    pub fn fit(records: ArrayView2<'_, f64>) -> Result<StandardScaler> {
        let mean = records.mean_axis(Axis(0)).ok_or(Error::EmptyDataset)?;
        let scale = records.std_axis(Axis(0), 0.0).mapv(|v| if v == 0.0 { 1.0 } else { v });
        Ok(StandardScaler { mean, scale })
    }
}

impl<'a> Transformer<ArrayView2<'a, f64>, Array2<f64>> for StandardScaler {
    fn transform(&self, x: ArrayView2<'a, f64>) -> Array2<f64> {
        (&x - &self.mean) / &self.scale
    }
}
