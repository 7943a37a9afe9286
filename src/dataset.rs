//! Labeled point sets
//!
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::error::{Error, Result};

/// Class labels are dense indices starting at zero.
pub type Label = usize;

/// A set of feature vectors paired one to one with class labels.
///
/// `records` has one row per sample, `targets` one label per row. Both are
/// owned so that a dataset can be generated once and then shared read-only
/// between the overview figure and every frame of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub records: Array2<f64>,
    pub targets: Array1<Label>,
}

impl Dataset {
    /// Pairs `records` with `targets`, checking that they line up.
    pub fn new(records: Array2<f64>, targets: Array1<Label>) -> Result<Dataset> {
        if records.nrows() != targets.len() {
            return Err(Error::shape_mismatch(format!(
                "{} records but {} targets",
                records.nrows(),
                targets.len()
            )));
        }
        if records.nrows() == 0 {
            return Err(Error::EmptyDataset);
        }
        Ok(Dataset { records, targets })
    }

    pub fn nsamples(&self) -> usize {
        self.records.nrows()
    }

    pub fn nfeatures(&self) -> usize {
        self.records.ncols()
    }

    /// Number of classes, taken as one past the largest label.
    pub fn nclasses(&self) -> usize {
        self.targets.iter().copied().max().map_or(0, |m| m + 1)
    }

    /// Sample count per class, indexed by label.
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.nclasses()];
        for &t in self.targets.iter() {
            counts[t] += 1;
        }
        counts
    }

    pub fn records(&self) -> ArrayView2<'_, f64> {
        self.records.view()
    }

    pub fn targets(&self) -> ArrayView1<'_, Label> {
        self.targets.view()
    }

    /// Bounding box of the first two features, widened by `pad` on every
    /// side.
    pub fn padded_bounds(&self, pad: f64) -> ((f64, f64), (f64, f64)) {
        padded_bounds(self.records(), pad)
    }
}

/// `(min - pad, max + pad)` per axis over the first two columns of `records`.
pub fn padded_bounds(records: ArrayView2<'_, f64>, pad: f64) -> ((f64, f64), (f64, f64)) {
    let mut b = [(f64::INFINITY, f64::NEG_INFINITY); 2];
    for row in records.outer_iter() {
        for (k, bound) in b.iter_mut().enumerate().take(row.len()) {
            bound.0 = bound.0.min(row[k]);
            bound.1 = bound.1.max(row[k]);
        }
    }
    ((b[0].0 - pad, b[0].1 + pad), (b[1].0 - pad, b[1].1 + pad))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn new_rejects_mismatched_lengths() {
        let res = Dataset::new(array![[0.0, 1.0], [1.0, 0.0]], array![0]);
        assert!(matches!(res, Err(Error::ShapeMismatch(_))));
    }

    #[test]
    fn new_rejects_empty() {
        let res = Dataset::new(Array2::zeros((0, 2)), Array1::zeros(0));
        assert_eq!(res, Err(Error::EmptyDataset));
    }

    #[test]
    fn class_counts_works() {
        let ds = Dataset::new(
            array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]],
            array![1, 0, 1],
        )
        .unwrap();
        assert_eq!(ds.nclasses(), 2);
        assert_eq!(ds.class_counts(), vec![1, 2]);
    }

    #[test]
    fn padded_bounds_works() {
        let ds = Dataset::new(array![[-1.0, 3.0], [2.0, -4.0]], array![0, 1]).unwrap();
        assert_eq!(ds.padded_bounds(0.0), ((-1.0, 2.0), (-4.0, 3.0)));
        assert_eq!(ds.padded_bounds(1.0), ((-2.0, 3.0), (-5.0, 4.0)));
        let records = array![[0.0, -1.0], [2.0, 3.0]];
        assert_eq!(padded_bounds(records.view(), 1.0), ((-1.0, 3.0), (-2.0, 4.0)));
    }
}
