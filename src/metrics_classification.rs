//! Common metrics for classification
//!
use std::fmt;

use ndarray::{Array2, ArrayBase, Data, Ix1};

use crate::dataset::Label;
use crate::error::{Error, Result};

/// Fraction of predictions equal to the ground truth.
pub fn accuracy<S, T>(predicted: &ArrayBase<S, Ix1>, truth: &ArrayBase<T, Ix1>) -> Result<f64>
where
    S: Data<Elem = Label>,
    T: Data<Elem = Label>,
{
    Ok(predicted.confusion_matrix(truth)?.accuracy())
}

/// Counts of (predicted, truth) label pairs
///
/// Rows are indexed by the predicted label, columns by the true label.
#[derive(Clone, PartialEq)]
pub struct ConfusionMatrix {
    matrix: Array2<usize>,
}

impl ConfusionMatrix {
    pub fn nclasses(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn total(&self) -> usize {
        self.matrix.sum()
    }

    pub fn correct(&self) -> usize {
        self.matrix.diag().sum()
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.correct() as f64 / total as f64
    }
}

impl fmt::Debug for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>8} | truth", "pred")?;
        for (i, row) in self.matrix.outer_iter().enumerate() {
            write!(f, "{:>8} |", i)?;
            for v in row.iter() {
                write!(f, " {:>6}", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub trait ToConfusionMatrix<T> {
    fn confusion_matrix(&self, truth: T) -> Result<ConfusionMatrix>;
}

impl<S, T> ToConfusionMatrix<&ArrayBase<T, Ix1>> for ArrayBase<S, Ix1>
where
    S: Data<Elem = Label>,
    T: Data<Elem = Label>,
{
    fn confusion_matrix(&self, truth: &ArrayBase<T, Ix1>) -> Result<ConfusionMatrix> {
        if self.len() != truth.len() {
            return Err(Error::shape_mismatch(format!(
                "{} predictions but {} targets",
                self.len(),
                truth.len()
            )));
        }
        if self.is_empty() {
            return Err(Error::EmptyDataset);
        }
        let nclasses = self
            .iter()
            .chain(truth.iter())
            .copied()
            .max()
            .map_or(0, |m| m + 1);
        let mut matrix = Array2::zeros((nclasses, nclasses));
        for (p, t) in self.iter().zip(truth.iter()) {
            matrix[[*p, *t]] += 1;
        }
        Ok(ConfusionMatrix { matrix })
    }
}
