//! Provide traits for different classes of algorithms
//!

use crate::dataset::Dataset;
use crate::error::Result;

/// Fittable algorithms
///
/// Hyper-parameter structs implement `Fit` and produce a trained model, so a
/// single set of parameters can be fitted again on other data.
pub trait Fit {
    type Object;

    fn fit(&self, dataset: &Dataset) -> Result<Self::Object>;
}

/// Predict with a trained model
pub trait Predict<R, T> {
    fn predict(&self, x: R) -> T;
}

/// Transform records, e.g. scale features
pub trait Transformer<R, T> {
    fn transform(&self, x: R) -> T;
}
