//! `treesweep` trains decision trees at increasing depth ceilings on small
//! two-dimensional datasets and renders how the decision boundary evolves.
//!
//! This crate holds the pieces every other crate in the workspace shares: the
//! [`Dataset`] container, the error type, split criteria, feature scaling and
//! classification metrics. Tree induction lives in `treesweep-dtree`, data
//! synthesis in `treesweep-datasets` and rendering in `treesweep-sweep`.
//!

pub mod dataset;
pub mod entropy;
pub mod error;
mod metrics_classification;
pub mod preprocessing;
pub mod traits;

pub use dataset::{padded_bounds, Dataset, Label};
pub use error::{Error, Result};

/// Common metrics functions for classification
pub mod metrics {
    pub use crate::metrics_classification::{accuracy, ConfusionMatrix, ToConfusionMatrix};
}
