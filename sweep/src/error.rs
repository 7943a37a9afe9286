use std::path::PathBuf;

use thiserror::Error;
use treesweep_plot::PlotError;

/// Errors while fitting or drawing the frames of a sweep
#[derive(Error, Debug)]
pub enum SweepError {
    #[error(transparent)]
    Model(#[from] treesweep::Error),
    #[error(transparent)]
    Plot(#[from] PlotError),
    #[error("frame {index} is out of range for a sweep of {len} frames")]
    FrameOutOfRange { index: usize, len: usize },
}

/// Errors while writing an animation to disk
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("no GIF encoder available: built without the `gif` feature")]
    BackendUnavailable,
    #[error("frames per second must be positive")]
    InvalidFrameRate,
    #[error("could not write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },
    #[error(transparent)]
    Sweep(#[from] SweepError),
}
