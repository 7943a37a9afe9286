//! Max-depth sweeps rendered as decision boundary animations
//!
//! [`render_sweep`] standardizes a labeled point set, lays an evaluation grid
//! over it and returns an [`Animation`]: one frame per depth ceiling, each
//! computed on demand from a freshly fitted tree. [`FrameRenderer`] draws a
//! frame onto any `plotters` backend and [`export`] writes the whole sweep to
//! a GIF.
//!
mod animation;
mod error;
pub mod export;
mod frame;
mod grid;
mod render;

pub use animation::{render_sweep, Animation, SweepConfig};
pub use error::{ExportError, SweepError};
pub use export::{
    export, export_frames, export_with, output_file_name, save_animations, save_rendered, ExportReport,
};
pub use frame::{FrameState, FrameStats};
pub use grid::{Grid, GRID_PADDING, GRID_STEP};
pub use render::FrameRenderer;

pub type Result<T> = std::result::Result<T, SweepError>;
