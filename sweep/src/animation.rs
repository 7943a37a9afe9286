use std::time::Duration;

use ndarray::{ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use treesweep::entropy::Criterion;
use treesweep::metrics::accuracy;
use treesweep::preprocessing::StandardScaler;
use treesweep::traits::{Fit, Predict, Transformer};
use treesweep::{Dataset, Error, Label};
use treesweep_dtree::DecisionTreeParams;

use crate::frame::{FrameState, FrameStats};
use crate::grid::{Grid, GRID_PADDING, GRID_STEP};
use crate::{Result, SweepError};

/// Settings of one depth sweep
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SweepConfig {
    /// Depth ceiling of each frame, in frame order.
    pub depths: Vec<usize>,
    /// Pause between frames during playback.
    pub frame_interval_ms: u64,
    /// Training seed shared by every frame.
    pub seed: u64,
    pub criterion: Criterion,
    pub grid_step: f64,
    pub grid_padding: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            depths: (1..=10).collect(),
            frame_interval_ms: 500,
            seed: 42,
            criterion: Criterion::Gini,
            grid_step: GRID_STEP,
            grid_padding: GRID_PADDING,
        }
    }
}

impl SweepConfig {
    pub fn check(&self) -> treesweep::Result<()> {
        if self.depths.is_empty() {
            return Err(Error::invalid_parameter("depth sequence is empty"));
        }
        if let Some(pos) = self.depths.iter().position(|&d| d == 0) {
            return Err(Error::invalid_parameter(format!(
                "depth sequence entry {} is 0, depths must be positive",
                pos
            )));
        }
        Ok(())
    }
}

/// A finite, replayable sequence of frames over one dataset
///
/// Only the first frame is kept. Every other frame is refitted from scratch
/// when asked for, with the same seed, so `frame(i)` always returns the same
/// state.
#[derive(Debug, Clone)]
pub struct Animation {
    label: String,
    dataset: Dataset,
    grid: Grid,
    config: SweepConfig,
    first: FrameState,
}

/// Builds the animation of `depth_sequence` over `points` and `labels`.
///
/// Features are standardized with statistics of `points`, and the first
/// frame is fitted right away so that training failures surface here.
#[tracing::instrument(skip(points, labels), fields(samples = points.nrows()))]
pub fn render_sweep(
    points: ArrayView2<'_, f64>,
    labels: ArrayView1<'_, Label>,
    depth_sequence: &[usize],
    frame_interval_ms: u64,
    label: &str,
) -> Result<Animation> {
    let config = SweepConfig {
        depths: depth_sequence.to_vec(),
        frame_interval_ms,
        ..SweepConfig::default()
    };
    Animation::new(points, labels, config, label)
}

impl Animation {
    pub fn new(
        points: ArrayView2<'_, f64>,
        labels: ArrayView1<'_, Label>,
        config: SweepConfig,
        label: &str,
    ) -> Result<Animation> {
        config.check()?;
        if points.nrows() < 2 {
            return Err(Error::invalid_parameter(format!(
                "need at least 2 points, got {}",
                points.nrows()
            ))
            .into());
        }
        let scaler = StandardScaler::fit(points)?;
        let dataset = Dataset::new(scaler.transform(points), labels.to_owned())?;
        let grid = Grid::covering(dataset.records(), config.grid_padding, config.grid_step)?;
        debug!(label, cells = grid.len(), frames = config.depths.len(), "prepared sweep");

        let params = tree_params(&config);
        let first = fit_frame(&dataset, &grid, &params, 0, config.depths[0])?;
        Ok(Animation {
            label: label.to_string(),
            dataset,
            grid,
            config,
            first,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.config.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.config.depths.is_empty()
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.config.frame_interval_ms)
    }

    /// The standardized training points.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn frame(&self, index: usize) -> Result<FrameState> {
        if index == 0 {
            return Ok(self.first.clone());
        }
        let max_depth = *self.config.depths.get(index).ok_or(SweepError::FrameOutOfRange {
            index,
            len: self.len(),
        })?;
        fit_frame(&self.dataset, &self.grid, &tree_params(&self.config), index, max_depth)
    }

    /// Every frame in order, each computed when the iterator reaches it.
    pub fn frames(&self) -> impl Iterator<Item = Result<FrameState>> + '_ {
        (0..self.len()).map(move |i| self.frame(i))
    }
}

fn tree_params(config: &SweepConfig) -> DecisionTreeParams {
    DecisionTreeParams::new()
        .criterion(config.criterion)
        .seed(config.seed)
}

fn fit_frame(
    dataset: &Dataset,
    grid: &Grid,
    params: &DecisionTreeParams,
    index: usize,
    max_depth: usize,
) -> Result<FrameState> {
    let tree = params.clone().max_depth(Some(max_depth)).fit(dataset)?;
    let classes = grid.reshape(&tree.predict(grid.points())?)?;
    let fitted = tree.predict(dataset.records())?;

    let tree_stats = tree.stats();
    let stats = FrameStats {
        node_count: tree_stats.node_count,
        leaf_count: tree_stats.leaf_count,
        depth: tree_stats.depth,
        accuracy: accuracy(&fitted, &dataset.targets)?,
    };
    debug!(index, max_depth, ?stats, "fitted frame");
    Ok(FrameState {
        index,
        max_depth,
        tree,
        classes,
        stats,
    })
}
