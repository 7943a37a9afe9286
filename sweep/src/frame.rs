use ndarray::Array2;
use serde::{Deserialize, Serialize};

use treesweep_dtree::DecisionTree;

/// Readout shown next to every frame
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct FrameStats {
    pub node_count: usize,
    pub leaf_count: usize,
    /// Realized depth, at most the frame's ceiling.
    pub depth: usize,
    /// Accuracy on the training points.
    pub accuracy: f64,
}

impl FrameStats {
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Nodes: {}", self.node_count),
            format!("Leaves: {}", self.leaf_count),
            format!("Depth: {}", self.depth),
            format!("Accuracy: {:.2}", self.accuracy),
        ]
    }
}

/// Everything derived for one depth ceiling
#[derive(Debug, Clone, PartialEq)]
pub struct FrameState {
    pub index: usize,
    pub max_depth: usize,
    pub tree: DecisionTree,
    /// Predicted class per grid cell, shaped like the grid.
    pub classes: Array2<u8>,
    pub stats: FrameStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_works() {
        let stats = FrameStats {
            node_count: 7,
            leaf_count: 4,
            depth: 2,
            accuracy: 0.876,
        };
        assert_eq!(
            stats.lines(),
            vec!["Nodes: 7", "Leaves: 4", "Depth: 2", "Accuracy: 0.88"]
        );
    }
}
