//! Depth-limited CART decision tree classifier
//!
//! Inner nodes are [`DecisionStump`]s, leaves are [`ZeroRule`] predictors.
//! Growth is greedy and never looks at the depth ceiling when choosing a
//! split, so a tree grown with a deeper ceiling extends the shallower one
//! without changing any of its splits.
//!
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use treesweep::entropy::Criterion;
use treesweep::traits::{Fit, Predict};
use treesweep::{Dataset, Error, Label, Result};
use treesweep_dstump::{feature_order, DecisionStump};
use treesweep_zeror::ZeroRule;

/// Hyper-parameters of a decision tree
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DecisionTreeParams {
    pub criterion: Criterion,
    /// Longest allowed root-to-leaf path, counted in splits. `None` grows
    /// until every leaf is pure or cannot be split.
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    /// Seeds the feature visiting order used to break ties between splits.
    pub seed: u64,
}

impl Default for DecisionTreeParams {
    fn default() -> Self {
        DecisionTreeParams {
            criterion: Criterion::Gini,
            max_depth: None,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

impl DecisionTreeParams {
    pub fn new() -> DecisionTreeParams {
        DecisionTreeParams::default()
    }

    pub fn criterion(mut self, criterion: Criterion) -> Self {
        self.criterion = criterion;
        self
    }

    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.min_samples_split = min_samples_split;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn check(&self) -> Result<()> {
        if self.max_depth == Some(0) {
            return Err(Error::invalid_parameter("max_depth must be at least 1"));
        }
        if self.min_samples_split < 2 {
            return Err(Error::invalid_parameter("min_samples_split must be at least 2"));
        }
        Ok(())
    }

    fn grow(
        &self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, Label>,
        nclasses: usize,
        depth: usize,
        node_id: u64,
    ) -> TreeNode {
        let leaf = ZeroRule::new().fit(&y, nclasses);
        let at_ceiling = self.max_depth.map_or(false, |m| depth >= m);
        let pure = leaf
            .proba()
            .map_or(true, |p| p.iter().filter(|&&v| v > 0.0).count() <= 1);
        if at_ceiling || pure || x.nrows() < self.min_samples_split {
            return TreeNode::Leaf(leaf);
        }

        let order = feature_order(x.ncols(), self.seed, node_id);
        let stump = match DecisionStump::new(self.criterion).fit(x, y, nclasses, &order) {
            Some(stump) => stump,
            None => return TreeNode::Leaf(leaf),
        };

        let (l, r) = stump.make_split(x);
        let left = self.grow(
            x.select(Axis(0), &l).view(),
            y.select(Axis(0), &l).view(),
            nclasses,
            depth + 1,
            node_id.wrapping_mul(2),
        );
        let right = self.grow(
            x.select(Axis(0), &r).view(),
            y.select(Axis(0), &r).view(),
            nclasses,
            depth + 1,
            node_id.wrapping_mul(2).wrapping_add(1),
        );
        TreeNode::Split {
            stump,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl Fit for DecisionTreeParams {
    type Object = DecisionTree;

    fn fit(&self, dataset: &Dataset) -> Result<DecisionTree> {
        self.check()?;
        if dataset.nsamples() == 0 {
            return Err(Error::EmptyDataset);
        }
        let nclasses = dataset.nclasses();
        let root = self.grow(dataset.records(), dataset.targets(), nclasses, 0, 1);
        Ok(DecisionTree {
            root,
            nclasses,
            nfeatures: dataset.nfeatures(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Leaf(ZeroRule),
    Split {
        stump: DecisionStump,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf(_))
    }

    fn predict_row(&self, row: ArrayView1<'_, f64>) -> Result<Label> {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf(leaf) => return leaf.predict().ok_or(Error::NotFitted),
                TreeNode::Split { stump, left, right } => {
                    node = if stump.goes_left(row) { &**left } else { &**right };
                }
            }
        }
    }

    fn node_count(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 1,
            TreeNode::Split { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 1,
            TreeNode::Split { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 0,
            TreeNode::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn print_leaf(&self, d: usize, out: &mut String) {
        match self {
            TreeNode::Split { stump, left, right } => {
                out.push_str(&"+".repeat(d));
                out.push_str(&format!("if {} then:\n", stump.str()));
                left.print_leaf(d + 1, out);
                out.push_str(&"|".repeat(d));
                out.push_str("else\n");
                right.print_leaf(d + 1, out);
            }
            TreeNode::Leaf(leaf) => {
                out.push_str(&"|".repeat(d.saturating_sub(1)));
                out.push_str(&format!(" {}\n", leaf.str()));
            }
        }
    }
}

/// Structural summary of a fitted tree
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeStats {
    pub node_count: usize,
    pub leaf_count: usize,
    /// Realized depth: splits on the longest root-to-leaf path.
    pub depth: usize,
}

/// A fitted decision tree classifier
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    root: TreeNode,
    nclasses: usize,
    nfeatures: usize,
}

impl DecisionTree {
    pub fn params() -> DecisionTreeParams {
        DecisionTreeParams::default()
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn nclasses(&self) -> usize {
        self.nclasses
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn stats(&self) -> TreeStats {
        TreeStats {
            node_count: self.node_count(),
            leaf_count: self.leaf_count(),
            depth: self.depth(),
        }
    }

    pub fn predict_row(&self, row: ArrayView1<'_, f64>) -> Result<Label> {
        if row.len() != self.nfeatures {
            return Err(Error::shape_mismatch(format!(
                "tree was fitted on {} features, got {}",
                self.nfeatures,
                row.len()
            )));
        }
        self.root.predict_row(row)
    }

    /// Text dump of the tree, one line per node.
    pub fn str(&self) -> String {
        let mut out = String::new();
        self.root.print_leaf(0, &mut out);
        out
    }
}

impl<'a> Predict<ArrayView2<'a, f64>, Result<Array1<Label>>> for DecisionTree {
    fn predict(&self, x: ArrayView2<'a, f64>) -> Result<Array1<Label>> {
        if x.ncols() != self.nfeatures {
            return Err(Error::shape_mismatch(format!(
                "tree was fitted on {} features, got {}",
                self.nfeatures,
                x.ncols()
            )));
        }
        x.outer_iter().map(|row| self.root.predict_row(row)).collect()
    }
}
