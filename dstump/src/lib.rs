use ndarray::{ArrayView1, ArrayView2, Axis};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_isaac::Isaac64Rng;

use treesweep::entropy::Criterion;
use treesweep::Label;
use treesweep_numrs::partial_argsort;

/// A single axis-aligned split: `x[feat_index] <= feat_val` goes left.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionStump {
    criterion: Criterion,
    feat_index: usize,
    feat_val: f64,
    score: f64,
}

impl Default for DecisionStump {
    fn default() -> Self {
        DecisionStump::new(Criterion::Gini)
    }
}

impl DecisionStump {
    pub fn new(criterion: Criterion) -> DecisionStump {
        DecisionStump {
            criterion,
            feat_index: 0,
            feat_val: f64::NAN,
            score: f64::INFINITY,
        }
    }

    pub fn feat_index(&self) -> usize {
        self.feat_index
    }

    pub fn feat_val(&self) -> f64 {
        self.feat_val
    }

    /// Sample-weighted impurity of the two children.
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn make_loss(&self, left: &[f64], right: &[f64]) -> f64 {
        let nl: f64 = left.iter().sum();
        let nr: f64 = right.iter().sum();
        if nl == 0.0 || nr == 0.0 {
            return f64::INFINITY;
        }
        let total = nl + nr;
        self.criterion.impurity(left) * (nl / total) + self.criterion.impurity(right) * (nr / total)
    }

    /// Searches every feature in `feature_order` for the threshold with the
    /// lowest loss. Thresholds lie halfway between consecutive distinct values.
    ///
    /// Returns `None` when no feature has two distinct values. On equal loss
    /// the split found first is kept, so `feature_order` decides ties.
    pub fn fit(
        mut self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, Label>,
        nclasses: usize,
        feature_order: &[usize],
    ) -> Option<Self> {
        let n = x.nrows();
        let mut total = vec![0.0; nclasses];
        for &label in y.iter() {
            total[label] += 1.0;
        }

        let mut found = false;
        for &feat in feature_order {
            let col = x.index_axis(Axis(1), feat);
            let order = partial_argsort(&col, false);
            let mut left = vec![0.0; nclasses];
            let mut right = total.clone();
            for f in 1..n {
                let prev = order[f - 1];
                left[y[prev]] += 1.0;
                right[y[prev]] -= 1.0;

                let lo = col[prev];
                let hi = col[order[f]];
                if lo == hi {
                    continue;
                }
                let loss = self.make_loss(&left, &right);
                if loss < self.score {
                    let mut threshold = lo / 2.0 + hi / 2.0;
                    if threshold == hi {
                        threshold = lo;
                    }
                    self.score = loss;
                    self.feat_index = feat;
                    self.feat_val = threshold;
                    found = true;
                }
            }
        }

        if found {
            Some(self)
        } else {
            None
        }
    }

    pub fn goes_left(&self, row: ArrayView1<'_, f64>) -> bool {
        row[self.feat_index] <= self.feat_val
    }

    /// Row indices of `x` falling left and right of the threshold.
    pub fn make_split(&self, x: ArrayView2<'_, f64>) -> (Vec<usize>, Vec<usize>) {
        let mut left = Vec::new();
        let mut right = Vec::new();
        for (i, row) in x.outer_iter().enumerate() {
            if self.goes_left(row) {
                left.push(i);
            } else {
                right.push(i);
            }
        }
        (left, right)
    }

    pub fn str(&self) -> String {
        format!("feat[ {} ] <= {:.4}", self.feat_index, self.feat_val)
    }
}

/// Order in which a node visits features.
///
/// The order is drawn from an RNG seeded by `seed` and the node's heap index
/// (root 1, children `2i` and `2i + 1`), so it depends on where a node sits
/// in the tree and nothing else.
pub fn feature_order(nfeatures: usize, seed: u64, node_id: u64) -> Vec<usize> {
    let mut order = (0..nfeatures).collect::<Vec<usize>>();
    let mut rng = Isaac64Rng::seed_from_u64(seed ^ node_id.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    order.shuffle(&mut rng);
    order
}
