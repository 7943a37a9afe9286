use serde::{Deserialize, Serialize};

/// Gini impurity of a node from its per-class sample counts.
pub fn gini(counts: &[f64]) -> f64 {
    let size: f64 = counts.iter().sum();
    if size == 0.0 {
        return 0.0;
    }
    let score: f64 = counts.iter().map(|c| (c / size).powi(2)).sum();
    1.0 - score
}

/// Shannon entropy (in bits) of a node from its per-class sample counts.
pub fn infgain(counts: &[f64]) -> f64 {
    let size: f64 = counts.iter().sum();
    if size == 0.0 {
        return 0.0;
    }
    let mut score = 0.0;
    for c in counts.iter() {
        let p = c / size;
        if p != 0.0 {
            score += p * p.log2();
        }
    }
    -score
}

/// Impurity measure used to rank candidate splits.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    Gini,
    Entropy,
}

impl Default for Criterion {
    fn default() -> Self {
        Criterion::Gini
    }
}

impl Criterion {
    pub fn impurity(self, counts: &[f64]) -> f64 {
        match self {
            Criterion::Gini => gini(counts),
            Criterion::Entropy => infgain(counts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn gini_works() {
        assert_abs_diff_eq!(gini(&[5.0, 5.0]), 0.5);
        assert_abs_diff_eq!(gini(&[10.0, 0.0]), 0.0);
        assert_abs_diff_eq!(gini(&[1.0, 3.0]), 0.375);
    }

    #[test]
    fn infgain_works() {
        assert_abs_diff_eq!(infgain(&[5.0, 5.0]), 1.0);
        assert_abs_diff_eq!(infgain(&[0.0, 7.0]), 0.0);
        assert_abs_diff_eq!(infgain(&[1.0, 3.0]), 0.811_278_124_459_132_8, epsilon = 1e-12);
    }

    #[test]
    fn empty_node_is_pure() {
        assert_eq!(gini(&[0.0, 0.0]), 0.0);
        assert_eq!(infgain(&[]), 0.0);
    }

    #[test]
    fn criterion_dispatch_works() {
        let counts = [2.0, 6.0];
        assert_eq!(Criterion::Gini.impurity(&counts), gini(&counts));
        assert_eq!(Criterion::Entropy.impurity(&counts), infgain(&counts));
        assert_eq!(Criterion::default(), Criterion::Gini);
    }
}
