use ndarray::{Array1, ArrayBase, Data, Ix1};

use treesweep::Label;

/// Zero-rule predictor: always answers the majority class it was fitted on.
///
/// Used for the leaves of a decision tree. It keeps the class frequencies,
/// not just the winner, so the tree dump can show how pure a leaf is.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroRule {
    r: Option<Array1<f64>>,
}

impl Default for ZeroRule {
    fn default() -> Self {
        ZeroRule { r: None }
    }
}

impl ZeroRule {
    pub fn new() -> ZeroRule {
        ZeroRule { r: None }
    }

    /// Fits on the labels that reached this leaf. `nclasses` fixes the length
    /// of the frequency vector so that absent classes count as zero.
    pub fn fit<S: Data<Elem = Label>>(mut self, y: &ArrayBase<S, Ix1>, nclasses: usize) -> Self {
        let mut counts = vec![0.0; nclasses];
        for &label in y.iter() {
            counts[label] += 1.0;
        }
        self.r = Some(Array1::from(counts));
        self
    }

    /// Class frequencies normalised to sum to one.
    pub fn proba(&self) -> Option<Array1<f64>> {
        let r = self.r.as_ref()?;
        let total = r.sum();
        if total == 0.0 {
            return Some(r.clone());
        }
        Some(r.mapv(|v| v / total))
    }

    /// Majority class. Ties go to the lowest label.
    pub fn predict(&self) -> Option<Label> {
        let r = self.r.as_ref()?;
        let mut best = 0;
        for (i, &v) in r.iter().enumerate() {
            if v > r[best] {
                best = i;
            }
        }
        Some(best)
    }

    pub fn str(&self) -> String {
        match self.proba() {
            None => String::from("None"),
            Some(p) => {
                let parts = p.iter().map(|v| format!("{:.3}", v)).collect::<Vec<_>>();
                format!("[{}]", parts.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn zero_rule_works() {
        let y = array![1, 0, 1, 1];
        let model = ZeroRule::new().fit(&y, 2);

        assert_eq!(model.predict(), Some(1));
        let p = model.proba().unwrap();
        assert_abs_diff_eq!(p[0], 0.25);
        assert_abs_diff_eq!(p[1], 0.75);
    }

    #[test]
    fn ties_go_to_lowest_label() {
        let model = ZeroRule::new().fit(&array![1, 0, 0, 1, 1, 0], 2);
        assert_eq!(model.predict(), Some(0));
    }

    #[test]
    fn unfitted_predicts_nothing() {
        let model = ZeroRule::default();
        assert_eq!(model.predict(), None);
        assert_eq!(model.str(), "None");
    }

    #[test]
    fn str_works() {
        let model = ZeroRule::new().fit(&array![1, 1, 0, 1], 2);
        assert_eq!(model.str(), "[0.250, 0.750]");
    }
}
