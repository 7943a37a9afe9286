use ndarray::{Array, Array1, Array2, ArrayBase, Data, Ix1};

/// Indices that sort `a`, ascending or with `reverse` descending.
///
/// Incomparable pairs (NaN) keep their relative order. The sort is stable,
/// so equal values keep index order.
pub fn partial_argsort<T: PartialOrd, S: Data<Elem = T>>(
    a: &ArrayBase<S, Ix1>,
    reverse: bool,
) -> Array<usize, Ix1> {
    let mut idx = (0..a.len()).collect::<Vec<usize>>();
    if reverse {
        idx.sort_by(|&i, &j| a[j].partial_cmp(&a[i]).unwrap_or(std::cmp::Ordering::Equal));
    } else {
        idx.sort_by(|&i, &j| a[i].partial_cmp(&a[j]).unwrap_or(std::cmp::Ordering::Equal));
    }
    Array::from(idx)
}

/// Evenly spaced values in `[start, stop)` with spacing `step`.
///
/// The length is `ceil((stop - start) / step)`, the same as numpy's `arange`.
/// An empty array is returned for an empty interval or a non-positive step.
pub fn arange(start: f64, stop: f64, step: f64) -> Array1<f64> {
    if !(step > 0.0) || !(stop > start) {
        return Array1::zeros(0);
    }
    let n = ((stop - start) / step).ceil() as usize;
    Array1::from_shape_fn(n, |i| start + i as f64 * step)
}

/// Coordinate matrices from two coordinate vectors, `xy` indexed.
///
/// Both outputs have shape `(ys.len(), xs.len())`: rows follow `ys`, columns
/// follow `xs`.
pub fn meshgrid(xs: &Array1<f64>, ys: &Array1<f64>) -> (Array2<f64>, Array2<f64>) {
    let shape = (ys.len(), xs.len());
    let xx = Array2::from_shape_fn(shape, |(_, j)| xs[j]);
    let yy = Array2::from_shape_fn(shape, |(i, _)| ys[i]);
    (xx, yy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn partial_argsort_works() {
        let a = Array::from(vec![-5.0_f64, 4.0_f64, 1.0_f64, -3.0_f64, 2.0_f64]);
        let idx = partial_argsort(&a, false);

        assert_eq!(idx, Array::from(vec![0, 3, 2, 4, 1]));
    }

    #[test]
    fn partial_argsort_works_in_case_of_reverse() {
        let a = Array::from(vec![-5.0_f64, 4.0_f64, 1.0_f64, -3.0_f64, 2.0_f64]);
        let idx = partial_argsort(&a, true);

        assert_eq!(idx, Array::from(vec![1, 4, 2, 3, 0]));
    }

    #[test]
    fn partial_argsort_is_stable_on_ties() {
        let a = Array::from(vec![1.0_f64, 0.0, 1.0, 0.0]);
        let idx = partial_argsort(&a.view(), false);

        assert_eq!(idx, Array::from(vec![1, 3, 0, 2]));
    }

    #[test]
    fn arange_works() {
        let a = arange(0.0, 1.0, 0.25);
        assert_eq!(a.len(), 4);
        assert_abs_diff_eq!(a[3], 0.75);

        let b = arange(-1.0, 1.01, 0.02);
        assert_eq!(b.len(), 101);
        assert!(b[100] < 1.01);
    }

    #[test]
    fn arange_handles_empty_interval() {
        assert_eq!(arange(1.0, 1.0, 0.1).len(), 0);
        assert_eq!(arange(0.0, 1.0, 0.0).len(), 0);
    }

    #[test]
    fn meshgrid_works() {
        let xs = Array::from(vec![0.0, 1.0, 2.0]);
        let ys = Array::from(vec![10.0, 20.0]);
        let (xx, yy) = meshgrid(&xs, &ys);

        assert_eq!(xx.shape(), &[2, 3]);
        assert_eq!(yy.shape(), &[2, 3]);
        assert_eq!(xx[[1, 2]], 2.0);
        assert_eq!(yy[[1, 2]], 20.0);
    }
}
