use ndarray::{Array1, Array2, ArrayView2};

use treesweep::{padded_bounds, Error, Label};
use treesweep_numrs::{arange, meshgrid};

/// Distance between neighbouring grid coordinates on each axis.
pub const GRID_STEP: f64 = 0.02;

/// Margin added around the data's bounding box on each side.
pub const GRID_PADDING: f64 = 1.0;

/// Regular lattice of evaluation coordinates
///
/// Cell `(i, j)` sits at `(xs[j], ys[i])`. `points` lists every cell as a
/// row `[x, y]` in row-major order, ready to be fed to a classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    xs: Array1<f64>,
    ys: Array1<f64>,
    points: Array2<f64>,
}

impl Grid {
    /// Covers the bounding box of `records`, padded by `padding`, at `step`
    /// spacing. Axis coordinates follow `arange(min - padding, max + padding,
    /// step)`.
    pub fn covering(records: ArrayView2<'_, f64>, padding: f64, step: f64) -> treesweep::Result<Grid> {
        if records.ncols() != 2 {
            return Err(Error::shape_mismatch(format!(
                "grid needs 2 features, got {}",
                records.ncols()
            )));
        }
        if records.nrows() == 0 {
            return Err(Error::EmptyDataset);
        }
        if !(step > 0.0) {
            return Err(Error::invalid_parameter(format!("grid step must be positive, got {}", step)));
        }
        let ((x0, x1), (y0, y1)) = padded_bounds(records, padding);
        let xs = arange(x0, x1, step);
        let ys = arange(y0, y1, step);
        if xs.is_empty() || ys.is_empty() {
            return Err(Error::invalid_parameter("grid has no cells"));
        }

        let (xx, yy) = meshgrid(&xs, &ys);
        let nx = xs.len();
        let points = Array2::from_shape_fn((xx.len(), 2), |(k, c)| {
            let cell = [k / nx, k % nx];
            if c == 0 {
                xx[cell]
            } else {
                yy[cell]
            }
        });
        Ok(Grid { xs, ys, points })
    }

    pub fn xs(&self) -> &Array1<f64> {
        &self.xs
    }

    pub fn ys(&self) -> &Array1<f64> {
        &self.ys
    }

    pub fn points(&self) -> ArrayView2<'_, f64> {
        self.points.view()
    }

    /// `(rows, columns)`, i.e. `(ys.len(), xs.len())`.
    pub fn shape(&self) -> (usize, usize) {
        (self.ys.len(), self.xs.len())
    }

    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    /// `((x_min, x_max), (y_min, y_max))` of the cell centres.
    pub fn extent(&self) -> ((f64, f64), (f64, f64)) {
        let last = |a: &Array1<f64>| a[a.len() - 1];
        ((self.xs[0], last(&self.xs)), (self.ys[0], last(&self.ys)))
    }

    /// Lays one label per point back out on the grid.
    pub fn reshape(&self, labels: &Array1<Label>) -> treesweep::Result<Array2<u8>> {
        if labels.len() != self.len() {
            return Err(Error::shape_mismatch(format!(
                "{} labels for a grid of {} cells",
                labels.len(),
                self.len()
            )));
        }
        let cells = labels.iter().map(|&l| l as u8).collect::<Vec<u8>>();
        Array2::from_shape_vec(self.shape(), cells).map_err(|e| Error::shape_mismatch(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn covering_works() {
        let records = array![[0.0, 0.0], [1.0, 0.5]];
        let grid = Grid::covering(records.view(), 1.0, 0.5).unwrap();

        assert_eq!(grid.xs().len(), 6);
        assert_eq!(grid.ys().len(), 5);
        assert_eq!(grid.shape(), (5, 6));
        assert_eq!(grid.len(), 30);

        let ((x0, x1), (y0, y1)) = grid.extent();
        assert_abs_diff_eq!(x0, -1.0);
        assert_abs_diff_eq!(x1, 1.5);
        assert_abs_diff_eq!(y0, -1.0);
        assert_abs_diff_eq!(y1, 1.0);
    }

    #[test]
    fn points_are_row_major() {
        let records = array![[0.0, 0.0], [1.0, 1.0]];
        let grid = Grid::covering(records.view(), 0.0, 0.5).unwrap();
        let p = grid.points();

        assert_eq!(p.row(0).to_vec(), vec![0.0, 0.0]);
        assert_eq!(p.row(1).to_vec(), vec![0.5, 0.0]);
        assert_eq!(p.row(2).to_vec(), vec![0.0, 0.5]);
    }

    #[test]
    fn reshape_works() {
        let records = array![[0.0, 0.0], [1.0, 1.0]];
        let grid = Grid::covering(records.view(), 0.0, 0.5).unwrap();
        let labels = Array1::from_shape_fn(grid.len(), |k| k % 2);
        let cells = grid.reshape(&labels).unwrap();

        assert_eq!(cells.dim(), (2, 2));
        assert_eq!(cells, array![[0u8, 1], [0, 1]]);
        assert!(grid.reshape(&array![0, 1]).is_err());
    }

    #[test]
    fn covering_rejects_bad_input() {
        assert!(Grid::covering(array![[0.0, 1.0, 2.0]].view(), 1.0, 0.1).is_err());
        assert!(Grid::covering(array![[0.0, 1.0]].view(), 1.0, 0.0).is_err());
    }
}
