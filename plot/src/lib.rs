//! Drawing primitives for labeled 2D point sets
//!
//! Everything here draws onto a caller-provided `plotters` drawing area or
//! chart, so the same code renders the static overview PNG and every frame of
//! a GIF animation.
//!
use std::path::Path;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;

use treesweep::{Dataset, Label};

/// Class palette: `#FF0000` for class 0, `#0000FF` for class 1.
pub const CLASS_COLORS: [RGBColor; 2] = [RGBColor(0xFF, 0x00, 0x00), RGBColor(0x00, 0x00, 0xFF)];

/// Opacity of the filled decision regions.
pub const REGION_ALPHA: f64 = 0.3;

pub const POINT_RADIUS: i32 = 4;

pub type Chart2d<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("drawing failed: {0}")]
    Drawing(String),
    #[error("nothing to plot: {0}")]
    Empty(String),
}

impl PlotError {
    pub fn drawing<E: std::fmt::Display>(err: E) -> Self {
        PlotError::Drawing(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;

pub fn class_color(label: Label) -> RGBColor {
    CLASS_COLORS[label % CLASS_COLORS.len()]
}

/// Scatters points coloured by class with a black outline. With `legend`
/// set, each class gets a legend entry `Class k`.
pub fn draw_scatter<DB: DrawingBackend>(
    chart: &mut Chart2d<'_, DB>,
    records: ArrayView2<'_, f64>,
    targets: ArrayView1<'_, Label>,
    legend: bool,
) -> Result<()> {
    for (label, color) in CLASS_COLORS.iter().enumerate() {
        let color = *color;
        let points = records
            .outer_iter()
            .zip(targets.iter())
            .filter(|(_, t)| **t == label)
            .map(|(row, _)| (row[0], row[1]))
            .collect::<Vec<_>>();

        let series = chart
            .draw_series(
                points
                    .iter()
                    .map(|&p| Circle::new(p, POINT_RADIUS, color.filled())),
            )
            .map_err(PlotError::drawing)?;
        if legend {
            series
                .label(format!("Class {}", label))
                .legend(move |(x, y)| Circle::new((x, y), POINT_RADIUS, color.filled()));
        }
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&p| Circle::new(p, POINT_RADIUS, BLACK.stroke_width(1))),
            )
            .map_err(PlotError::drawing)?;
    }
    Ok(())
}

/// Fills each grid cell with the tinted colour of its predicted class.
///
/// `classes[[i, j]]` is the class at `(xs[j], ys[i])`. Cells are centred on
/// their coordinates; runs of equal cells along a row are merged into one
/// rectangle.
pub fn draw_region<DB: DrawingBackend>(
    chart: &mut Chart2d<'_, DB>,
    xs: &Array1<f64>,
    ys: &Array1<f64>,
    classes: &Array2<u8>,
) -> Result<()> {
    let (ny, nx) = classes.dim();
    if nx == 0 || ny == 0 || xs.len() != nx || ys.len() != ny {
        return Err(PlotError::Empty(format!(
            "grid of {}x{} cells with {} x and {} y coordinates",
            ny,
            nx,
            xs.len(),
            ys.len()
        )));
    }
    let hx = if nx > 1 { (xs[1] - xs[0]) / 2.0 } else { 0.5 };
    let hy = if ny > 1 { (ys[1] - ys[0]) / 2.0 } else { 0.5 };

    let mut cells = Vec::new();
    for i in 0..ny {
        let mut start = 0;
        for j in 1..=nx {
            if j == nx || classes[[i, j]] != classes[[i, start]] {
                let color = class_color(classes[[i, start]] as Label).mix(REGION_ALPHA);
                cells.push(Rectangle::new(
                    [(xs[start] - hx, ys[i] - hy), (xs[j - 1] + hx, ys[i] + hy)],
                    color.filled(),
                ));
                start = j;
            }
        }
    }
    chart.draw_series(cells).map_err(PlotError::drawing)?;
    Ok(())
}

/// Boxed text lines in the top left corner of `area`.
pub fn draw_text_box<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    origin: (i32, i32),
    lines: &[String],
    font_size: u32,
) -> Result<()> {
    let line_height = font_size as i32 + 4;
    let width = lines.iter().map(|l| l.len()).max().unwrap_or(0) as i32 * font_size as i32 * 6 / 10;
    let (x0, y0) = origin;
    let corner = (x0 + width + 16, y0 + line_height * lines.len() as i32 + 12);

    area.draw(&Rectangle::new([origin, corner], WHITE.mix(0.8).filled()))
        .map_err(PlotError::drawing)?;
    area.draw(&Rectangle::new([origin, corner], BLACK.stroke_width(1)))
        .map_err(PlotError::drawing)?;
    for (k, line) in lines.iter().enumerate() {
        area.draw(&Text::new(
            line.clone(),
            (x0 + 8, y0 + 6 + k as i32 * line_height),
            ("monospace", f64::from(font_size)).into_font(),
        ))
        .map_err(PlotError::drawing)?;
    }
    Ok(())
}

/// Draws one captioned, axis-labeled scatter panel of `dataset`.
pub fn draw_dataset_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    dataset: &Dataset,
    title: &str,
) -> Result<()> {
    if dataset.nfeatures() != 2 {
        return Err(PlotError::Empty(format!(
            "{} has {} features, expected 2",
            title,
            dataset.nfeatures()
        )));
    }
    let ((x0, x1), (y0, y1)) = dataset.padded_bounds(0.5);

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(PlotError::drawing)?;
    chart
        .configure_mesh()
        .x_desc("Feature 1")
        .y_desc("Feature 2")
        .disable_mesh()
        .draw()
        .map_err(PlotError::drawing)?;

    draw_scatter(&mut chart, dataset.records(), dataset.targets(), true)?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(PlotError::drawing)?;
    Ok(())
}

/// Renders one row of scatter panels, one per `(dataset, title)` pair, to a
/// PNG at `path`.
#[tracing::instrument(skip(datasets), fields(panels = datasets.len()))]
pub fn plot_datasets(path: &Path, datasets: &[(&Dataset, &str)], size: (u32, u32)) -> Result<()> {
    if datasets.is_empty() {
        return Err(PlotError::Empty(String::from("no datasets given")));
    }
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(PlotError::drawing)?;

    let panels = root.split_evenly((1, datasets.len()));
    for (panel, (dataset, title)) in panels.iter().zip(datasets.iter()) {
        draw_dataset_panel(panel, dataset, title)?;
    }
    root.present().map_err(PlotError::drawing)?;
    tracing::info!(path = %path.display(), "wrote dataset overview");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    const W: u32 = 40;
    const H: u32 = 40;

    fn pixel(buf: &[u8], x: u32, y: u32) -> (u8, u8, u8) {
        let k = ((y * W + x) * 3) as usize;
        (buf[k], buf[k + 1], buf[k + 2])
    }

    #[test]
    fn draw_region_tints_by_class() {
        let mut buf = vec![0u8; (W * H * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (W, H)).into_drawing_area();
            root.fill(&WHITE).unwrap();
            let mut chart = ChartBuilder::on(&root)
                .build_cartesian_2d(0.0..2.0, 0.0..1.0)
                .unwrap();
            let xs = array![0.5, 1.5];
            let ys = array![0.5];
            let classes = array![[0u8, 1u8]];
            draw_region(&mut chart, &xs, &ys, &classes).unwrap();
            root.present().unwrap();
        }

        let (r, g, b) = pixel(&buf, 8, 20);
        assert!(r > b && r > g, "left half should be red tinted, got {:?}", (r, g, b));
        let (r, g, b) = pixel(&buf, 32, 20);
        assert!(b > r && b > g, "right half should be blue tinted, got {:?}", (r, g, b));
    }

    #[test]
    fn draw_region_rejects_mismatched_grid() {
        let mut buf = vec![0u8; (W * H * 3) as usize];
        let root = BitMapBackend::with_buffer(&mut buf, (W, H)).into_drawing_area();
        let mut chart = ChartBuilder::on(&root)
            .build_cartesian_2d(0.0..1.0, 0.0..1.0)
            .unwrap();
        let res = draw_region(&mut chart, &array![0.5], &array![0.5, 0.7], &array![[0u8]]);
        assert!(matches!(res, Err(PlotError::Empty(_))));
    }

    #[test]
    fn plot_datasets_rejects_empty_input() {
        let res = plot_datasets(Path::new("unused.png"), &[], (100, 100));
        assert!(matches!(res, Err(PlotError::Empty(_))));
    }
}
