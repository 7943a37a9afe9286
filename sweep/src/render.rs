use plotters::coord::Shift;
use plotters::prelude::*;

use treesweep_plot::{draw_region, draw_scatter, draw_text_box, PlotError};

use crate::animation::Animation;
use crate::frame::FrameState;
use crate::Result;

/// Draws frames of an [`Animation`] onto a drawing area
///
/// Each call to [`FrameRenderer::draw`] clears the area and repaints the
/// decision region, the training points and, when `annotate` is set, the
/// caption, axis labels and stats box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRenderer {
    pub size: (u32, u32),
    pub font_size: u32,
    pub annotate: bool,
}

impl Default for FrameRenderer {
    fn default() -> Self {
        FrameRenderer {
            size: (800, 600),
            font_size: 16,
            annotate: true,
        }
    }
}

impl FrameRenderer {
    /// Regions and points only, no text.
    pub fn plain(size: (u32, u32)) -> Self {
        FrameRenderer {
            size,
            annotate: false,
            ..FrameRenderer::default()
        }
    }

    pub fn caption(animation: &Animation, frame: &FrameState) -> String {
        format!("{} Dataset - Max Depth: {}", animation.label(), frame.max_depth)
    }

    pub fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        animation: &Animation,
        frame: &FrameState,
    ) -> Result<()> {
        area.fill(&WHITE).map_err(PlotError::drawing)?;

        let grid = animation.grid();
        let half = animation.config().grid_step / 2.0;
        let ((x0, x1), (y0, y1)) = grid.extent();

        let mut builder = ChartBuilder::on(area);
        builder.margin(10);
        if self.annotate {
            builder
                .caption(
                    FrameRenderer::caption(animation, frame),
                    ("sans-serif", self.font_size + 6),
                )
                .x_label_area_size(40)
                .y_label_area_size(50);
        }
        let mut chart = builder
            .build_cartesian_2d(x0 - half..x1 + half, y0 - half..y1 + half)
            .map_err(PlotError::drawing)?;
        if self.annotate {
            chart
                .configure_mesh()
                .x_desc("Feature 1 (scaled)")
                .y_desc("Feature 2 (scaled)")
                .disable_mesh()
                .draw()
                .map_err(PlotError::drawing)?;
        }

        draw_region(&mut chart, grid.xs(), grid.ys(), &frame.classes)?;
        let dataset = animation.dataset();
        draw_scatter(&mut chart, dataset.records(), dataset.targets(), false)?;

        if self.annotate {
            draw_text_box(area, (70, 50), &frame.stats.lines(), self.font_size)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_sweep;
    use ndarray::array;

    #[test]
    fn draw_fills_regions_without_text() {
        let x = array![[0.0, 0.0], [0.2, 0.1], [2.0, 2.0], [2.1, 1.9]];
        let y = array![0, 0, 1, 1];
        let anim = render_sweep(x.view(), y.view(), &[1], 500, "Toy").unwrap();
        let frame = anim.frame(0).unwrap();

        let (w, h) = (60u32, 60u32);
        let mut buf = vec![0u8; (w * h * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
            FrameRenderer::plain((w, h)).draw(&root, &anim, &frame).unwrap();
            root.present().unwrap();
        }
        assert!(buf.chunks(3).any(|p| p[0] > p[2]));
        assert!(buf.chunks(3).any(|p| p[2] > p[0]));
    }

    #[test]
    fn caption_names_label_and_depth() {
        let x = array![[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]];
        let y = array![0, 1, 0];
        let anim = render_sweep(x.view(), y.view(), &[4], 500, "Moons").unwrap();
        let frame = anim.frame(0).unwrap();
        assert_eq!(
            FrameRenderer::caption(&anim, &frame),
            "Moons Dataset - Max Depth: 4"
        );
    }
}
