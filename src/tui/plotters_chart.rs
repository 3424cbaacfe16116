//! Plotters-powered indicator chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.
//! The chart is drawn edge to edge (no Plotters margins or label areas) so the
//! plotting area coincides with the viewport the cursor scales were built for;
//! tick labels and the hover marker are drawn by the caller as terminal cells.
//! (`Circle` radii are mis-scaled by the ratatui backend, so the marker is not
//! a Plotters element.)

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::Rgb;
use crate::sync::ChartFrame;

/// Render-only chart description. Everything is precomputed in `ChartFrame`.
pub struct TimelineChart<'a> {
    pub frame: &'a ChartFrame,
    pub color: Rgb,
}

impl<'a> Widget for TimelineChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height < 3 {
            buf.set_string(area.x, area.y, "…", Style::default().fg(Color::Yellow));
            return;
        }

        let [x0, x1] = self.frame.x_bounds;
        let [y0, y1] = self.frame.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let Rgb(r, g, b) = self.color;
        let line_color = RGBColor(r, g, b);
        let crosshair_color = RGBColor(110, 110, 110);

        let frame = self.frame;
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root).build_cartesian_2d(x0..x1, y0..y1)?;

            // Crosshair first so the series line stays on top of it.
            if let Some(year) = frame.readout.crosshair {
                let x = f64::from(year);
                chart.draw_series(LineSeries::new([(x, y0), (x, y1)], &crosshair_color))?;
            }

            chart.draw_series(LineSeries::new(frame.line.iter().copied(), &line_color))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
