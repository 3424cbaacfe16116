//! Per-chart runtime binding and the draw description derived from it.
//!
//! A `ChartBinding` pairs one indicator with the selected entity's series and
//! the scales for the chart's current viewport. Bindings are immutable: an
//! entity change or a settled resize rebuilds all of them.

use crate::domain::{IndicatorDescriptor, MISSING_GLYPH, SeriesPoint, YEAR_MAX, YEAR_MIN};
use crate::series::{extent, latest, value_at};
use crate::sync::cursor::Cursor;
use crate::sync::scale::LinearScale;

/// Interactive surface of one chart, in terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height)
    }
}

/// A position in viewport-relative screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// What a chart's header shows and where its highlight sits.
#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    pub value: String,
    pub caption: String,
    /// Highlight marker in viewport cells; `None` hides it.
    pub marker_screen: Option<ScreenPoint>,
    /// Year under the shared crosshair.
    pub crosshair: Option<i32>,
}

/// Everything the presentation layer needs to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub line: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub readout: Readout,
}

#[derive(Debug, Clone)]
pub struct ChartBinding {
    pub descriptor: &'static IndicatorDescriptor,
    pub series: Vec<SeriesPoint>,
    pub viewport: Viewport,
    pub x: LinearScale,
    pub y: LinearScale,
}

impl ChartBinding {
    pub fn new(
        descriptor: &'static IndicatorDescriptor,
        series: Vec<SeriesPoint>,
        viewport: Viewport,
    ) -> Self {
        let right = f64::from(viewport.width.saturating_sub(1));
        let bottom = f64::from(viewport.height.saturating_sub(1));

        let x = LinearScale::new((f64::from(YEAR_MIN), f64::from(YEAR_MAX)), (0.0, right));
        let y = LinearScale::new(padded_extent(&series), (bottom, 0.0));

        Self {
            descriptor,
            series,
            viewport,
            x,
            y,
        }
    }

    /// Viewport-relative column for an absolute terminal position, if inside.
    pub fn hit(&self, column: u16, row: u16) -> Option<f64> {
        self.viewport
            .contains(column, row)
            .then(|| f64::from(column - self.viewport.x))
    }

    pub fn screen_point(&self, p: SeriesPoint) -> ScreenPoint {
        ScreenPoint {
            x: self.x.map(f64::from(p.year)),
            y: self.y.map(p.value),
        }
    }

    /// Header value and highlight for the given cursor state.
    ///
    /// While hovering, a chart without a point at the shared year shows
    /// "No data for <year>" and never falls back to its latest value.
    pub fn readout(&self, cursor: Cursor) -> Readout {
        let format = self.descriptor.format;
        match cursor {
            Cursor::Hovering(year) => match value_at(&self.series, year) {
                Some(p) => Readout {
                    value: format.format(Some(p.value)),
                    caption: format!("Year {year}"),
                    marker_screen: Some(self.screen_point(p)),
                    crosshair: Some(year),
                },
                None => Readout {
                    value: MISSING_GLYPH.to_string(),
                    caption: format!("No data for {year}"),
                    marker_screen: None,
                    crosshair: Some(year),
                },
            },
            Cursor::Idle => match latest(&self.series) {
                Some(p) => Readout {
                    value: format.format(Some(p.value)),
                    caption: format!("Year {}", p.year),
                    marker_screen: None,
                    crosshair: None,
                },
                None => Readout {
                    value: MISSING_GLYPH.to_string(),
                    caption: "No data".to_string(),
                    marker_screen: None,
                    crosshair: None,
                },
            },
        }
    }

    /// Declarative draw description for the current cursor state.
    pub fn frame(&self, cursor: Cursor) -> ChartFrame {
        ChartFrame {
            title: self.descriptor.title,
            subtitle: self.descriptor.subtitle,
            line: self
                .series
                .iter()
                .map(|p| (f64::from(p.year), p.value))
                .collect(),
            x_bounds: [self.x.domain.0, self.x.domain.1],
            y_bounds: [self.y.domain.0, self.y.domain.1],
            readout: self.readout(cursor),
        }
    }
}

/// Value extent padded by 10% on both sides (1.0 when the extent is flat).
fn padded_extent(series: &[SeriesPoint]) -> (f64, f64) {
    let (lo, hi) = extent(series).unwrap_or((0.0, 0.0));
    let pad = (hi - lo) * 0.1;
    let pad = if pad > 0.0 && pad.is_finite() { pad } else { 1.0 };
    (lo - pad, hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::find_indicator;

    fn viewport() -> Viewport {
        Viewport {
            x: 10,
            y: 5,
            width: 65,
            height: 20,
        }
    }

    fn points(pairs: &[(i32, f64)]) -> Vec<SeriesPoint> {
        pairs.iter().map(|&(year, value)| SeriesPoint { year, value }).collect()
    }

    #[test]
    fn y_domain_is_padded() {
        let b = ChartBinding::new(
            find_indicator("inflation").unwrap(),
            points(&[(1970, 10.0), (1980, 20.0)]),
            viewport(),
        );
        assert_eq!(b.y.domain, (9.0, 21.0));
        assert_eq!(b.y.range, (19.0, 0.0));
        assert_eq!(b.x.range, (0.0, 64.0));

        let flat = ChartBinding::new(find_indicator("inflation").unwrap(), points(&[(1970, 3.0)]), viewport());
        assert_eq!(flat.y.domain, (2.0, 4.0));

        let empty = ChartBinding::new(find_indicator("inflation").unwrap(), Vec::new(), viewport());
        assert_eq!(empty.y.domain, (-1.0, 1.0));
    }

    #[test]
    fn hit_is_viewport_relative() {
        let b = ChartBinding::new(find_indicator("gdp").unwrap(), Vec::new(), viewport());
        assert_eq!(b.hit(10, 5), Some(0.0));
        assert_eq!(b.hit(74, 24), Some(64.0));
        assert_eq!(b.hit(75, 10), None);
        assert_eq!(b.hit(12, 25), None);
        assert_eq!(b.hit(9, 6), None);
    }

    #[test]
    fn idle_readout_shows_latest_or_empty_state() {
        let gdp = find_indicator("gdp").unwrap();
        let b = ChartBinding::new(gdp, points(&[(1962, 1.2e9), (1963, 1.3e9)]), viewport());
        let r = b.readout(Cursor::Idle);
        assert_eq!(r.value, "1.30B");
        assert_eq!(r.caption, "Year 1963");
        assert!(r.marker_screen.is_none());
        assert!(r.crosshair.is_none());

        let empty = ChartBinding::new(gdp, Vec::new(), viewport()).readout(Cursor::Idle);
        assert_eq!(empty.value, MISSING_GLYPH);
        assert_eq!(empty.caption, "No data");
    }

    #[test]
    fn hover_readout_positions_marker_on_the_point() {
        let b = ChartBinding::new(
            find_indicator("inflation").unwrap(),
            points(&[(1960, 10.0), (1992, 20.0)]),
            viewport(),
        );
        let r = b.readout(Cursor::Hovering(1992));
        assert_eq!(r.value, "20.00%");
        assert_eq!(r.caption, "Year 1992");
        assert_eq!(r.crosshair, Some(1992));

        let screen = r.marker_screen.unwrap();
        assert_eq!(screen.x, 32.0);
        // 20.0 sits at the top pad boundary: (21 - 20) / 12 of the way down.
        assert!((screen.y - 19.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn hover_without_point_does_not_fall_back_to_latest() {
        let b = ChartBinding::new(
            find_indicator("inflation").unwrap(),
            points(&[(1960, 10.0), (2020, 20.0)]),
            viewport(),
        );
        let r = b.readout(Cursor::Hovering(1975));
        assert_eq!(r.value, MISSING_GLYPH);
        assert_eq!(r.caption, "No data for 1975");
        assert!(r.marker_screen.is_none());
        assert_eq!(r.crosshair, Some(1975));
    }

    #[test]
    fn frame_carries_line_and_bounds() {
        let b = ChartBinding::new(
            find_indicator("population").unwrap(),
            points(&[(2000, 100.0), (2010, 200.0)]),
            viewport(),
        );
        let f = b.frame(Cursor::Idle);
        assert_eq!(f.line, vec![(2000.0, 100.0), (2010.0, 200.0)]);
        assert_eq!(f.x_bounds, [1960.0, 2024.0]);
        assert_eq!(f.y_bounds, [90.0, 210.0]);
        assert_eq!(f.title, "Total Population");
    }
}
