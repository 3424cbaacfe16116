//! Shared hover cursor.
//!
//! Every chart shares the same time axis, so one year is enough state for all
//! of them: pointer movement over any chart sets it, leaving clears it.

use crate::domain::{YEAR_MAX, YEAR_MIN};
use crate::sync::binding::ChartBinding;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cursor {
    #[default]
    Idle,
    Hovering(i32),
}

impl Cursor {
    pub fn year(self) -> Option<i32> {
        match self {
            Cursor::Idle => None,
            Cursor::Hovering(year) => Some(year),
        }
    }

    /// Pointer moved over `binding` at a viewport-relative column.
    pub fn pointer_move(self, binding: &ChartBinding, offset: f64) -> Cursor {
        Cursor::Hovering(year_at(binding, offset))
    }

    /// Pointer left every chart surface.
    pub fn pointer_leave(self) -> Cursor {
        Cursor::Idle
    }

    /// Keyboard stepping. From idle, stepping enters at the axis edge the
    /// step points away from (left → last year, right → first year).
    pub fn step(self, delta: i32) -> Cursor {
        let year = match self {
            Cursor::Idle if delta < 0 => YEAR_MAX,
            Cursor::Idle => YEAR_MIN,
            Cursor::Hovering(year) => year.saturating_add(delta),
        };
        Cursor::Hovering(year.clamp(YEAR_MIN, YEAR_MAX))
    }
}

/// Invert a pointer column through a chart's time scale to the nearest year.
///
/// Offsets outside the surface are clamped to the axis range.
pub fn year_at(binding: &ChartBinding, offset: f64) -> i32 {
    let year = binding.x.invert(offset).round();
    if !year.is_finite() {
        return YEAR_MIN;
    }
    (year as i32).clamp(YEAR_MIN, YEAR_MAX)
}
