//! Cross-chart cursor synchronization.
//!
//! - `scale`: linear domain ↔ screen mapping
//! - `binding`: per-chart series + scales, and the frames drawn from them
//! - `cursor`: the shared hover state machine

pub mod binding;
pub mod cursor;
pub mod scale;

pub use binding::{ChartBinding, ChartFrame, Readout, ScreenPoint, Viewport};
pub use cursor::{Cursor, year_at};
pub use scale::LinearScale;
