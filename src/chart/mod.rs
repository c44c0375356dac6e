//! Retained-mode charting: figures, axes and the artists drawn on them.

mod artist;
mod axes;
mod figure;
mod heatmap;
mod legend;
mod style;
mod ticks;

pub use artist::{Artist, DrawStyle, HeatmapArtist, LineArtist, StepWhere};
pub use axes::Axes;
pub use figure::Figure;
pub use heatmap::{Colorbar, HeatmapStyle, ValueFormat};
pub use legend::{Legend, LegendEntry, LegendLocation};
pub use style::AxesStyle;
pub use ticks::{autoscale, format_general, format_tick, nice_step, nice_ticks};
