//! Charts module - chart and heatmap rendering

mod heatmap;
mod plotter;

pub use heatmap::HeatmapGrid;
pub use plotter::{ChartPlotter, LineSeries, ScatterGroup};
