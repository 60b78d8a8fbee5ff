//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use egui::{Color32, RichText};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, Points};
use polars::prelude::*;

use crate::analysis::DensityCurve;

/// Default chart height in points.
const CHART_HEIGHT: f32 = 300.0;
/// The weight/height scatter gets more room.
const SCATTER_HEIGHT: f32 = 420.0;

pub const GOLD_COLOR: Color32 = Color32::from_rgb(255, 193, 7); // Amber
pub const SILVER_COLOR: Color32 = Color32::from_rgb(158, 158, 158); // Grey
pub const BRONZE_COLOR: Color32 = Color32::from_rgb(205, 127, 50); // Bronze
pub const NO_MEDAL_COLOR: Color32 = Color32::from_rgb(96, 125, 139); // Blue Grey

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(255, 87, 34),  // Deep Orange
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

/// A labelled polyline for the time-series charts.
#[derive(Clone)]
pub struct LineSeries {
    pub label: String,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

/// A labelled point cloud for the scatter chart.
#[derive(Clone)]
pub struct ScatterGroup {
    pub label: String,
    pub color: Color32,
    pub shape: MarkerShape,
    pub points: Vec<[f64; 2]>,
}

/// Creates dashboard visualizations using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Cycle through the palette.
    pub fn series_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    pub fn medal_color(medal: &str) -> Color32 {
        match medal {
            "Gold" => GOLD_COLOR,
            "Silver" => SILVER_COLOR,
            "Bronze" => BRONZE_COLOR,
            _ => NO_MEDAL_COLOR,
        }
    }

    pub fn sex_marker(sex: &str) -> MarkerShape {
        if sex == "F" {
            MarkerShape::Diamond
        } else {
            MarkerShape::Circle
        }
    }

    /// Draw a line chart over editions, with point markers on each vertex.
    /// X-axis labels render only at whole years.
    pub fn draw_line_chart(
        ui: &mut egui::Ui,
        id: &str,
        x_label: &str,
        y_label: &str,
        series: &[LineSeries],
    ) {
        Plot::new(format!("line_{id}"))
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_label(x_label)
            .y_axis_label(y_label)
            .x_axis_formatter(|mark, _range| {
                let v = mark.value;
                if (v - v.round()).abs() < 1e-3 {
                    format!("{:.0}", v)
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for s in series {
                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(s.points.iter().copied()))
                            .color(s.color)
                            .width(2.0)
                            .name(&s.label),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(s.points.iter().copied()))
                            .radius(2.5)
                            .color(s.color),
                    );
                }
            });
    }

    /// Draw one or more density curves sharing an x-axis.
    pub fn draw_density_chart(ui: &mut egui::Ui, id: &str, x_label: &str, curves: &[DensityCurve]) {
        Plot::new(format!("density_{id}"))
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_label(x_label)
            .y_axis_label("Density")
            .show(ui, |plot_ui| {
                for (i, curve) in curves.iter().enumerate() {
                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(curve.points.iter().copied()))
                            .color(Self::series_color(i))
                            .width(1.5)
                            .name(&curve.label),
                    );
                }
            });
    }

    /// Draw grouped scatter points, one marker style per group.
    pub fn draw_scatter_chart(
        ui: &mut egui::Ui,
        id: &str,
        x_label: &str,
        y_label: &str,
        groups: &[ScatterGroup],
    ) {
        Plot::new(format!("scatter_{id}"))
            .height(SCATTER_HEIGHT)
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_label(x_label)
            .y_axis_label(y_label)
            .show(ui, |plot_ui| {
                for group in groups {
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(group.points.iter().copied()))
                            .radius(3.0)
                            .shape(group.shape)
                            .color(group.color)
                            .name(&group.label),
                    );
                }
            });
    }

    /// Render a result frame as a striped table with a 1-based rank column.
    pub fn draw_frame_table(ui: &mut egui::Ui, id: &str, df: &DataFrame) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(format!("table_{id}")))
                    .striped(true)
                    .min_col_width(60.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("#").strong().size(11.0));
                        for name in df.get_column_names() {
                            ui.label(RichText::new(name.as_str()).strong().size(11.0));
                        }
                        ui.end_row();

                        for row in 0..df.height() {
                            ui.label(RichText::new((row + 1).to_string()).size(11.0));
                            for column in df.get_columns() {
                                let text = match column.get(row) {
                                    Ok(value) => display_value(&value),
                                    Err(_) => String::new(),
                                };
                                ui.label(RichText::new(text).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}

/// Cell text for a table entry; strings drop their debug quotes.
fn display_value(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => "-".to_string(),
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}
