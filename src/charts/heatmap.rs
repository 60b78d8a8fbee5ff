//! Heatmap Widget Module
//! Painter-drawn count matrix (sport rows, edition columns) with cell
//! annotations and a hover readout.

use egui::{Align2, Color32, FontId, Pos2, Rect, RichText, ScrollArea, Sense, Stroke, Vec2};
use polars::prelude::*;

const CELL_SIZE: Vec2 = Vec2::new(34.0, 18.0);
const LABEL_WIDTH: f32 = 150.0;
const HEADER_HEIGHT: f32 = 20.0;

const LOW_COLOR: Color32 = Color32::from_rgb(30, 30, 46);
const HIGH_COLOR: Color32 = Color32::from_rgb(231, 76, 60);

/// A dense count matrix extracted from a pivot frame.
#[derive(Debug, Clone, Default)]
pub struct HeatmapGrid {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    /// Row-major, `row_labels.len()` x `col_labels.len()`.
    pub values: Vec<Vec<u32>>,
    pub max: u32,
}

impl HeatmapGrid {
    /// Build from a pivot frame: the first column holds row labels, every
    /// following column is one edition of counts.
    pub fn from_pivot(df: &DataFrame) -> PolarsResult<Self> {
        let columns = df.get_columns();
        let Some((label_column, year_columns)) = columns.split_first() else {
            return Ok(Self::default());
        };

        let labels = label_column.str()?;
        let row_labels: Vec<String> = labels
            .into_iter()
            .map(|s| s.unwrap_or("").to_string())
            .collect();
        let col_labels: Vec<String> = year_columns
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        let mut values = vec![vec![0u32; col_labels.len()]; row_labels.len()];
        let mut max = 0u32;
        for (j, column) in year_columns.iter().enumerate() {
            let counts = column.u32()?;
            for (i, row) in values.iter_mut().enumerate() {
                let v = counts.get(i).unwrap_or(0);
                row[j] = v;
                max = max.max(v);
            }
        }

        Ok(Self {
            row_labels,
            col_labels,
            values,
            max,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.row_labels.is_empty() || self.col_labels.is_empty()
    }

    /// Draw the grid inside a horizontal scroll area.
    pub fn show(&self, ui: &mut egui::Ui, id: &str) {
        if self.is_empty() {
            ui.label(RichText::new("No data for this selection").italics());
            return;
        }

        let grid_size = Vec2::new(
            LABEL_WIDTH + self.col_labels.len() as f32 * CELL_SIZE.x,
            HEADER_HEIGHT + self.row_labels.len() as f32 * CELL_SIZE.y,
        );

        ScrollArea::horizontal()
            .id_salt(format!("heatmap_{id}"))
            .show(ui, |ui| {
                let (rect, response) = ui.allocate_exact_size(grid_size, Sense::hover());
                if !ui.is_rect_visible(rect) {
                    return;
                }
                let text_color = ui.visuals().text_color();
                let painter = ui.painter();

                for (j, year) in self.col_labels.iter().enumerate() {
                    let x = rect.left() + LABEL_WIDTH + (j as f32 + 0.5) * CELL_SIZE.x;
                    painter.text(
                        Pos2::new(x, rect.top() + HEADER_HEIGHT / 2.0),
                        Align2::CENTER_CENTER,
                        year,
                        FontId::proportional(9.0),
                        text_color,
                    );
                }

                for (i, label) in self.row_labels.iter().enumerate() {
                    let y = rect.top() + HEADER_HEIGHT + (i as f32 + 0.5) * CELL_SIZE.y;
                    painter.text(
                        Pos2::new(rect.left() + LABEL_WIDTH - 6.0, y),
                        Align2::RIGHT_CENTER,
                        label,
                        FontId::proportional(10.0),
                        text_color,
                    );

                    for j in 0..self.col_labels.len() {
                        let value = self.values[i][j];
                        let cell = self.cell_rect(rect, i, j);
                        let t = if self.max > 0 {
                            value as f32 / self.max as f32
                        } else {
                            0.0
                        };
                        let fill = lerp_color(LOW_COLOR, HIGH_COLOR, t);
                        painter.rect_filled(cell.shrink(0.5), 2.0, fill);

                        if value > 0 {
                            let annot_color = if t > 0.5 {
                                Color32::WHITE
                            } else {
                                Color32::from_gray(190)
                            };
                            painter.text(
                                cell.center(),
                                Align2::CENTER_CENTER,
                                value.to_string(),
                                FontId::proportional(8.0),
                                annot_color,
                            );
                        }
                    }
                }

                if let Some(pointer) = response.hover_pos() {
                    if let Some((i, j)) = self.cell_at(rect, pointer) {
                        painter.rect_stroke(
                            self.cell_rect(rect, i, j),
                            2.0,
                            Stroke::new(1.5, Color32::WHITE),
                        );
                        response.on_hover_text(format!(
                            "{} in {}: {}",
                            self.row_labels[i], self.col_labels[j], self.values[i][j]
                        ));
                    }
                }
            });
    }

    fn cell_rect(&self, grid: Rect, i: usize, j: usize) -> Rect {
        Rect::from_min_size(
            Pos2::new(
                grid.left() + LABEL_WIDTH + j as f32 * CELL_SIZE.x,
                grid.top() + HEADER_HEIGHT + i as f32 * CELL_SIZE.y,
            ),
            CELL_SIZE,
        )
    }

    fn cell_at(&self, grid: Rect, pointer: Pos2) -> Option<(usize, usize)> {
        let x = pointer.x - grid.left() - LABEL_WIDTH;
        let y = pointer.y - grid.top() - HEADER_HEIGHT;
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let i = (y / CELL_SIZE.y) as usize;
        let j = (x / CELL_SIZE.x) as usize;
        (i < self.row_labels.len() && j < self.col_labels.len()).then_some((i, j))
    }
}

fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pivot() {
        let pivot = df!(
            "Sport" => &["Hockey", "Shooting"],
            "1996"  => &[2u32, 0],
            "2000"  => &[1u32, 3],
        )
        .unwrap();

        let grid = HeatmapGrid::from_pivot(&pivot).unwrap();
        assert_eq!(grid.row_labels, vec!["Hockey", "Shooting"]);
        assert_eq!(grid.col_labels, vec!["1996", "2000"]);
        assert_eq!(grid.values, vec![vec![2, 1], vec![0, 3]]);
        assert_eq!(grid.max, 3);
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_from_pivot_without_year_columns_is_empty() {
        let pivot = df!("Sport" => &Vec::<String>::new()).unwrap();
        let grid = HeatmapGrid::from_pivot(&pivot).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_cell_hit_detection() {
        let grid = HeatmapGrid {
            row_labels: vec!["A".into(), "B".into()],
            col_labels: vec!["1896".into()],
            values: vec![vec![1], vec![2]],
            max: 2,
        };
        let area = Rect::from_min_size(
            Pos2::ZERO,
            Vec2::new(LABEL_WIDTH + CELL_SIZE.x, HEADER_HEIGHT + 2.0 * CELL_SIZE.y),
        );

        let inside = Pos2::new(LABEL_WIDTH + 1.0, HEADER_HEIGHT + CELL_SIZE.y + 1.0);
        assert_eq!(grid.cell_at(area, inside), Some((1, 0)));

        let in_label_gutter = Pos2::new(5.0, HEADER_HEIGHT + 1.0);
        assert_eq!(grid.cell_at(area, in_label_gutter), None);

        let below = Pos2::new(LABEL_WIDTH + 1.0, HEADER_HEIGHT + 3.0 * CELL_SIZE.y);
        assert_eq!(grid.cell_at(area, below), None);
    }
}
