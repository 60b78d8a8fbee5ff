//! Dashboard Views
//! Central panel renderings for each analysis menu entry. Query results are
//! cached per selection so the table work runs on change, not every frame.

use crate::analysis::{self, DensityCurve, SelectorLists, OVERALL};
use crate::charts::{ChartPlotter, HeatmapGrid, LineSeries, ScatterGroup};
use crate::gui::control_panel::{AnalysisMode, ControlPanel};
use egui::{Color32, ComboBox, RichText};
use polars::prelude::*;
use std::collections::BTreeMap;

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// Dataset-wide Overall Analysis artifacts.
struct OverallCache {
    counts: analysis::OverallCounts,
    nations: LineSeries,
    events: LineSeries,
    athletes: LineSeries,
    heatmap: HeatmapGrid,
}

/// Artifacts for one selected country.
struct CountryCache {
    yearwise: LineSeries,
    heatmap: HeatmapGrid,
    top: DataFrame,
}

/// Dataset-wide athlete statistics.
struct AthleteCache {
    age_curves: Vec<DensityCurve>,
    sport_curves: Vec<DensityCurve>,
    participation: Vec<LineSeries>,
}

/// Central panel state: main-area selections plus per-mode result caches.
pub struct Views {
    overall_sport: String,
    scatter_sport: String,
    tally: Option<(String, String, DataFrame)>,
    overall: Option<OverallCache>,
    overall_top: Option<(String, DataFrame)>,
    country: Option<(String, CountryCache)>,
    athlete: Option<AthleteCache>,
    scatter: Option<(String, Vec<ScatterGroup>)>,
    error: Option<String>,
}

impl Views {
    pub fn new() -> Self {
        Self {
            overall_sport: OVERALL.to_string(),
            scatter_sport: OVERALL.to_string(),
            tally: None,
            overall: None,
            overall_top: None,
            country: None,
            athlete: None,
            scatter: None,
            error: None,
        }
    }

    /// Drop all cached results, e.g. after a dataset reload.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn show(&mut self, ui: &mut egui::Ui, df: &DataFrame, panel: &ControlPanel) {
        match panel.mode {
            AnalysisMode::Welcome => self.show_welcome(ui, df),
            AnalysisMode::MedalTally => self.show_medal_tally(ui, df, panel),
            AnalysisMode::OverallAnalysis => self.show_overall(ui, df, &panel.lists),
            AnalysisMode::CountrywiseAnalysis => self.show_country(ui, df, panel),
            AnalysisMode::AthleteWiseAnalysis => self.show_athlete(ui, df, &panel.lists),
        }
    }

    // ===== Welcome =====

    fn show_welcome(&mut self, ui: &mut egui::Ui, df: &DataFrame) {
        ui.vertical_centered(|ui| {
            ui.add_space(30.0);
            ui.label(RichText::new("🏅").size(48.0));
            ui.label(
                RichText::new("Welcome to Olympic Insights")
                    .size(28.0)
                    .strong(),
            );
            ui.label(
                RichText::new("Summer Olympics, Athens 1896 to Rio 2016")
                    .size(14.0)
                    .color(Color32::GRAY),
            );
            ui.add_space(12.0);
            ui.label("Explore 120 years of Olympic history through data.");
        });

        ui.add_space(20.0);
        ui.separator();
        heading(ui, "Analysis Options");
        ui.label("• Medal Tally: medal counts per country and edition");
        ui.label("• Overall Analysis: dataset totals and growth over time");
        ui.label("• Country-wise Analysis: one nation's history in depth");
        ui.label("• Athlete-wise Analysis: age, physique and participation trends");
        ui.add_space(10.0);
        ui.label(RichText::new("Pick a section from the menu on the left to begin.").italics());

        ui.add_space(20.0);
        ui.label(
            RichText::new(format!("{} event rows loaded", df.height()))
                .size(11.0)
                .color(Color32::GRAY),
        );
    }

    // ===== Medal Tally =====

    fn show_medal_tally(&mut self, ui: &mut egui::Ui, df: &DataFrame, panel: &ControlPanel) {
        let year = panel.tally_year.clone();
        let country = panel.tally_country.clone();

        let stale = !matches!(&self.tally, Some((y, c, _)) if *y == year && *c == country);
        if stale {
            self.error = None;
            let table = analysis::medal_tally(df, parse_year(&year), overall_to_none(&country))
                .unwrap_or_else(|e| self.cache_error("medal tally query failed", e));
            self.tally = Some((year.clone(), country.clone(), table));
        }
        self.show_error(ui);

        heading(ui, &tally_title(&year, &country));
        if let Some((_, _, table)) = &self.tally {
            if table.height() == 0 {
                ui.label(RichText::new("No results for this selection").italics());
            } else {
                ChartPlotter::draw_frame_table(ui, "medal_tally", table);
            }
        }
    }

    // ===== Overall Analysis =====

    fn show_overall(&mut self, ui: &mut egui::Ui, df: &DataFrame, lists: &SelectorLists) {
        if self.overall.is_none() {
            self.error = None;
            let cache = self.build_overall(df);
            self.overall = Some(cache);
        }

        let sport = self.overall_sport.clone();
        let stale = !matches!(&self.overall_top, Some((s, _)) if *s == sport);
        if stale {
            let table = analysis::most_successful(df, overall_to_none(&sport))
                .unwrap_or_else(|e| self.cache_error("athlete ranking query failed", e));
            self.overall_top = Some((sport, table));
        }
        self.show_error(ui);

        let Some(cache) = self.overall.as_ref() else {
            return;
        };

        heading(ui, "Top Statistics");
        let counts = cache.counts;
        // The 1906 Intercalated Games sit in the year list but do not count
        // as an edition.
        metric_row(
            ui,
            &[
                ("Editions", counts.editions.saturating_sub(1)),
                ("Hosts", counts.cities),
                ("Sports", counts.sports),
            ],
        );
        metric_row(
            ui,
            &[
                ("Events", counts.events),
                ("Nations", counts.nations),
                ("Athletes", counts.athletes),
            ],
        );

        heading(ui, "Participating Nations Over the Years");
        ChartPlotter::draw_line_chart(
            ui,
            "nations",
            "Edition",
            "Nations",
            std::slice::from_ref(&cache.nations),
        );

        heading(ui, "Events Over the Years");
        ChartPlotter::draw_line_chart(
            ui,
            "events",
            "Edition",
            "Events",
            std::slice::from_ref(&cache.events),
        );

        heading(ui, "Athletes Over the Years");
        ChartPlotter::draw_line_chart(
            ui,
            "athletes",
            "Edition",
            "Athletes",
            std::slice::from_ref(&cache.athletes),
        );

        heading(ui, "No. of Events Over Time (Every Sport)");
        cache.heatmap.show(ui, "events");

        heading(ui, "Most Successful Athletes");
        sport_combo(ui, "overall_sport", &mut self.overall_sport, &lists.sports);
        ui.add_space(8.0);
        if let Some((_, table)) = &self.overall_top {
            if table.height() == 0 {
                ui.label(RichText::new("No medallists for this selection").italics());
            } else {
                ChartPlotter::draw_frame_table(ui, "top_athletes", table);
            }
        }
    }

    fn build_overall(&mut self, df: &DataFrame) -> OverallCache {
        let counts = analysis::overall_counts(df).unwrap_or_else(|e| {
            self.cache_error("overall counts query failed", e);
            analysis::OverallCounts::default()
        });

        let nations = self.series_over_time(df, "region", "Nations");
        let events = self.series_over_time(df, "Event", "Events");
        let athletes = self.series_over_time(df, "Name", "Athletes");

        let heatmap = analysis::events_heatmap(df)
            .and_then(|pivot| HeatmapGrid::from_pivot(&pivot))
            .unwrap_or_else(|e| {
                self.cache_error("events heatmap query failed", e);
                HeatmapGrid::default()
            });

        OverallCache {
            counts,
            nations,
            events,
            athletes,
            heatmap,
        }
    }

    /// Distinct values of `column` per edition, as a plottable series.
    fn series_over_time(&mut self, df: &DataFrame, column: &str, label: &str) -> LineSeries {
        let points = analysis::data_over_time(df, column)
            .and_then(|table| analysis::xy_points(&table, "Edition", "Count"))
            .unwrap_or_else(|e| {
                self.cache_error("time series query failed", e);
                Vec::new()
            });
        LineSeries {
            label: label.to_string(),
            color: ChartPlotter::series_color(0),
            points,
        }
    }

    // ===== Country-wise Analysis =====

    fn show_country(&mut self, ui: &mut egui::Ui, df: &DataFrame, panel: &ControlPanel) {
        let country = panel.country.clone();
        if country.is_empty() {
            ui.label(RichText::new("No country selected").italics());
            return;
        }

        let stale = !matches!(&self.country, Some((c, _)) if *c == country);
        if stale {
            self.error = None;
            let cache = self.build_country(df, &country);
            self.country = Some((country.clone(), cache));
        }
        self.show_error(ui);

        let Some((_, cache)) = self.country.as_ref() else {
            return;
        };

        heading(ui, &format!("{country} Medal Tally Over the Years"));
        if cache.yearwise.points.is_empty() {
            ui.label(RichText::new("No medals recorded").italics());
        } else {
            ChartPlotter::draw_line_chart(
                ui,
                "yearwise",
                "Year",
                "Medals",
                std::slice::from_ref(&cache.yearwise),
            );
        }

        heading(ui, &format!("{country} Excels in the Following Sports"));
        cache.heatmap.show(ui, "country");

        heading(ui, &format!("Top 10 Athletes of {country}"));
        if cache.top.height() == 0 {
            ui.label(RichText::new("No medallists recorded").italics());
        } else {
            ChartPlotter::draw_frame_table(ui, "country_top", &cache.top);
        }
    }

    fn build_country(&mut self, df: &DataFrame, country: &str) -> CountryCache {
        let points = analysis::yearwise_medal_tally(df, country)
            .and_then(|table| analysis::xy_points(&table, "Year", "Medals"))
            .unwrap_or_else(|e| {
                self.cache_error("yearwise tally query failed", e);
                Vec::new()
            });
        let yearwise = LineSeries {
            label: "Medals".to_string(),
            color: ChartPlotter::series_color(0),
            points,
        };

        let heatmap = analysis::country_event_heatmap(df, country)
            .and_then(|pivot| HeatmapGrid::from_pivot(&pivot))
            .unwrap_or_else(|e| {
                self.cache_error("country heatmap query failed", e);
                HeatmapGrid::default()
            });

        let top = analysis::most_successful_countrywise(df, country)
            .unwrap_or_else(|e| self.cache_error("country ranking query failed", e));

        CountryCache {
            yearwise,
            heatmap,
            top,
        }
    }

    // ===== Athlete-wise Analysis =====

    fn show_athlete(&mut self, ui: &mut egui::Ui, df: &DataFrame, lists: &SelectorLists) {
        if self.athlete.is_none() {
            self.error = None;
            let cache = self.build_athlete(df);
            self.athlete = Some(cache);
        }

        let sport = self.scatter_sport.clone();
        let stale = !matches!(&self.scatter, Some((s, _)) if *s == sport);
        if stale {
            let groups = self.build_scatter(df, &sport);
            self.scatter = Some((sport, groups));
        }
        self.show_error(ui);

        let Some(cache) = self.athlete.as_ref() else {
            return;
        };

        heading(ui, "Distribution of Age");
        ChartPlotter::draw_density_chart(ui, "ages", "Age", &cache.age_curves);

        heading(ui, "Distribution of Age wrt Sports (Gold Medalist)");
        ChartPlotter::draw_density_chart(ui, "sport_ages", "Age", &cache.sport_curves);

        heading(ui, "Height Vs Weight");
        sport_combo(ui, "scatter_sport", &mut self.scatter_sport, &lists.sports);
        ui.add_space(8.0);
        if let Some((_, groups)) = &self.scatter {
            if groups.is_empty() {
                ui.label(RichText::new("No athletes for this selection").italics());
            } else {
                ChartPlotter::draw_scatter_chart(
                    ui,
                    "physique",
                    "Weight (kg)",
                    "Height (cm)",
                    groups,
                );
            }
        }

        heading(ui, "Men vs Women Participation Over the Years");
        ChartPlotter::draw_line_chart(
            ui,
            "participation",
            "Year",
            "Athletes",
            &cache.participation,
        );
    }

    fn build_athlete(&mut self, df: &DataFrame) -> AthleteCache {
        let age_curves = analysis::medal_age_series(df).unwrap_or_else(|e| {
            self.cache_error("age distribution query failed", e);
            Vec::new()
        });
        let sport_curves = analysis::famous_sport_age_series(df).unwrap_or_else(|e| {
            self.cache_error("sport age distribution query failed", e);
            Vec::new()
        });

        let participation = match analysis::men_vs_women(df) {
            Ok(table) => {
                let male = analysis::xy_points(&table, "Year", "Male").unwrap_or_default();
                let female = analysis::xy_points(&table, "Year", "Female").unwrap_or_default();
                vec![
                    LineSeries {
                        label: "Male".to_string(),
                        color: ChartPlotter::series_color(6),
                        points: male,
                    },
                    LineSeries {
                        label: "Female".to_string(),
                        color: ChartPlotter::series_color(5),
                        points: female,
                    },
                ]
            }
            Err(e) => {
                self.cache_error("participation query failed", e);
                Vec::new()
            }
        };

        AthleteCache {
            age_curves,
            sport_curves,
            participation,
        }
    }

    fn build_scatter(&mut self, df: &DataFrame, sport: &str) -> Vec<ScatterGroup> {
        analysis::weight_vs_height(df, overall_to_none(sport))
            .and_then(|athletes| scatter_groups(&athletes))
            .unwrap_or_else(|e| {
                self.cache_error("physique query failed", e);
                Vec::new()
            })
    }

    // ===== Shared helpers =====

    fn cache_error(&mut self, context: &str, e: PolarsError) -> DataFrame {
        log::error!("{}: {}", context, e);
        self.error = Some(format!("{}: {}", context, e));
        DataFrame::default()
    }

    fn show_error(&self, ui: &mut egui::Ui) {
        if let Some(message) = &self.error {
            ui.colored_label(ERROR_COLOR, message);
            ui.add_space(5.0);
        }
    }
}

impl Default for Views {
    fn default() -> Self {
        Self::new()
    }
}

fn heading(ui: &mut egui::Ui, text: &str) {
    ui.add_space(12.0);
    ui.label(RichText::new(text).size(18.0).strong());
    ui.add_space(8.0);
}

fn metric_row(ui: &mut egui::Ui, metrics: &[(&str, usize)]) {
    ui.columns(metrics.len(), |columns| {
        for (ui, (label, value)) in columns.iter_mut().zip(metrics) {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(value.to_string()).size(26.0).strong());
                ui.label(RichText::new(*label).size(12.0).color(Color32::GRAY));
            });
        }
    });
    ui.add_space(8.0);
}

fn sport_combo(ui: &mut egui::Ui, id: &str, selection: &mut String, sports: &[String]) {
    ui.horizontal(|ui| {
        ui.label("Select a Sport:");
        ComboBox::from_id_salt(id)
            .width(220.0)
            .selected_text(selection.as_str())
            .show_ui(ui, |ui| {
                for sport in sports {
                    if ui.selectable_label(*selection == *sport, sport).clicked() {
                        *selection = sport.clone();
                    }
                }
            });
    });
}

/// Map the sentinel to "no filter".
fn overall_to_none(selection: &str) -> Option<&str> {
    (selection != OVERALL).then_some(selection)
}

/// Year selections parse to a filter; the sentinel does not parse.
fn parse_year(selection: &str) -> Option<i32> {
    selection.parse().ok()
}

fn tally_title(year: &str, country: &str) -> String {
    match (year == OVERALL, country == OVERALL) {
        (true, true) => "Overall Tally".to_string(),
        (false, true) => format!("Medal Tally in {year} Olympics"),
        (true, false) => format!("{country} Overall performance"),
        (false, false) => format!("{country} performance in {year} Olympics"),
    }
}

/// Bucket athlete rows into scatter groups by medal class and sex. Medal
/// classes order Gold, Silver, Bronze, No Medal; rows missing either
/// measurement are skipped.
fn scatter_groups(athletes: &DataFrame) -> PolarsResult<Vec<ScatterGroup>> {
    let weights = athletes.column("Weight")?.f64()?;
    let heights = athletes.column("Height")?.f64()?;
    let medals = athletes.column("Medal")?.str()?;
    let sexes = athletes.column("Sex")?.str()?;

    let mut buckets: BTreeMap<(u8, String, String), Vec<[f64; 2]>> = BTreeMap::new();
    for i in 0..athletes.height() {
        let (Some(w), Some(h)) = (weights.get(i), heights.get(i)) else {
            continue;
        };
        let medal = medals.get(i).unwrap_or("No Medal");
        let sex = sexes.get(i).unwrap_or("M");
        buckets
            .entry((medal_rank(medal), medal.to_string(), sex.to_string()))
            .or_default()
            .push([w, h]);
    }

    Ok(buckets
        .into_iter()
        .map(|((_, medal, sex), points)| ScatterGroup {
            color: ChartPlotter::medal_color(&medal),
            shape: ChartPlotter::sex_marker(&sex),
            label: format!("{medal} ({sex})"),
            points,
        })
        .collect())
}

fn medal_rank(medal: &str) -> u8 {
    match medal {
        "Gold" => 0,
        "Silver" => 1,
        "Bronze" => 2,
        _ => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_title_per_filter_combo() {
        assert_eq!(tally_title("Overall", "Overall"), "Overall Tally");
        assert_eq!(tally_title("2016", "Overall"), "Medal Tally in 2016 Olympics");
        assert_eq!(tally_title("Overall", "India"), "India Overall performance");
        assert_eq!(
            tally_title("2016", "India"),
            "India performance in 2016 Olympics"
        );
    }

    #[test]
    fn test_selection_filters() {
        assert_eq!(overall_to_none("Overall"), None);
        assert_eq!(overall_to_none("Kenya"), Some("Kenya"));
        assert_eq!(parse_year("Overall"), None);
        assert_eq!(parse_year("1936"), Some(1936));
    }

    #[test]
    fn test_scatter_groups_bucketing() {
        let athletes = df!(
            "Weight" => &[Some(72.0f64), Some(68.0), None, Some(80.0)],
            "Height" => &[Some(180.0f64), Some(170.0), Some(175.0), Some(190.0)],
            "Medal"  => &["Gold", "No Medal", "Silver", "Gold"],
            "Sex"    => &["M", "F", "M", "M"],
        )
        .unwrap();

        let groups = scatter_groups(&athletes).unwrap();
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();

        // The null-weight silver row drops out; gold sorts ahead of the rest.
        assert_eq!(labels, vec!["Gold (M)", "No Medal (F)"]);
        assert_eq!(groups[0].points.len(), 2);
        assert_eq!(groups[1].points, vec![[68.0, 170.0]]);
    }
}
