//! Control Panel Widget
//! Left side panel with the analysis menu, dataset paths and filters.

use crate::analysis::{SelectorLists, OVERALL};
use crate::config::AppConfig;
use egui::{Color32, ComboBox, RichText};
use std::path::{Path, PathBuf};

/// Dashboard sections, one per analysis menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisMode {
    #[default]
    Welcome,
    MedalTally,
    OverallAnalysis,
    CountrywiseAnalysis,
    AthleteWiseAnalysis,
}

impl AnalysisMode {
    pub const ALL: [AnalysisMode; 5] = [
        AnalysisMode::Welcome,
        AnalysisMode::MedalTally,
        AnalysisMode::OverallAnalysis,
        AnalysisMode::CountrywiseAnalysis,
        AnalysisMode::AthleteWiseAnalysis,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisMode::Welcome => "Welcome",
            AnalysisMode::MedalTally => "Medal Tally",
            AnalysisMode::OverallAnalysis => "Overall Analysis",
            AnalysisMode::CountrywiseAnalysis => "Country-wise Analysis",
            AnalysisMode::AthleteWiseAnalysis => "Athlete-wise Analysis",
        }
    }
}

/// Left side control panel with menu, file selection and filters.
pub struct ControlPanel {
    pub mode: AnalysisMode,
    pub events_path: PathBuf,
    pub regions_path: PathBuf,
    pub lists: SelectorLists,
    /// Medal Tally filters, "Overall" meaning unfiltered.
    pub tally_year: String,
    pub tally_country: String,
    /// Country-wise Analysis selection.
    pub country: String,
    pub data_ready: bool,
    pub progress: f32,
    pub status: String,
}

impl ControlPanel {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            mode: AnalysisMode::default(),
            events_path: config.events_path.clone(),
            regions_path: config.regions_path.clone(),
            lists: SelectorLists::default(),
            tally_year: OVERALL.to_string(),
            tally_country: OVERALL.to_string(),
            country: String::new(),
            data_ready: false,
            progress: 0.0,
            status: "Ready".to_string(),
        }
    }

    /// Install the selector lists after a dataset load and reset selections.
    pub fn set_lists(&mut self, lists: SelectorLists) {
        self.tally_year = OVERALL.to_string();
        self.tally_country = OVERALL.to_string();
        // Country-wise Analysis has no "Overall" entry; default to the first
        // region.
        self.country = lists.countries.get(1).cloned().unwrap_or_default();
        self.lists = lists;
        self.data_ready = true;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🏅 Olympic Insights")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Summer Games 1896 to 2016")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Analysis Menu Section =====
        ui.label(RichText::new("📋 Analysis Menu").size(14.0).strong());
        ui.add_space(5.0);

        for mode in AnalysisMode::ALL {
            ui.radio_value(&mut self.mode, mode, mode.label());
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                if Self::file_row(ui, "Events:", &self.events_path) {
                    action = ControlPanelAction::BrowseEvents;
                }
                ui.add_space(4.0);
                if Self::file_row(ui, "Regions:", &self.regions_path) {
                    action = ControlPanelAction::BrowseRegions;
                }
            });

        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("⟳ Reload Dataset").size(14.0))
                .min_size(egui::vec2(170.0, 28.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::Reload;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filters Section =====
        match self.mode {
            AnalysisMode::MedalTally => {
                ui.label(RichText::new("🔧 Filters").size(14.0).strong());
                ui.add_space(8.0);

                ui.add_enabled_ui(self.data_ready, |ui| {
                    Self::selector(
                        ui,
                        "tally_year",
                        "Year:",
                        &mut self.tally_year,
                        &self.lists.years,
                    );
                    ui.add_space(5.0);
                    Self::selector(
                        ui,
                        "tally_country",
                        "Country:",
                        &mut self.tally_country,
                        &self.lists.countries,
                    );
                });

                ui.add_space(15.0);
                ui.separator();
                ui.add_space(10.0);
            }
            AnalysisMode::CountrywiseAnalysis => {
                ui.label(RichText::new("🔧 Filters").size(14.0).strong());
                ui.add_space(8.0);

                let countries = self.lists.countries.get(1..).unwrap_or(&[]);
                ui.add_enabled_ui(self.data_ready, |ui| {
                    Self::selector(ui, "country", "Country:", &mut self.country, countries);
                });

                ui.add_space(15.0);
                ui.separator();
                ui.add_space(10.0);
            }
            _ => {}
        }

        // ===== Progress Section =====
        ui.label(RichText::new("📊 Dataset").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }

    fn file_row(ui: &mut egui::Ui, label: &str, path: &Path) -> bool {
        let mut clicked = false;
        ui.horizontal(|ui| {
            ui.add_sized([55.0, 20.0], egui::Label::new(label));

            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "Not set".to_string());
            ui.label(RichText::new(name).size(12.0).color(Color32::WHITE));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("📂 Browse").clicked() {
                    clicked = true;
                }
            });
        });
        clicked
    }

    fn selector(
        ui: &mut egui::Ui,
        id: &str,
        label: &str,
        selection: &mut String,
        options: &[String],
    ) {
        ui.horizontal(|ui| {
            ui.add_sized([60.0, 20.0], egui::Label::new(label));
            ComboBox::from_id_salt(id)
                .width(160.0)
                .selected_text(selection.as_str())
                .show_ui(ui, |ui| {
                    for option in options {
                        if ui.selectable_label(*selection == *option, option).clicked() {
                            *selection = option.clone();
                        }
                    }
                });
        });
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseEvents,
    BrowseRegions,
    Reload,
}
