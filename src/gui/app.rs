//! Olympic Insights Main Application
//! Main window wiring the control panel, background dataset loading and the
//! analysis views.

use crate::analysis::{self, SelectorLists};
use crate::config::AppConfig;
use crate::data;
use crate::gui::{ControlPanel, ControlPanelAction, Views};
use egui::{RichText, SidePanel};
use polars::prelude::*;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Dataset loading result from background thread
enum LoadResult {
    Progress(f32, String),
    Complete {
        df: DataFrame,
        lists: SelectorLists,
        row_count: usize,
    },
    Error(String),
}

/// Main application window.
pub struct OlympicApp {
    control_panel: ControlPanel,
    views: Views,
    data: Option<DataFrame>,

    // Async dataset loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl OlympicApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self {
            control_panel: ControlPanel::new(&config),
            views: Views::new(),
            data: None,
            load_rx: None,
            is_loading: false,
        };
        app.start_load();
        app
    }

    /// Load and prepare the dataset in a background thread.
    fn start_load(&mut self) {
        if self.is_loading {
            return;
        }

        self.data = None;
        self.views.reset();
        self.control_panel.data_ready = false;
        self.control_panel.set_progress(5.0, "Loading dataset...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        let events_path = self.control_panel.events_path.clone();
        let regions_path = self.control_panel.regions_path.clone();

        thread::spawn(move || {
            let started = std::time::Instant::now();
            let _ = tx.send(LoadResult::Progress(
                10.0,
                "Reading event results...".to_string(),
            ));
            let events = match data::load_events(&events_path) {
                Ok(df) => df,
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                    return;
                }
            };

            let _ = tx.send(LoadResult::Progress(
                50.0,
                "Reading region mapping...".to_string(),
            ));
            let regions = match data::load_regions(&regions_path) {
                Ok(df) => df,
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                    return;
                }
            };

            let _ = tx.send(LoadResult::Progress(
                70.0,
                "Preparing table...".to_string(),
            ));
            let result = data::preprocess(events, regions)
                .and_then(|df| Ok((analysis::selector_lists(&df)?, df)));
            match result {
                Ok((lists, df)) => {
                    let row_count = df.height();
                    log::info!(
                        "dataset prepared in {:.2}s",
                        started.elapsed().as_secs_f32()
                    );
                    let _ = tx.send(LoadResult::Complete {
                        df,
                        lists,
                        row_count,
                    });
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Check for loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(progress, status) => {
                        self.control_panel.set_progress(progress, &status);
                    }
                    LoadResult::Complete {
                        df,
                        lists,
                        row_count,
                    } => {
                        log::info!("dataset ready: {} event rows", row_count);
                        self.control_panel.set_lists(lists);
                        self.control_panel
                            .set_progress(100.0, &format!("Loaded {} event rows", row_count));
                        self.data = Some(df);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        log::error!("dataset load failed: {}", error);
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Pick one of the dataset CSVs, then reload.
    fn handle_browse(&mut self, events: bool) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            if events {
                self.control_panel.events_path = path;
            } else {
                self.control_panel.regions_path = path;
            }
            self.start_load();
        }
    }
}

impl eframe::App for OlympicApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - menu and filters
        SidePanel::left("control_panel")
            .min_width(270.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseEvents => self.handle_browse(true),
                        ControlPanelAction::BrowseRegions => self.handle_browse(false),
                        ControlPanelAction::Reload => self.start_load(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - active analysis view
        egui::CentralPanel::default().show(ctx, |ui| match &self.data {
            Some(df) => {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.views.show(ui, df, &self.control_panel);
                    });
            }
            None if self.is_loading => {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new(&self.control_panel.status).size(16.0));
                });
            }
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new("No dataset loaded. Check the paths on the left and reload.")
                            .size(16.0),
                    );
                });
            }
        });
    }
}
