//! Olympic Insights - Olympic Games History Analysis & Interactive Dashboard
//!
//! Loads the historical athlete events dataset, prepares it with polars and
//! serves an interactive egui dashboard of tallies, trends and athlete
//! statistics.

mod analysis;
mod charts;
mod config;
mod data;
mod gui;

use config::AppConfig;
use eframe::egui;
use gui::OlympicApp;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Olympic Insights"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Olympic Insights",
        options,
        Box::new(|cc| Ok(Box::new(OlympicApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start UI: {e}"))
}
