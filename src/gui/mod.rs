//! GUI module - User interface components

mod app;
mod control_panel;
mod views;

pub use app::OlympicApp;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use views::Views;
