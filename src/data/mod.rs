//! Data module - CSV loading and preprocessing

mod loader;
mod preprocessor;

pub use loader::{load_events, load_regions, LoaderError};
pub use preprocessor::preprocess;
