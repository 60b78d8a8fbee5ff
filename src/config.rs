//! Application Configuration
//! Optional JSON file pointing at the dataset CSVs. Read once at startup,
//! never written back.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "OLYMPIC_INSIGHTS_CONFIG";
const CONFIG_FILE: &str = "olympic_insights.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Event-level results CSV.
    pub events_path: PathBuf,
    /// NOC to region mapping CSV.
    pub regions_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            events_path: PathBuf::from("athlete_events.csv"),
            regions_path: PathBuf::from("noc_regions.csv"),
        }
    }
}

impl AppConfig {
    /// Load from `$OLYMPIC_INSIGHTS_CONFIG` if set, else `./olympic_insights.json`.
    /// A missing file yields the defaults; a malformed one logs a warning and
    /// also yields the defaults.
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        Self::load_from(&path)
    }

    /// Load from an explicit path (used for testing).
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            log::debug!("no config file at {}, using defaults", path.display());
            return Self::default();
        };
        match serde_json::from_str(&content) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/olympic_insights.json"));
        assert_eq!(config.events_path, PathBuf::from("athlete_events.csv"));
        assert_eq!(config.regions_path, PathBuf::from("noc_regions.csv"));
    }

    #[test]
    fn test_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("olympic_insights.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"events_path": "/data/events.csv", "regions_path": "/data/regions.csv"}}"#
        )
        .unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.events_path, PathBuf::from("/data/events.csv"));
        assert_eq!(config.regions_path, PathBuf::from("/data/regions.csv"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("olympic_insights.json");
        std::fs::write(&path, r#"{"events_path": "elsewhere.csv"}"#).unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.events_path, PathBuf::from("elsewhere.csv"));
        assert_eq!(config.regions_path, PathBuf::from("noc_regions.csv"));
    }

    #[test]
    fn test_malformed_config_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("olympic_insights.json");
        std::fs::write(&path, "not json at all").unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.events_path, PathBuf::from("athlete_events.csv"));
    }
}
