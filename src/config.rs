//! Dashboard configuration.
//!
//! Everything has a default, so the dashboard runs without any config file.
//! An optional `movement_lab.json` in the working directory overrides
//! individual fields:
//!
//! ```json
//! { "data_path": "data/ML_school_testing_clean.csv", "watch_source": false }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "movement_lab.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// CSV testing sheet read at startup.
    pub data_path: PathBuf,

    /// Suggested file name for the filtered download.
    pub export_file_name: String,

    /// Show a reload hint when the source file changes on disk.
    pub watch_source: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("ML_school_testing_clean.csv"),
            export_file_name: "movement_lab_filtered_data.csv".to_string(),
            watch_source: true,
        }
    }
}

impl DashboardConfig {
    /// Read a config file. Fields not present keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Config from `path` if it exists, defaults otherwise.
    ///
    /// A file that exists but cannot be used is logged and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No {} found, using defaults", path.display());
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::load_or_default(&dir.path().join(CONFIG_FILE));
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.export_file_name, "movement_lab_filtered_data.csv");
    }

    #[test]
    fn test_partial_file_overrides_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "data_path": "other.csv" }"#).unwrap();
        let config = DashboardConfig::load_or_default(&path);
        assert_eq!(config.data_path, PathBuf::from("other.csv"));
        assert!(config.watch_source);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(DashboardConfig::from_file(&path).is_err());
        assert_eq!(DashboardConfig::load_or_default(&path), DashboardConfig::default());
    }
}
