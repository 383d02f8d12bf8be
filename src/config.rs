use mdinventory_container::layouts::StandardLayout;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/mdinventory.toml";

/// Settings for the click-script replay tool.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Layout for scripts that don't name one.
    pub default_layout: StandardLayout,
    /// Where to write the final-state snapshot, if anywhere.
    pub snapshot_path: Option<PathBuf>,
    /// Where to write the per-click NDJSON log, if anywhere.
    pub click_log_path: Option<PathBuf>,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            default_layout: StandardLayout::Chest,
            snapshot_path: None,
            click_log_path: None,
        }
    }
}

impl ReplayConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ReplayConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    ReplayConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                ReplayConfig::default()
            }
        }
    }
}
