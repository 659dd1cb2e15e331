//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::core::export::EXPORT_FILE_NAME;

/// Registry file looked up in the working directory by default
pub const DEFAULT_REGISTRY_FILE: &str = "operando_cell_registry.json";

/// Local config file name, read from the working directory
pub const LOCAL_CONFIG_FILE: &str = "oreg.yaml";

/// oreg configuration with layered hierarchy
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Path to the registry JSON document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<PathBuf>,

    /// File name used for `oreg export`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_file: Option<String>,

    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let local = std::env::current_dir()
            .ok()
            .map(|dir| dir.join(LOCAL_CONFIG_FILE));
        let mut config =
            Self::load_files(Self::global_config_path().as_deref(), local.as_deref());

        // Environment variables
        if let Ok(registry) = std::env::var("OREG_REGISTRY") {
            config.registry = Some(PathBuf::from(registry));
        }
        if let Ok(export_file) = std::env::var("OREG_EXPORT_FILE") {
            config.export_file = Some(export_file);
        }

        config
    }

    /// Merge the global and local config files (local wins)
    pub fn load_files(global: Option<&Path>, local: Option<&Path>) -> Self {
        let mut config = Config::default();
        for path in [global, local].into_iter().flatten() {
            if let Some(layer) = Self::read_file(path) {
                config.merge(layer);
            }
        }
        config
    }

    /// Read a single config file; unreadable or invalid files are skipped
    pub fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring invalid config file");
                None
            }
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "oreg")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.registry.is_some() {
            self.registry = other.registry;
        }
        if other.export_file.is_some() {
            self.export_file = other.export_file;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Registry path, falling back to the default file name
    pub fn registry_path(&self) -> PathBuf {
        self.registry
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REGISTRY_FILE))
    }

    /// Export file name, falling back to the default
    pub fn export_file(&self) -> String {
        self.export_file
            .clone()
            .unwrap_or_else(|| EXPORT_FILE_NAME.to_string())
    }
}
