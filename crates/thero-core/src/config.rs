use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::TheroError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level studio configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioConfig {
    pub fonts: FontsConfig,
    pub export: ExportConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontsConfig {
    /// Remote catalog endpoint, queried with `?key=<credential>&sort=popularity`.
    pub catalog_url: String,
    /// Stylesheet delivery endpoint that font specs are appended to.
    pub stylesheet_url: String,
    pub search_debounce_ms: u64,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub css_file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub mode: ModePreference,
    pub preset: Option<String>,
}

/// Color mode requested at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModePreference {
    #[default]
    Light,
    Dark,
    System,
}

impl StudioConfig {
    /// Load config: the user file if it exists, otherwise built-in defaults.
    pub fn load() -> Result<Self, TheroError> {
        let user_path = Self::config_path();
        if user_path.exists() {
            let user_str = std::fs::read_to_string(&user_path)
                .map_err(|e| TheroError::Config(e.to_string()))?;
            toml::from_str(&user_str).map_err(|e| TheroError::Config(e.to_string()))
        } else {
            toml::from_str(DEFAULT_CONFIG).map_err(|e| TheroError::Config(e.to_string()))
        }
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Path to the persisted session key-value file.
    pub fn session_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.data_dir().join("session.toml"))
            .unwrap_or_else(|| PathBuf::from("session.toml"))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "thero")
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}
