//! Configuration for the top bar front end.
//!
//! Configuration is loaded from `<config dir>/topbar/topbar.toml` and provides
//! window, logging, and popup placement settings.

use std::path::{Path, PathBuf};

use anyhow::Result;
use etcetera::BaseStrategy;
use serde::Deserialize;

use crate::position::DEFAULT_INSET;

/// Configuration loaded from `topbar.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TopbarConfig {
    pub window: WindowConfig,
    pub logging: LoggingConfig,
    pub popup: PopupConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_file: Option<PathBuf>,
    pub level: String,
    pub suppressed_patterns: Vec<String>,
}

/// Popup placement configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// Distance in pixels between the trigger item's midpoint and the popup edge.
    pub inset: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "topbar".to_string(),
            width: 1200.0,
            height: 800.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_file: Some(PathBuf::from("/tmp/topbar-demo.log")),
            level: "info".to_string(),
            suppressed_patterns: vec![
                "SelectionDidChange".to_string(),
                "Dispatched unknown event".to_string(),
                "mousemove".to_string(),
                "pointermove".to_string(),
            ],
        }
    }
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            inset: DEFAULT_INSET,
        }
    }
}

impl TopbarConfig {
    /// Path of the default config file, if a config directory can be determined.
    pub fn default_path() -> Option<PathBuf> {
        let strategy = etcetera::choose_base_strategy().ok()?;
        Some(strategy.config_dir().join("topbar").join("topbar.toml"))
    }

    /// Load configuration from the default location.
    ///
    /// Falls back to defaults if the file doesn't exist.
    /// Returns an error only if the file exists but is malformed.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str::<TopbarConfig>(&content)?;
        Ok(config)
    }

    /// Set the window title.
    #[must_use]
    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Set the window dimensions.
    #[must_use]
    pub fn with_window_size(mut self, width: f64, height: f64) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Set the log file path.
    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.logging.log_file = Some(path.into());
        self
    }

    /// Set the log level (e.g., "info", "debug", "warn").
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Set the popup inset in pixels.
    #[must_use]
    pub fn with_popup_inset(mut self, inset: f64) -> Self {
        self.popup.inset = inset;
        self
    }
}
