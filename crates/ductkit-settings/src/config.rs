//! Configuration and settings management for DuctKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in the platform configuration directory.
//!
//! Configuration is organized into logical sections:
//! - Snap behaviour (on/off, screen-space sensitivity)
//! - Defaults for newly placed parts
//! - Dimension display

use ductkit_core::constants::{DEFAULT_DIAMETER, DEFAULT_SNAP_SCREEN_DISTANCE};
use ductkit_core::LengthFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Maximum number of entries kept in the recent files list.
const MAX_RECENT_FILES: usize = 10;

/// Snap settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Snap connectors together on drop
    pub enabled: bool,
    /// Snap sensitivity in screen pixels, divided by zoom at use site
    pub screen_distance_px: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            screen_distance_px: DEFAULT_SNAP_SCREEN_DISTANCE,
        }
    }
}

/// Defaults applied to parts created without explicit values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartDefaults {
    pub default_diameter: f64,
    pub default_system_name: String,
}

impl Default for PartDefaults {
    fn default() -> Self {
        Self {
            default_diameter: DEFAULT_DIAMETER,
            default_system_name: "Supply".to_string(),
        }
    }
}

/// Dimension display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Show the derived straight-run dimensions
    pub show_run_dimensions: bool,
    /// Decimal places in dimension labels
    pub dimension_precision: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_run_dimensions: true,
            dimension_precision: 0,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
/// Missing sections and keys fall back to their defaults when loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Recent layout files, most recent first
    pub recent_files: Vec<PathBuf>,
    pub snap: SnapSettings,
    pub parts: PartDefaults,
    pub display: DisplaySettings,
}

enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location: `<config dir>/ductkit/config.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("ductkit").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Loads the config at [`default_path`](Self::default_path), or the
    /// defaults if no file has been written yet.
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.snap.screen_distance_px) {
            return Err(ConfigError::out_of_range(
                "snap.screen_distance_px",
                self.snap.screen_distance_px,
            ));
        }

        if !is_positive(self.parts.default_diameter) {
            return Err(ConfigError::out_of_range(
                "parts.default_diameter",
                self.parts.default_diameter,
            ));
        }

        Ok(())
    }

    /// Label format for dimension values.
    pub fn length_format(&self) -> LengthFormat {
        LengthFormat {
            precision: self.display.dimension_precision,
            ..LengthFormat::default()
        }
    }

    /// Add file to recent files list
    pub fn add_recent_file(&mut self, path: PathBuf) {
        self.recent_files.retain(|f| f != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(MAX_RECENT_FILES);
    }
}

/// Finite and strictly greater than zero.
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
