//! DuctKit Settings Crate
//!
//! Handles user configuration: snap sensitivity, defaults for new parts and
//! dimension display, persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{Config, DisplaySettings, PartDefaults, SnapSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
