//! # DuctKit
//!
//! Layout core for a residential HVAC duct design tool: parametric duct
//! parts, the connectivity graph between them, connector snapping, automatic
//! straight-run dimensions and dimension-driven duct resizing.
//!
//! ## Architecture
//!
//! DuctKit is organized as a workspace with multiple crates:
//!
//! 1. **ductkit-core** - Geometry primitives, tolerances, length formatting, errors
//! 2. **ductkit-designer** - Part model, connectivity, snap, dimensions, reducer, layout files
//! 3. **ductkit-settings** - User configuration (JSON/TOML)
//! 4. **ductkit** - This crate: logging setup and the command-line inspector

pub use ductkit_core::{
    format_length, Bounds, EnteredLength, Error, LayoutError, LengthFormat, Point, Result,
};
pub use ductkit_designer as designer;
pub use ductkit_designer::{
    CommandOutcome, DesignerState, Dimension, LayoutCommand, LayoutFile, LayoutSnapshot, Part,
    PartKind, PartStore, PartType,
};
pub use ductkit_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Copies the user configuration onto a designer state.
pub fn apply_config(state: &mut DesignerState, config: &Config) {
    state.snap_enabled = config.snap.enabled;
    state
        .viewport
        .set_snap_screen_distance(config.snap.screen_distance_px);
    state.default_diameter = config.parts.default_diameter;
    state.default_system_name = config.parts.default_system_name.clone();
    state.show_run_dimensions = config.display.show_run_dimensions;
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatting on stderr, leaving stdout for command output
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
