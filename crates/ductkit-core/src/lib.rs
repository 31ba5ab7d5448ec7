//! # DuctKit Core
//!
//! Core types and utilities shared by the DuctKit crates.
//! Provides the 2-D geometry primitives every part formula is written
//! against, the tolerances that define connectivity, length display helpers
//! and the error taxonomy.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod units;

pub use error::{Error, LayoutError, Result};
pub use geometry::{normalize_angle, Bounds, Point};
pub use units::{format_length, EnteredLength, LengthFormat};
