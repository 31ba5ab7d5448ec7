//! Error handling for DuctKit
//!
//! Provides the error types used across the workspace:
//! - Layout errors (validation failures of a layout operation)
//! - A unified `Error` wrapping layout, I/O and JSON failures
//!
//! All error types use `thiserror`. None of them is fatal: a failed layout
//! operation leaves the previous snapshot installed.

use thiserror::Error;

/// Layout error type
///
/// Raised by operations that validate their input before producing a new
/// layout snapshot. The caller reports these to the user and keeps the
/// current snapshot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The referenced part does not exist in the snapshot
    #[error("Part {id} not found")]
    PartNotFound {
        /// The missing part id.
        id: u64,
    },

    /// A straight duct was required but another part type was given
    #[error("Part {id} is a {part_type}, not a straight duct")]
    NotAStraightDuct {
        /// The id of the offending part.
        id: u64,
        /// The type tag of the offending part.
        part_type: String,
    },

    /// The requested distance leaves no room for the duct
    #[error("Negative duct length: {total_distance} - {length_to_subtract} = {final_length}")]
    NegativeLength {
        /// The total distance entered by the user.
        total_distance: f64,
        /// The fixed fitting length inside the measured span.
        length_to_subtract: f64,
        /// The resulting (negative) duct length.
        final_length: f64,
    },

    /// A dimension anchor could not be located on its part
    #[error("Anchor {point} not found on part {part_id}")]
    AnchorNotFound {
        /// The part the anchor refers to.
        part_id: u64,
        /// Human readable description of the anchor point.
        point: String,
    },

    /// A dimension with the given id does not exist
    #[error("Dimension {id} not found")]
    DimensionNotFound {
        /// The missing dimension id.
        id: String,
    },

    /// Unknown part type tag
    #[error("Unknown part type: {tag}")]
    UnknownPartType {
        /// The unrecognised tag.
        tag: String,
    },
}

impl LayoutError {
    /// Check if this error came from validating user input
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            LayoutError::NegativeLength { .. } | LayoutError::NotAStraightDuct { .. }
        )
    }

    /// Check if this error is a failed lookup
    pub fn is_lookup_miss(&self) -> bool {
        matches!(
            self,
            LayoutError::PartNotFound { .. }
                | LayoutError::AnchorNotFound { .. }
                | LayoutError::DimensionNotFound { .. }
        )
    }
}

/// Main error type for DuctKit
#[derive(Error, Debug)]
pub enum Error {
    /// Layout error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a layout error
    pub fn is_layout_error(&self) -> bool {
        matches!(self, Error::Layout(_))
    }

    /// Check if this is an I/O error
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
