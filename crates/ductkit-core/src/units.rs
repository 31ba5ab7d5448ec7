//! Length display helpers
//!
//! Layout lengths are abstract scalar units shown to the user as
//! millimetres. There is no conversion, only formatting and parsing of what
//! the dimension dialog types in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// How a length value is rendered in labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthFormat {
    /// Number of decimal places shown
    pub precision: usize,
    /// Append the " mm" suffix
    pub show_suffix: bool,
}

impl Default for LengthFormat {
    fn default() -> Self {
        Self {
            precision: 0,
            show_suffix: true,
        }
    }
}

/// Formats a length for a dimension label.
pub fn format_length(value: f64, format: LengthFormat) -> String {
    if format.show_suffix {
        format!("{:.*} mm", format.precision, value)
    } else {
        format!("{:.*}", format.precision, value)
    }
}

/// A length typed by the user, e.g. `"1200"`, `"1200mm"` or `" 850.5 mm "`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnteredLength(pub f64);

impl FromStr for EnteredLength {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed
            .strip_suffix("mm")
            .map(str::trim_end)
            .unwrap_or(trimmed);
        let value: f64 = number
            .parse()
            .map_err(|_| Error::other(format!("Invalid length: {}", s)))?;
        if !value.is_finite() {
            return Err(Error::other(format!("Invalid length: {}", s)));
        }
        Ok(EnteredLength(value))
    }
}

impl fmt::Display for EnteredLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_length(self.0, LengthFormat::default()))
    }
}
