//! The `(parts, dimensions)` pair every layout operation consumes and returns.

use crate::dimension::Dimension;
use crate::part_store::PartStore;

/// Immutable view of a layout at one point in time.
///
/// Operations take a snapshot by reference and hand back a new one; the
/// caller installs it only when the operation succeeded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutSnapshot {
    pub parts: PartStore,
    /// User-authored dimensions only; run dimensions are derived on demand
    pub dimensions: Vec<Dimension>,
}

impl LayoutSnapshot {
    pub fn new(parts: PartStore, dimensions: Vec<Dimension>) -> Self {
        Self { parts, dimensions }
    }

    pub fn with_parts(&self, parts: PartStore) -> Self {
        Self {
            parts,
            dimensions: self.dimensions.clone(),
        }
    }

    pub fn dimension(&self, id: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.id == id)
    }
}
