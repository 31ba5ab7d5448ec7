//! Serialization and deserialization for layout files.
//!
//! Layouts are stored as `.duct.json` files: a version tag, metadata, the
//! viewport, every part and the user dimensions. Run dimensions are derived
//! data and are never written.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::connectivity;
use crate::dimension::Dimension;
use crate::model::Part;
use crate::part_store::PartStore;
use crate::snapshot::LayoutSnapshot;
use crate::viewport::ViewportState;

/// Layout file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Conventional extension for layout files.
pub const LAYOUT_FILE_EXTENSION: &str = "duct.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
}

/// Complete layout file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutFile {
    pub version: String,
    pub metadata: LayoutMetadata,
    #[serde(default)]
    pub viewport: ViewportState,
    pub parts: Vec<Part>,
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
}

impl LayoutFile {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: LayoutMetadata {
                name: name.into(),
                created: now,
                modified: now,
                author: String::new(),
                description: String::new(),
            },
            viewport: ViewportState::default(),
            parts: Vec::new(),
            dimensions: Vec::new(),
        }
    }

    /// Captures a snapshot. Run dimensions are dropped if any slipped in.
    pub fn from_snapshot(
        name: impl Into<String>,
        snapshot: &LayoutSnapshot,
        viewport: ViewportState,
    ) -> Self {
        let mut file = Self::new(name);
        file.viewport = viewport;
        file.parts = snapshot.parts.iter().cloned().collect();
        file.dimensions = snapshot
            .dimensions
            .iter()
            .filter(|d| !d.is_straight_run)
            .cloned()
            .collect();
        file
    }

    /// Rebuilds the snapshot described by this file.
    ///
    /// Groups are re-derived from geometry when a stored `groupId` does not
    /// name a member of its own group, which only happens in files edited by
    /// hand or written by older versions.
    pub fn to_snapshot(&self) -> LayoutSnapshot {
        let mut parts = PartStore::from_parts(self.parts.iter().cloned());
        let groups_valid = parts.iter().all(|p| {
            parts
                .get(p.group_id)
                .is_some_and(|rep| rep.group_id == p.group_id)
        });
        if !groups_valid {
            warn!("Layout has inconsistent group ids, recomputing groups");
            parts = connectivity::recompute_all_groups(&parts);
        }

        let dimensions = self
            .dimensions
            .iter()
            .filter(|d| !d.is_straight_run)
            .cloned()
            .collect();
        LayoutSnapshot::new(parts, dimensions)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize layout")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: LayoutFile = serde_json::from_str(json).context("Failed to parse layout file")?;
        file.check_version()?;
        Ok(file)
    }

    fn check_version(&self) -> Result<()> {
        let major = self.version.split('.').next().unwrap_or_default();
        let supported = FILE_FORMAT_VERSION.split('.').next().unwrap_or_default();
        if major != supported {
            bail!(
                "Unsupported layout file version {} (expected {})",
                self.version,
                FILE_FORMAT_VERSION
            );
        }
        Ok(())
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write layout file {}", path.display()))?;
        info!(
            "Saved layout '{}' ({} parts, {} dimensions) to {}",
            self.metadata.name,
            self.parts.len(),
            self.dimensions.len(),
            path.display()
        );
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout file {}", path.display()))?;
        let file = Self::from_json(&content)?;
        info!(
            "Loaded layout '{}' ({} parts, {} dimensions) from {}",
            file.metadata.name,
            file.parts.len(),
            file.dimensions.len(),
            path.display()
        );
        Ok(file)
    }
}
