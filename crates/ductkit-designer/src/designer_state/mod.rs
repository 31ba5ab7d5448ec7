//! Designer state manager for UI integration.
//!
//! Holds the current layout snapshot together with the viewport and the
//! fittings catalog, and routes every edit through [`reduce`]. A command
//! that fails leaves the installed snapshot untouched.
//!
//! - `file_io`: save/load/new

mod file_io;

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::warn;

use ductkit_core::constants::DEFAULT_DIAMETER;
use ductkit_core::{Bounds, EnteredLength, LayoutError, Point};

use crate::catalog::FittingsCatalog;
use crate::commands::{reduce, CommandOutcome, LayoutCommand, ReduceContext};
use crate::connectivity;
use crate::dimension::{AnchorRef, Dimension};
use crate::length_propagator::ResizeRequest;
use crate::model::{DuctPart, Part};
use crate::part_store::PartStore;
use crate::run_dimensions::compute_run_dimensions;
use crate::snapshot::LayoutSnapshot;
use crate::viewport::{Viewport, VIEW_PADDING};

/// Designer state for UI integration
#[derive(Debug, Clone)]
pub struct DesignerState {
    snapshot: LayoutSnapshot,
    pub viewport: Viewport,
    pub catalog: FittingsCatalog,
    pub snap_enabled: bool,
    pub default_diameter: f64,
    pub default_system_name: String,
    pub show_run_dimensions: bool,
    pub current_file_path: Option<PathBuf>,
    pub is_modified: bool,
    pub layout_name: String,
}

impl DesignerState {
    pub fn new() -> Self {
        Self {
            snapshot: LayoutSnapshot::default(),
            viewport: Viewport::default(),
            catalog: FittingsCatalog::builtin(),
            snap_enabled: true,
            default_diameter: DEFAULT_DIAMETER,
            default_system_name: String::new(),
            show_run_dimensions: true,
            current_file_path: None,
            is_modified: false,
            layout_name: "Untitled".to_string(),
        }
    }

    pub fn snapshot(&self) -> &LayoutSnapshot {
        &self.snapshot
    }

    pub fn parts(&self) -> &PartStore {
        &self.snapshot.parts
    }

    pub fn part(&self, id: u64) -> Option<&Part> {
        self.snapshot.parts.get(id)
    }

    /// Replaces the whole snapshot, e.g. when an undo stack restores one.
    pub fn install_snapshot(&mut self, snapshot: LayoutSnapshot) {
        self.snapshot = snapshot;
        self.is_modified = true;
    }

    pub fn reduce_context(&self) -> ReduceContext {
        ReduceContext {
            snap_enabled: self.snap_enabled,
            snap_distance: self.viewport.snap_distance(),
            default_diameter: self.default_diameter,
            default_system_name: self.default_system_name.clone(),
        }
    }

    /// Applies a command and installs the result on success.
    pub fn apply(&mut self, command: LayoutCommand) -> Result<CommandOutcome, LayoutError> {
        let name = command.name();
        let is_edit = command.is_edit();
        match reduce(&self.snapshot, command, &self.reduce_context()) {
            Ok((next, outcome)) => {
                if outcome != CommandOutcome::Unchanged {
                    self.snapshot = next;
                    if is_edit {
                        self.is_modified = true;
                    }
                }
                Ok(outcome)
            }
            Err(e) => {
                warn!("{} failed: {}", name, e);
                Err(e)
            }
        }
    }

    /// Places a catalog entry by name.
    pub fn add_from_catalog(
        &mut self,
        item_name: &str,
        position: Point,
    ) -> Result<u64, LayoutError> {
        let item = self
            .catalog
            .find(item_name)
            .cloned()
            .ok_or_else(|| LayoutError::UnknownPartType {
                tag: item_name.to_string(),
            })?;
        let outcome = self.apply(LayoutCommand::AddPart {
            type_tag: item.type_tag.clone(),
            position,
            defaults: item.defaults.clone(),
        })?;
        let CommandOutcome::PartAdded { part_id } = outcome else {
            return Err(LayoutError::UnknownPartType { tag: item.type_tag });
        };
        if let Some(part) = self.snapshot.parts.get_mut(part_id) {
            part.name = item.name;
        }
        Ok(part_id)
    }

    /// Moves the group of `part_id` while it is being dragged.
    pub fn drag_part(&mut self, part_id: u64, dx: f64, dy: f64) -> Result<(), LayoutError> {
        let group_id = self
            .part(part_id)
            .map(|p| p.group_id)
            .ok_or(LayoutError::PartNotFound { id: part_id })?;
        self.apply(LayoutCommand::MoveGroup { group_id, dx, dy })?;
        Ok(())
    }

    /// Finishes a drag, snapping onto a neighbour when one is in range.
    pub fn drop_part(&mut self, part_id: u64) -> Result<CommandOutcome, LayoutError> {
        self.apply(LayoutCommand::DropPart { part_id })
    }

    /// Sets a straight duct to a typed length such as `"1200mm"`, keeping
    /// connector 0 in place and moving everything beyond connector 1.
    pub fn set_duct_length(&mut self, duct_id: u64, input: &str) -> ductkit_core::Result<f64> {
        let EnteredLength(length) = input.parse()?;
        let outcome = self.apply(LayoutCommand::ResizeDuct(ResizeRequest {
            duct_id,
            total_distance: length,
            length_to_subtract: 0.0,
            anchor_point: AnchorRef::connector(duct_id, 0),
            far_point: AnchorRef::connector(duct_id, 1),
        }))?;
        match outcome {
            CommandOutcome::Resized { final_length, .. } => Ok(final_length),
            _ => Ok(length),
        }
    }

    /// User dimensions followed by the derived run dimensions.
    pub fn all_dimensions(&self) -> Vec<Dimension> {
        let mut all = self.snapshot.dimensions.clone();
        if self.show_run_dimensions {
            all.extend(compute_run_dimensions(&self.snapshot.parts));
        }
        all
    }

    pub fn run_dimensions(&self) -> Vec<Dimension> {
        compute_run_dimensions(&self.snapshot.parts)
    }

    pub fn groups(&self) -> BTreeMap<u64, Vec<u64>> {
        connectivity::groups(&self.snapshot.parts)
    }

    /// Topmost part under a world point. Later parts draw on top.
    pub fn part_at(&self, point: Point) -> Option<&Part> {
        self.snapshot
            .parts
            .iter()
            .rev()
            .find(|p| p.contains_point(point.x, point.y))
    }

    pub fn selected_ids(&self) -> Vec<u64> {
        self.snapshot
            .parts
            .iter()
            .filter(|p| p.is_selected)
            .map(|p| p.id)
            .collect()
    }

    /// Bounds of every part, `None` for an empty layout.
    pub fn layout_bounds(&self) -> Option<Bounds> {
        self.snapshot
            .parts
            .iter()
            .map(|p| p.bounds())
            .reduce(|a, b| a.union(&b))
    }

    pub fn fit_to_view(&mut self) {
        if let Some(bounds) = self.layout_bounds() {
            self.viewport.fit_to_bounds(&bounds, VIEW_PADDING);
        }
    }
}

impl Default for DesignerState {
    fn default() -> Self {
        Self::new()
    }
}
