//! Layout commands and the reducer that applies them.
//!
//! Every edit the UI can make is a [`LayoutCommand`]. [`reduce`] applies one
//! to a snapshot and returns the next snapshot; the input is never touched,
//! so a rejected command leaves the layout exactly as it was.

use tracing::{debug, warn};

use ductkit_core::constants::{DEFAULT_DIAMETER, DEFAULT_SNAP_SCREEN_DISTANCE};
use ductkit_core::{LayoutError, Point};

use crate::catalog::{create_part, FittingDefaults};
use crate::connectivity;
use crate::dimension::{AnchorRef, Dimension};
use crate::length_propagator::{resize_duct_to_distance, ResizeRequest};
use crate::model::{DuctPart, Part};
use crate::snap::{find_best_snap, SnapResult};
use crate::snapshot::LayoutSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutCommand {
    /// Creates a part from a type tag and catalog defaults at `position`.
    AddPart {
        type_tag: String,
        position: Point,
        defaults: FittingDefaults,
    },
    /// Inserts a fully built part (paste, restore). It joins no group.
    InsertPart { part: Part },
    /// Translates every member of a group, without snapping.
    MoveGroup { group_id: u64, dx: f64, dy: f64 },
    /// Ends a drag: snaps the part's group onto the nearest compatible
    /// connector and merges the two groups.
    DropPart { part_id: u64 },
    RotatePart { part_id: u64 },
    FlipPart { part_id: u64 },
    DisconnectPart { part_id: u64 },
    DeletePart { part_id: u64 },
    ResizeDuct(ResizeRequest),
    AddDimension { p1: AnchorRef, p2: AnchorRef },
    RemoveDimension { id: String },
    SelectPart { part_id: u64, additive: bool },
    ClearSelection,
}

impl LayoutCommand {
    /// Short label for history and logs.
    pub fn name(&self) -> &'static str {
        match self {
            LayoutCommand::AddPart { .. } => "Add Part",
            LayoutCommand::InsertPart { .. } => "Insert Part",
            LayoutCommand::MoveGroup { .. } => "Move",
            LayoutCommand::DropPart { .. } => "Drop",
            LayoutCommand::RotatePart { .. } => "Rotate",
            LayoutCommand::FlipPart { .. } => "Flip",
            LayoutCommand::DisconnectPart { .. } => "Disconnect",
            LayoutCommand::DeletePart { .. } => "Delete",
            LayoutCommand::ResizeDuct(_) => "Resize Duct",
            LayoutCommand::AddDimension { .. } => "Add Dimension",
            LayoutCommand::RemoveDimension { .. } => "Remove Dimension",
            LayoutCommand::SelectPart { .. } => "Select",
            LayoutCommand::ClearSelection => "Clear Selection",
        }
    }

    /// Whether the command changes the layout rather than just selection.
    pub fn is_edit(&self) -> bool {
        !matches!(
            self,
            LayoutCommand::SelectPart { .. } | LayoutCommand::ClearSelection
        )
    }
}

/// What a successfully applied command did.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Applied,
    /// Nothing to do (for example a missing part on disconnect)
    Unchanged,
    PartAdded { part_id: u64 },
    Snapped(SnapResult),
    Resized { duct_id: u64, final_length: f64 },
    DimensionAdded { id: String },
}

/// Settings the reducer needs from outside the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ReduceContext {
    pub snap_enabled: bool,
    /// Snap threshold in world units
    pub snap_distance: f64,
    pub default_diameter: f64,
    pub default_system_name: String,
}

impl Default for ReduceContext {
    fn default() -> Self {
        Self {
            snap_enabled: true,
            snap_distance: DEFAULT_SNAP_SCREEN_DISTANCE,
            default_diameter: DEFAULT_DIAMETER,
            default_system_name: String::new(),
        }
    }
}

/// Applies `command` to `snapshot`.
pub fn reduce(
    snapshot: &LayoutSnapshot,
    command: LayoutCommand,
    ctx: &ReduceContext,
) -> Result<(LayoutSnapshot, CommandOutcome), LayoutError> {
    match command {
        LayoutCommand::AddPart {
            type_tag,
            position,
            defaults,
        } => {
            let mut parts = snapshot.parts.clone();
            let id = parts.generate_id();
            let defaults = FittingDefaults {
                diameter: defaults.diameter.or(Some(ctx.default_diameter)),
                system_name: defaults
                    .system_name
                    .or_else(|| Some(ctx.default_system_name.clone())),
                ..defaults
            };
            let part = create_part(&type_tag, id, position, &defaults)
                .ok_or(LayoutError::UnknownPartType { tag: type_tag })?;
            parts.insert(part);
            debug!("Added part {}", id);
            Ok((snapshot.with_parts(parts), CommandOutcome::PartAdded { part_id: id }))
        }

        LayoutCommand::InsertPart { mut part } => {
            let mut parts = snapshot.parts.clone();
            if parts.contains(part.id) {
                part.id = parts.generate_id();
            }
            part.group_id = part.id;
            let id = part.id;
            parts.insert(part);
            Ok((snapshot.with_parts(parts), CommandOutcome::PartAdded { part_id: id }))
        }

        LayoutCommand::MoveGroup { group_id, dx, dy } => {
            let mut parts = snapshot.parts.clone();
            let mut moved = false;
            for part in parts.iter_mut().filter(|p| p.group_id == group_id) {
                part.translate(dx, dy);
                moved = true;
            }
            if !moved {
                return Ok((snapshot.clone(), CommandOutcome::Unchanged));
            }
            Ok((snapshot.with_parts(parts), CommandOutcome::Applied))
        }

        LayoutCommand::DropPart { part_id } => {
            let dragged = snapshot
                .parts
                .get(part_id)
                .ok_or(LayoutError::PartNotFound { id: part_id })?;
            if !ctx.snap_enabled {
                return Ok((snapshot.clone(), CommandOutcome::Applied));
            }
            let Some(snap) = find_best_snap(dragged, snapshot.parts.iter(), ctx.snap_distance)
            else {
                return Ok((snapshot.clone(), CommandOutcome::Applied));
            };

            let dragged_group = dragged.group_id;
            let mut parts = snapshot.parts.clone();
            for part in parts.iter_mut().filter(|p| p.group_id == dragged_group) {
                part.translate(snap.dx, snap.dy);
            }
            let target_group = parts
                .get(snap.matched_part_id)
                .map(|p| p.group_id)
                .ok_or(LayoutError::PartNotFound {
                    id: snap.matched_part_id,
                })?;
            let parts = connectivity::merge_groups(&parts, target_group, dragged_group);
            debug!(
                "Snapped part {} connector {} onto part {} connector {}",
                part_id, snap.dragged_connector_id, snap.matched_part_id, snap.matched_connector_id
            );
            Ok((snapshot.with_parts(parts), CommandOutcome::Snapped(snap)))
        }

        LayoutCommand::RotatePart { part_id } => {
            transform_part(snapshot, part_id, |p| p.rotate_step())
        }

        LayoutCommand::FlipPart { part_id } => transform_part(snapshot, part_id, |p| p.flip()),

        LayoutCommand::DisconnectPart { part_id } => {
            if !snapshot.parts.contains(part_id) {
                return Ok((snapshot.clone(), CommandOutcome::Unchanged));
            }
            let parts = connectivity::disconnect(&snapshot.parts, part_id);
            Ok((snapshot.with_parts(parts), CommandOutcome::Applied))
        }

        LayoutCommand::DeletePart { part_id } => {
            if !snapshot.parts.contains(part_id) {
                return Ok((snapshot.clone(), CommandOutcome::Unchanged));
            }
            let parts = connectivity::delete(&snapshot.parts, part_id);
            Ok((snapshot.with_parts(parts), CommandOutcome::Applied))
        }

        LayoutCommand::ResizeDuct(request) => match resize_duct_to_distance(snapshot, &request) {
            Ok(next) => Ok((
                next,
                CommandOutcome::Resized {
                    duct_id: request.duct_id,
                    final_length: request.final_length(),
                },
            )),
            Err(e) => {
                warn!("Resize of duct {} rejected: {}", request.duct_id, e);
                Err(e)
            }
        },

        LayoutCommand::AddDimension { p1, p2 } => {
            let a = p1.try_resolve(&snapshot.parts)?;
            let b = p2.try_resolve(&snapshot.parts)?;
            let dimension = Dimension::new(p1, p2, a.distance_to(&b));
            let id = dimension.id.clone();
            let mut next = snapshot.clone();
            next.dimensions.push(dimension);
            Ok((next, CommandOutcome::DimensionAdded { id }))
        }

        LayoutCommand::RemoveDimension { id } => {
            let mut next = snapshot.clone();
            let before = next.dimensions.len();
            next.dimensions.retain(|d| d.id != id);
            if next.dimensions.len() == before {
                return Err(LayoutError::DimensionNotFound { id });
            }
            Ok((next, CommandOutcome::Applied))
        }

        LayoutCommand::SelectPart { part_id, additive } => {
            if !snapshot.parts.contains(part_id) {
                return Err(LayoutError::PartNotFound { id: part_id });
            }
            let mut parts = snapshot.parts.clone();
            for part in parts.iter_mut() {
                if part.id == part_id {
                    part.is_selected = true;
                } else if !additive {
                    part.is_selected = false;
                }
            }
            Ok((snapshot.with_parts(parts), CommandOutcome::Applied))
        }

        LayoutCommand::ClearSelection => {
            let mut parts = snapshot.parts.clone();
            for part in parts.iter_mut() {
                part.is_selected = false;
            }
            Ok((snapshot.with_parts(parts), CommandOutcome::Applied))
        }
    }
}

/// Rotates or flips one part in place, then re-partitions the group it
/// belonged to since its connectors may have left their neighbours.
fn transform_part<F>(
    snapshot: &LayoutSnapshot,
    part_id: u64,
    f: F,
) -> Result<(LayoutSnapshot, CommandOutcome), LayoutError>
where
    F: FnOnce(&mut Part),
{
    let mut parts = snapshot.parts.clone();
    let part = parts
        .get_mut(part_id)
        .ok_or(LayoutError::PartNotFound { id: part_id })?;
    f(part);
    let parts = connectivity::regroup(&parts, part_id);
    Ok((snapshot.with_parts(parts), CommandOutcome::Applied))
}
