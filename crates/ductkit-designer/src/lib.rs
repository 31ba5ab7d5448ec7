//! # DuctKit Designer
//!
//! The duct layout engine: parametric part geometry, the connectivity graph
//! that tracks which parts are joined, connector snapping for drag and drop,
//! automatic run dimensions and the length propagator that resizes a duct
//! while keeping everything downstream attached.
//!
//! ## Architecture
//!
//! ```text
//! model (Part, PartKind, DuctPart, FittingGeometry)
//!   └── part_store (id-indexed arena)
//!         ├── connectivity (groups, BFS over coincident connectors)
//!         ├── snap (best connector pairing for a dragged part)
//!         ├── dimension / run_dimensions
//!         └── length_propagator
//!
//! commands (LayoutCommand + reduce)
//!   └── designer_state (current snapshot, viewport, catalog)
//! ```
//!
//! Every operation takes a [`LayoutSnapshot`] by reference and returns a new
//! one; nothing caches derived data between calls.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ductkit_designer::{DesignerState, LayoutCommand};
//! use ductkit_core::Point;
//!
//! let mut state = DesignerState::new();
//! let id = state.add_from_catalog("90° Elbow", Point::new(0.0, 0.0))?;
//! state.apply(LayoutCommand::RotatePart { part_id: id })?;
//! for dim in state.all_dimensions() {
//!     println!("{}: {:.0}", dim.id, dim.value);
//! }
//! ```

pub mod catalog;
pub mod commands;
pub mod connectivity;
pub mod designer_state;
pub mod dimension;
pub mod length_propagator;
pub mod model;
pub mod part_store;
pub mod run_dimensions;
pub mod serialization;
pub mod snap;
pub mod snapshot;
pub mod viewport;

pub use catalog::{create_part, FittingDefaults, FittingItem, FittingsCatalog};
pub use commands::{reduce, CommandOutcome, LayoutCommand, ReduceContext};
pub use connectivity::{
    are_coincident, delete, disconnect, merge_groups, recompute_all_groups, recompute_groups,
};
pub use designer_state::DesignerState;
pub use dimension::{AnchorRef, Dimension, PointId, PointType};
pub use length_propagator::{measured_fixed_length, resize_duct_to_distance, ResizeRequest};
pub use model::{
    AdjustableElbow, Connector, ConnectorRole, Damper, DuctPart, Elbow90, IntersectionPoint, Part,
    PartKind, PartType, Reducer, StraightDuct, TeeReducer, YBranch, YBranchReducer,
};
pub use part_store::PartStore;
pub use run_dimensions::compute_run_dimensions;
pub use serialization::{LayoutFile, LayoutMetadata};
pub use snap::{find_best_snap, snap_distance_for_zoom, SnapResult};
pub use snapshot::LayoutSnapshot;
pub use viewport::{Viewport, ViewportState};
