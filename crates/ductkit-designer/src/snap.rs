//! Connector snapping for drag operations.
//!
//! While a part is dragged, every one of its connectors is compared with
//! every connector of the parts outside its group. A pair qualifies when the
//! diameters match and the connectors are closer than the snap distance; the
//! closest qualifying pair wins and the drop translation aligns the dragged
//! connector exactly onto the static one.

use ductkit_core::constants::DIAMETER_EPSILON;

use crate::model::{Connector, DuctPart, Part};

/// Outcome of a successful snap search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// Translation to apply to the dragged part (and its group)
    pub dx: f64,
    pub dy: f64,
    /// The static part whose connector was matched
    pub matched_part_id: u64,
    pub dragged_connector_id: u32,
    pub matched_connector_id: u32,
    /// Distance between the two connectors before snapping
    pub distance: f64,
}

/// Converts the screen-space snap sensitivity into world units, so that
/// snapping feels the same at every zoom level.
pub fn snap_distance_for_zoom(screen_distance: f64, zoom: f64) -> f64 {
    if zoom <= 0.0 {
        return screen_distance;
    }
    screen_distance / zoom
}

/// Finds the closest compatible connector pairing for `dragged`.
///
/// Static parts in the dragged part's group (and the dragged part itself)
/// are ignored, as are connector pairs of different diameter. Only a strictly
/// shorter distance replaces the current best, so ties keep the first pair
/// found in iteration order.
pub fn find_best_snap<'a, I>(
    dragged: &Part,
    static_parts: I,
    snap_distance: f64,
) -> Option<SnapResult>
where
    I: IntoIterator<Item = &'a Part>,
{
    let targets: Vec<(u64, Connector)> = static_parts
        .into_iter()
        .filter(|other| other.id != dragged.id && other.group_id != dragged.group_id)
        .flat_map(|other| other.connectors().into_iter().map(move |c| (other.id, c)))
        .collect();
    let mut best: Option<SnapResult> = None;

    for source in dragged.connectors() {
        for (part_id, target) in &targets {
            if (source.diameter - target.diameter).abs() > DIAMETER_EPSILON {
                continue;
            }
            let distance = source.distance_to(target);
            if distance >= snap_distance {
                continue;
            }
            if best.as_ref().map_or(true, |b| distance < b.distance) {
                best = Some(SnapResult {
                    dx: target.position.x - source.position.x,
                    dy: target.position.y - source.position.y,
                    matched_part_id: *part_id,
                    dragged_connector_id: source.id,
                    matched_connector_id: target.id,
                    distance,
                });
            }
        }
    }

    best
}
