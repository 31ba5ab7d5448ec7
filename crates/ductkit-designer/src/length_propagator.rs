//! Resizing a straight duct to hit a measured overall distance.
//!
//! The user measures between two anchor points that bracket a duct plus some
//! fixed fitting geometry. The duct is stretched or shrunk so the measured
//! distance becomes the requested total, keeping the end nearer the first
//! anchor in place. Everything attached beyond the other end moves rigidly
//! with it so joints stay closed.

use tracing::{debug, info};

use ductkit_core::constants::{COINCIDENCE_TOLERANCE, LENGTH_EPSILON};
use ductkit_core::{LayoutError, Point};

use crate::connectivity::reachable_from_connector;
use crate::dimension::{rederive_values, AnchorRef, Dimension};
use crate::model::{DuctPart, Part, PartKind};
use crate::part_store::PartStore;
use crate::snapshot::LayoutSnapshot;

/// Parameters collected by the dimension dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeRequest {
    pub duct_id: u64,
    /// Overall distance the user wants between the two anchors
    pub total_distance: f64,
    /// Portion of the total taken up by geometry other than the duct
    pub length_to_subtract: f64,
    pub anchor_point: AnchorRef,
    pub far_point: AnchorRef,
}

impl ResizeRequest {
    pub fn final_length(&self) -> f64 {
        self.total_distance - self.length_to_subtract
    }
}

fn straight_duct(parts: &PartStore, duct_id: u64) -> Result<(&Part, f64), LayoutError> {
    let part = parts
        .get(duct_id)
        .ok_or(LayoutError::PartNotFound { id: duct_id })?;
    let length = part
        .straight_length()
        .ok_or_else(|| LayoutError::NotAStraightDuct {
            id: duct_id,
            part_type: part.part_type().to_string(),
        })?;
    Ok((part, length))
}

/// How much of the measured distance is not the duct itself.
///
/// This is the value the dimension dialog passes as
/// [`ResizeRequest::length_to_subtract`].
pub fn measured_fixed_length(
    parts: &PartStore,
    duct_id: u64,
    anchor: &AnchorRef,
    far: &AnchorRef,
) -> Result<f64, LayoutError> {
    let (_, length) = straight_duct(parts, duct_id)?;
    let a = anchor.try_resolve(parts)?;
    let b = far.try_resolve(parts)?;
    Ok(a.distance_to(&b) - length)
}

/// Group members joined at `point` through a connector that faces along
/// `direction`, i.e. parts on the anchor side of a zero-length duct whose
/// two ends share that point.
fn facing_parts(parts: &PartStore, duct: &Part, point: Point, direction: Point) -> Vec<u64> {
    parts
        .iter()
        .filter(|p| p.group_id == duct.group_id && p.id != duct.id)
        .filter(|p| {
            p.connectors().iter().any(|c| {
                c.position.distance_to(&point) < COINCIDENCE_TOLERANCE
                    && Point::from_angle(c.angle).dot(&direction) > 0.0
            })
        })
        .map(|p| p.id)
        .collect()
}

/// Resizes the duct and shifts everything downstream of its moving end.
///
/// Returns the new snapshot; `snapshot` itself is never modified, so any
/// error leaves the layout as it was.
pub fn resize_duct_to_distance(
    snapshot: &LayoutSnapshot,
    request: &ResizeRequest,
) -> Result<LayoutSnapshot, LayoutError> {
    let parts = &snapshot.parts;
    let (duct, old_length) = straight_duct(parts, request.duct_id)?;

    let final_length = request.final_length();
    if final_length < 0.0 {
        return Err(LayoutError::NegativeLength {
            total_distance: request.total_distance,
            length_to_subtract: request.length_to_subtract,
            final_length,
        });
    }

    let anchor_pos = request.anchor_point.try_resolve(parts)?;
    request.far_point.try_resolve(parts)?;

    let connectors = duct.connectors();
    let (Some(c0), Some(c1)) = (connectors.first(), connectors.get(1)) else {
        return Err(LayoutError::NotAStraightDuct {
            id: duct.id,
            part_type: duct.part_type().to_string(),
        });
    };
    let (anchor, moving) = if c0.position.distance_to(&anchor_pos)
        <= c1.position.distance_to(&anchor_pos)
    {
        (c0, c1)
    } else {
        (c1, c0)
    };

    let direction = if old_length < LENGTH_EPSILON {
        let along = Point::from_angle(duct.rotation);
        if moving.id == 1 {
            along
        } else {
            -along
        }
    } else {
        (moving.position - anchor.position) * (1.0 / old_length)
    };

    let new_center = anchor.position + direction * (final_length / 2.0);
    let delta = direction * (final_length - old_length);
    let mut excluded = vec![duct.id];
    if old_length < LENGTH_EPSILON {
        excluded.extend(facing_parts(parts, duct, anchor.position, direction));
    }
    let downstream = reachable_from_connector(parts, moving, duct.group_id, &excluded);

    let mut next_parts = parts.clone();
    if let Some(resized) = next_parts.get_mut(duct.id) {
        resized.position = new_center;
        if let PartKind::StraightDuct(straight) = &mut resized.kind {
            straight.length = final_length;
        }
    }
    for id in &downstream {
        if let Some(part) = next_parts.get_mut(*id) {
            part.translate(delta.x, delta.y);
        }
    }
    debug!(
        "Shifted {} downstream parts by ({:.3}, {:.3})",
        downstream.len(),
        delta.x,
        delta.y
    );

    let mut dimensions = rederive_values(&snapshot.dimensions, &next_parts);
    match dimensions
        .iter_mut()
        .find(|d| !d.is_straight_run && d.spans(&request.anchor_point, &request.far_point))
    {
        Some(existing) => existing.value = request.total_distance,
        None => dimensions.push(Dimension::new(
            request.anchor_point.clone(),
            request.far_point.clone(),
            request.total_distance,
        )),
    }

    info!(
        "Resized duct {} from {:.1} to {:.1}",
        duct.id, old_length, final_length
    );
    Ok(LayoutSnapshot::new(next_parts, dimensions))
}
