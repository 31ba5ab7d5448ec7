use serde::{Deserialize, Serialize};

use ductkit_core::constants::ROTATION_STEP_DEG;
use ductkit_core::{normalize_angle, Point};

use super::{capsule_contains, Connector, ConnectorList, FittingGeometry, IntersectionPoint};

fn corner_point() -> Vec<IntersectionPoint> {
    vec![IntersectionPoint {
        id: "corner",
        position: Point::ORIGIN,
    }]
}

/// Fixed 90° elbow. `position` is the corner where the two leg centrelines
/// meet; leg 0 runs towards -X, leg 1 towards +Y (-Y when flipped).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Elbow90 {
    pub leg_length: f64,
}

impl Elbow90 {
    pub fn new(leg_length: f64) -> Self {
        Self { leg_length }
    }

    fn leg_angles(&self, flipped: bool) -> (f64, f64) {
        (180.0, if flipped { -90.0 } else { 90.0 })
    }
}

impl FittingGeometry for Elbow90 {
    fn local_connectors(&self, diameter: f64, flipped: bool) -> ConnectorList {
        legs(self.leg_length, self.leg_angles(flipped), diameter)
    }

    fn local_intersection_points(&self, _flipped: bool) -> Vec<IntersectionPoint> {
        corner_point()
    }

    fn local_outline(&self, _diameter: f64, flipped: bool) -> Vec<Point> {
        leg_outline(self.leg_length, self.leg_angles(flipped))
    }

    fn outline_margin(&self, diameter: f64) -> f64 {
        diameter / 2.0
    }

    fn contains_local(&self, p: Point, diameter: f64, flipped: bool) -> bool {
        legs_contain(p, self.leg_length, self.leg_angles(flipped), diameter)
    }
}

/// Elbow with a configurable included angle between its two legs.
///
/// The legs are laid out symmetrically about local +X, so `rotation` is the
/// direction of the bisector. Leg 0 points at `-angle / 2` (mirrored when
/// flipped) and leg 1 at `+angle / 2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustableElbow {
    pub leg_length: f64,
    /// Included angle between the legs' outward directions, in degrees
    pub angle: f64,
}

impl AdjustableElbow {
    pub fn new(leg_length: f64, angle: f64) -> Self {
        Self { leg_length, angle }
    }

    /// Local outward angles of leg 0 and leg 1.
    pub fn leg_angles(&self, flipped: bool) -> (f64, f64) {
        let half = self.angle / 2.0;
        if flipped {
            (half, -half)
        } else {
            (-half, half)
        }
    }

    /// Rotation after one rotate step.
    ///
    /// The legs are not symmetric about the rotation grid, so instead of
    /// adding a fixed step this keeps leg 0 on a 45° world grid: leg 0 is
    /// advanced to the next 45° multiple and the rotation re-derived from it.
    pub fn next_rotation(&self, rotation: f64, flipped: bool) -> f64 {
        let (leg0, _) = self.leg_angles(flipped);
        let absolute = normalize_angle(rotation + leg0);
        let steps = (absolute / ROTATION_STEP_DEG + 1e-6).floor() + 1.0;
        normalize_angle(steps * ROTATION_STEP_DEG - leg0)
    }
}

impl FittingGeometry for AdjustableElbow {
    fn local_connectors(&self, diameter: f64, flipped: bool) -> ConnectorList {
        legs(self.leg_length, self.leg_angles(flipped), diameter)
    }

    fn local_intersection_points(&self, _flipped: bool) -> Vec<IntersectionPoint> {
        corner_point()
    }

    fn local_outline(&self, _diameter: f64, flipped: bool) -> Vec<Point> {
        leg_outline(self.leg_length, self.leg_angles(flipped))
    }

    fn outline_margin(&self, diameter: f64) -> f64 {
        diameter / 2.0
    }

    fn contains_local(&self, p: Point, diameter: f64, flipped: bool) -> bool {
        legs_contain(p, self.leg_length, self.leg_angles(flipped), diameter)
    }
}

fn legs(leg_length: f64, (a0, a1): (f64, f64), diameter: f64) -> ConnectorList {
    let mut list = ConnectorList::new();
    list.push(Connector::local(0, Point::from_angle(a0) * leg_length, a0, diameter));
    list.push(Connector::local(1, Point::from_angle(a1) * leg_length, a1, diameter));
    list
}

fn leg_outline(leg_length: f64, (a0, a1): (f64, f64)) -> Vec<Point> {
    vec![
        Point::ORIGIN,
        Point::from_angle(a0) * leg_length,
        Point::from_angle(a1) * leg_length,
    ]
}

fn legs_contain(p: Point, leg_length: f64, (a0, a1): (f64, f64), diameter: f64) -> bool {
    let radius = diameter / 2.0;
    capsule_contains(p, Point::ORIGIN, Point::from_angle(a0) * leg_length, radius)
        || capsule_contains(p, Point::ORIGIN, Point::from_angle(a1) * leg_length, radius)
}
