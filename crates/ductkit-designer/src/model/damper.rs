use serde::{Deserialize, Serialize};

use ductkit_core::Point;

use super::{
    inline_connectors, rectangle_contains, rectangle_outline, ConnectorList, FittingGeometry,
    IntersectionPoint,
};

/// An in-line volume damper. Geometrically a short straight section whose
/// blade axis is exposed as the `center` reference point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Damper {
    pub length: f64,
}

impl Damper {
    pub fn new(length: f64) -> Self {
        Self { length }
    }
}

impl FittingGeometry for Damper {
    fn local_connectors(&self, diameter: f64, _flipped: bool) -> ConnectorList {
        inline_connectors(self.length, diameter, diameter)
    }

    fn local_intersection_points(&self, _flipped: bool) -> Vec<IntersectionPoint> {
        vec![IntersectionPoint {
            id: "center",
            position: Point::ORIGIN,
        }]
    }

    fn local_outline(&self, diameter: f64, _flipped: bool) -> Vec<Point> {
        rectangle_outline(self.length, diameter)
    }

    fn contains_local(&self, p: Point, diameter: f64, _flipped: bool) -> bool {
        rectangle_contains(p, self.length, diameter)
    }
}
