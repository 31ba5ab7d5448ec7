use serde::{Deserialize, Serialize};

use ductkit_core::Point;

use super::{
    inline_connectors, rectangle_contains, rectangle_outline, ConnectorList, FittingGeometry,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StraightDuct {
    pub length: f64,
}

impl StraightDuct {
    pub fn new(length: f64) -> Self {
        Self { length }
    }
}

impl FittingGeometry for StraightDuct {
    fn local_connectors(&self, diameter: f64, _flipped: bool) -> ConnectorList {
        inline_connectors(self.length, diameter, diameter)
    }

    fn local_outline(&self, diameter: f64, _flipped: bool) -> Vec<Point> {
        rectangle_outline(self.length, diameter)
    }

    fn contains_local(&self, p: Point, diameter: f64, _flipped: bool) -> bool {
        rectangle_contains(p, self.length, diameter)
    }
}
