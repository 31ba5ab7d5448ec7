use serde::{Deserialize, Serialize};

use ductkit_core::constants::LENGTH_EPSILON;
use ductkit_core::Point;

use super::{inline_connectors, ConnectorList, FittingGeometry};

/// Concentric reducer. The owning part's `diameter` is the size at
/// connector 0 and `diameter2` the size at connector 1; flipping the part
/// swaps the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reducer {
    pub length: f64,
    pub diameter2: f64,
}

impl Reducer {
    pub fn new(length: f64, diameter2: f64) -> Self {
        Self { length, diameter2 }
    }

    /// Half-width of the body at local `x`.
    fn half_width_at(&self, x: f64, diameter: f64) -> f64 {
        let (h1, h2) = (diameter / 2.0, self.diameter2 / 2.0);
        if self.length < LENGTH_EPSILON {
            return h1.max(h2);
        }
        let t = (x + self.length / 2.0) / self.length;
        h1 + (h2 - h1) * t
    }
}

impl FittingGeometry for Reducer {
    fn local_connectors(&self, diameter: f64, _flipped: bool) -> ConnectorList {
        inline_connectors(self.length, diameter, self.diameter2)
    }

    fn local_outline(&self, diameter: f64, _flipped: bool) -> Vec<Point> {
        let half = self.length / 2.0;
        vec![
            Point::new(-half, -diameter / 2.0),
            Point::new(half, -self.diameter2 / 2.0),
            Point::new(half, self.diameter2 / 2.0),
            Point::new(-half, diameter / 2.0),
        ]
    }

    fn contains_local(&self, p: Point, diameter: f64, _flipped: bool) -> bool {
        p.x.abs() <= self.length / 2.0 && p.y.abs() <= self.half_width_at(p.x, diameter)
    }
}
