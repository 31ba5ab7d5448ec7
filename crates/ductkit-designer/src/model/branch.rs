use serde::{Deserialize, Serialize};

use ductkit_core::Point;

use super::{
    inline_connectors, rectangle_contains, rectangle_outline, Connector, ConnectorList,
    ConnectorRole, FittingGeometry, IntersectionPoint,
};

fn default_branch_angle() -> f64 {
    45.0
}

/// Shared layout of the three-connector fittings: a straight main run along
/// local X with a take-off leaving the junction at `branch_angle`.
struct BranchLayout {
    length: f64,
    diameter: f64,
    branch_length: f64,
    branch_angle: f64,
    branch_diameter: f64,
    offset: f64,
}

impl BranchLayout {
    fn junction(&self) -> Point {
        Point::new(self.offset, 0.0)
    }

    fn branch_direction(&self, flipped: bool) -> f64 {
        if flipped {
            -self.branch_angle
        } else {
            self.branch_angle
        }
    }

    fn connectors(&self, flipped: bool) -> ConnectorList {
        let mut list: ConnectorList = inline_connectors(self.length, self.diameter, self.diameter)
            .into_iter()
            .map(|c| c.with_role(ConnectorRole::Main))
            .collect();
        let angle = self.branch_direction(flipped);
        let end = self.junction() + Point::from_angle(angle) * self.branch_length;
        list.push(
            Connector::local(2, end, angle, self.branch_diameter).with_role(ConnectorRole::Branch),
        );
        list
    }

    fn intersection_points(&self) -> Vec<IntersectionPoint> {
        vec![IntersectionPoint {
            id: "junction",
            position: self.junction(),
        }]
    }

    fn outline(&self, flipped: bool) -> Vec<Point> {
        let angle = self.branch_direction(flipped);
        let along = Point::from_angle(angle) * self.branch_length;
        let across = Point::from_angle(angle + 90.0) * (self.branch_diameter / 2.0);
        let j = self.junction();
        let mut points = rectangle_outline(self.length, self.diameter);
        points.extend([j + across, j - across, j + along + across, j + along - across]);
        points
    }

    fn contains(&self, p: Point, flipped: bool) -> bool {
        if rectangle_contains(p, self.length, self.diameter) {
            return true;
        }
        let dir = Point::from_angle(self.branch_direction(flipped));
        let q = p - self.junction();
        let t = q.dot(&dir);
        t >= 0.0 && t <= self.branch_length && q.cross(&dir).abs() <= self.branch_diameter / 2.0
    }
}

/// Tee with a reduced, perpendicular take-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeeReducer {
    pub length: f64,
    pub branch_length: f64,
    pub diameter2: f64,
    /// Junction position along the main run, measured from its centre
    #[serde(default)]
    pub intersection_offset: f64,
}

impl TeeReducer {
    pub fn new(length: f64, branch_length: f64, diameter2: f64) -> Self {
        Self {
            length,
            branch_length,
            diameter2,
            intersection_offset: 0.0,
        }
    }

    fn layout(&self, diameter: f64) -> BranchLayout {
        BranchLayout {
            length: self.length,
            diameter,
            branch_length: self.branch_length,
            branch_angle: 90.0,
            branch_diameter: self.diameter2,
            offset: self.intersection_offset,
        }
    }
}

/// Y-branch with a full-size take-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YBranch {
    pub length: f64,
    pub branch_length: f64,
    #[serde(default = "default_branch_angle")]
    pub branch_angle: f64,
    #[serde(default)]
    pub intersection_offset: f64,
}

impl YBranch {
    pub fn new(length: f64, branch_length: f64, branch_angle: f64) -> Self {
        Self {
            length,
            branch_length,
            branch_angle,
            intersection_offset: 0.0,
        }
    }

    fn layout(&self, diameter: f64) -> BranchLayout {
        BranchLayout {
            length: self.length,
            diameter,
            branch_length: self.branch_length,
            branch_angle: self.branch_angle,
            branch_diameter: diameter,
            offset: self.intersection_offset,
        }
    }
}

/// Y-branch whose take-off is reduced to `diameter2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YBranchReducer {
    pub length: f64,
    pub branch_length: f64,
    #[serde(default = "default_branch_angle")]
    pub branch_angle: f64,
    pub diameter2: f64,
    #[serde(default)]
    pub intersection_offset: f64,
}

impl YBranchReducer {
    pub fn new(length: f64, branch_length: f64, branch_angle: f64, diameter2: f64) -> Self {
        Self {
            length,
            branch_length,
            branch_angle,
            diameter2,
            intersection_offset: 0.0,
        }
    }

    fn layout(&self, diameter: f64) -> BranchLayout {
        BranchLayout {
            length: self.length,
            diameter,
            branch_length: self.branch_length,
            branch_angle: self.branch_angle,
            branch_diameter: self.diameter2,
            offset: self.intersection_offset,
        }
    }
}

macro_rules! branch_geometry {
    ($ty:ty) => {
        impl FittingGeometry for $ty {
            fn local_connectors(&self, diameter: f64, flipped: bool) -> ConnectorList {
                self.layout(diameter).connectors(flipped)
            }

            fn local_intersection_points(&self, _flipped: bool) -> Vec<IntersectionPoint> {
                // the junction sits on the main axis, flipping does not move it
                self.layout(0.0).intersection_points()
            }

            fn local_outline(&self, diameter: f64, flipped: bool) -> Vec<Point> {
                self.layout(diameter).outline(flipped)
            }

            fn contains_local(&self, p: Point, diameter: f64, flipped: bool) -> bool {
                self.layout(diameter).contains(p, flipped)
            }
        }
    };
}

branch_geometry!(TeeReducer);
branch_geometry!(YBranch);
branch_geometry!(YBranchReducer);
