use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use ductkit_core::constants::ROTATION_STEP_DEG;
use ductkit_core::geometry::distance_to_segment;
use ductkit_core::{normalize_angle, Bounds, Point};

mod branch;
mod damper;
mod elbow;
mod reducer;
mod straight;

pub use branch::{TeeReducer, YBranch, YBranchReducer};
pub use damper::Damper;
pub use elbow::{AdjustableElbow, Elbow90};
pub use reducer::Reducer;
pub use straight::StraightDuct;

/// Connectors of a single part. No variant has more than three.
pub type ConnectorList = SmallVec<[Connector; 3]>;

/// Distinguishes the run connectors of a branching part from its take-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorRole {
    Main,
    Branch,
}

/// A named exit point on a part's boundary.
///
/// Connectors are never stored; they are derived from the owning part's
/// position, rotation and parameters on every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub id: u32,
    pub position: Point,
    /// Outward direction in degrees, in `[0, 360)` once placed in the world.
    pub angle: f64,
    pub diameter: f64,
    pub role: Option<ConnectorRole>,
}

impl Connector {
    pub(crate) fn local(id: u32, position: Point, angle: f64, diameter: f64) -> Self {
        Self {
            id,
            position,
            angle,
            diameter,
            role: None,
        }
    }

    pub(crate) fn with_role(mut self, role: ConnectorRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn distance_to(&self, other: &Connector) -> f64 {
        self.position.distance_to(&other.position)
    }
}

/// A derived reference point used to anchor dimensions, such as the corner
/// of an elbow or the junction of a branch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntersectionPoint {
    pub id: &'static str,
    pub position: Point,
}

/// Per-variant geometry expressed in the part's local frame.
///
/// The local frame has the part's `position` at the origin and its
/// `rotation` along +X. `Part` rotates and translates the results.
pub trait FittingGeometry {
    fn local_connectors(&self, diameter: f64, flipped: bool) -> ConnectorList;

    fn local_intersection_points(&self, _flipped: bool) -> Vec<IntersectionPoint> {
        Vec::new()
    }

    /// Points whose hull, grown by `outline_margin`, encloses the part.
    fn local_outline(&self, diameter: f64, flipped: bool) -> Vec<Point>;

    fn outline_margin(&self, _diameter: f64) -> f64 {
        0.0
    }

    fn contains_local(&self, p: Point, diameter: f64, flipped: bool) -> bool;
}

/// Capability set every placed part exposes to rendering and interaction.
pub trait DuctPart {
    fn connectors(&self) -> ConnectorList;
    fn intersection_points(&self) -> Vec<IntersectionPoint>;
    fn bounds(&self) -> Bounds;
    fn contains_point(&self, x: f64, y: f64) -> bool;
    fn rotate_step(&mut self);
    fn flip(&mut self);

    fn connector(&self, id: u32) -> Option<Connector> {
        self.connectors().into_iter().find(|c| c.id == id)
    }

    fn intersection_point(&self, id: &str) -> Option<IntersectionPoint> {
        self.intersection_points().into_iter().find(|p| p.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartType {
    StraightDuct,
    Elbow90,
    AdjustableElbow,
    TeeReducer,
    YBranch,
    YBranchReducer,
    Reducer,
    Damper,
}

impl PartType {
    pub const ALL: [PartType; 8] = [
        PartType::StraightDuct,
        PartType::Elbow90,
        PartType::AdjustableElbow,
        PartType::TeeReducer,
        PartType::YBranch,
        PartType::YBranchReducer,
        PartType::Reducer,
        PartType::Damper,
    ];

    /// The tag used in the JSON schema.
    pub fn tag(&self) -> &'static str {
        match self {
            PartType::StraightDuct => "StraightDuct",
            PartType::Elbow90 => "Elbow90",
            PartType::AdjustableElbow => "AdjustableElbow",
            PartType::TeeReducer => "TeeReducer",
            PartType::YBranch => "YBranch",
            PartType::YBranchReducer => "YBranchReducer",
            PartType::Reducer => "Reducer",
            PartType::Damper => "Damper",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PartType::StraightDuct => "Straight Duct",
            PartType::Elbow90 => "90° Elbow",
            PartType::AdjustableElbow => "Adjustable Elbow",
            PartType::TeeReducer => "Tee Reducer",
            PartType::YBranch => "Y-Branch",
            PartType::YBranchReducer => "Y-Branch Reducer",
            PartType::Reducer => "Reducer",
            PartType::Damper => "Damper",
        }
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for PartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartType::ALL
            .iter()
            .copied()
            .find(|t| t.tag() == s)
            .ok_or_else(|| format!("Unknown part type: {}", s))
    }
}

/// Type-specific parameters, tagged with `type` in the JSON schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PartKind {
    StraightDuct(StraightDuct),
    Elbow90(Elbow90),
    AdjustableElbow(AdjustableElbow),
    TeeReducer(TeeReducer),
    YBranch(YBranch),
    YBranchReducer(YBranchReducer),
    Reducer(Reducer),
    Damper(Damper),
}

impl PartKind {
    pub fn part_type(&self) -> PartType {
        match self {
            PartKind::StraightDuct(_) => PartType::StraightDuct,
            PartKind::Elbow90(_) => PartType::Elbow90,
            PartKind::AdjustableElbow(_) => PartType::AdjustableElbow,
            PartKind::TeeReducer(_) => PartType::TeeReducer,
            PartKind::YBranch(_) => PartType::YBranch,
            PartKind::YBranchReducer(_) => PartType::YBranchReducer,
            PartKind::Reducer(_) => PartType::Reducer,
            PartKind::Damper(_) => PartType::Damper,
        }
    }

    fn geometry(&self) -> &dyn FittingGeometry {
        match self {
            PartKind::StraightDuct(s) => s,
            PartKind::Elbow90(s) => s,
            PartKind::AdjustableElbow(s) => s,
            PartKind::TeeReducer(s) => s,
            PartKind::YBranch(s) => s,
            PartKind::YBranchReducer(s) => s,
            PartKind::Reducer(s) => s,
            PartKind::Damper(s) => s,
        }
    }
}

/// One placed duct component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: u64,
    pub group_id: u64,
    #[serde(flatten)]
    pub position: Point,
    /// Rotation in degrees, kept in `[0, 360)`
    #[serde(default)]
    pub rotation: f64,
    pub diameter: f64,
    #[serde(default)]
    pub is_flipped: bool,
    #[serde(default)]
    pub is_selected: bool,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub system_name: String,
    #[serde(flatten)]
    pub kind: PartKind,
}

impl Part {
    /// Creates an unjoined part. It starts out as its own singleton group.
    pub fn new(id: u64, position: Point, diameter: f64, kind: PartKind) -> Self {
        Self {
            id,
            group_id: id,
            position,
            rotation: 0.0,
            diameter,
            is_flipped: false,
            is_selected: false,
            name: kind.part_type().display_name().to_string(),
            system_name: String::new(),
            kind,
        }
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = normalize_angle(rotation);
        self
    }

    pub fn part_type(&self) -> PartType {
        self.kind.part_type()
    }

    pub fn is_straight_duct(&self) -> bool {
        matches!(self.kind, PartKind::StraightDuct(_))
    }

    /// Length of a straight duct, `None` for every other variant.
    pub fn straight_length(&self) -> Option<f64> {
        match &self.kind {
            PartKind::StraightDuct(s) => Some(s.length),
            _ => None,
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.position.x += dx;
        self.position.y += dy;
    }

    /// Maps a point from the local frame into world coordinates.
    pub fn to_world(&self, local: Point) -> Point {
        self.position + local.rotated(self.rotation)
    }

    /// Maps a world point into the local frame.
    pub fn to_local(&self, world: Point) -> Point {
        (world - self.position).rotated(-self.rotation)
    }
}

impl DuctPart for Part {
    fn connectors(&self) -> ConnectorList {
        self.kind
            .geometry()
            .local_connectors(self.diameter, self.is_flipped)
            .into_iter()
            .map(|c| Connector {
                position: self.to_world(c.position),
                angle: normalize_angle(self.rotation + c.angle),
                ..c
            })
            .collect()
    }

    fn intersection_points(&self) -> Vec<IntersectionPoint> {
        self.kind
            .geometry()
            .local_intersection_points(self.is_flipped)
            .into_iter()
            .map(|p| IntersectionPoint {
                id: p.id,
                position: self.to_world(p.position),
            })
            .collect()
    }

    fn bounds(&self) -> Bounds {
        let geometry = self.kind.geometry();
        let outline = geometry.local_outline(self.diameter, self.is_flipped);
        let margin = geometry.outline_margin(self.diameter);
        let (x, y) = (self.position.x, self.position.y);
        Bounds::from_points(outline.into_iter().map(|p| self.to_world(p)))
            .unwrap_or_else(|| Bounds::new(x, y, x, y))
            .expanded(margin)
    }

    fn contains_point(&self, x: f64, y: f64) -> bool {
        let local = self.to_local(Point::new(x, y));
        self.kind
            .geometry()
            .contains_local(local, self.diameter, self.is_flipped)
    }

    fn rotate_step(&mut self) {
        self.rotation = match &self.kind {
            PartKind::AdjustableElbow(elbow) => {
                elbow.next_rotation(self.rotation, self.is_flipped)
            }
            _ => normalize_angle(self.rotation + ROTATION_STEP_DEG),
        };
    }

    fn flip(&mut self) {
        self.is_flipped = !self.is_flipped;
        // Flipping a reducer reverses it, which swaps the end diameters.
        if let PartKind::Reducer(reducer) = &mut self.kind {
            std::mem::swap(&mut self.diameter, &mut reducer.diameter2);
        }
    }
}

/// The two end connectors of a part laid out along local X.
pub(crate) fn inline_connectors(length: f64, d_start: f64, d_end: f64) -> ConnectorList {
    let half = length / 2.0;
    let mut list = ConnectorList::new();
    list.push(Connector::local(0, Point::new(-half, 0.0), 180.0, d_start));
    list.push(Connector::local(1, Point::new(half, 0.0), 0.0, d_end));
    list
}

/// Corners of a `length` x `width` rectangle centred on the local origin.
pub(crate) fn rectangle_outline(length: f64, width: f64) -> Vec<Point> {
    let (hl, hw) = (length / 2.0, width / 2.0);
    vec![
        Point::new(-hl, -hw),
        Point::new(hl, -hw),
        Point::new(hl, hw),
        Point::new(-hl, hw),
    ]
}

pub(crate) fn rectangle_contains(p: Point, length: f64, width: f64) -> bool {
    p.x.abs() <= length / 2.0 && p.y.abs() <= width / 2.0
}

/// Capsule test: within `radius` of the segment `a`-`b`.
pub(crate) fn capsule_contains(p: Point, a: Point, b: Point, radius: f64) -> bool {
    distance_to_segment(p, a, b) <= radius
}
