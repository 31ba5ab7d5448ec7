//! Dimension lines between anchor points on parts.
//!
//! User dimensions are authored through the measurement dialog and stored
//! with the layout. Run dimensions are synthesised from the straight ducts
//! on every evaluation and never stored.

use serde::{Deserialize, Serialize};
use std::fmt;

use ductkit_core::{LayoutError, Point};

use crate::model::DuctPart;
use crate::part_store::PartStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointType {
    Connector,
    Intersection,
}

/// Connector ids are numeric, intersection point ids are short names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointId {
    Index(u32),
    Name(String),
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointId::Index(i) => write!(f, "{}", i),
            PointId::Name(n) => write!(f, "{}", n),
        }
    }
}

/// Identifies one point on one part.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnchorRef {
    pub part_id: u64,
    pub point_type: PointType,
    pub point_id: PointId,
}

impl AnchorRef {
    pub fn connector(part_id: u64, connector_id: u32) -> Self {
        Self {
            part_id,
            point_type: PointType::Connector,
            point_id: PointId::Index(connector_id),
        }
    }

    pub fn intersection(part_id: u64, name: impl Into<String>) -> Self {
        Self {
            part_id,
            point_type: PointType::Intersection,
            point_id: PointId::Name(name.into()),
        }
    }

    /// Current world position of the anchor, or `None` if the part or the
    /// point no longer exists.
    pub fn resolve(&self, parts: &PartStore) -> Option<Point> {
        let part = parts.get(self.part_id)?;
        match (self.point_type, &self.point_id) {
            (PointType::Connector, PointId::Index(i)) => part.connector(*i).map(|c| c.position),
            (PointType::Connector, PointId::Name(n)) => {
                let i = n.parse().ok()?;
                part.connector(i).map(|c| c.position)
            }
            (PointType::Intersection, id) => part
                .intersection_point(&id.to_string())
                .map(|p| p.position),
        }
    }

    /// Like [`resolve`](Self::resolve) but reports a lookup miss.
    pub fn try_resolve(&self, parts: &PartStore) -> Result<Point, LayoutError> {
        self.resolve(parts).ok_or_else(|| LayoutError::AnchorNotFound {
            part_id: self.part_id,
            point: self.to_string(),
        })
    }
}

impl fmt::Display for AnchorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.point_type {
            PointType::Connector => "connector",
            PointType::Intersection => "intersection",
        };
        write!(f, "{} {}", kind, self.point_id)
    }
}

/// A reference line between two anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DimensionRecord", into = "DimensionRecord")]
pub struct Dimension {
    pub id: String,
    pub p1: AnchorRef,
    pub p2: AnchorRef,
    pub value: f64,
    /// Set on dimensions derived from runs of straight ducts
    pub is_straight_run: bool,
}

impl Dimension {
    /// A user dimension with a fresh id.
    pub fn new(p1: AnchorRef, p2: AnchorRef, value: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            p1,
            p2,
            value,
            is_straight_run: false,
        }
    }

    /// Whether this dimension spans exactly the two anchors, in either order.
    pub fn spans(&self, a: &AnchorRef, b: &AnchorRef) -> bool {
        (&self.p1 == a && &self.p2 == b) || (&self.p1 == b && &self.p2 == a)
    }

    /// Distance between the two anchors as currently placed.
    pub fn measure(&self, parts: &PartStore) -> Option<f64> {
        let a = self.p1.resolve(parts)?;
        let b = self.p2.resolve(parts)?;
        Some(a.distance_to(&b))
    }

    pub fn involves_part(&self, part_id: u64) -> bool {
        self.p1.part_id == part_id || self.p2.part_id == part_id
    }
}

/// Re-measures every dimension against `parts`. Dimensions whose anchors
/// cannot be resolved keep their previous value.
pub fn rederive_values(dimensions: &[Dimension], parts: &PartStore) -> Vec<Dimension> {
    dimensions
        .iter()
        .map(|dim| {
            let mut updated = dim.clone();
            if let Some(value) = dim.measure(parts) {
                updated.value = value;
            }
            updated
        })
        .collect()
}

/// Flat wire representation of a dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DimensionRecord {
    id: String,
    #[serde(rename = "p1_objId")]
    p1_obj_id: u64,
    #[serde(rename = "p1_pointType")]
    p1_point_type: PointType,
    #[serde(rename = "p1_pointId")]
    p1_point_id: PointId,
    #[serde(rename = "p2_objId")]
    p2_obj_id: u64,
    #[serde(rename = "p2_pointType")]
    p2_point_type: PointType,
    #[serde(rename = "p2_pointId")]
    p2_point_id: PointId,
    value: f64,
    #[serde(
        rename = "isStraightRun",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    is_straight_run: bool,
}

impl From<DimensionRecord> for Dimension {
    fn from(r: DimensionRecord) -> Self {
        Self {
            id: r.id,
            p1: AnchorRef {
                part_id: r.p1_obj_id,
                point_type: r.p1_point_type,
                point_id: r.p1_point_id,
            },
            p2: AnchorRef {
                part_id: r.p2_obj_id,
                point_type: r.p2_point_type,
                point_id: r.p2_point_id,
            },
            value: r.value,
            is_straight_run: r.is_straight_run,
        }
    }
}

impl From<Dimension> for DimensionRecord {
    fn from(d: Dimension) -> Self {
        Self {
            id: d.id,
            p1_obj_id: d.p1.part_id,
            p1_point_type: d.p1.point_type,
            p1_point_id: d.p1.point_id,
            p2_obj_id: d.p2.part_id,
            p2_point_type: d.p2.point_type,
            p2_point_id: d.p2.point_id,
            value: d.value,
            is_straight_run: d.is_straight_run,
        }
    }
}
