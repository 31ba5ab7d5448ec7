//! # Fittings Catalog
//!
//! Palette entries grouped by category, plus the factory that turns an entry
//! into a placed part.
//!
//! The catalog only supplies default parameters. Once a part exists it is
//! independent of the entry it was created from.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

use ductkit_core::constants::DEFAULT_DIAMETER;
use ductkit_core::Point;

use crate::model::{
    AdjustableElbow, Damper, Elbow90, Part, PartKind, PartType, Reducer, StraightDuct, TeeReducer,
    YBranch, YBranchReducer,
};

/// Default parameters carried by a catalog entry. Anything left out falls
/// back to the built-in default for the part type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FittingDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leg_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intersection_offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_name: Option<String>,
}

/// One palette entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittingItem {
    /// Part type tag; entries with an unknown tag are kept but cannot be placed
    #[serde(rename = "type")]
    pub type_tag: String,
    pub name: String,
    #[serde(flatten)]
    pub defaults: FittingDefaults,
}

impl FittingItem {
    pub fn new(part_type: PartType, name: impl Into<String>, defaults: FittingDefaults) -> Self {
        Self {
            type_tag: part_type.tag().to_string(),
            name: name.into(),
            defaults,
        }
    }

    pub fn part_type(&self) -> Option<PartType> {
        self.type_tag.parse().ok()
    }

    /// Builds a part from this entry; the entry's name becomes the part name.
    pub fn create_part(&self, id: u64, position: Point) -> Option<Part> {
        let mut part = create_part(&self.type_tag, id, position, &self.defaults)?;
        part.name = self.name.clone();
        Some(part)
    }
}

/// Category name to entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FittingsCatalog {
    categories: BTreeMap<String, Vec<FittingItem>>,
}

impl FittingsCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The palette shipped with the application.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        let d = |diameter: f64| FittingDefaults {
            diameter: Some(diameter),
            ..Default::default()
        };

        for diameter in [100.0, 125.0, 160.0, 200.0, 250.0] {
            catalog.add(
                "Ducts",
                FittingItem::new(
                    PartType::StraightDuct,
                    format!("Straight Duct Ø{}", diameter),
                    FittingDefaults {
                        length: Some(1000.0),
                        ..d(diameter)
                    },
                ),
            );
        }

        catalog.add(
            "Elbows",
            FittingItem::new(PartType::Elbow90, "90° Elbow", d(DEFAULT_DIAMETER)),
        );
        catalog.add(
            "Elbows",
            FittingItem::new(
                PartType::AdjustableElbow,
                "45° Elbow",
                FittingDefaults {
                    angle: Some(135.0),
                    ..d(DEFAULT_DIAMETER)
                },
            ),
        );
        catalog.add(
            "Elbows",
            FittingItem::new(PartType::AdjustableElbow, "Adjustable Elbow", d(DEFAULT_DIAMETER)),
        );

        catalog.add(
            "Branches",
            FittingItem::new(
                PartType::TeeReducer,
                "Tee Reducer 200/160",
                FittingDefaults {
                    diameter2: Some(160.0),
                    ..d(200.0)
                },
            ),
        );
        catalog.add(
            "Branches",
            FittingItem::new(PartType::YBranch, "Y-Branch 45°", d(DEFAULT_DIAMETER)),
        );
        catalog.add(
            "Branches",
            FittingItem::new(
                PartType::YBranchReducer,
                "Y-Branch Reducer 200/160",
                FittingDefaults {
                    diameter2: Some(160.0),
                    ..d(200.0)
                },
            ),
        );

        catalog.add(
            "Transitions",
            FittingItem::new(
                PartType::Reducer,
                "Reducer 200/160",
                FittingDefaults {
                    diameter2: Some(160.0),
                    ..d(200.0)
                },
            ),
        );
        catalog.add(
            "Accessories",
            FittingItem::new(PartType::Damper, "Damper", d(DEFAULT_DIAMETER)),
        );
        catalog
    }

    pub fn add(&mut self, category: impl Into<String>, item: FittingItem) {
        self.categories.entry(category.into()).or_default().push(item);
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn items(&self, category: &str) -> &[FittingItem] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First entry with the given name, searching categories in order.
    pub fn find(&self, name: &str) -> Option<&FittingItem> {
        self.categories
            .values()
            .flat_map(|items| items.iter())
            .find(|item| item.name == name)
    }

    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse fittings catalog")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let catalog = Self::from_json(&content)?;
        info!(
            "Loaded {} catalog entries from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write catalog {}", path.display()))?;
        Ok(())
    }
}

/// Creates a part of the tagged type at `position`.
///
/// Returns `None` for a tag that names no known part type, so a stale or
/// hand-edited catalog entry cannot break the palette.
pub fn create_part(
    type_tag: &str,
    id: u64,
    position: Point,
    defaults: &FittingDefaults,
) -> Option<Part> {
    let part_type = match type_tag.parse::<PartType>() {
        Ok(t) => t,
        Err(e) => {
            warn!("{}", e);
            return None;
        }
    };

    let diameter = defaults.diameter.unwrap_or(DEFAULT_DIAMETER);
    let length = defaults.length;
    let leg = defaults.leg_length.unwrap_or(diameter * 0.75);
    let branch_length = defaults.branch_length.unwrap_or(diameter * 0.75);
    let diameter2 = defaults.diameter2.unwrap_or(diameter * 0.8);
    let branch_angle = defaults.branch_angle.unwrap_or(45.0);
    let offset = defaults.intersection_offset.unwrap_or(0.0);

    let kind = match part_type {
        PartType::StraightDuct => {
            PartKind::StraightDuct(StraightDuct::new(length.unwrap_or(1000.0)))
        }
        PartType::Elbow90 => PartKind::Elbow90(Elbow90::new(leg)),
        PartType::AdjustableElbow => {
            PartKind::AdjustableElbow(AdjustableElbow::new(leg, defaults.angle.unwrap_or(90.0)))
        }
        PartType::TeeReducer => {
            let mut tee =
                TeeReducer::new(length.unwrap_or(diameter * 2.0), branch_length, diameter2);
            tee.intersection_offset = offset;
            PartKind::TeeReducer(tee)
        }
        PartType::YBranch => {
            let mut y = YBranch::new(length.unwrap_or(diameter * 2.0), branch_length, branch_angle);
            y.intersection_offset = offset;
            PartKind::YBranch(y)
        }
        PartType::YBranchReducer => {
            let mut y = YBranchReducer::new(
                length.unwrap_or(diameter * 2.0),
                branch_length,
                branch_angle,
                diameter2,
            );
            y.intersection_offset = offset;
            PartKind::YBranchReducer(y)
        }
        PartType::Reducer => PartKind::Reducer(Reducer::new(length.unwrap_or(300.0), diameter2)),
        PartType::Damper => PartKind::Damper(Damper::new(length.unwrap_or(150.0))),
    };

    let mut part = Part::new(id, position, diameter, kind);
    if let Some(system) = &defaults.system_name {
        part.system_name = system.clone();
    }
    Some(part)
}
