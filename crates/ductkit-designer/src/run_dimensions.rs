//! Automatic overall-length dimensions for runs of straight ducts.
//!
//! A run is a connected chain of straight ducts. Each run with exactly two
//! open ends gets one dimension spanning them; anything else (a lone duct,
//! a branched or closed chain) is skipped. Fittings at either end extend the
//! anchor onto the fitting's own connector.

use std::collections::{HashSet, VecDeque};

use tracing::trace;

use ductkit_core::Point;

use crate::connectivity::{are_coincident, connectors_coincide};
use crate::dimension::{AnchorRef, Dimension};
use crate::model::{Connector, DuctPart, Part};
use crate::part_store::PartStore;

/// Stable id of the run made of `ids`.
pub fn run_dimension_id(ids: &[u64]) -> String {
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    let joined: Vec<String> = sorted.iter().map(|id| id.to_string()).collect();
    format!("run-{}", joined.join("-"))
}

/// Derives one dimension per well-formed straight run.
pub fn compute_run_dimensions(parts: &PartStore) -> Vec<Dimension> {
    let ducts: Vec<&Part> = parts.iter().filter(|p| p.is_straight_duct()).collect();
    let fittings: Vec<&Part> = parts.iter().filter(|p| !p.is_straight_duct()).collect();

    let mut dimensions = Vec::new();
    for component in straight_components(&ducts) {
        if component.len() < 2 {
            continue;
        }
        let ids: Vec<u64> = component.iter().map(|p| p.id).collect();
        let ends = open_ends(&component);
        if ends.len() != 2 {
            trace!(
                "Skipping run {:?}: {} open ends instead of 2",
                ids,
                ends.len()
            );
            continue;
        }

        let (a_ref, a_pos) = end_anchor(ends[0].0, &ends[0].1, &fittings);
        let (b_ref, b_pos) = end_anchor(ends[1].0, &ends[1].1, &fittings);
        dimensions.push(Dimension {
            id: run_dimension_id(&ids),
            p1: a_ref,
            p2: b_ref,
            value: a_pos.distance_to(&b_pos),
            is_straight_run: true,
        });
    }
    dimensions
}

/// Connected components of the straight ducts, each in id order.
fn straight_components<'a>(ducts: &[&'a Part]) -> Vec<Vec<&'a Part>> {
    let mut visited: HashSet<u64> = HashSet::new();
    let mut components = Vec::new();

    for seed in ducts {
        if !visited.insert(seed.id) {
            continue;
        }
        let mut component = vec![*seed];
        let mut queue = VecDeque::from([*seed]);
        while let Some(current) = queue.pop_front() {
            for other in ducts {
                if visited.contains(&other.id) {
                    continue;
                }
                if are_coincident(current, other) {
                    visited.insert(other.id);
                    component.push(*other);
                    queue.push_back(*other);
                }
            }
        }
        component.sort_by_key(|p| p.id);
        components.push(component);
    }
    components
}

/// Duct connectors not met by another duct of the same run.
fn open_ends<'a>(component: &[&'a Part]) -> Vec<(&'a Part, Connector)> {
    let mut ends = Vec::new();
    for duct in component {
        for connector in duct.connectors() {
            let joined = component.iter().filter(|o| o.id != duct.id).any(|other| {
                other
                    .connectors()
                    .iter()
                    .any(|c| connectors_coincide(c, &connector))
            });
            if !joined {
                ends.push((*duct, connector));
            }
        }
    }
    ends
}

/// The fitting connector sitting on an open end if there is one, otherwise
/// the duct's own connector.
fn end_anchor(duct: &Part, end: &Connector, fittings: &[&Part]) -> (AnchorRef, Point) {
    for fitting in fittings {
        if let Some(c) = fitting
            .connectors()
            .into_iter()
            .find(|c| connectors_coincide(c, end))
        {
            return (AnchorRef::connector(fitting.id, c.id), c.position);
        }
    }
    (AnchorRef::connector(duct.id, end.id), end.position)
}
