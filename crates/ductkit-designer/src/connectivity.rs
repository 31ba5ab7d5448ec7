//! Connectivity graph over placed parts.
//!
//! Two parts are adjacent when some connector of one lies within
//! [`COINCIDENCE_TOLERANCE`] of some connector of the other; diameters play
//! no part. A group is a connected component of that relation, identified by
//! the id of one of its members.
//!
//! Nothing here keeps graph state between calls. Every function takes a
//! [`PartStore`] snapshot and, when it changes something, returns a new one.
//! Merging is a plain `group_id` reassignment; only splits (disconnect and
//! delete) need the components re-derived, and then only over the members of
//! the affected group.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use tracing::debug;

use ductkit_core::constants::COINCIDENCE_TOLERANCE;

use crate::model::{Connector, ConnectorList, DuctPart, Part};
use crate::part_store::PartStore;

/// Whether two connectors are close enough to count as joined.
pub fn connectors_coincide(a: &Connector, b: &Connector) -> bool {
    a.distance_to(b) < COINCIDENCE_TOLERANCE
}

/// Every `(connector of a, connector of b)` pair that coincides.
pub fn coincident_connector_pairs(a: &Part, b: &Part) -> Vec<(Connector, Connector)> {
    let b_connectors = b.connectors();
    let mut pairs = Vec::new();
    for ca in a.connectors() {
        for cb in &b_connectors {
            if connectors_coincide(&ca, cb) {
                pairs.push((ca.clone(), cb.clone()));
            }
        }
    }
    pairs
}

/// Whether any connector of `a` coincides with any connector of `b`.
pub fn are_coincident(a: &Part, b: &Part) -> bool {
    lists_coincide(&a.connectors(), &b.connectors())
}

fn lists_coincide(a: &[Connector], b: &[Connector]) -> bool {
    a.iter()
        .any(|ca| b.iter().any(|cb| connectors_coincide(ca, cb)))
}

fn connector_cache<'a, I>(parts: I) -> HashMap<u64, ConnectorList>
where
    I: IntoIterator<Item = &'a Part>,
{
    parts.into_iter().map(|p| (p.id, p.connectors())).collect()
}

/// Reassigns every member of `group_b` to `group_a`.
pub fn merge_groups(store: &PartStore, group_a: u64, group_b: u64) -> PartStore {
    let mut next = store.clone();
    if group_a == group_b {
        return next;
    }
    let mut moved = 0usize;
    for part in next.iter_mut().filter(|p| p.group_id == group_b) {
        part.group_id = group_a;
        moved += 1;
    }
    debug!("Merged group {} into {} ({} parts)", group_b, group_a, moved);
    next
}

/// Re-partitions `subset` into connected components.
///
/// Each unvisited subset member, taken in the order given, seeds a
/// breadth-first search over the coincidence relation. Every part reached
/// is assigned the seed's id as its group. The search only walks through
/// subset members; `all_parts` supplies their current geometry. Ids missing
/// from `all_parts` are skipped. Returns the subset parts with updated
/// groups; nothing outside the subset is touched.
pub fn recompute_groups(subset: &[u64], all_parts: &PartStore) -> Vec<Part> {
    let mut seen_ids = HashSet::new();
    let members: Vec<&Part> = subset
        .iter()
        .filter(|id| seen_ids.insert(**id))
        .filter_map(|id| all_parts.get(*id))
        .collect();
    let connectors = connector_cache(members.iter().copied());

    let mut assigned: HashMap<u64, u64> = HashMap::new();
    let mut queue = VecDeque::new();

    for seed in &members {
        if assigned.contains_key(&seed.id) {
            continue;
        }
        assigned.insert(seed.id, seed.id);
        queue.push_back(seed.id);

        while let Some(current) = queue.pop_front() {
            let current_connectors = &connectors[&current];
            for other in &members {
                if assigned.contains_key(&other.id) {
                    continue;
                }
                if lists_coincide(current_connectors, &connectors[&other.id]) {
                    assigned.insert(other.id, seed.id);
                    queue.push_back(other.id);
                }
            }
        }
    }

    members
        .into_iter()
        .map(|part| {
            let mut updated = part.clone();
            updated.group_id = assigned[&part.id];
            updated
        })
        .collect()
}

fn install(store: &mut PartStore, parts: Vec<Part>) {
    for part in parts {
        store.insert(part);
    }
}

/// Detaches a part from its group and re-partitions what remains.
///
/// The part keeps its position; it simply stops being a member of the
/// group even though its connectors may still coincide with old neighbours.
/// A missing id returns the store unchanged.
pub fn disconnect(store: &PartStore, part_id: u64) -> PartStore {
    let Some(part) = store.get(part_id) else {
        debug!("Disconnect ignored, part {} not found", part_id);
        return store.clone();
    };
    let old_group = part.group_id;

    let mut next = store.clone();
    if let Some(part) = next.get_mut(part_id) {
        part.group_id = part_id;
    }

    let remaining: Vec<u64> = next
        .group_member_ids(old_group)
        .into_iter()
        .filter(|id| *id != part_id)
        .collect();
    let updated = recompute_groups(&remaining, &next);
    install(&mut next, updated);

    debug!(
        "Disconnected part {} from group {} ({} remaining members)",
        part_id,
        old_group,
        remaining.len()
    );
    next
}

/// Removes a part and re-partitions the rest of its former group.
/// A missing id returns the store unchanged.
pub fn delete(store: &PartStore, part_id: u64) -> PartStore {
    let mut next = store.clone();
    let Some(removed) = next.remove(part_id) else {
        debug!("Delete ignored, part {} not found", part_id);
        return next;
    };

    let remaining = next.group_member_ids(removed.group_id);
    let updated = recompute_groups(&remaining, &next);
    install(&mut next, updated);

    debug!(
        "Deleted part {} from group {} ({} remaining members)",
        part_id,
        removed.group_id,
        remaining.len()
    );
    next
}

/// Re-partitions the whole group containing `part_id`, the part included.
///
/// Used after an operation that may have moved a part's connectors away
/// from (or onto) its neighbours without a snap.
pub fn regroup(store: &PartStore, part_id: u64) -> PartStore {
    let Some(part) = store.get(part_id) else {
        return store.clone();
    };
    let members = store.group_member_ids(part.group_id);
    if members.len() < 2 {
        return store.clone();
    }
    let mut next = store.clone();
    let updated = recompute_groups(&members, store);
    install(&mut next, updated);
    next
}

/// Re-derives every group from scratch.
pub fn recompute_all_groups(store: &PartStore) -> PartStore {
    let ids: Vec<u64> = store.ids().collect();
    let mut next = store.clone();
    let updated = recompute_groups(&ids, store);
    install(&mut next, updated);
    next
}

/// Group id to member ids, both in ascending order.
pub fn groups(store: &PartStore) -> BTreeMap<u64, Vec<u64>> {
    let mut groups: BTreeMap<u64, Vec<u64>> = BTreeMap::new();
    for part in store.iter() {
        groups.entry(part.group_id).or_default().push(part.id);
    }
    groups
}

/// Parts of `group_id` reachable from `origin` without passing through
/// any part in `excluded`.
///
/// The search starts at every group member with a connector on `origin`
/// and then follows the coincidence relation among the remaining members.
/// Result is in id order.
pub fn reachable_from_connector(
    store: &PartStore,
    origin: &Connector,
    group_id: u64,
    excluded: &[u64],
) -> Vec<u64> {
    let candidates: Vec<&Part> = store
        .iter()
        .filter(|p| p.group_id == group_id && !excluded.contains(&p.id))
        .collect();
    let connectors = connector_cache(candidates.iter().copied());

    let mut visited: HashSet<u64> = HashSet::new();
    let mut queue = VecDeque::new();
    for part in &candidates {
        if connectors[&part.id]
            .iter()
            .any(|c| connectors_coincide(c, origin))
        {
            visited.insert(part.id);
            queue.push_back(part.id);
        }
    }

    while let Some(current) = queue.pop_front() {
        for other in &candidates {
            if visited.contains(&other.id) {
                continue;
            }
            if lists_coincide(&connectors[&current], &connectors[&other.id]) {
                visited.insert(other.id);
                queue.push_back(other.id);
            }
        }
    }

    let mut reached: Vec<u64> = visited.into_iter().collect();
    reached.sort_unstable();
    reached
}
