//! Id-indexed part storage.

use std::collections::BTreeMap;

use crate::model::Part;

/// Arena of parts keyed by id.
///
/// Iteration order is id order, which is also creation order since ids are
/// handed out monotonically. Layout operations return a new store rather
/// than editing the one they were given.
#[derive(Debug, Clone, PartialEq)]
pub struct PartStore {
    parts: BTreeMap<u64, Part>,
    next_id: u64,
}

impl PartStore {
    pub fn new() -> Self {
        Self {
            parts: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Builds a store from existing parts; the id generator continues after
    /// the largest id present.
    pub fn from_parts<I: IntoIterator<Item = Part>>(parts: I) -> Self {
        let mut store = Self::new();
        for part in parts {
            store.insert(part);
        }
        store
    }

    /// Returns a fresh id.
    pub fn generate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn set_next_id(&mut self, id: u64) {
        self.next_id = id;
    }

    /// Inserts or replaces a part, keyed by its id.
    pub fn insert(&mut self, part: Part) {
        if part.id >= self.next_id {
            self.next_id = part.id + 1;
        }
        self.parts.insert(part.id, part);
    }

    pub fn get(&self, id: u64) -> Option<&Part> {
        self.parts.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Part> {
        self.parts.get_mut(&id)
    }

    pub fn remove(&mut self, id: u64) -> Option<Part> {
        self.parts.remove(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.parts.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Part> {
        self.parts.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Part> {
        self.parts.values_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.parts.keys().copied()
    }

    /// Ids of every part whose `group_id` is `group_id`, in id order.
    pub fn group_member_ids(&self, group_id: u64) -> Vec<u64> {
        self.parts
            .values()
            .filter(|p| p.group_id == group_id)
            .map(|p| p.id)
            .collect()
    }
}

impl Default for PartStore {
    fn default() -> Self {
        Self::new()
    }
}
