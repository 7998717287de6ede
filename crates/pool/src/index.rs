use std::collections::BTreeMap;

use tourmaline_core_types::{Height, SingleCommit};

/// Iteration order over heights.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// Lowest height first.
    Asc,
    /// Highest height first.
    Dsc,
}

/// An in-memory container of single commits keyed by height, with secondary
/// uniqueness by `(height, validator_address)`.
///
/// Within one height, commits keep their insertion order; across heights,
/// iteration follows the requested [`Order`]. Adding a commit whose
/// `(height, validator_address)` pair is already present is a no-op, so
/// callers never need to deduplicate.
#[derive(Clone, Debug, Default)]
pub struct CommitIndex {
    by_height: BTreeMap<Height, Vec<SingleCommit>>,
}

impl CommitIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a commit. Returns `false` without modifying the index when an
    /// entry with the same `(height, validator_address)` already exists.
    pub fn add(&mut self, commit: SingleCommit) -> bool {
        let entries = self.by_height.entry(commit.height).or_default();
        if entries
            .iter()
            .any(|c| c.validator_address == commit.validator_address)
        {
            return false;
        }

        entries.push(commit);
        true
    }

    /// Remove the entry matching `commit`'s `(height, validator_address)`.
    /// Returns whether an entry was removed.
    pub fn delete_single(&mut self, commit: &SingleCommit) -> bool {
        let Some(entries) = self.by_height.get_mut(&commit.height) else {
            return false;
        };

        let Some(position) = entries
            .iter()
            .position(|c| c.validator_address == commit.validator_address)
        else {
            return false;
        };

        entries.remove(position);
        if entries.is_empty() {
            self.by_height.remove(&commit.height);
        }

        true
    }

    /// Remove every commit at the given height.
    pub fn delete_by_height(&mut self, height: Height) {
        self.by_height.remove(&height);
    }

    /// Remove every commit at or below the given height.
    pub fn prune_up_to(&mut self, height: Height) {
        self.by_height = self.by_height.split_off(&height.increment());
    }

    /// The commits at the given height, in insertion order.
    pub fn get_by_height(&self, height: Height) -> &[SingleCommit] {
        self.by_height
            .get(&height)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether an entry with `commit`'s `(height, validator_address)`
    /// exists.
    pub fn exists(&self, commit: &SingleCommit) -> bool {
        self.get_by_height(commit.height)
            .iter()
            .any(|c| c.validator_address == commit.validator_address)
    }

    /// All commits, sorted by height in the given order. Ties within a
    /// height keep insertion order regardless of `order`.
    pub fn get_all(&self, order: Order) -> Box<dyn Iterator<Item = &SingleCommit> + '_> {
        match order {
            Order::Asc => Box::new(self.by_height.values().flatten()),
            Order::Dsc => Box::new(self.by_height.values().rev().flatten()),
        }
    }

    /// Total number of commits in the index.
    pub fn len(&self) -> usize {
        self.by_height.values().map(Vec::len).sum()
    }

    /// Whether the index holds no commits.
    pub fn is_empty(&self) -> bool {
        self.by_height.is_empty()
    }

    /// Drop all commits.
    pub fn clear(&mut self) {
        self.by_height.clear();
    }
}
