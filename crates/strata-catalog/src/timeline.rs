//! Per-block version history.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use strata_types::{BlockPayload, Timestamp, Version};

/// Ordered history of versions for a single block.
///
/// At most one version exists per timestamp. Inserting at an occupied
/// timestamp is rejected: the first write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    versions: BTreeMap<Timestamp, BlockPayload>,
}

impl Timeline {
    /// Empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Timeline seeded with a single version.
    pub fn with_version(version: Version) -> Self {
        let mut timeline = Self::new();
        timeline.insert(version);
        timeline
    }

    /// Insert `version` if no version exists at its timestamp.
    ///
    /// Returns whether the insert occurred.
    pub fn insert(&mut self, version: Version) -> bool {
        match self.versions.entry(version.timestamp) {
            Entry::Vacant(slot) => {
                slot.insert(version.payload);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// The version with the greatest timestamp at or before `at`.
    ///
    /// `None` if the earliest version is later than `at` (the block has no
    /// history yet at that point in time).
    pub fn resolve_at(&self, at: Timestamp) -> Option<Version> {
        self.versions
            .range(..=at)
            .next_back()
            .map(|(&timestamp, &payload)| Version { timestamp, payload })
    }

    /// Whether the block resolves to a non-tombstone version at `at`.
    pub fn is_live_at(&self, at: Timestamp) -> bool {
        self.resolve_at(at).is_some_and(|v| !v.is_tombstone())
    }

    /// All versions in timestamp order.
    pub fn versions(&self) -> impl Iterator<Item = Version> + '_ {
        self.versions
            .iter()
            .map(|(&timestamp, &payload)| Version { timestamp, payload })
    }

    /// Number of versions recorded.
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Whether the timeline has no versions.
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}
