//! Per-filename snapshot index.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use strata_types::Timestamp;
use tracing::debug;

use crate::snapshot::Snapshot;

/// Per-filename ordered collection of snapshots.
///
/// Grows monotonically: snapshots are registered by full backups and never
/// removed. Registration follows the same tie-break contract as block
/// timelines — one snapshot per (filename, timestamp), first write wins.
#[derive(Debug, Default)]
pub struct Catalog {
    files: HashMap<String, BTreeMap<Timestamp, Snapshot>>,
}

impl Catalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `snapshot` under `filename`, creating the file entry on
    /// first registration.
    ///
    /// Returns whether the snapshot was registered; `false` means the file
    /// already has a snapshot at exactly this timestamp.
    pub fn register(&mut self, filename: &str, snapshot: Snapshot) -> bool {
        let timestamp = snapshot.created_at();
        let snapshots = self.files.entry(filename.to_string()).or_default();
        match snapshots.entry(timestamp) {
            Entry::Vacant(slot) => {
                slot.insert(snapshot);
                debug!(filename, timestamp, "registered snapshot");
                true
            }
            Entry::Occupied(_) => {
                debug!(filename, timestamp, "snapshot timestamp taken, dropped");
                false
            }
        }
    }

    /// The snapshot of `filename` with the greatest timestamp at or before
    /// `at`.
    ///
    /// `None` if the filename is unknown or its earliest snapshot is later
    /// than `at`.
    pub fn resolve_at(&self, filename: &str, at: Timestamp) -> Option<&Snapshot> {
        self.files
            .get(filename)?
            .range(..=at)
            .next_back()
            .map(|(_, snapshot)| snapshot)
    }

    /// Mutable variant of [`resolve_at`](Self::resolve_at), used by
    /// incremental mutations that edit the resolved snapshot in place.
    pub fn resolve_at_mut(&mut self, filename: &str, at: Timestamp) -> Option<&mut Snapshot> {
        self.files
            .get_mut(filename)?
            .range_mut(..=at)
            .next_back()
            .map(|(_, snapshot)| snapshot)
    }

    /// Whether `filename` has ever been backed up.
    pub fn file_exists(&self, filename: &str) -> bool {
        self.files.contains_key(filename)
    }

    /// Number of snapshots registered for `filename`.
    pub fn snapshot_count(&self, filename: &str) -> usize {
        self.files.get(filename).map_or(0, BTreeMap::len)
    }
}
