//! Point-in-time block layout of a file.

use strata_types::Timestamp;

use crate::timeline::Timeline;

/// A full backup: the complete ordered block sequence of a file at a
/// moment in time.
///
/// The block order is fixed at creation and only grows by appending; an
/// existing block keeps its physical index for the snapshot's lifetime.
/// Incremental operations that resolve to this snapshot mutate it in
/// place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    created_at: Timestamp,
    blocks: Vec<Timeline>,
}

impl Snapshot {
    /// Empty snapshot taken at `created_at`.
    pub fn new(created_at: Timestamp) -> Self {
        Self {
            created_at,
            blocks: Vec::new(),
        }
    }

    /// Timestamp the full backup was taken at.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Block timeline at a fixed physical index.
    pub fn block_at(&self, index: usize) -> Option<&Timeline> {
        self.blocks.get(index)
    }

    /// Append a block timeline at the end of the sequence.
    ///
    /// Never affects existing indices.
    pub fn push_block(&mut self, timeline: Timeline) {
        self.blocks.push(timeline);
    }

    /// Iterate blocks in sequence order.
    pub fn blocks(&self) -> impl Iterator<Item = &Timeline> {
        self.blocks.iter()
    }

    /// Iterate blocks mutably in sequence order.
    pub fn blocks_mut(&mut self) -> impl Iterator<Item = &mut Timeline> {
        self.blocks.iter_mut()
    }

    /// Number of blocks in the sequence, tombstoned ones included.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}
