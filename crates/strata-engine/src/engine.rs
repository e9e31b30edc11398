//! [`BackupEngine`] — ties the arena and catalog together and exposes the
//! full backup / incremental backup / point-in-time read pipeline.

use strata_arena::{ArenaError, ArenaUsage, ChunkArena};
use strata_catalog::{Catalog, Snapshot, Timeline};
use strata_types::{EngineConfig, Instruction, Timestamp, Version};
use tracing::{debug, info};

use crate::error::EngineError;

/// The storage engine exposed to callers.
///
/// Owns the chunk arena and the snapshot catalog, both created at
/// construction from an [`EngineConfig`] and living for the engine's
/// lifetime. All operations are synchronous and the engine is designed
/// for single-threaded use.
pub struct BackupEngine {
    arena: ChunkArena,
    catalog: Catalog,
}

impl BackupEngine {
    /// Create an engine with the given geometry.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            arena: ChunkArena::new(config.arena_capacity, config.chunk_width),
            catalog: Catalog::new(),
        }
    }

    /// Whether `filename` has ever been backed up.
    pub fn file_exists(&self, filename: &str) -> bool {
        self.catalog.file_exists(filename)
    }

    /// Number of full backups registered for `filename`.
    pub fn snapshot_count(&self, filename: &str) -> usize {
        self.catalog.snapshot_count(filename)
    }

    /// Current arena capacity report.
    pub fn arena_usage(&self) -> ArenaUsage {
        self.arena.usage()
    }

    // ------------------------------------------------------------------
    // Write path
    // ------------------------------------------------------------------

    /// Take a full backup of `content` under `filename` at `timestamp`.
    ///
    /// The content is segmented into consecutive chunk-width slices (the
    /// last may be shorter) and allocated all-or-nothing: if the sequence
    /// cannot fully fit the arena, nothing is written and no snapshot is
    /// registered. A second full backup at a timestamp the file already
    /// has is dropped by the catalog tie-break rule; the call still
    /// returns `Ok`.
    pub fn full_backup(
        &mut self,
        filename: &str,
        timestamp: Timestamp,
        content: &[u8],
    ) -> Result<(), EngineError> {
        info!(
            filename,
            timestamp,
            total_size = content.len(),
            "full_backup: starting"
        );

        let chunks: Vec<&[u8]> = content.chunks(self.arena.chunk_width()).collect();
        let refs = self.arena.allocate_all(&chunks)?;

        let mut snapshot = Snapshot::new(timestamp);
        for chunk in refs {
            snapshot.push_block(Timeline::with_version(Version::chunk(timestamp, chunk)));
        }

        let blocks = snapshot.block_count();
        if self.catalog.register(filename, snapshot) {
            info!(filename, timestamp, blocks, "full_backup: snapshot registered");
        } else {
            debug!(
                filename,
                timestamp, "full_backup: timestamp taken, snapshot dropped"
            );
        }
        Ok(())
    }

    /// Apply a batch of block mutations against the snapshot nearest
    /// `timestamp`.
    ///
    /// Best-effort: each instruction is applied independently in order and
    /// reported in the returned vector; one instruction's failure does not
    /// prevent later instructions from being attempted. A filename that
    /// was never backed up fails every instruction with
    /// [`EngineError::FileNotFound`].
    pub fn incremental_backup(
        &mut self,
        filename: &str,
        timestamp: Timestamp,
        instructions: &[Instruction],
    ) -> Vec<Result<(), EngineError>> {
        info!(
            filename,
            timestamp,
            count = instructions.len(),
            "incremental_backup: applying batch"
        );
        instructions
            .iter()
            .map(|instruction| match instruction {
                Instruction::Delete { ordinal } => {
                    self.delete_block(filename, timestamp, *ordinal)
                }
                Instruction::Alter { ordinal, data } => {
                    self.alter_block(filename, timestamp, *ordinal, data)
                }
                Instruction::Append { data } => self.append_block(filename, timestamp, data),
            })
            .collect()
    }

    /// Tombstone the block addressed by active `ordinal` as of `timestamp`.
    ///
    /// If a version already exists at exactly `timestamp`, the tombstone is
    /// silently not applied (first write at a timestamp wins).
    pub fn delete_block(
        &mut self,
        filename: &str,
        timestamp: Timestamp,
        ordinal: usize,
    ) -> Result<(), EngineError> {
        let snapshot = resolve_snapshot_mut(&mut self.catalog, filename, timestamp)?;
        let block = active_block_mut(snapshot, ordinal, timestamp)
            .ok_or(EngineError::BlockNotFound { ordinal })?;
        if !block.insert(Version::tombstone(timestamp)) {
            debug!(
                filename,
                timestamp, ordinal, "delete_block: timestamp taken, tombstone dropped"
            );
        }
        Ok(())
    }

    /// Write `data` as a new version of the block addressed by active
    /// `ordinal` as of `timestamp`.
    ///
    /// If a version already exists at exactly `timestamp`, the insert is
    /// silently not applied; the freshly allocated slot then stays
    /// occupied, consistent with the arena's no-reclaim model.
    pub fn alter_block(
        &mut self,
        filename: &str,
        timestamp: Timestamp,
        ordinal: usize,
        data: &[u8],
    ) -> Result<(), EngineError> {
        if data.len() > self.arena.chunk_width() {
            return Err(ArenaError::OversizedChunk {
                len: data.len(),
                width: self.arena.chunk_width(),
            }
            .into());
        }
        let snapshot = resolve_snapshot_mut(&mut self.catalog, filename, timestamp)?;
        let block = active_block_mut(snapshot, ordinal, timestamp)
            .ok_or(EngineError::BlockNotFound { ordinal })?;
        let chunk = self.arena.allocate(data)?;
        if !block.insert(Version::chunk(timestamp, chunk)) {
            debug!(
                filename,
                timestamp, ordinal, "alter_block: timestamp taken, new chunk orphaned"
            );
        }
        Ok(())
    }

    /// Append `data` as a new block at the end of the sequence of the
    /// snapshot nearest `timestamp`.
    pub fn append_block(
        &mut self,
        filename: &str,
        timestamp: Timestamp,
        data: &[u8],
    ) -> Result<(), EngineError> {
        let snapshot = resolve_snapshot_mut(&mut self.catalog, filename, timestamp)?;
        let chunk = self.arena.allocate(data)?;
        snapshot.push_block(Timeline::with_version(Version::chunk(timestamp, chunk)));
        debug!(filename, timestamp, "append_block: block appended");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read path
    // ------------------------------------------------------------------

    /// Reconstruct `filename`'s content as of `timestamp`.
    ///
    /// Resolves the nearest snapshot, then each block's timeline at the
    /// query timestamp in block order. Tombstoned blocks and blocks with
    /// no history yet contribute nothing; the rest contribute their chunk
    /// content. A result where every block is silent is a valid empty
    /// output.
    pub fn read_file(&self, filename: &str, timestamp: Timestamp) -> Result<Vec<u8>, EngineError> {
        if !self.catalog.file_exists(filename) {
            return Err(EngineError::FileNotFound {
                filename: filename.to_string(),
            });
        }
        let snapshot = self.catalog.resolve_at(filename, timestamp).ok_or_else(|| {
            EngineError::NoSnapshotAtOrBefore {
                filename: filename.to_string(),
                timestamp,
            }
        })?;

        let mut content = Vec::new();
        for block in snapshot.blocks() {
            let Some(version) = block.resolve_at(timestamp) else {
                continue;
            };
            if let Some(chunk) = version.chunk_ref() {
                content.extend_from_slice(self.arena.read(chunk));
            }
        }
        debug!(
            filename,
            timestamp,
            bytes = content.len(),
            "read_file: content reconstructed"
        );
        Ok(content)
    }
}

/// Snapshot of `filename` nearest `timestamp`, distinguishing an unknown
/// file from a query that precedes the file's history.
fn resolve_snapshot_mut<'a>(
    catalog: &'a mut Catalog,
    filename: &str,
    timestamp: Timestamp,
) -> Result<&'a mut Snapshot, EngineError> {
    if !catalog.file_exists(filename) {
        return Err(EngineError::FileNotFound {
            filename: filename.to_string(),
        });
    }
    catalog
        .resolve_at_mut(filename, timestamp)
        .ok_or_else(|| EngineError::NoSnapshotAtOrBefore {
            filename: filename.to_string(),
            timestamp,
        })
}

/// Block addressed by 1-based active ordinal at `at`.
///
/// The counter advances only over blocks whose resolved version at `at` is
/// live; tombstoned blocks and blocks with no history yet are skipped
/// without consuming an ordinal.
fn active_block_mut(
    snapshot: &mut Snapshot,
    ordinal: usize,
    at: Timestamp,
) -> Option<&mut Timeline> {
    let mut seen = 0;
    for block in snapshot.blocks_mut() {
        if block.is_live_at(at) {
            seen += 1;
            if seen == ordinal {
                return Some(block);
            }
        }
    }
    None
}
