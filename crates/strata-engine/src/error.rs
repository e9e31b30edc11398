//! Error types for backup engine operations.

use strata_arena::ArenaError;
use strata_types::Timestamp;

/// Errors that can occur during backup engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The chunk arena rejected an allocation.
    #[error("arena error: {0}")]
    Arena(#[from] ArenaError),

    /// The filename has never been backed up.
    #[error("file not found: {filename}")]
    FileNotFound {
        /// The unknown filename.
        filename: String,
    },

    /// The file's earliest snapshot is later than the query timestamp.
    #[error("no snapshot of {filename} at or before timestamp {timestamp}")]
    NoSnapshotAtOrBefore {
        /// The queried filename.
        filename: String,
        /// The query timestamp.
        timestamp: Timestamp,
    },

    /// No active block carries the requested ordinal.
    #[error("block not found: no active block with ordinal {ordinal}")]
    BlockNotFound {
        /// The 1-based active-block ordinal that was requested.
        ordinal: usize,
    },
}
