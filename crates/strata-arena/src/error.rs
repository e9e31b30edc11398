//! Error types for arena allocation.

/// Errors that can occur while allocating chunk slots.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    /// The payload does not fit in a single chunk slot.
    #[error("oversized chunk: {len} bytes exceeds slot width {width}")]
    OversizedChunk {
        /// Length of the rejected payload.
        len: usize,
        /// Configured slot width.
        width: usize,
    },

    /// The arena cannot hold the requested bytes.
    #[error("insufficient capacity: need {needed} bytes, only {available} left in arena")]
    InsufficientCapacity {
        /// Bytes the allocation asked for.
        needed: usize,
        /// Bytes between the cursor and the end of the arena.
        available: usize,
    },
}
