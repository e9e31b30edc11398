//! Shared types for Strata.
//!
//! This crate defines the core types used across the Strata workspace:
//! the [`Timestamp`] alias, chunk slot references ([`ChunkRef`]), block
//! version entries ([`Version`], [`BlockPayload`]), incremental backup
//! instructions ([`Instruction`]), and engine configuration
//! ([`EngineConfig`]).

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Timestamps and chunk references
// ---------------------------------------------------------------------------

/// Logical point in time at which a backup or mutation was taken.
///
/// Timestamps are caller-supplied and only their ordering matters; the
/// engine never consults a clock.
pub type Timestamp = u64;

/// Starting offset of a chunk slot within the arena.
///
/// A `ChunkRef` is only ever produced by an arena allocation and stays
/// valid for the arena's lifetime; slots are never reclaimed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkRef(u64);

impl ChunkRef {
    /// Create a reference from a raw slot offset.
    pub fn from_offset(offset: u64) -> Self {
        Self(offset)
    }

    /// Byte offset of the slot within the arena.
    pub fn offset(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChunkRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chunk-{:06x}", self.0)
    }
}

impl fmt::Debug for ChunkRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkRef({})", self)
    }
}

// ---------------------------------------------------------------------------
// Block versions
// ---------------------------------------------------------------------------

/// What a block version points at: stored content, or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockPayload {
    /// The block's content lives in the arena slot at this reference.
    Chunk(ChunkRef),
    /// The block is deleted as of this version's timestamp.
    Tombstone,
}

/// One entry in a block's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// When this version took effect.
    pub timestamp: Timestamp,
    /// Stored content or tombstone.
    pub payload: BlockPayload,
}

impl Version {
    /// Version pointing at stored chunk content.
    pub fn chunk(timestamp: Timestamp, chunk: ChunkRef) -> Self {
        Self {
            timestamp,
            payload: BlockPayload::Chunk(chunk),
        }
    }

    /// Version marking the block as deleted.
    pub fn tombstone(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            payload: BlockPayload::Tombstone,
        }
    }

    /// Whether this version marks the block as deleted.
    pub fn is_tombstone(&self) -> bool {
        matches!(self.payload, BlockPayload::Tombstone)
    }

    /// The referenced chunk slot, if this version carries content.
    pub fn chunk_ref(&self) -> Option<ChunkRef> {
        match self.payload {
            BlockPayload::Chunk(chunk) => Some(chunk),
            BlockPayload::Tombstone => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Incremental backup instructions
// ---------------------------------------------------------------------------

/// A single block mutation within an incremental backup batch.
///
/// `Delete` and `Alter` address their target by 1-based *active-block
/// ordinal*: the position of the block among those not tombstoned at the
/// batch timestamp. `Append` always targets the end of the block sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// Tombstone the block at the given active ordinal.
    Delete {
        /// 1-based active-block ordinal.
        ordinal: usize,
    },
    /// Replace the content of the block at the given active ordinal.
    Alter {
        /// 1-based active-block ordinal.
        ordinal: usize,
        /// New block content; must fit a single chunk slot.
        data: Vec<u8>,
    },
    /// Add a new block at the end of the sequence.
    Append {
        /// New block content; must fit a single chunk slot.
        data: Vec<u8>,
    },
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Default chunk slot width in bytes.
pub const DEFAULT_CHUNK_WIDTH: usize = 8;

/// Default arena capacity in bytes.
pub const DEFAULT_ARENA_CAPACITY: usize = 1024;

/// Engine geometry, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Width of every chunk slot in bytes.
    pub chunk_width: usize,
    /// Total arena capacity in bytes.
    pub arena_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_width: DEFAULT_CHUNK_WIDTH,
            arena_capacity: DEFAULT_ARENA_CAPACITY,
        }
    }
}
