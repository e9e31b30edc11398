//! Fixed-capacity chunk arena.
//!
//! This crate provides:
//! - [`ChunkArena`] — the only component that touches raw storage: a
//!   fixed-capacity byte store carved into fixed-width slots by a
//!   monotonically advancing write cursor.
//! - [`ArenaError`] — typed allocation failures.
//!
//! The arena never reclaims space. A slot whose version was superseded or
//! tombstoned stays occupied for the arena's lifetime.

mod arena;
mod error;

pub use arena::{ArenaUsage, ChunkArena};
pub use error::ArenaError;
