//! Shared test utilities for strata-engine tests.

use strata_types::EngineConfig;

use crate::engine::BackupEngine;

/// Engine with the default geometry: 8-byte chunks, 1 KiB arena.
pub fn default_engine() -> BackupEngine {
    BackupEngine::new(EngineConfig::default())
}

/// Engine with explicit geometry.
pub fn engine_with(chunk_width: usize, arena_capacity: usize) -> BackupEngine {
    BackupEngine::new(EngineConfig {
        chunk_width,
        arena_capacity,
    })
}

/// Generate deterministic, non-repeating test data.
///
/// The stream is kept zero-free: a zero byte would terminate its chunk
/// slot early on read.
pub fn test_data(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut state: u32 = 0xDEAD_BEEF;
    for _ in 0..size {
        state = state.wrapping_mul(1103515245).wrapping_add(12345);
        data.push(((state >> 16) as u8).max(1));
    }
    data
}
