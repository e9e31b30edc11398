//! Backup engine orchestration.
//!
//! The [`BackupEngine`] owns the chunk arena and the snapshot catalog and
//! exposes the three caller-facing operations: full backup, incremental
//! backup, and point-in-time read. Callers depend on this crate alone; the
//! arena and catalog crates are implementation layers behind it.

pub mod engine;
pub mod error;

pub use engine::BackupEngine;
pub use error::EngineError;

#[cfg(test)]
mod tests;
