//! Snapshot catalog and per-block version timelines.
//!
//! This crate provides the metadata layer of the engine:
//! - [`Timeline`] — ordered version history of a single block.
//! - [`Snapshot`] — a full backup: the complete ordered block sequence of
//!   a file at a moment in time.
//! - [`Catalog`] — per-filename ordered collection of snapshots.
//!
//! Both timelines and the catalog share the same tie-break contract: keys
//! are timestamps, and the first insert at a given timestamp wins. Later
//! inserts at the same timestamp are rejected and reported through the
//! `bool` return of the insert operation.

mod catalog;
mod snapshot;
mod timeline;

pub use catalog::Catalog;
pub use snapshot::Snapshot;
pub use timeline::Timeline;
