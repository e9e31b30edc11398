//! [`ChunkArena`] — fixed-capacity slot storage with a bump cursor.

use strata_types::ChunkRef;
use tracing::debug;

use crate::error::ArenaError;

/// Capacity report for an arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaUsage {
    /// Total capacity in bytes.
    pub total_bytes: usize,
    /// Bytes claimed by allocated slots.
    pub used_bytes: usize,
    /// Bytes still available for new slots.
    pub available_bytes: usize,
}

/// Fixed-capacity byte store with a monotonically advancing write cursor.
///
/// Every allocation claims a full `chunk_width`-byte slot starting at the
/// cursor; payloads shorter than the width are zero-padded, and a slot's
/// logical content is the byte prefix up to the first zero byte. Payloads
/// containing interior zero bytes therefore read back truncated.
///
/// Space is never reclaimed: slots are write-once and the cursor only
/// moves forward, so the arena exhausts its capacity irreversibly.
pub struct ChunkArena {
    buf: Vec<u8>,
    cursor: usize,
    chunk_width: usize,
}

impl ChunkArena {
    /// Create an arena with `capacity` bytes of backing storage and the
    /// given slot width.
    pub fn new(capacity: usize, chunk_width: usize) -> Self {
        assert!(chunk_width > 0, "chunk width must be non-zero");
        Self {
            buf: vec![0; capacity],
            cursor: 0,
            chunk_width,
        }
    }

    /// Slot width in bytes.
    pub fn chunk_width(&self) -> usize {
        self.chunk_width
    }

    /// Whether an allocation of `len` bytes would be accepted.
    ///
    /// The bound is strict: an allocation whose payload would end exactly
    /// at the capacity boundary is refused.
    pub fn can_allocate(&self, len: usize) -> bool {
        self.cursor.saturating_add(len) < self.buf.len()
    }

    /// Write `bytes` into a new slot and return its starting offset.
    pub fn allocate(&mut self, bytes: &[u8]) -> Result<ChunkRef, ArenaError> {
        if bytes.len() > self.chunk_width {
            return Err(ArenaError::OversizedChunk {
                len: bytes.len(),
                width: self.chunk_width,
            });
        }
        if !self.can_allocate(bytes.len()) {
            return Err(ArenaError::InsufficientCapacity {
                needed: bytes.len(),
                available: self.buf.len().saturating_sub(self.cursor),
            });
        }
        Ok(self.write_slot(bytes))
    }

    /// All-or-nothing batch allocation.
    ///
    /// Every chunk is validated against a simulated cursor before any byte
    /// is written; on failure the arena is untouched.
    pub fn allocate_all(&mut self, chunks: &[&[u8]]) -> Result<Vec<ChunkRef>, ArenaError> {
        let mut cursor = self.cursor;
        for chunk in chunks {
            if chunk.len() > self.chunk_width {
                return Err(ArenaError::OversizedChunk {
                    len: chunk.len(),
                    width: self.chunk_width,
                });
            }
            if cursor.saturating_add(chunk.len()) >= self.buf.len() {
                return Err(ArenaError::InsufficientCapacity {
                    needed: chunk.len(),
                    available: self.buf.len().saturating_sub(cursor),
                });
            }
            cursor += self.chunk_width;
        }
        Ok(chunks.iter().map(|chunk| self.write_slot(chunk)).collect())
    }

    /// Logical content of the slot at `chunk`: the byte prefix up to (but
    /// not including) the first zero byte.
    pub fn read(&self, chunk: ChunkRef) -> &[u8] {
        let start = chunk.offset() as usize;
        let end = (start + self.chunk_width).min(self.buf.len());
        let slot = &self.buf[start..end];
        let len = slot.iter().position(|&b| b == 0).unwrap_or(slot.len());
        &slot[..len]
    }

    /// Current capacity report.
    pub fn usage(&self) -> ArenaUsage {
        let used = self.cursor.min(self.buf.len());
        ArenaUsage {
            total_bytes: self.buf.len(),
            used_bytes: used,
            available_bytes: self.buf.len() - used,
        }
    }

    fn write_slot(&mut self, bytes: &[u8]) -> ChunkRef {
        let start = self.cursor;
        // Slots are write-once and the backing buffer is zero-initialized,
        // so the trailing padding is already in place.
        self.buf[start..start + bytes.len()].copy_from_slice(bytes);
        self.cursor += self.chunk_width;
        debug!(offset = start, len = bytes.len(), "allocated chunk slot");
        ChunkRef::from_offset(start as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_read_roundtrip() {
        let mut arena = ChunkArena::new(1024, 8);
        let chunk = arena.allocate(b"hello").unwrap();
        assert_eq!(arena.read(chunk), b"hello");
    }

    #[test]
    fn test_full_width_chunk_reads_back_whole() {
        let mut arena = ChunkArena::new(1024, 8);
        let chunk = arena.allocate(b"exactly8").unwrap();
        assert_eq!(arena.read(chunk), b"exactly8");
    }

    #[test]
    fn test_cursor_advances_by_slot_width() {
        let mut arena = ChunkArena::new(1024, 8);
        let first = arena.allocate(b"ab").unwrap();
        let second = arena.allocate(b"cd").unwrap();
        assert_eq!(first.offset(), 0);
        assert_eq!(second.offset(), 8);
        assert_eq!(arena.usage().used_bytes, 16);
    }

    #[test]
    fn test_oversized_chunk_rejected() {
        let mut arena = ChunkArena::new(1024, 8);
        let err = arena.allocate(b"nine bytes").unwrap_err();
        assert!(matches!(
            err,
            ArenaError::OversizedChunk { len: 10, width: 8 }
        ));
        assert_eq!(arena.usage().used_bytes, 0);
    }

    #[test]
    fn test_strict_capacity_boundary() {
        // One slot fits; a second full-width payload would end exactly at
        // the boundary and is refused, while a shorter one still fits.
        let mut arena = ChunkArena::new(16, 8);
        arena.allocate(b"12345678").unwrap();
        assert!(!arena.can_allocate(8));
        assert!(matches!(
            arena.allocate(b"12345678"),
            Err(ArenaError::InsufficientCapacity { .. })
        ));
        arena.allocate(b"1234567").unwrap();
    }

    #[test]
    fn test_exhausted_arena_rejects_everything() {
        let mut arena = ChunkArena::new(16, 8);
        arena.allocate(b"aa").unwrap();
        arena.allocate(b"bb").unwrap();
        assert!(!arena.can_allocate(1));
        assert!(arena.allocate(b"c").is_err());
    }

    #[test]
    fn test_allocate_all_is_atomic() {
        let mut arena = ChunkArena::new(16, 8);
        // Three chunks cannot fit two slots; nothing must be written.
        let chunks: &[&[u8]] = &[b"aaaa", b"bbbb", b"cccc"];
        let err = arena.allocate_all(chunks).unwrap_err();
        assert!(matches!(err, ArenaError::InsufficientCapacity { .. }));
        assert_eq!(arena.usage().used_bytes, 0);

        let refs = arena.allocate_all(&[b"aaaa".as_slice()]).unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(arena.read(refs[0]), b"aaaa");
    }

    #[test]
    fn test_allocate_all_empty_batch() {
        let mut arena = ChunkArena::new(16, 8);
        assert!(arena.allocate_all(&[]).unwrap().is_empty());
        assert_eq!(arena.usage().used_bytes, 0);
    }

    #[test]
    fn test_interior_zero_truncates_read() {
        let mut arena = ChunkArena::new(1024, 8);
        let chunk = arena.allocate(b"ab\0cd").unwrap();
        assert_eq!(arena.read(chunk), b"ab");
    }

    #[test]
    fn test_usage_report() {
        let mut arena = ChunkArena::new(64, 8);
        arena.allocate(b"x").unwrap();
        let usage = arena.usage();
        assert_eq!(usage.total_bytes, 64);
        assert_eq!(usage.used_bytes, 8);
        assert_eq!(usage.available_bytes, 56);
    }
}
