//! Incremental batches, active-ordinal addressing, and per-instruction
//! error reporting.

use strata_types::Instruction;

use crate::error::EngineError;

use super::helpers::default_engine;

// -----------------------------------------------------------------------
// Active-ordinal addressing
// -----------------------------------------------------------------------

#[test]
fn test_ordinal_skips_tombstoned_blocks() {
    let mut engine = default_engine();
    // Three 8-byte blocks: AAAA..., BBBB..., CCCC...
    engine
        .full_backup("f", 1, b"AAAAAAAABBBBBBBBCCCCCCCC")
        .unwrap();
    engine.delete_block("f", 2, 1).unwrap();

    // After the first delete, ordinal 1 addresses the B block.
    engine.delete_block("f", 3, 1).unwrap();
    assert_eq!(engine.read_file("f", 3).unwrap(), b"CCCCCCCC");

    // And now ordinal 1 is the C block.
    engine.alter_block("f", 4, 1, b"DDDDDDDD").unwrap();
    assert_eq!(engine.read_file("f", 4).unwrap(), b"DDDDDDDD");
}

#[test]
fn test_ordinal_out_of_range() {
    let mut engine = default_engine();
    engine.full_backup("f", 1, b"one blk").unwrap();

    assert!(matches!(
        engine.delete_block("f", 2, 2),
        Err(EngineError::BlockNotFound { ordinal: 2 })
    ));
    assert!(matches!(
        engine.delete_block("f", 2, 0),
        Err(EngineError::BlockNotFound { ordinal: 0 })
    ));
}

#[test]
fn test_append_ignores_ordinals_entirely() {
    let mut engine = default_engine();
    engine.full_backup("f", 1, b"AAAAAAAA").unwrap();
    engine.delete_block("f", 2, 1).unwrap();

    // Appending works even when every prior block is tombstoned.
    engine.append_block("f", 3, b"tail").unwrap();
    assert_eq!(engine.read_file("f", 3).unwrap(), b"tail");
    assert_eq!(engine.read_file("f", 1).unwrap(), b"AAAAAAAA");
}

// -----------------------------------------------------------------------
// Mutations resolve the nearest snapshot
// -----------------------------------------------------------------------

#[test]
fn test_mutation_before_any_snapshot() {
    let mut engine = default_engine();
    engine.full_backup("f", 5, b"data").unwrap();

    assert!(matches!(
        engine.delete_block("f", 4, 1),
        Err(EngineError::NoSnapshotAtOrBefore { timestamp: 4, .. })
    ));
    assert!(matches!(
        engine.append_block("f", 4, b"x"),
        Err(EngineError::NoSnapshotAtOrBefore { .. })
    ));
}

#[test]
fn test_mutation_targets_nearest_snapshot_only() {
    let mut engine = default_engine();
    engine.full_backup("f", 1, b"old old!").unwrap();
    engine.full_backup("f", 10, b"new new!").unwrap();

    // Timestamp 5 resolves the snapshot at 1; the one at 10 is untouched.
    engine.alter_block("f", 5, 1, b"patched!").unwrap();
    assert_eq!(engine.read_file("f", 5).unwrap(), b"patched!");
    assert_eq!(engine.read_file("f", 10).unwrap(), b"new new!");
}

// -----------------------------------------------------------------------
// Tie-break on mutations
// -----------------------------------------------------------------------

#[test]
fn test_delete_at_occupied_timestamp_not_applied() {
    let mut engine = default_engine();
    engine.full_backup("f", 1, b"keep me!").unwrap();

    // The block already has a version at exactly timestamp 1.
    engine.delete_block("f", 1, 1).unwrap();
    assert_eq!(engine.read_file("f", 1).unwrap(), b"keep me!");
    assert_eq!(engine.read_file("f", 9).unwrap(), b"keep me!");
}

#[test]
fn test_alter_at_occupied_timestamp_not_applied() {
    let mut engine = default_engine();
    engine.full_backup("f", 1, b"keep me!").unwrap();
    let used_before = engine.arena_usage().used_bytes;

    engine.alter_block("f", 1, 1, b"dropped!").unwrap();
    assert_eq!(engine.read_file("f", 1).unwrap(), b"keep me!");
    // The rejected insert still consumed a slot; the arena never reclaims.
    assert_eq!(engine.arena_usage().used_bytes, used_before + 8);
}

// -----------------------------------------------------------------------
// Batch semantics
// -----------------------------------------------------------------------

#[test]
fn test_batch_is_best_effort() {
    let mut engine = default_engine();
    engine.full_backup("f", 1, b"AAAAAAAABBBBBBBB").unwrap();

    let outcomes = engine.incremental_backup(
        "f",
        2,
        &[
            Instruction::Delete { ordinal: 99 },
            Instruction::Append {
                data: b"CCCCCCCC".to_vec(),
            },
            Instruction::Alter {
                ordinal: 1,
                data: b"aaaaaaaa".to_vec(),
            },
        ],
    );

    assert_eq!(outcomes.len(), 3);
    assert!(matches!(
        outcomes[0],
        Err(EngineError::BlockNotFound { ordinal: 99 })
    ));
    assert!(outcomes[1].is_ok());
    assert!(outcomes[2].is_ok());
    assert_eq!(engine.read_file("f", 2).unwrap(), b"aaaaaaaaBBBBBBBBCCCCCCCC");
}

#[test]
fn test_batch_on_unknown_file_reports_every_instruction() {
    let mut engine = default_engine();
    let outcomes = engine.incremental_backup(
        "ghost",
        1,
        &[
            Instruction::Delete { ordinal: 1 },
            Instruction::Append {
                data: b"x".to_vec(),
            },
        ],
    );

    assert_eq!(outcomes.len(), 2);
    for outcome in &outcomes {
        assert!(matches!(outcome, Err(EngineError::FileNotFound { .. })));
    }
    assert!(!engine.file_exists("ghost"));
}

#[test]
fn test_instructions_apply_in_order() {
    let mut engine = default_engine();
    engine.full_backup("f", 1, b"AAAAAAAA").unwrap();

    // The append lands first, so the delete of ordinal 2 addresses the
    // freshly appended block. Its timeline already has a version at the
    // batch timestamp, so the tombstone is dropped by the tie-break rule
    // and the block survives.
    let outcomes = engine.incremental_backup(
        "f",
        2,
        &[
            Instruction::Append {
                data: b"BBBBBBBB".to_vec(),
            },
            Instruction::Delete { ordinal: 2 },
        ],
    );
    assert!(outcomes.iter().all(Result::is_ok));
    assert_eq!(engine.read_file("f", 2).unwrap(), b"AAAAAAAABBBBBBBB");

    // A delete at a later timestamp does remove it.
    engine.delete_block("f", 3, 2).unwrap();
    assert_eq!(engine.read_file("f", 3).unwrap(), b"AAAAAAAA");
}
