use std::hash::Hash;
use std::ops::Range;

use anyhow::{ensure, Result};
use derive_more::Display;
use similar::{capture_diff_slices, Algorithm, DiffOp};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Classification of one alignment span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OpKind {
    /// The span is identical on both sides
    #[display(fmt = "equal")]
    Equal,

    /// The span exists only on the after side
    #[display(fmt = "insert")]
    Insert,

    /// The span exists only on the before side
    #[display(fmt = "delete")]
    Delete,

    /// Both sides are non-empty and differ
    #[display(fmt = "replace")]
    Replace,
}

/// A classified contiguous span pairing a subrange of the before sequence
/// with a subrange of the after sequence.
///
/// The op list of one alignment run partitions both index spaces exactly:
/// consecutive ops are contiguous, with no gaps or overlaps, and together
/// cover every index of both sequences once. An absent side is represented
/// by a zero-width range at the edit point.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlignmentOp {
    /// How this span is classified
    pub kind: OpKind,

    /// Half-open index range into the before sequence
    pub before: Range<usize>,

    /// Half-open index range into the after sequence
    pub after: Range<usize>,
}

/// Align two ordered sequences of comparable elements.
///
/// Returns the ordered op list covering both sequences completely. Elements
/// are compared by exact equality only; no normalization or folding is
/// performed. The underlying matching is Myers' LCS search, which is
/// deterministic for a fixed input pair.
///
/// Only the equal runs of the raw op stream carry reliable anchors on both
/// sides; the non-equal gaps between consecutive runs are rebuilt from
/// running cursors, classified as insert (after-only gap), delete
/// (before-only gap), or replace (both sides non-empty).
///
/// The same primitive serves both granularities of the engine: once over
/// line texts, then once per replaced line pair over tokens.
pub fn align<T>(before: &[T], after: &[T]) -> Result<Vec<AlignmentOp>>
where
    T: Eq + Hash + Ord,
{
    let mut equal_runs: Vec<(usize, usize, usize)> =
        capture_diff_slices(Algorithm::Myers, before, after)
            .into_iter()
            .filter_map(|op| match op {
                DiffOp::Equal {
                    old_index,
                    new_index,
                    len,
                } => Some((old_index, new_index, len)),
                _ => None,
            })
            .collect();
    equal_runs.sort_unstable();
    // Sentinel run so the trailing gap is filled like any other.
    equal_runs.push((before.len(), after.len(), 0));

    let mut ops = Vec::new();
    let mut before_pos = 0;
    let mut after_pos = 0;

    for (old_index, new_index, len) in equal_runs {
        if before_pos < old_index || after_pos < new_index {
            let kind = if before_pos == old_index {
                OpKind::Insert
            } else if after_pos == new_index {
                OpKind::Delete
            } else {
                OpKind::Replace
            };
            ops.push(AlignmentOp {
                kind,
                before: before_pos..old_index,
                after: after_pos..new_index,
            });
        }
        if len > 0 {
            ops.push(AlignmentOp {
                kind: OpKind::Equal,
                before: old_index..old_index + len,
                after: new_index..new_index + len,
            });
        }
        before_pos = old_index + len;
        after_pos = new_index + len;
    }

    check_partition(&ops, before.len(), after.len())?;

    Ok(ops)
}

/// Verify that an op list partitions both index spaces exactly.
///
/// A violation is a programming error in the alignment layer, so the whole
/// computation is aborted rather than letting an inconsistent result escape.
fn check_partition(ops: &[AlignmentOp], before_len: usize, after_len: usize) -> Result<()> {
    let mut before_pos = 0;
    let mut after_pos = 0;

    for op in ops {
        ensure!(
            op.before.start <= op.before.end && op.after.start <= op.after.end,
            "alignment op has an inverted range: {:?}",
            op
        );
        ensure!(
            op.before.start == before_pos && op.after.start == after_pos,
            "alignment ops are not contiguous: expected {}/{}, got {:?}",
            before_pos,
            after_pos,
            op
        );
        if op.kind == OpKind::Equal {
            ensure!(
                op.before.len() == op.after.len(),
                "equal op spans unequal lengths: {:?}",
                op
            );
        }
        before_pos = op.before.end;
        after_pos = op.after.end;
    }

    ensure!(
        before_pos == before_len && after_pos == after_len,
        "alignment ops do not cover both sequences: ended at {}/{}, lengths are {}/{}",
        before_pos,
        after_pos,
        before_len,
        after_len
    );

    Ok(())
}
