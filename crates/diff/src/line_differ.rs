use anyhow::Result;
use rayon::prelude::*;

use crate::aligner::{self, OpKind};
use crate::diff_entry::{BulkReplace, DiffEntry, DiffResult, Document, LineDiff};
use crate::token_replacer;

/// Compute the two-level diff between two tokenized documents.
///
/// Lines are aligned by their reconstructed text. Within a replaced span,
/// equal line counts on the two sides yield one [`crate::LineReplace`] per
/// line pair, decomposed at token granularity; unequal counts yield a single
/// opaque [`BulkReplace`] block, since no natural 1:1 pairing exists.
///
/// Entries come back in document order. Two empty documents produce an
/// empty result.
pub fn diff(before: &Document, after: &Document) -> Result<DiffResult> {
    let before_texts = before.line_texts();
    let after_texts = after.line_texts();
    let ops = aligner::align(&before_texts, &after_texts)?;

    let mut entries = Vec::new();
    let mut contains_bulk_replace = false;

    for op in &ops {
        match op.kind {
            OpKind::Equal => {
                for offset in 0..op.before.len() {
                    let line = after.lines()[op.after.start + offset].clone();
                    entries.push(DiffEntry::Line(LineDiff::equal(
                        line,
                        op.before.start + offset,
                        op.after.start + offset,
                    )));
                }
            }
            OpKind::Insert => {
                // No before-side lines are consumed, so every inserted line
                // reports the op's before boundary as its anchor.
                for offset in 0..op.after.len() {
                    let line = after.lines()[op.after.start + offset].clone();
                    entries.push(DiffEntry::Line(LineDiff::insert(
                        line,
                        op.before.start,
                        op.after.start + offset,
                    )));
                }
            }
            OpKind::Delete => {
                for offset in 0..op.before.len() {
                    let line = before.lines()[op.before.start + offset].clone();
                    entries.push(DiffEntry::Line(LineDiff::delete(
                        line,
                        op.before.start + offset,
                        op.after.start,
                    )));
                }
            }
            OpKind::Replace => {
                if op.before.len() != op.after.len() {
                    let before_lines = before.lines()[op.before.clone()].to_vec();
                    let after_lines = after.lines()[op.after.clone()].to_vec();
                    entries.push(DiffEntry::Bulk(BulkReplace::new(
                        before_lines,
                        after_lines,
                        op.before.start,
                        op.after.start,
                    )));
                    contains_bulk_replace = true;
                } else {
                    // Line pairs are independent; align their tokens in
                    // parallel and reassemble in document order.
                    let replaced = (0..op.before.len())
                        .into_par_iter()
                        .map(|offset| {
                            token_replacer::line_replace(
                                &before.lines()[op.before.start + offset],
                                &after.lines()[op.after.start + offset],
                                op.before.start + offset,
                                op.after.start + offset,
                            )
                        })
                        .collect::<Result<Vec<_>>>()?;
                    entries.extend(replaced.into_iter().map(DiffEntry::Replaced));
                }
            }
        }
    }

    Ok(DiffResult::new(entries, contains_bulk_replace))
}
