use anyhow::Result;

use crate::aligner::{self, AlignmentOp, OpKind};
use crate::diff_entry::{token_width, LineReplace, Token, TokenDiff, TokenizedLine};

/// Which line text a projection pass walks
#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Before,
    After,
}

/// Decompose one replaced line pair into column-annotated token diffs.
///
/// The token alignment is computed once and projected twice, once per side.
/// Each pass keeps its own pair of column cursors starting at 0; the cursor
/// for the opposite side is a scratch value that only keeps the four-field
/// [`TokenDiff`] shape consistent.
pub(crate) fn line_replace(
    before: &TokenizedLine,
    after: &TokenizedLine,
    before_line_no: usize,
    after_line_no: usize,
) -> Result<LineReplace> {
    let ops = aligner::align(before.tokens(), after.tokens())?;
    let kinds = reclassify(&ops, before.tokens());

    let before_token_diffs = project(&ops, &kinds, before.tokens(), Side::Before);
    let after_token_diffs = project(&ops, &kinds, after.tokens(), Side::After);

    Ok(LineReplace {
        before_token_diffs,
        after_token_diffs,
        before_line_no,
        after_line_no,
    })
}

/// Effective kind of each op after the whitespace-island rule.
///
/// Exact-match alignment often classifies a short whitespace run in the
/// interior of a genuinely different region as equal, which fragments what
/// should render as one contiguous changed span. An interior equal op whose
/// text is blank and whose two neighbors share a single non-equal kind takes
/// on the neighbors' kind.
fn reclassify(ops: &[AlignmentOp], before_tokens: &[Token]) -> Vec<OpKind> {
    let mut kinds: Vec<OpKind> = ops.iter().map(|op| op.kind).collect();

    for idx in 1..ops.len().saturating_sub(1) {
        if ops[idx].kind != OpKind::Equal {
            continue;
        }
        let prev = ops[idx - 1].kind;
        let next = ops[idx + 1].kind;
        if prev != next || prev == OpKind::Equal {
            continue;
        }
        // An equal op's before and after slices spell the same text, so
        // checking the before side is enough.
        let text: String = before_tokens[ops[idx].before.clone()].concat();
        if text.trim().is_empty() {
            kinds[idx] = prev;
        }
    }

    kinds
}

/// One linear projection pass over the op list.
///
/// Equal ops emit equal token diffs advancing both cursors; any other
/// effective kind emits delete (before pass) or insert (after pass) diffs
/// advancing only that side's cursor. Ops with an empty slice on the walked
/// side contribute nothing.
fn project(ops: &[AlignmentOp], kinds: &[OpKind], tokens: &[Token], side: Side) -> Vec<TokenDiff> {
    let mut diffs = Vec::new();
    let mut before_col = 0;
    let mut after_col = 0;

    for (op, &kind) in ops.iter().zip(kinds) {
        let range = match side {
            Side::Before => op.before.clone(),
            Side::After => op.after.clone(),
        };

        for token in &tokens[range] {
            match (kind, side) {
                (OpKind::Equal, _) => {
                    diffs.push(TokenDiff::equal(token.clone(), before_col, after_col));
                    before_col += token_width(token);
                    after_col += token_width(token);
                }
                (_, Side::Before) => {
                    diffs.push(TokenDiff::delete(token.clone(), before_col, after_col));
                    before_col += token_width(token);
                }
                (_, Side::After) => {
                    diffs.push(TokenDiff::insert(token.clone(), before_col, after_col));
                    after_col += token_width(token);
                }
            }
        }
    }

    diffs
}
