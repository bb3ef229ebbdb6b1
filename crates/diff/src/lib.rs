// Two-level diff engine over tokenized text.
// Lines first, then tokens inside replaced line pairs of equal height.

mod aligner;
mod diff_entry;
mod line_differ;
mod token_replacer;

pub use aligner::{align, AlignmentOp, OpKind};
pub use diff_entry::{
    BulkReplace, ChangeKind, DiffEntry, DiffResult, Document, LineDiff, LineReplace, Paint, Token,
    TokenDiff, TokenizedLine,
};
pub use line_differ::diff;
