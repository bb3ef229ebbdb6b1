use std::fmt;
use std::ops::Range;

use derive_more::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An atomic text fragment produced by an external tokenizer
pub type Token = String;

/// Column width of a token.
///
/// Columns count Unicode scalar values, not bytes, so multi-byte tokens
/// occupy one column per character.
pub(crate) fn token_width(token: &str) -> usize {
    token.chars().count()
}

/// An ordered sequence of tokens representing one line.
///
/// Concatenating the tokens in order must reconstruct the exact original
/// line text, whitespace included. The engine relies on this for equality
/// comparisons and column arithmetic, but has no opinion on how the line
/// was split.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenizedLine {
    tokens: Vec<Token>,
}

impl TokenizedLine {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// The tokens of this line, in order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Reconstruct the exact original line text
    pub fn text(&self) -> String {
        self.tokens.concat()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl From<Vec<Token>> for TokenizedLine {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl<S: Into<Token>> FromIterator<S> for TokenizedLine {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// An ordered sequence of tokenized lines, indexed from 0
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Document {
    lines: Vec<TokenizedLine>,
}

impl Document {
    pub fn new(lines: Vec<TokenizedLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[TokenizedLine] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&TokenizedLine> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Reconstructed text of every line, the comparison key for line-level
    /// alignment
    pub(crate) fn line_texts(&self) -> Vec<String> {
        self.lines.iter().map(TokenizedLine::text).collect()
    }
}

impl From<Vec<TokenizedLine>> for Document {
    fn from(lines: Vec<TokenizedLine>) -> Self {
        Self::new(lines)
    }
}

impl FromIterator<TokenizedLine> for Document {
    fn from_iter<I: IntoIterator<Item = TokenizedLine>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Classification of a line- or token-granularity entry.
///
/// Replaced spans never reach this level: at line granularity they become
/// [`BulkReplace`] or [`LineReplace`] entries, and at token granularity the
/// replaced span is projected into per-side inserts and deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChangeKind {
    #[display(fmt = "equal")]
    Equal,

    #[display(fmt = "insert")]
    Insert,

    #[display(fmt = "delete")]
    Delete,
}

/// A single token inside a [`LineReplace`], annotated with half-open column
/// ranges in both line texts.
///
/// The column end is start plus the token's width when the token exists on
/// that side; an absent side carries a zero-width range marking the edit
/// point.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenDiff {
    pub kind: ChangeKind,
    pub before_token: Option<Token>,
    pub after_token: Option<Token>,
    pub before_cols: Range<usize>,
    pub after_cols: Range<usize>,
}

impl TokenDiff {
    pub fn equal(token: Token, before_col: usize, after_col: usize) -> Self {
        let width = token_width(&token);
        Self {
            kind: ChangeKind::Equal,
            before_token: Some(token.clone()),
            after_token: Some(token),
            before_cols: before_col..before_col + width,
            after_cols: after_col..after_col + width,
        }
    }

    pub fn insert(token: Token, before_col: usize, after_col: usize) -> Self {
        let width = token_width(&token);
        Self {
            kind: ChangeKind::Insert,
            before_token: None,
            after_token: Some(token),
            before_cols: before_col..before_col,
            after_cols: after_col..after_col + width,
        }
    }

    pub fn delete(token: Token, before_col: usize, after_col: usize) -> Self {
        let width = token_width(&token);
        Self {
            kind: ChangeKind::Delete,
            before_token: Some(token),
            after_token: None,
            before_cols: before_col..before_col + width,
            after_cols: after_col..after_col,
        }
    }
}

impl fmt::Display for TokenDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn side(token: &Option<Token>) -> String {
            match token {
                Some(token) => format!("{:?}", token),
                None => "-".to_string(),
            }
        }

        write!(
            f,
            "({}, {}, {}, {}:{}, {}:{})",
            self.kind,
            side(&self.before_token),
            side(&self.after_token),
            self.before_cols.start,
            self.before_cols.end,
            self.after_cols.start,
            self.after_cols.end
        )
    }
}

/// A retained, inserted, or deleted line.
///
/// For an inserted line, `before_line_no` is the anchor index in the before
/// document where the insertion occurs; every line of one insertion run
/// repeats the same anchor, since no before-side lines are consumed. The
/// symmetric rule holds for `after_line_no` of a deleted line. This is an
/// intentional positional convention; downstream consumers use it to locate
/// the insertion point.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineDiff {
    pub kind: ChangeKind,
    pub before_tokens: Option<TokenizedLine>,
    pub after_tokens: Option<TokenizedLine>,
    pub before_line_no: usize,
    pub after_line_no: usize,
}

impl LineDiff {
    pub fn equal(line: TokenizedLine, before_line_no: usize, after_line_no: usize) -> Self {
        Self {
            kind: ChangeKind::Equal,
            before_tokens: Some(line.clone()),
            after_tokens: Some(line),
            before_line_no,
            after_line_no,
        }
    }

    pub fn insert(line: TokenizedLine, before_line_no: usize, after_line_no: usize) -> Self {
        Self {
            kind: ChangeKind::Insert,
            before_tokens: None,
            after_tokens: Some(line),
            before_line_no,
            after_line_no,
        }
    }

    pub fn delete(line: TokenizedLine, before_line_no: usize, after_line_no: usize) -> Self {
        Self {
            kind: ChangeKind::Delete,
            before_tokens: Some(line),
            after_tokens: None,
            before_line_no,
            after_line_no,
        }
    }
}

impl fmt::Display for LineDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn side(tokens: &Option<TokenizedLine>) -> String {
            match tokens {
                Some(line) => line.text(),
                None => "-".to_string(),
            }
        }

        writeln!(f, "[{}]", self.kind)?;
        writeln!(f, "    [before: {}]", self.before_line_no)?;
        writeln!(f, "        {}", side(&self.before_tokens))?;
        writeln!(f, "    [after: {}]", self.after_line_no)?;
        write!(f, "        {}", side(&self.after_tokens))
    }
}

/// An opaque multi-line substitution, used when a replaced span has unequal
/// line counts on the two sides.
///
/// With unequal counts there is no natural 1:1 line pairing, so any per-line
/// decomposition would be arbitrary; the block is reported whole instead.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BulkReplace {
    pub before_lines: Vec<TokenizedLine>,
    pub after_lines: Vec<TokenizedLine>,
    pub before_line_start: usize,
    pub before_line_end: usize,
    pub after_line_start: usize,
    pub after_line_end: usize,
}

impl BulkReplace {
    pub fn new(
        before_lines: Vec<TokenizedLine>,
        after_lines: Vec<TokenizedLine>,
        before_line_start: usize,
        after_line_start: usize,
    ) -> Self {
        let before_line_end = before_line_start + before_lines.len();
        let after_line_end = after_line_start + after_lines.len();
        Self {
            before_lines,
            after_lines,
            before_line_start,
            before_line_end,
            after_line_start,
            after_line_end,
        }
    }
}

impl fmt::Display for BulkReplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn block(lines: &[TokenizedLine]) -> String {
            lines
                .iter()
                .map(TokenizedLine::text)
                .collect::<Vec<_>>()
                .join("\n        ")
        }

        writeln!(f, "[bulk_replace]")?;
        writeln!(
            f,
            "    [before: {}:{}]",
            self.before_line_start, self.before_line_end
        )?;
        writeln!(f, "        {}", block(&self.before_lines))?;
        writeln!(
            f,
            "    [after: {}:{}]",
            self.after_line_start, self.after_line_end
        )?;
        write!(f, "        {}", block(&self.after_lines))
    }
}

/// A replaced line pair decomposed at token granularity.
///
/// `before_token_diffs` covers every token of the before line and
/// `after_token_diffs` every token of the after line; the two projections
/// come from one shared token alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineReplace {
    pub before_token_diffs: Vec<TokenDiff>,
    pub after_token_diffs: Vec<TokenDiff>,
    pub before_line_no: usize,
    pub after_line_no: usize,
}

impl fmt::Display for LineReplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn row(diffs: &[TokenDiff]) -> String {
            let parts: Vec<String> = diffs.iter().map(|diff| diff.to_string()).collect();
            format!("[{}]", parts.join(", "))
        }

        writeln!(f, "[line_replace]")?;
        writeln!(f, "    [before: {}]", self.before_line_no)?;
        writeln!(f, "        {}", row(&self.before_token_diffs))?;
        writeln!(f, "    [after: {}]", self.after_line_no)?;
        write!(f, "        {}", row(&self.after_token_diffs))
    }
}

/// One entry of a [`DiffResult`].
///
/// A closed sum type, so a rendering collaborator dispatches by exhaustive
/// match; a variant it cannot handle is a compile error instead of a
/// silently skipped entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiffEntry {
    /// A retained, inserted, or deleted line
    Line(LineDiff),

    /// An opaque block substitution (unequal replaced line counts)
    Bulk(BulkReplace),

    /// A token-decomposed replaced line pair (equal replaced line counts)
    Replaced(LineReplace),
}

impl fmt::Display for DiffEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffEntry::Line(line) => line.fmt(f),
            DiffEntry::Bulk(bulk) => bulk.fmt(f),
            DiffEntry::Replaced(replace) => replace.fmt(f),
        }
    }
}

/// Styling primitives a rendering collaborator must provide.
///
/// The engine classifies text into these four buckets; what each bucket
/// looks like is entirely the collaborator's business.
pub trait Paint {
    /// Unchanged text
    fn plain(&self, text: &str) -> String;

    /// Text present only in the after document
    fn inserted(&self, text: &str) -> String;

    /// Text present only in the before document
    fn deleted(&self, text: &str) -> String;

    /// The changed tokens of a token-decomposed replacement
    fn replaced(&self, text: &str) -> String;
}

/// The ordered collection of diff entries for one document pair.
///
/// Entries appear in document order. The result is immutable once built;
/// the engine retains nothing after returning it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffResult {
    entries: Vec<DiffEntry>,
    contains_bulk_replace: bool,
}

impl DiffResult {
    pub(crate) fn new(entries: Vec<DiffEntry>, contains_bulk_replace: bool) -> Self {
        Self {
            entries,
            contains_bulk_replace,
        }
    }

    /// The diff entries, in document order
    pub fn entries(&self) -> &[DiffEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiffEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True iff at least one [`BulkReplace`] entry was produced
    pub fn contains_bulk_replace(&self) -> bool {
        self.contains_bulk_replace
    }

    /// Project every entry onto the four style buckets of a [`Paint`]
    /// implementation, one styled block per entry.
    ///
    /// A bulk replace renders its before block as deleted and its after
    /// block as inserted. A token-decomposed replacement renders both lines,
    /// tinting the line in the side's insert/delete style and the changed
    /// tokens in the replace style.
    pub fn render_with(&self, paint: &dyn Paint) -> String {
        let mut out = String::new();

        for entry in &self.entries {
            match entry {
                DiffEntry::Line(line) => {
                    let styled = match line.kind {
                        ChangeKind::Insert => paint.inserted(&text_of(&line.after_tokens)),
                        ChangeKind::Delete => paint.deleted(&text_of(&line.before_tokens)),
                        ChangeKind::Equal => paint.plain(&text_of(&line.before_tokens)),
                    };
                    out.push_str(&styled);
                    out.push('\n');
                }
                DiffEntry::Bulk(bulk) => {
                    out.push_str(&paint.deleted(&join_lines(&bulk.before_lines)));
                    out.push('\n');
                    out.push_str(&paint.inserted(&join_lines(&bulk.after_lines)));
                    out.push('\n');
                }
                DiffEntry::Replaced(replace) => {
                    for diff in &replace.before_token_diffs {
                        let token = diff.before_token.as_deref().unwrap_or_default();
                        let styled = match diff.kind {
                            ChangeKind::Delete => paint.replaced(token),
                            _ => paint.deleted(token),
                        };
                        out.push_str(&styled);
                    }
                    out.push('\n');
                    for diff in &replace.after_token_diffs {
                        let token = diff.after_token.as_deref().unwrap_or_default();
                        let styled = match diff.kind {
                            ChangeKind::Insert => paint.replaced(token),
                            _ => paint.inserted(token),
                        };
                        out.push_str(&styled);
                    }
                    out.push('\n');
                }
            }
        }

        out
    }
}

impl fmt::Display for DiffResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let blocks: Vec<String> = self.entries.iter().map(|entry| entry.to_string()).collect();
        write!(f, "{}", blocks.join("\n"))
    }
}

impl<'a> IntoIterator for &'a DiffResult {
    type Item = &'a DiffEntry;
    type IntoIter = std::slice::Iter<'a, DiffEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn text_of(tokens: &Option<TokenizedLine>) -> String {
    tokens.as_ref().map(TokenizedLine::text).unwrap_or_default()
}

fn join_lines(lines: &[TokenizedLine]) -> String {
    lines
        .iter()
        .map(TokenizedLine::text)
        .collect::<Vec<_>>()
        .join("\n")
}
