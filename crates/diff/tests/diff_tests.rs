use pretty_assertions::assert_eq;
use tokdiff::{diff, ChangeKind, DiffEntry, Document, TokenizedLine};

fn line(tokens: &[&str]) -> TokenizedLine {
    tokens.iter().copied().collect()
}

fn doc(lines: &[&[&str]]) -> Document {
    lines.iter().map(|tokens| line(tokens)).collect()
}

#[test]
fn empty_documents_produce_an_empty_result() {
    let result = diff(&Document::default(), &Document::default()).unwrap();

    assert!(result.is_empty());
    assert!(!result.contains_bulk_replace());
}

#[test]
fn identical_documents_produce_only_equal_lines() {
    let document = doc(&[&["fn", " ", "main"], &["{"], &["}"]]);

    let result = diff(&document, &document).unwrap();

    assert_eq!(result.len(), 3);
    assert!(!result.contains_bulk_replace());
    for (index, entry) in result.iter().enumerate() {
        match entry {
            DiffEntry::Line(line) => {
                assert_eq!(line.kind, ChangeKind::Equal);
                assert_eq!(line.before_line_no, index);
                assert_eq!(line.after_line_no, index);
                assert_eq!(line.before_tokens, line.after_tokens);
            }
            other => panic!("expected an equal line, got {:?}", other),
        }
    }
}

#[test]
fn equal_lines_round_trip_their_text() {
    let before = doc(&[&["foo", " ", "bar"], &["baz"]]);
    let after = doc(&[&["foo ba", "r"], &["baz"]]);

    // Line equality is by reconstructed text, so differently tokenized but
    // textually identical lines still pair up as equal.
    let result = diff(&before, &after).unwrap();

    for entry in &result {
        match entry {
            DiffEntry::Line(line) => {
                assert_eq!(line.kind, ChangeKind::Equal);
                assert_eq!(
                    line.before_tokens.as_ref().unwrap().text(),
                    line.after_tokens.as_ref().unwrap().text()
                );
            }
            other => panic!("expected an equal line, got {:?}", other),
        }
    }
}

#[test]
fn inserting_into_an_empty_document_anchors_every_line_at_zero() {
    let after = doc(&[&["a"], &["b"], &["c"]]);

    let result = diff(&Document::default(), &after).unwrap();

    assert_eq!(result.len(), 3);
    for (index, entry) in result.iter().enumerate() {
        match entry {
            DiffEntry::Line(line) => {
                assert_eq!(line.kind, ChangeKind::Insert);
                assert_eq!(line.before_tokens, None);
                assert_eq!(line.before_line_no, 0);
                assert_eq!(line.after_line_no, index);
            }
            other => panic!("expected an inserted line, got {:?}", other),
        }
    }
}

#[test]
fn deleting_everything_anchors_every_line_at_zero() {
    let before = doc(&[&["a"], &["b"]]);

    let result = diff(&before, &Document::default()).unwrap();

    assert_eq!(result.len(), 2);
    for (index, entry) in result.iter().enumerate() {
        match entry {
            DiffEntry::Line(line) => {
                assert_eq!(line.kind, ChangeKind::Delete);
                assert_eq!(line.after_tokens, None);
                assert_eq!(line.before_line_no, index);
                assert_eq!(line.after_line_no, 0);
            }
            other => panic!("expected a deleted line, got {:?}", other),
        }
    }
}

#[test]
fn inserted_run_repeats_the_before_anchor() {
    let before = doc(&[&["a"], &["b"]]);
    let after = doc(&[&["a"], &["x"], &["y"], &["b"]]);

    let result = diff(&before, &after).unwrap();

    let inserts: Vec<_> = result
        .iter()
        .filter_map(|entry| match entry {
            DiffEntry::Line(line) if line.kind == ChangeKind::Insert => Some(line),
            _ => None,
        })
        .collect();

    assert_eq!(inserts.len(), 2);
    // Both inserted lines point at the boundary between "a" and "b".
    assert_eq!(inserts[0].before_line_no, 1);
    assert_eq!(inserts[1].before_line_no, 1);
    assert_eq!(inserts[0].after_line_no, 1);
    assert_eq!(inserts[1].after_line_no, 2);
}

#[test]
fn deleted_run_repeats_the_after_anchor() {
    let before = doc(&[&["a"], &["x"], &["y"], &["b"]]);
    let after = doc(&[&["a"], &["b"]]);

    let result = diff(&before, &after).unwrap();

    let deletes: Vec<_> = result
        .iter()
        .filter_map(|entry| match entry {
            DiffEntry::Line(line) if line.kind == ChangeKind::Delete => Some(line),
            _ => None,
        })
        .collect();

    assert_eq!(deletes.len(), 2);
    assert_eq!(deletes[0].before_line_no, 1);
    assert_eq!(deletes[1].before_line_no, 2);
    assert_eq!(deletes[0].after_line_no, 1);
    assert_eq!(deletes[1].after_line_no, 1);
}

#[test]
fn unequal_replaced_line_counts_become_one_bulk_replace() {
    let before = doc(&[&["common"], &["old", " ", "one"], &["old", " ", "two"]]);
    let after = doc(&[
        &["common"],
        &["new", " ", "one"],
        &["new", " ", "two"],
        &["new", " ", "three"],
    ]);

    let result = diff(&before, &after).unwrap();

    assert!(result.contains_bulk_replace());
    let bulks: Vec<_> = result
        .iter()
        .filter_map(|entry| match entry {
            DiffEntry::Bulk(bulk) => Some(bulk),
            _ => None,
        })
        .collect();

    assert_eq!(bulks.len(), 1);
    let bulk = bulks[0];
    assert_eq!(bulk.before_lines.len(), 2);
    assert_eq!(bulk.after_lines.len(), 3);
    assert_eq!(bulk.before_line_start, 1);
    assert_eq!(bulk.before_line_end, 3);
    assert_eq!(bulk.after_line_start, 1);
    assert_eq!(bulk.after_line_end, 4);
}

#[test]
fn equal_replaced_line_counts_become_line_replaces() {
    let before = doc(&[&["common"], &["old", " ", "one"], &["old", " ", "two"]]);
    let after = doc(&[&["common"], &["new", " ", "one"], &["new", " ", "two"]]);

    let result = diff(&before, &after).unwrap();

    assert!(!result.contains_bulk_replace());
    let replaces: Vec<_> = result
        .iter()
        .filter_map(|entry| match entry {
            DiffEntry::Replaced(replace) => Some(replace),
            _ => None,
        })
        .collect();

    assert_eq!(replaces.len(), 2);
    assert_eq!(replaces[0].before_line_no, 1);
    assert_eq!(replaces[0].after_line_no, 1);
    assert_eq!(replaces[1].before_line_no, 2);
    assert_eq!(replaces[1].after_line_no, 2);
}

#[test]
fn entries_come_back_in_document_order() {
    let before = doc(&[&["keep"], &["drop"], &["alpha"], &["tail"]]);
    let after = doc(&[&["keep"], &["beta"], &["tail"], &["extra"]]);

    let result = diff(&before, &after).unwrap();

    let kinds: Vec<&str> = result
        .iter()
        .map(|entry| match entry {
            DiffEntry::Line(line) => match line.kind {
                ChangeKind::Equal => "equal",
                ChangeKind::Insert => "insert",
                ChangeKind::Delete => "delete",
            },
            DiffEntry::Bulk(_) => "bulk",
            DiffEntry::Replaced(_) => "replace",
        })
        .collect();

    // "drop"/"alpha" vs "beta" is a 2:1 replacement, then "tail" matches and
    // "extra" is appended.
    assert_eq!(kinds, vec!["equal", "bulk", "equal", "insert"]);
    assert!(result.contains_bulk_replace());
}

#[test]
fn documents_with_interleaved_rewrites_diff_cleanly() {
    let before = doc(&[&["b"], &["b"], &["d"]]);
    let after = doc(&[&["d"], &["a"], &["c"], &["a"], &["d"]]);

    let result = diff(&before, &after).unwrap();

    // Every line of both documents is accounted for by some entry.
    let mut before_seen = 0;
    let mut after_seen = 0;
    for entry in &result {
        match entry {
            DiffEntry::Line(line) => match line.kind {
                ChangeKind::Equal => {
                    before_seen += 1;
                    after_seen += 1;
                }
                ChangeKind::Insert => after_seen += 1,
                ChangeKind::Delete => before_seen += 1,
            },
            DiffEntry::Replaced(_) => {
                before_seen += 1;
                after_seen += 1;
            }
            DiffEntry::Bulk(bulk) => {
                before_seen += bulk.before_lines.len();
                after_seen += bulk.after_lines.len();
            }
        }
    }
    assert_eq!(before_seen, before.len());
    assert_eq!(after_seen, after.len());
}

#[test]
fn display_renders_one_block_per_entry() {
    let before = doc(&[&["a"]]);
    let after = doc(&[&["b"]]);

    let result = diff(&before, &after).unwrap();

    let expected = "\
[line_replace]
    [before: 0]
        [(delete, \"a\", -, 0:1, 0:0)]
    [after: 0]
        [(insert, -, \"b\", 0:0, 0:1)]";
    assert_eq!(result.to_string(), expected);
}
