use anyhow::Result;
use tokdiff::{diff, ChangeKind, DiffEntry, Document, TokenizedLine};

fn line(tokens: &[&str]) -> TokenizedLine {
    tokens.iter().copied().collect()
}

fn main() -> Result<()> {
    // Two versions of a small function, pre-tokenized on word boundaries
    let before = Document::new(vec![
        line(&["fn", " ", "total", "(", "items", ")", " ", "{"]),
        line(&["    ", "let", " ", "mut", " ", "sum", " ", "=", " ", "0", ";"]),
        line(&["    ", "sum"]),
        line(&["}"]),
    ]);
    let after = Document::new(vec![
        line(&["fn", " ", "total", "(", "items", ")", " ", "{"]),
        line(&["    ", "let", " ", "mut", " ", "sum", " ", "=", " ", "1", ";"]),
        line(&["    ", "sum", " ", "*", " ", "2"]),
        line(&["}"]),
    ]);

    let result = diff(&before, &after)?;

    println!("Structured diff:");
    println!("{}", result);

    println!("\nEntry walk:");
    for entry in &result {
        match entry {
            DiffEntry::Line(l) => match l.kind {
                ChangeKind::Equal => println!(
                    "  line {} unchanged: {}",
                    l.before_line_no,
                    l.before_tokens.as_ref().unwrap().text()
                ),
                ChangeKind::Insert => println!(
                    "  inserted after line {}: {}",
                    l.before_line_no,
                    l.after_tokens.as_ref().unwrap().text()
                ),
                ChangeKind::Delete => println!(
                    "  deleted line {}: {}",
                    l.before_line_no,
                    l.before_tokens.as_ref().unwrap().text()
                ),
            },
            DiffEntry::Replaced(r) => {
                let changed: Vec<&str> = r
                    .before_token_diffs
                    .iter()
                    .filter(|d| d.kind == ChangeKind::Delete)
                    .filter_map(|d| d.before_token.as_deref())
                    .collect();
                println!(
                    "  line {} rewritten, changed tokens: {:?}",
                    r.before_line_no, changed
                );
            }
            DiffEntry::Bulk(b) => println!(
                "  block {}..{} replaced by {}..{}",
                b.before_line_start, b.before_line_end, b.after_line_start, b.after_line_end
            ),
        }
    }

    Ok(())
}
