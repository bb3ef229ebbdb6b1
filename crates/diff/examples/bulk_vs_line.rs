use anyhow::Result;
use tokdiff::{diff, Document, TokenizedLine};

fn line(text: &str) -> TokenizedLine {
    TokenizedLine::new(vec![text.to_string()])
}

fn main() -> Result<()> {
    // A replaced block with matching line counts decomposes token by token.
    let before = Document::new(vec![line("alpha"), line("beta")]);
    let after = Document::new(vec![line("gamma"), line("delta")]);

    let result = diff(&before, &after)?;
    println!("2 lines replaced by 2 lines:");
    println!("{}", result);
    println!("contains_bulk_replace = {}", result.contains_bulk_replace());

    // With unequal counts there is no natural pairing, so the block is
    // reported as one opaque substitution instead.
    let after = Document::new(vec![line("gamma"), line("delta"), line("epsilon")]);

    let result = diff(&before, &after)?;
    println!("\n2 lines replaced by 3 lines:");
    println!("{}", result);
    println!("contains_bulk_replace = {}", result.contains_bulk_replace());

    Ok(())
}
