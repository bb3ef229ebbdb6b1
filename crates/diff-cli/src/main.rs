use std::env;
use std::fs;
use std::process;

use anyhow::{Context, Result};

mod render;
mod tokenizer;

use render::TerminalPaint;
use tokenizer::Tokenizer;

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let (before_path, after_path) = match (args.next(), args.next()) {
        (Some(before), Some(after)) => (before, after),
        _ => {
            eprintln!("usage: tokdiff <before-file> <after-file> [--light]");
            process::exit(2);
        }
    };
    let light_mode = args.any(|arg| arg == "--light");

    let before_text = fs::read_to_string(&before_path)
        .with_context(|| format!("failed to read {}", before_path))?;
    let after_text = fs::read_to_string(&after_path)
        .with_context(|| format!("failed to read {}", after_path))?;

    let tokenizer = Tokenizer::new();
    let before = tokenizer.tokenize(&before_text);
    let after = tokenizer.tokenize(&after_text);

    let result = tokdiff::diff(&before, &after)?;

    let paint = if light_mode {
        TerminalPaint::light()
    } else {
        TerminalPaint::new()
    };

    println!("{}", "-".repeat(100));
    println!("{}", before_text);
    println!("{}", "-".repeat(50));
    println!("{}", after_text);
    println!("{}", "-".repeat(50));
    println!("{}", result);
    println!("{}", "-".repeat(50));
    print!("{}", result.render_with(&paint));
    println!("{}", "-".repeat(100));

    Ok(())
}
