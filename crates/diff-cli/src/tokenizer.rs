use regex::Regex;
use tokdiff::{Document, TokenizedLine};

/// Whitespace-preserving tokenizer, sufficient for demonstration purposes.
///
/// Each line is split into runs of non-whitespace and single whitespace
/// characters, so concatenating a line's tokens reproduces the line exactly.
/// Adjacent whitespace characters become consecutive one-character tokens;
/// unlike a capturing split, no empty tokens appear between them.
/// Real source code wants a language-aware tokenizer; the engine accepts any
/// splitting that satisfies the reconstruction rule.
pub struct Tokenizer {
    pattern: Regex,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"\s|\S+").expect("token pattern is valid"),
        }
    }

    pub fn tokenize(&self, text: &str) -> Document {
        text.split('\n')
            .map(|line| self.tokenize_line(line))
            .collect()
    }

    fn tokenize_line(&self, line: &str) -> TokenizedLine {
        self.pattern
            .find_iter(line)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tokens_reconstruct_the_original_text() {
        let tokenizer = Tokenizer::new();
        let document = tokenizer.tokenize("fn main() {\n    let x = 1;\n}");

        for line in document.lines() {
            let text = line.text();
            assert_eq!(line.tokens().concat(), text);
        }
        assert_eq!(document.len(), 3);
    }

    #[test]
    fn whitespace_characters_are_individual_tokens() {
        let tokenizer = Tokenizer::new();
        let document = tokenizer.tokenize("a  b\tc");

        assert_eq!(
            document.lines()[0].tokens(),
            ["a", " ", " ", "b", "\t", "c"]
        );
    }

    #[test]
    fn empty_input_is_a_single_empty_line() {
        let tokenizer = Tokenizer::new();
        let document = tokenizer.tokenize("");

        assert_eq!(document.len(), 1);
        assert!(document.lines()[0].is_empty());
    }
}
