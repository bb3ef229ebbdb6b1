use colored::{Color, Colorize};
use tokdiff::Paint;

/// Terminal styling for diff output: inserts on green, deletes on red,
/// changed tokens of a replaced line on blue.
pub struct TerminalPaint {
    light_mode: bool,
}

impl TerminalPaint {
    pub fn new() -> Self {
        Self { light_mode: false }
    }

    /// White-on-color variant for light terminal themes
    pub fn light() -> Self {
        Self { light_mode: true }
    }

    /// Style each line separately so the background does not bleed across
    /// line breaks.
    fn styled(&self, text: &str, background: Color) -> String {
        let foreground = if self.light_mode {
            Color::White
        } else {
            Color::Black
        };

        text.split('\n')
            .map(|line| line.color(foreground).on_color(background).to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for TerminalPaint {
    fn default() -> Self {
        Self::new()
    }
}

impl Paint for TerminalPaint {
    fn plain(&self, text: &str) -> String {
        text.to_string()
    }

    fn inserted(&self, text: &str) -> String {
        self.styled(text, Color::Green)
    }

    fn deleted(&self, text: &str) -> String {
        self.styled(text, Color::Red)
    }

    fn replaced(&self, text: &str) -> String {
        self.styled(text, Color::Blue)
    }
}
