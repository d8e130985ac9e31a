//! Named terminal styles, resolved to ANSI escapes only when text is painted.

/// Visual role of a piece of terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Success,
    Error,
    ProgressFilled,
    ProgressEmpty,
}

impl Style {
    fn console_style(self) -> console::Style {
        let base = console::Style::new().force_styling(true);
        match self {
            Style::Success => base.green(),
            Style::Error => base.red(),
            Style::ProgressFilled => base.green(),
            Style::ProgressEmpty => base.red(),
        }
    }
}

/// Paint `text` in `style`. With `colored == false` the text is returned unchanged.
/// Empty text never produces escape sequences.
pub fn paint(style: Style, text: &str, colored: bool) -> String {
    if !colored || text.is_empty() {
        return text.to_string();
    }
    style.console_style().apply_to(text).to_string()
}

/// Whether stdout is a terminal that accepts color.
pub fn stdout_colored() -> bool {
    console::colors_enabled()
}

/// Whether stderr is a terminal that accepts color.
pub fn stderr_colored() -> bool {
    console::colors_enabled_stderr()
}
