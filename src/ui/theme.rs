//! Visual theme and styling.

use console::Style;

/// Daktari's visual theme.
#[derive(Debug, Clone)]
pub struct DaktariTheme {
    /// Passing checks (green).
    pub success: Style,
    /// Warnings (orange).
    pub warning: Style,
    /// Failing checks and errors (red bold).
    pub error: Style,
    /// Secondary text (dim).
    pub dim: Style,
    /// Header text (bold).
    pub highlight: Style,
    /// Header icon (cyan bold).
    pub header: Style,
    /// Remediation hints (cyan).
    pub hint: Style,
}

impl Default for DaktariTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl DaktariTheme {
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().cyan().bold(),
            hint: Style::new().cyan(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            hint: Style::new(),
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("○ {}", msg)))
    }

    /// Indent every line of a (possibly multi-line) hint under its check.
    pub fn format_hint(&self, hint: &str) -> String {
        hint.lines()
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("    {}", self.hint.apply_to(line))
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("✚"),
            self.highlight.apply_to(title)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
