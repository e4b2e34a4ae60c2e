//! Terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for terminal usage (colored when stdout is a TTY)
//! - [`MockUI`] capturing output for tests
//!
//! # Example
//!
//! ```
//! use daktari::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.show_header("Checking environment");
//! ui.success("pnpm is installed");
//! assert_eq!(ui.successes(), &["pnpm is installed".to_string()]);
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, DaktariTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a plain message.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display a failed item.
    fn failure(&mut self, msg: &str);

    /// Display an error message. Shown in every output mode.
    fn error(&mut self, msg: &str);

    /// Display a skipped item.
    fn skipped(&mut self, msg: &str);

    /// Display an indented remediation hint.
    fn hint(&mut self, hint: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);
}
