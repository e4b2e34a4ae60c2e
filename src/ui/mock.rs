//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures every call
//! for later assertion.

use super::{OutputMode, UserInterface};

/// Captures all UI interactions.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    failures: Vec<String>,
    errors: Vec<String>,
    skips: Vec<String>,
    hints: Vec<String>,
    headers: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn skips(&self) -> &[String] {
        &self.skips
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Check if any captured output contains `text`.
    pub fn has_output(&self, text: &str) -> bool {
        [
            &self.messages,
            &self.successes,
            &self.warnings,
            &self.failures,
            &self.errors,
            &self.skips,
            &self.hints,
        ]
        .iter()
        .any(|list| list.iter().any(|m| m.contains(text)))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn failure(&mut self, msg: &str) {
        self.failures.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn skipped(&mut self, msg: &str) {
        self.skips.push(msg.to_string());
    }

    fn hint(&mut self, hint: &str) {
        self.hints.push(hint.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }
}
