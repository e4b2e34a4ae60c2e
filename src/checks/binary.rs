//! Binary-presence checks.
//!
//! A binary counts as installed when `<tool> --version` exits successfully.

use std::sync::Arc;

use crate::check::{Check, CheckResult, Os, Suggestions};
use crate::shell::CommandRunner;

/// Passes when `<tool> --version` succeeds.
pub struct BinaryInstalled {
    name: String,
    tool: String,
    suggestions: Suggestions,
    runner: Arc<dyn CommandRunner>,
}

impl BinaryInstalled {
    pub fn new(
        name: impl Into<String>,
        tool: impl Into<String>,
        suggestions: Suggestions,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            name: name.into(),
            tool: tool.into(),
            suggestions,
            runner,
        }
    }

    /// `pnpm.installed`
    pub fn pnpm(runner: Arc<dyn CommandRunner>) -> Self {
        Self::new(
            "pnpm.installed",
            "pnpm",
            Suggestions::generic("npm install -g pnpm").with(Os::MacOs, "brew install pnpm"),
            runner,
        )
    }

    /// `npm.installed`
    pub fn npm(runner: Arc<dyn CommandRunner>) -> Self {
        Self::new(
            "npm.installed",
            "npm",
            Suggestions::generic("npm ships with Node.js: install it from https://nodejs.org")
                .with(Os::MacOs, "brew install node")
                .with(Os::Ubuntu, "sudo apt install npm"),
            runner,
        )
    }

    /// `node.installed`
    pub fn node(runner: Arc<dyn CommandRunner>) -> Self {
        Self::new(
            "node.installed",
            "node",
            Suggestions::generic("Install Node.js from https://nodejs.org")
                .with(Os::MacOs, "brew install node")
                .with(Os::Ubuntu, "sudo apt install nodejs"),
            runner,
        )
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }
}

impl Check for BinaryInstalled {
    fn name(&self) -> &str {
        &self.name
    }

    fn suggestions(&self) -> &Suggestions {
        &self.suggestions
    }

    fn evaluate(&self) -> CheckResult {
        let command = format!("{} --version", self.tool);
        if self.runner.can_run(&command) {
            CheckResult::passed(format!("{} is installed", self.tool))
        } else {
            CheckResult::failed(format!("{} is not installed", self.tool))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::CheckStatus;
    use crate::checks::testing::RecordingRunner;

    #[test]
    fn pnpm_installed_passes_when_probe_succeeds() {
        let runner = Arc::new(RecordingRunner::succeeding());
        let check = BinaryInstalled::pnpm(runner.clone());

        let result = check.evaluate();

        assert_eq!(result.status, CheckStatus::Pass);
        assert_eq!(runner.calls(), vec!["pnpm --version".to_string()]);
    }

    #[test]
    fn pnpm_installed_fails_when_probe_fails() {
        let runner = Arc::new(RecordingRunner::failing());
        let check = BinaryInstalled::pnpm(runner.clone());

        let result = check.evaluate();

        assert_eq!(result.status, CheckStatus::Fail);
        assert_eq!(result.summary, "pnpm is not installed");
        assert_eq!(runner.calls(), vec!["pnpm --version".to_string()]);
    }

    #[test]
    fn pnpm_suggestions_per_os() {
        let check = BinaryInstalled::pnpm(Arc::new(RecordingRunner::failing()));
        assert_eq!(check.name(), "pnpm.installed");
        assert_eq!(check.suggestion_for(Os::MacOs), Some("brew install pnpm"));
        assert_eq!(check.suggestion_for(Os::Ubuntu), Some("npm install -g pnpm"));
    }

    #[test]
    fn node_and_npm_presets_probe_their_tool() {
        let runner = Arc::new(RecordingRunner::succeeding());
        BinaryInstalled::node(runner.clone()).evaluate();
        BinaryInstalled::npm(runner.clone()).evaluate();
        assert_eq!(
            runner.calls(),
            vec!["node --version".to_string(), "npm --version".to_string()]
        );
    }

    #[test]
    fn custom_binary_check() {
        let runner = Arc::new(RecordingRunner::succeeding());
        let check = BinaryInstalled::new(
            "docker.installed",
            "docker",
            Suggestions::generic("Install Docker Desktop"),
            runner.clone(),
        );
        assert_eq!(check.tool(), "docker");
        assert_eq!(check.evaluate().summary, "docker is installed");
        assert_eq!(runner.calls(), vec!["docker --version".to_string()]);
    }
}
