//! Concrete checks and their construction from configuration.
//!
//! # Modules
//!
//! - [`binary`] - `<tool> --version` presence probes
//! - [`npmrc`] - `~/.npmrc` scope routing and registry token checks

pub mod binary;
pub mod npmrc;

use std::sync::Arc;

use crate::check::{Check, Suggestions};
use crate::config::CheckConfig;
use crate::shell::CommandRunner;

pub use binary::BinaryInstalled;
pub use npmrc::{NpmrcGithubTokenValid, NpmrcScope, NpmrcScopeConfigured};

/// Build one check per config entry, in declaration order.
pub fn build_checks(
    configs: &[CheckConfig],
    runner: Arc<dyn CommandRunner>,
) -> Vec<Box<dyn Check>> {
    configs
        .iter()
        .map(|config| build_check(config, runner.clone()))
        .collect()
}

/// Build the check described by `config`.
pub fn build_check(config: &CheckConfig, runner: Arc<dyn CommandRunner>) -> Box<dyn Check> {
    match config {
        CheckConfig::PnpmInstalled => Box::new(BinaryInstalled::pnpm(runner)),
        CheckConfig::NpmInstalled => Box::new(BinaryInstalled::npm(runner)),
        CheckConfig::NodeInstalled => Box::new(BinaryInstalled::node(runner)),
        CheckConfig::BinaryInstalled {
            name,
            tool,
            suggestions,
        } => {
            let suggestions = suggestions
                .iter()
                .fold(Suggestions::new(), |acc, (os, text)| acc.with(*os, text.clone()));
            Box::new(BinaryInstalled::new(
                name.clone(),
                tool.clone(),
                suggestions,
                runner,
            ))
        }
        CheckConfig::NpmrcScopeConfigured {
            scope,
            registry,
            require_auth_token,
            token_instructions,
        } => {
            let scope = NpmrcScope {
                name: scope.clone(),
                registry: registry.clone(),
                require_auth_token: *require_auth_token,
            };
            Box::new(NpmrcScopeConfigured::new(
                scope,
                token_instructions.as_deref(),
            ))
        }
        CheckConfig::NpmrcGithubTokenValid {
            scope,
            test_package,
        } => Box::new(NpmrcGithubTokenValid::new(
            scope.clone(),
            test_package.clone(),
            runner,
        )),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use crate::shell::CommandRunner;

    /// Command runner that records every probe and answers with a fixed result.
    pub struct RecordingRunner {
        succeed: bool,
        calls: Mutex<Vec<String>>,
    }

    impl RecordingRunner {
        pub fn succeeding() -> Self {
            Self {
                succeed: true,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                succeed: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn can_run(&self, command: &str) -> bool {
            self.calls.lock().unwrap().push(command.to_string());
            self.succeed
        }
    }
}
