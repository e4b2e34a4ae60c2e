//! List command implementation.
//!
//! The `daktari list` command prints the configured checks in the order
//! `daktari check` would evaluate them, without probing anything.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::checks::build_checks;
use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::runner::CheckRunner;
use crate::shell::ShellRunner;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::{load_project_config, EXIT_NO_CONFIG};

/// The list command implementation.
pub struct ListCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: ListArgs,
}

impl ListCommand {
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: ListArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) =
            load_project_config(&self.project_root, self.config_override.as_deref(), ui)?
        else {
            return Ok(CommandResult::failure(EXIT_NO_CONFIG));
        };

        // Nothing is evaluated, so the runner is never asked to probe.
        let checks = build_checks(&config.checks, Arc::new(ShellRunner::new()));
        let runner = CheckRunner::new(checks)?;

        if runner.run_order().is_empty() {
            ui.message("No checks configured.");
            return Ok(CommandResult::success());
        }

        for (index, name) in runner.run_order().into_iter().enumerate() {
            ui.message(&format!("{:>3}. {}", index + 1, name));
            if self.args.dependencies {
                let deps = runner.graph().dependencies_of(name).unwrap_or_default();
                if !deps.is_empty() {
                    ui.message(&format!("       depends on: {}", deps.join(", ")));
                }
            }
        }

        Ok(CommandResult::success())
    }
}
