//! Check command implementation.
//!
//! The `daktari check` command evaluates every configured check and prints
//! the result with remediation hints, or the whole report as JSON.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::check::{Check, Os};
use crate::checks::build_checks;
use crate::cli::args::CheckArgs;
use crate::config::{CheckConfig, DaktariConfig};
use crate::error::{DaktariError, Result};
use crate::runner::{CheckOutcome, CheckRunner, RunProgress, RunReport};
use crate::shell::{CommandRunner, ShellRunner};
use crate::ui::{OutputMode, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::{load_project_config, EXIT_NO_CONFIG};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: CheckArgs,
}

impl CheckCommand {
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }

    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    /// Build the runner for `config`, probing commands through `runner`.
    pub fn build_runner(
        &self,
        config: &DaktariConfig,
        runner: Arc<dyn CommandRunner>,
    ) -> Result<CheckRunner> {
        let selected = select_checks(&config.checks, &self.args.only)?;
        let checks: Vec<Box<dyn Check>> = build_checks(&selected, runner);
        let os = self.args.os.unwrap_or_else(Os::current);
        Ok(CheckRunner::new(checks)?.with_os(os))
    }

    fn print_report(&self, ui: &mut dyn UserInterface, report: &RunReport) {
        let summary = format!(
            "{} passed, {} failed, {} skipped",
            report.passed(),
            report.failed(),
            report.skipped()
        );
        ui.message("");
        if report.is_success() {
            ui.success(&format!("All checks passed ({})", summary));
        } else {
            ui.warning(&summary);
        }
    }
}

/// Keep only the entries named in `only`, in declaration order.
///
/// An empty filter keeps everything. A name that matches nothing is an error.
pub fn select_checks(configs: &[CheckConfig], only: &[String]) -> Result<Vec<CheckConfig>> {
    if only.is_empty() {
        return Ok(configs.to_vec());
    }

    if let Some(missing) = only
        .iter()
        .find(|name| !configs.iter().any(|c| c.check_name() == name.as_str()))
    {
        return Err(DaktariError::UnknownCheck {
            name: missing.clone(),
        });
    }

    Ok(configs
        .iter()
        .filter(|c| only.iter().any(|name| name == c.check_name()))
        .cloned()
        .collect())
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) =
            load_project_config(&self.project_root, self.config_override.as_deref(), ui)?
        else {
            return Ok(CommandResult::failure(EXIT_NO_CONFIG));
        };

        let timeout = Duration::from_secs(config.settings.probe_timeout);
        let runner = self.build_runner(&config, Arc::new(ShellRunner::with_timeout(timeout)))?;

        let report = if self.args.json {
            let report = runner.run();
            let json = serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
            println!("{}", json);
            report
        } else {
            ui.show_header(&format!("Checking environment ({})", runner.os()));
            let mode = ui.output_mode();
            let report = runner.run_with_progress(|event| {
                let report = match event {
                    RunProgress::CheckStarting { name, index, total } => {
                        if mode == OutputMode::Verbose {
                            ui.message(&format!("[{}/{}] {}", index, total, name));
                        }
                        return;
                    }
                    RunProgress::CheckFinished { report } => report,
                };
                let label = |summary: &str| match mode {
                    OutputMode::Verbose => format!("{}: {}", report.name, summary),
                    _ => summary.to_string(),
                };
                match &report.outcome {
                    CheckOutcome::Evaluated(result) if result.is_pass() => {
                        if mode.shows_passing() {
                            ui.success(&label(result.summary.as_str()));
                        }
                    }
                    CheckOutcome::Evaluated(result) => {
                        ui.failure(&label(result.summary.as_str()))
                    }
                    CheckOutcome::Skipped { blocked_by } => ui.skipped(&format!(
                        "{} skipped: {} did not pass",
                        report.name, blocked_by
                    )),
                }
                if let Some(suggestion) = &report.suggestion {
                    ui.hint(suggestion);
                }
            });
            self.print_report(ui, &report);
            report
        };

        tracing::debug!(
            "Run finished: {} passed, {} failed, {} skipped",
            report.passed(),
            report.failed(),
            report.skipped()
        );

        if report.is_success() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(report.exit_code()))
        }
    }
}
