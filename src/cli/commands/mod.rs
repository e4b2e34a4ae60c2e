//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`]. Commands that need the project configuration load
//! it through [`load_project_config`] so a missing `.daktari.yml` is
//! reported the same way everywhere.

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod list;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use std::path::Path;

use crate::config::{load_config, validate, DaktariConfig, CONFIG_FILE};
use crate::error::{DaktariError, Result};
use crate::ui::UserInterface;

/// Exit code when no configuration file can be found.
pub const EXIT_NO_CONFIG: i32 = 2;

/// Load and validate the project configuration.
///
/// Returns `Ok(None)` after reporting to the UI when no config file exists.
pub fn load_project_config(
    project_root: &Path,
    config_override: Option<&Path>,
    ui: &mut dyn UserInterface,
) -> Result<Option<DaktariConfig>> {
    let config = match load_config(project_root, config_override) {
        Ok(config) => config,
        Err(DaktariError::ConfigNotFound { path }) => {
            ui.error(&format!(
                "No configuration found at {}. Create a {} file listing the checks to run.",
                path.display(),
                CONFIG_FILE
            ));
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    validate(&config)?;
    Ok(Some(config))
}
