//! Shell command execution and environment detection.

pub mod command;
pub mod platform;

pub use command::{
    execute, execute_check, CommandResult, CommandRunner, ShellRunner,
};
pub use platform::is_ci;
