//! Daktari - Development environment diagnostics.
//!
//! Daktari runs a project's declared checks against the developer's machine
//! (is `pnpm` installed, is the `@acme` npm scope routed to the right
//! registry with a token, does that token actually work) and prints an
//! OS-specific fix for every check that fails.
//!
//! # Modules
//!
//! - [`check`] - The `Check` trait, results, OS detection and suggestions
//! - [`checks`] - Concrete checks (`npmrc.*`, `*.installed`)
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `.daktari.yml` loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`runner`] - Dependency ordering and check execution
//! - [`shell`] - Shell command execution
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use daktari::checks::npmrc::{scope_state, NpmrcScope, ScopeState, TokenProblem};
//!
//! let scope = NpmrcScope::new("acme", "https://npm.pkg.github.com").with_auth_token();
//! let lines = ["@acme:registry=https://npm.pkg.github.com"];
//!
//! assert_eq!(
//!     scope_state(&lines, &scope),
//!     ScopeState::TokenMissing {
//!         host: "npm.pkg.github.com".to_string(),
//!         token: TokenProblem::Absent,
//!     }
//! );
//! ```

pub mod check;
pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod shell;
pub mod ui;

pub use error::{DaktariError, Result};
