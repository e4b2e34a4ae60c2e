//! Configuration loading, parsing, and validation for daktari.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use daktari::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(
//!     temp.path().join(".daktari.yml"),
//!     "checks:\n  - check: pnpm.installed\n",
//! )
//! .unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.checks[0].check_name(), "pnpm.installed");
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{find_project_root, load_config, load_config_file, parse_config, CONFIG_FILE};
pub use schema::{CheckConfig, DaktariConfig, Settings};
pub use validator::{validate, validate_config, ValidationError};
