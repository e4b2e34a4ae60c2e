//! Configuration schema definitions for daktari.
//!
//! These structs map to the `.daktari.yml` file format.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::check::Os;

/// Root configuration structure for `.daktari.yml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DaktariConfig {
    /// Global settings
    pub settings: Settings,

    /// Checks to run, in declaration order
    pub checks: Vec<CheckConfig>,
}

/// Settings that apply to every check.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds before a probe command is killed and counted as failed
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout: u64,
}

fn default_probe_timeout() -> u64 {
    60
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            probe_timeout: default_probe_timeout(),
        }
    }
}

/// One check entry, tagged by its check name.
///
/// ```yaml
/// checks:
///   - check: pnpm.installed
///   - check: npmrc.scopeConfigured
///     scope: acme
///     registry: https://npm.pkg.github.com
///     require_auth_token: true
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "check")]
pub enum CheckConfig {
    #[serde(rename = "pnpm.installed")]
    PnpmInstalled,

    #[serde(rename = "npm.installed")]
    NpmInstalled,

    #[serde(rename = "node.installed")]
    NodeInstalled,

    /// Any binary that answers `<tool> --version`.
    #[serde(rename = "binary.installed")]
    BinaryInstalled {
        /// Check name, e.g. `docker.installed`
        name: String,
        /// Executable to probe
        tool: String,
        /// Install hints keyed by OS (`macos`, `ubuntu`, `windows`, `generic`)
        #[serde(default)]
        suggestions: BTreeMap<Os, String>,
    },

    #[serde(rename = "npmrc.scopeConfigured")]
    NpmrcScopeConfigured {
        /// Scope name without `@`
        scope: String,
        /// Registry URL the scope must resolve to
        registry: String,
        #[serde(default)]
        require_auth_token: bool,
        /// How to obtain a token, appended to the suggestion
        #[serde(default)]
        token_instructions: Option<String>,
    },

    #[serde(rename = "npmrc.githubTokenValid")]
    NpmrcGithubTokenValid {
        /// Scope name without `@`
        scope: String,
        /// A package in the scope the token should be able to read
        test_package: String,
    },
}

impl CheckConfig {
    /// The name the built check will report.
    pub fn check_name(&self) -> &str {
        match self {
            CheckConfig::PnpmInstalled => "pnpm.installed",
            CheckConfig::NpmInstalled => "npm.installed",
            CheckConfig::NodeInstalled => "node.installed",
            CheckConfig::BinaryInstalled { name, .. } => name.as_str(),
            CheckConfig::NpmrcScopeConfigured { .. } => "npmrc.scopeConfigured",
            CheckConfig::NpmrcGithubTokenValid { .. } => "npmrc.githubTokenValid",
        }
    }
}
