//! `~/.npmrc` scope and auth-token checks.
//!
//! The npmrc format is line oriented. Two kinds of line matter here:
//!
//! ```text
//! @acme:registry=https://npm.pkg.github.com
//! //npm.pkg.github.com/:_authToken=ghp_xxx
//! ```
//!
//! Every other line is ignored. The file is re-read on every evaluation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use url::Url;

use crate::check::{Check, CheckResult, Suggestions};
use crate::shell::CommandRunner;

/// Token value written by [`render_suggestion`]. Never counts as a real token.
pub const TOKEN_PLACEHOLDER: &str = "UPDATE_WITH_TOKEN";

/// A scope that must be routed to a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpmrcScope {
    /// Scope name without the leading `@`.
    pub name: String,
    /// Absolute registry URL the scope must resolve to.
    pub registry: String,
    /// Whether a non-placeholder auth token must exist for the registry host.
    pub require_auth_token: bool,
}

impl NpmrcScope {
    pub fn new(name: impl Into<String>, registry: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registry: registry.into(),
            require_auth_token: false,
        }
    }

    pub fn with_auth_token(mut self) -> Self {
        self.require_auth_token = true;
        self
    }

    /// The `@scope:registry=url` line this scope expects.
    pub fn registry_line(&self) -> String {
        format!("@{}:registry={}", self.name, self.registry)
    }
}

/// Why the npmrc file could not be read.
#[derive(Debug, Error)]
pub enum NpmrcError {
    #[error("{} does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read npmrc")]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How a scope's configuration stands against the file contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeState {
    Configured,
    RegistryMissing,
    TokenMissing { host: String, token: TokenProblem },
}

/// What the file holds in place of a usable token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenProblem {
    /// No token line for the host.
    Absent,
    /// `//host/:_authToken=` with nothing after it.
    Empty,
    /// The token is still [`TOKEN_PLACEHOLDER`].
    Placeholder,
}

impl TokenProblem {
    /// Classify the raw value of the first token line, if any.
    pub fn from_line(token: Option<&str>) -> Self {
        match token {
            None => Self::Absent,
            Some("") => Self::Empty,
            Some(_) => Self::Placeholder,
        }
    }

    fn describe(self, host: &str) -> String {
        match self {
            Self::Absent => format!("missing auth token for {}", host),
            Self::Empty => format!("auth token for {} is empty", host),
            Self::Placeholder => format!(
                "auth token for {} is still the {} placeholder",
                host, TOKEN_PLACEHOLDER
            ),
        }
    }
}

/// `~/.npmrc` in the user's home directory.
pub fn default_npmrc_path() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join(".npmrc")
}

/// Read the npmrc file as lines.
pub fn read_npmrc(path: &Path) -> Result<Vec<String>, NpmrcError> {
    if !path.exists() {
        return Err(NpmrcError::NotFound {
            path: path.to_path_buf(),
        });
    }

    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content.lines().map(str::to_string).collect()),
        Err(source) => {
            tracing::debug!("Error reading {}: {:?}", path.display(), source);
            Err(NpmrcError::ReadFailure {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Network location of a registry URL: host, plus `:port` when explicit.
///
/// Credentials in the URL are dropped, as is a port that is the scheme's
/// default. Returns an empty string when the URL can't be parsed or has no
/// host.
pub fn registry_host(registry_url: &str) -> String {
    let Ok(url) = Url::parse(registry_url) else {
        return String::new();
    };

    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}

fn auth_token_prefix(registry_url: &str) -> String {
    format!("//{}/:_authToken=", registry_host(registry_url))
}

/// Whether some line routes `scope` to its registry.
pub fn contains_scope_registry<S: AsRef<str>>(lines: &[S], scope: &NpmrcScope) -> bool {
    let expected = scope.registry_line();
    lines.iter().any(|line| line.as_ref().trim() == expected)
}

/// Whether a real (non-empty, non-placeholder) token exists for the registry host.
pub fn contains_auth_token<S: AsRef<str>>(lines: &[S], registry_url: &str) -> bool {
    let prefix = auth_token_prefix(registry_url);
    lines
        .iter()
        .filter_map(|line| line.as_ref().trim().strip_prefix(prefix.as_str()))
        .any(|token| !token.is_empty() && token != TOKEN_PLACEHOLDER)
}

/// Raw value of the first token line for the registry host, placeholder included.
pub fn token_for_registry<S: AsRef<str>>(lines: &[S], registry_url: &str) -> Option<String> {
    let prefix = auth_token_prefix(registry_url);
    lines
        .iter()
        .find_map(|line| line.as_ref().trim().strip_prefix(prefix.as_str()))
        .map(str::to_string)
}

/// Classify a scope against the file contents.
///
/// A missing registry line wins over a missing token.
pub fn scope_state<S: AsRef<str>>(lines: &[S], scope: &NpmrcScope) -> ScopeState {
    if !contains_scope_registry(lines, scope) {
        return ScopeState::RegistryMissing;
    }
    if scope.require_auth_token && !contains_auth_token(lines, &scope.registry) {
        // Every token line is empty or a placeholder; report the first one
        let token = token_for_registry(lines, &scope.registry);
        return ScopeState::TokenMissing {
            host: registry_host(&scope.registry),
            token: TokenProblem::from_line(token.as_deref()),
        };
    }
    ScopeState::Configured
}

pub fn scope_is_configured<S: AsRef<str>>(lines: &[S], scope: &NpmrcScope) -> bool {
    scope_state(lines, scope) == ScopeState::Configured
}

/// Lines a user should append to their npmrc for `scope`.
pub fn render_suggestion(scope: &NpmrcScope) -> String {
    let mut lines = vec![scope.registry_line()];
    if scope.require_auth_token {
        lines.push(format!(
            "{}{}",
            auth_token_prefix(&scope.registry),
            TOKEN_PLACEHOLDER
        ));
    }
    lines.join("\n")
}

/// Verifies a scope is routed to its registry (and optionally has a token).
pub struct NpmrcScopeConfigured {
    scope: NpmrcScope,
    path: PathBuf,
    suggestions: Suggestions,
}

impl NpmrcScopeConfigured {
    pub const NAME: &'static str = "npmrc.scopeConfigured";

    /// Check `scope` against `~/.npmrc`.
    ///
    /// `token_instructions` is appended to the suggestion after a blank line.
    pub fn new(scope: NpmrcScope, token_instructions: Option<&str>) -> Self {
        Self::with_path(scope, token_instructions, default_npmrc_path())
    }

    /// Check `scope` against the npmrc file at `path`.
    pub fn with_path(scope: NpmrcScope, token_instructions: Option<&str>, path: PathBuf) -> Self {
        let instructions = token_instructions
            .filter(|text| !text.is_empty())
            .map(|text| format!("\n\n{}", text))
            .unwrap_or_default();
        let suggestions = Suggestions::generic(format!(
            "Add the lines below to ~/.npmrc:\n\n{}{}",
            render_suggestion(&scope),
            instructions
        ));

        Self {
            scope,
            path,
            suggestions,
        }
    }

    pub fn scope(&self) -> &NpmrcScope {
        &self.scope
    }
}

impl Check for NpmrcScopeConfigured {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn suggestions(&self) -> &Suggestions {
        &self.suggestions
    }

    fn evaluate(&self) -> CheckResult {
        let lines = match read_npmrc(&self.path) {
            Ok(lines) => lines,
            Err(e) => return CheckResult::failed(e.to_string()),
        };

        let name = &self.scope.name;
        match scope_state(&lines, &self.scope) {
            ScopeState::Configured => {
                CheckResult::passed(format!("Scope {} configured in npmrc", name))
            }
            ScopeState::RegistryMissing => CheckResult::failed(format!(
                "Scope {} not configured in npmrc: missing registry entry",
                name
            )),
            ScopeState::TokenMissing { host, token } => CheckResult::failed(format!(
                "Scope {} not configured in npmrc: {}",
                name,
                token.describe(&host)
            )),
        }
    }
}

/// Verifies the configured token can actually read a package from the scope.
pub struct NpmrcGithubTokenValid {
    scope_name: String,
    test_package: String,
    runner: Arc<dyn CommandRunner>,
    suggestions: Suggestions,
}

impl NpmrcGithubTokenValid {
    pub const NAME: &'static str = "npmrc.githubTokenValid";

    pub fn new(
        scope_name: impl Into<String>,
        test_package: impl Into<String>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            scope_name: scope_name.into(),
            test_package: test_package.into(),
            runner,
            suggestions: Suggestions::generic(
                "Please check the token was copied correctly from GitHub. \
                 Ensure the token hasn't expired, or has been revoked. \
                 Also, ensure it has the correct permissions to read packages.",
            ),
        }
    }

    /// `@scope/package` as passed to `npm view`.
    pub fn package_spec(&self) -> String {
        format!("@{}/{}", self.scope_name, self.test_package)
    }
}

impl Check for NpmrcGithubTokenValid {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn depends_on(&self) -> &[&'static str] {
        &[NpmrcScopeConfigured::NAME]
    }

    fn suggestions(&self) -> &Suggestions {
        &self.suggestions
    }

    fn evaluate(&self) -> CheckResult {
        let package_spec = self.package_spec();
        let command = format!("npm view {} version", package_spec);
        tracing::debug!("Checking npm registry access with: {}", command);

        if self.runner.can_run(&command) {
            CheckResult::passed(format!(
                "GitHub npm token is valid (can access {})",
                package_spec
            ))
        } else {
            CheckResult::failed(format!(
                "GitHub npm token is not valid (cannot access {})",
                package_spec
            ))
        }
    }
}
