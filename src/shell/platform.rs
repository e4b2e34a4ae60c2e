//! Platform-specific environment detection.

/// Check if running in a CI environment.
///
/// Used to pick a non-interactive shell flag for probe commands. Checks
/// common CI environment variables:
/// `CI`, `GITHUB_ACTIONS`, `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    is_ci_with_env(|key| std::env::var(key).is_ok())
}

/// CI detection with a custom env var lookup (for testing).
pub fn is_ci_with_env<F>(is_set: F) -> bool
where
    F: Fn(&str) -> bool,
{
    ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS", "JENKINS_URL"]
        .iter()
        .any(|key| is_set(key))
}
