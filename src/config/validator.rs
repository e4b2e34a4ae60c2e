//! Configuration validation rules.
//!
//! Serde already rejects unknown check kinds and missing fields. This module
//! catches values that parse but can never work:
//! - Empty scope, package, tool or check names
//! - Registry URLs without a host (token lookups would silently never match)
//! - Identical check entries declared twice

use crate::checks::npmrc::registry_host;
use crate::config::schema::{CheckConfig, DaktariConfig};
use crate::error::{DaktariError, Result};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Index of the offending entry in `checks`
    pub index: usize,
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &DaktariConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (index, check) in config.checks.iter().enumerate() {
        for field in empty_fields(check) {
            errors.push(ValidationError {
                rule: "empty-field".to_string(),
                message: format!(
                    "Check #{} ({}) has an empty '{}'",
                    index + 1,
                    check.check_name(),
                    field
                ),
                index,
            });
        }

        if let CheckConfig::NpmrcScopeConfigured { registry, .. } = check {
            if !registry.is_empty() && registry_host(registry).is_empty() {
                errors.push(ValidationError {
                    rule: "invalid-registry".to_string(),
                    message: format!(
                        "Check #{} (npmrc.scopeConfigured) registry '{}' is not an absolute URL with a host",
                        index + 1,
                        registry
                    ),
                    index,
                });
            }
        }

        if config.checks[..index].contains(check) {
            errors.push(ValidationError {
                rule: "duplicate-check".to_string(),
                message: format!(
                    "Check #{} ({}) duplicates an earlier entry",
                    index + 1,
                    check.check_name()
                ),
                index,
            });
        }
    }

    errors
}

fn empty_fields(check: &CheckConfig) -> Vec<&'static str> {
    let fields: Vec<(&'static str, &str)> = match check {
        CheckConfig::PnpmInstalled | CheckConfig::NpmInstalled | CheckConfig::NodeInstalled => {
            vec![]
        }
        CheckConfig::BinaryInstalled { name, tool, .. } => {
            vec![("name", name.as_str()), ("tool", tool.as_str())]
        }
        CheckConfig::NpmrcScopeConfigured {
            scope, registry, ..
        } => vec![("scope", scope.as_str()), ("registry", registry.as_str())],
        CheckConfig::NpmrcGithubTokenValid {
            scope,
            test_package,
        } => vec![
            ("scope", scope.as_str()),
            ("test_package", test_package.as_str()),
        ],
    };

    fields
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
}

/// Validate configuration, folding every error into one `ConfigValidationError`.
pub fn validate(config: &DaktariConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(DaktariError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope_check(scope: &str, registry: &str) -> CheckConfig {
        CheckConfig::NpmrcScopeConfigured {
            scope: scope.to_string(),
            registry: registry.to_string(),
            require_auth_token: true,
            token_instructions: None,
        }
    }

    #[test]
    fn valid_config_has_no_errors() {
        let config = DaktariConfig {
            checks: vec![
                CheckConfig::PnpmInstalled,
                scope_check("acme", "https://npm.pkg.github.com"),
                CheckConfig::NpmrcGithubTokenValid {
                    scope: "acme".to_string(),
                    test_package: "ui".to_string(),
                },
            ],
            ..Default::default()
        };
        assert!(validate_config(&config).is_empty());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn rejects_host_less_registry() {
        let config = DaktariConfig {
            checks: vec![scope_check("acme", "npm.pkg.github.com")],
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "invalid-registry");
    }

    #[test]
    fn rejects_empty_fields() {
        let config = DaktariConfig {
            checks: vec![CheckConfig::NpmrcGithubTokenValid {
                scope: " ".to_string(),
                test_package: String::new(),
            }],
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.rule == "empty-field"));
        assert!(errors[1].message.contains("test_package"));
    }

    #[test]
    fn empty_registry_reported_once() {
        let config = DaktariConfig {
            checks: vec![scope_check("acme", "")],
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "empty-field");
    }

    #[test]
    fn rejects_duplicate_entries() {
        let config = DaktariConfig {
            checks: vec![CheckConfig::PnpmInstalled, CheckConfig::PnpmInstalled],
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "duplicate-check");
        assert_eq!(errors[0].index, 1);
    }

    #[test]
    fn same_check_for_two_scopes_is_fine() {
        let config = DaktariConfig {
            checks: vec![
                scope_check("acme", "https://npm.pkg.github.com"),
                scope_check("widgets", "https://npm.pkg.github.com"),
            ],
            ..Default::default()
        };
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn validate_joins_messages() {
        let config = DaktariConfig {
            checks: vec![scope_check("", "nope")],
            ..Default::default()
        };
        let err = validate(&config).unwrap_err();
        assert!(matches!(err, DaktariError::ConfigValidationError { .. }));
        assert!(err.to_string().contains("scope"));
        assert!(err.to_string().contains("nope"));
    }
}
