//! Run report types.

use serde::Serialize;

use crate::check::{CheckResult, CheckStatus, Os};

/// What happened to one check during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum CheckOutcome {
    /// The check ran and produced a result.
    Evaluated(CheckResult),
    /// The check did not run because a dependency failed or was skipped.
    Skipped { blocked_by: String },
}

impl CheckOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, CheckOutcome::Evaluated(result) if result.status == CheckStatus::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, CheckOutcome::Evaluated(result) if result.status == CheckStatus::Fail)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, CheckOutcome::Skipped { .. })
    }
}

/// Report entry for one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Check name
    pub name: String,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
    /// Remediation text for the current OS; only set when the check didn't pass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Aggregated outcome of a run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// OS used to select suggestions
    pub os: Option<Os>,
    pub checks: Vec<CheckReport>,
}

impl RunReport {
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.outcome.is_pass()).count()
    }

    pub fn failed(&self) -> usize {
        self.checks.iter().filter(|c| c.outcome.is_fail()).count()
    }

    pub fn skipped(&self) -> usize {
        self.checks.iter().filter(|c| c.outcome.is_skipped()).count()
    }

    /// True when every check ran and passed.
    pub fn is_success(&self) -> bool {
        self.passed() == self.checks.len()
    }

    /// Process exit code for this report.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    pub fn get(&self, name: &str) -> Option<&CheckReport> {
        self.checks.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, outcome: CheckOutcome) -> CheckReport {
        CheckReport {
            name: name.to_string(),
            outcome,
            suggestion: None,
        }
    }

    #[test]
    fn counts_by_outcome() {
        let report = RunReport {
            os: Some(Os::MacOs),
            checks: vec![
                entry("a", CheckOutcome::Evaluated(CheckResult::passed("ok"))),
                entry("b", CheckOutcome::Evaluated(CheckResult::failed("no"))),
                entry(
                    "c",
                    CheckOutcome::Skipped {
                        blocked_by: "b".to_string(),
                    },
                ),
            ],
        };

        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped(), 1);
        assert!(!report.is_success());
        assert_eq!(report.exit_code(), 1);
        assert!(report.get("c").unwrap().outcome.is_skipped());
    }

    #[test]
    fn empty_report_is_success() {
        let report = RunReport::default();
        assert!(report.is_success());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn serializes_flat_entries() {
        let report = RunReport {
            os: Some(Os::Ubuntu),
            checks: vec![
                CheckReport {
                    name: "pnpm.installed".to_string(),
                    outcome: CheckOutcome::Evaluated(CheckResult::failed(
                        "pnpm is not installed",
                    )),
                    suggestion: Some("npm install -g pnpm".to_string()),
                },
                entry(
                    "npmrc.githubTokenValid",
                    CheckOutcome::Skipped {
                        blocked_by: "npmrc.scopeConfigured".to_string(),
                    },
                ),
            ],
        };

        insta::assert_json_snapshot!(report, @r#"
        {
          "os": "ubuntu",
          "checks": [
            {
              "name": "pnpm.installed",
              "outcome": "evaluated",
              "status": "fail",
              "summary": "pnpm is not installed",
              "suggestion": "npm install -g pnpm"
            },
            {
              "name": "npmrc.githubTokenValid",
              "outcome": "skipped",
              "blocked_by": "npmrc.scopeConfigured"
            }
          ]
        }
        "#);
    }
}
