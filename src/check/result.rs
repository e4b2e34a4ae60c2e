//! Check outcome types.
//!
//! Every evaluation produces exactly one `CheckResult`. Results are created
//! through [`CheckResult::passed`] and [`CheckResult::failed`] and never
//! mutated afterwards.

use serde::Serialize;

/// Pass/fail status of a single check evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
}

/// The outcome of evaluating one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Whether the check passed.
    pub status: CheckStatus,
    /// One-line, human-readable explanation.
    pub summary: String,
}

impl CheckResult {
    /// A passing result.
    pub fn passed(summary: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Pass,
            summary: summary.into(),
        }
    }

    /// A failing result.
    pub fn failed(summary: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Fail,
            summary: summary.into(),
        }
    }

    pub fn is_pass(&self) -> bool {
        self.status == CheckStatus::Pass
    }
}
