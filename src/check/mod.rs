//! The check framework.
//!
//! A [`Check`] is a named, independently evaluable unit of environment
//! verification. It carries static metadata (its name and the names of the
//! checks it depends on) so a runner can order checks before evaluating any
//! of them, and an OS-keyed map of remediation [`Suggestions`].
//!
//! # Modules
//!
//! - [`os`] - Closed enumeration of operating systems and detection
//! - [`result`] - `CheckResult` and `CheckStatus`
//! - [`suggestions`] - OS-keyed remediation text with generic fallback
//!
//! # Example
//!
//! ```
//! use daktari::check::{Check, CheckResult, Os, Suggestions};
//!
//! struct AlwaysPasses {
//!     suggestions: Suggestions,
//! }
//!
//! impl Check for AlwaysPasses {
//!     fn name(&self) -> &str {
//!         "demo.alwaysPasses"
//!     }
//!
//!     fn suggestions(&self) -> &Suggestions {
//!         &self.suggestions
//!     }
//!
//!     fn evaluate(&self) -> CheckResult {
//!         CheckResult::passed("all good")
//!     }
//! }
//!
//! let check = AlwaysPasses { suggestions: Suggestions::generic("nothing to do") };
//! assert!(check.evaluate().is_pass());
//! assert_eq!(check.suggestion_for(Os::MacOs), Some("nothing to do"));
//! ```

pub mod os;
pub mod result;
pub mod suggestions;

pub use os::Os;
pub use result::{CheckResult, CheckStatus};
pub use suggestions::Suggestions;

/// A unit of environment verification.
///
/// Implementations must not panic or propagate errors out of
/// [`evaluate`](Check::evaluate): every internal failure becomes a failing
/// [`CheckResult`]. Evaluation re-reads live system state on every call.
pub trait Check {
    /// Stable, dot-namespaced identifier (e.g. `npmrc.scopeConfigured`).
    fn name(&self) -> &str;

    /// Names of checks that must be evaluated before this one.
    fn depends_on(&self) -> &[&'static str] {
        &[]
    }

    /// Remediation text keyed by operating system.
    fn suggestions(&self) -> &Suggestions;

    /// Inspect the machine and report the outcome.
    fn evaluate(&self) -> CheckResult;

    /// Remediation text for `os`, falling back to the generic suggestion.
    fn suggestion_for(&self, os: Os) -> Option<&str> {
        self.suggestions().for_os(os)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        suggestions: Suggestions,
        pass: bool,
    }

    impl Check for Fixed {
        fn name(&self) -> &str {
            "test.fixed"
        }

        fn suggestions(&self) -> &Suggestions {
            &self.suggestions
        }

        fn evaluate(&self) -> CheckResult {
            if self.pass {
                CheckResult::passed("ok")
            } else {
                CheckResult::failed("not ok")
            }
        }
    }

    #[test]
    fn default_depends_on_is_empty() {
        let check = Fixed {
            suggestions: Suggestions::new(),
            pass: true,
        };
        assert!(check.depends_on().is_empty());
    }

    #[test]
    fn suggestion_for_uses_fallback() {
        let check = Fixed {
            suggestions: Suggestions::generic("generic fix").with(Os::Windows, "windows fix"),
            pass: false,
        };
        assert_eq!(check.suggestion_for(Os::Windows), Some("windows fix"));
        assert_eq!(check.suggestion_for(Os::Ubuntu), Some("generic fix"));
    }

    #[test]
    fn evaluation_is_repeatable() {
        let check = Fixed {
            suggestions: Suggestions::new(),
            pass: false,
        };
        assert_eq!(check.evaluate(), check.evaluate());
    }
}
