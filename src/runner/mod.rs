//! Check execution orchestration.
//!
//! The runner orders checks so that every check runs after the checks it
//! depends on, evaluates each one exactly once, and skips a check whose
//! dependency did not pass.

pub mod dependency;
pub mod report;

use std::collections::HashMap;

use tracing::{debug, info};

use crate::check::{Check, CheckStatus, Os};
use crate::error::Result;

pub use dependency::{DependencyGraph, DependencyGraphBuilder};
pub use report::{CheckOutcome, CheckReport, RunReport};

/// Progress events emitted while checks run.
#[derive(Debug)]
pub enum RunProgress<'a> {
    /// A check is about to be evaluated.
    CheckStarting {
        name: &'a str,
        index: usize,
        total: usize,
    },
    /// A check finished (evaluated or skipped).
    CheckFinished { report: &'a CheckReport },
}

/// Evaluates a set of checks in dependency order.
pub struct CheckRunner {
    checks: Vec<Box<dyn Check>>,
    /// Indices into `checks`, in execution order.
    order: Vec<usize>,
    graph: DependencyGraph,
    os: Os,
}

impl std::fmt::Debug for CheckRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckRunner")
            .field("order", &self.run_order())
            .field("os", &self.os)
            .finish()
    }
}

impl CheckRunner {
    /// Build a runner for `checks`.
    ///
    /// Fails if the declared dependencies form a cycle.
    pub fn new(checks: Vec<Box<dyn Check>>) -> Result<Self> {
        let graph = checks
            .iter()
            .fold(DependencyGraph::builder(), |builder, check| {
                let deps = check.depends_on().iter().map(|d| d.to_string()).collect();
                builder.add_check(check.name(), deps)
            })
            .build()?;

        // Instances sharing a name run together, in declaration order.
        let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
        for (index, check) in checks.iter().enumerate() {
            by_name.entry(check.name()).or_default().push(index);
        }
        let order: Vec<usize> = graph
            .topological_order()
            .iter()
            .flat_map(|name| by_name.remove(name.as_str()).unwrap_or_default())
            .collect();

        debug!(
            "Check order: {:?}",
            order.iter().map(|&i| checks[i].name()).collect::<Vec<_>>()
        );

        Ok(Self {
            checks,
            order,
            graph,
            os: Os::current(),
        })
    }

    /// Select suggestions for `os` instead of the detected OS.
    pub fn with_os(mut self, os: Os) -> Self {
        self.os = os;
        self
    }

    pub fn os(&self) -> Os {
        self.os
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Check names in the order they will be evaluated.
    pub fn run_order(&self) -> Vec<&str> {
        self.order.iter().map(|&i| self.checks[i].name()).collect()
    }

    /// Evaluate every check.
    pub fn run(&self) -> RunReport {
        self.run_with_progress(|_| {})
    }

    /// Evaluate every check, reporting progress as each one starts and finishes.
    pub fn run_with_progress<F>(&self, mut on_progress: F) -> RunReport
    where
        F: FnMut(RunProgress<'_>),
    {
        let total = self.order.len();
        // A name counts as passed only when every instance with that name passed.
        let mut passed: HashMap<&str, bool> = HashMap::new();
        let mut entries = Vec::with_capacity(total);

        for (index, &check_index) in self.order.iter().enumerate() {
            let check = &self.checks[check_index];
            let name = check.name();

            on_progress(RunProgress::CheckStarting {
                name,
                index: index + 1,
                total,
            });

            let blocker = self
                .graph
                .dependencies_of(name)
                .unwrap_or_default()
                .iter()
                .find(|dep| !passed.get(dep.as_str()).copied().unwrap_or(false));

            let outcome = match blocker {
                Some(dep) => {
                    info!("Skipping '{}': dependency '{}' did not pass", name, dep);
                    CheckOutcome::Skipped {
                        blocked_by: dep.clone(),
                    }
                }
                None => {
                    let result = check.evaluate();
                    debug!("Check '{}' -> {:?}: {}", name, result.status, result.summary);
                    CheckOutcome::Evaluated(result)
                }
            };

            let ok = matches!(&outcome, CheckOutcome::Evaluated(r) if r.status == CheckStatus::Pass);
            let entry = passed.entry(name).or_insert(true);
            *entry = *entry && ok;

            let suggestion = if ok {
                None
            } else {
                check.suggestion_for(self.os).map(str::to_string)
            };

            let report = CheckReport {
                name: name.to_string(),
                outcome,
                suggestion,
            };
            on_progress(RunProgress::CheckFinished { report: &report });
            entries.push(report);
        }

        RunReport {
            os: Some(self.os),
            checks: entries,
        }
    }
}
