//! Dependency graph for check execution ordering.
//!
//! Nodes are check names. Several check instances may share a name (one
//! `npmrc.scopeConfigured` per scope); they collapse into a single node.
//! Ordering is deterministic: ties are broken by declaration order.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::{DaktariError, Result};

/// Represents the dependency relationships between checks.
///
/// A built graph is always acyclic.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Map of check name to its direct dependencies.
    dependencies: HashMap<String, Vec<String>>,
    /// Map of check name to checks that depend on it.
    dependents: HashMap<String, Vec<String>>,
    /// All check names, in declaration order.
    checks: Vec<String>,
}

impl DependencyGraph {
    /// Create a new dependency graph builder.
    pub fn builder() -> DependencyGraphBuilder {
        DependencyGraphBuilder::new()
    }

    /// Get the direct dependencies of a check.
    pub fn dependencies_of(&self, check: &str) -> Option<&[String]> {
        self.dependencies.get(check).map(Vec::as_slice)
    }

    /// Returns checks in topological order (dependencies before dependents).
    pub fn topological_order(&self) -> Vec<String> {
        let mut in_degree: HashMap<&str, usize> = self
            .checks
            .iter()
            .map(|c| (c.as_str(), self.dependencies[c].len()))
            .collect();

        // Start with checks that have no dependencies
        let mut queue: VecDeque<&str> = self
            .checks
            .iter()
            .map(String::as_str)
            .filter(|c| in_degree[c] == 0)
            .collect();

        let mut result = Vec::with_capacity(self.checks.len());

        while let Some(check) = queue.pop_front() {
            result.push(check.to_string());

            for dependent in &self.dependents[check] {
                if let Some(degree) = in_degree.get_mut(dependent.as_str()) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(dependent);
                    }
                }
            }
        }

        result
    }

    /// Find a cycle in the graph, returning the path if one exists.
    fn find_cycle(
        dependencies: &HashMap<String, Vec<String>>,
        checks: &[String],
    ) -> Option<Vec<String>> {
        #[derive(Clone, Copy, PartialEq)]
        enum State {
            Unvisited,
            Visiting,
            Visited,
        }

        fn dfs<'a>(
            node: &'a str,
            dependencies: &'a HashMap<String, Vec<String>>,
            state: &mut HashMap<&'a str, State>,
            path: &mut Vec<&'a str>,
        ) -> Option<Vec<String>> {
            state.insert(node, State::Visiting);
            path.push(node);

            for dep in dependencies.get(node).into_iter().flatten() {
                match state.get(dep.as_str()) {
                    Some(State::Visiting) => {
                        let start = path
                            .iter()
                            .position(|s| *s == dep.as_str())
                            .unwrap_or(0);
                        let mut cycle: Vec<String> =
                            path[start..].iter().map(|s| s.to_string()).collect();
                        cycle.push(dep.clone());
                        return Some(cycle);
                    }
                    Some(State::Unvisited) | None => {
                        if let Some(cycle) = dfs(dep, dependencies, state, path) {
                            return Some(cycle);
                        }
                    }
                    Some(State::Visited) => {}
                }
            }

            path.pop();
            state.insert(node, State::Visited);
            None
        }

        let mut state: HashMap<&str, State> = checks
            .iter()
            .map(|s| (s.as_str(), State::Unvisited))
            .collect();
        let mut path = Vec::new();

        for check in checks {
            if state.get(check.as_str()) == Some(&State::Unvisited) {
                if let Some(cycle) = dfs(check, dependencies, &mut state, &mut path) {
                    return Some(cycle);
                }
            }
        }

        None
    }
}

/// Builder for constructing a DependencyGraph.
#[derive(Debug, Default)]
pub struct DependencyGraphBuilder {
    dependencies: HashMap<String, Vec<String>>,
    checks: Vec<String>,
}

impl DependencyGraphBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a check with its dependencies.
    ///
    /// Adding the same name again merges the dependency lists.
    pub fn add_check(mut self, name: impl Into<String>, depends_on: Vec<String>) -> Self {
        let name = name.into();
        if !self.dependencies.contains_key(&name) {
            self.checks.push(name.clone());
        }
        let deps = self.dependencies.entry(name).or_default();
        for dep in depends_on {
            if !deps.contains(&dep) {
                deps.push(dep);
            }
        }
        self
    }

    /// Build the dependency graph.
    ///
    /// Dependencies on checks that aren't part of the graph are dropped:
    /// they only express ordering, and a run may legitimately leave the
    /// dependency out. Returns an error if the remaining edges form a cycle.
    pub fn build(mut self) -> Result<DependencyGraph> {
        let known: HashSet<String> = self.checks.iter().cloned().collect();

        for (check, deps) in self.dependencies.iter_mut() {
            deps.retain(|dep| {
                let present = known.contains(dep);
                if !present {
                    tracing::debug!(
                        "Ignoring dependency of '{}' on '{}': not part of this run",
                        check,
                        dep
                    );
                }
                present
            });
        }

        if let Some(cycle) = DependencyGraph::find_cycle(&self.dependencies, &self.checks) {
            return Err(DaktariError::CircularDependency {
                cycle: cycle.join(" -> "),
            });
        }

        // Build dependents map (reverse lookup), in declaration order
        let mut dependents: HashMap<String, Vec<String>> = self
            .checks
            .iter()
            .map(|c| (c.clone(), Vec::new()))
            .collect();
        for check in &self.checks {
            for dep in &self.dependencies[check] {
                if let Some(list) = dependents.get_mut(dep) {
                    list.push(check.clone());
                }
            }
        }

        Ok(DependencyGraph {
            dependencies: self.dependencies,
            dependents,
            checks: self.checks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(order: &[String], name: &str) -> usize {
        order.iter().position(|s| s == name).unwrap()
    }

    #[test]
    fn builder_creates_empty_graph() {
        let graph = DependencyGraph::builder().build().unwrap();
        assert!(graph.topological_order().is_empty());
    }

    #[test]
    fn builder_adds_check_with_dependencies() {
        let graph = DependencyGraph::builder()
            .add_check("npmrc.scopeConfigured", vec![])
            .add_check(
                "npmrc.githubTokenValid",
                vec!["npmrc.scopeConfigured".to_string()],
            )
            .build()
            .unwrap();

        assert!(graph
            .dependencies_of("npmrc.scopeConfigured")
            .unwrap()
            .is_empty());
        assert_eq!(
            graph.dependencies_of("npmrc.githubTokenValid").unwrap(),
            &["npmrc.scopeConfigured".to_string()]
        );
    }

    #[test]
    fn repeated_names_collapse() {
        let graph = DependencyGraph::builder()
            .add_check("npmrc.scopeConfigured", vec![])
            .add_check("npmrc.scopeConfigured", vec![])
            .build()
            .unwrap();
        assert_eq!(graph.topological_order(), vec!["npmrc.scopeConfigured"]);
    }

    #[test]
    fn unknown_dependency_is_dropped() {
        let graph = DependencyGraph::builder()
            .add_check("npmrc.githubTokenValid", vec!["npmrc.scopeConfigured".to_string()])
            .build()
            .unwrap();

        assert!(graph.dependencies_of("npmrc.githubTokenValid").unwrap().is_empty());
        assert_eq!(graph.topological_order(), vec!["npmrc.githubTokenValid"]);
    }

    #[test]
    fn topo_sort_puts_dependency_first_even_if_declared_later() {
        let graph = DependencyGraph::builder()
            .add_check("b", vec!["a".to_string()])
            .add_check("a", vec![])
            .build()
            .unwrap();

        assert_eq!(graph.topological_order(), vec!["a", "b"]);
    }

    #[test]
    fn topo_sort_keeps_declaration_order_for_independent_checks() {
        let graph = DependencyGraph::builder()
            .add_check("zeta", vec![])
            .add_check("alpha", vec![])
            .add_check("mid", vec![])
            .build()
            .unwrap();

        assert_eq!(graph.topological_order(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn topo_sort_diamond_dependency() {
        let graph = DependencyGraph::builder()
            .add_check("a", vec![])
            .add_check("b", vec!["a".to_string()])
            .add_check("c", vec!["a".to_string()])
            .add_check("d", vec!["b".to_string(), "c".to_string()])
            .build()
            .unwrap();

        let order = graph.topological_order();

        assert!(position(&order, "a") < position(&order, "b"));
        assert!(position(&order, "a") < position(&order, "c"));
        assert!(position(&order, "b") < position(&order, "d"));
        assert!(position(&order, "c") < position(&order, "d"));
    }

    #[test]
    fn build_rejects_simple_cycle() {
        let result = DependencyGraph::builder()
            .add_check("a", vec!["b".to_string()])
            .add_check("b", vec!["a".to_string()])
            .build();

        match result {
            Err(DaktariError::CircularDependency { cycle }) => {
                assert!(cycle.contains("a"));
                assert!(cycle.contains("b"));
            }
            other => panic!(
                "Expected CircularDependency, got {:?}",
                other.map(|g| g.topological_order())
            ),
        }
    }

    #[test]
    fn build_rejects_self_cycle() {
        let result = DependencyGraph::builder()
            .add_check("a", vec!["a".to_string()])
            .build();
        assert!(matches!(result, Err(DaktariError::CircularDependency { .. })));
    }

    #[test]
    fn build_rejects_longer_cycle() {
        let result = DependencyGraph::builder()
            .add_check("a", vec!["c".to_string()])
            .add_check("b", vec!["a".to_string()])
            .add_check("c", vec!["b".to_string()])
            .build();

        let Err(DaktariError::CircularDependency { cycle }) = result else {
            panic!("Expected CircularDependency");
        };
        assert_eq!(cycle, "a -> c -> b -> a");
    }
}
