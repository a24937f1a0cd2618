// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Validation of contract dependency declarations.
//!
//! A contract that waits on another contract is only ever released once that
//! contract has succeeded. If the name it waits on does not exist, or the
//! waits form a loop, the contract can never run. Both conditions are
//! detected up front so a misconfigured VM fails fast instead of emitting
//! `Waiting` events forever.
//!
//! # Validation Pipeline
//!
//! 1. **Uniqueness**: contract names are unique
//! 2. **References**: every `depends_on` names a registered contract
//! 3. **Cycles**: the dependency graph is acyclic (skipped if 1 or 2 failed)
//!
//! Errors from the first two stages are accumulated so every problem is
//! reported at once.
//!
//! # Examples
//!
//! ```rust
//! use structure_vm::config::validate_contract_graph;
//! use structure_vm::errors::ValidationError;
//!
//! let contracts = [("reward", None), ("audit", Some("reward"))];
//! assert!(validate_contract_graph(contracts).is_ok());
//!
//! let contracts = [("audit", Some("missing"))];
//! let errors = validate_contract_graph(contracts).unwrap_err();
//! assert!(matches!(
//!     &errors[0],
//!     ValidationError::InvalidDependencyReference { missing_dependency, .. } if missing_dependency == "missing"
//! ));
//! ```

use std::collections::{HashMap, HashSet};

use crate::errors::ValidationError;
use crate::observability::messages::validation::{
    CyclicDependencyDetected, DuplicateContractName, InvalidDependencyReference,
};
use crate::observability::messages::StructuredLog;

/// Validate `(name, depends_on)` pairs in registration order.
///
/// # Returns
///
/// * `Ok(())` - every dependency resolves and none loop
/// * `Err(Vec<ValidationError>)` - all problems found
pub fn validate_contract_graph<'a, I>(contracts: I) -> Result<(), Vec<ValidationError>>
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let contracts: Vec<(&str, Option<&str>)> = contracts.into_iter().collect();
    let mut errors = Vec::new();

    if let Err(duplicate_errors) = validate_unique_names(&contracts) {
        errors.extend(duplicate_errors);
    }

    if let Err(unresolved_errors) = validate_dependency_references(&contracts) {
        errors.extend(unresolved_errors);
    }

    // Cycle detection needs a graph where every edge resolves to one node
    if errors.is_empty() {
        if let Err(cycle_errors) = validate_acyclic_graph(&contracts) {
            errors.extend(cycle_errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_unique_names(contracts: &[(&str, Option<&str>)]) -> Result<(), Vec<ValidationError>> {
    let mut seen = HashSet::new();
    let mut errors = Vec::new();

    for (name, _) in contracts {
        if !seen.insert(*name) {
            DuplicateContractName { contract: name }.log();
            errors.push(ValidationError::DuplicateContractName {
                contract: name.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_dependency_references(
    contracts: &[(&str, Option<&str>)],
) -> Result<(), Vec<ValidationError>> {
    let names: HashSet<&str> = contracts.iter().map(|(name, _)| *name).collect();
    let mut errors = Vec::new();

    for (name, dependency) in contracts {
        if let Some(dependency) = dependency {
            if !names.contains(dependency) {
                InvalidDependencyReference {
                    contract: name,
                    missing_dependency: dependency,
                }
                .log();
                errors.push(ValidationError::InvalidDependencyReference {
                    contract: name.to_string(),
                    missing_dependency: dependency.to_string(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// DFS with a recursion stack ("three colors"): reaching a node that is still
/// on the stack closes a cycle, and the stack segment from that node onwards
/// is the cycle path.
fn validate_acyclic_graph(contracts: &[(&str, Option<&str>)]) -> Result<(), Vec<ValidationError>> {
    // dependency -> dependents, in registration order
    let mut graph: HashMap<&str, Vec<&str>> = HashMap::new();
    for (name, _) in contracts {
        graph.insert(name, Vec::new());
    }
    for (name, dependency) in contracts {
        if let Some(dependency) = dependency {
            if let Some(dependents) = graph.get_mut(dependency) {
                dependents.push(name);
            }
        }
    }

    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    for (name, _) in contracts {
        if !visited.contains(name) {
            if let Some(cycle) =
                dfs_cycle_detection(name, &graph, &mut visited, &mut rec_stack, &mut path)
            {
                let cycle_refs: Vec<&str> = cycle.iter().map(String::as_str).collect();
                CyclicDependencyDetected { cycle: &cycle_refs }.log();
                return Err(vec![ValidationError::CyclicDependency { cycle }]);
            }
        }
    }

    Ok(())
}

fn dfs_cycle_detection<'a>(
    node: &'a str,
    graph: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    rec_stack: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    visited.insert(node);
    rec_stack.insert(node);
    path.push(node);

    if let Some(neighbors) = graph.get(node) {
        for &neighbor in neighbors {
            if !visited.contains(neighbor) {
                if let Some(cycle) = dfs_cycle_detection(neighbor, graph, visited, rec_stack, path) {
                    return Some(cycle);
                }
            } else if rec_stack.contains(neighbor) {
                let cycle_start = path.iter().position(|n| *n == neighbor).unwrap_or(0);
                let mut cycle: Vec<String> = path[cycle_start..].iter().map(|n| n.to_string()).collect();
                cycle.push(neighbor.to_string());
                return Some(cycle);
            }
        }
    }

    rec_stack.remove(node);
    path.pop();
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_empty_set() {
        let contracts: [(&str, Option<&str>); 0] = [];
        assert!(validate_contract_graph(contracts).is_ok());
    }

    #[test]
    fn test_valid_chain() {
        let contracts = [("a", None), ("b", Some("a")), ("c", Some("b"))];
        assert!(validate_contract_graph(contracts).is_ok());
    }

    #[test]
    fn test_forward_reference_is_valid() {
        // dependencies may be registered after their dependents
        let contracts = [("audit", Some("reward")), ("reward", None)];
        assert!(validate_contract_graph(contracts).is_ok());
    }

    #[test]
    fn test_duplicate_names() {
        let contracts = [("a", None), ("a", None)];
        let errors = validate_contract_graph(contracts).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateContractName {
                contract: "a".to_string()
            }]
        );
    }

    #[test]
    fn test_unresolved_references_are_all_reported() {
        let contracts = [("a", Some("x")), ("b", Some("y"))];
        let errors = validate_contract_graph(contracts).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[1].to_string(),
            "Contract 'b' depends on 'y' which does not exist"
        );
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let contracts = [("a", Some("a"))];
        let errors = validate_contract_graph(contracts).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::CyclicDependency {
                cycle: vec!["a".to_string(), "a".to_string()]
            }]
        );
    }

    #[test]
    fn test_mutual_wait_is_a_cycle() {
        let contracts = [("a", Some("c")), ("b", Some("a")), ("c", Some("b"))];
        let errors = validate_contract_graph(contracts).unwrap_err();
        match &errors[0] {
            ValidationError::CyclicDependency { cycle } => {
                assert_eq!(cycle.len(), 4);
                assert_eq!(cycle.first(), cycle.last());
            }
            other => panic!("expected a cycle, got {:?}", other),
        }
        assert!(errors[0].to_string().starts_with("Cyclic dependency detected: "));
    }

    #[test]
    fn test_cycle_detection_skipped_when_references_fail() {
        let contracts = [("a", Some("a")), ("b", Some("missing"))];
        let errors = validate_contract_graph(contracts).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ValidationError::InvalidDependencyReference { .. }
        ));
    }
}
