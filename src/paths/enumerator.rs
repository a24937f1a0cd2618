// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;

use crate::config::consts::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_PATHS};
use crate::errors::{PathLimit, PathLimitExceeded};
use crate::paths::Path;
use crate::unit::UnitStore;

/// How paths are cut out of the DAG.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathMode {
    /// Every root-anchored simple path, including every prefix
    #[default]
    Recursive,
    /// One `[parent, child]` path per reference edge
    AdjacentPairs,
}

/// Resource bounds for enumeration. `None` disables a bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PathLimits {
    #[serde(default = "default_max_paths")]
    pub max_paths: Option<usize>,
    #[serde(default = "default_max_depth")]
    pub max_depth: Option<usize>,
}

fn default_max_paths() -> Option<usize> {
    Some(DEFAULT_MAX_PATHS)
}

fn default_max_depth() -> Option<usize> {
    Some(DEFAULT_MAX_DEPTH)
}

impl PathLimits {
    pub fn unbounded() -> Self {
        Self {
            max_paths: None,
            max_depth: None,
        }
    }
}

impl Default for PathLimits {
    fn default() -> Self {
        Self {
            max_paths: default_max_paths(),
            max_depth: default_max_depth(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct EnumerationOptions {
    #[serde(default)]
    pub mode: PathMode,
    #[serde(default)]
    pub limits: PathLimits,
}

/// Enumerate the contract-matching surface of `store`.
///
/// In [`PathMode::Recursive`] mode, roots are visited in insertion order and
/// each root is expanded depth-first, children in insertion order, emitting
/// the current path before descending. The walk keeps an explicit stack of
/// `(unit, next child cursor)` frames over arena indices instead of recursing,
/// and a per-branch on-path marker stops a unit from appearing twice in one
/// path.
///
/// # Errors
///
/// Returns [`PathLimitExceeded`] as soon as the path count would exceed
/// `max_paths` or a path would grow beyond `max_depth` units.
///
/// # Examples
///
/// ```
/// use structure_vm::paths::{enumerate_paths, EnumerationOptions};
/// use structure_vm::unit::{StructureUnit, UnitStore};
///
/// let mut store = UnitStore::new();
/// let a = store.insert(StructureUnit::new(1.0, 0.5, 0.2, 0.95, vec![])).unwrap();
/// let b = store.insert(StructureUnit::new(2.0, 0.3, 0.1, 0.96, vec![a.clone()])).unwrap();
///
/// let paths = enumerate_paths(&store, &EnumerationOptions::default()).unwrap();
/// assert_eq!(paths.len(), 2);
/// assert_eq!(paths[0].ids(), &[a.clone()]);
/// assert_eq!(paths[1].ids(), &[a, b]);
/// ```
pub fn enumerate_paths(
    store: &UnitStore,
    options: &EnumerationOptions,
) -> Result<Vec<Path>, PathLimitExceeded> {
    let mut collector = Collector {
        store,
        limits: options.limits,
        paths: Vec::new(),
    };

    match options.mode {
        PathMode::Recursive => walk_recursive(&mut collector)?,
        PathMode::AdjacentPairs => walk_adjacent_pairs(&mut collector)?,
    }

    Ok(collector.paths)
}

struct Collector<'s> {
    store: &'s UnitStore,
    limits: PathLimits,
    paths: Vec<Path>,
}

impl Collector<'_> {
    fn emit(&mut self, indices: &[usize]) -> Result<(), PathLimitExceeded> {
        if let Some(max_depth) = self.limits.max_depth {
            if indices.len() > max_depth {
                return Err(PathLimitExceeded {
                    limit: PathLimit::MaxDepth(max_depth),
                });
            }
        }
        if let Some(max_paths) = self.limits.max_paths {
            if self.paths.len() >= max_paths {
                return Err(PathLimitExceeded {
                    limit: PathLimit::MaxPaths(max_paths),
                });
            }
        }

        let ids = indices
            .iter()
            .map(|&idx| self.store.unit_at(idx).id.clone())
            .collect();
        self.paths.push(Path::new(ids));
        Ok(())
    }
}

fn walk_recursive(collector: &mut Collector<'_>) -> Result<(), PathLimitExceeded> {
    let store = collector.store;
    let mut on_path = vec![false; store.len()];

    for root in (0..store.len()).filter(|&idx| store.unit_at(idx).is_root()) {
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        let mut current: Vec<usize> = vec![root];
        on_path[root] = true;
        collector.emit(&current)?;

        while let Some(top) = stack.len().checked_sub(1) {
            let (node, cursor) = stack[top];
            let children = store.children_of(node);

            match children[cursor..].iter().position(|&c| !on_path[c]) {
                Some(offset) => {
                    let child = children[cursor + offset];
                    stack[top].1 = cursor + offset + 1;

                    on_path[child] = true;
                    current.push(child);
                    collector.emit(&current)?;
                    stack.push((child, 0));
                }
                None => {
                    stack.pop();
                    current.pop();
                    on_path[node] = false;
                }
            }
        }
    }

    Ok(())
}

fn walk_adjacent_pairs(collector: &mut Collector<'_>) -> Result<(), PathLimitExceeded> {
    let store = collector.store;

    for idx in 0..store.len() {
        for parent in &store.unit_at(idx).refs {
            // refs were resolved on insert
            if let Some(parent_idx) = store.index_of(parent) {
                collector.emit(&[parent_idx, idx])?;
            }
        }
    }

    Ok(())
}
