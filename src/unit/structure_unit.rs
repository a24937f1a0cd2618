// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::unit::UnitId;
use serde::Serialize;

/// A node of the structure DAG.
///
/// Metrics and references are fixed at construction. Only `locked`, `spent`
/// and (on minted successors) `provenance` change afterwards, and the flags
/// only ever go from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureUnit {
    pub id: UnitId,
    pub x: f64,
    pub phi: f64,
    pub delta: f64,
    pub entropy: f64,
    pub refs: Vec<UnitId>,
    pub locked: bool,
    pub owner: Option<String>,
    pub value: u64,
    pub spent: bool,
    pub provenance: Vec<UnitId>,
}

impl StructureUnit {
    /// Create an unowned unit. Duplicate refs are dropped, first occurrence wins.
    pub fn new(x: f64, phi: f64, delta: f64, entropy: f64, refs: Vec<UnitId>) -> Self {
        let mut unique_refs: Vec<UnitId> = Vec::with_capacity(refs.len());
        for r in refs {
            if !unique_refs.contains(&r) {
                unique_refs.push(r);
            }
        }

        Self {
            id: UnitId::derive(x, phi),
            x,
            phi,
            delta,
            entropy,
            refs: unique_refs,
            locked: false,
            owner: None,
            value: 0,
            spent: false,
            provenance: Vec::new(),
        }
    }

    /// Attach ledger ownership: the unit is worth `value` to `owner`.
    pub fn owned_by(mut self, owner: impl Into<String>, value: u64) -> Self {
        self.owner = Some(owner.into());
        self.value = value;
        self
    }

    pub fn with_provenance(mut self, provenance: Vec<UnitId>) -> Self {
        self.provenance = provenance;
        self
    }

    pub fn is_root(&self) -> bool {
        self.refs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_dedupes_refs_preserving_order() {
        let a = UnitId::from("aaaaaaaa");
        let b = UnitId::from("bbbbbbbb");
        let unit = StructureUnit::new(1.0, 0.1, 0.2, 0.3, vec![b.clone(), a.clone(), b.clone()]);
        assert_eq!(unit.refs, vec![b, a]);
        assert!(!unit.is_root());
    }

    #[test]
    fn test_owned_by_sets_ledger_attributes() {
        let unit = StructureUnit::new(1.0, 0.1, 0.2, 0.3, vec![]).owned_by("a", 10);
        assert_eq!(unit.owner.as_deref(), Some("a"));
        assert_eq!(unit.value, 10);
        assert!(!unit.spent);
        assert!(unit.provenance.is_empty());
        assert!(unit.is_root());
    }
}
