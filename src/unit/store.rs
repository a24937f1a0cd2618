// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::errors::StoreError;
use crate::unit::{StructureUnit, UnitId};

/// In-memory arena of structure units keyed by their derived identifier.
///
/// Units are kept in insertion order, which is also the order every
/// traversal observes, so repeated enumerations over the same store are
/// reproducible. Child adjacency is maintained on insert so the path
/// enumerator can walk edges by arena index without rescanning the store.
///
/// # Examples
///
/// ```
/// use structure_vm::unit::{StructureUnit, UnitStore};
///
/// let mut store = UnitStore::new();
/// let root = store.insert(StructureUnit::new(1.0, 0.5, 0.2, 0.95, vec![])).unwrap();
/// let child = store
///     .insert(StructureUnit::new(2.0, 0.3, 0.1, 0.96, vec![root.clone()]))
///     .unwrap();
///
/// assert_eq!(store.len(), 2);
/// assert_eq!(store.roots().count(), 1);
/// assert_eq!(store.get(&child).unwrap().refs, vec![root]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct UnitStore {
    units: Vec<StructureUnit>,
    index: HashMap<UnitId, usize>,
    children: Vec<Vec<usize>>,
}

impl UnitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a unit, returning its identifier.
    ///
    /// Fails with `DuplicateIdentifier` when the id is already taken and with
    /// `UnresolvedReference` when a parent is not yet stored. Requiring parents
    /// to exist first keeps the graph acyclic by construction.
    pub fn insert(&mut self, unit: StructureUnit) -> Result<UnitId, StoreError> {
        if self.index.contains_key(&unit.id) {
            return Err(StoreError::DuplicateIdentifier(unit.id));
        }

        let mut parents = Vec::with_capacity(unit.refs.len());
        for parent in &unit.refs {
            match self.index.get(parent) {
                Some(&idx) => parents.push(idx),
                None => {
                    return Err(StoreError::UnresolvedReference {
                        unit: unit.id.clone(),
                        missing: parent.clone(),
                    })
                }
            }
        }

        let idx = self.units.len();
        let id = unit.id.clone();
        for parent in parents {
            self.children[parent].push(idx);
        }
        self.index.insert(id.clone(), idx);
        self.units.push(unit);
        self.children.push(Vec::new());

        Ok(id)
    }

    pub fn get(&self, id: &UnitId) -> Result<&StructureUnit, StoreError> {
        self.index
            .get(id)
            .map(|&idx| &self.units[idx])
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    pub fn contains(&self, id: &UnitId) -> bool {
        self.index.contains_key(id)
    }

    /// All units in insertion order. Each call starts a fresh iteration.
    pub fn all(&self) -> impl Iterator<Item = &StructureUnit> + '_ {
        self.units.iter()
    }

    /// Units without parents, in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = &StructureUnit> + '_ {
        self.units.iter().filter(|u| u.is_root())
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Set the `locked` flag. Locking is one-way.
    pub fn lock(&mut self, id: &UnitId) -> Result<(), StoreError> {
        self.get_mut(id)?.locked = true;
        Ok(())
    }

    /// Set the `spent` flag. Spending is one-way.
    pub fn mark_spent(&mut self, id: &UnitId) -> Result<(), StoreError> {
        self.get_mut(id)?.spent = true;
        Ok(())
    }

    fn get_mut(&mut self, id: &UnitId) -> Result<&mut StructureUnit, StoreError> {
        match self.index.get(id) {
            Some(&idx) => Ok(&mut self.units[idx]),
            None => Err(StoreError::NotFound(id.clone())),
        }
    }

    // Arena access for the path enumerator.

    pub(crate) fn unit_at(&self, idx: usize) -> &StructureUnit {
        &self.units[idx]
    }

    pub(crate) fn children_of(&self, idx: usize) -> &[usize] {
        &self.children[idx]
    }

    pub(crate) fn index_of(&self, id: &UnitId) -> Option<usize> {
        self.index.get(id).copied()
    }
}
