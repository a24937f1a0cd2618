// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::fmt;

use crate::errors::StoreError;
use crate::unit::{StructureUnit, UnitId, UnitStore};

/// Ordered sequence of unit ids, root first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Path(Vec<UnitId>);

impl Path {
    pub fn new(ids: Vec<UnitId>) -> Self {
        Self(ids)
    }

    pub fn ids(&self) -> &[UnitId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&UnitId> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&UnitId> {
        self.0.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnitId> {
        self.0.iter()
    }

    /// Look up every unit of the path in `store`.
    pub fn resolve<'s>(&self, store: &'s UnitStore) -> Result<Vec<&'s StructureUnit>, StoreError> {
        self.0.iter().map(|id| store.get(id)).collect()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", id)?;
        }
        write!(f, "]")
    }
}

impl From<Vec<UnitId>> for Path {
    fn from(ids: Vec<UnitId>) -> Self {
        Self(ids)
    }
}
