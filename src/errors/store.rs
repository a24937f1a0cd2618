// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::unit::UnitId;
use thiserror::Error;

/// Errors raised by the unit store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No unit with this identifier exists in the store
    #[error("unit '{0}' not found")]
    NotFound(UnitId),

    /// A unit with the same derived identifier is already stored
    #[error("unit '{0}' already exists (identifier collision or re-insertion)")]
    DuplicateIdentifier(UnitId),

    /// A unit references a parent that was never inserted
    #[error("unit '{unit}' references unknown parent '{missing}'")]
    UnresolvedReference { unit: UnitId, missing: UnitId },
}
