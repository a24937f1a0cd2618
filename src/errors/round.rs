// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{StoreError, ValidationError};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which enumeration bound was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathLimit {
    MaxPaths(usize),
    MaxDepth(usize),
}

impl fmt::Display for PathLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathLimit::MaxPaths(n) => write!(f, "more than {} paths", n),
            PathLimit::MaxDepth(n) => write!(f, "a path longer than {} units", n),
        }
    }
}

/// Path enumeration stopped because the DAG produced too many or too long paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("path enumeration exceeded its limit: {limit}")]
pub struct PathLimitExceeded {
    pub limit: PathLimit,
}

/// Errors that abort a single round.
///
/// Everything but `Store` is raised before the commit phase and leaves the
/// VM, the store and the ledger as they were. `Store` can also come from the
/// commit phase, after earlier paths of the round were already activated.
#[derive(Debug, Error)]
pub enum RoundError {
    #[error("contract set is invalid: {}", format_validation(.0))]
    InvalidContracts(Vec<ValidationError>),

    #[error(transparent)]
    PathLimitExceeded(#[from] PathLimitExceeded),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A concurrent match evaluation task failed to complete
    #[error("match evaluation failed: {0}")]
    Evaluation(String),
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
