// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::StoreError;
use crate::unit::UnitId;
use thiserror::Error;

/// Errors raised while spending a unit through the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("unit '{0}' already spent")]
    AlreadySpent(UnitId),

    #[error("insufficient balance in '{owner}': has {balance}, needs {required}")]
    InsufficientBalance {
        owner: String,
        balance: u64,
        required: u64,
    },

    /// The spending unit carries no owner, so there is no balance to debit
    #[error("unit '{0}' has no owner")]
    Unowned(UnitId),

    /// Crediting would push the total supply past `u64::MAX`
    #[error("crediting {amount} to '{owner}' overflows the total supply")]
    SupplyOverflow { owner: String, amount: u64 },

    #[error(transparent)]
    Store(#[from] StoreError),
}
