// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for ledger transfers.

use crate::errors::LedgerError;
use crate::ledger::TransferReceipt;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// A unit was spent and its successor minted.
///
/// # Log Level
/// `info!` - Ledger state changed
pub struct TransferCompleted<'a> {
    pub receipt: &'a TransferReceipt,
}

impl Display for TransferCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.receipt)
    }
}

impl StructuredLog for TransferCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            spent = %self.receipt.spent,
            minted = %self.receipt.minted,
            sender = self.receipt.sender.as_str(),
            receiver = self.receipt.receiver.as_str(),
            amount = self.receipt.amount,
            "{}", self
        );
    }
}

/// The ledger refused a transfer; nothing was mutated.
///
/// # Log Level
/// `warn!` - Refused operation, run continues
///
/// # Example
/// ```
/// use structure_vm::errors::LedgerError;
/// use structure_vm::observability::messages::ledger::TransferRejected;
///
/// let error = LedgerError::AlreadySpent("deadbeef".into());
/// let msg = TransferRejected { unit: "deadbeef", error: &error };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct TransferRejected<'a> {
    pub unit: &'a str,
    pub error: &'a LedgerError,
}

impl Display for TransferRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Transfer of unit {} rejected: {}", self.unit, self.error)
    }
}

impl StructuredLog for TransferRejected<'_> {
    fn log(&self) {
        tracing::warn!(unit = self.unit, error = %self.error, "{}", self);
    }
}
