// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::fmt;

use crate::unit::UnitId;

/// Record of a committed transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferReceipt {
    pub spent: UnitId,
    pub minted: UnitId,
    pub sender: String,
    pub receiver: String,
    pub amount: u64,
}

impl fmt::Display for TransferReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transferred {} from {} to {}, created new unit {}",
            self.amount, self.sender, self.receiver, self.minted
        )
    }
}
