// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Spend/ownership bookkeeping layered on top of the unit store.
//!
//! The ledger tracks one balance per owner and the total supply minted into
//! it. Transfers move value between owners without creating or destroying
//! any, so `circulating() == total_supply()` holds after every successful
//! transfer. A transfer consumes a unit (marks it spent) and mints a successor
//! owned by the receiver that remembers where it came from.

mod receipt;

pub use receipt::TransferReceipt;

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::consts::SUCCESSOR_X_STEP;
use crate::errors::LedgerError;
use crate::unit::{StructureUnit, UnitId, UnitStore};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ledger {
    balances: BTreeMap<String, u64>,
    total_supply: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed balances from the store: every unspent owned unit credits its
    /// value to its owner.
    pub fn from_store(store: &UnitStore) -> Result<Self, LedgerError> {
        let mut ledger = Self::new();
        for unit in store.all().filter(|u| !u.spent) {
            if let Some(owner) = &unit.owner {
                ledger.credit(owner, unit.value)?;
            }
        }
        Ok(ledger)
    }

    /// Mint `amount` into `owner`'s balance, growing the total supply.
    ///
    /// Fails with `SupplyOverflow`, leaving the ledger unchanged, when the
    /// total supply would no longer fit in a `u64`. Every balance is bounded
    /// by the total supply, so checking the supply covers the balance too.
    pub fn credit(&mut self, owner: &str, amount: u64) -> Result<(), LedgerError> {
        let total_supply =
            self.total_supply
                .checked_add(amount)
                .ok_or_else(|| LedgerError::SupplyOverflow {
                    owner: owner.to_string(),
                    amount,
                })?;
        *self.balances.entry(owner.to_string()).or_insert(0) += amount;
        self.total_supply = total_supply;
        Ok(())
    }

    pub fn balance(&self, owner: &str) -> u64 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    pub fn balances(&self) -> &BTreeMap<String, u64> {
        &self.balances
    }

    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// Sum of all tracked balances.
    pub fn circulating(&self) -> u64 {
        self.balances.values().sum()
    }

    pub fn is_conserved(&self) -> bool {
        self.circulating() == self.total_supply
    }

    /// Spend `spending` and pay its value to `receiver`.
    ///
    /// The successor unit sits at `x + 0.1`, inherits `phi`, `delta` and
    /// `entropy`, references the spent unit and extends its provenance with
    /// the spent unit's id. The successor is inserted before any flag or
    /// balance changes, so a rejected transfer leaves store and ledger as
    /// they were.
    ///
    /// # Errors
    ///
    /// * `AlreadySpent` if the unit was spent before
    /// * `Unowned` if the unit has no owner
    /// * `InsufficientBalance` if the owner's balance is below the unit value
    /// * `Store` if the unit is unknown or the successor id collides
    pub fn transfer(
        &mut self,
        store: &mut UnitStore,
        spending: &UnitId,
        receiver: &str,
    ) -> Result<TransferReceipt, LedgerError> {
        let unit = store.get(spending)?;

        if unit.spent {
            return Err(LedgerError::AlreadySpent(spending.clone()));
        }
        let sender = unit
            .owner
            .clone()
            .ok_or_else(|| LedgerError::Unowned(spending.clone()))?;
        let amount = unit.value;
        let balance = self.balance(&sender);
        if balance < amount {
            return Err(LedgerError::InsufficientBalance {
                owner: sender,
                balance,
                required: amount,
            });
        }

        let mut provenance = unit.provenance.clone();
        provenance.push(spending.clone());
        let successor = StructureUnit::new(
            unit.x + SUCCESSOR_X_STEP,
            unit.phi,
            unit.delta,
            unit.entropy,
            vec![spending.clone()],
        )
        .owned_by(receiver, amount)
        .with_provenance(provenance);

        let minted = store.insert(successor)?;
        store.mark_spent(spending)?;

        if let Some(sender_balance) = self.balances.get_mut(&sender) {
            *sender_balance -= amount;
        }
        // balances sum to total_supply, so after the debit this cannot overflow
        *self.balances.entry(receiver.to_string()).or_insert(0) += amount;

        Ok(TransferReceipt {
            spent: spending.clone(),
            minted,
            sender,
            receiver: receiver.to_string(),
            amount,
        })
    }
}
