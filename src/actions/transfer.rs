// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::contract::Outcome;
use crate::observability::messages::ledger::{TransferCompleted, TransferRejected};
use crate::observability::messages::StructuredLog;
use crate::paths::Path;
use crate::traits::{Action, ActionContext};

/// Spends the first unit of the matched path and pays its value to `receiver`.
///
/// Ledger refusals (already spent, insufficient balance, id collision on the
/// successor) come back as [`Outcome::TransferFailed`] with nothing mutated.
pub struct TransferAction {
    receiver: String,
}

impl TransferAction {
    pub fn new(receiver: impl Into<String>) -> Self {
        Self {
            receiver: receiver.into(),
        }
    }
}

impl Action for TransferAction {
    fn apply(&self, path: &Path, ctx: &mut ActionContext<'_>) -> Outcome {
        let Some(spending) = path.first() else {
            return Outcome::Skipped("empty path has no spending unit".to_string());
        };

        match ctx.ledger.transfer(ctx.store, spending, &self.receiver) {
            Ok(receipt) => {
                TransferCompleted { receipt: &receipt }.log();
                Outcome::Transferred(receipt)
            }
            Err(error) => {
                TransferRejected {
                    unit: spending.as_str(),
                    error: &error,
                }
                .log();
                Outcome::TransferFailed(error)
            }
        }
    }

    fn name(&self) -> &'static str {
        "transfer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LedgerError;
    use crate::ledger::Ledger;
    use crate::unit::{StructureUnit, UnitStore};

    #[test]
    fn test_transfer_then_double_spend() {
        let mut store = UnitStore::new();
        let sender_unit = store
            .insert(StructureUnit::new(0.0, 0.5, 0.2, 0.8, vec![]).owned_by("a", 10))
            .unwrap();
        let mut ledger = Ledger::from_store(&store).unwrap();
        let action = TransferAction::new("b");
        let path = Path::new(vec![sender_unit.clone()]);

        let first = action.apply(&path, &mut ActionContext::new(&mut store, &mut ledger));
        let Outcome::Transferred(receipt) = first else {
            panic!("expected a committed transfer, got {:?}", first);
        };
        assert_eq!(receipt.amount, 10);
        assert_eq!(ledger.balance("a"), 0);
        assert_eq!(ledger.balance("b"), 10);

        let second = action.apply(&path, &mut ActionContext::new(&mut store, &mut ledger));
        assert_eq!(
            second,
            Outcome::TransferFailed(LedgerError::AlreadySpent(sender_unit))
        );
        assert_eq!(ledger.balance("b"), 10);
    }

    #[test]
    fn test_empty_path_is_skipped() {
        let mut store = UnitStore::new();
        let mut ledger = Ledger::new();
        let outcome = TransferAction::new("b").apply(
            &Path::new(vec![]),
            &mut ActionContext::new(&mut store, &mut ledger),
        );
        assert!(matches!(outcome, Outcome::Skipped(_)));
    }
}
