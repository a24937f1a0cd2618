// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Serialize, Serializer};
use std::fmt;

use crate::errors::LedgerError;
use crate::ledger::TransferReceipt;

/// Tagged result of running a contract on a path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Outcome {
    /// Reward issued; feeds the reward pool
    Reward(String),
    /// Path did not match; carries the match failure reason
    Skipped(String),
    /// Any other successful action, e.g. an audit entry
    Generic(String),
    /// Ledger transfer committed
    Transferred(TransferReceipt),
    /// Ledger refused the transfer; nothing was mutated
    #[serde(serialize_with = "serialize_display")]
    TransferFailed(LedgerError),
}

/// How the VM accounts for an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeClass {
    Reward,
    Skipped,
    Success,
    Failure,
}

impl Outcome {
    pub fn class(&self) -> OutcomeClass {
        match self {
            Outcome::Reward(_) => OutcomeClass::Reward,
            Outcome::Skipped(_) => OutcomeClass::Skipped,
            Outcome::Generic(_) | Outcome::Transferred(_) => OutcomeClass::Success,
            Outcome::TransferFailed(_) => OutcomeClass::Failure,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Reward(detail) | Outcome::Generic(detail) => f.write_str(detail),
            Outcome::Skipped(reason) => write!(f, "Skipped: {}", reason),
            Outcome::Transferred(receipt) => write!(f, "{}", receipt),
            Outcome::TransferFailed(error) => write!(f, "Transfer failed: {}", error),
        }
    }
}

fn serialize_display<T: fmt::Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::UnitId;

    #[test]
    fn test_classification_is_exhaustive_by_tag() {
        assert_eq!(Outcome::Reward("r".into()).class(), OutcomeClass::Reward);
        assert_eq!(Outcome::Skipped("s".into()).class(), OutcomeClass::Skipped);
        assert_eq!(Outcome::Generic("g".into()).class(), OutcomeClass::Success);
        assert_eq!(
            Outcome::TransferFailed(LedgerError::AlreadySpent(UnitId::from("abcd1234"))).class(),
            OutcomeClass::Failure
        );
    }

    #[test]
    fn test_display_and_json_shape() {
        let failed = Outcome::TransferFailed(LedgerError::AlreadySpent(UnitId::from("abcd1234")));
        assert_eq!(failed.to_string(), "Transfer failed: unit 'abcd1234' already spent");

        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["kind"], "transfer_failed");
        assert_eq!(json["detail"], "unit 'abcd1234' already spent");

        let skipped = Outcome::Skipped("too short".into());
        assert_eq!(skipped.to_string(), "Skipped: too short");
    }
}
