// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for contract gating and execution within a round.

use crate::contract::Outcome;
use crate::observability::messages::StructuredLog;
use crate::paths::Path;
use std::fmt::{Display, Formatter};

/// A contract used up its TTL and was not evaluated.
///
/// # Log Level
/// `debug!` - Expected control flow, repeats for every remaining path
pub struct ContractExpired<'a> {
    pub contract: &'a str,
    pub ttl: u32,
}

impl Display for ContractExpired<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Contract {} has reached TTL ({})", self.contract, self.ttl)
    }
}

impl StructuredLog for ContractExpired<'_> {
    fn log(&self) {
        tracing::debug!(contract = self.contract, ttl = self.ttl, "{}", self);
    }
}

/// A contract is held back until its dependency succeeds.
///
/// # Log Level
/// `debug!` - Expected control flow
pub struct ContractWaiting<'a> {
    pub contract: &'a str,
    pub dependency: &'a str,
}

impl Display for ContractWaiting<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Contract {} waits on {}", self.contract, self.dependency)
    }
}

impl StructuredLog for ContractWaiting<'_> {
    fn log(&self) {
        tracing::debug!(
            contract = self.contract,
            dependency = self.dependency,
            "{}", self
        );
    }
}

/// A path did not satisfy a contract's match condition.
///
/// # Log Level
/// `trace!` - One per non-matching (contract, path) pair
pub struct ContractSkipped<'a> {
    pub contract: &'a str,
    pub path: &'a Path,
    pub reason: &'a str,
}

impl Display for ContractSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Contract {} skipped {}: {}",
            self.contract, self.path, self.reason
        )
    }
}

impl StructuredLog for ContractSkipped<'_> {
    fn log(&self) {
        tracing::trace!(
            contract = self.contract,
            path = %self.path,
            reason = self.reason,
            "{}", self
        );
    }
}

/// A contract matched and its action ran.
///
/// # Log Level
/// `info!` for successes, `warn!` when the action reported a failure
///
/// # Example
/// ```
/// use structure_vm::contract::Outcome;
/// use structure_vm::observability::messages::contract::ContractExecuted;
/// use structure_vm::paths::Path;
///
/// let path = Path::new(vec!["a1".into(), "b2".into()]);
/// let outcome = Outcome::Generic("Audit log created for [a1, b2]".to_string());
/// let msg = ContractExecuted {
///     contract: "ComplianceAudit",
///     action: "audit",
///     layer: 0,
///     path: &path,
///     outcome: &outcome,
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "[Layer 0] Executed ComplianceAudit on [a1, b2]: Audit log created for [a1, b2]"
/// );
/// ```
pub struct ContractExecuted<'a> {
    pub contract: &'a str,
    pub action: &'a str,
    pub layer: i32,
    pub path: &'a Path,
    pub outcome: &'a Outcome,
}

impl Display for ContractExecuted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "[Layer {}] Executed {} on {}: {}",
            self.layer, self.contract, self.path, self.outcome
        )
    }
}

impl StructuredLog for ContractExecuted<'_> {
    fn log(&self) {
        if matches!(self.outcome, Outcome::TransferFailed(_)) {
            tracing::warn!(
                contract = self.contract,
                action = self.action,
                layer = self.layer,
                path = %self.path,
                outcome = %self.outcome,
                "{}", self
            );
        } else {
            tracing::info!(
                contract = self.contract,
                action = self.action,
                layer = self.layer,
                path = %self.path,
                outcome = %self.outcome,
                "{}", self
            );
        }
    }
}

/// A reward-class outcome added to the pool.
///
/// # Log Level
/// `info!` - Important operational event
pub struct RewardIssued<'a> {
    pub contract: &'a str,
    pub layer: i32,
    pub path: &'a Path,
    pub amount: u64,
    pub pool: u64,
}

impl Display for RewardIssued<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "[Layer {}] Reward triggered by {} on {}: +{} (pool={})",
            self.layer, self.contract, self.path, self.amount, self.pool
        )
    }
}

impl StructuredLog for RewardIssued<'_> {
    fn log(&self) {
        tracing::info!(
            contract = self.contract,
            layer = self.layer,
            path = %self.path,
            amount = self.amount,
            pool = self.pool,
            "{}", self
        );
    }
}
