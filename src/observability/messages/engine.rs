// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the round lifecycle of the virtual machine.

use crate::errors::RoundError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// A round began after path enumeration.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use structure_vm::observability::messages::engine::RoundStarted;
///
/// let msg = RoundStarted {
///     round: 1,
///     evaluator: "Sequential",
///     path_count: 6,
///     contract_count: 2,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RoundStarted<'a> {
    pub round: u64,
    pub evaluator: &'a str,
    pub path_count: usize,
    pub contract_count: usize,
}

impl Display for RoundStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting round {} with {} evaluator: {} paths, {} contracts",
            self.round, self.evaluator, self.path_count, self.contract_count
        )
    }
}

impl RoundStarted<'_> {
    /// Span grouping the evaluation and commit of this round.
    pub fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "round",
            span_name = name,
            round = self.round,
            evaluator = self.evaluator,
            path_count = self.path_count,
            contract_count = self.contract_count,
        )
    }
}

impl StructuredLog for RoundStarted<'_> {
    fn log(&self) {
        tracing::info!(
            round = self.round,
            evaluator = self.evaluator,
            path_count = self.path_count,
            contract_count = self.contract_count,
            "{}", self
        );
    }
}

/// A round committed.
///
/// # Log Level
/// `info!` - Important operational event
pub struct RoundCompleted {
    pub round: u64,
    pub executions: usize,
    pub rewards_issued: u64,
    pub reward_pool: u64,
    pub duration: Duration,
}

impl Display for RoundCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Round {} completed: {} executions, {} rewards issued, pool={} in {:?}",
            self.round, self.executions, self.rewards_issued, self.reward_pool, self.duration
        )
    }
}

impl StructuredLog for RoundCompleted {
    fn log(&self) {
        tracing::info!(
            round = self.round,
            executions = self.executions,
            rewards_issued = self.rewards_issued,
            reward_pool = self.reward_pool,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }
}

/// A round was aborted before commit.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use structure_vm::errors::RoundError;
/// use structure_vm::observability::messages::engine::RoundFailed;
///
/// let error = RoundError::Evaluation("task panicked".to_string());
/// let msg = RoundFailed { round: 3, error: &error };
///
/// assert_eq!(msg.to_string(), "Round 3 failed: match evaluation failed: task panicked");
/// ```
pub struct RoundFailed<'a> {
    pub round: u64,
    pub error: &'a RoundError,
}

impl Display for RoundFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Round {} failed: {}", self.round, self.error)
    }
}

impl StructuredLog for RoundFailed<'_> {
    fn log(&self) {
        tracing::error!(
            round = self.round,
            error = %self.error,
            "{}", self
        );
    }
}

/// A multi-round run stopped because its cancellation token fired.
///
/// # Log Level
/// `warn!` - Run ended before all requested rounds
pub struct RunCancelled {
    pub completed: u64,
    pub requested: u64,
}

impl Display for RunCancelled {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Run cancelled after {} of {} rounds",
            self.completed, self.requested
        )
    }
}

impl StructuredLog for RunCancelled {
    fn log(&self) {
        tracing::warn!(
            completed = self.completed,
            requested = self.requested,
            "{}", self
        );
    }
}
