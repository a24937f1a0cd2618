// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::fmt;

use crate::contract::Outcome;
use crate::errors::RoundError;
use crate::paths::Path;
use crate::vm::ConvergenceSample;

/// One contract activation attempt that passed both gates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionRecord {
    pub contract: String,
    pub path: Path,
    pub outcome: Outcome,
}

impl fmt::Display for ExecutionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] Path: {} => Result: {}", self.contract, self.path, self.outcome)
    }
}

/// Event log entry. Every gate decision and every outcome produces one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VmEvent {
    /// The contract's TTL is used up
    Expired { contract: String },
    /// The contract's dependency has not succeeded yet
    Waiting { contract: String, dependency: String },
    Reward { contract: String, layer: i32, path: Path },
    Skipped {
        contract: String,
        layer: i32,
        path: Path,
        reason: String,
    },
    Executed { contract: String, layer: i32, path: Path },
    /// The action ran but reported a failure, e.g. a refused transfer
    Failed {
        contract: String,
        layer: i32,
        path: Path,
        reason: String,
    },
}

impl fmt::Display for VmEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VmEvent::Expired { contract } => {
                write!(f, "[EXPIRED] Contract {} has reached TTL", contract)
            }
            VmEvent::Waiting {
                contract,
                dependency,
            } => write!(f, "[WAIT] Contract {} waits on {}", contract, dependency),
            VmEvent::Reward { layer, path, .. } => {
                write!(f, "[Layer {}] Reward triggered by {}", layer, path)
            }
            VmEvent::Skipped {
                layer,
                path,
                reason,
                ..
            } => write!(f, "[Layer {}] Contract skipped on {}: {}", layer, path, reason),
            VmEvent::Executed {
                contract,
                layer,
                path,
            } => write!(f, "[Layer {}] Executed {} on {}", layer, contract, path),
            VmEvent::Failed {
                contract,
                layer,
                path,
                reason,
            } => write!(
                f,
                "[Layer {}] Contract {} failed on {}: {}",
                layer, contract, path, reason
            ),
        }
    }
}

/// Everything one committed round produced.
///
/// `history` and `events` hold only this round's entries; the VM keeps the
/// cumulative logs.
#[derive(Debug, Clone, Serialize)]
pub struct RoundResult {
    pub round: u64,
    pub path_count: usize,
    pub history: Vec<ExecutionRecord>,
    pub events: Vec<VmEvent>,
    pub rewards_issued: u64,
    /// Pool total after this round
    pub reward_pool: u64,
    pub convergence: Option<ConvergenceSample>,
}

impl RoundResult {
    pub fn converged(&self) -> bool {
        self.convergence.is_some()
    }
}

/// What a multi-round run produced.
///
/// `rounds` holds every round that committed, including the ones before a
/// failure. `error` is the failure that ended the run early, if any.
#[derive(Debug)]
pub struct RunOutcome {
    pub rounds: Vec<RoundResult>,
    pub error: Option<RoundError>,
}

impl RunOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
