// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The structure virtual machine.
//!
//! [`StructureVm`] owns the ordered contract set and everything a run
//! accumulates (history, events, the executed set, the reward pool and
//! convergence metrics). Each round enumerates paths, asks the configured
//! evaluator for the match matrix and then commits activations path by path
//! in contract order.

mod machine;
mod metrics;
mod record;

pub use machine::StructureVm;
pub use metrics::{ConvergenceMetrics, ConvergenceSample, ConvergenceSummary};
pub use record::{ExecutionRecord, RoundResult, RunOutcome, VmEvent};
