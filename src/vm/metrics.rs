// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Serialize, Serializer};
use std::time::Duration;

/// First reward of a round: the round index and how long it took to arrive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConvergenceSample {
    pub round: u64,
    #[serde(rename = "block_time_secs", serialize_with = "serialize_secs")]
    pub block_time: Duration,
}

/// Per-round convergence bookkeeping across a VM's lifetime.
#[derive(Debug, Clone, Default)]
pub struct ConvergenceMetrics {
    rounds: Vec<Option<ConvergenceSample>>,
}

impl ConvergenceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one committed round.
    pub fn record_round(&mut self, sample: Option<ConvergenceSample>) {
        self.rounds.push(sample);
    }

    pub fn rounds_recorded(&self) -> usize {
        self.rounds.len()
    }

    pub fn samples(&self) -> impl Iterator<Item = &ConvergenceSample> + '_ {
        self.rounds.iter().flatten()
    }

    /// Summarise the converged rounds; `None` averages when no round converged.
    pub fn summary(&self, reward_pool: u64) -> ConvergenceSummary {
        let converged: Vec<&ConvergenceSample> = self.samples().collect();
        let count = converged.len();

        let (mean_convergence_round, mean_block_time) = if count == 0 {
            (None, None)
        } else {
            let round_sum: u64 = converged.iter().map(|s| s.round).sum();
            let time_sum: Duration = converged.iter().map(|s| s.block_time).sum();
            (
                Some(round_sum as f64 / count as f64),
                Some(time_sum / count as u32),
            )
        };

        ConvergenceSummary {
            rounds: self.rounds.len(),
            converged_rounds: count,
            mean_convergence_round,
            mean_block_time,
            reward_pool,
        }
    }
}

/// Aggregate view handed to reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvergenceSummary {
    pub rounds: usize,
    pub converged_rounds: usize,
    pub mean_convergence_round: Option<f64>,
    #[serde(rename = "mean_block_time_secs", serialize_with = "serialize_opt_secs")]
    pub mean_block_time: Option<Duration>,
    pub reward_pool: u64,
}

fn serialize_secs<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(value.as_secs_f64())
}

fn serialize_opt_secs<S: Serializer>(
    value: &Option<Duration>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(d) => serializer.serialize_some(&d.as_secs_f64()),
        None => serializer.serialize_none(),
    }
}
