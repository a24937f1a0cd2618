// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::{Strategy, VmOptions};
use crate::engine::concurrent::ConcurrentEvaluator;
use crate::engine::sequential::SequentialEvaluator;
use crate::traits::MatchEvaluator;

/// Factory for creating match evaluators from VM options
pub struct ExecutorFactory;

impl ExecutorFactory {
    /// Create a match evaluator based on the configured strategy
    pub fn from_options(options: &VmOptions) -> Box<dyn MatchEvaluator> {
        match options.strategy {
            Strategy::Sequential => Box::new(SequentialEvaluator::new()),
            Strategy::Concurrent => {
                let max_concurrency = options.max_concurrency.unwrap_or_else(|| {
                    std::thread::available_parallelism()
                        .map(|n| n.get())
                        .unwrap_or(4)
                });
                Box::new(ConcurrentEvaluator::new(max_concurrency))
            }
        }
    }
}
