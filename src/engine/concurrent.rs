// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::contract::{CheckResult, Matcher, UnitSample};
use crate::errors::RoundError;
use crate::traits::{MatchEvaluator, MatchMatrix};

/// Evaluates each contract's verdicts in its own tokio task.
///
/// Matching is a pure function of the path samples, so the contract rows are
/// independent. A semaphore caps the number of rows computed at once. Tasks
/// are joined in contract order, which keeps the matrix layout identical to
/// [`SequentialEvaluator`](crate::engine::SequentialEvaluator) no matter how
/// the tasks were scheduled.
#[derive(Debug, Clone)]
pub struct ConcurrentEvaluator {
    max_concurrency: usize,
}

impl ConcurrentEvaluator {
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }
}

#[async_trait]
impl MatchEvaluator for ConcurrentEvaluator {
    async fn evaluate(
        &self,
        matchers: Vec<Matcher>,
        paths: Arc<Vec<Vec<UnitSample>>>,
    ) -> Result<MatchMatrix, RoundError> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = Vec::with_capacity(matchers.len());

        for matcher in matchers {
            let paths = paths.clone();
            let semaphore = semaphore.clone();

            tasks.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.map_err(|e| {
                    RoundError::Evaluation(format!("failed to acquire evaluation permit: {}", e))
                })?;

                Ok::<Vec<CheckResult>, RoundError>(
                    paths.iter().map(|samples| matcher.check(samples)).collect(),
                )
            }));
        }

        let mut matrix = Vec::with_capacity(tasks.len());
        for task in tasks {
            let row = task
                .await
                .map_err(|e| RoundError::Evaluation(format!("evaluation task failed: {}", e)))??;
            matrix.push(row);
        }
        Ok(matrix)
    }

    fn name(&self) -> &'static str {
        "Concurrent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::MatchMode;

    #[test]
    fn test_concurrency_at_least_one() {
        assert_eq!(ConcurrentEvaluator::new(0).max_concurrency(), 1);
        assert_eq!(ConcurrentEvaluator::new(8).max_concurrency(), 8);
    }

    #[tokio::test]
    async fn test_rows_follow_contract_order() {
        let matchers: Vec<Matcher> = (0..16)
            .map(|i| Matcher::new(MatchMode::Average, 0.05 * i as f64, 0.0))
            .collect();
        let paths = Arc::new(vec![vec![
            UnitSample { delta: 0.4, entropy: 1.0 },
            UnitSample { delta: 0.4, entropy: 1.0 },
        ]]);

        let matrix = ConcurrentEvaluator::new(3)
            .evaluate(matchers, paths)
            .await
            .unwrap();

        assert_eq!(matrix.len(), 16);
        for (i, row) in matrix.iter().enumerate() {
            // mean delta 0.4 passes only when the threshold is strictly above it
            assert_eq!(row[0].passed, 0.05 * i as f64 > 0.4, "contract {}", i);
        }
    }
}
