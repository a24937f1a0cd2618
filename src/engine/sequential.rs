// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{Matcher, UnitSample};
use crate::errors::RoundError;
use crate::traits::{MatchEvaluator, MatchMatrix};

/// Evaluates every contract against every path on the calling task.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialEvaluator;

impl SequentialEvaluator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MatchEvaluator for SequentialEvaluator {
    async fn evaluate(
        &self,
        matchers: Vec<Matcher>,
        paths: Arc<Vec<Vec<UnitSample>>>,
    ) -> Result<MatchMatrix, RoundError> {
        Ok(matchers
            .iter()
            .map(|matcher| paths.iter().map(|samples| matcher.check(samples)).collect())
            .collect())
    }

    fn name(&self) -> &'static str {
        "Sequential"
    }
}
