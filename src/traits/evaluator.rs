// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{CheckResult, Matcher, UnitSample};
use crate::errors::RoundError;

/// Match verdicts indexed `[contract][path]`.
pub type MatchMatrix = Vec<Vec<CheckResult>>;

/// Computes every contract's match verdict for every path of a round.
///
/// Matching only reads immutable unit metrics, so implementations are free to
/// spread the work across tasks. They must return the matrix in contract order
/// and path order regardless of how the work was scheduled; the VM applies the
/// verdicts afterwards in a single-writer commit phase.
#[async_trait]
pub trait MatchEvaluator: Send + Sync {
    async fn evaluate(
        &self,
        matchers: Vec<Matcher>,
        paths: Arc<Vec<Vec<UnitSample>>>,
    ) -> Result<MatchMatrix, RoundError>;

    fn name(&self) -> &'static str;
}
