// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

use crate::contract::{samples_for, CheckResult, MatchMode, Matcher, Outcome};
use crate::errors::StoreError;
use crate::paths::Path;
use crate::traits::{Action, ActionContext};
use crate::unit::UnitStore;

/// A declarative rule evaluated against DAG paths.
///
/// Contracts are built once, registered with a VM and never removed; only
/// `activation_count` changes during a run.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use structure_vm::actions::{AuditAction, RewardAction};
/// use structure_vm::contract::{MatchMode, StructureContract};
///
/// let reward = StructureContract::new("ResonanceReward", 0.3, 0.9, Arc::new(RewardAction))
///     .with_mode(MatchMode::Endpoint)
///     .with_priority(10)
///     .with_layer(1);
///
/// let audit = StructureContract::new("ComplianceAudit", 0.4, 0.6, Arc::new(AuditAction))
///     .with_mode(MatchMode::Endpoint)
///     .with_priority(5)
///     .depends_on("ResonanceReward")
///     .with_ttl(3);
///
/// assert_eq!(audit.dependency(), Some("ResonanceReward"));
/// assert_eq!(reward.ttl(), None);
/// ```
pub struct StructureContract {
    name: String,
    matcher: Matcher,
    priority: i32,
    layer: i32,
    depends_on: Option<String>,
    ttl: Option<u32>,
    activation_count: u32,
    action: Arc<dyn Action>,
}

impl StructureContract {
    /// Create an average-mode contract with priority 0, layer 0, no dependency
    /// and unbounded lifetime.
    pub fn new(
        name: impl Into<String>,
        delta_thresh: f64,
        entropy_thresh: f64,
        action: Arc<dyn Action>,
    ) -> Self {
        Self {
            name: name.into(),
            matcher: Matcher::new(MatchMode::default(), delta_thresh, entropy_thresh),
            priority: 0,
            layer: 0,
            depends_on: None,
            ttl: None,
            activation_count: 0,
            action,
        }
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.matcher.mode = mode;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    /// Gate this contract on `contract` having succeeded at least once.
    pub fn depends_on(mut self, contract: impl Into<String>) -> Self {
        self.depends_on = Some(contract.into());
        self
    }

    /// Cap the number of successful activations.
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn layer(&self) -> i32 {
        self.layer
    }

    pub fn dependency(&self) -> Option<&str> {
        self.depends_on.as_deref()
    }

    pub fn ttl(&self) -> Option<u32> {
        self.ttl
    }

    pub fn activation_count(&self) -> u32 {
        self.activation_count
    }

    pub fn action_name(&self) -> &'static str {
        self.action.name()
    }

    /// True once a finite TTL has been used up.
    pub fn is_expired(&self) -> bool {
        matches!(self.ttl, Some(ttl) if self.activation_count >= ttl)
    }

    pub fn check(&self, store: &UnitStore, path: &Path) -> Result<CheckResult, StoreError> {
        let samples = samples_for(store, path)?;
        Ok(self.matcher.check(&samples))
    }

    /// Check `path` and, if it matches, activate the contract on it.
    pub fn execute(&mut self, path: &Path, ctx: &mut ActionContext<'_>) -> Result<Outcome, StoreError> {
        let check = self.check(ctx.store, path)?;
        self.execute_checked(check, path, ctx)
    }

    /// Activate with a verdict computed earlier, e.g. by a concurrent evaluator.
    ///
    /// A passing verdict bumps `activation_count`, locks every unit on the path
    /// and hands the path to the action. A failing one yields `Skipped`. A path
    /// naming a unit the store does not hold fails with `NotFound` before
    /// anything is counted or locked.
    pub fn execute_checked(
        &mut self,
        check: CheckResult,
        path: &Path,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Outcome, StoreError> {
        if !check.passed {
            return Ok(Outcome::Skipped(check.reason));
        }

        path.resolve(ctx.store)?;
        self.activation_count += 1;
        for id in path.iter() {
            ctx.store.lock(id)?;
        }
        Ok(self.action.apply(path, ctx))
    }
}

impl fmt::Debug for StructureContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructureContract")
            .field("name", &self.name)
            .field("matcher", &self.matcher)
            .field("priority", &self.priority)
            .field("layer", &self.layer)
            .field("depends_on", &self.depends_on)
            .field("ttl", &self.ttl)
            .field("activation_count", &self.activation_count)
            .field("action", &self.action.name())
            .finish()
    }
}
