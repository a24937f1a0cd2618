// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::cmp::Reverse;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::config::{validate_contract_graph, VmOptions};
use crate::contract::{samples_for, Outcome, OutcomeClass, StructureContract};
use crate::engine::ExecutorFactory;
use crate::errors::{RoundError, ValidationError};
use crate::ledger::Ledger;
use crate::observability::messages::contract::{
    ContractExecuted, ContractExpired, ContractSkipped, ContractWaiting, RewardIssued,
};
use crate::observability::messages::engine::{
    RoundCompleted, RoundFailed, RoundStarted, RunCancelled,
};
use crate::observability::messages::StructuredLog;
use crate::paths::enumerate_paths;
use crate::traits::{ActionContext, MatchEvaluator, MatchMatrix};
use crate::unit::UnitStore;
use crate::vm::{
    ConvergenceMetrics, ConvergenceSample, ConvergenceSummary, ExecutionRecord, RoundResult,
    RunOutcome, VmEvent,
};

/// Round-based contract orchestrator.
///
/// # Round lifecycle
///
/// 1. Validate the contract set (unique names, known and acyclic dependencies)
/// 2. Enumerate paths from the store
/// 3. Compute the `[contract][path]` match matrix with the configured evaluator
/// 4. Commit: for every path, for every contract in `(-layer, -priority)` order,
///    apply the TTL gate, then the dependency gate, then activate
///
/// Steps 1-3 never mutate anything, so a round that fails there leaves the VM,
/// the store and the ledger as they were and does not consume a round index.
/// The pool saturates at `u64::MAX` instead of wrapping.
pub struct StructureVm {
    options: VmOptions,
    evaluator: Box<dyn MatchEvaluator>,
    contracts: Vec<StructureContract>,
    history: Vec<ExecutionRecord>,
    events: Vec<VmEvent>,
    executed: HashSet<String>,
    reward_pool: u64,
    round: u64,
    metrics: ConvergenceMetrics,
}

impl StructureVm {
    /// Create a VM using the evaluator selected by `options.strategy`.
    pub fn new(options: VmOptions) -> Self {
        let evaluator = ExecutorFactory::from_options(&options);
        Self::with_evaluator(options, evaluator)
    }

    pub fn with_evaluator(options: VmOptions, evaluator: Box<dyn MatchEvaluator>) -> Self {
        Self {
            options,
            evaluator,
            contracts: Vec::new(),
            history: Vec::new(),
            events: Vec::new(),
            executed: HashSet::new(),
            reward_pool: 0,
            round: 0,
            metrics: ConvergenceMetrics::new(),
        }
    }

    /// Register a contract. Higher layers run first, then higher priorities;
    /// ties keep registration order.
    pub fn add_contract(&mut self, contract: StructureContract) {
        self.contracts.push(contract);
        self.contracts
            .sort_by_key(|c| (Reverse(c.layer()), Reverse(c.priority())));
    }

    /// Contracts in execution order.
    pub fn contracts(&self) -> &[StructureContract] {
        &self.contracts
    }

    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        validate_contract_graph(self.contracts.iter().map(|c| (c.name(), c.dependency())))
    }

    pub fn options(&self) -> &VmOptions {
        &self.options
    }

    pub fn history(&self) -> &[ExecutionRecord] {
        &self.history
    }

    pub fn events(&self) -> &[VmEvent] {
        &self.events
    }

    pub fn reward_pool(&self) -> u64 {
        self.reward_pool
    }

    /// Index of the last committed round, 0 before the first one.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Whether `contract` has produced a reward or generic success so far.
    pub fn has_executed(&self, contract: &str) -> bool {
        self.executed.contains(contract)
    }

    pub fn metrics(&self) -> &ConvergenceMetrics {
        &self.metrics
    }

    pub fn summary(&self) -> ConvergenceSummary {
        self.metrics.summary(self.reward_pool)
    }

    /// Run one round over the current store contents.
    ///
    /// Units minted by actions during the round are inserted into `store`
    /// immediately but only take part in path enumeration from the next round.
    pub async fn run_round(
        &mut self,
        store: &mut UnitStore,
        ledger: &mut Ledger,
    ) -> Result<RoundResult, RoundError> {
        let round = self.round + 1;
        let result = self.try_run_round(round, store, ledger).await;
        if let Err(error) = &result {
            RoundFailed { round, error }.log();
        }
        result
    }

    /// Run up to `rounds` rounds, stopping early once `cancel` fires.
    ///
    /// Cancellation is checked between rounds; a round in progress always
    /// completes. The first failed round ends the run. Rounds committed
    /// before it are still returned, since their effects on the store and
    /// ledger stay in place.
    pub async fn run_rounds(
        &mut self,
        rounds: u64,
        store: &mut UnitStore,
        ledger: &mut Ledger,
        cancel: &CancellationToken,
    ) -> RunOutcome {
        let mut results = Vec::new();
        for _ in 0..rounds {
            if cancel.is_cancelled() {
                RunCancelled {
                    completed: results.len() as u64,
                    requested: rounds,
                }
                .log();
                break;
            }
            match self.run_round(store, ledger).await {
                Ok(result) => results.push(result),
                Err(error) => {
                    return RunOutcome {
                        rounds: results,
                        error: Some(error),
                    }
                }
            }
        }
        RunOutcome {
            rounds: results,
            error: None,
        }
    }

    async fn try_run_round(
        &mut self,
        round: u64,
        store: &mut UnitStore,
        ledger: &mut Ledger,
    ) -> Result<RoundResult, RoundError> {
        self.validate().map_err(RoundError::InvalidContracts)?;

        let paths = enumerate_paths(store, &self.options.paths)?;
        let started = Instant::now();

        let start_msg = RoundStarted {
            round,
            evaluator: self.evaluator.name(),
            path_count: paths.len(),
            contract_count: self.contracts.len(),
        };
        let span = start_msg.span("round");
        start_msg.log();

        let samples = paths
            .iter()
            .map(|path| samples_for(store, path))
            .collect::<Result<Vec<_>, _>>()?;
        let matchers = self.contracts.iter().map(|c| c.matcher().clone()).collect();
        let matrix = self
            .evaluator
            .evaluate(matchers, Arc::new(samples))
            .instrument(span.clone())
            .await?;
        self.check_matrix_shape(&matrix, paths.len())?;

        let _guard = span.enter();

        let reward_amount = self.options.reward_amount;
        let mut history = Vec::new();
        let mut events = Vec::new();
        let mut rewards_issued: u64 = 0;
        let mut convergence = None;
        let mut ctx = ActionContext::new(store, ledger);

        for (p, path) in paths.iter().enumerate() {
            for (c, contract) in self.contracts.iter_mut().enumerate() {
                if let Some(ttl) = contract.ttl().filter(|_| contract.is_expired()) {
                    ContractExpired {
                        contract: contract.name(),
                        ttl,
                    }
                    .log();
                    events.push(VmEvent::Expired {
                        contract: contract.name().to_string(),
                    });
                    continue;
                }

                if let Some(dependency) = contract.dependency() {
                    if !self.executed.contains(dependency) {
                        ContractWaiting {
                            contract: contract.name(),
                            dependency,
                        }
                        .log();
                        events.push(VmEvent::Waiting {
                            contract: contract.name().to_string(),
                            dependency: dependency.to_string(),
                        });
                        continue;
                    }
                }

                let outcome = contract.execute_checked(matrix[c][p].clone(), path, &mut ctx)?;
                let name = contract.name().to_string();
                let action = contract.action_name();
                let layer = contract.layer();

                match outcome.class() {
                    OutcomeClass::Reward => {
                        self.reward_pool = self.reward_pool.saturating_add(reward_amount);
                        rewards_issued = rewards_issued.saturating_add(reward_amount);
                        self.executed.insert(name.clone());
                        if convergence.is_none() && self.options.track_convergence {
                            convergence = Some(ConvergenceSample {
                                round,
                                block_time: started.elapsed(),
                            });
                        }
                        RewardIssued {
                            contract: &name,
                            layer,
                            path,
                            amount: reward_amount,
                            pool: self.reward_pool,
                        }
                        .log();
                        events.push(VmEvent::Reward {
                            contract: name.clone(),
                            layer,
                            path: path.clone(),
                        });
                    }
                    OutcomeClass::Skipped => {
                        let reason = failure_reason(&outcome);
                        ContractSkipped {
                            contract: &name,
                            path,
                            reason: &reason,
                        }
                        .log();
                        events.push(VmEvent::Skipped {
                            contract: name.clone(),
                            layer,
                            path: path.clone(),
                            reason,
                        });
                    }
                    OutcomeClass::Success => {
                        self.executed.insert(name.clone());
                        ContractExecuted {
                            contract: &name,
                            action,
                            layer,
                            path,
                            outcome: &outcome,
                        }
                        .log();
                        events.push(VmEvent::Executed {
                            contract: name.clone(),
                            layer,
                            path: path.clone(),
                        });
                    }
                    OutcomeClass::Failure => {
                        ContractExecuted {
                            contract: &name,
                            action,
                            layer,
                            path,
                            outcome: &outcome,
                        }
                        .log();
                        events.push(VmEvent::Failed {
                            contract: name.clone(),
                            layer,
                            path: path.clone(),
                            reason: failure_reason(&outcome),
                        });
                    }
                }

                history.push(ExecutionRecord {
                    contract: name,
                    path: path.clone(),
                    outcome,
                });
            }
        }

        self.round = round;
        if self.options.track_convergence {
            self.metrics.record_round(convergence);
        }
        self.history.extend(history.iter().cloned());
        self.events.extend(events.iter().cloned());

        RoundCompleted {
            round,
            executions: history.len(),
            rewards_issued,
            reward_pool: self.reward_pool,
            duration: started.elapsed(),
        }
        .log();

        Ok(RoundResult {
            round,
            path_count: paths.len(),
            history,
            events,
            rewards_issued,
            reward_pool: self.reward_pool,
            convergence,
        })
    }

    fn check_matrix_shape(&self, matrix: &MatchMatrix, path_count: usize) -> Result<(), RoundError> {
        if matrix.len() != self.contracts.len() || matrix.iter().any(|row| row.len() != path_count) {
            return Err(RoundError::Evaluation(format!(
                "{} evaluator returned a malformed match matrix",
                self.evaluator.name()
            )));
        }
        Ok(())
    }
}

fn failure_reason(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Skipped(reason) => reason.clone(),
        Outcome::TransferFailed(error) => error.to_string(),
        other => other.to_string(),
    }
}

impl fmt::Debug for StructureVm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructureVm")
            .field("evaluator", &self.evaluator.name())
            .field("contracts", &self.contracts)
            .field("round", &self.round)
            .field("reward_pool", &self.reward_pool)
            .field("history_len", &self.history.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{AuditAction, RewardAction, TransferAction};
    use crate::config::Strategy;
    use crate::contract::MatchMode;
    use crate::errors::LedgerError;
    use crate::paths::{EnumerationOptions, PathLimits};
    use crate::traits::FnAction;
    use crate::unit::{StructureUnit, UnitId};

    /// Three-unit chain u1 <- u2 <- u3.
    fn chain_store() -> (UnitStore, Vec<UnitId>) {
        let mut store = UnitStore::new();
        let u1 = store
            .insert(StructureUnit::new(1.0, 0.5, 0.2, 0.95, vec![]))
            .unwrap();
        let u2 = store
            .insert(StructureUnit::new(2.0, 0.3, 0.1, 0.96, vec![u1.clone()]))
            .unwrap();
        let u3 = store
            .insert(StructureUnit::new(3.0, 0.7, 0.4, 0.97, vec![u2.clone()]))
            .unwrap();
        (store, vec![u1, u2, u3])
    }

    fn reward_contract() -> StructureContract {
        StructureContract::new("ResonanceReward", 0.3, 0.9, Arc::new(RewardAction))
            .with_mode(MatchMode::Endpoint)
            .with_priority(10)
            .with_layer(1)
    }

    fn audit_contract() -> StructureContract {
        StructureContract::new("ComplianceAudit", 0.4, 0.6, Arc::new(AuditAction))
            .with_mode(MatchMode::Endpoint)
            .with_priority(5)
            .depends_on("ResonanceReward")
            .with_ttl(3)
    }

    fn layered_vm(options: VmOptions) -> StructureVm {
        let mut vm = StructureVm::new(options);
        // registered out of order on purpose
        vm.add_contract(audit_contract());
        vm.add_contract(reward_contract());
        vm
    }

    fn event_kinds(events: &[VmEvent]) -> Vec<&'static str> {
        events
            .iter()
            .map(|e| match e {
                VmEvent::Expired { .. } => "expired",
                VmEvent::Waiting { .. } => "waiting",
                VmEvent::Reward { .. } => "reward",
                VmEvent::Skipped { .. } => "skipped",
                VmEvent::Executed { .. } => "executed",
                VmEvent::Failed { .. } => "failed",
            })
            .collect()
    }

    #[tokio::test]
    async fn test_layered_round() {
        let (mut store, ids) = chain_store();
        let mut ledger = Ledger::new();
        let mut vm = layered_vm(VmOptions::default());

        let result = vm.run_round(&mut store, &mut ledger).await.unwrap();

        assert_eq!(result.round, 1);
        assert_eq!(result.path_count, 3);
        assert_eq!(
            event_kinds(&result.events),
            vec!["skipped", "waiting", "reward", "executed", "reward", "executed"]
        );
        assert_eq!(result.history.len(), 5);
        assert_eq!(result.rewards_issued, 20);
        assert_eq!(vm.reward_pool(), 20);
        assert_eq!(vm.round(), 1);
        assert!(vm.has_executed("ComplianceAudit"));
        assert!(result.converged());

        let audit = &vm.contracts()[1];
        assert_eq!(audit.name(), "ComplianceAudit");
        assert_eq!(audit.activation_count(), 2);

        assert_eq!(
            result.events[2].to_string(),
            format!("[Layer 1] Reward triggered by [{}, {}]", ids[0], ids[1])
        );
        assert!(ids.iter().all(|id| store.get(id).unwrap().locked));
    }

    #[tokio::test]
    async fn test_ttl_caps_activations_across_rounds() {
        let (mut store, _) = chain_store();
        let mut ledger = Ledger::new();
        let mut vm = layered_vm(VmOptions::default());

        vm.run_round(&mut store, &mut ledger).await.unwrap();
        let second = vm.run_round(&mut store, &mut ledger).await.unwrap();
        let third = vm.run_round(&mut store, &mut ledger).await.unwrap();

        // round 2: [u1] fails the match, [u1,u2] hits the third activation, then expiry
        assert_eq!(
            event_kinds(&second.events),
            vec!["skipped", "skipped", "reward", "executed", "reward", "expired"]
        );
        assert_eq!(
            event_kinds(&third.events),
            vec!["skipped", "expired", "reward", "expired", "reward", "expired"]
        );

        let audit_successes = vm
            .history()
            .iter()
            .filter(|r| r.contract == "ComplianceAudit" && matches!(r.outcome, Outcome::Generic(_)))
            .count();
        assert_eq!(audit_successes, 3);
        assert_eq!(vm.contracts()[1].activation_count(), 3);
        assert_eq!(vm.reward_pool(), 60);
    }

    #[tokio::test]
    async fn test_dependency_never_released_without_success() {
        let (mut store, _) = chain_store();
        let mut ledger = Ledger::new();
        let mut vm = StructureVm::new(VmOptions::default());
        // impossible thresholds: never rewards
        vm.add_contract(StructureContract::new("Never", 0.0, 1.0, Arc::new(RewardAction)).with_layer(1));
        vm.add_contract(
            StructureContract::new("Dependent", 1.0, 0.0, Arc::new(AuditAction)).depends_on("Never"),
        );

        let result = vm.run_round(&mut store, &mut ledger).await.unwrap();

        assert!(result
            .history
            .iter()
            .all(|r| r.contract == "Never" && matches!(r.outcome, Outcome::Skipped(_))));
        assert_eq!(
            result
                .events
                .iter()
                .filter(|e| matches!(e, VmEvent::Waiting { .. }))
                .count(),
            3
        );
        assert!(!vm.has_executed("Dependent"));
        assert!(!result.converged());
    }

    #[test]
    fn test_stable_order_for_equal_keys() {
        let mut vm = StructureVm::new(VmOptions::default());
        for name in ["first", "second", "third"] {
            vm.add_contract(StructureContract::new(name, 0.3, 0.9, Arc::new(AuditAction)).with_priority(1));
        }
        vm.add_contract(StructureContract::new("top", 0.3, 0.9, Arc::new(AuditAction)).with_layer(2));
        vm.add_contract(StructureContract::new("low", 0.3, 0.9, Arc::new(AuditAction)).with_priority(-1));

        let names: Vec<&str> = vm.contracts().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["top", "first", "second", "third", "low"]);
    }

    #[tokio::test]
    async fn test_invalid_dependency_fails_before_round() {
        let (mut store, _) = chain_store();
        let mut ledger = Ledger::new();
        let mut vm = StructureVm::new(VmOptions::default());
        vm.add_contract(StructureContract::new("audit", 0.4, 0.6, Arc::new(AuditAction)).depends_on("ghost"));

        let error = vm.run_round(&mut store, &mut ledger).await.unwrap_err();

        assert!(matches!(
            &error,
            RoundError::InvalidContracts(errors)
                if matches!(&errors[0], ValidationError::InvalidDependencyReference { missing_dependency, .. } if missing_dependency == "ghost")
        ));
        assert_eq!(vm.round(), 0);
        assert!(vm.events().is_empty());
        assert!(store.all().all(|u| !u.locked));
    }

    #[tokio::test]
    async fn test_path_limit_leaves_vm_untouched() {
        let (mut store, _) = chain_store();
        let mut ledger = Ledger::new();
        let options = VmOptions {
            paths: EnumerationOptions {
                limits: PathLimits {
                    max_paths: Some(2),
                    max_depth: None,
                },
                ..EnumerationOptions::default()
            },
            ..VmOptions::default()
        };
        let mut vm = layered_vm(options);

        let error = vm.run_round(&mut store, &mut ledger).await.unwrap_err();

        assert!(matches!(error, RoundError::PathLimitExceeded(_)));
        assert_eq!(vm.round(), 0);
        assert_eq!(vm.reward_pool(), 0);
        assert!(vm.history().is_empty());
        assert_eq!(vm.contracts()[1].activation_count(), 0);
    }

    #[tokio::test]
    async fn test_transfer_round_conserves_supply() {
        let mut store = UnitStore::new();
        let sender = store
            .insert(StructureUnit::new(0.0, 0.5, 0.2, 0.8, vec![]).owned_by("a", 10))
            .unwrap();
        store
            .insert(StructureUnit::new(1.0, 0.49, 0.19, 0.82, vec![sender.clone()]))
            .unwrap();
        let mut ledger = Ledger::from_store(&store).unwrap();
        assert_eq!(ledger.balance("a"), 10);

        let mut vm = StructureVm::new(VmOptions::default());
        vm.add_contract(StructureContract::new("TokenTransfer", 0.35, 0.65, Arc::new(TransferAction::new("b"))));

        let first = vm.run_round(&mut store, &mut ledger).await.unwrap();
        assert_eq!(ledger.balance("a"), 0);
        assert_eq!(ledger.balance("b"), 10);
        assert!(ledger.is_conserved());

        let receipt = match &first.history[1].outcome {
            Outcome::Transferred(receipt) => receipt.clone(),
            other => panic!("expected transfer, got {:?}", other),
        };
        assert_eq!(receipt.spent, sender);
        let minted = store.get(&receipt.minted).unwrap();
        assert_eq!(minted.provenance, vec![sender.clone()]);
        assert_eq!(minted.owner.as_deref(), Some("b"));
        assert!(vm.has_executed("TokenTransfer"));

        // the minted unit hangs off the sender, so round 2 sees new paths
        let second = vm.run_round(&mut store, &mut ledger).await.unwrap();
        assert_eq!(second.path_count, 3);
        let failures: Vec<&Outcome> = second
            .history
            .iter()
            .map(|r| &r.outcome)
            .filter(|o| matches!(o, Outcome::TransferFailed(LedgerError::AlreadySpent(id)) if *id == sender))
            .collect();
        assert_eq!(failures.len(), 2);
        assert_eq!(ledger.balance("b"), 10);
        assert!(ledger.is_conserved());
        assert!(event_kinds(&second.events).contains(&"failed"));
    }

    #[tokio::test]
    async fn test_failed_outcome_does_not_release_dependents() {
        let (mut store, _) = chain_store();
        let mut ledger = Ledger::new();
        let mut vm = StructureVm::new(VmOptions::default());
        vm.add_contract(
            StructureContract::new(
                "Refused",
                1.0,
                0.0,
                Arc::new(FnAction::new("refuse", |path, _ctx| {
                    Outcome::TransferFailed(LedgerError::Unowned(path.ids()[0].clone()))
                })),
            )
            .with_layer(1),
        );
        vm.add_contract(StructureContract::new("After", 1.0, 0.0, Arc::new(AuditAction)).depends_on("Refused"));

        let result = vm.run_round(&mut store, &mut ledger).await.unwrap();

        assert!(!vm.has_executed("Refused"));
        assert!(!vm.has_executed("After"));
        assert_eq!(vm.reward_pool(), 0);
        assert!(result.history.iter().all(|r| r.contract == "Refused"));
    }

    #[tokio::test]
    async fn test_concurrent_strategy_matches_sequential() {
        let options = VmOptions {
            strategy: Strategy::Concurrent,
            max_concurrency: Some(2),
            ..VmOptions::default()
        };

        let (mut store_a, _) = chain_store();
        let (mut store_b, _) = chain_store();
        let mut ledger = Ledger::new();

        let mut sequential = layered_vm(VmOptions::default());
        let mut concurrent = layered_vm(options);

        for _ in 0..3 {
            let a = sequential.run_round(&mut store_a, &mut ledger).await.unwrap();
            let b = concurrent.run_round(&mut store_b, &mut ledger).await.unwrap();
            assert_eq!(a.history, b.history);
            assert_eq!(a.events, b.events);
        }
    }

    #[tokio::test]
    async fn test_run_rounds_respects_cancellation() {
        let (mut store, _) = chain_store();
        let mut ledger = Ledger::new();
        let mut vm = layered_vm(VmOptions::default());

        let cancel = CancellationToken::new();
        let outcome = vm.run_rounds(4, &mut store, &mut ledger, &cancel).await;
        assert!(outcome.is_ok());
        assert_eq!(outcome.rounds.len(), 4);
        assert_eq!(vm.summary().converged_rounds, 4);
        assert_eq!(vm.summary().mean_convergence_round, Some(2.5));

        cancel.cancel();
        let outcome = vm.run_rounds(4, &mut store, &mut ledger, &cancel).await;
        assert!(outcome.is_ok());
        assert!(outcome.rounds.is_empty());
        assert_eq!(vm.round(), 4);
    }

    #[tokio::test]
    async fn test_run_rounds_keeps_committed_rounds_after_failure() {
        let mut store = UnitStore::new();
        let sender = store
            .insert(StructureUnit::new(0.0, 0.5, 0.2, 0.8, vec![]).owned_by("a", 10))
            .unwrap();
        store
            .insert(StructureUnit::new(1.0, 0.49, 0.19, 0.82, vec![sender.clone()]))
            .unwrap();
        let mut ledger = Ledger::from_store(&store).unwrap();

        // room for round 1's two paths, not for the minted unit's extra one
        let options = VmOptions {
            paths: EnumerationOptions {
                limits: PathLimits {
                    max_paths: Some(2),
                    max_depth: None,
                },
                ..EnumerationOptions::default()
            },
            ..VmOptions::default()
        };
        let mut vm = StructureVm::new(options);
        vm.add_contract(StructureContract::new("TokenTransfer", 0.35, 0.65, Arc::new(TransferAction::new("b"))));

        let outcome = vm
            .run_rounds(3, &mut store, &mut ledger, &CancellationToken::new())
            .await;

        assert!(matches!(outcome.error, Some(RoundError::PathLimitExceeded(_))));
        assert_eq!(outcome.rounds.len(), 1);
        assert_eq!(outcome.rounds[0].round, 1);
        assert_eq!(outcome.rounds[0].history.len(), 2);
        assert_eq!(vm.round(), 1);
        assert_eq!(ledger.balance("b"), 10);
        assert!(outcome.rounds[0]
            .history
            .iter()
            .any(|r| matches!(&r.outcome, Outcome::Transferred(receipt) if receipt.spent == sender)));
    }

    #[tokio::test]
    async fn test_reward_pool_saturates() {
        let (mut store, _) = chain_store();
        let mut ledger = Ledger::new();
        let options = VmOptions {
            reward_amount: u64::MAX,
            ..VmOptions::default()
        };
        let mut vm = layered_vm(options);

        let result = vm.run_round(&mut store, &mut ledger).await.unwrap();

        // two rewards in the round
        assert_eq!(result.rewards_issued, u64::MAX);
        assert_eq!(vm.reward_pool(), u64::MAX);

        vm.run_round(&mut store, &mut ledger).await.unwrap();
        assert_eq!(vm.reward_pool(), u64::MAX);
    }

    #[tokio::test]
    async fn test_convergence_tracking_can_be_disabled() {
        let (mut store, _) = chain_store();
        let mut ledger = Ledger::new();
        let options = VmOptions {
            track_convergence: false,
            ..VmOptions::default()
        };
        let mut vm = layered_vm(options);

        let result = vm.run_round(&mut store, &mut ledger).await.unwrap();

        assert_eq!(result.convergence, None);
        assert_eq!(vm.metrics().rounds_recorded(), 0);
        assert_eq!(vm.reward_pool(), 20);
    }
}
