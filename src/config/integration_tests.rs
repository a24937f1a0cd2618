// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use tokio_util::sync::CancellationToken;

use crate::config::{load_and_validate_config, RuntimeBuilder, Strategy};
use crate::contract::{MatchMode, Outcome};
use crate::errors::LedgerError;
use crate::unit::UnitId;
use crate::vm::VmEvent;

/// Test that the layered scenario loads with its contract settings intact
#[test]
fn test_layered_audit_yaml_loading() {
    let config = load_and_validate_config("configs/layered-audit.yaml").unwrap();

    assert_eq!(config.rounds, 3);
    assert_eq!(config.match_mode, MatchMode::Endpoint);
    assert_eq!(config.vm.strategy, Strategy::Sequential);
    assert_eq!(config.units.len(), 3);
    assert_eq!(config.units[2].refs, vec!["u2"]);
    assert_eq!(config.contracts.len(), 2);
    assert_eq!(config.contracts[1].depends_on.as_deref(), Some("ResonanceReward"));
    assert_eq!(config.contracts[1].ttl, Some(3));
}

#[tokio::test]
async fn test_layered_audit_runs_all_rounds() {
    let config = load_and_validate_config("configs/layered-audit.yaml").unwrap();
    let mut runtime = RuntimeBuilder::from_config(&config).unwrap();

    let outcome = runtime.run(&CancellationToken::new()).await;
    assert!(outcome.is_ok());
    let results = outcome.rounds;

    assert_eq!(results.len(), 3);
    assert_eq!(runtime.vm.reward_pool(), 60);
    assert_eq!(runtime.vm.contracts()[1].activation_count(), 3);

    let expired = runtime
        .vm
        .events()
        .iter()
        .filter(|e| matches!(e, VmEvent::Expired { contract } if contract == "ComplianceAudit"))
        .count();
    // one in round 2, three in round 3
    assert_eq!(expired, 4);

    let summary = runtime.vm.summary();
    assert_eq!(summary.converged_rounds, 3);
    assert_eq!(summary.mean_convergence_round, Some(2.0));
}

#[tokio::test]
async fn test_token_transfer_conserves_supply() {
    let config = load_and_validate_config("configs/token-transfer.yaml").unwrap();
    let mut runtime = RuntimeBuilder::from_config(&config).unwrap();
    assert_eq!(runtime.ledger.balance("a"), 40);
    assert_eq!(runtime.ledger.balance("b"), 10);

    let outcome = runtime.run(&CancellationToken::new()).await;
    assert!(outcome.is_ok());
    let results = outcome.rounds;

    assert_eq!(runtime.ledger.balance("a"), 30);
    assert_eq!(runtime.ledger.balance("b"), 20);
    assert_eq!(runtime.ledger.total_supply(), 50);
    assert!(runtime.ledger.is_conserved());

    let u0: UnitId = runtime.unit_id("u0").unwrap().clone();
    let history = &results[0].history;
    let transferred: Vec<_> = history
        .iter()
        .filter_map(|r| match &r.outcome {
            Outcome::Transferred(receipt) => Some(receipt),
            _ => None,
        })
        .collect();
    assert_eq!(transferred.len(), 1);
    assert_eq!(transferred[0].spent, u0);

    let minted = runtime.store.get(&transferred[0].minted).unwrap();
    assert_eq!(minted.provenance, vec![u0.clone()]);
    assert!(runtime.store.get(&u0).unwrap().spent);

    let double_spends = history
        .iter()
        .filter(|r| matches!(&r.outcome, Outcome::TransferFailed(LedgerError::AlreadySpent(id)) if *id == u0))
        .count();
    assert_eq!(double_spends, 3);
}

#[tokio::test]
async fn test_convergence_toml_scenario() {
    let config = load_and_validate_config("configs/convergence.toml").unwrap();
    assert_eq!(config.vm.strategy, Strategy::Concurrent);
    assert_eq!(config.vm.max_concurrency, Some(2));
    assert_eq!(config.vm.paths.limits.max_depth, Some(16));

    let mut runtime = RuntimeBuilder::from_config(&config).unwrap();
    let outcome = runtime.run(&CancellationToken::new()).await;
    assert!(outcome.is_ok());
    let results = outcome.rounds;

    assert!(results.iter().all(|r| r.path_count == 10));
    assert!(results.iter().all(|r| r.rewards_issued == 30));

    let summary = runtime.vm.summary();
    assert_eq!(summary.rounds, 3);
    assert_eq!(summary.converged_rounds, 3);
    assert_eq!(summary.mean_convergence_round, Some(2.0));
    assert_eq!(summary.reward_pool, 90);
}
