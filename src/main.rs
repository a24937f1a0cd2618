// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::time::Instant;

use anyhow::{bail, Context};
use serde::Serialize;
use structure_vm::config::{load_and_validate_config, RuntimeBuilder};
use structure_vm::ledger::Ledger;
use structure_vm::unit::StructureUnit;
use structure_vm::vm::{ConvergenceSummary, RoundResult};
use tokio_util::sync::CancellationToken;

/// Machine-readable result of a scenario run
#[derive(Serialize)]
struct Report<'a> {
    scenario: &'a str,
    rounds: &'a [RoundResult],
    summary: ConvergenceSummary,
    ledger: &'a Ledger,
    minted: Vec<&'a StructureUnit>,
    /// The failure that ended the run before all rounds completed
    error: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("structure_vm=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("structure-vm");
    let json = args.iter().any(|a| a == "--json");
    let scenarios: Vec<&String> = args.iter().skip(1).filter(|a| *a != "--json").collect();

    let [scenario] = scenarios.as_slice() else {
        eprintln!("Usage: {} <scenario.yaml|scenario.toml> [--json]", program);
        eprintln!("Example: {} configs/layered-audit.yaml", program);
        bail!("expected exactly one scenario file");
    };

    let start_time = Instant::now();
    let config = load_and_validate_config(scenario.as_str())
        .with_context(|| format!("loading scenario {}", scenario))?;
    let mut runtime = RuntimeBuilder::from_config(&config)
        .with_context(|| format!("building runtime for {}", scenario))?;

    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_token.cancel();
        }
    });

    let outcome = runtime.run(&cancel).await;
    let results = &outcome.rounds;
    let summary = runtime.vm.summary();

    if json {
        let report = Report {
            scenario: scenario.as_str(),
            rounds: results,
            summary,
            ledger: &runtime.ledger,
            minted: runtime.minted_units().collect(),
            error: outcome.error.as_ref().map(|e| e.to_string()),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Scenario: {}", scenario);
        println!("Evaluator: {:?}", config.vm.strategy);
        for result in results {
            println!("\n--- Contract Execution History (Round {}) ---", result.round);
            for record in &result.history {
                println!("{}", record);
            }
            println!("\n--- Events ---");
            for event in &result.events {
                println!("{}", event);
            }
        }

        println!("\nTotal Reward Pool: {} tokens", summary.reward_pool);
        match summary.mean_convergence_round {
            Some(mean) => println!(
                "Average convergence round over {} rounds: {:.2}",
                summary.converged_rounds, mean
            ),
            None => println!("No convergence occurred in any round."),
        }
        if let Some(block_time) = summary.mean_block_time {
            println!("Average block time: {:?}", block_time);
        }

        if runtime.ledger.total_supply() > 0 {
            println!("\nBalances:");
            for (owner, balance) in runtime.ledger.balances() {
                println!("  {}: {}", owner, balance);
            }
            println!(
                "Total supply: {} (conserved: {})",
                runtime.ledger.total_supply(),
                runtime.ledger.is_conserved()
            );
        }

        let minted: Vec<&StructureUnit> = runtime.minted_units().collect();
        if !minted.is_empty() {
            println!("\nProvenance:");
            for unit in minted {
                let trace: Vec<String> = unit.provenance.iter().map(|id| id.to_string()).collect();
                println!(
                    "  {} ({}: {}) <- {}",
                    unit.id,
                    unit.owner.as_deref().unwrap_or("-"),
                    unit.value,
                    trace.join(" <- ")
                );
            }
        }

        println!("\nTotal time: {:?}", start_time.elapsed());
    }

    if let Some(error) = outcome.error {
        return Err(error).with_context(|| {
            format!(
                "round {} of {} failed",
                results.len() + 1,
                runtime.rounds
            )
        });
    }
    Ok(())
}
