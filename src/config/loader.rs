// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::config::consts::{DEFAULT_REWARD_AMOUNT, DEFAULT_ROUNDS};
use crate::config::validate_contract_graph;
use crate::contract::MatchMode;
use crate::errors::ConfigError;
use crate::paths::EnumerationOptions;

/// A complete scenario: VM options, the unit DAG and the contract set.
///
/// Units refer to their parents through scenario-local `key`s because unit
/// identifiers are derived from content and not known while writing the file.
///
/// # Example
/// ```yaml
/// rounds: 2
/// match_mode: endpoint
/// vm:
///   strategy: concurrent
///   max_concurrency: 4
///   reward_amount: 10
///   paths:
///     mode: recursive
///     limits:
///       max_paths: 1000
///       max_depth: 32
/// units:
///   - key: a
///     x: 1
///     phi: 0.5
///     delta: 0.2
///     entropy: 0.95
///   - key: b
///     x: 2
///     phi: 0.3
///     delta: 0.1
///     entropy: 0.96
///     refs: [a]
/// contracts:
///   - name: ResonanceReward
///     delta_thresh: 0.3
///     entropy_thresh: 0.9
///     priority: 10
///     layer: 1
///     action: reward
/// ```
#[derive(Debug, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default = "default_rounds")]
    pub rounds: u64,
    /// Match mode for contracts that do not pick their own
    #[serde(default)]
    pub match_mode: MatchMode,
    #[serde(default)]
    pub vm: VmOptions,
    #[serde(default)]
    pub units: Vec<UnitConfig>,
    #[serde(default)]
    pub contracts: Vec<ContractConfig>,
}

fn default_rounds() -> u64 {
    DEFAULT_ROUNDS
}

/// How match verdicts are computed each round.
///
/// # Variants
/// * `Sequential` - evaluate every contract inline on the calling task
/// * `Concurrent` - evaluate each contract's verdicts in its own tokio task
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    Sequential,
    Concurrent,
}

/// Virtual machine options.
///
/// # Fields
/// * `strategy` - match evaluation strategy
/// * `max_concurrency` - task limit for the concurrent strategy (defaults to CPU count)
/// * `paths` - path enumeration mode and limits
/// * `reward_amount` - tokens added to the reward pool per reward outcome
/// * `track_convergence` - record per-round convergence samples
#[derive(Debug, Clone, Deserialize)]
pub struct VmOptions {
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub max_concurrency: Option<usize>,
    #[serde(default)]
    pub paths: EnumerationOptions,
    #[serde(default = "default_reward_amount")]
    pub reward_amount: u64,
    #[serde(default = "default_track_convergence")]
    pub track_convergence: bool,
}

fn default_reward_amount() -> u64 {
    DEFAULT_REWARD_AMOUNT
}

fn default_track_convergence() -> bool {
    true
}

impl Default for VmOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            max_concurrency: None,
            paths: EnumerationOptions::default(),
            reward_amount: DEFAULT_REWARD_AMOUNT,
            track_convergence: true,
        }
    }
}

/// One structure unit of a scenario.
///
/// `owner` and `value` are only needed for ledger scenarios.
#[derive(Debug, Deserialize)]
pub struct UnitConfig {
    pub key: String,
    pub x: f64,
    pub phi: f64,
    pub delta: f64,
    pub entropy: f64,
    #[serde(default)]
    pub refs: Vec<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub value: u64,
}

/// One contract of a scenario.
///
/// `action` names a built-in action (`reward`, `audit`, `transfer`); action
/// specific settings such as the transfer `receiver` go in `options`.
///
/// # Example
/// ```yaml
/// name: ComplianceAudit
/// delta_thresh: 0.4
/// entropy_thresh: 0.6
/// priority: 5
/// depends_on: ResonanceReward
/// ttl: 3
/// action: audit
/// ```
#[derive(Debug, Deserialize)]
pub struct ContractConfig {
    pub name: String,
    pub delta_thresh: f64,
    pub entropy_thresh: f64,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub layer: i32,
    #[serde(default)]
    pub depends_on: Option<String>,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub match_mode: Option<MatchMode>,
    pub action: String,
    #[serde(default)]
    pub options: HashMap<String, serde_yaml::Value>,
}

impl ContractConfig {
    /// String option lookup, e.g. the transfer receiver.
    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(|v| v.as_str())
    }
}

/// Load a scenario from a YAML file, or TOML when the extension is `.toml`.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let cfg = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content)?,
        _ => serde_yaml::from_str(&content)?,
    };
    Ok(cfg)
}

/// Load a scenario and validate its contract dependencies.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    let cfg = load_config(path)?;

    validate_contract_graph(
        cfg.contracts
            .iter()
            .map(|c| (c.name.as_str(), c.depends_on.as_deref())),
    )
    .map_err(ConfigError::Validation)?;

    Ok(cfg)
}
