// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use tokio_util::sync::CancellationToken;

use crate::actions::ActionFactory;
use crate::config::ScenarioConfig;
use crate::contract::StructureContract;
use crate::errors::ConfigError;
use crate::ledger::Ledger;
use crate::unit::{StructureUnit, UnitId, UnitStore};
use crate::vm::{RunOutcome, StructureVm};

/// Everything needed to run a scenario: the populated store, the genesis
/// ledger and a VM with every contract registered.
#[derive(Debug)]
pub struct Runtime {
    pub store: UnitStore,
    pub ledger: Ledger,
    pub vm: StructureVm,
    pub rounds: u64,
    /// Scenario key of every unit, in declaration order
    pub keys: Vec<(String, UnitId)>,
}

impl Runtime {
    /// Run the scenario's configured number of rounds.
    ///
    /// Stops early when `cancel` fires. A failed round ends the run; the
    /// rounds committed before it come back alongside the error.
    pub async fn run(&mut self, cancel: &CancellationToken) -> RunOutcome {
        self.vm
            .run_rounds(self.rounds, &mut self.store, &mut self.ledger, cancel)
            .await
    }

    /// Units minted by transfers, in store order, each carrying its provenance.
    pub fn minted_units(&self) -> impl Iterator<Item = &StructureUnit> {
        self.store.all().filter(|u| !u.provenance.is_empty())
    }

    /// Look up the id derived for a scenario key.
    pub fn unit_id(&self, key: &str) -> Option<&UnitId> {
        self.keys.iter().find(|(k, _)| k == key).map(|(_, id)| id)
    }
}

/// Scenario runtime builder - turns a loaded scenario into a ready [`Runtime`].
///
/// Units are inserted in declaration order, so a unit may only reference keys
/// declared above it. Contracts get the scenario-wide match mode unless they
/// set their own.
///
/// # Examples
///
/// ```
/// use structure_vm::config::{RuntimeBuilder, ScenarioConfig};
///
/// let cfg: ScenarioConfig = serde_yaml::from_str(r#"
/// units:
///   - { key: a, x: 1, phi: 0.5, delta: 0.2, entropy: 0.95 }
///   - { key: b, x: 2, phi: 0.3, delta: 0.1, entropy: 0.96, refs: [a] }
/// contracts:
///   - { name: ResonanceReward, delta_thresh: 0.3, entropy_thresh: 0.9, action: reward }
/// "#).unwrap();
///
/// let runtime = RuntimeBuilder::from_config(&cfg).unwrap();
/// assert_eq!(runtime.store.len(), 2);
/// assert_eq!(runtime.vm.contracts().len(), 1);
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    pub fn from_config(cfg: &ScenarioConfig) -> Result<Runtime, ConfigError> {
        let (store, keys) = Self::build_store(cfg)?;
        let ledger = Ledger::from_store(&store)?;

        let mut vm = StructureVm::new(cfg.vm.clone());
        for contract_cfg in &cfg.contracts {
            let action = ActionFactory::create_action(contract_cfg)?;
            let mut contract = StructureContract::new(
                contract_cfg.name.clone(),
                contract_cfg.delta_thresh,
                contract_cfg.entropy_thresh,
                action,
            )
            .with_mode(contract_cfg.match_mode.unwrap_or(cfg.match_mode))
            .with_priority(contract_cfg.priority)
            .with_layer(contract_cfg.layer);

            if let Some(dependency) = &contract_cfg.depends_on {
                contract = contract.depends_on(dependency.clone());
            }
            if let Some(ttl) = contract_cfg.ttl {
                contract = contract.with_ttl(ttl);
            }
            vm.add_contract(contract);
        }

        vm.validate().map_err(ConfigError::Validation)?;

        Ok(Runtime {
            store,
            ledger,
            vm,
            rounds: cfg.rounds,
            keys,
        })
    }

    fn build_store(cfg: &ScenarioConfig) -> Result<(UnitStore, Vec<(String, UnitId)>), ConfigError> {
        let mut store = UnitStore::new();
        let mut ids: HashMap<&str, UnitId> = HashMap::new();
        let mut keys = Vec::with_capacity(cfg.units.len());

        for unit_cfg in &cfg.units {
            if ids.contains_key(unit_cfg.key.as_str()) {
                return Err(ConfigError::DuplicateUnitKey(unit_cfg.key.clone()));
            }

            let refs = unit_cfg
                .refs
                .iter()
                .map(|key| {
                    ids.get(key.as_str())
                        .cloned()
                        .ok_or_else(|| ConfigError::UnknownUnitKey {
                            unit: unit_cfg.key.clone(),
                            missing: key.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let mut unit = StructureUnit::new(
                unit_cfg.x,
                unit_cfg.phi,
                unit_cfg.delta,
                unit_cfg.entropy,
                refs,
            );
            if let Some(owner) = &unit_cfg.owner {
                unit = unit.owned_by(owner.clone(), unit_cfg.value);
            }

            let id = store.insert(unit)?;
            ids.insert(unit_cfg.key.as_str(), id.clone());
            keys.push((unit_cfg.key.clone(), id));
        }

        Ok((store, keys))
    }
}
