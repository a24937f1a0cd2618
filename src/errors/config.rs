// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{LedgerError, StoreError, ValidationError};
use thiserror::Error;

/// Errors that can occur while loading a scenario and building its runtime.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML scenario: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML scenario: {0}")]
    Toml(#[from] toml::de::Error),

    /// A unit's `refs` names a key that no earlier unit declared
    #[error("unit '{unit}' references unknown key '{missing}'")]
    UnknownUnitKey { unit: String, missing: String },

    #[error("duplicate unit key: '{0}'")]
    DuplicateUnitKey(String),

    #[error("contract '{contract}' uses unknown action '{action}'")]
    UnknownAction { contract: String, action: String },

    #[error("contract '{contract}' is missing option '{option}'")]
    MissingActionOption { contract: String, option: String },

    #[error("Configuration validation failed:\n{}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Seeding balances from the scenario's owned units failed
    #[error("invalid genesis ledger: {0}")]
    Ledger(#[from] LedgerError),
}
