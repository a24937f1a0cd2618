// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use super::{AuditAction, RewardAction, TransferAction};
use crate::config::ContractConfig;
use crate::errors::ConfigError;
use crate::traits::Action;

/// Factory for building contract actions from scenario configuration
pub struct ActionFactory;

impl ActionFactory {
    /// Create the action named by a contract's `action` field
    ///
    /// - "reward" -> RewardAction
    /// - "audit" -> AuditAction
    /// - "transfer" -> TransferAction (requires the `receiver` option)
    pub fn create_action(config: &ContractConfig) -> Result<Arc<dyn Action>, ConfigError> {
        match config.action.as_str() {
            "reward" => Ok(Arc::new(RewardAction)),
            "audit" => Ok(Arc::new(AuditAction)),
            "transfer" => {
                let receiver = config.option_str("receiver").ok_or_else(|| {
                    ConfigError::MissingActionOption {
                        contract: config.name.clone(),
                        option: "receiver".to_string(),
                    }
                })?;
                Ok(Arc::new(TransferAction::new(receiver)))
            }
            other => Err(ConfigError::UnknownAction {
                contract: config.name.clone(),
                action: other.to_string(),
            }),
        }
    }

    /// List all built-in action names
    pub fn list_available_actions() -> Vec<&'static str> {
        vec!["reward", "audit", "transfer"]
    }

    pub fn is_action_available(name: &str) -> bool {
        Self::list_available_actions().contains(&name)
    }
}
