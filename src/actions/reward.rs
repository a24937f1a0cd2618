// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::contract::Outcome;
use crate::paths::Path;
use crate::traits::{Action, ActionContext};

/// Grants a reward for the matched path.
pub struct RewardAction;

impl Action for RewardAction {
    fn apply(&self, path: &Path, _ctx: &mut ActionContext<'_>) -> Outcome {
        Outcome::Reward(format!("Reward granted to {}", path))
    }

    fn name(&self) -> &'static str {
        "reward"
    }
}
