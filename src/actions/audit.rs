// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::contract::Outcome;
use crate::paths::Path;
use crate::traits::{Action, ActionContext};

/// Records an audit entry for the matched path.
pub struct AuditAction;

impl Action for AuditAction {
    fn apply(&self, path: &Path, _ctx: &mut ActionContext<'_>) -> Outcome {
        Outcome::Generic(format!("Audit log created for {}", path))
    }

    fn name(&self) -> &'static str {
        "audit"
    }
}
