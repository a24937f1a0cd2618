// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::contract::Outcome;
use crate::ledger::Ledger;
use crate::paths::Path;
use crate::unit::UnitStore;

/// Mutable state an action may touch while it runs.
///
/// The ledger is passed in explicitly rather than living in a global, so two
/// VMs can run side by side against separate ledgers.
pub struct ActionContext<'a> {
    pub store: &'a mut UnitStore,
    pub ledger: &'a mut Ledger,
}

impl<'a> ActionContext<'a> {
    pub fn new(store: &'a mut UnitStore, ledger: &'a mut Ledger) -> Self {
        Self { store, ledger }
    }
}

/// What a contract does once a path matches.
///
/// Actions never fail with an error: problems are reported through
/// failure-tagged outcomes so the round can carry on.
pub trait Action: Send + Sync {
    fn apply(&self, path: &Path, ctx: &mut ActionContext<'_>) -> Outcome;

    fn name(&self) -> &'static str;
}

/// Adapter turning a closure into an [`Action`].
///
/// ```
/// use std::sync::Arc;
/// use structure_vm::contract::Outcome;
/// use structure_vm::traits::{Action, FnAction};
///
/// let action: Arc<dyn Action> = Arc::new(FnAction::new("count", |path, _ctx| {
///     Outcome::Generic(format!("{} units", path.len()))
/// }));
/// assert_eq!(action.name(), "count");
/// ```
pub struct FnAction<F> {
    name: &'static str,
    f: F,
}

impl<F> FnAction<F>
where
    F: Fn(&Path, &mut ActionContext<'_>) -> Outcome + Send + Sync,
{
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F> Action for FnAction<F>
where
    F: Fn(&Path, &mut ActionContext<'_>) -> Outcome + Send + Sync,
{
    fn apply(&self, path: &Path, ctx: &mut ActionContext<'_>) -> Outcome {
        (self.f)(path, ctx)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
