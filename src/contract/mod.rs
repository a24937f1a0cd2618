// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Declarative structure contracts.
//!
//! A contract pairs a threshold [`Matcher`] with scheduling attributes
//! (priority, layer, dependency, time-to-live) and an injected action. The VM
//! decides *whether* a contract may run on a path; the contract decides
//! whether the path *matches* and what happens when it does.

mod matcher;
mod outcome;
mod structure_contract;

pub use matcher::{samples_for, CheckResult, MatchMode, Matcher, UnitSample};
pub use outcome::{Outcome, OutcomeClass};
pub use structure_contract::StructureContract;
