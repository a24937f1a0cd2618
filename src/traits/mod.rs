// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod action;
pub mod evaluator;

pub use action::{Action, ActionContext, FnAction};
pub use evaluator::{MatchEvaluator, MatchMatrix};
