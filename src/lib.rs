// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod actions;       // built-in contract actions
pub mod config;        // scenario loading + runtime assembly
pub mod contract;      // matching and activation
pub mod engine;        // match evaluators
pub mod errors;        // error handling
pub mod ledger;        // ownership, spend and provenance
pub mod observability;
pub mod paths;         // DAG path enumeration
pub mod traits;        // Action and MatchEvaluator seams
pub mod unit;          // structure units and their store
pub mod vm;            // round orchestration
