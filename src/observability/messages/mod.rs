// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! # Organization
//!
//! * `engine` - round lifecycle (start, completion, failure, cancellation)
//! * `contract` - TTL expiry, dependency waits, skips, executions and rewards
//! * `ledger` - completed and rejected transfers
//! * `validation` - duplicate names, dangling dependencies and cycles

use std::fmt::Display;

pub mod contract;
pub mod engine;
pub mod ledger;
pub mod validation;

/// A log message that knows its level and its structured fields.
///
/// `log()` emits a single event at the message's level. Messages that open a
/// unit of work (see [`engine::RoundStarted::span`]) also provide a span
/// carrying the same fields.
pub trait StructuredLog: Display {
    fn log(&self);
}
