// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Every diagnostic the VM emits is a small message struct implementing
//! `Display` plus [`messages::StructuredLog`], so log text lives in one place
//! and each event carries typed fields for `tracing` subscribers.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::engine` - round lifecycle events
//! * `messages::contract` - per-contract gating and execution events
//! * `messages::ledger` - transfer results
//! * `messages::validation` - contract dependency validation errors
//!
//! # Usage
//!
//! ```rust
//! use structure_vm::observability::messages::contract::ContractWaiting;
//! use structure_vm::observability::messages::StructuredLog;
//!
//! let msg = ContractWaiting {
//!     contract: "ComplianceAudit",
//!     dependency: "ResonanceReward",
//! };
//!
//! msg.log();
//! assert_eq!(msg.to_string(), "Contract ComplianceAudit waits on ResonanceReward");
//! ```

pub mod messages;
