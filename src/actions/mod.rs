// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in contract actions.
//!
//! * [`RewardAction`] issues a reward (reward-class outcome)
//! * [`AuditAction`] records an audit entry (generic success)
//! * [`TransferAction`] spends the path's first unit through the ledger
//!
//! [`ActionFactory`] maps the action names used in scenario files to these
//! implementations.

mod audit;
mod factory;
mod reward;
mod transfer;

pub use audit::AuditAction;
pub use factory::ActionFactory;
pub use reward::RewardAction;
pub use transfer::TransferAction;
