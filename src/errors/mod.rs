// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod ledger;
mod round;
mod store;
mod validation;

pub use config::ConfigError;
pub use ledger::LedgerError;
pub use round::{PathLimit, PathLimitExceeded, RoundError};
pub use store::StoreError;
pub use validation::ValidationError;
