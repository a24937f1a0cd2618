// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors found while validating the contract set registered with a VM.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Two contracts share a name, so dependency lookups would be ambiguous
    #[error("Duplicate contract name: '{contract}'")]
    DuplicateContractName { contract: String },

    /// A contract waits on a name no registered contract carries
    #[error("Contract '{contract}' depends on '{missing_dependency}' which does not exist")]
    InvalidDependencyReference {
        contract: String,
        missing_dependency: String,
    },

    /// Contracts wait on each other in a loop and could never run
    #[error("Cyclic dependency detected: {}", cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },
}
