// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for contract dependency validation errors.
//!
//! This module contains message types for logging events related to:
//! * Duplicate contract name detection
//! * Dangling `depends_on` references
//! * Cyclic dependency detection

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// Cyclic dependency detected between contracts.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use structure_vm::observability::messages::validation::CyclicDependencyDetected;
///
/// let cycle = vec!["reward", "audit", "reward"];
/// let msg = CyclicDependencyDetected { cycle: &cycle };
///
/// assert_eq!(msg.to_string(), "Cyclic dependency detected: reward -> audit -> reward");
/// ```
pub struct CyclicDependencyDetected<'a> {
    pub cycle: &'a [&'a str],
}

impl Display for CyclicDependencyDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Cyclic dependency detected: {}", self.cycle.join(" -> "))
    }
}

impl StructuredLog for CyclicDependencyDetected<'_> {
    fn log(&self) {
        tracing::error!(
            cycle = self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
            "{}", self
        );
    }
}

/// A contract depends on a name no registered contract has.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct InvalidDependencyReference<'a> {
    pub contract: &'a str,
    pub missing_dependency: &'a str,
}

impl Display for InvalidDependencyReference<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Contract '{}' depends on '{}' which does not exist",
            self.contract, self.missing_dependency
        )
    }
}

impl StructuredLog for InvalidDependencyReference<'_> {
    fn log(&self) {
        tracing::error!(
            contract = self.contract,
            missing_dependency = self.missing_dependency,
            "{}", self
        );
    }
}

/// Two contracts share a name.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct DuplicateContractName<'a> {
    pub contract: &'a str,
}

impl Display for DuplicateContractName<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Duplicate contract name: '{}'", self.contract)
    }
}

impl StructuredLog for DuplicateContractName<'_> {
    fn log(&self) {
        tracing::error!(contract = self.contract, "{}", self);
    }
}
