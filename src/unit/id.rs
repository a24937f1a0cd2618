// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::UNIT_ID_BYTES;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Opaque, content-derived identifier of a structure unit.
///
/// Derived from the SHA-256 digest of `x` and `phi` formatted back to back,
/// truncated to [`UNIT_ID_BYTES`] bytes and hex encoded. The short form makes
/// collisions possible; the store rejects them on insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(String);

impl UnitId {
    /// Derive the identifier for a unit at position `x` with phase `phi`.
    ///
    /// ```
    /// use structure_vm::unit::UnitId;
    ///
    /// let id = UnitId::derive(1.0, 0.5);
    /// assert_eq!(id.as_str().len(), 8);
    /// assert_eq!(id, UnitId::derive(1.0, 0.5));
    /// ```
    pub fn derive(x: f64, phi: f64) -> Self {
        let digest = Sha256::digest(format!("{}{}", x, phi).as_bytes());
        Self(hex::encode(&digest[..UNIT_ID_BYTES]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UnitId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
