// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structure units and the store that owns them.
//!
//! A structure unit is an immutable DAG node carrying scalar metrics, parent
//! references and optional ledger attributes. Units are owned exclusively by
//! the [`UnitStore`]; everything else refers to them by [`UnitId`].

mod id;
mod store;
mod structure_unit;

pub use id::UnitId;
pub use store::UnitStore;
pub use structure_unit::StructureUnit;
