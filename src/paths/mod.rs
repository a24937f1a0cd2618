// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Path discovery over the unit DAG.
//!
//! A [`Path`] is the unit of contract evaluation: a sequence of unit ids
//! connected by reference edges, starting at a root. Two enumeration modes are
//! available through [`PathMode`]:
//!
//! * **Recursive**: every simple root-anchored path and all of its prefixes.
//!   The number of paths grows exponentially with the branching factor, so
//!   enumeration is bounded by [`PathLimits`].
//! * **Adjacent pairs**: one two-unit path per (parent, child) edge.
//!
//! Both modes are deterministic for a fixed store.

mod enumerator;
mod path;

pub use enumerator::{enumerate_paths, EnumerationOptions, PathLimits, PathMode};
pub use path::Path;
