// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Match evaluation strategies.
//!
//! Each round the VM asks a [`MatchEvaluator`](crate::traits::MatchEvaluator)
//! for the full `[contract][path]` verdict matrix before committing anything.
//! Two strategies are provided:
//!
//! * [`SequentialEvaluator`] - evaluates inline on the calling task
//! * [`ConcurrentEvaluator`] - one tokio task per contract, bounded by a semaphore
//!
//! Both return identical matrices for identical input.

pub mod concurrent;
pub mod factory;
pub mod sequential;

pub use concurrent::ConcurrentEvaluator;
pub use factory::ExecutorFactory;
pub use sequential::SequentialEvaluator;
