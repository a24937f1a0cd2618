// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::paths::Path;
use crate::unit::UnitStore;

/// Minimum number of units a path needs before any mode can match it.
const MIN_MATCH_LEN: usize = 2;

/// Threshold predicate applied to a path's metrics.
///
/// Every comparison is strict: a value equal to its threshold never matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// `mean(delta) < delta_thresh` and `mean(entropy) > entropy_thresh`
    #[default]
    Average,
    /// `first.delta < delta_thresh` and `last.entropy > entropy_thresh`
    Endpoint,
    /// `mean(delta) < delta_thresh` and `min(entropy) > entropy_thresh`
    Bounds,
}

/// The metrics of one unit, detached from the store so matching can run off-thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitSample {
    pub delta: f64,
    pub entropy: f64,
}

/// Pass/fail verdict of a match. The reason is for logs and history only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub passed: bool,
    pub reason: String,
}

impl CheckResult {
    fn pass() -> Self {
        Self {
            passed: true,
            reason: "OK".to_string(),
        }
    }

    fn fail(reason: impl Into<String>) -> Self {
        Self {
            passed: false,
            reason: reason.into(),
        }
    }
}

/// Collect the metrics of every unit on `path`.
pub fn samples_for(store: &UnitStore, path: &Path) -> Result<Vec<UnitSample>, StoreError> {
    path.iter()
        .map(|id| {
            store.get(id).map(|u| UnitSample {
                delta: u.delta,
                entropy: u.entropy,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Matcher {
    pub mode: MatchMode,
    pub delta_thresh: f64,
    pub entropy_thresh: f64,
}

impl Matcher {
    pub fn new(mode: MatchMode, delta_thresh: f64, entropy_thresh: f64) -> Self {
        Self {
            mode,
            delta_thresh,
            entropy_thresh,
        }
    }

    /// Evaluate the predicate over a path's samples.
    ///
    /// ```
    /// use structure_vm::contract::{MatchMode, Matcher, UnitSample};
    ///
    /// let matcher = Matcher::new(MatchMode::Average, 0.3, 0.9);
    /// let path = [
    ///     UnitSample { delta: 0.2, entropy: 0.95 },
    ///     UnitSample { delta: 0.1, entropy: 0.96 },
    /// ];
    /// assert!(matcher.check(&path).passed);
    /// assert!(!matcher.check(&path[..1]).passed);
    /// ```
    pub fn check(&self, samples: &[UnitSample]) -> CheckResult {
        if samples.len() < MIN_MATCH_LEN {
            return CheckResult::fail(format!(
                "path has {} unit(s), at least {} required",
                samples.len(),
                MIN_MATCH_LEN
            ));
        }

        match self.mode {
            MatchMode::Average => {
                let avg_delta = mean(samples.iter().map(|s| s.delta), samples.len());
                let avg_entropy = mean(samples.iter().map(|s| s.entropy), samples.len());
                if avg_delta < self.delta_thresh && avg_entropy > self.entropy_thresh {
                    CheckResult::pass()
                } else {
                    CheckResult::fail(format!(
                        "path does not match avg(delta)/avg(entropy) condition: avg(delta)={:.4}, avg(entropy)={:.4}",
                        avg_delta, avg_entropy
                    ))
                }
            }
            MatchMode::Endpoint => {
                let head = samples[0];
                let tail = samples[samples.len() - 1];
                if head.delta < self.delta_thresh && tail.entropy > self.entropy_thresh {
                    CheckResult::pass()
                } else {
                    CheckResult::fail(format!(
                        "path does not match head(delta)/tail(entropy) condition: head(delta)={:.4}, tail(entropy)={:.4}",
                        head.delta, tail.entropy
                    ))
                }
            }
            MatchMode::Bounds => {
                let avg_delta = mean(samples.iter().map(|s| s.delta), samples.len());
                let min_entropy = samples
                    .iter()
                    .map(|s| s.entropy)
                    .fold(f64::INFINITY, f64::min);

                // NaN fails both comparisons, so a poisoned path never matches
                if !(avg_delta < self.delta_thresh) {
                    CheckResult::fail(format!(
                        "avg(delta)={:.4} is not below {}",
                        avg_delta, self.delta_thresh
                    ))
                } else if !(min_entropy > self.entropy_thresh) {
                    CheckResult::fail(format!(
                        "min(entropy)={:.4} is not above {}",
                        min_entropy, self.entropy_thresh
                    ))
                } else {
                    CheckResult::pass()
                }
            }
        }
    }
}

fn mean(values: impl Iterator<Item = f64>, len: usize) -> f64 {
    values.sum::<f64>() / len as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(delta: f64, entropy: f64) -> UnitSample {
        UnitSample { delta, entropy }
    }

    // A(0.2, 0.95) -> B(0.1, 0.96) -> C(0.4, 0.97)
    fn abc() -> Vec<UnitSample> {
        vec![s(0.2, 0.95), s(0.1, 0.96), s(0.4, 0.97)]
    }

    #[test]
    fn test_average_matches_ab_with_exact_arithmetic() {
        let path = abc();
        let ab = &path[..2];

        let avg_delta = (0.2 + 0.1) / 2.0;
        let avg_entropy = (0.95 + 0.96) / 2.0;
        assert!(avg_delta < 0.3 && avg_entropy > 0.9);

        let matcher = Matcher::new(MatchMode::Average, 0.3, 0.9);
        assert!(matcher.check(ab).passed);
    }

    #[test]
    fn test_average_on_abc_depends_on_mean_delta() {
        let path = abc();

        // mean delta of A,B,C is ~0.2333
        assert!(Matcher::new(MatchMode::Average, 0.3, 0.9).check(&path).passed);
        assert!(!Matcher::new(MatchMode::Average, 0.2, 0.9).check(&path).passed);
        // A,B alone (0.15) still passes the tighter threshold
        assert!(Matcher::new(MatchMode::Average, 0.2, 0.9).check(&path[..2]).passed);
    }

    #[test]
    fn test_threshold_equality_never_matches() {
        // exactly representable means: delta 0.5, entropy 0.5
        let path = vec![s(0.25, 0.25), s(0.75, 0.75)];

        let result = Matcher::new(MatchMode::Average, 0.5, 0.1).check(&path);
        assert!(!result.passed);

        let result = Matcher::new(MatchMode::Average, 0.6, 0.5).check(&path);
        assert!(!result.passed);

        assert!(Matcher::new(MatchMode::Average, 0.5000001, 0.4999999).check(&path).passed);
    }

    #[test]
    fn test_short_paths_never_match() {
        for mode in [MatchMode::Average, MatchMode::Endpoint, MatchMode::Bounds] {
            let matcher = Matcher::new(mode, 10.0, -10.0);
            assert!(!matcher.check(&[]).passed);
            let result = matcher.check(&[s(0.0, 1.0)]);
            assert!(!result.passed);
            assert!(result.reason.contains("at least 2"));
        }
    }

    #[test]
    fn test_endpoint_uses_head_delta_and_tail_entropy() {
        // middle unit is terrible but ignored
        let path = vec![s(0.1, 0.0), s(9.0, 0.0), s(9.0, 0.95)];
        assert!(Matcher::new(MatchMode::Endpoint, 0.3, 0.9).check(&path).passed);

        let path = vec![s(0.35, 0.99), s(0.1, 0.99)];
        assert!(!Matcher::new(MatchMode::Endpoint, 0.3, 0.9).check(&path).passed);
    }

    #[test]
    fn test_bounds_reports_violated_bound() {
        let matcher = Matcher::new(MatchMode::Bounds, 0.3, 0.9);

        let high_delta = vec![s(0.5, 0.95), s(0.5, 0.95)];
        let result = matcher.check(&high_delta);
        assert!(!result.passed);
        assert!(result.reason.starts_with("avg(delta)"));

        // mean entropy 0.95 would pass Average, but one unit dips below the bound
        let low_entropy = vec![s(0.1, 1.0), s(0.1, 0.89), s(0.1, 0.96)];
        let result = matcher.check(&low_entropy);
        assert!(!result.passed);
        assert!(result.reason.starts_with("min(entropy)"));
        assert!(Matcher::new(MatchMode::Average, 0.3, 0.9).check(&low_entropy).passed);

        assert!(matcher.check(&abc()[..2]).passed);
    }

    #[test]
    fn test_bounds_fails_closed_on_nan() {
        let matcher = Matcher::new(MatchMode::Bounds, 0.3, 0.9);
        let path = vec![s(f64::NAN, 0.95), s(0.1, 0.95)];
        assert!(!matcher.check(&path).passed);
    }
}
