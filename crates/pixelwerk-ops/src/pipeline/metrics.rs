// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rolling pipeline timings.

use std::collections::VecDeque;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

/// Run-time statistics over the most recent pipeline runs.
#[derive(Debug, Clone)]
pub struct PerformanceMetrics {
    total_runs: u64,
    window: usize,
    recent: VecDeque<Duration>,
}

/// Serialisable view of [`PerformanceMetrics`], durations in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub total_runs: u64,
    pub window: usize,
    pub samples: usize,
    pub average_ms: f64,
    pub last_ms: Option<f64>,
}

impl PerformanceMetrics {
    /// Keep at most `window` recent durations (at least one).
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            total_runs: 0,
            window,
            recent: VecDeque::with_capacity(window),
        }
    }

    pub fn record(&mut self, elapsed: Duration) {
        if self.recent.len() == self.window {
            self.recent.pop_front();
        }
        self.recent.push_back(elapsed);
        self.total_runs += 1;
        debug!(
            total_runs = self.total_runs,
            elapsed_us = elapsed.as_micros() as u64,
            "Recorded pipeline run"
        );
    }

    /// Runs recorded since creation, including those that fell out of the window.
    pub fn total_runs(&self) -> u64 {
        self.total_runs
    }

    pub fn recent(&self) -> impl Iterator<Item = Duration> + '_ {
        self.recent.iter().copied()
    }

    /// Mean of the durations still in the window; zero when empty.
    pub fn average(&self) -> Duration {
        if self.recent.is_empty() {
            return Duration::ZERO;
        }
        let sum: Duration = self.recent.iter().sum();
        sum / self.recent.len() as u32
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_runs: self.total_runs,
            window: self.window,
            samples: self.recent.len(),
            average_ms: millis(self.average()),
            last_ms: self.recent.back().copied().map(millis),
        }
    }
}

/// Time `iterations` runs of a named operation.
///
/// Not implemented: always reports `0.0` milliseconds without running
/// anything. Use the criterion benches for real numbers.
pub fn benchmark(operation: &str, iterations: u32) -> f64 {
    debug!(operation, iterations, "Benchmark requested; not implemented");
    0.0
}

fn millis(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self::new(100)
    }
}
