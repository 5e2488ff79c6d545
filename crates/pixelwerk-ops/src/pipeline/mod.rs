// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Processing chains — ordered operation lists run against one session, the
// stock presets built from them, and rolling run-time metrics.

pub mod chain;
pub mod metrics;
pub mod presets;

pub use chain::{Pipeline, PipelineOutcome, StepFailure, validate_image};
pub use metrics::{MetricsSnapshot, PerformanceMetrics, benchmark};
pub use presets::Preset;
