// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pixelwerk-ops — The pixel engine for Pixelwerk.
//
// Provides the buffer-pair processing session, the pixel transforms
// (resize, filters, crop, edge detection, histogram equalisation, blur,
// colour temperature), operation chains with stock presets, and rolling
// performance metrics.

pub mod color;
pub mod pipeline;
pub mod session;
pub mod transform;

// Re-export the primary types so callers can use `pixelwerk_ops::Processor` etc.
pub use pipeline::{PerformanceMetrics, Pipeline, PipelineOutcome, Preset, validate_image};
pub use session::Processor;
