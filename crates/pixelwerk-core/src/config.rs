// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Processor configuration.

use serde::{Deserialize, Serialize};

use crate::types::EdgeBorder;

/// Largest image the default configuration accepts: 4096 x 4096 RGBA.
pub const DEFAULT_MAX_BYTES: usize = 4096 * 4096 * 4;

/// Tunables for a processing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Capacity of each of the two shared buffers, in bytes.
    pub max_bytes: usize,
    /// Largest width or height accepted by image validation.
    pub max_dimension: u32,
    /// Number of recent pipeline durations kept for the rolling average.
    pub metrics_window: usize,
    /// Treatment of the border pixels during edge detection.
    pub edge_border: EdgeBorder,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_dimension: 4096,
            metrics_window: 100,
            edge_border: EdgeBorder::Untouched,
        }
    }
}
