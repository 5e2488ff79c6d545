// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Pixelwerk.

use thiserror::Error;

/// Top-level error type for all Pixelwerk operations.
///
/// Every variant is raised before the first byte of OUTPUT is written, so a
/// failed call never leaves a partially transformed image behind.
#[derive(Debug, Error)]
pub enum PixelError {
    // -- Session errors --
    #[error("processor buffers are not initialized")]
    NotInitialized,

    #[error("buffer allocation of {0} bytes failed")]
    AllocationFailed(usize),

    // -- Geometry errors --
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("buffer too small: {required} bytes required, capacity is {capacity}")]
    BufferTooSmall { required: usize, capacity: usize },

    #[error("unsupported channel count: {0} (expected 1, 3 or 4)")]
    UnsupportedChannels(u32),

    // -- Host input --
    #[error("invalid image data: {0}")]
    InvalidImage(String),

    // -- Host tooling --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PixelError>;
