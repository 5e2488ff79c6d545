// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Job reports — what ran, how long it took, and a fingerprint of the result.

use std::path::Path;

use chrono::{DateTime, Utc};
use pixelwerk_core::status::Status;
use pixelwerk_core::types::ImageDescriptor;
use pixelwerk_ops::pipeline::{MetricsSnapshot, StepFailure};
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::job::{HostError, Result};

/// Lowercase hex SHA-256 of `data`.
pub fn fingerprint(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedStep {
    pub index: usize,
    pub operation: &'static str,
    /// Numeric status, as a boundary host would see it.
    pub status: i32,
    pub error: String,
}

impl From<&StepFailure> for FailedStep {
    fn from(failure: &StepFailure) -> Self {
        Self {
            index: failure.index,
            operation: failure.operation,
            status: Status::from(&failure.error).code(),
            error: failure.error.to_string(),
        }
    }
}

/// Written next to the output after every run, successful or not.
#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    /// Random v4 id, unique per run.
    pub run_id: Uuid,
    pub input: ImageDescriptor,
    /// Shape of the bytes in the output file; absent when the chain failed.
    pub output: Option<ImageDescriptor>,
    pub operations: Vec<&'static str>,
    pub completed: Vec<&'static str>,
    pub failed_step: Option<FailedStep>,
    pub elapsed_ms: f64,
    pub metrics: MetricsSnapshot,
    pub output_sha256: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl JobReport {
    pub fn succeeded(&self) -> bool {
        self.failed_step.is_none()
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(pixelwerk_core::PixelError::from)?;
        std::fs::write(path, json).map_err(|source| HostError::File {
            path: path.to_path_buf(),
            source,
        })
    }
}
