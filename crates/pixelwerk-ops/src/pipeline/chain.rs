// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Operation chains — run a list of transforms back to back, feeding each
// step's OUTPUT to the next step as INPUT.

use std::time::{Duration, Instant};

use pixelwerk_core::config::ProcessorConfig;
use pixelwerk_core::error::{PixelError, Result};
use pixelwerk_core::types::{ImageDescriptor, Operation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::session::Processor;

/// Check a host-supplied image before it is loaded into a session.
///
/// Both dimensions must be non-zero and no larger than
/// `config.max_dimension`, and `data` must hold exactly
/// `width * height * channels` bytes.
pub fn validate_image(desc: ImageDescriptor, data: &[u8], config: &ProcessorConfig) -> Result<()> {
    if desc.is_empty() {
        return Err(PixelError::InvalidImage(format!("{desc} has a zero dimension")));
    }
    if desc.width > config.max_dimension || desc.height > config.max_dimension {
        return Err(PixelError::InvalidImage(format!(
            "{desc} exceeds the {0}x{0} limit",
            config.max_dimension
        )));
    }
    let expected = desc.byte_len()?;
    if data.len() != expected {
        return Err(PixelError::InvalidImage(format!(
            "{desc} needs {expected} bytes, got {}",
            data.len()
        )));
    }
    Ok(())
}

impl Processor {
    /// Run one operation from INPUT into OUTPUT and return the shape of the
    /// image it produced.
    pub fn apply(&mut self, desc: ImageDescriptor, operation: &Operation) -> Result<ImageDescriptor> {
        match *operation {
            Operation::Resize { width, height } => {
                self.resize(desc, width, height)?;
                Ok(desc.with_size(width, height))
            }
            Operation::Filters { filters } => {
                self.apply_filters(desc, filters)?;
                Ok(desc)
            }
            Operation::Crop { crop_area } => {
                self.crop(desc, crop_area)?;
                Ok(desc.with_size(crop_area.width, crop_area.height))
            }
            Operation::Edges { threshold } => {
                self.detect_edges(desc, threshold)?;
                Ok(desc)
            }
            Operation::Equalize => {
                self.equalize_histogram(desc)?;
                Ok(desc)
            }
            Operation::Blur { radius } => {
                self.blur(desc, radius)?;
                Ok(desc)
            }
            Operation::Temperature { temperature } => {
                self.adjust_color_temperature(desc, temperature)?;
                Ok(desc)
            }
        }
    }
}

/// The step at which a chain stopped.
#[derive(Debug)]
pub struct StepFailure {
    /// Zero-based position of the failing operation.
    pub index: usize,
    pub operation: &'static str,
    pub error: PixelError,
}

/// What a chain run did.
#[derive(Debug)]
pub struct PipelineOutcome {
    /// Shape of the image left in OUTPUT.
    pub descriptor: ImageDescriptor,
    /// Names of the steps that succeeded, in order.
    pub completed: Vec<&'static str>,
    pub elapsed: Duration,
    pub failure: Option<StepFailure>,
}

impl PipelineOutcome {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Final descriptor, or the error of the step that failed.
    pub fn into_result(self) -> Result<ImageDescriptor> {
        match self.failure {
            None => Ok(self.descriptor),
            Some(failure) => Err(failure.error),
        }
    }
}

/// An ordered list of operations.
///
/// Serialises as a bare JSON array of tagged operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pipeline {
    operations: Vec<Operation>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step.
    pub fn then(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Run every step against `processor`, starting from the image `desc`
    /// already loaded into INPUT.
    ///
    /// Between steps the buffers are swapped, so the final result always ends
    /// up in OUTPUT. The chain stops at the first failing step; OUTPUT then
    /// holds the result of the last step that succeeded (or is untouched if
    /// the first step failed) and `descriptor` describes it. An empty chain
    /// does nothing.
    #[instrument(skip(self, processor), fields(steps = self.operations.len()))]
    pub fn run(&self, processor: &mut Processor, desc: ImageDescriptor) -> PipelineOutcome {
        let started = Instant::now();
        let mut current = desc;
        let mut completed = Vec::with_capacity(self.operations.len());
        let mut failure = None;

        for (index, operation) in self.operations.iter().enumerate() {
            if index > 0 {
                if let Err(error) = processor.swap_buffers() {
                    failure = Some(StepFailure {
                        index,
                        operation: operation.name(),
                        error,
                    });
                    break;
                }
            }

            let step_started = Instant::now();
            match processor.apply(current, operation) {
                Ok(next) => {
                    debug!(
                        step = index,
                        operation = operation.name(),
                        output = %next,
                        elapsed_us = step_started.elapsed().as_micros() as u64,
                        "Step complete"
                    );
                    current = next;
                    completed.push(operation.name());
                }
                Err(error) => {
                    warn!(step = index, operation = operation.name(), %error, "Step failed");
                    if index > 0 {
                        // Last good result back into OUTPUT.
                        if let Err(restore) = processor.swap_buffers() {
                            error!(
                                step = index,
                                error = %restore,
                                "Could not restore last good result"
                            );
                        }
                    }
                    failure = Some(StepFailure {
                        index,
                        operation: operation.name(),
                        error,
                    });
                    break;
                }
            }
        }

        let elapsed = started.elapsed();
        info!(
            completed = completed.len(),
            output = %current,
            elapsed_ms = elapsed.as_millis() as u64,
            "Pipeline finished"
        );

        PipelineOutcome {
            descriptor: current,
            completed,
            elapsed,
            failure,
        }
    }
}

impl From<Vec<Operation>> for Pipeline {
    fn from(operations: Vec<Operation>) -> Self {
        Self { operations }
    }
}

impl FromIterator<Operation> for Pipeline {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self {
            operations: iter.into_iter().collect(),
        }
    }
}
