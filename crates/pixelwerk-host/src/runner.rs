// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Job execution — load pixels, drive a session through the chain, write
// the result and its report.

use chrono::Utc;
use pixelwerk_ops::pipeline::{PerformanceMetrics, validate_image};
use pixelwerk_ops::Processor;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::job::{HostError, Job, Result};
use crate::report::{FailedStep, JobReport, fingerprint};

/// Run `job` to completion and write its report.
///
/// Pipeline failures are not errors here: they are recorded in the returned
/// report and no output file is written. Errors are reserved for problems
/// with the job itself (unreadable files, invalid input, no operations).
#[instrument(skip(job), fields(input = %job.input.display(), image = %job.image))]
pub fn run_job(job: &Job) -> Result<JobReport> {
    let pipeline = job.pipeline()?;
    if job.repeat == 0 {
        return Err(HostError::Invalid("repeat must be at least 1".into()));
    }

    let data = std::fs::read(&job.input).map_err(|source| HostError::File {
        path: job.input.clone(),
        source,
    })?;
    validate_image(job.image, &data, &job.config)?;

    let mut processor = Processor::with_config(job.config.clone())?;
    let mut metrics = PerformanceMetrics::new(job.config.metrics_window);
    let mut outcome = None;

    for _ in 0..job.repeat {
        processor.load_input(&data)?;
        let run = pipeline.run(&mut processor, job.image);
        metrics.record(run.elapsed);
        let failed = !run.is_success();
        outcome = Some(run);
        if failed {
            break;
        }
    }
    let outcome = outcome.ok_or_else(|| HostError::Invalid("pipeline never ran".into()))?;

    let (output, output_sha256) = if outcome.is_success() {
        let bytes = processor.read_output(outcome.descriptor)?;
        std::fs::write(&job.output, &bytes).map_err(|source| HostError::File {
            path: job.output.clone(),
            source,
        })?;
        info!(output = %outcome.descriptor, bytes = bytes.len(), "Output written");
        (Some(outcome.descriptor), Some(fingerprint(&bytes)))
    } else {
        (None, None)
    };

    let failed_step = outcome.failure.as_ref().map(FailedStep::from);
    if let Some(step) = &failed_step {
        warn!(step = step.index, operation = step.operation, error = %step.error, "Job failed");
    }

    let report = JobReport {
        run_id: Uuid::new_v4(),
        input: job.image,
        output,
        operations: pipeline.operations().iter().map(|op| op.name()).collect(),
        completed: outcome.completed.clone(),
        failed_step,
        elapsed_ms: outcome.elapsed.as_secs_f64() * 1000.0,
        metrics: metrics.snapshot(),
        output_sha256,
        generated_at: Utc::now(),
    };
    report.write(&job.report_path())?;
    Ok(report)
}
