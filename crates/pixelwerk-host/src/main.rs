// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pixelwerk — reference host.
//
// Entry point. Initialises logging, then runs each job file named on the
// command line: `pixelwerk job.json [more.json ...]`.

mod job;
mod report;
mod runner;

use std::path::PathBuf;
use std::process::ExitCode;

use job::Job;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let jobs: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if jobs.is_empty() {
        eprintln!("usage: pixelwerk <job.json> [job.json ...]");
        return ExitCode::from(2);
    }

    tracing::info!(jobs = jobs.len(), "Pixelwerk starting");

    let mut failures = 0usize;
    for path in &jobs {
        let result = Job::load(path).and_then(|job| runner::run_job(&job));
        match result {
            Ok(report) if report.succeeded() => {
                tracing::info!(
                    job = %path.display(),
                    elapsed_ms = report.elapsed_ms,
                    sha256 = report.output_sha256.as_deref().unwrap_or_default(),
                    "Job complete"
                );
            }
            Ok(report) => {
                failures += 1;
                if let Some(step) = &report.failed_step {
                    tracing::error!(
                        job = %path.display(),
                        step = step.index,
                        operation = step.operation,
                        error = %step.error,
                        "Job stopped at failing step"
                    );
                }
            }
            Err(e) => {
                failures += 1;
                tracing::error!(job = %path.display(), error = %e, "Job could not run");
            }
        }
    }

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
