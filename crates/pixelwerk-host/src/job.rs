// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Job files — what to load, what to run, where to put the result.

use std::path::{Path, PathBuf};

use pixelwerk_core::config::ProcessorConfig;
use pixelwerk_core::types::ImageDescriptor;
use pixelwerk_ops::pipeline::{Pipeline, Preset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that stop a job before or after the pipeline runs.
#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Pixel(#[from] pixelwerk_core::PixelError),

    #[error("cannot access {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed job file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid job: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, HostError>;

fn default_repeat() -> u32 {
    1
}

/// One processing job as read from disk.
///
/// Relative paths are resolved against the directory holding the job file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Raw interleaved 8-bit pixels, `width * height * channels` bytes.
    pub input: PathBuf,
    /// Where the raw result bytes are written.
    pub output: PathBuf,
    /// Report location; defaults to `<output>.report.json`.
    #[serde(default)]
    pub report: Option<PathBuf>,
    pub image: ImageDescriptor,
    #[serde(default)]
    pub config: ProcessorConfig,
    /// Stock chain run before `operations`.
    #[serde(default)]
    pub preset: Option<Preset>,
    #[serde(default)]
    pub operations: Pipeline,
    /// Run the chain this many times from the same input, for timing.
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl Job {
    /// Read and parse a job file, resolving its paths.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| HostError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let mut job: Job = serde_json::from_str(&text).map_err(|source| HostError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        job.input = base.join(&job.input);
        job.output = base.join(&job.output);
        job.report = job.report.map(|report| base.join(report));
        Ok(job)
    }

    /// The full chain: preset steps first, then explicit operations.
    pub fn pipeline(&self) -> Result<Pipeline> {
        let preset = self
            .preset
            .map(|preset| preset.pipeline(self.image))
            .unwrap_or_default();
        let pipeline: Pipeline = preset
            .operations()
            .iter()
            .chain(self.operations.operations())
            .cloned()
            .collect();

        if pipeline.is_empty() {
            return Err(HostError::Invalid("no preset or operations given".into()));
        }
        Ok(pipeline)
    }

    pub fn report_path(&self) -> PathBuf {
        self.report.clone().unwrap_or_else(|| {
            let mut name = self.output.clone().into_os_string();
            name.push(".report.json");
            PathBuf::from(name)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelwerk_core::types::{Channels, Operation};

    fn parse(json: &str) -> Job {
        serde_json::from_str(json).expect("parse job")
    }

    #[test]
    fn minimal_job_uses_defaults() {
        let job = parse(
            r#"{
                "input": "in.raw",
                "output": "out.raw",
                "image": {"width": 4, "height": 2, "channels": 3},
                "operations": [{"type": "equalize"}]
            }"#,
        );
        assert_eq!(job.image, ImageDescriptor::new(4, 2, Channels::Rgb));
        assert_eq!(job.config, ProcessorConfig::default());
        assert_eq!(job.repeat, 1);
        assert_eq!(job.report_path(), PathBuf::from("out.raw.report.json"));
    }

    #[test]
    fn preset_steps_run_before_operations() {
        let job = parse(
            r#"{
                "input": "in.raw",
                "output": "out.raw",
                "image": {"width": 600, "height": 400, "channels": 4},
                "preset": {"name": "thumbnail", "size": 64},
                "operations": [{"type": "blur", "radius": 1}]
            }"#,
        );
        let pipeline = job.pipeline().expect("pipeline");
        let names: Vec<_> = pipeline.operations().iter().map(Operation::name).collect();
        assert_eq!(names, vec!["resize", "filters", "blur"]);
    }

    #[test]
    fn empty_job_is_rejected() {
        let job = parse(
            r#"{
                "input": "in.raw",
                "output": "out.raw",
                "image": {"width": 1, "height": 1, "channels": 1}
            }"#,
        );
        assert!(matches!(job.pipeline(), Err(HostError::Invalid(_))));
    }

    #[test]
    fn unsupported_channel_count_fails_to_parse() {
        let result: std::result::Result<Job, _> = serde_json::from_str(
            r#"{
                "input": "in.raw",
                "output": "out.raw",
                "image": {"width": 1, "height": 1, "channels": 2},
                "operations": [{"type": "equalize"}]
            }"#,
        );
        assert!(result.is_err());
    }
}
