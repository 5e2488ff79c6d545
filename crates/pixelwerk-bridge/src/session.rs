// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The single process-wide session behind the C ABI.
//
// Every export holds the lock for its whole call, so a re-initialise can
// never overlap an operation that is still reading the buffers.

use std::ffi::c_int;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI32, Ordering};

use pixelwerk_core::error::{PixelError, Result};
use pixelwerk_core::status::Status;
use pixelwerk_core::types::ImageDescriptor;
use pixelwerk_ops::Processor;
use tracing::{error, warn};

static SESSION: Mutex<Option<Processor>> = Mutex::new(None);
static LAST_STATUS: AtomicI32 = AtomicI32::new(Status::Ok as i32);

/// Run `op` against the session and translate the outcome to a 1/0 flag.
///
/// A missing or released session reports `NotInitialized` before any
/// argument is looked at; a poisoned lock reports `Internal`.
pub(crate) fn call(name: &'static str, op: impl FnOnce(&mut Processor) -> Result<()>) -> c_int {
    let status = match SESSION.lock() {
        Ok(mut guard) => match guard.as_mut() {
            Some(processor) if processor.is_initialized() => {
                let result = op(processor);
                if let Err(err) = &result {
                    warn!(call = name, %err, "Boundary call failed");
                }
                Status::from(&result)
            }
            _ => {
                warn!(call = name, "Boundary call before initialize");
                Status::NotInitialized
            }
        },
        Err(_) => {
            error!(call = name, "Session lock poisoned");
            Status::Internal
        }
    };
    finish(status)
}

/// Borrow the session slot itself, creating or dropping the processor.
pub(crate) fn with_slot<T>(name: &'static str, f: impl FnOnce(&mut Option<Processor>) -> T) -> Option<T> {
    match SESSION.lock() {
        Ok(mut guard) => Some(f(&mut guard)),
        Err(_) => {
            error!(call = name, "Session lock poisoned");
            set_status(Status::Internal);
            None
        }
    }
}

pub(crate) fn set_status(status: Status) {
    LAST_STATUS.store(status.code(), Ordering::Relaxed);
}

pub(crate) fn finish(status: Status) -> c_int {
    set_status(status);
    c_int::from(status == Status::Ok)
}

pub fn last_status() -> Status {
    Status::from_code(LAST_STATUS.load(Ordering::Relaxed)).unwrap_or(Status::Internal)
}

/// Convert a signed host dimension, rejecting negatives.
pub(crate) fn dimension(value: c_int, what: &str) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| PixelError::InvalidGeometry(format!("{what} must not be negative (got {value})")))
}

/// Build a descriptor from the `(width, height, channels)` triple every
/// export receives.
pub(crate) fn descriptor(width: c_int, height: c_int, channels: c_int) -> Result<ImageDescriptor> {
    let channels = u32::try_from(channels).map_err(|_| PixelError::UnsupportedChannels(0))?;
    ImageDescriptor::from_raw(dimension(width, "width")?, dimension(height, "height")?, channels)
}
