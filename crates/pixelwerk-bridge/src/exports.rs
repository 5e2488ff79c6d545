// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `extern "C"` exports. Signatures use plain C ints and floats so any host
// that can call a C function can drive the engine.

use std::borrow::Cow;
use std::ffi::{CStr, c_char, c_int};
use std::ptr;

use pixelwerk_core::error::PixelError;
use pixelwerk_core::status::Status;
use pixelwerk_core::types::{CropRegion, FilterParameters};
use pixelwerk_ops::Processor;
use pixelwerk_ops::pipeline::benchmark;
use tracing::info;

use crate::session::{call, descriptor, dimension, finish, last_status, with_slot};

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Allocate INPUT and OUTPUT with `max_bytes` each, replacing any previous
/// pair. Returns 1 on success, 0 on failure (the session is then released).
#[unsafe(no_mangle)]
pub extern "C" fn pixelwerk_initialize(max_bytes: usize) -> c_int {
    let result = with_slot("initialize", |slot| {
        slot.get_or_insert_with(Processor::default)
            .initialize(max_bytes)
    });
    match result {
        Some(result) => {
            if result.is_ok() {
                info!(max_bytes, "Boundary session initialized");
            }
            finish(Status::from(&result))
        }
        None => 0,
    }
}

/// Address of INPUT, or null before `pixelwerk_initialize`.
///
/// Valid until the next `pixelwerk_initialize` or `pixelwerk_release`.
#[unsafe(no_mangle)]
pub extern "C" fn pixelwerk_input_buffer() -> *mut u8 {
    with_slot("input_buffer", |slot| {
        slot.as_mut().map_or(ptr::null_mut(), Processor::input_ptr)
    })
    .unwrap_or(ptr::null_mut())
}

/// Address of OUTPUT, or null before `pixelwerk_initialize`.
#[unsafe(no_mangle)]
pub extern "C" fn pixelwerk_output_buffer() -> *mut u8 {
    with_slot("output_buffer", |slot| {
        slot.as_mut().map_or(ptr::null_mut(), Processor::output_ptr)
    })
    .unwrap_or(ptr::null_mut())
}

/// Free both buffers. Safe to call repeatedly.
#[unsafe(no_mangle)]
pub extern "C" fn pixelwerk_release() {
    if with_slot("release", |slot| slot.take()).is_some() {
        finish(Status::Ok);
    }
}

/// Numeric [`Status`] of the most recent call.
#[unsafe(no_mangle)]
pub extern "C" fn pixelwerk_last_status() -> c_int {
    last_status().code()
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub extern "C" fn pixelwerk_resize(
    src_width: c_int,
    src_height: c_int,
    dst_width: c_int,
    dst_height: c_int,
    channels: c_int,
) -> c_int {
    call("resize", |processor| {
        let src = descriptor(src_width, src_height, channels)?;
        processor.resize(
            src,
            dimension(dst_width, "destination width")?,
            dimension(dst_height, "destination height")?,
        )
    })
}

#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn pixelwerk_apply_filters(
    width: c_int,
    height: c_int,
    channels: c_int,
    brightness: f32,
    contrast: f32,
    saturation: f32,
    sharpness: f32,
    gamma: f32,
) -> c_int {
    call("apply_filters", |processor| {
        let params = FilterParameters {
            brightness,
            contrast,
            saturation,
            sharpness,
            gamma,
        };
        processor.apply_filters(descriptor(width, height, channels)?, params)
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn pixelwerk_crop(
    src_width: c_int,
    src_height: c_int,
    channels: c_int,
    x: c_int,
    y: c_int,
    width: c_int,
    height: c_int,
) -> c_int {
    call("crop", |processor| {
        let src = descriptor(src_width, src_height, channels)?;
        processor.crop(src, CropRegion::from_signed(x, y, width, height)?)
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn pixelwerk_detect_edges(
    width: c_int,
    height: c_int,
    channels: c_int,
    threshold: f32,
) -> c_int {
    call("detect_edges", |processor| {
        processor.detect_edges(descriptor(width, height, channels)?, threshold)
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn pixelwerk_equalize_histogram(width: c_int, height: c_int, channels: c_int) -> c_int {
    call("equalize_histogram", |processor| {
        processor.equalize_histogram(descriptor(width, height, channels)?)
    })
}

/// Box blur. `radius <= 0` fails.
#[unsafe(no_mangle)]
pub extern "C" fn pixelwerk_blur(width: c_int, height: c_int, channels: c_int, radius: c_int) -> c_int {
    call("blur", |processor| {
        let desc = descriptor(width, height, channels)?;
        let radius = u32::try_from(radius).map_err(|_| {
            PixelError::InvalidGeometry(format!("blur radius must be greater than zero (got {radius})"))
        })?;
        processor.blur(desc, radius)
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn pixelwerk_adjust_color_temperature(
    width: c_int,
    height: c_int,
    channels: c_int,
    temperature: f32,
) -> c_int {
    call("adjust_color_temperature", |processor| {
        processor.adjust_color_temperature(descriptor(width, height, channels)?, temperature)
    })
}

/// Not implemented: always returns `0.0` without running anything.
///
/// # Safety
///
/// `operation` must be null or point to a NUL-terminated string that stays
/// valid for the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pixelwerk_benchmark(operation: *const c_char, iterations: c_int) -> f64 {
    let name = if operation.is_null() {
        Cow::Borrowed("")
    } else {
        // SAFETY: non-null and NUL-terminated per the function contract.
        unsafe { CStr::from_ptr(operation) }.to_string_lossy()
    };
    benchmark(&name, iterations.max(0) as u32)
}
