// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pixel transforms — each is an inherent method on `Processor` that reads the
// INPUT buffer and writes the OUTPUT buffer.

pub mod convolve;
pub mod filters;
pub mod geometry;
pub mod histogram;
pub mod temperature;

pub use temperature::{NEUTRAL_KELVIN, temperature_gains};
