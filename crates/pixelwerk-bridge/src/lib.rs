// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pixelwerk-bridge — C ABI boundary for hosts that embed the engine.
//
// A host (a WebAssembly runtime, a JNI shim, a C program) sees one
// process-wide session and a flat set of `extern "C"` functions. Pixel data
// moves only through the two shared buffers: the host copies an image into
// the INPUT address, calls an operation, and copies the result out of the
// OUTPUT address. Every operation returns 1 on success and 0 on failure;
// `pixelwerk_last_status` tells the host which failure it was.

pub mod exports;
pub mod session;

pub use exports::*;
