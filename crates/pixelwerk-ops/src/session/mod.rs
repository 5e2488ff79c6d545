// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Session module — buffer lifecycle and bounds-checked access.

pub mod processor;

pub use processor::Processor;
