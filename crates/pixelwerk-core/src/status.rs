// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stable numeric status codes for hosts that only see integers.
//
// The boundary functions report plain 1/0 success flags; hosts that need to
// know *why* a call failed query the last `Status` instead. Codes are part of
// the host contract and must never be renumbered.

use crate::error::PixelError;

/// Outcome of the most recent boundary call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Status {
    Ok = 0,
    NotInitialized = 1,
    InvalidGeometry = 2,
    BufferTooSmall = 3,
    UnsupportedChannels = 4,
    AllocationFailed = 5,
    InvalidImage = 6,
    /// I/O, serialization or a poisoned session lock.
    Internal = 7,
}

impl Status {
    /// Integer code handed across the boundary.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Inverse of [`Status::code`].
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Status::Ok,
            1 => Status::NotInitialized,
            2 => Status::InvalidGeometry,
            3 => Status::BufferTooSmall,
            4 => Status::UnsupportedChannels,
            5 => Status::AllocationFailed,
            6 => Status::InvalidImage,
            7 => Status::Internal,
            _ => return None,
        })
    }

    /// Whether the caller can fix the failure by changing its arguments
    /// (as opposed to re-initializing or giving up).
    pub fn is_caller_error(self) -> bool {
        matches!(
            self,
            Status::InvalidGeometry
                | Status::BufferTooSmall
                | Status::UnsupportedChannels
                | Status::InvalidImage
        )
    }
}

impl From<&PixelError> for Status {
    fn from(err: &PixelError) -> Self {
        match err {
            PixelError::NotInitialized => Status::NotInitialized,
            PixelError::AllocationFailed(_) => Status::AllocationFailed,
            PixelError::InvalidGeometry(_) => Status::InvalidGeometry,
            PixelError::BufferTooSmall { .. } => Status::BufferTooSmall,
            PixelError::UnsupportedChannels(_) => Status::UnsupportedChannels,
            PixelError::InvalidImage(_) => Status::InvalidImage,
            PixelError::Io(_) | PixelError::Serialization(_) => Status::Internal,
        }
    }
}

impl<T> From<&crate::error::Result<T>> for Status {
    fn from(result: &crate::error::Result<T>) -> Self {
        match result {
            Ok(_) => Status::Ok,
            Err(err) => Status::from(err),
        }
    }
}
