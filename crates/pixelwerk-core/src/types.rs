// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Pixelwerk engine.

use serde::{Deserialize, Serialize};

use crate::error::{PixelError, Result};

/// Interleaved channel layout of an 8-bit image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Channels {
    /// Single luminance channel.
    Gray,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha. Alpha is never altered by colour operations.
    Rgba,
}

impl Channels {
    /// Number of bytes per pixel.
    pub fn count(self) -> usize {
        match self {
            Channels::Gray => 1,
            Channels::Rgb => 3,
            Channels::Rgba => 4,
        }
    }

    /// Whether the fourth byte of every pixel is alpha.
    pub fn has_alpha(self) -> bool {
        self == Channels::Rgba
    }

    /// Whether the layout carries red/green/blue samples.
    pub fn is_color(self) -> bool {
        self != Channels::Gray
    }

    /// Number of leading channels that carry colour (alpha excluded).
    pub fn color_count(self) -> usize {
        match self {
            Channels::Gray => 1,
            Channels::Rgb | Channels::Rgba => 3,
        }
    }
}

impl TryFrom<u32> for Channels {
    type Error = PixelError;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            1 => Ok(Channels::Gray),
            3 => Ok(Channels::Rgb),
            4 => Ok(Channels::Rgba),
            other => Err(PixelError::UnsupportedChannels(other)),
        }
    }
}

impl From<Channels> for u32 {
    fn from(channels: Channels) -> Self {
        channels.count() as u32
    }
}

/// Shape of an image living in one of the processor buffers.
///
/// Descriptors are passed with every call and never stored by the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub width: u32,
    pub height: u32,
    pub channels: Channels,
}

impl ImageDescriptor {
    pub fn new(width: u32, height: u32, channels: Channels) -> Self {
        Self {
            width,
            height,
            channels,
        }
    }

    /// Build a descriptor from a raw channel count as received from a host.
    pub fn from_raw(width: u32, height: u32, channels: u32) -> Result<Self> {
        Ok(Self::new(width, height, Channels::try_from(channels)?))
    }

    /// Same channel layout, different dimensions.
    pub fn with_size(self, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            channels: self.channels,
        }
    }

    /// `width * height`, checked for overflow.
    pub fn pixel_count(&self) -> Result<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or_else(|| self.overflow())
    }

    /// `width * height * channels`, checked for overflow.
    pub fn byte_len(&self) -> Result<usize> {
        self.pixel_count()?
            .checked_mul(self.channels.count())
            .ok_or_else(|| self.overflow())
    }

    /// Bytes in one row of pixels.
    pub fn row_stride(&self) -> usize {
        self.width as usize * self.channels.count()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn overflow(&self) -> PixelError {
        PixelError::InvalidGeometry(format!(
            "{}x{}x{} does not fit in memory",
            self.width,
            self.height,
            self.channels.count()
        ))
    }
}

impl std::fmt::Display for ImageDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{}x{}",
            self.width,
            self.height,
            self.channels.count()
        )
    }
}

/// Parameters for the combined tonal/colour filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParameters {
    /// Additive offset in normalised units, typically -1.0..=1.0.
    pub brightness: f32,
    /// Multiplier around mid-grey. 1.0 is neutral.
    pub contrast: f32,
    /// Multiplier on HSV saturation. 1.0 skips the HSV round-trip entirely.
    pub saturation: f32,
    /// Unsharp kernel strength. Values <= 0.0 disable sharpening.
    pub sharpness: f32,
    /// Display gamma; each byte is raised to `1 / gamma`.
    pub gamma: f32,
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 1.0,
            saturation: 1.0,
            sharpness: 0.0,
            gamma: 1.0,
        }
    }
}

/// Rectangle to cut out of a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a region from signed host coordinates. Negative values are
    /// rejected rather than wrapped.
    pub fn from_signed(x: i32, y: i32, width: i32, height: i32) -> Result<Self> {
        let convert = |value: i32, name: &str| {
            u32::try_from(value).map_err(|_| {
                PixelError::InvalidGeometry(format!("crop {name} must not be negative (got {value})"))
            })
        };
        Ok(Self {
            x: convert(x, "x")?,
            y: convert(y, "y")?,
            width: convert(width, "width")?,
            height: convert(height, "height")?,
        })
    }

    /// Whether the region lies entirely inside a `width` x `height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        let right = self.x as u64 + self.width as u64;
        let bottom = self.y as u64 + self.height as u64;
        right <= width as u64 && bottom <= height as u64
    }
}

/// What happens to the one-pixel frame that Sobel edge detection cannot
/// compute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeBorder {
    /// Border bytes keep whatever OUTPUT held before the call.
    #[default]
    Untouched,
    /// Border colour bytes are set to zero; alpha is copied from INPUT.
    Clear,
    /// Border bytes are copied verbatim from INPUT.
    CopyInput,
}

fn default_threshold() -> f32 {
    50.0
}

fn default_radius() -> u32 {
    2
}

fn default_temperature() -> f32 {
    5000.0
}

/// One step of a processing chain, as submitted by a host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    Resize {
        width: u32,
        height: u32,
    },
    Filters {
        #[serde(default)]
        filters: FilterParameters,
    },
    Crop {
        #[serde(alias = "cropArea")]
        crop_area: CropRegion,
    },
    Edges {
        #[serde(default = "default_threshold")]
        threshold: f32,
    },
    Equalize,
    Blur {
        #[serde(default = "default_radius")]
        radius: u32,
    },
    Temperature {
        #[serde(default = "default_temperature")]
        temperature: f32,
    },
}

impl Operation {
    /// Short name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Resize { .. } => "resize",
            Operation::Filters { .. } => "filters",
            Operation::Crop { .. } => "crop",
            Operation::Edges { .. } => "edges",
            Operation::Equalize => "equalize",
            Operation::Blur { .. } => "blur",
            Operation::Temperature { .. } => "temperature",
        }
    }
}
