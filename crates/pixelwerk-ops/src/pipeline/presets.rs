// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stock chains for common catalogue image jobs.

use pixelwerk_core::types::{FilterParameters, ImageDescriptor, Operation};
use serde::{Deserialize, Serialize};

use super::chain::Pipeline;

pub const DEFAULT_WEB_MAX_WIDTH: u32 = 1920;
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 300;

fn default_web_max_width() -> u32 {
    DEFAULT_WEB_MAX_WIDTH
}

fn default_thumbnail_size() -> u32 {
    DEFAULT_THUMBNAIL_SIZE
}

/// A named, parameterised chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Preset {
    /// Downscale to `max_width` (keeping aspect ratio) if wider, then a
    /// light contrast, saturation and sharpness lift.
    OptimizeForWeb {
        #[serde(default = "default_web_max_width", alias = "maxWidth")]
        max_width: u32,
    },
    /// Square `size` x `size` thumbnail with a little extra crispness.
    Thumbnail {
        #[serde(default = "default_thumbnail_size")]
        size: u32,
    },
    /// Brighter, punchier product shot followed by histogram equalisation.
    EnhanceProduct,
}

impl Preset {
    /// Build the chain for an image of shape `desc`.
    pub fn pipeline(&self, desc: ImageDescriptor) -> Pipeline {
        match *self {
            Preset::OptimizeForWeb { max_width } => optimize_for_web(desc, max_width),
            Preset::Thumbnail { size } => thumbnail(size),
            Preset::EnhanceProduct => enhance_product(),
        }
    }
}

pub fn optimize_for_web(desc: ImageDescriptor, max_width: u32) -> Pipeline {
    let mut pipeline = Pipeline::new();
    if desc.width > max_width {
        // Nearest row count, halves rounded up.
        let (w, h, max_w) = (desc.width as u64, desc.height as u64, max_width as u64);
        let height = ((h * max_w * 2 + w) / (2 * w)).max(1) as u32;
        pipeline = pipeline.then(Operation::Resize {
            width: max_width,
            height,
        });
    }
    pipeline.then(Operation::Filters {
        filters: FilterParameters {
            contrast: 1.05,
            saturation: 1.1,
            sharpness: 0.2,
            ..FilterParameters::default()
        },
    })
}

pub fn thumbnail(size: u32) -> Pipeline {
    Pipeline::new()
        .then(Operation::Resize {
            width: size,
            height: size,
        })
        .then(Operation::Filters {
            filters: FilterParameters {
                sharpness: 0.3,
                contrast: 1.1,
                ..FilterParameters::default()
            },
        })
}

pub fn enhance_product() -> Pipeline {
    Pipeline::new()
        .then(Operation::Filters {
            filters: FilterParameters {
                brightness: 0.05,
                contrast: 1.15,
                saturation: 1.2,
                sharpness: 0.3,
                ..FilterParameters::default()
            },
        })
        .then(Operation::Equalize)
}
