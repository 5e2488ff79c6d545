// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Geometric transforms — bilinear resize and rectangular crop.

use pixelwerk_core::error::{PixelError, Result};
use pixelwerk_core::types::{CropRegion, ImageDescriptor};
use tracing::{debug, info, instrument, warn};

use crate::color::clamp_byte;
use crate::session::Processor;

impl Processor {
    /// Resample the INPUT image to `dst_width` x `dst_height` into OUTPUT.
    ///
    /// Each destination pixel maps to `dst * src_extent / dst_extent` in the
    /// source and blends its four integer neighbours (clamped at the source
    /// edge) with bilinear weights. Every channel, alpha included, is
    /// interpolated independently.
    #[instrument(skip(self))]
    pub fn resize(&mut self, src: ImageDescriptor, dst_width: u32, dst_height: u32) -> Result<()> {
        self.ensure_initialized()?;

        let dst = src.with_size(dst_width, dst_height);
        if src.is_empty() && !dst.is_empty() {
            warn!(%src, %dst, "Cannot resample an empty source");
            return Err(PixelError::InvalidGeometry(format!(
                "cannot resample empty {src} source to {dst}"
            )));
        }

        info!(%src, %dst, "Resizing image");
        let (input, output) = self.frame(src.byte_len()?, dst.byte_len()?)?;
        if dst.is_empty() {
            debug!("Empty destination, nothing to resample");
            return Ok(());
        }
        resample_bilinear(input, src, output, dst);
        debug!("Resize complete");
        Ok(())
    }

    /// Copy `region` of the INPUT image to the start of OUTPUT, row by row.
    ///
    /// The region must lie entirely inside the source; otherwise nothing is
    /// written and `InvalidGeometry` is returned.
    #[instrument(skip(self))]
    pub fn crop(&mut self, src: ImageDescriptor, region: CropRegion) -> Result<()> {
        self.ensure_initialized()?;

        if !region.fits_within(src.width, src.height) {
            warn!(?region, %src, "Crop region outside source bounds");
            return Err(PixelError::InvalidGeometry(format!(
                "crop {}x{} at ({}, {}) exceeds {}x{} source",
                region.width, region.height, region.x, region.y, src.width, src.height
            )));
        }

        let dst = src.with_size(region.width, region.height);
        let (input, output) = self.frame(src.byte_len()?, dst.byte_len()?)?;

        let channels = src.channels.count();
        let row_len = dst.row_stride();
        for row in 0..region.height as usize {
            let src_start =
                ((region.y as usize + row) * src.width as usize + region.x as usize) * channels;
            let dst_start = row * row_len;
            output[dst_start..dst_start + row_len]
                .copy_from_slice(&input[src_start..src_start + row_len]);
        }

        debug!(%dst, "Crop complete");
        Ok(())
    }
}

fn resample_bilinear(src: &[u8], src_desc: ImageDescriptor, dst: &mut [u8], dst_desc: ImageDescriptor) {
    let channels = src_desc.channels.count();
    let src_w = src_desc.width as usize;
    let src_h = src_desc.height as usize;
    let x_ratio = src_desc.width as f32 / dst_desc.width as f32;
    let y_ratio = src_desc.height as f32 / dst_desc.height as f32;

    for y in 0..dst_desc.height as usize {
        let src_y = y as f32 * y_ratio;
        let y_floor = src_y as usize;
        let y1 = y_floor.min(src_h - 1);
        let y2 = (y_floor + 1).min(src_h - 1);
        let dy = src_y - y1 as f32;

        for x in 0..dst_desc.width as usize {
            let src_x = x as f32 * x_ratio;
            let x_floor = src_x as usize;
            let x1 = x_floor.min(src_w - 1);
            let x2 = (x_floor + 1).min(src_w - 1);
            let dx = src_x - x1 as f32;

            let top_left = (y1 * src_w + x1) * channels;
            let top_right = (y1 * src_w + x2) * channels;
            let bottom_left = (y2 * src_w + x1) * channels;
            let bottom_right = (y2 * src_w + x2) * channels;
            let out = (y * dst_desc.width as usize + x) * channels;

            for c in 0..channels {
                let p1 = src[top_left + c] as f32;
                let p2 = src[top_right + c] as f32;
                let p3 = src[bottom_left + c] as f32;
                let p4 = src[bottom_right + c] as f32;

                let value = p1 * (1.0 - dx) * (1.0 - dy)
                    + p2 * dx * (1.0 - dy)
                    + p3 * (1.0 - dx) * dy
                    + p4 * dx * dy;
                dst[out + c] = clamp_byte(value);
            }
        }
    }
}
