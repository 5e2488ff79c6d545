// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// White-balance shift by colour temperature.

use pixelwerk_core::error::{PixelError, Result};
use pixelwerk_core::types::ImageDescriptor;
use tracing::{debug, instrument, warn};

use crate::color::clamp_byte;
use crate::session::Processor;

/// Temperature at which every multiplier is exactly 1.0.
pub const NEUTRAL_KELVIN: f32 = 5000.0;

/// Per-channel gain applied for a colour temperature in kelvin.
///
/// Below neutral the image warms up (red and green boosted, blue cut); above
/// it the image cools down (red cut, blue boosted). The shift is linear in
/// `|kelvin - 5000| / 2000` and unbounded, so extreme inputs simply saturate.
pub fn temperature_gains(kelvin: f32) -> [f32; 3] {
    if kelvin < NEUTRAL_KELVIN {
        let factor = (NEUTRAL_KELVIN - kelvin) / 2000.0;
        [1.0 + factor * 0.3, 1.0 + factor * 0.1, 1.0 - factor * 0.2]
    } else {
        let factor = (kelvin - NEUTRAL_KELVIN) / 2000.0;
        [1.0 - factor * 0.2, 1.0, 1.0 + factor * 0.3]
    }
}

impl Processor {
    /// Scale red, green and blue of INPUT by [`temperature_gains`] into
    /// OUTPUT. Alpha is copied. Grey images are rejected.
    #[instrument(skip(self))]
    pub fn adjust_color_temperature(&mut self, desc: ImageDescriptor, kelvin: f32) -> Result<()> {
        self.ensure_initialized()?;

        if !desc.channels.is_color() {
            warn!(%desc, "Colour temperature needs RGB channels");
            return Err(PixelError::UnsupportedChannels(desc.channels.count() as u32));
        }

        let len = desc.byte_len()?;
        let (input, output) = self.frame(len, len)?;
        let gains = temperature_gains(kelvin);
        let stride = desc.channels.count();

        for (dst, src) in output.chunks_exact_mut(stride).zip(input.chunks_exact(stride)) {
            for c in 0..3 {
                dst[c] = clamp_byte(src[c] as f32 * gains[c]);
            }
            if stride == 4 {
                dst[3] = src[3];
            }
        }

        debug!(?gains, "Colour temperature applied");
        Ok(())
    }
}
