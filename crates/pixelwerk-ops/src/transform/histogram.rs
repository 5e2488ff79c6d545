// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-channel histogram equalisation.

use pixelwerk_core::error::Result;
use pixelwerk_core::types::ImageDescriptor;
use tracing::{debug, instrument};

use crate::session::Processor;

impl Processor {
    /// Equalise each colour channel of INPUT independently into OUTPUT.
    ///
    /// For every processed channel the cumulative histogram `cdf` yields a
    /// lookup table `lut[i] = cdf[i] * 255 / pixel_count` (integer division),
    /// and each byte `v` becomes `lut[v]`. Alpha is copied unchanged. An
    /// empty image is a successful no-op.
    #[instrument(skip(self))]
    pub fn equalize_histogram(&mut self, desc: ImageDescriptor) -> Result<()> {
        self.ensure_initialized()?;

        let len = desc.byte_len()?;
        let total = desc.pixel_count()? as u64;
        let (input, output) = self.frame(len, len)?;

        if total == 0 {
            debug!(%desc, "Empty image, nothing to equalise");
            return Ok(());
        }

        let stride = desc.channels.count();
        for channel in 0..desc.channels.color_count() {
            let lut = equalization_lut(input.iter().skip(channel).step_by(stride).copied(), total);
            for (dst, src) in output
                .iter_mut()
                .skip(channel)
                .step_by(stride)
                .zip(input.iter().skip(channel).step_by(stride))
            {
                *dst = lut[*src as usize];
            }
        }

        if desc.channels.has_alpha() {
            for (dst, src) in output.chunks_exact_mut(4).zip(input.chunks_exact(4)) {
                dst[3] = src[3];
            }
        }

        debug!(%desc, "Histogram equalised");
        Ok(())
    }
}

/// Build the equalisation lookup table for one channel's samples.
fn equalization_lut(samples: impl Iterator<Item = u8>, total: u64) -> [u8; 256] {
    let mut histogram = [0u64; 256];
    for sample in samples {
        histogram[sample as usize] += 1;
    }

    let mut lut = [0u8; 256];
    let mut cdf = 0u64;
    for (slot, count) in lut.iter_mut().zip(histogram) {
        cdf += count;
        *slot = (cdf * 255 / total) as u8;
    }
    lut
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelwerk_core::error::PixelError;
    use pixelwerk_core::types::Channels;

    fn equalize(data: &[u8], desc: ImageDescriptor) -> Vec<u8> {
        let mut processor = Processor::default();
        processor.initialize(data.len().max(1)).expect("initialize");
        processor.load_input(data).expect("load");
        processor.equalize_histogram(desc).expect("equalize");
        processor.read_output(desc).expect("read")
    }

    /// A single-valued channel has cdf == total at that value, so it maps to 255.
    #[test]
    fn uniform_channel_maps_to_white() {
        let desc = ImageDescriptor::new(4, 3, Channels::Gray);
        for v in 0..=255u8 {
            assert_eq!(equalize(&[v; 12], desc), vec![255u8; 12], "value {v}");
        }
    }

    #[test]
    fn two_level_gray_spreads_to_extremes() {
        let desc = ImageDescriptor::new(4, 1, Channels::Gray);
        // cdf(10) = 2 -> 2*255/4 = 127, cdf(20) = 4 -> 255.
        assert_eq!(equalize(&[10, 20, 10, 20], desc), vec![127, 255, 127, 255]);
    }

    #[test]
    fn channels_are_equalised_independently() {
        let desc = ImageDescriptor::new(2, 1, Channels::Rgb);
        let out = equalize(&[0, 50, 200, 100, 50, 200], desc);
        // Red has two levels, green and blue are single-valued.
        assert_eq!(out, vec![127, 255, 255, 255, 255, 255]);
    }

    #[test]
    fn alpha_is_copied() {
        let desc = ImageDescriptor::new(3, 1, Channels::Rgba);
        let data = [10, 20, 30, 7, 40, 50, 60, 99, 70, 80, 90, 250];
        let out = equalize(&data, desc);
        assert_eq!([out[3], out[7], out[11]], [7, 99, 250]);
    }

    #[test]
    fn lut_is_monotonic() {
        let samples: Vec<u8> = (0..1000u32).map(|i| ((i * i) % 251) as u8).collect();
        let lut = equalization_lut(samples.iter().copied(), samples.len() as u64);
        assert!(lut.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(lut[255], 255);
    }

    #[test]
    fn empty_image_is_a_no_op() {
        let mut processor = Processor::default();
        processor.initialize(4).expect("initialize");
        processor.load_input(&[9, 9, 9, 9]).expect("load");

        processor
            .equalize_histogram(ImageDescriptor::new(0, 5, Channels::Rgba))
            .expect("equalize");
        assert_eq!(processor.output().expect("output"), &[0, 0, 0, 0]);
    }

    #[test]
    fn requires_initialized_session() {
        let mut processor = Processor::default();
        let result = processor.equalize_histogram(ImageDescriptor::new(1, 1, Channels::Gray));
        assert!(matches!(result, Err(PixelError::NotInitialized)));
    }
}
