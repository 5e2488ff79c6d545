// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tonal/colour filter pass — gamma, brightness/contrast, saturation and
// unsharp sharpening, applied in that fixed order.

use pixelwerk_core::error::Result;
use pixelwerk_core::types::{Channels, FilterParameters, ImageDescriptor};
use tracing::{debug, info, instrument};

use crate::color::{clamp_byte, hsv_to_rgb, rgb_to_hsv};
use crate::session::Processor;

impl Processor {
    /// Run the combined filter pass from INPUT into OUTPUT.
    ///
    /// ## Steps
    ///
    /// 1. Gamma: every byte, alpha included, becomes `255 * (v/255)^(1/gamma)`.
    /// 2. Brightness/contrast on the colour (or grey) channels:
    ///    `(v/255 - 0.5) * contrast + 0.5 + brightness`.
    /// 3. Saturation via HSV, only for RGB(A) and only when it is not 1.0.
    /// 4. Alpha is restored from INPUT, undoing step 1 for that channel.
    /// 5. Sharpening, only when `sharpness > 0` and both sides exceed two
    ///    pixels. The step 4 result is first copied into INPUT, which is used
    ///    as scratch, and a 3x3 unsharp kernel is applied to interior pixels.
    ///    The one-pixel frame keeps its step 4 value and alpha is copied.
    #[instrument(skip(self))]
    pub fn apply_filters(&mut self, desc: ImageDescriptor, params: FilterParameters) -> Result<()> {
        self.ensure_initialized()?;

        let len = desc.byte_len()?;
        let (input, output) = self.frame(len, len)?;

        apply_gamma(input, output, params.gamma);
        adjust_tone(input, output, desc.channels, &params);

        if params.sharpness > 0.0 && desc.width > 2 && desc.height > 2 {
            info!(sharpness = params.sharpness, "Sharpening");
            input.copy_from_slice(output);
            sharpen(input, output, desc, params.sharpness);
        }

        debug!(%desc, "Filters applied");
        Ok(())
    }
}

fn apply_gamma(input: &[u8], output: &mut [u8], gamma: f32) {
    let exponent = 1.0 / gamma;
    for (dst, &src) in output.iter_mut().zip(input) {
        let corrected = (src as f32 / 255.0).powf(exponent);
        *dst = clamp_byte(corrected * 255.0);
    }
}

fn adjust_tone(input: &[u8], output: &mut [u8], channels: Channels, params: &FilterParameters) {
    let tone = |v: u8| (v as f32 / 255.0 - 0.5) * params.contrast + 0.5 + params.brightness;
    let stride = channels.count();

    for (pixel, source) in output.chunks_exact_mut(stride).zip(input.chunks_exact(stride)) {
        if !channels.is_color() {
            pixel[0] = clamp_byte(tone(pixel[0]) * 255.0);
            continue;
        }

        let rf = tone(pixel[0]);
        let gf = tone(pixel[1]);
        let bf = tone(pixel[2]);

        if params.saturation != 1.0 {
            let mut hsv = rgb_to_hsv(
                clamp_byte(rf * 255.0),
                clamp_byte(gf * 255.0),
                clamp_byte(bf * 255.0),
            );
            hsv.s = (hsv.s * params.saturation).clamp(0.0, 1.0);
            pixel[..3].copy_from_slice(&hsv_to_rgb(hsv));
        } else {
            pixel[0] = clamp_byte(rf * 255.0);
            pixel[1] = clamp_byte(gf * 255.0);
            pixel[2] = clamp_byte(bf * 255.0);
        }

        if channels.has_alpha() {
            pixel[3] = source[3];
        }
    }
}

/// Apply `[[0,-s,0],[-s,1+4s,-s],[0,-s,0]]` to interior pixels of `scratch`.
fn sharpen(scratch: &[u8], output: &mut [u8], desc: ImageDescriptor, strength: f32) {
    #[rustfmt::skip]
    let kernel = [
        0.0, -strength, 0.0,
        -strength, 1.0 + 4.0 * strength, -strength,
        0.0, -strength, 0.0,
    ];
    let channels = desc.channels.count();
    let width = desc.width as usize;
    let height = desc.height as usize;

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let base = (y * width + x) * channels;
            for c in 0..channels {
                if c == 3 {
                    output[base + c] = scratch[base + c];
                    continue;
                }

                let mut sum = 0.0f32;
                for ky in 0..3 {
                    for kx in 0..3 {
                        let idx = ((y + ky - 1) * width + (x + kx - 1)) * channels + c;
                        sum += scratch[idx] as f32 * kernel[ky * 3 + kx];
                    }
                }
                output[base + c] = clamp_byte(sum);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelwerk_core::error::PixelError;

    fn session_with(data: &[u8]) -> Processor {
        let mut processor = Processor::default();
        processor.initialize(data.len().max(1)).expect("initialize");
        processor.load_input(data).expect("load");
        processor
    }

    fn run(data: &[u8], desc: ImageDescriptor, params: FilterParameters) -> Vec<u8> {
        let mut processor = session_with(data);
        processor.apply_filters(desc, params).expect("apply_filters");
        processor.read_output(desc).expect("read")
    }

    fn noisy_rgba(width: u32, height: u32) -> Vec<u8> {
        (0..width * height * 4)
            .map(|i| ((i * 97 + 13) % 256) as u8)
            .collect()
    }

    /// Any non-positive sharpness must skip the convolution entirely.
    #[test]
    fn non_positive_sharpness_is_identical_to_zero() {
        let desc = ImageDescriptor::new(6, 5, Channels::Rgba);
        let data = noisy_rgba(6, 5);
        let base = FilterParameters {
            brightness: 0.1,
            contrast: 1.3,
            saturation: 0.7,
            sharpness: 0.0,
            gamma: 1.2,
        };

        let reference = run(&data, desc, base);
        for sharpness in [-0.0, -0.5, -10.0] {
            let out = run(&data, desc, FilterParameters { sharpness, ..base });
            assert_eq!(out, reference, "sharpness {sharpness}");
        }
    }

    #[test]
    fn alpha_passes_through_every_step() {
        let desc = ImageDescriptor::new(5, 5, Channels::Rgba);
        let data = noisy_rgba(5, 5);
        let params = FilterParameters {
            brightness: 0.4,
            contrast: 2.0,
            saturation: 1.8,
            sharpness: 0.6,
            gamma: 2.2,
        };

        let out = run(&data, desc, params);
        for (src, dst) in data.chunks_exact(4).zip(out.chunks_exact(4)) {
            assert_eq!(src[3], dst[3]);
        }
    }

    #[test]
    fn full_brightness_saturates_color_channels() {
        let desc = ImageDescriptor::new(3, 2, Channels::Rgb);
        let data: Vec<u8> = (0..18).map(|i| (i * 14) as u8).collect();
        let out = run(
            &data,
            desc,
            FilterParameters {
                brightness: 1.0,
                ..FilterParameters::default()
            },
        );
        assert!(out.iter().all(|&b| b == 255));
    }

    #[test]
    fn zero_contrast_collapses_gray_to_mid() {
        let desc = ImageDescriptor::new(4, 1, Channels::Gray);
        let out = run(
            &[0, 60, 190, 255],
            desc,
            FilterParameters {
                contrast: 0.0,
                ..FilterParameters::default()
            },
        );
        assert_eq!(out, vec![127, 127, 127, 127]);
    }

    #[test]
    fn zero_saturation_produces_gray_pixels() {
        let desc = ImageDescriptor::new(4, 1, Channels::Rgb);
        let data = [255, 0, 0, 10, 200, 40, 90, 90, 250, 33, 66, 99];
        let out = run(
            &data,
            desc,
            FilterParameters {
                saturation: 0.0,
                ..FilterParameters::default()
            },
        );
        for px in out.chunks_exact(3) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
        }
    }

    /// The sharpen pass only touches interior pixels; the frame keeps the
    /// tonal result, and INPUT ends up holding that tonal result as scratch.
    #[test]
    fn sharpen_boosts_interior_and_keeps_border() {
        let desc = ImageDescriptor::new(3, 3, Channels::Gray);
        let data = [100, 100, 100, 100, 200, 100, 100, 100, 100];
        let toned = run(&data, desc, FilterParameters::default());

        let mut processor = session_with(&data);
        processor
            .apply_filters(
                desc,
                FilterParameters {
                    sharpness: 1.0,
                    ..FilterParameters::default()
                },
            )
            .expect("apply_filters");
        let sharp = processor.read_output(desc).expect("read");

        assert_eq!(sharp[4], 255);
        for idx in [0, 1, 2, 3, 5, 6, 7, 8] {
            assert_eq!(sharp[idx], toned[idx], "border byte {idx}");
        }
        let scratch = processor.input_mut().expect("input");
        assert_eq!(&scratch[..9], toned.as_slice());
    }

    #[test]
    fn uniform_image_survives_sharpening() {
        let desc = ImageDescriptor::new(4, 4, Channels::Gray);
        let data = [120u8; 16];
        let toned = run(&data, desc, FilterParameters::default());
        let sharp = run(
            &data,
            desc,
            FilterParameters {
                sharpness: 0.5,
                ..FilterParameters::default()
            },
        );
        assert_eq!(sharp, toned);
    }

    #[test]
    fn small_images_skip_sharpening() {
        let desc = ImageDescriptor::new(2, 5, Channels::Gray);
        let data: Vec<u8> = (0..10).map(|i| (i * 25) as u8).collect();
        let toned = run(&data, desc, FilterParameters::default());
        let sharp = run(
            &data,
            desc,
            FilterParameters {
                sharpness: 3.0,
                ..FilterParameters::default()
            },
        );
        assert_eq!(sharp, toned);
    }

    #[test]
    fn oversized_descriptor_is_rejected() {
        let mut processor = session_with(&[0u8; 8]);
        let result = processor.apply_filters(
            ImageDescriptor::new(3, 3, Channels::Gray),
            FilterParameters::default(),
        );
        assert!(matches!(result, Err(PixelError::BufferTooSmall { .. })));
    }
}
