// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Neighbourhood operators — Sobel edge map and box blur.

use pixelwerk_core::error::{PixelError, Result};
use pixelwerk_core::types::{EdgeBorder, ImageDescriptor};
use tracing::{debug, info, instrument, warn};

use crate::color::{clamp_byte, luminance};
use crate::session::Processor;

const SOBEL_X: [f64; 9] = [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0];
const SOBEL_Y: [f64; 9] = [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0];

impl Processor {
    /// Write a binary edge map of the INPUT image into OUTPUT.
    ///
    /// Interior pixels get 255 in every colour channel when the Sobel
    /// gradient magnitude of their luminance exceeds `threshold`, else 0.
    /// Alpha is copied from INPUT. The one-pixel frame is handled according
    /// to `ProcessorConfig::edge_border`; with the default `Untouched` it keeps
    /// whatever OUTPUT held before, so hosts that need a defined frame must
    /// clear OUTPUT first.
    #[instrument(skip(self))]
    pub fn detect_edges(&mut self, desc: ImageDescriptor, threshold: f32) -> Result<()> {
        self.ensure_initialized()?;

        let border = self.config().edge_border;
        let len = desc.byte_len()?;
        let (input, output) = self.frame(len, len)?;

        sobel_threshold(input, output, desc, threshold as f64);
        fill_border(input, output, desc, border);

        debug!(%desc, ?border, "Edge detection complete");
        Ok(())
    }

    /// Box-blur the INPUT image into OUTPUT.
    ///
    /// Every output byte is the unweighted mean of the `(2r+1)²`
    /// neighbourhood, with out-of-range coordinates clamped to the nearest
    /// edge pixel. All channels, alpha included, are blurred alike. Cost is
    /// `O(width * height * r²)`.
    #[instrument(skip(self))]
    pub fn blur(&mut self, desc: ImageDescriptor, radius: u32) -> Result<()> {
        self.ensure_initialized()?;

        if radius == 0 {
            warn!("Blur radius must be positive");
            return Err(PixelError::InvalidGeometry(
                "blur radius must be greater than zero".into(),
            ));
        }

        let len = desc.byte_len()?;
        let (input, output) = self.frame(len, len)?;

        info!(%desc, radius, "Applying box blur");
        box_blur(input, output, desc, radius);
        Ok(())
    }
}

/// Per-sample luminance at byte offset `idx`.
#[inline]
fn sample_luminance(src: &[u8], idx: usize, channels: usize) -> f64 {
    if channels >= 3 {
        luminance(src[idx], src[idx + 1], src[idx + 2]) as f64
    } else {
        src[idx] as f64
    }
}

fn sobel_threshold(src: &[u8], dst: &mut [u8], desc: ImageDescriptor, threshold: f64) {
    let channels = desc.channels.count();
    let width = desc.width as usize;
    let height = desc.height as usize;
    if width < 3 || height < 3 {
        return;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut gx = 0.0f64;
            let mut gy = 0.0f64;
            for ky in 0..3 {
                for kx in 0..3 {
                    let idx = ((y + ky - 1) * width + (x + kx - 1)) * channels;
                    let lum = sample_luminance(src, idx, channels);
                    gx += lum * SOBEL_X[ky * 3 + kx];
                    gy += lum * SOBEL_Y[ky * 3 + kx];
                }
            }

            let magnitude = (gx * gx + gy * gy).sqrt();
            let edge = if magnitude > threshold { 255 } else { 0 };

            let base = (y * width + x) * channels;
            for c in 0..channels {
                dst[base + c] = if c == 3 { src[base + c] } else { edge };
            }
        }
    }
}

fn fill_border(src: &[u8], dst: &mut [u8], desc: ImageDescriptor, border: EdgeBorder) {
    if border == EdgeBorder::Untouched || desc.is_empty() {
        return;
    }

    let channels = desc.channels.count();
    let width = desc.width as usize;
    let height = desc.height as usize;

    for y in 0..height {
        let full_row = y == 0 || y + 1 == height;
        let step = if full_row { 1 } else { (width - 1).max(1) };
        for x in (0..width).step_by(step) {
            let base = (y * width + x) * channels;
            for c in 0..channels {
                dst[base + c] = match border {
                    EdgeBorder::CopyInput => src[base + c],
                    _ if c == 3 => src[base + c],
                    _ => 0,
                };
            }
        }
    }
}

fn box_blur(src: &[u8], dst: &mut [u8], desc: ImageDescriptor, radius: u32) {
    let channels = desc.channels.count();
    let width = desc.width as i64;
    let height = desc.height as i64;
    let radius = radius as i64;
    let kernel_size = radius * 2 + 1;
    let weight = 1.0f32 / (kernel_size * kernel_size) as f32;

    for y in 0..height {
        for x in 0..width {
            let mut sum = [0.0f32; 4];

            for ky in -radius..=radius {
                let sample_y = (y + ky).clamp(0, height - 1);
                for kx in -radius..=radius {
                    let sample_x = (x + kx).clamp(0, width - 1);
                    let idx = (sample_y * width + sample_x) as usize * channels;
                    for (c, acc) in sum.iter_mut().enumerate().take(channels) {
                        *acc += src[idx + c] as f32 * weight;
                    }
                }
            }

            let out = (y * width + x) as usize * channels;
            for c in 0..channels {
                dst[out + c] = clamp_byte(sum[c]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;
    use imageproc::gradients::{horizontal_sobel, vertical_sobel};
    use pixelwerk_core::config::ProcessorConfig;
    use pixelwerk_core::types::Channels;

    fn session_with(data: &[u8], config: ProcessorConfig) -> Processor {
        let mut processor = Processor::new(config);
        processor.initialize(data.len().max(1)).expect("initialize");
        processor.load_input(data).expect("load");
        processor
    }

    fn interior(desc: ImageDescriptor) -> impl Iterator<Item = (usize, usize)> {
        let (w, h) = (desc.width as usize, desc.height as usize);
        (1..h.saturating_sub(1)).flat_map(move |y| (1..w.saturating_sub(1)).map(move |x| (x, y)))
    }

    #[test]
    fn blur_two_by_two_truncates_mean() {
        let desc = ImageDescriptor::new(2, 2, Channels::Gray);
        let mut processor = session_with(&[0, 255, 255, 0], ProcessorConfig::default());

        processor.blur(desc, 1).expect("blur");
        let out = processor.read_output(desc).expect("read");
        // (0,0): 4*0 + 2*255 + 2*255 + 1*0 = 1020, 1020 / 9 = 113.33.
        assert_eq!(out[0], 113);
        assert_eq!(out, vec![113, 141, 141, 113]);
    }

    #[test]
    fn blur_rejects_zero_radius() {
        let desc = ImageDescriptor::new(2, 2, Channels::Gray);
        let mut processor = session_with(&[1, 2, 3, 4], ProcessorConfig::default());
        let result = processor.blur(desc, 0);
        assert!(matches!(result, Err(PixelError::InvalidGeometry(_))));
        assert_eq!(processor.output().expect("output"), &[0, 0, 0, 0]);
    }

    #[test]
    fn blur_treats_alpha_like_color() {
        let desc = ImageDescriptor::new(3, 1, Channels::Rgba);
        let data = [0, 0, 0, 0, 90, 90, 90, 90, 180, 180, 180, 180];
        let mut processor = session_with(&data, ProcessorConfig::default());

        processor.blur(desc, 1).expect("blur");
        let out = processor.read_output(desc).expect("read");
        for px in out.chunks_exact(4) {
            assert!(px.iter().all(|&b| b == px[0]), "{px:?}");
        }
    }

    #[test]
    fn blur_of_uniform_image_stays_within_one_level() {
        let desc = ImageDescriptor::new(5, 4, Channels::Rgb);
        let data = [77u8; 60];
        let mut processor = session_with(&data, ProcessorConfig::default());

        processor.blur(desc, 3).expect("blur");
        let out = processor.read_output(desc).expect("read");
        assert!(out.iter().all(|&b| b == 76 || b == 77));
    }

    /// A flat image has zero gradient everywhere, so no threshold can
    /// produce an edge.
    #[test]
    fn uniform_image_has_no_edges() {
        for channels in [Channels::Gray, Channels::Rgb, Channels::Rgba] {
            let desc = ImageDescriptor::new(6, 5, channels);
            let data: Vec<u8> = [13u8, 201, 77, 255]
                .iter()
                .copied()
                .cycle()
                .take(desc.channels.count())
                .collect::<Vec<_>>()
                .repeat(30);
            let mut processor = session_with(&data, ProcessorConfig::default());

            for threshold in [1e-6, 0.5, 50.0] {
                processor.detect_edges(desc, threshold).expect("detect_edges");
                let out = processor.read_output(desc).expect("read");
                let c = channels.count();
                for (x, y) in interior(desc) {
                    let base = (y * 6 + x) * c;
                    for ch in 0..channels.color_count() {
                        assert_eq!(out[base + ch], 0, "{channels:?} ({x},{y})");
                    }
                }
            }
        }
    }

    /// Cross-check the interior against an independent Sobel implementation.
    #[test]
    fn gray_edges_match_reference_sobel() {
        let (w, h) = (12u32, 9u32);
        let data: Vec<u8> = (0..w * h).map(|i| ((i * i * 31 + i * 7) % 256) as u8).collect();
        let reference = GrayImage::from_raw(w, h, data.clone()).expect("reference image");
        let gx = horizontal_sobel(&reference);
        let gy = vertical_sobel(&reference);

        let desc = ImageDescriptor::new(w, h, Channels::Gray);
        let mut processor = session_with(&data, ProcessorConfig::default());
        let threshold = 300.0;
        processor.detect_edges(desc, threshold).expect("detect_edges");
        let out = processor.read_output(desc).expect("read");

        for (x, y) in interior(desc) {
            let dx = gx.get_pixel(x as u32, y as u32)[0] as f64;
            let dy = gy.get_pixel(x as u32, y as u32)[0] as f64;
            let expected = if (dx * dx + dy * dy).sqrt() > threshold as f64 { 255 } else { 0 };
            assert_eq!(out[y * w as usize + x], expected, "({x},{y})");
        }
    }

    #[test]
    fn edges_keep_alpha_and_leave_border_untouched() {
        let desc = ImageDescriptor::new(3, 3, Channels::Rgba);
        let mut data = vec![0u8; 36];
        for (i, px) in data.chunks_exact_mut(4).enumerate() {
            let v = if i % 3 == 2 { 255 } else { 0 };
            px.copy_from_slice(&[v, v, v, 40 + i as u8]);
        }
        let mut processor = session_with(&data, ProcessorConfig::default());
        let before = processor.output().expect("output").to_vec();

        processor.detect_edges(desc, 10.0).expect("detect_edges");
        let out = processor.read_output(desc).expect("read");

        assert_eq!(&out[16..20], &[255, 255, 255, 44]);
        for idx in (0..36).filter(|i| !(16..20).contains(i)) {
            assert_eq!(out[idx], before[idx], "border byte {idx}");
        }
    }

    #[test]
    fn edge_border_modes() {
        let desc = ImageDescriptor::new(3, 3, Channels::Rgba);
        let data: Vec<u8> = (0..36).map(|i| 100 + i as u8).collect();

        let cleared = {
            let config = ProcessorConfig {
                edge_border: EdgeBorder::Clear,
                ..ProcessorConfig::default()
            };
            let mut processor = session_with(&data, config);
            processor.detect_edges(desc, 1000.0).expect("detect_edges");
            processor.read_output(desc).expect("read")
        };
        for (i, px) in cleared.chunks_exact(4).enumerate() {
            assert_eq!(&px[..3], &[0, 0, 0]);
            assert_eq!(px[3], data[i * 4 + 3]);
        }

        let copied = {
            let config = ProcessorConfig {
                edge_border: EdgeBorder::CopyInput,
                ..ProcessorConfig::default()
            };
            let mut processor = session_with(&data, config);
            processor.detect_edges(desc, 1000.0).expect("detect_edges");
            processor.read_output(desc).expect("read")
        };
        for i in (0..9).filter(|&i| i != 4) {
            assert_eq!(&copied[i * 4..i * 4 + 4], &data[i * 4..i * 4 + 4]);
        }
    }

    #[test]
    fn edge_border_modes_accept_zero_width() {
        let desc = ImageDescriptor::new(0, 3, Channels::Gray);
        for edge_border in [EdgeBorder::Clear, EdgeBorder::CopyInput] {
            let config = ProcessorConfig {
                edge_border,
                ..ProcessorConfig::default()
            };
            let mut processor = session_with(&[], config);
            processor.detect_edges(desc, 10.0).expect("detect_edges");
            assert!(processor.read_output(desc).expect("read").is_empty());
        }
    }
}
