// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pixel and colour utilities — byte clamping, sRGB transfer curve, HSV.
//
// All arithmetic is single precision so results match byte-for-byte across
// hosts that feed the same buffers.

/// Saturate `value` to 0..=255 and truncate toward zero.
///
/// Truncation (not rounding) is part of the numeric contract: 113.9 becomes
/// 113. NaN maps to 0.
#[inline]
pub fn clamp_byte(value: f32) -> u8 {
    if value < 0.0 {
        0
    } else if value > 255.0 {
        255
    } else {
        value as u8
    }
}

/// Decode one normalised sRGB sample to linear light.
#[inline]
pub fn srgb_to_linear(srgb: f32) -> f32 {
    if srgb <= 0.04045 {
        srgb / 12.92
    } else {
        ((srgb + 0.055) / 1.055).powf(2.4)
    }
}

/// Encode one linear-light sample back to normalised sRGB.
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    if linear <= 0.003_130_8 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Rec. 601 luma of an RGB triple, on the 0..=255 scale.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// Hue/saturation/value triple. Hue is in degrees `[0, 360)`, saturation and
/// value in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

/// Decompose an 8-bit RGB triple into HSV.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let rf = r as f32 / 255.0;
    let gf = g as f32 / 255.0;
    let bf = b as f32 / 255.0;

    let max = rf.max(gf.max(bf));
    let min = rf.min(gf.min(bf));
    let delta = max - min;

    let s = if max == 0.0 { 0.0 } else { delta / max };

    let mut h = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * ((gf - bf) / delta)
    } else if max == gf {
        60.0 * (2.0 + (bf - rf) / delta)
    } else {
        60.0 * (4.0 + (rf - gf) / delta)
    };
    if h < 0.0 {
        h += 360.0;
    }

    Hsv { h, s, v: max }
}

/// Rebuild an 8-bit RGB triple from HSV using the six 60° sectors.
pub fn hsv_to_rgb(hsv: Hsv) -> [u8; 3] {
    let Hsv { h, s, v } = hsv;
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (rf, gf, bf) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    [
        clamp_byte((rf + m) * 255.0),
        clamp_byte((gf + m) * 255.0),
        clamp_byte((bf + m) * 255.0),
    ]
}
