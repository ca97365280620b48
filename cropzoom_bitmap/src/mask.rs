// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alpha masks and compositing.

use image::{DynamicImage, RgbaImage, imageops};

use crate::error::{BitmapError, ensure_budget};
use crate::ops::scale;

/// Copies `image` to RGBA with its corners rounded by `radius` pixels.
///
/// The radius is clamped to half the shorter side; edges are anti-aliased.
///
/// # Errors
///
/// Fails only for an empty bitmap.
pub fn rounded_corners(image: &DynamicImage, radius: f64) -> Result<RgbaImage, BitmapError> {
    ensure_budget(image.width(), image.height())?;
    let w = f64::from(image.width());
    let h = f64::from(image.height());
    let r = radius.clamp(0.0, w.min(h) / 2.0);
    Ok(apply_coverage(image, |x, y| {
        // Distance from the pixel center to the nearest corner arc center,
        // measured only inside the corner squares.
        let cx = x.clamp(r, w - r);
        let cy = y.clamp(r, h - r);
        let d = (x - cx).hypot(y - cy);
        coverage(r - d)
    }))
}

/// Copies `image` to RGBA keeping only the ellipse inscribed in its bounds.
///
/// For a square bitmap this is a circle touching every edge.
///
/// # Errors
///
/// Fails only for an empty bitmap.
pub fn circle(image: &DynamicImage) -> Result<RgbaImage, BitmapError> {
    ensure_budget(image.width(), image.height())?;
    let rx = f64::from(image.width()) / 2.0;
    let ry = f64::from(image.height()) / 2.0;
    let min_r = rx.min(ry);
    Ok(apply_coverage(image, |x, y| {
        let d = ((x - rx) / rx).hypot((y - ry) / ry);
        coverage((1.0 - d) * min_r)
    }))
}

/// Scales `bottom` to `bottom_size` and `top` to `top_size`, then draws the
/// scaled top centered over the scaled bottom.
///
/// # Errors
///
/// Fails when either target size is empty or over the pixel budget.
pub fn mix(
    top: &DynamicImage,
    top_size: (u32, u32),
    bottom: &DynamicImage,
    bottom_size: (u32, u32),
) -> Result<RgbaImage, BitmapError> {
    let top = scale(top, top_size.0, top_size.1)?.into_rgba8();
    let mut out = scale(bottom, bottom_size.0, bottom_size.1)?.into_rgba8();
    let x = (i64::from(bottom_size.0) - i64::from(top_size.0)) / 2;
    let y = (i64::from(bottom_size.1) - i64::from(top_size.1)) / 2;
    imageops::overlay(&mut out, &top, x, y);
    Ok(out)
}

/// Coverage of a pixel whose center lies `inside` pixels within an edge.
fn coverage(inside: f64) -> f64 {
    (inside + 0.5).clamp(0.0, 1.0)
}

/// Multiplies each pixel's alpha by `cover(x, y)` evaluated at its center.
fn apply_coverage(image: &DynamicImage, cover: impl Fn(f64, f64) -> f64) -> RgbaImage {
    let mut out = image.to_rgba8();
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let c = cover(f64::from(x) + 0.5, f64::from(y) + 0.5);
        pixel.0[3] = scale_alpha(pixel.0[3], c);
    }
    out
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "the product is clamped to the u8 range before the cast"
)]
fn scale_alpha(alpha: u8, coverage: f64) -> u8 {
    (f64::from(alpha) * coverage).round().clamp(0.0, 255.0) as u8
}
