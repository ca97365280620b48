// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometric bitmap operations.

use image::DynamicImage;
use image::imageops::FilterType;

use crate::error::{BitmapError, ensure_budget};
use crate::region::PixelRect;

/// Resamples `image` to exactly `width` x `height`.
///
/// # Errors
///
/// Fails for an empty target or one over the pixel budget.
pub fn scale(image: &DynamicImage, width: u32, height: u32) -> Result<DynamicImage, BitmapError> {
    ensure_budget(width, height)?;
    if image.width() == width && image.height() == height {
        return Ok(image.clone());
    }
    Ok(image.resize_exact(width, height, FilterType::Triangle))
}

/// Resamples `image` by `factor` on both axes, keeping at least one pixel.
///
/// # Errors
///
/// Fails when `factor` is not finite and positive, or the result is over
/// the pixel budget.
pub fn scale_by(image: &DynamicImage, factor: f64) -> Result<DynamicImage, BitmapError> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(BitmapError::InvalidScale(factor));
    }
    let width = scaled_dimension(image.width(), factor);
    let height = scaled_dimension(image.height(), factor);
    scale(image, width, height)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "values above u32::MAX saturate and are then rejected by the pixel budget"
)]
fn scaled_dimension(size: u32, factor: f64) -> u32 {
    (f64::from(size) * factor).round().max(1.0) as u32
}

/// Number of clockwise quarter turns nearest to `degrees`.
#[must_use]
pub fn quarter_turns(degrees: i32) -> u8 {
    match (degrees.rem_euclid(360) + 45) / 90 % 4 {
        0 => 0,
        1 => 1,
        2 => 2,
        _ => 3,
    }
}

/// Rotates `image` clockwise by `degrees`, snapped to the nearest quarter turn.
#[must_use]
pub fn rotate(image: &DynamicImage, degrees: i32) -> DynamicImage {
    match quarter_turns(degrees) {
        0 => image.clone(),
        1 => image.rotate90(),
        2 => image.rotate180(),
        _ => image.rotate270(),
    }
}

/// Rotates `image` clockwise by `degrees` (snapped to a quarter turn), then
/// mirrors the result horizontally.
#[must_use]
pub fn mirror_rotate(image: &DynamicImage, degrees: i32) -> DynamicImage {
    rotate(image, degrees).fliph()
}

/// Copies the part of `region` that lies inside `image`.
///
/// # Errors
///
/// Fails with [`BitmapError::InvalidRegion`] when `region` misses the bitmap.
pub fn crop(image: &DynamicImage, region: PixelRect) -> Result<DynamicImage, BitmapError> {
    let (width, height) = (image.width(), image.height());
    let clamped = region
        .clamp_to(width, height)
        .ok_or(BitmapError::InvalidRegion {
            region,
            width,
            height,
        })?;
    let (x, y, w, h) = to_u32_region(clamped).ok_or(BitmapError::InvalidRegion {
        region,
        width,
        height,
    })?;
    log::trace!("crop {width}x{height} to {w}x{h} at ({x}, {y})");
    Ok(image.crop_imm(x, y, w, h))
}

fn to_u32_region(r: PixelRect) -> Option<(u32, u32, u32, u32)> {
    Some((
        u32::try_from(r.x0).ok()?,
        u32::try_from(r.y0).ok()?,
        u32::try_from(r.width()).ok()?,
        u32::try_from(r.height()).ok()?,
    ))
}

/// Crops the largest centered square out of `image`.
///
/// # Errors
///
/// Fails only for an empty bitmap.
pub fn center_square(image: &DynamicImage) -> Result<DynamicImage, BitmapError> {
    let (w, h) = (i64::from(image.width()), i64::from(image.height()));
    if w == h && w > 0 {
        return Ok(image.clone());
    }
    let region = if w > h {
        PixelRect::new((w - h) / 2, 0, (w + h) / 2, h)
    } else {
        PixelRect::new(0, (h - w) / 2, w, (h + w) / 2)
    };
    crop(image, region)
}
