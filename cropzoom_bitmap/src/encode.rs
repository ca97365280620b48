// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JPEG and PNG export.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};

use crate::error::{BitmapError, ensure_budget};

/// Default JPEG quality for exports.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Lowest quality [`encode_max_kb`] steps down to.
const MIN_BUDGET_QUALITY: u8 = 20;

/// Encoded output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Baseline JPEG at the given quality (clamped to 1-100). Alpha is
    /// dropped.
    Jpeg {
        /// Encoder quality.
        quality: u8,
    },
    /// Lossless RGBA PNG.
    Png,
}

impl Default for ExportFormat {
    fn default() -> Self {
        Self::Jpeg {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Encodes `image` in `format`.
///
/// # Errors
///
/// Fails for an empty bitmap or when the encoder reports an error.
pub fn encode(image: &DynamicImage, format: ExportFormat) -> Result<Vec<u8>, BitmapError> {
    let (width, height) = (image.width(), image.height());
    ensure_budget(width, height)?;
    let mut out = Vec::new();
    match format {
        ExportFormat::Jpeg { quality } => {
            let rgb = image.to_rgb8();
            JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
                .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
                .map_err(BitmapError::Encode)?;
        }
        ExportFormat::Png => {
            let rgba = image.to_rgba8();
            PngEncoder::new(&mut out)
                .write_image(rgba.as_raw(), width, height, ExtendedColorType::Rgba8)
                .map_err(BitmapError::Encode)?;
        }
    }
    log::trace!("encoded {width}x{height} as {format:?}: {} bytes", out.len());
    Ok(out)
}

/// Encodes `image` to at most `max_kb` kilobytes when possible.
///
/// Tries lossless PNG first, then JPEG from quality 100 downward in steps of
/// ten. If nothing fits, the smallest attempt (the lowest quality JPEG) is
/// returned.
///
/// # Errors
///
/// Same as [`encode`].
pub fn encode_max_kb(image: &DynamicImage, max_kb: usize) -> Result<Vec<u8>, BitmapError> {
    let budget = max_kb.saturating_mul(1024);
    let mut out = encode(image, ExportFormat::Png)?;
    let mut quality = 100;
    while out.len() > budget && quality >= MIN_BUDGET_QUALITY {
        out = encode(image, ExportFormat::Jpeg { quality })?;
        quality -= 10;
    }
    if out.len() > budget {
        log::debug!("{} byte export exceeds the {max_kb} KiB budget", out.len());
    }
    Ok(out)
}
