// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use image::ImageError;
use thiserror::Error;

/// Largest bitmap, in pixels, any helper in this crate will allocate.
///
/// 64 Mpx of RGBA8 is 256 MiB, well beyond anything a crop view displays.
pub const MAX_PIXELS: u64 = 64 * 1024 * 1024;

/// Errors produced by the bitmap helpers.
#[derive(Debug, Error)]
pub enum BitmapError {
    /// The requested bitmap exceeds [`MAX_PIXELS`].
    #[error("{width}x{height} bitmap exceeds the pixel budget")]
    TooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A zero-sized bitmap was requested.
    #[error("invalid bitmap size {width}x{height}")]
    InvalidSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A scale factor was not finite and positive.
    #[error("invalid scale factor {0}")]
    InvalidScale(f64),

    /// A region does not overlap the bitmap.
    #[error("region {region:?} does not overlap a {width}x{height} bitmap")]
    InvalidRegion {
        /// The rejected region.
        region: crate::PixelRect,
        /// Bitmap width.
        width: u32,
        /// Bitmap height.
        height: u32,
    },

    /// The input bytes could not be decoded.
    #[error("decode failed: {0}")]
    Decode(#[source] ImageError),

    /// The bitmap could not be encoded.
    #[error("encode failed: {0}")]
    Encode(#[source] ImageError),

    /// EXIF metadata is present but malformed.
    #[error("EXIF error: {0}")]
    Exif(#[from] exif::Error),
}

/// Checks a prospective allocation against [`MAX_PIXELS`].
pub(crate) fn ensure_budget(width: u32, height: u32) -> Result<(), BitmapError> {
    if width == 0 || height == 0 {
        return Err(BitmapError::InvalidSize { width, height });
    }
    if u64::from(width) * u64::from(height) > MAX_PIXELS {
        return Err(BitmapError::TooLarge { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{BitmapError, ensure_budget};

    #[test]
    fn budget_rejects_empty_and_huge() {
        assert!(ensure_budget(1, 1).is_ok());
        assert!(matches!(
            ensure_budget(0, 10),
            Err(BitmapError::InvalidSize { width: 0, height: 10 })
        ));
        assert!(matches!(
            ensure_budget(100_000, 100_000),
            Err(BitmapError::TooLarge { .. })
        ));
    }
}
