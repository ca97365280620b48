// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoding with EXIF orientation correction.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageReader};

use crate::error::{BitmapError, ensure_budget};

/// EXIF orientation tag values (1-8).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Stored upright.
    #[default]
    Normal,
    /// Mirrored horizontally.
    FlipHorizontal,
    /// Upside down.
    Rotate180,
    /// Mirrored vertically.
    FlipVertical,
    /// Mirrored across the main diagonal.
    Transpose,
    /// Needs a 90° clockwise turn to display upright.
    Rotate90,
    /// Mirrored across the anti-diagonal.
    Transverse,
    /// Needs a 270° clockwise turn to display upright.
    Rotate270,
}

impl Orientation {
    /// Maps an EXIF orientation value; unknown values read as [`Self::Normal`].
    #[must_use]
    pub fn from_exif(value: u32) -> Self {
        match value {
            2 => Self::FlipHorizontal,
            3 => Self::Rotate180,
            4 => Self::FlipVertical,
            5 => Self::Transpose,
            6 => Self::Rotate90,
            7 => Self::Transverse,
            8 => Self::Rotate270,
            _ => Self::Normal,
        }
    }

    /// Clockwise rotation part of the orientation, ignoring mirroring.
    #[must_use]
    pub fn degrees(self) -> i32 {
        match self {
            Self::Rotate90 => 90,
            Self::Rotate180 => 180,
            Self::Rotate270 => 270,
            _ => 0,
        }
    }

    /// Returns `true` when the upright image swaps width and height.
    #[must_use]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Self::Transpose | Self::Rotate90 | Self::Transverse | Self::Rotate270
        )
    }

    /// Turns a stored image upright.
    #[must_use]
    pub fn apply(self, image: DynamicImage) -> DynamicImage {
        match self {
            Self::Normal => image,
            Self::FlipHorizontal => image.fliph(),
            Self::Rotate180 => image.rotate180(),
            Self::FlipVertical => image.flipv(),
            Self::Transpose => image.rotate90().fliph(),
            Self::Rotate90 => image.rotate90(),
            Self::Transverse => image.rotate270().fliph(),
            Self::Rotate270 => image.rotate270(),
        }
    }
}

/// Reads the EXIF orientation of an encoded image.
///
/// Images without EXIF data are [`Orientation::Normal`].
///
/// # Errors
///
/// Fails when EXIF data is present but cannot be parsed.
pub fn exif_orientation(bytes: &[u8]) -> Result<Orientation, BitmapError> {
    let exif = match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => return Ok(Orientation::Normal),
        Err(err) => return Err(err.into()),
    };
    Ok(exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map_or(Orientation::Normal, Orientation::from_exif))
}

/// Decodes JPEG or PNG bytes and turns the result upright.
///
/// Malformed EXIF data is logged and ignored.
///
/// # Errors
///
/// Fails when the bytes cannot be decoded or the image is over the pixel
/// budget.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, BitmapError> {
    let image = decode_raw(bytes)?;
    Ok(orientation_or_normal(bytes).apply(image))
}

/// Decodes like [`decode`], then shrinks by an integer sample size so that
/// the image roughly fits `max_resolution` on its limiting side.
///
/// A `max_resolution` of zero disables downsampling.
///
/// # Errors
///
/// Same as [`decode`].
pub fn decode_downsampled(bytes: &[u8], max_resolution: u32) -> Result<DynamicImage, BitmapError> {
    let image = decode_raw(bytes)?;
    let sample = sample_size(image.width(), image.height(), max_resolution);
    let image = if sample > 1 {
        let w = (image.width() / sample).max(1);
        let h = (image.height() / sample).max(1);
        log::debug!(
            "downsampling {}x{} by {sample} to {w}x{h}",
            image.width(),
            image.height()
        );
        image.resize_exact(w, h, FilterType::Triangle)
    } else {
        image
    };
    Ok(orientation_or_normal(bytes).apply(image))
}

/// Integer sample size bringing `width` x `height` near `max_resolution`.
///
/// Roughly square images are sized by their height, others by their width,
/// unless the image is more than twice as tall as it is wide.
#[must_use]
pub fn sample_size(width: u32, height: u32, max_resolution: u32) -> u32 {
    if max_resolution == 0 || (width <= max_resolution && height <= max_resolution) {
        return 1;
    }
    let (w, h) = (u64::from(width), u64::from(height));
    let by_height = (w > h && w < 2 * h) || h > 2 * w;
    let side = if by_height { h } else { w };
    let max = u64::from(max_resolution);
    u32::try_from((side + max / 2) / max).map_or(u32::MAX, |s| s.max(1))
}

fn decode_raw(bytes: &[u8]) -> Result<DynamicImage, BitmapError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| BitmapError::Decode(ImageError::IoError(e)))?;
    let (width, height) = reader.into_dimensions().map_err(BitmapError::Decode)?;
    ensure_budget(width, height)?;

    let image = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| BitmapError::Decode(ImageError::IoError(e)))?
        .decode()
        .map_err(BitmapError::Decode)?;
    log::debug!("decoded {}x{} bitmap", image.width(), image.height());
    Ok(image)
}

fn orientation_or_normal(bytes: &[u8]) -> Orientation {
    exif_orientation(bytes).unwrap_or_else(|err| {
        log::debug!("ignoring unreadable EXIF data: {err}");
        Orientation::Normal
    })
}
