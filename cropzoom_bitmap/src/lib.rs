// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cropzoom Bitmap: stateless bitmap helpers for crop views, built on `image`.
//!
//! - Geometry: [`scale`], [`scale_by`], [`rotate`], [`mirror_rotate`],
//!   [`crop`] and [`center_square`].
//! - Masks: [`rounded_corners`], [`circle`] and [`mix`].
//! - Decoding: [`decode`] and [`decode_downsampled`] turn images upright using
//!   their EXIF orientation ([`exif_orientation`]).
//! - Export: [`encode`] as JPEG or PNG, and [`encode_max_kb`] for a size budget.
//!
//! Every helper that allocates checks the result against [`MAX_PIXELS`] and
//! reports failures as [`BitmapError`].
//!
//! ```rust
//! use cropzoom_bitmap::{ExportFormat, PixelRect, crop, decode, encode};
//! use image::{DynamicImage, RgbImage};
//!
//! let source = DynamicImage::ImageRgb8(RgbImage::new(64, 48));
//! let png = encode(&source, ExportFormat::Png)?;
//! let decoded = decode(&png)?;
//! let square = crop(&decoded, PixelRect::new(8, 0, 56, 48))?;
//! assert_eq!((square.width(), square.height()), (48, 48));
//! # Ok::<(), cropzoom_bitmap::BitmapError>(())
//! ```

mod decode;
mod encode;
mod error;
mod mask;
mod ops;
mod region;

pub use decode::{Orientation, decode, decode_downsampled, exif_orientation, sample_size};
pub use encode::{DEFAULT_JPEG_QUALITY, ExportFormat, encode, encode_max_kb};
pub use error::{BitmapError, MAX_PIXELS};
pub use mask::{circle, mix, rounded_corners};
pub use ops::{center_square, crop, mirror_rotate, quarter_turns, rotate, scale, scale_by};
pub use region::PixelRect;
