// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use cropzoom_bitmap::BitmapError;

/// Errors returned when exporting a crop.
#[derive(Debug, thiserror::Error)]
pub enum CropError {
    /// No image is displayed.
    #[error("no image to crop")]
    NoImage,
    /// The view has not been given a size yet.
    #[error("the view has not been laid out")]
    NotLaidOut,
    /// Cropping, rotating or encoding the bitmap failed.
    #[error(transparent)]
    Bitmap(#[from] BitmapError),
}
