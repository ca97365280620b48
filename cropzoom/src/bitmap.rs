// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;
use std::sync::Arc;

use cropzoom_transform::{ImageFrame, Rotation};
use image::{DynamicImage, ImageBuffer, Pixel};
use kurbo::Affine;

/// A bitmap a view can display.
///
/// Views only need the pixel size; drawing the pixels is the host's job.
pub trait Bitmap {
    /// Width in pixels.
    fn width(&self) -> u32;
    /// Height in pixels.
    fn height(&self) -> u32;
}

impl Bitmap for DynamicImage {
    fn width(&self) -> u32 {
        Self::width(self)
    }

    fn height(&self) -> u32 {
        Self::height(self)
    }
}

impl<P: Pixel, C: core::ops::Deref<Target = [P::Subpixel]>> Bitmap for ImageBuffer<P, C> {
    fn width(&self) -> u32 {
        Self::width(self)
    }

    fn height(&self) -> u32 {
        Self::height(self)
    }
}

impl<B: Bitmap + ?Sized> Bitmap for Rc<B> {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }
}

impl<B: Bitmap + ?Sized> Bitmap for Arc<B> {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }
}

/// A bitmap together with the quarter-turn rotation it is displayed at.
#[derive(Clone, Debug)]
pub struct RotatedBitmap<B> {
    bitmap: B,
    rotation: Rotation,
}

impl<B: Bitmap> RotatedBitmap<B> {
    /// Wraps `bitmap` displayed at `rotation`.
    pub fn new(bitmap: B, rotation: Rotation) -> Self {
        Self { bitmap, rotation }
    }

    /// The wrapped bitmap.
    pub fn bitmap(&self) -> &B {
        &self.bitmap
    }

    /// Unwraps the bitmap.
    pub fn into_bitmap(self) -> B {
        self.bitmap
    }

    /// Display rotation.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Changes the display rotation.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Width once rotated for display.
    pub fn width(&self) -> u32 {
        if self.rotation.swaps_dimensions() {
            self.bitmap.height()
        } else {
            self.bitmap.width()
        }
    }

    /// Height once rotated for display.
    pub fn height(&self) -> u32 {
        if self.rotation.swaps_dimensions() {
            self.bitmap.width()
        } else {
            self.bitmap.height()
        }
    }

    /// Raw size and rotation, as the transform model sees them.
    pub fn frame(&self) -> ImageFrame {
        ImageFrame::new(self.bitmap.width(), self.bitmap.height(), self.rotation)
    }

    /// Transform mapping raw bitmap pixels into the rotated frame.
    pub fn rotation_transform(&self) -> Affine {
        self.frame().rotation_transform()
    }
}

#[cfg(test)]
mod tests {
    use cropzoom_transform::Rotation;
    use image::{DynamicImage, RgbaImage};
    use kurbo::{Point, Rect};

    use super::{Bitmap, RotatedBitmap};

    #[test]
    fn oriented_size_swaps_on_quarter_turns() {
        let mut rb = RotatedBitmap::new(DynamicImage::new_rgb8(40, 30), Rotation::Deg0);
        assert_eq!((rb.width(), rb.height()), (40, 30));
        rb.set_rotation(Rotation::Deg90);
        assert_eq!((rb.width(), rb.height()), (30, 40));
        rb.set_rotation(Rotation::Deg180);
        assert_eq!((rb.width(), rb.height()), (40, 30));
    }

    #[test]
    fn rotation_transform_maps_into_oriented_frame() {
        let rb = RotatedBitmap::new(RgbaImage::new(40, 30), Rotation::Deg90);
        let mapped = rb
            .rotation_transform()
            .transform_rect_bbox(Rect::new(0.0, 0.0, 40.0, 30.0));
        assert!((mapped.x0).abs() < 1e-9 && (mapped.y0).abs() < 1e-9);
        assert!((mapped.x1 - 30.0).abs() < 1e-9 && (mapped.y1 - 40.0).abs() < 1e-9);
        // The raw top-left corner ends up top-right after a clockwise turn.
        let corner = rb.rotation_transform() * Point::ORIGIN;
        assert!((corner.x - 30.0).abs() < 1e-9 && corner.y.abs() < 1e-9);
    }

    #[test]
    fn shared_bitmaps_report_size() {
        let shared = std::rc::Rc::new(DynamicImage::new_rgb8(3, 2));
        assert_eq!((shared.width(), shared.height()), (3, 2));
        let rb = RotatedBitmap::new(shared, Rotation::Deg270);
        assert_eq!(rb.frame().oriented_size().width, 2.0);
    }
}
