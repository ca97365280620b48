// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use cropzoom_bitmap::PixelRect;
use cropzoom_transform::CropRegion;
use kurbo::Rect;

use crate::bitmap::Bitmap;
use crate::view::ZoomImageView;

/// Zoom view whose image is fitted and clamped against a crop rectangle.
///
/// The image always covers the crop rectangle, so the crop never shows
/// anything but image pixels.
pub type CropImageView<B> = ZoomImageView<B, CropRegion>;

impl<B: Bitmap> ZoomImageView<B, CropRegion> {
    /// Moves the crop rectangle, in view coordinates.
    ///
    /// The image is refitted to cover the new rectangle; user zoom and pan
    /// are kept and re-clamped.
    pub fn set_crop_rect(&mut self, rect: Rect) {
        log::debug!("crop rect set to {rect:?}");
        self.transform_mut().set_bounds(CropRegion::new(rect));
    }

    /// The crop rectangle in view coordinates.
    pub fn crop_rect(&self) -> Rect {
        self.transform().bounds_rect()
    }

    /// The crop rectangle mapped into raw bitmap pixels.
    ///
    /// Edges are rounded to whole pixels. With `square` the height is forced
    /// to equal the width, which a circular crop needs. Returns `None`
    /// without an image or before layout.
    pub fn image_crop_rect(&self, square: bool) -> Option<PixelRect> {
        if !self.transform().is_ready() || !self.transform().is_laid_out() {
            return None;
        }
        let mapped = self.transform().view_to_image_rect(self.crop_rect());
        let rect = to_pixels(mapped, square);
        log::trace!("view crop {:?} maps to {rect:?}", self.crop_rect());
        Some(rect)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "rounded edges of a rect inside a u32-sized bitmap fit in i64"
)]
fn to_pixels(rect: Rect, square: bool) -> PixelRect {
    let rect = rect.round();
    let (x0, y0, x1) = (rect.x0 as i64, rect.y0 as i64, rect.x1 as i64);
    let y1 = if square { y0 + (x1 - x0) } else { rect.y1 as i64 };
    PixelRect::new(x0, y0, x1, y1)
}

#[cfg(test)]
mod tests {
    use cropzoom_bitmap::PixelRect;
    use cropzoom_transform::{CropRegion, Rotation};
    use image::DynamicImage;
    use kurbo::{Point, Rect, Size};

    use super::CropImageView;

    fn editor(w: u32, h: u32, rotation: Rotation) -> CropImageView<DynamicImage> {
        let mut view = CropImageView::new(CropRegion::default());
        view.layout(Size::new(400.0, 600.0));
        view.set_crop_rect(Rect::new(20.0, 120.0, 380.0, 480.0));
        view.set_image(DynamicImage::new_rgb8(w, h), rotation);
        view
    }

    #[test]
    fn image_covers_crop_rect() {
        let view = editor(2000, 1000, Rotation::Deg0);
        let shown = view.mapped_image_rect();
        let crop = view.crop_rect();
        assert!(shown.x0 <= crop.x0 && shown.x1 >= crop.x1);
        assert!((shown.y0 - crop.y0).abs() < 1e-9 && (shown.y1 - crop.y1).abs() < 1e-9);
    }

    #[test]
    fn unzoomed_crop_is_centered_square_of_source() {
        let view = editor(2000, 1000, Rotation::Deg0);
        assert_eq!(
            view.image_crop_rect(true),
            Some(PixelRect::new(500, 0, 1500, 1000))
        );
    }

    #[test]
    fn zooming_shrinks_source_region() {
        let mut view = editor(1000, 1000, Rotation::Deg0);
        view.zoom_to(2.0, Point::new(200.0, 300.0));
        assert_eq!(
            view.image_crop_rect(false),
            Some(PixelRect::new(250, 250, 750, 750))
        );
    }

    #[test]
    fn rotated_source_maps_back_to_raw_pixels() {
        // 1000x2000 raw, shown turned a quarter: oriented 2000x1000.
        let view = editor(1000, 2000, Rotation::Deg90);
        let rect = view.image_crop_rect(false).unwrap();
        assert_eq!((rect.width(), rect.height()), (1000, 1000));
        assert_eq!(rect, PixelRect::new(0, 500, 1000, 1500));
    }

    #[test]
    fn max_zoom_keeps_minimum_crop() {
        let view = editor(2000, 1000, Rotation::Deg0);
        assert_eq!(view.max_zoom(), 4.0);
        let tiny = editor(100, 100, Rotation::Deg0);
        assert_eq!(tiny.max_zoom(), 1.0);
    }

    #[test]
    fn no_image_has_no_crop() {
        let mut view: CropImageView<DynamicImage> = CropImageView::default();
        assert_eq!(view.image_crop_rect(true), None);
        view.layout(Size::new(100.0, 100.0));
        assert_eq!(view.crop_rect(), Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(view.image_crop_rect(true), None);
    }
}
