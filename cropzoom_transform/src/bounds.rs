// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::rotation::ImageFrame;

/// Multiplier applied to the native-resolution ratio when deriving the zoom
/// ceiling of a [`FullView`].
pub const MAX_ZOOM_FACTOR: f64 = 4.0;

/// Smallest crop, in source pixels per side, that a [`CropRegion`] lets the
/// user zoom down to.
pub const MIN_CROP_PIXELS: f64 = 250.0;

/// Policy deciding where an image is fitted and clamped inside a view.
///
/// A [`crate::ZoomTransform`] is parameterized by one of these instead of
/// being specialized by subclassing: the full-view and crop-editor variants
/// only differ in the rectangle they fit into, how they fit, and how far they
/// let the user zoom.
pub trait ViewportBounds {
    /// Rectangle, in view coordinates, that the image is centered and clamped
    /// against.
    fn bounds_rect(&self, view: Size) -> Rect;

    /// Initial fit transform mapping raw bitmap pixels into view space.
    ///
    /// Implementations return [`Affine::IDENTITY`] for empty frames or empty
    /// views.
    fn base_transform(&self, view: Size, image: &ImageFrame) -> Affine;

    /// Largest supplementary scale the user may settle on.
    ///
    /// The result is never below `1.0`.
    fn max_zoom(&self, view: Size, image: &ImageFrame) -> f64;
}

/// Fit into, and clamp against, the whole view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FullView;

impl ViewportBounds for FullView {
    fn bounds_rect(&self, view: Size) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, view)
    }

    fn base_transform(&self, view: Size, image: &ImageFrame) -> Affine {
        let oriented = image.oriented_size();
        if image.is_empty() || view.is_zero_area() {
            return Affine::IDENTITY;
        }
        let (w, h) = (oriented.width, oriented.height);
        // Fill the limiting dimension.
        let scale = if h * view.width > w * view.height {
            view.height / h
        } else {
            view.width / w
        };
        let tx = (view.width - w * scale) / 2.0;
        let ty = ((view.height - h * scale) / 2.0).max(0.0);
        Affine::translate(Vec2::new(tx, ty)) * Affine::scale(scale) * image.rotation_transform()
    }

    fn max_zoom(&self, view: Size, image: &ImageFrame) -> f64 {
        if image.is_empty() || view.is_zero_area() {
            return 1.0;
        }
        let oriented = image.oriented_size();
        let fw = oriented.width / view.width;
        let fh = oriented.height / view.height;
        (fw.max(fh) * MAX_ZOOM_FACTOR).max(1.0)
    }
}

/// Fit into, and clamp against, a crop rectangle inside the view.
///
/// The image is scaled to *cover* the crop rectangle so that the crop never
/// shows anything but image pixels. An empty crop rectangle falls back to the
/// whole view.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CropRegion {
    rect: Rect,
}

impl CropRegion {
    /// Creates a crop region from a rectangle in view coordinates.
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// Returns the configured crop rectangle in view coordinates.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Replaces the crop rectangle.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

impl ViewportBounds for CropRegion {
    fn bounds_rect(&self, view: Size) -> Rect {
        if self.rect.width() > 0.0 && self.rect.height() > 0.0 {
            self.rect
        } else {
            FullView.bounds_rect(view)
        }
    }

    fn base_transform(&self, view: Size, image: &ImageFrame) -> Affine {
        let bounds = self.bounds_rect(view);
        if image.is_empty() || bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Affine::IDENTITY;
        }
        let oriented = image.oriented_size();
        let scale = (bounds.width() / oriented.width).max(bounds.height() / oriented.height);
        let center = bounds.center();
        let tx = center.x - oriented.width * scale / 2.0;
        let ty = center.y - oriented.height * scale / 2.0;
        Affine::translate(Vec2::new(tx, ty)) * Affine::scale(scale) * image.rotation_transform()
    }

    fn max_zoom(&self, _view: Size, image: &ImageFrame) -> f64 {
        if image.is_empty() {
            return 1.0;
        }
        let oriented = image.oriented_size();
        let fw = oriented.width / MIN_CROP_PIXELS;
        let fh = oriented.height / MIN_CROP_PIXELS;
        fw.min(fh).max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Size};

    use super::{CropRegion, FullView, ViewportBounds};
    use crate::rotation::{ImageFrame, Rotation};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn full_view_fits_wide_image_to_width() {
        let view = Size::new(1000.0, 1000.0);
        let image = ImageFrame::new(2000, 1000, Rotation::Deg0);
        let base = FullView.base_transform(view, &image);
        let mapped = base.transform_rect_bbox(image.raw_rect());
        assert!(close(base.as_coeffs()[0], 0.5));
        assert!(close(mapped.width(), 1000.0));
        assert!(close(mapped.x0, 0.0));
        assert!(close(mapped.y0, 250.0));
        assert!(close(mapped.y1, 750.0));
    }

    #[test]
    fn full_view_fits_tall_image_to_height() {
        let view = Size::new(400.0, 800.0);
        let image = ImageFrame::new(1000, 4000, Rotation::Deg0);
        let mapped = FullView
            .base_transform(view, &image)
            .transform_rect_bbox(image.raw_rect());
        assert!(close(mapped.height(), 800.0));
        assert!(close(mapped.width(), 200.0));
        assert!(close(mapped.x0, 100.0));
        assert!(close(mapped.y0, 0.0));
    }

    #[test]
    fn full_view_fit_uses_oriented_size() {
        let view = Size::new(1000.0, 1000.0);
        // A wide bitmap shown a quarter turn round becomes tall.
        let image = ImageFrame::new(2000, 1000, Rotation::Deg90);
        let mapped = FullView
            .base_transform(view, &image)
            .transform_rect_bbox(image.raw_rect());
        assert!(close(mapped.height(), 1000.0));
        assert!(close(mapped.width(), 500.0));
        assert!(close(mapped.x0, 250.0));
    }

    #[test]
    fn full_view_max_zoom() {
        let view = Size::new(500.0, 500.0);
        let image = ImageFrame::new(2000, 1000, Rotation::Deg0);
        assert!(close(FullView.max_zoom(view, &image), 16.0));

        // Small images still allow reaching 1.0.
        let tiny = ImageFrame::new(10, 10, Rotation::Deg0);
        assert!(close(FullView.max_zoom(view, &tiny), 1.0));

        let empty = ImageFrame::new(0, 0, Rotation::Deg0);
        assert!(close(FullView.max_zoom(view, &empty), 1.0));
    }

    #[test]
    fn crop_region_covers_crop_rect() {
        let view = Size::new(1000.0, 1000.0);
        let crop = CropRegion::new(Rect::new(100.0, 100.0, 900.0, 900.0));
        let image = ImageFrame::new(2000, 1000, Rotation::Deg0);
        let mapped = crop
            .base_transform(view, &image)
            .transform_rect_bbox(image.raw_rect());
        assert!(close(mapped.height(), 800.0));
        assert!(close(mapped.width(), 1600.0));
        assert!(close(mapped.center().x, 500.0));
        assert!(close(mapped.center().y, 500.0));
    }

    #[test]
    fn crop_region_max_zoom_uses_min_crop_pixels() {
        let crop = CropRegion::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let view = Size::new(100.0, 100.0);
        let image = ImageFrame::new(2000, 1000, Rotation::Deg0);
        assert!(close(crop.max_zoom(view, &image), 4.0));
        let small = ImageFrame::new(200, 300, Rotation::Deg0);
        assert!(close(crop.max_zoom(view, &small), 1.0));
    }

    #[test]
    fn empty_crop_rect_falls_back_to_view() {
        let crop = CropRegion::default();
        let view = Size::new(300.0, 200.0);
        assert_eq!(crop.bounds_rect(view), Rect::new(0.0, 0.0, 300.0, 200.0));
    }
}
