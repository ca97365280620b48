// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::bounds::{FullView, ViewportBounds};
use crate::edges::Edges;
use crate::rotation::ImageFrame;

/// Slack used when deciding whether an image edge is flush with a bound.
const FLUSH_EPSILON: f64 = 1e-6;

/// Determinants below this are treated as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// Returns a uniform scale by `factor` that keeps `anchor` fixed.
#[must_use]
pub fn scale_about(factor: f64, anchor: Point) -> Affine {
    let anchor = anchor.to_vec2();
    Affine::translate(anchor) * Affine::scale(factor) * Affine::translate(-anchor)
}

/// Pan/zoom state of an image shown inside a view.
///
/// `ZoomTransform` owns two transforms:
/// - the **base** transform, which fits the (rotated) image into the viewport
///   bounds and is recomputed whenever the view size or the image changes;
/// - the **supplementary** transform, which holds the user's zoom and pan in
///   view space and survives base recomputation.
///
/// The display transform is always `supplementary * base`.
///
/// Every operation is a no-op while no image is set, and none of them can
/// fail: degenerate inputs produce identity or neutral results.
#[derive(Clone, Debug)]
pub struct ZoomTransform<V = FullView> {
    bounds: V,
    view_size: Size,
    image: Option<ImageFrame>,
    base: Affine,
    supplementary: Affine,
    max_zoom_override: Option<f64>,
    zoomable: bool,
}

impl<V: Default + ViewportBounds> Default for ZoomTransform<V> {
    fn default() -> Self {
        Self::new(V::default())
    }
}

impl<V: ViewportBounds> ZoomTransform<V> {
    /// Creates an empty transform with no view size and no image.
    #[must_use]
    pub fn new(bounds: V) -> Self {
        Self {
            bounds,
            view_size: Size::ZERO,
            image: None,
            base: Affine::IDENTITY,
            supplementary: Affine::IDENTITY,
            max_zoom_override: None,
            zoomable: true,
        }
    }

    /// Returns the viewport bounds policy.
    #[must_use]
    pub fn bounds(&self) -> &V {
        &self.bounds
    }

    /// Replaces the viewport bounds policy.
    ///
    /// The base transform is refitted and the image re-centered against the
    /// new bounds; the supplementary transform is kept.
    pub fn set_bounds(&mut self, bounds: V) {
        self.bounds = bounds;
        self.refit();
    }

    /// Returns the rectangle the image is currently clamped against.
    #[must_use]
    pub fn bounds_rect(&self) -> Rect {
        self.bounds.bounds_rect(self.view_size)
    }

    /// Returns the current view size in device pixels.
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Returns `true` once the view has received a non-empty size.
    #[must_use]
    pub fn is_laid_out(&self) -> bool {
        self.view_size.width > 0.0 && self.view_size.height > 0.0
    }

    /// Sets the view size, refitting the base transform and re-centering.
    pub fn set_view_size(&mut self, size: Size) {
        if self.view_size == size {
            return;
        }
        self.view_size = size;
        self.refit();
    }

    /// Returns the current image frame, if any.
    #[must_use]
    pub fn image(&self) -> Option<&ImageFrame> {
        self.image.as_ref()
    }

    /// Returns `true` when an image is set.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.image.is_some()
    }

    /// Replaces the image frame and recomputes the base transform.
    ///
    /// When `reset_supplementary` is `true` the user zoom/pan is discarded;
    /// otherwise it is kept, which is what an orientation change wants.
    pub fn set_image(&mut self, image: Option<ImageFrame>, reset_supplementary: bool) {
        self.image = image;
        self.base = match &self.image {
            Some(frame) => self.bounds.base_transform(self.view_size, frame),
            None => Affine::IDENTITY,
        };
        if reset_supplementary {
            self.supplementary = Affine::IDENTITY;
        }
    }

    /// Enables or disables [`ZoomTransform::zoom_to`].
    pub fn set_zoomable(&mut self, zoomable: bool) {
        self.zoomable = zoomable;
    }

    /// Returns whether zooming is enabled.
    #[must_use]
    pub fn is_zoomable(&self) -> bool {
        self.zoomable
    }

    /// Returns the fit transform.
    #[must_use]
    pub fn base_transform(&self) -> Affine {
        self.base
    }

    /// Returns the user zoom/pan transform.
    #[must_use]
    pub fn supplementary_transform(&self) -> Affine {
        self.supplementary
    }

    /// Returns the transform used for rendering: `supplementary * base`.
    #[must_use]
    pub fn display_transform(&self) -> Affine {
        self.supplementary * self.base
    }

    /// Returns the inverse of the display transform.
    ///
    /// A singular display transform (for example a zero scale) yields the
    /// identity.
    #[must_use]
    pub fn inverse_display_transform(&self) -> Affine {
        let display = self.display_transform();
        if display.determinant().abs() < SINGULAR_EPSILON {
            return Affine::IDENTITY;
        }
        display.inverse()
    }

    /// Returns the user zoom factor relative to the base fit.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.supplementary.as_coeffs()[0]
    }

    /// Returns the user pan offset in view coordinates.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.supplementary.translation()
    }

    /// Returns the view center, used as the anchor for keyboard-style zooming.
    #[must_use]
    pub fn view_center(&self) -> Point {
        Point::new(self.view_size.width / 2.0, self.view_size.height / 2.0)
    }

    /// Overrides the zoom ceiling; `None` restores the bounds-derived value.
    pub fn set_max_zoom(&mut self, max_zoom: Option<f64>) {
        self.max_zoom_override = max_zoom.filter(|z| *z > 0.0);
    }

    /// Returns the largest scale the user may settle on, never below `1.0`.
    #[must_use]
    pub fn max_zoom(&self) -> f64 {
        if let Some(z) = self.max_zoom_override {
            return z;
        }
        match &self.image {
            Some(frame) => self.bounds.max_zoom(self.view_size, frame),
            None => 1.0,
        }
    }

    /// Returns the image rectangle as currently displayed, in view coordinates.
    ///
    /// Without an image this is [`Rect::ZERO`].
    #[must_use]
    pub fn mapped_image_rect(&self) -> Rect {
        match &self.image {
            Some(frame) => self.display_transform().transform_rect_bbox(frame.raw_rect()),
            None => Rect::ZERO,
        }
    }

    /// Returns how far the displayed image overflows the viewport bounds on
    /// each axis; zero where it fits.
    #[must_use]
    pub fn overflow(&self) -> Vec2 {
        if self.image.is_none() {
            return Vec2::ZERO;
        }
        let shown = self.mapped_image_rect();
        let bounds = self.bounds_rect();
        Vec2::new(
            (shown.width() - bounds.width()).max(0.0),
            (shown.height() - bounds.height()).max(0.0),
        )
    }

    /// Maps a rectangle in view coordinates into raw bitmap pixel coordinates.
    #[must_use]
    pub fn view_to_image_rect(&self, rect: Rect) -> Rect {
        self.inverse_display_transform().transform_rect_bbox(rect)
    }

    /// Maps a rectangle in raw bitmap pixel coordinates into view coordinates.
    #[must_use]
    pub fn image_to_view_rect(&self, rect: Rect) -> Rect {
        self.display_transform().transform_rect_bbox(rect)
    }

    /// Computes the translation [`ZoomTransform::center`] would apply, along
    /// with the edges that would be flush afterwards.
    ///
    /// Along each requested axis:
    /// - an image no larger than the bounds is centered (both edges flush);
    /// - a larger image with a gap on one side is pulled back to that side;
    /// - otherwise nothing moves.
    #[must_use]
    pub fn center_offset(&self, horizontal: bool, vertical: bool) -> (Vec2, Edges) {
        if self.image.is_none() {
            return (Vec2::ZERO, Edges::all());
        }
        let shown = self.mapped_image_rect();
        let bounds = self.bounds_rect();
        let mut delta = Vec2::ZERO;
        let mut edges = Edges::empty();

        if vertical {
            if shown.height() <= bounds.height() {
                delta.y = bounds.y0 + (bounds.height() - shown.height()) / 2.0 - shown.y0;
                edges |= Edges::TOP | Edges::BOTTOM;
            } else if shown.y0 >= bounds.y0 - FLUSH_EPSILON {
                delta.y = bounds.y0 - shown.y0;
                edges |= Edges::TOP;
            } else if shown.y1 <= bounds.y1 + FLUSH_EPSILON {
                delta.y = bounds.y1 - shown.y1;
                edges |= Edges::BOTTOM;
            }
        }

        if horizontal {
            if shown.width() <= bounds.width() {
                delta.x = bounds.x0 + (bounds.width() - shown.width()) / 2.0 - shown.x0;
                edges |= Edges::LEFT | Edges::RIGHT;
            } else if shown.x0 >= bounds.x0 - FLUSH_EPSILON {
                delta.x = bounds.x0 - shown.x0;
                edges |= Edges::LEFT;
            } else if shown.x1 <= bounds.x1 + FLUSH_EPSILON {
                delta.x = bounds.x1 - shown.x1;
                edges |= Edges::RIGHT;
            }
        }

        (delta, edges)
    }

    /// Centers or clamps the image along the requested axes.
    ///
    /// Returns the flush edges; without an image every edge is reported.
    pub fn center(&mut self, horizontal: bool, vertical: bool) -> Edges {
        let (delta, edges) = self.center_offset(horizontal, vertical);
        self.post_translate(delta);
        edges
    }

    /// Translates the image by `delta` in view space, then re-centers.
    pub fn pan(&mut self, delta: Vec2) -> Edges {
        if self.image.is_none() {
            return Edges::all();
        }
        self.post_translate(delta);
        self.center(true, true)
    }

    /// Translates the image by `delta` in view space without clamping.
    pub fn pan_unclamped(&mut self, delta: Vec2) {
        if self.image.is_none() {
            return;
        }
        self.post_translate(delta);
    }

    /// Scales about `focus` so that [`ZoomTransform::scale`] becomes `target`,
    /// then re-centers.
    ///
    /// The target is not clamped here; settling into `[1.0, max_zoom]` is
    /// the gesture layer's job. Ignored while zooming is disabled, without an
    /// image, or for non-positive targets.
    pub fn zoom_to(&mut self, target: f64, focus: Point) {
        if !self.zoomable || self.image.is_none() {
            return;
        }
        let current = self.scale();
        if current <= 0.0 || !target.is_finite() || target <= 0.0 {
            return;
        }
        // The supplementary matrix is uniform scale plus translation; pin the
        // scale so repeated zooms land exactly on `target`.
        let mut coeffs = (scale_about(target / current, focus) * self.supplementary).as_coeffs();
        coeffs[0] = target;
        coeffs[3] = target;
        self.supplementary = Affine::new(coeffs);
        self.center(true, true);
    }

    /// Zooms in by `rate` about the view center, unless already at the ceiling.
    pub fn zoom_in(&mut self, rate: f64) {
        if self.image.is_none() || rate <= 0.0 || self.scale() >= self.max_zoom() {
            return;
        }
        self.supplementary = scale_about(rate, self.view_center()) * self.supplementary;
    }

    /// Zooms out by `rate` about the view center, never below `1.0`.
    pub fn zoom_out(&mut self, rate: f64) {
        if self.image.is_none() || rate <= 0.0 {
            return;
        }
        let candidate = scale_about(1.0 / rate, self.view_center()) * self.supplementary;
        self.supplementary = if candidate.as_coeffs()[0] < 1.0 {
            Affine::IDENTITY
        } else {
            candidate
        };
        self.center(true, true);
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ZoomTransformDebugInfo {
        ZoomTransformDebugInfo {
            view_size: self.view_size,
            bounds_rect: self.bounds_rect(),
            image: self.image,
            mapped_image_rect: self.mapped_image_rect(),
            scale: self.scale(),
            translation: self.translation(),
            max_zoom: self.max_zoom(),
            zoomable: self.zoomable,
        }
    }

    fn post_translate(&mut self, delta: Vec2) {
        if delta != Vec2::ZERO {
            self.supplementary = Affine::translate(delta) * self.supplementary;
        }
    }

    fn refit(&mut self) {
        if let Some(frame) = &self.image {
            self.base = self.bounds.base_transform(self.view_size, frame);
            self.center(true, true);
        }
    }
}

/// Debug snapshot of a [`ZoomTransform`] state.
#[derive(Clone, Copy, Debug)]
pub struct ZoomTransformDebugInfo {
    /// Current view size.
    pub view_size: Size,
    /// Rectangle the image is clamped against.
    pub bounds_rect: Rect,
    /// Current image frame, if any.
    pub image: Option<ImageFrame>,
    /// Displayed image rectangle in view coordinates.
    pub mapped_image_rect: Rect,
    /// User zoom factor relative to the base fit.
    pub scale: f64,
    /// User pan offset.
    pub translation: Vec2,
    /// Current zoom ceiling.
    pub max_zoom: f64,
    /// Whether zooming is enabled.
    pub zoomable: bool,
}
