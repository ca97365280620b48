// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use cropzoom_gesture::{GestureEvent, GestureRecognizer, PointerEvent, PointerKind};
use cropzoom_transform::{Edges, FullView, Rotation, ViewportBounds, ZoomTransform};
use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::animation::{Animation, CenterAnimation, FlingAnimation, ZoomAnimation};
use crate::bitmap::{Bitmap, RotatedBitmap};
use crate::config::ZoomViewConfig;

/// What the host should do after a pointer event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TouchResponse {
    /// `Some(true)` asks the parent not to intercept the rest of the gesture;
    /// `Some(false)` hands the gesture back to a paging parent.
    pub disallow_parent_intercept: Option<bool>,
    /// An animation is running and [`ZoomImageView::on_frame`] should be called.
    pub needs_frame: bool,
}

/// Image change waiting for the first layout.
struct PendingImage<B> {
    image: Option<RotatedBitmap<B>>,
    reset: bool,
}

/// Scale and focus captured when a pinch begins.
#[derive(Clone, Copy, Debug)]
struct PinchAnchor {
    scale: f64,
    focus: Point,
}

/// Touch-driven pan/zoom view over a bitmap.
///
/// The view is headless: the host feeds it layout sizes ([`Self::layout`]),
/// pointer events ([`Self::on_pointer`]) and frame ticks ([`Self::on_frame`]),
/// and draws [`Self::display_bitmap`] with [`Self::display_transform`].
///
/// `V` selects the viewport policy: [`FullView`] for a plain zoom view,
/// [`CropRegion`](cropzoom_transform::CropRegion) for a crop editor (see
/// [`CropImageView`](crate::CropImageView)).
pub struct ZoomImageView<B, V = FullView> {
    transform: ZoomTransform<V>,
    image: Option<RotatedBitmap<B>>,
    pending: Option<PendingImage<B>>,
    config: ZoomViewConfig,
    recognizer: GestureRecognizer,
    animation: Option<Animation>,
    pinch: Option<PinchAnchor>,
    in_pager: bool,
    on_click: Option<Box<dyn FnMut()>>,
    recycler: Option<Box<dyn FnMut(B)>>,
}

impl<B, V: fmt::Debug> fmt::Debug for ZoomImageView<B, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoomImageView")
            .field("transform", &self.transform)
            .field("has_image", &self.image.is_some())
            .field("has_pending", &self.pending.is_some())
            .field("config", &self.config)
            .field("recognizer", &self.recognizer)
            .field("animation", &self.animation)
            .field("pinch", &self.pinch)
            .field("in_pager", &self.in_pager)
            .finish_non_exhaustive()
    }
}

impl<B: Bitmap, V: ViewportBounds + Default> Default for ZoomImageView<B, V> {
    fn default() -> Self {
        Self::new(V::default())
    }
}

impl<B: Bitmap, V: ViewportBounds> ZoomImageView<B, V> {
    /// Creates an empty, unsized view with the default configuration.
    pub fn new(bounds: V) -> Self {
        Self::with_config(bounds, ZoomViewConfig::default())
    }

    /// Creates an empty, unsized view.
    pub fn with_config(bounds: V, config: ZoomViewConfig) -> Self {
        Self {
            transform: ZoomTransform::new(bounds),
            image: None,
            pending: None,
            recognizer: GestureRecognizer::new(config.gesture),
            config,
            animation: None,
            pinch: None,
            in_pager: false,
            on_click: None,
            recycler: None,
        }
    }

    /// The view configuration.
    pub fn config(&self) -> &ZoomViewConfig {
        &self.config
    }

    /// The pan/zoom model.
    pub fn transform(&self) -> &ZoomTransform<V> {
        &self.transform
    }

    pub(crate) fn transform_mut(&mut self) -> &mut ZoomTransform<V> {
        &mut self.transform
    }

    // --- images ---

    /// Shows `bitmap` at `rotation`, discarding any user zoom and pan.
    ///
    /// Before the first layout the change is deferred; only the latest
    /// deferred change is kept.
    pub fn set_image(&mut self, bitmap: B, rotation: Rotation) {
        self.replace_image(Some(RotatedBitmap::new(bitmap, rotation)), true);
    }

    /// Shows `bitmap` at `rotation`, keeping the current user zoom and pan.
    pub fn set_image_keep_zoom(&mut self, bitmap: B, rotation: Rotation) {
        self.replace_image(Some(RotatedBitmap::new(bitmap, rotation)), false);
    }

    /// Removes the image; the old bitmap goes to the recycler.
    pub fn clear(&mut self) {
        self.replace_image(None, true);
    }

    /// Discards user zoom and pan, refitting the current image.
    pub fn reset(&mut self) {
        self.cancel_animation();
        let frame = self.image.as_ref().map(RotatedBitmap::frame);
        self.transform.set_image(frame, true);
        self.transform.center(true, true);
    }

    /// The displayed bitmap.
    pub fn display_bitmap(&self) -> Option<&B> {
        self.image.as_ref().map(RotatedBitmap::bitmap)
    }

    /// The displayed bitmap with its rotation.
    pub fn rotated_bitmap(&self) -> Option<&RotatedBitmap<B>> {
        self.image.as_ref()
    }

    /// Returns `true` while an image change waits for the first layout.
    pub fn has_pending_image(&self) -> bool {
        self.pending.is_some()
    }

    /// Sets the callback receiving bitmaps the view no longer displays.
    pub fn set_recycler(&mut self, recycler: impl FnMut(B) + 'static) {
        self.recycler = Some(Box::new(recycler));
    }

    fn replace_image(&mut self, image: Option<RotatedBitmap<B>>, reset: bool) {
        if !self.transform.is_laid_out() {
            log::debug!("deferring image change until layout");
            let replaced = self.pending.replace(PendingImage { image, reset });
            if let Some(old) = replaced.and_then(|p| p.image) {
                self.recycle(old.into_bitmap());
            }
            return;
        }
        self.cancel_animation();
        if let Some(image) = &image {
            log::debug!(
                "showing {}x{} bitmap at {}°",
                image.bitmap().width(),
                image.bitmap().height(),
                image.rotation().degrees()
            );
        }
        self.transform
            .set_image(image.as_ref().map(RotatedBitmap::frame), reset);
        self.transform.center(true, true);
        if let Some(old) = core::mem::replace(&mut self.image, image) {
            self.recycle(old.into_bitmap());
        }
    }

    fn recycle(&mut self, bitmap: B) {
        if let Some(recycle) = &mut self.recycler {
            recycle(bitmap);
        }
    }

    // --- layout ---

    /// Applies the view size, replaying a deferred image change.
    pub fn layout(&mut self, size: Size) {
        self.transform.set_view_size(size);
        if self.transform.is_laid_out()
            && let Some(pending) = self.pending.take()
        {
            log::debug!("replaying deferred image change");
            self.replace_image(pending.image, pending.reset);
        }
    }

    /// Current view size.
    pub fn size(&self) -> Size {
        self.transform.view_size()
    }

    // --- state ---

    /// User zoom relative to the fitted image.
    pub fn scale(&self) -> f64 {
        self.transform.scale()
    }

    /// Largest scale gestures settle on.
    pub fn max_zoom(&self) -> f64 {
        self.transform.max_zoom()
    }

    /// Overrides the zoom ceiling; `None` restores the default.
    pub fn set_max_zoom(&mut self, max_zoom: Option<f64>) {
        self.transform.set_max_zoom(max_zoom);
    }

    /// Enables or disables zooming.
    pub fn set_zoomable(&mut self, zoomable: bool) {
        self.transform.set_zoomable(zoomable);
    }

    /// Returns `true` when zooming is enabled.
    pub fn is_zoomable(&self) -> bool {
        self.transform.is_zoomable()
    }

    /// Marks the view as hosted in a horizontally paging parent.
    pub fn set_in_pager(&mut self, in_pager: bool) {
        self.in_pager = in_pager;
    }

    /// Returns `true` when hosted in a horizontally paging parent.
    pub fn in_pager(&self) -> bool {
        self.in_pager
    }

    /// Sets the callback run on a confirmed single tap.
    pub fn set_on_click(&mut self, on_click: impl FnMut() + 'static) {
        self.on_click = Some(Box::new(on_click));
    }

    /// Transform from raw bitmap pixels to view coordinates.
    pub fn display_transform(&self) -> Affine {
        self.transform.display_transform()
    }

    /// Displayed image rectangle in view coordinates.
    pub fn mapped_image_rect(&self) -> Rect {
        self.transform.mapped_image_rect()
    }

    /// The running animation, if any.
    pub fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    /// Returns `true` while an animation needs frames.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    // --- direct manipulation ---

    /// Zooms to `target` about `focus` immediately.
    pub fn zoom_to(&mut self, target: f64, focus: Point) {
        self.transform.zoom_to(target, focus);
    }

    /// Animates the zoom to `target` about `focus` over `duration_ms`.
    pub fn zoom_to_animated(&mut self, target: f64, focus: Point, duration_ms: u64, now_ms: u64) {
        if !self.transform.is_ready() || !self.transform.is_zoomable() {
            return;
        }
        let from = self.scale();
        log::debug!("animating zoom {from} -> {target} over {duration_ms} ms");
        self.start_animation(Animation::Zoom(ZoomAnimation::new(
            from,
            target,
            focus,
            now_ms,
            duration_ms,
        )));
    }

    /// Animates the centering correction over `duration_ms`.
    pub fn center_animated(&mut self, horizontal: bool, vertical: bool, duration_ms: u64, now_ms: u64) {
        if !self.transform.is_ready() {
            return;
        }
        let (delta, _) = self.transform.center_offset(horizontal, vertical);
        if delta == Vec2::ZERO {
            return;
        }
        self.start_animation(Animation::Center(CenterAnimation::new(
            delta,
            now_ms,
            duration_ms,
        )));
    }

    /// Centers or clamps the image immediately.
    pub fn center(&mut self, horizontal: bool, vertical: bool) -> Edges {
        self.transform.center(horizontal, vertical)
    }

    /// Pans by `delta`, clamped to the viewport; returns the flush edges.
    pub fn pan(&mut self, delta: Vec2) -> Edges {
        self.transform.pan(delta)
    }

    /// Pans by `delta` without clamping.
    pub fn pan_unclamped(&mut self, delta: Vec2) {
        self.transform.pan_unclamped(delta);
    }

    /// Zooms in one step about the view center.
    pub fn zoom_in(&mut self) {
        self.transform.zoom_in(self.config.zoom_rate);
    }

    /// Zooms out one step about the view center.
    pub fn zoom_out(&mut self) {
        self.transform.zoom_out(self.config.zoom_rate);
    }

    // --- input ---

    /// Feeds one pointer event.
    pub fn on_pointer(&mut self, event: &PointerEvent) -> TouchResponse {
        let mut response = TouchResponse::default();
        if event.kind == PointerKind::Down
            && matches!(self.animation, Some(Animation::Fling(_)))
        {
            self.cancel_animation();
        }
        let events = self.recognizer.on_pointer(event);
        if event.kind == PointerKind::Down {
            let in_zoom = self.recognizer.pointer_count() >= 2 || self.scale() != 1.0;
            response.disallow_parent_intercept = Some(in_zoom);
        }
        for gesture in events {
            self.handle_gesture(gesture, event.time_ms, &mut response);
        }
        response.needs_frame = self.animation.is_some();
        response
    }

    /// Next time a pending tap confirmation falls due.
    pub fn next_deadline(&self) -> Option<u64> {
        self.recognizer.next_deadline()
    }

    /// Delivers due tap confirmations and advances the running animation.
    ///
    /// Returns `true` while more frames are needed.
    pub fn on_frame(&mut self, now_ms: u64) -> bool {
        if let Some(gesture) = self.recognizer.poll(now_ms) {
            let mut response = TouchResponse::default();
            self.handle_gesture(gesture, now_ms, &mut response);
        }
        let Some(animation) = &mut self.animation else {
            return false;
        };
        if animation.step(&mut self.transform, now_ms) {
            return true;
        }
        log::debug!("{} animation finished", animation.name());
        self.animation = None;
        false
    }

    fn handle_gesture(&mut self, gesture: GestureEvent, now_ms: u64, response: &mut TouchResponse) {
        match gesture {
            GestureEvent::ScaleBegin { focus } => {
                // The pinch takes over; its end settles the scale again.
                self.cancel_animation();
                self.pinch = Some(PinchAnchor {
                    scale: self.scale(),
                    focus,
                });
            }
            GestureEvent::Scale { factor, .. } => {
                if let Some(anchor) = self.pinch {
                    self.transform.zoom_to(anchor.scale * factor, anchor.focus);
                }
            }
            GestureEvent::ScaleEnd => {
                let Some(anchor) = self.pinch.take() else {
                    return;
                };
                let scale = self.scale();
                let max = self.max_zoom();
                let duration = self.config.animation_ms;
                if scale < 1.0 {
                    self.zoom_to_animated(1.0, anchor.focus, duration, now_ms);
                } else if scale >= max {
                    self.zoom_to_animated(max, anchor.focus, duration, now_ms);
                }
            }
            GestureEvent::SingleTapConfirmed { .. } => {
                if let Some(on_click) = &mut self.on_click {
                    on_click();
                }
            }
            GestureEvent::DoubleTap { .. } => {
                let target = if self.scale() > 1.0 {
                    1.0
                } else {
                    self.config.double_tap_zoom.min(self.max_zoom())
                };
                let center = self.transform.view_center();
                self.zoom_to_animated(target, center, self.config.animation_ms, now_ms);
            }
            GestureEvent::Scroll { distance } => {
                let edges = self.transform.pan(-distance);
                if self.in_pager && edges.yields_horizontal_drag(distance.x) {
                    log::debug!("handing horizontal drag to the paging parent");
                    response.disallow_parent_intercept = Some(false);
                }
            }
            GestureEvent::Fling { velocity } => {
                if !self.transform.is_ready() {
                    return;
                }
                // A zoom still settling lands first so the fling cannot strand it.
                if let Some(Animation::Zoom(zoom)) = &self.animation {
                    self.transform.zoom_to(zoom.target(), zoom.focus());
                }
                let overflow = self.transform.overflow();
                self.start_animation(Animation::Fling(FlingAnimation::new(
                    &self.config.gesture,
                    velocity,
                    overflow,
                    now_ms,
                )));
            }
        }
    }

    fn start_animation(&mut self, animation: Animation) {
        self.cancel_animation();
        log::debug!("starting {} animation", animation.name());
        self.animation = Some(animation);
    }

    /// Stops the running animation where it is.
    pub fn cancel_animation(&mut self) {
        if let Some(animation) = self.animation.take() {
            log::debug!("cancelled {} animation", animation.name());
        }
    }
}
