// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::borrow::Borrow;
use core::fmt;

use cropzoom_bitmap::{ExportFormat, PixelRect};
use cropzoom_overlay::{ClipOverlay, ClipType, MaskCanvas};
use cropzoom_transform::CropRegion;
use image::DynamicImage;
use kurbo::{Rect, Size};

use crate::bitmap::Bitmap;
use crate::config::ZoomViewConfig;
use crate::crop::CropImageView;
use crate::error::CropError;

/// A crop editor: a [`CropImageView`] under a [`ClipOverlay`].
///
/// The overlay decides where the crop hole is; every layout or overlay change
/// feeds the hole back to the view as its crop rectangle.
pub struct CropClipView<B> {
    view: CropImageView<B>,
    overlay: ClipOverlay,
}

impl<B> fmt::Debug for CropClipView<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CropClipView")
            .field("view", &self.view)
            .field("overlay", &self.overlay)
            .finish()
    }
}

impl<B: Bitmap> Default for CropClipView<B> {
    fn default() -> Self {
        Self::new(ClipType::default())
    }
}

impl<B: Bitmap> CropClipView<B> {
    /// Creates an unsized editor with a crop hole of the given shape.
    pub fn new(clip_type: ClipType) -> Self {
        Self::with_config(clip_type, ZoomViewConfig::default())
    }

    /// Creates an unsized editor with a custom view configuration.
    pub fn with_config(clip_type: ClipType, config: ZoomViewConfig) -> Self {
        Self {
            view: CropImageView::with_config(CropRegion::default(), config),
            overlay: ClipOverlay::new(clip_type),
        }
    }

    /// The crop view.
    pub fn view(&self) -> &CropImageView<B> {
        &self.view
    }

    /// The crop view, for images, input and frames.
    pub fn view_mut(&mut self) -> &mut CropImageView<B> {
        &mut self.view
    }

    /// The overlay.
    pub fn overlay(&self) -> &ClipOverlay {
        &self.overlay
    }

    /// Changes the overlay, then moves the crop rectangle to its new hole.
    pub fn update_overlay(&mut self, f: impl FnOnce(&mut ClipOverlay)) {
        f(&mut self.overlay);
        self.sync_crop_rect();
    }

    /// Sizes the overlay and the view.
    pub fn layout(&mut self, size: Size) {
        self.overlay.set_size(size);
        self.sync_crop_rect();
        self.view.layout(size);
    }

    /// Paints the overlay; the host draws the image underneath first.
    pub fn paint(&self, canvas: &mut (impl MaskCanvas + ?Sized)) {
        self.overlay.paint(canvas);
    }

    /// The crop rectangle in view coordinates.
    pub fn crop_rect_view(&self) -> Rect {
        self.view.crop_rect()
    }

    /// The crop rectangle in raw bitmap pixels.
    ///
    /// A circular hole yields a square region.
    pub fn crop_rect_image(&self) -> Option<PixelRect> {
        self.view
            .image_crop_rect(self.overlay.clip_type() == ClipType::Circle)
    }

    fn sync_crop_rect(&mut self) {
        let size = self.overlay.size();
        if size.is_zero_area() {
            return;
        }
        self.view.set_crop_rect(self.overlay.clip_rect());
    }
}

impl<B: Bitmap + Borrow<DynamicImage>> CropClipView<B> {
    /// Crops the source bitmap to the hole, turned to the displayed
    /// orientation.
    pub fn cropped_image(&self) -> Result<DynamicImage, CropError> {
        if !self.view.transform().is_laid_out() {
            return Err(CropError::NotLaidOut);
        }
        let (Some(source), Some(region)) = (self.view.rotated_bitmap(), self.crop_rect_image())
        else {
            return Err(CropError::NoImage);
        };
        let raw: &DynamicImage = Borrow::borrow(source.bitmap());
        let cropped = cropzoom_bitmap::crop(raw, region)?;
        let degrees = i32::from(source.rotation().degrees());
        Ok(cropzoom_bitmap::rotate(&cropped, degrees))
    }

    /// Encodes [`Self::cropped_image`].
    pub fn export(&self, format: ExportFormat) -> Result<Vec<u8>, CropError> {
        let cropped = self.cropped_image()?;
        let bytes = cropzoom_bitmap::encode(&cropped, format)?;
        log::debug!(
            "exported {}x{} crop as {} bytes",
            cropped.width(),
            cropped.height(),
            bytes.len()
        );
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use cropzoom_bitmap::PixelRect;
    use cropzoom_overlay::{ClipType, RecordingCanvas};
    use cropzoom_transform::Rotation;
    use image::DynamicImage;
    use kurbo::{Rect, Size};

    use super::CropClipView;
    use crate::error::CropError;

    #[test]
    fn layout_moves_crop_rect_to_hole() {
        let mut editor: CropClipView<DynamicImage> = CropClipView::new(ClipType::Circle);
        editor.update_overlay(|o| o.set_horizontal_padding(20.0));
        editor.layout(Size::new(400.0, 600.0));
        assert_eq!(editor.crop_rect_view(), Rect::new(20.0, 120.0, 380.0, 480.0));
        assert_eq!(editor.crop_rect_view(), editor.overlay().clip_rect());
    }

    #[test]
    fn overlay_change_after_layout_resyncs() {
        let mut editor: CropClipView<DynamicImage> = CropClipView::new(ClipType::Rectangle);
        editor.layout(Size::new(400.0, 600.0));
        editor.view_mut().set_image(DynamicImage::new_rgb8(800, 800), Rotation::Deg0);
        editor.update_overlay(|o| o.set_horizontal_padding(100.0));
        assert_eq!(editor.crop_rect_view(), Rect::new(100.0, 200.0, 300.0, 400.0));
        let shown = editor.view().mapped_image_rect();
        assert_eq!(shown, Rect::new(100.0, 200.0, 300.0, 400.0));
    }

    #[test]
    fn circle_crop_is_square() {
        let mut editor = CropClipView::new(ClipType::Circle);
        editor.layout(Size::new(400.0, 600.0));
        editor.view_mut().set_image(DynamicImage::new_rgb8(1200, 800), Rotation::Deg0);
        assert_eq!(editor.crop_rect_image(), Some(PixelRect::new(200, 0, 1000, 800)));
    }

    #[test]
    fn export_requires_layout_and_image() {
        let mut editor: CropClipView<DynamicImage> = CropClipView::default();
        editor.view_mut().set_image(DynamicImage::new_rgb8(10, 10), Rotation::Deg0);
        assert!(matches!(editor.cropped_image(), Err(CropError::NotLaidOut)));
        editor.view_mut().clear();
        editor.layout(Size::new(100.0, 100.0));
        assert!(matches!(editor.cropped_image(), Err(CropError::NoImage)));
    }

    #[test]
    fn paint_draws_balanced_layers() {
        let mut editor: CropClipView<DynamicImage> = CropClipView::default();
        editor.layout(Size::new(100.0, 100.0));
        let mut canvas = RecordingCanvas::new();
        editor.paint(&mut canvas);
        assert!(canvas.is_balanced());
        assert!(!canvas.events().is_empty());
    }
}
