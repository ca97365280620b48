// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};
use peniko::{BlendMode, Color, Compose, Mix};

use crate::canvas::{MaskCanvas, MaskCanvasExt};
use crate::shape::HoleShape;

/// Default border width in pixels.
pub const DEFAULT_BORDER_WIDTH: f64 = 4.0;

/// Default dimming color outside the hole: black at half opacity.
pub const DEFAULT_MASK_COLOR: Color = Color::from_rgba8(0, 0, 0, 0x80);

/// Shape family of the crop hole.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClipType {
    /// A centered circle.
    #[default]
    Circle,
    /// A centered rectangle spanning the padded width.
    Rectangle,
}

/// Dimming overlay with a transparent crop hole.
///
/// The overlay is laid out by the host with [`ClipOverlay::set_size`]; its
/// [`ClipOverlay::clip_rect`] is the rectangle a crop view clamps against.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipOverlay {
    size: Size,
    clip_type: ClipType,
    horizontal_padding: f64,
    border_width: f64,
    border_color: Color,
    mask_color: Color,
    clip_height: Option<f64>,
}

impl Default for ClipOverlay {
    fn default() -> Self {
        Self::new(ClipType::default())
    }
}

impl ClipOverlay {
    /// Creates an unsized overlay with the default styling.
    #[must_use]
    pub fn new(clip_type: ClipType) -> Self {
        Self {
            size: Size::ZERO,
            clip_type,
            horizontal_padding: 0.0,
            border_width: DEFAULT_BORDER_WIDTH,
            border_color: Color::WHITE,
            mask_color: DEFAULT_MASK_COLOR,
            clip_height: None,
        }
    }

    /// Overlay size in pixels.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Sets the overlay size.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Hole shape family.
    #[must_use]
    pub fn clip_type(&self) -> ClipType {
        self.clip_type
    }

    /// Sets the hole shape family.
    pub fn set_clip_type(&mut self, clip_type: ClipType) {
        self.clip_type = clip_type;
    }

    /// Gap between the hole and the left/right overlay edges.
    #[must_use]
    pub fn horizontal_padding(&self) -> f64 {
        self.horizontal_padding
    }

    /// Sets the gap between the hole and the left/right overlay edges.
    pub fn set_horizontal_padding(&mut self, padding: f64) {
        self.horizontal_padding = padding.max(0.0);
    }

    /// Border stroke width; zero disables the border.
    #[must_use]
    pub fn border_width(&self) -> f64 {
        self.border_width
    }

    /// Sets the border stroke width.
    pub fn set_border_width(&mut self, width: f64) {
        self.border_width = width.max(0.0);
    }

    /// Border color.
    #[must_use]
    pub fn border_color(&self) -> Color {
        self.border_color
    }

    /// Sets the border color.
    pub fn set_border_color(&mut self, color: Color) {
        self.border_color = color;
    }

    /// Dimming color outside the hole.
    #[must_use]
    pub fn mask_color(&self) -> Color {
        self.mask_color
    }

    /// Sets the dimming color outside the hole.
    pub fn set_mask_color(&mut self, color: Color) {
        self.mask_color = color;
    }

    /// Explicit rectangle hole height, if set.
    #[must_use]
    pub fn clip_height(&self) -> Option<f64> {
        self.clip_height
    }

    /// Sets the rectangle hole height; `None` makes the hole square.
    pub fn set_clip_height(&mut self, height: Option<f64>) {
        self.clip_height = height.filter(|h| *h > 0.0);
    }

    /// The hole in overlay coordinates.
    ///
    /// - Circle: centered, radius `min(width / 2 - padding, height / 2)`.
    /// - Rectangle: from `padding` to `width - padding` horizontally and
    ///   [`ClipOverlay::clip_height`] (defaulting to the hole width) tall,
    ///   centered vertically.
    #[must_use]
    pub fn hole(&self) -> HoleShape {
        let Size { width, height } = self.size;
        let center = Point::new(width / 2.0, height / 2.0);
        match self.clip_type {
            ClipType::Circle => HoleShape::Circle {
                center,
                radius: (width / 2.0 - self.horizontal_padding)
                    .min(height / 2.0)
                    .max(0.0),
            },
            ClipType::Rectangle => {
                let x0 = self.horizontal_padding.min(width / 2.0);
                let x1 = (width - self.horizontal_padding).max(x0);
                let hole_height = self.clip_height.unwrap_or(x1 - x0);
                HoleShape::Rect(Rect::new(
                    x0,
                    center.y - hole_height / 2.0,
                    x1,
                    center.y + hole_height / 2.0,
                ))
            }
        }
    }

    /// Bounding rectangle of the hole in overlay coordinates.
    #[must_use]
    pub fn clip_rect(&self) -> Rect {
        self.hole().bounding_rect()
    }

    /// Paints the overlay.
    ///
    /// The mask is filled into an offscreen layer, the hole is punched out of
    /// that layer with a destination-out layer, the border is stroked just
    /// inside the hole edge, and the offscreen layer is then composited onto
    /// the parent. Nothing is painted while the overlay has no size.
    pub fn paint(&self, canvas: &mut (impl MaskCanvas + ?Sized)) {
        if self.size.is_zero_area() {
            return;
        }
        let hole = self.hole();
        canvas.with_layer(BlendMode::default(), |mask| {
            mask.fill_all(self.mask_color);
            mask.with_layer(BlendMode::new(Mix::Normal, Compose::DestOut), |punch| {
                punch.fill(&hole, Color::BLACK);
            });
            if self.border_width > 0.0 {
                mask.stroke(
                    &hole.inset(self.border_width / 2.0),
                    self.border_width,
                    self.border_color,
                );
            }
        });
    }
}
