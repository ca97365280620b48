// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::{BlendMode, Color, Compose};
use tiny_skia as sk;

use crate::canvas::MaskCanvas;
use crate::shape::HoleShape;

/// CPU [`MaskCanvas`] rasterizing into a premultiplied RGBA pixmap.
///
/// Every pushed layer is a full-size transparent pixmap; popping it draws it
/// onto its parent with the layer's blend mode.
pub struct PixmapCanvas {
    base: sk::Pixmap,
    layers: Vec<(sk::Pixmap, BlendMode)>,
    /// Layers that could not be allocated; their pops are ignored.
    dropped: usize,
}

impl core::fmt::Debug for PixmapCanvas {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PixmapCanvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("open_layers", &(self.layers.len() + self.dropped))
            .finish_non_exhaustive()
    }
}

impl PixmapCanvas {
    /// Creates a transparent canvas, or `None` for an empty or oversized size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            base: sk::Pixmap::new(width, height)?,
            layers: Vec::new(),
            dropped: 0,
        })
    }

    /// Canvas width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.base.width()
    }

    /// Canvas height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.base.height()
    }

    /// The composited result; layers still open are not included.
    #[must_use]
    pub fn pixmap(&self) -> &sk::Pixmap {
        &self.base
    }

    /// Consumes the canvas, returning the composited result.
    #[must_use]
    pub fn into_pixmap(self) -> sk::Pixmap {
        self.base
    }

    /// Premultiplied RGBA of the composited result at `(x, y)`.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let p = self.base.pixel(x, y)?;
        Some([p.red(), p.green(), p.blue(), p.alpha()])
    }

    fn target(&mut self) -> &mut sk::Pixmap {
        match self.layers.last_mut() {
            Some((layer, _)) => layer,
            None => &mut self.base,
        }
    }
}

impl MaskCanvas for PixmapCanvas {
    fn push_layer(&mut self, blend: BlendMode) {
        match sk::Pixmap::new(self.width(), self.height()) {
            Some(layer) => self.layers.push((layer, blend)),
            None => self.dropped += 1,
        }
    }

    fn pop_layer(&mut self) {
        if self.dropped > 0 {
            self.dropped -= 1;
            return;
        }
        let Some((layer, blend)) = self.layers.pop() else {
            return;
        };
        let paint = sk::PixmapPaint {
            blend_mode: map_blend_mode(&blend),
            ..sk::PixmapPaint::default()
        };
        self.target()
            .draw_pixmap(0, 0, layer.as_ref(), &paint, sk::Transform::identity(), None);
    }

    fn fill_all(&mut self, color: Color) {
        let target = self.target();
        let Some(rect) = sk::Rect::from_xywh(0.0, 0.0, target.width() as f32, target.height() as f32)
        else {
            return;
        };
        target.fill_rect(rect, &solid_paint(color), sk::Transform::identity(), None);
    }

    fn fill(&mut self, shape: &HoleShape, color: Color) {
        let Some(path) = shape_path(shape) else {
            return;
        };
        self.target().fill_path(
            &path,
            &solid_paint(color),
            sk::FillRule::Winding,
            sk::Transform::identity(),
            None,
        );
    }

    fn stroke(&mut self, shape: &HoleShape, width: f64, color: Color) {
        if width <= 0.0 {
            return;
        }
        let Some(path) = shape_path(shape) else {
            return;
        };
        let stroke = sk::Stroke {
            width: to_f32(width),
            ..sk::Stroke::default()
        };
        self.target().stroke_path(
            &path,
            &solid_paint(color),
            &stroke,
            sk::Transform::identity(),
            None,
        );
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "overlay coordinates are well within f32 range"
)]
fn to_f32(v: f64) -> f32 {
    v as f32
}

fn solid_paint(color: Color) -> sk::Paint<'static> {
    let rgba = color.to_rgba8();
    let mut paint = sk::Paint::default();
    paint.set_color_rgba8(rgba.r, rgba.g, rgba.b, rgba.a);
    paint.anti_alias = true;
    paint
}

fn shape_path(shape: &HoleShape) -> Option<sk::Path> {
    if shape.is_empty() {
        return None;
    }
    match *shape {
        HoleShape::Circle { center, radius } => {
            sk::PathBuilder::from_circle(to_f32(center.x), to_f32(center.y), to_f32(radius))
        }
        HoleShape::Rect(rect) => sk::Rect::from_ltrb(
            to_f32(rect.x0),
            to_f32(rect.y0),
            to_f32(rect.x1),
            to_f32(rect.y1),
        )
        .map(sk::PathBuilder::from_rect),
    }
}

/// Mask layers only ever composite; the separable mix is ignored.
fn map_blend_mode(mode: &BlendMode) -> sk::BlendMode {
    match mode.compose {
        Compose::DestOut => sk::BlendMode::DestinationOut,
        _ => sk::BlendMode::SourceOver,
    }
}
