// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::{BlendMode, Color};

use crate::shape::HoleShape;

/// Minimal layered drawing surface used to paint overlays.
///
/// Layers are the only compositing mechanism: draws inside a layer use normal
/// (`SrcOver`) compositing within that layer, and the blend mode passed to
/// [`MaskCanvas::push_layer`] controls how the whole layer is composited into
/// its parent when it is popped. Layers must be well nested.
pub trait MaskCanvas {
    /// Push a new, transparent layer composited with `blend` on pop.
    fn push_layer(&mut self, blend: BlendMode);

    /// Pop the most recently pushed layer, compositing it into its parent.
    fn pop_layer(&mut self);

    /// Fill the whole current layer with `color`.
    fn fill_all(&mut self, color: Color);

    /// Fill `shape` with `color`.
    fn fill(&mut self, shape: &HoleShape, color: Color);

    /// Stroke the outline of `shape`, centered on the outline.
    fn stroke(&mut self, shape: &HoleShape, width: f64, color: Color);
}

/// Convenience helpers for [`MaskCanvas`] implementations and callers.
///
/// This is separate from [`MaskCanvas`] so that methods can accept closures
/// without complicating trait object usage (`&mut dyn MaskCanvas`).
pub trait MaskCanvasExt: MaskCanvas {
    /// Run `f` inside a pushed layer, popping it afterwards.
    ///
    /// Note: if `f` panics, the layer will not be popped.
    #[inline]
    fn with_layer<R>(&mut self, blend: BlendMode, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push_layer(blend);
        let out = f(self);
        self.pop_layer();
        out
    }
}

impl<T: MaskCanvas + ?Sized> MaskCanvasExt for T {}

/// One canvas operation, as captured by [`crate::RecordingCanvas`].
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasOp {
    /// See [`MaskCanvas::push_layer`].
    PushLayer {
        /// Blend used when the layer is popped.
        blend: BlendMode,
    },
    /// See [`MaskCanvas::pop_layer`].
    PopLayer,
    /// See [`MaskCanvas::fill_all`].
    FillAll {
        /// Fill color.
        color: Color,
    },
    /// See [`MaskCanvas::fill`].
    Fill {
        /// Filled shape.
        shape: HoleShape,
        /// Fill color.
        color: Color,
    },
    /// See [`MaskCanvas::stroke`].
    Stroke {
        /// Stroked shape.
        shape: HoleShape,
        /// Stroke width.
        width: f64,
        /// Stroke color.
        color: Color,
    },
}

impl CanvasOp {
    /// Replays this operation onto `canvas`.
    pub fn apply(&self, canvas: &mut (impl MaskCanvas + ?Sized)) {
        match self {
            Self::PushLayer { blend } => canvas.push_layer(*blend),
            Self::PopLayer => canvas.pop_layer(),
            Self::FillAll { color } => canvas.fill_all(*color),
            Self::Fill { shape, color } => canvas.fill(shape, *color),
            Self::Stroke {
                shape,
                width,
                color,
            } => canvas.stroke(shape, *width, *color),
        }
    }
}
