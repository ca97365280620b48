// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cropzoom Overlay: the dimming mask with a crop hole drawn over a crop view.
//!
//! This crate provides:
//! - [`ClipOverlay`]: crop-hole geometry (circle or rectangle) and its painter.
//! - [`MaskCanvas`]: the small layered drawing interface the painter targets.
//! - [`RecordingCanvas`]: a canvas that records operations for tests and
//!   debugging.
//! - `PixmapCanvas` (feature `pixmap`, on by default): a CPU rasterizer backed
//!   by `tiny-skia`.
//!
//! Painting needs an intermediate layer: the mask is filled offscreen and the
//! hole is removed with a destination-out layer, so the image underneath the
//! overlay is never touched by the punch-out.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use cropzoom_overlay::{ClipOverlay, ClipType, RecordingCanvas};
//!
//! let mut overlay = ClipOverlay::new(ClipType::Circle);
//! overlay.set_size(Size::new(400.0, 600.0));
//! overlay.set_horizontal_padding(20.0);
//! assert_eq!(overlay.clip_rect(), Rect::new(20.0, 120.0, 380.0, 480.0));
//!
//! let mut canvas = RecordingCanvas::new();
//! overlay.paint(&mut canvas);
//! assert!(canvas.is_balanced());
//! ```

mod canvas;
mod overlay;
#[cfg(feature = "pixmap")]
mod pixmap;
mod recording;
mod shape;

pub use canvas::{CanvasOp, MaskCanvas, MaskCanvasExt};
pub use overlay::{ClipOverlay, ClipType, DEFAULT_BORDER_WIDTH, DEFAULT_MASK_COLOR};
#[cfg(feature = "pixmap")]
pub use pixmap::PixmapCanvas;
pub use recording::{Event, RecordingCanvas};
pub use shape::HoleShape;

pub use peniko::{BlendMode, Color};
