// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cropzoom: headless pan/zoom image views and a crop editor.
//!
//! This crate composes the lower layers into widgets a host UI can drive:
//! - [`ZoomImageView`]: a bitmap view with pinch zoom, double-tap zoom, drag
//!   panning, fling scrolling and edge clamping.
//! - [`CropImageView`]: the same view clamped against a crop rectangle.
//! - [`CropClipView`]: a crop view under a [`ClipOverlay`], with export of the
//!   cropped region.
//!
//! Nothing here owns a window, a clock or a surface. The host forwards layout
//! sizes, pointer events and frame timestamps, and draws
//! [`ZoomImageView::display_bitmap`] with
//! [`ZoomImageView::display_transform`]. While a view reports that it needs
//! frames, the host keeps calling [`ZoomImageView::on_frame`]; pending tap
//! confirmations fall due at [`ZoomImageView::next_deadline`].
//!
//! ## Minimal example
//!
//! ```rust
//! use cropzoom::{PointerEvent, PointerKind, Rotation, ZoomImageView};
//! use image::DynamicImage;
//! use kurbo::{Point, Size};
//!
//! let mut view: ZoomImageView<DynamicImage> = ZoomImageView::default();
//! view.layout(Size::new(1000.0, 1000.0));
//! view.set_image(DynamicImage::new_rgb8(2000, 1000), Rotation::Deg0);
//! assert_eq!(view.mapped_image_rect().y0, 250.0);
//!
//! // Double tap zooms to 2x about the view center.
//! let at = Point::new(500.0, 500.0);
//! view.on_pointer(&PointerEvent::new(PointerKind::Down, 1, at, 0));
//! view.on_pointer(&PointerEvent::new(PointerKind::Up, 1, at, 50));
//! let response = view.on_pointer(&PointerEvent::new(PointerKind::Down, 1, at, 150));
//! assert!(response.needs_frame);
//!
//! let mut now = 150;
//! while view.on_frame(now) {
//!     now += 16;
//! }
//! assert_eq!(view.scale(), 2.0);
//! ```

mod animation;
mod bitmap;
mod clip;
mod config;
mod crop;
mod error;
mod view;

pub use animation::{Animation, CenterAnimation, FlingAnimation, ZoomAnimation};
pub use bitmap::{Bitmap, RotatedBitmap};
pub use clip::CropClipView;
pub use config::ZoomViewConfig;
pub use crop::CropImageView;
pub use error::CropError;
pub use view::{TouchResponse, ZoomImageView};

pub use cropzoom_bitmap::{ExportFormat, PixelRect};
pub use cropzoom_gesture::{GestureConfig, PointerEvent, PointerKind};
pub use cropzoom_overlay::{ClipOverlay, ClipType};
pub use cropzoom_transform::{CropRegion, Edges, FullView, Rotation, ZoomTransform};
