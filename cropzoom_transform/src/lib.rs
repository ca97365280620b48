// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cropzoom Transform: the affine model behind a pan/zoom image view.
//!
//! This crate provides a small, headless model of an image displayed inside a
//! view, where the view extents are expressed in device pixels. It focuses on:
//! - Fitting an (optionally rotated) image into the view: the **base** transform.
//! - Tracking user zoom and pan on top of that: the **supplementary** transform.
//! - Centering and edge clamping, with a report of which edges are flush.
//! - Mapping rectangles between view space and source-image space.
//!
//! The transform used for rendering is always `supplementary * base`: the base
//! transform is applied first and maps raw bitmap pixels into view space; the
//! supplementary transform is then applied in view space.
//!
//! It does **not** own any bitmap, gesture recognizer, or animation driver.
//! Callers are expected to:
//! - Describe the current image with an [`ImageFrame`] (pixel size + [`Rotation`]).
//! - Feed layout sizes through [`ZoomTransform::set_view_size`].
//! - Translate gestures into [`ZoomTransform::zoom_to`] / [`ZoomTransform::pan`]
//!   calls at a higher layer.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use cropzoom_transform::{Edges, FullView, ImageFrame, Rotation, ZoomTransform};
//!
//! let mut zoom = ZoomTransform::new(FullView);
//! zoom.set_view_size(Size::new(1000.0, 1000.0));
//! zoom.set_image(Some(ImageFrame::new(2000, 1000, Rotation::Deg0)), true);
//!
//! // The wide image is fitted to the view width and centered vertically.
//! let shown = zoom.mapped_image_rect();
//! assert_eq!(shown.width(), 1000.0);
//! assert_eq!(shown.y0, 250.0);
//!
//! // Zoom in about the view center, then drag: the image never leaves the view.
//! zoom.zoom_to(2.0, Point::new(500.0, 500.0));
//! let edges = zoom.pan(Vec2::new(10_000.0, 0.0));
//! assert!(edges.contains(Edges::LEFT));
//! ```
//!
//! ## Viewport bounds
//!
//! Fitting, clamping and the zoom ceiling are delegated to a
//! [`ViewportBounds`] implementation. [`FullView`] uses the whole view;
//! [`CropRegion`] uses a crop rectangle inside the view, which is what a crop
//! editor wants: the image always covers the crop hole.
//!
//! This crate is `no_std`.

#![no_std]

mod bounds;
mod edges;
mod rotation;
mod zoom;

pub use bounds::{CropRegion, FullView, MAX_ZOOM_FACTOR, MIN_CROP_PIXELS, ViewportBounds};
pub use edges::Edges;
pub use rotation::{ImageFrame, Rotation};
pub use zoom::{ZoomTransform, ZoomTransformDebugInfo, scale_about};
