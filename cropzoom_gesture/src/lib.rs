// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cropzoom Gesture: pointer-event state machines for pan/zoom views.
//!
//! This crate turns raw pointer transitions into the gestures a zoomable image
//! view reacts to. Each module handles one interaction pattern:
//!
//! - [`drag`]: focus movement turned into scroll distances past the touch slop
//! - [`tap`]: single taps (confirmed after the double-tap window) and double taps
//! - [`scale`]: two-finger pinch with factors relative to the starting span
//! - [`velocity`]: least-squares release velocity
//! - [`fling`]: decelerating scroll simulation with per-axis bounds
//! - [`recognizer`]: all of the above composed behind one event stream
//!
//! The crate does not assume any UI framework. Hosts feed
//! [`PointerEvent`]s with their own timestamps and poll for time-based events
//! using [`GestureRecognizer::next_deadline`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use cropzoom_gesture::{GestureEvent, GestureRecognizer, PointerEvent, PointerKind};
//!
//! let mut gestures = GestureRecognizer::default();
//! let down = PointerEvent::new(PointerKind::Down, 1, Point::new(100.0, 100.0), 0);
//! let drag = PointerEvent::new(PointerKind::Move, 1, Point::new(140.0, 100.0), 16);
//!
//! assert!(gestures.on_pointer(&down).is_empty());
//! let events = gestures.on_pointer(&drag);
//! assert_eq!(
//!     events.as_slice(),
//!     &[GestureEvent::Scroll { distance: Vec2::new(-40.0, 0.0) }],
//! );
//! ```
//!
//! Scroll distances use the content-scroll sign (`last - current`): a view
//! pans its content by the negated distance.

pub mod config;
pub mod drag;
pub mod fling;
pub mod recognizer;
pub mod scale;
pub mod tap;
pub mod velocity;

pub use config::GestureConfig;
pub use fling::{Fling, FlingPhysics};
pub use recognizer::{GestureEvent, GestureEvents, GestureRecognizer, PointerEvent, PointerKind};
