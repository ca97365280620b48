// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state helper: turn focus-point movement into scroll distances once the
//! touch slop has been exceeded.
//!
//! ## Usage
//!
//! 1) Start a drag by calling [`DragState::start`] with the initial focus.
//! 2) On each move, call [`DragState::update`]; it returns a scroll distance
//!    (`last - current`) once the pointer has travelled beyond the slop.
//! 3) When the set of pointers changes, call [`DragState::reanchor`] so that
//!    the focus jump is not reported as movement.
//! 4) End the drag with [`DragState::end`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use cropzoom_gesture::drag::DragState;
//!
//! let mut drag = DragState::new(8.0);
//! drag.start(Point::new(10.0, 20.0));
//!
//! // Inside the slop: nothing yet.
//! assert_eq!(drag.update(Point::new(13.0, 20.0)), None);
//!
//! // Beyond the slop: the first distance spans from the press point.
//! let distance = drag.update(Point::new(30.0, 20.0)).unwrap();
//! assert_eq!(distance.x, -20.0);
//! assert!(drag.is_scrolling());
//! ```

use kurbo::{Point, Vec2};

/// Tracks a single drag and its slop crossing.
#[derive(Debug, Clone, Default, Copy)]
pub struct DragState {
    /// Focus position when the drag started
    pub start_pos: Option<Point>,
    /// Last focus position reported as scroll (or the anchor before that)
    pub last_pos: Option<Point>,
    slop: f64,
    scrolling: bool,
}

impl DragState {
    /// Creates an idle drag tracker with the given touch slop.
    #[must_use]
    pub fn new(slop: f64) -> Self {
        Self {
            slop: slop.max(0.0),
            ..Self::default()
        }
    }

    /// Start tracking a new drag from the given focus position.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.scrolling = false;
    }

    /// Move the anchor without reporting movement, keeping the scroll state.
    pub fn reanchor(&mut self, pos: Point) {
        if self.start_pos.is_some() {
            self.start_pos = Some(pos);
            self.last_pos = Some(pos);
        }
    }

    /// Update with a new focus position, returning the scroll distance
    /// `last - current` once the slop has been exceeded.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        let start = self.start_pos?;
        let last = self.last_pos.unwrap_or(start);
        if !self.scrolling {
            if (pos - start).hypot() <= self.slop {
                return None;
            }
            self.scrolling = true;
        }
        self.last_pos = Some(pos);
        Some(last - pos)
    }

    /// End the current drag and reset state.
    pub fn end(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
        self.scrolling = false;
    }

    /// Returns `true` while a drag is being tracked.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }

    /// Returns `true` once the slop has been exceeded in the current drag.
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }
}
