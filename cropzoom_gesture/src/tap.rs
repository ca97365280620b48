// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single and double tap recognition with a confirmation window.
//!
//! A single tap is only *confirmed* once the double-tap window has passed
//! without a second press, so callers poll [`TapState::poll`] with the current
//! time (or wait until [`TapState::next_deadline`]).
//!
//! ```
//! use kurbo::Point;
//! use cropzoom_gesture::GestureConfig;
//! use cropzoom_gesture::tap::{TapEvent, TapState};
//!
//! let mut taps = TapState::new(&GestureConfig::default());
//! let p = Point::new(50.0, 50.0);
//!
//! assert_eq!(taps.on_down(p, 0), None);
//! assert_eq!(taps.on_up(100), None);
//! assert_eq!(taps.on_down(p, 200), Some(TapEvent::DoubleTap(p)));
//! ```

use kurbo::Point;

use crate::config::GestureConfig;

/// Tap recognized by [`TapState`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TapEvent {
    /// A tap that was not followed by a second one in time.
    SingleTapConfirmed(Point),
    /// The second press of a double tap, carrying the first press position.
    DoubleTap(Point),
}

#[derive(Clone, Copy, Debug)]
struct Press {
    pos: Point,
    time_ms: u64,
}

/// Tap state machine.
#[derive(Clone, Debug)]
pub struct TapState {
    touch_slop: f64,
    double_tap_slop: f64,
    timeout_ms: u64,
    min_time_ms: u64,
    down: Option<Press>,
    /// Press whose release is waiting for the confirmation window.
    pending: Option<Press>,
    last_up_ms: Option<u64>,
    still_down: bool,
    tap_valid: bool,
    double_tapping: bool,
}

impl TapState {
    /// Creates an idle tap tracker.
    #[must_use]
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            touch_slop: config.touch_slop,
            double_tap_slop: config.double_tap_slop,
            timeout_ms: config.double_tap_timeout_ms,
            min_time_ms: config.double_tap_min_time_ms,
            down: None,
            pending: None,
            last_up_ms: None,
            still_down: false,
            tap_valid: false,
            double_tapping: false,
        }
    }

    /// Handles the first pointer going down.
    ///
    /// Returns [`TapEvent::DoubleTap`] when this press completes a double tap.
    pub fn on_down(&mut self, pos: Point, time_ms: u64) -> Option<TapEvent> {
        let first = self.pending.take();
        let is_double = match (first, self.last_up_ms) {
            (Some(first), Some(up)) => {
                let gap = time_ms.saturating_sub(up);
                (self.min_time_ms..=self.timeout_ms).contains(&gap)
                    && (pos - first.pos).hypot() < self.double_tap_slop
            }
            _ => false,
        };
        self.down = Some(Press { pos, time_ms });
        self.still_down = true;
        self.tap_valid = true;
        self.double_tapping = is_double;
        if is_double {
            first.map(|first| TapEvent::DoubleTap(first.pos))
        } else {
            None
        }
    }

    /// Handles pointer movement; leaving the touch slop invalidates the tap.
    pub fn on_move(&mut self, pos: Point) {
        if let Some(down) = self.down
            && self.tap_valid
            && (pos - down.pos).hypot() > self.touch_slop
        {
            self.tap_valid = false;
        }
    }

    /// Handles the last pointer going up.
    ///
    /// Returns [`TapEvent::SingleTapConfirmed`] when the confirmation window
    /// already elapsed while the pointer was held.
    pub fn on_up(&mut self, time_ms: u64) -> Option<TapEvent> {
        self.still_down = false;
        let down = self.down.take()?;
        if self.double_tapping {
            self.double_tapping = false;
            self.last_up_ms = None;
            return None;
        }
        if !self.tap_valid {
            return None;
        }
        self.tap_valid = false;
        if time_ms >= down.time_ms.saturating_add(self.timeout_ms) {
            self.last_up_ms = None;
            return Some(TapEvent::SingleTapConfirmed(down.pos));
        }
        self.last_up_ms = Some(time_ms);
        self.pending = Some(down);
        None
    }

    /// Abandons the current tap, e.g. when a second pointer goes down.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.tap_valid = false;
        self.double_tapping = false;
    }

    /// Returns `true` while the second press of a double tap is held.
    #[must_use]
    pub fn is_double_tapping(&self) -> bool {
        self.double_tapping
    }

    /// Returns `true` while the current press still counts as a tap.
    #[must_use]
    pub fn is_tap_valid(&self) -> bool {
        self.tap_valid
    }

    /// Time at which a pending single tap will be confirmed.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        if self.still_down {
            return None;
        }
        self.pending
            .map(|press| press.time_ms.saturating_add(self.timeout_ms))
    }

    /// Confirms a pending single tap once its window has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Option<TapEvent> {
        let deadline = self.next_deadline()?;
        if now_ms < deadline {
            return None;
        }
        let press = self.pending.take()?;
        self.last_up_ms = None;
        Some(TapEvent::SingleTapConfirmed(press.pos))
    }
}
