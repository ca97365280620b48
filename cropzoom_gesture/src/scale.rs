// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-finger pinch tracking.
//!
//! The span of a pointer set is `hypot(2 * mean|x - fx|, 2 * mean|y - fy|)`
//! around the focus `(fx, fy)`, the mean position. Scale factors are reported
//! relative to the span when the pinch began, not incrementally.

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::config::GestureConfig;

/// Pinch transition produced by [`ScaleState`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleEvent {
    /// A pinch started around `focus`.
    Begin {
        /// Focus at the start of the pinch.
        focus: Point,
    },
    /// The span changed; `factor` is relative to the span at [`ScaleEvent::Begin`].
    Update {
        /// Current span divided by the span at the start of the pinch.
        factor: f64,
        /// Current focus.
        focus: Point,
    },
    /// The pinch ended.
    End,
}

/// Mean position of a pointer set; the origin when empty.
#[must_use]
pub fn focus_of(pointers: &[Point]) -> Point {
    if pointers.is_empty() {
        return Point::ORIGIN;
    }
    let sum = pointers
        .iter()
        .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    (sum / pointers.len() as f64).to_point()
}

/// Span of a pointer set around its focus; zero for fewer than two pointers.
#[must_use]
pub fn span_of(pointers: &[Point]) -> f64 {
    if pointers.len() < 2 {
        return 0.0;
    }
    let focus = focus_of(pointers);
    let n = pointers.len() as f64;
    let (dx, dy) = pointers.iter().fold((0.0, 0.0), |(dx, dy), p| {
        (dx + (p.x - focus.x).abs(), dy + (p.y - focus.y).abs())
    });
    (2.0 * dx / n).hypot(2.0 * dy / n)
}

/// Pinch state machine.
#[derive(Clone, Debug)]
pub struct ScaleState {
    min_span: f64,
    span_slop: f64,
    in_progress: bool,
    initial_span: f64,
    begin_span: f64,
    begin_focus: Point,
}

impl ScaleState {
    /// Creates an idle pinch tracker.
    #[must_use]
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            min_span: config.min_span,
            span_slop: config.span_slop,
            in_progress: false,
            initial_span: 0.0,
            begin_span: 0.0,
            begin_focus: Point::ORIGIN,
        }
    }

    /// Returns `true` while a pinch is in progress.
    #[must_use]
    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// Focus captured when the current pinch began.
    #[must_use]
    pub fn begin_focus(&self) -> Option<Point> {
        self.in_progress.then_some(self.begin_focus)
    }

    /// Handles a change in the set of pointers (one going down or up).
    ///
    /// A running pinch ends; it restarts immediately around the new pointer
    /// set when that set can still pinch.
    pub fn configure(&mut self, pointers: &[Point]) -> SmallVec<[ScaleEvent; 2]> {
        let mut events = SmallVec::new();
        let was_in_progress = self.in_progress;
        if self.in_progress {
            self.in_progress = false;
            events.push(ScaleEvent::End);
        }
        let span = span_of(pointers);
        self.initial_span = span;
        if was_in_progress && pointers.len() >= 2 && span >= self.min_span {
            events.push(self.begin(pointers, span));
        }
        events
    }

    /// Handles pointer movement.
    pub fn on_move(&mut self, pointers: &[Point]) -> Option<ScaleEvent> {
        let span = span_of(pointers);
        if self.in_progress {
            if pointers.len() < 2 || span < self.min_span {
                self.in_progress = false;
                return Some(ScaleEvent::End);
            }
            let factor = if self.begin_span > 0.0 {
                span / self.begin_span
            } else {
                1.0
            };
            return Some(ScaleEvent::Update {
                factor,
                focus: focus_of(pointers),
            });
        }
        if pointers.len() >= 2
            && span >= self.min_span
            && (span - self.initial_span).abs() > self.span_slop
        {
            return Some(self.begin(pointers, span));
        }
        None
    }

    /// Ends any running pinch.
    pub fn cancel(&mut self) -> Option<ScaleEvent> {
        self.initial_span = 0.0;
        if self.in_progress {
            self.in_progress = false;
            Some(ScaleEvent::End)
        } else {
            None
        }
    }

    fn begin(&mut self, pointers: &[Point], span: f64) -> ScaleEvent {
        self.in_progress = true;
        self.begin_span = span;
        self.begin_focus = focus_of(pointers);
        ScaleEvent::Begin {
            focus: self.begin_focus,
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{ScaleEvent, ScaleState, focus_of, span_of};
    use crate::config::GestureConfig;

    fn pair(half: f64) -> [Point; 2] {
        [Point::new(500.0 - half, 500.0), Point::new(500.0 + half, 500.0)]
    }

    #[test]
    fn span_and_focus_of_two_pointers() {
        let pts = [Point::new(0.0, 0.0), Point::new(30.0, 40.0)];
        assert_eq!(focus_of(&pts), Point::new(15.0, 20.0));
        assert!((span_of(&pts) - 50.0).abs() < 1e-9);
        assert_eq!(span_of(&pts[..1]), 0.0);
        assert_eq!(focus_of(&[]), Point::ORIGIN);
    }

    #[test]
    fn resting_fingers_do_not_begin() {
        let mut s = ScaleState::new(&GestureConfig::default());
        assert!(s.configure(&pair(100.0)).is_empty());
        assert_eq!(s.on_move(&pair(101.0)), None);
        assert!(!s.in_progress());
    }

    #[test]
    fn factor_is_relative_to_begin_span() {
        let mut s = ScaleState::new(&GestureConfig::default());
        s.configure(&pair(100.0));
        let begin = s.on_move(&pair(120.0));
        assert_eq!(
            begin,
            Some(ScaleEvent::Begin {
                focus: Point::new(500.0, 500.0)
            })
        );
        let Some(ScaleEvent::Update { factor, .. }) = s.on_move(&pair(240.0)) else {
            panic!("expected update");
        };
        assert!((factor - 2.0).abs() < 1e-9);
        let Some(ScaleEvent::Update { factor, .. }) = s.on_move(&pair(60.0)) else {
            panic!("expected update");
        };
        assert!((factor - 0.5).abs() < 1e-9);
    }

    #[test]
    fn begin_focus_is_captured_once() {
        let mut s = ScaleState::new(&GestureConfig::default());
        s.configure(&pair(100.0));
        s.on_move(&pair(130.0));
        let moved = [Point::new(0.0, 0.0), Point::new(300.0, 0.0)];
        s.on_move(&moved);
        assert_eq!(s.begin_focus(), Some(Point::new(500.0, 500.0)));
    }

    #[test]
    fn pointer_change_restarts_pinch() {
        let mut s = ScaleState::new(&GestureConfig::default());
        s.configure(&pair(100.0));
        s.on_move(&pair(130.0));
        let three = [
            Point::new(370.0, 500.0),
            Point::new(630.0, 500.0),
            Point::new(500.0, 700.0),
        ];
        let events = s.configure(&three);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], ScaleEvent::End);
        assert!(matches!(events[1], ScaleEvent::Begin { .. }));
    }

    #[test]
    fn lifting_a_finger_ends_pinch() {
        let mut s = ScaleState::new(&GestureConfig::default());
        s.configure(&pair(100.0));
        s.on_move(&pair(130.0));
        let events = s.configure(&[Point::new(370.0, 500.0)]);
        assert_eq!(events.as_slice(), &[ScaleEvent::End]);
        assert!(!s.in_progress());
    }

    #[test]
    fn collapsing_span_ends_pinch() {
        let mut s = ScaleState::new(&GestureConfig::default());
        s.configure(&pair(100.0));
        s.on_move(&pair(130.0));
        assert_eq!(s.on_move(&pair(2.0)), Some(ScaleEvent::End));
    }

    #[test]
    fn cancel_ends_running_pinch() {
        let mut s = ScaleState::new(&GestureConfig::default());
        assert_eq!(s.cancel(), None);
        s.configure(&pair(100.0));
        s.on_move(&pair(130.0));
        assert_eq!(s.cancel(), Some(ScaleEvent::End));
    }
}
