// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-driven transform animations.
//!
//! A view owns at most one [`Animation`]; the host drives it by calling
//! [`Animation::step`] with the current time until it reports completion.

use cropzoom_gesture::{Fling, GestureConfig};
use cropzoom_transform::{ViewportBounds, ZoomTransform};
use kurbo::{Point, Vec2};

/// Linear zoom from the scale at start to a target about a fixed focus.
#[derive(Clone, Debug)]
pub struct ZoomAnimation {
    from: f64,
    target: f64,
    focus: Point,
    start_ms: u64,
    duration_ms: u64,
}

impl ZoomAnimation {
    /// Creates a zoom from `from` to `target` over `duration_ms`.
    pub fn new(from: f64, target: f64, focus: Point, start_ms: u64, duration_ms: u64) -> Self {
        Self {
            from,
            target,
            focus,
            start_ms,
            duration_ms,
        }
    }

    /// Scale the animation ends on.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Point kept fixed while zooming.
    pub fn focus(&self) -> Point {
        self.focus
    }

    fn step<V: ViewportBounds>(&self, transform: &mut ZoomTransform<V>, now_ms: u64) -> bool {
        let (t, running) = progress(self.start_ms, self.duration_ms, now_ms);
        let scale = if running {
            self.from + (self.target - self.from) * t
        } else {
            self.target
        };
        transform.zoom_to(scale, self.focus);
        running
    }
}

/// Progressive application of a centering correction.
#[derive(Clone, Debug)]
pub struct CenterAnimation {
    delta: Vec2,
    applied: Vec2,
    start_ms: u64,
    duration_ms: u64,
}

impl CenterAnimation {
    /// Creates an animation translating by `delta` in total over `duration_ms`.
    pub fn new(delta: Vec2, start_ms: u64, duration_ms: u64) -> Self {
        Self {
            delta,
            applied: Vec2::ZERO,
            start_ms,
            duration_ms,
        }
    }

    fn step<V: ViewportBounds>(&mut self, transform: &mut ZoomTransform<V>, now_ms: u64) -> bool {
        let (t, running) = progress(self.start_ms, self.duration_ms, now_ms);
        let wanted = if running { self.delta * t } else { self.delta };
        transform.pan_unclamped(wanted - self.applied);
        self.applied = wanted;
        running
    }
}

/// Decelerating scroll after a fling gesture.
///
/// The simulation runs in scroll coordinates starting at the origin; each
/// step pans the image by the negated change since the previous step.
#[derive(Clone, Debug)]
pub struct FlingAnimation {
    fling: Fling,
    last: Point,
}

impl FlingAnimation {
    /// Starts a fling for a release `velocity` (finger direction, px/s).
    ///
    /// `overflow` is how far the image extends past the viewport on each
    /// axis; the scroll may travel at most that far, and only in the
    /// direction of the fling.
    pub fn new(config: &GestureConfig, velocity: Vec2, overflow: Vec2, start_ms: u64) -> Self {
        let scroll = -velocity;
        let min = Point::new(
            if scroll.x >= 0.0 { 0.0 } else { -overflow.x },
            if scroll.y >= 0.0 { 0.0 } else { -overflow.y },
        );
        let max = Point::new(
            if scroll.x > 0.0 { overflow.x } else { 0.0 },
            if scroll.y > 0.0 { overflow.y } else { 0.0 },
        );
        Self {
            fling: Fling::start(config, Point::ORIGIN, scroll, (min, max), start_ms),
            last: Point::ORIGIN,
        }
    }

    /// The underlying simulation.
    pub fn fling(&self) -> &Fling {
        &self.fling
    }

    fn step<V: ViewportBounds>(&mut self, transform: &mut ZoomTransform<V>, now_ms: u64) -> bool {
        if !self.fling.compute(now_ms) {
            return false;
        }
        let current = self.fling.current();
        let moved = current - self.last;
        self.last = current;
        transform.pan(-moved);
        !self.fling.is_finished()
    }
}

/// The single animation a view may be running.
#[derive(Clone, Debug)]
pub enum Animation {
    /// Animated zoom.
    Zoom(ZoomAnimation),
    /// Animated centering.
    Center(CenterAnimation),
    /// Fling deceleration.
    Fling(FlingAnimation),
}

impl Animation {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Zoom(_) => "zoom",
            Self::Center(_) => "center",
            Self::Fling(_) => "fling",
        }
    }

    /// Applies the state at `now_ms`; returns `true` while more frames are
    /// needed.
    pub fn step<V: ViewportBounds>(&mut self, transform: &mut ZoomTransform<V>, now_ms: u64) -> bool {
        let running = match self {
            Self::Zoom(a) => a.step(transform, now_ms),
            Self::Center(a) => a.step(transform, now_ms),
            Self::Fling(a) => a.step(transform, now_ms),
        };
        log::trace!("{} frame at {now_ms} ms, running: {running}", self.name());
        running
    }
}

/// Normalized progress in `[0, 1)` and whether the animation is still running.
fn progress(start_ms: u64, duration_ms: u64, now_ms: u64) -> (f64, bool) {
    let elapsed = now_ms.saturating_sub(start_ms);
    if elapsed >= duration_ms {
        return (1.0, false);
    }
    (elapsed as f64 / duration_ms as f64, true)
}
