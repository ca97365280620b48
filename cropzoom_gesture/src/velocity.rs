// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Release-velocity estimation from recent pointer samples.

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Most samples kept, regardless of the time window.
const HISTORY: usize = 20;

#[derive(Clone, Copy, Debug)]
struct Sample {
    time_ms: u64,
    pos: Point,
}

/// Least-squares velocity estimator over a sliding time window.
///
/// The estimate is the slope of a straight-line fit of position against time
/// over the samples no older than the window, in pixels per second.
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    window_ms: u64,
    samples: SmallVec<[Sample; HISTORY]>,
}

impl VelocityTracker {
    /// Creates an empty tracker with the given window.
    #[must_use]
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            samples: SmallVec::new(),
        }
    }

    /// Discards all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Records a sample; samples older than the window are dropped.
    ///
    /// A timestamp going backwards restarts the history.
    pub fn add(&mut self, time_ms: u64, pos: Point) {
        if self
            .samples
            .last()
            .is_some_and(|last| time_ms < last.time_ms)
        {
            self.samples.clear();
        }
        let oldest = time_ms.saturating_sub(self.window_ms);
        self.samples.retain(|s| s.time_ms >= oldest);
        if self.samples.len() == HISTORY {
            self.samples.remove(0);
        }
        self.samples.push(Sample { time_ms, pos });
    }

    /// Number of samples currently in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` when no samples are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Current velocity estimate in pixels per second.
    ///
    /// Fewer than two samples, or samples that all share one timestamp, give
    /// a zero velocity.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        let Some(latest) = self.samples.last() else {
            return Vec2::ZERO;
        };
        if self.samples.len() < 2 {
            return Vec2::ZERO;
        }
        let n = self.samples.len() as f64;
        // Seconds relative to the latest sample keeps the sums small.
        let secs = |s: &Sample| (s.time_ms as f64 - latest.time_ms as f64) / 1000.0;
        let (st, sx, sy) = self.samples.iter().fold((0.0, 0.0, 0.0), |(st, sx, sy), s| {
            (st + secs(s), sx + s.pos.x, sy + s.pos.y)
        });
        let (mt, mx, my) = (st / n, sx / n, sy / n);
        let (var, cx, cy) = self
            .samples
            .iter()
            .fold((0.0, 0.0, 0.0), |(var, cx, cy), s| {
                let dt = secs(s) - mt;
                (var + dt * dt, cx + dt * (s.pos.x - mx), cy + dt * (s.pos.y - my))
            });
        if var <= f64::EPSILON {
            return Vec2::ZERO;
        }
        Vec2::new(cx / var, cy / var)
    }

    /// Velocity estimate with each component clamped to `±max`.
    #[must_use]
    pub fn clamped_velocity(&self, max: f64) -> Vec2 {
        let v = self.velocity();
        let max = max.abs();
        Vec2::new(v.x.clamp(-max, max), v.y.clamp(-max, max))
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::VelocityTracker;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn empty_and_single_sample_are_still() {
        let mut v = VelocityTracker::new(100);
        assert!(v.is_empty());
        assert_eq!(v.velocity(), kurbo::Vec2::ZERO);
        v.add(0, Point::new(1.0, 1.0));
        assert_eq!(v.velocity(), kurbo::Vec2::ZERO);
    }

    #[test]
    fn constant_motion_is_recovered() {
        let mut v = VelocityTracker::new(100);
        for i in 0..10_u32 {
            // 2 px per ms to the right, 1 px per ms up.
            let t = u64::from(i) * 10;
            v.add(t, Point::new(2.0 * t as f64, -(t as f64)));
        }
        let vel = v.velocity();
        assert!(close(vel.x, 2000.0), "vx {}", vel.x);
        assert!(close(vel.y, -1000.0), "vy {}", vel.y);
    }

    #[test]
    fn old_samples_fall_out_of_window() {
        let mut v = VelocityTracker::new(100);
        // Fast early motion, then a long rest.
        v.add(0, Point::new(0.0, 0.0));
        v.add(10, Point::new(500.0, 0.0));
        v.add(300, Point::new(500.0, 0.0));
        v.add(310, Point::new(500.0, 0.0));
        assert_eq!(v.len(), 2);
        assert!(close(v.velocity().x, 0.0));
    }

    #[test]
    fn same_timestamp_gives_zero() {
        let mut v = VelocityTracker::new(100);
        v.add(5, Point::new(0.0, 0.0));
        v.add(5, Point::new(100.0, 0.0));
        assert_eq!(v.velocity(), kurbo::Vec2::ZERO);
    }

    #[test]
    fn clamping_limits_each_axis() {
        let mut v = VelocityTracker::new(100);
        v.add(0, Point::new(0.0, 0.0));
        v.add(10, Point::new(1000.0, -1000.0));
        let c = v.clamped_velocity(8000.0);
        assert!(close(c.x, 8000.0));
        assert!(close(c.y, -8000.0));
    }

    #[test]
    fn history_is_bounded() {
        let mut v = VelocityTracker::new(10_000);
        for t in 0..50 {
            v.add(t, Point::new(t as f64, 0.0));
        }
        assert_eq!(v.len(), 20);
        assert!(close(v.velocity().x, 1000.0));
    }

    #[test]
    fn backwards_time_restarts() {
        let mut v = VelocityTracker::new(100);
        v.add(100, Point::new(0.0, 0.0));
        v.add(50, Point::new(10.0, 0.0));
        assert_eq!(v.len(), 1);
    }
}
