// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decelerating fling simulation.
//!
//! Distance and duration follow a spline deceleration model: the travel for
//! an initial speed `v` is derived from `ln(0.35 * v / (friction * k))`, where
//! `k` converts gravity into pixels for the configured density, and position
//! over time follows a precomputed spline curve. Positions are whole pixels,
//! which keeps per-frame deltas free of drift.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use cropzoom_gesture::GestureConfig;
//! use cropzoom_gesture::fling::Fling;
//!
//! let mut fling = Fling::start(
//!     &GestureConfig::default(),
//!     Point::ORIGIN,
//!     Vec2::new(-3000.0, 0.0),
//!     (Point::new(-400.0, 0.0), Point::ORIGIN),
//!     0,
//! );
//! let mut now = 0;
//! while fling.compute(now) {
//!     now += 16;
//! }
//! assert!(fling.is_finished());
//! assert!(fling.current().x >= -400.0);
//! ```

use std::sync::OnceLock;

use kurbo::{Point, Vec2};

use crate::config::GestureConfig;

const INFLEXION: f64 = 0.35;
const START_TENSION: f64 = 0.5;
const END_TENSION: f64 = 1.0;
const P1: f64 = START_TENSION * INFLEXION;
const P2: f64 = 1.0 - END_TENSION * (1.0 - INFLEXION);
const NB_SAMPLES: usize = 100;
const GRAVITY_EARTH: f64 = 9.80665;
const INCHES_PER_METER: f64 = 39.37;
const FLING_TUNING: f64 = 0.84;

/// `ln(0.78) / ln(0.9)`.
fn deceleration_rate() -> f64 {
    0.78_f64.ln() / 0.9_f64.ln()
}

/// Normalized travel at `NB_SAMPLES + 1` evenly spaced normalized times.
fn spline_positions() -> &'static [f64; NB_SAMPLES + 1] {
    static TABLE: OnceLock<[f64; NB_SAMPLES + 1]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [0.0; NB_SAMPLES + 1];
        let mut x_min = 0.0_f64;
        for (i, slot) in table.iter_mut().take(NB_SAMPLES).enumerate() {
            let alpha = i as f64 / NB_SAMPLES as f64;
            let mut x_max = 1.0_f64;
            let (x, coef) = loop {
                let x = x_min + (x_max - x_min) / 2.0;
                let coef = 3.0 * x * (1.0 - x);
                let tx = coef * ((1.0 - x) * P1 + x * P2) + x * x * x;
                if (tx - alpha).abs() < 1e-5 || x_max - x_min < 1e-12 {
                    break (x, coef);
                }
                if tx > alpha {
                    x_max = x;
                } else {
                    x_min = x;
                }
            };
            *slot = coef * ((1.0 - x) * START_TENSION + x) + x * x * x;
        }
        table[NB_SAMPLES] = 1.0;
        table
    })
}

/// Physics derived from a [`GestureConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlingPhysics {
    friction: f64,
    physical_coeff: f64,
}

impl FlingPhysics {
    /// Builds the physics for the config's friction and density.
    #[must_use]
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            friction: config.scroll_friction,
            physical_coeff: GRAVITY_EARTH * INCHES_PER_METER * config.pixels_per_inch * FLING_TUNING,
        }
    }

    fn deceleration(&self, speed: f64) -> f64 {
        (INFLEXION * speed / (self.friction * self.physical_coeff)).ln()
    }

    /// Time in milliseconds a fling at `speed` px/s takes to stop.
    #[must_use]
    pub fn duration_ms(&self, speed: f64) -> u64 {
        if !(speed.is_finite() && speed > 0.0) {
            return 0;
        }
        let rate = deceleration_rate();
        let ms = 1000.0 * (self.deceleration(speed) / (rate - 1.0)).exp();
        #[expect(
            clippy::cast_possible_truncation,
            reason = "durations are small positive millisecond counts"
        )]
        let ms = ms.max(0.0) as u64;
        ms
    }

    /// Distance in pixels a fling at `speed` px/s travels before stopping.
    #[must_use]
    pub fn distance(&self, speed: f64) -> f64 {
        if !(speed.is_finite() && speed > 0.0) {
            return 0.0;
        }
        let rate = deceleration_rate();
        self.friction * self.physical_coeff * (rate / (rate - 1.0) * self.deceleration(speed)).exp()
    }
}

/// A running fling: integer positions between per-axis bounds.
#[derive(Clone, Debug)]
pub struct Fling {
    start: Point,
    end: Point,
    min: Point,
    max: Point,
    current: Point,
    start_ms: u64,
    duration_ms: u64,
    finished: bool,
}

impl Fling {
    /// Starts a fling at `start` with `velocity` in px/s, bounded by
    /// `(min, max)` on each axis, at time `now_ms`.
    #[must_use]
    pub fn start(
        config: &GestureConfig,
        start: Point,
        velocity: Vec2,
        (min, max): (Point, Point),
        now_ms: u64,
    ) -> Self {
        let physics = FlingPhysics::new(config);
        let speed = velocity.hypot();
        let (duration_ms, travel) = if speed.is_finite() && speed > 0.0 {
            (physics.duration_ms(speed), physics.distance(speed))
        } else {
            (0, 0.0)
        };
        let dir = if speed > 0.0 { velocity / speed } else { Vec2::ZERO };
        let end = Point::new(
            (start.x + (travel * dir.x).round()).clamp(min.x, max.x.max(min.x)),
            (start.y + (travel * dir.y).round()).clamp(min.y, max.y.max(min.y)),
        );
        log::trace!("fling from {start:?} at {velocity:?}: to {end:?} over {duration_ms} ms");
        Self {
            start,
            end,
            min,
            max,
            current: start,
            start_ms: now_ms,
            duration_ms,
            finished: duration_ms == 0,
        }
    }

    /// Advances to `now_ms`; returns `false` once the fling had already
    /// finished before this call.
    pub fn compute(&mut self, now_ms: u64) -> bool {
        if self.finished {
            return false;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        if elapsed >= self.duration_ms {
            self.current = self.end;
            self.finished = true;
            return true;
        }
        let t = elapsed as f64 / self.duration_ms as f64;
        let coef = distance_coef(t);
        let travel = self.end - self.start;
        self.current = Point::new(
            (self.start.x + (coef * travel.x).round()).clamp(self.min.x, self.max.x.max(self.min.x)),
            (self.start.y + (coef * travel.y).round()).clamp(self.min.y, self.max.y.max(self.min.y)),
        );
        if self.current == self.end {
            self.finished = true;
        }
        true
    }

    /// Stops the fling where it is.
    pub fn force_finish(&mut self) {
        self.finished = true;
    }

    /// Current position.
    #[must_use]
    pub fn current(&self) -> Point {
        self.current
    }

    /// Position the fling will come to rest at.
    #[must_use]
    pub fn final_position(&self) -> Point {
        self.end
    }

    /// Total duration in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Returns `true` once the fling has come to rest.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Normalized travel at normalized time `t`.
fn distance_coef(t: f64) -> f64 {
    let table = spline_positions();
    let t = t.clamp(0.0, 1.0);
    #[expect(
        clippy::cast_possible_truncation,
        reason = "t is in [0, 1], so the index is at most NB_SAMPLES"
    )]
    let index = (NB_SAMPLES as f64 * t) as usize;
    if index >= NB_SAMPLES {
        return 1.0;
    }
    let t_inf = index as f64 / NB_SAMPLES as f64;
    let t_sup = (index + 1) as f64 / NB_SAMPLES as f64;
    let (d_inf, d_sup) = (table[index], table[index + 1]);
    let velocity_coef = (d_sup - d_inf) / (t_sup - t_inf);
    d_inf + (t - t_inf) * velocity_coef
}
