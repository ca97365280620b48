// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables shared by the gesture state machines.

/// Thresholds and physics constants for gesture recognition.
///
/// Distances are in device pixels, times in milliseconds and velocities in
/// pixels per second. The defaults match a 160 dpi baseline display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Distance a pointer may travel before a press turns into a scroll.
    pub touch_slop: f64,
    /// Longest gap between the first release and the second press of a double tap.
    pub double_tap_timeout_ms: u64,
    /// Shortest gap between the first release and the second press of a double tap.
    pub double_tap_min_time_ms: u64,
    /// Largest distance between the two presses of a double tap.
    pub double_tap_slop: f64,
    /// Release velocity below which no fling is reported.
    pub min_fling_velocity: f64,
    /// Velocity ceiling applied to reported flings.
    pub max_fling_velocity: f64,
    /// Age of the oldest sample used for velocity estimation.
    pub velocity_window_ms: u64,
    /// Deceleration friction of fling animations.
    pub scroll_friction: f64,
    /// Display density used by the fling physics.
    pub pixels_per_inch: f64,
    /// Smallest finger span that starts a pinch.
    pub min_span: f64,
    /// Span change needed before a resting two-finger press becomes a pinch.
    pub span_slop: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            double_tap_timeout_ms: 300,
            double_tap_min_time_ms: 40,
            double_tap_slop: 100.0,
            min_fling_velocity: 50.0,
            max_fling_velocity: 8000.0,
            velocity_window_ms: 100,
            scroll_friction: 0.015,
            pixels_per_inch: 160.0,
            min_span: 16.0,
            span_slop: 16.0,
        }
    }
}

impl GestureConfig {
    /// Returns a copy scaled for a display of `density` times the baseline.
    ///
    /// Distances and the pixel density grow with `density`; times and
    /// friction are unchanged.
    #[must_use]
    pub fn with_density(self, density: f64) -> Self {
        if !(density.is_finite() && density > 0.0) {
            return self;
        }
        Self {
            touch_slop: self.touch_slop * density,
            double_tap_slop: self.double_tap_slop * density,
            min_fling_velocity: self.min_fling_velocity * density,
            max_fling_velocity: self.max_fling_velocity * density,
            pixels_per_inch: self.pixels_per_inch * density,
            min_span: self.min_span * density,
            span_slop: self.span_slop * density,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GestureConfig;

    #[test]
    fn density_scales_distances_only() {
        let base = GestureConfig::default();
        let hi = base.with_density(2.0);
        assert_eq!(hi.touch_slop, 16.0);
        assert_eq!(hi.pixels_per_inch, 320.0);
        assert_eq!(hi.double_tap_timeout_ms, base.double_tap_timeout_ms);
        assert_eq!(hi.scroll_friction, base.scroll_friction);
    }

    #[test]
    fn invalid_density_is_ignored() {
        let base = GestureConfig::default();
        assert_eq!(base.with_density(0.0), base);
        assert_eq!(base.with_density(f64::NAN), base);
    }
}
