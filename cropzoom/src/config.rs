// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use cropzoom_gesture::GestureConfig;

/// Tuning for [`ZoomImageView`](crate::ZoomImageView).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomViewConfig {
    /// Scale a double tap zooms to from the unzoomed state.
    pub double_tap_zoom: f64,
    /// Duration of double-tap and pinch snap-back animations.
    pub animation_ms: u64,
    /// Factor applied by [`ZoomImageView::zoom_in`](crate::ZoomImageView::zoom_in)
    /// and [`ZoomImageView::zoom_out`](crate::ZoomImageView::zoom_out).
    pub zoom_rate: f64,
    /// Gesture recognizer thresholds.
    pub gesture: GestureConfig,
}

impl Default for ZoomViewConfig {
    fn default() -> Self {
        Self {
            double_tap_zoom: 2.0,
            animation_ms: 200,
            zoom_rate: 1.25,
            gesture: GestureConfig::default(),
        }
    }
}

impl ZoomViewConfig {
    /// Returns the configuration with gesture distances scaled for `density`
    /// device pixels per density-independent pixel.
    #[must_use]
    pub fn with_density(mut self, density: f64) -> Self {
        self.gesture = self.gesture.with_density(density);
        self
    }
}
