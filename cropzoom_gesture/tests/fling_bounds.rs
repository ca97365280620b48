// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A fling never leaves its bounds, whatever the velocity.

use cropzoom_gesture::{Fling, GestureConfig};
use kurbo::{Point, Vec2};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_fling_stays_in_bounds(
        (vx, vy) in (-8000.0f64..=8000.0, -8000.0f64..=8000.0),
        (ox, oy) in (0.0f64..=3000.0, 0.0f64..=3000.0),
        frame in 1u64..=50,
    ) {
        // The view negates release velocity, and bounds follow its sign.
        let min = Point::new(if vx >= 0.0 { 0.0 } else { -ox }, if vy >= 0.0 { 0.0 } else { -oy });
        let max = Point::new(if vx > 0.0 { ox } else { 0.0 }, if vy > 0.0 { oy } else { 0.0 });
        let mut fling = Fling::start(&GestureConfig::default(), Point::ORIGIN, Vec2::new(vx, vy), (min, max), 0);

        let mut now = 0;
        let mut steps = 0;
        while fling.compute(now) {
            let p = fling.current();
            prop_assert!(p.x >= min.x && p.x <= max.x, "x {} outside [{}, {}]", p.x, min.x, max.x);
            prop_assert!(p.y >= min.y && p.y <= max.y, "y {} outside [{}, {}]", p.y, min.y, max.y);
            now += frame;
            steps += 1;
            prop_assert!(steps < 100_000, "fling never finished");
        }
        prop_assert!(fling.is_finished());
    }
}
