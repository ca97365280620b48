// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};

/// Shape of the transparent crop hole.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HoleShape {
    /// A circle.
    Circle {
        /// Center in overlay coordinates.
        center: Point,
        /// Radius in pixels.
        radius: f64,
    },
    /// An axis-aligned rectangle in overlay coordinates.
    Rect(Rect),
}

impl HoleShape {
    /// Smallest axis-aligned rectangle containing the shape.
    #[must_use]
    pub fn bounding_rect(&self) -> Rect {
        match *self {
            Self::Circle { center, radius } => Rect::new(
                center.x - radius,
                center.y - radius,
                center.x + radius,
                center.y + radius,
            ),
            Self::Rect(rect) => rect,
        }
    }

    /// The same shape shrunk by `amount` on every side; never negative.
    #[must_use]
    pub fn inset(&self, amount: f64) -> Self {
        match *self {
            Self::Circle { center, radius } => Self::Circle {
                center,
                radius: (radius - amount).max(0.0),
            },
            Self::Rect(rect) => {
                let center = rect.center();
                let half_w = (rect.width() / 2.0 - amount).max(0.0);
                let half_h = (rect.height() / 2.0 - amount).max(0.0);
                Self::Rect(Rect::new(
                    center.x - half_w,
                    center.y - half_h,
                    center.x + half_w,
                    center.y + half_h,
                ))
            }
        }
    }

    /// Returns `true` when the shape covers no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match *self {
            Self::Circle { radius, .. } => radius <= 0.0,
            Self::Rect(rect) => rect.width() <= 0.0 || rect.height() <= 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::HoleShape;

    #[test]
    fn circle_bounds_enclose_radius() {
        let c = HoleShape::Circle {
            center: Point::new(50.0, 60.0),
            radius: 10.0,
        };
        assert_eq!(c.bounding_rect(), Rect::new(40.0, 50.0, 60.0, 70.0));
    }

    #[test]
    fn inset_shrinks_and_saturates() {
        let r = HoleShape::Rect(Rect::new(0.0, 0.0, 100.0, 40.0));
        assert_eq!(r.inset(5.0), HoleShape::Rect(Rect::new(5.0, 5.0, 95.0, 35.0)));
        assert!(r.inset(30.0).is_empty());
        let c = HoleShape::Circle {
            center: Point::ORIGIN,
            radius: 3.0,
        };
        assert!(c.inset(10.0).is_empty());
    }
}
