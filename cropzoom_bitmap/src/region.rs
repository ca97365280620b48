// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Integer pixel rectangle with exclusive right and bottom edges.
///
/// Coordinates are signed so that regions computed from a view may hang off
/// the bitmap; [`PixelRect::clamp_to`] brings them back inside.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left edge.
    pub x0: i64,
    /// Top edge.
    pub y0: i64,
    /// Right edge (exclusive).
    pub x1: i64,
    /// Bottom edge (exclusive).
    pub y1: i64,
}

impl PixelRect {
    /// Creates a rectangle from its edges.
    #[must_use]
    pub const fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Creates a rectangle from an origin and a size.
    #[must_use]
    pub fn from_origin_size(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self::new(x, y, x + i64::from(width), y + i64::from(height))
    }

    /// Width; zero when the edges are inverted.
    #[must_use]
    pub fn width(&self) -> u64 {
        self.x1.saturating_sub(self.x0).max(0).unsigned_abs()
    }

    /// Height; zero when the edges are inverted.
    #[must_use]
    pub fn height(&self) -> u64 {
        self.y1.saturating_sub(self.y0).max(0).unsigned_abs()
    }

    /// Returns `true` when the rectangle covers no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// The part of this rectangle inside a `width` x `height` bitmap, or
    /// `None` when they do not overlap.
    #[must_use]
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Self> {
        let clamped = Self::new(
            self.x0.max(0),
            self.y0.max(0),
            self.x1.min(i64::from(width)),
            self.y1.min(i64::from(height)),
        );
        (!clamped.is_empty()).then_some(clamped)
    }
}

#[cfg(test)]
mod tests {
    use super::PixelRect;

    #[test]
    fn clamp_trims_overhang() {
        let r = PixelRect::new(-10, 5, 50, 200);
        assert_eq!(r.clamp_to(40, 100), Some(PixelRect::new(0, 5, 40, 100)));
    }

    #[test]
    fn clamp_rejects_disjoint() {
        assert_eq!(PixelRect::new(50, 50, 60, 60).clamp_to(40, 40), None);
        assert_eq!(PixelRect::new(10, 10, 5, 20).clamp_to(40, 40), None);
    }

    #[test]
    fn inverted_edges_have_no_size() {
        let r = PixelRect::new(10, 10, 0, 0);
        assert_eq!((r.width(), r.height()), (0, 0));
        assert!(r.is_empty());
        assert_eq!(PixelRect::from_origin_size(3, 4, 5, 6).x1, 8);
    }
}
