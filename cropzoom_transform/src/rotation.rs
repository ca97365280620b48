// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Quarter-turn rotation applied to a bitmap before display.
///
/// Rotations are clockwise in a y-down coordinate system, matching how
/// camera EXIF orientations are usually described.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    /// No rotation.
    #[default]
    Deg0,
    /// A quarter turn clockwise.
    Deg90,
    /// A half turn.
    Deg180,
    /// Three quarter turns clockwise (a quarter turn counter-clockwise).
    Deg270,
}

impl Rotation {
    /// Converts an angle in degrees into the nearest quarter turn.
    ///
    /// Negative angles and angles beyond a full turn are normalized first, so
    /// `-90` and `270` both produce [`Rotation::Deg270`].
    #[must_use]
    pub fn from_degrees(degrees: i32) -> Self {
        match ((degrees.rem_euclid(360) + 45) / 90) % 4 {
            0 => Self::Deg0,
            1 => Self::Deg90,
            2 => Self::Deg180,
            _ => Self::Deg270,
        }
    }

    /// Returns the rotation angle in degrees (`0`, `90`, `180` or `270`).
    #[must_use]
    pub fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Returns `true` if this rotation swaps width and height.
    #[must_use]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }

    /// Linear part of the rotation, about the origin.
    fn linear(self) -> Affine {
        match self {
            Self::Deg0 => Affine::IDENTITY,
            Self::Deg90 => Affine::new([0.0, 1.0, -1.0, 0.0, 0.0, 0.0]),
            Self::Deg180 => Affine::new([-1.0, 0.0, 0.0, -1.0, 0.0, 0.0]),
            Self::Deg270 => Affine::new([0.0, -1.0, 1.0, 0.0, 0.0, 0.0]),
        }
    }
}

/// Pixel size and display rotation of the image shown by a view.
///
/// Width and height are the *raw* bitmap dimensions; the oriented dimensions
/// are derived from the rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageFrame {
    /// Raw bitmap width in pixels.
    pub width: f64,
    /// Raw bitmap height in pixels.
    pub height: f64,
    /// Rotation applied before display.
    pub rotation: Rotation,
}

impl ImageFrame {
    /// Creates a frame for a bitmap of `width` x `height` pixels.
    #[must_use]
    pub fn new(width: u32, height: u32, rotation: Rotation) -> Self {
        Self {
            width: f64::from(width),
            height: f64::from(height),
            rotation,
        }
    }

    /// Returns `true` if the bitmap has no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Rectangle covering the raw bitmap, in bitmap pixel coordinates.
    #[must_use]
    pub fn raw_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Size of the bitmap once rotated for display.
    #[must_use]
    pub fn oriented_size(&self) -> Size {
        if self.rotation.swaps_dimensions() {
            Size::new(self.height, self.width)
        } else {
            Size::new(self.width, self.height)
        }
    }

    /// Transform mapping raw bitmap pixels into the oriented frame.
    ///
    /// The result maps [`ImageFrame::raw_rect`] exactly onto
    /// `(0, 0) .. oriented_size()`. Empty frames map with the identity.
    #[must_use]
    pub fn rotation_transform(&self) -> Affine {
        if self.rotation == Rotation::Deg0 || self.is_empty() {
            return Affine::IDENTITY;
        }
        let raw_center = Point::new(self.width / 2.0, self.height / 2.0).to_vec2();
        let oriented = self.oriented_size();
        let oriented_center = Vec2::new(oriented.width / 2.0, oriented.height / 2.0);
        Affine::translate(oriented_center) * self.rotation.linear() * Affine::translate(-raw_center)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use super::{ImageFrame, Rotation};

    #[test]
    fn from_degrees_normalizes() {
        assert_eq!(Rotation::from_degrees(0), Rotation::Deg0);
        assert_eq!(Rotation::from_degrees(90), Rotation::Deg90);
        assert_eq!(Rotation::from_degrees(450), Rotation::Deg90);
        assert_eq!(Rotation::from_degrees(-90), Rotation::Deg270);
        assert_eq!(Rotation::from_degrees(180), Rotation::Deg180);
        // Nearest quarter turn.
        assert_eq!(Rotation::from_degrees(100), Rotation::Deg90);
        assert_eq!(Rotation::from_degrees(359), Rotation::Deg0);
    }

    #[test]
    fn oriented_size_swaps_for_quarter_turns() {
        let frame = ImageFrame::new(200, 100, Rotation::Deg90);
        assert_eq!(frame.oriented_size(), Size::new(100.0, 200.0));
        let frame = ImageFrame::new(200, 100, Rotation::Deg180);
        assert_eq!(frame.oriented_size(), Size::new(200.0, 100.0));
    }

    #[test]
    fn rotation_transform_maps_raw_rect_onto_oriented_rect() {
        for rotation in [
            Rotation::Deg0,
            Rotation::Deg90,
            Rotation::Deg180,
            Rotation::Deg270,
        ] {
            let frame = ImageFrame::new(200, 100, rotation);
            let mapped = frame.rotation_transform().transform_rect_bbox(frame.raw_rect());
            let size = frame.oriented_size();
            let expected = Rect::new(0.0, 0.0, size.width, size.height);
            assert!(
                (mapped.x0 - expected.x0).abs() < 1e-9
                    && (mapped.y0 - expected.y0).abs() < 1e-9
                    && (mapped.x1 - expected.x1).abs() < 1e-9
                    && (mapped.y1 - expected.y1).abs() < 1e-9,
                "{rotation:?} mapped to {mapped:?}"
            );
        }
    }

    #[test]
    fn quarter_turn_is_clockwise() {
        let frame = ImageFrame::new(200, 100, Rotation::Deg90);
        // The raw top-left corner ends up at the oriented top-right corner.
        let p = frame.rotation_transform() * Point::new(0.0, 0.0);
        assert!((p.x - 100.0).abs() < 1e-9, "x was {}", p.x);
        assert!(p.y.abs() < 1e-9, "y was {}", p.y);
    }

    #[test]
    fn empty_frame_uses_identity() {
        let frame = ImageFrame::new(0, 100, Rotation::Deg90);
        assert!(frame.is_empty());
        assert_eq!(frame.rotation_transform(), kurbo::Affine::IDENTITY);
    }
}
