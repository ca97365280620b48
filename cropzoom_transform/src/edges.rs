// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

bitflags::bitflags! {
    /// Image edges that are flush with the viewport bounds after centering.
    ///
    /// When the image is no larger than the viewport along an axis it is
    /// centered and both edges of that axis are reported.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Edges: u8 {
        /// The left image edge touches the left bound.
        const LEFT = 1;
        /// The right image edge touches the right bound.
        const RIGHT = 2;
        /// The top image edge touches the top bound.
        const TOP = 4;
        /// The bottom image edge touches the bottom bound.
        const BOTTOM = 8;
    }
}

impl Edges {
    /// Whether a horizontal drag should be handed to a paging parent.
    ///
    /// `distance_x` follows the scroll convention `last - current`, so a
    /// negative value means the content is being dragged to the right.
    /// The drag is yielded when the content cannot scroll horizontally at all,
    /// or when it would be pushed further past an edge that is already flush.
    #[must_use]
    pub fn yields_horizontal_drag(self, distance_x: f64) -> bool {
        if self.contains(Self::LEFT | Self::RIGHT) {
            return true;
        }
        (self.contains(Self::LEFT) && distance_x < 0.0)
            || (self.contains(Self::RIGHT) && distance_x > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Edges;

    #[test]
    fn narrow_content_always_yields() {
        let edges = Edges::LEFT | Edges::RIGHT;
        assert!(edges.yields_horizontal_drag(5.0));
        assert!(edges.yields_horizontal_drag(-5.0));
        assert!(edges.yields_horizontal_drag(0.0));
    }

    #[test]
    fn flush_left_yields_only_when_dragging_right() {
        let edges = Edges::LEFT;
        assert!(edges.yields_horizontal_drag(-3.0));
        assert!(!edges.yields_horizontal_drag(3.0));
    }

    #[test]
    fn flush_right_yields_only_when_dragging_left() {
        let edges = Edges::RIGHT | Edges::TOP;
        assert!(edges.yields_horizontal_drag(3.0));
        assert!(!edges.yields_horizontal_drag(-3.0));
    }

    #[test]
    fn vertical_edges_do_not_yield() {
        let edges = Edges::TOP | Edges::BOTTOM;
        assert!(!edges.yields_horizontal_drag(3.0));
        assert!(!edges.yields_horizontal_drag(-3.0));
    }
}
