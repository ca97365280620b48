// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::{BlendMode, Color};

use crate::canvas::{CanvasOp, MaskCanvas};
use crate::shape::HoleShape;

/// Operation recorded by [`RecordingCanvas`] with the layer depth it ran at.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// Operation that was applied.
    pub op: CanvasOp,
    /// Layer stack depth after applying the operation.
    pub depth: usize,
}

/// Canvas that records operations instead of drawing.
///
/// It does **not** rasterize; it is meant for tests and debugging that want to
/// assert on emitted operations and the layer depth at which each ran.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    events: Vec<Event>,
    blend_stack: Vec<BlendMode>,
}

impl RecordingCanvas {
    /// Creates an empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events in order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns the recorded operations in order.
    pub fn ops(&self) -> impl Iterator<Item = &CanvasOp> + '_ {
        self.events.iter().map(|e| &e.op)
    }

    /// Current layer stack depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.blend_stack.len()
    }

    /// Blend mode of the innermost open layer, if any.
    #[must_use]
    pub fn top_blend(&self) -> Option<BlendMode> {
        self.blend_stack.last().copied()
    }

    /// Returns `true` when every pushed layer has been popped.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.blend_stack.is_empty()
    }

    /// Replays the recording onto another canvas.
    pub fn replay(&self, canvas: &mut (impl MaskCanvas + ?Sized)) {
        for op in self.ops() {
            op.apply(canvas);
        }
    }

    /// Clears recorded events and the layer stack.
    pub fn clear(&mut self) {
        self.events.clear();
        self.blend_stack.clear();
    }

    fn record(&mut self, op: CanvasOp) {
        self.events.push(Event {
            op,
            depth: self.blend_stack.len(),
        });
    }
}

impl MaskCanvas for RecordingCanvas {
    fn push_layer(&mut self, blend: BlendMode) {
        self.blend_stack.push(blend);
        self.record(CanvasOp::PushLayer { blend });
    }

    fn pop_layer(&mut self) {
        self.blend_stack.pop();
        self.record(CanvasOp::PopLayer);
    }

    fn fill_all(&mut self, color: Color) {
        self.record(CanvasOp::FillAll { color });
    }

    fn fill(&mut self, shape: &HoleShape, color: Color) {
        self.record(CanvasOp::Fill {
            shape: *shape,
            color,
        });
    }

    fn stroke(&mut self, shape: &HoleShape, width: f64, color: Color) {
        self.record(CanvasOp::Stroke {
            shape: *shape,
            width,
            color,
        });
    }
}
