// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer events in, gesture events out.
//!
//! [`GestureRecognizer`] composes the drag, tap, pinch and velocity trackers
//! into one state machine: idle, then either a pinch or a drag, then idle
//! again. A pinch suppresses scrolling and flinging for the rest of that
//! gesture.

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::config::GestureConfig;
use crate::drag::DragState;
use crate::scale::{ScaleEvent, ScaleState, focus_of};
use crate::tap::{TapEvent, TapState};
use crate::velocity::VelocityTracker;

/// Kind of pointer transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// A pointer touched down.
    Down,
    /// A pointer moved.
    Move,
    /// A pointer lifted.
    Up,
    /// The host took the pointer stream away; all pointers are gone.
    Cancel,
}

/// One pointer transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerKind,
    /// Stable id of the pointer for the duration of its contact.
    pub pointer_id: u64,
    /// Position in view coordinates.
    pub position: Point,
    /// Timestamp in milliseconds.
    pub time_ms: u64,
}

impl PointerEvent {
    /// Creates a pointer event.
    #[must_use]
    pub fn new(kind: PointerKind, pointer_id: u64, position: Point, time_ms: u64) -> Self {
        Self {
            kind,
            pointer_id,
            position,
            time_ms,
        }
    }
}

/// Recognized gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// A pinch started.
    ScaleBegin {
        /// Focus at the start of the pinch.
        focus: Point,
    },
    /// The pinch span changed.
    Scale {
        /// Span relative to the span at [`GestureEvent::ScaleBegin`].
        factor: f64,
        /// Current focus.
        focus: Point,
    },
    /// The pinch ended.
    ScaleEnd,
    /// A tap that was not followed by a second one.
    SingleTapConfirmed {
        /// Press position.
        position: Point,
    },
    /// Second press of a double tap.
    DoubleTap {
        /// First press position.
        position: Point,
    },
    /// The focus moved; `distance` is `last - current`.
    Scroll {
        /// Movement since the previous scroll, with the content-scroll sign.
        distance: Vec2,
    },
    /// Released while moving fast enough.
    Fling {
        /// Release velocity in px/s, each axis clamped to the maximum.
        velocity: Vec2,
    },
}

impl From<ScaleEvent> for GestureEvent {
    fn from(event: ScaleEvent) -> Self {
        match event {
            ScaleEvent::Begin { focus } => Self::ScaleBegin { focus },
            ScaleEvent::Update { factor, focus } => Self::Scale { factor, focus },
            ScaleEvent::End => Self::ScaleEnd,
        }
    }
}

impl From<TapEvent> for GestureEvent {
    fn from(event: TapEvent) -> Self {
        match event {
            TapEvent::SingleTapConfirmed(position) => Self::SingleTapConfirmed { position },
            TapEvent::DoubleTap(position) => Self::DoubleTap { position },
        }
    }
}

/// Events produced by one pointer transition.
pub type GestureEvents = SmallVec<[GestureEvent; 4]>;

/// Multi-pointer gesture recognizer.
#[derive(Clone, Debug)]
pub struct GestureRecognizer {
    config: GestureConfig,
    pointers: SmallVec<[(u64, Point); 4]>,
    drag: DragState,
    tap: TapState,
    scale: ScaleState,
    velocity: VelocityTracker,
    pinched: bool,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureRecognizer {
    /// Creates an idle recognizer.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            drag: DragState::new(config.touch_slop),
            tap: TapState::new(&config),
            scale: ScaleState::new(&config),
            velocity: VelocityTracker::new(config.velocity_window_ms),
            pointers: SmallVec::new(),
            pinched: false,
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Number of pointers currently down.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Returns `true` while a pinch is in progress.
    #[must_use]
    pub fn is_scaling(&self) -> bool {
        self.scale.in_progress()
    }

    /// Feeds one pointer transition.
    pub fn on_pointer(&mut self, event: &PointerEvent) -> GestureEvents {
        match event.kind {
            PointerKind::Down => self.on_down(event),
            PointerKind::Move => self.on_move(event),
            PointerKind::Up => self.on_up(event),
            PointerKind::Cancel => self.cancel(),
        }
    }

    /// Delivers time-based events (single-tap confirmation) due at `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> Option<GestureEvent> {
        self.tap.poll(now_ms).map(GestureEvent::from)
    }

    /// Next time at which [`GestureRecognizer::poll`] may produce an event.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.tap.next_deadline()
    }

    /// Drops all pointers, ending any pinch.
    pub fn cancel(&mut self) -> GestureEvents {
        let mut out = GestureEvents::new();
        out.extend(self.scale.cancel().map(GestureEvent::from));
        self.pointers.clear();
        self.tap.cancel();
        self.drag.end();
        self.velocity.clear();
        self.pinched = false;
        out
    }

    fn positions(&self) -> SmallVec<[Point; 4]> {
        self.pointers.iter().map(|(_, p)| *p).collect()
    }

    fn on_down(&mut self, event: &PointerEvent) -> GestureEvents {
        let mut out = GestureEvents::new();
        match self.pointers.iter_mut().find(|(id, _)| *id == event.pointer_id) {
            Some(slot) => slot.1 = event.position,
            None => self.pointers.push((event.pointer_id, event.position)),
        }
        let positions = self.positions();
        let focus = focus_of(&positions);
        self.velocity.clear();
        self.velocity.add(event.time_ms, focus);

        if positions.len() == 1 {
            self.pinched = false;
            self.drag.start(focus);
            out.extend(self.tap.on_down(event.position, event.time_ms).map(GestureEvent::from));
        } else {
            self.tap.cancel();
            self.drag.reanchor(focus);
            out.extend(self.scale.configure(&positions).into_iter().map(GestureEvent::from));
        }
        out
    }

    fn on_move(&mut self, event: &PointerEvent) -> GestureEvents {
        let mut out = GestureEvents::new();
        let Some(slot) = self
            .pointers
            .iter_mut()
            .find(|(id, _)| *id == event.pointer_id)
        else {
            return out;
        };
        slot.1 = event.position;
        let positions = self.positions();
        let focus = focus_of(&positions);
        self.velocity.add(event.time_ms, focus);

        if let Some(scale_event) = self.scale.on_move(&positions) {
            if matches!(scale_event, ScaleEvent::Begin { .. }) {
                self.pinched = true;
                log::trace!("pinch began at {focus:?}");
            }
            out.push(scale_event.into());
        }
        if self.scale.in_progress() || self.pinched {
            self.drag.reanchor(focus);
            return out;
        }

        if positions.len() == 1 {
            self.tap.on_move(event.position);
        }
        if self.tap.is_double_tapping() {
            return out;
        }
        if let Some(distance) = self.drag.update(focus) {
            self.tap.cancel();
            out.push(GestureEvent::Scroll { distance });
        }
        out
    }

    fn on_up(&mut self, event: &PointerEvent) -> GestureEvents {
        let mut out = GestureEvents::new();
        let Some(index) = self
            .pointers
            .iter()
            .position(|(id, _)| *id == event.pointer_id)
        else {
            return out;
        };
        self.pointers.remove(index);
        let positions = self.positions();
        out.extend(self.scale.configure(&positions).into_iter().map(GestureEvent::from));

        if !positions.is_empty() {
            self.drag.reanchor(focus_of(&positions));
            self.velocity.clear();
            return out;
        }

        let double_tapping = self.tap.is_double_tapping();
        out.extend(self.tap.on_up(event.time_ms).map(GestureEvent::from));
        if self.drag.is_scrolling() && !self.pinched && !double_tapping {
            self.velocity.add(event.time_ms, event.position);
            let velocity = self.velocity.clamped_velocity(self.config.max_fling_velocity);
            let min = self.config.min_fling_velocity;
            if velocity.x.abs() > min || velocity.y.abs() > min {
                log::trace!("fling at {velocity:?}");
                out.push(GestureEvent::Fling { velocity });
            }
        }
        self.drag.end();
        self.velocity.clear();
        self.pinched = false;
        out
    }
}
