//! Pointer input events.
//!
//! Mouse and touch input are normalized into a single [`PointerEvent`] before
//! reaching any widget, so a drag is handled by one code path whatever device
//! produced it. A touch keeps its platform id as [`PointerId::Touch`]; the
//! mouse is a single pointer.

use std::time::Instant;

use gift_intake_core::Point;

/// Identifies the pointer that produced an event.
///
/// A drag only follows events from the pointer that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerId {
    /// The mouse cursor.
    Mouse,
    /// A touch contact, identified by its platform touch id.
    Touch(u64),
}

impl PointerId {
    /// Whether this pointer is a touch contact.
    pub fn is_touch(self) -> bool {
        matches!(self, Self::Touch(_))
    }
}

/// The phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Mouse button pressed or touch started.
    Down,
    /// Pointer moved.
    Move,
    /// Mouse button released or touch ended.
    Up,
    /// The platform cancelled the pointer (e.g. a touch taken over by the system).
    Cancel,
}

impl PointerPhase {
    /// Up or Cancel: the pointer's gesture is over.
    pub fn is_end(self) -> bool {
        matches!(self, Self::Up | Self::Cancel)
    }
}

/// A device-independent pointer event in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer: PointerId,
    pub phase: PointerPhase,
    pub position: Point,
    pub timestamp: Instant,
}

impl PointerEvent {
    /// Create a new pointer event.
    pub fn new(pointer: PointerId, phase: PointerPhase, position: Point, timestamp: Instant) -> Self {
        Self {
            pointer,
            phase,
            position,
            timestamp,
        }
    }

    /// A mouse event at `position`.
    pub fn mouse(phase: PointerPhase, position: impl Into<Point>, timestamp: Instant) -> Self {
        Self::new(PointerId::Mouse, phase, position.into(), timestamp)
    }

    /// A touch event for touch `id` at `position`.
    pub fn touch(id: u64, phase: PointerPhase, position: impl Into<Point>, timestamp: Instant) -> Self {
        Self::new(PointerId::Touch(id), phase, position.into(), timestamp)
    }

    /// The same event with a different phase.
    pub fn with_phase(mut self, phase: PointerPhase) -> Self {
        self.phase = phase;
        self
    }
}

/// Phase of a touch point, as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

impl From<TouchPhase> for PointerPhase {
    fn from(phase: TouchPhase) -> Self {
        match phase {
            TouchPhase::Started => PointerPhase::Down,
            TouchPhase::Moved => PointerPhase::Move,
            TouchPhase::Ended => PointerPhase::Up,
            TouchPhase::Cancelled => PointerPhase::Cancel,
        }
    }
}

/// A single platform touch contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Point,
    pub phase: TouchPhase,
}

impl TouchPoint {
    pub fn new(id: u64, position: impl Into<Point>, phase: TouchPhase) -> Self {
        Self {
            id,
            position: position.into(),
            phase,
        }
    }

    /// Normalize into a pointer event stamped with `timestamp`.
    pub fn to_pointer_event(self, timestamp: Instant) -> PointerEvent {
        PointerEvent::new(
            PointerId::Touch(self.id),
            self.phase.into(),
            self.position,
            timestamp,
        )
    }
}
