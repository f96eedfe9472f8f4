//! Cursor event model and position tracking.
//!
//! The embedder translates whatever input it receives (mouse, touch, synthetic
//! events in tests) into [`CursorEvent`]s and forwards them to widgets. The
//! widgets treat mouse and touch identically; only the primary button/finger
//! is modeled.

use std::time::Instant;

use festoon_foundation::PxPosition;
use smallvec::SmallVec;

use crate::element::ElementRect;

/// What happened in a cursor event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorEventContent {
    /// The primary button (or first touch point) went down.
    Pressed,
    /// The primary button (or last touch point) was released.
    Released,
    /// The pointer moved.
    Moved,
}

/// A single pointer event in viewport coordinates.
#[derive(Debug, Clone, Copy)]
pub struct CursorEvent {
    /// When the event occurred.
    pub timestamp: Instant,
    /// Pointer position at the time of the event.
    pub position: PxPosition,
    /// The kind of event.
    pub content: CursorEventContent,
}

impl CursorEvent {
    /// Creates a new event.
    pub fn new(timestamp: Instant, position: PxPosition, content: CursorEventContent) -> Self {
        Self {
            timestamp,
            position,
            content,
        }
    }
}

/// A small batch of cursor events delivered in one dispatch round.
pub type CursorEvents = SmallVec<[CursorEvent; 4]>;

/// Remembers the latest pointer position and button state.
///
/// Widgets that need "where is the pointer right now" (tap-to-position,
/// hover hit tests) consult a tracker instead of threading positions through
/// every call site.
#[derive(Debug, Default, Clone)]
pub struct CursorTracker {
    position: Option<PxPosition>,
    pressed: bool,
}

impl CursorTracker {
    /// Creates a tracker with no recorded position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one event into the tracker.
    pub fn observe(&mut self, event: &CursorEvent) {
        self.position = Some(event.position);
        match event.content {
            CursorEventContent::Pressed => self.pressed = true,
            CursorEventContent::Released => self.pressed = false,
            CursorEventContent::Moved => {}
        }
    }

    /// The most recent pointer position, if any event has been seen.
    pub fn position(&self) -> Option<PxPosition> {
        self.position
    }

    /// Whether the primary button is currently down.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Whether the pointer is currently inside `rect`.
    pub fn is_inside(&self, rect: ElementRect) -> bool {
        self.position.map(|pos| rect.contains(pos)).unwrap_or(false)
    }
}
