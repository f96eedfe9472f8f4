//! Element handles: the capability surface widgets manipulate.
//!
//! A widget never owns layout or rendering; it holds [`Element`] handles
//! provided by the embedder and reads bounding boxes or writes translation
//! offsets through them. Lookup failures are expected (a page may simply not
//! contain the widget's markup) and must degrade gracefully, so
//! [`ElementSource::find`] returns a [`Result`] instead of panicking.

use std::sync::Arc;

use festoon_foundation::{Px, PxPosition};
use thiserror::Error;

/// A bounding rectangle in physical pixels, as reported by the embedder.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ElementRect {
    /// Left edge of the box.
    pub left: Px,
    /// Top edge of the box.
    pub top: Px,
    /// Width of the box.
    pub width: Px,
    /// Height of the box.
    pub height: Px,
}

impl ElementRect {
    /// Creates a rectangle from edges and extents.
    pub const fn new(left: Px, top: Px, width: Px, height: Px) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Returns whether `pos` lies inside this rectangle.
    ///
    /// The left/top edges are inclusive, the right/bottom edges exclusive,
    /// matching hit-testing of adjacent boxes without double counting.
    pub fn contains(&self, pos: PxPosition) -> bool {
        pos.x >= self.left
            && pos.x < self.left + self.width
            && pos.y >= self.top
            && pos.y < self.top + self.height
    }
}

/// A positioned box the embedder exposes to widgets.
///
/// `rect` is live: it reflects the element's current layout every time it is
/// called. `set_offset` mutates the element's translation (the transform
/// analog); the translation is not included in `rect`.
pub trait Element: Send + Sync {
    /// The element's current bounding rectangle.
    fn rect(&self) -> ElementRect;

    /// Replaces the element's translation offset.
    fn set_offset(&self, offset: PxPosition);

    /// The last translation offset applied via [`set_offset`](Self::set_offset).
    fn offset(&self) -> PxPosition;
}

/// Errors produced while resolving elements from an embedder.
#[derive(Debug, Error)]
pub enum ElementError {
    /// No element matched the requested key.
    #[error("element not found: {0}")]
    NotFound(String),
}

/// Resolves element keys (selectors) to live handles.
pub trait ElementSource {
    /// Looks up the element identified by `key`.
    fn find(&self, key: &str) -> Result<Arc<dyn Element>, ElementError>;
}
