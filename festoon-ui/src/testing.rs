//! Headless test doubles for the embedder-provided capabilities.
//!
//! Only compiled with the `testing` feature; consumed by the widget crates'
//! dev-dependencies and by the example binary.

use std::collections::HashMap;
use std::sync::Arc;

use festoon_foundation::{Px, PxPosition};
use parking_lot::Mutex;

use crate::element::{Element, ElementError, ElementRect, ElementSource};

/// An in-memory [`Element`] with a settable rectangle.
///
/// `set_rect` simulates layout changes; every offset written through
/// [`Element::set_offset`] is also recorded for assertions.
#[derive(Default)]
pub struct MockElement {
    rect: Mutex<ElementRect>,
    offset: Mutex<PxPosition>,
    offset_log: Mutex<Vec<PxPosition>>,
}

impl MockElement {
    /// Creates an element with a zero rectangle.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Creates an element with the given geometry.
    pub fn with_rect(left: i32, top: i32, width: i32, height: i32) -> Arc<Self> {
        let element = Self::default();
        *element.rect.lock() = ElementRect::new(Px(left), Px(top), Px(width), Px(height));
        Arc::new(element)
    }

    /// Replaces the element's rectangle, simulating a layout change.
    pub fn set_rect(&self, left: i32, top: i32, width: i32, height: i32) {
        *self.rect.lock() = ElementRect::new(Px(left), Px(top), Px(width), Px(height));
    }

    /// Every offset applied so far, oldest first.
    pub fn offset_log(&self) -> Vec<PxPosition> {
        self.offset_log.lock().clone()
    }
}

impl Element for MockElement {
    fn rect(&self) -> ElementRect {
        *self.rect.lock()
    }

    fn set_offset(&self, offset: PxPosition) {
        *self.offset.lock() = offset;
        self.offset_log.lock().push(offset);
    }

    fn offset(&self) -> PxPosition {
        *self.offset.lock()
    }
}

/// An [`ElementSource`] backed by a key → element map.
#[derive(Default)]
pub struct MockSource {
    elements: HashMap<String, Arc<dyn Element>>,
}

impl MockSource {
    /// Creates an empty source; every lookup fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `element` under `key`.
    pub fn insert(&mut self, key: impl Into<String>, element: Arc<dyn Element>) {
        self.elements.insert(key.into(), element);
    }
}

impl ElementSource for MockSource {
    fn find(&self, key: &str) -> Result<Arc<dyn Element>, ElementError> {
        self.elements
            .get(key)
            .cloned()
            .ok_or_else(|| ElementError::NotFound(key.to_string()))
    }
}
