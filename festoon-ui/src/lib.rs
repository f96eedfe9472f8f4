//! Runtime substrate for the festoon widget crates.
//!
//! The widgets in `festoon-components` are host-agnostic: they do not own a
//! renderer or an event loop. This crate defines the seams between a widget
//! and its embedder:
//!
//! - [`Element`]: a positioned box the embedder exposes to widgets
//!   (bounding rectangle plus a mutable translation offset).
//! - [`CursorEvent`]: pointer input forwarded by the embedder.
//! - [`Ticker`]: the per-frame animation callback source, either synced to
//!   the display refresh or a fixed-interval fallback.
//! - [`animate`]: a fire-and-forget offset transition with easing, used
//!   where a widget wants a one-shot slide rather than a tracked target.
//! - [`Callback`] / [`CallbackWith`]: identity-compared handler slots for
//!   widget args structs.

#![deny(missing_docs, clippy::unwrap_used)]

pub mod animation;
pub mod callback;
pub mod cursor;
pub mod debounce;
pub mod element;
pub mod ticker;

#[cfg(feature = "testing")]
pub mod testing;

pub use animation::{Easing, TransitionHandle, animate};
pub use callback::{Callback, CallbackWith};
pub use cursor::{CursorEvent, CursorEventContent, CursorTracker};
pub use debounce::ResizeDebouncer;
pub use element::{Element, ElementError, ElementRect, ElementSource};
pub use festoon_foundation::{Dp, Px, PxPosition, PxSize};
pub use ticker::{FrameSyncedTicker, IntervalTicker, TickControl, TickFn, TickSubscription, Ticker};
