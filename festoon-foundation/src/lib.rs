//! Foundation value types for the festoon widget crates.
//!
//! Two length units are used throughout the workspace:
//!
//! - [`Px`]: a physical pixel coordinate. Supports negative values so that
//!   scrolled/overscrolled offsets can be represented directly.
//! - [`Dp`]: a density-independent length, converted through a process-wide
//!   scale factor configured once at startup.

#![deny(missing_docs, clippy::unwrap_used)]

pub mod dp;
pub mod px;

pub use dp::Dp;
pub use px::{Px, PxPosition, PxSize};
