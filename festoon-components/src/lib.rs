//! Presentation widgets for paginated, swipeable content.
//!
//! The crate provides four building blocks, composed rather than inherited:
//!
//! - [`drag::DragEngine`]: maps a handle's pixel position inside a bounded
//!   wrapper to a normalized ratio, with stepping, elastic overscroll and
//!   release momentum.
//! - [`navigation::Navigation`]: N buttons, one active index, pointer
//!   callbacks.
//! - [`slide_navigator::SlideNavigator`]: a swipeable button strip built
//!   from the two above.
//! - [`pagination::Pagination`]: the responsive controller that owns one
//!   navigator at a time and swaps implementations on viewport breakpoint
//!   crossings.
//!
//! Everything is host-agnostic: widgets receive `Element` handles and a
//! `Ticker` from the embedder (see `festoon-ui`) and never touch a renderer
//! themselves.

#![deny(missing_docs, clippy::unwrap_used)]

pub mod breakpoint;
pub mod drag;
pub mod navigation;
pub mod paged_navigator;
pub mod pagination;
pub mod slide_navigator;

pub use breakpoint::{Breakpoints, NavigatorKind, ViewportClass};
pub use drag::{Bounds, DragEngine, DragEngineArgs, DragState};
pub use navigation::{
    ActivateEvent, ClickEvent, HoverEvent, NONE_INDEX, Navigation, NavigationArgs,
};
pub use paged_navigator::{EdgeIndices, PagedNavigator, PagedNavigatorArgs};
pub use pagination::{Direction, PageEvent, Pagination, PaginationArgs};
pub use slide_navigator::{SlideNavigator, SlideNavigatorArgs};
