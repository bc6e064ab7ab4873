#![forbid(unsafe_code)]

//! Core: geometry, pointer events, and logging shims.
//!
//! # Role in dockwork
//! `dockwork-core` is the vocabulary layer. It owns the pixel geometry types
//! the layout engine computes with and the normalized pointer events the
//! interaction controller consumes. It has no knowledge of panes or docks.
//!
//! # Primary responsibilities
//! - **Geometry**: `Point`, `Size`, `Rect`, `Sides` in managed-window pixels.
//! - **PointerEvent**: canonical pointer input (down, up, move, leave,
//!   capture loss) delivered by the host toolkit.
//! - **Logging**: `tracing` macros when the `tracing` feature is enabled,
//!   zero-cost shims otherwise.

pub mod event;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, info_span, trace, warn};
