#![forbid(unsafe_code)]

//! Dock layout, drop resolution, and docking interaction.
//!
//! # Role in dockwork
//! `dockwork-layout` arranges the panes of one managed window into nested
//! docks around a center area. It never touches real windows: hosts report
//! pointer input and the client size, and receive pane rectangles, floating
//! frame requests, notifications, and paint calls in return.
//!
//! # Primary responsibilities
//! - **Panes**: `PaneInfo` records with placement, sizing, flags, and
//!   caption buttons.
//! - **Layout**: a pure pass from panes to docks, a sizer tree, and hit-test
//!   parts (`LayoutEngine`).
//! - **Drops**: where a dragged pane would land and what the pane array
//!   looks like afterwards (`DropResolver`).
//! - **Interaction**: the sash, caption, toolbar, and button state machine
//!   (`InteractionController`).
//! - **Perspectives**: the `layout2` text encoding of a whole layout.
//! - **Manager**: `DockManager` ties the above to host boundaries
//!   (`DockArt`, `FloatingHost`, `NotificationSink`).
//!
//! # Example
//! ```
//! use dockwork_core::geometry::Size;
//! use dockwork_layout::{DockManager, PaneInfo, WindowId};
//!
//! let mut manager = DockManager::default();
//! manager.set_managed_size(Size::new(800, 600));
//! manager.add_pane(WindowId::new(1), PaneInfo::new().name("files").left());
//! manager.add_pane(WindowId::new(2), PaneInfo::new().name("editor").center_pane());
//! manager.update();
//!
//! let editor = manager.pane("editor").unwrap();
//! assert!(editor.rect.width > 0);
//! ```

pub mod art;
pub mod config;
pub mod dock;
pub mod drop;
pub mod engine;
pub mod floating;
pub mod interaction;
pub mod manager;
pub mod notify;
pub mod pane;
pub mod part;
pub mod perspective;
pub mod registry;
pub mod resize;
pub mod sizer;

pub use dockwork_core::geometry::{Point, Rect, Sides, Size};

pub use art::{ArtColor, ArtMetric, ArtMetrics, Canvas, DefaultDockArt, DockArt, Rgba};
pub use config::{ConfigError, DropZoneTuning, ManagerConfig};
pub use dock::{DockInfo, DockKey, DockSizeMemo};
pub use drop::{DropPlan, DropRequest, DropResolver, DropTarget, InsertLevel};
pub use engine::{LayoutEngine, LayoutInput, LayoutOutput};
pub use floating::{FloatingHost, NullFloatingHost};
pub use interaction::{
    InteractionController, InteractionEffect, InteractionState, InteractionTransition, SashTarget,
};
pub use manager::DockManager;
pub use notify::{ManagerEvent, NotificationResult, NotificationSink};
pub use pane::{
    ButtonKind, DockDirection, FloatingFrameId, PaneButton, PaneFlags, PaneIndex, PaneInfo,
    Placement, WindowId,
};
pub use part::{UiPart, UiPartIndex, UiPartKind};
pub use perspective::{PerspectiveError, load_perspective, save_perspective};
pub use registry::{ManagerRegistry, RegistryError};
