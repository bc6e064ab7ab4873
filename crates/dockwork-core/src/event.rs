#![forbid(unsafe_code)]

//! Canonical pointer input.
//!
//! The host toolkit translates its native mouse events into [`PointerEvent`]
//! values in managed-window pixel coordinates before handing them to the
//! dock manager.
//!
//! # Design Notes
//!
//! - Coordinates are relative to the managed window's client origin and may
//!   be negative or exceed the client size while a drag holds capture.
//! - `CaptureLost` is delivered when the host loses pointer capture (window
//!   deactivation, modal dialog); it cancels any drag in progress.

use bitflags::bitflags;

use crate::geometry::Point;

bitflags! {
    /// Modifier keys held during a pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary (usually left) button.
    Primary,
    /// Secondary (usually right) button.
    Secondary,
    /// Middle button.
    Middle,
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Button pressed.
    Down(PointerButton),
    /// Button released.
    Up(PointerButton),
    /// Pointer moved, with or without a button held.
    Move,
    /// Pointer left the managed window.
    Leave,
    /// The host lost pointer capture.
    CaptureLost,
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,
    /// Pointer position in managed-window pixels.
    pub position: Point,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    /// Primary button press at `(x, y)`.
    #[must_use]
    pub const fn down(x: i32, y: i32) -> Self {
        Self::new(PointerEventKind::Down(PointerButton::Primary), x, y)
    }

    /// Primary button release at `(x, y)`.
    #[must_use]
    pub const fn up(x: i32, y: i32) -> Self {
        Self::new(PointerEventKind::Up(PointerButton::Primary), x, y)
    }

    /// Motion to `(x, y)`.
    #[must_use]
    pub const fn moved(x: i32, y: i32) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    /// Capture loss. Position is irrelevant.
    #[must_use]
    pub const fn capture_lost() -> Self {
        Self::new(PointerEventKind::CaptureLost, 0, 0)
    }

    /// Pointer left the managed window.
    #[must_use]
    pub const fn leave() -> Self {
        Self::new(PointerEventKind::Leave, 0, 0)
    }

    /// Create a pointer event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// True for a press or release of the primary button.
    #[must_use]
    pub const fn is_primary(&self) -> bool {
        matches!(
            self.kind,
            PointerEventKind::Down(PointerButton::Primary)
                | PointerEventKind::Up(PointerButton::Primary)
        )
    }
}
