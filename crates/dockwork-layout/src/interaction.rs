//! Pointer interaction state machine.
//!
//! The controller turns raw pointer events, hit-tested against the parts of
//! the last layout pass, into transitions with one effect each. It owns no
//! layout state; the manager applies the effects (relayout on a committed
//! sash, drop resolution while dragging, button notifications).
//!
//! ```text
//! Idle -> Resizing ----------------------> Idle   (up: commit)
//! Idle -> DraggingCaption (armed) -> (dragging) -> Idle
//! Idle -> DraggingToolbar (armed) -> (dragging) -> Idle
//! Idle -> PressingButton -----------------> Idle  (up: fire if still over it)
//! any  -> Idle                                    (capture lost)
//! ```

use std::fmt;

use dockwork_core::event::{PointerButton, PointerEvent, PointerEventKind};
use dockwork_core::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::dock::{DockInfo, DockKey};
use crate::pane::{ButtonIndex, ButtonKind, PaneIndex, PaneInfo};
use crate::part::{UiPart, UiPartIndex, UiPartKind};
use crate::sizer::Orientation;

/// Which sash a resize drags.
///
/// Keyed by dock identity rather than by index so the target survives the
/// relayouts of a live resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "sash", rename_all = "snake_case")]
pub enum SashTarget {
    /// The sash between a dock and the center.
    Dock { dock: DockKey },
    /// The sash after `pane` inside a proportional dock.
    Pane { dock: DockKey, pane: PaneIndex },
}

impl SashTarget {
    #[must_use]
    pub const fn dock(&self) -> DockKey {
        match self {
            Self::Dock { dock } | Self::Pane { dock, .. } => *dock,
        }
    }
}

/// Interaction lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InteractionState {
    Idle,
    Resizing {
        sash: SashTarget,
        /// Sash rectangle when the press happened.
        sash_rect: Rect,
        orientation: Orientation,
        /// Pointer offset inside the sash.
        grab: Point,
        current: Point,
    },
    DraggingCaption {
        pane: PaneIndex,
        origin: Point,
        current: Point,
        /// Pointer offset inside the pane's caption.
        offset: Point,
        dragging: bool,
    },
    DraggingToolbar {
        pane: PaneIndex,
        origin: Point,
        current: Point,
        offset: Point,
        dragging: bool,
    },
    PressingButton {
        pane: PaneIndex,
        button: ButtonIndex,
    },
}

/// Why an event changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionNoopReason {
    IdleWithoutAction,
    NothingHit,
    FixedSash,
    ActionAlreadyInProgress,
    SecondaryButton,
    ThresholdNotReached,
    PointerUnchanged,
    ButtonHeld,
    ReleasedOutsideButton,
    HoverUnchanged,
}

/// Why an interaction ended without committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionCancelReason {
    CaptureLost,
    Programmatic,
}

/// Effect of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum InteractionEffect {
    ResizeStarted {
        sash: SashTarget,
        grab: Point,
    },
    /// The sash follows the pointer; `hint` is where it would land.
    ResizeUpdated {
        sash: SashTarget,
        pointer: Point,
        grab: Point,
        hint: Rect,
    },
    ResizeCommitted {
        sash: SashTarget,
        sash_rect: Rect,
        pointer: Point,
        grab: Point,
    },
    DragArmed {
        pane: PaneIndex,
        origin: Point,
        offset: Point,
    },
    DragStarted {
        pane: PaneIndex,
        pointer: Point,
        offset: Point,
        toolbar: bool,
    },
    DragUpdated {
        pane: PaneIndex,
        pointer: Point,
        offset: Point,
        toolbar: bool,
    },
    DragCommitted {
        pane: PaneIndex,
        pointer: Point,
        offset: Point,
        toolbar: bool,
    },
    /// A caption was clicked without dragging.
    CaptionClicked {
        pane: PaneIndex,
    },
    ButtonPressed {
        pane: PaneIndex,
        button: ButtonIndex,
    },
    /// Pressed and released over the same button.
    ButtonFired {
        pane: PaneIndex,
        button: ButtonIndex,
        kind: ButtonKind,
    },
    HoverChanged {
        hover: Option<(PaneIndex, ButtonIndex)>,
    },
    Canceled {
        state: InteractionState,
        reason: InteractionCancelReason,
    },
    Noop {
        reason: InteractionNoopReason,
    },
}

/// One controller step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionTransition {
    pub transition_id: u64,
    pub from: InteractionState,
    pub to: InteractionState,
    pub effect: InteractionEffect,
}

/// What the controller may look at: the arrays of the last layout pass.
#[derive(Debug, Clone, Copy)]
pub struct InteractionView<'a> {
    pub panes: &'a [PaneInfo],
    pub docks: &'a [DockInfo],
    pub parts: &'a UiPartIndex,
}

impl<'a> InteractionView<'a> {
    #[must_use]
    pub const fn new(panes: &'a [PaneInfo], docks: &'a [DockInfo], parts: &'a UiPartIndex) -> Self {
        Self {
            panes,
            docks,
            parts,
        }
    }

    fn hit(&self, point: Point) -> Option<&'a UiPart> {
        self.parts.hit_test(point).and_then(|index| self.parts.get(index))
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionError {
    InvalidDragThreshold { threshold: i32 },
}

impl fmt::Display for InteractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDragThreshold { threshold } => {
                write!(f, "drag threshold must be >= 0 (got {threshold})")
            }
        }
    }
}

impl std::error::Error for InteractionError {}

/// Pointer interaction controller for one managed window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionController {
    state: InteractionState,
    drag_threshold: i32,
    hover: Option<(PaneIndex, ButtonIndex)>,
    transition_counter: u64,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self {
            state: InteractionState::Idle,
            drag_threshold: crate::config::DEFAULT_DRAG_THRESHOLD,
            hover: None,
            transition_counter: 0,
        }
    }
}

impl InteractionController {
    pub fn new(drag_threshold: i32) -> Result<Self, InteractionError> {
        if drag_threshold < 0 {
            return Err(InteractionError::InvalidDragThreshold {
                threshold: drag_threshold,
            });
        }
        Ok(Self {
            drag_threshold,
            ..Self::default()
        })
    }

    #[must_use]
    pub const fn state(&self) -> InteractionState {
        self.state
    }

    #[must_use]
    pub const fn drag_threshold(&self) -> i32 {
        self.drag_threshold
    }

    /// The caption button under the pointer, if any.
    #[must_use]
    pub const fn hover_button(&self) -> Option<(PaneIndex, ButtonIndex)> {
        self.hover
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.state, InteractionState::Idle)
    }

    /// Pane being dragged past the threshold, if any.
    #[must_use]
    pub const fn dragged_pane(&self) -> Option<PaneIndex> {
        match self.state {
            InteractionState::DraggingCaption {
                pane,
                dragging: true,
                ..
            }
            | InteractionState::DraggingToolbar {
                pane,
                dragging: true,
                ..
            } => Some(pane),
            _ => None,
        }
    }

    /// Return to idle, reporting the interrupted interaction.
    pub fn force_cancel(&mut self) -> Option<InteractionTransition> {
        if !self.is_active() {
            return None;
        }
        let from = self.state;
        Some(self.transition(
            from,
            InteractionState::Idle,
            InteractionEffect::Canceled {
                state: from,
                reason: InteractionCancelReason::Programmatic,
            },
        ))
    }

    /// Start dragging `pane` programmatically, already past the threshold.
    ///
    /// Used when a floating frame starts moving and the host hands the drag
    /// over to the manager.
    pub fn begin_pane_drag(
        &mut self,
        pane: PaneIndex,
        pointer: Point,
        offset: Point,
        toolbar: bool,
    ) -> InteractionTransition {
        let from = self.state;
        let to = if toolbar {
            InteractionState::DraggingToolbar {
                pane,
                origin: pointer,
                current: pointer,
                offset,
                dragging: true,
            }
        } else {
            InteractionState::DraggingCaption {
                pane,
                origin: pointer,
                current: pointer,
                offset,
                dragging: true,
            }
        };
        self.transition(
            from,
            to,
            InteractionEffect::DragStarted {
                pane,
                pointer,
                offset,
                toolbar,
            },
        )
    }

    /// Apply one pointer event.
    pub fn handle(&mut self, event: &PointerEvent, view: &InteractionView<'_>) -> InteractionTransition {
        let from = self.state;
        let point = event.position;
        let (to, effect) = match event.kind {
            PointerEventKind::Down(PointerButton::Primary) => match from {
                InteractionState::Idle => self.press(point, view),
                _ => (from, noop(InteractionNoopReason::ActionAlreadyInProgress)),
            },
            PointerEventKind::Up(PointerButton::Primary) => self.release(from, point, view),
            PointerEventKind::Down(_) | PointerEventKind::Up(_) => {
                (from, noop(InteractionNoopReason::SecondaryButton))
            }
            PointerEventKind::Move => self.motion(from, point, view),
            PointerEventKind::Leave => match self.hover.take() {
                Some(_) => (from, InteractionEffect::HoverChanged { hover: None }),
                None => (from, noop(InteractionNoopReason::HoverUnchanged)),
            },
            PointerEventKind::CaptureLost => match from {
                InteractionState::Idle => (from, noop(InteractionNoopReason::IdleWithoutAction)),
                _ => (
                    InteractionState::Idle,
                    InteractionEffect::Canceled {
                        state: from,
                        reason: InteractionCancelReason::CaptureLost,
                    },
                ),
            },
        };
        let transition = self.transition(from, to, effect);
        if !matches!(transition.effect, InteractionEffect::Noop { .. }) {
            dockwork_core::trace!(
                transition_id = transition.transition_id,
                effect = ?transition.effect,
                "interaction transition"
            );
        }
        transition
    }

    fn press(
        &mut self,
        point: Point,
        view: &InteractionView<'_>,
    ) -> (InteractionState, InteractionEffect) {
        let idle = InteractionState::Idle;
        let Some(part) = view.hit(point) else {
            return (idle, noop(InteractionNoopReason::NothingHit));
        };
        match part.kind {
            UiPartKind::DockSizer | UiPartKind::PaneSizer => {
                let Some(sash) = sash_target(part, view) else {
                    return (idle, noop(InteractionNoopReason::FixedSash));
                };
                let grab = point.offset_from(part.rect.origin());
                (
                    InteractionState::Resizing {
                        sash,
                        sash_rect: part.rect,
                        orientation: part.orientation,
                        grab,
                        current: point,
                    },
                    InteractionEffect::ResizeStarted { sash, grab },
                )
            }
            UiPartKind::PaneButton => match (part.pane, part.button) {
                (Some(pane), Some(button)) => (
                    InteractionState::PressingButton { pane, button },
                    InteractionEffect::ButtonPressed { pane, button },
                ),
                _ => (idle, noop(InteractionNoopReason::NothingHit)),
            },
            UiPartKind::Caption | UiPartKind::Gripper => {
                let Some(pane) = part.pane else {
                    return (idle, noop(InteractionNoopReason::NothingHit));
                };
                let Some(info) = view.panes.get(pane) else {
                    return (idle, noop(InteractionNoopReason::NothingHit));
                };
                // Center panes and pinned panes only take the click.
                if info.is_center() || !info.is_movable() {
                    return (idle, InteractionEffect::CaptionClicked { pane });
                }
                let offset = point.offset_from(part.rect.origin());
                let to = if info.is_toolbar() {
                    InteractionState::DraggingToolbar {
                        pane,
                        origin: point,
                        current: point,
                        offset,
                        dragging: false,
                    }
                } else {
                    InteractionState::DraggingCaption {
                        pane,
                        origin: point,
                        current: point,
                        offset,
                        dragging: false,
                    }
                };
                (
                    to,
                    InteractionEffect::DragArmed {
                        pane,
                        origin: point,
                        offset,
                    },
                )
            }
            _ => (idle, noop(InteractionNoopReason::NothingHit)),
        }
    }

    fn release(
        &mut self,
        from: InteractionState,
        point: Point,
        view: &InteractionView<'_>,
    ) -> (InteractionState, InteractionEffect) {
        let idle = InteractionState::Idle;
        match from {
            InteractionState::Idle => (idle, noop(InteractionNoopReason::IdleWithoutAction)),
            InteractionState::Resizing {
                sash,
                sash_rect,
                grab,
                ..
            } => (
                idle,
                InteractionEffect::ResizeCommitted {
                    sash,
                    sash_rect,
                    pointer: point,
                    grab,
                },
            ),
            InteractionState::DraggingCaption {
                pane,
                offset,
                dragging,
                ..
            }
            | InteractionState::DraggingToolbar {
                pane,
                offset,
                dragging,
                ..
            } => {
                if dragging {
                    let toolbar = matches!(from, InteractionState::DraggingToolbar { .. });
                    (
                        idle,
                        InteractionEffect::DragCommitted {
                            pane,
                            pointer: point,
                            offset,
                            toolbar,
                        },
                    )
                } else {
                    (idle, InteractionEffect::CaptionClicked { pane })
                }
            }
            InteractionState::PressingButton { pane, button } => {
                self.hover = None;
                let same = view.hit(point).is_some_and(|part| {
                    part.kind == UiPartKind::PaneButton
                        && part.pane == Some(pane)
                        && part.button == Some(button)
                });
                let kind = view
                    .panes
                    .get(pane)
                    .and_then(|info| info.buttons.get(button))
                    .map(|b| b.kind);
                match (same, kind) {
                    (true, Some(kind)) => (idle, InteractionEffect::ButtonFired { pane, button, kind }),
                    _ => (idle, noop(InteractionNoopReason::ReleasedOutsideButton)),
                }
            }
        }
    }

    fn motion(
        &mut self,
        from: InteractionState,
        point: Point,
        view: &InteractionView<'_>,
    ) -> (InteractionState, InteractionEffect) {
        match from {
            InteractionState::Idle => {
                let hover = view.hit(point).and_then(|part| match part.kind {
                    UiPartKind::PaneButton => part.pane.zip(part.button),
                    _ => None,
                });
                if hover == self.hover {
                    (from, noop(InteractionNoopReason::HoverUnchanged))
                } else {
                    self.hover = hover;
                    (from, InteractionEffect::HoverChanged { hover })
                }
            }
            InteractionState::Resizing {
                sash,
                sash_rect,
                orientation,
                grab,
                current,
            } => {
                if current == point {
                    return (from, noop(InteractionNoopReason::PointerUnchanged));
                }
                let mut hint = sash_rect;
                match orientation {
                    Orientation::Horizontal => hint.y = (point.y - grab.y).max(0),
                    Orientation::Vertical => hint.x = (point.x - grab.x).max(0),
                }
                (
                    InteractionState::Resizing {
                        sash,
                        sash_rect,
                        orientation,
                        grab,
                        current: point,
                    },
                    InteractionEffect::ResizeUpdated {
                        sash,
                        pointer: point,
                        grab,
                        hint,
                    },
                )
            }
            InteractionState::DraggingCaption {
                pane,
                origin,
                current,
                offset,
                dragging,
            }
            | InteractionState::DraggingToolbar {
                pane,
                origin,
                current,
                offset,
                dragging,
            } => {
                let toolbar = matches!(from, InteractionState::DraggingToolbar { .. });
                if current == point {
                    return (from, noop(InteractionNoopReason::PointerUnchanged));
                }
                let started = !dragging && crossed_drag_threshold(origin, point, self.drag_threshold);
                if !dragging && !started {
                    return (from, noop(InteractionNoopReason::ThresholdNotReached));
                }
                let to = if toolbar {
                    InteractionState::DraggingToolbar {
                        pane,
                        origin,
                        current: point,
                        offset,
                        dragging: true,
                    }
                } else {
                    InteractionState::DraggingCaption {
                        pane,
                        origin,
                        current: point,
                        offset,
                        dragging: true,
                    }
                };
                let effect = if started {
                    InteractionEffect::DragStarted {
                        pane,
                        pointer: point,
                        offset,
                        toolbar,
                    }
                } else {
                    InteractionEffect::DragUpdated {
                        pane,
                        pointer: point,
                        offset,
                        toolbar,
                    }
                };
                (to, effect)
            }
            InteractionState::PressingButton { .. } => {
                (from, noop(InteractionNoopReason::ButtonHeld))
            }
        }
    }

    fn transition(
        &mut self,
        from: InteractionState,
        to: InteractionState,
        effect: InteractionEffect,
    ) -> InteractionTransition {
        self.state = to;
        self.transition_counter = self.transition_counter.saturating_add(1);
        InteractionTransition {
            transition_id: self.transition_counter,
            from,
            to,
            effect,
        }
    }
}

const fn noop(reason: InteractionNoopReason) -> InteractionEffect {
    InteractionEffect::Noop { reason }
}

/// Resolve a sash part to its target, refusing sashes that cannot move.
fn sash_target(part: &UiPart, view: &InteractionView<'_>) -> Option<SashTarget> {
    let dock = view.docks.get(part.dock?)?;
    match part.kind {
        UiPartKind::DockSizer => {
            if dock.fixed || !dock.resizable {
                return None;
            }
            // A dock holding a single fixed pane has nothing to resize.
            if let [only] = dock.panes.as_slice() {
                if view.panes.get(*only).is_some_and(PaneInfo::is_fixed) {
                    return None;
                }
            }
            Some(SashTarget::Dock { dock: dock.key })
        }
        UiPartKind::PaneSizer => {
            let pane = part.pane?;
            if view.panes.get(pane)?.is_fixed() {
                return None;
            }
            Some(SashTarget::Pane {
                dock: dock.key,
                pane,
            })
        }
        _ => None,
    }
}

fn crossed_drag_threshold(origin: Point, current: Point, threshold: i32) -> bool {
    let dx = i64::from(current.x - origin.x);
    let dy = i64::from(current.y - origin.y);
    let threshold = i64::from(threshold);
    dx * dx + dy * dy >= threshold * threshold
}
