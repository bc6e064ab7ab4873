//! Pane records: identity, capability flags, placement, and size hints.
//!
//! A [`PaneInfo`] describes one host window managed by the dock manager. The
//! record is a configuration object with chainable setters; the manager owns
//! the authoritative array and the layout engine reads it every pass.
//!
//! The `rect` field is layout output only and is never read as input.

use std::fmt;

use bitflags::bitflags;
use dockwork_core::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Index of a pane in the manager's pane array.
pub type PaneIndex = usize;

/// Index of a caption button within [`PaneInfo::buttons`].
pub type ButtonIndex = usize;

/// Proportion assigned to panes added without an explicit weight.
pub const DEFAULT_PROPORTION: i32 = 100_000;

/// Layer used for toolbar panes that do not name one.
pub const TOOLBAR_LAYER: i32 = 10;

/// Opaque, non-owning handle to a host window.
///
/// `0` is the null handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(u64);

impl WindowId {
    /// The null window handle.
    pub const NULL: Self = Self(0);

    /// Wrap a raw host handle.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// True for the null handle.
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Handle of a floating host frame, issued by a
/// [`FloatingHost`](crate::floating::FloatingHost).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloatingFrameId(u64);

impl FloatingFrameId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

bitflags! {
    /// Capability and state flags of a pane.
    ///
    /// Bit positions are part of the `layout2` perspective encoding and must
    /// not change.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PaneFlags: u32 {
        const FLOATING = 1 << 0;
        const HIDDEN = 1 << 1;
        const LEFT_DOCKABLE = 1 << 2;
        const RIGHT_DOCKABLE = 1 << 3;
        const TOP_DOCKABLE = 1 << 4;
        const BOTTOM_DOCKABLE = 1 << 5;
        const FLOATABLE = 1 << 6;
        const MOVABLE = 1 << 7;
        const RESIZABLE = 1 << 8;
        const PANE_BORDER = 1 << 9;
        const CAPTION = 1 << 10;
        const GRIPPER = 1 << 11;
        const DESTROY_ON_CLOSE = 1 << 12;
        const TOOLBAR = 1 << 13;
        const ACTIVE = 1 << 14;
        const GRIPPER_TOP = 1 << 15;
        const MAXIMIZED = 1 << 16;
        const DOCK_FIXED = 1 << 17;
        const CENTER_DOCKABLE = 1 << 18;
        const RESERVE_SPACE_WHEN_HIDDEN = 1 << 19;

        const CLOSE_BUTTON = 1 << 21;
        const MAXIMIZE_BUTTON = 1 << 22;
        const MINIMIZE_BUTTON = 1 << 23;
        const PIN_BUTTON = 1 << 24;

        const SAVED_HIDDEN = 1 << 30;
        const ACTION_PANE = 1 << 31;
    }
}

impl PaneFlags {
    /// Flags of a freshly constructed pane.
    pub const DEFAULT: Self = Self::LEFT_DOCKABLE
        .union(Self::RIGHT_DOCKABLE)
        .union(Self::TOP_DOCKABLE)
        .union(Self::BOTTOM_DOCKABLE)
        .union(Self::FLOATABLE)
        .union(Self::MOVABLE)
        .union(Self::RESIZABLE)
        .union(Self::CAPTION)
        .union(Self::PANE_BORDER)
        .union(Self::CLOSE_BUTTON);

    /// The four side-dockable flags.
    pub const SIDE_DOCKABLE: Self = Self::LEFT_DOCKABLE
        .union(Self::RIGHT_DOCKABLE)
        .union(Self::TOP_DOCKABLE)
        .union(Self::BOTTOM_DOCKABLE);

    /// All caption button flags.
    pub const BUTTONS: Self = Self::CLOSE_BUTTON
        .union(Self::MAXIMIZE_BUTTON)
        .union(Self::MINIMIZE_BUTTON)
        .union(Self::PIN_BUTTON);

    /// Flags that describe transient interaction state and are never saved.
    pub const RUNTIME_ONLY: Self = Self::ACTIVE.union(Self::ACTION_PANE);
}

impl Default for PaneFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Dock direction of a pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockDirection {
    #[default]
    None,
    Top,
    Right,
    Bottom,
    Left,
    Center,
}

impl DockDirection {
    /// The four outer directions.
    pub const SIDES: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Persisted numeric code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Top => 1,
            Self::Right => 2,
            Self::Bottom => 3,
            Self::Left => 4,
            Self::Center => 5,
        }
    }

    /// Decode a persisted numeric code.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::Top),
            2 => Some(Self::Right),
            3 => Some(Self::Bottom),
            4 => Some(Self::Left),
            5 => Some(Self::Center),
            _ => None,
        }
    }

    /// Docks in this direction lay their panes out left to right.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Docks in this direction stack their panes top to bottom.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right | Self::Center)
    }
}

/// Action bound to a caption button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    Close,
    MaximizeRestore,
    Minimize,
    Pin,
}

/// One caption button of a pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaneButton {
    pub kind: ButtonKind,
}

/// Derive the caption buttons for a set of flags, left to right.
#[must_use]
pub fn buttons_from_flags(flags: PaneFlags) -> Vec<PaneButton> {
    let mut buttons = Vec::new();
    if flags.contains(PaneFlags::MAXIMIZE_BUTTON) {
        buttons.push(PaneButton {
            kind: ButtonKind::MaximizeRestore,
        });
    }
    if flags.contains(PaneFlags::MINIMIZE_BUTTON) {
        buttons.push(PaneButton {
            kind: ButtonKind::Minimize,
        });
    }
    if flags.contains(PaneFlags::PIN_BUTTON) {
        buttons.push(PaneButton {
            kind: ButtonKind::Pin,
        });
    }
    if flags.contains(PaneFlags::CLOSE_BUTTON) {
        buttons.push(PaneButton {
            kind: ButtonKind::Close,
        });
    }
    buttons
}

/// Dock coordinates of a pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Placement {
    pub direction: DockDirection,
    pub layer: i32,
    pub row: i32,
    pub pos: i32,
}

impl Placement {
    #[must_use]
    pub const fn new(direction: DockDirection, layer: i32, row: i32, pos: i32) -> Self {
        Self {
            direction,
            layer,
            row,
            pos,
        }
    }
}

/// Metadata for one managed pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneInfo {
    /// Unique key within a manager.
    pub name: String,
    pub window: WindowId,
    pub caption: String,
    pub flags: PaneFlags,
    pub direction: DockDirection,
    pub layer: i32,
    pub row: i32,
    pub pos: i32,
    pub best_size: Option<Size>,
    pub min_size: Option<Size>,
    pub max_size: Option<Size>,
    pub floating_pos: Option<Point>,
    pub floating_size: Option<Size>,
    /// Weight used when sharing a proportional dock.
    pub proportion: i32,
    pub buttons: Vec<PaneButton>,
    /// Body rectangle from the last layout pass.
    pub rect: Rect,
    /// Floating host frame, while the pane floats.
    pub frame: Option<FloatingFrameId>,
}

impl Default for PaneInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl PaneInfo {
    /// A pane with default flags and no placement.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: String::new(),
            window: WindowId::NULL,
            caption: String::new(),
            flags: PaneFlags::DEFAULT,
            direction: DockDirection::Left,
            layer: 0,
            row: 0,
            pos: 0,
            best_size: None,
            min_size: None,
            max_size: None,
            floating_pos: None,
            floating_size: None,
            proportion: 0,
            buttons: Vec::new(),
            rect: Rect::default(),
            frame: None,
        }
    }

    /// True when the pane references a host window.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        !self.window.is_null()
    }

    #[must_use]
    pub fn has_flag(&self, flag: PaneFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn set_flag(&mut self, flag: PaneFlags, on: bool) {
        self.flags.set(flag, on);
    }

    fn with_flag(mut self, flag: PaneFlags, on: bool) -> Self {
        self.flags.set(flag, on);
        self
    }

    #[must_use]
    pub fn placement(&self) -> Placement {
        Placement::new(self.direction, self.layer, self.row, self.pos)
    }

    pub fn set_placement(&mut self, placement: Placement) {
        self.direction = placement.direction;
        self.layer = placement.layer.max(0);
        self.row = placement.row.max(0);
        self.pos = placement.pos.max(0);
    }

    /// Copy every persisted field from `source`, keeping this pane's window,
    /// floating frame, and buttons.
    pub fn safe_set(&mut self, source: &PaneInfo) {
        let window = self.window;
        let frame = self.frame;
        let buttons = std::mem::take(&mut self.buttons);
        *self = source.clone();
        self.window = window;
        self.frame = frame;
        self.buttons = buttons;
    }

    // --- builder setters ---

    #[must_use]
    pub fn window(mut self, window: WindowId) -> Self {
        self.window = window;
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    #[must_use]
    pub fn direction(mut self, direction: DockDirection) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn left(self) -> Self {
        self.direction(DockDirection::Left)
    }

    #[must_use]
    pub fn right(self) -> Self {
        self.direction(DockDirection::Right)
    }

    #[must_use]
    pub fn top(self) -> Self {
        self.direction(DockDirection::Top)
    }

    #[must_use]
    pub fn bottom(self) -> Self {
        self.direction(DockDirection::Bottom)
    }

    #[must_use]
    pub fn center(self) -> Self {
        self.direction(DockDirection::Center)
    }

    /// Configure as the central content pane: no caption, no buttons,
    /// bordered and resizable.
    #[must_use]
    pub fn center_pane(mut self) -> Self {
        self.flags = PaneFlags::PANE_BORDER | PaneFlags::RESIZABLE;
        self.center()
    }

    #[must_use]
    pub fn centre_pane(self) -> Self {
        self.center_pane()
    }

    #[must_use]
    pub fn layer(mut self, layer: i32) -> Self {
        self.layer = layer.max(0);
        self
    }

    #[must_use]
    pub fn row(mut self, row: i32) -> Self {
        self.row = row.max(0);
        self
    }

    #[must_use]
    pub fn position(mut self, pos: i32) -> Self {
        self.pos = pos.max(0);
        self
    }

    #[must_use]
    pub fn best_size(mut self, width: i32, height: i32) -> Self {
        self.best_size = Some(Size::new(width, height));
        self
    }

    #[must_use]
    pub fn min_size(mut self, width: i32, height: i32) -> Self {
        self.min_size = Some(Size::new(width, height));
        self
    }

    #[must_use]
    pub fn max_size(mut self, width: i32, height: i32) -> Self {
        self.max_size = Some(Size::new(width, height));
        self
    }

    #[must_use]
    pub fn floating_position(mut self, x: i32, y: i32) -> Self {
        self.floating_pos = Some(Point::new(x, y));
        self
    }

    #[must_use]
    pub fn floating_size(mut self, width: i32, height: i32) -> Self {
        self.floating_size = Some(Size::new(width, height));
        self
    }

    #[must_use]
    pub fn proportion(mut self, proportion: i32) -> Self {
        self.proportion = proportion.max(0);
        self
    }

    /// Not resizable: the pane keeps its best size.
    #[must_use]
    pub fn fixed(self) -> Self {
        self.with_flag(PaneFlags::RESIZABLE, false)
    }

    #[must_use]
    pub fn resizable(self, on: bool) -> Self {
        self.with_flag(PaneFlags::RESIZABLE, on)
    }

    #[must_use]
    pub fn dock(self) -> Self {
        self.with_flag(PaneFlags::FLOATING, false)
    }

    #[must_use]
    pub fn float(self) -> Self {
        self.with_flag(PaneFlags::FLOATING, true)
    }

    #[must_use]
    pub fn hide(self) -> Self {
        self.with_flag(PaneFlags::HIDDEN, true)
    }

    #[must_use]
    pub fn show(self) -> Self {
        self.with_flag(PaneFlags::HIDDEN, false)
    }

    #[must_use]
    pub fn caption_visible(self, on: bool) -> Self {
        self.with_flag(PaneFlags::CAPTION, on)
    }

    #[must_use]
    pub fn pane_border(self, on: bool) -> Self {
        self.with_flag(PaneFlags::PANE_BORDER, on)
    }

    #[must_use]
    pub fn gripper(self, on: bool) -> Self {
        self.with_flag(PaneFlags::GRIPPER, on)
    }

    /// Gripper above the caption rather than to its left.
    #[must_use]
    pub fn gripper_top(self, on: bool) -> Self {
        self.with_flag(PaneFlags::GRIPPER, on)
            .with_flag(PaneFlags::GRIPPER_TOP, on)
    }

    #[must_use]
    pub fn close_button(self, on: bool) -> Self {
        self.with_flag(PaneFlags::CLOSE_BUTTON, on)
    }

    #[must_use]
    pub fn maximize_button(self, on: bool) -> Self {
        self.with_flag(PaneFlags::MAXIMIZE_BUTTON, on)
    }

    #[must_use]
    pub fn minimize_button(self, on: bool) -> Self {
        self.with_flag(PaneFlags::MINIMIZE_BUTTON, on)
    }

    #[must_use]
    pub fn pin_button(self, on: bool) -> Self {
        self.with_flag(PaneFlags::PIN_BUTTON, on)
    }

    #[must_use]
    pub fn destroy_on_close(self, on: bool) -> Self {
        self.with_flag(PaneFlags::DESTROY_ON_CLOSE, on)
    }

    #[must_use]
    pub fn top_dockable(self, on: bool) -> Self {
        self.with_flag(PaneFlags::TOP_DOCKABLE, on)
    }

    #[must_use]
    pub fn bottom_dockable(self, on: bool) -> Self {
        self.with_flag(PaneFlags::BOTTOM_DOCKABLE, on)
    }

    #[must_use]
    pub fn left_dockable(self, on: bool) -> Self {
        self.with_flag(PaneFlags::LEFT_DOCKABLE, on)
    }

    #[must_use]
    pub fn right_dockable(self, on: bool) -> Self {
        self.with_flag(PaneFlags::RIGHT_DOCKABLE, on)
    }

    #[must_use]
    pub fn center_dockable(self, on: bool) -> Self {
        self.with_flag(PaneFlags::CENTER_DOCKABLE, on)
    }

    /// Set all four side-dockable flags at once.
    #[must_use]
    pub fn dockable(self, on: bool) -> Self {
        self.with_flag(PaneFlags::SIDE_DOCKABLE, on)
    }

    #[must_use]
    pub fn floatable(self, on: bool) -> Self {
        self.with_flag(PaneFlags::FLOATABLE, on)
    }

    #[must_use]
    pub fn movable(self, on: bool) -> Self {
        self.with_flag(PaneFlags::MOVABLE, on)
    }

    #[must_use]
    pub fn dock_fixed(self, on: bool) -> Self {
        self.with_flag(PaneFlags::DOCK_FIXED, on)
    }

    #[must_use]
    pub fn reserve_space_when_hidden(self, on: bool) -> Self {
        self.with_flag(PaneFlags::RESERVE_SPACE_WHEN_HIDDEN, on)
    }

    /// Configure as a toolbar: gripper, no caption, fixed size, outer layer.
    #[must_use]
    pub fn toolbar_pane(mut self) -> Self {
        self.flags |= PaneFlags::TOOLBAR | PaneFlags::GRIPPER;
        self.flags
            .remove(PaneFlags::RESIZABLE | PaneFlags::CAPTION | PaneFlags::CLOSE_BUTTON);
        if self.layer == 0 {
            self.layer = TOOLBAR_LAYER;
        }
        self
    }

    // --- queries ---

    #[must_use]
    pub fn is_floating(&self) -> bool {
        self.has_flag(PaneFlags::FLOATING)
    }

    #[must_use]
    pub fn is_docked(&self) -> bool {
        !self.is_floating()
    }

    #[must_use]
    pub fn is_shown(&self) -> bool {
        !self.has_flag(PaneFlags::HIDDEN)
    }

    #[must_use]
    pub fn is_toolbar(&self) -> bool {
        self.has_flag(PaneFlags::TOOLBAR)
    }

    #[must_use]
    pub fn is_resizable(&self) -> bool {
        self.has_flag(PaneFlags::RESIZABLE)
    }

    #[must_use]
    pub fn is_fixed(&self) -> bool {
        !self.is_resizable()
    }

    #[must_use]
    pub fn is_maximized(&self) -> bool {
        self.has_flag(PaneFlags::MAXIMIZED)
    }

    #[must_use]
    pub fn is_center(&self) -> bool {
        self.direction == DockDirection::Center
    }

    #[must_use]
    pub fn has_caption(&self) -> bool {
        self.has_flag(PaneFlags::CAPTION)
    }

    #[must_use]
    pub fn has_gripper(&self) -> bool {
        self.has_flag(PaneFlags::GRIPPER)
    }

    #[must_use]
    pub fn has_gripper_top(&self) -> bool {
        self.has_flag(PaneFlags::GRIPPER_TOP)
    }

    #[must_use]
    pub fn has_border(&self) -> bool {
        self.has_flag(PaneFlags::PANE_BORDER)
    }

    #[must_use]
    pub fn has_close_button(&self) -> bool {
        self.has_flag(PaneFlags::CLOSE_BUTTON)
    }

    #[must_use]
    pub fn has_maximize_button(&self) -> bool {
        self.has_flag(PaneFlags::MAXIMIZE_BUTTON)
    }

    #[must_use]
    pub fn has_minimize_button(&self) -> bool {
        self.has_flag(PaneFlags::MINIMIZE_BUTTON)
    }

    #[must_use]
    pub fn has_pin_button(&self) -> bool {
        self.has_flag(PaneFlags::PIN_BUTTON)
    }

    #[must_use]
    pub fn is_top_dockable(&self) -> bool {
        self.has_flag(PaneFlags::TOP_DOCKABLE)
    }

    #[must_use]
    pub fn is_bottom_dockable(&self) -> bool {
        self.has_flag(PaneFlags::BOTTOM_DOCKABLE)
    }

    #[must_use]
    pub fn is_left_dockable(&self) -> bool {
        self.has_flag(PaneFlags::LEFT_DOCKABLE)
    }

    #[must_use]
    pub fn is_right_dockable(&self) -> bool {
        self.has_flag(PaneFlags::RIGHT_DOCKABLE)
    }

    #[must_use]
    pub fn is_center_dockable(&self) -> bool {
        self.has_flag(PaneFlags::CENTER_DOCKABLE)
    }

    /// Whether the pane may dock in `direction`.
    #[must_use]
    pub fn is_dockable_on(&self, direction: DockDirection) -> bool {
        match direction {
            DockDirection::Top => self.is_top_dockable(),
            DockDirection::Bottom => self.is_bottom_dockable(),
            DockDirection::Left => self.is_left_dockable(),
            DockDirection::Right => self.is_right_dockable(),
            DockDirection::Center => self.is_center_dockable(),
            DockDirection::None => false,
        }
    }

    #[must_use]
    pub fn is_floatable(&self) -> bool {
        self.has_flag(PaneFlags::FLOATABLE)
    }

    #[must_use]
    pub fn is_movable(&self) -> bool {
        self.has_flag(PaneFlags::MOVABLE)
    }

    #[must_use]
    pub fn is_destroy_on_close(&self) -> bool {
        self.has_flag(PaneFlags::DESTROY_ON_CLOSE)
    }

    #[must_use]
    pub fn reserves_space_when_hidden(&self) -> bool {
        self.has_flag(PaneFlags::RESERVE_SPACE_WHEN_HIDDEN)
    }

    /// Size used to seed dock thickness: best size, else minimum size.
    #[must_use]
    pub fn preferred_size(&self) -> Size {
        self.best_size.or(self.min_size).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pane_flags_match_documented_set() {
        let pane = PaneInfo::new();
        assert!(pane.is_top_dockable());
        assert!(pane.is_bottom_dockable());
        assert!(pane.is_left_dockable());
        assert!(pane.is_right_dockable());
        assert!(!pane.is_center_dockable());
        assert!(pane.is_floatable());
        assert!(pane.is_movable());
        assert!(pane.is_resizable());
        assert!(pane.has_caption());
        assert!(pane.has_border());
        assert!(pane.has_close_button());
        assert!(!pane.has_gripper());
        assert!(pane.is_docked());
        assert!(pane.is_shown());
        assert!(!pane.is_ok());
    }

    #[test]
    fn flag_bits_are_stable() {
        assert_eq!(PaneFlags::FLOATING.bits(), 1);
        assert_eq!(PaneFlags::RESIZABLE.bits(), 1 << 8);
        assert_eq!(PaneFlags::TOOLBAR.bits(), 1 << 13);
        assert_eq!(PaneFlags::DOCK_FIXED.bits(), 1 << 17);
        assert_eq!(PaneFlags::CLOSE_BUTTON.bits(), 1 << 21);
        assert_eq!(PaneFlags::PIN_BUTTON.bits(), 1 << 24);
        assert_eq!(PaneFlags::SAVED_HIDDEN.bits(), 1 << 30);
        assert_eq!(PaneFlags::ACTION_PANE.bits(), 1 << 31);
    }

    #[test]
    fn builder_chain_sets_placement_and_sizes() {
        let pane = PaneInfo::new()
            .name("tools")
            .caption("Tools")
            .top()
            .layer(1)
            .row(2)
            .position(3)
            .best_size(200, 100)
            .min_size(50, 40)
            .floating_position(10, 20)
            .floating_size(300, 200);
        assert_eq!(pane.name, "tools");
        assert_eq!(pane.caption, "Tools");
        assert_eq!(
            pane.placement(),
            Placement::new(DockDirection::Top, 1, 2, 3)
        );
        assert_eq!(pane.best_size, Some(Size::new(200, 100)));
        assert_eq!(pane.min_size, Some(Size::new(50, 40)));
        assert_eq!(pane.floating_pos, Some(Point::new(10, 20)));
        assert_eq!(pane.floating_size, Some(Size::new(300, 200)));
    }

    #[test]
    fn negative_coordinates_clamp_to_zero() {
        let pane = PaneInfo::new().layer(-3).row(-1).position(-9);
        assert_eq!((pane.layer, pane.row, pane.pos), (0, 0, 0));
    }

    #[test]
    fn center_pane_drops_caption_and_buttons() {
        let pane = PaneInfo::new().center_pane();
        assert!(pane.is_center());
        assert!(!pane.has_caption());
        assert!(!pane.has_close_button());
        assert!(pane.has_border());
        assert!(pane.is_resizable());
    }

    #[test]
    fn toolbar_pane_moves_to_toolbar_layer() {
        let pane = PaneInfo::new().top().toolbar_pane();
        assert!(pane.is_toolbar());
        assert!(pane.has_gripper());
        assert!(pane.is_fixed());
        assert!(!pane.has_caption());
        assert_eq!(pane.layer, TOOLBAR_LAYER);

        let explicit = PaneInfo::new().layer(3).toolbar_pane();
        assert_eq!(explicit.layer, 3);
    }

    #[test]
    fn float_and_dock_toggle_floating_flag() {
        let pane = PaneInfo::new().float();
        assert!(pane.is_floating());
        assert!(pane.dock().is_docked());
    }

    #[test]
    fn dockable_sets_all_sides() {
        let pane = PaneInfo::new().dockable(false);
        for dir in DockDirection::SIDES {
            assert!(!pane.is_dockable_on(dir));
        }
        assert!(!pane.is_dockable_on(DockDirection::None));
    }

    #[test]
    fn buttons_follow_flag_order() {
        let flags = PaneFlags::CLOSE_BUTTON | PaneFlags::PIN_BUTTON | PaneFlags::MAXIMIZE_BUTTON;
        let kinds: Vec<_> = buttons_from_flags(flags).iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![ButtonKind::MaximizeRestore, ButtonKind::Pin, ButtonKind::Close]
        );
    }

    #[test]
    fn safe_set_preserves_window_frame_and_buttons() {
        let mut live = PaneInfo::new()
            .name("log")
            .window(WindowId::new(7))
            .left();
        live.frame = Some(FloatingFrameId::new(3));
        live.buttons = buttons_from_flags(live.flags);

        let mut source = PaneInfo::new().name("log").bottom().row(2).proportion(5);
        source.window = WindowId::new(99);
        source.buttons.clear();

        live.safe_set(&source);
        assert_eq!(live.window, WindowId::new(7));
        assert_eq!(live.frame, Some(FloatingFrameId::new(3)));
        assert_eq!(live.buttons.len(), 1);
        assert_eq!(live.direction, DockDirection::Bottom);
        assert_eq!(live.row, 2);
        assert_eq!(live.proportion, 5);
    }

    #[test]
    fn direction_codes_round_trip() {
        for code in 0..=5 {
            let dir = DockDirection::from_code(code).expect("valid code");
            assert_eq!(dir.code(), code);
        }
        assert_eq!(DockDirection::from_code(6), None);
        assert!(DockDirection::Top.is_horizontal());
        assert!(DockDirection::Center.is_vertical());
    }
}
