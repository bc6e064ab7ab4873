//! Dock records and pane-array placement helpers.
//!
//! Docks are derived data: the layout engine rebuilds them from the pane
//! array on every pass. Only a proportional dock's pixel thickness outlives a
//! pass, remembered in [`DockSizeMemo`].

use std::collections::BTreeMap;

use dockwork_core::geometry::Rect;
use serde::{Deserialize, Serialize};

use crate::art::ArtMetrics;
use crate::pane::{DockDirection, PaneFlags, PaneIndex, PaneInfo};

/// Index of a dock in a layout pass's dock list.
pub type DockIndex = usize;

/// Identity of a dock: one row of one layer on one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DockKey {
    pub direction: DockDirection,
    pub layer: i32,
    pub row: i32,
}

impl DockKey {
    #[must_use]
    pub const fn new(direction: DockDirection, layer: i32, row: i32) -> Self {
        Self {
            direction,
            layer,
            row,
        }
    }

    /// Dock key a pane belongs to.
    #[must_use]
    pub fn of(pane: &PaneInfo) -> Self {
        Self::new(pane.direction, pane.layer, pane.row)
    }
}

/// One populated dock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockInfo {
    pub key: DockKey,
    /// Member panes, sorted by `pos`.
    pub panes: Vec<PaneIndex>,
    /// Thickness across the dock's main axis, in pixels.
    pub size: i32,
    pub min_size: i32,
    pub resizable: bool,
    /// Panes keep their best size and `pos` is a pixel offset.
    pub fixed: bool,
    /// Every member is a toolbar.
    pub toolbar: bool,
    pub rect: Rect,
}

impl DockInfo {
    #[must_use]
    pub fn new(key: DockKey) -> Self {
        Self {
            key,
            panes: Vec::new(),
            size: 0,
            min_size: 0,
            resizable: true,
            fixed: false,
            toolbar: false,
            rect: Rect::default(),
        }
    }

    #[must_use]
    pub fn direction(&self) -> DockDirection {
        self.key.direction
    }

    #[must_use]
    pub fn layer(&self) -> i32 {
        self.key.layer
    }

    #[must_use]
    pub fn row(&self) -> i32 {
        self.key.row
    }

    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        self.key.direction.is_horizontal()
    }

    #[must_use]
    pub fn is_vertical(&self) -> bool {
        self.key.direction.is_vertical()
    }

    #[must_use]
    pub fn is_center(&self) -> bool {
        self.key.direction == DockDirection::Center
    }

    #[must_use]
    pub fn contains_pane(&self, pane: PaneIndex) -> bool {
        self.panes.contains(&pane)
    }
}

/// Dock thickness remembered between layout passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DockSizeMemo {
    sizes: BTreeMap<DockKey, i32>,
}

impl DockSizeMemo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &DockKey) -> Option<i32> {
        self.sizes.get(key).copied()
    }

    pub fn set(&mut self, key: DockKey, size: i32) {
        self.sizes.insert(key, size);
    }

    pub fn remove(&mut self, key: &DockKey) -> Option<i32> {
        self.sizes.remove(key)
    }

    pub fn clear(&mut self) {
        self.sizes.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (DockKey, i32)> + '_ {
        self.sizes.iter().map(|(key, size)| (*key, *size))
    }
}

fn shifts(pane: &PaneInfo, direction: DockDirection) -> bool {
    !pane.is_floating() && pane.direction == direction
}

/// Open slot `pos` in a dock by shifting docked panes at `pos` or later.
pub fn insert_pane_slot(
    panes: &mut [PaneInfo],
    direction: DockDirection,
    layer: i32,
    row: i32,
    pos: i32,
) {
    for pane in panes.iter_mut() {
        if shifts(pane, direction) && pane.layer == layer && pane.row == row && pane.pos >= pos {
            pane.pos += 1;
        }
    }
}

/// Open row `row` in a layer by shifting docked panes at `row` or later.
pub fn insert_row_slot(panes: &mut [PaneInfo], direction: DockDirection, layer: i32, row: i32) {
    for pane in panes.iter_mut() {
        if shifts(pane, direction) && pane.layer == layer && pane.row >= row {
            pane.row += 1;
        }
    }
}

/// Open layer `layer` on a side by shifting docked panes at `layer` or later.
pub fn insert_layer_slot(panes: &mut [PaneInfo], direction: DockDirection, layer: i32) {
    for pane in panes.iter_mut() {
        if shifts(pane, direction) && pane.layer >= layer {
            pane.layer += 1;
        }
    }
}

/// Highest layer among docks in `direction`.
#[must_use]
pub fn max_layer(docks: &[DockInfo], direction: DockDirection) -> Option<i32> {
    docks
        .iter()
        .filter(|dock| dock.direction() == direction)
        .map(DockInfo::layer)
        .max()
}

/// Highest row among docked, shown panes in `direction` and `layer`.
#[must_use]
pub fn max_row(panes: &[PaneInfo], direction: DockDirection, layer: i32) -> Option<i32> {
    panes
        .iter()
        .filter(|p| p.is_docked() && p.is_shown() && p.direction == direction && p.layer == layer)
        .map(|p| p.row)
        .max()
}

/// Pixel extent a pane occupies along its dock's main axis, decorations
/// included.
#[must_use]
pub fn pane_main_extent(dock: &DockInfo, pane: &PaneInfo, metrics: &ArtMetrics) -> i32 {
    let best = pane.best_size.unwrap_or_default();
    let mut size = 0;
    if pane.has_border() {
        size += metrics.pane_border_size * 2;
    }
    if dock.is_horizontal() {
        if pane.has_gripper() && !pane.has_gripper_top() {
            size += metrics.gripper_size;
        }
        size += best.width;
    } else {
        if pane.has_gripper() && pane.has_gripper_top() {
            size += metrics.gripper_size;
        }
        if pane.has_caption() {
            size += metrics.caption_size;
        }
        size += best.height;
    }
    size
}

/// Pixel positions and extents of the panes of a fixed dock.
///
/// Positions start from each pane's `pos`. When a pane carries
/// [`PaneFlags::ACTION_PANE`], panes before it are pushed back and panes
/// after it pushed forward so nothing overlaps the pane being dragged.
#[must_use]
pub fn pane_positions_and_sizes(
    dock: &DockInfo,
    panes: &[PaneInfo],
    metrics: &ArtMetrics,
) -> (Vec<i32>, Vec<i32>) {
    pane_positions_and_sizes_with(dock, panes, metrics, |index| panes[index].pos)
}

/// [`pane_positions_and_sizes`] with starting positions supplied by `pos_of`
/// instead of each pane's `pos`.
pub fn pane_positions_and_sizes_with(
    dock: &DockInfo,
    panes: &[PaneInfo],
    metrics: &ArtMetrics,
    pos_of: impl Fn(PaneIndex) -> i32,
) -> (Vec<i32>, Vec<i32>) {
    let mut positions = Vec::with_capacity(dock.panes.len());
    let mut sizes = Vec::with_capacity(dock.panes.len());
    let mut action_pane = None;

    for (slot, &index) in dock.panes.iter().enumerate() {
        let pane = &panes[index];
        if pane.has_flag(PaneFlags::ACTION_PANE) {
            action_pane = Some(slot);
        }
        positions.push(pos_of(index));
        sizes.push(pane_main_extent(dock, pane, metrics));
    }

    let Some(action) = action_pane else {
        return (positions, sizes);
    };

    let mut offset = 0;
    for slot in (0..action).rev() {
        let amount = positions[slot + 1] - (positions[slot] + sizes[slot]);
        if amount >= 0 {
            offset += amount;
        } else {
            positions[slot] -= -amount;
        }
        offset += sizes[slot];
    }

    offset = 0;
    for slot in action..positions.len() {
        let amount = positions[slot] - offset;
        if amount >= 0 {
            offset += amount;
        } else {
            positions[slot] += -amount;
        }
        offset += sizes[slot];
    }

    (positions, sizes)
}
