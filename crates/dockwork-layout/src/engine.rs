//! Layout engine: pane array → box-layout tree + UI part index.
//!
//! A pass is a pure function of its [`LayoutInput`]. It rebuilds the dock
//! list from the panes, sizes each dock, nests the docks layer by layer
//! around the center area, and records a [`UiPart`] for every decoration,
//! sash, and pane body. Rectangles are filled in by
//! [`LayoutOutput::realize`].
//!
//! Nesting, for each populated layer from 0 outward:
//!
//! ```text
//! +---------------------------------------+
//! | top rows (row 0 outermost)            |
//! +------+-------------------------+------+
//! | left | previous layer / center | right|
//! +------+-------------------------+------+
//! | bottom rows (row 0 outermost)         |
//! +---------------------------------------+
//! ```

use std::collections::BTreeMap;

use dockwork_core::geometry::{Rect, Size};

use crate::art::ArtMetrics;
use crate::dock::{DockIndex, DockInfo, DockKey, DockSizeMemo, pane_positions_and_sizes_with};
use crate::pane::{DockDirection, PaneFlags, PaneIndex, PaneInfo};
use crate::part::{UiPart, UiPartIndex, UiPartKind};
use crate::sizer::{LayoutTree, NodeId, Orientation, RealizedLayout};

/// Thickness floor for a newly sized dock.
pub const MIN_DOCK_SIZE: i32 = 10;

/// Gap after the last caption button.
const BUTTON_TRAILING_GAP: i32 = 3;

/// Everything a layout pass reads.
#[derive(Debug, Clone, Copy)]
pub struct LayoutInput<'a> {
    pub panes: &'a [PaneInfo],
    /// Dock thickness remembered from earlier passes.
    pub memo: &'a DockSizeMemo,
    pub metrics: ArtMetrics,
    /// Client size of the managed window.
    pub client: Size,
    /// Largest fraction of the client width/height a newly sized dock takes.
    pub dock_constraint: (f64, f64),
    /// Lay out blank spacers instead of host content (hint computation).
    pub spacer_only: bool,
}

/// Record of the layout suppressed while a pane is maximized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaximizedNote {
    pub pane: PaneIndex,
    pub saved_dock_sizes: DockSizeMemo,
}

/// Result of one layout pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOutput {
    pub tree: LayoutTree,
    pub root: NodeId,
    pub docks: Vec<DockInfo>,
    pub parts: UiPartIndex,
    pub maximized: Option<MaximizedNote>,
    /// Dock sizes to remember for the next pass.
    pub memo: DockSizeMemo,
    /// Normalized `pos` of every pane, indexed like the input panes.
    pub positions: Vec<i32>,
}

/// Stateless layout pass runner.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine;

impl LayoutEngine {
    /// Run one layout pass.
    #[must_use]
    pub fn layout(input: &LayoutInput<'_>) -> LayoutOutput {
        let _span = dockwork_core::debug_span!(
            "dock_layout",
            panes = input.panes.len(),
            width = input.client.width,
            height = input.client.height
        )
        .entered();

        let maximized = input
            .panes
            .iter()
            .position(|p| p.is_docked() && p.is_shown() && p.is_maximized());
        if let Some(pane) = maximized {
            dockwork_core::debug!(pane, "maximized pane bypasses dock layout");
            return maximized_layout(input, pane);
        }

        let mut pass = Pass::new(input);
        pass.collect_docks();
        pass.configure_docks();
        let root = pass.build_tree();
        pass.finish(root)
    }
}

fn maximized_layout(input: &LayoutInput<'_>, pane: PaneIndex) -> LayoutOutput {
    let mut tree = LayoutTree::new();
    let root = tree.new_box(Orientation::Vertical);
    let body = if input.spacer_only {
        tree.add_spacer(root, Size::new(1, 1), 1)
    } else {
        tree.add_content(root, pane, Size::new(1, 1), 1)
    };
    let mut parts = UiPartIndex::new();
    parts.push(UiPart::new(UiPartKind::Pane, body, Orientation::Vertical).with_pane(pane));
    LayoutOutput {
        tree,
        root,
        docks: Vec::new(),
        parts,
        maximized: Some(MaximizedNote {
            pane,
            saved_dock_sizes: input.memo.clone(),
        }),
        memo: input.memo.clone(),
        positions: input.panes.iter().map(|p| p.pos).collect(),
    }
}

/// Whether a pane takes part in dock layout.
fn is_laid_out(pane: &PaneInfo) -> bool {
    match pane.direction {
        DockDirection::Center => true,
        DockDirection::None => false,
        _ => pane.is_docked() && (pane.is_shown() || pane.reserves_space_when_hidden()),
    }
}

/// Whether a laid-out pane is a blank placeholder.
fn is_placeholder(pane: &PaneInfo) -> bool {
    !pane.is_center() && !pane.is_shown()
}

struct Pass<'a> {
    input: &'a LayoutInput<'a>,
    docks: Vec<DockInfo>,
    positions: Vec<i32>,
    memo: DockSizeMemo,
    tree: LayoutTree,
    parts: UiPartIndex,
}

impl<'a> Pass<'a> {
    fn new(input: &'a LayoutInput<'a>) -> Self {
        Self {
            input,
            docks: Vec::new(),
            positions: input.panes.iter().map(|p| p.pos).collect(),
            memo: DockSizeMemo::new(),
            tree: LayoutTree::new(),
            parts: UiPartIndex::new(),
        }
    }

    fn panes(&self) -> &'a [PaneInfo] {
        self.input.panes
    }

    fn metrics(&self) -> &ArtMetrics {
        &self.input.metrics
    }

    fn collect_docks(&mut self) {
        let mut buckets: BTreeMap<DockKey, Vec<PaneIndex>> = BTreeMap::new();
        for (index, pane) in self.panes().iter().enumerate() {
            if is_laid_out(pane) {
                buckets.entry(DockKey::of(pane)).or_default().push(index);
            }
        }
        let panes = self.panes();
        self.docks = buckets
            .into_iter()
            .map(|(key, mut members)| {
                // stable: equal positions keep array order
                members.sort_by_key(|&index| panes[index].pos);
                let mut dock = DockInfo::new(key);
                dock.panes = members;
                dock
            })
            .collect();
    }

    fn configure_docks(&mut self) {
        let panes = self.panes();
        let metrics = *self.metrics();
        for dock_index in 0..self.docks.len() {
            let dock = &self.docks[dock_index];

            let mut fixed = true;
            let mut toolbar = true;
            let mut action_pane_marked = false;
            for &index in &dock.panes {
                let pane = &panes[index];
                if !pane.is_fixed() {
                    fixed = false;
                }
                if !pane.is_toolbar() {
                    toolbar = false;
                }
                if pane.has_flag(PaneFlags::DOCK_FIXED) {
                    fixed = true;
                }
                if pane.has_flag(PaneFlags::ACTION_PANE) {
                    action_pane_marked = true;
                }
            }

            let remembered = if fixed {
                None
            } else {
                self.input.memo.get(&dock.key)
            };
            let mut size = remembered.unwrap_or_else(|| self.initial_dock_size(dock));
            let min_size = dock_min_size(dock, panes, &metrics);
            size = size.max(min_size);

            let members = dock.panes.clone();
            if !fixed {
                for (slot, &index) in members.iter().enumerate() {
                    self.positions[index] = slot as i32;
                }
            } else if !action_pane_marked {
                let (positions, sizes) =
                    pane_positions_and_sizes_with(dock, panes, &metrics, |index| {
                        self.positions[index]
                    });
                let mut offset = 0;
                for (slot, &index) in members.iter().enumerate() {
                    let mut pos = positions[slot];
                    let amount = pos - offset;
                    if amount >= 0 {
                        offset += amount;
                    } else {
                        pos += -amount;
                    }
                    offset += sizes[slot];
                    self.positions[index] = pos;
                }
            }

            let dock = &mut self.docks[dock_index];
            dock.size = size;
            dock.min_size = min_size;
            dock.fixed = fixed;
            dock.resizable = !fixed;
            dock.toolbar = toolbar;
            if !fixed {
                self.memo.set(dock.key, size);
            }
            dockwork_core::trace!(
                direction = ?dock.key.direction,
                layer = dock.key.layer,
                row = dock.key.row,
                size,
                fixed,
                "dock configured"
            );
        }
    }

    fn initial_dock_size(&self, dock: &DockInfo) -> i32 {
        let panes = self.panes();
        let metrics = self.metrics();
        let horizontal = dock.is_horizontal();
        let members = || dock.panes.iter().map(|&index| &panes[index]);

        let mut size = members()
            .map(|pane| pane.preferred_size().along(!horizontal))
            .max()
            .unwrap_or(0);
        if members().any(PaneInfo::has_border) {
            size += metrics.pane_border_size * 2;
        }
        if horizontal && members().any(PaneInfo::has_caption) {
            size += metrics.caption_size;
        }

        let (constraint_x, constraint_y) = self.input.dock_constraint;
        let cap = if horizontal {
            (constraint_y * f64::from(self.input.client.height)) as i32
        } else {
            (constraint_x * f64::from(self.input.client.width)) as i32
        };
        size.min(cap).max(MIN_DOCK_SIZE)
    }

    fn build_tree(&mut self) -> NodeId {
        let max_layer = self.docks.iter().map(DockInfo::layer).max().unwrap_or(0);
        let mut cont: Option<NodeId> = None;

        for layer in 0..=max_layer {
            if !self.docks.iter().any(|dock| dock.layer() == layer) {
                continue;
            }
            let previous = cont;
            let current = self.tree.new_box(Orientation::Vertical);

            for dock in self.docks_in(DockDirection::Top, Some(layer)) {
                self.add_dock(current, dock);
            }

            let middle = self.tree.new_box(Orientation::Horizontal);
            for dock in self.docks_in(DockDirection::Left, Some(layer)) {
                self.add_dock(middle, dock);
            }
            match previous {
                None => {
                    let centers = self.docks_in(DockDirection::Center, None);
                    if centers.is_empty() {
                        self.add_background(middle, Orientation::Horizontal);
                    }
                    for dock in centers {
                        self.add_dock(middle, dock);
                    }
                }
                Some(inner) => self.tree.attach(middle, inner, 1, 0),
            }
            for dock in self.docks_in(DockDirection::Right, Some(layer)).into_iter().rev() {
                self.add_dock(middle, dock);
            }
            let middle_populated = self
                .tree
                .node(middle)
                .is_some_and(|node| !node.children.is_empty());
            if middle_populated {
                self.tree.attach(current, middle, 1, 0);
            }

            for dock in self.docks_in(DockDirection::Bottom, Some(layer)).into_iter().rev() {
                self.add_dock(current, dock);
            }
            cont = Some(current);
        }

        let cont = match cont {
            Some(cont) => cont,
            None => {
                let empty = self.tree.new_box(Orientation::Vertical);
                self.add_background(empty, Orientation::Vertical);
                empty
            }
        };
        let root = self.tree.new_box(Orientation::Vertical);
        self.tree.attach(root, cont, 1, 0);
        root
    }

    /// Docks in `direction` (and `layer`, if given), by layer then row.
    fn docks_in(&self, direction: DockDirection, layer: Option<i32>) -> Vec<DockIndex> {
        // docks are collected in key order, which is direction, layer, row
        self.docks
            .iter()
            .enumerate()
            .filter(|(_, dock)| {
                dock.direction() == direction && layer.is_none_or(|layer| dock.layer() == layer)
            })
            .map(|(index, _)| index)
            .collect()
    }

    fn add_background(&mut self, parent: NodeId, orientation: Orientation) {
        let node = self.tree.add_spacer(parent, Size::new(1, 1), 1);
        self.parts
            .push(UiPart::new(UiPartKind::Background, node, orientation));
    }

    fn add_dock_sizer(&mut self, parent: NodeId, dock_index: DockIndex, orientation: Orientation) {
        let sash = self.metrics().sash_size;
        let node = self.tree.add_spacer(parent, Size::new(sash, sash), 0);
        self.parts
            .push(UiPart::new(UiPartKind::DockSizer, node, orientation).with_dock(dock_index));
    }

    fn add_dock(&mut self, parent: NodeId, dock_index: DockIndex) {
        let dock = self.docks[dock_index].clone();
        let orientation = if dock.is_horizontal() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let direction = dock.direction();

        if !dock.fixed && matches!(direction, DockDirection::Bottom | DockDirection::Right) {
            self.add_dock_sizer(parent, dock_index, orientation);
        }

        let dock_box = self.tree.new_box(orientation);
        if dock.fixed {
            let metrics = *self.metrics();
            let (positions, sizes) =
                pane_positions_and_sizes_with(&dock, self.panes(), &metrics, |index| {
                    self.positions[index]
                });
            let mut offset = 0;
            for (slot, &pane) in dock.panes.iter().enumerate() {
                let amount = positions[slot] - offset;
                if amount > 0 {
                    let gap = match orientation {
                        Orientation::Horizontal => Size::new(amount, 1),
                        Orientation::Vertical => Size::new(1, amount),
                    };
                    let node = self.tree.add_spacer(dock_box, gap, 0);
                    self.parts.push(
                        UiPart::new(UiPartKind::Background, node, orientation.flip())
                            .with_dock(dock_index),
                    );
                    offset += amount;
                }
                self.add_pane(dock_box, dock_index, pane, orientation);
                offset += sizes[slot];
            }
            let node = self.tree.add_spacer(dock_box, Size::default(), 1);
            self.parts.push(
                UiPart::new(UiPartKind::Background, node, orientation).with_dock(dock_index),
            );
        } else {
            let sash = self.metrics().sash_size;
            for (slot, &pane) in dock.panes.iter().enumerate() {
                if slot > 0 {
                    let node = self.tree.add_spacer(dock_box, Size::new(sash, sash), 0);
                    self.parts.push(
                        UiPart::new(UiPartKind::PaneSizer, node, orientation.flip())
                            .with_dock(dock_index)
                            .with_pane(dock.panes[slot - 1]),
                    );
                }
                self.add_pane(dock_box, dock_index, pane, orientation);
            }
        }

        let proportion = i32::from(dock.is_center());
        self.tree.attach(parent, dock_box, proportion, 0);
        let min = if dock.is_horizontal() {
            Size::new(0, dock.size)
        } else {
            Size::new(dock.size, 0)
        };
        self.tree.set_min_size(dock_box, min);
        self.parts
            .push(UiPart::new(UiPartKind::Dock, dock_box, orientation).with_dock(dock_index));

        if !dock.fixed && matches!(direction, DockDirection::Top | DockDirection::Left) {
            self.add_dock_sizer(parent, dock_index, orientation);
        }
    }

    fn add_pane(
        &mut self,
        parent: NodeId,
        dock_index: DockIndex,
        pane_index: PaneIndex,
        orientation: Orientation,
    ) {
        let pane = &self.input.panes[pane_index];
        let metrics = *self.metrics();
        // placeholders reserve the same extent but emit no parts
        let emit = !is_placeholder(pane);
        let part = |kind: UiPartKind, node: NodeId| {
            UiPart::new(kind, node, orientation)
                .with_dock(dock_index)
                .with_pane(pane_index)
        };

        let horz = self.tree.new_box(Orientation::Horizontal);
        let vert = self.tree.new_box(Orientation::Vertical);

        if pane.has_gripper() {
            let node = if pane.has_gripper_top() {
                self.tree
                    .add_spacer(vert, Size::new(1, metrics.gripper_size), 0)
            } else {
                self.tree
                    .add_spacer(horz, Size::new(metrics.gripper_size, 1), 0)
            };
            if emit {
                self.parts.push(part(UiPartKind::Gripper, node));
            }
        }

        if pane.has_caption() {
            let caption_box = self.tree.new_box(Orientation::Horizontal);
            self.tree
                .add_spacer(caption_box, Size::new(1, metrics.caption_size), 1);
            if emit {
                self.parts.push(part(UiPartKind::Caption, caption_box));
            }
            for button in 0..pane.buttons.len() {
                let node = self.tree.add_spacer(
                    caption_box,
                    Size::new(metrics.pane_button_size, metrics.caption_size),
                    0,
                );
                if emit {
                    self.parts
                        .push(part(UiPartKind::PaneButton, node).with_button(button));
                }
            }
            if !pane.buttons.is_empty() {
                self.tree
                    .add_spacer(caption_box, Size::new(BUTTON_TRAILING_GAP, 1), 0);
            }
            self.tree.attach(vert, caption_box, 0, 0);
        }

        let mut proportion = pane.proportion;
        let mut min = pane.min_size;
        if pane.is_fixed() && min.is_none() {
            min = pane.best_size;
            proportion = 0;
        }
        let body_min = min.unwrap_or(Size::new(1, 1));
        let body = if self.input.spacer_only || !emit {
            self.tree.add_spacer(vert, body_min, 1)
        } else {
            self.tree.add_content(vert, pane_index, body_min, 1)
        };
        if emit {
            self.parts.push(part(UiPartKind::Pane, body));
        }

        self.tree.attach(horz, vert, 1, 0);
        let border = if pane.has_border() {
            metrics.pane_border_size
        } else {
            0
        };
        self.tree.attach(parent, horz, proportion, border);
        if emit && pane.has_border() {
            self.parts.push(part(UiPartKind::PaneBorder, horz));
        }
    }

    fn finish(self, root: NodeId) -> LayoutOutput {
        LayoutOutput {
            tree: self.tree,
            root,
            docks: self.docks,
            parts: self.parts,
            maximized: None,
            memo: self.memo,
            positions: self.positions,
        }
    }
}

fn dock_min_size(dock: &DockInfo, panes: &[PaneInfo], metrics: &ArtMetrics) -> i32 {
    let horizontal = dock.is_horizontal();
    let mut plus_border = false;
    let mut plus_caption = false;
    let mut min_size = 0;
    for &index in &dock.panes {
        let pane = &panes[index];
        let Some(min) = pane.min_size else {
            continue;
        };
        plus_border |= pane.has_border();
        plus_caption |= pane.has_caption();
        min_size = min_size.max(min.along(!horizontal));
    }
    if plus_border {
        min_size += metrics.pane_border_size * 2;
    }
    if plus_caption && horizontal {
        min_size += metrics.caption_size;
    }
    min_size
}

impl LayoutOutput {
    /// Write the normalized dock positions back into `panes`.
    pub fn apply_positions(&self, panes: &mut [PaneInfo]) {
        for (pane, &pos) in panes.iter_mut().zip(&self.positions) {
            pane.pos = pos;
        }
    }

    /// Realize the tree into `area` and fill part, dock, and pane rectangles.
    ///
    /// Panes without a body part (floating, hidden, suppressed by a
    /// maximized pane) get an empty rectangle.
    pub fn realize(&mut self, area: Rect, panes: &mut [PaneInfo]) -> RealizedLayout {
        let realized = self.tree.realize(self.root, area);
        for part in self.parts.parts_mut() {
            part.rect = if part.kind == UiPartKind::PaneBorder {
                realized.outer(part.node)
            } else {
                realized.inner(part.node)
            };
        }
        for pane in panes.iter_mut() {
            pane.rect = Rect::default();
        }
        for part in self.parts.parts() {
            match (part.kind, part.dock, part.pane) {
                (UiPartKind::Dock, Some(dock), _) => {
                    if let Some(dock) = self.docks.get_mut(dock) {
                        dock.rect = part.rect;
                    }
                }
                (UiPartKind::Pane, _, Some(pane)) => {
                    if let Some(pane) = panes.get_mut(pane) {
                        pane.rect = part.rect;
                    }
                }
                _ => {}
            }
        }
        realized
    }

    /// The dock a pane was placed in.
    #[must_use]
    pub fn dock_of_pane(&self, pane: PaneIndex) -> Option<DockIndex> {
        self.docks.iter().position(|dock| dock.contains_pane(pane))
    }

    /// Rectangle of the center area: the union of center docks, else the
    /// background filling the innermost middle.
    #[must_use]
    pub fn center_rect(&self) -> Option<Rect> {
        center_rect(&self.docks, &self.parts)
    }
}

/// Rectangle of the center area from the docks and parts of a realized pass.
#[must_use]
pub fn center_rect(docks: &[DockInfo], parts: &UiPartIndex) -> Option<Rect> {
    let center = docks
        .iter()
        .filter(|dock| dock.is_center())
        .map(|dock| dock.rect)
        .reduce(|a, b| a.union(&b));
    center.or_else(|| {
        parts
            .iter_kind(UiPartKind::Background)
            .find(|(_, part)| part.dock.is_none())
            .map(|(_, part)| part.rect)
    })
}
