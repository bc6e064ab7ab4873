//! UI parts: the interactive regions produced by a layout pass.
//!
//! Parts refer to panes, docks, and buttons by index into the arrays of the
//! same pass, never by reference. The whole index is rebuilt every pass.

use dockwork_core::geometry::{Point, Rect};

use crate::dock::DockIndex;
use crate::pane::{ButtonIndex, PaneIndex};
use crate::sizer::{NodeId, Orientation};

/// Index of a part within a [`UiPartIndex`].
pub type PartIndex = usize;

/// What a region is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiPartKind {
    Caption,
    Gripper,
    /// Whole dock area; used for measurement, never hit.
    Dock,
    /// Sash that resizes a dock.
    DockSizer,
    /// Sash between two panes of a proportional dock.
    PaneSizer,
    /// Pane body.
    Pane,
    PaneBorder,
    PaneButton,
    Background,
}

/// One region of the managed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiPart {
    pub kind: UiPartKind,
    pub rect: Rect,
    pub orientation: Orientation,
    pub dock: Option<DockIndex>,
    pub pane: Option<PaneIndex>,
    pub button: Option<ButtonIndex>,
    /// Layout-tree node whose realized rectangle becomes `rect`.
    pub node: NodeId,
}

impl UiPart {
    #[must_use]
    pub fn new(kind: UiPartKind, node: NodeId, orientation: Orientation) -> Self {
        Self {
            kind,
            rect: Rect::default(),
            orientation,
            dock: None,
            pane: None,
            button: None,
            node,
        }
    }

    #[must_use]
    pub fn with_dock(mut self, dock: DockIndex) -> Self {
        self.dock = Some(dock);
        self
    }

    #[must_use]
    pub fn with_pane(mut self, pane: PaneIndex) -> Self {
        self.pane = Some(pane);
        self
    }

    #[must_use]
    pub fn with_button(mut self, button: ButtonIndex) -> Self {
        self.button = Some(button);
        self
    }

    /// True for the two sash kinds.
    #[must_use]
    pub fn is_sash(&self) -> bool {
        matches!(self.kind, UiPartKind::DockSizer | UiPartKind::PaneSizer)
    }
}

/// Flat list of parts from one layout pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiPartIndex {
    parts: Vec<UiPart>,
}

impl UiPartIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, part: UiPart) -> PartIndex {
        self.parts.push(part);
        self.parts.len() - 1
    }

    #[must_use]
    pub fn parts(&self) -> &[UiPart] {
        &self.parts
    }

    pub fn parts_mut(&mut self) -> &mut [UiPart] {
        &mut self.parts
    }

    #[must_use]
    pub fn get(&self, index: PartIndex) -> Option<&UiPart> {
        self.parts.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Parts of one kind, in emission order.
    pub fn iter_kind(&self, kind: UiPartKind) -> impl Iterator<Item = (PartIndex, &UiPart)> + '_ {
        self.parts
            .iter()
            .enumerate()
            .filter(move |(_, part)| part.kind == kind)
    }

    /// The part under `point`.
    ///
    /// Dock parts are never returned. Pane bodies and borders only match when
    /// nothing more specific did; otherwise the last containing part wins.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<PartIndex> {
        let mut result: Option<PartIndex> = None;
        for (index, part) in self.parts.iter().enumerate() {
            if part.kind == UiPartKind::Dock {
                continue;
            }
            if matches!(part.kind, UiPartKind::Pane | UiPartKind::PaneBorder) && result.is_some() {
                continue;
            }
            if part.rect.contains(point) {
                result = Some(index);
            }
        }
        result
    }

    /// The outermost part of a pane: its border if it has one, else its body.
    #[must_use]
    pub fn pane_part(&self, pane: PaneIndex) -> Option<PartIndex> {
        let mut body = None;
        for (index, part) in self.parts.iter().enumerate() {
            if part.pane != Some(pane) {
                continue;
            }
            match part.kind {
                UiPartKind::PaneBorder => return Some(index),
                UiPartKind::Pane if body.is_none() => body = Some(index),
                _ => {}
            }
        }
        body
    }

    /// The `Dock` part of a dock.
    #[must_use]
    pub fn dock_part(&self, dock: DockIndex) -> Option<PartIndex> {
        self.parts
            .iter()
            .position(|part| part.kind == UiPartKind::Dock && part.dock == Some(dock))
    }

    /// The button part for `(pane, button)`.
    #[must_use]
    pub fn button_part(&self, pane: PaneIndex, button: ButtonIndex) -> Option<PartIndex> {
        self.parts.iter().position(|part| {
            part.kind == UiPartKind::PaneButton
                && part.pane == Some(pane)
                && part.button == Some(button)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(kind: UiPartKind, rect: Rect) -> UiPart {
        let mut part = UiPart::new(kind, 0, Orientation::Horizontal);
        part.rect = rect;
        part
    }

    #[test]
    fn hit_test_skips_dock_parts() {
        let mut index = UiPartIndex::new();
        index.push(part(UiPartKind::Dock, Rect::new(0, 0, 100, 100)));
        assert_eq!(index.hit_test(Point::new(5, 5)), None);
    }

    #[test]
    fn caption_beats_pane_border() {
        let mut index = UiPartIndex::new();
        let caption = index.push(part(UiPartKind::Caption, Rect::new(1, 1, 98, 17)).with_pane(0));
        index.push(part(UiPartKind::Pane, Rect::new(1, 18, 98, 80)).with_pane(0));
        index.push(part(UiPartKind::PaneBorder, Rect::new(0, 0, 100, 100)).with_pane(0));
        assert_eq!(index.hit_test(Point::new(10, 5)), Some(caption));
    }

    #[test]
    fn border_matches_when_nothing_else_does() {
        let mut index = UiPartIndex::new();
        index.push(part(UiPartKind::Pane, Rect::new(1, 1, 98, 98)).with_pane(0));
        let border = index.push(part(UiPartKind::PaneBorder, Rect::new(0, 0, 100, 100)).with_pane(0));
        assert_eq!(index.hit_test(Point::new(0, 50)), Some(border));
    }

    #[test]
    fn later_specific_part_wins() {
        let mut index = UiPartIndex::new();
        index.push(part(UiPartKind::Caption, Rect::new(0, 0, 100, 17)).with_pane(0));
        let button = index.push(
            part(UiPartKind::PaneButton, Rect::new(80, 0, 14, 17))
                .with_pane(0)
                .with_button(0),
        );
        assert_eq!(index.hit_test(Point::new(85, 3)), Some(button));
        assert_eq!(index.button_part(0, 0), Some(button));
    }

    #[test]
    fn pane_part_prefers_border() {
        let mut index = UiPartIndex::new();
        let body = index.push(part(UiPartKind::Pane, Rect::new(1, 1, 8, 8)).with_pane(3));
        assert_eq!(index.pane_part(3), Some(body));
        let border = index.push(part(UiPartKind::PaneBorder, Rect::new(0, 0, 10, 10)).with_pane(3));
        assert_eq!(index.pane_part(3), Some(border));
        assert_eq!(index.pane_part(4), None);
    }

    #[test]
    fn dock_part_lookup() {
        let mut index = UiPartIndex::new();
        index.push(part(UiPartKind::DockSizer, Rect::default()).with_dock(1));
        let dock = index.push(part(UiPartKind::Dock, Rect::default()).with_dock(1));
        assert_eq!(index.dock_part(1), Some(dock));
        assert_eq!(index.iter_kind(UiPartKind::DockSizer).count(), 1);
    }
}
