//! Box-layout tree and reference realizer.
//!
//! The layout engine describes its result as a tree of horizontal and
//! vertical boxes, spacers, and pane content slots. Hosts with their own box
//! layout can walk the tree themselves; [`LayoutTree::realize`] provides the
//! reference behaviour:
//!
//! - An item's minimum is its own minimum, or for a box the sum of its
//!   children's minimums along the main axis and their maximum across it,
//!   whichever is larger. Borders are added on every side.
//! - Items with proportion `0` get their minimum along the main axis.
//! - The rest of the main axis is shared by proportion among stretchable
//!   items, using a running remainder so the shares sum exactly. A share
//!   never goes below the item's minimum; the box overflows instead.
//! - Every item fills the box across the main axis.

use dockwork_core::geometry::{Rect, Sides, Size};
use serde::{Deserialize, Serialize};

use crate::pane::PaneIndex;

/// Index of a node within a [`LayoutTree`].
pub type NodeId = usize;

/// Main axis of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Children placed left to right.
    #[default]
    Horizontal,
    /// Children placed top to bottom.
    Vertical,
}

impl Orientation {
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Box(Orientation),
    Spacer,
    /// Slot for a pane's host window.
    Content(PaneIndex),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutNode {
    pub kind: NodeKind,
    /// Stretch weight within the parent box; `0` means fixed.
    pub proportion: i32,
    /// Explicit minimum, before border.
    pub min_size: Size,
    /// Border on every side.
    pub border: i32,
    pub children: Vec<NodeId>,
}

impl LayoutNode {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            proportion: 0,
            min_size: Size::default(),
            border: 0,
            children: Vec::new(),
        }
    }
}

/// Arena of layout nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutTree {
    nodes: Vec<LayoutNode>,
}

impl LayoutTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&LayoutNode> {
        self.nodes.get(id)
    }

    fn push(&mut self, node: LayoutNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Create a detached box. Attach it with [`LayoutTree::attach`] or use it
    /// as the root.
    pub fn new_box(&mut self, orientation: Orientation) -> NodeId {
        self.push(LayoutNode::new(NodeKind::Box(orientation)))
    }

    /// Append `child` to `parent` with the given proportion and border.
    pub fn attach(&mut self, parent: NodeId, child: NodeId, proportion: i32, border: i32) {
        if let Some(node) = self.nodes.get_mut(child) {
            node.proportion = proportion.max(0);
            node.border = border.max(0);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
    }

    /// Create a box and append it to `parent`.
    pub fn add_box(
        &mut self,
        parent: NodeId,
        orientation: Orientation,
        proportion: i32,
        border: i32,
    ) -> NodeId {
        let id = self.new_box(orientation);
        self.attach(parent, id, proportion, border);
        id
    }

    /// Append an empty item with a minimum size.
    pub fn add_spacer(&mut self, parent: NodeId, min: Size, proportion: i32) -> NodeId {
        let mut node = LayoutNode::new(NodeKind::Spacer);
        node.min_size = min;
        let id = self.push(node);
        self.attach(parent, id, proportion, 0);
        id
    }

    /// Append a pane content slot.
    pub fn add_content(
        &mut self,
        parent: NodeId,
        pane: PaneIndex,
        min: Size,
        proportion: i32,
    ) -> NodeId {
        let mut node = LayoutNode::new(NodeKind::Content(pane));
        node.min_size = min;
        let id = self.push(node);
        self.attach(parent, id, proportion, 0);
        id
    }

    pub fn set_min_size(&mut self, id: NodeId, min: Size) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.min_size = min;
        }
    }

    /// Minimum size of a node, border included.
    #[must_use]
    pub fn min_size(&self, id: NodeId) -> Size {
        let mut memo = vec![None; self.nodes.len()];
        self.min_with_border(id, &mut memo)
    }

    fn min_with_border(&self, id: NodeId, memo: &mut [Option<Size>]) -> Size {
        if let Some(size) = memo[id] {
            return size;
        }
        let node = &self.nodes[id];
        let mut min = node.min_size;
        if let NodeKind::Box(orientation) = node.kind {
            let mut main = 0;
            let mut cross = 0;
            for &child in &node.children {
                let child_min = self.min_with_border(child, memo);
                let (child_main, child_cross) = split_axes(child_min, orientation);
                main += child_main;
                cross = cross.max(child_cross);
            }
            min = min.max(join_axes(main, cross, orientation));
        }
        let size = Size::new(min.width + 2 * node.border, min.height + 2 * node.border);
        memo[id] = Some(size);
        size
    }

    /// Compute every node's rectangle with `root` filling `area`.
    #[must_use]
    pub fn realize(&self, root: NodeId, area: Rect) -> RealizedLayout {
        let mut realized = RealizedLayout {
            outer: vec![Rect::default(); self.nodes.len()],
            inner: vec![Rect::default(); self.nodes.len()],
        };
        if root >= self.nodes.len() {
            return realized;
        }
        let mut memo = vec![None; self.nodes.len()];
        self.place(root, area, &mut memo, &mut realized);
        realized
    }

    fn place(
        &self,
        id: NodeId,
        outer: Rect,
        memo: &mut [Option<Size>],
        realized: &mut RealizedLayout,
    ) {
        let node = &self.nodes[id];
        let inner = shrink(outer, node.border);
        realized.outer[id] = outer;
        realized.inner[id] = inner;

        let NodeKind::Box(orientation) = node.kind else {
            return;
        };
        if node.children.is_empty() {
            return;
        }

        let (main_total, cross_total) = split_axes(inner.size(), orientation);
        let mut fixed = 0;
        let mut stretchable: i64 = 0;
        for &child in &node.children {
            let child_node = &self.nodes[child];
            if child_node.proportion > 0 {
                stretchable += i64::from(child_node.proportion);
            } else {
                fixed += split_axes(self.min_with_border(child, memo), orientation).0;
            }
        }

        let mut delta = i64::from(main_total - fixed);
        let mut cursor = match orientation {
            Orientation::Horizontal => inner.x,
            Orientation::Vertical => inner.y,
        };
        for &child in &node.children {
            let child_node = &self.nodes[child];
            let child_min = split_axes(self.min_with_border(child, memo), orientation).0;
            let extent = if child_node.proportion > 0 && stretchable > 0 {
                let proportion = i64::from(child_node.proportion);
                let share = delta * proportion / stretchable;
                delta -= share;
                stretchable -= proportion;
                i32::try_from(share).unwrap_or(i32::MAX).max(child_min)
            } else {
                child_min
            };
            let rect = match orientation {
                Orientation::Horizontal => Rect::new(cursor, inner.y, extent, cross_total),
                Orientation::Vertical => Rect::new(inner.x, cursor, cross_total, extent),
            };
            cursor += extent;
            self.place(child, rect, memo, realized);
        }
    }
}

fn shrink(rect: Rect, border: i32) -> Rect {
    if border == 0 {
        rect
    } else {
        rect.inner(Sides::all(border))
    }
}

fn split_axes(size: Size, orientation: Orientation) -> (i32, i32) {
    match orientation {
        Orientation::Horizontal => (size.width, size.height),
        Orientation::Vertical => (size.height, size.width),
    }
}

fn join_axes(main: i32, cross: i32, orientation: Orientation) -> Size {
    match orientation {
        Orientation::Horizontal => Size::new(main, cross),
        Orientation::Vertical => Size::new(cross, main),
    }
}

/// Rectangles computed by [`LayoutTree::realize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RealizedLayout {
    outer: Vec<Rect>,
    inner: Vec<Rect>,
}

impl RealizedLayout {
    /// Rectangle allotted to a node, border included.
    #[must_use]
    pub fn outer(&self, id: NodeId) -> Rect {
        self.outer.get(id).copied().unwrap_or_default()
    }

    /// Rectangle of a node's content, border excluded.
    #[must_use]
    pub fn inner(&self, id: NodeId) -> Rect {
        self.inner.get(id).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stretchable_items_share_by_proportion() {
        let mut tree = LayoutTree::new();
        let root = tree.new_box(Orientation::Horizontal);
        let a = tree.add_spacer(root, Size::new(1, 1), 1);
        let sash = tree.add_spacer(root, Size::new(4, 4), 0);
        let b = tree.add_spacer(root, Size::new(1, 1), 1);
        let realized = tree.realize(root, Rect::new(0, 0, 104, 30));
        assert_eq!(realized.outer(a), Rect::new(0, 0, 50, 30));
        assert_eq!(realized.outer(sash), Rect::new(50, 0, 4, 30));
        assert_eq!(realized.outer(b), Rect::new(54, 0, 50, 30));
    }

    #[test]
    fn running_remainder_sums_exactly() {
        let mut tree = LayoutTree::new();
        let root = tree.new_box(Orientation::Vertical);
        let ids: Vec<_> = (0..3).map(|_| tree.add_spacer(root, Size::default(), 1)).collect();
        let realized = tree.realize(root, Rect::new(0, 0, 10, 100));
        let total: i32 = ids.iter().map(|&id| realized.outer(id).height).sum();
        assert_eq!(total, 100);
        assert_eq!(realized.outer(ids[2]).bottom(), 100);
    }

    #[test]
    fn fixed_items_get_their_minimum() {
        let mut tree = LayoutTree::new();
        let root = tree.new_box(Orientation::Vertical);
        let top = tree.add_spacer(root, Size::new(0, 40), 0);
        let rest = tree.add_spacer(root, Size::default(), 1);
        let realized = tree.realize(root, Rect::new(0, 0, 200, 100));
        assert_eq!(realized.outer(top), Rect::new(0, 0, 200, 40));
        assert_eq!(realized.outer(rest), Rect::new(0, 40, 200, 60));
    }

    #[test]
    fn minimum_overflows_instead_of_clamping() {
        let mut tree = LayoutTree::new();
        let root = tree.new_box(Orientation::Horizontal);
        let big = tree.add_spacer(root, Size::new(150, 1), 1);
        let other = tree.add_spacer(root, Size::new(1, 1), 1);
        let realized = tree.realize(root, Rect::new(0, 0, 100, 10));
        assert_eq!(realized.outer(big).width, 150);
        assert_eq!(realized.outer(other).x, 150);
    }

    #[test]
    fn border_insets_inner_rect() {
        let mut tree = LayoutTree::new();
        let root = tree.new_box(Orientation::Horizontal);
        let framed = tree.new_box(Orientation::Vertical);
        tree.attach(root, framed, 1, 2);
        let content = tree.add_content(framed, 0, Size::new(1, 1), 1);
        let realized = tree.realize(root, Rect::new(0, 0, 50, 40));
        assert_eq!(realized.outer(framed), Rect::new(0, 0, 50, 40));
        assert_eq!(realized.inner(framed), Rect::new(2, 2, 46, 36));
        assert_eq!(realized.outer(content), Rect::new(2, 2, 46, 36));
    }

    #[test]
    fn box_minimum_sums_children_along_main_axis() {
        let mut tree = LayoutTree::new();
        let root = tree.new_box(Orientation::Horizontal);
        tree.add_spacer(root, Size::new(10, 5), 0);
        tree.add_spacer(root, Size::new(20, 8), 1);
        assert_eq!(tree.min_size(root), Size::new(30, 8));

        let framed = tree.new_box(Orientation::Vertical);
        tree.attach(root, framed, 0, 1);
        tree.set_min_size(framed, Size::new(3, 30));
        assert_eq!(tree.min_size(framed), Size::new(5, 32));
        assert_eq!(tree.min_size(root), Size::new(35, 32));
    }

    #[test]
    fn attach_reuses_detached_subtree() {
        let mut tree = LayoutTree::new();
        let inner = tree.new_box(Orientation::Vertical);
        tree.add_spacer(inner, Size::default(), 1);
        let outer = tree.new_box(Orientation::Horizontal);
        tree.add_spacer(outer, Size::new(10, 0), 0);
        tree.attach(outer, inner, 1, 0);
        let realized = tree.realize(outer, Rect::new(0, 0, 100, 20));
        assert_eq!(realized.outer(inner), Rect::new(10, 0, 90, 20));
    }
}
