//! Drop resolution: where would a dragged pane land?
//!
//! [`DropResolver::resolve`] is pure. It reads the last layout pass (docks and
//! parts with realized rectangles) and returns a [`DropPlan`]: the target,
//! a copy of the pane array with the pane placed and its neighbours shifted,
//! and the hint rectangle the pane would occupy. Nothing live is touched
//! until the caller commits the plan.
//!
//! The cascade, first match wins:
//!
//! 1. Over a side dock: the window-side band of its thickness opens a row
//!    outside it, the center-side band a row inside it, and the middle joins
//!    the row next to the nearest pane.
//! 2. Near the managed window's border: a new outermost row of layer 0.
//! 3. Over the center area: its edge band opens a new innermost row, the rest
//!    docks at the center for center-dockable panes.
//! 4. Anywhere else: float at the pointer, or nothing.

use dockwork_core::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::art::ArtMetrics;
use crate::config::DropZoneTuning;
use crate::dock::{DockInfo, DockSizeMemo, insert_layer_slot, insert_pane_slot, insert_row_slot};
use crate::engine::{LayoutEngine, LayoutInput, center_rect};
use crate::pane::{DockDirection, PaneFlags, PaneIndex, PaneInfo, Placement, TOOLBAR_LAYER};
use crate::part::UiPartIndex;

/// Granularity of an insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertLevel {
    /// Share an existing row; panes at or after `pos` move along.
    Pane,
    /// New row; rows at or after `row` move toward the center.
    Row,
    /// New layer; layers at or after `layer` move outward.
    Dock,
}

/// Where a drop lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Dock(Placement, InsertLevel),
    /// Join the center dock at the given placement.
    Center(Placement),
    /// Float with the frame's top-left corner at the point.
    Float(Point),
    NoOp,
}

impl DropTarget {
    /// Placement the pane would be docked at, if any.
    #[must_use]
    pub fn placement(&self) -> Option<Placement> {
        match *self {
            Self::Dock(placement, _) | Self::Center(placement) => Some(placement),
            Self::Float(_) | Self::NoOp => None,
        }
    }
}

/// Everything a drop resolution reads.
#[derive(Debug, Clone, Copy)]
pub struct DropRequest<'a> {
    pub panes: &'a [PaneInfo],
    /// Docks of the last layout pass, rectangles realized.
    pub docks: &'a [DockInfo],
    /// Parts of the last layout pass, rectangles realized.
    pub parts: &'a UiPartIndex,
    pub memo: &'a DockSizeMemo,
    pub metrics: ArtMetrics,
    pub client: Size,
    pub dock_constraint: (f64, f64),
    /// The dragged pane.
    pub pane: PaneIndex,
    /// Pointer in managed-window coordinates.
    pub point: Point,
    /// Pointer offset within the dragged pane when the drag began.
    pub offset: Point,
    pub allow_floating: bool,
    pub tuning: DropZoneTuning,
}

/// Result of a drop resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropPlan {
    pub target: DropTarget,
    pub pane: PaneIndex,
    /// The pane array as it would be after committing.
    pub panes: Vec<PaneInfo>,
    /// Rectangle the pane would occupy once docked.
    pub hint: Option<Rect>,
}

impl DropPlan {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.target == DropTarget::NoOp
    }

    /// The dragged pane as placed by this plan.
    #[must_use]
    pub fn placed_pane(&self) -> Option<&PaneInfo> {
        self.panes.get(self.pane)
    }
}

/// Open a slot for `placement` at the given granularity.
///
/// Floating panes never move; lift the pane being placed out of the docks
/// first by marking it floating.
pub fn open_slot(panes: &mut [PaneInfo], placement: Placement, level: InsertLevel) {
    let Placement {
        direction,
        layer,
        row,
        pos,
    } = placement;
    match level {
        InsertLevel::Pane => insert_pane_slot(panes, direction, layer, row, pos),
        InsertLevel::Row => insert_row_slot(panes, direction, layer, row),
        InsertLevel::Dock => insert_layer_slot(panes, direction, layer),
    }
}

#[derive(Debug, Clone, Copy)]
struct Resolution {
    target: DropTarget,
    /// Pixel placement in a fixed dock; neighbours are bumped at layout
    /// time instead of shifted now.
    action_pane: bool,
}

impl Resolution {
    fn dock(placement: Placement, level: InsertLevel) -> Self {
        Self {
            target: DropTarget::Dock(placement, level),
            action_pane: false,
        }
    }

    fn plain(target: DropTarget) -> Self {
        Self {
            target,
            action_pane: false,
        }
    }
}

/// Stateless drop cascade.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropResolver;

impl DropResolver {
    #[must_use]
    pub fn resolve(request: &DropRequest<'_>) -> DropPlan {
        let _span = dockwork_core::debug_span!(
            "dock_drop",
            pane = request.pane,
            x = request.point.x,
            y = request.point.y
        )
        .entered();

        let Some(dragged) = request.panes.get(request.pane) else {
            return DropPlan {
                target: DropTarget::NoOp,
                pane: request.pane,
                panes: request.panes.to_vec(),
                hint: None,
            };
        };

        let resolution = over_dock(request, dragged)
            .or_else(|| near_window_border(request, dragged))
            .or_else(|| over_center(request, dragged))
            .unwrap_or_else(|| float_or_nothing(request, dragged));
        dockwork_core::trace!(outcome = ?resolution.target, "drop resolved");
        build_plan(request, resolution)
    }
}

fn build_plan(request: &DropRequest<'_>, resolution: Resolution) -> DropPlan {
    let index = request.pane;
    let mut panes = request.panes.to_vec();
    let target = resolution.target;
    match target {
        DropTarget::Dock(placement, level) => {
            panes[index].flags.insert(PaneFlags::FLOATING);
            if !resolution.action_pane {
                open_slot(&mut panes, placement, level);
            }
            place(&mut panes[index], placement, resolution.action_pane);
        }
        DropTarget::Center(placement) => {
            place(&mut panes[index], placement, false);
        }
        DropTarget::Float(at) => {
            let pane = &mut panes[index];
            pane.flags.insert(PaneFlags::FLOATING);
            pane.flags.remove(PaneFlags::HIDDEN | PaneFlags::ACTION_PANE);
            pane.floating_pos = Some(at);
        }
        DropTarget::NoOp => {}
    }
    let hint = match target {
        DropTarget::Dock(..) | DropTarget::Center(_) => hint_rect(request, &panes, index),
        DropTarget::Float(_) | DropTarget::NoOp => None,
    };
    DropPlan {
        target,
        pane: index,
        panes,
        hint,
    }
}

fn place(pane: &mut PaneInfo, placement: Placement, action_pane: bool) {
    pane.set_placement(placement);
    pane.flags.remove(PaneFlags::FLOATING | PaneFlags::HIDDEN);
    pane.set_flag(PaneFlags::ACTION_PANE, action_pane);
}

/// Border rectangle of `pane` in a spacer-only layout of `panes`.
fn hint_rect(request: &DropRequest<'_>, panes: &[PaneInfo], pane: PaneIndex) -> Option<Rect> {
    let input = LayoutInput {
        panes,
        memo: request.memo,
        metrics: request.metrics,
        client: request.client,
        dock_constraint: request.dock_constraint,
        spacer_only: true,
    };
    let mut output = LayoutEngine::layout(&input);
    let mut scratch = panes.to_vec();
    output.realize(
        Rect::from_size(request.client.width, request.client.height),
        &mut scratch,
    );
    let part = output.parts.pane_part(pane)?;
    output.parts.get(part).map(|part| part.rect)
}

fn max_row_excluding(
    panes: &[PaneInfo],
    skip: PaneIndex,
    direction: DockDirection,
    layer: i32,
) -> Option<i32> {
    panes
        .iter()
        .enumerate()
        .filter(|&(index, pane)| {
            index != skip
                && pane.is_docked()
                && pane.is_shown()
                && pane.direction == direction
                && pane.layer == layer
        })
        .map(|(_, pane)| pane.row)
        .max()
}

/// Nearest edge among `(direction, distance, band)` candidates inside their
/// band.
fn nearest_edge(candidates: [(DockDirection, i32, i32); 4]) -> Option<DockDirection> {
    candidates
        .into_iter()
        .filter(|&(_, distance, band)| distance >= 0 && distance < band)
        .min_by_key(|&(_, distance, _)| distance)
        .map(|(direction, _, _)| direction)
}

fn over_dock(request: &DropRequest<'_>, dragged: &PaneInfo) -> Option<Resolution> {
    let point = request.point;
    let dock = request
        .docks
        .iter()
        .filter(|dock| !dock.is_center() && dock.rect.contains(point))
        .min_by_key(|dock| dock.layer())?;
    let direction = dock.direction();

    if dragged.is_toolbar() && !dock.fixed {
        return None;
    }
    if !dragged.is_dockable_on(direction) {
        return None;
    }
    if dock.toolbar && !dragged.is_toolbar() {
        // row just inside the toolbars
        let layer = request
            .docks
            .iter()
            .filter(|other| other.direction() == direction && !other.toolbar)
            .map(DockInfo::layer)
            .max()
            .unwrap_or(0);
        return Some(Resolution::dock(
            Placement::new(direction, layer, 0, 0),
            InsertLevel::Row,
        ));
    }

    let horizontal = dock.is_horizontal();
    let rect = dock.rect;
    let (cross, cross_start, thickness) = if horizontal {
        (point.y, rect.y, rect.height)
    } else {
        (point.x, rect.x, rect.width)
    };
    let from_start = f64::from(cross - cross_start) / f64::from(thickness.max(1));
    let from_window = match direction {
        DockDirection::Top | DockDirection::Left => from_start,
        _ => 1.0 - from_start,
    };
    let edge = request.tuning.row_edge_fraction;
    if from_window < edge {
        return Some(Resolution::dock(
            Placement::new(direction, dock.layer(), dock.row(), 0),
            InsertLevel::Row,
        ));
    }
    if from_window > 1.0 - edge {
        return Some(Resolution::dock(
            Placement::new(direction, dock.layer(), dock.row() + 1, 0),
            InsertLevel::Row,
        ));
    }

    let main = |rect: Rect| {
        if horizontal {
            (rect.x, rect.width)
        } else {
            (rect.y, rect.height)
        }
    };
    let pointer_main = if horizontal { point.x } else { point.y };

    if dock.fixed {
        let offset_main = if horizontal {
            request.offset.x
        } else {
            request.offset.y
        };
        let (start, _) = main(rect);
        let pos = pointer_main - start - offset_main;
        return Some(Resolution {
            target: DropTarget::Dock(
                Placement::new(direction, dock.layer(), dock.row(), pos),
                InsertLevel::Pane,
            ),
            action_pane: true,
        });
    }

    let nearest = dock
        .panes
        .iter()
        .copied()
        .filter(|&index| index != request.pane)
        .filter_map(|index| {
            let part = request.parts.pane_part(index)?;
            request.parts.get(part).map(|part| (index, part.rect))
        })
        .min_by_key(|&(_, rect)| {
            let (start, len) = main(rect);
            if pointer_main < start {
                start - pointer_main
            } else if pointer_main >= start + len {
                pointer_main - (start + len) + 1
            } else {
                0
            }
        });
    let pos = match nearest {
        None => 0,
        Some((index, rect)) => {
            let (start, len) = main(rect);
            let into = f64::from(pointer_main - start) / f64::from(len.max(1));
            let pos = request.panes[index].pos;
            if into < request.tuning.pane_before_fraction {
                pos
            } else {
                pos + 1
            }
        }
    };
    Some(Resolution::dock(
        Placement::new(direction, dock.layer(), dock.row(), pos),
        InsertLevel::Pane,
    ))
}

fn near_window_border(request: &DropRequest<'_>, dragged: &PaneInfo) -> Option<Resolution> {
    let Size { width, height } = request.client;
    let point = request.point;
    let fraction = request.tuning.window_border_fraction;
    let band_x = (f64::from(width) * fraction) as i32;
    let band_y = (f64::from(height) * fraction) as i32;
    let direction = nearest_edge([
        (DockDirection::Top, point.y, band_y),
        (DockDirection::Right, width - 1 - point.x, band_x),
        (DockDirection::Bottom, height - 1 - point.y, band_y),
        (DockDirection::Left, point.x, band_x),
    ])?;
    if !dragged.is_dockable_on(direction) {
        return None;
    }
    if dragged.is_toolbar() {
        let row = max_row_excluding(request.panes, request.pane, direction, TOOLBAR_LAYER)
            .map_or(0, |row| row + 1);
        return Some(Resolution::dock(
            Placement::new(direction, TOOLBAR_LAYER, row, 0),
            InsertLevel::Row,
        ));
    }
    Some(Resolution::dock(
        Placement::new(direction, 0, 0, 0),
        InsertLevel::Row,
    ))
}

fn over_center(request: &DropRequest<'_>, dragged: &PaneInfo) -> Option<Resolution> {
    if dragged.is_toolbar() {
        return None;
    }
    let center = center_rect(request.docks, request.parts)?;
    let point = request.point;
    if !center.contains(point) {
        return None;
    }
    let tuning = request.tuning;
    let band = |extent: i32| {
        ((f64::from(extent) * tuning.center_edge_fraction) as i32).min(tuning.center_edge_max_px)
    };
    let (band_x, band_y) = (band(center.width), band(center.height));
    let edge = nearest_edge([
        (DockDirection::Top, point.y - center.y, band_y),
        (DockDirection::Right, center.right() - 1 - point.x, band_x),
        (DockDirection::Bottom, center.bottom() - 1 - point.y, band_y),
        (DockDirection::Left, point.x - center.x, band_x),
    ]);
    if let Some(direction) = edge.filter(|&direction| dragged.is_dockable_on(direction)) {
        let row =
            max_row_excluding(request.panes, request.pane, direction, 0).map_or(0, |row| row + 1);
        return Some(Resolution::dock(
            Placement::new(direction, 0, row, 0),
            InsertLevel::Row,
        ));
    }
    if !dragged.is_center_dockable() {
        return None;
    }
    let pos = request
        .panes
        .iter()
        .enumerate()
        .filter(|&(index, pane)| index != request.pane && pane.is_center() && pane.is_docked())
        .map(|(_, pane)| pane.pos + 1)
        .max()
        .unwrap_or(0);
    Some(Resolution::plain(DropTarget::Center(Placement::new(
        DockDirection::Center,
        0,
        0,
        pos,
    ))))
}

fn float_or_nothing(request: &DropRequest<'_>, dragged: &PaneInfo) -> Resolution {
    if request.allow_floating && dragged.is_floatable() {
        Resolution::plain(DropTarget::Float(request.point.offset_from(request.offset)))
    } else {
        Resolution::plain(DropTarget::NoOp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::LayoutOutput;
    use crate::pane::{DEFAULT_PROPORTION, WindowId};

    const CLIENT: Size = Size::new(800, 600);

    fn pane(name: &str, id: u64) -> PaneInfo {
        PaneInfo::new()
            .name(name)
            .window(WindowId::new(id))
            .proportion(DEFAULT_PROPORTION)
            .best_size(10, 40)
    }

    struct Live {
        panes: Vec<PaneInfo>,
        output: LayoutOutput,
    }

    fn live(mut panes: Vec<PaneInfo>) -> Live {
        let memo = DockSizeMemo::new();
        let mut output = LayoutEngine::layout(&LayoutInput {
            panes: &panes,
            memo: &memo,
            metrics: ArtMetrics::default(),
            client: CLIENT,
            dock_constraint: (1.0 / 3.0, 1.0 / 3.0),
            spacer_only: false,
        });
        output.apply_positions(&mut panes);
        output.realize(Rect::from_size(CLIENT.width, CLIENT.height), &mut panes);
        Live { panes, output }
    }

    fn resolve(live: &Live, pane: PaneIndex, point: Point) -> DropPlan {
        DropResolver::resolve(&DropRequest {
            panes: &live.panes,
            docks: &live.output.docks,
            parts: &live.output.parts,
            memo: &live.output.memo,
            metrics: ArtMetrics::default(),
            client: CLIENT,
            dock_constraint: (1.0 / 3.0, 1.0 / 3.0),
            pane,
            point,
            offset: Point::new(10, 5),
            allow_floating: true,
            tuning: DropZoneTuning::default(),
        })
    }

    fn two_pane_top() -> Live {
        live(vec![
            pane("a", 1).top(),
            pane("b", 2).top().position(1),
            pane("c", 3).float(),
        ])
    }

    #[test]
    fn inner_band_joins_row_after_hovered_pane() {
        let live = two_pane_top();
        let a = live.panes[0].rect;
        let plan = resolve(&live, 2, Point::new(a.x + a.width * 3 / 4, 29));
        assert_eq!(
            plan.target,
            DropTarget::Dock(
                Placement::new(DockDirection::Top, 0, 0, 1),
                InsertLevel::Pane
            )
        );
        assert_eq!(plan.panes[0].pos, 0);
        assert_eq!(plan.panes[1].pos, 2);
        let c = plan.placed_pane().unwrap();
        assert!(c.is_docked());
        assert_eq!(c.pos, 1);
        assert_eq!(plan.hint, Some(Rect::new(268, 0, 264, 59)));
    }

    #[test]
    fn leading_part_of_pane_inserts_before_it() {
        let live = two_pane_top();
        let b = live.output.parts.pane_part(1).unwrap();
        let b = live.output.parts.get(b).unwrap().rect;
        let plan = resolve(&live, 2, Point::new(b.x + 10, 29));
        assert_eq!(plan.target.placement().unwrap().pos, 1);
        assert_eq!(plan.panes[1].pos, 2);
    }

    #[test]
    fn window_side_band_opens_outer_row() {
        let live = two_pane_top();
        let plan = resolve(&live, 2, Point::new(100, 2));
        assert_eq!(
            plan.target,
            DropTarget::Dock(
                Placement::new(DockDirection::Top, 0, 0, 0),
                InsertLevel::Row
            )
        );
        assert_eq!(plan.panes[0].row, 1);
        assert_eq!(plan.panes[1].row, 1);
        assert_eq!(plan.panes[2].row, 0);
    }

    #[test]
    fn center_side_band_opens_inner_row() {
        let live = two_pane_top();
        let plan = resolve(&live, 2, Point::new(100, 56));
        assert_eq!(
            plan.target,
            DropTarget::Dock(
                Placement::new(DockDirection::Top, 0, 1, 0),
                InsertLevel::Row
            )
        );
        assert_eq!(plan.panes[0].row, 0);
    }

    #[test]
    fn window_border_opens_outermost_row() {
        let mut panes = vec![pane("a", 1).left(), pane("f", 2).float()];
        panes[0].best_size = Some(Size::new(100, 10));
        let live = live(panes);
        let plan = resolve(&live, 1, Point::new(400, 590));
        assert_eq!(
            plan.target,
            DropTarget::Dock(
                Placement::new(DockDirection::Bottom, 0, 0, 0),
                InsertLevel::Row
            )
        );
        assert!(plan.hint.is_some());
    }

    #[test]
    fn floating_pane_redocks_at_left_edge() {
        let live = live(vec![pane("a", 1).float()]);
        let plan = resolve(&live, 0, Point::new(5, 300));
        assert_eq!(
            plan.target,
            DropTarget::Dock(
                Placement::new(DockDirection::Left, 0, 0, 0),
                InsertLevel::Row
            )
        );
        assert!(!plan.panes[0].is_floating());
    }

    #[test]
    fn undockable_side_falls_through() {
        let live = live(vec![pane("a", 1).float().left_dockable(false)]);
        let plan = resolve(&live, 0, Point::new(5, 300));
        // the center edge band is also on the left side, so the pane floats
        assert_eq!(plan.target, DropTarget::Float(Point::new(-5, 295)));
        assert!(plan.hint.is_none());
    }

    #[test]
    fn center_edge_band_opens_innermost_row() {
        let live = two_pane_top();
        let center = live.output.center_rect().unwrap();
        let plan = resolve(&live, 2, Point::new(400, center.y + 5));
        assert_eq!(
            plan.target,
            DropTarget::Dock(
                Placement::new(DockDirection::Top, 0, 1, 0),
                InsertLevel::Row
            )
        );
    }

    #[test]
    fn center_docking_requires_flag() {
        let live = two_pane_top();
        let plan = resolve(&live, 2, Point::new(400, 300));
        assert_eq!(plan.target, DropTarget::Float(Point::new(390, 295)));

        let mut live = live;
        live.panes[2] = live.panes[2].clone().center_dockable(true);
        let plan = resolve(&live, 2, Point::new(400, 300));
        assert_eq!(
            plan.target,
            DropTarget::Center(Placement::new(DockDirection::Center, 0, 0, 0))
        );
        assert!(plan.hint.is_some());
    }

    #[test]
    fn nothing_when_floating_disallowed() {
        let live = two_pane_top();
        let plan = DropResolver::resolve(&DropRequest {
            panes: &live.panes,
            docks: &live.output.docks,
            parts: &live.output.parts,
            memo: &live.output.memo,
            metrics: ArtMetrics::default(),
            client: CLIENT,
            dock_constraint: (1.0 / 3.0, 1.0 / 3.0),
            pane: 2,
            point: Point::new(400, 300),
            offset: Point::default(),
            allow_floating: false,
            tuning: DropZoneTuning::default(),
        });
        assert!(plan.is_noop());
        assert_eq!(plan.panes, live.panes);
        assert!(plan.hint.is_none());
    }

    #[test]
    fn toolbar_skips_proportional_docks_and_uses_toolbar_layer() {
        let toolbar = PaneInfo::new()
            .name("tb")
            .window(WindowId::new(9))
            .toolbar_pane()
            .best_size(120, 20)
            .float();
        let mut panes = two_pane_top().panes;
        panes.push(toolbar);
        let live = live(panes);
        let plan = resolve(&live, 3, Point::new(400, 10));
        // over the proportional top dock, inside the top border band
        assert_eq!(
            plan.target,
            DropTarget::Dock(
                Placement::new(DockDirection::Top, TOOLBAR_LAYER, 0, 0),
                InsertLevel::Row
            )
        );
    }

    #[test]
    fn toolbar_in_fixed_dock_uses_pixel_position() {
        let toolbar = |name: &str, id: u64| {
            PaneInfo::new()
                .name(name)
                .window(WindowId::new(id))
                .top()
                .toolbar_pane()
                .pane_border(false)
                .best_size(100, 20)
        };
        let live = live(vec![toolbar("one", 1), toolbar("two", 2).position(200)]);
        let plan = resolve(&live, 1, Point::new(60, 10));
        assert_eq!(
            plan.target,
            DropTarget::Dock(
                Placement::new(DockDirection::Top, TOOLBAR_LAYER, 0, 50),
                InsertLevel::Pane
            )
        );
        let placed = plan.placed_pane().unwrap();
        assert!(placed.has_flag(PaneFlags::ACTION_PANE));
        // the first toolbar keeps its position; bumping happens at layout
        assert_eq!(plan.panes[0].pos, 0);
        assert!(plan.hint.is_some());
    }

    #[test]
    fn open_slot_levels() {
        let mut panes = vec![
            PaneInfo::new().left().layer(0).row(0).position(0),
            PaneInfo::new().left().layer(1).row(0).position(0),
        ];
        open_slot(
            &mut panes,
            Placement::new(DockDirection::Left, 0, 0, 0),
            InsertLevel::Dock,
        );
        assert_eq!((panes[0].layer, panes[1].layer), (1, 2));
        open_slot(
            &mut panes,
            Placement::new(DockDirection::Left, 1, 0, 0),
            InsertLevel::Pane,
        );
        assert_eq!(panes[0].pos, 1);
    }
}
