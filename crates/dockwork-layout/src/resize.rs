//! Sash arithmetic: pointer position → new dock size or pane proportions.
//!
//! Both functions read the last realized layout and return the values to
//! write back; they never touch the pane array themselves.

use dockwork_core::geometry::{Point, Rect, Size};

use crate::art::ArtMetrics;
use crate::dock::DockInfo;
use crate::pane::{DockDirection, PaneIndex, PaneInfo};

/// New pixel thickness for a dock whose sash is dragged to `pointer`.
///
/// `grab` is the pointer offset inside the sash when the drag began and
/// `sash` the sash rectangle at that time. Growth is limited to the space
/// the other docks leave free.
#[must_use]
pub fn dock_size_for_pointer(
    docks: &[DockInfo],
    dock: &DockInfo,
    sash: Rect,
    pointer: Point,
    grab: Point,
    client: Size,
    sash_size: i32,
) -> i32 {
    let mut used_width = 0;
    let mut used_height = 0;
    for other in docks {
        let sash_extent = if other.resizable { sash_size } else { 0 };
        match other.direction() {
            DockDirection::Top | DockDirection::Bottom => used_height += other.size + sash_extent,
            DockDirection::Left | DockDirection::Right => used_width += other.size + sash_extent,
            DockDirection::Center | DockDirection::None => {}
        }
    }
    let available_width = client.width - used_width;
    let available_height = client.height - used_height;

    let at = pointer.offset_from(grab);
    let rect = dock.rect;
    let (requested, available) = match dock.direction() {
        DockDirection::Left => (at.x - rect.x, available_width),
        DockDirection::Top => (at.y - rect.y, available_height),
        DockDirection::Right => (rect.right() - at.x - sash.width, available_width),
        DockDirection::Bottom => (rect.bottom() - at.y - sash.height, available_height),
        DockDirection::Center | DockDirection::None => return dock.size,
    };
    let grown = requested.min(dock.size + available.max(0));
    grown.max(dock.min_size).max(0)
}

/// Proportions after a pane sash move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProportionChange {
    pub pane: PaneIndex,
    pub proportion: i32,
    /// The next resizable pane, which gives or takes the difference.
    pub neighbour: PaneIndex,
    pub neighbour_proportion: i32,
}

/// Proportion transfer for the sash after `pane` dragged to `pointer`.
///
/// `pane_rect` is the pane's outer (border) rectangle. The pane grows or
/// shrinks at the expense of the next resizable pane of the dock; neither
/// goes below its minimum size. Returns `None` when nothing can be
/// transferred (no resizable neighbour, an empty dock, zero total weight).
#[must_use]
pub fn proportions_for_pointer(
    dock: &DockInfo,
    panes: &[PaneInfo],
    pane: PaneIndex,
    pane_rect: Rect,
    pointer: Point,
    grab: Point,
    metrics: &ArtMetrics,
) -> Option<ProportionChange> {
    let horizontal = dock.is_horizontal();
    let at = pointer.offset_from(grab);
    let mut new_pixels = if horizontal {
        at.x - pane_rect.x
    } else {
        at.y - pane_rect.y
    };
    let mut dock_pixels = if horizontal {
        dock.rect.width
    } else {
        dock.rect.height
    };

    let mut total: i64 = 0;
    let mut slot_of_pane = None;
    for (slot, &index) in dock.panes.iter().enumerate() {
        let member = panes.get(index)?;
        if index == pane {
            slot_of_pane = Some(slot);
        }
        if slot > 0 {
            dock_pixels -= metrics.sash_size;
        }
        if member.is_fixed() {
            dock_pixels -= member.best_size.unwrap_or_default().along(horizontal);
        } else {
            total += i64::from(member.proportion);
        }
    }
    let slot = slot_of_pane?;
    let neighbour = dock.panes[slot + 1..]
        .iter()
        .copied()
        .find(|&index| panes.get(index).is_some_and(|p| !p.is_fixed()))?;
    if dock_pixels <= 0 || total == 0 {
        return None;
    }
    new_pixels = new_pixels.min(dock_pixels);

    let to_proportion = |pixels: i32| -> i64 { i64::from(pixels) * total / i64::from(dock_pixels) };
    let resized = panes.get(pane)?;
    let borrowed = panes.get(neighbour)?;
    let min_pane = to_proportion(min_extent(resized, horizontal, metrics));
    let min_neighbour = to_proportion(min_extent(borrowed, horizontal, metrics));

    let available = i64::from(resized.proportion) + i64::from(borrowed.proportion);
    let ceiling = (available - min_neighbour).max(min_pane);
    let proportion = to_proportion(new_pixels).clamp(min_pane, ceiling);
    let neighbour_proportion = (available - proportion).max(0);

    Some(ProportionChange {
        pane,
        proportion: i32::try_from(proportion).unwrap_or(i32::MAX),
        neighbour,
        neighbour_proportion: i32::try_from(neighbour_proportion).unwrap_or(i32::MAX),
    })
}

/// Minimum main-axis extent of a pane, decorations included, plus one pixel
/// of slack lost to integer division.
fn min_extent(pane: &PaneInfo, horizontal: bool, metrics: &ArtMetrics) -> i32 {
    let mut extent = 0;
    if let Some(min) = pane.min_size {
        if pane.has_border() {
            extent += metrics.pane_border_size * 2;
        }
        if horizontal {
            extent += min.width;
        } else {
            extent += min.height;
            if pane.has_caption() {
                extent += metrics.caption_size;
            }
        }
    }
    extent + 1
}
