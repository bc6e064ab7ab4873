//! Dock manager facade.
//!
//! [`DockManager`] owns the pane array for one managed window and the
//! derived state of its last layout pass (docks, parts, remembered dock
//! sizes). Hosts feed it pointer events and a client size, call
//! [`DockManager::update`] after changing panes, and paint with
//! [`DockManager::render`].
//!
//! Pane indices handed out through parts and notifications are valid until
//! the next call that adds or removes a pane.

use dockwork_core::event::PointerEvent;
use dockwork_core::geometry::{Point, Rect, Size};

use crate::art::{ArtMetrics, Canvas, DefaultDockArt, DockArt};
use crate::config::{ConfigError, ManagerConfig};
use crate::dock::{DockInfo, DockSizeMemo, pane_positions_and_sizes};
use crate::drop::{DropPlan, DropRequest, DropResolver, InsertLevel, open_slot};
use crate::engine::{LayoutEngine, LayoutInput};
use crate::floating::{FloatingHost, NullFloatingHost};
use crate::interaction::{
    InteractionController, InteractionEffect, InteractionState, InteractionTransition,
    InteractionView, SashTarget,
};
use crate::notify::{ManagerEvent, NotificationResult, NotificationSink, ProceedSink};
use crate::pane::{
    ButtonKind, DEFAULT_PROPORTION, PaneFlags, PaneIndex, PaneInfo, WindowId, buttons_from_flags,
};
use crate::part::{UiPart, UiPartIndex};
use crate::perspective;
use crate::resize::{dock_size_for_pointer, proportions_for_pointer};

/// Layout manager for one managed window.
pub struct DockManager {
    config: ManagerConfig,
    panes: Vec<PaneInfo>,
    docks: Vec<DockInfo>,
    parts: UiPartIndex,
    memo: DockSizeMemo,
    client: Size,
    maximized: Option<PaneIndex>,
    art: Box<dyn DockArt>,
    floating: Box<dyn FloatingHost>,
    sink: Box<dyn NotificationSink>,
    interaction: InteractionController,
    /// Plan of the drag in progress, from the last pointer move.
    drag_plan: Option<DropPlan>,
    hint: Option<Rect>,
}

impl std::fmt::Debug for DockManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockManager")
            .field("config", &self.config)
            .field("panes", &self.panes.len())
            .field("docks", &self.docks.len())
            .field("parts", &self.parts.len())
            .field("client", &self.client)
            .field("maximized", &self.maximized)
            .field("interaction", &self.interaction.state())
            .finish_non_exhaustive()
    }
}

impl Default for DockManager {
    fn default() -> Self {
        Self::with_valid_config(ManagerConfig::default())
    }
}

impl DockManager {
    /// Create a manager with default art, no floating frames, and a sink
    /// that lets everything proceed.
    pub fn new(config: ManagerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: ManagerConfig) -> Self {
        Self {
            interaction: InteractionController::new(config.drag_threshold).unwrap_or_default(),
            config,
            panes: Vec::new(),
            docks: Vec::new(),
            parts: UiPartIndex::new(),
            memo: DockSizeMemo::new(),
            client: Size::default(),
            maximized: None,
            art: Box::new(DefaultDockArt::new()),
            floating: Box::new(NullFloatingHost::new()),
            sink: Box::new(ProceedSink),
            drag_plan: None,
            hint: None,
        }
    }

    // --- configuration ---

    #[must_use]
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Replace the configuration. Cancels any interaction in progress.
    pub fn set_config(&mut self, config: ManagerConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.cancel_interaction();
        self.interaction = InteractionController::new(config.drag_threshold).unwrap_or_default();
        self.config = config;
        Ok(())
    }

    pub fn set_managed_size(&mut self, size: Size) {
        self.client = Size::new(size.width.max(0), size.height.max(0));
    }

    #[must_use]
    pub fn managed_size(&self) -> Size {
        self.client
    }

    /// Largest fraction of the managed window a newly sized dock takes.
    pub fn set_dock_size_constraint(&mut self, width: f64, height: f64) {
        let clamp = |v: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { 1.0 };
        self.config.dock_constraint_x = clamp(width);
        self.config.dock_constraint_y = clamp(height);
    }

    #[must_use]
    pub fn dock_size_constraint(&self) -> (f64, f64) {
        (self.config.dock_constraint_x, self.config.dock_constraint_y)
    }

    pub fn set_art(&mut self, art: Box<dyn DockArt>) {
        self.art = art;
    }

    #[must_use]
    pub fn art(&self) -> &dyn DockArt {
        self.art.as_ref()
    }

    pub fn set_floating_host(&mut self, host: Box<dyn FloatingHost>) {
        self.floating = host;
    }

    pub fn set_notification_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sink = sink;
    }

    fn metrics(&self) -> ArtMetrics {
        ArtMetrics::from_art(self.art.as_ref())
    }

    // --- lookup ---

    #[must_use]
    pub fn panes(&self) -> &[PaneInfo] {
        &self.panes
    }

    #[must_use]
    pub fn pane(&self, name: &str) -> Option<&PaneInfo> {
        self.panes.iter().find(|p| p.name == name)
    }

    pub fn pane_mut(&mut self, name: &str) -> Option<&mut PaneInfo> {
        self.panes.iter_mut().find(|p| p.name == name)
    }

    #[must_use]
    pub fn pane_by_window(&self, window: WindowId) -> Option<&PaneInfo> {
        self.panes.iter().find(|p| p.window == window)
    }

    #[must_use]
    pub fn pane_index(&self, name: &str) -> Option<PaneIndex> {
        self.panes.iter().position(|p| p.name == name)
    }

    fn index_of_window(&self, window: WindowId) -> Option<PaneIndex> {
        if window.is_null() {
            return None;
        }
        self.panes.iter().position(|p| p.window == window)
    }

    /// Docks of the last layout pass.
    #[must_use]
    pub fn docks(&self) -> &[DockInfo] {
        &self.docks
    }

    /// Parts of the last layout pass.
    #[must_use]
    pub fn parts(&self) -> &UiPartIndex {
        &self.parts
    }

    /// The part under `point` in the last layout pass.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<&UiPart> {
        self.parts.hit_test(point).and_then(|index| self.parts.get(index))
    }

    /// Hint rectangle to show while a sash or pane is dragged.
    #[must_use]
    pub fn hint_rect(&self) -> Option<Rect> {
        self.hint
    }

    #[must_use]
    pub fn maximized_pane(&self) -> Option<&PaneInfo> {
        self.maximized.and_then(|index| self.panes.get(index))
    }

    #[must_use]
    pub fn interaction_state(&self) -> InteractionState {
        self.interaction.state()
    }

    /// Remembered pixel thickness of each proportional dock.
    #[must_use]
    pub fn dock_sizes(&self) -> &DockSizeMemo {
        &self.memo
    }

    // --- pane management ---

    fn unique_name(&self, window: WindowId) -> String {
        let base = format!("pane-{:08x}", window.get());
        if self.pane(&base).is_none() {
            return base;
        }
        (2u32..)
            .map(|n| format!("{base}-{n}"))
            .find(|candidate| self.pane(candidate).is_none())
            .unwrap_or(base)
    }

    /// Normalize a pane about to be managed.
    fn adopt(&self, window: WindowId, mut info: PaneInfo) -> PaneInfo {
        info.window = window;
        info.frame = None;
        if info.name.is_empty() || self.pane(&info.name).is_some() {
            let generated = self.unique_name(window);
            dockwork_core::debug!(requested = %info.name, generated = %generated, "pane renamed");
            info.name = generated;
        }
        if info.proportion == 0 {
            info.proportion = DEFAULT_PROPORTION;
        }
        if info.buttons.is_empty() {
            info.buttons = buttons_from_flags(info.flags);
        }
        info.best_size = match (info.best_size, info.min_size) {
            (Some(best), Some(min)) => Some(best.max(min)),
            (None, min) => min,
            (best, None) => best,
        };
        if info.is_center() {
            info.flags.remove(PaneFlags::HIDDEN);
        }
        info.flags.remove(PaneFlags::RUNTIME_ONLY);
        info
    }

    /// Start managing `window` with the settings in `info`.
    ///
    /// Returns `false` for the null window or a window already managed. An
    /// empty or taken name is replaced with a generated one.
    pub fn add_pane(&mut self, window: WindowId, info: PaneInfo) -> bool {
        if window.is_null() || self.index_of_window(window).is_some() {
            return false;
        }
        let info = self.adopt(window, info);
        if info.is_docked() {
            self.restore_maximized_pane();
        }
        dockwork_core::debug!(pane = %info.name, window = %window, "pane added");
        self.panes.push(info);
        true
    }

    /// Add a pane and drop it at `point` as if it had been dragged there.
    pub fn add_pane_at(&mut self, window: WindowId, info: PaneInfo, point: Point) -> bool {
        if !self.add_pane(window, info) {
            return false;
        }
        let pane = self.panes.len() - 1;
        // The new pane is not laid out yet; resolve against the current pass.
        let plan = self.resolve_drop(pane, point, Point::default());
        if !plan.is_noop() {
            self.commit_drop(plan);
        }
        true
    }

    /// Insert a pane at its placement, opening a slot at `level` first.
    ///
    /// An already managed window is moved there and takes the settings of
    /// `info`.
    pub fn insert_pane(&mut self, window: WindowId, info: PaneInfo, level: InsertLevel) -> bool {
        if window.is_null() {
            return false;
        }
        let placement = info.placement();
        match self.index_of_window(window) {
            Some(index) => {
                // lift it out so it does not shift itself
                self.panes[index].flags.insert(PaneFlags::FLOATING);
                open_slot(&mut self.panes, placement, level);
                let name = self.panes[index].name.clone();
                let taken = self
                    .panes
                    .iter()
                    .enumerate()
                    .any(|(other, p)| other != index && p.name == info.name);
                let pane = &mut self.panes[index];
                pane.safe_set(&info);
                if pane.name.is_empty() || taken {
                    pane.name = name;
                }
                if pane.proportion == 0 {
                    pane.proportion = DEFAULT_PROPORTION;
                }
                pane.flags.remove(PaneFlags::RUNTIME_ONLY);
                true
            }
            None => {
                open_slot(&mut self.panes, placement, level);
                self.add_pane(window, info)
            }
        }
    }

    /// Stop managing `window`. Its floating frame, if any, is destroyed.
    pub fn detach_pane(&mut self, window: WindowId) -> bool {
        let Some(index) = self.index_of_window(window) else {
            return false;
        };
        self.cancel_interaction();
        let pane = self.panes.remove(index);
        if let Some(frame) = pane.frame {
            self.floating.destroy(frame);
        }
        dockwork_core::debug!(pane = %pane.name, "pane detached");
        // part indices now refer to shifted panes
        self.relayout();
        true
    }

    /// Close a pane: hide it, or detach it if it is destroy-on-close.
    pub fn close_pane(&mut self, name: &str) -> bool {
        match self.pane_index(name) {
            Some(index) => {
                self.close_pane_at(index);
                true
            }
            None => false,
        }
    }

    fn close_pane_at(&mut self, index: PaneIndex) {
        if self.panes[index].is_maximized() {
            self.restore_pane_at(index);
        }
        if let Some(frame) = self.panes[index].frame.take() {
            self.floating.destroy(frame);
        }
        if self.panes[index].is_destroy_on_close() {
            let window = self.panes[index].window;
            self.detach_pane(window);
        } else {
            self.panes[index].flags.insert(PaneFlags::HIDDEN);
            self.panes[index].flags.remove(PaneFlags::ACTIVE);
        }
    }

    /// Maximize a docked pane, hiding every other docked non-toolbar pane.
    pub fn maximize_pane(&mut self, name: &str) -> bool {
        match self.pane_index(name) {
            Some(index) if self.panes[index].is_docked() => {
                self.maximize_pane_at(index);
                true
            }
            _ => false,
        }
    }

    fn maximize_pane_at(&mut self, index: PaneIndex) {
        for pane in &mut self.panes {
            if pane.is_toolbar() || pane.is_floating() {
                continue;
            }
            pane.flags.remove(PaneFlags::MAXIMIZED);
            let hidden = pane.has_flag(PaneFlags::HIDDEN);
            pane.set_flag(PaneFlags::SAVED_HIDDEN, hidden);
            pane.flags.insert(PaneFlags::HIDDEN);
        }
        let pane = &mut self.panes[index];
        pane.flags.insert(PaneFlags::MAXIMIZED);
        pane.flags.remove(PaneFlags::HIDDEN);
        self.maximized = Some(index);
        dockwork_core::debug!(pane = %pane.name, "pane maximized");
    }

    /// Undo [`maximize_pane`](Self::maximize_pane) for `name`.
    pub fn restore_pane(&mut self, name: &str) -> bool {
        match self.pane_index(name) {
            Some(index) => {
                self.restore_pane_at(index);
                true
            }
            None => false,
        }
    }

    fn restore_pane_at(&mut self, index: PaneIndex) {
        for pane in &mut self.panes {
            if pane.is_toolbar() || pane.is_floating() {
                continue;
            }
            let hidden = pane.has_flag(PaneFlags::SAVED_HIDDEN);
            pane.set_flag(PaneFlags::HIDDEN, hidden);
            pane.flags.remove(PaneFlags::SAVED_HIDDEN);
        }
        let pane = &mut self.panes[index];
        pane.flags.remove(PaneFlags::MAXIMIZED);
        pane.flags.remove(PaneFlags::HIDDEN);
        self.maximized = None;
        dockwork_core::debug!(pane = %pane.name, "pane restored");
    }

    /// Restore whichever pane is maximized.
    pub fn restore_maximized_pane(&mut self) -> bool {
        match self.panes.iter().position(PaneInfo::is_maximized) {
            Some(index) => {
                self.restore_pane_at(index);
                true
            }
            None => false,
        }
    }

    /// Mark one pane active and announce it.
    pub fn set_active_pane(&mut self, name: &str) -> bool {
        match self.pane_index(name) {
            Some(index) => {
                self.activate(index);
                true
            }
            None => false,
        }
    }

    fn activate(&mut self, index: PaneIndex) {
        for pane in &mut self.panes {
            pane.flags.remove(PaneFlags::ACTIVE);
        }
        self.panes[index].flags.insert(PaneFlags::ACTIVE);
        let event = ManagerEvent::PaneActivated {
            index,
            pane: &self.panes[index],
        };
        let _ = self.sink.notify(&event);
    }

    // --- layout ---

    /// Apply pane changes: sync floating frames and run a layout pass.
    pub fn update(&mut self) {
        let _span = dockwork_core::debug_span!("dock_update", panes = self.panes.len()).entered();

        for pane in &mut self.panes {
            if pane.is_docked() {
                if let Some(frame) = pane.frame.take() {
                    self.floating.destroy(frame);
                }
            }
            if !self.config.allow_active_pane {
                pane.flags.remove(PaneFlags::ACTIVE);
            }
        }

        self.relayout();

        for pane in &mut self.panes {
            if !pane.is_floating() {
                continue;
            }
            let (frame, size) = match pane.frame {
                Some(frame) => (frame, pane.floating_size),
                None if pane.is_shown() => {
                    let frame = self.floating.create(pane);
                    pane.frame = Some(frame);
                    (frame, pane.floating_size.or(pane.best_size))
                }
                None => continue,
            };
            if let Some(size) = size {
                self.floating.resize(frame, size);
            }
            if let Some(position) = pane.floating_pos {
                self.floating.move_to(frame, position);
            }
            self.floating.set_visible(frame, pane.is_shown());
        }
    }

    /// Run the layout engine and store its result. Touches no host state.
    fn relayout(&mut self) {
        let input = LayoutInput {
            panes: &self.panes,
            memo: &self.memo,
            metrics: self.metrics(),
            client: self.client,
            dock_constraint: self.dock_size_constraint(),
            spacer_only: false,
        };
        let mut output = LayoutEngine::layout(&input);
        output.apply_positions(&mut self.panes);
        output.realize(
            Rect::from_size(self.client.width, self.client.height),
            &mut self.panes,
        );
        self.maximized = output.maximized.as_ref().map(|note| note.pane);
        self.memo = output.memo;
        self.docks = output.docks;
        self.parts = output.parts;
    }

    /// Paint every part, unless the host handles [`ManagerEvent::Render`]
    /// itself.
    pub fn render(&mut self, canvas: &mut dyn Canvas) {
        if self.sink.notify(&ManagerEvent::Render).is_cancel() {
            return;
        }
        for part in self.parts.parts() {
            let pane = part.pane.and_then(|index| self.panes.get(index));
            self.art.draw_part(canvas, part, pane);
        }
    }

    // --- perspectives ---

    /// Encode every pane, the remembered dock sizes, and the constraint.
    #[must_use]
    pub fn save_perspective(&self) -> String {
        perspective::save_perspective(&self.panes, self.memo.iter(), self.dock_size_constraint())
    }

    /// Restore a perspective saved by [`save_perspective`](Self::save_perspective).
    ///
    /// Every managed pane is first docked and hidden; records then restore
    /// the panes they name. Returns `false` for an unsupported string.
    pub fn load_perspective(&mut self, input: &str, update: bool) -> bool {
        let decoded = match perspective::load_perspective(input) {
            Ok(decoded) => decoded,
            Err(err) => {
                dockwork_core::warn!(error = %err, "perspective rejected");
                return false;
            }
        };
        self.cancel_interaction();
        for pane in &mut self.panes {
            pane.flags.remove(PaneFlags::FLOATING);
            pane.flags.insert(PaneFlags::HIDDEN);
        }
        self.memo.clear();
        self.maximized = None;

        for record in &decoded.panes {
            match self.panes.iter_mut().find(|p| p.name == record.name) {
                Some(pane) => pane.safe_set(record),
                None => dockwork_core::debug!(pane = %record.name, "perspective names an unknown pane"),
            }
        }
        for &(key, size) in &decoded.dock_sizes {
            self.memo.set(key, size);
        }
        if let Some((x, y)) = decoded.constraint {
            self.set_dock_size_constraint(x, y);
        }
        if update {
            self.update();
        }
        true
    }

    // --- drag and drop ---

    fn resolve_drop(&self, pane: PaneIndex, point: Point, offset: Point) -> DropPlan {
        let request = DropRequest {
            panes: &self.panes,
            docks: &self.docks,
            parts: &self.parts,
            memo: &self.memo,
            metrics: self.metrics(),
            client: self.client,
            dock_constraint: self.dock_size_constraint(),
            pane,
            point,
            offset,
            allow_floating: self.config.allow_floating,
            tuning: self.config.drop,
        };
        DropResolver::resolve(&request)
    }

    /// Adopt a plan's pane array and lay it out. Returns `false` for a
    /// no-op plan.
    fn commit_drop(&mut self, plan: DropPlan) -> bool {
        if plan.is_noop() {
            return false;
        }
        let pane = plan.pane;
        let target = plan.target;
        let action_pane = plan
            .placed_pane()
            .is_some_and(|p| p.has_flag(PaneFlags::ACTION_PANE));
        self.panes = plan.panes;
        if action_pane {
            self.relayout();
            self.settle_action_pane(pane);
        }
        dockwork_core::debug!(pane, outcome = ?target, "drop committed");
        self.update();
        true
    }

    /// Write the bumped pixel positions of a fixed dock back into its panes.
    fn settle_action_pane(&mut self, pane: PaneIndex) {
        let metrics = self.metrics();
        if let Some(dock) = self.docks.iter().find(|dock| dock.contains_pane(pane)) {
            let (positions, _) = pane_positions_and_sizes(dock, &self.panes, &metrics);
            for (&index, pos) in dock.panes.iter().zip(positions) {
                self.panes[index].pos = pos;
            }
        }
        self.panes[pane].flags.remove(PaneFlags::ACTION_PANE);
    }

    /// Hand a drag over to the manager, typically when the host starts
    /// moving a floating frame. `offset` is the pointer position inside the
    /// pane.
    pub fn begin_pane_drag(&mut self, name: &str, pointer: Point, offset: Point) -> bool {
        let Some(index) = self.pane_index(name) else {
            return false;
        };
        if !self.panes[index].is_movable() {
            return false;
        }
        self.cancel_interaction();
        let toolbar = self.panes[index].is_toolbar();
        let transition = self.interaction.begin_pane_drag(index, pointer, offset, toolbar);
        self.apply(transition.effect);
        true
    }

    /// Abandon any sash or pane drag in progress without applying it.
    pub fn cancel_interaction(&mut self) {
        let _ = self.interaction.force_cancel();
        self.drag_plan = None;
        self.hint = None;
    }

    // --- floating frame callbacks ---

    /// The host moved a floating frame.
    pub fn on_floating_pane_moved(&mut self, window: WindowId, position: Point) -> bool {
        match self.index_of_window(window) {
            Some(index) if self.panes[index].is_floating() => {
                self.panes[index].floating_pos = Some(position);
                true
            }
            _ => false,
        }
    }

    /// The host resized a floating frame.
    pub fn on_floating_pane_resized(&mut self, window: WindowId, size: Size) -> bool {
        match self.index_of_window(window) {
            Some(index) if self.panes[index].is_floating() => {
                self.panes[index].floating_size = Some(size);
                true
            }
            _ => false,
        }
    }

    /// The user closed a floating frame. Returns `false` if the close was
    /// vetoed or the window is unknown.
    pub fn on_floating_pane_closed(&mut self, window: WindowId) -> bool {
        let Some(index) = self.index_of_window(window) else {
            return false;
        };
        let event = ManagerEvent::PaneClose {
            index,
            pane: &self.panes[index],
        };
        if self.sink.notify(&event).is_cancel() {
            return false;
        }
        self.close_pane_at(index);
        self.update();
        true
    }

    /// A floating frame was activated by the user.
    pub fn on_floating_pane_activated(&mut self, window: WindowId) -> bool {
        if !self.config.allow_active_pane {
            return false;
        }
        match self.index_of_window(window) {
            Some(index) => {
                self.activate(index);
                true
            }
            None => false,
        }
    }

    // --- pointer input ---

    /// Feed one pointer event and apply its effect.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> InteractionTransition {
        let view = InteractionView::new(&self.panes, &self.docks, &self.parts);
        let transition = self.interaction.handle(event, &view);
        self.apply(transition.effect);
        transition
    }

    fn apply(&mut self, effect: InteractionEffect) {
        match effect {
            InteractionEffect::ResizeUpdated {
                sash,
                pointer,
                grab,
                hint,
            } => {
                let InteractionState::Resizing { sash_rect, .. } = self.interaction.state() else {
                    return;
                };
                if self.config.live_resize {
                    if self.apply_resize(sash, sash_rect, pointer, grab) {
                        self.update();
                    }
                } else {
                    self.hint = Some(hint);
                }
            }
            InteractionEffect::ResizeCommitted {
                sash,
                sash_rect,
                pointer,
                grab,
            } => {
                self.hint = None;
                if self.apply_resize(sash, sash_rect, pointer, grab) {
                    dockwork_core::debug!(sash = ?sash, "sash committed");
                }
                self.update();
            }
            InteractionEffect::DragStarted {
                pane,
                pointer,
                offset,
                ..
            } => {
                if self.panes.get(pane).is_some_and(PaneInfo::is_maximized) {
                    self.restore_pane_at(pane);
                    self.update();
                }
                self.track_drag(pane, pointer, offset);
            }
            InteractionEffect::DragUpdated {
                pane,
                pointer,
                offset,
                ..
            } => self.track_drag(pane, pointer, offset),
            InteractionEffect::DragCommitted {
                pane,
                pointer,
                offset,
                ..
            } => {
                self.hint = None;
                self.drag_plan = None;
                let plan = self.resolve_drop(pane, pointer, offset);
                self.commit_drop(plan);
            }
            InteractionEffect::CaptionClicked { pane } => {
                if self.config.allow_active_pane && pane < self.panes.len() {
                    self.activate(pane);
                }
            }
            InteractionEffect::ButtonFired { pane, kind, .. } => self.fire_button(pane, kind),
            InteractionEffect::Canceled { .. } => {
                self.drag_plan = None;
                self.hint = None;
            }
            InteractionEffect::ResizeStarted { .. }
            | InteractionEffect::DragArmed { .. }
            | InteractionEffect::ButtonPressed { .. }
            | InteractionEffect::HoverChanged { .. }
            | InteractionEffect::Noop { .. } => {}
        }
    }

    fn track_drag(&mut self, pane: PaneIndex, pointer: Point, offset: Point) {
        let plan = self.resolve_drop(pane, pointer, offset);
        self.hint = plan.hint;
        // floating frames follow the pointer while nothing docks them
        if plan.hint.is_none() {
            if let Some(frame) = self.panes.get(pane).and_then(|p| p.frame) {
                self.floating.move_to(frame, pointer.offset_from(offset));
            }
        }
        self.drag_plan = Some(plan);
    }

    /// Latest drop plan of the drag in progress.
    #[must_use]
    pub fn drag_plan(&self) -> Option<&DropPlan> {
        self.drag_plan.as_ref()
    }

    /// Write the result of a sash drag into the memo or the proportions.
    fn apply_resize(
        &mut self,
        sash: SashTarget,
        sash_rect: Rect,
        pointer: Point,
        grab: Point,
    ) -> bool {
        let Some(dock) = self.docks.iter().find(|dock| dock.key == sash.dock()) else {
            return false;
        };
        match sash {
            SashTarget::Dock { dock: key } => {
                let size = dock_size_for_pointer(
                    &self.docks,
                    dock,
                    sash_rect,
                    pointer,
                    grab,
                    self.client,
                    self.metrics().sash_size,
                );
                self.memo.set(key, size);
                true
            }
            SashTarget::Pane { pane, .. } => {
                let Some(pane_rect) = self
                    .parts
                    .pane_part(pane)
                    .and_then(|index| self.parts.get(index))
                    .map(|part| part.rect)
                else {
                    return false;
                };
                let metrics = self.metrics();
                let Some(change) = proportions_for_pointer(
                    dock,
                    &self.panes,
                    pane,
                    pane_rect,
                    pointer,
                    grab,
                    &metrics,
                ) else {
                    return false;
                };
                self.panes[change.pane].proportion = change.proportion;
                self.panes[change.neighbour].proportion = change.neighbour_proportion;
                true
            }
        }
    }

    fn fire_button(&mut self, index: PaneIndex, kind: ButtonKind) {
        let Some(pane) = self.panes.get(index) else {
            return;
        };
        let pressed = ManagerEvent::PaneButton {
            index,
            pane,
            button: kind,
        };
        if self.sink.notify(&pressed).is_cancel() {
            return;
        }
        let proceed = |result: NotificationResult| !result.is_cancel();
        match kind {
            ButtonKind::Close => {
                let event = ManagerEvent::PaneClose { index, pane };
                if proceed(self.sink.notify(&event)) {
                    self.close_pane_at(index);
                    self.update();
                }
            }
            ButtonKind::MaximizeRestore => {
                if pane.is_maximized() {
                    let event = ManagerEvent::PaneRestore { index, pane };
                    if proceed(self.sink.notify(&event)) {
                        self.restore_pane_at(index);
                        self.update();
                    }
                } else {
                    let event = ManagerEvent::PaneMaximize { index, pane };
                    if proceed(self.sink.notify(&event)) {
                        self.maximize_pane_at(index);
                        self.update();
                    }
                }
            }
            // toggles: a floating pane goes back to its dock placement
            ButtonKind::Pin => {
                if pane.is_floating() {
                    self.panes[index].flags.remove(PaneFlags::FLOATING);
                    self.update();
                } else if self.config.allow_floating && pane.is_floatable() {
                    self.panes[index].flags.insert(PaneFlags::FLOATING);
                    self.update();
                }
            }
            ButtonKind::Minimize => {}
        }
    }
}
