//! Drag-and-drop scenarios: caption drags, floating, and toolbar moves.
//!
//! Run with: `cargo test -p dockwork-layout --test drop_scenarios`

use std::cell::RefCell;
use std::rc::Rc;

use dockwork_core::event::PointerEvent;
use dockwork_layout::floating::NullFrame;
use dockwork_layout::{
    DockDirection, DockManager, DropTarget, FloatingFrameId, FloatingHost, ManagerConfig,
    NullFloatingHost, PaneFlags, PaneInfo, Point, Size, UiPartKind, WindowId,
};

/// Floating host the test can inspect after handing it to the manager.
#[derive(Clone, Default)]
struct SharedHost(Rc<RefCell<NullFloatingHost>>);

impl SharedHost {
    fn frames(&self) -> Vec<NullFrame> {
        self.0.borrow().frames().to_vec()
    }
}

impl FloatingHost for SharedHost {
    fn create(&mut self, pane: &PaneInfo) -> FloatingFrameId {
        self.0.borrow_mut().create(pane)
    }

    fn destroy(&mut self, frame: FloatingFrameId) {
        self.0.borrow_mut().destroy(frame);
    }

    fn move_to(&mut self, frame: FloatingFrameId, position: Point) {
        self.0.borrow_mut().move_to(frame, position);
    }

    fn resize(&mut self, frame: FloatingFrameId, size: Size) {
        self.0.borrow_mut().resize(frame, size);
    }

    fn set_visible(&mut self, frame: FloatingFrameId, visible: bool) {
        self.0.borrow_mut().set_visible(frame, visible);
    }
}

fn workspace(config: ManagerConfig) -> (DockManager, SharedHost) {
    let host = SharedHost::default();
    let mut mgr = DockManager::new(config).unwrap();
    mgr.set_managed_size(Size::new(800, 600));
    mgr.set_floating_host(Box::new(host.clone()));
    mgr.add_pane(
        WindowId::new(1),
        PaneInfo::new().name("tools").left().best_size(150, 100),
    );
    mgr.add_pane(WindowId::new(2), PaneInfo::new().name("editor").center_pane());
    mgr.update();
    (mgr, host)
}

/// Press on the tools caption and drag it to `to`, without releasing.
fn drag_tools_caption(mgr: &mut DockManager, to: Point) {
    mgr.handle_pointer(&PointerEvent::down(20, 5));
    mgr.handle_pointer(&PointerEvent::moved(30, 5));
    mgr.handle_pointer(&PointerEvent::moved(to.x, to.y));
}

#[test]
fn caption_drag_to_right_border_docks_right() {
    let (mut mgr, _host) = workspace(ManagerConfig::default());
    drag_tools_caption(&mut mgr, Point::new(795, 300));

    let plan = mgr.drag_plan().unwrap();
    assert!(matches!(plan.target, DropTarget::Dock(p, _) if p.direction == DockDirection::Right));
    let hint = mgr.hint_rect().unwrap();
    assert!(hint.x > 600);

    mgr.handle_pointer(&PointerEvent::up(795, 300));
    let tools = mgr.pane("tools").unwrap();
    assert_eq!(tools.direction, DockDirection::Right);
    assert!(tools.is_docked());
    assert!(tools.rect.x > 600);
    assert!(mgr.hint_rect().is_none());
    assert!(mgr.drag_plan().is_none());
}

#[test]
fn small_moves_do_not_start_a_drag() {
    let (mut mgr, _host) = workspace(ManagerConfig::default());
    let before = mgr.pane("tools").unwrap().clone();
    mgr.handle_pointer(&PointerEvent::down(20, 5));
    mgr.handle_pointer(&PointerEvent::moved(22, 6));
    assert!(mgr.drag_plan().is_none());
    mgr.handle_pointer(&PointerEvent::up(22, 6));
    assert_eq!(mgr.pane("tools"), Some(&before));
}

#[test]
fn dropping_over_the_center_floats_and_docking_back_destroys_the_frame() {
    let (mut mgr, host) = workspace(ManagerConfig::default());
    drag_tools_caption(&mut mgr, Point::new(400, 300));
    assert!(mgr.hint_rect().is_none());
    mgr.handle_pointer(&PointerEvent::up(400, 300));

    // caption starts at (1, 1); the press was at (20, 5)
    let offset = Point::new(19, 4);
    let tools = mgr.pane("tools").unwrap();
    assert!(tools.is_floating());
    assert_eq!(tools.floating_pos, Some(Point::new(381, 296)));
    let frames = host.frames();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].pane, "tools");
    assert_eq!(frames[0].position, Some(Point::new(381, 296)));
    assert!(frames[0].visible);

    // the host hands the frame drag over to the manager
    assert!(mgr.begin_pane_drag("tools", Point::new(400, 300), offset));
    mgr.handle_pointer(&PointerEvent::moved(450, 320));
    assert_eq!(host.frames()[0].position, Some(Point::new(431, 316)));
    mgr.handle_pointer(&PointerEvent::moved(3, 300));
    assert!(mgr.hint_rect().is_some());
    mgr.handle_pointer(&PointerEvent::up(3, 300));

    let tools = mgr.pane("tools").unwrap();
    assert!(tools.is_docked());
    assert_eq!(tools.direction, DockDirection::Left);
    assert!(tools.frame.is_none());
    assert!(host.frames().is_empty());
}

#[test]
fn without_floating_a_center_drop_is_ignored() {
    let mut config = ManagerConfig::default();
    config.allow_floating = false;
    let (mut mgr, host) = workspace(config);
    let before = mgr.pane("tools").unwrap().clone();
    drag_tools_caption(&mut mgr, Point::new(400, 300));
    assert_eq!(mgr.drag_plan().map(|plan| plan.target), Some(DropTarget::NoOp));
    mgr.handle_pointer(&PointerEvent::up(400, 300));
    assert_eq!(mgr.pane("tools"), Some(&before));
    assert!(host.frames().is_empty());
}

#[test]
fn capture_loss_abandons_the_drop() {
    let (mut mgr, _host) = workspace(ManagerConfig::default());
    drag_tools_caption(&mut mgr, Point::new(795, 300));
    assert!(mgr.hint_rect().is_some());
    mgr.handle_pointer(&PointerEvent::capture_lost());
    assert!(mgr.hint_rect().is_none());
    assert_eq!(mgr.pane("tools").unwrap().direction, DockDirection::Left);
}

#[test]
fn pin_button_floats_the_pane() {
    let host = SharedHost::default();
    let mut mgr = DockManager::default();
    mgr.set_managed_size(Size::new(800, 600));
    mgr.set_floating_host(Box::new(host.clone()));
    mgr.add_pane(
        WindowId::new(1),
        PaneInfo::new()
            .name("props")
            .right()
            .best_size(120, 80)
            .pin_button(true)
            .close_button(false),
    );
    mgr.update();
    let pin = mgr
        .parts()
        .iter_kind(UiPartKind::PaneButton)
        .map(|(_, part)| part.rect)
        .next()
        .unwrap();
    mgr.handle_pointer(&PointerEvent::down(pin.x + 2, pin.y + 2));
    mgr.handle_pointer(&PointerEvent::up(pin.x + 2, pin.y + 2));

    assert!(mgr.pane("props").unwrap().is_floating());
    assert_eq!(host.frames().len(), 1);
    assert_eq!(host.frames()[0].size, Some(Size::new(120, 80)));
}

#[test]
fn floating_frame_size_follows_host_and_pane() {
    let (mut mgr, host) = workspace(ManagerConfig::default());
    let window = WindowId::new(3);
    mgr.add_pane(
        window,
        PaneInfo::new()
            .name("props")
            .float()
            .floating_position(40, 40)
            .floating_size(200, 150),
    );
    mgr.update();
    assert_eq!(host.frames()[0].size, Some(Size::new(200, 150)));

    // the user resizes the frame; the pane and its saved state follow
    assert!(mgr.on_floating_pane_resized(window, Size::new(320, 240)));
    assert_eq!(
        mgr.pane("props").unwrap().floating_size,
        Some(Size::new(320, 240))
    );
    assert!(mgr.save_perspective().contains("floatw=320;floath=240"));

    // a programmatic change reaches the existing frame on the next update
    mgr.pane_mut("props").unwrap().floating_size = Some(Size::new(260, 120));
    mgr.update();
    assert_eq!(host.frames().len(), 1);
    assert_eq!(host.frames()[0].size, Some(Size::new(260, 120)));

    assert!(!mgr.on_floating_pane_resized(WindowId::new(1), Size::new(10, 10)));
    assert!(!mgr.on_floating_pane_resized(WindowId::new(99), Size::new(10, 10)));
}

#[test]
fn toolbar_drag_bumps_within_its_fixed_dock() {
    let toolbar = |name: &str| {
        PaneInfo::new()
            .name(name)
            .top()
            .toolbar_pane()
            .pane_border(false)
            .best_size(50, 20)
    };
    let mut mgr = DockManager::default();
    mgr.set_managed_size(Size::new(800, 600));
    mgr.add_pane(WindowId::new(1), toolbar("a").position(0));
    mgr.add_pane(WindowId::new(2), toolbar("b").position(59));
    mgr.update();

    let gripper = mgr
        .parts()
        .iter_kind(UiPartKind::Gripper)
        .filter(|(_, part)| part.pane == Some(1))
        .map(|(_, part)| part.rect)
        .next()
        .unwrap();
    assert_eq!(gripper.x, 59);
    mgr.handle_pointer(&PointerEvent::down(62, 10));
    mgr.handle_pointer(&PointerEvent::moved(202, 10));
    mgr.handle_pointer(&PointerEvent::up(202, 10));

    let b = mgr.pane("b").unwrap();
    assert_eq!(b.pos, 199);
    assert_eq!(b.rect.x, 199 + 9);
    assert!(!b.has_flag(PaneFlags::ACTION_PANE));
    assert_eq!(mgr.pane("a").unwrap().pos, 0);
}

#[test]
fn add_pane_at_point_uses_the_drop_cascade() {
    let (mut mgr, _host) = workspace(ManagerConfig::default());
    assert!(mgr.add_pane_at(
        WindowId::new(3),
        PaneInfo::new().name("output").best_size(100, 120),
        Point::new(400, 595),
    ));
    let output = mgr.pane("output").unwrap();
    assert_eq!(output.direction, DockDirection::Bottom);
    assert!(output.is_docked());
    assert!(output.rect.y > 400);
}
