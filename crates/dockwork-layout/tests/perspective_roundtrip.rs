//! Perspective save/load through `DockManager`.
//!
//! Run with: `cargo test -p dockwork-layout --test perspective_roundtrip`

use dockwork_layout::{
    DockDirection, DockKey, DockManager, PaneInfo, Point, Rect, Size, WindowId, load_perspective,
};

fn manager() -> DockManager {
    let mut mgr = DockManager::default();
    mgr.set_managed_size(Size::new(1024, 768));
    mgr
}

/// Panes in their designed places.
fn arranged() -> DockManager {
    let mut mgr = manager();
    let panes = [
        PaneInfo::new().name("files").caption("Files").left().best_size(180, 100),
        PaneInfo::new().name("outline").left().position(1).best_size(180, 100),
        PaneInfo::new().name("props").right().row(1).best_size(140, 80),
        PaneInfo::new().name("log").bottom().best_size(100, 120).hide(),
        PaneInfo::new()
            .name("finder")
            .float()
            .floating_position(300, 200)
            .floating_size(200, 150),
        PaneInfo::new()
            .name("tools")
            .top()
            .toolbar_pane()
            .best_size(120, 24),
        PaneInfo::new().name("editor").center_pane(),
    ];
    for (id, pane) in (1..).zip(panes) {
        assert!(mgr.add_pane(WindowId::new(id), pane));
    }
    mgr.update();
    mgr
}

/// The same windows and names, all dumped into the left dock.
fn scrambled() -> DockManager {
    let mut mgr = manager();
    let names = ["files", "outline", "props", "log", "finder", "tools", "editor"];
    for (id, name) in (1..).zip(names) {
        assert!(mgr.add_pane(WindowId::new(id), PaneInfo::new().name(name).left()));
    }
    mgr.update();
    mgr
}

fn rects(mgr: &DockManager) -> Vec<(String, Rect)> {
    mgr.panes().iter().map(|p| (p.name.clone(), p.rect)).collect()
}

#[test]
fn layout_survives_a_round_trip() {
    let original = arranged();
    let saved = original.save_perspective();

    let mut restored = scrambled();
    assert!(restored.load_perspective(&saved, true));
    assert_eq!(rects(&restored), rects(&original));
    assert_eq!(restored.save_perspective(), saved);

    let finder = restored.pane("finder").unwrap();
    assert!(finder.is_floating());
    assert_eq!(finder.floating_pos, Some(Point::new(300, 200)));
    assert!(!restored.pane("log").unwrap().is_shown());
    assert_eq!(restored.pane("files").unwrap().caption, "Files");
    // windows stay bound to their panes
    assert_eq!(restored.pane("props").unwrap().window, WindowId::new(3));
}

#[test]
fn resized_docks_are_remembered() {
    let mut mgr = arranged();
    let key = DockKey::new(DockDirection::Left, 0, 0);
    let saved_before = mgr.save_perspective();
    let original = mgr.dock_sizes().get(&key).unwrap();

    let decoded = load_perspective(&saved_before).unwrap();
    assert!(decoded.dock_sizes.contains(&(key, original)));

    let edited = saved_before.replace(
        &format!("dock_size(4,0,0)={original}|"),
        "dock_size(4,0,0)=260|",
    );
    assert!(mgr.load_perspective(&edited, true));
    let left = mgr.docks().iter().find(|d| d.key == key).unwrap();
    assert_eq!(left.size, 260);
}

#[test]
fn panes_missing_from_the_string_are_hidden() {
    let mut mgr = manager();
    mgr.add_pane(WindowId::new(1), PaneInfo::new().name("a").left());
    mgr.add_pane(WindowId::new(2), PaneInfo::new().name("b").right());
    mgr.update();
    let only_a = format!(
        "layout2|{}|name=ghost;dir=3|",
        dockwork_layout::perspective::save_pane_info(mgr.pane("a").unwrap())
    );

    assert!(mgr.load_perspective(&only_a, true));
    assert!(mgr.pane("a").unwrap().is_shown());
    assert!(!mgr.pane("b").unwrap().is_shown());
    assert!(mgr.pane("ghost").is_none());
    assert_eq!(mgr.panes().len(), 2);
}

#[test]
fn hand_written_strings_load() {
    let mut mgr = manager();
    mgr.add_pane(WindowId::new(1), PaneInfo::new().name("files").bottom());
    let text = "layout2|name=files;caption=Files;state=2044;dir=4;layer=0;row=0;pos=0;\
                prop=100000;bestw=200;besth=100;minw=-1;minh=-1;maxw=-1;maxh=-1;\
                floatx=-1;floaty=-1;floatw=-1;floath=-1|dock_size(4,0,0)=205|";
    assert!(mgr.load_perspective(text, true));

    let files = mgr.pane("files").unwrap();
    assert_eq!(files.direction, DockDirection::Left);
    assert_eq!(files.best_size, Some(Size::new(200, 100)));
    assert_eq!(files.min_size, None);
    assert_eq!(files.floating_size, None);
    assert!(files.is_shown());
    assert_eq!(mgr.docks()[0].size, 205);
}

#[test]
fn names_with_delimiters_round_trip() {
    let name = r"build|log;main\x";
    let mut first = manager();
    first.add_pane(WindowId::new(1), PaneInfo::new().name(name).top().best_size(10, 90));
    first.update();
    let saved = first.save_perspective();

    let mut second = manager();
    second.add_pane(WindowId::new(1), PaneInfo::new().name(name));
    assert!(second.load_perspective(&saved, true));
    assert_eq!(second.pane(name).unwrap().direction, DockDirection::Top);
}

#[test]
fn wrong_header_is_refused_without_side_effects() {
    let mut mgr = arranged();
    let before = rects(&mgr);
    assert!(!mgr.load_perspective("layout1|name=files;dir=2|", true));
    assert_eq!(rects(&mgr), before);
}
