use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use column_resizer::{
    ColumnDef, ColumnTree, CursorHint, EndReason, InteractionLock, NoopReason, ResizeEffect,
    ResizerOptions, TableState, TableStateStore, TableStore, VisualSurface,
};

fn name_tree() -> Arc<ColumnTree> {
    Arc::new(
        ColumnTree::new([
            ColumnDef::leaf("index")
                .with_resizable(false)
                .with_width(Some(40.0)),
            ColumnDef::group(
                "name",
                [
                    ColumnDef::leaf("first")
                        .with_width(Some(100.0))
                        .with_min_width(50.0),
                    ColumnDef::leaf("last").with_width(Some(120.0)),
                ],
            ),
        ])
        .unwrap(),
    )
}

fn controller() -> Controller<HeadlessSurface, TableStore> {
    let tree = name_tree();
    let surface = HeadlessSurface::from_tree(&tree, 3, 80.0);
    Controller::new(tree, ResizerOptions::new(), surface, TableStore::new())
}

#[test]
fn headless_surface_mounts_tree_with_summed_groups() {
    let tree = name_tree();
    let s = HeadlessSurface::from_tree(&tree, 2, 80.0);

    assert_eq!(s.len(), 4);
    assert_eq!(s.cell_widths("first"), Some(&[100.0, 100.0, 100.0][..]));
    assert_eq!(s.cell_widths("name"), Some(&[220.0][..]));
    assert_eq!(s.width_of("index"), Some(40.0));
    assert_eq!(s.width_of("missing"), None);

    let defaulted = HeadlessSurface::from_tree(
        &ColumnTree::new([ColumnDef::leaf("a")]).unwrap(),
        0,
        80.0,
    );
    assert_eq!(defaulted.width_of("a"), Some(80.0));
}

#[test]
fn unmounted_cells_do_not_resolve_and_old_handles_stay_stale() {
    let mut s = HeadlessSurface::new().with_column("a", 50.0, 2);
    let mut handles = Vec::new();
    s.resolve(&"a".into(), &mut handles);
    assert_eq!(handles.len(), 2);

    assert!(s.unmount("a"));
    assert!(!s.unmount("a"));
    let mut none = Vec::new();
    s.resolve(&"a".into(), &mut none);
    assert!(none.is_empty());
    assert_eq!(s.width(&handles[0]), None);

    assert!(s.mount("a", 70.0));
    assert_eq!(s.width(&handles[1]), None);
    s.set_width(&handles[1], 999.0);
    assert_eq!(s.cell_widths("a"), Some(&[70.0, 70.0][..]));

    let mut fresh = Vec::new();
    s.resolve(&"a".into(), &mut fresh);
    s.set_width(&fresh[1], 90.0);
    assert_eq!(s.width(&fresh[1]), Some(90.0));
    assert_eq!(fresh[1].cell(), 1);
}

#[test]
fn controller_drag_updates_every_cell_and_commits() {
    let mut c = controller();

    assert!(matches!(
        c.on_pointer_down("first", 10.0),
        ResizeEffect::Started { .. }
    ));
    assert!(c.store().is_resizing());
    assert!(!c.admits_input());
    assert_eq!(c.cursor(), Some(CursorHint::ColResize));

    c.on_pointer_move(50.0);
    assert_eq!(c.surface().cell_widths("first"), Some(&[140.0; 4][..]));
    assert_eq!(c.surface().width_of("name"), Some(260.0));
    assert_eq!(c.surface().width_of("last"), Some(120.0));

    let effect = c.on_pointer_up();
    assert!(matches!(effect, ResizeEffect::Committed { stored: true, .. }));
    assert_eq!(c.store().resized_widths().get("first"), Some(140.0));
    assert!(!c.store().is_resizing());
    assert!(c.admits_input());
    assert_eq!(c.cursor(), None);
}

#[test]
fn lost_tracking_commits_with_reason() {
    for reason in [
        EndReason::PointerLeft,
        EndReason::CaptureLost,
        EndReason::FocusLost,
    ] {
        let mut c = controller();
        c.on_pointer_down("last", 0.0);
        c.on_pointer_move(-20.0);
        let effect = match reason {
            EndReason::PointerLeft => c.on_pointer_leave(),
            EndReason::CaptureLost => c.on_lost_pointer_capture(),
            EndReason::FocusLost => c.on_focus_lost(),
            EndReason::Released | EndReason::Teardown => unreachable!(),
        };
        assert_eq!(
            effect,
            ResizeEffect::Committed {
                column: "last".into(),
                width: 100.0,
                reason,
                stored: true,
            }
        );
        assert!(c.admits_input());
        assert!(!c.store().is_resizing());
    }
}

#[test]
fn rejected_commit_restores_committed_widths() {
    let tree = name_tree();
    let surface = HeadlessSurface::from_tree(&tree, 1, 80.0);
    let store =
        TableStore::new().with_commit_filter(Some(|_: &TableState, _: &column_resizer::ResizeCommit| false));
    let mut c = Controller::new(tree, ResizerOptions::new(), surface, store);

    c.on_pointer_down("first", 0.0);
    c.on_pointer_move(30.0);
    assert_eq!(c.surface().width_of("first"), Some(130.0));

    let effect = c.on_pointer_up();
    assert!(matches!(effect, ResizeEffect::Committed { stored: false, .. }));
    assert_eq!(c.surface().width_of("first"), Some(100.0));
    assert_eq!(c.surface().width_of("name"), Some(220.0));
    assert!(c.admits_input());
    assert!(!c.store().is_resizing());
}

#[test]
fn rejected_start_leaves_store_idle() {
    let mut c = controller();
    assert_eq!(
        c.on_pointer_down("index", 0.0),
        ResizeEffect::Noop(NoopReason::NotResizable)
    );
    assert_eq!(
        c.on_pointer_down("name", 0.0),
        ResizeEffect::Noop(NoopReason::GroupColumn)
    );
    assert!(!c.store().is_resizing());
    assert_eq!(
        c.on_pointer_up(),
        ResizeEffect::Noop(NoopReason::NotDragging)
    );
}

#[test]
fn handle_binding_starts_drag() {
    let mut c = controller();
    let handle = c.decorations().bind_resize_handle("last").unwrap();
    assert!(matches!(
        c.on_handle_pointer_down(&handle, 5.0),
        ResizeEffect::Started { .. }
    ));
    assert!(c.is_dragging());
    assert!(c.store().is_resizing());
}

#[test]
fn virtualized_cells_mid_drag_are_skipped() {
    let mut c = controller();
    c.on_pointer_down("first", 0.0);
    assert!(c.surface_mut().unmount("first"));

    c.on_pointer_move(20.0);
    assert_eq!(c.surface().width_of("first"), None);
    assert_eq!(c.surface().width_of("name"), Some(240.0));

    c.on_pointer_up();
    assert_eq!(c.store().resized_widths().get("first"), Some(120.0));

    // Scrolled back into view: the next render picks up the committed width.
    assert!(c.surface_mut().mount("first", 0.0));
    c.rerender();
    assert_eq!(c.surface().cell_widths("first"), Some(&[120.0; 4][..]));
}

#[test]
fn shared_lock_blocks_drag_while_held_elsewhere() {
    let tree = name_tree();
    let lock = InteractionLock::new();
    let surface = HeadlessSurface::from_tree(&tree, 0, 80.0);
    let mut c = Controller::with_lock(
        tree,
        ResizerOptions::new(),
        lock.clone(),
        surface,
        TableStore::new(),
    );

    let guard = lock.try_acquire(CursorHint::EwResize).unwrap();
    assert_eq!(
        c.on_pointer_down("first", 0.0),
        ResizeEffect::Noop(NoopReason::LockUnavailable)
    );
    assert!(!c.store().is_resizing());
    drop(guard);
    assert!(matches!(
        c.on_pointer_down("first", 0.0),
        ResizeEffect::Started { .. }
    ));
}

#[test]
fn set_tree_commits_live_drag_and_reapplies_layout() {
    let mut c = controller();
    c.on_pointer_down("first", 0.0);
    c.on_pointer_move(40.0);

    let tree = Arc::new(
        ColumnTree::new([ColumnDef::group(
            "name",
            [
                ColumnDef::leaf("first").with_width(Some(90.0)),
                ColumnDef::leaf("last").with_width(Some(120.0)),
            ],
        )])
        .unwrap(),
    );
    let widths = c.set_tree(Arc::clone(&tree));

    assert!(!c.is_dragging());
    assert!(c.admits_input());
    assert!(!c.store().is_resizing());
    assert_eq!(c.store().resized_widths().get("first"), Some(140.0));
    // The committed width wins over the new configured width.
    assert_eq!(c.surface().width_of("first"), Some(140.0));
    assert_eq!(widths.get(tree.index_of("name").unwrap()), Some(260.0));
    assert!(c.decorations().bind_resize_handle("index").is_none());
}

#[test]
fn set_tree_while_idle_commits_nothing() {
    let mut c = controller();
    c.set_tree(name_tree());
    assert!(c.store().resized_widths().is_empty());
    assert_eq!(c.surface().width_of("first"), Some(100.0));
}

#[test]
fn set_options_rebinds_handle_cursor() {
    let mut c = controller();
    c.set_options(ResizerOptions::new().with_cursor(CursorHint::EwResize));
    let handle = c.decorations().bind_resize_handle("first").unwrap();
    assert_eq!(handle.cursor(), CursorHint::EwResize);

    c.on_handle_pointer_down(&handle, 0.0);
    assert_eq!(c.cursor(), Some(CursorHint::EwResize));
}

#[test]
fn into_parts_hands_back_committed_state() {
    let mut c = controller();
    c.on_pointer_down("last", 0.0);
    c.on_pointer_move(-5.0);
    c.on_pointer_up();

    let (resizer, surface, store) = c.into_parts();
    assert!(!resizer.is_dragging());
    assert_eq!(surface.width_of("last"), Some(115.0));
    assert_eq!(store.resized_widths().len(), 1);
    assert_eq!(store.resized_widths().get("last"), Some(115.0));
}
