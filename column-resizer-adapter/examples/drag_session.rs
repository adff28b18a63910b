use std::sync::Arc;

use column_resizer::{ColumnDef, ColumnTree, ResizerOptions, TableStateStore, TableStore};
use column_resizer_adapter::{Controller, HeadlessSurface};

fn main() {
    // Example: an adapter forwarding pointer events into the controller.
    //
    // A real adapter would:
    // - render resize handles from `decorations().bind_resize_handle(..)`
    // - forward pointer down/move/up (and leave/capture-lost/blur) from those handles
    // - skip other interactive surfaces while `admits_input()` is false
    let tree = Arc::new(
        ColumnTree::new([
            ColumnDef::leaf("index").with_resizable(false),
            ColumnDef::group(
                "name",
                [
                    ColumnDef::leaf("first")
                        .with_min_width(70.0)
                        .with_max_width(Some(250.0)),
                    ColumnDef::leaf("last")
                        .with_min_width(140.0)
                        .with_max_width(Some(200.0)),
                ],
            ),
        ])
        .expect("valid columns"),
    );
    let surface = HeadlessSurface::from_tree(&tree, 20, 150.0);
    let mut store = TableStore::new();
    store.subscribe(|_, action| println!("  store: {action:?}"));
    let mut c = Controller::new(tree, ResizerOptions::new(), surface, store);

    let handle = c
        .decorations()
        .bind_resize_handle("first")
        .expect("first is resizable");
    println!("down: {:?}", c.on_handle_pointer_down(&handle, 400.0));
    println!("admits other input: {}", c.admits_input());

    for x in [400.4, 420.0, 480.0, 700.0] {
        println!("move x={x}: {:?}", c.on_pointer_move(x));
        println!(
            "  first={:?} name={:?}",
            c.surface().width_of("first"),
            c.surface().width_of("name")
        );
    }

    println!("up: {:?}", c.on_pointer_up());
    println!("committed: {:?}", c.store().resized_widths());

    c.on_pointer_down("last", 0.0);
    c.on_pointer_move(-100.0);
    println!("focus lost: {:?}", c.on_focus_lost());
    println!("committed: {:?}", c.store().resized_widths());
}
