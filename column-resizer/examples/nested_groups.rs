// Example: group headers follow a nested leaf, and committed widths survive a rebuild.
use std::collections::HashMap;
use std::sync::Arc;

use column_resizer::{
    ColumnDecorations, ColumnDef, ColumnId, ColumnResizer, ColumnTree, CursorHint, EndReason,
    ResizerOptions, TableStateStore, TableStore, VisualSurface, apply_layout,
};

#[derive(Default)]
struct Grid {
    widths: HashMap<String, f32>,
}

impl VisualSurface for Grid {
    type Handle = String;

    fn resolve(&self, column: &ColumnId, out: &mut Vec<String>) {
        if self.widths.contains_key(column.as_str()) {
            out.push(column.to_string());
        }
    }

    fn width(&self, handle: &String) -> Option<f32> {
        self.widths.get(handle).copied()
    }

    fn set_width(&mut self, handle: &String, width: f32) {
        self.widths.insert(handle.clone(), width);
    }
}

fn print(grid: &Grid, ids: &[&str]) {
    let row: Vec<String> = ids
        .iter()
        .map(|id| format!("{id}={}", grid.widths[*id]))
        .collect();
    println!("  {}", row.join(" "));
}

fn main() {
    let tree = Arc::new(
        ColumnTree::new([ColumnDef::group(
            "person",
            [
                ColumnDef::group(
                    "name",
                    [
                        ColumnDef::leaf("first").with_width(Some(100.0)),
                        ColumnDef::leaf("last").with_width(Some(120.0)),
                    ],
                ),
                ColumnDef::leaf("age").with_width(Some(50.0)),
            ],
        )])
        .expect("valid columns"),
    );
    let ids = ["person", "name", "first", "last", "age"];

    let mut grid = Grid::default();
    let mut store = TableStore::new();
    for id in ids {
        grid.widths.insert(id.into(), 0.0);
    }
    apply_layout(&tree, &mut grid, store.resized_widths());
    println!("initial:");
    print(&grid, &ids);

    let decorations = ColumnDecorations::new(Arc::clone(&tree), CursorHint::ColResize);
    println!(
        "leaves under person: {:?}",
        decorations.flattened_leaf_ids("person")
    );

    let mut resizer = ColumnResizer::new(Arc::clone(&tree), ResizerOptions::new());
    let handle = decorations
        .bind_resize_handle("first")
        .expect("first is resizable");
    handle.on_pointer_down(&mut resizer, &grid, 100.0);
    resizer.update(&mut grid, 160.0);
    println!("mid-drag:");
    print(&grid, &ids);

    // Pointer tracking lost: the gesture still commits.
    println!("{:?}", resizer.abort(&mut store, EndReason::CaptureLost));

    let mut rebuilt = Grid::default();
    for id in ids {
        rebuilt.widths.insert(id.into(), 0.0);
    }
    apply_layout(&tree, &mut rebuilt, store.resized_widths());
    println!("after rebuild:");
    print(&rebuilt, &ids);
}
