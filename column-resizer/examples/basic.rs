// Example: drag one column border and commit the result.
use std::collections::HashMap;
use std::sync::Arc;

use column_resizer::{
    ColumnDef, ColumnId, ColumnResizer, ColumnTree, ResizerOptions, TableStateStore, TableStore,
    VisualSurface,
};

#[derive(Default)]
struct Header {
    widths: HashMap<String, f32>,
}

impl VisualSurface for Header {
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

fn main() {
    let tree = ColumnTree::new([
        ColumnDef::leaf("id").with_resizable(false),
        ColumnDef::leaf("title")
            .with_min_width(80.0)
            .with_max_width(Some(400.0)),
    ])
    .expect("valid columns");

    let mut header = Header::default();
    header.widths.insert("id".into(), 60.0);
    header.widths.insert("title".into(), 200.0);

    let mut resizer = ColumnResizer::new(Arc::new(tree), ResizerOptions::new());
    let mut store = TableStore::new();

    println!("{:?}", resizer.start(&header, "title", 260.0));
    for x in [261.0, 262.5, 300.0, 900.0] {
        println!("move x={x}: {:?}", resizer.update(&mut header, x));
    }
    println!("{:?}", resizer.end(&mut store));
    println!("committed={:?}", store.resized_widths());
    println!("lock held={}", resizer.lock().is_held());
}
