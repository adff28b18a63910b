//! Property-based invariant tests for drag sessions.
//!
//! 1. The applied width always stays within the column's bounds.
//! 2. Every group header equals the sum of its children after each applied frame.
//! 3. The final width depends only on the last pointer position, never on the path.
//! 4. The commit carries exactly the last applied width and the lock is always released.

use std::collections::HashMap;
use std::sync::Arc;

use column_resizer::{
    ColumnDef, ColumnId, ColumnResizer, ColumnTree, ResizeEffect, ResizerOptions,
    TableStateStore, TableStore, VisualSurface,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Default)]
struct MapSurface {
    widths: HashMap<String, f32>,
}

impl MapSurface {
    fn get(&self, column: &str) -> f32 {
        self.widths[column]
    }
}

impl VisualSurface for MapSurface {
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
        if let Some(w) = self.widths.get_mut(handle) {
            *w = width;
        }
    }
}

/// `outer[ inner[a, b], c ]` with bounds on `a` and whole-unit widths everywhere.
fn fixture(min: u16, span: Option<u16>, a: u16, b: u16, c: u16) -> (Arc<ColumnTree>, MapSurface) {
    let min = f32::from(min);
    let max = span.map(|s| min + f32::from(s));
    let tree = ColumnTree::new([ColumnDef::group(
        "outer",
        [
            ColumnDef::group(
                "inner",
                [
                    ColumnDef::leaf("a").with_min_width(min).with_max_width(max),
                    ColumnDef::leaf("b"),
                ],
            ),
            ColumnDef::leaf("c"),
        ],
    )])
    .unwrap();

    let (a, b, c) = (f32::from(a), f32::from(b), f32::from(c));
    let mut surface = MapSurface::default();
    for (id, w) in [("a", a), ("b", b), ("c", c), ("inner", a + b), ("outer", a + b + c)] {
        surface.widths.insert(id.to_string(), w);
    }
    (Arc::new(tree), surface)
}

fn moves() -> impl Strategy<Value = Vec<i16>> {
    proptest::collection::vec(-600i16..=600, 1..=40)
}

fn expected_width(tree: &ColumnTree, initial: f32, delta: f32) -> f32 {
    tree.get_by_id("a")
        .unwrap()
        .clamp_width((initial + delta).max(0.0))
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Width stays within bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn applied_width_respects_bounds(
        min in 0u16..200,
        span in proptest::option::of(0u16..400),
        a in 0u16..500,
        xs in moves(),
    ) {
        let (tree, mut surface) = fixture(min, span, a, 50, 50);
        let mut resizer = ColumnResizer::new(Arc::clone(&tree), ResizerOptions::new());
        resizer.start(&surface, "a", 0.0);

        for x in xs {
            resizer.update(&mut surface, f32::from(x));
            let width = resizer.session().unwrap().last_applied_width();
            prop_assert!(width >= f32::from(min));
            if let Some(span) = span {
                prop_assert!(width <= f32::from(min) + f32::from(span));
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Group headers equal the sum of their children
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn group_headers_track_children(
        a in 0u16..500,
        b in 0u16..500,
        c in 0u16..500,
        xs in moves(),
    ) {
        let (tree, mut surface) = fixture(0, None, a, b, c);
        let mut resizer = ColumnResizer::new(tree, ResizerOptions::new());
        resizer.start(&surface, "a", 0.0);

        for x in xs {
            if let ResizeEffect::Updated { .. } = resizer.update(&mut surface, f32::from(x)) {
                prop_assert_eq!(surface.get("inner"), surface.get("a") + surface.get("b"));
                prop_assert_eq!(surface.get("outer"), surface.get("inner") + surface.get("c"));
                prop_assert_eq!(resizer.last_group_widths().len(), 2);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Final width is path independent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn final_width_depends_only_on_last_pointer(
        min in 0u16..200,
        span in proptest::option::of(0u16..400),
        a in 0u16..500,
        origin in -300i16..300,
        xs in moves(),
    ) {
        let (tree, mut surface) = fixture(min, span, a, 10, 10);
        let initial = surface.get("a");
        let mut resizer = ColumnResizer::new(Arc::clone(&tree), ResizerOptions::new());
        resizer.start(&surface, "a", f32::from(origin));

        for &x in &xs {
            resizer.update(&mut surface, f32::from(x));
        }

        // Whole-unit inputs never land strictly between 0 and 1 away from the last frame.
        let last = *xs.last().unwrap();
        let expected = expected_width(&tree, initial, f32::from(last) - f32::from(origin));
        prop_assert_eq!(surface.get("a"), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Commit carries the last applied width
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn commit_matches_last_applied_width(a in 0u16..500, xs in moves()) {
        let (tree, mut surface) = fixture(0, None, a, 10, 10);
        let mut resizer = ColumnResizer::new(tree, ResizerOptions::new());
        let mut store = TableStore::new();
        resizer.start(&surface, "a", 0.0);
        for x in xs {
            resizer.update(&mut surface, f32::from(x));
        }
        let applied = resizer.session().unwrap().last_applied_width();

        let effect = resizer.end(&mut store);
        let stored = matches!(effect, ResizeEffect::Committed { stored: true, .. });
        prop_assert!(stored);
        prop_assert_eq!(store.resized_widths().get("a"), Some(applied));
        prop_assert_eq!(surface.get("a"), applied);
        prop_assert!(!resizer.lock().is_held());
        prop_assert!(!resizer.is_dragging());
    }
}
