use alloc::vec::Vec;

use crate::ColumnId;

/// The rendered side of the table, as seen by the resizer.
///
/// Implemented by the UI adapter (DOM bindings, a TUI layout, or
/// `column_resizer_adapter::HeadlessSurface`). Handles are opaque to this crate: they are
/// resolved once when a drag starts and then read/written on every frame.
///
/// Contract:
/// - `resolve` pushes the handles *currently rendered* for a column (its header and/or body
///   cells). With row virtualization some or all of them may be absent; pushing nothing is
///   valid.
/// - `width` returns the current displayed width of a handle, or `None` if the handle has gone
///   stale (e.g. virtualized out after the drag started).
/// - `set_width` applies a width for immediate visual feedback. Writing to a stale handle must
///   be a silent no-op.
/// - After `set_width(h, w)`, `width(h)` must report `w` for a live handle.
pub trait VisualSurface {
    type Handle;

    fn resolve(&self, column: &ColumnId, out: &mut Vec<Self::Handle>);

    fn width(&self, handle: &Self::Handle) -> Option<f32>;

    fn set_width(&mut self, handle: &Self::Handle, width: f32);

    /// Width of the first live handle rendered for `column`.
    fn column_width(&self, column: &ColumnId) -> Option<f32> {
        let mut handles = Vec::new();
        self.resolve(column, &mut handles);
        handles.iter().find_map(|h| self.width(h))
    }

    /// Writes `width` to every handle currently rendered for `column`.
    ///
    /// Returns the number of handles written.
    fn set_column_width(&mut self, column: &ColumnId, width: f32) -> usize {
        let mut handles = Vec::new();
        self.resolve(column, &mut handles);
        for h in &handles {
            self.set_width(h, width);
        }
        handles.len()
    }
}
