use alloc::sync::Arc;

use crate::{CursorHint, ResizeEffect};

/// A callback fired with every effect the resizer produces, no-ops included.
pub type OnResizeCallback = Arc<dyn Fn(&ResizeEffect) + Send + Sync>;

/// Configuration for [`crate::ColumnResizer`].
///
/// Cheap to clone: the callback is stored in an `Arc`.
#[derive(Clone)]
pub struct ResizerOptions {
    /// When disabled, `start` rejects every column. A live session is unaffected.
    pub enabled: bool,

    /// Cursor advertised on resize handles and held globally while dragging.
    pub cursor: CursorHint,

    /// Optional observer of resizer effects (e.g. for debugging or analytics).
    pub on_resize: Option<OnResizeCallback>,
}

impl ResizerOptions {
    pub fn new() -> Self {
        Self {
            enabled: true,
            cursor: CursorHint::ColResize,
            on_resize: None,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_cursor(mut self, cursor: CursorHint) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn with_on_resize(
        mut self,
        on_resize: Option<impl Fn(&ResizeEffect) + Send + Sync + 'static>,
    ) -> Self {
        self.on_resize = on_resize.map(|f| Arc::new(f) as _);
        self
    }
}

impl Default for ResizerOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for ResizerOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResizerOptions")
            .field("enabled", &self.enabled)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}
