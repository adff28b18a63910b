use alloc::sync::Arc;
use core::fmt;

use column_resizer::{
    ColumnDecorations, ColumnResizer, ColumnTree, ColumnWidths, CursorHint, EndReason,
    InteractionLock, ResizeEffect, ResizeHandleProps, ResizerOptions, TableStateStore,
    VisualSurface, apply_layout,
};

/// A framework-neutral controller that wraps a `column_resizer::ColumnResizer` together with the
/// surface it draws on and the store it commits to.
///
/// This type does not hold any UI objects beyond the surface you hand it. Adapters drive it by
/// forwarding events:
/// - `on_pointer_down` / `on_pointer_move` / `on_pointer_up` from the resize handle
/// - `on_pointer_leave` / `on_lost_pointer_capture` / `on_focus_lost` when tracking is lost
/// - `set_tree` when the column hierarchy changes
/// - `rerender` whenever the surface is rebuilt
///
/// Every exit from a drag goes through the same commit path and flips the store's `resizing`
/// flag back off. When the store rejects a commit, committed widths are re-applied so the
/// surface does not keep showing the rejected width.
pub struct Controller<S: VisualSurface, T> {
    resizer: ColumnResizer<S::Handle>,
    decorations: ColumnDecorations,
    surface: S,
    store: T,
}

impl<S: VisualSurface, T: TableStateStore> Controller<S, T> {
    pub fn new(tree: Arc<ColumnTree>, options: ResizerOptions, surface: S, store: T) -> Self {
        Self::with_lock(tree, options, InteractionLock::new(), surface, store)
    }

    /// Like [`Self::new`], sharing `lock` with the host's other interactive surfaces.
    pub fn with_lock(
        tree: Arc<ColumnTree>,
        options: ResizerOptions,
        lock: InteractionLock,
        surface: S,
        store: T,
    ) -> Self {
        let resizer = ColumnResizer::with_lock(tree, options, lock);
        Self::from_resizer(resizer, surface, store)
    }

    pub fn from_resizer(resizer: ColumnResizer<S::Handle>, surface: S, store: T) -> Self {
        let decorations =
            ColumnDecorations::new(Arc::clone(resizer.tree()), resizer.options().cursor);
        Self {
            resizer,
            decorations,
            surface,
            store,
        }
    }

    pub fn resizer(&self) -> &ColumnResizer<S::Handle> {
        &self.resizer
    }

    pub fn decorations(&self) -> &ColumnDecorations {
        &self.decorations
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for mounting/unmounting cells. Changing widths here mid-drag is
    /// overwritten by the next applied frame.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn store(&self) -> &T {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut T {
        &mut self.store
    }

    pub fn into_parts(self) -> (ColumnResizer<S::Handle>, S, T) {
        (self.resizer, self.surface, self.store)
    }

    pub fn is_dragging(&self) -> bool {
        self.resizer.is_dragging()
    }

    /// Whether other interactive surfaces may take pointer input right now.
    pub fn admits_input(&self) -> bool {
        self.resizer.lock().admits_input()
    }

    /// Cursor the host should force globally, if a drag holds the lock.
    pub fn cursor(&self) -> Option<CursorHint> {
        self.resizer.lock().cursor()
    }

    /// Swaps the column hierarchy and re-applies committed widths.
    ///
    /// A live drag is committed first with [`EndReason::Teardown`].
    pub fn set_tree(&mut self, tree: Arc<ColumnTree>) -> ColumnWidths {
        if let Some(effect) = self.resizer.set_tree(Arc::clone(&tree), &mut self.store) {
            adebug!(?effect, "set_tree: ended live drag");
            self.after_finish(effect);
        }
        self.decorations = ColumnDecorations::new(tree, self.resizer.options().cursor);
        self.rerender()
    }

    pub fn set_options(&mut self, options: ResizerOptions) {
        if options.cursor != self.resizer.options().cursor {
            self.decorations =
                ColumnDecorations::new(Arc::clone(self.resizer.tree()), options.cursor);
        }
        self.resizer.set_options(options);
    }

    pub fn on_pointer_down(&mut self, column: &str, pointer_x: f32) -> ResizeEffect {
        let effect = self.resizer.start(&self.surface, column, pointer_x);
        self.after_start(effect)
    }

    /// Pointer-down routed through a handle binding from [`Self::decorations`].
    pub fn on_handle_pointer_down(
        &mut self,
        handle: &ResizeHandleProps,
        pointer_x: f32,
    ) -> ResizeEffect {
        let effect = handle.on_pointer_down(&mut self.resizer, &self.surface, pointer_x);
        self.after_start(effect)
    }

    pub fn on_pointer_move(&mut self, pointer_x: f32) -> ResizeEffect {
        self.resizer.update(&mut self.surface, pointer_x)
    }

    pub fn on_pointer_up(&mut self) -> ResizeEffect {
        let effect = self.resizer.end(&mut self.store);
        self.after_finish(effect)
    }

    pub fn on_pointer_leave(&mut self) -> ResizeEffect {
        self.abort(EndReason::PointerLeft)
    }

    pub fn on_lost_pointer_capture(&mut self) -> ResizeEffect {
        self.abort(EndReason::CaptureLost)
    }

    pub fn on_focus_lost(&mut self) -> ResizeEffect {
        self.abort(EndReason::FocusLost)
    }

    /// Re-applies committed widths to the whole surface and resums every group.
    pub fn rerender(&mut self) -> ColumnWidths {
        apply_layout(
            self.resizer.tree(),
            &mut self.surface,
            self.store.resized_widths(),
        )
    }

    fn abort(&mut self, reason: EndReason) -> ResizeEffect {
        let effect = self.resizer.abort(&mut self.store, reason);
        self.after_finish(effect)
    }

    fn after_start(&mut self, effect: ResizeEffect) -> ResizeEffect {
        if matches!(effect, ResizeEffect::Started { .. }) {
            self.store.set_resizing(true);
        }
        effect
    }

    fn after_finish(&mut self, effect: ResizeEffect) -> ResizeEffect {
        if let ResizeEffect::Committed { stored, .. } = &effect {
            self.store.set_resizing(false);
            if !*stored {
                awarn!("commit rejected; restoring committed widths");
                self.rerender();
            }
        }
        effect
    }
}

impl<S, T> fmt::Debug for Controller<S, T>
where
    S: VisualSurface + fmt::Debug,
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("phase", &self.resizer.phase())
            .field("options", self.resizer.options())
            .field("surface", &self.surface)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
