use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::propagate::{GroupRefs, propagate};
use crate::{
    ColumnId, ColumnIndex, ColumnTree, EndReason, InteractionGuard, InteractionLock, NoopReason,
    ResizeCommit, ResizeEffect, ResizePhase, ResizerOptions, TableStateStore, VisualSurface,
};

/// Minimum width change (after clamping) worth writing to the surface.
///
/// Pointer-move events can arrive faster than the host renders; sub-unit changes are dropped.
/// The distance is measured on the clamped width, so a drag that starts less than one unit
/// away from a bound never snaps onto that bound.
const UPDATE_THRESHOLD: f32 = 1.0;

/// The live state of one drag gesture.
///
/// Owned exclusively by [`ColumnResizer`]; at most one exists at a time. Holds the interaction
/// guard, so the lock is released whenever the session is dropped.
#[derive(Debug)]
pub struct ResizeSession<H> {
    column: ColumnIndex,
    column_id: ColumnId,
    initial_width: f32,
    initial_pointer_x: f32,
    last_applied_width: f32,
    leaf_handles: Vec<H>,
    groups: Vec<GroupRefs<H>>,
    _guard: InteractionGuard,
}

impl<H> ResizeSession<H> {
    pub fn column(&self) -> ColumnIndex {
        self.column
    }

    pub fn column_id(&self) -> &ColumnId {
        &self.column_id
    }

    pub fn initial_width(&self) -> f32 {
        self.initial_width
    }

    pub fn initial_pointer_x(&self) -> f32 {
        self.initial_pointer_x
    }

    pub fn last_applied_width(&self) -> f32 {
        self.last_applied_width
    }

    /// Handles of the dragged leaf's own cells. Sibling leaves are never included.
    pub fn leaf_handles(&self) -> &[H] {
        &self.leaf_handles
    }

    /// One entry per ancestor group, nearest parent first.
    pub fn groups(&self) -> &[GroupRefs<H>] {
        &self.groups
    }
}

/// A headless column-resize coordinator.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects; the visual surface and the table state store are passed
///   into each call.
/// - Your adapter drives it from pointer events: `start` on pointer-down over a resize handle,
///   `update` on every pointer-move, `end` on pointer-up, and `abort` when pointer tracking is
///   lost.
///
/// It is a two-state machine (`Idle`/`Dragging`). Every call returns a [`ResizeEffect`];
/// invalid calls are reported as [`ResizeEffect::Noop`] and leave the state untouched.
///
/// `H` is the surface's handle type.
#[derive(Debug)]
pub struct ColumnResizer<H> {
    tree: Arc<ColumnTree>,
    options: ResizerOptions,
    lock: InteractionLock,
    session: Option<ResizeSession<H>>,
    group_widths: Vec<f32>,
}

impl<H> ColumnResizer<H> {
    /// Creates a resizer with its own interaction lock.
    pub fn new(tree: Arc<ColumnTree>, options: ResizerOptions) -> Self {
        Self::with_lock(tree, options, InteractionLock::new())
    }

    /// Creates a resizer that shares `lock` with the host (and possibly other interactions).
    pub fn with_lock(tree: Arc<ColumnTree>, options: ResizerOptions, lock: InteractionLock) -> Self {
        rdebug!(
            columns = tree.len(),
            enabled = options.enabled,
            "ColumnResizer::new"
        );
        Self {
            tree,
            options,
            lock,
            session: None,
            group_widths: Vec::new(),
        }
    }

    pub fn tree(&self) -> &Arc<ColumnTree> {
        &self.tree
    }

    /// Replaces the column hierarchy.
    ///
    /// A live session is ended first, committing its last applied width with
    /// [`EndReason::Teardown`]; that effect is returned. `None` when no drag was live.
    pub fn set_tree<T>(&mut self, tree: Arc<ColumnTree>, store: &mut T) -> Option<ResizeEffect>
    where
        T: TableStateStore + ?Sized,
    {
        let effect = self
            .session
            .is_some()
            .then(|| self.finish(store, EndReason::Teardown));
        self.tree = tree;
        effect
    }

    pub fn options(&self) -> &ResizerOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ResizerOptions) {
        self.options = options;
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ResizerOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn lock(&self) -> &InteractionLock {
        &self.lock
    }

    pub fn phase(&self) -> ResizePhase {
        if self.session.is_some() {
            ResizePhase::Dragging
        } else {
            ResizePhase::Idle
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&ResizeSession<H>> {
        self.session.as_ref()
    }

    /// Group widths written by the most recent applied `update`, nearest ancestor first.
    pub fn last_group_widths(&self) -> &[f32] {
        &self.group_widths
    }

    /// Starts a drag on `column` at horizontal pointer position `pointer_x`.
    ///
    /// Only valid from `Idle` and only for a resizable leaf. Reads the leaf's current width
    /// from the surface (falling back to its configured width, then 0), captures the handles of
    /// every ancestor group and acquires the interaction lock.
    ///
    /// The store's `resizing` flag is not touched here; hosts driving the resizer directly
    /// call [`TableStateStore::set_resizing`] themselves (the adapter's controller does).
    pub fn start<S>(&mut self, surface: &S, column: &str, pointer_x: f32) -> ResizeEffect
    where
        S: VisualSurface<Handle = H> + ?Sized,
    {
        if self.session.is_some() {
            rdebug!(requested = column, "start: already dragging");
            return self.emit(ResizeEffect::Noop(NoopReason::AlreadyDragging));
        }
        if !self.options.enabled {
            return self.emit(ResizeEffect::Noop(NoopReason::Disabled));
        }
        if !pointer_x.is_finite() {
            rwarn!(pointer_x, "start: non-finite pointer position");
            return self.emit(ResizeEffect::Noop(NoopReason::InvalidPointer));
        }
        let Some(index) = self.tree.index_of(column) else {
            return self.emit(ResizeEffect::Noop(NoopReason::UnknownColumn));
        };
        let node = self.tree.node(index);
        if node.is_group() {
            return self.emit(ResizeEffect::Noop(NoopReason::GroupColumn));
        }
        if !node.resizable() {
            return self.emit(ResizeEffect::Noop(NoopReason::NotResizable));
        }

        let Some(guard) = self.lock.try_acquire(self.options.cursor) else {
            rwarn!(column, "start: interaction lock is held elsewhere");
            return self.emit(ResizeEffect::Noop(NoopReason::LockUnavailable));
        };

        let mut leaf_handles = Vec::new();
        surface.resolve(node.id(), &mut leaf_handles);
        let initial_width = leaf_handles
            .iter()
            .find_map(|h| surface.width(h))
            .or(node.width())
            .unwrap_or(0.0);

        let groups: Vec<_> = self
            .tree
            .ancestors(index)
            .map(|group| GroupRefs::capture(&self.tree, surface, group))
            .collect();

        rdebug!(
            column,
            initial_width,
            pointer_x,
            leaf_handles = leaf_handles.len(),
            groups = groups.len(),
            "resize session started"
        );

        let column_id = node.id().clone();
        self.group_widths.clear();
        self.session = Some(ResizeSession {
            column: index,
            column_id: column_id.clone(),
            initial_width,
            initial_pointer_x: pointer_x,
            last_applied_width: initial_width,
            leaf_handles,
            groups,
            _guard: guard,
        });
        self.emit(ResizeEffect::Started {
            column: column_id,
            initial_width,
        })
    }

    /// Applies a pointer-move sample.
    ///
    /// The proposed width is always computed from the pointer's total displacement since
    /// `start`, so dropped frames never accumulate error. Writes to the surface only; never
    /// commits.
    pub fn update<S>(&mut self, surface: &mut S, pointer_x: f32) -> ResizeEffect
    where
        S: VisualSurface<Handle = H> + ?Sized,
    {
        let Some(session) = self.session.as_mut() else {
            return self.emit(ResizeEffect::Noop(NoopReason::NotDragging));
        };
        if !pointer_x.is_finite() {
            rwarn!(pointer_x, "update: non-finite pointer position");
            return self.emit(ResizeEffect::Noop(NoopReason::InvalidPointer));
        }

        let delta = pointer_x - session.initial_pointer_x;
        let proposed = (session.initial_width + delta).max(0.0);
        let width = self.tree.node(session.column).clamp_width(proposed);
        if distance(width, session.last_applied_width) < UPDATE_THRESHOLD {
            return self.emit(ResizeEffect::Noop(NoopReason::BelowThreshold));
        }

        session.last_applied_width = width;
        for handle in &session.leaf_handles {
            surface.set_width(handle, width);
        }
        propagate(
            surface,
            &session.groups,
            session.column,
            width,
            &mut self.group_widths,
        );
        rtrace!(pointer_x, width, "resize update");

        let column = session.column_id.clone();
        self.emit(ResizeEffect::Updated { column, width })
    }

    /// Ends the drag on pointer-up and commits the last applied width.
    ///
    /// The interaction lock is released even if the store rejects the commit. Like `start`,
    /// this leaves the store's `resizing` flag to the caller.
    pub fn end<T>(&mut self, store: &mut T) -> ResizeEffect
    where
        T: TableStateStore + ?Sized,
    {
        self.finish(store, EndReason::Released)
    }

    /// Ends the drag because pointer tracking was lost.
    ///
    /// Goes through exactly the same commit and release path as [`Self::end`].
    pub fn abort<T>(&mut self, store: &mut T, reason: EndReason) -> ResizeEffect
    where
        T: TableStateStore + ?Sized,
    {
        self.finish(store, reason)
    }

    fn finish<T>(&mut self, store: &mut T, reason: EndReason) -> ResizeEffect
    where
        T: TableStateStore + ?Sized,
    {
        // Taken out first: the guard inside is dropped on every path below, unwinding included.
        let Some(session) = self.session.take() else {
            return self.emit(ResizeEffect::Noop(NoopReason::NotDragging));
        };

        let column = session.column_id.clone();
        let width = session.last_applied_width;
        let stored = match store.commit_resize(ResizeCommit {
            column: column.clone(),
            width,
        }) {
            Ok(()) => true,
            Err(_err) => {
                rwarn!(error = %_err, "resize commit rejected by store");
                false
            }
        };
        drop(session);

        rdebug!(column = %column, width, ?reason, stored, "resize session ended");
        self.emit(ResizeEffect::Committed {
            column,
            width,
            reason,
            stored,
        })
    }

    fn emit(&self, effect: ResizeEffect) -> ResizeEffect {
        if let Some(cb) = &self.options.on_resize {
            cb(&effect);
        }
        effect
    }
}

fn distance(a: f32, b: f32) -> f32 {
    if a > b { a - b } else { b - a }
}
