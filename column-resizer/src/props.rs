//! Render-facing decoration: what the rendering layer attaches to headers, cells and resize
//! handles so pointer input can be routed back into the resizer.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::{
    ColumnId, ColumnIndex, ColumnResizer, ColumnTree, CursorHint, ResizeEffect, VisualSurface,
};

/// Class tag the rendering layer puts on header cells.
pub const HEADER_CELL_CLASS: &str = "header-cell";

/// Stable key correlating a rendered cell or header with its column.
///
/// Renders as the column id, so it can be used directly as a DOM data attribute or a lookup
/// key in a surface's handle registry.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CorrelationKey(ColumnId);

impl CorrelationKey {
    pub fn column_id(&self) -> &ColumnId {
        &self.0
    }
}

impl fmt::Debug for CorrelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CorrelationKey").field(&self.0).finish()
    }
}

impl fmt::Display for CorrelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Binding for a column's resize handle. Only produced for resizable leaf columns.
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeHandleProps {
    column: ColumnIndex,
    column_id: ColumnId,
    cursor: CursorHint,
}

impl ResizeHandleProps {
    pub fn column(&self) -> ColumnIndex {
        self.column
    }

    pub fn column_id(&self) -> &ColumnId {
        &self.column_id
    }

    /// Cursor to show while hovering the handle.
    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    pub fn with_cursor(mut self, cursor: CursorHint) -> Self {
        self.cursor = cursor;
        self
    }

    /// The pointer-down activation: starts a drag on this handle's column.
    pub fn on_pointer_down<S>(
        &self,
        resizer: &mut ColumnResizer<S::Handle>,
        surface: &S,
        pointer_x: f32,
    ) -> ResizeEffect
    where
        S: VisualSurface + ?Sized,
    {
        resizer.start(surface, &self.column_id, pointer_x)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellProps {
    pub key: CorrelationKey,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderProps {
    pub key: CorrelationKey,
    pub class: &'static str,
    /// Ordered leaf-descendant ids, for group headers only.
    pub child_columns: Option<Arc<[ColumnId]>>,
}

/// Per-column props for the rendering layer, computed once per column hierarchy.
///
/// Flattened leaf lists for every group are precomputed here so hot paths never have to walk
/// the tree.
#[derive(Clone, Debug)]
pub struct ColumnDecorations {
    tree: Arc<ColumnTree>,
    cursor: CursorHint,
    leaves: Vec<Option<Arc<[ColumnId]>>>,
}

impl ColumnDecorations {
    pub fn new(tree: Arc<ColumnTree>, cursor: CursorHint) -> Self {
        let leaves: Vec<Option<Arc<[ColumnId]>>> = tree
            .iter()
            .map(|(index, node)| {
                node.is_group()
                    .then(|| Arc::from(tree.flatten_leaves(index)))
            })
            .collect();
        Self {
            tree,
            cursor,
            leaves,
        }
    }

    pub fn tree(&self) -> &Arc<ColumnTree> {
        &self.tree
    }

    /// Returns the handle binding for a resizable leaf, `None` for groups, non-resizable and
    /// unknown columns (no drag affordance is rendered).
    pub fn bind_resize_handle(&self, column: &str) -> Option<ResizeHandleProps> {
        let index = self.tree.index_of(column)?;
        let node = self.tree.node(index);
        if !node.is_draggable() {
            return None;
        }
        Some(ResizeHandleProps {
            column: index,
            column_id: node.id().clone(),
            cursor: self.cursor,
        })
    }

    pub fn correlation_key(&self, column: &str) -> Option<CorrelationKey> {
        self.tree
            .get_by_id(column)
            .map(|node| CorrelationKey(node.id().clone()))
    }

    /// Ordered leaf-descendant ids of a group. `None` for leaves and unknown columns.
    pub fn flattened_leaf_ids(&self, group: &str) -> Option<&[ColumnId]> {
        let index = self.tree.index_of(group)?;
        self.leaves[index.get()].as_deref()
    }

    pub fn cell_props(&self, column: &str) -> Option<CellProps> {
        self.correlation_key(column).map(|key| CellProps { key })
    }

    pub fn header_props(&self, column: &str) -> Option<HeaderProps> {
        let index = self.tree.index_of(column)?;
        Some(HeaderProps {
            key: CorrelationKey(self.tree.node(index).id().clone()),
            class: HEADER_CELL_CLASS,
            child_columns: self.leaves[index.get()].clone(),
        })
    }
}
