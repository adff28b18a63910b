use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;

use column_resizer::{ColumnId, ColumnTree, VisualSurface};

/// Handle to one rendered cell of a [`HeadlessSurface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellHandle {
    column: usize,
    cell: usize,
    generation: u32,
}

impl CellHandle {
    pub fn cell(&self) -> usize {
        self.cell
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct SurfaceColumn {
    id: ColumnId,
    cells: Vec<f32>,
    mounted: bool,
    /// Bumped on every unmount, so handles resolved before it go stale.
    generation: u32,
}

/// An in-memory [`VisualSurface`] for hosts without a real render tree (TUI layouts, tests,
/// demos).
///
/// Every column owns a run of cells (its header plus any rendered body cells) that share one
/// width. Columns can be unmounted and remounted to mimic row/column virtualization: while
/// unmounted nothing resolves, and handles taken before the unmount stay stale for good.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeadlessSurface {
    columns: Vec<SurfaceColumn>,
    by_id: BTreeMap<ColumnId, usize>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts every column of `tree`: one header cell per column plus `rows` body cells per
    /// leaf. Leaves start at their configured width (or `default_width`), groups at the sum of
    /// their children.
    pub fn from_tree(tree: &ColumnTree, rows: usize, default_width: f32) -> Self {
        let mut widths = vec![0.0f32; tree.len()];
        for (index, node) in tree.iter().rev() {
            widths[index.get()] = if node.is_leaf() {
                node.width().unwrap_or(default_width)
            } else {
                node.children().iter().map(|c| widths[c.get()]).sum()
            };
        }

        let mut surface = Self::new();
        for (index, node) in tree.iter() {
            let cells = if node.is_leaf() { 1 + rows } else { 1 };
            surface.insert_column(node.id().clone(), widths[index.get()], cells);
        }
        surface
    }

    /// Adds (or replaces) a mounted column with `cells` cells at `width`.
    pub fn insert_column(&mut self, id: impl Into<ColumnId>, width: f32, cells: usize) {
        let id = id.into();
        let column = SurfaceColumn {
            id: id.clone(),
            cells: vec![width; cells],
            mounted: true,
            generation: 0,
        };
        match self.by_id.get(&id) {
            Some(&slot) => {
                let generation = self.columns[slot].generation.wrapping_add(1);
                self.columns[slot] = SurfaceColumn {
                    generation,
                    ..column
                };
            }
            None => {
                self.by_id.insert(id, self.columns.len());
                self.columns.push(column);
            }
        }
    }

    pub fn with_column(mut self, id: impl Into<ColumnId>, width: f32, cells: usize) -> Self {
        self.insert_column(id, width, cells);
        self
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Virtualizes `column` out. Returns `false` for unknown or already unmounted columns.
    pub fn unmount(&mut self, column: &str) -> bool {
        let Some(col) = self.column_mut(column) else {
            return false;
        };
        if !col.mounted {
            return false;
        }
        col.mounted = false;
        col.generation = col.generation.wrapping_add(1);
        true
    }

    /// Renders `column` again at `width`. Returns `false` for unknown or already mounted
    /// columns.
    pub fn mount(&mut self, column: &str, width: f32) -> bool {
        let Some(col) = self.column_mut(column) else {
            return false;
        };
        if col.mounted {
            return false;
        }
        col.mounted = true;
        col.cells.fill(width);
        true
    }

    pub fn is_mounted(&self, column: &str) -> bool {
        self.column(column).is_some_and(|c| c.mounted)
    }

    /// Widths of every cell of a mounted column, header first.
    pub fn cell_widths(&self, column: &str) -> Option<&[f32]> {
        self.column(column)
            .filter(|c| c.mounted)
            .map(|c| c.cells.as_slice())
    }

    /// Displayed width of a mounted column.
    pub fn width_of(&self, column: &str) -> Option<f32> {
        self.cell_widths(column)?.first().copied()
    }

    fn column(&self, id: &str) -> Option<&SurfaceColumn> {
        self.by_id.get(id).map(|&slot| &self.columns[slot])
    }

    fn column_mut(&mut self, id: &str) -> Option<&mut SurfaceColumn> {
        let slot = *self.by_id.get(id)?;
        Some(&mut self.columns[slot])
    }

    fn live(&self, handle: &CellHandle) -> Option<&SurfaceColumn> {
        self.columns
            .get(handle.column)
            .filter(|c| c.mounted && c.generation == handle.generation && handle.cell < c.cells.len())
    }
}

impl VisualSurface for HeadlessSurface {
    type Handle = CellHandle;

    fn resolve(&self, column: &ColumnId, out: &mut Vec<CellHandle>) {
        let Some(&slot) = self.by_id.get(column) else {
            return;
        };
        let col = &self.columns[slot];
        if !col.mounted {
            return;
        }
        out.extend((0..col.cells.len()).map(|cell| CellHandle {
            column: slot,
            cell,
            generation: col.generation,
        }));
    }

    fn width(&self, handle: &CellHandle) -> Option<f32> {
        self.live(handle).map(|c| c.cells[handle.cell])
    }

    fn set_width(&mut self, handle: &CellHandle, width: f32) {
        if self.live(handle).is_none() {
            return;
        }
        self.columns[handle.column].cells[handle.cell] = width;
    }
}
