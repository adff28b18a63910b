use alloc::vec;
use alloc::vec::Vec;

use crate::{ColumnIndex, ColumnTree, ResizedWidths, VisualSurface};

/// Widths resolved by [`apply_layout`], indexed by column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnWidths {
    widths: Vec<Option<f32>>,
}

impl ColumnWidths {
    /// `None` when the column has no committed/configured width and nothing is rendered.
    pub fn get(&self, index: ColumnIndex) -> Option<f32> {
        self.widths.get(index.get()).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}

/// Re-applies committed widths to the whole surface (a full re-render pass).
///
/// Each leaf gets its committed width, else its configured width, else keeps whatever it is
/// rendered at. Every group is then resummed from its children, bottom-up. Run this after a
/// commit, after a commit was rejected (to revert the drag's visual width), or when the surface
/// is rebuilt.
pub fn apply_layout<S>(tree: &ColumnTree, surface: &mut S, committed: &ResizedWidths) -> ColumnWidths
where
    S: VisualSurface + ?Sized,
{
    let mut widths = vec![None; tree.len()];
    let mut handles = Vec::new();

    // Reverse pre-order visits every child before its parent.
    for (index, node) in tree.iter().rev() {
        let width = if node.is_leaf() {
            match committed.get(node.id()).or(node.width()) {
                Some(width) => {
                    write_all(surface, node.id(), width, &mut handles);
                    Some(width)
                }
                None => surface.column_width(node.id()),
            }
        } else {
            let sum: f32 = node
                .children()
                .iter()
                .map(|child| widths[child.get()].unwrap_or(0.0))
                .sum();
            write_all(surface, node.id(), sum, &mut handles);
            Some(sum)
        };
        widths[index.get()] = width;
    }

    rtrace!(columns = tree.len(), "apply_layout");
    ColumnWidths { widths }
}

fn write_all<S>(surface: &mut S, column: &crate::ColumnId, width: f32, handles: &mut Vec<S::Handle>)
where
    S: VisualSurface + ?Sized,
{
    handles.clear();
    surface.resolve(column, handles);
    for h in handles.iter() {
        surface.set_width(h, width);
    }
}
