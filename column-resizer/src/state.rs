use alloc::collections::BTreeMap;

use crate::{ColumnId, ResizeCommit};

/// Committed column widths (column id → width).
///
/// Sparse: only columns that have been resized at least once are present. Written only by a
/// resize commit, never by intermediate drag frames.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ResizedWidths {
    widths: BTreeMap<ColumnId, f32>,
}

impl ResizedWidths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<f32> {
        self.widths.get(column).copied()
    }

    /// The committed width of `column`, or `default` if it was never resized.
    pub fn width_or(&self, column: &str, default: f32) -> f32 {
        self.get(column).unwrap_or(default)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.widths.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ColumnId, f32)> + '_ {
        self.widths.iter().map(|(k, v)| (k, *v))
    }

    /// Applies a commit, returning the previously committed width.
    pub fn apply(&mut self, commit: &ResizeCommit) -> Option<f32> {
        self.widths.insert(commit.column.clone(), commit.width)
    }

    pub fn reset(&mut self, column: &str) -> Option<f32> {
        self.widths.remove(column)
    }

    pub fn reset_all(&mut self) {
        self.widths.clear();
    }
}

impl FromIterator<(ColumnId, f32)> for ResizedWidths {
    fn from_iter<I: IntoIterator<Item = (ColumnId, f32)>>(iter: I) -> Self {
        Self {
            widths: iter.into_iter().collect(),
        }
    }
}

/// The slice of table state owned by the resize feature.
///
/// This is useful for restoring committed layout across table re-creation without coupling
/// the resizer to any specific state container.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableState {
    pub resized_columns: ResizedWidths,
    /// `true` while a drag gesture is live. Never persisted.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub resizing: bool,
}
