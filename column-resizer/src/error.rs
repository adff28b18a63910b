use crate::ColumnId;

/// Error returned when a column configuration cannot be turned into a [`crate::ColumnTree`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ColumnTreeError {
    #[error("column id must not be empty")]
    EmptyId,

    #[error("duplicate column id `{id}`")]
    DuplicateId { id: ColumnId },

    /// `min_width` is negative or not finite.
    #[error("column `{id}` has an invalid min width {min_width}")]
    InvalidMinWidth { id: ColumnId, min_width: f32 },

    /// `max_width` is not finite or is below `min_width`.
    #[error("column `{id}` has max width {max_width} below min width {min_width}")]
    InvalidMaxWidth {
        id: ColumnId,
        min_width: f32,
        max_width: f32,
    },
}

/// Error a [`crate::TableStateStore`] may return when it refuses a resize commit.
///
/// Commits are best-effort: the resizer logs the rejection and still ends the session.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CommitError {
    #[error("store rejected width {width} for column `{column}`")]
    Rejected { column: ColumnId, width: f32 },
}
