use alloc::string::String;
use core::fmt;

/// A stable, unique column identifier.
///
/// This is also the correlation key the rendering layer attaches to cells and headers, so the
/// visual surface can be queried and updated by id.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(id: &str) -> Self {
        Self(id.into())
    }
}

impl From<String> for ColumnId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl core::ops::Deref for ColumnId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ColumnId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::borrow::Borrow<str> for ColumnId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Index of a column inside a [`crate::ColumnTree`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnIndex(pub(crate) usize);

impl ColumnIndex {
    pub fn get(self) -> usize {
        self.0
    }
}

/// Pointer cursor the host should show while an affordance is hovered or a drag is live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CursorHint {
    #[default]
    ColResize,
    EwResize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResizePhase {
    #[default]
    Idle,
    Dragging,
}

/// How a drag session left the `Dragging` phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndReason {
    /// Regular pointer-up.
    Released,
    /// The pointer left the trackable surface.
    PointerLeft,
    /// Pointer capture was lost (e.g. another element grabbed it).
    CaptureLost,
    /// The hosting surface lost focus.
    FocusLost,
    /// The column hierarchy was replaced mid-drag.
    Teardown,
}

/// The durable output of a finished drag session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResizeCommit {
    pub column: ColumnId,
    pub width: f32,
}

/// Why a resizer call did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoopReason {
    /// `start` while another session owns the gesture.
    AlreadyDragging,
    /// `update`/`end`/`abort` without a live session.
    NotDragging,
    UnknownColumn,
    /// Group columns derive their width from their children and are never dragged.
    GroupColumn,
    NotResizable,
    /// The resizer is disabled through its options.
    Disabled,
    /// The interaction lock is held by someone else.
    LockUnavailable,
    /// The clamped width moved less than one unit from the last applied width.
    BelowThreshold,
    /// The pointer position was NaN or infinite.
    InvalidPointer,
}

/// Effect emitted by one resizer call.
#[derive(Clone, Debug, PartialEq)]
pub enum ResizeEffect {
    Started {
        column: ColumnId,
        initial_width: f32,
    },
    Updated {
        column: ColumnId,
        width: f32,
    },
    Committed {
        column: ColumnId,
        width: f32,
        reason: EndReason,
        /// `false` when the store rejected the commit.
        stored: bool,
    },
    Noop(NoopReason),
}

impl ResizeEffect {
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Noop(_))
    }

    pub fn noop_reason(&self) -> Option<NoopReason> {
        match self {
            Self::Noop(reason) => Some(*reason),
            _ => None,
        }
    }
}
