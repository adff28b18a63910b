//! A headless column-resize coordinator for hierarchical data grids.
//!
//! For adapter-level utilities (an event-driven controller, a headless surface), see the
//! `column-resizer-adapter` crate.
//!
//! This crate turns a pointer drag on a column border into live width updates for that column
//! and every enclosing group column, then commits the final width into table state:
//! - a column hierarchy arena with leaf flattening and ancestor walks
//! - a two-state (`Idle`/`Dragging`) resize session with clamping and an update threshold
//! - bottom-up width propagation along the dragged column's ancestor chain
//! - an exclusive interaction lock released on every exit path
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - a [`VisualSurface`] that reads and writes rendered column widths
//! - a [`TableStateStore`] that owns committed widths (or use [`TableStore`])
//! - pointer-down/move/up events routed into [`ColumnResizer`]
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod column;
mod error;
mod key;
mod layout;
mod lock;
mod options;
mod propagate;
mod props;
mod resizer;
mod state;
mod store;
mod surface;
mod types;


pub use column::{Ancestors, ColumnDef, ColumnNode, ColumnTree};
pub use error::{ColumnTreeError, CommitError};
pub use layout::{ColumnWidths, apply_layout};
pub use lock::{InteractionGuard, InteractionLock, LockEvent, LockListener};
pub use options::{OnResizeCallback, ResizerOptions};
pub use propagate::{ChildRefs, GroupRefs, propagate, resum_group};
pub use props::{
    CellProps, ColumnDecorations, CorrelationKey, HEADER_CELL_CLASS, HeaderProps,
    ResizeHandleProps,
};
pub use resizer::{ColumnResizer, ResizeSession};
pub use state::{ResizedWidths, TableState};
pub use store::{
    CommitFilter, SubscriptionId, TableAction, TableListener, TableStateStore, TableStore,
};
pub use surface::VisualSurface;
pub use types::{
    ColumnId, ColumnIndex, CursorHint, EndReason, NoopReason, ResizeCommit, ResizeEffect,
    ResizePhase,
};
