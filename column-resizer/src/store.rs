use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{CommitError, ResizeCommit, ResizedWidths, TableState};

/// The table state container that owns [`ResizedWidths`].
///
/// The resizer reads nothing but the committed widths and writes exclusively through
/// `commit_resize`, which implementations must surface as its own tagged transition so that
/// dependent consumers (layout recomputation, persistence) can react to resize commits
/// specifically.
pub trait TableStateStore {
    fn resized_widths(&self) -> &ResizedWidths;

    fn commit_resize(&mut self, commit: ResizeCommit) -> Result<(), CommitError>;

    /// Toggles the "a resize is in progress" flag. Stores that do not track it can ignore this.
    ///
    /// `ColumnResizer` never calls this; whoever drives it (e.g. the adapter's controller)
    /// flips the flag around `start` and `end`/`abort`.
    fn set_resizing(&mut self, resizing: bool) {
        let _ = resizing;
    }
}

/// A tagged state transition emitted by [`TableStore`].
#[derive(Clone, Debug, PartialEq)]
pub enum TableAction {
    /// A drag session committed its final width.
    ResizeColumn(ResizeCommit),
    /// A drag session started (`true`) or ended (`false`).
    SetResizing(bool),
    /// Committed widths were replaced wholesale (e.g. restored from a snapshot).
    RestoreResized,
}

impl TableAction {
    pub fn is_resize_commit(&self) -> bool {
        matches!(self, Self::ResizeColumn(_))
    }
}

/// A callback fired after a [`TableStore`] transition, with the state already updated.
pub type TableListener = Arc<dyn Fn(&TableState, &TableAction) + Send + Sync>;

/// A hook that decides whether a commit is accepted.
pub type CommitFilter = Arc<dyn Fn(&TableState, &ResizeCommit) -> bool + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// An in-memory [`TableStateStore`] with tagged actions and subscribers.
#[derive(Clone, Default)]
pub struct TableStore {
    state: TableState,
    listeners: Vec<(SubscriptionId, TableListener)>,
    next_subscription: u64,
    commit_filter: Option<CommitFilter>,
}

impl TableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: TableState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn with_commit_filter(
        mut self,
        filter: Option<impl Fn(&TableState, &ResizeCommit) -> bool + Send + Sync + 'static>,
    ) -> Self {
        self.commit_filter = filter.map(|f| Arc::new(f) as _);
        self
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn is_resizing(&self) -> bool {
        self.state.resizing
    }

    pub fn subscribe(
        &mut self,
        listener: impl Fn(&TableState, &TableAction) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription = self.next_subscription.wrapping_add(1);
        self.listeners.push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Replaces the committed widths, e.g. when restoring a saved layout.
    pub fn restore_resized(&mut self, widths: ResizedWidths) {
        self.state.resized_columns = widths;
        self.emit(&TableAction::RestoreResized);
    }

    fn emit(&self, action: &TableAction) {
        for (_, listener) in &self.listeners {
            listener(&self.state, action);
        }
    }
}

impl TableStateStore for TableStore {
    fn resized_widths(&self) -> &ResizedWidths {
        &self.state.resized_columns
    }

    fn commit_resize(&mut self, commit: ResizeCommit) -> Result<(), CommitError> {
        if let Some(filter) = &self.commit_filter {
            if !filter(&self.state, &commit) {
                return Err(CommitError::Rejected {
                    column: commit.column,
                    width: commit.width,
                });
            }
        }
        self.state.resized_columns.apply(&commit);
        self.emit(&TableAction::ResizeColumn(commit));
        Ok(())
    }

    fn set_resizing(&mut self, resizing: bool) {
        if self.state.resizing == resizing {
            return;
        }
        self.state.resizing = resizing;
        self.emit(&TableAction::SetResizing(resizing));
    }
}

impl core::fmt::Debug for TableStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TableStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .field("commit_filter", &self.commit_filter.is_some())
            .finish()
    }
}
