use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::CursorHint;

/// Notification fired when the interaction lock changes hands.
///
/// Hosts use it to apply the global side effects of a drag: show the resize cursor, stop other
/// interactive elements from receiving pointer input, and attach/detach document-level pointer
/// listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockEvent {
    Acquired { cursor: CursorHint },
    Released,
}

pub type LockListener = Arc<dyn Fn(LockEvent) + Send + Sync>;

struct LockInner {
    held: AtomicBool,
    cursor: AtomicU8,
    listener: Option<LockListener>,
}

/// An exclusive interaction lock shared between the resizer and the host.
///
/// While held, every other pointer-interactive surface should reject input (see
/// [`InteractionLock::admits_input`]). The lock can only be taken through
/// [`InteractionLock::try_acquire`], which returns an [`InteractionGuard`]; dropping the guard
/// is the only way to release it, so the lock cannot outlive the session that took it, even
/// when the owner unwinds.
#[derive(Clone)]
pub struct InteractionLock {
    inner: Arc<LockInner>,
}

impl InteractionLock {
    pub fn new() -> Self {
        Self::from_listener(None)
    }

    pub fn with_listener(listener: impl Fn(LockEvent) + Send + Sync + 'static) -> Self {
        Self::from_listener(Some(Arc::new(listener)))
    }

    fn from_listener(listener: Option<LockListener>) -> Self {
        Self {
            inner: Arc::new(LockInner {
                held: AtomicBool::new(false),
                cursor: AtomicU8::new(encode_cursor(CursorHint::default())),
                listener,
            }),
        }
    }

    /// Takes the lock, or returns `None` if it is already held.
    pub fn try_acquire(&self, cursor: CursorHint) -> Option<InteractionGuard> {
        if self
            .inner
            .held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }
        self.inner
            .cursor
            .store(encode_cursor(cursor), Ordering::Release);
        if let Some(listener) = &self.inner.listener {
            listener(LockEvent::Acquired { cursor });
        }
        Some(InteractionGuard {
            inner: Arc::clone(&self.inner),
        })
    }

    pub fn is_held(&self) -> bool {
        self.inner.held.load(Ordering::Acquire)
    }

    /// Whether surfaces other than the lock holder may handle pointer input.
    pub fn admits_input(&self) -> bool {
        !self.is_held()
    }

    /// The cursor the host should show globally, if the lock is held.
    pub fn cursor(&self) -> Option<CursorHint> {
        if !self.is_held() {
            return None;
        }
        Some(decode_cursor(self.inner.cursor.load(Ordering::Acquire)))
    }

    /// Whether `self` and `other` are handles to the same lock.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for InteractionLock {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for InteractionLock {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InteractionLock")
            .field("held", &self.is_held())
            .field("listener", &self.inner.listener.is_some())
            .finish()
    }
}

/// Proof of holding an [`InteractionLock`]. Releases the lock on drop.
#[must_use = "dropping the guard releases the interaction lock immediately"]
pub struct InteractionGuard {
    inner: Arc<LockInner>,
}

impl InteractionGuard {
    /// Releases the lock. Equivalent to dropping the guard.
    pub fn release(self) {}
}

impl Drop for InteractionGuard {
    fn drop(&mut self) {
        self.inner.held.store(false, Ordering::Release);
        if let Some(listener) = &self.inner.listener {
            listener(LockEvent::Released);
        }
    }
}

impl core::fmt::Debug for InteractionGuard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InteractionGuard").finish_non_exhaustive()
    }
}

fn encode_cursor(cursor: CursorHint) -> u8 {
    match cursor {
        CursorHint::ColResize => 0,
        CursorHint::EwResize => 1,
    }
}

fn decode_cursor(raw: u8) -> CursorHint {
    match raw {
        1 => CursorHint::EwResize,
        _ => CursorHint::ColResize,
    }
}
