//! Adapter utilities for the `column-resizer` crate.
//!
//! The `column-resizer` crate is UI-agnostic and focuses on the drag state machine and width
//! propagation. This crate provides small, framework-neutral helpers commonly needed by
//! adapters:
//!
//! - An event-driven controller that owns the resizer, the surface and the table store
//! - An in-memory visual surface with mountable cells (for TUI layouts, tests and demos)
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod surface;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use surface::{CellHandle, HeadlessSurface};
