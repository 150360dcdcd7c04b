//! Shared wire types for the grid-world simulation service.
//!
//! This crate contains pure data structures with no transport or rendering
//! logic. It is a dependency for all other crates in the workspace.
//!
//! The service speaks JSON over three endpoints: `POST /reset` and
//! `GET /state` both return a full [`Snapshot`], while `POST /step` takes an
//! [`Action`] and returns only a [`StepOutcome`]. Positions travel as
//! two-element `[x, y]` arrays.

pub mod action;
pub mod snapshot;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

// Re-export action types
pub use action::Action;

// Re-export snapshot types
pub use snapshot::{GridPos, Snapshot, StepOutcome};
