//! Rendering contract shared by the 2D and 3D presentations.

use sim_protocol::Snapshot;

/// A drawable-state builder fed by snapshot replacements.
///
/// Both the polling path and the action path funnel through this one
/// contract: a snapshot lands in the view state, and the active adapter
/// rebuilds its drawable state from it.
pub trait RenderAdapter {
    /// Rebuilds this adapter's drawable state from `snapshot`.
    ///
    /// Must be total over any input (coordinates outside the board degrade
    /// gracefully rather than panic) and idempotent: the resulting drawable
    /// state is determined by `snapshot` alone, regardless of what was
    /// rendered before.
    fn render(&mut self, snapshot: &Snapshot);
}
