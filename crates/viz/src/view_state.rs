//! Client-held view of the remote simulation.
//!
//! [`ViewState`] caches the last known [`Snapshot`] plus the display values
//! derived from it. Commits replace the snapshot wholesale; nothing is ever
//! merged, and a failed request leaves the previous snapshot untouched so the
//! last good frame stays on screen.
//!
//! Every outbound request is tagged with a generation from
//! [`ViewState::begin_request`]. Responses are committed last-write-wins,
//! except that a response older than the newest committed one is discarded;
//! this keeps a reset from being overwritten by a step sequence that was
//! already in flight when the reset was issued. Requests themselves are never
//! cancelled.

use bevy::prelude::*;
use std::time::Instant;

use sim_protocol::Snapshot;

/// Cached copy of the last known simulation state.
#[derive(Resource, Default)]
pub struct ViewState {
    /// The most recently committed snapshot.
    snapshot: Option<Snapshot>,
    /// Generation of the committed snapshot.
    committed_generation: u64,
    /// Last generation handed out to a request.
    next_generation: u64,
    /// Reward shown in the HUD.
    reward: f64,
    /// Poll counter shown in the HUD. Display-only: counts successful polls,
    /// not simulation ticks.
    epoch: u64,
    /// When a snapshot was last committed.
    last_update: Option<Instant>,
    /// Message from the most recent failed request, if any.
    last_error: Option<String>,
}

/// Event emitted when a new snapshot lands in [`ViewState`].
#[derive(Event)]
pub struct StateUpdatedEvent {
    /// Generation of the committed snapshot.
    pub generation: u64,
}

impl ViewState {
    /// The last-set snapshot, or `None` before first initialization.
    pub fn current(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Reward display value.
    pub fn reward(&self) -> f64 {
        self.reward
    }

    /// Poll counter display value.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// When a snapshot was last committed.
    pub fn last_update(&self) -> Option<Instant> {
        self.last_update
    }

    /// Message from the most recent failed request, cleared on the next
    /// successful commit.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Allocates the generation for an outbound request.
    pub fn begin_request(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    /// Commits a fresh-episode snapshot; clears the reward and epoch
    /// displays. Returns false if the response was stale.
    pub fn commit_reset(&mut self, generation: u64, snapshot: Snapshot) -> bool {
        if self.is_stale(generation) {
            return false;
        }
        self.committed_generation = generation;
        self.snapshot = Some(snapshot);
        self.reward = 0.0;
        self.epoch = 0;
        self.mark_updated();
        true
    }

    /// Commits the snapshot observed after a step, with the reward the step
    /// itself returned. Returns false if the response was stale.
    pub fn commit_step(&mut self, generation: u64, reward: f64, snapshot: Snapshot) -> bool {
        if self.is_stale(generation) {
            return false;
        }
        self.committed_generation = generation;
        self.snapshot = Some(snapshot);
        self.reward = reward;
        self.mark_updated();
        true
    }

    /// Commits a polled snapshot; the reward display follows the snapshot
    /// and the epoch counter advances. Returns false if the response was
    /// stale.
    pub fn commit_poll(&mut self, generation: u64, snapshot: Snapshot) -> bool {
        if self.is_stale(generation) {
            return false;
        }
        self.committed_generation = generation;
        self.reward = snapshot.reward;
        self.snapshot = Some(snapshot);
        self.epoch += 1;
        self.mark_updated();
        true
    }

    /// Records a failed request. The cached snapshot is left untouched.
    pub fn record_failure(&mut self, message: &str) {
        self.last_error = Some(message.to_string());
    }

    fn is_stale(&self, generation: u64) -> bool {
        if generation < self.committed_generation {
            tracing::debug!(
                "discarding stale response (generation {} < {})",
                generation,
                self.committed_generation
            );
            return true;
        }
        false
    }

    fn mark_updated(&mut self) {
        self.last_update = Some(Instant::now());
        self.last_error = None;
    }
}
