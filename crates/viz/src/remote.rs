//! Remote session: dispatches simulation requests and feeds results back
//! into the view state.
//!
//! Each request runs on its own worker thread (the underlying client blocks)
//! and reports back over an mpsc channel that a frame system drains, so the
//! presentation surface never waits on the network. Multiple requests may be
//! in flight at once; ordering is resolved at commit time by the generation
//! counter in [`ViewState`]. In-flight requests are never cancelled.

use bevy::prelude::*;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sim_client::{ClientError, SimulationClient};
use sim_protocol::{Action, Snapshot};

use crate::config::{RenderMode, VizConfig};
use crate::view_state::{StateUpdatedEvent, ViewState};

/// Plugin wiring the remote session into the app.
pub struct RemotePlugin;

impl Plugin for RemotePlugin {
    fn build(&self, app: &mut App) {
        // RemoteSession should be inserted by main.rs before adding this
        // plugin. If not present, build one from the config.
        if !app.world().contains_resource::<RemoteSession>() {
            let config = app
                .world()
                .get_resource::<VizConfig>()
                .cloned()
                .unwrap_or_default();
            app.insert_resource(RemoteSession::from_config(&config));
        }

        let config = app.world().resource::<VizConfig>().clone();

        app.init_resource::<ViewState>()
            .add_event::<StateUpdatedEvent>()
            .add_systems(Startup, initial_reset)
            .add_systems(Update, drain_responses);

        // Only the grid presentation polls autonomously; the scene updates
        // on reset and step alone.
        if config.mode == RenderMode::Grid {
            app.insert_resource(PollTimer(Timer::new(
                Duration::from_millis(config.polling.interval_ms),
                TimerMode::Repeating,
            )))
            .add_systems(Update, tick_poll_timer);
        }
    }
}

/// Where the session is in its request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// No request issued yet; startup reset pending.
    #[default]
    Uninitialized,
    /// At least one request in flight.
    Pending,
    /// All issued requests have resolved.
    Idle,
}

/// A request the session can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteRequest {
    /// Start a new episode.
    Reset,
    /// Advance one tick, then fetch the resulting snapshot.
    Step(Action),
    /// Fetch the current snapshot without advancing.
    Poll,
}

/// Successful result of a dispatched request.
#[derive(Debug, Clone)]
pub enum ResponsePayload {
    /// Fresh-episode snapshot.
    Reset(Snapshot),
    /// Step reward plus the snapshot fetched right after it.
    Stepped { reward: f64, snapshot: Snapshot },
    /// Polled snapshot.
    Polled(Snapshot),
}

/// A resolved request, tagged with the generation it was dispatched under.
#[derive(Debug)]
pub struct RemoteResponse {
    /// Generation allocated at dispatch time.
    pub generation: u64,
    /// What came back.
    pub payload: Result<ResponsePayload, ClientError>,
}

/// Resource managing outbound requests and their worker threads.
#[derive(Resource)]
pub struct RemoteSession {
    /// Shared client; the agent inside pools connections across threads.
    client: Arc<SimulationClient>,
    /// Sender cloned into each worker.
    tx: Sender<RemoteResponse>,
    /// Receiver drained once per frame (wrapped for thread safety).
    rx: Mutex<Receiver<RemoteResponse>>,
    /// Requests dispatched but not yet drained.
    in_flight: usize,
    /// Current lifecycle status.
    pub status: SessionStatus,
}

impl RemoteSession {
    /// Creates a session around an existing client.
    pub fn new(client: SimulationClient) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            client: Arc::new(client),
            tx,
            rx: Mutex::new(rx),
            in_flight: 0,
            status: SessionStatus::default(),
        }
    }

    /// Creates a session from the client settings in `config`.
    pub fn from_config(config: &VizConfig) -> Self {
        Self::new(SimulationClient::with_timeout(
            config.server.url.clone(),
            Duration::from_millis(config.server.request_timeout_ms),
        ))
    }

    /// Number of requests currently in flight.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Dispatches `request` on its own worker thread.
    pub fn dispatch(&mut self, request: RemoteRequest, generation: u64) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        self.in_flight += 1;
        self.status = SessionStatus::Pending;

        tracing::debug!("dispatching {:?} (generation {})", request, generation);
        std::thread::spawn(move || {
            let payload = perform(&client, request);
            let _ = tx.send(RemoteResponse {
                generation,
                payload,
            });
        });
    }

    /// Collects all responses that have resolved since the last drain.
    fn drain(&mut self) -> Vec<RemoteResponse> {
        let mut responses = Vec::new();
        if let Ok(rx) = self.rx.lock() {
            loop {
                match rx.try_recv() {
                    Ok(response) => responses.push(response),
                    Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
                }
            }
        }

        if !responses.is_empty() {
            self.in_flight = self.in_flight.saturating_sub(responses.len());
            self.status = if self.in_flight == 0 {
                SessionStatus::Idle
            } else {
                SessionStatus::Pending
            };
        }
        responses
    }
}

/// Runs `request` to completion on the calling (worker) thread.
///
/// The step case issues the follow-up state fetch from the same worker, so
/// the two calls are strictly sequenced and the observed snapshot is never
/// pre-step.
fn perform(
    client: &SimulationClient,
    request: RemoteRequest,
) -> Result<ResponsePayload, ClientError> {
    match request {
        RemoteRequest::Reset => client.reset().map(ResponsePayload::Reset),
        RemoteRequest::Step(action) => {
            let outcome = client.step(action)?;
            let snapshot = client.fetch_state()?;
            Ok(ResponsePayload::Stepped {
                reward: outcome.reward,
                snapshot,
            })
        }
        RemoteRequest::Poll => client.fetch_state().map(ResponsePayload::Polled),
    }
}

/// Applies a resolved response to the view state. Returns true when a new
/// snapshot was committed (and a render should follow).
///
/// Failures are logged and recorded; the previous snapshot stays displayed
/// and no retry is scheduled; the next poll tick or key press is the only
/// retry mechanism.
pub fn apply_response(view: &mut ViewState, response: RemoteResponse) -> bool {
    match response.payload {
        Ok(ResponsePayload::Reset(snapshot)) => view.commit_reset(response.generation, snapshot),
        Ok(ResponsePayload::Stepped { reward, snapshot }) => {
            view.commit_step(response.generation, reward, snapshot)
        }
        Ok(ResponsePayload::Polled(snapshot)) => view.commit_poll(response.generation, snapshot),
        Err(error) => {
            tracing::warn!("simulation request failed: {}", error);
            view.record_failure(&error.to_string());
            false
        }
    }
}

/// Startup system: kick off the initial episode.
fn initial_reset(mut session: ResMut<RemoteSession>, mut view: ResMut<ViewState>) {
    let generation = view.begin_request();
    session.dispatch(RemoteRequest::Reset, generation);
}

/// System dispatching the periodic state poll.
fn tick_poll_timer(
    time: Res<Time>,
    mut timer: ResMut<PollTimer>,
    mut session: ResMut<RemoteSession>,
    mut view: ResMut<ViewState>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    if session.status == SessionStatus::Uninitialized {
        return;
    }
    let generation = view.begin_request();
    session.dispatch(RemoteRequest::Poll, generation);
}

/// System draining resolved responses into the view state.
fn drain_responses(
    mut session: ResMut<RemoteSession>,
    mut view: ResMut<ViewState>,
    mut events: EventWriter<StateUpdatedEvent>,
) {
    for response in session.drain() {
        let generation = response.generation;
        if apply_response(&mut view, response) {
            events.send(StateUpdatedEvent { generation });
        }
    }
}

/// Timer gating the autonomous poll (grid mode only).
#[derive(Resource)]
pub struct PollTimer(pub Timer);

#[cfg(test)]
mod tests {
    use super::*;
    use sim_protocol::fixtures;
    use sim_protocol::GridPos;

    #[test]
    fn test_session_status_default() {
        assert_eq!(SessionStatus::default(), SessionStatus::Uninitialized);
    }

    #[test]
    fn test_apply_reset_commits_and_clears_displays() {
        let mut view = ViewState::default();
        let generation = view.begin_request();

        let committed = apply_response(
            &mut view,
            RemoteResponse {
                generation,
                payload: Ok(ResponsePayload::Reset(fixtures::reset_snapshot())),
            },
        );

        assert!(committed);
        assert_eq!(view.reward(), 0.0);
        assert_eq!(view.epoch(), 0);
        assert_eq!(view.current().unwrap().agent_position, GridPos::new(0, 0));
    }

    #[test]
    fn test_apply_step_commits_reward_and_snapshot() {
        let mut view = ViewState::default();
        let generation = view.begin_request();
        view.commit_reset(generation, fixtures::reset_snapshot());

        let mut moved = fixtures::reset_snapshot();
        moved.agent_position = GridPos::new(1, 0);
        let generation = view.begin_request();

        let committed = apply_response(
            &mut view,
            RemoteResponse {
                generation,
                payload: Ok(ResponsePayload::Stepped {
                    reward: -1.0,
                    snapshot: moved,
                }),
            },
        );

        assert!(committed);
        assert_eq!(view.reward(), -1.0);
        assert_eq!(view.current().unwrap().agent_position, GridPos::new(1, 0));
    }

    #[test]
    fn test_apply_failure_keeps_last_good_state() {
        let mut view = ViewState::default();
        let generation = view.begin_request();
        view.commit_reset(generation, fixtures::reset_snapshot());
        let before = view.current().cloned();

        let generation = view.begin_request();
        let committed = apply_response(
            &mut view,
            RemoteResponse {
                generation,
                payload: Err(ClientError::Transport("connection refused".into())),
            },
        );

        assert!(!committed);
        assert_eq!(view.current().cloned(), before);
        assert!(view.last_error().is_some());
    }

    #[test]
    fn test_apply_stale_response_is_discarded() {
        let mut view = ViewState::default();
        let old_generation = view.begin_request();
        let new_generation = view.begin_request();
        view.commit_reset(new_generation, fixtures::reset_snapshot());

        let mut stale = fixtures::reset_snapshot();
        stale.agent_position = GridPos::new(9, 9);
        let committed = apply_response(
            &mut view,
            RemoteResponse {
                generation: old_generation,
                payload: Ok(ResponsePayload::Polled(stale)),
            },
        );

        assert!(!committed);
        assert_eq!(view.current().unwrap().agent_position, GridPos::new(0, 0));
    }
}
