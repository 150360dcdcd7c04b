//! Keyboard input: arrow keys step the agent, R starts a new episode.

use bevy::prelude::*;

use sim_protocol::Action;

use crate::remote::{RemoteRequest, RemoteSession};
use crate::view_state::ViewState;

/// Plugin for keyboard control.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (handle_movement_keys, handle_reset_key));
    }
}

/// Maps a key to its movement action. All other keys are ignored.
pub fn movement_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::ArrowUp => Some(Action::Up),
        KeyCode::ArrowDown => Some(Action::Down),
        KeyCode::ArrowLeft => Some(Action::Left),
        KeyCode::ArrowRight => Some(Action::Right),
        _ => None,
    }
}

/// System dispatching a step sequence for each arrow key press.
fn handle_movement_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<RemoteSession>,
    mut view: ResMut<ViewState>,
) {
    for key in keyboard.get_just_pressed() {
        let Some(action) = movement_action(*key) else {
            continue;
        };
        tracing::debug!("{:?} -> step {}", key, action);
        let generation = view.begin_request();
        session.dispatch(RemoteRequest::Step(action), generation);
    }
}

/// System handling the reset control. Available in any state; an in-flight
/// request is not cancelled, but its response will be discarded as stale
/// once the reset commits.
fn handle_reset_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<RemoteSession>,
    mut view: ResMut<ViewState>,
) {
    if keyboard.just_pressed(KeyCode::KeyR) {
        tracing::info!("reset requested");
        let generation = view.begin_request();
        session.dispatch(RemoteRequest::Reset, generation);
    }
}
