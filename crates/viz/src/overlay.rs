//! HUD overlay: reward, epoch counter, and session status.

use bevy::prelude::*;

use crate::remote::{RemoteSession, SessionStatus};
use crate::view_state::ViewState;

/// Plugin for the HUD overlay.
pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_hud)
            .add_systems(Update, update_hud);
    }
}

/// Component marking the HUD text.
#[derive(Component)]
pub struct HudText;

/// System spawning the HUD container (top-left).
fn setup_hud(mut commands: Commands) {
    commands
        .spawn(NodeBundle {
            style: Style {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(8.0)),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            background_color: Color::srgba(0.0, 0.0, 0.0, 0.6).into(),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                TextBundle::from_section(
                    "connecting...",
                    TextStyle {
                        font_size: 16.0,
                        color: Color::srgb(0.9, 0.9, 0.9),
                        ..default()
                    },
                ),
                HudText,
            ));
        });
}

/// Formats the HUD line from the current displays and session status.
pub fn hud_line(
    reward: f64,
    epoch: u64,
    status: SessionStatus,
    last_error: Option<&str>,
) -> String {
    let status = match status {
        SessionStatus::Uninitialized => "connecting",
        SessionStatus::Pending => "pending",
        SessionStatus::Idle => "idle",
    };
    let mut line = format!("reward: {}  epoch: {}  [{}]", reward, epoch, status);
    if let Some(error) = last_error {
        line.push_str("\nlast error: ");
        line.push_str(error);
        line.push_str(" (showing last good state)");
    }
    line
}

/// System refreshing the HUD text each frame.
fn update_hud(
    view: Res<ViewState>,
    session: Res<RemoteSession>,
    mut texts: Query<&mut Text, With<HudText>>,
) {
    let line = hud_line(view.reward(), view.epoch(), session.status, view.last_error());
    for mut text in texts.iter_mut() {
        text.sections[0].value.clone_from(&line);
    }
}
