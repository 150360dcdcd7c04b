//! Camera setup for both presentations.

use bevy::prelude::*;
use bevy::window::WindowResized;

use crate::config::{RenderMode, VizConfig};

/// Plugin spawning the camera that matches the configured render mode.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        let config = app.world().resource::<VizConfig>().clone();

        match config.mode {
            RenderMode::Grid => {
                app.add_systems(Startup, setup_grid_camera);
            }
            RenderMode::Scene => {
                app.add_systems(Startup, setup_scene_camera);
            }
        }

        app.add_systems(Update, observe_window_resize);
    }
}

/// System spawning the orthographic camera for the grid presentation.
fn setup_grid_camera(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());
}

/// System spawning the perspective camera for the scene presentation:
/// raised above the board, looking at its center.
fn setup_scene_camera(mut commands: Commands, config: Res<VizConfig>) {
    let board = config.grid.grid_size as f32 * config.grid.cell_size;
    commands.spawn(Camera3dBundle {
        transform: Transform::from_xyz(board / 2.0, board * 1.5, board * 2.0)
            .looking_at(Vec3::new(board / 2.0, 0.0, board / 2.0), Vec3::Y),
        ..default()
    });
}

/// System observing window resizes. Projection aspect and viewport size
/// follow the window automatically; the grid-to-world mapping does not
/// depend on viewport size, so nothing needs recomputation here.
fn observe_window_resize(mut events: EventReader<WindowResized>) {
    for event in events.read() {
        tracing::debug!("window resized to {:.0}x{:.0}", event.width, event.height);
    }
}
