//! Main visualization plugin that ties all systems together.

use bevy::prelude::*;

use crate::camera::CameraPlugin;
use crate::config::{RenderMode, VizConfig};
use crate::grid::GridRenderPlugin;
use crate::input::InputPlugin;
use crate::overlay::OverlayPlugin;
use crate::remote::RemotePlugin;
use crate::scene::SceneRenderPlugin;

/// Main plugin for the grid-world visualization client.
///
/// This plugin sets up the window, adds all sub-plugins, and picks the
/// render adapter for the configured mode. `VizConfig` (and usually the
/// `RemoteSession`) should be inserted by `main` before this plugin is
/// added.
pub struct GridWorldVizPlugin;

impl Plugin for GridWorldVizPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<VizConfig>() {
            app.init_resource::<VizConfig>();
        }
        let config = app.world().resource::<VizConfig>().clone();

        app.add_plugins(
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Grid World".into(),
                    resolution: (1280., 720.).into(),
                    ..default()
                }),
                ..default()
            }),
        )
        .add_plugins((RemotePlugin, CameraPlugin, InputPlugin, OverlayPlugin));

        match config.mode {
            RenderMode::Grid => {
                app.add_plugins(GridRenderPlugin);
            }
            RenderMode::Scene => {
                app.add_plugins(SceneRenderPlugin);
            }
        }
    }
}
