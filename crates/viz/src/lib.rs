//! Visualization layer: Bevy-based client for the remote grid world.

pub mod camera;
pub mod config;
pub mod grid;
pub mod input;
pub mod overlay;
pub mod plugin;
pub mod remote;
pub mod render;
pub mod scene;
pub mod view_state;

pub use plugin::GridWorldVizPlugin;
