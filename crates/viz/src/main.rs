//! Grid-world visualization client.
//!
//! Run with: cargo run -p viz
//!
//! Examples:
//!   cargo run -p viz -- --server-url http://127.0.0.1:5000
//!   cargo run -p viz -- --mode scene
//!   cargo run -p viz -- --config viz.toml --poll-interval-ms 250

use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use viz::config::{RenderMode, VizConfig};
use viz::remote::RemoteSession;
use viz::GridWorldVizPlugin;

/// Grid-world visualization client
#[derive(Parser, Debug)]
#[command(name = "viz")]
#[command(about = "Visualization client for a remote grid-world simulation")]
struct Args {
    /// Base URL of the simulation service
    #[arg(long)]
    server_url: Option<String>,

    /// Render as a flat cell grid or a 3D scene
    #[arg(long, value_enum)]
    mode: Option<RenderMode>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width and height in cells
    #[arg(long)]
    grid_size: Option<u32>,

    /// Interval between state polls in milliseconds (grid mode only)
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Per-request timeout in milliseconds
    #[arg(long)]
    request_timeout_ms: Option<u64>,
}

fn main() {
    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => match VizConfig::from_file(path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("{}: {}", path.display(), error);
                std::process::exit(1);
            }
        },
        None => VizConfig::default(),
    };

    // CLI flags override file values
    if let Some(url) = args.server_url {
        config.server.url = url;
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(size) = args.grid_size {
        config.grid.grid_size = size;
    }
    if let Some(interval) = args.poll_interval_ms {
        config.polling.interval_ms = interval;
    }
    if let Some(timeout) = args.request_timeout_ms {
        config.server.request_timeout_ms = timeout;
    }

    let session = RemoteSession::from_config(&config);

    App::new()
        .insert_resource(config)
        .insert_resource(session)
        .add_plugins(GridWorldVizPlugin)
        .run();
}
