//! Sample data fixtures for testing.
//!
//! This module provides ready-made test data for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // sim-protocol = { path = "../sim-protocol", features = ["test-fixtures"] }
//!
//! use sim_protocol::fixtures;
//!
//! let snapshot = fixtures::reset_snapshot();
//! ```

use crate::{GridPos, Snapshot};

/// A fresh-episode snapshot: agent at the origin, food at (5,5), two walls,
/// zero reward.
pub fn reset_snapshot() -> Snapshot {
    Snapshot {
        agent_position: GridPos::new(0, 0),
        food_position: GridPos::new(5, 5),
        walls: vec![GridPos::new(1, 1), GridPos::new(2, 2)],
        reward: 0.0,
    }
}

/// A snapshot with agent, food, and a wall all sharing cell (3,3), for
/// exercising co-location precedence.
pub fn crowded_snapshot() -> Snapshot {
    Snapshot {
        agent_position: GridPos::new(3, 3),
        food_position: GridPos::new(3, 3),
        walls: vec![GridPos::new(3, 3)],
        reward: 0.0,
    }
}

/// A snapshot containing coordinates outside the reference 10x10 board, for
/// exercising graceful degradation in renderers.
pub fn out_of_range_snapshot() -> Snapshot {
    Snapshot {
        agent_position: GridPos::new(-1, 4),
        food_position: GridPos::new(25, 25),
        walls: vec![GridPos::new(3, 3), GridPos::new(12, -2)],
        reward: 0.0,
    }
}

/// The exact state body from the service contract, as a raw JSON string.
pub fn wire_state_body() -> &'static str {
    r#"{"agent_position":[0,0],"food_position":[5,5],"walls":[[1,1],[2,2]],"reward":0}"#
}
