//! Snapshot types.
//!
//! A [`Snapshot`] is the client's unit of truth: the complete observable
//! state of the remote grid world at one point in time. It is decoded from a
//! reset or state response, handed to the view layer wholesale, and replaced
//! (never mutated) on the next successful fetch.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An integer cell coordinate on the grid.
///
/// Serialized as a two-element `[x, y]` array to match the service contract.
/// Coordinates outside `[0, grid_size)` can appear in malformed responses;
/// consumers are expected to tolerate them rather than reject the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i64; 2]", into = "[i64; 2]")]
pub struct GridPos {
    pub x: i64,
    pub y: i64,
}

impl GridPos {
    /// Creates a position from its components.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Whether this position lies inside a `grid_size` by `grid_size` board.
    pub fn in_bounds(&self, grid_size: u32) -> bool {
        let limit = i64::from(grid_size);
        self.x >= 0 && self.y >= 0 && self.x < limit && self.y < limit
    }
}

impl From<[i64; 2]> for GridPos {
    fn from([x, y]: [i64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<GridPos> for [i64; 2] {
    fn from(pos: GridPos) -> Self {
        [pos.x, pos.y]
    }
}

/// Complete observable state of the remote grid world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Agent cell.
    pub agent_position: GridPos,
    /// Food cell. Not guaranteed to differ from the agent cell.
    pub food_position: GridPos,
    /// Obstacle cells; order is irrelevant.
    #[serde(default)]
    pub walls: Vec<GridPos>,
    /// Last-step scalar reward; zero on reset.
    #[serde(default)]
    pub reward: f64,
}

impl Snapshot {
    /// Whether `pos` is a wall cell.
    pub fn has_wall(&self, pos: GridPos) -> bool {
        self.walls.contains(&pos)
    }

    /// The wall cells as a set, for repeated membership tests.
    pub fn wall_set(&self) -> HashSet<GridPos> {
        self.walls.iter().copied().collect()
    }

    /// Serializes the snapshot to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Body of a step response. The resulting snapshot is not included; the
/// service requires a separate state fetch after every step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Reward earned by the step just taken.
    pub reward: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_pos_wire_shape() {
        let pos: GridPos = serde_json::from_str("[3, 7]").unwrap();
        assert_eq!(pos, GridPos::new(3, 7));
        assert_eq!(serde_json::to_string(&pos).unwrap(), "[3,7]");
    }

    #[test]
    fn test_grid_pos_in_bounds() {
        assert!(GridPos::new(0, 0).in_bounds(10));
        assert!(GridPos::new(9, 9).in_bounds(10));
        assert!(!GridPos::new(10, 0).in_bounds(10));
        assert!(!GridPos::new(-1, 5).in_bounds(10));
    }

    #[test]
    fn test_snapshot_decodes_contract_body() {
        let body = r#"{
            "agent_position": [0, 0],
            "food_position": [5, 5],
            "walls": [[3, 3], [4, 4]],
            "reward": 0
        }"#;
        let snapshot = Snapshot::from_json(body).unwrap();

        assert_eq!(snapshot.agent_position, GridPos::new(0, 0));
        assert_eq!(snapshot.food_position, GridPos::new(5, 5));
        assert_eq!(snapshot.walls.len(), 2);
        assert!(snapshot.has_wall(GridPos::new(3, 3)));
        assert!(!snapshot.has_wall(GridPos::new(0, 1)));
        assert_eq!(snapshot.reward, 0.0);
    }

    #[test]
    fn test_snapshot_missing_fields_default() {
        let body = r#"{ "agent_position": [1, 2], "food_position": [3, 4] }"#;
        let snapshot = Snapshot::from_json(body).unwrap();

        assert!(snapshot.walls.is_empty());
        assert_eq!(snapshot.reward, 0.0);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let snapshot = Snapshot {
            agent_position: GridPos::new(1, 0),
            food_position: GridPos::new(5, 5),
            walls: vec![GridPos::new(3, 3)],
            reward: -0.1,
        };
        let parsed = Snapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_wall_set_deduplicates() {
        let snapshot = Snapshot {
            agent_position: GridPos::new(0, 0),
            food_position: GridPos::new(5, 5),
            walls: vec![GridPos::new(3, 3), GridPos::new(3, 3), GridPos::new(4, 4)],
            reward: 0.0,
        };
        assert_eq!(snapshot.wall_set().len(), 2);
    }

    #[test]
    fn test_step_outcome_decodes() {
        let outcome: StepOutcome = serde_json::from_str(r#"{"reward": -1}"#).unwrap();
        assert_eq!(outcome.reward, -1.0);
    }
}
