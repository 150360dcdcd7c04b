//! Agent actions.
//!
//! The step endpoint accepts exactly four movement actions, serialized as
//! lowercase strings in the request body: `{"action": "up"}`.

use serde::{Deserialize, Serialize};

/// A single movement action for the remote agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Move one cell toward smaller y.
    Up,
    /// Move one cell toward larger y.
    Down,
    /// Move one cell toward smaller x.
    Left,
    /// Move one cell toward larger x.
    Right,
}

impl Action {
    /// All actions, in a stable order.
    pub const ALL: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// The wire name of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Action::Up).unwrap(), "\"up\"");
        assert_eq!(serde_json::to_string(&Action::Right).unwrap(), "\"right\"");
    }

    #[test]
    fn test_action_deserializes_from_wire_name() {
        let action: Action = serde_json::from_str("\"left\"").unwrap();
        assert_eq!(action, Action::Left);
    }

    #[test]
    fn test_as_str_matches_serialization() {
        for action in Action::ALL {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.as_str()));
        }
    }

    #[test]
    fn test_step_request_body_shape() {
        let body = serde_json::json!({ "action": Action::Down });
        assert_eq!(body.to_string(), r#"{"action":"down"}"#);
    }
}
