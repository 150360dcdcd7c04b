//! Typed HTTP client for the remote grid-world simulation service.
//!
//! The service exposes three endpoints:
//!
//! | Operation | Method/Path   | Response body                 |
//! |-----------|---------------|-------------------------------|
//! | reset     | `POST /reset` | full snapshot                 |
//! | step      | `POST /step`  | `{ "reward": number }`        |
//! | state     | `GET /state`  | full snapshot                 |
//!
//! Note that `step` does not return the resulting snapshot; observing the
//! post-step world requires a follow-up [`SimulationClient::fetch_state`].
//! The service offers no atomic step-and-observe operation, so callers that
//! need the pair must sequence the two calls themselves.
//!
//! All calls block the current thread until the response arrives or the
//! agent's request timeout expires. Timeouts surface as
//! [`ClientError::Transport`].

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

use sim_protocol::{Action, Snapshot, StepOutcome};

/// Default per-request timeout. Generous for a LAN service; override with
/// [`SimulationClient::with_timeout`] for slower links.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);

/// Errors produced by simulation requests.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service was unreachable, the request timed out, or the response
    /// carried a non-success status.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The response body could not be parsed into the expected shape.
    #[error("malformed response body: {0}")]
    Decode(String),
}

/// Blocking typed wrapper over the simulation service.
///
/// Cheap to share behind an `Arc`; the underlying agent pools connections
/// and is safe to use from multiple threads.
pub struct SimulationClient {
    agent: ureq::Agent,
    base_url: String,
}

impl SimulationClient {
    /// Creates a client with the default request timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a bounded per-request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.into(),
        }
    }

    /// The base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Starts a new episode and returns its initial snapshot.
    pub fn reset(&self) -> Result<Snapshot, ClientError> {
        let url = self.endpoint("reset");
        tracing::debug!("POST {}", url);
        let response = self.agent.post(&url).call().map_err(transport)?;
        decode(response)
    }

    /// Advances the simulation one tick and returns the reward earned.
    ///
    /// The resulting snapshot must be fetched separately with
    /// [`fetch_state`](Self::fetch_state).
    pub fn step(&self, action: Action) -> Result<StepOutcome, ClientError> {
        let url = self.endpoint("step");
        let body = serde_json::json!({ "action": action }).to_string();
        tracing::debug!("POST {} {}", url, body);
        let response = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_string(&body)
            .map_err(transport)?;
        decode(response)
    }

    /// Fetches the current snapshot without advancing the simulation.
    pub fn fetch_state(&self) -> Result<Snapshot, ClientError> {
        let url = self.endpoint("state");
        tracing::debug!("GET {}", url);
        let response = self.agent.get(&url).call().map_err(transport)?;
        decode(response)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

fn transport(err: ureq::Error) -> ClientError {
    match err {
        ureq::Error::Status(code, _) => {
            ClientError::Transport(format!("server returned status {}", code))
        }
        ureq::Error::Transport(inner) => ClientError::Transport(inner.to_string()),
    }
}

fn decode<T: DeserializeOwned>(response: ureq::Response) -> Result<T, ClientError> {
    let body = response
        .into_string()
        .map_err(|e| ClientError::Transport(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_cleanly() {
        let client = SimulationClient::new("http://localhost:5000");
        assert_eq!(client.endpoint("reset"), "http://localhost:5000/reset");

        let slashed = SimulationClient::new("http://localhost:5000/");
        assert_eq!(slashed.endpoint("state"), "http://localhost:5000/state");
    }

    #[test]
    fn test_error_display() {
        let err = ClientError::Transport("connection refused".into());
        assert_eq!(err.to_string(), "transport failure: connection refused");

        let err = ClientError::Decode("expected value".into());
        assert_eq!(err.to_string(), "malformed response body: expected value");
    }
}
