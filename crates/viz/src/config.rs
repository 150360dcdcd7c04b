//! Configuration loading for the visualization client.
//!
//! All settings are loaded from a TOML configuration file; every section and
//! field falls back to a sensible default, so an empty file (or none at all)
//! yields a working configuration. CLI flags override file values in `main`.

use bevy::prelude::*;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Which presentation the client renders into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Flat cell grid, refreshed by autonomous polling.
    #[default]
    Grid,
    /// 3D scene, updated only on reset and step.
    Scene,
}

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing TOML config
    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Complete client configuration.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    /// Render mode
    pub mode: RenderMode,
    /// Simulation service settings
    pub server: ServerConfig,
    /// Board geometry settings
    pub grid: GridConfig,
    /// Polling settings (grid mode only)
    pub polling: PollingConfig,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            server: ServerConfig::default(),
            grid: GridConfig::default(),
            polling: PollingConfig::default(),
        }
    }
}

impl VizConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Simulation service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the simulation service
    pub url: String,
    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:5000".to_string(),
            request_timeout_ms: 2000,
        }
    }
}

/// Board geometry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Board width and height in cells
    pub grid_size: u32,
    /// Scene-space edge length of one cell (3D mode)
    pub cell_size: f32,
    /// On-screen edge length of one cell in pixels (grid mode)
    pub cell_pixels: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            cell_size: 1.0,
            cell_pixels: 48.0,
        }
    }
}

/// Autonomous polling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Interval between state fetches in milliseconds
    pub interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self { interval_ms: 500 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = VizConfig::default();
        assert_eq!(config.mode, RenderMode::Grid);
        assert_eq!(config.server.url, "http://127.0.0.1:5000");
        assert_eq!(config.server.request_timeout_ms, 2000);
        assert_eq!(config.grid.grid_size, 10);
        assert_eq!(config.polling.interval_ms, 500);
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config = VizConfig::from_str("").unwrap();
        assert_eq!(config.grid.grid_size, 10);
        assert_eq!(config.mode, RenderMode::Grid);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = VizConfig::from_str(
            r#"
            mode = "scene"

            [server]
            url = "http://10.0.0.7:8080"

            [polling]
            interval_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.mode, RenderMode::Scene);
        assert_eq!(config.server.url, "http://10.0.0.7:8080");
        // Untouched fields keep their defaults
        assert_eq!(config.server.request_timeout_ms, 2000);
        assert_eq!(config.polling.interval_ms, 250);
        assert_eq!(config.grid.grid_size, 10);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let result = VizConfig::from_str("mode = [not toml");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[grid]\ngrid_size = 16").unwrap();

        let config = VizConfig::from_file(file.path()).unwrap();
        assert_eq!(config.grid.grid_size, 16);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = VizConfig::from_file(Path::new("/nonexistent/viz.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
