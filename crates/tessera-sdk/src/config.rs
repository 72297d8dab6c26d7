// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Engine configuration, read from RON files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tessera_io::ResourceManagerSettings;

/// Startup settings of an [`Engine`](crate::Engine).
///
/// Every field has a default, so a configuration file only needs to list
/// what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory resource names are resolved against.
    pub asset_root: PathBuf,
    /// Log filter used when `RUST_LOG` is not set.
    pub log_filter: String,
    /// How long a thread waits on another thread's load of the same resource.
    /// `None` waits indefinitely.
    pub load_wait_timeout_ms: Option<u64>,
    /// Maximum number of pending timed actions.
    pub action_queue_capacity: usize,
    /// Target tick frequency of the run loop.
    pub tick_rate_hz: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),
            log_filter: "info".to_string(),
            load_wait_timeout_ms: None,
            action_queue_capacity: 254,
            tick_rate_hz: 60,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        ron::de::from_str(text).context("Failed to parse engine configuration")
    }

    /// Reads and parses a RON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read engine configuration '{}'", path.display()))?;
        Self::from_ron_str(&text)
    }

    /// Serializes the configuration as pretty-printed RON.
    pub fn to_ron_string(&self) -> Result<String> {
        let pretty_config = ron::ser::PrettyConfig::default().indentor("  ".to_string());
        ron::ser::to_string_pretty(self, pretty_config)
            .context("Failed to serialize engine configuration")
    }

    /// The resource manager settings derived from this configuration.
    pub fn resource_settings(&self) -> ResourceManagerSettings {
        ResourceManagerSettings {
            load_wait_timeout: self.load_wait_timeout_ms.map(Duration::from_millis),
        }
    }

    /// Time between two ticks at [`tick_rate_hz`](Self::tick_rate_hz).
    /// A rate of zero means "as fast as possible".
    pub fn tick_interval(&self) -> Duration {
        if self.tick_rate_hz == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs(1) / self.tick_rate_hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = EngineConfig::from_ron_str("(tick_rate_hz: 30)").unwrap();
        assert_eq!(config.tick_rate_hz, 30);
        assert_eq!(config.asset_root, PathBuf::from("assets"));
        assert_eq!(config.action_queue_capacity, 254);
        assert_eq!(config.load_wait_timeout_ms, None);
    }

    #[test]
    fn test_full_config() {
        let config = EngineConfig::from_ron_str(
            r#"(
                asset_root: "data/levels",
                log_filter: "debug",
                load_wait_timeout_ms: Some(250),
                action_queue_capacity: 16,
                tick_rate_hz: 50,
            )"#,
        )
        .unwrap();
        assert_eq!(config.asset_root, PathBuf::from("data/levels"));
        assert_eq!(config.log_filter, "debug");
        assert_eq!(
            config.resource_settings().load_wait_timeout,
            Some(Duration::from_millis(250))
        );
        assert_eq!(config.tick_interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_round_trips_through_ron() {
        let config = EngineConfig {
            tick_rate_hz: 0,
            ..Default::default()
        };
        let text = config.to_ron_string().unwrap();
        assert_eq!(EngineConfig::from_ron_str(&text).unwrap(), config);
        assert_eq!(config.tick_interval(), Duration::ZERO);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let err = EngineConfig::from_ron_str("(tick_rate_hz: \"fast\")").unwrap_err();
        assert!(err.to_string().contains("Failed to parse engine configuration"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.ron");
        std::fs::write(&path, "(log_filter: \"warn\")").unwrap();
        assert_eq!(EngineConfig::load(&path).unwrap().log_filter, "warn");
        assert!(EngineConfig::load(dir.path().join("missing.ron")).is_err());
    }
}
