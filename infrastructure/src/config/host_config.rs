//! Host configuration schema

use serde::{Deserialize, Serialize};

/// Settings for the script host binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Default tracing filter; `-v` flags on the CLI take precedence.
    pub log_filter: String,

    /// How often pending stop completions are drained, in milliseconds.
    pub pump_interval_ms: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            pump_interval_ms: 25,
        }
    }
}
