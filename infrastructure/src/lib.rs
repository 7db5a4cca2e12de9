//! Infrastructure layer for netlog-bridge
//!
//! Adapters around the application ports: the mlua script host that
//! projects the net-log binding into Lua, the in-process
//! `LocalNetLogService`, and host configuration loading.

pub mod config;
pub mod netlog;
pub mod scripting;

// Re-export commonly used types
pub use config::{ConfigLoader, HostConfig};
pub use netlog::LocalNetLogService;
pub use scripting::{NetLogScriptHost, ScriptHostError};
