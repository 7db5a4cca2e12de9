//! Lua script host for net-log control.
//!
//! Projects the net-log binding into an embedded Lua 5.4 VM backed by
//! mlua.
//!
//! # Modules
//!
//! - `netlog_api` — the `netlog` table (`startLogging`, `stopLogging`,
//!   `currentlyLogging`) and the stop-callback registry
//! - `sandbox` — C module blocking for safety
//! - `engine` — `NetLogScriptHost`, owning the VM and the completion pump

mod engine;
mod netlog_api;
mod sandbox;

pub use engine::{NetLogScriptHost, ScriptHostError};
