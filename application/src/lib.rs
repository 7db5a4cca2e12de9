//! Application layer for netlog-bridge
//!
//! Defines the port the binding delegates to (`NetLogServicePort`) and the
//! binding handle itself (`NetLogBinding`). Concrete service adapters and
//! the scripting runtime live in the infrastructure layer and are wired in
//! by the CLI.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{NetLogServicePort, NoNetLogService, StopCallback};
pub use use_cases::NetLogBinding;
