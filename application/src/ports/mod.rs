//! Ports (interfaces) implemented by the infrastructure layer

mod net_log_service;

pub use net_log_service::{NetLogServicePort, NoNetLogService, StopCallback};
