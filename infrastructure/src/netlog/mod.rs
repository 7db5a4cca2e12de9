//! Net-log service adapters

mod local;

pub use local::LocalNetLogService;
