//! Net-log capture domain types
//!
//! `CaptureTarget` is the validated destination for a capture file;
//! `NetLogError` covers the argument errors a caller can trigger. The
//! capture state machine itself (idle, capturing, flushing) belongs to the
//! service that owns the log, not to these types.

mod capture_target;
mod error;

pub use capture_target::CaptureTarget;
pub use error::NetLogError;
