//! Net-log binding handle — argument validation plus delegation.
//!
//! One `NetLogBinding` is created per scripting context and dropped with
//! it. It holds a shared reference to the process-wide logging service and
//! nothing else; the capture state machine stays inside the service.

use netlog_domain::{CaptureTarget, NetLogError};
use std::sync::Arc;
use tracing::debug;

use crate::ports::{NetLogServicePort, StopCallback};

/// Handle object exposed to the scripting environment.
///
/// All three operations are synchronous delegations. The only logic owned
/// here is argument validation for start and callback normalization for
/// stop.
pub struct NetLogBinding {
    service: Arc<dyn NetLogServicePort>,
}

impl NetLogBinding {
    /// Create a binding that delegates to the given service.
    pub fn new(service: Arc<dyn NetLogServicePort>) -> Self {
        Self { service }
    }

    /// Start capturing to `path`.
    ///
    /// `None` means the caller supplied no argument at all. Argument
    /// errors are returned without touching the service; whether the file
    /// can later be opened is the service's to deal with.
    pub fn start_logging(&self, path: Option<&str>) -> Result<(), NetLogError> {
        let raw = path.ok_or(NetLogError::PathRequired)?;
        let target: CaptureTarget = raw.parse()?;

        debug!(path = %target, "forwarding start to net-log service");
        self.service.start_dynamic_logging(target.as_path());
        Ok(())
    }

    /// Stop the capture, completing through `on_complete` if supplied.
    ///
    /// A missing callback is replaced with a no-op so the service always
    /// receives a completion to invoke.
    pub fn stop_logging(&self, on_complete: Option<StopCallback>) {
        let on_complete = on_complete.unwrap_or_else(|| Box::new(|| {}));

        debug!("forwarding stop to net-log service");
        self.service.stop_dynamic_logging(on_complete);
    }

    /// Whether the service is currently capturing. No side effects.
    pub fn currently_logging(&self) -> bool {
        self.service.is_dynamic_logging()
    }
}
