//! Net-log service port — interface to the process-wide logging service.
//!
//! The binding never owns or constructs the logging service; it only holds
//! a shared reference to an implementation of this trait. Capture
//! buffering and file teardown stay behind this boundary. The
//! infrastructure layer ships `LocalNetLogService` as an in-process
//! stand-in, and `NoNetLogService` is always available as a no-op.

use std::path::Path;

/// Completion callback for [`NetLogServicePort::stop_dynamic_logging`].
///
/// The service invokes it exactly once, when teardown of the capture file
/// has finished, and never from inside the stop call itself.
pub type StopCallback = Box<dyn FnOnce() + Send + 'static>;

/// Port for the network-logging service.
///
/// At most one instance exists per process, and implementations are
/// expected to outlive every binding that references them. Service-side
/// failures (an unwritable capture file, a full disk) stay inside the
/// service and are not reported through this interface.
pub trait NetLogServicePort: Send + Sync {
    /// Begin capturing network activity to the given file.
    ///
    /// Capture runs asynchronously inside the service; this call returns
    /// immediately.
    fn start_dynamic_logging(&self, path: &Path);

    /// Whether a capture is currently active.
    fn is_dynamic_logging(&self) -> bool;

    /// Stop the active capture, invoking `on_complete` once teardown has
    /// finished. The completion also fires when no capture was active.
    fn stop_dynamic_logging(&self, on_complete: StopCallback);
}

/// No-op service used in tests and when no real service is wired in.
///
/// Reports itself as never logging; the stop completion still fires so
/// callers waiting on it are not stranded.
pub struct NoNetLogService;

impl NetLogServicePort for NoNetLogService {
    fn start_dynamic_logging(&self, _path: &Path) {}

    fn is_dynamic_logging(&self) -> bool {
        false
    }

    fn stop_dynamic_logging(&self, on_complete: StopCallback) {
        on_complete();
    }
}
