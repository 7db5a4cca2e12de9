//! In-process net-log service.
//!
//! A stand-in for the browser-side logging service: it tracks the active
//! capture target and dispatches stop completions, but writes no records.
//! Capture buffering and file formats belong to whichever real service is
//! wired in instead of this one.

use netlog_application::{NetLogServicePort, StopCallback};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Process-wide logging service stand-in.
///
/// Create one per process and share it behind an `Arc`; it must outlive
/// every script host that references it.
#[derive(Default)]
pub struct LocalNetLogService {
    target: Mutex<Option<PathBuf>>,
}

impl LocalNetLogService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the capture currently in progress, if any.
    pub fn current_target(&self) -> Option<PathBuf> {
        self.target.lock().ok().and_then(|t| t.clone())
    }
}

impl NetLogServicePort for LocalNetLogService {
    fn start_dynamic_logging(&self, path: &Path) {
        let Ok(mut target) = self.target.lock() else {
            warn!("net-log state poisoned, ignoring start");
            return;
        };

        if let Some(previous) = target.replace(path.to_path_buf()) {
            info!(previous = %previous.display(), "capture retargeted while active");
        }
        info!(path = %path.display(), "net-log capture started");
    }

    fn is_dynamic_logging(&self) -> bool {
        self.target.lock().map(|t| t.is_some()).unwrap_or(false)
    }

    fn stop_dynamic_logging(&self, on_complete: StopCallback) {
        let stopped = self.target.lock().ok().and_then(|mut t| t.take());
        match stopped {
            Some(path) => info!(path = %path.display(), "net-log capture stopped"),
            None => debug!("stop requested with no capture active"),
        }

        // Teardown completes off the caller's stack when a runtime is
        // available; otherwise the completion runs inline.
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::task::yield_now().await;
                    on_complete();
                });
            }
            Err(_) => on_complete(),
        }
    }
}
