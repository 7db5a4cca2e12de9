//! Script host — owns the Lua VM and the stop-completion pump.
//!
//! `NetLogScriptHost` wires an injected net-log service into a sandboxed
//! Lua 5.4 VM and exposes the `netlog` global to user scripts. Stop
//! completions arriving from the service are queued and only executed
//! when the host calls `drain_completions` on the scripting thread, so a
//! Lua callback runs at most once and never inside `stopLogging` itself.

use mlua::prelude::*;
use netlog_application::{NetLogBinding, NetLogServicePort};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::debug;

use super::netlog_api::{StopCallbackRegistry, register_netlog_api};
use super::sandbox::apply_sandbox;

/// Error from a script host operation.
#[derive(Error, Debug)]
pub enum ScriptHostError {
    #[error("lua error: {0}")]
    Lua(#[from] LuaError),

    #[error("failed to read script {}: {source}", path.display())]
    ReadScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("script host state poisoned")]
    Poisoned,
}

/// Lua host for net-log control scripts.
///
/// One host per scripting context; dropping it tears down the VM together
/// with any still-parked stop callbacks. The injected service is shared
/// and must outlive the host.
pub struct NetLogScriptHost {
    lua: Mutex<Lua>,
    callbacks: Arc<Mutex<StopCallbackRegistry>>,
}

impl NetLogScriptHost {
    /// Create a host bound to the given service.
    ///
    /// Sets up the VM with the sandbox applied and the `netlog` global
    /// registered.
    pub fn new(service: Arc<dyn NetLogServicePort>) -> Result<Self, ScriptHostError> {
        let lua = Lua::new();
        apply_sandbox(&lua)?;

        let binding = Arc::new(NetLogBinding::new(service));
        let callbacks = Arc::new(Mutex::new(StopCallbackRegistry::new()));

        let netlog = register_netlog_api(&lua, binding, Arc::clone(&callbacks))?;
        lua.globals().set("netlog", netlog)?;

        Ok(Self {
            lua: Mutex::new(lua),
            callbacks,
        })
    }

    /// Load and execute a Lua script file.
    pub fn load_script(&self, path: &Path) -> Result<(), ScriptHostError> {
        let lua = self.lua.lock().map_err(|_| ScriptHostError::Poisoned)?;

        let content =
            std::fs::read_to_string(path).map_err(|source| ScriptHostError::ReadScript {
                path: path.to_path_buf(),
                source,
            })?;

        lua.load(&content).set_name(path.to_string_lossy()).exec()?;

        Ok(())
    }

    /// Execute a Lua chunk given as a string (`--eval`, tests).
    pub fn exec(&self, chunk: &str) -> Result<(), ScriptHostError> {
        let lua = self.lua.lock().map_err(|_| ScriptHostError::Poisoned)?;
        lua.load(chunk).exec()?;
        Ok(())
    }

    /// Run every stop callback whose capture teardown has completed.
    ///
    /// Callbacks execute on the caller's thread, each at most once. A
    /// callback that raises aborts the drain and leaves the rest queued
    /// for the next call. Returns how many callbacks ran.
    pub fn drain_completions(&self) -> Result<usize, ScriptHostError> {
        let lua = self.lua.lock().map_err(|_| ScriptHostError::Poisoned)?;

        let mut dispatched = 0;
        loop {
            let key = {
                let mut callbacks =
                    self.callbacks.lock().map_err(|_| ScriptHostError::Poisoned)?;
                callbacks.pop_ready()
            };
            let Some(key) = key else { break };

            let func: LuaFunction = lua.registry_value(&key)?;
            let result = func.call::<()>(());
            let _ = lua.remove_registry_value(key);
            result?;
            dispatched += 1;
        }

        if dispatched > 0 {
            debug!(dispatched, "stop completions dispatched");
        }
        Ok(dispatched)
    }

    /// Stop callbacks still waiting for their completion or for dispatch.
    pub fn pending_stop_callbacks(&self) -> usize {
        self.callbacks.lock().map(|c| c.pending()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlog::LocalNetLogService;

    fn make_host() -> NetLogScriptHost {
        // Without an ambient tokio runtime the local service completes
        // stops inline, which keeps these tests single-threaded.
        NetLogScriptHost::new(Arc::new(LocalNetLogService::new())).unwrap()
    }

    #[test]
    fn test_start_stop_cycle_from_script() {
        let host = make_host();

        host.exec(r#"netlog.startLogging("/tmp/capture.json")"#)
            .unwrap();
        {
            let lua = host.lua.lock().unwrap();
            let logging: bool = lua.load("netlog.currentlyLogging").eval().unwrap();
            assert!(logging);
        }

        host.exec("netlog.stopLogging(function() _G.stopped = netlog.currentlyLogging == false end)")
            .unwrap();

        // Callback has not run yet
        {
            let lua = host.lua.lock().unwrap();
            let stopped: LuaValue = lua.globals().get("stopped").unwrap();
            assert_eq!(stopped, LuaValue::Nil);
        }
        assert_eq!(host.pending_stop_callbacks(), 1);

        assert_eq!(host.drain_completions().unwrap(), 1);

        let lua = host.lua.lock().unwrap();
        let stopped: bool = lua.globals().get("stopped").unwrap();
        assert!(stopped);
        let logging: bool = lua.load("netlog.currentlyLogging").eval().unwrap();
        assert!(!logging);
    }

    #[test]
    fn test_callback_runs_exactly_once() {
        let host = make_host();

        host.exec(
            r#"
            _G.count = 0
            netlog.startLogging("/tmp/capture.json")
            netlog.stopLogging(function() _G.count = _G.count + 1 end)
        "#,
        )
        .unwrap();

        assert_eq!(host.drain_completions().unwrap(), 1);
        assert_eq!(host.drain_completions().unwrap(), 0);

        let lua = host.lua.lock().unwrap();
        let count: i64 = lua.globals().get("count").unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_stop_without_callback_does_not_queue() {
        let host = make_host();

        host.exec("netlog.stopLogging()").unwrap();

        assert_eq!(host.pending_stop_callbacks(), 0);
        assert_eq!(host.drain_completions().unwrap(), 0);
    }

    #[test]
    fn test_callbacks_dispatch_in_completion_order() {
        let host = make_host();

        host.exec(
            r#"
            _G.order = ""
            netlog.startLogging("/tmp/a.json")
            netlog.stopLogging(function() _G.order = _G.order .. "first," end)
            netlog.startLogging("/tmp/b.json")
            netlog.stopLogging(function() _G.order = _G.order .. "second," end)
        "#,
        )
        .unwrap();

        assert_eq!(host.drain_completions().unwrap(), 2);

        let lua = host.lua.lock().unwrap();
        let order: String = lua.globals().get("order").unwrap();
        assert_eq!(order, "first,second,");
    }

    #[test]
    fn test_missing_path_error_reaches_script() {
        let host = make_host();

        let result = host.exec(
            r#"
            local ok, err = pcall(netlog.startLogging)
            assert(not ok)
            assert(string.find(tostring(err), "file path required"))
        "#,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_load_script() {
        let host = make_host();

        let dir = tempfile::tempdir().unwrap();
        let script_path = dir.path().join("start.lua");
        std::fs::write(&script_path, r#"netlog.startLogging("/tmp/capture.json")"#).unwrap();

        host.load_script(&script_path).unwrap();

        let lua = host.lua.lock().unwrap();
        let logging: bool = lua.load("netlog.currentlyLogging").eval().unwrap();
        assert!(logging);
    }

    #[test]
    fn test_load_nonexistent_script() {
        let host = make_host();

        let result = host.load_script(Path::new("/nonexistent/init.lua"));
        assert!(matches!(result, Err(ScriptHostError::ReadScript { .. })));
    }

    #[test]
    fn test_script_syntax_error_names_the_script() {
        let host = make_host();

        let dir = tempfile::tempdir().unwrap();
        let script_path = dir.path().join("bad.lua");
        std::fs::write(&script_path, "this is not valid lua {{{{").unwrap();

        let result = host.load_script(&script_path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("bad.lua"));
    }

    #[test]
    fn test_sandbox_active() {
        let host = make_host();

        let lua = host.lua.lock().unwrap();
        let loadlib: LuaValue = lua
            .globals()
            .get::<LuaTable>("package")
            .unwrap()
            .get("loadlib")
            .unwrap();
        assert_eq!(loadlib, LuaValue::Nil);
    }
}
