//! `netlog` Lua API — start/stop capture and the logging-state query.
//!
//! The handle object the scripting layer sees:
//!
//! ```lua
//! netlog.startLogging("/tmp/capture.json")
//! print(netlog.currentlyLogging)          -- read-only property
//! netlog.stopLogging(function() print("flushed") end)
//! ```
//!
//! `stopLogging` callbacks never run from inside the call: they are parked
//! in the [`StopCallbackRegistry`], the service's completion marks them
//! ready, and the host executes them on the scripting thread when it
//! drains completions.

use mlua::Variadic;
use mlua::prelude::*;
use netlog_application::{NetLogBinding, StopCallback};
use netlog_domain::NetLogError;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Stop callbacks parked until their capture teardown completes.
///
/// `register` parks a callback, `mark_ready` records that its teardown
/// finished, and `pop_ready` hands each ready callback out exactly once,
/// even if a misbehaving service completes the same stop twice.
pub struct StopCallbackRegistry {
    parked: Vec<(u64, LuaRegistryKey)>,
    ready: VecDeque<u64>,
    next_id: u64,
}

impl StopCallbackRegistry {
    pub fn new() -> Self {
        Self {
            parked: Vec::new(),
            ready: VecDeque::new(),
            next_id: 1,
        }
    }

    /// Park a callback, returning its dispatch id.
    pub fn register(&mut self, key: LuaRegistryKey) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.parked.push((id, key));
        id
    }

    /// Mark a parked callback as ready to run. Unknown ids are ignored.
    pub fn mark_ready(&mut self, id: u64) {
        if self.parked.iter().any(|(parked, _)| *parked == id) {
            self.ready.push_back(id);
        }
    }

    /// Remove and return the next ready callback, if any.
    ///
    /// Stale ready entries (already handed out) are skipped.
    pub fn pop_ready(&mut self) -> Option<LuaRegistryKey> {
        while let Some(id) = self.ready.pop_front() {
            if let Some(index) = self.parked.iter().position(|(parked, _)| *parked == id) {
                return Some(self.parked.swap_remove(index).1);
            }
        }
        None
    }

    /// Number of callbacks still awaiting completion or dispatch.
    pub fn pending(&self) -> usize {
        self.parked.len()
    }
}

/// Build the `netlog` table for the given binding.
///
/// The caller installs the returned table as a global; one table per
/// scripting context.
pub fn register_netlog_api(
    lua: &Lua,
    binding: Arc<NetLogBinding>,
    callbacks: Arc<Mutex<StopCallbackRegistry>>,
) -> LuaResult<LuaTable> {
    let netlog = lua.create_table()?;

    // netlog.startLogging(path)
    {
        let binding = Arc::clone(&binding);
        let start_fn = lua.create_function(move |_, args: Variadic<LuaValue>| {
            let path = match args.first() {
                None => None,
                Some(LuaValue::String(s)) => {
                    let s = s
                        .to_str()
                        .map_err(|_| LuaError::external(NetLogError::InvalidPath))?;
                    Some(s.to_string())
                }
                Some(_) => return Err(LuaError::external(NetLogError::InvalidPath)),
            };

            binding
                .start_logging(path.as_deref())
                .map_err(LuaError::external)
        })?;
        netlog.set("startLogging", start_fn)?;
    }

    // netlog.stopLogging(callback?)
    {
        let binding = Arc::clone(&binding);
        let callbacks = Arc::clone(&callbacks);
        let stop_fn = lua.create_function(move |lua, args: Variadic<LuaValue>| {
            // A non-function first argument counts as no callback.
            let on_complete: Option<StopCallback> = match args.into_iter().next() {
                Some(LuaValue::Function(func)) => {
                    let key = lua.create_registry_value(func)?;
                    let id = callbacks
                        .lock()
                        .map_err(|e| {
                            LuaError::external(format!("stop-callback registry poisoned: {}", e))
                        })?
                        .register(key);

                    let registry = Arc::clone(&callbacks);
                    Some(Box::new(move || {
                        if let Ok(mut registry) = registry.lock() {
                            registry.mark_ready(id);
                        }
                    }))
                }
                _ => None,
            };

            binding.stop_logging(on_complete);
            Ok(())
        })?;
        netlog.set("stopLogging", stop_fn)?;
    }

    // netlog.currentlyLogging — read-only property via metatable
    {
        let meta = lua.create_table()?;

        let binding = Arc::clone(&binding);
        let index_fn = lua.create_function(move |_, (_table, key): (LuaTable, String)| {
            if key == "currentlyLogging" {
                Ok(LuaValue::Boolean(binding.currently_logging()))
            } else {
                Ok(LuaValue::Nil)
            }
        })?;
        meta.set("__index", index_fn)?;

        let newindex_fn =
            lua.create_function(|_, (_table, key, _value): (LuaTable, String, LuaValue)| {
                Err::<(), _>(LuaError::external(format!("netlog.{} is read-only", key)))
            })?;
        meta.set("__newindex", newindex_fn)?;

        netlog.set_metatable(Some(meta));
    }

    Ok(netlog)
}
