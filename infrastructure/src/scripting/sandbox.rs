//! Lua sandbox — blocks C module loading.
//!
//! Control scripts are trusted (they are the operator's own), but C
//! extension modules can take the whole host down through ABI mismatches,
//! so the native loader surface is removed before any script runs.

use mlua::prelude::*;

/// Apply sandbox restrictions to a fresh VM.
///
/// Removes `package.loadlib` and clears `package.cpath`; pure-Lua
/// `require` and the standard libraries stay available.
pub fn apply_sandbox(lua: &Lua) -> LuaResult<()> {
    let package: LuaTable = lua.globals().get("package")?;
    package.set("loadlib", LuaValue::Nil)?;
    package.set("cpath", "")?;
    Ok(())
}
