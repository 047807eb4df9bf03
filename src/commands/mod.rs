//! CLI commands

pub mod list;
pub mod search;
pub mod show;

use anyhow::Result;
use serde::Serialize;

/// Print any serializable value as pretty JSON on stdout
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
