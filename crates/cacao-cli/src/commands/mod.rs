//! CLI subcommands.

pub(crate) mod decode;
pub(crate) mod encode;
pub(crate) mod parse;
pub(crate) mod render;
pub(crate) mod verify;

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::OutputFormat;

/// Read a command input: a file path, or `-` for stdin.
pub(crate) fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Print a value as JSON, indented unless machine output was requested.
pub(crate) fn print_json<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let out = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Json => serde_json::to_string(value)?,
    };
    println!("{out}");
    Ok(())
}
