//! JSON output for CLI handlers.
//!
//! Documents are pretty-printed to stdout and, when requested, written to a
//! file as well.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::Result;

/// Render `value` as pretty JSON.
///
/// # Errors
///
/// Returns [`crate::error::Error::Json`] if serialization fails.
pub fn render<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Print `value` to stdout and optionally save it to `output`.
///
/// Missing parent directories of `output` are created.
///
/// # Errors
///
/// Returns an error if serialization or any write fails.
pub fn emit<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = render(value)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    stdout.flush()?;

    if let Some(path) = output {
        write_file(path, &json)?;
        info!(path = %path.display(), "Output saved");
    }
    Ok(())
}

fn write_file(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format!("{json}\n"))?;
    Ok(())
}
