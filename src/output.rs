//! Display and persistence of survey outcomes.
//!
//! Supports plain `label: value` lines, JSON, and the append-only text
//! report shared by successive runs.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::OutcomeSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Width of the `*` line separating runs in the report file.
pub const SEPARATOR_WIDTH: usize = 25;

/// Writes every outcome as a `label: value` line.
pub fn write_outcomes<W: Write>(mut writer: W, outcomes: &OutcomeSet) -> Result<()> {
    for line in outcomes.lines() {
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

/// Writes any serializable value as pretty-printed JSON.
pub fn write_json<W: Write>(mut writer: W, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Saves a serializable value as pretty-printed JSON at `path`.
pub fn save_json(path: impl AsRef<Path>, value: &impl Serialize) -> Result<()> {
    let path = path.as_ref();
    let file = fs::File::create(path)?;
    write_json(file, value)?;
    info!(path = %path.display(), "JSON written");
    Ok(())
}

/// Appends one run's outcome lines to the report at `path`.
///
/// Creates the file if needed. When the report already has content, a
/// separator line of `*` is written before the new run.
pub fn append_report(path: impl AsRef<Path>, outcomes: &OutcomeSet) -> Result<()> {
    let path = path.as_ref();
    let has_content = match fs::read_to_string(path) {
        Ok(existing) => !existing.trim().is_empty(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => return Err(e.into()),
    };
    debug!(path = %path.display(), has_content, "Appending report");

    let mut file = OpenOptions::new().append(true).create(true).open(path)?;

    if has_content {
        write!(file, "\n{}\n\n", "*".repeat(SEPARATOR_WIDTH))?;
    }
    file.write_all(outcomes.lines().join("\n").as_bytes())?;
    file.flush()?;

    info!(path = %path.display(), outcomes = outcomes.len(), "Report updated");
    Ok(())
}
