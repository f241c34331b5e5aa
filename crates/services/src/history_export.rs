//! CSV export of the session history.
//!
//! The file starts with a UTF-8 byte-order mark so spreadsheet tools
//! detect the encoding of Hebrew text correctly.

use anyhow::{Context, Result};
use shared::history::History;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const HEADER: [&str; 5] = ["time", "original", "prompt", "recommendation", "engine"];

/// Write every entry, newest first.
pub fn export_history_csv<W: Write>(history: &History, mut writer: W) -> Result<()> {
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;
    for entry in history.entries() {
        csv_writer.write_record([
            entry.formatted_time().as_str(),
            entry.original_request.as_str(),
            entry.refined_prompt.as_str(),
            entry.recommendation.as_str(),
            entry.engine_used.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn history_csv_bytes(history: &History) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    export_history_csv(history, &mut buf)?;
    Ok(buf)
}

pub fn export_history_to_path(history: &History, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    export_history_csv(history, BufWriter::new(file))
        .with_context(|| format!("exporting history to {}", path.display()))?;
    tracing::info!(path = %path.display(), entries = history.len(), "history exported");
    Ok(())
}
