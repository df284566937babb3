use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::{error, info};
use serde::Serialize;

/// Write `value` as pretty-printed JSON (two-space indent, non-ASCII text
/// kept verbatim).
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).context("serializing JSON")?;
    writer
        .flush()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Write the export and report the outcome on `out`. A failed export is
/// reported, not returned: whatever was already printed stands.
///
/// `what` names the payload in the messages, e.g. `"Samples"`.
pub fn export_json<T, W>(path: &Path, value: &T, what: &str, out: &mut W) -> io::Result<bool>
where
    T: Serialize + ?Sized,
    W: Write,
{
    match write_json(path, value) {
        Ok(()) => {
            info!("wrote {}", path.display());
            writeln!(out, "\n{what} saved to {}", path.display())?;
            Ok(true)
        }
        Err(err) => {
            error!("export to {} failed: {err:#}", path.display());
            writeln!(out, "Error saving {} to JSON: {err:#}", what.to_lowercase())?;
            Ok(false)
        }
    }
}
