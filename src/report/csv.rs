use std::fs::File;
use std::io::{BufWriter, Write};

use ::csv::{Terminator, Writer, WriterBuilder};
use anyhow::{anyhow, Context, Result};

use crate::context::RunContext;
use crate::models::{CollectionOutcome, MetadataMap};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const SECTION_BREAK: &[u8] = b"\r\n";

/// CRLF-terminated writer that quotes fields only when needed.
///
/// Flexible because the two snapshot sections have different widths.
fn snapshot_writer<W: Write>(out: W) -> Writer<W> {
    WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .flexible(true)
        .from_writer(out)
}

/// Write the snapshot: metadata pairs, a blank line, then one row per outcome.
pub fn write_snapshot<W: Write>(mut out: W, metadata: &MetadataMap, outcomes: &[CollectionOutcome]) -> Result<W> {
    out.write_all(UTF8_BOM)?;
    let mut writer = snapshot_writer(out);

    writer.write_record(["Key", "Value"])?;
    for (key, value) in metadata.iter() {
        writer.write_record([key, value])?;
    }

    writer.flush()?;
    let mut out = writer.into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV rows: {}", e.error()))?;
    out.write_all(SECTION_BREAK)?;
    let mut writer = snapshot_writer(out);

    writer.write_record(["ArtifactKey", "Source", "Destination", "Status", "Message"])?;
    for outcome in outcomes {
        let destination = outcome.destination_display();
        let status = outcome.status.to_string();
        writer.write_record([
            outcome.key.as_str(),
            outcome.source.as_str(),
            destination.as_str(),
            status.as_str(),
            outcome.message.as_deref().unwrap_or(""),
        ])?;
    }

    writer.into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV rows: {}", e.error()))
}

/// Write `checklist_snapshot.csv` into the destination root.
pub fn write_csv_snapshot(context: &RunContext, metadata: &MetadataMap, outcomes: &[CollectionOutcome]) -> Result<()> {
    let path = &context.snapshot_path;
    let file = File::create(path)
        .context(format!("Failed to create CSV snapshot {}", path.display()))?;

    let mut out = write_snapshot(BufWriter::new(file), metadata, outcomes)
        .context(format!("Failed to write CSV snapshot to {}", path.display()))?;
    out.flush()
        .context(format!("Failed to write CSV snapshot to {}", path.display()))?;

    context.diagnostics.info(&format!("CSV snapshot written to {}", path.display()));
    Ok(())
}
