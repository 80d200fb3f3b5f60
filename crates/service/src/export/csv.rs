use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use models::ServiceRecord;

use super::{row, ExportError, COLUMNS};

/// Write records as CSV: header row, then one row per record. Every field is
/// quoted and embedded quotes are doubled. Returns the number of data rows.
pub fn export_csv<W: Write>(records: &[ServiceRecord], writer: W) -> Result<usize, ExportError> {
    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(COLUMNS)?;
    for record in records {
        csv_writer.write_record(row(record))?;
    }
    csv_writer.flush()?;
    Ok(records.len())
}

pub fn render_csv(records: &[ServiceRecord]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    export_csv(records, &mut buf)?;
    String::from_utf8(buf).map_err(|_| ExportError::Encoding)
}
