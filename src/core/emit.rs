use crate::domain::model::{OutputRow, TransactionRecord, OUTPUT_HEADER};
use crate::utils::error::{NormalizeError, Result};

/// Order records by date. Records sharing a date keep their input order.
pub fn sort_records(records: &mut [TransactionRecord]) {
    records.sort_by_cached_key(|r| r.sort_key());
}

/// Render the canonical CSV: the fixed header, then one unquoted line per record.
pub fn render_csv(records: &[TransactionRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(OUTPUT_HEADER)?;
    for record in records {
        writer.serialize(OutputRow::from(record))?;
    }

    writer
        .into_inner()
        .map_err(|e| NormalizeError::ProcessingError {
            message: format!("Failed to flush CSV buffer: {}", e.error()),
        })
}
