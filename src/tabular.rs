//! Tabular text IO (headerless CSV)
//!
//! Encounter descriptions, `manager_config.csv` and the asset summary export
//! are all plain rows of string fields with no header line.

use std::path::Path;

pub type Row = Vec<String>;

/// A row read from disk, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    /// 1-based line the row starts on
    pub line: usize,
    pub fields: Row,
}

/// Read every row of a headerless CSV file.
///
/// Rows may have differing field counts. Rows where every field is empty
/// (blank lines) are dropped; the remaining rows keep their file line.
pub fn read_rows<P: AsRef<Path>>(path: P) -> csv::Result<Vec<SourceRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        let line = record
            .position()
            .map_or(idx + 1, |position| position.line() as usize);
        rows.push(SourceRow {
            line,
            fields: record.iter().map(str::to_string).collect(),
        });
    }
    Ok(rows)
}

/// Write rows to a headerless CSV file, replacing any existing content.
pub fn write_rows<P: AsRef<Path>>(path: P, rows: &[Row]) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
