//! Link discovery report
//!
//! Writes the full crawl discovery log as a CSV file, one row per anchor
//! seen, in discovery order. The report is best-effort output: the caller
//! logs a write failure and continues the run.

use crate::crawler::LinkRecord;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing the report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Column headers for the discovery report
const HEADERS: &[&str] = &["Source_Page", "Link_URL", "Link_Text", "Link_Type", "Year"];

/// Writes the discovery report to the given path
///
/// One row per [`LinkRecord`], in the order they were discovered, with an
/// empty Year column for links that carry no year.
pub fn write_report(records: &[LinkRecord], path: &Path) -> Result<(), ReportError> {
    let mut file = std::fs::File::create(path)?;

    writeln!(file, "{}", HEADERS.join(","))?;

    for record in records {
        let year = record.year.map(|y| y.to_string()).unwrap_or_default();
        let row = [
            escape_field(record.source_page.as_str()),
            escape_field(record.target.as_str()),
            escape_field(&record.text),
            escape_field(record.kind.as_str()),
            escape_field(&year),
        ];
        writeln!(file, "{}", row.join(","))?;
    }

    file.flush()?;
    Ok(())
}

/// Quotes a CSV field when it contains a delimiter, quote, or newline
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
