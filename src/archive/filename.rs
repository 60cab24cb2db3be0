//! Destination filename derivation
//!
//! Filenames are derived deterministically from one table row so a row
//! always maps to the same file across runs. Malformed dates never fail;
//! they fall back to the raw string with path-hostile separators replaced.

use chrono::NaiveDate;

/// Normalizes a sitting date for use in a filename
///
/// Parses `DD/MM/YYYY` and renders it as `YYYYMMDD` so filenames sort
/// chronologically. A date that does not parse is kept verbatim with `/`
/// replaced by `-`.
///
/// # Examples
///
/// ```
/// use hansard_harvester::archive::normalize_date;
///
/// assert_eq!(normalize_date("05/03/2021"), "20210305");
/// assert_eq!(normalize_date("N/A"), "N-A");
/// ```
pub fn normalize_date(date_str: &str) -> String {
    match NaiveDate::parse_from_str(date_str, "%d/%m/%Y") {
        Ok(date) => date.format("%Y%m%d").to_string(),
        Err(_) => date_str.replace('/', "-"),
    }
}

/// Builds the destination filename for one table row
///
/// Format: `{normalized_date}_Meeting{meeting}_Day{day}.pdf`. The meeting
/// and day identifiers keep same-date sittings from colliding.
pub fn build_filename(date_str: &str, meeting_no: &str, day_no: &str) -> String {
    format!(
        "{}_Meeting{}_Day{}.pdf",
        normalize_date(date_str),
        meeting_no,
        day_no
    )
}
