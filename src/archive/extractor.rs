//! Archive-year page extraction
//!
//! Each archive-year page carries one table listing the year's sittings,
//! with a "Download" link in the fourth column for rows that have a
//! published transcript. This module turns that table into an ordered list
//! of download descriptors.

use crate::archive::filename::build_filename;
use crate::archive::{DownloadDescriptor, ExtractError};
use scraper::{ElementRef, Html, Selector};
use std::path::Path;
use url::Url;

/// Number of cells a row must have to be considered a sitting row
const MIN_CELLS: usize = 5;

/// Extracts download descriptors from an archive-year page
///
/// Locates the first table in the document and walks its rows in order,
/// skipping the header row. A row qualifies when it has at least five
/// cells and its fourth cell contains a link whose visible text equals
/// "download" case-insensitively; rows without such a link are silently
/// skipped, since not every sitting has a published file.
///
/// # Arguments
///
/// * `html` - The archive-year page content
/// * `year_dir` - Destination directory for this year's files
/// * `root` - Site root used to resolve relative download hrefs
///
/// # Returns
///
/// * `Ok(Vec<DownloadDescriptor>)` - Descriptors in table row order;
///   empty if no row qualifies
/// * `Err(ExtractError::NoTableFound)` - The page has no table at all
pub fn extract_descriptors(
    html: &str,
    year_dir: &Path,
    root: &Url,
) -> Result<Vec<DownloadDescriptor>, ExtractError> {
    let document = Html::parse_document(html);

    let (table_selector, row_selector, cell_selector, link_selector) = match (
        Selector::parse("table"),
        Selector::parse("tr"),
        Selector::parse("td"),
        Selector::parse("a"),
    ) {
        (Ok(table), Ok(row), Ok(cell), Ok(link)) => (table, row, cell, link),
        _ => return Err(ExtractError::NoTableFound),
    };

    let table = document
        .select(&table_selector)
        .next()
        .ok_or(ExtractError::NoTableFound)?;

    let mut descriptors = Vec::new();

    for (index, row) in table.select(&row_selector).enumerate() {
        // Row 0 is the header
        if index == 0 {
            continue;
        }

        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if cells.len() < MIN_CELLS {
            continue;
        }

        let date_str = cell_text(&cells[0]);
        let meeting_no = cell_text(&cells[1]);
        let day_no = cell_text(&cells[2]);

        let link = match cells[3].select(&link_selector).next() {
            Some(link) => link,
            None => continue,
        };

        let link_text = link.text().collect::<String>().trim().to_lowercase();
        if link_text != "download" {
            continue;
        }

        let href = match link.value().attr("href") {
            Some(href) => href,
            None => continue,
        };

        let url = match root.join(href) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Skipping row with unresolvable href '{}': {}", href, e);
                continue;
            }
        };

        descriptors.push(DownloadDescriptor {
            url,
            folder: year_dir.to_path_buf(),
            filename: build_filename(&date_str, &meeting_no, &day_no),
        });
    }

    Ok(descriptors)
}

/// Returns a cell's flattened, trimmed text content
fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}
