//! Link classification
//!
//! Every anchor discovered during the crawl is classified into exactly one
//! [`LinkKind`] and appended to the discovery report. Classification is a
//! pure function of the href and the link text; no network or file I/O.

use url::Url;

/// Href marker identifying archive-year pages
pub const ARCHIVE_MARKER: &str = "hansard";

/// Href marker identifying downloadable documents
pub const DOCUMENT_MARKER: &str = ".pdf";

/// Href markers identifying supporting material
pub const SUPPORTING_MARKERS: &[&str] = &["reports", "division"];

/// Classification of a discovered link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// A page listing all sittings for one calendar year
    ArchiveYear,
    /// A downloadable document
    Document,
    /// Supporting material (reports, division records)
    Supporting,
    /// Anything else
    Other,
}

impl LinkKind {
    /// Returns the label used for this kind in the discovery report
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::ArchiveYear => "Hansard_Archive",
            LinkKind::Document => "Document_PDF",
            LinkKind::Supporting => "Supporting_Document",
            LinkKind::Other => "Other",
        }
    }
}

/// One discovered anchor, as recorded in the discovery report
///
/// Records are immutable once produced and are deliberately not deduplicated;
/// the report is a raw log of everything the crawl saw.
#[derive(Debug, Clone)]
pub struct LinkRecord {
    /// The page the anchor was found on
    pub source_page: Url,
    /// The resolved absolute target of the anchor
    pub target: Url,
    /// The anchor's visible text, trimmed
    pub text: String,
    /// Classification of the link
    pub kind: LinkKind,
    /// Year extracted from the link text, for archive links
    pub year: Option<i32>,
}

/// Classifies a discovered anchor
///
/// Rules are checked in a fixed order and the first match wins:
///
/// 1. Href contains the archive marker -> [`LinkKind::ArchiveYear`]; the
///    link text is scanned for a 4-digit year token.
/// 2. Href contains a supporting marker -> [`LinkKind::Supporting`].
/// 3. Href contains the document marker -> [`LinkKind::Document`].
/// 4. Otherwise [`LinkKind::Other`].
///
/// All marker matches are case-insensitive on the raw href. A link matching
/// both the archive marker and the document marker is an archive link; one
/// matching both a supporting marker and the document marker is supporting.
///
/// # Arguments
///
/// * `source_page` - The page the anchor was found on
/// * `href` - The raw href attribute, before resolution
/// * `target` - The href resolved to an absolute URL
/// * `text` - The anchor's visible text
pub fn classify_link(source_page: &Url, href: &str, target: &Url, text: &str) -> LinkRecord {
    let href_lower = href.to_lowercase();
    let text = text.trim().to_string();

    let (kind, year) = if href_lower.contains(ARCHIVE_MARKER) {
        (LinkKind::ArchiveYear, extract_year(&text))
    } else if SUPPORTING_MARKERS.iter().any(|m| href_lower.contains(m)) {
        (LinkKind::Supporting, None)
    } else if href_lower.contains(DOCUMENT_MARKER) {
        (LinkKind::Document, None)
    } else {
        (LinkKind::Other, None)
    };

    LinkRecord {
        source_page: source_page.clone(),
        target: target.clone(),
        text,
        kind,
        year,
    }
}

/// Extracts a calendar year from link text
///
/// Scans whitespace-delimited tokens for the first 4-digit numeral,
/// e.g. "Hansard 2024" -> 2024.
fn extract_year(text: &str) -> Option<i32> {
    text.split_whitespace()
        .find(|token| token.len() == 4 && token.chars().all(|c| c.is_ascii_digit()))
        .and_then(|token| token.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> Url {
        Url::parse("https://www.parliament.gov.pg/index.php").unwrap()
    }

    fn classify(href: &str, text: &str) -> LinkRecord {
        let root = Url::parse("https://www.parliament.gov.pg").unwrap();
        let target = root.join(href).unwrap();
        classify_link(&source(), href, &target, text)
    }

    #[test]
    fn test_archive_link_with_year() {
        let record = classify("https://site/hansard/2023.html", "Hansard 2023");
        assert_eq!(record.kind, LinkKind::ArchiveYear);
        assert_eq!(record.year, Some(2023));
    }

    #[test]
    fn test_archive_link_without_year() {
        let record = classify("/hansard/archive.html", "Hansard Archives");
        assert_eq!(record.kind, LinkKind::ArchiveYear);
        assert_eq!(record.year, None);
    }

    #[test]
    fn test_archive_marker_beats_document_marker() {
        let record = classify("/hansard/2021.pdf", "Hansard 2021");
        assert_eq!(record.kind, LinkKind::ArchiveYear);
        assert_eq!(record.year, Some(2021));
    }

    #[test]
    fn test_supporting_beats_document_marker() {
        let record = classify("/reports/x.pdf", "Report");
        assert_eq!(record.kind, LinkKind::Supporting);
        assert_eq!(record.year, None);
    }

    #[test]
    fn test_plain_document() {
        let record = classify("/files/x.pdf", "PDF");
        assert_eq!(record.kind, LinkKind::Document);
    }

    #[test]
    fn test_division_is_supporting() {
        let record = classify("/division/records.html", "Division Records");
        assert_eq!(record.kind, LinkKind::Supporting);
    }

    #[test]
    fn test_other() {
        let record = classify("/about-us.html", "About Us");
        assert_eq!(record.kind, LinkKind::Other);
        assert_eq!(record.year, None);
    }

    #[test]
    fn test_markers_are_case_insensitive() {
        let record = classify("/HANSARD/2022.HTML", "Hansard 2022");
        assert_eq!(record.kind, LinkKind::ArchiveYear);

        let record = classify("/files/doc.PDF", "Doc");
        assert_eq!(record.kind, LinkKind::Document);
    }

    #[test]
    fn test_year_must_be_four_digits() {
        assert_eq!(extract_year("Hansard 202"), None);
        assert_eq!(extract_year("Hansard 20245"), None);
        assert_eq!(extract_year("Hansard 2024"), Some(2024));
    }

    #[test]
    fn test_year_first_matching_token_wins() {
        assert_eq!(extract_year("Sittings 2019 to 2020"), Some(2019));
    }

    #[test]
    fn test_year_ignores_non_numeric_tokens() {
        assert_eq!(extract_year("Year abcd e2024"), None);
    }

    #[test]
    fn test_text_is_trimmed() {
        let record = classify("/about.html", "  About  ");
        assert_eq!(record.text, "About");
    }
}
