//! HTML anchor extraction
//!
//! Thin wrapper around the `scraper` crate exposing the two things the
//! crawler needs from a page: every anchor's raw href and its visible text.

use scraper::{Html, Selector};
use url::Url;

/// One `<a href>` tag found on a page
#[derive(Debug, Clone)]
pub struct Anchor {
    /// Raw href attribute, before resolution
    pub href: String,
    /// Visible text of the anchor, trimmed
    pub text: String,
}

/// Extracts all anchors with an href attribute from an HTML document
///
/// # Arguments
///
/// * `html` - The HTML content to parse
///
/// # Returns
///
/// Anchors in document order. Pages with no anchors yield an empty vector.
pub fn extract_anchors(html: &str) -> Vec<Anchor> {
    let document = Html::parse_document(html);
    let mut anchors = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                anchors.push(Anchor {
                    href: href.to_string(),
                    text: element.text().collect::<String>().trim().to_string(),
                });
            }
        }
    }

    anchors
}

/// Resolves an href to an absolute URL against the site root
///
/// Returns None for hrefs that cannot produce a crawlable URL:
/// `javascript:`, `mailto:`, `tel:` and `data:` schemes, fragment-only
/// links, empty hrefs, and anything that fails to parse.
pub fn resolve_href(href: &str, root: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match root.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}
