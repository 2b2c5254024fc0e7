//! HTML fallback for discussions the search index cannot locate

use scraper::{Html, Selector};

/// Titles served for missing or gated pages
const GENERIC_TITLES: &[&str] = &["kaggle", "page not found", "404", "sign in", "unknown"];

/// Extract a meaningful `<title>` from a discussion page
///
/// The site suffix (` | Kaggle`) is removed. Returns `None` when the page has
/// no title or only a generic one.
pub fn extract_page_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;

    let raw = document.select(&selector).next()?.text().collect::<String>();
    let title = raw
        .trim()
        .trim_end_matches("| Kaggle")
        .trim_end_matches("- Kaggle")
        .trim()
        .to_string();

    let lowered = title.to_ascii_lowercase();
    if title.is_empty() || GENERIC_TITLES.contains(&lowered.as_str()) {
        None
    } else {
        Some(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_page_title() {
        let html = "<html><head><title>1st Place Solution | Kaggle</title></head><body></body></html>";
        assert_eq!(extract_page_title(html), Some("1st Place Solution".to_string()));
    }

    #[test]
    fn test_extract_page_title_decodes_entities() {
        let html = "<html><head><title>Q&amp;A thread</title></head></html>";
        assert_eq!(extract_page_title(html), Some("Q&A thread".to_string()));
    }

    #[test]
    fn test_extract_page_title_generic() {
        assert_eq!(extract_page_title("<title>Kaggle</title>"), None);
        assert_eq!(extract_page_title("<title>  </title>"), None);
        assert_eq!(extract_page_title("<html><body>no title</body></html>"), None);
    }
}
