//! Search-result listing traversal
//!
//! Helpers shared by all page parsers for walking the portal's listing
//! markup: the per-entry blocks, the labeled sub-blocks inside an entry,
//! and the total-results counter used by the plan builder.

use crate::parse::fields::{clean_text, digits};
use crate::parse::ParseError;
use scraper::{ElementRef, Html, Selector};

/// Parses a CSS selector, mapping failures to a ParseError
pub(crate) fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::Selector(e.to_string()))
}

/// Returns the registry entry blocks of a search-result page
pub fn entry_blocks(document: &Html) -> Result<Vec<ElementRef<'_>>, ParseError> {
    let sel = selector(".search-registry-entry-block")?;
    Ok(document.select(&sel).collect())
}

/// Extracts the total result count from a search-result page
///
/// A missing counter means an empty result set, not an error; the portal
/// omits the element when nothing matched.
pub fn extract_total(html: &str) -> Result<u64, ParseError> {
    let document = Html::parse_document(html);
    let sel = selector(".search-results__total")?;

    let Some(element) = document.select(&sel).next() else {
        return Ok(0);
    };

    let text: String = element.text().collect();
    let number = digits(&text);
    if number.is_empty() {
        return Ok(0);
    }
    number
        .parse::<u64>()
        .map_err(|_| ParseError::InvalidTotal(clean_text(&text)))
}

/// Cleaned text of the first element matching `css` inside `scope`
///
/// Returns `None` when the element is absent or its text is empty.
pub fn text_in(scope: ElementRef<'_>, css: &str) -> Result<Option<String>, ParseError> {
    let sel = selector(css)?;
    Ok(scope
        .select(&sel)
        .next()
        .map(|el| clean_text(&el.text().collect::<String>()))
        .filter(|s| !s.is_empty()))
}

/// Value of the labeled body block whose title contains `label`
///
/// Entry bodies are sequences of title/value pairs
/// (`.registry-entry__body-title` / `.registry-entry__body-value`); linked
/// values are wrapped in `.registry-entry__body-href` instead.
pub fn body_value(scope: ElementRef<'_>, label: &str) -> Result<Option<String>, ParseError> {
    labeled_value(
        scope,
        ".registry-entry__body-block",
        ".registry-entry__body-title",
        ".registry-entry__body-value, .registry-entry__body-href",
        label,
    )
}

/// Value of the labeled data block whose title contains `label`
///
/// Dates live in `.data-block` pairs of `.data-block__title` /
/// `.data-block__value` at the bottom of each entry.
pub fn data_value(scope: ElementRef<'_>, label: &str) -> Result<Option<String>, ParseError> {
    labeled_value(
        scope,
        ".data-block",
        ".data-block__title",
        ".data-block__value",
        label,
    )
}

fn labeled_value(
    scope: ElementRef<'_>,
    block_css: &str,
    title_css: &str,
    value_css: &str,
    label: &str,
) -> Result<Option<String>, ParseError> {
    let block_sel = selector(block_css)?;
    let title_sel = selector(title_css)?;
    let value_sel = selector(value_css)?;
    let label = label.to_lowercase();

    for block in scope.select(&block_sel) {
        let matches = block
            .select(&title_sel)
            .next()
            .map(|t| {
                clean_text(&t.text().collect::<String>())
                    .to_lowercase()
                    .contains(&label)
            })
            .unwrap_or(false);

        if matches {
            return Ok(block
                .select(&value_sel)
                .next()
                .map(|v| clean_text(&v.text().collect::<String>()))
                .filter(|s| !s.is_empty()));
        }
    }

    Ok(None)
}
