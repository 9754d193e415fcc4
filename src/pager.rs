use crate::error::{ConfigError, FetchError, PaginationError};
use crate::utils::compile_selector;
use scraper::{Html, Selector};
use std::fmt;
use tracing::debug;
use url::Url;

/// Query parameter car.gr uses for the result page number.
pub const PAGE_PARAM: &str = "pg";

pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Page count assumed when the pagination control cannot be read.
/// Better to ask for one page too many than to stop after the first.
pub const DEFAULT_LAST_PAGE: u32 = 2;

/// A search URL with the page number left open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTemplate {
    template: String,
}

impl PageTemplate {
    pub fn as_str(&self) -> &str {
        &self.template
    }

    pub fn page_url(&self, page: u32) -> String {
        self.template.replace(PAGE_PLACEHOLDER, &page.to_string())
    }
}

impl fmt::Display for PageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

/// Strip any page number from `url` and append the page placeholder.
///
/// Other query parameters are kept byte for byte and in order. The fragment is
/// dropped, since it would otherwise end up in front of the page parameter.
pub fn normalize_url(url: &str) -> Result<PageTemplate, FetchError> {
    let mut parsed = Url::parse(url.trim()).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let kept = parsed
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|piece| !piece.is_empty() && !is_page_param(piece))
        .collect::<Vec<_>>()
        .join("&");

    parsed.set_fragment(None);
    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.set_query(Some(&kept));
    }

    let separator = if kept.is_empty() { '?' } else { '&' };
    Ok(PageTemplate {
        template: format!("{}{}{}={}", parsed, separator, PAGE_PARAM, PAGE_PLACEHOLDER),
    })
}

fn is_page_param(piece: &str) -> bool {
    piece.split('=').next() == Some(PAGE_PARAM)
}

pub struct Pager {
    control: Selector,
}

impl Pager {
    pub fn new(pagination_selector: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            control: compile_selector(pagination_selector)?,
        })
    }

    /// Highest page number in the pagination control, or [`DEFAULT_LAST_PAGE`]
    /// when there is nothing to read.
    pub fn last_page_number(&self, document: &Html) -> u32 {
        match self.try_last_page_number(document) {
            Ok(page) => page,
            Err(e) => {
                debug!("{}, assuming {} pages", e, DEFAULT_LAST_PAGE);
                DEFAULT_LAST_PAGE
            }
        }
    }

    pub fn try_last_page_number(&self, document: &Html) -> Result<u32, PaginationError> {
        let control = document
            .select(&self.control)
            .next()
            .ok_or(PaginationError::Missing)?;

        control
            .text()
            .flat_map(str::lines)
            .filter_map(|line| line.trim().parse::<u32>().ok())
            .max()
            .ok_or(PaginationError::Unparsable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pager() -> Pager {
        Pager::new("ul.pagination.pull-right").unwrap()
    }

    #[test]
    fn test_normalize_appends_placeholder() {
        let template = normalize_url("https://www.car.gr/classifieds/bikes/?category=motorcycles").unwrap();
        assert_eq!(
            template.as_str(),
            "https://www.car.gr/classifieds/bikes/?category=motorcycles&pg={page}"
        );
        assert_eq!(
            template.page_url(3),
            "https://www.car.gr/classifieds/bikes/?category=motorcycles&pg=3"
        );
    }

    #[test]
    fn test_normalize_strips_existing_page() {
        let template =
            normalize_url("https://www.car.gr/classifieds/bikes/?pg=4&category=motorcycles&make=honda")
                .unwrap();
        assert_eq!(
            template.as_str(),
            "https://www.car.gr/classifieds/bikes/?category=motorcycles&make=honda&pg={page}"
        );
    }

    #[test]
    fn test_normalize_keeps_other_parameters_verbatim() {
        let template =
            normalize_url("https://www.car.gr/classifieds/bikes/?new&pg=3&make=1,2&q=dr%20650").unwrap();
        assert_eq!(
            template.as_str(),
            "https://www.car.gr/classifieds/bikes/?new&make=1,2&q=dr%20650&pg={page}"
        );
        assert_eq!(normalize_url(&template.page_url(4)).unwrap(), template);
    }

    #[test]
    fn test_normalize_without_query() {
        let template = normalize_url("https://www.car.gr/classifieds/bikes/#top").unwrap();
        assert_eq!(
            template.as_str(),
            "https://www.car.gr/classifieds/bikes/?pg={page}"
        );
    }

    #[test]
    fn test_normalize_is_idempotent_through_instantiation() {
        for url in [
            "https://www.car.gr/classifieds/bikes/?category=motorcycles&pg=7",
            "https://www.car.gr/classifieds/bikes/?q=dr+650&price-to=3000",
            "https://www.car.gr/classifieds/bikes/",
        ] {
            let first = normalize_url(url).unwrap();
            let second = normalize_url(&first.page_url(5)).unwrap();
            assert_eq!(first, second, "{url}");
        }
    }

    #[test]
    fn test_normalize_rejects_malformed_url() {
        let err = normalize_url("not a url").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { ref url, .. } if url == "not a url"));
    }

    #[test]
    fn test_last_page_is_highest_number() {
        let document = Html::parse_document(
            r#"<ul class="pagination pull-right">
                 <li><a>Previous</a></li>
                 <li><a>1</a></li>
                 <li><a>2</a></li>
                 <li><a>...</a></li>
                 <li><a>17</a></li>
                 <li><a>Next</a></li>
               </ul>"#,
        );
        assert_eq!(pager().try_last_page_number(&document), Ok(17));
        assert_eq!(pager().last_page_number(&document), 17);
    }

    #[test]
    fn test_last_page_in_compact_markup() {
        let document = Html::parse_document(
            r#"<ul class="pagination pull-right"><li>1</li><li>2</li><li>9</li></ul>"#,
        );
        assert_eq!(pager().last_page_number(&document), 9);
    }

    #[test]
    fn test_missing_control_defaults_to_two_pages() {
        let document = Html::parse_document("<div>No pagination here</div>");
        assert_eq!(
            pager().try_last_page_number(&document),
            Err(PaginationError::Missing)
        );
        assert_eq!(pager().last_page_number(&document), DEFAULT_LAST_PAGE);
        assert_eq!(DEFAULT_LAST_PAGE, 2);
    }

    #[test]
    fn test_unreadable_control_defaults_to_two_pages() {
        let document = Html::parse_document(
            r#"<ul class="pagination pull-right"><li>Previous</li><li>…</li><li>Next</li></ul>"#,
        );
        assert_eq!(
            pager().try_last_page_number(&document),
            Err(PaginationError::Unparsable)
        );
        assert_eq!(pager().last_page_number(&document), 2);
    }
}
