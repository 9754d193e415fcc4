use crate::error::{ConfigError, CrawlError};
use crate::extractor::{AdLayout, Extractor};
use crate::fetcher::PageFetcher;
use crate::models::Listing;
use crate::pager::{self, PageTemplate, Pager};
use scraper::Html;
use tracing::{info, info_span, Span};

/// Markup details of the listing site.
#[derive(Debug, Clone)]
pub struct SiteProfile {
    pub ad_block_selector: String,
    pub pagination_selector: String,
    pub layout: AdLayout,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            ad_block_selector: "div.clsfd_list_row_group".to_string(),
            pagination_selector: "ul.pagination.pull-right".to_string(),
            layout: AdLayout::default(),
        }
    }
}

pub struct Crawler<F> {
    fetcher: F,
    extractor: Extractor,
    pager: Pager,
    span: Span,
}

impl<F: PageFetcher> Crawler<F> {
    pub fn new(fetcher: F, site: &SiteProfile) -> Result<Self, ConfigError> {
        Ok(Self {
            fetcher,
            extractor: Extractor::new(&site.ad_block_selector, site.layout.clone())?,
            pager: Pager::new(&site.pagination_selector)?,
            span: info_span!("crawl"),
        })
    }

    /// Log everything the crawl emits inside `span`.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Fetch every result page for `url`, one after another, and return their
    /// listings in page order.
    ///
    /// The page count comes from page 1. A failed fetch on any page aborts the
    /// whole crawl and the listings gathered so far are dropped.
    pub fn crawl(&self, url: &str) -> Result<Vec<Listing>, CrawlError> {
        let _entered = self.span.enter();

        let template =
            pager::normalize_url(url).map_err(|source| CrawlError { page: 1, source })?;
        info!("Start page retrieval from {}", template);

        let first = self.fetch_page(&template, 1)?;
        let mut listings = self.extractor.extract(&first);
        let last_page = self.pager.last_page_number(&first);

        for page in 2..=last_page {
            let document = self.fetch_page(&template, page)?;
            listings.extend(self.extractor.extract(&document));
        }

        info!(
            pages = last_page.max(1),
            listings = listings.len(),
            "Finished page retrieval"
        );
        Ok(listings)
    }

    fn fetch_page(&self, template: &PageTemplate, page: u32) -> Result<Html, CrawlError> {
        info!("Retrieving page: {}", page);
        let body = self
            .fetcher
            .fetch(&template.page_url(page))
            .map_err(|source| CrawlError { page, source })?;
        Ok(Html::parse_document(&body))
    }
}
