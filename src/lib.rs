pub mod crawler;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod logging;
pub mod models;
pub mod pager;
pub mod parser;
pub mod report;
pub mod store;
pub mod utils;

pub use crawler::{Crawler, SiteProfile};
pub use error::{CrawlError, FetchError, ParseError, PaginationError};
pub use fetcher::{FetchOptions, HttpFetcher, PageFetcher};
pub use models::Listing;
pub use store::{ListingStore, SqliteStore};
