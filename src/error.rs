use std::fmt;
use thiserror::Error;

/// The listing fields a raw token can be parsed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Description,
    Distance,
    Price,
    ManufactureDate,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Description => "description",
            Field::Distance => "distance",
            Field::Price => "price",
            Field::ManufactureDate => "manufacture date",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
}

/// A single ad block could not be turned into a listing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed {field} token {token:?}")]
    Malformed { field: Field, token: String },

    #[error("ad block has {found} text lines, at least {expected} required")]
    TooFewLines { found: usize, expected: usize },
}

impl ParseError {
    pub fn malformed(field: Field, token: &str) -> Self {
        ParseError::Malformed {
            field,
            token: token.to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("pagination control not found")]
    Missing,

    #[error("pagination control holds no page numbers")]
    Unparsable,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid CSS selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// Fatal crawl failure. Listings gathered before the failing page are dropped.
#[derive(Error, Debug)]
#[error("crawl aborted at page {page}")]
pub struct CrawlError {
    pub page: u32,
    #[source]
    pub source: FetchError,
}
