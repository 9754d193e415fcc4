use crate::error::{ConfigError, Field, ParseError};
use crate::models::Listing;
use crate::parser;
use crate::utils::compile_selector;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

/// Fixed-width unit or currency marker glued to an amount token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affix {
    None,
    /// Leading characters, e.g. `"€ "` in `"€ 4.5"`.
    Prefix(usize),
    /// Trailing characters, e.g. `" km"` in `"12.5 km"`.
    Suffix(usize),
}

impl Affix {
    /// Widths count characters, not bytes.
    pub fn strip<'a>(&self, token: &'a str) -> &'a str {
        match *self {
            Affix::None => token,
            Affix::Prefix(width) => token
                .char_indices()
                .nth(width)
                .map_or("", |(start, _)| &token[start..]),
            Affix::Suffix(width) => {
                let keep = token.chars().count().saturating_sub(width);
                token
                    .char_indices()
                    .nth(keep)
                    .map_or(token, |(end, _)| &token[..end])
            }
        }
    }
}

/// Where the fields of an ad block sit among its text lines.
///
/// The description is the first line. The other fields are counted from the end,
/// `1` being the last line once known artifacts are gone. Every ad on the site
/// renders the same trailing metadata lines, so a layout change on the site only
/// needs a new `AdLayout`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdLayout {
    pub date_from_end: usize,
    pub price_from_end: usize,
    pub distance_from_end: usize,
    pub price_affix: Affix,
    pub distance_affix: Affix,
}

impl Default for AdLayout {
    fn default() -> Self {
        Self {
            date_from_end: 5,
            price_from_end: 3,
            distance_from_end: 2,
            price_affix: Affix::Prefix(2),
            distance_affix: Affix::Suffix(3),
        }
    }
}

/// Raw tokens picked out of one ad block, before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFields<'a> {
    pub description: &'a str,
    pub date: &'a str,
    pub price: &'a str,
    pub distance: &'a str,
}

impl AdLayout {
    pub fn min_lines(&self) -> usize {
        self.date_from_end
            .max(self.price_from_end)
            .max(self.distance_from_end)
            .max(1)
    }

    pub fn map<'a>(&self, lines: &'a [String]) -> Result<RawFields<'a>, ParseError> {
        let too_few = || ParseError::TooFewLines {
            found: lines.len(),
            expected: self.min_lines(),
        };
        if lines.len() < self.min_lines() {
            return Err(too_few());
        }

        let from_end = |offset: usize| {
            lines
                .len()
                .checked_sub(offset)
                .and_then(|index| lines.get(index))
                .map(String::as_str)
                .ok_or_else(too_few)
        };

        Ok(RawFields {
            description: lines[0].as_str(),
            date: from_end(self.date_from_end)?,
            price: from_end(self.price_from_end)?,
            distance: from_end(self.distance_from_end)?,
        })
    }
}

/// Non-data text that is known to leak into the trailing line of an ad block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownArtifact {
    pub name: &'static str,
    pub marker: &'static str,
}

/// The ad-slot script car.gr places inside some ad blocks. Its source shows up as
/// an extra last text line and would shift every positional field by one.
pub const AD_SCRIPT_LEAK: KnownArtifact = KnownArtifact {
    name: "ad-slot script",
    marker: "googletag",
};

/// Drop the last line if it contains one of `artifacts`. At most one line is removed.
pub fn drop_known_artifact(
    lines: &mut Vec<String>,
    artifacts: &[KnownArtifact],
) -> Option<KnownArtifact> {
    let last = lines.last()?;
    let found = artifacts
        .iter()
        .find(|artifact| last.contains(artifact.marker))
        .copied()?;
    lines.pop();
    Some(found)
}

/// Trimmed, non-blank text lines of an element in document order.
pub fn ad_lines(element: ElementRef<'_>) -> Vec<String> {
    element
        .text()
        .collect::<String>()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

pub struct Extractor {
    ad_block: Selector,
    layout: AdLayout,
    artifacts: Vec<KnownArtifact>,
}

impl Extractor {
    pub fn new(ad_block_selector: &str, layout: AdLayout) -> Result<Self, ConfigError> {
        Ok(Self {
            ad_block: compile_selector(ad_block_selector)?,
            layout,
            artifacts: vec![AD_SCRIPT_LEAK],
        })
    }

    /// Listings of every well-formed ad block on the page, in page order.
    /// Blocks that fail to parse are logged and skipped.
    pub fn extract(&self, document: &Html) -> Vec<Listing> {
        let mut listings = Vec::new();

        for (index, ad) in document.select(&self.ad_block).enumerate() {
            match self.parse_block(ad_lines(ad)) {
                Ok(listing) => listings.push(listing),
                Err(e) => warn!(ad = index, "Skipping ad block: {}", e),
            }
        }

        debug!("Extracted {} listings from page", listings.len());
        listings
    }

    pub fn parse_block(&self, mut lines: Vec<String>) -> Result<Listing, ParseError> {
        if let Some(artifact) = drop_known_artifact(&mut lines, &self.artifacts) {
            debug!("Dropped trailing {} line", artifact.name);
        }

        let raw = self.layout.map(&lines)?;
        let manufacture_date = parser::parse_manufacture_date(raw.date)?;
        let price = parser::parse_amount(Field::Price, self.layout.price_affix.strip(raw.price))?;
        let distance = parser::parse_amount(
            Field::Distance,
            self.layout.distance_affix.strip(raw.distance),
        )?;

        Listing::new(raw.description, distance, price, manufacture_date)
    }
}
