use crate::error::ConfigError;
use crate::models::Listing;
use anyhow::{Context, Result};
use scraper::Selector;
use std::fs::File;
use std::path::Path;
use tracing::info;

pub(crate) fn compile_selector(css: &str) -> Result<Selector, ConfigError> {
    Selector::parse(css).map_err(|e| ConfigError::InvalidSelector {
        selector: css.to_string(),
        reason: format!("{:?}", e),
    })
}

/// Write the scraped listings to a CSV file, replacing whatever was there.
pub fn save_listings_to_csv(listings: &[Listing], output_path: &str) -> Result<()> {
    let path = Path::new(output_path);

    let file = File::create(path)
        .context(format!("Failed to create output file: {}", output_path))?;

    let mut writer = csv::Writer::from_writer(file);

    for listing in listings {
        writer
            .serialize(listing)
            .context(format!("Failed to write listing to {}", output_path))?;
    }

    writer.flush()?;
    info!("Saved {} listings to {}", listings.len(), output_path);

    Ok(())
}
