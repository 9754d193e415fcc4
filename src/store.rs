use crate::models::{Listing, Overview, YearSummary};
use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::debug;

/// Where listings go once crawled, and how they are summarized.
pub trait ListingStore {
    fn insert(&mut self, listings: &[Listing]) -> Result<()>;
    fn aggregate_by_year(&self) -> Result<Vec<YearSummary>>;
    fn overview(&self) -> Result<Overview>;
}

/// Single-connection SQLite database that lives in memory for one run.
pub struct SqliteStore {
    db: Connection,
}

impl SqliteStore {
    pub fn in_memory() -> Result<Self> {
        let db = Connection::open_in_memory().context("failed to open in-memory database")?;

        db.execute_batch(
            "CREATE TABLE listings (
                id INTEGER PRIMARY KEY NOT NULL,
                description TEXT NOT NULL,
                distance INTEGER NOT NULL,
                price INTEGER NOT NULL,
                age DATE NOT NULL
            );",
        )
        .context("failed to create listings table")?;

        Ok(Self { db })
    }
}

impl ListingStore for SqliteStore {
    fn insert(&mut self, listings: &[Listing]) -> Result<()> {
        let tx = self.db.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO listings (description, distance, price, age) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for listing in listings {
                stmt.execute(rusqlite::params![
                    listing.description(),
                    listing.distance(),
                    listing.price(),
                    listing.manufacture_date().format("%Y-%m-%d").to_string(),
                ])?;
            }
        }
        tx.commit().context("failed to store listings")?;

        debug!("Stored {} listings", listings.len());
        Ok(())
    }

    fn aggregate_by_year(&self) -> Result<Vec<YearSummary>> {
        let mut stmt = self.db.prepare(
            "SELECT CAST(strftime('%Y', age) AS INTEGER) AS year, COUNT(id),
                    AVG(price), MIN(price), AVG(distance), MIN(distance)
             FROM listings
             GROUP BY year
             ORDER BY year",
        )?;

        let years = stmt
            .query_map([], |row| {
                Ok(YearSummary {
                    year: row.get(0)?,
                    count: row.get(1)?,
                    avg_price: row.get(2)?,
                    min_price: row.get(3)?,
                    avg_distance: row.get(4)?,
                    min_distance: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(years)
    }

    fn overview(&self) -> Result<Overview> {
        let overview = self.db.query_row(
            "SELECT COUNT(id), AVG(price), AVG(distance),
                    AVG(CAST(strftime('%Y', age) AS INTEGER))
             FROM listings",
            [],
            |row| {
                Ok(Overview {
                    count: row.get(0)?,
                    avg_price: row.get(1)?,
                    avg_distance: row.get(2)?,
                    avg_year: row.get(3)?,
                })
            },
        )?;
        Ok(overview)
    }
}
