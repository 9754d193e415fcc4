use crate::error::{Field, ParseError};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One motorcycle ad. The manufacture date always falls on the 1st of its month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    description: String,
    distance: u32,
    price: u32,
    manufacture_date: NaiveDate,
}

impl Listing {
    pub fn new(
        description: &str,
        distance: u32,
        price: u32,
        manufacture_date: NaiveDate,
    ) -> Result<Self, ParseError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ParseError::malformed(Field::Description, description));
        }

        Ok(Listing {
            description: description.to_string(),
            distance,
            price,
            manufacture_date: manufacture_date.with_day(1).unwrap_or(manufacture_date),
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Kilometers.
    pub fn distance(&self) -> u32 {
        self.distance
    }

    pub fn price(&self) -> u32 {
        self.price
    }

    pub fn manufacture_date(&self) -> NaiveDate {
        self.manufacture_date
    }
}

/// Aggregates for all listings sharing a manufacture year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSummary {
    pub year: i32,
    pub count: i64,
    pub avg_price: f64,
    pub min_price: i64,
    pub avg_distance: f64,
    pub min_distance: i64,
}

/// Aggregates over the whole crawl. Averages are `None` when nothing was stored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Overview {
    pub count: i64,
    pub avg_price: Option<f64>,
    pub avg_distance: Option<f64>,
    pub avg_year: Option<f64>,
}
