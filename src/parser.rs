use crate::error::{Field, ParseError};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// Two-digit years below this belong to the 2000s.
///
/// Everything else is shifted by 1990, so "95" lands on 2085. The pivot assumes the
/// site never lists bikes built before 1990 and must be revisited once "20" and up
/// start meaning 2020+.
pub const YEAR_PIVOT: i32 = 20;

static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?$").expect("amount pattern is valid"));

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{2})$").expect("date pattern is valid"));

/// Parse a price or distance token whose unit marker has already been stripped.
///
/// The site writes amounts in thousands with `.` as the decimal mark, so `"12.5"`
/// means 12500. Tokens without a dot are plain integers. A real sub-1000 decimal
/// such as a price of `"0.5"` euros cannot be told apart and becomes 500.
pub fn parse_amount(field: Field, token: &str) -> Result<u32, ParseError> {
    let cleaned = token.trim();
    if !AMOUNT_RE.is_match(cleaned) {
        return Err(ParseError::malformed(field, token));
    }

    if cleaned.contains('.') {
        let thousands: f64 = cleaned
            .parse()
            .map_err(|_| ParseError::malformed(field, token))?;
        let value = (thousands * 1000.0).round();
        if value > f64::from(u32::MAX) {
            return Err(ParseError::malformed(field, token));
        }
        Ok(value as u32)
    } else {
        cleaned
            .parse()
            .map_err(|_| ParseError::malformed(field, token))
    }
}

/// Parse an `MM/YY` manufacture token into the first day of that month.
pub fn parse_manufacture_date(token: &str) -> Result<NaiveDate, ParseError> {
    let malformed = || ParseError::malformed(Field::ManufactureDate, token);

    let captures = DATE_RE.captures(token.trim()).ok_or_else(malformed)?;
    let month: u32 = captures[1].parse().map_err(|_| malformed())?;
    let short_year: i32 = captures[2].parse().map_err(|_| malformed())?;

    NaiveDate::from_ymd_opt(resolve_year(short_year), month, 1).ok_or_else(malformed)
}

fn resolve_year(short_year: i32) -> i32 {
    if short_year < YEAR_PIVOT {
        2000 + short_year
    } else {
        1990 + short_year
    }
}
