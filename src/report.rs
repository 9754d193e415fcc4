use crate::models::{Overview, YearSummary};
use std::fmt;

const TABLE_HEADER: &str = "\
Year | # Records |     Price (€)     |   Distance (km)
     |           |   AVG   |   MIN   |   AVG   |   MIN
--------------------------------------------------------";

/// Plain-text analysis: overall averages followed by one table row per year.
pub fn render(overview: &Overview, years: &[YearSummary]) -> String {
    Report { overview, years }.to_string()
}

struct Report<'a> {
    overview: &'a Overview,
    years: &'a [YearSummary],
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let overview = self.overview;
        let (Some(avg_price), Some(avg_distance), Some(avg_year)) =
            (overview.avg_price, overview.avg_distance, overview.avg_year)
        else {
            return writeln!(f, "No listings found.");
        };

        writeln!(f, "Analysis")?;
        writeln!(f, "========")?;
        writeln!(f)?;
        writeln!(f, "General data ({} listings)", overview.count)?;
        writeln!(f, "The average price is: {:.0} €.", avg_price)?;
        writeln!(f, "The average distance is: {:.0} km.", avg_distance)?;
        writeln!(f, "The average manufacturing date is: {:.0}.", avg_year)?;
        writeln!(f)?;
        writeln!(f, "{}", TABLE_HEADER)?;

        for year in self.years {
            writeln!(f, "{}", year_row(year))?;
        }
        Ok(())
    }
}

fn year_row(summary: &YearSummary) -> String {
    format!(
        "{} | {:>5}     | {:>7.0} | {:>7} | {:>7.0} | {:>7}",
        summary.year,
        summary.count,
        summary.avg_price,
        summary.min_price,
        summary.avg_distance,
        summary.min_distance
    )
}
