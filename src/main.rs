use anyhow::{Context, Result};
use bikefinder::store::{ListingStore, SqliteStore};
use bikefinder::{logging, report, utils, Crawler, FetchOptions, HttpFetcher, SiteProfile};
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info_span};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Bikefinder - Motorcycle listing analyzer for car.gr")]
struct Args {
    /// A search results url from www.car.gr
    url: String,

    /// Seconds to wait for each page before giving up (0 waits forever)
    #[clap(short, long, default_value = "30")]
    timeout: u64,

    /// Also write the scraped listings to this CSV file
    #[clap(long)]
    csv: Option<String>,

    /// Enable debug output
    #[clap(short, long)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _logger = logging::init(args.debug);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let options = FetchOptions {
        timeout: (args.timeout > 0).then(|| Duration::from_secs(args.timeout)),
        ..FetchOptions::default()
    };
    let fetcher = HttpFetcher::new(&options)?;
    let crawler = Crawler::new(fetcher, &SiteProfile::default())?
        .with_span(info_span!("crawl", url = %args.url));

    let listings = crawler.crawl(&args.url)?;

    if let Some(path) = &args.csv {
        utils::save_listings_to_csv(&listings, path)?;
    }

    let mut store = SqliteStore::in_memory()?;
    store.insert(&listings)?;
    let overview = store.overview().context("failed to summarize listings")?;
    let years = store.aggregate_by_year().context("failed to aggregate listings")?;

    print!("{}", report::render(&overview, &years));
    Ok(())
}
