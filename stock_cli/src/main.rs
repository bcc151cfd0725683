mod export;
mod report;
mod source;

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use stock_core::common::{
    enums::Market,
    stock_error::StockError,
    time::{parse_date, DateRange, PeriodPreset},
};
use stock_core::provider::{CachedProvider, DataProvider};
use stock_core::query::QueryParameters;
use stock_core::{Analyzer, StockConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use source::CsvDirProvider;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Directory holding <code>.csv price files and listing.csv
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Optional JSON config file (boll_n, boll_k, autofix, ...)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stocks of a market, largest market cap first
    List {
        /// KOSPI, KOSDAQ or KONEX
        #[arg(long, default_value = "KOSPI")]
        market: Market,

        /// Case-insensitive filter on name or code
        #[arg(long, default_value = "")]
        search: String,

        /// Rows shown when no search is given (defaults to listing_limit)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Fetch a stock's daily bars and print indicators and statistics
    Analyze {
        /// Stock code (e.g. "005930")
        #[arg(long)]
        code: String,

        /// Market used to look up the stock name
        #[arg(long, default_value = "KOSPI")]
        market: Market,

        /// Lookback preset: 1m, 3m, 6m, 1y, 3y, 5y
        #[arg(long, conflicts_with = "start")]
        preset: Option<PeriodPreset>,

        /// Custom start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// Custom end date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        end: Option<String>,

        /// Hide moving averages
        #[arg(long)]
        no_ma: bool,

        /// Show Bollinger bands
        #[arg(long)]
        bb: bool,

        /// Hide volume figures
        #[arg(long)]
        no_volume: bool,

        /// Export the bars to CSV; a directory gets the default file name
        #[arg(long)]
        export: Option<PathBuf>,

        /// Print the full analysis as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_range(
    preset: Option<PeriodPreset>,
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> Result<DateRange, StockError> {
    match start {
        Some(start) => {
            let end = end.map(parse_date).transpose()?.unwrap_or(today);
            DateRange::new(parse_date(start)?, end)
        }
        None => Ok(preset.unwrap_or_default().range_ending(today)),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => Ok(()),
        Err(e) => match e.downcast_ref::<StockError>() {
            Some(err) if err.is_recoverable() => {
                warn!(error = %err, "query returned no usable data");
                eprintln!("No data to show: {}. Try another stock code or date range.", err.msg);
                std::process::exit(2);
            }
            _ => Err(e),
        },
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => StockConfig::from_json_file(path)?,
        None => StockConfig::default(),
    };
    let provider = CachedProvider::new(CsvDirProvider::new(cli.data_dir.clone()), &config);
    let analyzer = Analyzer::new(config);

    match cli.command {
        Commands::List {
            market,
            search,
            limit,
        } => {
            let listing = analyzer.listing(&provider, market)?;
            let limit = limit.unwrap_or(analyzer.config().listing_limit);
            let hits = listing.search(&search, limit);
            if hits.is_empty() {
                println!("No stocks match '{}'.", search);
            }
            for stock in hits {
                println!("{}", stock.label());
            }
        }

        Commands::Analyze {
            code,
            market,
            preset,
            start,
            end,
            no_ma,
            bb,
            no_volume,
            export,
            json,
        } => {
            let today = Local::now().date_naive();
            let range = resolve_range(preset, start.as_deref(), end.as_deref(), today)?;
            let query = QueryParameters::new(code, range)?
                .with_moving_averages(!no_ma)
                .with_bollinger(bb)
                .with_volume(!no_volume);

            let analysis = analyzer.analyze(&provider, &query)?;
            let name = stock_name(&analyzer, &provider, market, query.code());

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print!("{}", report::render_text(&analysis, &name));
            }

            if let Some(target) = export {
                let path = if target.is_dir() {
                    target.join(export::file_name(&name, query.code(), query.range()))
                } else {
                    target
                };
                export::write_csv(&analysis.series, BufWriter::new(File::create(&path)?))?;
                info!(path = %path.display(), rows = analysis.series.len(), "csv exported");
            }
        }
    }
    Ok(())
}

/// Name from the listing when available, the code otherwise.
fn stock_name(
    analyzer: &Analyzer,
    provider: &dyn DataProvider,
    market: Market,
    code: &str,
) -> String {
    match analyzer.listing(provider, market) {
        Ok(listing) => listing
            .find(code)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| code.to_string()),
        Err(e) => {
            warn!(error = %e, "stock listing unavailable");
            code.to_string()
        }
    }
}
