use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};

use rtw_planner::airports::{
    AirportClient, AirportClientConfig, AirportCountries, AirportError, CountryCache,
    DEFAULT_CACHE_FILE,
};
use rtw_planner::dataset::{self, DatasetError};
use rtw_planner::logging;
use rtw_planner::planner::{
    CancellationFlag, Catalog, CatalogError, SearchConfig, SearchError, SearchScheduler,
};
use rtw_planner::report::{self, ReportError};

#[derive(Debug, Parser)]
#[command(name = "rtw-planner")]
#[command(about = "Search flight data for round-the-world itineraries")]
struct Cli {
    /// Semicolon-separated flight dataset
    #[arg(long, default_value = "input_data.csv")]
    input: PathBuf,

    /// Where to write the found itineraries
    #[arg(long, default_value = "valid_journeys.csv")]
    output: PathBuf,

    /// Airport country cache file
    #[arg(long, default_value = DEFAULT_CACHE_FILE)]
    airport_cache: PathBuf,

    /// TOML file with search settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of legs in a complete itinerary
    #[arg(long)]
    target_length: Option<usize>,

    /// Candidates explored per search step
    #[arg(long)]
    branching_cap: Option<usize>,

    /// Maximum number of starting flights
    #[arg(long)]
    seed_cap: Option<usize>,

    /// Search worker threads
    #[arg(long)]
    workers: Option<usize>,

    /// Concurrent airport lookups
    #[arg(long, default_value = "50")]
    lookup_concurrency: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Settings from the config file (or defaults), with flags applied on top.
    fn search_config(&self) -> Result<SearchConfig, AppError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => SearchConfig::default(),
        };

        if let Some(n) = self.target_length {
            config.target_length = n;
        }
        if let Some(n) = self.branching_cap {
            config.branching_cap = n;
        }
        if let Some(n) = self.seed_cap {
            config.seed_cap = n;
        }
        if let Some(n) = self.workers {
            config.worker_count = n;
        }

        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("failed to read {path}: {source}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Airports(#[from] AirportError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("search worker failed: {0}")]
    Worker(String),
}

fn load_config(path: &Path) -> Result<SearchConfig, AppError> {
    let contents = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
        path: path.display().to_string(),
        source,
    })?;
    Ok(toml::from_str(&contents)?)
}

async fn run(cli: Cli) -> Result<usize, AppError> {
    // Reject bad settings before any network or disk work
    let scheduler = SearchScheduler::new(cli.search_config()?)?;

    let airports = dataset::read_airports(&cli.input)?;
    info!(airports = airports.len(), "read airport list");

    let client = AirportClient::new(AirportClientConfig::default())?;
    let cache = CountryCache::new(&cli.airport_cache);
    let countries =
        AirportCountries::load_or_resolve(&cache, &client, &airports, cli.lookup_concurrency)
            .await?;
    info!(
        airports = airports.len(),
        known = countries.len(),
        "resolved airport countries"
    );

    let flights = dataset::read_flights(&cli.input, &countries)?;
    let catalog = Catalog::new(flights)?;

    let cancel = CancellationFlag::new();
    let scheduler = scheduler.with_cancellation(cancel.clone());
    let mut search = tokio::task::spawn_blocking(move || scheduler.analyze_routes(&catalog));

    let joined = tokio::select! {
        joined = &mut search => joined,
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupt received, finishing in-flight seeds");
            cancel.cancel();
            search.await
        }
    };
    let per_seed = joined.map_err(|e| AppError::Worker(e.to_string()))??;

    let itineraries = report::rank_itineraries(per_seed);
    report::write_itineraries(&cli.output, &itineraries)?;
    info!(
        itineraries = itineraries.len(),
        path = %cli.output.display(),
        "wrote itineraries"
    );

    print!("{}", report::format_itineraries(&itineraries));
    Ok(itineraries.len())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "planning failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
