//! BS Options CLI
//!
//! Interactive terminal front end: pick a listed option and analyse it.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bs_options::prelude::*;

/// Black-Scholes pricing, Greeks and payoff diagrams for listed options
#[derive(Parser)]
#[command(name = "bs-options")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Ticker to start with (prompted for if omitted)
    #[arg(short, long)]
    ticker: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "bs-options.toml")]
    config: PathBuf,

    /// Draw payoff diagrams in the terminal instead of a window
    #[arg(long)]
    ascii: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "bs_options=debug,cli=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[cfg(feature = "gui")]
fn renderer(ascii: bool) -> Box<dyn PayoffRenderer> {
    if ascii {
        Box::new(AsciiRenderer::new(io::stdout()))
    } else {
        Box::new(WindowRenderer)
    }
}

#[cfg(not(feature = "gui"))]
fn renderer(_ascii: bool) -> Box<dyn PayoffRenderer> {
    Box::new(AsciiRenderer::new(io::stdout()))
}

/// FRED client, or a provider that always reports "unavailable"
fn rate_provider(config: &AppConfig) -> Box<dyn RateProvider> {
    match FredClient::new(&config.fred) {
        Ok(client) => Box::new(client),
        Err(e) => {
            tracing::warn!("{}; risk-free rate will use the fallback", e);
            Box::new(NoRates)
        }
    }
}

struct NoRates;

impl RateProvider for NoRates {
    fn latest_yield(&self, _bucket: MaturityBucket) -> Option<f64> {
        None
    }
}

fn run(cli: Cli) -> PricerResult<()> {
    let config = AppConfig::load(Some(cli.config.as_path()))?;
    tracing::debug!(
        "Fallback rate {}, FRED key configured: {}",
        config.fallback_rate,
        config.fred.api_key.is_some()
    );

    let market = YahooClient::new(&config.yahoo)?;
    let stdin = io::stdin();

    let mut session = Session::new(
        stdin.lock(),
        io::stdout(),
        Box::new(market),
        rate_provider(&config),
        renderer(cli.ascii),
    )
    .with_fallback_rate(config.fallback_rate)
    .with_ticker(cli.ticker);

    session.run()
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
