//! stocktake - offline-tolerant stock counting for multi-venue restaurants

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use application::{CountSession, FallbackPolicy, LoadOutcome, Notifier};
use clap::{Parser, Subcommand};
use common::StocktakeConfig;
use console::style;
use domain::{ListQuery, VenueId};
use infrastructure::{demo_items, HttpInventoryGateway, HttpProbe, NetworkMonitor, TracingNotifier};

mod notifier;
mod render;
mod repl;

use notifier::ConsoleNotifier;

#[derive(Parser)]
#[command(name = "stocktake")]
#[command(about = "Offline-tolerant stock counting for multi-venue restaurants")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (also settable via STOCKTAKE_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Venue to count (overrides the configured venue)
    #[arg(long, global = true)]
    venue: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive counting session
    Count,
    /// Print the venue's counting list once and exit
    Items {
        /// Substring filter over name, barcode and location
        #[arg(long)]
        search: Option<String>,
        /// Exact category filter
        #[arg(long)]
        category: Option<String>,
    },
    /// Show the built-in demo dataset without touching the network
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = StocktakeConfig::load(cli.config.as_deref())?;
    common::init_logging(&config.log_filter, config.log_json)?;

    match cli.command {
        Commands::Demo => {
            let items = demo_items();
            let refs: Vec<_> = items.iter().collect();
            println!("{}", style("Demo counting session").bold());
            render::print_items(&refs);
            Ok(())
        }
        Commands::Items { search, category } => {
            // One-shot run: notifications go to the log, not the terminal
            let notifier = Arc::new(TracingNotifier);
            let mut session = build_session(&config, cli.venue.as_deref(), notifier)?;
            load_or_bail(&mut session).await?;

            let mut query = ListQuery::new();
            if let Some(text) = search {
                query = query.with_text(text);
            }
            if let Some(category) = category {
                query = query.with_category(category);
            }
            render::print_items(&session.filter_and_sort(&query));
            Ok(())
        }
        Commands::Count => {
            let session = build_session(&config, cli.venue.as_deref(), Arc::new(ConsoleNotifier))?;
            let probe = HttpProbe::new(&config.api_base_url, config.http_timeout())?;
            let monitor = NetworkMonitor::start(Arc::new(probe), config.probe_interval());
            repl::run(session, monitor).await
        }
    }
}

fn resolve_venue(flag: Option<&str>, config: &StocktakeConfig) -> Result<VenueId> {
    let raw = flag
        .map(str::to_string)
        .or_else(|| config.venue_id.clone())
        .ok_or_else(|| anyhow!("No venue selected: pass --venue or set venue_id in the config"))?;
    Ok(VenueId::new(raw)?)
}

fn build_session(
    config: &StocktakeConfig,
    venue_flag: Option<&str>,
    notifier: Arc<dyn Notifier>,
) -> Result<CountSession> {
    let venue = resolve_venue(venue_flag, config)?;
    let gateway = HttpInventoryGateway::new(&config.api_base_url, config.http_timeout())?;
    let fallback = if config.fallback_to_demo {
        FallbackPolicy::DemoDataset(demo_items())
    } else {
        FallbackPolicy::FailClosed
    };
    Ok(CountSession::new(
        venue,
        Arc::new(gateway),
        notifier,
        fallback,
    ))
}

async fn load_or_bail(session: &mut CountSession) -> Result<()> {
    match session.load().await {
        LoadOutcome::Fresh { .. } => Ok(()),
        LoadOutcome::Degraded { error, .. } => {
            println!(
                "{} {}",
                style("offline:").yellow().bold(),
                style(format!("showing demo data ({error})")).yellow()
            );
            Ok(())
        }
        LoadOutcome::Failed(error) => Err(anyhow!(error)),
    }
}
