//! Fraud Dashboard - Main Entry Point
//!
//! Terminal dashboard over a transaction CSV: renders the rows, sends the
//! visible ones in batches to a fraud-prediction endpoint, and shows the
//! returned classifications with a status summary.
//!
//! ```text
//! ┌──────────┐   ┌────────────┐   ┌──────────────────┐   ┌──────────────┐
//! │ CSV rows │──▶│ Normalizer │──▶│ Batch Dispatcher │──▶│ /predict     │
//! └──────────┘   └────────────┘   └────────┬─────────┘   └──────────────┘
//!                                          ▼ events
//!                       ┌──────────────────────────────────┐
//!                       │ Console: Result Store → Summary  │
//!                       │          View Window → Table     │
//!                       └──────────────────────────────────┘
//! ```

mod config;
mod console;
mod logic;
pub mod constants;

use anyhow::Context;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use console::{Console, ShowTiming};
use logic::classifier::HttpClassifier;
use logic::dataset::{self, Dataset};
use logic::dispatch::BatchDispatcher;
use logic::state::DashboardState;
use logic::view::ViewWindow;

fn main() -> anyhow::Result<()> {
    // Load .env before flags so env fallbacks see it
    dotenvy::dotenv().ok();

    // Initialize logging (stderr; stdout is the dashboard)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "fraud_dashboard=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config::Config::from_env()?;

    tracing::info!("{} v{} starting...", constants::APP_NAME, constants::APP_VERSION);

    // Single-threaded: requests overlap, nothing runs in parallel
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    rt.block_on(run(config))
}

async fn run(config: config::Config) -> anyhow::Result<()> {
    // Load failures leave the table empty
    let data = match dataset::load_csv(&config.data_path) {
        Ok(data) => data,
        Err(e) => {
            tracing::error!("Error loading CSV: {}", e);
            Dataset::default()
        }
    };
    if data.is_empty() {
        tracing::warn!("No transactions loaded, the table will be empty");
    }

    let classifier = HttpClassifier::new(config.endpoint_url.clone(), config.request_timeout)
        .context("Failed to create HTTP client")?;

    let dispatcher = BatchDispatcher::new(config.batch_size);

    tracing::info!("  Endpoint: {}", classifier.endpoint_url());
    tracing::info!("  Batch size: {}", dispatcher.batch_size());
    tracing::info!("  Visible rows: {} (+{} per Show Data)", config.visible_count, config.show_more);

    let state = DashboardState::new(data, ViewWindow::new(config.visible_count, config.show_more));
    let timing = ShowTiming {
        delay: config.show_delay,
        debounce: config.debounce,
    };
    let console = Console::new(
        classifier,
        dispatcher,
        state,
        timing,
        std::io::stdout(),
    );

    if config.once {
        console.run_once().await?;
    } else {
        console.run_interactive(BufReader::new(tokio::io::stdin())).await?;
    }

    tracing::info!("Bye");
    Ok(())
}
