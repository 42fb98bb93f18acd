mod config;
mod http;
mod metrics;
mod state;
mod tui;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use config::{ServeConfig, SessionConfig, TuiConfig};
use http::{router, HttpState};
use state::SharedState;
use std::path::PathBuf;
use tablet_core::{format_currency, open_cases, Replayer};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "tablet")]
#[command(about = "Patrol tablet: case files, incident log, citizen lookup and arrest reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct SessionArgs {
    /// Journal file to append applied events to (optional)
    #[arg(long)]
    record: Option<PathBuf>,
    /// Start on the basic dashboard (no report tools)
    #[arg(long)]
    basic: bool,
    /// Stamp timeline entries with HH:MM instead of "Now"
    #[arg(long)]
    wall_clock: bool,
}

impl From<SessionArgs> for SessionConfig {
    fn from(args: SessionArgs) -> Self {
        SessionConfig {
            record: args.record,
            basic: args.basic,
            wall_clock: args.wall_clock,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the terminal dashboard
    Tui {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Serve the JSON HTTP surface
    Serve {
        /// HTTP server address
        #[arg(long, default_value = "127.0.0.1:8080")]
        http: String,
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Replay a journal and print the resulting state
    Replay {
        /// Input journal file
        #[arg(long)]
        input: PathBuf,
        /// Replay against the basic dashboard
        #[arg(long)]
        basic: bool,
        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tui { session } => {
            // The dashboard owns stdout; only log when asked to.
            if std::env::var_os("RUST_LOG").is_some() {
                tracing_subscriber::fmt()
                    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                    .with_writer(std::io::stderr)
                    .init();
            }
            run_tui(TuiConfig {
                session: session.into(),
            })
            .await?;
        }
        Commands::Serve { http, session } => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .init();
            run_server(ServeConfig::new(&http, session.into())?).await?;
        }
        Commands::Replay { input, basic, json } => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .init();
            replay_journal(input, basic, json)?;
        }
    }

    Ok(())
}

async fn run_tui(config: TuiConfig) -> anyhow::Result<()> {
    let recorder = config.session.open_recorder()?;
    let recording_path = config
        .session
        .record
        .as_ref()
        .map(|p| p.display().to_string());
    let shared = SharedState::new(
        config.session.initial_state(),
        config.session.stamper(),
        recorder,
    );

    tui::run_tui(tui::TuiApp::new(recording_path), shared).await
}

async fn run_server(config: ServeConfig) -> anyhow::Result<()> {
    info!("Starting patrol tablet server");

    let prometheus = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus metrics recorder")?;

    let recorder = config.session.open_recorder()?;
    if let Some(rec) = &recorder {
        info!("Recording events to {}", rec.path().display());
    }
    let shared = SharedState::new(
        config.session.initial_state(),
        config.session.stamper(),
        recorder,
    );
    info!("Capability: {:?}", shared.capability().await);

    let app = router(HttpState::new(shared, Some(prometheus)))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(config.http)
        .await
        .with_context(|| format!("Failed to bind {}", config.http))?;
    info!("HTTP server listening on http://{}", config.http);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutting down");
            }
        })
        .await
        .context("HTTP server failed")?;

    Ok(())
}

fn replay_journal(input: PathBuf, basic: bool, json: bool) -> anyhow::Result<()> {
    info!("Replaying journal: {:?}", input);

    let replayer = Replayer::from_path(&input)
        .with_context(|| format!("Failed to read journal {}", input.display()))?;
    let events = replayer.len();
    if replayer.is_empty() {
        warn!("Journal {} contains no events", input.display());
    }
    let session = SessionConfig {
        basic,
        ..Default::default()
    };
    let state = replayer.run(session.initial_state());

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    println!("Replayed {} events ({:?})", events, state.capability());
    println!("Open cases: {}", open_cases(state.cases()).len());
    if let Some(report) = state.report() {
        let totals = report.totals();
        println!(
            "Report draft: {} charges, {} / {} min",
            report.charges.len(),
            format_currency(totals.fine),
            totals.time
        );
    }
    println!("Timeline:");
    for entry in state.timeline().iter() {
        println!("  {} {}: {}", entry.time, entry.label, entry.description);
    }

    Ok(())
}
