//! Beacon: a minimal informational HTTP service.
//!
//! This is the application entry point. It initializes tracing, loads the
//! configuration (optional TOML file plus environment), builds the Axum router
//! with the greeting, health and info routes, and serves it until a shutdown
//! signal arrives.

mod config;
mod env;
mod error;
mod http;
mod middleware;
mod routes;
mod state;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{AppConfig, LoggingConfig, DEFAULT_LOG_FILTER};
use env::ProcessEnv;
use routes::create_router;
use state::AppState;

/// Beacon: greeting, health and info endpoints for deployment smoke tests
#[derive(Parser, Debug)]
#[command(name = "beacon", version, about)]
struct Args {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "beacon=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

fn init_tracing(log_filter: &str, logging: &LoggingConfig) {
    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(log_filter));

    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration before tracing so the log format is known
    let config = AppConfig::load(args.config.as_deref(), &ProcessEnv)?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&log_filter, &config.logging);

    tracing::info!(
        config_file = args.config.as_deref().unwrap_or("<none>"),
        version = %config.app.version,
        application = %config.app.name,
        host = %config.http.host,
        port = config.http.port,
        log_format = %config.logging.format,
        "Loaded configuration"
    );

    let listener = match http::bind_listener(&config.http) {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start server");
            return Err(e.into());
        }
    };

    let state = AppState::new(config, ProcessEnv);
    let app = create_router(state);

    http::start_server(app, listener).await?;

    Ok(())
}
