use clap::Parser;
use pollpulse_api::AppState;
use pollpulse_domain::CliOverrides;
use pollpulse_jobs::{CacheSweepJob, JobRunner};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "pollpulse")]
#[command(version)]
#[command(about = "Pollpulse - poll analytics engine with a coalescing metric cache")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Web server port
    #[arg(short = 'w', long)]
    web_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Database path
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        web_port: cli.web_port,
        bind_address: cli.bind.clone(),
        database_path: cli.database.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Pollpulse v{}", env!("CARGO_PKG_VERSION"));

    let database_url = format!("sqlite:{}", config.database.path);
    let pool = bootstrap::init_database(&database_url, config.database.max_connections).await?;

    let repos = di::Repositories::new(pool);
    let use_cases = di::UseCases::new(&repos, config.analytics.clone());

    let shutdown = CancellationToken::new();

    JobRunner::new()
        .with_cache_sweep(
            CacheSweepJob::new(Arc::clone(&repos.cache))
                .with_interval(config.analytics.sweep_interval_secs),
        )
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    let app_state = AppState {
        get_overview: use_cases.get_overview,
        get_poll_analytics: use_cases.get_poll_analytics,
        get_trends: use_cases.get_trends,
        get_popular: use_cases.get_popular,
        invalidate_poll: use_cases.invalidate_poll,
        cache: repos.cache,
    };

    let web_addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.web_port).parse()?;

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for shutdown signal");
        }
        info!("Shutdown signal received");
        signal_token.cancel();
    });

    server::start_web_server(web_addr, app_state, shutdown).await?;

    info!("Server shutdown complete");
    Ok(())
}
