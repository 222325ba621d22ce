use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use likhni::AppState;
use likhni::config::{Config, LoggingConfig};
use likhni::services::connectivity::ConnectivityProbe;
use likhni::services::llm::OpenAICompatibleClient;

/// Likhni email and YouTube script generation backend
#[derive(Debug, Parser)]
#[command(name = "likhni", version, about)]
struct Args {
    /// Path to config.toml (defaults to conf/config.toml or ./config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;
    let _log_guard = init_logging(&config.logging)?;

    tracing::info!("Starting likhni with model {}", config.provider.model);

    let provider = OpenAICompatibleClient::new(&config.provider)
        .context("Failed to build provider client")?;
    let connectivity = ConnectivityProbe::new(&config.connectivity)
        .context("Failed to build connectivity probe")?;
    if !connectivity.is_enabled() {
        tracing::info!("Connectivity probe disabled");
    }
    let shutdown = CancellationToken::new();
    let state = Arc::new(AppState::new(Arc::new(provider), connectivity, shutdown.clone()));

    let app = likhni::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("API docs available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal(shutdown)).await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_logging(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter).with(fmt::layer());

    match &config.file {
        Some(file) => {
            let path = Path::new(file);
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let file_name = path.file_name().context("logging.file must name a file")?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::daily(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry.with(fmt::layer().with_writer(writer).with_ansi(false)).init();
            Ok(Some(guard))
        },
        None => {
            registry.init();
            Ok(None)
        },
    }
}

/// Resolve on Ctrl-C or SIGTERM and cancel every in-flight relay.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, closing active streams");
    shutdown.cancel();
}
