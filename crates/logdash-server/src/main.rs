//! logdash API server binary.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use logdash_core::{FileLogStore, MemoryLogStore, SharedLogStore, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use logdash_server::{Environment, LogDashServer, ServerConfig, DEFAULT_PORT};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Serve integration logs over HTTP.
#[derive(Parser, Debug)]
#[command(name = "logdash-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Port to listen on, on all interfaces.
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Full bind address. Takes precedence over --port.
    #[arg(long, env = "LOGDASH_BIND")]
    bind: Option<SocketAddr>,

    /// Deployment environment (development or production).
    #[arg(long, env = "NODE_ENV", default_value = "production")]
    environment: Environment,

    /// Allowed CORS origins, comma separated. Any origin when empty.
    #[arg(long, env = "LOGDASH_CORS_ORIGINS", value_delimiter = ',')]
    cors_origins: Vec<String>,

    /// HS256 secret required for bearer tokens on /logged routes.
    #[arg(long, env = "SECURED_KEY", hide_env_values = true)]
    auth_secret: Option<String>,

    /// JSON-lines file of log records to serve.
    #[arg(short, long, env = "LOGDASH_DATA")]
    data: Option<PathBuf>,

    /// Page size when a request has no limit.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// Largest page size a request may ask for.
    #[arg(long, default_value_t = MAX_PAGE_SIZE)]
    max_page_size: u32,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

/// Log output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        let bind_addr = self
            .bind
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], self.port)));

        let mut config = ServerConfig::new(bind_addr)
            .with_environment(self.environment)
            .with_page_sizes(self.page_size, self.max_page_size);
        for origin in self.cors_origins.into_iter().filter(|o| !o.trim().is_empty()) {
            config = config.with_cors_origin(origin.trim());
        }
        if let Some(secret) = self.auth_secret {
            config = config.with_auth_secret(secret);
        }
        config
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_format);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "failed to create async runtime");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let store = load_store(args.data.as_deref())?;
    let config = args.into_config();
    let addr = config.bind_addr;

    if config.auth_secret.is_none() {
        warn!("no auth secret configured, /logged routes are open");
    }

    let server = LogDashServer::new(config, store).context("invalid server configuration")?;
    server
        .serve_with_shutdown(addr, shutdown_signal())
        .await
        .context("server error")
}

fn load_store(path: Option<&Path>) -> anyhow::Result<SharedLogStore> {
    match path {
        Some(path) => {
            let store = FileLogStore::open(path)
                .with_context(|| format!("failed to load log records from {}", path.display()))?;
            Ok(Arc::new(store))
        }
        None => {
            warn!("no data file given, serving an empty store");
            Ok(Arc::new(MemoryLogStore::new()))
        }
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received ctrl-c, shutting down"),
        Err(e) => {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    }
}
