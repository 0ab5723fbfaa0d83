mod metrics;
mod server;
mod view;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use stockticker_lib::alphavantage_api::{Client, DEFAULT_BASE_URL};
use stockticker_lib::{NullStore, QuoteStore, RedisStore, StockController};
use tokio::net::TcpListener;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::server::AppState;

/// How long in-flight requests may run once shutdown has begun.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

#[derive(Parser, Debug)]
#[command(name = "stockticker")]
#[command(about = "Serve the recent closing prices of a stock symbol")]
struct Cli {
    /// IP address to listen on for HTTP requests
    #[arg(long, default_value = "0.0.0.0")]
    listen_ip: IpAddr,

    /// Port to listen on for HTTP requests
    #[arg(long, default_value_t = 8080)]
    listen_port: u16,

    /// Cache fetched series in Redis
    #[arg(long)]
    enable_cache: bool,

    #[arg(long, default_value = "127.0.0.1")]
    redis_host: String,

    #[arg(long, default_value_t = 6379)]
    redis_port: u16,

    /// Deadline in seconds shared by the cache read and write of one request
    #[arg(long, default_value_t = 15)]
    cache_timeout_secs: u64,

    /// Stock symbol to serve
    #[arg(long, env = "SYMBOL", value_parser = NonEmptyStringValueParser::new())]
    symbol: String,

    /// Number of most recent days to show
    #[arg(long = "ndays", env = "NDAYS", value_parser = clap::value_parser!(u32).range(1..))]
    num_days: u32,

    /// Alpha Vantage API key
    #[arg(long = "apikey", env = "APIKEY", hide_env_values = true)]
    api_key: String,

    /// Alpha Vantage base URL
    #[arg(long, env = "ALPHAVANTAGE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    api_base_url: String,
}

/// Maps a `LOG_LEVEL` value to a level. Accepts the logrus names as well,
/// so `warning` means warn and `fatal`/`panic` mean error.
fn parse_log_level(raw: &str) -> Option<Level> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "warning" => Some(Level::WARN),
        "fatal" | "panic" => Some(Level::ERROR),
        other => other.parse().ok(),
    }
}

fn init_tracing() {
    let mut ignored_level = None;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match std::env::var("LOG_LEVEL") {
            Ok(raw) => parse_log_level(&raw).unwrap_or_else(|| {
                ignored_level = Some(raw);
                Level::INFO
            }),
            Err(_) => Level::INFO,
        };
        let level = level.to_string().to_lowercase();
        EnvFilter::new(format!(
            "stockticker={0},stockticker_lib={0},alphavantage_api={0}",
            level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if let Some(raw) = ignored_level {
        tracing::warn!("Ignoring unknown LOG_LEVEL {:?}, using info", raw);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let store: Arc<dyn QuoteStore> = if cli.enable_cache {
        let store = RedisStore::connect(&cli.redis_host, cli.redis_port)
            .await
            .context("Could not create Redis client")?;
        tracing::info!("Caching enabled via Redis at {}", store.addr());
        Arc::new(store)
    } else {
        Arc::new(NullStore::new())
    };

    let client = Client::with_base_url(&cli.api_base_url, cli.api_key.as_str())
        .context("Could not create Alpha Vantage client")?;

    let controller = StockController::new(
        Arc::new(client),
        store.clone(),
        cli.symbol.as_str(),
        cli.num_days as usize,
    )
    .with_cache_timeout(Duration::from_secs(cli.cache_timeout_secs));

    let addr = SocketAddr::new(cli.listen_ip, cli.listen_port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Could not listen on {}", addr))?;
    tracing::info!(
        "Serving {} ({} days) on http://{}",
        cli.symbol,
        cli.num_days,
        addr
    );

    let result = server::serve(
        listener,
        server::router(AppState::new(controller)),
        shutdown_signal(),
        SHUTDOWN_GRACE,
    )
    .await;

    store.close().await;
    result.context("HTTP server failed")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for interrupt: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 7] = [
        "stockticker",
        "--symbol",
        "MSFT",
        "--ndays",
        "7",
        "--apikey",
        "KEY",
    ];

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(REQUIRED).unwrap();
        assert_eq!(cli.listen_ip, "0.0.0.0".parse::<IpAddr>().unwrap());
        assert_eq!(cli.listen_port, 8080);
        assert!(!cli.enable_cache);
        assert_eq!(cli.redis_host, "127.0.0.1");
        assert_eq!(cli.redis_port, 6379);
        assert_eq!(cli.cache_timeout_secs, 15);
        assert_eq!(cli.symbol, "MSFT");
        assert_eq!(cli.num_days, 7);
        assert_eq!(cli.api_key, "KEY");
        assert_eq!(cli.api_base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_cli_overrides() {
        let mut args = REQUIRED.to_vec();
        args.extend([
            "--listen-ip",
            "127.0.0.1",
            "--listen-port",
            "9090",
            "--enable-cache",
            "--redis-host",
            "redis",
            "--redis-port",
            "6380",
            "--cache-timeout-secs",
            "3",
        ]);
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.listen_port, 9090);
        assert!(cli.enable_cache);
        assert_eq!(cli.redis_host, "redis");
        assert_eq!(cli.redis_port, 6380);
        assert_eq!(cli.cache_timeout_secs, 3);
    }

    #[test]
    fn test_cli_rejects_zero_days() {
        let result = Cli::try_parse_from([
            "stockticker", "--symbol", "MSFT", "--ndays", "0", "--apikey", "KEY",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_non_numeric_days() {
        let result = Cli::try_parse_from([
            "stockticker", "--symbol", "MSFT", "--ndays", "seven", "--apikey", "KEY",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_empty_symbol() {
        let result = Cli::try_parse_from([
            "stockticker", "--symbol", "", "--ndays", "7", "--apikey", "KEY",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_bad_listen_ip() {
        let mut args = REQUIRED.to_vec();
        args.extend(["--listen-ip", "localhost"]);
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_log_level_standard_names() {
        assert_eq!(parse_log_level("debug"), Some(Level::DEBUG));
        assert_eq!(parse_log_level("INFO"), Some(Level::INFO));
        assert_eq!(parse_log_level(" trace "), Some(Level::TRACE));
    }

    #[test]
    fn test_parse_log_level_logrus_names() {
        assert_eq!(parse_log_level("warning"), Some(Level::WARN));
        assert_eq!(parse_log_level("Warning"), Some(Level::WARN));
        assert_eq!(parse_log_level("fatal"), Some(Level::ERROR));
        assert_eq!(parse_log_level("panic"), Some(Level::ERROR));
    }

    #[test]
    fn test_parse_log_level_rejects_unknown() {
        assert_eq!(parse_log_level("verbose"), None);
        assert_eq!(parse_log_level(""), None);
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
