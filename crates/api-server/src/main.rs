use std::net::SocketAddr;

use api_server::http::{AppState, build_router};
use shared::config::{ApiConfig, load_dotenv};
use tracing::{error, info, warn};

const DEFAULT_LOG_FILTER: &str = "api_server=info,shared=info,tower_http=info";

#[tokio::main]
async fn main() {
    if let Err(err) = load_dotenv() {
        eprintln!("{err}");
        std::process::exit(1);
    }

    init_tracing();

    let config = match ApiConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            error!(error = %err, "failed to read config");
            std::process::exit(1);
        }
    };

    if !config.nasa_configured() {
        warn!("NASA_API_KEY is not set; NASA routes will answer 400 and the assistant skips NASA data");
    }
    if !config.ai_configured() {
        warn!("GEMINI_API_KEY is not set; translation is disabled and the assistant uses canned replies");
    }

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(err) => {
            error!(error = %err, "failed to build upstream clients");
            std::process::exit(1);
        }
    };
    let app = build_router(state);

    let addr: SocketAddr = match config.bind_addr.parse() {
        Ok(addr) => addr,
        Err(err) => {
            error!(bind_addr = %config.bind_addr, error = %err, "invalid API_BIND_ADDR");
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(%addr, error = %err, "failed to bind listener");
            std::process::exit(1);
        }
    };

    info!(
        "api server listening on {}",
        listener.local_addr().unwrap_or(addr)
    );
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %err, "server stopped with error");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.trim().eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to install ctrl-c handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
