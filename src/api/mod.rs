//! HTTP API for the trivia game.

mod error;
mod extract;
mod handlers;
pub mod routes;
mod state;


use std::net::{IpAddr, Ipv4Addr};

use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;

pub use error::{ApiError, ErrorResponse, ServerError};
pub use state::AppState;

/// Questions per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Environment variable overriding the page size.
pub const PAGE_SIZE_ENV: &str = "TRIVIA_PAGE_SIZE";

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Log verbosity (0 = info, 1 = debug, 2+ = trace)
    pub verbosity: u8,
    /// Serve the OpenAPI UI at /docs
    pub enable_docs: bool,
    /// Questions per page for the question listing
    pub page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            verbosity: 0,
            enable_docs: false,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Defaults, with the page size taken from `TRIVIA_PAGE_SIZE` when it
    /// holds a positive integer.
    pub fn new() -> Self {
        let page_size = std::env::var(PAGE_SIZE_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self {
            page_size,
            ..Self::default()
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        if page_size > 0 {
            self.page_size = page_size;
        }
        self
    }

    pub fn with_docs(mut self, enable_docs: bool) -> Self {
        self.enable_docs = enable_docs;
        self
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }
}

/// Default log filter for a verbosity level; `RUST_LOG` takes precedence.
fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "trivia=info,tower_http=info",
        1 => "trivia=debug,tower_http=debug",
        _ => "trivia=trace,tower_http=trace,sqlx=debug",
    }
}

/// Initialize tracing subscriber with env filter
fn init_tracing(verbosity: u8) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(verbosity).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the API server with the given configuration and database
pub async fn run<D: Database>(config: Config, db: D) -> Result<(), ServerError> {
    init_tracing(config.verbosity);

    let state = AppState::new(db, config.page_size);
    let app = routes::create_router(state, config.enable_docs).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(ServerError::Serve)?;
    Ok(())
}
