use crate::config::Config;
use crate::media::{MediaContextResolver, MediaRoot, PathSanitizer};
use anyhow::{Context, Result};
use axum::{
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use mediacycle_common::MediaExtensions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod pages;
pub mod routes_media;

/// Shared application context
///
/// Holds only immutable values; every request re-reads the filesystem.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub sanitizer: PathSanitizer,
    pub resolver: MediaContextResolver,
}

impl AppContext {
    /// Build the context, canonicalizing the configured media root.
    pub fn new(config: Config) -> mediacycle_common::Result<Self> {
        let root = MediaRoot::new(config.media.expanded_root())?;
        Ok(Self::with_root(config, root))
    }

    /// Build the context around an already resolved media root.
    pub fn with_root(config: Config, root: MediaRoot) -> Self {
        let extensions = MediaExtensions::default();
        Self {
            config: Arc::new(config),
            sanitizer: PathSanitizer::new(root.clone()),
            resolver: MediaContextResolver::new(root, extensions),
        }
    }

    pub fn root(&self) -> &MediaRoot {
        self.resolver.root()
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, header::RANGE]);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        .route("/", get(routes_media::index))
        .merge(routes_media::media_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Start the HTTP server
pub async fn start_server(config: Config) -> Result<()> {
    let ctx = AppContext::new(config).context("Failed to open media root")?;
    let server = &ctx.config.server;
    let addr: SocketAddr = format!("{}:{}", server.host, server.port)
        .parse()
        .context("Invalid server address")?;

    tracing::info!(
        "Serving media from {} (configured as {})",
        ctx.root().path().display(),
        ctx.config.media.root.display()
    );

    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
