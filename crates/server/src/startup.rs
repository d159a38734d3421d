use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::{runtime, BlogApi, BlogApiJsonDirectAccess};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Build the router over the JSON-file blog store described by `cfg`.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    runtime::ensure_env(&cfg.blog_api)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    let store = BlogApiJsonDirectAccess::new(cfg.blog_api.clone()).await?;
    let blog_api: Arc<dyn BlogApi> = store;
    let state = ServerState { blog_api };
    Ok(routes::build_router(state, build_cors()))
}

/// Serve the blog API for an already loaded and validated `cfg` until the
/// process receives Ctrl+C.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let addr = bind_addr(&cfg)?;
    let app = build_app(&cfg).await?;

    info!(%addr, data_path = %cfg.blog_api.data_path.display(), "starting blog server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("blog server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
