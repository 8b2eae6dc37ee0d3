use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use shared::error::ProxyError;
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use api::{UpstreamClient, UvQuery};
use app_state::AppState;
use config::load_settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    if settings.openuv_api_key.is_none() {
        warn!("OPENUV_API_KEY is not set; upstream requests will be unauthenticated");
    }
    let upstream = UpstreamClient::new(&settings)?;
    let app = build_router(Arc::new(AppState { upstream }));

    let addr: SocketAddr = settings
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.bind_addr))?;
    info!(%addr, upstream = %settings.openuv_base_url, "uv proxy listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/uv", get(http_get_uv))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_get_uv(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UvQuery>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<ProxyError>)> {
    let point = query.point().map_err(|err| {
        debug!(?query, %err, "rejected uv query");
        (StatusCode::BAD_REQUEST, Json(ProxyError::from(err)))
    })?;

    match state.upstream.fetch_uv(point).await {
        Ok((status, body)) => {
            info!(%point, status = status.as_u16(), "relayed upstream uv response");
            Ok((status, Json(body)))
        }
        Err(err) => {
            error!(%point, error = %err, "upstream uv request failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ProxyError::with_details(
                    "Failed to fetch UV data",
                    err.to_string(),
                )),
            ))
        }
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
