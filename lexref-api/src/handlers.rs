//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use lexref_core::error::LexrefError;
use lexref_core::types::FetchOptions;

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /api/v1/references/:key
pub async fn get_reference(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Query(params): Query<CacheQuery>,
) -> Result<Json<Value>> {
    let data = state
        .proxy
        .fetch(&key, FetchOptions::from_no_cache(params.bypass()))
        .await?;
    Ok(Json(data))
}

/// GET /api/v1/proxy?url=...
pub async fn fetch_custom(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProxyQuery>,
) -> Result<Json<Value>> {
    let raw = params
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::bad_request("url query parameter is required"))?;

    let parsed = url::Url::parse(raw)
        .map_err(|e| ApiError::bad_request(format!("Invalid url '{}': {}", raw, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::bad_request(format!(
            "Unsupported url scheme '{}', expected http or https",
            parsed.scheme()
        )));
    }

    let data = state
        .proxy
        .fetch(raw, FetchOptions::from_no_cache(params.bypass()))
        .await?;
    Ok(Json(data))
}

/// GET /api/v1/cache
pub async fn cache_stats(State(state): State<Arc<AppState>>) -> Json<CacheStatsResponse> {
    let stats = state.proxy.cache_stats();
    Json(CacheStatsResponse {
        total_entries: stats.total_entries,
        valid_entries: stats.valid_entries,
        expired_entries: stats.expired_entries,
        default_ttl_seconds: state.proxy.default_ttl().as_secs(),
    })
}

/// DELETE /api/v1/cache
pub async fn clear_cache(State(state): State<Arc<AppState>>) -> Result<Json<AckResponse>> {
    state.proxy.invalidate(None)?;
    Ok(Json(AckResponse::ok("Cache cleared")))
}

/// DELETE /api/v1/cache/:key
pub async fn clear_cache_key(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<AckResponse>> {
    state.proxy.invalidate(Some(&key))?;
    Ok(Json(AckResponse::ok(format!("Cache cleared for '{}'", key))))
}

/// GET /api/v1/endpoints
pub async fn list_endpoints(State(state): State<Arc<AppState>>) -> Json<EndpointsResponse> {
    Json(EndpointsResponse {
        base_url: state.proxy.base_url().to_string(),
        endpoints: state.proxy.list_endpoints(),
    })
}

/// POST /api/v1/endpoints
pub async fn add_endpoint(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<AddEndpointRequest>, JsonRejection>,
) -> Result<Json<AckResponse>> {
    let Json(req) = payload.map_err(|rejection| {
        LexrefError::InvalidRegistration(format!(
            "expected a JSON body with key and path: {}",
            rejection.body_text()
        ))
    })?;
    let key = req.key.as_deref().map(str::trim).filter(|k| !k.is_empty());
    let path = req.path.as_deref().filter(|p| !p.trim().is_empty());

    let (key, path) = match (key, path) {
        (Some(k), Some(p)) => (k, p),
        _ => {
            return Err(LexrefError::InvalidRegistration("both key and path are required".into()).into())
        }
    };

    let previous = state.proxy.register_endpoint(key, path);
    let message = match previous {
        Some(old) => format!("Endpoint '{}' updated: {} -> {}", key, old, path),
        None => format!("Endpoint '{}' registered: {}", key, path),
    };
    info!(key, path, "Endpoint registered via API");

    Ok(Json(AckResponse::ok(message)))
}

/// GET /api/v1/upstream/health
pub async fn upstream_health(State(state): State<Arc<AppState>>) -> Json<UpstreamHealthResponse> {
    let report = state.proxy.health_report().await;
    Json(UpstreamHealthResponse {
        healthy: report.healthy,
        timestamp: report.checked_at,
        probe_url: report.probe_url,
        error: report.failure,
    })
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: state.uptime_seconds(),
    })
}
