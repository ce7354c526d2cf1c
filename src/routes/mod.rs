//! HTTP route handlers for the informational endpoints.
//!
//! Three fixed routes, matched by exact path. Every payload embeds the
//! current time, so responses carry `Cache-Control: no-store`. Unmatched paths
//! fall through to a JSON 404; a known path with the wrong method gets axum's
//! default 405.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod health;
pub mod home;
pub mod info;

use axum::{
    http::header::{HeaderValue, CACHE_CONTROL},
    middleware,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{CACHE_CONTROL_NO_STORE, ROUTE_HEALTH, ROUTE_HOME, ROUTE_INFO};
use crate::error::not_found;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// ISO 8601 in UTC without a zone suffix, always with microseconds.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Formats a timestamp the way every payload reports it.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.naive_utc().format(TIMESTAMP_FORMAT).to_string()
}

/// Creates the Axum router with all routes and cache headers.
pub fn create_router(state: AppState) -> Router {
    let info_routes = Router::new()
        .route(ROUTE_HOME, get(home::index))
        .route(ROUTE_HEALTH, get(health::health))
        .route(ROUTE_INFO, get(info::info))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ));

    Router::new()
        .merge(info_routes)
        .fallback(not_found)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
