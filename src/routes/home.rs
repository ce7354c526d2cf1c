//! Handler for the greeting at `/`.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use super::format_timestamp;
use crate::config::AppConfig;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub message: String,
    pub version: String,
    pub timestamp: String,
}

impl HomeResponse {
    pub fn build(config: &AppConfig, now: DateTime<Utc>) -> Self {
        Self {
            message: config.app.greeting.clone(),
            version: config.app.version.clone(),
            timestamp: format_timestamp(now),
        }
    }
}

/// Greeting handler.
#[instrument(name = "home::index", skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<HomeResponse> {
    Json(HomeResponse::build(&state.config, Utc::now()))
}
