//! Handler for application metadata at `/info`.
//!
//! `ENVIRONMENT` and `HOSTNAME` are read on every request through the state's
//! environment provider, so a value changed under a running process shows up
//! without a restart. The version is fixed at startup.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use super::format_timestamp;
use crate::config::{AppConfig, DEFAULT_ENVIRONMENT, DEFAULT_HOSTNAME, ENDPOINTS};
use crate::env::{EnvProvider, ENV_ENVIRONMENT, ENV_HOSTNAME};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub application: String,
    pub version: String,
    pub environment: String,
    pub hostname: String,
    pub timestamp: String,
    pub endpoints: [&'static str; 3],
}

impl InfoResponse {
    pub fn build(config: &AppConfig, env: &dyn EnvProvider, now: DateTime<Utc>) -> Self {
        Self {
            application: config.app.name.clone(),
            version: config.app.version.clone(),
            environment: env.var_or(ENV_ENVIRONMENT, DEFAULT_ENVIRONMENT),
            hostname: env.var_or(ENV_HOSTNAME, DEFAULT_HOSTNAME),
            timestamp: format_timestamp(now),
            endpoints: ENDPOINTS,
        }
    }
}

/// Application info handler.
#[instrument(name = "info::info", skip(state))]
pub async fn info(State(state): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse::build(&state.config, &*state.env, Utc::now()))
}
