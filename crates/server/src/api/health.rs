//! Server health endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

use super::{internal_error, ErrorReply};

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub total_prompts: usize,
    pub scheduling_active: bool,
    pub activation_job_running: bool,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server status", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, ErrorReply> {
    let prompts = state.prompts.list_ordered().map_err(internal_error)?;
    let config = state.scheduling.get();
    Ok(Json(HealthResponse {
        status: "ok",
        version: "0.1.0",
        total_prompts: prompts.len(),
        scheduling_active: config.is_active,
        activation_job_running: state.activation.is_running(),
    }))
}
