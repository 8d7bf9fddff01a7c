//! Scheduler status and start/stop control.
//!
//! Start/stop toggles the persisted `isActive` flag only; the activation
//! job's timer keeps ticking and quiesces itself while the flag is off.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use promptwall_scheduling::SchedulingConfigPatch;

use crate::state::AppState;

use super::{bad_request, internal_error, iso, ApiError, ErrorReply};

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerStatus {
    pub is_running: bool,
    pub interval_minutes: u32,
    pub base_time: String,
    pub active_prompts: usize,
    pub activation_job_running: bool,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerStatusResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: SchedulerStatus,
}

#[utoipa::path(
    get,
    path = "/scheduler",
    tag = "Scheduler",
    responses(
        (status = 200, description = "Scheduler status", body = SchedulerStatusResponse)
    )
)]
pub async fn scheduler_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SchedulerStatusResponse>, ErrorReply> {
    let config = state.scheduling.get();
    let active = state.prompts.list_active_ordered().map_err(internal_error)?;
    Ok(Json(SchedulerStatusResponse {
        success: true,
        message: None,
        data: SchedulerStatus {
            is_running: config.is_active,
            interval_minutes: config.interval_minutes,
            base_time: iso(config.base_time),
            active_prompts: active.len(),
            activation_job_running: state.activation.is_running(),
        },
    }))
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct SchedulerControlRequest {
    /// `start` or `stop`.
    pub action: String,
}

#[utoipa::path(
    post,
    path = "/scheduler",
    tag = "Scheduler",
    request_body = SchedulerControlRequest,
    responses(
        (status = 200, description = "Scheduler toggled", body = SchedulerStatusResponse),
        (status = 400, description = "Unknown action", body = ApiError)
    )
)]
pub async fn scheduler_control(
    State(state): State<Arc<AppState>>,
    Json(input): Json<SchedulerControlRequest>,
) -> Result<Json<SchedulerStatusResponse>, ErrorReply> {
    let (is_active, message) = match input.action.as_str() {
        "start" => (true, "Scheduler started successfully"),
        "stop" => (false, "Scheduler stopped successfully"),
        other => {
            return Err(bad_request(format!(
                "Invalid action '{}'. Use \"start\" or \"stop\"",
                other
            )))
        }
    };

    let config = state
        .scheduling
        .update(SchedulingConfigPatch {
            is_active: Some(is_active),
            ..Default::default()
        })
        .map_err(internal_error)?;
    let active = state.prompts.list_active_ordered().map_err(internal_error)?;

    Ok(Json(SchedulerStatusResponse {
        success: true,
        message: Some(message.to_string()),
        data: SchedulerStatus {
            is_running: config.is_active,
            interval_minutes: config.interval_minutes,
            base_time: iso(config.base_time),
            active_prompts: active.len(),
            activation_job_running: state.activation.is_running(),
        },
    }))
}
