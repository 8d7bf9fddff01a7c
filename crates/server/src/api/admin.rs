//! Admin scheduling endpoints: the drift timeline, reconfiguration, and
//! per-prompt rescheduling.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use promptwall_scheduling::{next_available_slot, schedule_report, SchedulingConfigPatch};

use crate::state::AppState;

use super::{
    bad_request, internal_error, iso, not_found, parse_timestamp, ApiError, CategoryView, ErrorReply,
    SchedulingConfigView,
};

// ── Timeline report ───────────────────────────────────────────────

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: CategoryView,
    pub scheduled_for: String,
    pub expected_schedule_time: String,
    pub actual_schedule_time: String,
    pub is_on_schedule: bool,
    pub is_active: bool,
    pub submission_count: u64,
    pub created_by: String,
    pub position: usize,
    pub status: String,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineStats {
    pub total_prompts: usize,
    pub active_prompts: usize,
    pub completed_prompts: usize,
    pub upcoming_prompts: usize,
    pub on_schedule_prompts: usize,
    pub current_interval: u32,
    pub next_available_slot: String,
    pub base_time: String,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingConfiguration {
    pub interval_minutes: u32,
    pub base_time: String,
    pub current_time: String,
    pub is_active: bool,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingReportData {
    pub scheduling_timeline: Vec<TimelineEntry>,
    pub stats: TimelineStats,
    pub configuration: SchedulingConfiguration,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingReportResponse {
    pub success: bool,
    pub data: SchedulingReportData,
}

/// Expected-vs-actual slot audit over every prompt. Read-only: drift is
/// reported, never corrected here.
#[utoipa::path(
    get,
    path = "/admin/scheduling",
    tag = "Admin",
    responses(
        (status = 200, description = "Schedule drift report", body = SchedulingReportResponse)
    )
)]
pub async fn scheduling_report(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SchedulingReportResponse>, ErrorReply> {
    let now = Utc::now();
    let config = state.scheduling.get();
    let prompts = state.prompts.list_ordered().map_err(internal_error)?;
    let report = schedule_report(&prompts, &config, now);

    // The report rows are in prompt order, so zip them back together to
    // enrich each row with display fields.
    let scheduling_timeline: Vec<TimelineEntry> = prompts
        .iter()
        .zip(report.timeline.iter())
        .map(|(prompt, record)| TimelineEntry {
            id: prompt.id.to_string(),
            title: prompt.title.clone(),
            description: prompt.description.clone(),
            category: CategoryView::from(&prompt.category),
            scheduled_for: iso(prompt.scheduled_for),
            expected_schedule_time: iso(record.expected_schedule_time),
            actual_schedule_time: iso(record.actual_schedule_time),
            is_on_schedule: record.is_on_schedule,
            is_active: record.is_active,
            submission_count: record.submission_count,
            created_by: prompt.created_by.clone(),
            position: record.position,
            status: match record.status {
                promptwall_scheduling::SlotStatus::Completed => "completed".to_string(),
                promptwall_scheduling::SlotStatus::Upcoming => "upcoming".to_string(),
            },
        })
        .collect();

    Ok(Json(SchedulingReportResponse {
        success: true,
        data: SchedulingReportData {
            scheduling_timeline,
            stats: TimelineStats {
                total_prompts: report.stats.total_prompts,
                active_prompts: report.stats.active_prompts,
                completed_prompts: report.stats.completed_prompts,
                upcoming_prompts: report.stats.upcoming_prompts,
                on_schedule_prompts: report.stats.on_schedule_prompts,
                current_interval: report.stats.current_interval,
                next_available_slot: iso(report.stats.next_available_slot),
                base_time: iso(report.stats.base_time),
            },
            configuration: SchedulingConfiguration {
                interval_minutes: config.interval_minutes,
                base_time: iso(config.base_time),
                current_time: iso(now),
                is_active: config.is_active,
            },
        },
    }))
}

// ── Reconfiguration ───────────────────────────────────────────────

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSchedulingRequest {
    /// `updateInterval` or `autoScheduleNew`.
    pub action: String,
    pub interval_minutes: Option<u32>,
    /// RFC 3339; defaults to now for `updateInterval`.
    pub base_time: Option<String>,
    /// Rewrite every prompt's slot onto the new linear layout.
    #[serde(default)]
    pub reschedule_all: bool,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSchedulingData {
    pub interval_minutes: u32,
    pub base_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rescheduled_prompts: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_available_slot: Option<String>,
    pub config: SchedulingConfigView,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSchedulingResponse {
    pub success: bool,
    pub message: String,
    pub data: UpdateSchedulingData,
}

/// Reconfigure the rotation. `updateInterval` persists the new interval
/// and base time and activates scheduling; with `rescheduleAll` every
/// prompt's slot is rewritten onto the new layout, activation flags
/// untouched. `autoScheduleNew` answers where the next prompt would land.
#[utoipa::path(
    post,
    path = "/admin/scheduling",
    tag = "Admin",
    request_body = UpdateSchedulingRequest,
    responses(
        (status = 200, description = "Configuration updated", body = UpdateSchedulingResponse),
        (status = 400, description = "Unknown action or missing fields", body = ApiError)
    )
)]
pub async fn update_scheduling(
    State(state): State<Arc<AppState>>,
    Json(input): Json<UpdateSchedulingRequest>,
) -> Result<Json<UpdateSchedulingResponse>, ErrorReply> {
    match input.action.as_str() {
        "updateInterval" => {
            let interval_minutes = input
                .interval_minutes
                .ok_or_else(|| bad_request("intervalMinutes is required for updateInterval"))?;
            if interval_minutes == 0 {
                return Err(bad_request("intervalMinutes must be at least 1"));
            }
            let base_time = match &input.base_time {
                Some(raw) => parse_timestamp(raw)?,
                None => Utc::now(),
            };

            let config = state
                .scheduling
                .update(SchedulingConfigPatch {
                    interval_minutes: Some(interval_minutes),
                    base_time: Some(base_time),
                    is_active: Some(true),
                })
                .map_err(internal_error)?;

            let rescheduled = if input.reschedule_all {
                Some(
                    state
                        .prompts
                        .reschedule_all(base_time, interval_minutes)
                        .map_err(internal_error)?,
                )
            } else {
                None
            };

            let message = match rescheduled {
                Some(n) => format!(
                    "Updated interval to {} minutes and rescheduled {} prompts",
                    interval_minutes, n
                ),
                None => format!("Updated interval to {} minutes", interval_minutes),
            };

            Ok(Json(UpdateSchedulingResponse {
                success: true,
                message,
                data: UpdateSchedulingData {
                    interval_minutes,
                    base_time: iso(base_time),
                    rescheduled_prompts: rescheduled,
                    next_available_slot: None,
                    config: SchedulingConfigView::from(&config),
                },
            }))
        }
        "autoScheduleNew" => {
            let config = state.scheduling.get();
            let last = state.prompts.last_scheduled().map_err(internal_error)?;
            let slot = next_available_slot(last, &config, Utc::now());
            Ok(Json(UpdateSchedulingResponse {
                success: true,
                message: "Next available slot computed".to_string(),
                data: UpdateSchedulingData {
                    interval_minutes: config.interval_minutes,
                    base_time: iso(config.base_time),
                    rescheduled_prompts: None,
                    next_available_slot: Some(iso(slot)),
                    config: SchedulingConfigView::from(&config),
                },
            }))
        }
        other => Err(bad_request(format!("Invalid action '{}'", other))),
    }
}

// ── Per-prompt reschedule ─────────────────────────────────────────

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReschedulePromptRequest {
    pub prompt_id: Option<String>,
    pub new_schedule_time: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReschedulePromptData {
    pub id: String,
    pub title: String,
    pub scheduled_for: String,
    pub category: String,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReschedulePromptResponse {
    pub success: bool,
    pub message: String,
    pub data: ReschedulePromptData,
}

/// Move a single prompt to a new slot.
#[utoipa::path(
    put,
    path = "/admin/scheduling",
    tag = "Admin",
    request_body = ReschedulePromptRequest,
    responses(
        (status = 200, description = "Prompt rescheduled", body = ReschedulePromptResponse),
        (status = 400, description = "Missing fields", body = ApiError),
        (status = 404, description = "Unknown prompt", body = ApiError)
    )
)]
pub async fn reschedule_prompt(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ReschedulePromptRequest>,
) -> Result<Json<ReschedulePromptResponse>, ErrorReply> {
    let (Some(prompt_id), Some(new_schedule_time)) =
        (&input.prompt_id, &input.new_schedule_time)
    else {
        return Err(bad_request("promptId and newScheduleTime are required"));
    };

    let id = Uuid::parse_str(prompt_id).map_err(|_| bad_request("promptId must be a UUID"))?;
    let new_slot = parse_timestamp(new_schedule_time)?;

    let mut prompt = state
        .prompts
        .get(id)
        .map_err(internal_error)?
        .ok_or_else(|| not_found(format!("Prompt {} not found", id)))?;
    prompt.scheduled_for = new_slot;
    let stored = state.prompts.update(prompt).map_err(internal_error)?;

    Ok(Json(ReschedulePromptResponse {
        success: true,
        message: format!("Rescheduled \"{}\" to {}", stored.title, iso(new_slot)),
        data: ReschedulePromptData {
            id: stored.id.to_string(),
            title: stored.title.clone(),
            scheduled_for: iso(stored.scheduled_for),
            category: stored.category.name.clone(),
        },
    }))
}
