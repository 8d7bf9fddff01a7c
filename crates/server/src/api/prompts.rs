//! Prompt endpoints: the rotating current prompt, CRUD, and history.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use promptwall_core::Prompt;
use promptwall_scheduling::{activation_window, rotation_window};

use crate::state::AppState;

use super::{
    bad_request, internal_error, iso, not_found, parse_timestamp, ApiError, ErrorReply, PromptView,
    SchedulingConfigView,
};

// ── Current prompt ────────────────────────────────────────────────

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentPromptData {
    pub prompt: PromptView,
    pub prompt_index: i64,
    pub total_prompts: usize,
    pub current_interval_start: String,
    pub current_interval_end: String,
    pub scheduling_config: SchedulingConfigView,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentPromptResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<CurrentPromptData>,
}

impl CurrentPromptResponse {
    fn unavailable(message: &str) -> Self {
        Self {
            success: false,
            message: Some(message.to_string()),
            data: None,
        }
    }
}

/// The prompt live right now, selected by cyclic rotation over the
/// active prompt list. "Scheduling disabled" and "no prompts" are valid
/// states, not errors.
#[utoipa::path(
    get,
    path = "/prompts/current",
    tag = "Prompts",
    responses(
        (status = 200, description = "Current rotation selection, or a reason none is live", body = CurrentPromptResponse)
    )
)]
pub async fn current_prompt(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CurrentPromptResponse>, ErrorReply> {
    let config = state.scheduling.get();
    if !config.is_active {
        return Ok(Json(CurrentPromptResponse::unavailable(
            "Prompt scheduling is not active. An admin must configure and activate scheduling.",
        )));
    }

    let prompts = state.prompts.list_active_ordered().map_err(internal_error)?;
    if prompts.is_empty() {
        return Ok(Json(CurrentPromptResponse::unavailable(
            "No active prompts found. An admin must create and schedule prompts.",
        )));
    }

    let window = rotation_window(
        Utc::now(),
        config.base_time,
        config.interval_minutes,
        prompts.len(),
    );
    let Some(slot) = window.slot() else {
        return Ok(Json(CurrentPromptResponse::unavailable(
            "No current prompt available",
        )));
    };

    Ok(Json(CurrentPromptResponse {
        success: true,
        message: None,
        data: Some(CurrentPromptData {
            prompt: PromptView::from(&prompts[slot]),
            prompt_index: window.index,
            total_prompts: prompts.len(),
            current_interval_start: iso(window.interval_start),
            current_interval_end: iso(window.interval_end),
            scheduling_config: SchedulingConfigView::from(&config),
        }),
    }))
}

// ── CRUD ──────────────────────────────────────────────────────────

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromptListResponse {
    pub success: bool,
    pub data: Vec<PromptView>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromptResponse {
    pub success: bool,
    pub data: PromptView,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListPromptsParams {
    /// Restrict to prompts with this activation state.
    pub is_active: Option<bool>,
}

/// List prompts, newest slot first.
#[utoipa::path(
    get,
    path = "/prompts",
    tag = "Prompts",
    params(ListPromptsParams),
    responses(
        (status = 200, description = "All prompts", body = PromptListResponse)
    )
)]
pub async fn list_prompts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListPromptsParams>,
) -> Result<Json<PromptListResponse>, ErrorReply> {
    let mut prompts = state.prompts.list_ordered().map_err(internal_error)?;
    if let Some(is_active) = params.is_active {
        prompts.retain(|p| p.is_active == is_active);
    }
    prompts.reverse();
    Ok(Json(PromptListResponse {
        success: true,
        data: prompts.iter().map(PromptView::from).collect(),
    }))
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePromptRequest {
    pub title: String,
    pub description: String,
    pub category_id: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// RFC 3339 slot. Omitted: the prompt takes the next free slot.
    pub scheduled_for: Option<String>,
    pub created_by: Option<String>,
}

/// Create a prompt. Without an explicit slot it is appended after the
/// last scheduled prompt at the configured spacing.
#[utoipa::path(
    post,
    path = "/prompts",
    tag = "Prompts",
    request_body = CreatePromptRequest,
    responses(
        (status = 201, description = "Prompt created", body = PromptResponse),
        (status = 400, description = "Invalid input", body = ApiError)
    )
)]
pub async fn create_prompt(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreatePromptRequest>,
) -> Result<(StatusCode, Json<PromptResponse>), ErrorReply> {
    if input.title.trim().is_empty() || input.description.trim().is_empty() {
        return Err(bad_request("title and description are required"));
    }

    let category_id = Uuid::parse_str(&input.category_id)
        .map_err(|_| bad_request("categoryId must be a UUID"))?;
    let category = state
        .categories
        .get(category_id)
        .map_err(internal_error)?
        .ok_or_else(|| bad_request(format!("Unknown category {}", category_id)))?;

    let config = state.scheduling.get();
    let scheduled_for = match &input.scheduled_for {
        Some(raw) => parse_timestamp(raw)?,
        None => match state.prompts.last_scheduled().map_err(internal_error)? {
            Some(last) => last + config.interval(),
            // Empty wall: first slot is one interval after the current minute.
            None => activation_window(Utc::now(), config.interval_minutes).1,
        },
    };

    let prompt = Prompt {
        id: Uuid::new_v4(),
        title: input.title.trim().to_string(),
        description: input.description.trim().to_string(),
        category,
        tags: input.tags,
        scheduled_for,
        is_active: false,
        created_by: input.created_by.unwrap_or_else(|| "admin".to_string()),
        submission_count: 0,
        created_at: Utc::now(),
    };
    let stored = state.prompts.insert(prompt).map_err(internal_error)?;

    Ok((
        StatusCode::CREATED,
        Json(PromptResponse {
            success: true,
            data: PromptView::from(&stored),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/prompts/{id}",
    tag = "Prompts",
    params(("id" = String, Path, description = "Prompt id")),
    responses(
        (status = 200, description = "The prompt", body = PromptResponse),
        (status = 404, description = "Unknown prompt", body = ApiError)
    )
)]
pub async fn get_prompt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<PromptResponse>, ErrorReply> {
    let prompt = state
        .prompts
        .get(id)
        .map_err(internal_error)?
        .ok_or_else(|| not_found(format!("Prompt {} not found", id)))?;
    Ok(Json(PromptResponse {
        success: true,
        data: PromptView::from(&prompt),
    }))
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePromptRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub scheduled_for: Option<String>,
    pub is_active: Option<bool>,
}

/// Merge the supplied fields onto the stored prompt.
#[utoipa::path(
    put,
    path = "/prompts/{id}",
    tag = "Prompts",
    params(("id" = String, Path, description = "Prompt id")),
    request_body = UpdatePromptRequest,
    responses(
        (status = 200, description = "Updated prompt", body = PromptResponse),
        (status = 404, description = "Unknown prompt", body = ApiError)
    )
)]
pub async fn update_prompt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdatePromptRequest>,
) -> Result<Json<PromptResponse>, ErrorReply> {
    let mut prompt = state
        .prompts
        .get(id)
        .map_err(internal_error)?
        .ok_or_else(|| not_found(format!("Prompt {} not found", id)))?;

    if let Some(title) = input.title {
        prompt.title = title;
    }
    if let Some(description) = input.description {
        prompt.description = description;
    }
    if let Some(raw) = input.category_id {
        let category_id =
            Uuid::parse_str(&raw).map_err(|_| bad_request("categoryId must be a UUID"))?;
        prompt.category = state
            .categories
            .get(category_id)
            .map_err(internal_error)?
            .ok_or_else(|| bad_request(format!("Unknown category {}", category_id)))?;
    }
    if let Some(tags) = input.tags {
        prompt.tags = tags;
    }
    if let Some(raw) = input.scheduled_for {
        prompt.scheduled_for = parse_timestamp(&raw)?;
    }
    if let Some(is_active) = input.is_active {
        prompt.is_active = is_active;
    }

    let stored = state.prompts.update(prompt).map_err(internal_error)?;
    Ok(Json(PromptResponse {
        success: true,
        data: PromptView::from(&stored),
    }))
}

#[utoipa::path(
    delete,
    path = "/prompts/{id}",
    tag = "Prompts",
    params(("id" = String, Path, description = "Prompt id")),
    responses(
        (status = 200, description = "Prompt deleted"),
        (status = 404, description = "Unknown prompt", body = ApiError)
    )
)]
pub async fn delete_prompt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ErrorReply> {
    match state.prompts.delete(id) {
        Ok(()) => Ok(Json(serde_json::json!({ "success": true }))),
        Err(promptwall_store::StoreError::NotFound(_)) => {
            Err(not_found(format!("Prompt {} not found", id)))
        }
        Err(e) => Err(internal_error(e)),
    }
}

// ── History ───────────────────────────────────────────────────────

#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct HistoryParams {
    /// 1-based page number.
    pub page: Option<usize>,
    /// Page size (default 12).
    pub limit: Option<usize>,
    /// Filter by category name.
    pub category: Option<String>,
    /// Case-insensitive title/description search.
    pub search: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub success: bool,
    pub data: Vec<PromptView>,
    pub page: usize,
    pub total: usize,
}

/// Past prompts, most recent slot first.
#[utoipa::path(
    get,
    path = "/prompts/history",
    tag = "Prompts",
    params(HistoryParams),
    responses(
        (status = 200, description = "Past prompts", body = HistoryResponse)
    )
)]
pub async fn prompt_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>, ErrorReply> {
    let now = Utc::now();
    let mut prompts = state.prompts.list_ordered().map_err(internal_error)?;
    prompts.retain(|p| p.is_past(now));
    if let Some(category) = &params.category {
        if category != "all" {
            prompts.retain(|p| p.category.name.eq_ignore_ascii_case(category));
        }
    }
    if let Some(search) = &params.search {
        let needle = search.to_lowercase();
        prompts.retain(|p| {
            p.title.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        });
    }
    prompts.reverse();

    let total = prompts.len();
    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(12).max(1);
    let window: Vec<PromptView> = prompts
        .iter()
        .skip((page - 1) * limit)
        .take(limit)
        .map(PromptView::from)
        .collect();

    Ok(Json(HistoryResponse {
        success: true,
        data: window,
        page,
        total,
    }))
}
