//! HTTP handlers, grouped by resource.

pub mod admin;
pub mod categories;
pub mod doc;
pub mod health;
pub mod prompts;
pub mod scheduler;

use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use promptwall_core::{Category, Prompt};
use promptwall_scheduling::SchedulingConfig;

// ── Error replies ─────────────────────────────────────────────────

/// Error payload for non-2xx responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ApiError {
    pub success: bool,
    pub error: String,
}

pub(crate) type ErrorReply = (StatusCode, Json<ApiError>);

fn error_reply(status: StatusCode, error: impl Into<String>) -> ErrorReply {
    (
        status,
        Json(ApiError {
            success: false,
            error: error.into(),
        }),
    )
}

pub(crate) fn internal_error(err: impl std::fmt::Display) -> ErrorReply {
    tracing::error!("Request failed: {}", err);
    error_reply(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

pub(crate) fn bad_request(msg: impl Into<String>) -> ErrorReply {
    error_reply(StatusCode::BAD_REQUEST, msg)
}

pub(crate) fn not_found(msg: impl Into<String>) -> ErrorReply {
    error_reply(StatusCode::NOT_FOUND, msg)
}

// ── Wire helpers ──────────────────────────────────────────────────

/// Millisecond-precision RFC 3339 with a `Z` suffix, the format the
/// frontend's date handling expects.
pub(crate) fn iso(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ErrorReply> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| bad_request(format!("Invalid timestamp '{}': {}", raw, e)))
}

// ── Shared views ──────────────────────────────────────────────────

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub color: String,
    pub icon: String,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.clone(),
            description: category.description.clone(),
            color: category.color.clone(),
            icon: category.icon.clone(),
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromptView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: CategoryView,
    pub tags: Vec<String>,
    pub scheduled_for: String,
    pub is_active: bool,
    pub created_by: String,
    pub submission_count: u64,
    pub created_at: String,
}

impl From<&Prompt> for PromptView {
    fn from(prompt: &Prompt) -> Self {
        Self {
            id: prompt.id.to_string(),
            title: prompt.title.clone(),
            description: prompt.description.clone(),
            category: CategoryView::from(&prompt.category),
            tags: prompt.tags.clone(),
            scheduled_for: iso(prompt.scheduled_for),
            is_active: prompt.is_active,
            created_by: prompt.created_by.clone(),
            submission_count: prompt.submission_count,
            created_at: iso(prompt.created_at),
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingConfigView {
    pub interval_minutes: u32,
    pub base_time: String,
    pub is_active: bool,
}

impl From<&SchedulingConfig> for SchedulingConfigView {
    fn from(config: &SchedulingConfig) -> Self {
        Self {
            interval_minutes: config.interval_minutes,
            base_time: iso(config.base_time),
            is_active: config.is_active,
        }
    }
}
