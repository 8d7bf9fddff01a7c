//! Category listing and creation.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use promptwall_store::StoreError;

use crate::state::AppState;

use super::{bad_request, internal_error, ApiError, CategoryView, ErrorReply};

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListResponse {
    pub success: bool,
    pub data: Vec<CategoryView>,
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "All categories", body = CategoryListResponse)
    )
)]
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoryListResponse>, ErrorReply> {
    let categories = state.categories.list().map_err(internal_error)?;
    Ok(Json(CategoryListResponse {
        success: true,
        data: categories.iter().map(CategoryView::from).collect(),
    }))
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub color: Option<String>,
    pub icon: Option<String>,
}

fn default_color() -> String {
    "#3b82f6".to_string()
}

fn default_icon() -> String {
    "sparkles".to_string()
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub success: bool,
    pub data: CategoryView,
}

#[utoipa::path(
    post,
    path = "/categories",
    tag = "Categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 409, description = "Name already taken", body = ApiError)
    )
)]
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ErrorReply> {
    if input.name.trim().is_empty() {
        return Err(bad_request("name is required"));
    }

    let created = state.categories.create(
        input.name.trim(),
        &input.description,
        &input.color.unwrap_or_else(default_color),
        &input.icon.unwrap_or_else(default_icon),
    );
    match created {
        Ok(category) => Ok((
            StatusCode::CREATED,
            Json(CategoryResponse {
                success: true,
                data: CategoryView::from(&category),
            }),
        )),
        Err(StoreError::Conflict(what)) => Err((
            StatusCode::CONFLICT,
            Json(ApiError {
                success: false,
                error: format!("{} already exists", what),
            }),
        )),
        Err(e) => Err(internal_error(e)),
    }
}
