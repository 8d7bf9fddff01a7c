//! HTTP router construction.
//!
//! Assembles all Axum routes, middleware, and OpenAPI docs into a
//! single `Router`.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::api;
use crate::state::AppState;

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/health", get(api::health::health))
        .route("/prompts/current", get(api::prompts::current_prompt))
        .route("/prompts/history", get(api::prompts::prompt_history))
        .route(
            "/prompts",
            get(api::prompts::list_prompts).post(api::prompts::create_prompt),
        )
        .route(
            "/prompts/{id}",
            get(api::prompts::get_prompt)
                .put(api::prompts::update_prompt)
                .delete(api::prompts::delete_prompt),
        )
        .route(
            "/scheduler",
            get(api::scheduler::scheduler_status).post(api::scheduler::scheduler_control),
        )
        .route(
            "/admin/scheduling",
            get(api::admin::scheduling_report)
                .post(api::admin::update_scheduling)
                .put(api::admin::reschedule_prompt),
        )
        .route(
            "/categories",
            get(api::categories::list_categories).post(api::categories::create_category),
        )
        .layer(cors)
        .with_state(state)
        .merge(Scalar::with_url("/docs", api::doc::ApiDoc::openapi()))
}

fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new().allow_origin(value),
        Err(_) => {
            tracing::warn!("Invalid CORS_ORIGIN '{}', allowing any origin", origin);
            CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
        }
    }
}
