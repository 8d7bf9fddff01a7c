//! OpenAPI documentation aggregator.
//!
//! Collects all `#[utoipa::path]`-annotated handlers and `ToSchema`
//! types into one spec, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Prompt Wall API",
        version = "0.1.0",
        description = "Rotating creative-prompt wall: cyclic prompt rotation, schedule drift auditing, and prompt CRUD.",
    ),
    tags(
        (name = "Health", description = "Server status"),
        (name = "Prompts", description = "Current rotation selection, prompt CRUD, and history"),
        (name = "Scheduler", description = "Rotation start/stop and status"),
        (name = "Admin", description = "Schedule drift timeline and reconfiguration"),
        (name = "Categories", description = "Prompt category CRUD"),
    ),
    paths(
        crate::api::health::health,
        crate::api::prompts::current_prompt,
        crate::api::prompts::list_prompts,
        crate::api::prompts::create_prompt,
        crate::api::prompts::get_prompt,
        crate::api::prompts::update_prompt,
        crate::api::prompts::delete_prompt,
        crate::api::prompts::prompt_history,
        crate::api::scheduler::scheduler_status,
        crate::api::scheduler::scheduler_control,
        crate::api::admin::scheduling_report,
        crate::api::admin::update_scheduling,
        crate::api::admin::reschedule_prompt,
        crate::api::categories::list_categories,
        crate::api::categories::create_category,
    ),
    components(schemas(
        crate::api::ApiError,
        crate::api::CategoryView,
        crate::api::PromptView,
        crate::api::SchedulingConfigView,
        crate::api::health::HealthResponse,
        crate::api::prompts::CurrentPromptResponse,
        crate::api::prompts::CurrentPromptData,
        crate::api::prompts::PromptListResponse,
        crate::api::prompts::PromptResponse,
        crate::api::prompts::CreatePromptRequest,
        crate::api::prompts::UpdatePromptRequest,
        crate::api::prompts::HistoryResponse,
        crate::api::scheduler::SchedulerStatus,
        crate::api::scheduler::SchedulerStatusResponse,
        crate::api::scheduler::SchedulerControlRequest,
        crate::api::admin::TimelineEntry,
        crate::api::admin::TimelineStats,
        crate::api::admin::SchedulingConfiguration,
        crate::api::admin::SchedulingReportData,
        crate::api::admin::SchedulingReportResponse,
        crate::api::admin::UpdateSchedulingRequest,
        crate::api::admin::UpdateSchedulingData,
        crate::api::admin::UpdateSchedulingResponse,
        crate::api::admin::ReschedulePromptRequest,
        crate::api::admin::ReschedulePromptData,
        crate::api::admin::ReschedulePromptResponse,
        crate::api::categories::CategoryListResponse,
        crate::api::categories::CreateCategoryRequest,
        crate::api::categories::CategoryResponse,
    ))
)]
pub struct ApiDoc;
