use std::sync::Arc;

use promptwall_core::Config;
use promptwall_scheduling::SchedulingConfigStore;
use promptwall_store::{CategoryStore, PromptRepository};

use crate::activation::ActivationJob;

/// Shared application state, passed to handlers behind `Arc`.
pub struct AppState {
    pub config: Config,
    pub scheduling: Arc<SchedulingConfigStore>,
    pub prompts: Arc<dyn PromptRepository>,
    pub categories: CategoryStore,
    pub activation: ActivationJob,
}
