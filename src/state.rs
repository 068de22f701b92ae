use std::sync::Arc;
use crate::config::AppConfig;
use crate::database::EstimationStore;
use crate::jira::IssueTracker;

/// Shared, read-only per-process state handed to every handler
pub struct AppState {
    pub config: AppConfig,
    pub tracker: Arc<dyn IssueTracker>,
    pub store: Arc<dyn EstimationStore>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        tracker: Arc<dyn IssueTracker>,
        store: Arc<dyn EstimationStore>,
    ) -> Self {
        Self {
            config,
            tracker,
            store,
        }
    }
}
