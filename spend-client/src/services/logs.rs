use super::{ACTION_VIEW, ServiceContext};
use crate::api::ActionGate;
use crate::error::ClientResult;
use shared::models::{ApiLog, SystemLog};
use shared::{ListQuery, Page, paths};

const VIEW_LOGS: ActionGate = ActionGate::new("logs", ACTION_VIEW);

/// Read-only API and system log listings
#[derive(Debug, Clone)]
pub struct LogService {
    ctx: ServiceContext,
}

impl LogService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub async fn api_logs(&self, query: &ListQuery) -> ClientResult<Page<ApiLog>> {
        self.ctx
            .load_page(
                &self.ctx.store.api_logs,
                paths::API_LOGS,
                query.to_pairs(),
                Some(VIEW_LOGS),
            )
            .await
    }

    pub async fn system_logs(&self, query: &ListQuery) -> ClientResult<Page<SystemLog>> {
        self.ctx
            .load_page(
                &self.ctx.store.system_logs,
                paths::SYSTEM_LOGS,
                query.to_pairs(),
                Some(VIEW_LOGS),
            )
            .await
    }
}
