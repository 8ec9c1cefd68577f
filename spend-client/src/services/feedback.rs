use super::{ACTION_VIEW, ServiceContext};
use crate::api::ActionGate;
use crate::error::ClientResult;
use shared::models::Feedback;
use shared::{ListQuery, Page, paths};

/// Customer feedback listing
#[derive(Debug, Clone)]
pub struct FeedbackService {
    ctx: ServiceContext,
}

impl FeedbackService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub async fn list(&self, query: &ListQuery) -> ClientResult<Page<Feedback>> {
        self.ctx
            .load_page(
                &self.ctx.store.feedback,
                paths::FEEDBACK,
                query.to_pairs(),
                Some(ActionGate::new("feedback", ACTION_VIEW)),
            )
            .await
    }
}
