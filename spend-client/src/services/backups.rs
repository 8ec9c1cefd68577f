use super::{ACTION_ADD, ACTION_VIEW, ServiceContext};
use crate::api::ActionGate;
use crate::error::ClientResult;
use crate::store::RequestKind;
use shared::models::Backup;
use shared::{ListQuery, Page, paths};

const MODULE: &str = "backups";

/// Database backup listing and on-demand backups
#[derive(Debug, Clone)]
pub struct BackupService {
    ctx: ServiceContext,
}

impl BackupService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub async fn list(&self, query: &ListQuery) -> ClientResult<Page<Backup>> {
        self.ctx
            .load_page(
                &self.ctx.store.backups,
                paths::BACKUPS,
                query.to_pairs(),
                Some(ActionGate::new(MODULE, ACTION_VIEW)),
            )
            .await
    }

    /// Start a backup now
    pub async fn create(&self) -> ClientResult<Backup> {
        let ticket = self.ctx.store.backups.write().await.begin(RequestKind::Mutation);
        let result: ClientResult<Backup> = self
            .ctx
            .api
            .post(
                paths::BACKUPS,
                &serde_json::json!({}),
                Some(ActionGate::new(MODULE, ACTION_ADD)),
            )
            .await;

        let mut slice = self.ctx.store.backups.write().await;
        slice.finish(ticket);
        match result {
            Ok(backup) => {
                slice.upsert(backup.clone());
                self.ctx.notifier.success("Backup created successfully");
                Ok(backup)
            }
            Err(e) => {
                self.ctx.report(&e);
                Err(e)
            }
        }
    }
}
