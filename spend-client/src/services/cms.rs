use super::{ACTION_DELETE, CmsPages, CmsService, Resource};
use crate::cms::{CmsForm, VersionDeleter};
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use shared::models::CmsPage;
use shared::paths;

impl CmsService {
    /// Delete one persisted version row immediately
    pub async fn delete_version(&self, page_id: i64, version_id: i64) -> ClientResult<()> {
        let path = paths::cms_version(page_id, version_id);
        let request = self
            .context()
            .api
            .delete(&path, Some(CmsPages::gate(ACTION_DELETE)));
        self.mutate(request).await?;
        self.context()
            .notifier
            .success("Version deleted successfully");
        Ok(())
    }

    /// Deleter bound to one page, for [`crate::cms::VersionHistoryEditor::confirm_remove`]
    pub fn version_deleter(&self, page_id: i64) -> CmsVersionDeleter {
        CmsVersionDeleter {
            service: self.clone(),
            page_id,
        }
    }

    /// Validate and create (`id == None`) or update a page
    pub async fn save(&self, id: Option<i64>, form: &CmsForm) -> ClientResult<CmsPage> {
        let payload = form.submit().map_err(ClientError::from)?;
        match id {
            Some(id) => self.update(id, &payload).await,
            None => self.create(&payload).await,
        }
    }
}

/// Version row deleter backed by the CMS endpoint
#[derive(Debug, Clone)]
pub struct CmsVersionDeleter {
    service: CmsService,
    page_id: i64,
}

#[async_trait]
impl VersionDeleter for CmsVersionDeleter {
    async fn delete_version(&self, version_id: i64) -> ClientResult<()> {
        self.service.delete_version(self.page_id, version_id).await
    }
}
