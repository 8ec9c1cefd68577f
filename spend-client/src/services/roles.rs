use super::{ACTION_EDIT, ACTION_VIEW, Resource, RoleService, Roles};
use crate::error::ClientResult;
use crate::permission::{PermissionEditor, PermissionGrid};
use http::Method;
use shared::models::{GrantedPermission, Module, RolePermissionsUpdate};
use shared::paths;

impl RoleService {
    /// Full module catalogue with each module's actions
    pub async fn fetch_modules(&self) -> ClientResult<Vec<Module>> {
        let ctx = self.context();
        let page = ctx
            .load_page(
                &ctx.store.modules,
                paths::MODULES,
                Vec::new(),
                Some(Roles::gate(ACTION_VIEW)),
            )
            .await?;
        Ok(page.items)
    }

    /// Permissions currently granted to `role_id`
    pub async fn fetch_permissions(&self, role_id: i64) -> ClientResult<Vec<GrantedPermission>> {
        let ctx = self.context();
        let page = ctx
            .load_page(
                &ctx.store.permissions,
                &paths::role_permissions(role_id),
                Vec::new(),
                Some(Roles::gate(ACTION_VIEW)),
            )
            .await?;
        Ok(page.items)
    }

    /// Load both lists and seed a fresh editor for `role_id`
    pub async fn open_permission_editor(&self, role_id: i64) -> ClientResult<PermissionEditor> {
        let (modules, granted) =
            tokio::try_join!(self.fetch_modules(), self.fetch_permissions(role_id))?;
        let editor = PermissionEditor::open(
            PermissionGrid::from_modules(&modules),
            &PermissionGrid::from_grants(&granted),
        );
        tracing::debug!(
            role_id,
            cells = editor.grid().len(),
            checked = editor.submission_set().len(),
            "Permission editor opened"
        );
        Ok(editor)
    }

    /// Replace the role's grants with the editor's checked cells
    pub async fn update_permissions(&self, role_id: i64, editor: &PermissionEditor) -> ClientResult<()> {
        let body = RolePermissionsUpdate {
            permission_ids: editor.submission_set(),
        };
        let path = paths::role_permissions(role_id);
        let request = self.context().api.send_ack(
            Method::PUT,
            &path,
            Some(&body),
            Some(Roles::gate(ACTION_EDIT)),
        );
        self.mutate(request).await?;
        tracing::info!(role_id, count = body.permission_ids.len(), "Role permissions replaced");
        self.context()
            .notifier
            .success("Permissions updated successfully");
        Ok(())
    }
}
