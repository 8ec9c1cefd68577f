use super::{ACTION_ADD, ACTION_EDIT, Resource, UserService, Users};
use crate::error::{ClientError, ClientResult};
use crate::forms::{Form, UserForm};
use crate::storage::keys;
use shared::models::{RecordStatus, User, UserStatusUpdate, UserVerification};
use shared::paths;

impl UserService {
    /// Create a customer and remember it for the follow-up screen
    pub async fn create_user(&self, form: &UserForm) -> ClientResult<User> {
        let payload = form.submit().map_err(ClientError::Validation)?;
        let user = self.create(&payload).await?;

        let stored = serde_json::to_string(&user)?;
        self.context()
            .api
            .session()
            .storage()
            .set(keys::NEWLY_ADDED_USER, &stored)?;
        Ok(user)
    }

    /// Customer created last in this session, if any
    pub fn newly_added_user(&self) -> Option<User> {
        let raw = self
            .context()
            .api
            .session()
            .storage()
            .get(keys::NEWLY_ADDED_USER)?;
        serde_json::from_str(&raw).ok()
    }

    pub async fn verify(&self, id: i64, verified: bool) -> ClientResult<User> {
        let body = UserVerification {
            is_verified: verified,
        };
        let path = paths::user_verification(id);
        let request = self.context().api.patch::<User, _>(
            &path,
            &body,
            Some(Users::gate(ACTION_EDIT)),
        );
        let user = self.mutate(request).await?;
        self.apply(user.clone()).await;
        let message = if verified {
            "User verified successfully"
        } else {
            "User verification revoked"
        };
        self.context().notifier.success(message);
        Ok(user)
    }

    pub async fn set_status(&self, id: i64, status: RecordStatus) -> ClientResult<User> {
        let body = UserStatusUpdate { status };
        let path = paths::user_status(id);
        let request =
            self.context()
                .api
                .patch::<User, _>(&path, &body, Some(Users::gate(ACTION_EDIT)));
        let user = self.mutate(request).await?;
        self.apply(user.clone()).await;
        self.context()
            .notifier
            .success(&format!("User marked {}", status.as_str()));
        Ok(user)
    }

    /// Whether the signed-in admin may add customers
    pub fn can_create(&self) -> bool {
        self.context()
            .api
            .session()
            .has_permission(Users::MODULE, ACTION_ADD)
    }

    async fn apply(&self, user: User) {
        Users::slice(&self.context().store).write().await.upsert(user);
    }
}
