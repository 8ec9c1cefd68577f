use super::ServiceContext;
use crate::error::{ClientError, ClientResult};
use crate::forms::{Form, ProfileForm};
use shared::models::{DashboardStats, Profile, User};
use shared::{ListQuery, Page, paths};

/// Dashboard counters and the signed-in admin's own profile
#[derive(Debug, Clone)]
pub struct ProfileService {
    ctx: ServiceContext,
}

impl ProfileService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub async fn dashboard(&self) -> ClientResult<DashboardStats> {
        self.ctx
            .api
            .get(paths::DASHBOARD, Vec::new(), None)
            .await
            .inspect_err(|e| self.ctx.report(e))
    }

    /// Latest customers shown on the dashboard
    pub async fn customers(&self, query: &ListQuery) -> ClientResult<Page<User>> {
        self.ctx
            .api
            .get_page(paths::CUSTOMERS, query.to_pairs(), None)
            .await
            .inspect_err(|e| self.ctx.report(e))
    }

    pub async fn profile(&self) -> ClientResult<Profile> {
        self.ctx
            .api
            .get(paths::PROFILE, Vec::new(), None)
            .await
            .inspect_err(|e| self.ctx.report(e))
    }

    /// Save the profile and refresh the cached admin name and email
    pub async fn update_profile(&self, form: &ProfileForm) -> ClientResult<Profile> {
        let payload = form.submit().map_err(ClientError::Validation)?;
        let profile: Profile = self
            .ctx
            .api
            .put(paths::PROFILE, &payload, None)
            .await
            .inspect_err(|e| self.ctx.report(e))?;

        let session = self.ctx.api.session();
        if let Some(mut user) = session.user() {
            user.name = profile.name.clone();
            user.email = profile.email.clone();
            session.update_user(user)?;
        }
        self.ctx.notifier.success("Profile updated successfully");
        Ok(profile)
    }
}
