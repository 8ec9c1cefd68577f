use super::ServiceContext;
use crate::error::{ClientError, ClientResult};
use crate::forms::{ChangePasswordForm, ForgotPasswordForm, Form, LoginForm, ResetPasswordForm};
use http::Method;
use shared::models::{LoginResponse, UserInfo};
use shared::paths;

/// Sign-in, sign-out and password flows
#[derive(Debug, Clone)]
pub struct AuthService {
    ctx: ServiceContext,
}

impl AuthService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub async fn sign_in(&self, form: &LoginForm) -> ClientResult<UserInfo> {
        let payload = form.submit().map_err(ClientError::Validation)?;
        let response: LoginResponse = self
            .ctx
            .api
            .post(paths::SIGN_IN, &payload, None)
            .await
            .inspect_err(|e| self.ctx.report(e))?;

        self.ctx.api.session().login(&response)?;
        self.ctx.notifier.success("Signed in successfully");
        Ok(response.user)
    }

    /// End the session locally; the server call is best effort
    pub async fn sign_out(&self) {
        if let Err(e) = self
            .ctx
            .api
            .send_ack::<()>(Method::POST, paths::SIGN_OUT, None, None)
            .await
        {
            tracing::debug!(error = %e, "Sign-out call failed, clearing session anyway");
        }
        self.ctx.api.session().sign_out();
        self.ctx.store.reset().await;
    }

    pub async fn forgot_password(&self, form: &ForgotPasswordForm) -> ClientResult<()> {
        let payload = form.submit().map_err(ClientError::Validation)?;
        self.ack(paths::FORGOT_PASSWORD, &payload).await?;
        self.ctx
            .notifier
            .success("Password reset link sent to your email");
        Ok(())
    }

    pub async fn reset_password(&self, form: &ResetPasswordForm) -> ClientResult<()> {
        let payload = form.submit().map_err(ClientError::Validation)?;
        self.ack(paths::RESET_PASSWORD, &payload).await?;
        self.ctx.notifier.success("Password reset successfully");
        Ok(())
    }

    pub async fn change_password(&self, form: &ChangePasswordForm) -> ClientResult<()> {
        let payload = form.submit().map_err(ClientError::Validation)?;
        self.ack(paths::CHANGE_PASSWORD, &payload).await?;
        self.ctx.notifier.success("Password changed successfully");
        Ok(())
    }

    async fn ack<B: serde::Serialize>(&self, path: &str, body: &B) -> ClientResult<()> {
        self.ctx
            .api
            .send_ack(Method::POST, path, Some(body), None)
            .await
            .inspect_err(|e| self.ctx.report(e))
    }
}
