//! Console composition root
//!
//! Wires configuration, transport, storage, session, store and notifier
//! together and hands out the services.

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::guard::{RouteDecision, RouteGuard};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::notify::{LogNotifier, Notifier};
use crate::services::{
    AccountService, AdminService, AuthService, BackupService, CmsService, CompanyService,
    CrudService, DropdownService, FeedbackService, LogService, ProfileService, RoleService,
    ServiceContext, UserService,
};
use crate::session::{Session, SessionEvent};
use crate::storage::{FileStorage, MemoryStorage, Preferences, Storage};
use crate::store::Store;
use shared::ListQuery;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

const STORAGE_AREA: &str = "local-storage";

pub struct Console {
    config: ClientConfig,
    ctx: ServiceContext,
    guard: RouteGuard,
}

impl Console {
    /// Production wiring: reqwest transport, file or memory storage,
    /// notices to the log
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let transport = ReqwestTransport::new(&config.base_url, Duration::from_secs(config.timeout))?;
        let storage: Arc<dyn Storage> = match &config.storage_dir {
            Some(dir) => Arc::new(FileStorage::open(dir, STORAGE_AREA)?),
            None => Arc::new(MemoryStorage::new()),
        };
        Ok(Self::with_parts(
            config,
            Arc::new(transport),
            storage,
            Arc::new(LogNotifier),
        ))
    }

    /// Wire explicit parts; the session is restored from `storage`
    pub fn with_parts(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let session = Arc::new(Session::restore(
            storage,
            &config.secure_storage_key,
            config.login_url.clone(),
        ));
        let api = ApiClient::new(transport, session, config.success_code);
        let ctx = ServiceContext::new(api, Arc::new(Store::new()), notifier);
        tracing::info!(base_url = %config.base_url, "Console initialized");
        Self {
            config,
            ctx,
            guard: RouteGuard::default_routes(),
        }
    }

    /// Replace the route table
    pub fn with_guard(mut self, guard: RouteGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<Session> {
        self.ctx.api.session()
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.ctx.store
    }

    pub fn api(&self) -> &ApiClient {
        &self.ctx.api
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    /// Decide a navigation for the current session
    pub fn navigate(&self, route: &str) -> RouteDecision {
        self.guard.check(self.session(), route)
    }

    /// First page with the configured page size
    pub fn default_query(&self) -> ListQuery {
        ListQuery::new(1, self.config.page_size)
    }

    pub fn preferences(&self) -> Preferences {
        Preferences::load(self.session().storage().as_ref())
    }

    pub fn save_preferences(&self, preferences: &Preferences) -> ClientResult<()> {
        preferences.save(self.session().storage().as_ref())?;
        Ok(())
    }

    /// Clear cached entities whenever the session ends
    pub fn spawn_logout_watcher(&self) -> JoinHandle<()> {
        let mut events = self.session().subscribe();
        let store = self.ctx.store.clone();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(SessionEvent::LoggedOut { reason, .. }) => {
                        tracing::debug!(reason = ?reason, "Clearing store after logout");
                        store.reset().await;
                    }
                    Ok(SessionEvent::LoggedIn { .. }) => {}
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Session events lagged");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.ctx.clone())
    }

    pub fn profile(&self) -> ProfileService {
        ProfileService::new(self.ctx.clone())
    }

    pub fn users(&self) -> UserService {
        CrudService::new(self.ctx.clone())
    }

    pub fn admins(&self) -> AdminService {
        CrudService::new(self.ctx.clone())
    }

    pub fn companies(&self) -> CompanyService {
        CrudService::new(self.ctx.clone())
    }

    pub fn accounts(&self) -> AccountService {
        CrudService::new(self.ctx.clone())
    }

    pub fn roles(&self) -> RoleService {
        CrudService::new(self.ctx.clone())
    }

    pub fn cms(&self) -> CmsService {
        CrudService::new(self.ctx.clone())
    }

    pub fn logs(&self) -> LogService {
        LogService::new(self.ctx.clone())
    }

    pub fn dropdowns(&self) -> DropdownService {
        DropdownService::new(self.ctx.clone())
    }

    pub fn feedback(&self) -> FeedbackService {
        FeedbackService::new(self.ctx.clone())
    }

    pub fn backups(&self) -> BackupService {
        BackupService::new(self.ctx.clone())
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("base_url", &self.config.base_url)
            .field("session", self.session())
            .finish()
    }
}
