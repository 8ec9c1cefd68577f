//! Resource services
//!
//! Every screen follows the same loop: fetch, validate, submit, notify.
//! [`CrudService`] implements it once for any [`Resource`]; the per-resource
//! modules add the endpoints that do not fit the pattern.

mod auth;
mod backups;
mod cms;
mod dropdown;
mod feedback;
mod logs;
mod profile;
mod resources;
mod roles;
mod users;

pub use auth::AuthService;
pub use backups::BackupService;
pub use cms::CmsVersionDeleter;
pub use dropdown::DropdownService;
pub use feedback::FeedbackService;
pub use logs::LogService;
pub use profile::ProfileService;
pub use resources::{Accounts, Admins, CmsPages, Companies, Roles, Users};

use crate::api::{ActionGate, ApiClient};
use crate::error::{ClientError, ClientResult, ErrorKind};
use crate::forms::Form;
use crate::notify::Notifier;
use crate::store::{Identified, RequestKind, Slice, Store};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::{ListQuery, Page};
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const ACTION_VIEW: &str = "view";
pub const ACTION_ADD: &str = "add";
pub const ACTION_EDIT: &str = "edit";
pub const ACTION_DELETE: &str = "delete";

pub type UserService = CrudService<Users>;
pub type AdminService = CrudService<Admins>;
pub type CompanyService = CrudService<Companies>;
pub type AccountService = CrudService<Accounts>;
pub type RoleService = CrudService<Roles>;
pub type CmsService = CrudService<CmsPages>;

/// What every service needs
#[derive(Clone)]
pub struct ServiceContext {
    pub api: ApiClient,
    pub store: Arc<Store>,
    pub notifier: Arc<dyn Notifier>,
}

impl ServiceContext {
    pub fn new(api: ApiClient, store: Arc<Store>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            store,
            notifier,
        }
    }

    /// Toast server errors; unauthorized and validation failures are
    /// handled by the redirect and the form respectively
    pub fn report(&self, err: &ClientError) {
        if err.kind() == ErrorKind::Server {
            self.notifier.error(&err.toast_message());
        }
    }

    /// Fetch a page into `slice` under the list fence
    pub(crate) async fn load_page<T: DeserializeOwned + Clone>(
        &self,
        slice: &RwLock<Slice<T>>,
        path: &str,
        query: Vec<(String, String)>,
        gate: Option<ActionGate>,
    ) -> ClientResult<Page<T>> {
        let ticket = slice.write().await.begin(RequestKind::List);
        let result = self.api.get_page::<T>(path, query, gate).await;

        let mut slice = slice.write().await;
        match result {
            Ok(page) => {
                slice.finish_list(ticket, page.clone());
                Ok(page)
            }
            Err(e) => {
                if slice.fail(ticket, e.toast_message()) {
                    self.report(&e);
                }
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

/// A REST collection with list / detail / create / update / delete
pub trait Resource: Send + Sync + 'static {
    type Item: DeserializeOwned + Identified + Clone + Send + Sync;
    type Create: Serialize + Send + Sync;
    type Update: Serialize + Send + Sync;

    /// Collection path
    const PATH: &'static str;
    /// Permission module key
    const MODULE: &'static str;
    /// Human name used in notices
    const LABEL: &'static str;

    fn slice(store: &Store) -> &RwLock<Slice<Self::Item>>;

    fn gate(action: &'static str) -> ActionGate {
        ActionGate::new(Self::MODULE, action)
    }
}

/// Uniform CRUD over one resource
pub struct CrudService<R> {
    ctx: ServiceContext,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for CrudService<R> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R> std::fmt::Debug for CrudService<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrudService")
            .field("resource", &std::any::type_name::<R>())
            .finish()
    }
}

impl<R: Resource> CrudService<R> {
    pub fn new(ctx: ServiceContext) -> Self {
        Self {
            ctx,
            _resource: PhantomData,
        }
    }

    pub fn context(&self) -> &ServiceContext {
        &self.ctx
    }

    fn slice(&self) -> &RwLock<Slice<R::Item>> {
        R::slice(&self.ctx.store)
    }

    pub async fn fetch_list(&self, query: &ListQuery) -> ClientResult<Page<R::Item>> {
        self.ctx
            .load_page(self.slice(), R::PATH, query.to_pairs(), Some(R::gate(ACTION_VIEW)))
            .await
    }

    pub async fn fetch_one(&self, id: i64) -> ClientResult<R::Item> {
        let ticket = self.slice().write().await.begin(RequestKind::Item);
        let path = shared::paths::item(R::PATH, id);
        let result = self
            .ctx
            .api
            .get::<R::Item>(&path, Vec::new(), Some(R::gate(ACTION_VIEW)))
            .await;

        let mut slice = self.slice().write().await;
        match result {
            Ok(item) => {
                slice.finish_item(ticket, item.clone());
                Ok(item)
            }
            Err(e) => {
                if slice.fail(ticket, e.toast_message()) {
                    self.ctx.report(&e);
                }
                Err(e)
            }
        }
    }

    pub async fn create(&self, payload: &R::Create) -> ClientResult<R::Item> {
        let request = self
            .ctx
            .api
            .post::<R::Item, _>(R::PATH, payload, Some(R::gate(ACTION_ADD)));
        let item = self.mutate(request).await?;
        self.slice().write().await.upsert(item.clone());
        self.ctx
            .notifier
            .success(&format!("{} created successfully", R::LABEL));
        Ok(item)
    }

    /// Validate a form and create from its payload
    pub async fn create_from<F>(&self, form: &F) -> ClientResult<R::Item>
    where
        F: Form<Payload = R::Create>,
    {
        let payload = form.submit().map_err(ClientError::Validation)?;
        self.create(&payload).await
    }

    pub async fn update(&self, id: i64, payload: &R::Update) -> ClientResult<R::Item> {
        let path = shared::paths::item(R::PATH, id);
        let request = self
            .ctx
            .api
            .put::<R::Item, _>(&path, payload, Some(R::gate(ACTION_EDIT)));
        let item = self.mutate(request).await?;
        self.slice().write().await.upsert(item.clone());
        self.ctx
            .notifier
            .success(&format!("{} updated successfully", R::LABEL));
        Ok(item)
    }

    /// Validate an edit form and update `id` from its payload
    pub async fn update_from<F>(&self, id: i64, form: &F) -> ClientResult<R::Item>
    where
        F: Form<Payload = R::Update>,
    {
        let payload = form.submit().map_err(ClientError::Validation)?;
        self.update(id, &payload).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        let path = shared::paths::item(R::PATH, id);
        let request = self.ctx.api.delete(&path, Some(R::gate(ACTION_DELETE)));
        self.mutate(request).await?;
        self.slice().write().await.remove(id);
        self.ctx
            .notifier
            .success(&format!("{} deleted successfully", R::LABEL));
        Ok(())
    }

    /// Await a write under the mutation fence and report its failure
    pub(crate) async fn mutate<T>(
        &self,
        request: impl Future<Output = ClientResult<T>>,
    ) -> ClientResult<T> {
        let ticket = self.slice().write().await.begin(RequestKind::Mutation);
        let result = request.await;
        self.slice().write().await.finish(ticket);
        if let Err(e) = &result {
            self.ctx.report(e);
        }
        result
    }
}
