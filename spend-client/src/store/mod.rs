//! Client-side resource cache
//!
//! One [`Slice`] per resource, each behind its own async lock so a slow
//! list fetch on one screen never blocks another.

mod slice;

pub use slice::{Identified, Paging, RequestKind, RequestTicket, Slice};

use shared::models::{
    Account, Admin, ApiLog, Backup, CmsPage, Company, Country, Currency, Driver, Feedback,
    GrantedPermission, Module, Role, State, SystemLog, User,
};
use tokio::sync::RwLock;

macro_rules! identified {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> i64 {
                self.id
            }
        })*
    };
}

identified!(
    User,
    Admin,
    Company,
    Account,
    Role,
    Module,
    GrantedPermission,
    CmsPage,
    ApiLog,
    SystemLog,
    Feedback,
    Backup,
);

/// Dropdown option lists
#[derive(Debug, Clone, Default)]
pub struct CommonLists {
    pub countries: Vec<Country>,
    /// States of the last requested country
    pub states: Vec<State>,
    pub currencies: Vec<Currency>,
    pub drivers: Vec<Driver>,
}

#[derive(Debug, Default)]
pub struct Store {
    pub users: RwLock<Slice<User>>,
    pub admins: RwLock<Slice<Admin>>,
    pub companies: RwLock<Slice<Company>>,
    pub accounts: RwLock<Slice<Account>>,
    pub modules: RwLock<Slice<Module>>,
    pub roles: RwLock<Slice<Role>>,
    /// Grants of the role being edited
    pub permissions: RwLock<Slice<GrantedPermission>>,
    pub cms: RwLock<Slice<CmsPage>>,
    pub api_logs: RwLock<Slice<ApiLog>>,
    pub system_logs: RwLock<Slice<SystemLog>>,
    pub feedback: RwLock<Slice<Feedback>>,
    pub backups: RwLock<Slice<Backup>>,
    pub common: RwLock<CommonLists>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every cached entity, on logout
    pub async fn reset(&self) {
        self.users.write().await.clear();
        self.admins.write().await.clear();
        self.companies.write().await.clear();
        self.accounts.write().await.clear();
        self.modules.write().await.clear();
        self.roles.write().await.clear();
        self.permissions.write().await.clear();
        self.cms.write().await.clear();
        self.api_logs.write().await.clear();
        self.system_logs.write().await.clear();
        self.feedback.write().await.clear();
        self.backups.write().await.clear();
        *self.common.write().await = CommonLists::default();
    }
}
