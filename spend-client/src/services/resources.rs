use super::Resource;
use crate::store::{Slice, Store};
use shared::models::{
    Account, AccountUpsert, Admin, AdminCreate, AdminUpdate, CmsPage, CmsPageUpsert, Company,
    CompanyUpsert, Role, RoleCreate, RoleUpdate, User, UserCreate, UserUpdate,
};
use shared::paths;
use tokio::sync::RwLock;

macro_rules! resource {
    ($name:ident, $item:ty, $create:ty, $update:ty, $path:expr, $module:expr, $label:expr, $field:ident) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl Resource for $name {
            type Item = $item;
            type Create = $create;
            type Update = $update;

            const PATH: &'static str = $path;
            const MODULE: &'static str = $module;
            const LABEL: &'static str = $label;

            fn slice(store: &Store) -> &RwLock<Slice<$item>> {
                &store.$field
            }
        }
    };
}

resource!(Users, User, UserCreate, UserUpdate, paths::USERS, "users", "User", users);
resource!(Admins, Admin, AdminCreate, AdminUpdate, paths::ADMINS, "admins", "Admin", admins);
resource!(Companies, Company, CompanyUpsert, CompanyUpsert, paths::COMPANIES, "companies", "Company", companies);
resource!(Accounts, Account, AccountUpsert, AccountUpsert, paths::ACCOUNTS, "accounts", "Account", accounts);
resource!(Roles, Role, RoleCreate, RoleUpdate, paths::ROLES, "roles", "Role", roles);
resource!(CmsPages, CmsPage, CmsPageUpsert, CmsPageUpsert, paths::CMS, "cms", "Page", cms);
