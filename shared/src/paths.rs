//! REST endpoint table
//!
//! Paths are relative to the configured API base URL.

// ========== Auth ==========
pub const SIGN_IN: &str = "auth/sign-in";
pub const SIGN_OUT: &str = "auth/sign-out";
pub const FORGOT_PASSWORD: &str = "auth/forgot-password";
pub const RESET_PASSWORD: &str = "auth/reset-password";
pub const CHANGE_PASSWORD: &str = "auth/change-password";

// ========== Dashboard / profile ==========
pub const DASHBOARD: &str = "dashboard";
pub const PROFILE: &str = "profile";
pub const CUSTOMERS: &str = "customers";

// ========== Resources ==========
pub const USERS: &str = "users";
pub const ADMINS: &str = "admins";
pub const COMPANIES: &str = "companies";
pub const ACCOUNTS: &str = "accounts";
pub const ROLES: &str = "roles";
pub const MODULES: &str = "modules";
pub const PERMISSIONS: &str = "permissions";
pub const FEEDBACK: &str = "feedback";
pub const BACKUPS: &str = "backups";
pub const CMS: &str = "cms";

// ========== Logs ==========
pub const API_LOGS: &str = "logs/api";
pub const SYSTEM_LOGS: &str = "logs/system";

// ========== Dropdowns ==========
pub const COUNTRIES: &str = "common/countries";
pub const STATES: &str = "common/states";
pub const CURRENCIES: &str = "common/currencies";
pub const DRIVERS: &str = "common/drivers";

/// `{collection}/{id}`
pub fn item(collection: &str, id: i64) -> String {
    format!("{}/{}", collection, id)
}

pub fn user_verification(id: i64) -> String {
    format!("{}/{}/verify", USERS, id)
}

pub fn user_status(id: i64) -> String {
    format!("{}/{}/status", USERS, id)
}

/// Granted permissions of one role
pub fn role_permissions(role_id: i64) -> String {
    format!("{}/{}/{}", ROLES, role_id, PERMISSIONS)
}

/// One persisted row of a CMS page's version history
pub fn cms_version(page_id: i64, version_id: i64) -> String {
    format!("{}/{}/versions/{}", CMS, page_id, version_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_paths() {
        assert_eq!(item(COMPANIES, 4), "companies/4");
        assert_eq!(user_verification(9), "users/9/verify");
        assert_eq!(user_status(9), "users/9/status");
        assert_eq!(role_permissions(2), "roles/2/permissions");
        assert_eq!(cms_version(3, 11), "cms/3/versions/11");
    }
}
