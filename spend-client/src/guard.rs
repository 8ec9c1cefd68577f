//! Route access guard
//!
//! Access is a flat allow-list: a route lists the role strings that may
//! open it and the stored role must equal one of them. There is no role
//! hierarchy. A `:param` segment in a route pattern matches any single
//! path segment.

use crate::session::Session;
use std::collections::{BTreeMap, BTreeSet};

pub const ROLE_SUPER_ADMIN: &str = "super_admin";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUPPORT: &str = "support";

/// Outcome of a navigation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allowed,
    /// No session: go to the login page
    RedirectToLogin(String),
    /// Signed in but the role is not on the route's list
    Forbidden,
}

#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    routes: BTreeMap<String, BTreeSet<String>>,
    public: BTreeSet<String>,
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow `roles` on `route`
    pub fn allow(mut self, route: &str, roles: &[&str]) -> Self {
        self.routes
            .entry(route.to_string())
            .or_default()
            .extend(roles.iter().map(|r| r.to_string()));
        self
    }

    /// Mark `route` as reachable without a session
    pub fn public(mut self, route: &str) -> Self {
        self.public.insert(route.to_string());
        self
    }

    /// The console's route table
    pub fn default_routes() -> Self {
        let all = [ROLE_SUPER_ADMIN, ROLE_ADMIN, ROLE_SUPPORT];
        let managers = [ROLE_SUPER_ADMIN, ROLE_ADMIN];
        Self::new()
            .public("/login")
            .public("/forgot-password")
            .public("/reset-password")
            .allow("/dashboard", &all)
            .allow("/profile", &all)
            .allow("/change-password", &all)
            .allow("/users", &all)
            .allow("/users/:id", &all)
            .allow("/companies", &managers)
            .allow("/companies/:id", &managers)
            .allow("/accounts", &managers)
            .allow("/accounts/:id", &managers)
            .allow("/feedback", &all)
            .allow("/cms", &managers)
            .allow("/cms/:id", &managers)
            .allow("/admins", &[ROLE_SUPER_ADMIN])
            .allow("/roles", &[ROLE_SUPER_ADMIN])
            .allow("/permissions", &[ROLE_SUPER_ADMIN])
            .allow("/backups", &[ROLE_SUPER_ADMIN])
            .allow("/logs/api", &[ROLE_SUPER_ADMIN])
            .allow("/logs/system", &[ROLE_SUPER_ADMIN])
    }

    pub fn is_public(&self, route: &str) -> bool {
        self.public.iter().any(|pattern| route_matches(pattern, route))
    }

    /// Whether `role` may open `route`; unknown routes are closed
    pub fn can_access(&self, role: Option<&str>, route: &str) -> bool {
        if self.is_public(route) {
            return true;
        }
        let Some(role) = role else {
            return false;
        };
        self.routes
            .iter()
            .any(|(pattern, allowed)| route_matches(pattern, route) && allowed.contains(role))
    }

    /// Decide a navigation against the current session
    pub fn check(&self, session: &Session, route: &str) -> RouteDecision {
        if self.is_public(route) {
            return RouteDecision::Allowed;
        }
        if !session.is_authenticated() {
            return RouteDecision::RedirectToLogin(session.login_url().to_string());
        }
        let role = session.role();
        if self.can_access(role.as_deref(), route) {
            RouteDecision::Allowed
        } else {
            tracing::debug!(route = %route, role = ?role, "Route denied");
            RouteDecision::Forbidden
        }
    }

    /// Routes `role` may open, for building navigation menus
    pub fn routes_for(&self, role: &str) -> Vec<&str> {
        self.routes
            .iter()
            .filter(|(_, roles)| roles.contains(role))
            .map(|(route, _)| route.as_str())
            .collect()
    }
}

/// Segment-wise match; query string and trailing slash are ignored
fn route_matches(pattern: &str, route: &str) -> bool {
    let path = route.split(['?', '#']).next().unwrap_or_default();
    let mut pattern = pattern.trim_end_matches('/').split('/');
    let mut path = path.trim_end_matches('/').split('/');
    loop {
        match (pattern.next(), path.next()) {
            (None, None) => return true,
            (Some(p), Some(s)) if p.starts_with(':') && !s.is_empty() => {}
            (Some(p), Some(s)) if p == s => {}
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use shared::models::{LoginResponse, UserInfo};
    use std::sync::Arc;

    #[test]
    fn test_exact_role_match() {
        let guard = RouteGuard::new().allow("/roles", &["super_admin"]);
        assert!(guard.can_access(Some("super_admin"), "/roles"));
        assert!(!guard.can_access(Some("admin"), "/roles"));
        assert!(!guard.can_access(Some("Super_Admin"), "/roles"));
        assert!(!guard.can_access(None, "/roles"));
    }

    #[test]
    fn test_unknown_route_is_closed() {
        let guard = RouteGuard::default_routes();
        assert!(!guard.can_access(Some(ROLE_SUPER_ADMIN), "/nowhere"));
    }

    #[test]
    fn test_no_hierarchy() {
        let guard = RouteGuard::new().allow("/cms", &[ROLE_ADMIN]);
        assert!(!guard.can_access(Some(ROLE_SUPER_ADMIN), "/cms"));
    }

    #[test]
    fn test_detail_route_matches_any_id() {
        let guard = RouteGuard::default_routes();
        assert!(guard.can_access(Some(ROLE_ADMIN), "/users/42"));
        assert!(guard.can_access(Some(ROLE_SUPPORT), "/users/42"));
        assert!(guard.can_access(Some(ROLE_ADMIN), "/cms/7"));
        assert!(!guard.can_access(Some(ROLE_SUPPORT), "/cms/7"));
        assert!(guard.can_access(Some(ROLE_ADMIN), "/users/42?tab=devices"));
    }

    #[test]
    fn test_detail_route_segment_count() {
        let guard = RouteGuard::default_routes();
        assert!(!guard.can_access(Some(ROLE_SUPER_ADMIN), "/users/42/extra"));
        assert!(!guard.can_access(Some(ROLE_SUPER_ADMIN), "/users//"));
        assert!(!guard.can_access(Some(ROLE_SUPER_ADMIN), "/logs"));
        assert!(!guard.can_access(Some(ROLE_SUPER_ADMIN), "/logs/api/1"));
    }

    #[test]
    fn test_public_routes() {
        let guard = RouteGuard::default_routes();
        assert!(guard.can_access(None, "/login"));
        assert!(guard.can_access(None, "/reset-password"));
    }

    #[test]
    fn test_routes_for_support() {
        let guard = RouteGuard::default_routes();
        let routes = guard.routes_for(ROLE_SUPPORT);
        assert!(routes.contains(&"/users"));
        assert!(!routes.contains(&"/roles"));
        assert!(!routes.contains(&"/login"));
    }

    #[test]
    fn test_check_against_session() {
        let session = Session::new(Arc::new(MemoryStorage::new()), "k", "/login");
        let guard = RouteGuard::default_routes();
        assert_eq!(
            guard.check(&session, "/dashboard"),
            RouteDecision::RedirectToLogin("/login".to_string())
        );

        session
            .login(&LoginResponse {
                token: "t".to_string(),
                user: UserInfo {
                    id: 1,
                    name: "Sam".to_string(),
                    email: "sam@smartspend.test".to_string(),
                    role: ROLE_SUPPORT.to_string(),
                    permissions: vec![],
                },
            })
            .unwrap();
        assert_eq!(guard.check(&session, "/dashboard"), RouteDecision::Allowed);
        assert_eq!(guard.check(&session, "/admins"), RouteDecision::Forbidden);
        assert_eq!(guard.check(&session, "/users/42"), RouteDecision::Allowed);
        assert_eq!(guard.check(&session, "/cms/7"), RouteDecision::Forbidden);
    }
}
