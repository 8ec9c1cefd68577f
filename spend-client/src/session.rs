//! Session state and the forced-logout latch
//!
//! The bearer token lives in plain storage; the signed-in admin, role and
//! username live in secure storage. Any 401 ends the session through
//! [`Session::force_logout`], which performs the logout exactly once no
//! matter how many in-flight requests fail together. The latch re-arms
//! only on the next successful sign-in.

use crate::storage::{SecureStorage, Storage, StorageError, keys};
use shared::models::{LoginResponse, UserInfo};
use shared::types::PermissionId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

/// Why the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    /// The admin signed out
    UserRequested,
    /// The backend rejected the token
    Unauthorized,
}

/// Session lifecycle notifications for the embedding UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn { user_id: i64 },
    LoggedOut {
        reason: LogoutReason,
        /// Hard redirect target
        redirect_to: String,
    },
}

/// Single-assignment flag guarding the logout side effect
#[derive(Debug, Default)]
pub struct LogoutLatch {
    tripped: AtomicBool,
}

impl LogoutLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` for the one caller that trips the latch
    pub fn try_trip(&self) -> bool {
        self.tripped
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped.load(Ordering::Acquire)
    }

    fn rearm(&self) {
        self.tripped.store(false, Ordering::Release);
    }
}

pub struct Session {
    storage: Arc<dyn Storage>,
    secure: SecureStorage,
    latch: LogoutLatch,
    user: RwLock<Option<UserInfo>>,
    events: broadcast::Sender<SessionEvent>,
    login_url: String,
}

impl Session {
    pub fn new(storage: Arc<dyn Storage>, secure_key: &str, login_url: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            secure: SecureStorage::new(storage.clone(), secure_key),
            storage,
            latch: LogoutLatch::new(),
            user: RwLock::new(None),
            events,
            login_url: login_url.into(),
        }
    }

    /// Rebuild the session from what storage already holds
    ///
    /// A stored user that cannot be decoded is dropped together with the
    /// rest of the session keys.
    pub fn restore(storage: Arc<dyn Storage>, secure_key: &str, login_url: impl Into<String>) -> Self {
        let session = Self::new(storage, secure_key, login_url);
        match session.secure.get_json::<UserInfo>(keys::USER) {
            Ok(Some(user)) if session.storage.get(keys::TOKEN).is_some() => {
                tracing::debug!(user_id = user.id, "Session restored from storage");
                if let Ok(mut slot) = session.user.write() {
                    *slot = Some(user);
                }
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Stored session unreadable, clearing");
                let _ = session.storage.remove_all(keys::SESSION_KEYS);
            }
        }
        session
    }

    /// Persist a successful sign-in and re-arm the logout latch
    pub fn login(&self, response: &LoginResponse) -> Result<(), StorageError> {
        self.storage.set(keys::TOKEN, &response.token)?;
        self.secure.set_json(keys::USER, &response.user)?;
        self.secure.set(keys::ROLE, &response.user.role)?;
        self.secure.set(keys::USERNAME, &response.user.name)?;

        if let Ok(mut slot) = self.user.write() {
            *slot = Some(response.user.clone());
        }
        self.latch.rearm();

        tracing::info!(user_id = response.user.id, role = %response.user.role, "Signed in");
        let _ = self.events.send(SessionEvent::LoggedIn {
            user_id: response.user.id,
        });
        Ok(())
    }

    /// Replace the cached admin record (after a profile update)
    pub fn update_user(&self, user: UserInfo) -> Result<(), StorageError> {
        self.secure.set_json(keys::USER, &user)?;
        self.secure.set(keys::USERNAME, &user.name)?;
        if let Ok(mut slot) = self.user.write() {
            *slot = Some(user);
        }
        Ok(())
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(keys::TOKEN)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.user.read().ok()?.clone()
    }

    /// Role string from secure storage
    pub fn role(&self) -> Option<String> {
        self.secure.get(keys::ROLE).ok().flatten()
    }

    pub fn username(&self) -> Option<String> {
        self.secure.get(keys::USERNAME).ok().flatten()
    }

    /// Permission id the signed-in admin holds for `module.action`
    pub fn permission_id(&self, module: &str, action: &str) -> Option<PermissionId> {
        let guard = self.user.read().ok()?;
        guard
            .as_ref()?
            .permissions
            .iter()
            .find(|p| p.module == module && p.action == action)
            .map(|p| p.id)
    }

    pub fn has_permission(&self, module: &str, action: &str) -> bool {
        self.permission_id(module, action).is_some()
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Plain storage area (preferences, `newlyAddedUser`)
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// End the session after a 401
    ///
    /// Only the first caller since the last sign-in clears storage and
    /// emits [`SessionEvent::LoggedOut`]; the rest return `false`.
    pub fn force_logout(&self) -> bool {
        if !self.latch.try_trip() {
            tracing::debug!("Logout already in progress, skipping");
            return false;
        }
        tracing::warn!("Session rejected by server, logging out");
        self.clear(LogoutReason::Unauthorized);
        true
    }

    /// End the session on the admin's request
    pub fn sign_out(&self) {
        if self.latch.try_trip() {
            self.clear(LogoutReason::UserRequested);
        }
    }

    pub fn is_logging_out(&self) -> bool {
        self.latch.is_tripped()
    }

    fn clear(&self, reason: LogoutReason) {
        if let Err(e) = self.storage.remove_all(keys::SESSION_KEYS) {
            tracing::error!(error = %e, "Failed to clear session storage");
        }
        if let Ok(mut slot) = self.user.write() {
            *slot = None;
        }
        let _ = self.events.send(SessionEvent::LoggedOut {
            reason,
            redirect_to: self.login_url.clone(),
        });
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .field("logging_out", &self.is_logging_out())
            .field("login_url", &self.login_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use shared::models::GrantedPermission;

    fn login_response() -> LoginResponse {
        LoginResponse {
            token: "tok-1".to_string(),
            user: UserInfo {
                id: 7,
                name: "Dana".to_string(),
                email: "dana@smartspend.test".to_string(),
                role: "admin".to_string(),
                permissions: vec![GrantedPermission {
                    id: 11,
                    module: "user_management".to_string(),
                    action: "view".to_string(),
                }],
            },
        }
    }

    fn session() -> (Arc<MemoryStorage>, Session) {
        let storage = Arc::new(MemoryStorage::new());
        let session = Session::new(storage.clone(), "key", "/login");
        (storage, session)
    }

    #[test]
    fn test_login_persists() {
        let (storage, session) = session();
        session.login(&login_response()).unwrap();

        assert_eq!(storage.get(keys::TOKEN).as_deref(), Some("tok-1"));
        assert_ne!(storage.get(keys::ROLE).as_deref(), Some("admin"));
        assert_eq!(session.role().as_deref(), Some("admin"));
        assert_eq!(session.username().as_deref(), Some("Dana"));
        assert_eq!(session.permission_id("user_management", "view"), Some(11));
        assert!(!session.has_permission("user_management", "delete"));
    }

    #[test]
    fn test_force_logout_once() {
        let (storage, session) = session();
        session.login(&login_response()).unwrap();
        storage.set(keys::DARK_MODE, "true").unwrap();
        let mut rx = session.subscribe();

        assert!(session.force_logout());
        assert!(!session.force_logout());
        assert!(!session.force_logout());

        assert!(storage.get(keys::TOKEN).is_none());
        assert!(storage.get(keys::USER).is_none());
        assert_eq!(storage.get(keys::DARK_MODE).as_deref(), Some("true"));
        assert!(session.user().is_none());

        assert_eq!(
            rx.try_recv().unwrap(),
            SessionEvent::LoggedOut {
                reason: LogoutReason::Unauthorized,
                redirect_to: "/login".to_string()
            }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_latch_rearms_on_login() {
        let (_, session) = session();
        session.login(&login_response()).unwrap();
        assert!(session.force_logout());
        assert!(session.is_logging_out());

        session.login(&login_response()).unwrap();
        assert!(!session.is_logging_out());
        assert!(session.force_logout());
    }

    #[test]
    fn test_restore() {
        let (storage, session) = session();
        session.login(&login_response()).unwrap();

        let restored = Session::restore(storage, "key", "/login");
        assert!(restored.is_authenticated());
        assert_eq!(restored.user().map(|u| u.id), Some(7));
        assert_eq!(restored.permission_id("user_management", "view"), Some(11));
    }

    #[test]
    fn test_restore_with_wrong_key_clears() {
        let (storage, session) = session();
        session.login(&login_response()).unwrap();

        let restored = Session::restore(storage.clone(), "other", "/login");
        assert!(restored.user().is_none());
        assert!(storage.get(keys::TOKEN).is_none());
    }
}
