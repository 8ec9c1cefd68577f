// Shared fixtures for the integration tests

#![allow(dead_code)]

use shared::models::GrantedPermission;
use spend_client::{
    ClientConfig, Console, LoginResponse, MemoryStorage, RecordingNotifier, ScriptedTransport,
    Storage, UserInfo,
};
use std::sync::Arc;

pub struct Harness {
    pub console: Console,
    pub transport: Arc<ScriptedTransport>,
    pub notifier: Arc<RecordingNotifier>,
    pub storage: Arc<MemoryStorage>,
}

pub fn harness() -> Harness {
    let transport = Arc::new(ScriptedTransport::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let storage = Arc::new(MemoryStorage::new());
    let console = Console::with_parts(
        ClientConfig::new("http://smartspend.test/api"),
        transport.clone(),
        storage.clone(),
        notifier.clone(),
    );
    Harness {
        console,
        transport,
        notifier,
        storage,
    }
}

/// Grants as `(id, module, action)`
pub fn grants(list: &[(i64, &str, &str)]) -> Vec<GrantedPermission> {
    list.iter()
        .map(|(id, module, action)| GrantedPermission {
            id: *id,
            module: module.to_string(),
            action: action.to_string(),
        })
        .collect()
}

pub fn login_response(permissions: Vec<GrantedPermission>) -> LoginResponse {
    LoginResponse {
        token: "token-abc".to_string(),
        user: UserInfo {
            id: 1,
            name: "Avery Stone".to_string(),
            email: "avery@smartspend.test".to_string(),
            role: "super_admin".to_string(),
            permissions,
        },
    }
}

/// Harness with a signed-in super admin holding `permissions`
pub fn signed_in(permissions: &[(i64, &str, &str)]) -> Harness {
    let h = harness();
    h.console
        .session()
        .login(&login_response(grants(permissions)))
        .unwrap();
    h
}

pub fn stored(storage: &MemoryStorage, key: &str) -> Option<String> {
    storage.get(key)
}
