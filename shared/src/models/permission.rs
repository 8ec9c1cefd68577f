//! Permission Model
//!
//! The backend describes the permission grid as a list of modules, each
//! carrying its actions with their numeric permission ids. A role's grants
//! come back as flat `{ id, module, action }` rows.

use crate::types::{ActionType, ModuleName, PermissionId};
use serde::{Deserialize, Serialize};

/// One feature area and the actions it exposes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: i64,
    /// Display name (e.g. "User Management")
    pub name: String,
    /// Stable key (e.g. `user_management`)
    pub slug: ModuleName,
    #[serde(default)]
    pub permissions: Vec<ModuleAction>,
}

/// An action of a module with its permission id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleAction {
    pub id: PermissionId,
    pub action: ActionType,
}

/// A permission granted to a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantedPermission {
    pub id: PermissionId,
    pub module: ModuleName,
    pub action: ActionType,
}

/// Replace-all payload for a role's permissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermissionsUpdate {
    pub permission_ids: Vec<PermissionId>,
}
