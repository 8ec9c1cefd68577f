//! Role Model

use super::RecordStatus;
use serde::{Deserialize, Serialize};

/// Role entity (RBAC role assigned to admins)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    /// Role key compared against route allow-lists (e.g. `super_admin`)
    pub slug: String,
    pub description: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
    /// System roles cannot be deleted
    #[serde(default)]
    pub is_system: bool,
}

/// Create role payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleCreate {
    pub name: String,
    pub description: Option<String>,
}

/// Update role payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}
