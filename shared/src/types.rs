//! Common types for the shared crate

/// Feature area owning a set of permission actions (e.g. `user_management`)
pub type ModuleName = String;

/// Action key within a module (e.g. `view`, `add`, `edit`, `delete`)
pub type ActionType = String;

/// Numeric permission id assigned by the backend
pub type PermissionId = i64;
