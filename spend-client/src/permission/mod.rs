//! Role permission matrix
//!
//! A role's permissions are edited as a module × action checkbox grid.
//! [`PermissionGrid`] is the full catalogue the backend exposes;
//! [`PermissionEditor`] holds the checkbox state for one role and turns it
//! back into the replace-all set of permission ids.

mod editor;
mod grid;

pub use editor::{CheckboxState, PermissionEditor, SelectAllState};
pub use grid::PermissionGrid;
