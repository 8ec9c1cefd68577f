//! CMS page editing
//!
//! Release pages carry a version history instead of free text. The
//! [`VersionHistoryEditor`] tracks row-level changes for the backend:
//! new rows are `is_created`, edited persisted rows are `is_updated`, and
//! persisted rows are deleted through a separate immediate call.

mod form;
mod version_history;

pub use form::{CmsForm, CmsFormErrors};
pub use version_history::{
    PendingDelete, RemoveRequest, RowErrors, RowId, VersionDeleter, VersionField,
    VersionFields, VersionHistoryEditor, VersionRow,
};
