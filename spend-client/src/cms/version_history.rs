use crate::error::ClientResult;
use crate::forms::FieldErrors;
use async_trait::async_trait;
use shared::models::{Platform, VersionRecord};
use std::collections::BTreeMap;
use std::fmt;

pub const VERSION_REQUIRED: &str = "Please enter a version number";
pub const PLATFORM_REQUIRED: &str = "Please select a platform";
pub const DESCRIPTION_REQUIRED: &str = "Please enter a description";

/// Row identity: local for rows added in this session, server id otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RowId {
    Temp(u32),
    Persisted(i64),
}

impl RowId {
    pub fn persisted_id(&self) -> Option<i64> {
        match self {
            Self::Persisted(id) => Some(*id),
            Self::Temp(_) => None,
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temp(n) => write!(f, "new-{}", n),
            Self::Persisted(id) => write!(f, "{}", id),
        }
    }
}

/// Editable content of a row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionFields {
    pub version: String,
    pub platform: Option<Platform>,
    pub description: String,
    pub force_update: bool,
}

/// A single field edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionField {
    Version(String),
    Platform(Option<Platform>),
    Description(String),
    ForceUpdate(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRow {
    pub id: RowId,
    pub fields: VersionFields,
    /// Server state of a persisted row
    original: Option<VersionFields>,
    pub is_created: bool,
    pub is_updated: bool,
    pub is_deleted: bool,
}

impl VersionRow {
    fn from_record(record: &VersionRecord, temp_id: u32) -> Self {
        let fields = VersionFields {
            version: record.version.clone(),
            platform: record.platform,
            description: record.description.clone(),
            force_update: record.force_update,
        };
        match record.id {
            Some(id) => Self {
                id: RowId::Persisted(id),
                original: Some(fields.clone()),
                fields,
                is_created: false,
                is_updated: false,
                is_deleted: false,
            },
            None => Self {
                id: RowId::Temp(temp_id),
                original: None,
                fields,
                is_created: true,
                is_updated: false,
                is_deleted: false,
            },
        }
    }

    fn apply(&mut self, field: VersionField) {
        match field {
            VersionField::Version(v) => self.fields.version = v,
            VersionField::Platform(p) => self.fields.platform = p,
            VersionField::Description(d) => self.fields.description = d,
            VersionField::ForceUpdate(f) => self.fields.force_update = f,
        }
        if let Some(original) = &self.original {
            self.is_updated = *original != self.fields;
        }
    }

    fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.fields.version.trim().is_empty() {
            errors.insert("version", VERSION_REQUIRED);
        }
        if self.fields.platform.is_none() {
            errors.insert("platform", PLATFORM_REQUIRED);
        }
        if self.fields.description.trim().is_empty() {
            errors.insert("description", DESCRIPTION_REQUIRED);
        }
        errors
    }

    fn to_record(&self) -> VersionRecord {
        VersionRecord {
            id: self.id.persisted_id(),
            version: self.fields.version.trim().to_string(),
            platform: self.fields.platform,
            description: self.fields.description.trim().to_string(),
            force_update: self.fields.force_update,
            is_created: self.is_created,
            is_updated: self.is_updated,
            is_deleted: self.is_deleted,
        }
    }
}

/// Per-row validation messages
pub type RowErrors = BTreeMap<RowId, FieldErrors>;

/// Outcome of asking to remove a row
#[derive(Debug, PartialEq, Eq)]
pub enum RemoveRequest {
    /// Row existed only locally and is gone
    Removed,
    /// Row is on the server; confirm or cancel
    ConfirmationRequired(PendingDelete),
}

/// A confirmation prompt for deleting a persisted row
///
/// Only the editor creates one, so a pending delete always refers to a
/// persisted row.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingDelete {
    version_id: i64,
}

impl PendingDelete {
    pub fn version_id(&self) -> i64 {
        self.version_id
    }

    pub fn row_id(&self) -> RowId {
        RowId::Persisted(self.version_id)
    }
}

/// Deletes one persisted version row on the server
#[async_trait]
pub trait VersionDeleter: Send + Sync {
    async fn delete_version(&self, version_id: i64) -> ClientResult<()>;
}

/// Row list of a release page
#[derive(Debug, Clone, Default)]
pub struct VersionHistoryEditor {
    rows: Vec<VersionRow>,
    next_temp: u32,
}

impl VersionHistoryEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the rows of a fetched page
    pub fn from_records(records: &[VersionRecord]) -> Self {
        let mut editor = Self::new();
        for record in records {
            let temp = editor.next_temp_id();
            editor.rows.push(VersionRow::from_record(record, temp));
        }
        editor
    }

    fn next_temp_id(&mut self) -> u32 {
        self.next_temp += 1;
        self.next_temp
    }

    /// Append an empty created row
    pub fn add_row(&mut self) -> RowId {
        let id = RowId::Temp(self.next_temp_id());
        self.rows.push(VersionRow {
            id,
            fields: VersionFields::default(),
            original: None,
            is_created: true,
            is_updated: false,
            is_deleted: false,
        });
        id
    }

    /// Rows that are not marked deleted
    pub fn rows(&self) -> impl Iterator<Item = &VersionRow> {
        self.rows.iter().filter(|r| !r.is_deleted)
    }

    pub fn row(&self, id: RowId) -> Option<&VersionRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rows().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether anything differs from the loaded state
    pub fn is_dirty(&self) -> bool {
        self.rows.iter().any(|r| r.is_created || r.is_updated)
    }

    /// Edit one field; returns `false` when the row does not exist
    pub fn edit_row(&mut self, id: RowId, field: VersionField) -> bool {
        match self.rows.iter_mut().find(|r| r.id == id && !r.is_deleted) {
            Some(row) => {
                row.apply(field);
                true
            }
            None => false,
        }
    }

    /// Start removing a row
    ///
    /// A created row is dropped right away. A persisted row is left as is
    /// and a [`PendingDelete`] is handed back for confirmation.
    pub fn request_remove(&mut self, id: RowId) -> Option<RemoveRequest> {
        let index = self.rows.iter().position(|r| r.id == id && !r.is_deleted)?;
        match id {
            RowId::Temp(_) => {
                self.rows.remove(index);
                Some(RemoveRequest::Removed)
            }
            RowId::Persisted(version_id) => {
                Some(RemoveRequest::ConfirmationRequired(PendingDelete { version_id }))
            }
        }
    }

    /// Dismiss the confirmation; the row stays as it was
    pub fn cancel_remove(&self, pending: PendingDelete) {
        tracing::debug!(version_id = pending.version_id, "Version delete cancelled");
    }

    /// Delete a persisted row on the server
    ///
    /// The row is hidden while the call is in flight, dropped on success and
    /// restored on failure.
    pub async fn confirm_remove(
        &mut self,
        pending: PendingDelete,
        deleter: &dyn VersionDeleter,
    ) -> ClientResult<()> {
        let id = pending.row_id();
        self.set_deleted(id, true);

        match deleter.delete_version(pending.version_id).await {
            Ok(()) => {
                self.rows.retain(|r| r.id != id);
                tracing::info!(version_id = pending.version_id, "Version row deleted");
                Ok(())
            }
            Err(e) => {
                self.set_deleted(id, false);
                tracing::warn!(version_id = pending.version_id, error = %e, "Version delete failed");
                Err(e)
            }
        }
    }

    fn set_deleted(&mut self, id: RowId, deleted: bool) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.id == id) {
            row.is_deleted = deleted;
        }
    }

    /// Check required fields of every visible row when `is_release` is on
    pub fn validate(&self, is_release: bool) -> Result<(), RowErrors> {
        if !is_release {
            return Ok(());
        }
        let errors: RowErrors = self
            .rows()
            .map(|row| (row.id, row.errors()))
            .filter(|(_, e)| !e.is_empty())
            .collect();
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Visible rows with their change flags
    pub fn payload(&self) -> Vec<VersionRecord> {
        self.rows().map(VersionRow::to_record).collect()
    }
}
