use super::version_history::{RowErrors, VersionHistoryEditor};
use crate::error::ClientError;
use crate::forms::{FieldErrors, not_blank, validate_form};
use shared::models::{CmsPage, CmsPageUpsert};
use validator::Validate;

/// Page create / edit form
#[derive(Debug, Clone, Default, Validate)]
pub struct CmsForm {
    #[validate(custom(function = "not_blank", message = "Please enter a title"))]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "Please enter a slug"))]
    pub slug: String,
    /// Release pages carry version rows instead of free text
    pub is_release: bool,
    pub description: String,
    pub versions: VersionHistoryEditor,
}

/// Page-level and row-level messages of a failed submit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CmsFormErrors {
    pub fields: FieldErrors,
    pub rows: RowErrors,
}

impl CmsFormErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.rows.is_empty()
    }

    /// Flatten into one map, row fields keyed `versions.<row>.<field>`
    pub fn into_field_errors(self) -> FieldErrors {
        let mut out = self.fields;
        for (row, errors) in self.rows {
            for (field, message) in errors.iter() {
                out.insert(format!("versions.{}.{}", row, field), message);
            }
        }
        out
    }
}

impl From<CmsFormErrors> for ClientError {
    fn from(errors: CmsFormErrors) -> Self {
        ClientError::Validation(errors.into_field_errors())
    }
}

impl CmsForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_page(page: &CmsPage) -> Self {
        Self {
            title: page.title.clone(),
            slug: page.slug.clone(),
            is_release: page.is_release,
            description: page.description.clone().unwrap_or_default(),
            versions: VersionHistoryEditor::from_records(&page.versions),
        }
    }

    pub fn validate_all(&self) -> Result<(), CmsFormErrors> {
        let mut errors = CmsFormErrors {
            fields: validate_form(self).err().unwrap_or_default(),
            rows: RowErrors::new(),
        };
        if self.is_release {
            if let Err(rows) = self.versions.validate(true) {
                errors.rows = rows;
            }
        } else if self.description.trim().is_empty() {
            errors.fields.insert("description", "Please enter a description");
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Request body; version rows go out only for release pages
    pub fn payload(&self) -> CmsPageUpsert {
        let description = Some(self.description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        CmsPageUpsert {
            title: self.title.trim().to_string(),
            slug: self.slug.trim().to_string(),
            is_release: self.is_release,
            description,
            versions: if self.is_release {
                self.versions.payload()
            } else {
                Vec::new()
            },
        }
    }

    pub fn submit(&self) -> Result<CmsPageUpsert, CmsFormErrors> {
        self.validate_all()?;
        Ok(self.payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::{RowId, VersionField};
    use shared::models::Platform;

    fn release_form() -> CmsForm {
        CmsForm {
            title: "What's new".to_string(),
            slug: "whats-new".to_string(),
            is_release: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_release_row_missing_platform_blocks_submit() {
        let mut form = release_form();
        let id = form.versions.add_row();
        form.versions.edit_row(id, VersionField::Version("3.0.0".to_string()));
        form.versions.edit_row(id, VersionField::Description("Dark mode".to_string()));

        let errors = form.submit().unwrap_err();
        assert!(errors.fields.is_empty());
        assert_eq!(errors.rows[&id].get("platform"), Some("Please select a platform"));

        let flat = errors.into_field_errors();
        assert_eq!(flat.get("versions.new-1.platform"), Some("Please select a platform"));
    }

    #[test]
    fn test_release_page_does_not_need_description() {
        let mut form = release_form();
        let id = form.versions.add_row();
        form.versions.edit_row(id, VersionField::Version("3.0.0".to_string()));
        form.versions.edit_row(id, VersionField::Platform(Some(Platform::Ios)));
        form.versions.edit_row(id, VersionField::Description("Dark mode".to_string()));

        let payload = form.submit().unwrap();
        assert_eq!(payload.description, None);
        assert_eq!(payload.versions.len(), 1);
    }

    #[test]
    fn test_plain_page_ignores_rows() {
        let mut form = release_form();
        form.is_release = false;
        form.versions.add_row();

        let errors = form.submit().unwrap_err();
        assert!(errors.rows.is_empty());
        assert_eq!(errors.fields.get("description"), Some("Please enter a description"));

        form.description = "Terms of use".to_string();
        let payload = form.submit().unwrap();
        assert!(payload.versions.is_empty());
    }

    #[test]
    fn test_from_page_keeps_persisted_ids() {
        let page: CmsPage = serde_json::from_value(serde_json::json!({
            "id": 4,
            "title": "Releases",
            "slug": "releases",
            "is_release": true,
            "description": null,
            "versions": [{
                "id": 11,
                "version": "1.2.0",
                "platform": "android",
                "description": "Fixes",
                "force_update": "0"
            }]
        }))
        .unwrap();
        let form = CmsForm::from_page(&page);
        assert!(form.versions.row(RowId::Persisted(11)).is_some());
        assert!(!form.versions.is_dirty());
    }
}
