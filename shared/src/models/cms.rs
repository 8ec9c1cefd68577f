//! CMS Model
//!
//! A CMS page is either a plain content page (free-text description) or a
//! release page whose body is a version history: one row per app version
//! and platform.

use crate::util::{int_flag, string_flag};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target platform of a release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One version history row as exchanged with the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// Absent for rows created in the current editing session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub version: String,
    pub platform: Option<Platform>,
    pub description: String,
    #[serde(with = "string_flag")]
    pub force_update: bool,
    #[serde(with = "int_flag", default)]
    pub is_created: bool,
    #[serde(with = "int_flag", default)]
    pub is_updated: bool,
    #[serde(with = "int_flag", default)]
    pub is_deleted: bool,
}

/// CMS page entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmsPage {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub is_release: bool,
    pub description: Option<String>,
    #[serde(default)]
    pub versions: Vec<VersionRecord>,
}

/// Create / update page payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmsPageUpsert {
    pub title: String,
    pub slug: String,
    pub is_release: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<VersionRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_record_wire_format() {
        let row = VersionRecord {
            id: None,
            version: "2.4.0".to_string(),
            platform: Some(Platform::Android),
            description: "Bug fixes".to_string(),
            force_update: true,
            is_created: true,
            is_updated: false,
            is_deleted: false,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["platform"], "android");
        assert_eq!(json["force_update"], "1");
        assert_eq!(json["is_created"], 1);
        assert_eq!(json["is_updated"], 0);
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_page_without_versions() {
        let json = r#"{"id":1,"title":"Terms","slug":"terms","description":"..."}"#;
        let page: CmsPage = serde_json::from_str(json).unwrap();
        assert!(!page.is_release);
        assert!(page.versions.is_empty());
    }
}
