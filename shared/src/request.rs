//! Request types for the shared crate
//!
//! Common query parameters sent with list endpoints

use serde::{Deserialize, Serialize};

/// Query parameters accepted by every list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Page number (1-based)
    pub page: u32,
    /// Items per page
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// `asc` or `desc`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    /// Status filter (`active` / `inactive`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit,
            search: None,
            sort_by: None,
            order: None,
            status: None,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.trim().is_empty() {
            None
        } else {
            Some(search)
        };
        self
    }

    pub fn with_sort(mut self, sort_by: impl Into<String>, descending: bool) -> Self {
        self.sort_by = Some(sort_by.into());
        self.order = Some(if descending { "desc" } else { "asc" }.to_string());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Same filters, different page
    pub fn at_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Render as URL query pairs
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        let optional = [
            ("search", &self.search),
            ("sort_by", &self.sort_by),
            ("order", &self.order),
            ("status", &self.status),
        ];
        for (key, value) in optional {
            if let Some(v) = value {
                pairs.push((key.to_string(), v.clone()));
            }
        }
        pairs
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(1, 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_is_clamped_to_one() {
        assert_eq!(ListQuery::new(0, 10).page, 1);
    }

    #[test]
    fn test_blank_search_is_dropped() {
        let q = ListQuery::default().with_search("   ");
        assert!(q.search.is_none());
    }

    #[test]
    fn test_to_pairs() {
        let q = ListQuery::new(2, 25)
            .with_search("acme")
            .with_sort("name", false);
        let pairs = q.to_pairs();
        assert_eq!(pairs[0], ("page".to_string(), "2".to_string()));
        assert!(pairs.contains(&("search".to_string(), "acme".to_string())));
        assert!(pairs.contains(&("order".to_string(), "asc".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "status"));
    }

    #[test]
    fn test_at_page_keeps_filters() {
        let q = ListQuery::default().with_status("active").at_page(4);
        assert_eq!(q.page, 4);
        assert_eq!(q.status.as_deref(), Some("active"));
    }
}
