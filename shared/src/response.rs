//! API Response types
//!
//! Every SmartSpend endpoint answers with the same envelope:
//!
//! ```json
//! {
//!     "status": 200,
//!     "message": "Users fetched",
//!     "data": { "data": [ ... ], "page": 1, "limit": 10, "total": 42 }
//! }
//! ```
//!
//! `status` is the application success code, not the transport status.
//! [`ApiEnvelope::into_outcome`] turns the loosely shaped envelope into the
//! discriminated [`ApiOutcome`] so callers never check for field presence.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default application success code
pub const DEFAULT_SUCCESS_CODE: i64 = 200;

/// Raw response envelope as sent by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Application status code
    pub status: i64,
    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload wrapper
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<EnvelopeBody<T>>,
}

/// Inner `data` object of the envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeBody<T> {
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Some endpoints put the error text here instead of at the top level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Discriminated result of one API call
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    Ok { data: T },
    Err { code: i64, message: Option<String> },
}

/// The envelope did not have the shape the endpoint promises
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error("response is missing the data payload")]
    MissingData,
    #[error("paged response is missing pagination fields")]
    MissingPaging,
}

impl<T> ApiEnvelope<T> {
    /// Create a successful envelope
    pub fn ok(data: T) -> Self {
        Self {
            status: DEFAULT_SUCCESS_CODE,
            message: None,
            data: Some(EnvelopeBody {
                data: Some(data),
                page: None,
                limit: None,
                total: None,
                message: None,
            }),
        }
    }

    /// Create a paged successful envelope
    pub fn paged(items: T, page: u32, limit: u32, total: u64) -> Self {
        Self {
            status: DEFAULT_SUCCESS_CODE,
            message: None,
            data: Some(EnvelopeBody {
                data: Some(items),
                page: Some(page),
                limit: Some(limit),
                total: Some(total),
                message: None,
            }),
        }
    }

    /// Create an error envelope
    pub fn error(status: i64, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Whether `status` equals the configured success code
    pub fn is_success(&self, success_code: i64) -> bool {
        self.status == success_code
    }

    /// Best message the envelope carries, top level first
    pub fn error_message(&self) -> Option<String> {
        self.message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.data.as_ref().and_then(|b| b.message.clone()))
    }

    /// Convert into a discriminated outcome, requiring a payload on success
    pub fn into_outcome(self, success_code: i64) -> Result<ApiOutcome<T>, EnvelopeError> {
        if !self.is_success(success_code) {
            let message = self.error_message();
            return Ok(ApiOutcome::Err {
                code: self.status,
                message,
            });
        }
        self.data
            .and_then(|body| body.data)
            .map(|data| ApiOutcome::Ok { data })
            .ok_or(EnvelopeError::MissingData)
    }

    /// Convert into an outcome that ignores any payload
    pub fn into_ack(self, success_code: i64) -> ApiOutcome<()> {
        if self.is_success(success_code) {
            ApiOutcome::Ok { data: () }
        } else {
            let message = self.error_message();
            ApiOutcome::Err {
                code: self.status,
                message,
            }
        }
    }
}

impl<T> ApiEnvelope<Vec<T>> {
    /// Convert a list envelope into a [`Page`]
    ///
    /// Lists without pagination fields are treated as a single page holding
    /// every item.
    pub fn into_page(self, success_code: i64) -> Result<ApiOutcome<Page<T>>, EnvelopeError> {
        if !self.is_success(success_code) {
            let message = self.error_message();
            return Ok(ApiOutcome::Err {
                code: self.status,
                message,
            });
        }
        let body = self.data.ok_or(EnvelopeError::MissingData)?;
        let items = body.data.ok_or(EnvelopeError::MissingData)?;
        let page = match (body.page, body.limit, body.total) {
            (Some(page), Some(limit), Some(total)) => Page::new(items, page, limit, total),
            (None, None, None) => {
                let total = items.len() as u64;
                let limit = items.len() as u32;
                Page::new(items, 1, limit, total)
            }
            _ => return Err(EnvelopeError::MissingPaging),
        };
        Ok(ApiOutcome::Ok { data: page })
    }
}

/// One page of a list resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Current page number (1-based)
    pub page: u32,
    /// Items per page
    pub per_page: u32,
    /// Total number of items
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u32, per_page: u32, total: u64) -> Self {
        Self {
            items,
            page,
            per_page,
            total,
        }
    }

    /// Total number of pages
    pub fn total_pages(&self) -> u32 {
        if self.per_page == 0 {
            0
        } else {
            self.total.div_ceil(self.per_page as u64) as u32
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::new(Vec::new(), 1, 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_outcome() {
        let json = r#"{"status":200,"data":{"data":{"id":7}}}"#;
        let env: ApiEnvelope<serde_json::Value> = serde_json::from_str(json).unwrap();
        match env.into_outcome(200).unwrap() {
            ApiOutcome::Ok { data } => assert_eq!(data["id"], 7),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_success_without_payload_is_shape_error() {
        let json = r#"{"status":200,"message":"done"}"#;
        let env: ApiEnvelope<i64> = serde_json::from_str(json).unwrap();
        assert_eq!(env.into_outcome(200), Err(EnvelopeError::MissingData));
    }

    #[test]
    fn test_error_outcome_uses_message() {
        let json = r#"{"status":422,"message":"Email already taken"}"#;
        let env: ApiEnvelope<i64> = serde_json::from_str(json).unwrap();
        assert_eq!(
            env.into_outcome(200).unwrap(),
            ApiOutcome::Err {
                code: 422,
                message: Some("Email already taken".to_string())
            }
        );
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        let json = r#"{"status":400,"message":"","data":{"message":"Bad slug"}}"#;
        let env: ApiEnvelope<i64> = serde_json::from_str(json).unwrap();
        assert_eq!(env.error_message().as_deref(), Some("Bad slug"));
    }

    #[test]
    fn test_custom_success_code() {
        let json = r#"{"status":1,"data":{"data":5}}"#;
        let env: ApiEnvelope<i64> = serde_json::from_str(json).unwrap();
        assert!(env.is_success(1));
        assert!(!env.is_success(200));
    }

    #[test]
    fn test_into_page() {
        let json = r#"{"status":200,"data":{"data":[1,2,3],"page":2,"limit":3,"total":8}}"#;
        let env: ApiEnvelope<Vec<i64>> = serde_json::from_str(json).unwrap();
        let ApiOutcome::Ok { data: page } = env.into_page(200).unwrap() else {
            panic!("expected page");
        };
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
    }

    #[test]
    fn test_unpaged_list() {
        let json = r#"{"status":200,"data":{"data":[1,2]}}"#;
        let env: ApiEnvelope<Vec<i64>> = serde_json::from_str(json).unwrap();
        let ApiOutcome::Ok { data: page } = env.into_page(200).unwrap() else {
            panic!("expected page");
        };
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages(), 1);
    }

    #[test]
    fn test_partial_paging_is_rejected() {
        let json = r#"{"status":200,"data":{"data":[1],"page":1}}"#;
        let env: ApiEnvelope<Vec<i64>> = serde_json::from_str(json).unwrap();
        assert_eq!(env.into_page(200), Err(EnvelopeError::MissingPaging));
    }

    #[test]
    fn test_ack_ignores_payload() {
        let env: ApiEnvelope<serde_json::Value> = ApiEnvelope::error(500, "boom");
        assert_eq!(
            env.into_ack(200),
            ApiOutcome::Err {
                code: 500,
                message: Some("boom".to_string())
            }
        );
    }
}
