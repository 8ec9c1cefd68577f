//! Shared types for the SmartSpend console
//!
//! Wire types exchanged with the SmartSpend REST backend: the response
//! envelope, pagination, the API path table and the
//! resource models.

pub mod models;
pub mod paths;
pub mod request;
pub mod response;
pub mod types;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use request::ListQuery;
pub use response::{ApiEnvelope, ApiOutcome, EnvelopeError, Page};
pub use types::{ActionType, ModuleName, PermissionId};
