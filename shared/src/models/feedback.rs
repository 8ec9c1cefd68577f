//! Feedback Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: i64,
    pub user_id: i64,
    pub user_name: Option<String>,
    pub message: String,
    pub rating: Option<u8>,
    pub created_at: Option<DateTime<Utc>>,
}
