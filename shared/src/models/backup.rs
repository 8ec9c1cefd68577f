//! Backup Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backup {
    pub id: i64,
    pub file_name: String,
    pub size_bytes: u64,
    pub created_at: Option<DateTime<Utc>>,
}
