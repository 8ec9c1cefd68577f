//! Company Model

use super::RecordStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub country_id: Option<i64>,
    pub state_id: Option<i64>,
    pub currency_id: Option<i64>,
    #[serde(default)]
    pub status: RecordStatus,
}

/// Create / replace company payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyUpsert {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub country_id: Option<i64>,
    pub state_id: Option<i64>,
    pub currency_id: Option<i64>,
}
