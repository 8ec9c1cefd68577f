//! Account Model (company bank/expense accounts)

use super::RecordStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub company_id: i64,
    pub account_name: String,
    pub account_number: String,
    pub bank_name: Option<String>,
    pub currency_id: Option<i64>,
    #[serde(default)]
    pub balance: Decimal,
    #[serde(default)]
    pub status: RecordStatus,
}

/// Create / replace account payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountUpsert {
    pub company_id: i64,
    pub account_name: String,
    pub account_number: String,
    pub bank_name: Option<String>,
    pub currency_id: Option<i64>,
}
