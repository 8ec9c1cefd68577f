//! Dashboard counters

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_users: u64,
    pub active_users: u64,
    pub pending_verifications: u64,
    pub total_companies: u64,
    pub total_accounts: u64,
    pub total_admins: u64,
}
