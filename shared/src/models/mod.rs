//! Data models
//!
//! Resource types exchanged with the SmartSpend backend.
//! All IDs are `i64`.

pub mod account;
pub mod admin;
pub mod auth;
pub mod backup;
pub mod cms;
pub mod company;
pub mod dashboard;
pub mod dropdown;
pub mod feedback;
pub mod log;
pub mod permission;
pub mod profile;
pub mod role;
pub mod user;

// Re-exports
pub use account::*;
pub use admin::*;
pub use auth::*;
pub use backup::*;
pub use cms::*;
pub use company::*;
pub use dashboard::*;
pub use dropdown::*;
pub use feedback::*;
pub use log::*;
pub use permission::*;
pub use profile::*;
pub use role::*;
pub use user::*;

use serde::{Deserialize, Serialize};

/// Active / inactive flag shared by most resources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}
