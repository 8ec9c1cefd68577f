//! SmartSpend console core
//!
//! Client-side core of the SmartSpend administrative console: session and
//! route guard, the REST API client, per-resource store slices, form
//! validation, the role permission editor and the CMS version-history
//! editor. Rendering is left to the embedding UI.

pub mod cms;
pub mod config;
pub mod console;
pub mod error;
pub mod forms;
pub mod guard;
pub mod logger;
pub mod notify;
pub mod permission;
pub mod services;
pub mod session;
pub mod storage;
pub mod store;
pub mod transport;

mod api;

pub use api::{ACTION_HEADER, ActionGate, ApiClient};
pub use config::ClientConfig;
pub use console::Console;
pub use error::{ClientError, ClientResult, ErrorKind};
pub use forms::FieldErrors;
pub use guard::{RouteDecision, RouteGuard};
pub use notify::{LogNotifier, Notice, NoticeLevel, Notifier, RecordingNotifier};
pub use session::{LogoutReason, Session, SessionEvent};
pub use storage::{FileStorage, MemoryStorage, SecureStorage, Storage};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
#[cfg(any(test, feature = "test-util"))]
pub use transport::{ScriptedReply, ScriptedTransport};

// Re-export shared types for convenience
pub use shared::models::{LoginResponse, UserInfo};
pub use shared::{ApiEnvelope, ApiOutcome, ListQuery, Page};
