//! Client configuration

use std::path::PathBuf;

/// Console client configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | SMARTSPEND_API_URL | http://localhost:8080 | REST backend base URL |
/// | SMARTSPEND_TIMEOUT_SECS | 30 | Request timeout |
/// | SMARTSPEND_SUCCESS_CODE | 200 | Envelope `status` meaning success |
/// | SMARTSPEND_LOGIN_URL | /login | Redirect target after forced logout |
/// | SMARTSPEND_PAGE_SIZE | 10 | Default list page size |
/// | SMARTSPEND_STORAGE_DIR | (unset) | Directory for persisted storage; in-memory when unset |
/// | SMARTSPEND_SECURE_KEY | smartspend-console | Key for the obfuscated storage area |
/// | SMARTSPEND_LOG_LEVEL | info | Log filter |
/// | SMARTSPEND_LOG_DIR | (unset) | Daily rolling log directory |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080/api/v1")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Application success code carried in the envelope
    pub success_code: i64,

    /// Where the UI navigates after a forced logout
    pub login_url: String,

    /// Default page size for list fetches
    pub page_size: u32,

    /// Storage directory, `None` keeps everything in memory
    pub storage_dir: Option<PathBuf>,

    /// Obfuscation key for secure storage
    pub secure_storage_key: String,

    pub log_level: String,
    pub log_dir: Option<String>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            success_code: shared::response::DEFAULT_SUCCESS_CODE,
            login_url: "/login".to_string(),
            page_size: 10,
            storage_dir: None,
            secure_storage_key: "smartspend-console".to_string(),
            log_level: "info".to_string(),
            log_dir: None,
        }
    }

    /// Load configuration from the environment (and `.env` if present)
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let mut config = Self::new(
            std::env::var("SMARTSPEND_API_URL").unwrap_or_else(|_| "http://localhost:8080".into()),
        );
        if let Some(timeout) = env_parse("SMARTSPEND_TIMEOUT_SECS") {
            config.timeout = timeout;
        }
        if let Some(code) = env_parse("SMARTSPEND_SUCCESS_CODE") {
            config.success_code = code;
        }
        if let Ok(url) = std::env::var("SMARTSPEND_LOGIN_URL") {
            config.login_url = url;
        }
        if let Some(size) = env_parse("SMARTSPEND_PAGE_SIZE") {
            config.page_size = size;
        }
        config.storage_dir = std::env::var("SMARTSPEND_STORAGE_DIR").ok().map(PathBuf::from);
        if let Ok(key) = std::env::var("SMARTSPEND_SECURE_KEY") {
            config.secure_storage_key = key;
        }
        if let Ok(level) = std::env::var("SMARTSPEND_LOG_LEVEL") {
            config.log_level = level;
        }
        config.log_dir = std::env::var("SMARTSPEND_LOG_DIR").ok();
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the envelope success code
    pub fn with_success_code(mut self, code: i64) -> Self {
        self.success_code = code;
        self
    }

    pub fn with_login_url(mut self, url: impl Into<String>) -> Self {
        self.login_url = url.into();
        self
    }

    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Persist storage as JSON files under `dir`
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    pub fn with_secure_storage_key(mut self, key: impl Into<String>) -> Self {
        self.secure_storage_key = key.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
