//! Browser-style key/value storage
//!
//! The console keeps its session in two areas: a plain one (the bearer
//! token, UI preferences) and an obfuscated one (user, role, username).
//! [`Storage`] abstracts the area; [`MemoryStorage`] and [`FileStorage`]
//! back it, and [`SecureStorage`] layers the obfuscation on top.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Storage keys used by the console
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const USER: &str = "user";
    pub const ROLE: &str = "role";
    pub const USERNAME: &str = "username";
    pub const DARK_MODE: &str = "darkMode";
    pub const COLOR_SCHEME: &str = "colorScheme";
    pub const NEWLY_ADDED_USER: &str = "newlyAddedUser";

    /// Keys removed when the session ends; preferences survive
    pub const SESSION_KEYS: &[&str] = &[TOKEN, USER, ROLE, USERNAME, NEWLY_ADDED_USER];
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupted value for key {0}")]
    Corrupted(String),

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Synchronous string key/value area
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}

/// In-memory storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Poisoned)?
            .remove(key);
        Ok(())
    }
}

/// JSON file storage: `{dir}/{name}.json`, rewritten on every change
#[derive(Debug)]
pub struct FileStorage {
    file_path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStorage {
    /// Load the area from disk, starting empty if the file does not exist
    pub fn open(dir: &Path, name: &str) -> Result<Self, StorageError> {
        let file_path = dir.join(format!("{}.json", name));

        let entries = if file_path.exists() {
            let content = std::fs::read_to_string(&file_path)?;
            serde_json::from_str(&content)?
        } else {
            std::fs::create_dir_all(dir)?;
            HashMap::new()
        };

        Ok(Self {
            file_path,
            entries: Mutex::new(entries),
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn save(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.file_path, content)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

/// Obfuscated view over another storage area
///
/// Values are XOR-ed with a repeating key and base64url encoded. This only
/// keeps casual readers of the storage out; it is not encryption.
pub struct SecureStorage<S: ?Sized = dyn Storage> {
    key: Vec<u8>,
    inner: std::sync::Arc<S>,
}

impl<S: Storage + ?Sized> SecureStorage<S> {
    pub fn new(inner: std::sync::Arc<S>, key: &str) -> Self {
        let key = if key.is_empty() {
            b"smartspend".to_vec()
        } else {
            key.as_bytes().to_vec()
        };
        Self { key, inner }
    }

    fn scramble(&self, data: &[u8]) -> Vec<u8> {
        data.iter()
            .zip(self.key.iter().cycle())
            .map(|(b, k)| b ^ k)
            .collect()
    }

    fn encode(&self, value: &str) -> String {
        URL_SAFE_NO_PAD.encode(self.scramble(value.as_bytes()))
    }

    fn decode(&self, key: &str, raw: &str) -> Result<String, StorageError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(raw)
            .map_err(|_| StorageError::Corrupted(key.to_string()))?;
        String::from_utf8(self.scramble(&bytes)).map_err(|_| StorageError::Corrupted(key.to_string()))
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner
            .get(key)
            .map(|raw| self.decode(key, &raw))
            .transpose()
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, &self.encode(value))
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        self.set(key, &serde_json::to_string(value)?)
    }
}

/// Colour scheme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorScheme {
    #[default]
    Blue,
    Green,
    Purple,
    Orange,
}

impl ColorScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Orange => "orange",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "blue" => Some(Self::Blue),
            "green" => Some(Self::Green),
            "purple" => Some(Self::Purple),
            "orange" => Some(Self::Orange),
            _ => None,
        }
    }
}

/// UI preferences kept in plain storage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub dark_mode: bool,
    pub color_scheme: ColorScheme,
}

impl Preferences {
    pub fn load(storage: &dyn Storage) -> Self {
        Self {
            dark_mode: storage.get(keys::DARK_MODE).as_deref() == Some("true"),
            color_scheme: storage
                .get(keys::COLOR_SCHEME)
                .and_then(|v| ColorScheme::parse(&v))
                .unwrap_or_default(),
        }
    }

    pub fn save(&self, storage: &dyn Storage) -> Result<(), StorageError> {
        storage.set(keys::DARK_MODE, if self.dark_mode { "true" } else { "false" })?;
        storage.set(keys::COLOR_SCHEME, self.color_scheme.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        storage.set("token", "abc").unwrap();
        assert_eq!(storage.get("token").as_deref(), Some("abc"));
        storage.remove("token").unwrap();
        assert!(storage.get("token").is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_secure_storage_obfuscates() {
        let inner = Arc::new(MemoryStorage::new());
        let secure = SecureStorage::new(inner.clone(), "k3y");
        secure.set(keys::ROLE, "super_admin").unwrap();

        let raw = inner.get(keys::ROLE).unwrap();
        assert_ne!(raw, "super_admin");
        assert!(!raw.contains("admin"));
        assert_eq!(secure.get(keys::ROLE).unwrap().as_deref(), Some("super_admin"));
    }

    #[test]
    fn test_secure_storage_wrong_key_does_not_reveal() {
        let inner = Arc::new(MemoryStorage::new());
        SecureStorage::new(inner.clone(), "one")
            .set(keys::USERNAME, "Dana")
            .unwrap();
        let other = SecureStorage::new(inner, "two");
        let read = other.get(keys::USERNAME).ok().flatten();
        assert_ne!(read.as_deref(), Some("Dana"));
    }

    #[test]
    fn test_secure_storage_rejects_garbage() {
        let inner = Arc::new(MemoryStorage::new());
        inner.set(keys::USER, "%%%").unwrap();
        let secure = SecureStorage::new(inner, "k");
        assert!(matches!(
            secure.get(keys::USER),
            Err(StorageError::Corrupted(_))
        ));
    }

    #[test]
    fn test_preferences_roundtrip_defaults() {
        let storage = MemoryStorage::new();
        assert_eq!(Preferences::load(&storage), Preferences::default());

        let prefs = Preferences {
            dark_mode: true,
            color_scheme: ColorScheme::Purple,
        };
        prefs.save(&storage).unwrap();
        assert_eq!(Preferences::load(&storage), prefs);
    }
}
