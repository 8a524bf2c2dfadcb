use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use dashmap::DashMap;
use tracing::{debug, error, info, warn};

/// Logical key for the short-lived bearer credential.
pub const ACCESS_KEY: &str = "access";
/// Logical key for the long-lived refresh credential.
pub const REFRESH_KEY: &str = "refresh";

/// Durable key-value store for the session's token pair.
///
/// Reads and writes are synchronous; persistence is a small JSON file so
/// the pair survives process restarts. The in-memory cache is
/// authoritative within a running process — a failed file write is logged
/// and the session keeps working until the next restart.
///
/// No token validation or expiry checking happens here; the server is the
/// only judge of token validity.
pub struct TokenStore {
    cache: DashMap<String, String>,
    path: Option<PathBuf>,
    persist_lock: Mutex<()>,
}

impl TokenStore {
    /// Open a store backed by the JSON file at `path`, loading any
    /// previously persisted tokens.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cache = DashMap::new();

        match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(entries) => {
                    for (key, value) in entries {
                        cache.insert(key, value);
                    }
                    info!(path = %path.display(), "token store loaded");
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "token store file unreadable, starting empty");
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "no token store file yet");
            }
        }

        Self {
            cache,
            path: Some(path),
            persist_lock: Mutex::new(()),
        }
    }

    /// Open a store with no backing file. Tokens live only as long as the
    /// process; used by tests and by hosts that manage persistence
    /// themselves.
    pub fn in_memory() -> Self {
        Self {
            cache: DashMap::new(),
            path: None,
            persist_lock: Mutex::new(()),
        }
    }

    /// Read the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.cache.get(key).map(|entry| entry.value().clone())
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set(&self, key: &str, value: &str) {
        self.cache.insert(key.to_string(), value.to_string());
        self.persist();
    }

    /// Remove the value stored under `key`, if any.
    pub fn clear(&self, key: &str) {
        self.cache.remove(key);
        self.persist();
    }

    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };

        // Serialize writers so concurrent set/clear calls cannot
        // interleave partial file contents.
        let _guard = self
            .persist_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let entries: BTreeMap<String, String> = self
            .cache
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = fs::create_dir_all(parent) {
                    error!(path = %path.display(), error = %e, "failed to create token store directory");
                    return;
                }
            }
        }

        match serde_json::to_string_pretty(&entries) {
            Ok(json) => {
                if let Err(e) = fs::write(path, json) {
                    error!(path = %path.display(), error = %e, "failed to persist token store");
                }
            }
            Err(e) => {
                error!(error = %e, "failed to serialize token store");
            }
        }
    }
}
