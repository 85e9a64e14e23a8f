//! Session store — the process-wide holder of the current token.
//!
//! DESIGN
//! ======
//! One key, `token`, holding the raw token string. `set` overwrites, there is
//! no merge or locking beyond what a single write needs. The store is created
//! at startup and emptied by sign-out.
//!
//! `FileSessionStore` keeps a small JSON object on disk so other keys written
//! by other tools survive a token update, like browser local storage.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value};

use crate::auth::AuthError;

pub const TOKEN_KEY: &str = "token";

/// `set`/`get`/`clear` contract for the persisted token.
pub trait SessionStore: Send + Sync {
    /// Current token, if one is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the backing store cannot be read.
    fn get(&self) -> Result<Option<String>, AuthError>;

    /// Store `token`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the backing store cannot be written.
    fn set(&self, token: &str) -> Result<(), AuthError>;

    /// Remove the stored token. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the backing store cannot be written.
    fn clear(&self) -> Result<(), AuthError>;
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-process store; lives as long as the value does.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, AuthError> {
        self.token
            .lock()
            .map_err(|_| AuthError::Storage("session mutex poisoned".into()))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<String>, AuthError> {
        Ok(self.lock()?.clone())
    }

    fn set(&self, token: &str) -> Result<(), AuthError> {
        *self.lock()? = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.lock()? = None;
        Ok(())
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// JSON-file store, e.g. `{"token": "..."}`.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>, AuthError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(storage_error(&self.path, &e)),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(AuthError::Storage(format!("{} is not a JSON object", self.path.display()))),
            Err(e) => Err(storage_error(&self.path, &e)),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| storage_error(parent, &e))?;
        }
        let body = serde_json::to_string_pretty(map).map_err(|e| storage_error(&self.path, &e))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, body).map_err(|e| storage_error(&tmp, &e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| storage_error(&self.path, &e))
    }

    fn update<F>(&self, apply: F) -> Result<(), AuthError>
    where
        F: FnOnce(&mut Map<String, Value>),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AuthError::Storage("session file lock poisoned".into()))?;
        let mut map = self.read_map()?;
        apply(&mut map);
        self.write_map(&map)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<String>, AuthError> {
        let map = self.read_map()?;
        Ok(map.get(TOKEN_KEY).and_then(Value::as_str).map(str::to_owned))
    }

    fn set(&self, token: &str) -> Result<(), AuthError> {
        self.update(|map| {
            map.insert(TOKEN_KEY.to_owned(), Value::String(token.to_owned()));
        })
    }

    fn clear(&self) -> Result<(), AuthError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|map| {
            map.remove(TOKEN_KEY);
        })
    }
}

fn storage_error(path: &Path, err: &dyn std::fmt::Display) -> AuthError {
    AuthError::Storage(format!("{}: {err}", path.display()))
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
