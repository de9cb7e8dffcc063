//! Persistent storage for the single bearer token of this client.
//!
//! The store is shared by every component of the client (`Arc<dyn TokenStore>`)
//! and is swapped wholesale: `save` replaces, `clear` removes. Nothing caches a
//! token read from it; callers re-read on every use.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use serde::{Deserialize, Serialize};

/// Storage for at most one bearer token.
///
/// None of these operations report failure: reads of a broken store behave as
/// "no token", and write failures are logged.
pub trait TokenStore: Send + Sync {
    /// Replace any stored token.
    fn save(&self, token: &str);

    /// The current token, if any. Never touches the network.
    fn read(&self) -> Option<String>;

    /// Remove the stored token. Idempotent.
    fn clear(&self);

    /// Remove the stored token only if it is still `token`.
    ///
    /// Used when invalidating a session after a failed check, so that a token
    /// saved by a newer login in the meantime is left alone.
    fn clear_if_current(&self, token: &str) {
        if self.read().as_deref() == Some(token) {
            self.clear();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory store
// ─────────────────────────────────────────────────────────────────────────────

/// Process-local store; used by tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) {
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(token.to_string());
    }

    fn read(&self) -> Option<String> {
        let slot = self.token.read().unwrap_or_else(|e| e.into_inner());
        slot.clone().filter(|t| !t.trim().is_empty())
    }

    fn clear(&self) {
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File-backed store
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    token: String,
}

/// Token persisted as a small JSON document (`{"token": "..."}`), so the
/// session survives restarts of the client.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    /// Serializes file access within this process.
    lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store at the configured default location (see [`crate::config::token_file_path`]).
    pub fn open_default() -> Self {
        Self::new(crate::config::token_file_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_file(&self, token: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let body = serde_json::to_vec(&SessionFile {
            token: token.to_string(),
        })?;

        // Write a sibling temp file and rename over the target so a reader
        // never sees a half-written document.
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = open_private(&tmp)?;
            file.write_all(&body)?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp, &self.path)
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<std::fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<std::fs::File> {
    std::fs::File::create(path)
}

impl TokenStore for FileTokenStore {
    fn save(&self, token: &str) {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(err) = self.write_file(token) {
            tracing::error!(path = %self.path.display(), "failed to persist session token: {err}");
        }
    }

    fn read(&self) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "failed to read session token: {err}");
                return None;
            }
        };

        match serde_json::from_slice::<SessionFile>(&bytes) {
            Ok(file) if !file.token.trim().is_empty() => Some(file.token),
            Ok(_) => None,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "ignoring unreadable session file: {err}");
                None
            }
        }
    }

    fn clear(&self) {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::error!(path = %self.path.display(), "failed to remove session token: {err}");
            }
        }
    }
}
