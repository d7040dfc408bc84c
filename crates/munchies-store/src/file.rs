//! # File-Backed Session Storage
//!
//! One directory per session, one file per key.
//!
//! ## Layout
//! ```text
//! <root>/
//! ├── 3f2c…-session-a/
//! │   └── munchies-cart        ← JSON array of cart lines
//! └── 91be…-session-b/
//!     └── munchies-cart
//! ```
//!
//! The default root is the platform cache directory
//! (`~/.cache/munchies/sessions` on Linux). Ending a session deletes its
//! directory, which is what scopes the cart to the session.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::storage::SessionStorage;

/// Session storage persisted under a per-session directory.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    session_id: String,
    dir: PathBuf,
}

impl FileSessionStorage {
    /// Opens (creating if needed) the storage of `session_id` under `root`.
    pub fn open(root: impl AsRef<Path>, session_id: &str) -> StoreResult<Self> {
        validate_name(session_id)?;

        let dir = root.as_ref().join(session_id);
        fs::create_dir_all(&dir)?;
        debug!(?dir, session_id = %session_id, "Opened session storage");

        Ok(FileSessionStorage {
            session_id: session_id.to_string(),
            dir,
        })
    }

    /// Starts a fresh session with a generated id under `root`.
    pub fn new_session(root: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open(root, &Uuid::new_v4().to_string())
    }

    /// Platform cache directory holding all session directories.
    pub fn default_root() -> StoreResult<PathBuf> {
        ProjectDirs::from("com", "munchies", "client")
            .map(|dirs| dirs.cache_dir().join("sessions"))
            .ok_or_else(|| StoreError::Unavailable("no cache directory on this platform".into()))
    }

    /// The id of this session.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Directory holding this session's keys.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ends the session, deleting everything stored in it.
    pub fn end_session(self) -> StoreResult<()> {
        match fs::remove_dir_all(&self.dir) {
            Ok(()) => {
                info!(session_id = %self.session_id, "Session storage removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_name(key)?;
        Ok(self.dir.join(key))
    }
}

impl SessionStorage for FileSessionStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => Err(StoreError::corrupt(key, e)),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;

        // Write then rename so a crash never leaves half a cart behind
        let tmp = self.dir.join(format!(".{}.tmp", key));
        fs::create_dir_all(&self.dir)?;
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keys and session ids become path components, so only a safe alphabet is
/// accepted.
fn validate_name(name: &str) -> StoreResult<()> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(name.to_string()))
    }
}
