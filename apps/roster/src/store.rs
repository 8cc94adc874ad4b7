//! File-backed token storage for the CLI console.

use roster_core::{RosterError, SessionToken, TokenStore};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default token file, relative to the working directory.
pub const DEFAULT_TOKEN_FILE: &str = ".roster-token";

/// Keeps the session token as the sole contents of one file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn storage(err: std::io::Error) -> RosterError {
    RosterError::Storage(err.to_string())
}

impl TokenStore for FileTokenStore {
    /// A missing or blank file means no session.
    fn load(&self) -> roster_core::Result<Option<SessionToken>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(SessionToken::new(contents).ok()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage(e)),
        }
    }

    fn save(&self, token: &SessionToken) -> roster_core::Result<()> {
        std::fs::write(&self.path, token.as_str()).map_err(storage)
    }

    fn clear(&self) -> roster_core::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage(e)),
        }
    }
}
