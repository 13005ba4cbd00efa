use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::AppConfig;

static TOKEN_FILE: &str = "session.token";

/// Keeps the bearer token between runs, in a fixed-name file under the
/// data directory. No expiry tracking: a stale token simply makes the
/// next request fail.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            path: config.data_dir().join(TOKEN_FILE),
        }
    }

    pub fn from_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Persist the token; visible to every subsequent API call.
    pub fn save(&self, token: &str) -> Result<()> {
        fs::write(&self.path, token).with_context(|| {
            format!("Failed to write session token to {}", self.path.display())
        })
    }

    /// The stored token, or `None` when nobody is logged in.
    pub fn load(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    /// Forget the token. Subsequent API calls go out unauthenticated and
    /// fail with the server's authorization error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| {
                format!("Failed to remove session token at {}", self.path.display())
            }),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.load().is_some()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn store_in_temp_dir() -> (SessionStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::from_path(dir.path().join(TOKEN_FILE));
        (store, dir)
    }

    #[test]
    fn token_round_trips() {
        let (store, _guard) = store_in_temp_dir();
        assert_eq!(store.load(), None);
        assert!(!store.is_logged_in());

        store.save("abc123").unwrap();
        assert_eq!(store.load().as_deref(), Some("abc123"));
        assert!(store.is_logged_in());
    }

    #[test]
    fn clear_forgets_the_token() {
        let (store, _guard) = store_in_temp_dir();
        store.save("abc123").unwrap();

        store.clear().unwrap();
        assert_eq!(store.load(), None);

        // Clearing an absent token is not an error.
        store.clear().unwrap();
    }

    #[test]
    fn blank_tokens_count_as_absent() {
        let (store, _guard) = store_in_temp_dir();
        store.save("  \n").unwrap();
        assert_eq!(store.load(), None);
    }
}
