//! Per-device owner token, created lazily and persisted under a fixed
//! file name in the local state directory.
//!
//! The token is an opaque UUID scoping all remote reads and writes to
//! this device. It is not a credential and is never rotated. When no
//! state directory can be resolved the store reports itself unavailable
//! instead of fabricating an unscoped token; callers must fail fast.

use std::path::{Path, PathBuf};

use crate::error::GatewayError;

/// Environment variable overriding the state directory.
pub const ENV_STATE_DIR: &str = "PLAYBOOK_STATE_DIR";

/// File name the token is stored under, inside the state directory.
pub const TOKEN_FILE: &str = "owner-token";

/// File-backed store for the per-device owner token.
#[derive(Debug, Clone)]
pub struct TokenStore {
    dir: PathBuf,
}

impl TokenStore {
    /// Resolve the state directory from the environment.
    ///
    /// Resolution order: `PLAYBOOK_STATE_DIR`, then `XDG_STATE_HOME`
    /// joined with `playbook/`, then `$HOME/.local/state/playbook`.
    /// Fails with [`GatewayError::Identity`] when none resolves.
    pub fn from_env() -> Result<Self, GatewayError> {
        if let Ok(explicit) = std::env::var(ENV_STATE_DIR) {
            let trimmed = explicit.trim();
            if !trimmed.is_empty() {
                return Ok(Self::at(PathBuf::from(trimmed)));
            }
        }

        if let Ok(xdg_state_home) = std::env::var("XDG_STATE_HOME") {
            let trimmed = xdg_state_home.trim();
            if !trimmed.is_empty() {
                return Ok(Self::at(PathBuf::from(trimmed).join("playbook")));
            }
        }

        if let Ok(home) = std::env::var("HOME") {
            let trimmed = home.trim();
            if !trimmed.is_empty() {
                return Ok(Self::at(
                    PathBuf::from(trimmed).join(".local").join("state").join("playbook"),
                ));
            }
        }

        Err(GatewayError::Identity(
            "no persistent state directory available".to_string(),
        ))
    }

    /// Use an explicit state directory (tests supply a temp dir here).
    pub fn at(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Full path of the token file.
    pub fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    /// Return the stored owner token, generating and persisting a new
    /// UUID v4 on first use.
    pub fn get_or_create(&self) -> Result<String, GatewayError> {
        let path = self.token_path();

        if let Some(existing) = read_token(&path) {
            return Ok(existing);
        }

        let token = uuid::Uuid::new_v4().to_string();
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            GatewayError::Identity(format!("cannot create {}: {e}", self.dir.display()))
        })?;
        std::fs::write(&path, &token)
            .map_err(|e| GatewayError::Identity(format!("cannot write {}: {e}", path.display())))?;

        tracing::info!(path = %path.display(), "Generated new owner token");
        Ok(token)
    }
}

/// Read a previously stored token, ignoring unreadable or blank files.
fn read_token(path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    let token = contents.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_access_creates_a_token() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TokenStore::at(dir.path().join("playbook"));

        let token = store.get_or_create().expect("token");
        assert!(!token.is_empty());
        assert!(store.token_path().exists());
    }

    #[test]
    fn subsequent_access_returns_the_same_token() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TokenStore::at(dir.path().to_path_buf());

        let first = store.get_or_create().expect("token");
        let second = store.get_or_create().expect("token");
        assert_eq!(first, second);
    }

    #[test]
    fn blank_token_file_is_replaced() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TokenStore::at(dir.path().to_path_buf());
        std::fs::write(store.token_path(), "   ").expect("write");

        let token = store.get_or_create().expect("token");
        assert!(!token.trim().is_empty());
    }

    #[test]
    fn stored_token_is_trimmed_on_read() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TokenStore::at(dir.path().to_path_buf());
        std::fs::write(store.token_path(), "abc-123\n").expect("write");

        assert_eq!(store.get_or_create().expect("token"), "abc-123");
    }
}
