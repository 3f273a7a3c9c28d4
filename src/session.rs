//! Durable session storage.
//!
//! The bearer token and operator profile survive restarts in
//! `~/.trendpost/.session.json`. Cleared on logout and on session failure;
//! read once at startup so a stored token skips the login screen.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use crate::models::User;

/// The session directory name.
const SESSION_DIR: &str = ".trendpost";

/// The session file name.
const SESSION_FILE: &str = ".session.json";

/// Persisted session state: bearer token plus the operator profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Bearer token attached to every API call.
    pub token: Option<String>,
    /// The logged-in operator, for display.
    pub user: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session is live when it carries a token.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Manages session storage and retrieval.
#[derive(Debug)]
pub struct SessionManager {
    session_path: PathBuf,
}

impl SessionManager {
    /// Create a new SessionManager.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self {
            session_path: home.join(SESSION_DIR).join(SESSION_FILE),
        })
    }

    /// Create a manager rooted at an explicit path (tests).
    pub fn with_path(session_path: PathBuf) -> Self {
        Self { session_path }
    }

    pub fn session_path(&self) -> &PathBuf {
        &self.session_path
    }

    /// Load the stored session, or an empty one if the file is missing or
    /// unreadable.
    pub fn load(&self) -> Session {
        if !self.session_path.exists() {
            return Session::default();
        }

        let file = match File::open(&self.session_path) {
            Ok(f) => f,
            Err(_) => return Session::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
            Ok(session) => session,
            Err(_) => Session::default(),
        }
    }

    /// Save the session, creating the parent directory if needed.
    /// Returns `true` on success.
    pub fn save(&self, session: &Session) -> bool {
        if let Some(parent) = self.session_path.parent() {
            if !parent.exists() && fs::create_dir_all(parent).is_err() {
                return false;
            }
        }

        let file = match File::create(&self.session_path) {
            Ok(f) => f,
            Err(_) => return false,
        };

        let mut writer = BufWriter::new(file);
        if serde_json::to_writer_pretty(&mut writer, session).is_err() {
            return false;
        }

        writer.flush().is_ok()
    }

    /// Remove the stored session. Returns `true` if gone afterwards.
    pub fn clear(&self) -> bool {
        if !self.session_path.exists() {
            return true;
        }
        fs::remove_file(&self.session_path).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> SessionManager {
        SessionManager::with_path(temp_dir.path().join(SESSION_DIR).join(SESSION_FILE))
    }

    fn sample_session() -> Session {
        Session {
            token: Some("bearer-token".to_string()),
            user: Some(User {
                id: Some("u1".to_string()),
                name: "operator".to_string(),
                email: "operator@trendpost.local".to_string(),
            }),
        }
    }

    #[test]
    fn default_session_is_unauthenticated() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert!(session.user.is_none());
    }

    #[test]
    fn session_with_token_is_authenticated() {
        assert!(sample_session().is_authenticated());
    }

    #[test]
    fn load_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        assert_eq!(manager.load(), Session::default());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let session = sample_session();
        assert!(manager.save(&session));
        assert_eq!(manager.load(), session);
    }

    #[test]
    fn save_creates_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        assert!(!manager.session_path().parent().unwrap().exists());
        assert!(manager.save(&sample_session()));
        assert!(manager.session_path().parent().unwrap().exists());
    }

    #[test]
    fn clear_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        assert!(manager.save(&sample_session()));
        assert!(manager.session_path().exists());

        assert!(manager.clear());
        assert!(!manager.session_path().exists());
        assert_eq!(manager.load(), Session::default());
    }

    #[test]
    fn clear_nonexistent_succeeds() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        assert!(manager.clear());
    }

    #[test]
    fn load_invalid_json_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        fs::create_dir_all(manager.session_path().parent().unwrap()).unwrap();
        fs::write(manager.session_path(), "not valid json").unwrap();

        assert_eq!(manager.load(), Session::default());
    }
}
