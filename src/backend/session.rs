//! Authenticated session and its on-disk cache.

use crate::config::{get_config_dir, load_json_from, remove_file_in, save_json_to};
use crate::error::{Result, ResultExt};
use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const SESSION_FILE_NAME: &str = "session.json";

/// Sessions this close to expiry are treated as expired.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from a token lifetime in seconds.
    pub fn new(
        access_token: impl Into<String>,
        user_id: impl Into<String>,
        expires_in_secs: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            user_id: user_id.into(),
            expires_at: now + Duration::seconds(expires_in_secs),
        }
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

/// Stores the last session next to the settings file.
#[derive(Debug, Clone)]
pub struct SessionCache {
    dir: Option<PathBuf>,
}

impl SessionCache {
    /// Cache in the application config directory.
    pub fn in_config_dir() -> Self {
        Self {
            dir: get_config_dir().ok_or_warn("Session cache disabled"),
        }
    }

    /// Cache in an explicit directory.
    #[cfg(test)]
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// A cache that never stores anything.
    #[cfg(test)]
    pub fn disabled() -> Self {
        Self { dir: None }
    }

    /// The cached session, if one exists and is still valid at `now`.
    pub fn load_valid(&self, now: DateTime<Utc>) -> Option<Session> {
        let dir = self.dir.as_ref()?;
        let session: Session = load_json_from(dir, SESSION_FILE_NAME)
            .ok_or_warn("Failed to read cached session")
            .flatten()?;
        if session.is_valid_at(now) {
            debug!("Using cached session for {}", session.user_id);
            Some(session)
        } else {
            info!("Cached session expired");
            None
        }
    }

    pub fn store(&self, session: &Session) -> Result<()> {
        match &self.dir {
            Some(dir) => save_json_to(dir, SESSION_FILE_NAME, session),
            None => Ok(()),
        }
    }

    pub fn clear(&self) -> Result<()> {
        match &self.dir {
            Some(dir) => remove_file_in(dir, SESSION_FILE_NAME),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_session_validity_has_margin() {
        let session = Session::new("t", "u", 3600, at(0));
        assert!(session.is_valid_at(at(0)));
        assert!(session.is_valid_at(at(3500)));
        assert!(!session.is_valid_at(at(3550)));
        assert!(!session.is_valid_at(at(4000)));
    }

    #[test]
    fn test_cache_store_and_load() {
        let dir = TempDir::new().unwrap();
        let cache = SessionCache::at(dir.path());
        let session = Session::new("token", "user", 3600, at(1_000));

        assert!(cache.load_valid(at(1_000)).is_none());
        cache.store(&session).unwrap();
        assert_eq!(cache.load_valid(at(1_100)), Some(session));
    }

    #[test]
    fn test_cache_ignores_expired_session() {
        let dir = TempDir::new().unwrap();
        let cache = SessionCache::at(dir.path());
        cache.store(&Session::new("t", "u", 10, at(0))).unwrap();
        assert!(cache.load_valid(at(100)).is_none());
    }

    #[test]
    fn test_cache_clear() {
        let dir = TempDir::new().unwrap();
        let cache = SessionCache::at(dir.path());
        cache.store(&Session::new("t", "u", 3600, at(0))).unwrap();
        cache.clear().unwrap();
        assert!(cache.load_valid(at(0)).is_none());
    }

    #[test]
    fn test_disabled_cache() {
        let cache = SessionCache::disabled();
        cache.store(&Session::new("t", "u", 3600, at(0))).unwrap();
        assert!(cache.load_valid(at(0)).is_none());
    }
}
