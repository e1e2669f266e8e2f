//! Client-side session expiry.
//!
//! The sign-in page stores an expiry timestamp under [`SESSION_EXPIRY_KEY`].
//! [`SessionWatch`] re-reads it on a fixed interval; once the timestamp has
//! passed it clears the key and emits [`SessionEvent::Expired`] so the app
//! can alert the user and return to the landing page. The watch is
//! independent of every other state machine.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::SessionConfig;
use crate::error::EnrollResult;

pub const SESSION_EXPIRY_KEY: &str = "session_expiry";

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";

/// Persistent key-value surface the session lives in.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> EnrollResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> EnrollResult<()>;
    fn remove(&self, key: &str) -> EnrollResult<()>;
}

/// In-memory store, lost on exit.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> EnrollResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> EnrollResult<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> EnrollResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> EnrollResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> EnrollResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> EnrollResult<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> EnrollResult<()> {
        let _guard = self.lock.lock();
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> EnrollResult<()> {
        let _guard = self.lock.lock();
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// No expiry recorded, or one that cannot be parsed
    Missing,
    Active { expires_at: DateTime<Utc> },
    /// Was expired; the key has been cleared
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Expired { message: String, landing_url: String },
}

/// Record when the current session ends.
pub fn start_session<S: SessionStore + ?Sized>(
    store: &S,
    expires_at: DateTime<Utc>,
) -> EnrollResult<()> {
    store.set(SESSION_EXPIRY_KEY, &expires_at.to_rfc3339())
}

/// Inspect the stored expiry at `now`, clearing it when it has passed.
pub fn check_session<S: SessionStore + ?Sized>(
    store: &S,
    now: DateTime<Utc>,
) -> EnrollResult<SessionStatus> {
    let Some(raw) = store.get(SESSION_EXPIRY_KEY)? else {
        return Ok(SessionStatus::Missing);
    };

    let expires_at = match DateTime::parse_from_rfc3339(&raw) {
        Ok(parsed) => parsed.with_timezone(&Utc),
        Err(e) => {
            tracing::warn!(value = %raw, "Ignoring unparseable session expiry: {}", e);
            return Ok(SessionStatus::Missing);
        }
    };

    if now >= expires_at {
        store.remove(SESSION_EXPIRY_KEY)?;
        tracing::info!(%expires_at, "Session expired");
        Ok(SessionStatus::Expired)
    } else {
        Ok(SessionStatus::Active { expires_at })
    }
}

/// Periodic session expiry poller.
pub struct SessionWatch {
    handle: JoinHandle<()>,
}

impl SessionWatch {
    /// Start polling. The first check happens one interval after start.
    /// The watch stops when the receiver is dropped.
    pub fn spawn<S>(store: Arc<S>, config: SessionConfig) -> (Self, mpsc::Receiver<SessionEvent>)
    where
        S: SessionStore + ?Sized + 'static,
    {
        let (tx, rx) = mpsc::channel(4);
        let period = config.check_interval();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                ticker.tick().await;
                match check_session(store.as_ref(), Utc::now()) {
                    Ok(SessionStatus::Expired) => {
                        let event = SessionEvent::Expired {
                            message: SESSION_EXPIRED_MESSAGE.to_string(),
                            landing_url: config.landing_url.clone(),
                        };
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => tracing::warn!("Session check failed: {}", e),
                }
                if tx.is_closed() {
                    break;
                }
            }
            tracing::debug!("Session watch stopped");
        });

        (Self { handle }, rx)
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for SessionWatch {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnrollError;
    use chrono::Duration as ChronoDuration;

    #[test]
    fn missing_key_is_missing() {
        let store = MemorySessionStore::new();
        assert_eq!(check_session(&store, Utc::now()).unwrap(), SessionStatus::Missing);
    }

    #[test]
    fn future_expiry_is_active() {
        let store = MemorySessionStore::new();
        let expires_at = Utc::now() + ChronoDuration::hours(1);
        start_session(&store, expires_at).unwrap();
        assert!(matches!(
            check_session(&store, Utc::now()).unwrap(),
            SessionStatus::Active { .. }
        ));
    }

    #[test]
    fn past_expiry_clears_key_once() {
        let store = MemorySessionStore::new();
        start_session(&store, Utc::now() - ChronoDuration::minutes(1)).unwrap();
        assert_eq!(check_session(&store, Utc::now()).unwrap(), SessionStatus::Expired);
        assert_eq!(store.get(SESSION_EXPIRY_KEY).unwrap(), None);
        assert_eq!(check_session(&store, Utc::now()).unwrap(), SessionStatus::Missing);
    }

    #[test]
    fn expiry_boundary_counts_as_expired() {
        let store = MemorySessionStore::new();
        let now = Utc::now();
        start_session(&store, now).unwrap();
        let stored = store.get(SESSION_EXPIRY_KEY).unwrap().unwrap();
        let at = DateTime::parse_from_rfc3339(&stored).unwrap().with_timezone(&Utc);
        assert_eq!(check_session(&store, at).unwrap(), SessionStatus::Expired);
    }

    #[test]
    fn garbage_expiry_is_ignored() {
        let store = MemorySessionStore::new();
        store.set(SESSION_EXPIRY_KEY, "not a date").unwrap();
        assert_eq!(check_session(&store, Utc::now()).unwrap(), SessionStatus::Missing);
        assert!(store.get(SESSION_EXPIRY_KEY).unwrap().is_some());
    }

    #[test]
    fn file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        {
            let store = FileSessionStore::new(&path);
            store.set(SESSION_EXPIRY_KEY, "2030-01-01T00:00:00Z").unwrap();
        }
        let store = FileSessionStore::new(&path);
        assert_eq!(
            store.get(SESSION_EXPIRY_KEY).unwrap().as_deref(),
            Some("2030-01-01T00:00:00Z")
        );
        store.remove(SESSION_EXPIRY_KEY).unwrap();
        assert_eq!(store.get(SESSION_EXPIRY_KEY).unwrap(), None);
    }

    #[test]
    fn file_store_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ nope").unwrap();
        let store = FileSessionStore::new(&path);
        assert!(matches!(
            store.get(SESSION_EXPIRY_KEY),
            Err(EnrollError::Serialization(_))
        ));
    }
}
