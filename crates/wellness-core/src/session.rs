//! In-memory conversation sessions.
//!
//! The store maps `(app_name, user_id, session_id)` to a shared [`Session`]
//! handle. Sessions are created lazily and live for the whole process; there
//! is no eviction, expiry, or capacity bound.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use wellness_types::llm::Message;

/// Uniqueness key of a session in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub app_name: String,
    pub user_id: String,
    pub session_id: String,
}

impl SessionKey {
    pub fn new(
        app_name: impl Into<String>,
        user_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            user_id: user_id.into(),
            session_id: session_id.into(),
        }
    }
}

/// A conversation line: its key plus the turns exchanged so far.
#[derive(Debug)]
pub struct Session {
    key: SessionKey,
    /// Locked for the duration of a turn so turns on one line never interleave.
    history: Mutex<Vec<Message>>,
}

impl Session {
    fn new(key: SessionKey) -> Self {
        Self {
            key,
            history: Mutex::new(Vec::new()),
        }
    }

    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    /// Exclusive access to the turn history.
    pub fn history(&self) -> &Mutex<Vec<Message>> {
        &self.history
    }
}

/// Process-wide session registry.
///
/// Look-up-or-create goes through the `DashMap` entry API, so concurrent
/// first requests for the same key always observe one handle.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<SessionKey, Arc<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the session for the key, creating and registering it if absent.
    pub fn get_or_create(&self, app_name: &str, user_id: &str, session_id: &str) -> Arc<Session> {
        let key = SessionKey::new(app_name, user_id, session_id);
        let entry = self.sessions.entry(key.clone()).or_insert_with(|| {
            tracing::debug!(session_id = %key.session_id, "Creating session");
            Arc::new(Session::new(key))
        });
        Arc::clone(entry.value())
    }

    pub fn get(&self, key: &SessionKey) -> Option<Arc<Session>> {
        self.sessions.get(key).map(|entry| Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_reuses_handle() {
        let store = SessionStore::new();
        let first = store.get_or_create("app", "user", "s1");
        let second = store.get_or_create("app", "user", "s1");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_distinct_keys_get_distinct_sessions() {
        let store = SessionStore::new();
        let a = store.get_or_create("app", "user", "s1");
        let b = store.get_or_create("app", "user", "s2");
        let c = store.get_or_create("app", "other", "s1");
        assert!(!Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_get_without_create() {
        let store = SessionStore::new();
        let key = SessionKey::new("app", "user", "s1");
        assert!(store.get(&key).is_none());
        assert!(store.is_empty());

        let created = store.get_or_create("app", "user", "s1");
        let fetched = store.get(&key).unwrap();
        assert!(Arc::ptr_eq(&created, &fetched));
        assert_eq!(fetched.key(), &key);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_use_creates_one_session() {
        let store = Arc::new(SessionStore::new());
        let mut handles = Vec::new();
        for _ in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.get_or_create("app", "user", "shared")
            }));
        }

        let mut sessions = Vec::new();
        for handle in handles {
            sessions.push(handle.await.unwrap());
        }

        assert_eq!(store.len(), 1);
        assert!(sessions.iter().all(|s| Arc::ptr_eq(s, &sessions[0])));
    }

    #[tokio::test]
    async fn test_new_session_has_empty_history() {
        let store = SessionStore::new();
        let session = store.get_or_create("app", "user", "s1");
        assert!(session.history().lock().await.is_empty());
    }
}
