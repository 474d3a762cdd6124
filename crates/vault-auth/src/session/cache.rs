//! Concurrent login to session map.

use std::collections::HashMap;

use tokio::sync::RwLock;

use vault_core::types::SessionRecord;

/// Map of login to its currently accepted token.
///
/// Readers share the lock; writers hold it only for a single map operation.
/// No I/O is ever performed while the lock is held.
#[derive(Debug, Default)]
pub struct SessionCache {
    entries: RwLock<HashMap<String, SessionRecord>>,
}

impl SessionCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached session for `login`.
    pub async fn get(&self, login: &str) -> Option<SessionRecord> {
        self.entries.read().await.get(login).cloned()
    }

    /// Insert or replace the session of `login`.
    pub async fn set(&self, login: &str, record: SessionRecord) {
        self.entries.write().await.insert(login.to_string(), record);
    }

    /// Replace the whole cache content.
    pub async fn load(&self, sessions: HashMap<String, SessionRecord>) {
        *self.entries.write().await = sessions;
    }

    /// Number of cached sessions.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no sessions.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// `(login, token)` pairs whose record expired before `now`.
    pub async fn snapshot_expired(&self, now: i64) -> Vec<(String, String)> {
        self.entries
            .read()
            .await
            .iter()
            .filter(|(_, record)| record.is_expired_at(now))
            .map(|(login, record)| (login.clone(), record.token.clone()))
            .collect()
    }

    /// Remove each login whose cached token is still the one given.
    ///
    /// Entries replaced since the snapshot are left in place. Returns the
    /// number of entries removed.
    pub async fn remove_unchanged(&self, entries: &[(String, String)]) -> usize {
        if entries.is_empty() {
            return 0;
        }
        let mut map = self.entries.write().await;
        let mut removed = 0;
        for (login, token) in entries {
            if map.get(login).is_some_and(|record| &record.token == token) {
                map.remove(login);
                removed += 1;
            }
        }
        removed
    }
}
