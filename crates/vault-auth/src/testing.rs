//! In-memory doubles for the session store and the clock.
//!
//! Available to this crate's tests and, through the `testing` feature, to
//! dependent crates' tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::traits::{Clock, CredentialVerifier, SessionStore};
use vault_core::types::SessionRecord;

/// Clock whose time only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// Clock frozen at `now` seconds.
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    /// Moves the clock forward by `seconds`.
    pub fn advance(&self, seconds: i64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Verifier that treats the stored hash as the plaintext password.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextVerifier;

impl CredentialVerifier for PlainTextVerifier {
    fn verify(&self, hash: &str, password: &str) -> AppResult<bool> {
        Ok(hash == password)
    }
}

#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<String, String>,
    sessions: HashMap<String, SessionRecord>,
    deleted: Vec<String>,
    unavailable: bool,
    fail_deletes: bool,
    latency: Duration,
}

/// [`SessionStore`] kept in process memory, with switches for simulating
/// outages and slow responses.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    state: Mutex<StoreState>,
}

impl MemorySessionStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a user whose stored hash is `hash`.
    pub fn add_user(&self, login: &str, hash: &str) {
        self.state().users.insert(login.to_string(), hash.to_string());
    }

    /// Seed an active session, as if written by an earlier process.
    pub fn insert_session(&self, login: &str, record: SessionRecord) {
        self.state().sessions.insert(login.to_string(), record);
    }

    /// The stored session for `login`, if any.
    pub fn active_session(&self, login: &str) -> Option<SessionRecord> {
        self.state().sessions.get(login).cloned()
    }

    /// Logins for which `delete_session` succeeded, in call order.
    pub fn deleted_logins(&self) -> Vec<String> {
        self.state().deleted.clone()
    }

    /// Make every call fail with a database error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state().unavailable = unavailable;
    }

    /// Make only `delete_session` fail.
    pub fn set_fail_deletes(&self, fail: bool) {
        self.state().fail_deletes = fail;
    }

    /// Delay every call by `latency` before answering.
    pub fn set_latency(&self, latency: Duration) {
        self.state().latency = latency;
    }

    async fn enter(&self) -> AppResult<()> {
        let (latency, unavailable) = {
            let state = self.state();
            (state.latency, state.unavailable)
        };
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        if unavailable {
            return Err(AppError::database("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get_password_hash(&self, login: &str) -> AppResult<Option<String>> {
        self.enter().await?;
        Ok(self.state().users.get(login).cloned())
    }

    async fn upsert_session(
        &self,
        login: &str,
        token: &str,
        _issued_at: i64,
        expires_at: i64,
    ) -> AppResult<()> {
        self.enter().await?;
        self.state()
            .sessions
            .insert(login.to_string(), SessionRecord::new(token, expires_at));
        Ok(())
    }

    async fn delete_session(&self, login: &str) -> AppResult<()> {
        self.enter().await?;
        let mut state = self.state();
        if state.fail_deletes {
            return Err(AppError::database("delete rejected"));
        }
        state.sessions.remove(login);
        state.deleted.push(login.to_string());
        Ok(())
    }

    async fn get_active_sessions(&self) -> AppResult<HashMap<String, SessionRecord>> {
        self.enter().await?;
        Ok(self.state().sessions.clone())
    }
}
