//! Token issuance and validation.
//!
//! [`TokenAuthority`] composes the credential verifier, the durable session
//! store and the in-memory [`SessionCache`]. Issuance goes to the store and
//! then the cache; validation never touches the store.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use vault_core::config::{AuthConfig, DatabaseConfig};
use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::traits::{Clock, CredentialVerifier, SessionStore};
use vault_core::types::SessionRecord;

use crate::error::{AuthError, AuthFailure};
use crate::session::{CacheJanitor, SessionCache};
use crate::token::{ClaimValidator, Claims, TokenCodec};

/// Runtime settings of the authority.
#[derive(Debug, Clone)]
pub struct AuthoritySettings {
    pub hmac_secret: String,
    pub token_ttl: Duration,
    pub cleanup_interval: Duration,
    /// Budget for each store call made while serving a request.
    pub query_timeout: Duration,
    /// Budget for each janitor delete.
    pub delete_timeout: Duration,
}

impl AuthoritySettings {
    /// Settings taken from the `[auth]` and `[database]` config sections.
    pub fn from_config(auth: &AuthConfig, database: &DatabaseConfig) -> Self {
        Self {
            hmac_secret: auth.hmac_secret.clone(),
            token_ttl: auth.token_ttl(),
            cleanup_interval: auth.cache_cleanup_interval(),
            query_timeout: database.query_timeout(),
            delete_timeout: database.delete_session_timeout(),
        }
    }
}

/// A freshly minted token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Wire form, as presented by clients.
    pub token: String,
    /// Expiry, unix seconds.
    pub expires_at: i64,
}

/// Issues tokens, validates them, and owns the cache janitor.
pub struct TokenAuthority {
    store: Arc<dyn SessionStore>,
    verifier: Arc<dyn CredentialVerifier>,
    clock: Arc<dyn Clock>,
    cache: Arc<SessionCache>,
    codec: TokenCodec,
    validator: ClaimValidator,
    ttl_seconds: i64,
    query_timeout: Duration,
    shutdown_tx: watch::Sender<bool>,
    shut_down: AtomicBool,
    janitor: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("ttl_seconds", &self.ttl_seconds)
            .field("query_timeout", &self.query_timeout)
            .field("shut_down", &self.shut_down.load(Ordering::SeqCst))
            .finish()
    }
}

impl TokenAuthority {
    /// Load active sessions from the store and start the janitor.
    ///
    /// A failed load is not fatal: the cache starts empty and users simply
    /// authenticate again.
    pub async fn start(
        settings: AuthoritySettings,
        store: Arc<dyn SessionStore>,
        verifier: Arc<dyn CredentialVerifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let ttl_seconds = i64::try_from(settings.token_ttl.as_secs()).unwrap_or(i64::MAX);
        let cache = Arc::new(SessionCache::new());

        match time_bounded(settings.query_timeout, store.get_active_sessions()).await {
            Ok(sessions) => {
                info!(sessions = sessions.len(), "Session cache loaded from store");
                cache.load(sessions).await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to load active sessions, starting with an empty cache");
            }
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let janitor = CacheJanitor::new(
            cache.clone(),
            store.clone(),
            clock.clone(),
            settings.cleanup_interval,
            settings.delete_timeout,
        );
        let handle = tokio::spawn(janitor.run(shutdown_rx));

        Self {
            store,
            verifier,
            clock,
            cache,
            codec: TokenCodec::new(&settings.hmac_secret),
            validator: ClaimValidator::new(ttl_seconds),
            ttl_seconds,
            query_timeout: settings.query_timeout,
            shutdown_tx,
            shut_down: AtomicBool::new(false),
            janitor: Mutex::new(Some(handle)),
        }
    }

    /// Authenticate `login` with `password` and issue a new token.
    ///
    /// Any previous token of the login stops validating once this returns.
    pub async fn get_token(&self, login: &str, password: &str) -> Result<IssuedToken, AuthError> {
        let hash = self
            .store_call("get_password_hash", self.store.get_password_hash(login))
            .await?;
        let Some(hash) = hash else {
            self.verify_absent(password).await;
            warn!(login = %login, reason = "unknown_login", "Credential check failed");
            return Err(AuthError::failed(AuthFailure::UnknownLogin));
        };

        if !self.verify_password(hash, password).await? {
            warn!(login = %login, reason = "wrong_password", "Credential check failed");
            return Err(AuthError::failed(AuthFailure::WrongPassword));
        }

        let iat = self.clock.now();
        let exp = iat + self.ttl_seconds;
        let claims = Claims::new(login, iat, exp);
        let token = self.codec.encode(&claims).map_err(AuthError::Internal)?;

        self.store_call(
            "upsert_session",
            self.store.upsert_session(login, &token, iat, exp),
        )
        .await?;
        self.cache
            .set(login, SessionRecord::new(token.clone(), exp))
            .await;

        info!(login = %login, expires_at = exp, "Token issued");
        Ok(IssuedToken {
            token,
            expires_at: exp,
        })
    }

    /// Validate a wire token and return the login it belongs to.
    pub async fn validate_token(&self, token: &str) -> Result<String, AuthError> {
        let raw = self.codec.decode(token).map_err(reject)?;
        let claims = self
            .validator
            .validate(&raw, self.clock.now())
            .map_err(|v| reject(v.into()))?;

        match self.cache.get(&claims.login).await {
            Some(record) if record.token == token => Ok(claims.login),
            Some(_) => Err(reject(AuthFailure::Superseded)),
            None => Err(reject(AuthFailure::NoSession)),
        }
    }

    /// Number of sessions currently held in the cache.
    pub async fn active_sessions(&self) -> usize {
        self.cache.len().await
    }

    /// Stop the janitor and wait for it to exit. Later calls do nothing.
    pub async fn shutdown(&self) {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            debug!("Token authority already shut down");
            return;
        }

        self.shutdown_tx.send_replace(true);
        let handle = self.janitor.lock().await.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                error!(error = %e, "Session cache janitor terminated abnormally");
            }
        }
        info!("Token authority shut down");
    }

    async fn verify_password(&self, hash: String, password: &str) -> Result<bool, AuthError> {
        let verifier = self.verifier.clone();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || verifier.verify(&hash, &password))
            .await
            .map_err(|e| AuthError::Internal(AppError::internal(format!("Verifier task failed: {e}"))))?
            .map_err(|e| {
                error!(error = %e, "Stored password hash is unusable");
                AuthError::Internal(e)
            })
    }

    async fn verify_absent(&self, password: &str) {
        let verifier = self.verifier.clone();
        let password = password.to_string();
        if let Err(e) = tokio::task::spawn_blocking(move || verifier.verify_absent(&password)).await
        {
            error!(error = %e, "Verifier task failed");
        }
    }

    async fn store_call<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = AppResult<T>>,
    ) -> Result<T, AuthError> {
        time_bounded(self.query_timeout, call).await.map_err(|e| {
            error!(operation, error = %e, "Session store call failed");
            AuthError::StoreUnavailable { source: e }
        })
    }
}

async fn time_bounded<T>(
    limit: Duration,
    call: impl Future<Output = AppResult<T>>,
) -> AppResult<T> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(AppError::timeout(format!(
            "Session store did not answer within {} ms",
            limit.as_millis()
        ))),
    }
}

fn reject(cause: AuthFailure) -> AuthError {
    debug!(reason = cause.reason(), cause = %cause, "Token rejected");
    AuthError::failed(cause)
}
