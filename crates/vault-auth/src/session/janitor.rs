//! Periodic removal of expired sessions.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use vault_core::traits::{Clock, SessionStore};

use super::cache::SessionCache;

/// Outcome of a single sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Entries found expired.
    pub expired: usize,
    /// Entries whose durable delete failed or timed out.
    pub failed: usize,
    /// Entries removed from the cache.
    pub evicted: usize,
}

/// Background task reconciling expired cache entries with the store.
///
/// Each sweep snapshots expired entries under the shared lock, deletes them
/// from the store with the lock released, then evicts only the entries whose
/// delete succeeded. Failed entries stay cached and are retried next tick.
#[derive(Debug, Clone)]
pub struct CacheJanitor {
    cache: Arc<SessionCache>,
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    interval: Duration,
    delete_timeout: Duration,
}

impl CacheJanitor {
    /// Creates a janitor over the shared cache and store.
    pub fn new(
        cache: Arc<SessionCache>,
        store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
        interval: Duration,
        delete_timeout: Duration,
    ) -> Self {
        Self {
            cache,
            store,
            clock,
            interval,
            delete_timeout,
        }
    }

    /// Sweep every `interval` until `cancel` turns true or its sender is dropped.
    pub async fn run(self, mut cancel: watch::Receiver<bool>) {
        info!(
            interval_secs = self.interval.as_secs(),
            "Session cache janitor started"
        );

        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let report = self.sweep().await;
                    if report.expired > 0 {
                        info!(
                            expired = report.expired,
                            evicted = report.evicted,
                            failed = report.failed,
                            "Session cache sweep completed"
                        );
                    }
                }
            }
        }

        info!("Session cache janitor stopped");
    }

    /// Run one snapshot, delete, evict pass.
    pub async fn sweep(&self) -> SweepReport {
        let now = self.clock.now();
        let expired = self.cache.snapshot_expired(now).await;
        if expired.is_empty() {
            return SweepReport::default();
        }

        let mut confirmed = Vec::with_capacity(expired.len());
        let mut failed = 0;
        for (login, token) in &expired {
            match time::timeout(self.delete_timeout, self.store.delete_session(login)).await {
                Ok(Ok(())) => {
                    debug!(login = %login, "Expired session deleted from store");
                    confirmed.push((login.clone(), token.clone()));
                }
                Ok(Err(e)) => {
                    failed += 1;
                    warn!(login = %login, error = %e, "Failed to delete expired session, will retry");
                }
                Err(_) => {
                    failed += 1;
                    warn!(
                        login = %login,
                        timeout_ms = self.delete_timeout.as_millis() as u64,
                        "Timed out deleting expired session, will retry"
                    );
                }
            }
        }

        let evicted = self.cache.remove_unchanged(&confirmed).await;
        SweepReport {
            expired: expired.len(),
            failed,
            evicted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ManualClock, MemorySessionStore};
    use vault_core::types::SessionRecord;

    struct Fixture {
        cache: Arc<SessionCache>,
        store: Arc<MemorySessionStore>,
        clock: Arc<ManualClock>,
        janitor: CacheJanitor,
    }

    fn fixture() -> Fixture {
        let cache = Arc::new(SessionCache::new());
        let store = Arc::new(MemorySessionStore::new());
        let clock = Arc::new(ManualClock::new(1000));
        let janitor = CacheJanitor::new(
            cache.clone(),
            store.clone(),
            clock.clone(),
            Duration::from_secs(60),
            Duration::from_millis(100),
        );
        Fixture {
            cache,
            store,
            clock,
            janitor,
        }
    }

    #[tokio::test]
    async fn test_sweep_evicts_only_expired_after_delete() {
        let f = fixture();
        f.cache.set("old", SessionRecord::new("a", 900)).await;
        f.cache.set("live", SessionRecord::new("b", 2000)).await;

        let report = f.janitor.sweep().await;

        assert_eq!(
            report,
            SweepReport {
                expired: 1,
                failed: 0,
                evicted: 1
            }
        );
        assert!(f.cache.get("old").await.is_none());
        assert!(f.cache.get("live").await.is_some());
        assert_eq!(f.store.deleted_logins(), vec!["old".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_entry_for_retry() {
        let f = fixture();
        f.cache.set("old", SessionRecord::new("a", 900)).await;
        f.store.set_fail_deletes(true);

        let report = f.janitor.sweep().await;
        assert_eq!(report.failed, 1);
        assert_eq!(report.evicted, 0);
        assert!(f.cache.get("old").await.is_some());

        f.store.set_fail_deletes(false);
        let report = f.janitor.sweep().await;
        assert_eq!(report.evicted, 1);
        assert!(f.cache.get("old").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_delete_times_out_and_keeps_entry() {
        let f = fixture();
        f.cache.set("old", SessionRecord::new("a", 900)).await;
        f.store.set_latency(Duration::from_secs(5));

        let report = f.janitor.sweep().await;

        assert_eq!(report.failed, 1);
        assert!(f.cache.get("old").await.is_some());
        assert!(f.store.deleted_logins().is_empty());
    }

    #[tokio::test]
    async fn test_nothing_expired_touches_nothing() {
        let f = fixture();
        f.cache.set("live", SessionRecord::new("b", 1000)).await;
        assert_eq!(f.janitor.sweep().await, SweepReport::default());
        f.clock.advance(1);
        assert_eq!(f.janitor.sweep().await.evicted, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_sweeps_on_tick_and_stops_on_cancel() {
        let f = fixture();
        f.cache.set("old", SessionRecord::new("a", 900)).await;
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(f.janitor.clone().run(rx));

        time::sleep(Duration::from_secs(61)).await;
        assert!(f.cache.get("old").await.is_none());

        tx.send_replace(true);
        handle.await.unwrap();
    }
}
