//! Wall-clock source.

/// Source of the current unix time in whole seconds.
pub trait Clock: Send + Sync + std::fmt::Debug + 'static {
    /// Current unix time in seconds.
    fn now(&self) -> i64;
}

/// [`Clock`] backed by the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}
