//! Active session record.

use serde::{Deserialize, Serialize};

/// The token currently accepted for a login and its expiry (unix seconds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub token: String,
    pub expires_at: i64,
}

impl SessionRecord {
    /// Creates a session record.
    pub fn new(token: impl Into<String>, expires_at: i64) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// Whether the record has expired at `now`. A record is still live during
    /// its final second.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_boundary() {
        let record = SessionRecord::new("t", 4600);
        assert!(!record.is_expired_at(4599));
        assert!(!record.is_expired_at(4600));
        assert!(record.is_expired_at(4601));
    }
}
