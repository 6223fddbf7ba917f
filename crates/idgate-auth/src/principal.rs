//! Authenticated end-user snapshot.

use time::OffsetDateTime;

/// The end user currently authenticated on the session, as supplied by the
/// session collaborator.
///
/// The pipeline only consumes this snapshot; establishing and refreshing
/// the session is out of scope.
#[derive(Debug, Clone)]
pub struct UserPrincipal {
    /// Stable user identifier.
    pub id: String,

    /// When the user last actively authenticated. Compared against the
    /// request's `max_age` to decide session freshness.
    pub last_authenticated_at: OffsetDateTime,
}

impl UserPrincipal {
    #[must_use]
    pub fn new(id: impl Into<String>, last_authenticated_at: OffsetDateTime) -> Self {
        Self {
            id: id.into(),
            last_authenticated_at,
        }
    }

    /// Returns `true` if the last authentication is older than `max_age`
    /// seconds at instant `now`.
    #[must_use]
    pub fn is_stale(&self, max_age: u64, now: OffsetDateTime) -> bool {
        let elapsed = now - self.last_authenticated_at;
        elapsed.whole_seconds() > max_age as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    #[test]
    fn test_fresh_session() {
        let now = OffsetDateTime::now_utc();
        let principal = UserPrincipal::new("user-1", now - Duration::seconds(60));
        assert!(!principal.is_stale(120, now));
    }

    #[test]
    fn test_stale_session() {
        let now = OffsetDateTime::now_utc();
        let principal = UserPrincipal::new("user-1", now - Duration::days(1));
        assert!(principal.is_stale(1, now));
    }

    #[test]
    fn test_max_age_zero_always_stale() {
        let now = OffsetDateTime::now_utc();
        let principal = UserPrincipal::new("user-1", now - Duration::seconds(1));
        assert!(principal.is_stale(0, now));
    }
}
