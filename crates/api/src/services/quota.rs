//! Plan quota admission.

/// Whether a new record may be admitted under the event's quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaDecision {
    Admit,
    Reject,
}

/// Admission guard for one event resource quota.
///
/// A limit of zero or below means unlimited. The guard only reads counts; the
/// authoritative re-check happens inside the insert transaction, so a stale
/// count here can never push an event over its limit.
#[derive(Debug, Clone, Copy)]
pub struct QuotaGuard {
    limit: i32,
}

impl QuotaGuard {
    pub fn new(limit: i32) -> Self {
        Self { limit }
    }

    pub fn admit(&self, current_count: i64) -> QuotaDecision {
        if self.limit <= 0 || current_count < self.limit as i64 {
            QuotaDecision::Admit
        } else {
            QuotaDecision::Reject
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admits_below_limit() {
        let guard = QuotaGuard::new(200);
        assert_eq!(guard.admit(0), QuotaDecision::Admit);
        assert_eq!(guard.admit(199), QuotaDecision::Admit);
    }

    #[test]
    fn test_rejects_at_limit() {
        let guard = QuotaGuard::new(200);
        assert_eq!(guard.admit(200), QuotaDecision::Reject);
        assert_eq!(guard.admit(500), QuotaDecision::Reject);
    }

    #[test]
    fn test_zero_limit_is_unlimited() {
        let guard = QuotaGuard::new(0);
        assert_eq!(guard.admit(1_000_000), QuotaDecision::Admit);
    }

    #[test]
    fn test_negative_limit_is_unlimited() {
        let guard = QuotaGuard::new(-1);
        assert_eq!(guard.admit(42), QuotaDecision::Admit);
    }
}
