//! Investor positions and the coupon claim schedule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Length of one coupon claim period: 30 days, fixed, not configurable.
pub const CLAIM_PERIOD_SECONDS: i64 = 30 * 86_400;

/// Number of 30-day coupon periods in an annual coupon.
pub const MONTHS_PER_YEAR: u128 = 12;

/// A single investor's position in one bond.
///
/// Created on the investor's first purchase, updated in place afterwards,
/// never deleted. `amount` only grows; `last_coupon_claim` only advances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investment {
    /// Units held.
    pub amount: u64,
    /// Timestamp of the first purchase. Immutable after creation.
    pub purchase_date: DateTime<Utc>,
    /// Timestamp of the most recent coupon claim. Initialized to
    /// `purchase_date`, so the first claim window starts at purchase.
    pub last_coupon_claim: DateTime<Utc>,
}

impl Investment {
    /// Create a fresh position from a first purchase at `now`.
    pub fn opened(amount: u64, now: DateTime<Utc>) -> Self {
        Self {
            amount,
            purchase_date: now,
            last_coupon_claim: now,
        }
    }

    /// Whole 30-day periods elapsed between the last claim and `now`.
    ///
    /// Floor division; fractional periods are not counted and, because a
    /// claim resets `last_coupon_claim` to the claim time, never banked.
    pub fn claim_periods_elapsed(&self, now: DateTime<Utc>) -> i64 {
        let elapsed = (now - self.last_coupon_claim).num_seconds();
        if elapsed < 0 {
            0
        } else {
            elapsed / CLAIM_PERIOD_SECONDS
        }
    }

    /// Read-only snapshot of this position.
    pub fn details(&self) -> InvestmentDetails {
        InvestmentDetails {
            amount: self.amount,
            purchase_date: self.purchase_date,
            last_coupon_claim: self.last_coupon_claim,
        }
    }
}

/// Read-only investment snapshot returned by the detail accessor.
///
/// Absent positions yield the zero-valued snapshot, same contract as
/// [`super::BondDetails`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentDetails {
    /// Units held (0 when absent).
    pub amount: u64,
    /// First purchase timestamp (epoch when absent).
    pub purchase_date: DateTime<Utc>,
    /// Last coupon claim timestamp (epoch when absent).
    pub last_coupon_claim: DateTime<Utc>,
}

impl Default for InvestmentDetails {
    fn default() -> Self {
        Self {
            amount: 0,
            purchase_date: DateTime::UNIX_EPOCH,
            last_coupon_claim: DateTime::UNIX_EPOCH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_opened_initializes_claim_clock() {
        let now = Utc::now();
        let position = Investment::opened(10, now);
        assert_eq!(position.amount, 10);
        assert_eq!(position.purchase_date, now);
        assert_eq!(position.last_coupon_claim, now);
    }

    #[test]
    fn test_claim_periods_floor() {
        let now = Utc::now();
        let position = Investment::opened(10, now);

        assert_eq!(position.claim_periods_elapsed(now + Duration::days(29)), 0);
        assert_eq!(position.claim_periods_elapsed(now + Duration::days(30)), 1);
        assert_eq!(position.claim_periods_elapsed(now + Duration::days(59)), 1);
        assert_eq!(position.claim_periods_elapsed(now + Duration::days(90)), 3);
    }

    #[test]
    fn test_claim_periods_never_negative() {
        let now = Utc::now();
        let position = Investment::opened(10, now);
        assert_eq!(position.claim_periods_elapsed(now - Duration::days(1)), 0);
    }
}
