//! Bond records and snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{AccountId, BondId};

/// Denominator for coupon rates expressed in basis points (10000 = 100%).
pub const BASIS_POINT_DENOMINATOR: u128 = 10_000;

/// Highest admissible coupon rate (100%).
pub const MAX_COUPON_RATE_BPS: u32 = 10_000;

/// Authoritative record for a single issued bond.
///
/// Created once by issuance and never deleted. `available_supply` is the
/// only field that changes afterwards; it only ever decreases, via
/// purchases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bond {
    /// Ledger-allocated identifier, dense starting at 1.
    pub id: BondId,
    /// Account that issued the bond; receives purchase proceeds.
    pub issuer: AccountId,
    /// Display name.
    pub name: String,
    /// Value of one unit, in the smallest settlement denomination.
    pub face_value: u128,
    /// Timestamp after which the bond can no longer be purchased or
    /// accrue claimable coupons.
    pub maturity: DateTime<Utc>,
    /// Annual coupon rate in basis points (1..=10000).
    pub coupon_rate_bps: u32,
    /// Unit count fixed at issuance.
    pub total_supply: u64,
    /// Unsold units remaining for purchase.
    pub available_supply: u64,
    /// Written `true` at issuance. No deactivation path exists; the flag
    /// is retained because downstream consumers read it.
    pub is_active: bool,
}

impl Bond {
    /// True if the bond has reached its maturity date at `now`.
    ///
    /// Maturity is inclusive: a bond matures the instant `now` equals
    /// `maturity`.
    pub fn is_matured(&self, now: DateTime<Utc>) -> bool {
        now >= self.maturity
    }

    /// Purchase cost of `amount` units: `face_value * amount`.
    ///
    /// Returns `None` on arithmetic overflow.
    pub fn cost_of(&self, amount: u64) -> Option<u128> {
        self.face_value.checked_mul(u128::from(amount))
    }

    /// Read-only snapshot of this bond.
    pub fn details(&self) -> BondDetails {
        BondDetails {
            id: self.id,
            issuer: self.issuer.clone(),
            name: self.name.clone(),
            face_value: self.face_value,
            maturity: self.maturity,
            coupon_rate_bps: self.coupon_rate_bps,
            total_supply: self.total_supply,
            available_supply: self.available_supply,
            is_active: self.is_active,
        }
    }
}

/// Read-only bond snapshot returned by the detail accessor.
///
/// Looking up an identifier that was never issued yields the zero-valued
/// snapshot rather than an error; absent timestamps default to the Unix
/// epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondDetails {
    /// Bond identifier (0 when absent).
    pub id: BondId,
    /// Issuer account (empty when absent).
    pub issuer: AccountId,
    /// Display name (empty when absent).
    pub name: String,
    /// Face value per unit (0 when absent).
    pub face_value: u128,
    /// Maturity timestamp (epoch when absent).
    pub maturity: DateTime<Utc>,
    /// Coupon rate in basis points (0 when absent).
    pub coupon_rate_bps: u32,
    /// Total unit count (0 when absent).
    pub total_supply: u64,
    /// Unsold unit count (0 when absent).
    pub available_supply: u64,
    /// Active flag (false when absent).
    pub is_active: bool,
}

impl Default for BondDetails {
    fn default() -> Self {
        Self {
            id: BondId::new(0),
            issuer: AccountId::default(),
            name: String::new(),
            face_value: 0,
            maturity: DateTime::UNIX_EPOCH,
            coupon_rate_bps: 0,
            total_supply: 0,
            available_supply: 0,
            is_active: false,
        }
    }
}
