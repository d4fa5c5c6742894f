//! Ledger notification events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{AccountId, BondId};

/// Notification record emitted once per successful mutating operation.
///
/// Events form the external audit trail: exactly one per successful call,
/// never one for a failed call, appended only after the operation's state
/// changes and transfers have committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// A new bond was issued.
    BondIssued {
        /// Identifier of the new bond.
        bond_id: BondId,
        /// Issuing account.
        issuer: AccountId,
        /// Bond display name.
        name: String,
        /// Face value per unit.
        face_value: u128,
        /// Fixed unit count.
        total_supply: u64,
    },
    /// An investor purchased units of a bond.
    BondPurchased {
        /// Bond purchased.
        bond_id: BondId,
        /// Purchasing account.
        investor: AccountId,
        /// Units purchased in this call.
        amount: u64,
        /// Ledger time of the purchase.
        timestamp: DateTime<Utc>,
    },
    /// An investor claimed accrued coupon interest.
    CouponClaimed {
        /// Bond claimed against.
        bond_id: BondId,
        /// Claiming account.
        investor: AccountId,
        /// Amount paid out, in the settlement denomination.
        coupon_amount: u128,
    },
}

impl LedgerEvent {
    /// The bond this event concerns.
    pub fn bond_id(&self) -> BondId {
        match self {
            Self::BondIssued { bond_id, .. }
            | Self::BondPurchased { bond_id, .. }
            | Self::CouponClaimed { bond_id, .. } => *bond_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_tag() {
        let event = LedgerEvent::CouponClaimed {
            bond_id: BondId::new(3),
            investor: AccountId::new("alice"),
            coupon_amount: 41,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "coupon_claimed");
        assert_eq!(json["coupon_amount"], 41);
    }

    #[test]
    fn test_event_bond_id() {
        let event = LedgerEvent::BondIssued {
            bond_id: BondId::new(9),
            issuer: AccountId::new("issuer"),
            name: "Note".into(),
            face_value: 100,
            total_supply: 10,
        };
        assert_eq!(event.bond_id(), BondId::new(9));
    }
}
