//! Domain types for the bond ledger.

mod bond;
mod event;
mod ids;
mod investment;

pub use bond::{Bond, BondDetails, BASIS_POINT_DENOMINATOR, MAX_COUPON_RATE_BPS};
pub use event::LedgerEvent;
pub use ids::{AccountId, BondId};
pub use investment::{Investment, InvestmentDetails, CLAIM_PERIOD_SECONDS, MONTHS_PER_YEAR};
