//! The Bond Ledger engine.
//!
//! Holds authoritative state for all bonds and per-investor positions and
//! applies issuance, purchase, and coupon-claim operations as atomic,
//! validated state transitions. Every mutating operation validates first,
//! mutates second, settles third, and records its audit event last; a
//! refused settlement transfer rolls the mutation back before the bond
//! lock is released, so callers never observe partial application.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use tracing::warn;

use debenture_core::types::{BASIS_POINT_DENOMINATOR, MAX_COUPON_RATE_BPS, MONTHS_PER_YEAR};
use debenture_core::{
    AccountId, Bond, BondDetails, BondId, Clock, Investment, InvestmentDetails, LedgerError,
    LedgerEvent, LedgerResult,
};

use crate::events::EventLog;
use crate::settlement::SettlementBackend;

/// Everything the ledger knows about one bond.
///
/// Guarded by a single mutex so that all mutating operations against the
/// bond are serialized, and so that no reader can observe the supply
/// decremented without the matching investment recorded.
struct BondState {
    bond: Bond,
    investments: HashMap<AccountId, Investment>,
    /// Accounts that have ever invested in this bond. Written once per
    /// new investor, kept for the audit surface; no current operation
    /// reads it to make a decision.
    investors: HashSet<AccountId>,
}

/// The bond ledger and settlement engine.
///
/// An explicitly owned instance: construct one per deployment (or per
/// test) and share it by `Arc`. There are no process-wide singletons.
///
/// Coupons are paid from the ledger's treasury account, which must be
/// pre-funded through the settlement backend; an under-funded treasury
/// fails the claim without mutating state.
pub struct BondLedger {
    clock: Arc<dyn Clock>,
    settlement: Arc<dyn SettlementBackend>,
    treasury: AccountId,
    /// Next identifier to allocate. Guards allocation so ids stay dense
    /// from 1 even under concurrent issuance.
    next_id: Mutex<u64>,
    bonds: RwLock<HashMap<BondId, Arc<Mutex<BondState>>>>,
    events: EventLog,
}

impl BondLedger {
    /// Creates an empty ledger.
    ///
    /// `treasury` names the account coupons are paid from.
    pub fn new(
        clock: Arc<dyn Clock>,
        settlement: Arc<dyn SettlementBackend>,
        treasury: AccountId,
    ) -> Self {
        Self {
            clock,
            settlement,
            treasury,
            next_id: Mutex::new(1),
            bonds: RwLock::new(HashMap::new()),
            events: EventLog::new(),
        }
    }

    /// The account coupons are paid from.
    pub fn treasury(&self) -> &AccountId {
        &self.treasury
    }

    // =========================================================================
    // MUTATING OPERATIONS
    // =========================================================================

    /// Issues a new bond and returns its identifier.
    ///
    /// Preconditions: `face_value > 0`; `maturity` strictly in the
    /// future; `coupon_rate_bps` in `1..=10000`; `total_supply > 0`.
    /// A violation fails with a [`LedgerError::Validation`] naming the
    /// offending field and writes nothing.
    pub fn issue_bond(
        &self,
        issuer: AccountId,
        name: impl Into<String>,
        face_value: u128,
        maturity: DateTime<Utc>,
        coupon_rate_bps: u32,
        total_supply: u64,
    ) -> LedgerResult<BondId> {
        let now = self.clock.now();

        if face_value == 0 {
            return Err(LedgerError::validation(
                "face_value",
                "must be greater than zero",
            ));
        }
        if maturity <= now {
            return Err(LedgerError::validation(
                "maturity",
                "must be in the future",
            ));
        }
        if coupon_rate_bps == 0 || coupon_rate_bps > MAX_COUPON_RATE_BPS {
            return Err(LedgerError::validation(
                "coupon_rate",
                format!("must be between 1 and {MAX_COUPON_RATE_BPS} basis points"),
            ));
        }
        if total_supply == 0 {
            return Err(LedgerError::validation(
                "total_supply",
                "must be greater than zero",
            ));
        }

        let name = name.into();

        // Allocate the id and publish the bond under the same guard so
        // identifiers stay dense in issuance order.
        let mut next_id = self.next_id.lock();
        let id = BondId::new(*next_id);

        let bond = Bond {
            id,
            issuer: issuer.clone(),
            name: name.clone(),
            face_value,
            maturity,
            coupon_rate_bps,
            total_supply,
            available_supply: total_supply,
            is_active: true,
        };

        self.bonds.write().insert(
            id,
            Arc::new(Mutex::new(BondState {
                bond,
                investments: HashMap::new(),
                investors: HashSet::new(),
            })),
        );
        *next_id += 1;
        drop(next_id);

        self.events.record(LedgerEvent::BondIssued {
            bond_id: id,
            issuer,
            name,
            face_value,
            total_supply,
        });

        Ok(id)
    }

    /// Purchases `amount` units of `bond_id` for `buyer`.
    ///
    /// `payment` is the value the buyer attaches to the call; it must
    /// cover `face_value * amount` exactly or more. The buyer is debited
    /// only the exact cost, so the excess authorization of
    /// `payment - cost` is refunded by never leaving the buyer's
    /// account.
    pub fn purchase_bond(
        &self,
        buyer: AccountId,
        bond_id: BondId,
        amount: u64,
        payment: u128,
    ) -> LedgerResult<()> {
        let handle = self
            .bond_handle(bond_id)
            .ok_or_else(|| LedgerError::validation("bond_id", "unknown bond"))?;
        let mut state = handle.lock();
        let now = self.clock.now();

        let BondState {
            bond,
            investments,
            investors,
        } = &mut *state;

        if !bond.is_active {
            return Err(LedgerError::validation("bond_id", "bond is not active"));
        }
        if amount == 0 {
            return Err(LedgerError::validation(
                "amount",
                "must be greater than zero",
            ));
        }
        if amount > bond.available_supply {
            return Err(LedgerError::validation(
                "amount",
                format!(
                    "exceeds available supply ({} units remaining)",
                    bond.available_supply
                ),
            ));
        }
        if bond.is_matured(now) {
            return Err(LedgerError::validation("maturity", "bond has matured"));
        }
        let cost = bond
            .cost_of(amount)
            .ok_or_else(|| LedgerError::validation("amount", "purchase cost overflows"))?;
        if payment < cost {
            return Err(LedgerError::insufficient_payment(cost, payment));
        }

        // Mutate before settling: supply and position first, value second.
        let prior_position = investments.get(&buyer).cloned();
        bond.available_supply -= amount;
        match investments.get_mut(&buyer) {
            Some(position) => position.amount += amount,
            None => {
                investments.insert(buyer.clone(), Investment::opened(amount, now));
                investors.insert(buyer.clone());
            }
        }

        if let Err(err) = self.settlement.transfer(&buyer, &bond.issuer, cost) {
            warn!(bond_id = bond_id.value(), buyer = %buyer, %err, "purchase settlement refused, rolling back");
            bond.available_supply += amount;
            match prior_position {
                Some(position) => {
                    investments.insert(buyer.clone(), position);
                }
                None => {
                    investments.remove(&buyer);
                    investors.remove(&buyer);
                }
            }
            return Err(err.into());
        }

        self.events.record(LedgerEvent::BondPurchased {
            bond_id,
            investor: buyer,
            amount,
            timestamp: now,
        });

        Ok(())
    }

    /// Claims accrued coupon interest for `caller` on `bond_id`.
    ///
    /// At least one full 30-day period must have elapsed since the last
    /// claim. The payout is integer arithmetic in a fixed order:
    /// `annual = amount * face_value * rate_bps / 10000` (one combined
    /// numerator, truncating division), then `annual * periods / 12`
    /// (truncating). The claim clock resets to *now*, so a fractional
    /// period beyond the last full one is lost, never banked.
    ///
    /// Returns the coupon amount paid.
    pub fn claim_coupon(&self, caller: AccountId, bond_id: BondId) -> LedgerResult<u128> {
        let no_investment =
            || LedgerError::validation("investment", "no investment found for this bond");

        let handle = self.bond_handle(bond_id).ok_or_else(no_investment)?;
        let mut state = handle.lock();
        let now = self.clock.now();

        let BondState {
            bond, investments, ..
        } = &mut *state;

        let Some(position) = investments.get_mut(&caller) else {
            return Err(no_investment());
        };
        if position.amount == 0 {
            return Err(no_investment());
        }
        if !bond.is_active {
            return Err(LedgerError::validation("bond_id", "bond is not active"));
        }
        if bond.is_matured(now) {
            return Err(LedgerError::validation("maturity", "bond has matured"));
        }
        let periods = position.claim_periods_elapsed(now);
        if periods < 1 {
            return Err(LedgerError::validation(
                "claim_period",
                "claim period not reached (30 days between claims)",
            ));
        }

        let overflow = || LedgerError::validation("coupon", "coupon computation overflows");
        let annual_coupon = u128::from(position.amount)
            .checked_mul(bond.face_value)
            .and_then(|v| v.checked_mul(u128::from(bond.coupon_rate_bps)))
            .ok_or_else(overflow)?
            / BASIS_POINT_DENOMINATOR;
        let coupon = annual_coupon
            .checked_mul(periods as u128)
            .ok_or_else(overflow)?
            / MONTHS_PER_YEAR;

        // Claim clock advances before the payout leaves the treasury.
        let prior_claim = position.last_coupon_claim;
        position.last_coupon_claim = now;

        if let Err(err) = self.settlement.transfer(&self.treasury, &caller, coupon) {
            warn!(bond_id = bond_id.value(), caller = %caller, %err, "coupon settlement refused, rolling back");
            position.last_coupon_claim = prior_claim;
            return Err(err.into());
        }

        self.events.record(LedgerEvent::CouponClaimed {
            bond_id,
            investor: caller,
            coupon_amount: coupon,
        });

        Ok(coupon)
    }

    // =========================================================================
    // READ-ONLY ACCESSORS
    // =========================================================================

    /// Snapshot of a bond. Unknown identifiers yield the zero-valued
    /// snapshot rather than an error.
    pub fn bond_details(&self, bond_id: BondId) -> BondDetails {
        match self.bond_handle(bond_id) {
            Some(handle) => handle.lock().bond.details(),
            None => BondDetails::default(),
        }
    }

    /// Snapshot of an investor's position. Absent positions yield the
    /// zero-valued snapshot.
    pub fn investment_details(&self, investor: &AccountId, bond_id: BondId) -> InvestmentDetails {
        match self.bond_handle(bond_id) {
            Some(handle) => handle
                .lock()
                .investments
                .get(investor)
                .map(Investment::details)
                .unwrap_or_default(),
            None => InvestmentDetails::default(),
        }
    }

    /// Count of bonds ever issued.
    pub fn total_bonds(&self) -> u64 {
        *self.next_id.lock() - 1
    }

    /// Copy of the audit trail, in commit order.
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.events.snapshot()
    }

    fn bond_handle(&self, bond_id: BondId) -> Option<Arc<Mutex<BondState>>> {
        self.bonds.read().get(&bond_id).cloned()
    }
}
