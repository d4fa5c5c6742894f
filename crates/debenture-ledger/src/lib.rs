//! # Debenture Ledger
//!
//! The Bond Ledger: authoritative state for all bonds and per-investor
//! positions, applying issuance, purchase, and coupon-claim operations as
//! atomic, validated state transitions.
//!
//! Every operation is whole-call atomic and serialized per bond:
//!
//! - Mutating operations on one bond are serialized by a per-bond mutex;
//!   unrelated bonds proceed concurrently.
//! - "Supply update + investment record + transfer" executes as an
//!   all-or-nothing unit: a refused settlement transfer rolls back the
//!   state mutation before the bond lock is released.
//! - Reads take the same per-bond lock briefly, so a snapshot never
//!   observes supply decremented without the investment recorded.
//!
//! Value movement is delegated to a [`SettlementBackend`], consumed as a
//! given primitive alongside the clock and caller identity.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::{Duration, Utc};
//! use debenture_core::prelude::*;
//! use debenture_ledger::{BondLedger, InMemorySettlement, SettlementBackend};
//!
//! let clock = Arc::new(SystemClock);
//! let settlement = Arc::new(InMemorySettlement::new());
//! let ledger = BondLedger::new(clock, settlement.clone(), AccountId::new("treasury"));
//!
//! settlement.deposit(&AccountId::new("alice"), 10_000).unwrap();
//!
//! let bond_id = ledger
//!     .issue_bond(
//!         AccountId::new("issuer"),
//!         "Demo 5% 2099",
//!         100,
//!         Utc::now() + Duration::days(365),
//!         500,
//!         1_000,
//!     )
//!     .unwrap();
//!
//! ledger.purchase_bond(AccountId::new("alice"), bond_id, 10, 1_000).unwrap();
//! assert_eq!(ledger.bond_details(bond_id).available_supply, 990);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod events;
pub mod ledger;
pub mod settlement;

pub use events::EventLog;
pub use ledger::BondLedger;
pub use settlement::{InMemorySettlement, SettlementBackend, SettlementError, SettlementResult};
