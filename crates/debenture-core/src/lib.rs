//! # Debenture Core
//!
//! Core types, identifiers, and abstractions for the Debenture bond ledger.
//!
//! This crate provides the foundational building blocks used throughout
//! Debenture:
//!
//! - **Types**: Domain records like `Bond`, `Investment`, `LedgerEvent`
//! - **Identifiers**: Newtypes for bond and account identities
//! - **Clock**: A time source abstraction so tests can control "now"
//! - **Errors**: The ledger error taxonomy (`LedgerError`)
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Newtypes prevent mixing incompatible values
//! - **Exact Arithmetic**: All monetary math is integer arithmetic with
//!   truncating division; there is no floating point anywhere
//! - **Explicit Over Implicit**: No hidden singletons; every ledger owns
//!   its own state and clock
//!
//! ## Example
//!
//! ```rust
//! use debenture_core::prelude::*;
//!
//! let issuer = AccountId::new("treasury-desk");
//! let bond = BondId::new(1);
//! assert_eq!(bond.value(), 1);
//! assert_eq!(issuer.as_str(), "treasury-desk");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod time;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{LedgerError, LedgerResult};
    pub use crate::time::{Clock, ManualClock, SystemClock};
    pub use crate::types::{
        AccountId, Bond, BondDetails, BondId, Investment, InvestmentDetails, LedgerEvent,
    };
}

// Re-export commonly used types at crate root
pub use error::{LedgerError, LedgerResult};
pub use time::{Clock, ManualClock, SystemClock};
pub use types::{AccountId, Bond, BondDetails, BondId, Investment, InvestmentDetails, LedgerEvent};
