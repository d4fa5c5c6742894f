//! Error types for the Debenture ledger.
//!
//! Two failure families exist: validation failures (malformed or
//! out-of-range input, unknown entities, state-incompatible requests) and
//! payment failures. Every precondition violation surfaces as a distinct,
//! caller-visible error, and no error leaves partial state behind.

use thiserror::Error;

/// A specialized Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// The main error type for ledger operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Malformed or out-of-range input, unknown entity, or a request the
    /// current state cannot satisfy (matured bond, claim too soon, ...).
    #[error("Validation failed for {field}: {reason}")]
    Validation {
        /// The offending field or precondition.
        field: &'static str,
        /// Description of the violation.
        reason: String,
    },

    /// Payment attached to a purchase is below the required cost.
    #[error("Insufficient payment: required {required}, provided {provided}")]
    InsufficientPayment {
        /// Exact cost of the purchase (`face_value * amount`).
        required: u128,
        /// Payment amount attached to the call.
        provided: u128,
    },

    /// The settlement substrate refused a value transfer. The triggering
    /// operation's state mutation has been rolled back.
    #[error("Settlement failed: {reason}")]
    Settlement {
        /// Description of the transfer failure.
        reason: String,
    },
}

impl LedgerError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Creates an insufficient payment error.
    #[must_use]
    pub fn insufficient_payment(required: u128, provided: u128) -> Self {
        Self::InsufficientPayment { required, provided }
    }

    /// Creates a settlement error.
    #[must_use]
    pub fn settlement(reason: impl Into<String>) -> Self {
        Self::Settlement {
            reason: reason.into(),
        }
    }
}
