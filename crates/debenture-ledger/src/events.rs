//! In-process audit trail.

use parking_lot::RwLock;
use tracing::info;

use debenture_core::LedgerEvent;

/// Append-only log of ledger notifications.
///
/// One record per successful mutating operation, appended after the
/// operation has committed. Failed operations leave no trace here; their
/// diagnostics go to `tracing` only.
#[derive(Default)]
pub struct EventLog {
    events: RwLock<Vec<LedgerEvent>>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event and mirrors it to `tracing` at info level.
    pub fn record(&self, event: LedgerEvent) {
        info!(bond_id = event.bond_id().value(), event = ?event, "ledger event");
        self.events.write().push(event);
    }

    /// Number of events recorded so far.
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// A point-in-time copy of the whole trail, in commit order.
    pub fn snapshot(&self) -> Vec<LedgerEvent> {
        self.events.read().clone()
    }
}
