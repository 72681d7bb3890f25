//! Ledger event broadcasting.
//!
//! Events are observational only: emission never blocks a write and a
//! missing subscriber is not an error.

use kasbon_core::journal::TransactionKind;
use kasbon_shared::AccountId;
use rust_decimal::Decimal;
use tokio::sync::broadcast;

/// Default capacity of the event channel.
const EVENT_CAPACITY: usize = 256;

/// Emitted after a charge or payment is durably applied.
#[derive(Debug, Clone)]
pub struct LedgerEvent {
    /// The account the entry was applied to.
    pub account_id: AccountId,
    /// Debit (charge) or credit (payment).
    pub kind: TransactionKind,
    /// Positive entry amount.
    pub amount: Decimal,
    /// The account balance after the entry.
    pub balance_after: Decimal,
}

/// Fire-and-forget broadcast channel for ledger events.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<LedgerEvent>,
}

impl EventBus {
    /// Creates a bus with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    /// Subscribes to future events. Slow receivers may miss events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.sender.subscribe()
    }

    /// Emits an event. Ignores the absence of subscribers.
    pub fn emit(&self, event: LedgerEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
