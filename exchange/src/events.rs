//! Exchange audit events
//!
//! Events are immutable records appended to a caller-supplied sink, exactly
//! one per successful operation; failed operations append nothing. The sink
//! is never read back by the engine.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use types::amount::Amount;
use types::asset::AssetId;
use types::ids::{AccountId, OrderId};

/// Funds credited to an internal balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub asset: AssetId,
    pub account: AccountId,
    pub amount: Amount,
    /// Balance of (asset, account) after the credit
    pub balance: Amount,
}

/// Funds debited from an internal balance and released from custody
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdraw {
    pub asset: AssetId,
    pub account: AccountId,
    pub amount: Amount,
    /// Balance of (asset, account) after the debit
    pub balance: Amount,
}

/// A new open order was posted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreated {
    pub id: OrderId,
    pub creator: AccountId,
    pub ask_asset: AssetId,
    pub ask_amount: Amount,
    pub offer_asset: AssetId,
    pub offer_amount: Amount,
    pub timestamp: i64,
}

/// An open order was filled by a counter-party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub id: OrderId,
    pub creator: AccountId,
    pub ask_asset: AssetId,
    pub ask_amount: Amount,
    pub offer_asset: AssetId,
    pub offer_amount: Amount,
    pub filler: AccountId,
    pub timestamp: i64,
}

/// An open order was cancelled by its creator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cancelled {
    pub id: OrderId,
    pub creator: AccountId,
    pub ask_asset: AssetId,
    pub ask_amount: Amount,
    pub offer_asset: AssetId,
    pub offer_amount: Amount,
    pub timestamp: i64,
}

/// Enum wrapper for all exchange events, enabling uniform handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExchangeEvent {
    Deposit(Deposit),
    Withdraw(Withdraw),
    OrderCreated(OrderCreated),
    Trade(Trade),
    Cancelled(Cancelled),
}

impl ExchangeEvent {
    /// Short label for logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            ExchangeEvent::Deposit(_) => "deposit",
            ExchangeEvent::Withdraw(_) => "withdraw",
            ExchangeEvent::OrderCreated(_) => "order_created",
            ExchangeEvent::Trade(_) => "trade",
            ExchangeEvent::Cancelled(_) => "cancelled",
        }
    }
}

/// Append-only notification surface supplied by the caller
pub trait EventSink {
    fn record(&mut self, event: ExchangeEvent);
}

/// In-memory event sink
///
/// Cloneable; clones share the same log, so a test can keep an inspectable
/// handle while the exchange owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryEventLog {
    events: Arc<Mutex<Vec<ExchangeEvent>>>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events, oldest first
    pub fn events(&self) -> Vec<ExchangeEvent> {
        self.events.lock().clone()
    }

    /// Consume and clear all recorded events
    pub fn drain(&self) -> Vec<ExchangeEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for MemoryEventLog {
    fn record(&mut self, event: ExchangeEvent) {
        self.events.lock().push(event);
    }
}
