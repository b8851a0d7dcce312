//! Order lifecycle types
//!
//! A limit-style swap order: the creator asks for `ask_amount` of
//! `ask_asset` and offers `offer_amount` of `offer_asset` in return.
//! Orders are immutable except for `status` and are retained forever
//! (terminal orders stay queryable for audit and idempotency checks).

use crate::amount::Amount;
use crate::asset::AssetId;
use crate::ids::{AccountId, OrderId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status
///
/// Transitions are `Open -> Filled` and `Open -> Cancelled` only; both
/// terminal. Every other transition attempt is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// Created and fillable
    Open,
    /// Executed by a filler (terminal)
    Filled,
    /// Withdrawn by its creator (terminal)
    Cancelled,
}

impl OrderStatus {
    /// Check if status is terminal (no further transitions possible)
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Open => write!(f, "OPEN"),
            OrderStatus::Filled => write!(f, "FILLED"),
            OrderStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A swap order posted against internal balances
///
/// No funds are reserved at creation time; the creator's ability to cover
/// `offer_amount` is verified only when the order is filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub creator: AccountId,
    pub ask_asset: AssetId,
    pub ask_amount: Amount,
    pub offer_asset: AssetId,
    pub offer_amount: Amount,
    pub created_at: i64, // Unix seconds
    pub status: OrderStatus,
}

impl Order {
    /// Create a new open order
    pub fn new(
        id: OrderId,
        creator: AccountId,
        ask_asset: AssetId,
        ask_amount: Amount,
        offer_asset: AssetId,
        offer_amount: Amount,
        timestamp: i64,
    ) -> Self {
        Self {
            id,
            creator,
            ask_asset,
            ask_amount,
            offer_asset,
            offer_amount,
            created_at: timestamp,
            status: OrderStatus::Open,
        }
    }

    /// Check if the order is still fillable
    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }

    /// Check if the order was executed
    pub fn is_filled(&self) -> bool {
        self.status == OrderStatus::Filled
    }

    /// Check if the order was cancelled
    pub fn is_cancelled(&self) -> bool {
        self.status == OrderStatus::Cancelled
    }

    /// Mark the order filled
    ///
    /// # Panics
    /// Panics if the order is not Open. Callers verify the status first and
    /// surface a typed error; this assert is the terminal-state backstop.
    pub fn fill(&mut self) {
        assert!(self.is_open(), "Cannot fill non-open order");
        self.status = OrderStatus::Filled;
    }

    /// Mark the order cancelled
    ///
    /// # Panics
    /// Panics if the order is not Open.
    pub fn cancel(&mut self) {
        assert!(self.is_open(), "Cannot cancel non-open order");
        self.status = OrderStatus::Cancelled;
    }
}
