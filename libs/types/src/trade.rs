//! Trade receipt types
//!
//! A successful fill returns a `TradeReceipt` describing the atomic
//! exchange between the order's creator (maker) and the filler (taker),
//! including the fee actually charged on top of the ask amount.

use crate::amount::Amount;
use crate::asset::AssetId;
use crate::ids::{AccountId, OrderId};
use serde::{Deserialize, Serialize};

/// Receipt for one executed order
///
/// The taker paid `ask_amount + fee` of `ask_asset` (fee to the fee
/// account, the rest to the maker) and received `offer_amount` of
/// `offer_asset` from the maker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeReceipt {
    pub order_id: OrderId,
    pub maker: AccountId,
    pub taker: AccountId,
    pub ask_asset: AssetId,
    pub ask_amount: Amount,
    pub offer_asset: AssetId,
    pub offer_amount: Amount,
    /// Fee charged to the taker, denominated in `ask_asset`
    pub fee: Amount,
    pub executed_at: i64, // Unix seconds
}

impl TradeReceipt {
    /// Check if the maker filled their own order
    pub fn is_self_trade(&self) -> bool {
        self.maker == self.taker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_receipt(maker: AccountId, taker: AccountId) -> TradeReceipt {
        TradeReceipt {
            order_id: OrderId::new(1),
            maker,
            taker,
            ask_asset: AssetId::token("DAPP"),
            ask_amount: Amount::new(1_000),
            offer_asset: AssetId::native(),
            offer_amount: Amount::new(500),
            fee: Amount::new(100),
            executed_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_self_trade_detection() {
        let maker = AccountId::new();
        let taker = AccountId::new();

        assert!(!sample_receipt(maker, taker).is_self_trade());
        assert!(sample_receipt(maker, maker).is_self_trade());
    }

    #[test]
    fn test_receipt_serialization() {
        let receipt = sample_receipt(AccountId::new(), AccountId::new());
        let json = serde_json::to_string(&receipt).unwrap();
        let deserialized: TradeReceipt = serde_json::from_str(&json).unwrap();
        assert_eq!(receipt, deserialized);
    }
}
