//! Error taxonomy for the exchange ledger
//!
//! One flat error kind per failure mode, each carrying the offending ids
//! and amounts. Every error is detected before any state mutation for its
//! operation, and every failure is a normal outcome for the caller to
//! handle; there is no fatal class.

use crate::amount::Amount;
use crate::asset::{AssetId, AssetKind};
use crate::ids::{AccountId, OrderId};
use crate::order::OrderStatus;
use thiserror::Error;

/// Failure modes of exchange operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("Insufficient balance of {asset} for {account}: required {required}, available {available}")]
    InsufficientBalance {
        asset: AssetId,
        account: AccountId,
        required: Amount,
        available: Amount,
    },

    #[error("Asset mismatch: expected a {expected} asset, got {found}")]
    AssetMismatch { expected: AssetKind, found: AssetId },

    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: OrderId },

    #[error("Order {order_id} already settled: status {status}")]
    OrderAlreadySettled {
        order_id: OrderId,
        status: OrderStatus,
    },

    #[error("Unauthorized: {caller} is not the creator ({creator}) of order {order_id}")]
    Unauthorized {
        order_id: OrderId,
        caller: AccountId,
        creator: AccountId,
    },

    #[error("Arithmetic overflow in balance calculation")]
    AmountOverflow,

    #[error("Order asks and offers the same asset: {asset}")]
    SameAssetOrder { asset: AssetId },
}
