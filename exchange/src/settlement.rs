//! SettlementEngine — order creation, atomic fills, and cancellation
//!
//! Orchestrates the order lifecycle against the ledger and book:
//! `make_order -> (fill_order | cancel_order)`. A fill moves exactly four
//! logical balance changes (takers's ask leg plus fee, maker's ask credit,
//! fee account credit, the offer leg both ways) and they commit together or
//! not at all. Every successful operation appends exactly one event record;
//! failed operations mutate nothing and append nothing.

use tracing::info;
use types::amount::Amount;
use types::asset::AssetId;
use types::errors::ExchangeError;
use types::ids::{AccountId, OrderId};
use types::trade::TradeReceipt;

use crate::book::OrderBook;
use crate::config::ExchangeConfig;
use crate::events::{Cancelled, EventSink, ExchangeEvent, OrderCreated, Trade};
use crate::ledger::BalanceLedger;

/// Fill/cancel orchestration with the fee configuration baked in.
///
/// Holds no ledger or book state of its own; both are passed into each
/// operation by the owning facade, which serializes access.
#[derive(Debug, Clone)]
pub struct SettlementEngine {
    fee_account: AccountId,
    fee_percent: types::fee::FeePercent,
    allow_same_asset_orders: bool,
}

impl SettlementEngine {
    /// Create an engine from the exchange configuration.
    pub fn new(config: &ExchangeConfig) -> Self {
        Self {
            fee_account: config.fee_account,
            fee_percent: config.fee_percent,
            allow_same_asset_orders: config.allow_same_asset_orders,
        }
    }

    /// Account credited with the fee on every fill.
    pub fn fee_account(&self) -> AccountId {
        self.fee_account
    }

    /// Percentage charged on the ask amount of a fill.
    pub fn fee_percent(&self) -> types::fee::FeePercent {
        self.fee_percent
    }

    // ───────────────────────── Make ─────────────────────────

    /// Post a new open order and return its id.
    ///
    /// No balance interaction. Rejects `ask_asset == offer_asset` with
    /// `SameAssetOrder` only when the configuration says so.
    #[allow(clippy::too_many_arguments)]
    pub fn make_order(
        &self,
        book: &mut OrderBook,
        events: &mut dyn EventSink,
        creator: AccountId,
        ask_asset: AssetId,
        ask_amount: Amount,
        offer_asset: AssetId,
        offer_amount: Amount,
        now: i64,
    ) -> Result<OrderId, ExchangeError> {
        if !self.allow_same_asset_orders && ask_asset == offer_asset {
            return Err(ExchangeError::SameAssetOrder { asset: ask_asset });
        }

        let id = book.create_order(
            creator,
            ask_asset.clone(),
            ask_amount,
            offer_asset.clone(),
            offer_amount,
            now,
        );

        info!(
            order_id = %id,
            creator = %creator,
            ask_asset = %ask_asset,
            ask_amount = %ask_amount,
            offer_asset = %offer_asset,
            offer_amount = %offer_amount,
            "Order created"
        );

        events.record(ExchangeEvent::OrderCreated(OrderCreated {
            id,
            creator,
            ask_asset,
            ask_amount,
            offer_asset,
            offer_amount,
            timestamp: now,
        }));

        Ok(id)
    }

    // ───────────────────────── Fill ─────────────────────────

    /// Execute an open order on behalf of `filler`.
    ///
    /// The filler pays `ask_amount + fee` of the ask asset (the fee to the
    /// fee account, the rest to the creator) and receives `offer_amount` of
    /// the offer asset from the creator. Legs are staged in that sequence
    /// against effective balances and committed all-or-nothing, so when the
    /// two assets coincide, or `filler == creator`, a credit staged earlier
    /// can fund a debit staged later. Insufficiency of either party fails
    /// the whole operation with nothing mutated, and the order stays Open.
    pub fn fill_order(
        &self,
        ledger: &mut BalanceLedger,
        book: &mut OrderBook,
        events: &mut dyn EventSink,
        order_id: OrderId,
        filler: AccountId,
        now: i64,
    ) -> Result<TradeReceipt, ExchangeError> {
        let order = book.get(order_id)?;
        if !order.is_open() {
            return Err(ExchangeError::OrderAlreadySettled {
                order_id,
                status: order.status,
            });
        }

        let creator = order.creator;
        let ask_asset = order.ask_asset.clone();
        let ask_amount = order.ask_amount;
        let offer_asset = order.offer_asset.clone();
        let offer_amount = order.offer_amount;

        let fee = self.fee_percent.fee_on(ask_amount);
        let charge = ask_amount
            .checked_add(fee)
            .ok_or(ExchangeError::AmountOverflow)?;

        // Stage every leg, then flip the order, then commit: all fallible
        // steps happen before the first mutation.
        let mut transfer = ledger.begin_transfer();
        transfer.debit(&ask_asset, &filler, charge)?;
        transfer.credit(&ask_asset, &creator, ask_amount)?;
        transfer.credit(&ask_asset, &self.fee_account, fee)?;
        transfer.debit(&offer_asset, &creator, offer_amount)?;
        transfer.credit(&offer_asset, &filler, offer_amount)?;
        book.mark_filled(order_id)?;
        transfer.commit();

        info!(
            order_id = %order_id,
            creator = %creator,
            filler = %filler,
            fee = %fee,
            "Order filled"
        );

        events.record(ExchangeEvent::Trade(Trade {
            id: order_id,
            creator,
            ask_asset: ask_asset.clone(),
            ask_amount,
            offer_asset: offer_asset.clone(),
            offer_amount,
            filler,
            timestamp: now,
        }));

        Ok(TradeReceipt {
            order_id,
            maker: creator,
            taker: filler,
            ask_asset,
            ask_amount,
            offer_asset,
            offer_amount,
            fee,
            executed_at: now,
        })
    }

    // ───────────────────────── Cancel ─────────────────────────

    /// Cancel an open order.
    ///
    /// Only the order's creator may cancel; authorization is checked before
    /// the settled-state check, so a stranger probing a terminal order
    /// still gets `Unauthorized`. Balances are untouched.
    pub fn cancel_order(
        &self,
        book: &mut OrderBook,
        events: &mut dyn EventSink,
        order_id: OrderId,
        caller: AccountId,
        now: i64,
    ) -> Result<(), ExchangeError> {
        let order = book.get(order_id)?;
        if order.creator != caller {
            return Err(ExchangeError::Unauthorized {
                order_id,
                caller,
                creator: order.creator,
            });
        }
        if !order.is_open() {
            return Err(ExchangeError::OrderAlreadySettled {
                order_id,
                status: order.status,
            });
        }

        let event = Cancelled {
            id: order_id,
            creator: order.creator,
            ask_asset: order.ask_asset.clone(),
            ask_amount: order.ask_amount,
            offer_asset: order.offer_asset.clone(),
            offer_amount: order.offer_amount,
            timestamp: now,
        };

        book.mark_cancelled(order_id)?;

        info!(order_id = %order_id, creator = %caller, "Order cancelled");

        events.record(ExchangeEvent::Cancelled(event));
        Ok(())
    }
}
