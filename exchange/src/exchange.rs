//! Exchange facade — the public operation surface
//!
//! Owns the ledger, the book, the settlement engine, and the collaborator
//! seams (event sink, custodian, clock), and exposes the operations of the
//! system: deposit/withdraw per asset kind, order lifecycle, and queries.
//! Every mutating operation takes `&mut self`; presenting operations one at
//! a time is the caller's contract, and a multi-threaded host wraps the
//! whole facade in one lock or actor.

use tracing::info;
use types::amount::Amount;
use types::asset::{AssetId, AssetKind};
use types::errors::ExchangeError;
use types::fee::FeePercent;
use types::ids::{AccountId, OrderId};
use types::order::Order;
use types::trade::TradeReceipt;

use crate::book::OrderBook;
use crate::clock::{Clock, SystemClock};
use crate::config::ExchangeConfig;
use crate::custody::Custodian;
use crate::events::EventSink;
use crate::ledger::BalanceLedger;
use crate::settlement::SettlementEngine;

/// The custodial exchange: balances, orders, and atomic settlement behind
/// one construction-time configuration.
pub struct Exchange {
    config: ExchangeConfig,
    ledger: BalanceLedger,
    book: OrderBook,
    settlement: SettlementEngine,
    events: Box<dyn EventSink>,
    custodian: Box<dyn Custodian>,
    clock: Box<dyn Clock>,
    /// Highest timestamp handed out so far; successive clock readings are
    /// clamped to it so order timestamps never decrease even if the host
    /// clock steps backwards.
    last_now: i64,
}

impl Exchange {
    /// Create an exchange with the system clock.
    pub fn new(
        config: ExchangeConfig,
        events: Box<dyn EventSink>,
        custodian: Box<dyn Custodian>,
    ) -> Self {
        info!(
            fee_account = %config.fee_account,
            fee_percent = %config.fee_percent,
            allow_same_asset_orders = config.allow_same_asset_orders,
            "Exchange initialized"
        );

        let settlement = SettlementEngine::new(&config);
        Self {
            config,
            ledger: BalanceLedger::new(),
            book: OrderBook::new(),
            settlement,
            events,
            custodian,
            clock: Box::new(SystemClock),
            last_now: 0,
        }
    }

    /// Replace the timestamp source. Chainable, for tests and hosts with
    /// their own notion of time.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Read the clock, clamped to be monotonically non-decreasing.
    fn now(&mut self) -> i64 {
        let now = self.clock.now().max(self.last_now);
        self.last_now = now;
        now
    }

    // ───────────────────────── Configuration ─────────────────────────

    /// Account credited with the fee on every successful fill.
    pub fn fee_account(&self) -> AccountId {
        self.config.fee_account
    }

    /// Percentage charged on the ask amount of a fill.
    pub fn fee_percent(&self) -> FeePercent {
        self.config.fee_percent
    }

    // ───────────────────────── Deposits ─────────────────────────

    /// Record a deposit of the native asset. Returns the new balance.
    ///
    /// The environment has already moved the value into custody; there is
    /// no other channel through which native value enters a balance.
    pub fn deposit_native(
        &mut self,
        account: AccountId,
        amount: Amount,
    ) -> Result<Amount, ExchangeError> {
        self.ledger
            .deposit(&AssetId::Native, &account, amount, self.events.as_mut())
    }

    /// Record a deposit of a token asset. Returns the new balance.
    ///
    /// Fails with `AssetMismatch` if `asset` is the native sentinel; the
    /// native asset only enters through [`deposit_native`](Self::deposit_native).
    pub fn deposit_token(
        &mut self,
        asset: AssetId,
        account: AccountId,
        amount: Amount,
    ) -> Result<Amount, ExchangeError> {
        Self::require_token(&asset)?;
        self.ledger
            .deposit(&asset, &account, amount, self.events.as_mut())
    }

    // ───────────────────────── Withdrawals ─────────────────────────

    /// Withdraw the native asset back out of custody. Returns the new
    /// balance.
    pub fn withdraw_native(
        &mut self,
        account: AccountId,
        amount: Amount,
    ) -> Result<Amount, ExchangeError> {
        self.ledger.withdraw(
            &AssetId::Native,
            &account,
            amount,
            self.custodian.as_mut(),
            self.events.as_mut(),
        )
    }

    /// Withdraw a token asset back out of custody. Returns the new balance.
    ///
    /// Fails with `AssetMismatch` if `asset` is the native sentinel.
    pub fn withdraw_token(
        &mut self,
        asset: AssetId,
        account: AccountId,
        amount: Amount,
    ) -> Result<Amount, ExchangeError> {
        Self::require_token(&asset)?;
        self.ledger.withdraw(
            &asset,
            &account,
            amount,
            self.custodian.as_mut(),
            self.events.as_mut(),
        )
    }

    // ───────────────────────── Orders ─────────────────────────

    /// Post a new open order and return its id. No balance interaction.
    pub fn make_order(
        &mut self,
        creator: AccountId,
        ask_asset: AssetId,
        ask_amount: Amount,
        offer_asset: AssetId,
        offer_amount: Amount,
    ) -> Result<OrderId, ExchangeError> {
        let now = self.now();
        self.settlement.make_order(
            &mut self.book,
            self.events.as_mut(),
            creator,
            ask_asset,
            ask_amount,
            offer_asset,
            offer_amount,
            now,
        )
    }

    /// Execute an open order on behalf of `filler`.
    pub fn fill_order(
        &mut self,
        order_id: OrderId,
        filler: AccountId,
    ) -> Result<TradeReceipt, ExchangeError> {
        let now = self.now();
        self.settlement.fill_order(
            &mut self.ledger,
            &mut self.book,
            self.events.as_mut(),
            order_id,
            filler,
            now,
        )
    }

    /// Cancel an open order. Only its creator may do so.
    pub fn cancel_order(
        &mut self,
        order_id: OrderId,
        caller: AccountId,
    ) -> Result<(), ExchangeError> {
        let now = self.now();
        self.settlement.cancel_order(
            &mut self.book,
            self.events.as_mut(),
            order_id,
            caller,
            now,
        )
    }

    // ───────────────────────── Queries ─────────────────────────

    /// Balance of `(asset, account)`; zero for entries never credited.
    pub fn balance_of(&self, asset: &AssetId, account: &AccountId) -> Amount {
        self.ledger.balance_of(asset, account)
    }

    /// Look up an order; all immutable fields plus its current status.
    pub fn order(&self, order_id: OrderId) -> Result<&Order, ExchangeError> {
        self.book.get(order_id)
    }

    /// Number of orders ever created; equal to the most recent order id.
    pub fn order_count(&self) -> u64 {
        self.book.order_count()
    }

    fn require_token(asset: &AssetId) -> Result<(), ExchangeError> {
        if asset.is_native() {
            return Err(ExchangeError::AssetMismatch {
                expected: AssetKind::Token,
                found: asset.clone(),
            });
        }
        Ok(())
    }
}
