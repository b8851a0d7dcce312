//! OrderBook — append-only order store
//!
//! Orders are keyed by a dense, strictly increasing u64 id starting at 1;
//! the id of the most recently created order always equals the order count.
//! Orders are never removed: Filled and Cancelled orders stay queryable for
//! audit and idempotency checks. There is no matching or crossing here —
//! one order, one counter-party, settled elsewhere.

use std::collections::BTreeMap;

use types::amount::Amount;
use types::asset::AssetId;
use types::errors::ExchangeError;
use types::ids::{AccountId, OrderId};
use types::order::{Order, OrderStatus};

/// Append-only store of orders with dense id allocation.
#[derive(Debug, Default)]
pub struct OrderBook {
    orders: BTreeMap<u64, Order>,
    count: u64,
}

impl OrderBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    // ───────────────────────── Creation ─────────────────────────

    /// Store a new open order under the next id and return that id.
    ///
    /// No balance check and no reservation happens here: the creator's
    /// ability to cover `offer_amount` is verified only at fill time, so an
    /// order can become unfillable if its creator later withdraws the
    /// offered funds.
    pub fn create_order(
        &mut self,
        creator: AccountId,
        ask_asset: AssetId,
        ask_amount: Amount,
        offer_asset: AssetId,
        offer_amount: Amount,
        now: i64,
    ) -> OrderId {
        let id = OrderId::new(self.count + 1);
        let order = Order::new(
            id,
            creator,
            ask_asset,
            ask_amount,
            offer_asset,
            offer_amount,
            now,
        );

        self.orders.insert(id.as_u64(), order);
        self.count += 1;
        id
    }

    // ───────────────────────── Queries ─────────────────────────

    /// Look up an order by id.
    pub fn get(&self, id: OrderId) -> Result<&Order, ExchangeError> {
        self.orders
            .get(&id.as_u64())
            .ok_or(ExchangeError::OrderNotFound { order_id: id })
    }

    /// Id of the most recently created order; equal to the number of
    /// orders ever created.
    pub fn order_count(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// All orders in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    // ───────────────────────── Transitions ─────────────────────────

    /// Transition an Open order to Filled.
    ///
    /// Invoked only by the settlement engine after it has verified the
    /// order is Open; the check here is the defensive double-check that
    /// keeps terminal states terminal.
    pub(crate) fn mark_filled(&mut self, id: OrderId) -> Result<(), ExchangeError> {
        let order = self.get_open_mut(id)?;
        order.fill();
        Ok(())
    }

    /// Transition an Open order to Cancelled.
    pub(crate) fn mark_cancelled(&mut self, id: OrderId) -> Result<(), ExchangeError> {
        let order = self.get_open_mut(id)?;
        order.cancel();
        Ok(())
    }

    fn get_open_mut(&mut self, id: OrderId) -> Result<&mut Order, ExchangeError> {
        let order = self
            .orders
            .get_mut(&id.as_u64())
            .ok_or(ExchangeError::OrderNotFound { order_id: id })?;

        if !order.is_open() {
            return Err(ExchangeError::OrderAlreadySettled {
                order_id: id,
                status: order.status,
            });
        }
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book_with_order() -> (OrderBook, OrderId, AccountId) {
        let mut book = OrderBook::new();
        let creator = AccountId::new();
        let id = book.create_order(
            creator,
            AssetId::token("DAPP"),
            Amount::new(100),
            AssetId::native(),
            Amount::new(50),
            1_700_000_000,
        );
        (book, id, creator)
    }

    #[test]
    fn test_create_assigns_dense_ids() {
        let mut book = OrderBook::new();
        let creator = AccountId::new();

        for expected in 1..=5u64 {
            let id = book.create_order(
                creator,
                AssetId::token("DAPP"),
                Amount::new(1),
                AssetId::native(),
                Amount::new(1),
                1_700_000_000,
            );
            assert_eq!(id.as_u64(), expected);
            assert_eq!(book.order_count(), expected);
        }
    }

    #[test]
    fn test_created_order_fields() {
        let (book, id, creator) = sample_book_with_order();
        let order = book.get(id).unwrap();

        assert_eq!(order.id, id);
        assert_eq!(order.creator, creator);
        assert_eq!(order.ask_asset, AssetId::token("DAPP"));
        assert_eq!(order.ask_amount, Amount::new(100));
        assert_eq!(order.offer_asset, AssetId::native());
        assert_eq!(order.offer_amount, Amount::new(50));
        assert_eq!(order.created_at, 1_700_000_000);
        assert_eq!(order.status, OrderStatus::Open);
    }

    #[test]
    fn test_get_unknown_order() {
        let book = OrderBook::new();
        let result = book.get(OrderId::new(1));
        assert_eq!(
            result,
            Err(ExchangeError::OrderNotFound {
                order_id: OrderId::new(1)
            })
        );
    }

    #[test]
    fn test_empty_book() {
        let book = OrderBook::new();
        assert!(book.is_empty());
        assert_eq!(book.order_count(), 0);
    }

    #[test]
    fn test_mark_filled() {
        let (mut book, id, _) = sample_book_with_order();

        book.mark_filled(id).unwrap();
        assert!(book.get(id).unwrap().is_filled());
    }

    #[test]
    fn test_mark_cancelled() {
        let (mut book, id, _) = sample_book_with_order();

        book.mark_cancelled(id).unwrap();
        assert!(book.get(id).unwrap().is_cancelled());
    }

    #[test]
    fn test_mark_filled_twice() {
        let (mut book, id, _) = sample_book_with_order();

        book.mark_filled(id).unwrap();
        let result = book.mark_filled(id);

        assert_eq!(
            result,
            Err(ExchangeError::OrderAlreadySettled {
                order_id: id,
                status: OrderStatus::Filled,
            })
        );
    }

    #[test]
    fn test_mark_cancelled_after_filled() {
        let (mut book, id, _) = sample_book_with_order();

        book.mark_filled(id).unwrap();
        let result = book.mark_cancelled(id);

        assert_eq!(
            result,
            Err(ExchangeError::OrderAlreadySettled {
                order_id: id,
                status: OrderStatus::Filled,
            })
        );
    }

    #[test]
    fn test_mark_unknown_order() {
        let mut book = OrderBook::new();
        let result = book.mark_cancelled(OrderId::new(9));
        assert!(matches!(result, Err(ExchangeError::OrderNotFound { .. })));
    }

    #[test]
    fn test_terminal_orders_stay_queryable() {
        let (mut book, id, creator) = sample_book_with_order();

        book.mark_cancelled(id).unwrap();

        let order = book.get(id).unwrap();
        assert_eq!(order.creator, creator);
        assert_eq!(order.ask_amount, Amount::new(100));
        assert!(!book.is_empty());
    }

    #[test]
    fn test_iter_in_id_order() {
        let mut book = OrderBook::new();
        let creator = AccountId::new();
        for _ in 0..3 {
            book.create_order(
                creator,
                AssetId::token("DAPP"),
                Amount::new(1),
                AssetId::native(),
                Amount::new(1),
                1_700_000_000,
            );
        }

        let ids: Vec<u64> = book.iter().map(|o| o.id.as_u64()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
