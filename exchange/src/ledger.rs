//! BalanceLedger — internal (asset, account) balances
//!
//! The custody layer of the exchange:
//! - Balance tracking by (asset, account), absent entry equals zero
//! - Deposit flow recording externally arrived value
//! - Withdrawal flow: debit, record, then instruct the custodian
//! - Staged multi-leg transfers that commit all-or-nothing
//!
//! Balances never go negative and entries are never deleted; a fully
//! withdrawn balance simply remains a zero entry.

use std::collections::HashMap;

use tracing::debug;
use types::amount::Amount;
use types::asset::AssetId;
use types::errors::ExchangeError;
use types::ids::AccountId;

use crate::custody::Custodian;
use crate::events::{Deposit, EventSink, ExchangeEvent, Withdraw};

/// The (asset, account) balance map and its mutation chokepoint.
///
/// Balances are stored as `HashMap<AssetId, HashMap<AccountId, Amount>>`,
/// asset-major. All mutation flows through [`deposit`](Self::deposit),
/// [`withdraw`](Self::withdraw), and the settlement engine's transfer
/// staging; nothing else writes the map.
#[derive(Debug, Default)]
pub struct BalanceLedger {
    /// Balances: asset -> (account -> amount)
    balances: HashMap<AssetId, HashMap<AccountId, Amount>>,
}

impl BalanceLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    // ───────────────────────── Balance Queries ─────────────────────────

    /// Get the balance for a specific asset and account.
    pub fn balance_of(&self, asset: &AssetId, account: &AccountId) -> Amount {
        self.balances
            .get(asset)
            .and_then(|accounts| accounts.get(account))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Get all account balances held in one asset.
    pub fn asset_balances(&self, asset: &AssetId) -> Option<&HashMap<AccountId, Amount>> {
        self.balances.get(asset)
    }

    // ───────────────────────── Deposit ─────────────────────────

    /// Credit `amount` to `(asset, account)`.
    ///
    /// The external collaborator has already moved the value into custody;
    /// the ledger only records it. Returns the new balance and emits a
    /// `Deposit` record. Fails only on arithmetic overflow, with nothing
    /// mutated.
    pub fn deposit(
        &mut self,
        asset: &AssetId,
        account: &AccountId,
        amount: Amount,
        events: &mut dyn EventSink,
    ) -> Result<Amount, ExchangeError> {
        let balance = self.credit(asset, account, amount)?;

        debug!(
            asset = %asset,
            account = %account,
            amount = %amount,
            balance = %balance,
            "Deposit recorded"
        );

        events.record(ExchangeEvent::Deposit(Deposit {
            asset: asset.clone(),
            account: *account,
            amount,
            balance,
        }));

        Ok(balance)
    }

    // ───────────────────────── Withdraw ─────────────────────────

    /// Debit `amount` from `(asset, account)` and release it from custody.
    ///
    /// Fails with `InsufficientBalance` if the balance does not cover
    /// `amount`, with nothing mutated. On success the ledger debit and the
    /// `Withdraw` record commit strictly before [`Custodian::release`] is
    /// invoked, so a custodian that re-enters the engine observes the
    /// already-debited balance. Returns the new balance.
    pub fn withdraw(
        &mut self,
        asset: &AssetId,
        account: &AccountId,
        amount: Amount,
        custodian: &mut dyn Custodian,
        events: &mut dyn EventSink,
    ) -> Result<Amount, ExchangeError> {
        let balance = self.debit(asset, account, amount)?;

        debug!(
            asset = %asset,
            account = %account,
            amount = %amount,
            balance = %balance,
            "Withdraw recorded"
        );

        events.record(ExchangeEvent::Withdraw(Withdraw {
            asset: asset.clone(),
            account: *account,
            amount,
            balance,
        }));

        custodian.release(asset, account, amount);
        Ok(balance)
    }

    // ───────────────────────── Internal Transfers ─────────────────────────

    /// Move `amount` of `asset` between two accounts.
    ///
    /// Pure ledger mutation with no event of its own; the settlement engine
    /// emits one composite record per fill. On failure nothing moved.
    pub(crate) fn transfer_internal(
        &mut self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), ExchangeError> {
        let mut transfer = self.begin_transfer();
        transfer.debit(asset, from, amount)?;
        transfer.credit(asset, to, amount)?;
        transfer.commit();
        Ok(())
    }

    /// Start staging a multi-leg transfer.
    pub(crate) fn begin_transfer(&mut self) -> TransferSet<'_> {
        TransferSet {
            ledger: self,
            staged: HashMap::new(),
        }
    }

    // ───────────────────────── Safe Mutation ─────────────────────────

    /// Credit with overflow protection. Returns the new balance.
    fn credit(
        &mut self,
        asset: &AssetId,
        account: &AccountId,
        amount: Amount,
    ) -> Result<Amount, ExchangeError> {
        let current = self.balance_of(asset, account);
        let balance = current
            .checked_add(amount)
            .ok_or(ExchangeError::AmountOverflow)?;

        self.balances
            .entry(asset.clone())
            .or_default()
            .insert(*account, balance);
        Ok(balance)
    }

    /// Debit with underflow protection. Returns the new balance.
    fn debit(
        &mut self,
        asset: &AssetId,
        account: &AccountId,
        amount: Amount,
    ) -> Result<Amount, ExchangeError> {
        let current = self.balance_of(asset, account);
        let balance =
            current
                .checked_sub(amount)
                .ok_or_else(|| ExchangeError::InsufficientBalance {
                    asset: asset.clone(),
                    account: *account,
                    required: amount,
                    available: current,
                })?;

        self.balances
            .entry(asset.clone())
            .or_default()
            .insert(*account, balance);
        Ok(balance)
    }
}

/// A staged multi-leg transfer over the ledger.
///
/// Legs accumulate in the order given, each validated against the effective
/// balance (the stored balance plus the legs already staged), so a credit
/// staged earlier can fund a debit staged later. Nothing touches the ledger
/// until [`commit`](Self::commit); dropping the set discards every leg, so
/// a mid-sequence failure leaves the ledger untouched.
pub(crate) struct TransferSet<'a> {
    ledger: &'a mut BalanceLedger,
    staged: HashMap<AssetId, HashMap<AccountId, Amount>>,
}

impl TransferSet<'_> {
    /// Effective balance of (asset, account) including staged legs.
    fn effective(&self, asset: &AssetId, account: &AccountId) -> Amount {
        self.staged
            .get(asset)
            .and_then(|accounts| accounts.get(account))
            .copied()
            .unwrap_or_else(|| self.ledger.balance_of(asset, account))
    }

    fn stage(&mut self, asset: &AssetId, account: &AccountId, balance: Amount) {
        self.staged
            .entry(asset.clone())
            .or_default()
            .insert(*account, balance);
    }

    /// Stage a debit; fails with `InsufficientBalance` if the effective
    /// balance does not cover `amount`.
    pub(crate) fn debit(
        &mut self,
        asset: &AssetId,
        account: &AccountId,
        amount: Amount,
    ) -> Result<(), ExchangeError> {
        let current = self.effective(asset, account);
        let next = current
            .checked_sub(amount)
            .ok_or_else(|| ExchangeError::InsufficientBalance {
                asset: asset.clone(),
                account: *account,
                required: amount,
                available: current,
            })?;
        self.stage(asset, account, next);
        Ok(())
    }

    /// Stage a credit; fails with `AmountOverflow` if the effective balance
    /// would wrap.
    pub(crate) fn credit(
        &mut self,
        asset: &AssetId,
        account: &AccountId,
        amount: Amount,
    ) -> Result<(), ExchangeError> {
        let current = self.effective(asset, account);
        let next = current
            .checked_add(amount)
            .ok_or(ExchangeError::AmountOverflow)?;
        self.stage(asset, account, next);
        Ok(())
    }

    /// Write every staged balance back to the ledger.
    ///
    /// Infallible: all validation happened while staging.
    pub(crate) fn commit(self) {
        let TransferSet { ledger, staged } = self;
        for (asset, accounts) in staged {
            let bucket = ledger.balances.entry(asset).or_default();
            for (account, balance) in accounts {
                bucket.insert(account, balance);
            }
        }
    }
}
