//! External custody collaborator
//!
//! The ledger only records value; something in the environment actually
//! moves it. Deposits need no callback (value arrives first, then the
//! deposit records it), but a withdrawal must instruct the environment to
//! pay out. The ledger debits and records the withdrawal strictly before
//! calling [`Custodian::release`], so a custodian that re-enters the engine
//! observes the already-debited balance. Payout delivery failures are the
//! environment's retry problem; the ledger is consistent either way.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use types::amount::Amount;
use types::asset::AssetId;
use types::ids::AccountId;

/// Transfer-out capability supplied by the environment
pub trait Custodian {
    /// Pay `amount` of `asset` out of custody to `account`'s owner
    fn release(&mut self, asset: &AssetId, account: &AccountId, amount: Amount);
}

/// Custodian that discards release instructions
///
/// For hosts that reconcile payouts elsewhere, and for tests that do not
/// care about the custody side.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCustodian;

impl Custodian for NullCustodian {
    fn release(&mut self, _asset: &AssetId, _account: &AccountId, _amount: Amount) {}
}

/// One recorded release instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleasedTransfer {
    pub asset: AssetId,
    pub account: AccountId,
    pub amount: Amount,
}

/// Custodian that records every release for inspection
///
/// Cloneable; clones share the same record list, so a test can keep a
/// handle while the exchange owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingCustodian {
    released: Arc<Mutex<Vec<ReleasedTransfer>>>,
}

impl RecordingCustodian {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded releases, oldest first
    pub fn released(&self) -> Vec<ReleasedTransfer> {
        self.released.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.released.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.released.lock().is_empty()
    }
}

impl Custodian for RecordingCustodian {
    fn release(&mut self, asset: &AssetId, account: &AccountId, amount: Amount) {
        self.released.lock().push(ReleasedTransfer {
            asset: asset.clone(),
            account: *account,
            amount,
        });
    }
}
