//! Custodial exchange ledger
//!
//! Accounts deposit native and token assets into internal balances, post
//! limit-style swap orders against those balances, and have a counter-party
//! atomically fill an order, with a percentage fee credited to a designated
//! fee account. The engine is a synchronous, single-writer state machine:
//! every operation validates against current state, applies all of its
//! mutations or none, and appends one record to the caller-supplied event
//! sink.
//!
//! # Modules
//! - `config`: construction-time configuration (fee account, fee percent)
//! - `clock`: timestamp source abstraction
//! - `custody`: external transfer-out collaborator
//! - `events`: audit records and the event sink seam
//! - `ledger`: the (asset, account) balance map and atomic transfer staging
//! - `book`: append-only order store with dense ids
//! - `settlement`: fill/cancel orchestration and fee application
//! - `exchange`: the public operation facade
//!
//! # Version
//! v0.1.0

pub mod book;
pub mod clock;
pub mod config;
pub mod custody;
pub mod events;
pub mod exchange;
pub mod ledger;
pub mod settlement;

pub use crate::book::OrderBook;
pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::config::ExchangeConfig;
pub use crate::custody::{Custodian, NullCustodian, RecordingCustodian, ReleasedTransfer};
pub use crate::events::{EventSink, ExchangeEvent, MemoryEventLog};
pub use crate::exchange::Exchange;
pub use crate::ledger::BalanceLedger;
pub use crate::settlement::SettlementEngine;
