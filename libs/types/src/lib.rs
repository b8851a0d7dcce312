//! Types library for the custodial exchange ledger
//!
//! This library provides all core type definitions shared by the exchange
//! engine, ensuring type safety and deterministic behavior.
//!
//! # Modules
//! - `ids`: Unique identifiers (AccountId, OrderId)
//! - `asset`: Native/token asset identifiers
//! - `amount`: Unsigned base-unit quantities with checked arithmetic
//! - `fee`: Percentage fee configuration and exact floor fee math
//! - `order`: Order lifecycle types
//! - `trade`: Trade receipt returned on a successful fill
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod asset;
pub mod amount;
pub mod fee;
pub mod order;
pub mod trade;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::asset::*;
    pub use crate::amount::*;
    pub use crate::fee::*;
    pub use crate::order::*;
    pub use crate::trade::*;
    pub use crate::errors::*;
}
