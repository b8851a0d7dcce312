//! Exchange configuration
//!
//! Fixed at construction; no operation mutates it afterwards.

use serde::{Deserialize, Serialize};
use types::fee::FeePercent;
use types::ids::AccountId;

/// Construction-time configuration for an [`crate::Exchange`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Account credited with the fee on every successful fill
    pub fee_account: AccountId,
    /// Integer percentage charged on the ask amount of a fill
    pub fee_percent: FeePercent,
    /// Whether an order may ask and offer the same asset. Defaults to true,
    /// the permissive behavior; set false to reject such orders outright.
    pub allow_same_asset_orders: bool,
}

impl ExchangeConfig {
    /// Create a configuration with the default same-asset policy
    pub fn new(fee_account: AccountId, fee_percent: FeePercent) -> Self {
        Self {
            fee_account,
            fee_percent,
            allow_same_asset_orders: true,
        }
    }

    /// Reject orders whose ask and offer asset coincide
    pub fn reject_same_asset_orders(mut self) -> Self {
        self.allow_same_asset_orders = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let fee_account = AccountId::new();
        let config = ExchangeConfig::new(fee_account, FeePercent::new(10));

        assert_eq!(config.fee_account, fee_account);
        assert_eq!(config.fee_percent, FeePercent::new(10));
        assert!(config.allow_same_asset_orders);
    }

    #[test]
    fn test_reject_same_asset_orders() {
        let config =
            ExchangeConfig::new(AccountId::new(), FeePercent::ZERO).reject_same_asset_orders();
        assert!(!config.allow_same_asset_orders);
    }

    #[test]
    fn test_config_serialization() {
        let config = ExchangeConfig::new(AccountId::new(), FeePercent::new(25));
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ExchangeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
