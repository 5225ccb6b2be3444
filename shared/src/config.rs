//! # Bridge Configuration
//!
//! A browser bundle has no process environment, so configuration is fixed at build
//! time: `DONATE_CONTRACT_ADDRESS` and `DONATE_RECEIPT_POLL_MS` are read with
//! `option_env!` when the crate is compiled and fall back to the defaults below.
//!
//! ```rust
//! use shared::config::{BridgeConfig, DEFAULT_CONTRACT_ADDRESS};
//!
//! let config = BridgeConfig::default();
//! assert_eq!(config.contract_address.to_string(), DEFAULT_CONTRACT_ADDRESS);
//! assert!(config.validate().is_ok());
//! ```

use crate::address::Address;
use crate::error::{BridgeError, Result};

/// First contract deployed by the default Hardhat account on a local node.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

const DEFAULT_CONTRACT: Address = Address::new([
    0x5f, 0xbd, 0xb2, 0x31, 0x56, 0x78, 0xaf, 0xec, 0xb3, 0x67, 0xf0, 0x32, 0xd9, 0x3f, 0x64, 0x2f,
    0x64, 0x18, 0x0a, 0xa3,
]);

pub const DEFAULT_RECEIPT_POLL_MS: u32 = 1_000;

/// Valid range for the receipt poll interval, in milliseconds.
pub const RECEIPT_POLL_RANGE_MS: (u32, u32) = (100, 60_000);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Address of the deployed `Donate` contract.
    pub contract_address: Address,

    /// Delay between `eth_getTransactionReceipt` polls while waiting for confirmation.
    pub receipt_poll_ms: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            contract_address: DEFAULT_CONTRACT,
            receipt_poll_ms: DEFAULT_RECEIPT_POLL_MS,
        }
    }
}

impl BridgeConfig {
    /// Configuration baked in at compile time.
    pub fn from_build_env() -> Result<Self> {
        Self::from_values(
            option_env!("DONATE_CONTRACT_ADDRESS"),
            option_env!("DONATE_RECEIPT_POLL_MS"),
        )
    }

    /// Build from optional raw values; `None` keeps the default.
    pub fn from_values(contract_address: Option<&str>, receipt_poll_ms: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = contract_address {
            config.contract_address = raw
                .parse()
                .map_err(|e| BridgeError::Config(format!("DONATE_CONTRACT_ADDRESS: {}", e)))?;
        }

        if let Some(raw) = receipt_poll_ms {
            config.receipt_poll_ms = raw.trim().parse().map_err(|e| {
                BridgeError::Config(format!("DONATE_RECEIPT_POLL_MS must be a valid number: {}", e))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.contract_address.is_zero() {
            return Err(BridgeError::Config(
                "DONATE_CONTRACT_ADDRESS cannot be the zero address".to_string(),
            ));
        }

        let (min, max) = RECEIPT_POLL_RANGE_MS;
        if self.receipt_poll_ms < min || self.receipt_poll_ms > max {
            return Err(BridgeError::Config(format!(
                "DONATE_RECEIPT_POLL_MS must be between {} and {}",
                min, max
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constant() {
        let parsed: Address = DEFAULT_CONTRACT_ADDRESS.parse().unwrap();
        assert_eq!(BridgeConfig::default().contract_address, parsed);
    }

    #[test]
    fn test_from_values_overrides() {
        let config = BridgeConfig::from_values(
            Some("0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359"),
            Some("250"),
        )
        .unwrap();
        assert_eq!(
            config.contract_address.to_string(),
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359"
        );
        assert_eq!(config.receipt_poll_ms, 250);
    }

    #[test]
    fn test_from_values_defaults() {
        assert_eq!(BridgeConfig::from_values(None, None).unwrap(), BridgeConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            BridgeConfig::from_values(Some("not-an-address"), None),
            Err(BridgeError::Config(_))
        ));
        assert!(matches!(
            BridgeConfig::from_values(Some("0x0000000000000000000000000000000000000000"), None),
            Err(BridgeError::Config(_))
        ));
        assert!(BridgeConfig::from_values(None, Some("fast")).is_err());
        assert!(BridgeConfig::from_values(None, Some("10")).is_err());
        assert!(BridgeConfig::from_values(None, Some("600000")).is_err());
    }
}
