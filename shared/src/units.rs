//! # Ether Units
//!
//! Values cross the contract boundary in wei and are shown to the user in ether.
//! [`parse_ether`] and [`format_ether`] are the only places the two meet.
//!
//! ```rust
//! use shared::units::{format_ether, parse_ether, Wei};
//!
//! let wei = parse_ether("1.5").unwrap();
//! assert_eq!(wei, Wei(1_500_000_000_000_000_000));
//! assert_eq!(format_ether(wei), "1.5");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// Decimal places between ether and wei.
pub const ETHER_DECIMALS: u32 = 18;

const WEI_PER_ETHER: u128 = 10u128.pow(ETHER_DECIMALS);

/// An amount in the chain's base unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Wei(pub u128);

impl Wei {
    pub const ZERO: Wei = Wei(0);

    /// Whole ether to wei. Cannot overflow for any `u64`.
    pub fn from_ether(ether: u64) -> Self {
        Wei(u128::from(ether) * WEI_PER_ETHER)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// JSON-RPC quantity encoding (`0x`-prefixed, no leading zeros).
    pub fn to_quantity(&self) -> String {
        format!("{:#x}", self.0)
    }
}

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_ether(*self))
    }
}

/// Parse a decimal ether amount typed by the user.
///
/// Accepts `"1"`, `"1.5"`, `".5"` and `"1."`. Signs, exponents, more than
/// [`ETHER_DECIMALS`] fractional digits and values beyond `u128` wei are rejected.
pub fn parse_ether(input: &str) -> Result<Wei> {
    let amount = input.trim();
    if amount.is_empty() {
        return Err(BridgeError::InvalidInput("amount cannot be empty".to_string()));
    }

    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(not_a_number(amount));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_a_number(amount));
    }
    if fraction.len() > ETHER_DECIMALS as usize {
        return Err(BridgeError::InvalidInput(format!(
            "amount has more than {} decimal places: {}",
            ETHER_DECIMALS, amount
        )));
    }

    let too_large = || BridgeError::InvalidInput(format!("amount is too large: {}", amount));

    let whole_wei = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u128>()
            .ok()
            .and_then(|w| w.checked_mul(WEI_PER_ETHER))
            .ok_or_else(too_large)?
    };

    let fraction_wei = fraction
        .bytes()
        .fold(0u128, |acc, b| acc * 10 + u128::from(b - b'0'))
        * 10u128.pow(ETHER_DECIMALS - fraction.len() as u32);

    whole_wei.checked_add(fraction_wei).map(Wei).ok_or_else(too_large)
}

/// Render wei as ether, keeping at least one fractional digit (`5.0`, `0.25`).
pub fn format_ether(wei: Wei) -> String {
    let whole = wei.0 / WEI_PER_ETHER;
    let fraction = format!("{:018}", wei.0 % WEI_PER_ETHER);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{}.0", whole)
    } else {
        format!("{}.{}", whole, fraction)
    }
}

fn not_a_number(amount: &str) -> BridgeError {
    BridgeError::InvalidInput(format!("amount is not a decimal number: {}", amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!(parse_ether("1").unwrap(), Wei::from_ether(1));
        assert_eq!(parse_ether(" 2.5 ").unwrap(), Wei(2_500_000_000_000_000_000));
        assert_eq!(parse_ether(".5").unwrap(), Wei(500_000_000_000_000_000));
        assert_eq!(parse_ether("3.").unwrap(), Wei::from_ether(3));
        assert_eq!(parse_ether("0.000000000000000001").unwrap(), Wei(1));
        assert_eq!(parse_ether("0").unwrap(), Wei::ZERO);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "   ", ".", "-1", "+1", "1e18", "1.2.3", "abc", "1,5", "0x10"] {
            assert!(
                matches!(parse_ether(input), Err(BridgeError::InvalidInput(_))),
                "accepted {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_rejects_excess_precision() {
        assert!(parse_ether("0.0000000000000000001").is_err());
    }

    #[test]
    fn test_parse_rejects_overflow() {
        // u128::MAX wei is ~3.4e20 ether
        assert!(parse_ether("340282366920938463464").is_err());
        assert!(parse_ether("99999999999999999999999999999999999999999").is_err());
        assert_eq!(
            parse_ether("340282366920938463463.374607431768211455").unwrap(),
            Wei(u128::MAX)
        );
    }

    #[test]
    fn test_format_ether() {
        assert_eq!(format_ether(Wei::from_ether(5)), "5.0");
        assert_eq!(format_ether(Wei::ZERO), "0.0");
        assert_eq!(format_ether(Wei(250_000_000_000_000_000)), "0.25");
        assert_eq!(format_ether(Wei(1_000_000_000_000_000_001)), "1.000000000000000001");
    }

    #[test]
    fn test_integer_coin_round_trip() {
        for ether in [0u64, 1, 5, 42, 1_000_000, u64::MAX] {
            let wei = parse_ether(&ether.to_string()).unwrap();
            assert_eq!(wei, Wei::from_ether(ether));
            assert_eq!(parse_ether(&format_ether(wei)).unwrap(), wei);
        }
    }

    #[test]
    fn test_quantity_encoding() {
        assert_eq!(Wei::ZERO.to_quantity(), "0x0");
        assert_eq!(Wei::from_ether(1).to_quantity(), "0xde0b6b3a7640000");
    }
}
