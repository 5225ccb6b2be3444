//! # Account Addresses
//!
//! 20-byte Ethereum addresses. Parsing accepts `0x`-prefixed hex; display always uses
//! the EIP-55 mixed-case checksum so every address the UI renders is normalized.
//!
//! ```rust
//! use shared::Address;
//!
//! let addr: Address = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed".parse().unwrap();
//! assert_eq!(addr.to_string(), "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::abi::keccak256;
use crate::error::BridgeError;

#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; 20]);

impl Address {
    pub const ZERO: Address = Address([0u8; 20]);

    pub const fn new(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// EIP-55 checksum form: a hex letter is upper-cased when the matching nibble of
    /// keccak-256(lowercase hex) is 8 or more.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = keccak256(lower.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 { hash[i / 2] >> 4 } else { hash[i / 2] & 0x0f };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl FromStr for Address {
    type Err = BridgeError;

    /// All-lowercase and all-uppercase hex are taken as is; mixed case must be a valid checksum.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| BridgeError::InvalidInput(format!("address must start with 0x: {}", s)))?;

        if digits.len() != 40 {
            return Err(BridgeError::InvalidInput(format!(
                "address must have 40 hex digits: {}",
                s
            )));
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| BridgeError::InvalidInput(format!("address is not hex ({}): {}", e, s)))?;
        let address = Address(bytes);

        let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
        if has_lower && has_upper && address.to_checksum()[2..] != *digits {
            return Err(BridgeError::InvalidInput(format!("bad address checksum: {}", s)));
        }

        Ok(address)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_checksum())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Vectors from EIP-55.
    const CHECKSUMMED: [&str; 4] = [
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ];

    #[test]
    fn test_checksum_vectors() {
        for expected in CHECKSUMMED {
            let addr: Address = expected.to_lowercase().parse().unwrap();
            assert_eq!(addr.to_string(), expected);
            assert_eq!(expected.parse::<Address>().unwrap(), addr);
        }
    }

    #[test]
    fn test_single_case_vectors_keep_case() {
        let upper = "0x52908400098527886E0F7030069857D2E4169EE7";
        let lower = "0xde709f2102306220921060314715629080e2fb77";
        assert_eq!(upper.parse::<Address>().unwrap().to_string(), upper);
        assert_eq!(lower.parse::<Address>().unwrap().to_string(), lower);
    }

    #[test]
    fn test_bad_checksum_rejected() {
        // flip the case of one letter
        let tampered = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeD";
        assert!(matches!(
            tampered.parse::<Address>(),
            Err(BridgeError::InvalidInput(msg)) if msg.contains("checksum")
        ));
    }

    #[test]
    fn test_malformed_rejected() {
        for input in [
            "",
            "5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1bea",
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaedff",
            "0xzzaeb6053f3e94c9b9a09f33669435e7ef1beaed",
        ] {
            assert!(input.parse::<Address>().is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_serde_uses_checksum() {
        let addr: Address = serde_json::from_str("\"0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359\"").unwrap();
        assert_eq!(
            serde_json::to_string(&addr).unwrap(),
            "\"0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359\""
        );
        assert!(serde_json::from_str::<Address>("\"0x1234\"").is_err());
    }
}
