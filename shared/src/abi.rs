//! # Contract ABI
//!
//! The `Donate` contract is described by a bundled Hardhat artifact
//! (`abi/Donate.json`). [`ContractAbi`] reads the function entries from it and builds
//! calldata; the free functions decode the handful of return shapes the contract uses.
//!
//! Only static `uint256` / `address` arguments and `uint256`, `address`, `address[]`
//! return values are supported, which covers every function the bridge calls.
//!
//! ```rust
//! use shared::abi::{selector, ContractAbi};
//!
//! let abi = ContractAbi::donate().unwrap();
//! let owner = abi.function("owner").unwrap();
//! assert_eq!(owner.signature(), "owner()");
//! assert_eq!(owner.selector(), selector("owner()"));
//! ```

use serde::Deserialize;
use sha3::{Digest, Keccak256};

use crate::address::Address;
use crate::error::{BridgeError, Result};

const DONATE_ARTIFACT: &str = include_str!("../abi/Donate.json");

const WORD: usize = 32;

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// First four bytes of keccak-256 of a canonical signature such as `setDonationLimit(uint256)`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

#[derive(Deserialize)]
struct Artifact {
    #[serde(rename = "contractName", default)]
    contract_name: String,
    abi: Vec<AbiEntry>,
}

#[derive(Deserialize)]
struct AbiEntry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<AbiParam>,
    #[serde(default)]
    outputs: Vec<AbiParam>,
    #[serde(rename = "stateMutability", default)]
    state_mutability: String,
}

#[derive(Deserialize)]
struct AbiParam {
    #[serde(rename = "type")]
    kind: String,
}

/// A function entry from the artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub payable: bool,
}

impl Function {
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.inputs.join(","))
    }

    pub fn selector(&self) -> [u8; 4] {
        selector(&self.signature())
    }
}

/// A single static argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    Uint(u128),
    Address(Address),
}

impl Token {
    pub fn abi_type(&self) -> &'static str {
        match self {
            Token::Uint(_) => "uint256",
            Token::Address(_) => "address",
        }
    }

    /// Left-padded 32-byte word.
    pub fn encode(&self) -> [u8; 32] {
        let mut word = [0u8; WORD];
        match self {
            Token::Uint(value) => word[16..].copy_from_slice(&value.to_be_bytes()),
            Token::Address(address) => word[12..].copy_from_slice(address.as_bytes()),
        }
        word
    }
}

#[derive(Clone, Debug)]
pub struct ContractAbi {
    name: String,
    functions: Vec<Function>,
}

impl ContractAbi {
    /// Parse a Hardhat/Truffle style artifact (`{ "contractName": .., "abi": [..] }`).
    pub fn from_artifact(json: &str) -> Result<Self> {
        let artifact: Artifact = serde_json::from_str(json)
            .map_err(|e| BridgeError::Abi(format!("invalid contract artifact: {}", e)))?;

        let functions = artifact
            .abi
            .into_iter()
            .filter(|entry| entry.kind == "function")
            .map(|entry| Function {
                name: entry.name,
                inputs: entry.inputs.into_iter().map(|p| p.kind).collect(),
                outputs: entry.outputs.into_iter().map(|p| p.kind).collect(),
                payable: entry.state_mutability == "payable",
            })
            .collect();

        Ok(Self {
            name: artifact.contract_name,
            functions,
        })
    }

    /// The bundled `Donate` artifact.
    pub fn donate() -> Result<Self> {
        Self::from_artifact(DONATE_ARTIFACT)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn function(&self, name: &str) -> Result<&Function> {
        self.functions
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| BridgeError::Abi(format!("{} has no function {}", self.name, name)))
    }

    /// Selector followed by one word per argument, checked against the declared inputs.
    pub fn encode_call(&self, name: &str, args: &[Token]) -> Result<Vec<u8>> {
        let function = self.function(name)?;
        let declared: Vec<&str> = function.inputs.iter().map(String::as_str).collect();
        let given: Vec<&str> = args.iter().map(Token::abi_type).collect();
        if declared != given {
            return Err(BridgeError::Abi(format!(
                "{} expects ({}), got ({})",
                function.signature(),
                declared.join(","),
                given.join(",")
            )));
        }

        let mut data = Vec::with_capacity(4 + WORD * args.len());
        data.extend_from_slice(&function.selector());
        for arg in args {
            data.extend_from_slice(&arg.encode());
        }
        Ok(data)
    }
}

fn word(data: &[u8], offset: usize) -> Result<&[u8]> {
    offset
        .checked_add(WORD)
        .and_then(|end| data.get(offset..end))
        .ok_or_else(|| {
            BridgeError::Decoding(format!(
                "return data too short: need word at byte {}, have {} bytes",
                offset,
                data.len()
            ))
        })
}

fn uint_at(data: &[u8], offset: usize) -> Result<u128> {
    let word = word(data, offset)?;
    if word[..16].iter().any(|b| *b != 0) {
        return Err(BridgeError::Decoding("uint256 value exceeds 128 bits".to_string()));
    }
    let mut low = [0u8; 16];
    low.copy_from_slice(&word[16..]);
    Ok(u128::from_be_bytes(low))
}

fn address_at(data: &[u8], offset: usize) -> Result<Address> {
    let word = word(data, offset)?;
    if word[..12].iter().any(|b| *b != 0) {
        return Err(BridgeError::Decoding("address word has non-zero padding".to_string()));
    }
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&word[12..]);
    Ok(Address::new(bytes))
}

fn usize_at(data: &[u8], offset: usize) -> Result<usize> {
    usize::try_from(uint_at(data, offset)?)
        .map_err(|_| BridgeError::Decoding("offset does not fit in memory".to_string()))
}

pub fn decode_uint(data: &[u8]) -> Result<u128> {
    uint_at(data, 0)
}

pub fn decode_address(data: &[u8]) -> Result<Address> {
    address_at(data, 0)
}

/// A single dynamic `address[]` return value: head offset, length, then elements.
pub fn decode_address_array(data: &[u8]) -> Result<Vec<Address>> {
    let start = usize_at(data, 0)?;
    let len = usize_at(data, start)?;
    let elements = start + WORD;
    if len > data.len().saturating_sub(elements) / WORD {
        return Err(BridgeError::Decoding(format!(
            "address[] claims {} elements, data holds fewer",
            len
        )));
    }
    (0..len).map(|i| address_at(data, elements + i * WORD)).collect()
}

/// `0x`-prefixed hex as used for calldata and return data.
pub fn to_hex_data(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub fn from_hex_data(data: &str) -> Result<Vec<u8>> {
    let digits = data.strip_prefix("0x").unwrap_or(data);
    hex::decode(digits).map_err(|e| BridgeError::Decoding(format!("invalid hex data ({}): {}", e, data)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    #[test]
    fn test_well_known_selectors() {
        assert_eq!(selector("owner()"), [0x8d, 0xa5, 0xcb, 0x5b]);
        assert_eq!(selector("totalSupply()"), [0x18, 0x16, 0x0d, 0xdd]);
        assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn test_bundled_artifact_has_every_function() {
        let abi = ContractAbi::donate().unwrap();
        assert_eq!(abi.name(), "Donate");
        for (name, signature) in [
            ("donate", "donate()"),
            ("donationLimit", "donationLimit()"),
            ("getReceiverAddress", "getReceiverAddress()"),
            ("getPatronsArray", "getPatronsArray()"),
            ("owner", "owner()"),
            ("setDonationLimit", "setDonationLimit(uint256)"),
            ("setDonationReceiver", "setDonationReceiver(address)"),
        ] {
            assert_eq!(abi.function(name).unwrap().signature(), signature);
        }
        assert!(abi.function("donate").unwrap().payable);
        assert!(!abi.function("setDonationLimit").unwrap().payable);
        assert_eq!(abi.function("getPatronsArray").unwrap().outputs, vec!["address[]"]);
    }

    #[test]
    fn test_unknown_function_is_abi_error() {
        let abi = ContractAbi::donate().unwrap();
        assert!(matches!(abi.function("withdraw"), Err(BridgeError::Abi(_))));
    }

    #[test]
    fn test_encode_call_layout() {
        let abi = ContractAbi::donate().unwrap();
        let data = abi.encode_call("setDonationLimit", &[Token::Uint(5)]).unwrap();
        assert_eq!(data.len(), 36);
        assert_eq!(data[..4], selector("setDonationLimit(uint256)"));
        assert_eq!(data[35], 5);
        assert!(data[4..35].iter().all(|b| *b == 0));

        let receiver = addr("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
        let data = abi.encode_call("setDonationReceiver", &[Token::Address(receiver)]).unwrap();
        assert_eq!(decode_address(&data[4..]).unwrap(), receiver);
    }

    #[test]
    fn test_encode_call_checks_arguments() {
        let abi = ContractAbi::donate().unwrap();
        assert!(abi.encode_call("setDonationLimit", &[]).is_err());
        assert!(abi
            .encode_call("setDonationLimit", &[Token::Address(Address::ZERO)])
            .is_err());
        assert!(abi.encode_call("owner", &[Token::Uint(1)]).is_err());
    }

    #[test]
    fn test_decode_uint_bounds() {
        assert_eq!(decode_uint(&Token::Uint(u128::MAX).encode()).unwrap(), u128::MAX);
        let mut huge = [0u8; 32];
        huge[0] = 1;
        assert!(decode_uint(&huge).is_err());
        assert!(decode_uint(&[0u8; 31]).is_err());
    }

    #[test]
    fn test_decode_address_array() {
        let a = addr("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let b = addr("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
        let mut data = Vec::new();
        data.extend_from_slice(&Token::Uint(32).encode());
        data.extend_from_slice(&Token::Uint(2).encode());
        data.extend_from_slice(&Token::Address(a).encode());
        data.extend_from_slice(&Token::Address(b).encode());
        assert_eq!(decode_address_array(&data).unwrap(), vec![a, b]);

        // length claims more elements than present
        data.truncate(WORD * 3);
        assert!(decode_address_array(&data).is_err());
    }

    #[test]
    fn test_decode_empty_address_array() {
        let mut data = Vec::new();
        data.extend_from_slice(&Token::Uint(32).encode());
        data.extend_from_slice(&Token::Uint(0).encode());
        assert!(decode_address_array(&data).unwrap().is_empty());
    }

    #[test]
    fn test_hex_data() {
        assert_eq!(to_hex_data(&[0xde, 0xad]), "0xdead");
        assert_eq!(from_hex_data("0xdead").unwrap(), vec![0xde, 0xad]);
        assert!(from_hex_data("0x").unwrap().is_empty());
        assert!(from_hex_data("0xzz").is_err());
    }
}
