//! # Contract Handles
//!
//! [`ReadHandle`] queries the deployed `Donate` contract with `eth_call`;
//! [`WriteHandle`] submits transactions from the connected account with
//! `eth_sendTransaction` and hands back a [`PendingTx`] that waits for the receipt.
//!
//! Both hold the provider behind an `Rc`, so cloning a handle is cheap and a
//! reconnect replaces them wholesale.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::abi::{self, ContractAbi, Token};
use crate::address::Address;
use crate::error::{BridgeError, Result};
use crate::rpc::Eip1193;
use crate::units::Wei;

pub const FN_DONATE: &str = "donate";
pub const FN_DONATION_LIMIT: &str = "donationLimit";
pub const FN_RECEIVER: &str = "getReceiverAddress";
pub const FN_PATRONS: &str = "getPatronsArray";
pub const FN_OWNER: &str = "owner";
pub const FN_SET_DONATION_LIMIT: &str = "setDonationLimit";
pub const FN_SET_DONATION_RECEIVER: &str = "setDonationReceiver";

/// `eth_call` parameter object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRequest {
    pub to: Address,
    pub data: String,
}

/// `eth_sendTransaction` parameter object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// The fields of `eth_getTransactionReceipt` the bridge looks at.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl TransactionReceipt {
    /// Post-Byzantium receipts carry `status`; `0x0` means the transaction reverted.
    pub fn succeeded(&self) -> bool {
        self.status.as_deref() != Some("0x0")
    }
}

/// Query-only capability bound to the contract address.
#[derive(Clone)]
pub struct ReadHandle {
    provider: Rc<dyn Eip1193>,
    abi: Rc<ContractAbi>,
    address: Address,
}

impl ReadHandle {
    pub fn new(provider: Rc<dyn Eip1193>, abi: Rc<ContractAbi>, address: Address) -> Self {
        Self { provider, abi, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    async fn call(&self, function: &str) -> Result<Vec<u8>> {
        let data = self.abi.encode_call(function, &[])?;
        let request = CallRequest {
            to: self.address,
            data: abi::to_hex_data(&data),
        };
        let result = self
            .provider
            .request("eth_call", json!([serde_json::to_value(&request)?, "latest"]))
            .await?;
        let hex: String = serde_json::from_value(result)?;
        abi::from_hex_data(&hex)
    }

    /// Current donation limit in wei.
    pub async fn donation_limit(&self) -> Result<Wei> {
        abi::decode_uint(&self.call(FN_DONATION_LIMIT).await?).map(Wei)
    }

    pub async fn receiver(&self) -> Result<Address> {
        abi::decode_address(&self.call(FN_RECEIVER).await?)
    }

    pub async fn patrons(&self) -> Result<Vec<Address>> {
        abi::decode_address_array(&self.call(FN_PATRONS).await?)
    }

    pub async fn owner(&self) -> Result<Address> {
        abi::decode_address(&self.call(FN_OWNER).await?)
    }
}

/// Capability to submit state-changing transactions as `from`.
#[derive(Clone)]
pub struct WriteHandle {
    contract: ReadHandle,
    from: Address,
    poll_ms: u32,
}

impl WriteHandle {
    pub fn new(contract: ReadHandle, from: Address, poll_ms: u32) -> Self {
        Self { contract, from, poll_ms }
    }

    pub fn account(&self) -> Address {
        self.from
    }

    async fn send(&self, function: &str, args: &[Token], value: Option<Wei>) -> Result<PendingTx> {
        let abi = &self.contract.abi;
        if value.is_some() && !abi.function(function)?.payable {
            return Err(BridgeError::Abi(format!("{} is not payable", function)));
        }

        let data = abi.encode_call(function, args)?;
        let request = TransactionRequest {
            from: self.from,
            to: self.contract.address,
            data: abi::to_hex_data(&data),
            value: value.map(|v| v.to_quantity()),
        };
        let result = self
            .contract
            .provider
            .request("eth_sendTransaction", json!([serde_json::to_value(&request)?]))
            .await?;
        let hash: String = serde_json::from_value(result)?;
        log::info!("{}: submitted {}", function, hash);

        Ok(PendingTx {
            provider: Rc::clone(&self.contract.provider),
            hash,
            poll_ms: self.poll_ms,
        })
    }

    /// Value-bearing call to `donate()`.
    pub async fn donate(&self, amount: Wei) -> Result<PendingTx> {
        self.send(FN_DONATE, &[], Some(amount)).await
    }

    pub async fn set_donation_limit(&self, limit: Wei) -> Result<PendingTx> {
        self.send(FN_SET_DONATION_LIMIT, &[Token::Uint(limit.0)], None).await
    }

    pub async fn set_donation_receiver(&self, receiver: Address) -> Result<PendingTx> {
        self.send(FN_SET_DONATION_RECEIVER, &[Token::Address(receiver)], None).await
    }
}

/// A submitted transaction that has not been seen in a block yet.
pub struct PendingTx {
    provider: Rc<dyn Eip1193>,
    hash: String,
    poll_ms: u32,
}

impl PendingTx {
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Poll for the receipt until the transaction is mined. There is no timeout.
    pub async fn confirm(self) -> Result<TransactionReceipt> {
        loop {
            let result = self
                .provider
                .request("eth_getTransactionReceipt", json!([self.hash]))
                .await?;

            if !result.is_null() {
                let receipt: TransactionReceipt = serde_json::from_value(result)?;
                if !receipt.succeeded() {
                    return Err(BridgeError::ContractRevert(format!(
                        "transaction {} failed",
                        receipt.transaction_hash
                    )));
                }
                log::debug!(
                    "{} mined in block {}",
                    receipt.transaction_hash,
                    receipt.block_number.as_deref().unwrap_or("?")
                );
                return Ok(receipt);
            }

            self.provider.delay(self.poll_ms).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_request_shape() {
        let request = TransactionRequest {
            from: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap(),
            to: "0x5FbDB2315678afecb367f032d93F642f64180aa3".parse().unwrap(),
            data: "0x".to_string(),
            value: Some(Wei::from_ether(1).to_quantity()),
        };
        let value: Value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["from"], "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        assert_eq!(value["to"], "0x5FbDB2315678afecb367f032d93F642f64180aa3");
        assert_eq!(value["value"], "0xde0b6b3a7640000");

        let without_value = TransactionRequest { value: None, ..request };
        let value: Value = serde_json::to_value(&without_value).unwrap();
        assert!(value.get("value").is_none());
    }

    #[test]
    fn test_receipt_status() {
        let ok: TransactionReceipt = serde_json::from_value(json!({
            "transactionHash": "0x01",
            "blockNumber": "0x2",
            "status": "0x1"
        }))
        .unwrap();
        assert!(ok.succeeded());

        let failed: TransactionReceipt = serde_json::from_value(json!({
            "transactionHash": "0x01",
            "status": "0x0"
        }))
        .unwrap();
        assert!(!failed.succeeded());

        // pre-Byzantium receipts have no status
        let legacy: TransactionReceipt =
            serde_json::from_value(json!({ "transactionHash": "0x01" })).unwrap();
        assert!(legacy.succeeded());
    }
}
