//! # EIP-1193 Provider Seam
//!
//! The bridge never talks to the browser directly. It drives an [`Eip1193`]
//! implementation: the injected `window.ethereum` object in `donate-web`, or an
//! in-memory fake in tests. Requests and results are plain JSON values.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A wallet provider capability: account access, calls, and transaction submission.
///
/// Futures are `?Send`; browser values cannot leave the main thread.
#[async_trait(?Send)]
pub trait Eip1193 {
    /// Send one JSON-RPC request (`{ method, params }`) and return its `result`.
    async fn request(&self, method: &str, params: Value) -> std::result::Result<Value, RpcError>;

    /// Yield to the host for `ms` milliseconds between receipt polls.
    async fn delay(&self, ms: u32);
}

/// Failure reported by a provider (EIP-1193 `ProviderRpcError`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{message} (code {code})")]
pub struct RpcError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    /// The user rejected the request.
    pub const USER_REJECTED: i64 = 4001;
    /// Node-level "execution reverted".
    pub const EXECUTION_REVERTED: i64 = 3;
    /// Generic internal JSON-RPC error; wallets wrap node errors in it.
    pub const INTERNAL: i64 = -32603;

    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Self::INTERNAL, message)
    }

    fn nested_code(&self) -> Option<i64> {
        self.data.as_ref()?.get("code")?.as_i64()
    }

    fn nested_message(&self) -> Option<&str> {
        self.data.as_ref()?.get("message")?.as_str()
    }

    /// Whether the node reported a revert, directly or wrapped by the wallet.
    pub fn is_revert(&self) -> bool {
        self.code == Self::EXECUTION_REVERTED
            || self.nested_code() == Some(Self::EXECUTION_REVERTED)
            || self.detail().to_ascii_lowercase().contains("revert")
    }

    /// Most specific human-readable reason available.
    pub fn detail(&self) -> String {
        self.nested_message()
            .filter(|m| !m.is_empty())
            .unwrap_or(self.message.as_str())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_provider_error() {
        let err: RpcError = serde_json::from_value(json!({
            "code": 4001,
            "message": "User rejected the request."
        }))
        .unwrap();
        assert_eq!(err.code, RpcError::USER_REJECTED);
        assert_eq!(err.data, None);
        assert!(!err.is_revert());
    }

    #[test]
    fn test_missing_fields_default() {
        let err: RpcError = serde_json::from_value(json!({ "message": "boom" })).unwrap();
        assert_eq!(err.code, 0);
        assert_eq!(err.to_string(), "boom (code 0)");
    }

    #[test]
    fn test_revert_detected_from_message() {
        let err = RpcError::internal("execution reverted: amount exceeds limit");
        assert!(err.is_revert());
        assert_eq!(err.detail(), "execution reverted: amount exceeds limit");
    }
}
