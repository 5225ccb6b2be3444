//! # Centralized Error Handling
//!
//! [`BridgeError`] is the single error type used across the core. Every failure a
//! user-triggered operation can hit falls into one of these variants, and the bridge
//! turns it into the one-line message shown in the error region.
//!
//! ## Error Categories
//!
//! 1. **Environment** - [`WalletMissing`](BridgeError::WalletMissing): no injected provider
//! 2. **User rejection** - [`UserRejected`](BridgeError::UserRejected): EIP-1193 code `4001`
//! 3. **Contract revert** - [`ContractRevert`](BridgeError::ContractRevert): the contract refused a write
//! 4. **Transport** - [`Transport`](BridgeError::Transport): the provider or node failed
//! 5. **Local** - [`InvalidInput`](BridgeError::InvalidInput), [`NotConnected`](BridgeError::NotConnected),
//!    [`Config`](BridgeError::Config)
//! 6. **Internal** - [`Abi`](BridgeError::Abi), [`Decoding`](BridgeError::Decoding)
//!
//! ## Usage Example
//!
//! ```rust
//! use shared::error::{BridgeError, Result};
//!
//! fn require_amount(input: &str) -> Result<&str> {
//!     if input.trim().is_empty() {
//!         return Err(BridgeError::InvalidInput("amount cannot be empty".to_string()));
//!     }
//!     Ok(input)
//! }
//!
//! assert_eq!(
//!     require_amount(" ").unwrap_err().user_message(),
//!     "Error: invalid input: amount cannot be empty"
//! );
//! ```

use thiserror::Error;

use crate::rpc::RpcError;

/// Convenience type alias for `Result<T, BridgeError>`.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Error type covering every failure the bridge surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// No wallet provider was injected into the page.
    ///
    /// The display text is the fixed install prompt.
    #[error("install metamask!")]
    WalletMissing,

    /// The user declined the account-access or transaction prompt.
    #[error("request rejected by user: {0}")]
    UserRejected(String),

    /// The contract rejected the call (non-owner caller, limit exceeded, failed receipt).
    #[error("transaction reverted: {0}")]
    ContractRevert(String),

    /// The provider or the node behind it failed.
    #[error("provider error: {0}")]
    Transport(String),

    /// Form input failed local validation; nothing was sent.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A write was attempted before a wallet was connected.
    #[error("wallet not connected")]
    NotConnected,

    /// Build-time configuration is unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// The bundled contract artifact does not describe the requested call.
    #[error("ABI error: {0}")]
    Abi(String),

    /// Data returned by the provider could not be decoded.
    #[error("decoding error: {0}")]
    Decoding(String),
}

impl BridgeError {
    /// The string written to the error region.
    pub fn user_message(&self) -> String {
        format!("Error: {}", self)
    }

    /// Log level for this failure.
    ///
    /// Failures caused by the user or the contract are warnings; the rest are errors.
    pub fn log_level(&self) -> log::Level {
        match self {
            BridgeError::WalletMissing
            | BridgeError::UserRejected(_)
            | BridgeError::ContractRevert(_)
            | BridgeError::InvalidInput(_)
            | BridgeError::NotConnected => log::Level::Warn,
            BridgeError::Transport(_)
            | BridgeError::Config(_)
            | BridgeError::Abi(_)
            | BridgeError::Decoding(_) => log::Level::Error,
        }
    }
}

/// Classify a provider failure.
impl From<RpcError> for BridgeError {
    fn from(err: RpcError) -> Self {
        if err.code == RpcError::USER_REJECTED {
            BridgeError::UserRejected(err.message)
        } else if err.is_revert() {
            BridgeError::ContractRevert(err.detail())
        } else {
            BridgeError::Transport(err.to_string())
        }
    }
}

/// Convert `serde_json::Error` to `BridgeError`.
impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Decoding(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_install_prompt_is_fixed() {
        assert_eq!(BridgeError::WalletMissing.user_message(), "Error: install metamask!");
    }

    #[test]
    fn test_user_rejection_is_classified() {
        let err = BridgeError::from(RpcError::new(4001, "User rejected the request."));
        assert_eq!(err, BridgeError::UserRejected("User rejected the request.".to_string()));
        assert_eq!(err.log_level(), log::Level::Warn);
    }

    #[test]
    fn test_nested_revert_is_classified() {
        let rpc = RpcError {
            code: RpcError::INTERNAL,
            message: "Internal JSON-RPC error.".to_string(),
            data: Some(json!({
                "code": 3,
                "message": "execution reverted: Ownable: caller is not the owner",
            })),
        };
        assert_eq!(
            BridgeError::from(rpc),
            BridgeError::ContractRevert(
                "execution reverted: Ownable: caller is not the owner".to_string()
            )
        );
    }

    #[test]
    fn test_other_failures_are_transport() {
        let err = BridgeError::from(RpcError::new(-32002, "Request already pending"));
        assert!(matches!(err, BridgeError::Transport(_)));
        assert_eq!(err.log_level(), log::Level::Error);
        assert!(err.user_message().contains("Request already pending"));
    }
}
