//! # Donate Bridge Core
//!
//! Host-independent core of the Donate dApp. Everything that does not touch the
//! browser lives here so it can be exercised natively; the `donate-web` crate only
//! supplies the injected wallet provider and a reactive state store.
//!
//! ## Structure
//!
//! - **[`units`]**: ether/wei conversion ([`units::parse_ether`], [`units::format_ether`])
//! - **[`address`]**: 20-byte account addresses with EIP-55 checksums
//! - **[`abi`]**: the bundled `Donate` artifact, selectors, and a minimal word codec
//! - **[`rpc`]**: the [`rpc::Eip1193`] provider seam and its error shape
//! - **[`contract`]**: read and write handles bound to the deployed contract
//! - **[`bridge`]**: the Wallet-Contract Bridge and its UI state
//! - **[`config`]**: contract address and confirmation polling settings
//! - **[`error`]**: [`error::BridgeError`] and the crate-wide `Result`
//! - **[`utils`]**: display helpers for addresses
//!
//! ## Usage in the Front End
//!
//! ```rust,no_run
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use shared::abi::ContractAbi;
//! use shared::bridge::{Bridge, BridgeState};
//! use shared::config::BridgeConfig;
//! use shared::rpc::Eip1193;
//!
//! # async fn run(provider: Option<Rc<dyn Eip1193>>) -> shared::error::Result<()> {
//! let bridge = Bridge::new(
//!     provider,
//!     ContractAbi::donate()?,
//!     BridgeConfig::default(),
//!     RefCell::new(BridgeState::default()),
//! );
//! bridge.load_contract_data().await;
//! bridge.connect().await;
//! # Ok(())
//! # }
//! ```

pub mod abi;
pub mod address;
pub mod bridge;
pub mod config;
pub mod contract;
pub mod error;
pub mod rpc;
pub mod units;
pub mod utils;

pub use address::Address;
pub use error::{BridgeError, Result};
pub use units::Wei;
pub use utils::*;
