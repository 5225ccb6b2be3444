//! Application constants

/// Element in index.html shown until the wasm module mounts.
pub const LOADING_ELEMENT_ID: &str = "leptos-loading";

pub const APP_TITLE: &str = "Donate";
pub const CURRENCY_SYMBOL: &str = "ETH";

// Input placeholders
pub const DONATION_AMOUNT_PLACEHOLDER: &str = "Donation amount (ETH)";
pub const PROPOSED_LIMIT_PLACEHOLDER: &str = "Donation limit (ETH)";
pub const PROPOSED_RECEIVER_PLACEHOLDER: &str = "Receiver address";

// Button labels (the connect button label comes from the bridge state)
pub const DONATE_LABEL: &str = "Donate";
pub const SET_LIMIT_LABEL: &str = "[Owner only] Set donation limit";
pub const SET_RECEIVER_LABEL: &str = "[Owner only] Designate donation receiver";
pub const DISCONNECT_LABEL: &str = "Disconnect";

pub const PENDING_NOTICE: &str = "Waiting for the wallet or for the transaction to be mined...";
