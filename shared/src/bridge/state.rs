//! Session state owned by the view and mutated by the bridge.

use std::cell::RefCell;
use std::rc::Rc;

use crate::address::Address;
use crate::units::{format_ether, Wei};

pub const CONNECT_LABEL: &str = "Connect wallet";
pub const CONNECTED_LABEL: &str = "Wallet connected";

/// Whether a wallet is attached and which account is active.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected { account: Address },
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected { .. })
    }

    pub fn account(&self) -> Option<Address> {
        match self {
            ConnectionState::Connected { account } => Some(*account),
            ConnectionState::Disconnected => None,
        }
    }
}

/// Values last read from the contract.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContractViews {
    pub owner: Option<Address>,
    pub limit: Option<Wei>,
    pub receiver: Option<Address>,
    /// Fetched with the rest but not rendered.
    pub patrons: Vec<Address>,
}

impl ContractViews {
    /// Donation limit in ether; `0.0` until the first read.
    pub fn limit_display(&self) -> String {
        format_ether(self.limit.unwrap_or(Wei::ZERO))
    }
}

/// Raw text typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormInputs {
    pub donation_amount: String,
    pub proposed_limit: String,
    pub proposed_receiver: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    DonationAmount,
    ProposedLimit,
    ProposedReceiver,
}

impl FormInputs {
    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::DonationAmount => self.donation_amount = value,
            FormField::ProposedLimit => self.proposed_limit = value,
            FormField::ProposedReceiver => self.proposed_receiver = value,
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::DonationAmount => &self.donation_amount,
            FormField::ProposedLimit => &self.proposed_limit,
            FormField::ProposedReceiver => &self.proposed_receiver,
        }
    }
}

/// Everything the view renders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BridgeState {
    pub connection: ConnectionState,
    pub views: ContractViews,
    pub form: FormInputs,
    /// Last failure, overwritten by the next one.
    pub error_message: Option<String>,
    /// Operations currently waiting on the wallet or the chain.
    pub pending: u32,
}

impl BridgeState {
    pub fn connect_label(&self) -> &'static str {
        if self.connection.is_connected() {
            CONNECTED_LABEL
        } else {
            CONNECT_LABEL
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pending > 0
    }
}

/// Where the bridge keeps [`BridgeState`].
///
/// Reads inside the bridge must not subscribe the caller to changes; the web store
/// implements `read` untracked.
pub trait StateStore {
    fn read<R>(&self, f: impl FnOnce(&BridgeState) -> R) -> R;
    fn write(&self, f: impl FnOnce(&mut BridgeState));
}

impl StateStore for RefCell<BridgeState> {
    fn read<R>(&self, f: impl FnOnce(&BridgeState) -> R) -> R {
        f(&self.borrow())
    }

    fn write(&self, f: impl FnOnce(&mut BridgeState)) {
        f(&mut self.borrow_mut())
    }
}

impl<S: StateStore> StateStore for Rc<S> {
    fn read<R>(&self, f: impl FnOnce(&BridgeState) -> R) -> R {
        (**self).read(f)
    }

    fn write(&self, f: impl FnOnce(&mut BridgeState)) {
        (**self).write(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_label_follows_connection() {
        let mut state = BridgeState::default();
        assert_eq!(state.connect_label(), "Connect wallet");
        state.connection = ConnectionState::Connected { account: Address::ZERO };
        assert_eq!(state.connect_label(), "Wallet connected");
    }

    #[test]
    fn test_limit_display() {
        let mut views = ContractViews::default();
        assert_eq!(views.limit_display(), "0.0");
        views.limit = Some(Wei::ZERO);
        assert_eq!(views.limit_display(), "0.0");
        views.limit = Some(Wei::from_ether(5));
        assert_eq!(views.limit_display(), "5.0");
    }

    #[test]
    fn test_form_fields() {
        let mut form = FormInputs::default();
        form.set(FormField::ProposedLimit, "7".to_string());
        assert_eq!(form.get(FormField::ProposedLimit), "7");
        assert_eq!(form.get(FormField::DonationAmount), "");
    }

    #[test]
    fn test_refcell_store() {
        let store = Rc::new(RefCell::new(BridgeState::default()));
        store.write(|s| s.pending += 1);
        assert!(store.read(BridgeState::is_busy));
    }
}
