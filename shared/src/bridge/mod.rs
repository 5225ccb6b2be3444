//! # Wallet-Contract Bridge
//!
//! Mediates between user intent (clicks, typed input) and the wallet/contract
//! boundary. Every operation is a thin pass-through: validate the form input, make
//! the external call, wait for it, and write the outcome into [`BridgeState`].
//!
//! ## Operations
//!
//! | Operation | External calls | On success |
//! |---|---|---|
//! | [`Bridge::connect`] | `eth_requestAccounts` | installs read + write handles, account shown |
//! | [`Bridge::donate`] | `eth_sendTransaction` (value) + receipt | views refreshed |
//! | [`Bridge::set_limit`] | `eth_sendTransaction` + receipt | limit shown, views refreshed |
//! | [`Bridge::set_receiver`] | `eth_sendTransaction` + receipt | receiver shown, views refreshed |
//! | [`Bridge::load_contract_data`] | four `eth_call`s | limit, receiver, patrons, owner |
//! | [`Bridge::disconnect`] | none | handles dropped |
//!
//! ## Failure Handling
//!
//! Operations never return errors to the caller. Failures are logged and the
//! message replaces [`BridgeState::error_message`]; the app stays interactive.
//! A read that fails after a write is mined does not fail the write; the message
//! says the write was confirmed and the displayed values may be stale.
//!
//! ## Concurrency
//!
//! Single-threaded and cooperative. Two operations started back to back both run;
//! nothing serializes them. The handles are only ever replaced as a pair.

mod state;


use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use crate::abi::ContractAbi;
use crate::address::Address;
use crate::config::BridgeConfig;
use crate::contract::{ReadHandle, WriteHandle};
use crate::error::{BridgeError, Result};
use crate::rpc::Eip1193;
use crate::units::parse_ether;

pub use state::{
    BridgeState, ConnectionState, ContractViews, FormField, FormInputs, StateStore, CONNECTED_LABEL,
    CONNECT_LABEL,
};

/// Handles installed by a successful connect.
#[derive(Clone)]
struct Session {
    read: ReadHandle,
    write: WriteHandle,
}

pub struct Bridge<S> {
    provider: Option<Rc<dyn Eip1193>>,
    abi: Rc<ContractAbi>,
    config: BridgeConfig,
    store: S,
    session: RefCell<Option<Session>>,
}

impl<S: StateStore> Bridge<S> {
    /// `provider` is `None` when no wallet was injected into the page.
    pub fn new(provider: Option<Rc<dyn Eip1193>>, abi: ContractAbi, config: BridgeConfig, store: S) -> Self {
        Self {
            provider,
            abi: Rc::new(abi),
            config,
            store,
            session: RefCell::new(None),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> BridgeState {
        self.store.read(BridgeState::clone)
    }

    pub fn contract_address(&self) -> Address {
        self.config.contract_address
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Both handles are present.
    pub fn is_connected(&self) -> bool {
        self.session.borrow().is_some()
    }

    pub fn set_input(&self, field: FormField, value: String) {
        self.store.write(|s| s.form.set(field, value));
    }

    /// Request account access and bind read/write handles to the contract.
    pub async fn connect(&self) {
        self.run("connect", self.try_connect()).await
    }

    /// Send the donation amount (ether) to `donate()` and wait for it to be mined.
    pub async fn donate(&self) {
        self.run("donate", self.try_donate()).await
    }

    /// Owner only, enforced by the contract.
    pub async fn set_limit(&self) {
        self.run("set_limit", self.try_set_limit()).await
    }

    /// Owner only, enforced by the contract.
    pub async fn set_receiver(&self) {
        self.run("set_receiver", self.try_set_receiver()).await
    }

    /// Read limit, receiver, patrons and owner with a standalone read handle.
    ///
    /// Works before connect. Without a provider there is nothing to read from.
    pub async fn load_contract_data(&self) {
        let Some(provider) = self.provider.clone() else {
            log::warn!("load_contract_data: no wallet provider, skipping");
            return;
        };
        let read = ReadHandle::new(provider, Rc::clone(&self.abi), self.config.contract_address);
        self.run("load_contract_data", self.fetch_views(&read)).await
    }

    /// Drop both handles. Displayed contract values and form input stay.
    pub fn disconnect(&self) {
        self.session.borrow_mut().take();
        self.store.write(|s| s.connection = ConnectionState::Disconnected);
        log::info!("wallet disconnected");
    }

    async fn try_connect(&self) -> Result<()> {
        let provider = self.provider.clone().ok_or(BridgeError::WalletMissing)?;

        let accounts = provider
            .request("eth_requestAccounts", serde_json::Value::Array(Vec::new()))
            .await?;
        let accounts: Vec<Address> = serde_json::from_value(accounts)?;
        let account = *accounts
            .first()
            .ok_or_else(|| BridgeError::UserRejected("wallet returned no accounts".to_string()))?;

        let read = ReadHandle::new(provider, Rc::clone(&self.abi), self.config.contract_address);
        let write = WriteHandle::new(read.clone(), account, self.config.receipt_poll_ms);
        *self.session.borrow_mut() = Some(Session { read, write });
        self.store.write(|s| s.connection = ConnectionState::Connected { account });

        log::info!("wallet connected: {}", account);
        Ok(())
    }

    async fn try_donate(&self) -> Result<()> {
        let write = self.write_handle()?;
        let amount = parse_ether(&self.input(FormField::DonationAmount))?;
        if amount.is_zero() {
            return Err(BridgeError::InvalidInput(
                "donation amount must be greater than zero".to_string(),
            ));
        }

        let receipt = write.donate(amount).await?.confirm().await?;
        log::info!("donation of {} ETH confirmed: {}", amount, receipt.transaction_hash);

        self.refresh_views("donation").await;
        Ok(())
    }

    async fn try_set_limit(&self) -> Result<()> {
        let write = self.write_handle()?;
        let limit = parse_ether(&self.input(FormField::ProposedLimit))?;

        let receipt = write.set_donation_limit(limit).await?.confirm().await?;
        log::info!("donation limit set to {} ETH: {}", limit, receipt.transaction_hash);
        self.store.write(|s| s.views.limit = Some(limit));

        self.refresh_views("donation limit change").await;
        Ok(())
    }

    async fn try_set_receiver(&self) -> Result<()> {
        let write = self.write_handle()?;
        let receiver: Address = self.input(FormField::ProposedReceiver).parse()?;

        let receipt = write.set_donation_receiver(receiver).await?.confirm().await?;
        log::info!("donation receiver set to {}: {}", receiver, receipt.transaction_hash);
        self.store.write(|s| s.views.receiver = Some(receiver));

        self.refresh_views("receiver change").await;
        Ok(())
    }

    /// Re-read the contract after a confirmed write.
    ///
    /// The write has already been mined, so a failed read is reported as stale data
    /// rather than as a failure of the write.
    async fn refresh_views(&self, confirmed: &'static str) {
        let Some(read) = self.read_handle() else {
            return;
        };
        if let Err(err) = self.fetch_views(&read).await {
            log::log!(err.log_level(), "{} confirmed, refresh failed: {}", confirmed, err);
            let message = format!(
                "Error: {} confirmed, but reloading contract data failed: {}",
                confirmed, err
            );
            self.store.write(|s| s.error_message = Some(message));
        }
    }

    /// Sequential reads; each value is stored as soon as it arrives and the first
    /// failure stops the rest.
    async fn fetch_views(&self, read: &ReadHandle) -> Result<()> {
        let limit = read.donation_limit().await?;
        self.store.write(|s| s.views.limit = Some(limit));

        let receiver = read.receiver().await?;
        self.store.write(|s| s.views.receiver = Some(receiver));

        let patrons = read.patrons().await?;
        log::debug!("{} patrons on record", patrons.len());
        self.store.write(|s| s.views.patrons = patrons);

        let owner = read.owner().await?;
        self.store.write(|s| s.views.owner = Some(owner));

        Ok(())
    }

    fn input(&self, field: FormField) -> String {
        self.store.read(|s| s.form.get(field).to_string())
    }

    fn read_handle(&self) -> Option<ReadHandle> {
        self.session.borrow().as_ref().map(|session| session.read.clone())
    }

    fn write_handle(&self) -> Result<WriteHandle> {
        self.session
            .borrow()
            .as_ref()
            .map(|session| session.write.clone())
            .ok_or(BridgeError::NotConnected)
    }

    async fn run(&self, operation: &'static str, task: impl Future<Output = Result<()>>) {
        log::debug!("{}: started", operation);
        self.store.write(|s| s.pending += 1);

        let outcome = task.await;

        self.store.write(|s| s.pending = s.pending.saturating_sub(1));
        match outcome {
            Ok(()) => log::info!("{}: done", operation),
            Err(err) => self.report(operation, &err),
        }
    }

    fn report(&self, operation: &'static str, err: &BridgeError) {
        log::log!(err.log_level(), "{} failed: {}", operation, err);
        let message = err.user_message();
        self.store.write(|s| s.error_message = Some(message));
    }
}
