//! Bridge state management

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use shared::abi::ContractAbi;
use shared::bridge::{Bridge, BridgeState, FormField, StateStore};
use shared::config::BridgeConfig;
use shared::rpc::Eip1193;

use crate::services::ethereum::InjectedProvider;

/// [`BridgeState`] kept in a signal so the view re-renders on every bridge write.
#[derive(Clone, Copy)]
pub struct SignalStore(RwSignal<BridgeState>);

impl StateStore for SignalStore {
    fn read<R>(&self, f: impl FnOnce(&BridgeState) -> R) -> R {
        self.0.with_untracked(f)
    }

    fn write(&self, f: impl FnOnce(&mut BridgeState)) {
        self.0.update(f);
    }
}

pub type WebBridge = Bridge<SignalStore>;

/// Global bridge context
#[derive(Clone, Copy)]
pub struct BridgeContext {
    pub state: RwSignal<BridgeState>,
    bridge: StoredValue<Rc<WebBridge>, LocalStorage>,
}

impl BridgeContext {
    pub fn new(config: BridgeConfig) -> shared::Result<Self> {
        let abi = ContractAbi::donate()?;

        let provider = InjectedProvider::detect();
        match &provider {
            Some(p) if p.is_metamask() => log::info!("MetaMask provider detected"),
            Some(_) => log::info!("injected wallet provider detected"),
            None => log::warn!("no injected wallet provider"),
        }
        let provider = provider.map(|p| Rc::new(p) as Rc<dyn Eip1193>);

        let state = RwSignal::new(BridgeState::default());
        let bridge = Bridge::new(provider, abi, config, SignalStore(state));

        Ok(Self {
            state,
            bridge: StoredValue::new_local(Rc::new(bridge)),
        })
    }

    pub fn contract_address(&self) -> String {
        self.bridge.with_value(|bridge| bridge.contract_address().to_string())
    }

    pub fn set_input(&self, field: FormField, value: String) {
        self.bridge.with_value(|bridge| bridge.set_input(field, value));
    }

    pub fn disconnect(&self) {
        self.bridge.with_value(|bridge| bridge.disconnect());
    }

    /// Run a bridge operation on the local executor.
    pub fn spawn<F, Fut>(&self, operation: F)
    where
        F: FnOnce(Rc<WebBridge>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        let bridge = self.bridge.get_value();
        leptos::task::spawn_local(operation(bridge));
    }
}

pub fn provide_bridge_context(config: BridgeConfig) -> shared::Result<BridgeContext> {
    let context = BridgeContext::new(config)?;
    provide_context(context);
    Ok(context)
}

pub fn use_bridge_context() -> BridgeContext {
    expect_context::<BridgeContext>()
}
