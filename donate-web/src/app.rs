//! Donate dApp root component

use leptos::prelude::*;
use shared::config::BridgeConfig;

use crate::components::Navbar;
use crate::pages::DonatePage;
use crate::state::bridge::provide_bridge_context;

#[component]
pub fn App() -> impl IntoView {
    let config = BridgeConfig::from_build_env().unwrap_or_else(|e| {
        log::error!("invalid build configuration, using defaults: {}", e);
        BridgeConfig::default()
    });
    log::info!("contract address: {}", config.contract_address);

    match provide_bridge_context(config) {
        Ok(_) => view! {
            <div class="app-container">
                <Navbar/>
                <DonatePage/>
            </div>
        }
        .into_any(),
        Err(e) => {
            log::error!("bridge initialization failed: {}", e);
            view! { <FatalError message=e.user_message()/> }.into_any()
        }
    }
}

#[component]
fn FatalError(message: String) -> impl IntoView {
    view! {
        <div class="app-container" style="display: flex; justify-content: center; align-items: center; min-height: 100vh;">
            <div class="card" style="max-width: 500px; text-align: center;">
                <h1 style="color: #ffffff; margin-bottom: 16px; font-size: 32px; font-weight: 700;">"Donate dApp unavailable"</h1>
                <p style="color: #cccccc;">{message}</p>
            </div>
        </div>
    }
}
